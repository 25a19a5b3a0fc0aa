pub struct Icons;

impl Icons {
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const SEED: &str = "🌱";
    pub const BROOM: &str = "🧹";
}
