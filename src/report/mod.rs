pub mod engine;
pub mod render;

pub use engine::{ReportEngine, ShopReport, Thresholds};
pub use render::{ReportFormat, render_json, render_text};
