pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{error, info, phase, success, summary_row};
pub use table::{TableBuilder, stats_table};
pub use theme::{theme, Theme};
