//! # shopdb - Companies, stores and customers on SQLite
//!
//! A small relational demo:
//! - Three entity tables plus one associative table
//! - A fixed seed data set written in a single transaction
//! - Four read reports built from join and aggregate queries

pub mod model;
pub mod storage;
pub mod seed;
pub mod report;
pub mod pipeline;
pub mod ui;
pub mod output;
pub mod config;

// Re-exports for convenient access
pub use model::{Company, Customer, Store, StoreCustomer};
pub use storage::ShopStore;
pub use seed::{SeedData, SeedSummary};
pub use report::{ReportEngine, ReportFormat, ShopReport};

/// Result type alias for shopdb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for shopdb operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Seed error: {0}")]
    Seed(String),

    #[error("Invalid report format: {0}")]
    InvalidFormat(String),
}
