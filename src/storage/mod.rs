//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - companies(id, name)
//! - stores(id, name, company_id)
//! - customers(id, full_name)
//! - store_customer(store_id, customer_id)

pub mod schema;
pub mod sqlite;

pub use sqlite::{ShopStore, DbStats};
