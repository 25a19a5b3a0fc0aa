//! Run phases
//!
//! Each phase opens its own session and drops it before returning, on the
//! error path as well. The full run is reset → seed → report.

use std::path::Path;
use crate::Result;
use crate::report::{ReportEngine, ShopReport, Thresholds};
use crate::seed::{self, SeedData, SeedSummary};
use crate::storage::{DbStats, ShopStore};

/// Drop and recreate the schema. Destroys all data in the database.
pub fn reset_database(path: &Path) -> Result<()> {
    tracing::info!("Resetting database {:?}", path);
    let mut store = ShopStore::open(path)?;
    store.reset()
}

/// Write `data` in one transaction
pub fn seed_database(path: &Path, data: &SeedData) -> Result<SeedSummary> {
    tracing::info!("Seeding database {:?}", path);
    let mut store = ShopStore::open(path)?;
    seed::seed(&mut store, data)
}

/// Run all four reports against committed state
pub fn build_report(path: &Path, thresholds: Thresholds) -> Result<ShopReport> {
    tracing::info!("Building reports from {:?}", path);
    let store = ShopStore::open(path)?;
    ReportEngine::new(&store).with_thresholds(thresholds).build()
}

/// Row counts per table
pub fn database_stats(path: &Path) -> Result<DbStats> {
    let store = ShopStore::open(path)?;
    store.stats()
}

/// The complete run: destructive reset, seed with the demo shop, report
pub fn run(path: &Path, thresholds: Thresholds) -> Result<ShopReport> {
    reset_database(path)?;
    seed_database(path, &SeedData::shop())?;
    build_report(path, thresholds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_full_run_counts() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("shop.db");

        let report = run(&db, Thresholds::default()).unwrap();
        assert_eq!(report.companies.len(), 3);
        assert_eq!(report.large_companies.len(), 1);
        assert_eq!(report.multi_store_customers.len(), 2);

        let stats = database_stats(&db).unwrap();
        assert_eq!(stats, DbStats { companies: 3, stores: 9, customers: 3, store_customers: 5 });
    }

    #[test]
    fn test_reset_and_seed_twice_does_not_accumulate() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("shop.db");

        run(&db, Thresholds::default()).unwrap();
        let first = database_stats(&db).unwrap();
        run(&db, Thresholds::default()).unwrap();
        let second = database_stats(&db).unwrap();

        assert_eq!(first, second);
        assert_eq!(second.stores, 9);
    }

    #[test]
    fn test_failed_seed_leaves_committed_rows_intact() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("shop.db");

        reset_database(&db).unwrap();
        seed_database(&db, &SeedData::shop()).unwrap();

        // Duplicate pair: fails on the last insert, after the other rows went in
        let mut data = SeedData::default();
        let c = data.add_company("Late Co");
        let s = data.add_store("Late Store", c);
        let cu = data.add_customer("Late Customer");
        data.link(s, cu);
        data.link(s, cu);
        let result = seed_database(&db, &data);
        assert!(matches!(result, Err(Error::Storage(_))));

        let stats = database_stats(&db).unwrap();
        assert_eq!(stats, DbStats { companies: 3, stores: 9, customers: 3, store_customers: 5 });
    }

    #[test]
    fn test_report_round_trips_seeded_names() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("shop.db");
        let data = SeedData::shop();

        let report = run(&db, Thresholds::default()).unwrap();

        let companies: Vec<String> = report.companies.iter().map(|c| c.company.name.clone()).collect();
        assert_eq!(companies, data.companies);

        let stores: Vec<String> = report
            .companies
            .iter()
            .flat_map(|c| c.stores.iter().map(|s| s.store.name.clone()))
            .collect();
        let seeded: Vec<String> = data.stores.iter().map(|s| s.name.clone()).collect();
        assert_eq!(stores, seeded);

        let customers: Vec<String> = report.customers.iter().map(|c| c.customer.full_name.clone()).collect();
        assert_eq!(customers, data.customers);
    }
}
