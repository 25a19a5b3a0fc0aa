//! Report engine
//!
//! Runs the four read reports against one session:
//! - By company: companies → stores → customers
//! - By customer: customers → stores → owning company
//! - Large companies: store count above a threshold
//! - Multi-store customers: store count above a threshold

use serde::Serialize;
use crate::Result;
use crate::model::{CompanyStoreCount, CompanyWithStores, CustomerStoreCount, CustomerWithStores};
use crate::storage::ShopStore;

/// Store-count thresholds for the two filter reports (exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Thresholds {
    pub large_company: usize,
    pub multi_store: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { large_company: 5, multi_store: 1 }
    }
}

/// All four reports, fully materialized
#[derive(Debug, Clone, Serialize)]
pub struct ShopReport {
    pub thresholds: Thresholds,
    pub companies: Vec<CompanyWithStores>,
    pub customers: Vec<CustomerWithStores>,
    pub large_companies: Vec<CompanyStoreCount>,
    pub multi_store_customers: Vec<CustomerStoreCount>,
}

/// Read-only report runner over a store
pub struct ReportEngine<'a> {
    store: &'a ShopStore,
    thresholds: Thresholds,
}

impl<'a> ReportEngine<'a> {
    /// Create a report engine with the default thresholds
    pub fn new(store: &'a ShopStore) -> Self {
        Self { store, thresholds: Thresholds::default() }
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Every company with its stores and their customers
    pub fn by_company(&self) -> Result<Vec<CompanyWithStores>> {
        self.store.load_company_graph()
    }

    /// Every customer with its stores and their owners
    pub fn by_customer(&self) -> Result<Vec<CustomerWithStores>> {
        self.store.load_customer_graph()
    }

    /// Companies with more stores than the large-company threshold
    pub fn large_companies(&self) -> Result<Vec<CompanyStoreCount>> {
        self.store.companies_with_more_stores_than(self.thresholds.large_company)
    }

    /// Customers registered in more stores than the multi-store threshold
    pub fn multi_store_customers(&self) -> Result<Vec<CustomerStoreCount>> {
        self.store.customers_with_more_stores_than(self.thresholds.multi_store)
    }

    /// Run every report. Fails as a whole if any query fails.
    pub fn build(&self) -> Result<ShopReport> {
        let report = ShopReport {
            thresholds: self.thresholds,
            companies: self.by_company()?,
            customers: self.by_customer()?,
            large_companies: self.large_companies()?,
            multi_store_customers: self.multi_store_customers()?,
        };
        tracing::debug!(
            companies = report.companies.len(),
            customers = report.customers.len(),
            "Reports built"
        );
        Ok(report)
    }
}
