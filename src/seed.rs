//! Seed data - the fixed set of companies, stores and customers
//!
//! Seed records refer to each other by position rather than by id, since ids
//! are only known once the store assigns them. `seed` resolves positions to
//! ids while writing, inside a single transaction.

use crate::storage::ShopStore;
use crate::{Error, Result};

/// A store to seed, owned by the company at `company` in `SeedData::companies`
#[derive(Debug, Clone)]
pub struct SeedStore {
    pub name: String,
    pub company: usize,
}

/// A (store position, customer position) pair to link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedLink {
    pub store: usize,
    pub customer: usize,
}

/// In-memory records awaiting persistence
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub companies: Vec<String>,
    pub stores: Vec<SeedStore>,
    pub customers: Vec<String>,
    pub links: Vec<SeedLink>,
}

impl SeedData {
    /// The demo shop: 3 companies, 9 stores (2/1/6), 3 customers, 4 links
    pub fn shop() -> Self {
        let mut data = SeedData::default();

        let food = data.add_company("Supermarkets 'Food'");
        let gadget = data.add_company("Electronics 'Gadget'");
        let mega = data.add_company("Mega Corporation");

        let main_st = data.add_store("Food on Main St", food);
        let oak_st = data.add_store("Food on Oak St", food);
        let gadget_center = data.add_store("Gadget Center", gadget);
        for n in 1..=6 {
            data.add_store(&format!("Mega Store {}", n), mega);
        }

        let john = data.add_customer("John Smith");
        let emily = data.add_customer("Emily Johnson");
        let michael = data.add_customer("Michael Brown");

        data.link(main_st, john);
        data.link(main_st, emily);
        data.link(oak_st, john);
        data.link(gadget_center, emily);
        data.link(gadget_center, michael);

        data
    }

    /// Add a company, returning its position
    pub fn add_company(&mut self, name: &str) -> usize {
        self.companies.push(name.to_string());
        self.companies.len() - 1
    }

    /// Add a store owned by the company at `company`, returning its position
    pub fn add_store(&mut self, name: &str, company: usize) -> usize {
        self.stores.push(SeedStore { name: name.to_string(), company });
        self.stores.len() - 1
    }

    /// Add a customer, returning its position
    pub fn add_customer(&mut self, full_name: &str) -> usize {
        self.customers.push(full_name.to_string());
        self.customers.len() - 1
    }

    /// Register the customer at `customer` in the store at `store`
    pub fn link(&mut self, store: usize, customer: usize) {
        self.links.push(SeedLink { store, customer });
    }

    /// Check that every position refers to an existing record
    pub fn validate(&self) -> Result<()> {
        for store in &self.stores {
            if store.company >= self.companies.len() {
                return Err(Error::Seed(format!(
                    "store '{}' refers to company #{} but only {} companies exist",
                    store.name, store.company, self.companies.len()
                )));
            }
        }
        for link in &self.links {
            if link.store >= self.stores.len() {
                return Err(Error::Seed(format!("link refers to missing store #{}", link.store)));
            }
            if link.customer >= self.customers.len() {
                return Err(Error::Seed(format!("link refers to missing customer #{}", link.customer)));
            }
        }
        Ok(())
    }
}

/// Rows written by one seed run
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SeedSummary {
    pub companies: usize,
    pub stores: usize,
    pub customers: usize,
    pub links: usize,
}

impl std::fmt::Display for SeedSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} companies, {} stores, {} customers, {} links",
            self.companies, self.stores, self.customers, self.links
        )
    }
}

/// Write `data` to `store` in one transaction.
///
/// Either every row is committed or none is: any failure drops the
/// transaction, which rolls it back.
pub fn seed(store: &mut ShopStore, data: &SeedData) -> Result<SeedSummary> {
    data.validate()?;

    let tx = store.transaction()?;

    let mut company_ids = Vec::with_capacity(data.companies.len());
    for name in &data.companies {
        company_ids.push(ShopStore::insert_company_tx(&tx, name)?);
    }

    let mut store_ids = Vec::with_capacity(data.stores.len());
    for s in &data.stores {
        store_ids.push(ShopStore::insert_store_tx(&tx, &s.name, company_ids[s.company])?);
    }

    let mut customer_ids = Vec::with_capacity(data.customers.len());
    for full_name in &data.customers {
        customer_ids.push(ShopStore::insert_customer_tx(&tx, full_name)?);
    }

    for link in &data.links {
        ShopStore::link_store_customer_tx(&tx, store_ids[link.store], customer_ids[link.customer])?;
    }

    tx.commit()?;

    let summary = SeedSummary {
        companies: company_ids.len(),
        stores: store_ids.len(),
        customers: customer_ids.len(),
        links: data.links.len(),
    };
    tracing::info!("Seeded {}", summary);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shop_seed_shape() {
        let data = SeedData::shop();
        assert_eq!(data.companies.len(), 3);
        assert_eq!(data.stores.len(), 9);
        assert_eq!(data.customers.len(), 3);
        assert_eq!(data.links.len(), 5);

        let per_company: Vec<usize> = (0..3)
            .map(|c| data.stores.iter().filter(|s| s.company == c).count())
            .collect();
        assert_eq!(per_company, vec![2, 1, 6]);
        data.validate().unwrap();
    }

    #[test]
    fn test_seed_writes_every_row() {
        let mut store = ShopStore::open_in_memory().unwrap();
        let summary = seed(&mut store, &SeedData::shop()).unwrap();

        assert_eq!(summary, SeedSummary { companies: 3, stores: 9, customers: 3, links: 5 });
        let stats = store.stats().unwrap();
        assert_eq!(stats.companies, 3);
        assert_eq!(stats.stores, 9);
        assert_eq!(stats.customers, 3);
        assert_eq!(stats.store_customers, 5);
    }

    #[test]
    fn test_every_store_has_a_seeded_company() {
        let mut store = ShopStore::open_in_memory().unwrap();
        seed(&mut store, &SeedData::shop()).unwrap();

        let company_ids: Vec<i64> = store.list_companies().unwrap().iter().map(|c| c.id).collect();
        for s in store.list_stores().unwrap() {
            assert!(company_ids.contains(&s.company_id), "store {} has dangling company", s.name);
        }

        let store_ids: Vec<i64> = store.list_stores().unwrap().iter().map(|s| s.id).collect();
        let customer_ids: Vec<i64> = store.list_customers().unwrap().iter().map(|c| c.id).collect();
        let links = store.list_store_customers().unwrap();
        assert_eq!(links.len(), 5);
        for link in links {
            assert!(store_ids.contains(&link.store_id));
            assert!(customer_ids.contains(&link.customer_id));
        }
    }

    #[test]
    fn test_dangling_position_rejected_before_write() {
        let mut store = ShopStore::open_in_memory().unwrap();
        let mut data = SeedData::default();
        data.add_company("Acme");
        data.add_store("North", 3);

        let result = seed(&mut store, &data);
        assert!(matches!(result, Err(Error::Seed(_))));
        assert_eq!(store.count_companies().unwrap(), 0);
    }

    #[test]
    fn test_constraint_violation_rolls_back_everything() {
        let mut store = ShopStore::open_in_memory().unwrap();
        let mut data = SeedData::default();
        let acme = data.add_company("Acme");
        let north = data.add_store("North", acme);
        let ann = data.add_customer("Ann Lee");
        data.link(north, ann);
        data.link(north, ann);

        let result = seed(&mut store, &data);
        assert!(matches!(result, Err(Error::Storage(_))));

        let stats = store.stats().unwrap();
        assert_eq!(stats.companies, 0);
        assert_eq!(stats.stores, 0);
        assert_eq!(stats.customers, 0);
        assert_eq!(stats.store_customers, 0);
    }
}
