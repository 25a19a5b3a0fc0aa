//! Entity types and the object graphs the reports are built from
//!
//! Rows map one-to-one onto tables:
//! - `Company`: companies(id, name)
//! - `Store`: stores(id, name, company_id)
//! - `Customer`: customers(id, full_name)
//! - `StoreCustomer`: store_customer(store_id, customer_id)

use serde::{Deserialize, Serialize};

/// A company owning one or more stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Surrogate id assigned by the store
    pub id: i64,
    pub name: String,
}

/// A store. Always belongs to exactly one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: i64,
    pub name: String,
    /// Owning company (mandatory foreign key)
    pub company_id: i64,
}

/// A customer, registered in zero or more stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub full_name: String,
}

/// One row of the store/customer associative table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreCustomer {
    pub store_id: i64,
    pub customer_id: i64,
}

/// A company with its stores, each with its customers.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyWithStores {
    pub company: Company,
    pub stores: Vec<StoreWithCustomers>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoreWithCustomers {
    pub store: Store,
    pub customers: Vec<Customer>,
}

impl StoreWithCustomers {
    /// Customer full names joined with ", " (empty when the store has none)
    pub fn customer_names(&self) -> String {
        self.customers
            .iter()
            .map(|c| c.full_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A customer with the stores it is registered in, each with its owner.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerWithStores {
    pub customer: Customer,
    pub stores: Vec<StoreWithCompany>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoreWithCompany {
    pub store: Store,
    pub company: Company,
}

/// Projection of a company onto its store count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyStoreCount {
    pub name: String,
    pub store_count: usize,
}

/// Projection of a customer onto the number of stores it is registered in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerStoreCount {
    pub full_name: String,
    pub store_count: usize,
}
