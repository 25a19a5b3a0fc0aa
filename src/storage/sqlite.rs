//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, Transaction, params};
use crate::Result;
use crate::model::{
    Company, CompanyStoreCount, CompanyWithStores, Customer, CustomerStoreCount,
    CustomerWithStores, Store, StoreCustomer, StoreWithCompany, StoreWithCustomers,
};
use super::schema;

/// SQLite-backed storage for companies, stores and customers.
///
/// One `ShopStore` is one session: it owns a single connection, which is
/// closed when the store is dropped.
pub struct ShopStore {
    conn: Connection,
}

impl ShopStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        tracing::debug!("Opening database {:?}", path);
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.configure()?;
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.configure()?;
        store.initialize_schema()?;
        Ok(store)
    }

    fn configure(&self) -> Result<()> {
        self.conn.pragma_update(None, "foreign_keys", true)?;
        Ok(())
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Drop every table and recreate the schema.
    ///
    /// Destructive: all rows are lost. Runs as one transaction, so a failure
    /// leaves the previous schema and data in place.
    pub fn reset(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        for stmt in schema::drop_statements() {
            tx.execute(&stmt, [])?;
        }
        for stmt in schema::all_schema_statements() {
            tx.execute(stmt, [])?;
        }
        tx.commit()?;
        tracing::debug!("Schema dropped and recreated");
        Ok(())
    }

    /// Begin a transaction for bulk writes. Rolled back on drop unless committed.
    pub fn transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }

    // ========== Insert Operations ==========

    /// Insert a company, returning its assigned id
    pub fn insert_company(&self, name: &str) -> Result<i64> {
        insert_company_on(&self.conn, name)
    }

    /// Insert a store owned by `company_id`, returning its assigned id
    pub fn insert_store(&self, name: &str, company_id: i64) -> Result<i64> {
        insert_store_on(&self.conn, name, company_id)
    }

    /// Insert a customer, returning its assigned id
    pub fn insert_customer(&self, full_name: &str) -> Result<i64> {
        insert_customer_on(&self.conn, full_name)
    }

    /// Register a customer in a store
    pub fn link_store_customer(&self, store_id: i64, customer_id: i64) -> Result<()> {
        link_on(&self.conn, store_id, customer_id)
    }

    /// Insert a company within a transaction
    pub fn insert_company_tx(tx: &Transaction, name: &str) -> Result<i64> {
        insert_company_on(tx, name)
    }

    /// Insert a store within a transaction
    pub fn insert_store_tx(tx: &Transaction, name: &str, company_id: i64) -> Result<i64> {
        insert_store_on(tx, name, company_id)
    }

    /// Insert a customer within a transaction
    pub fn insert_customer_tx(tx: &Transaction, full_name: &str) -> Result<i64> {
        insert_customer_on(tx, full_name)
    }

    /// Register a customer in a store within a transaction
    pub fn link_store_customer_tx(tx: &Transaction, store_id: i64, customer_id: i64) -> Result<()> {
        link_on(tx, store_id, customer_id)
    }

    // ========== Row Listing ==========

    /// All companies, by id
    pub fn list_companies(&self) -> Result<Vec<Company>> {
        let mut stmt = self.conn.prepare("SELECT id, name FROM companies ORDER BY id")?;
        let companies = stmt
            .query_map([], |row| Ok(Company { id: row.get(0)?, name: row.get(1)? }))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(companies)
    }

    /// All stores, by id
    pub fn list_stores(&self) -> Result<Vec<Store>> {
        let mut stmt = self.conn.prepare("SELECT id, name, company_id FROM stores ORDER BY id")?;
        let stores = stmt
            .query_map([], |row| {
                Ok(Store { id: row.get(0)?, name: row.get(1)?, company_id: row.get(2)? })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(stores)
    }

    /// All customers, by id
    pub fn list_customers(&self) -> Result<Vec<Customer>> {
        let mut stmt = self.conn.prepare("SELECT id, full_name FROM customers ORDER BY id")?;
        let customers = stmt
            .query_map([], |row| Ok(Customer { id: row.get(0)?, full_name: row.get(1)? }))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(customers)
    }

    /// All store/customer pairs
    pub fn list_store_customers(&self) -> Result<Vec<StoreCustomer>> {
        let mut stmt = self.conn.prepare(
            "SELECT store_id, customer_id FROM store_customer ORDER BY store_id, customer_id"
        )?;
        let links = stmt
            .query_map([], |row| Ok(StoreCustomer { store_id: row.get(0)?, customer_id: row.get(1)? }))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(links)
    }

    // ========== Graph Queries ==========

    /// Every company with its stores and each store's customers.
    ///
    /// One LEFT JOIN query; rows arrive ordered by company, store, customer
    /// and are folded into the nested graph.
    pub fn load_company_graph(&self) -> Result<Vec<CompanyWithStores>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT c.id, c.name, s.id, s.name, cu.id, cu.full_name
            FROM companies c
            LEFT JOIN stores s ON s.company_id = c.id
            LEFT JOIN store_customer sc ON sc.store_id = s.id
            LEFT JOIN customers cu ON cu.id = sc.customer_id
            ORDER BY c.id, s.id, cu.id
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                Company { id: row.get(0)?, name: row.get(1)? },
                row.get::<_, Option<i64>>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, Option<i64>>(4)?,
                row.get::<_, Option<String>>(5)?,
            ))
        })?;

        let mut graph: Vec<CompanyWithStores> = Vec::new();
        for row in rows {
            let (company, store_id, store_name, customer_id, customer_name) = row?;

            if graph.last().map(|c| c.company.id) != Some(company.id) {
                graph.push(CompanyWithStores { company, stores: Vec::new() });
            }
            let Some(entry) = graph.last_mut() else { continue };

            let (Some(store_id), Some(store_name)) = (store_id, store_name) else { continue };
            if entry.stores.last().map(|s| s.store.id) != Some(store_id) {
                entry.stores.push(StoreWithCustomers {
                    store: Store { id: store_id, name: store_name, company_id: entry.company.id },
                    customers: Vec::new(),
                });
            }

            if let (Some(id), Some(full_name)) = (customer_id, customer_name) {
                if let Some(store) = entry.stores.last_mut() {
                    store.customers.push(Customer { id, full_name });
                }
            }
        }

        Ok(graph)
    }

    /// Every customer with its stores and each store's owning company.
    pub fn load_customer_graph(&self) -> Result<Vec<CustomerWithStores>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT cu.id, cu.full_name, s.id, s.name, co.id, co.name
            FROM customers cu
            LEFT JOIN store_customer sc ON sc.customer_id = cu.id
            LEFT JOIN stores s ON s.id = sc.store_id
            LEFT JOIN companies co ON co.id = s.company_id
            ORDER BY cu.id, s.id
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                Customer { id: row.get(0)?, full_name: row.get(1)? },
                row.get::<_, Option<i64>>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, Option<i64>>(4)?,
                row.get::<_, Option<String>>(5)?,
            ))
        })?;

        let mut graph: Vec<CustomerWithStores> = Vec::new();
        for row in rows {
            let (customer, store_id, store_name, company_id, company_name) = row?;

            if graph.last().map(|c| c.customer.id) != Some(customer.id) {
                graph.push(CustomerWithStores { customer, stores: Vec::new() });
            }
            let Some(entry) = graph.last_mut() else { continue };

            if let (Some(store_id), Some(store_name), Some(company_id), Some(company_name)) =
                (store_id, store_name, company_id, company_name)
            {
                entry.stores.push(StoreWithCompany {
                    store: Store { id: store_id, name: store_name, company_id },
                    company: Company { id: company_id, name: company_name },
                });
            }
        }

        Ok(graph)
    }

    // ========== Aggregate Queries ==========

    /// Companies owning more than `threshold` stores
    pub fn companies_with_more_stores_than(&self, threshold: usize) -> Result<Vec<CompanyStoreCount>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT c.name, COUNT(s.id)
            FROM companies c
            LEFT JOIN stores s ON s.company_id = c.id
            GROUP BY c.id
            HAVING COUNT(s.id) > ?1
            ORDER BY c.id
            "#,
        )?;

        let counts = stmt
            .query_map(params![threshold as i64], |row| {
                Ok(CompanyStoreCount {
                    name: row.get(0)?,
                    store_count: row.get::<_, i64>(1)? as usize,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(counts)
    }

    /// Customers registered in more than `threshold` stores
    pub fn customers_with_more_stores_than(&self, threshold: usize) -> Result<Vec<CustomerStoreCount>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT cu.full_name, COUNT(sc.store_id)
            FROM customers cu
            LEFT JOIN store_customer sc ON sc.customer_id = cu.id
            GROUP BY cu.id
            HAVING COUNT(sc.store_id) > ?1
            ORDER BY cu.id
            "#,
        )?;

        let counts = stmt
            .query_map(params![threshold as i64], |row| {
                Ok(CustomerStoreCount {
                    full_name: row.get(0)?,
                    store_count: row.get::<_, i64>(1)? as usize,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(counts)
    }

    // ========== Statistics ==========

    fn count_rows(&self, table: &str) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Count all companies
    pub fn count_companies(&self) -> Result<usize> {
        self.count_rows("companies")
    }

    /// Count all stores
    pub fn count_stores(&self) -> Result<usize> {
        self.count_rows("stores")
    }

    /// Count all customers
    pub fn count_customers(&self) -> Result<usize> {
        self.count_rows("customers")
    }

    /// Count store/customer pairs
    pub fn count_store_customers(&self) -> Result<usize> {
        self.count_rows("store_customer")
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            companies: self.count_companies()?,
            stores: self.count_stores()?,
            customers: self.count_customers()?,
            store_customers: self.count_store_customers()?,
        })
    }
}

fn insert_company_on(conn: &Connection, name: &str) -> Result<i64> {
    conn.execute("INSERT INTO companies (name) VALUES (?1)", [name])?;
    Ok(conn.last_insert_rowid())
}

fn insert_store_on(conn: &Connection, name: &str, company_id: i64) -> Result<i64> {
    conn.execute(
        "INSERT INTO stores (name, company_id) VALUES (?1, ?2)",
        params![name, company_id],
    )?;
    Ok(conn.last_insert_rowid())
}

fn insert_customer_on(conn: &Connection, full_name: &str) -> Result<i64> {
    conn.execute("INSERT INTO customers (full_name) VALUES (?1)", [full_name])?;
    Ok(conn.last_insert_rowid())
}

fn link_on(conn: &Connection, store_id: i64, customer_id: i64) -> Result<()> {
    conn.execute(
        "INSERT INTO store_customer (store_id, customer_id) VALUES (?1, ?2)",
        params![store_id, customer_id],
    )?;
    Ok(())
}

/// Database statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct DbStats {
    pub companies: usize,
    pub stores: usize,
    pub customers: usize,
    pub store_customers: usize,
}
