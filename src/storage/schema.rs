//! Database schema definitions

/// SQL to create the companies table
pub const CREATE_COMPANIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS companies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
)
"#;

/// SQL to create the stores table
/// Every store belongs to exactly one company
pub const CREATE_STORES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS stores (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    company_id INTEGER NOT NULL REFERENCES companies(id) ON DELETE CASCADE
)
"#;

/// SQL to create the customers table
pub const CREATE_CUSTOMERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS customers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name TEXT NOT NULL
)
"#;

/// SQL to create the store_customer associative table
pub const CREATE_STORE_CUSTOMER_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS store_customer (
    store_id INTEGER NOT NULL REFERENCES stores(id) ON DELETE CASCADE,
    customer_id INTEGER NOT NULL REFERENCES customers(id) ON DELETE CASCADE,
    PRIMARY KEY (store_id, customer_id)
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_stores_company ON stores(company_id)",
    "CREATE INDEX IF NOT EXISTS idx_store_customer_customer ON store_customer(customer_id)",
];

/// Tables in drop order (children first)
pub const TABLES_DROP_ORDER: &[&str] = &["store_customer", "stores", "customers", "companies"];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_COMPANIES_TABLE,
        CREATE_STORES_TABLE,
        CREATE_CUSTOMERS_TABLE,
        CREATE_STORE_CUSTOMER_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}

/// Statements that remove every table (indexes go with their tables)
pub fn drop_statements() -> Vec<String> {
    TABLES_DROP_ORDER
        .iter()
        .map(|table| format!("DROP TABLE IF EXISTS {}", table))
        .collect()
}
