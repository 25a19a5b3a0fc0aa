//! Report rendering
//!
//! The text layout is line-for-line compatible with the reports operators
//! already script against; keep header strings stable.

use std::str::FromStr;
use crate::{Error, Result};
use super::engine::ShopReport;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Text => "text",
            ReportFormat::Json => "json",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "plain" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            _ => Err(Error::InvalidFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::fmt::Display for ShopReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Company information:")?;
        for entry in &self.companies {
            writeln!(f)?;
            writeln!(f, "Company: {}", entry.company.name)?;
            writeln!(f, "Stores:")?;
            for store in &entry.stores {
                writeln!(f, "- {}", store.store.name)?;
                writeln!(f, "  Customers: {}", store.customer_names())?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Customer information:")?;
        for entry in &self.customers {
            writeln!(f)?;
            writeln!(f, "Customer: {}", entry.customer.full_name)?;
            writeln!(f, "Stores:")?;
            for store in &entry.stores {
                writeln!(f, "- {} ({})", store.store.name, store.company.name)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Companies with more than {} stores:", self.thresholds.large_company)?;
        for company in &self.large_companies {
            writeln!(f, "{}: {} stores", company.name, company.store_count)?;
        }

        writeln!(f)?;
        if self.thresholds.multi_store == 1 {
            writeln!(f, "Customers registered in multiple stores:")?;
        } else {
            writeln!(f, "Customers registered in more than {} stores:", self.thresholds.multi_store)?;
        }
        for customer in &self.multi_store_customers {
            writeln!(f, "{}: {} stores", customer.full_name, customer.store_count)?;
        }

        Ok(())
    }
}

/// Render the report as console text
pub fn render_text(report: &ShopReport) -> String {
    report.to_string()
}

/// Render the report as pretty-printed JSON
pub fn render_json(report: &ShopReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;
    use crate::report::engine::{ReportEngine, Thresholds};
    use crate::seed::{self, SeedData};
    use crate::storage::ShopStore;

    fn small_report() -> ShopReport {
        let acme = Company { id: 1, name: "Acme".to_string() };
        let north = Store { id: 1, name: "North".to_string(), company_id: 1 };
        let south = Store { id: 2, name: "South".to_string(), company_id: 1 };
        let ann = Customer { id: 1, full_name: "Ann Lee".to_string() };

        ShopReport {
            thresholds: Thresholds::default(),
            companies: vec![CompanyWithStores {
                company: acme.clone(),
                stores: vec![
                    StoreWithCustomers { store: north.clone(), customers: vec![ann.clone()] },
                    StoreWithCustomers { store: south, customers: vec![] },
                ],
            }],
            customers: vec![CustomerWithStores {
                customer: ann,
                stores: vec![StoreWithCompany { store: north, company: acme }],
            }],
            large_companies: vec![],
            multi_store_customers: vec![],
        }
    }

    #[test]
    fn test_text_layout_is_literal() {
        let expected = concat!(
            "Company information:\n",
            "\n",
            "Company: Acme\n",
            "Stores:\n",
            "- North\n",
            "  Customers: Ann Lee\n",
            "- South\n",
            "  Customers: \n",
            "\n",
            "Customer information:\n",
            "\n",
            "Customer: Ann Lee\n",
            "Stores:\n",
            "- North (Acme)\n",
            "\n",
            "Companies with more than 5 stores:\n",
            "\n",
            "Customers registered in multiple stores:\n",
        );
        assert_eq!(render_text(&small_report()), expected);
    }

    #[test]
    fn test_seeded_report_sections() {
        let mut store = ShopStore::open_in_memory().unwrap();
        seed::seed(&mut store, &SeedData::shop()).unwrap();
        let text = render_text(&ReportEngine::new(&store).build().unwrap());

        assert!(text.contains("- Gadget Center\n  Customers: Emily Johnson, Michael Brown\n"));
        assert!(text.contains("Customer: Emily Johnson\nStores:\n- Food on Main St (Supermarkets 'Food')\n- Gadget Center (Electronics 'Gadget')\n"));
        assert!(text.ends_with(
            "Companies with more than 5 stores:\nMega Corporation: 6 stores\n\n\
             Customers registered in multiple stores:\nJohn Smith: 2 stores\nEmily Johnson: 2 stores\n"
        ));
        assert!(!text.contains("Supermarkets 'Food': 2 stores"));
        assert!(!text.contains("Electronics 'Gadget': 1 stores"));
    }

    #[test]
    fn test_threshold_in_headers() {
        let mut report = small_report();
        report.thresholds = Thresholds { large_company: 10, multi_store: 3 };
        let text = render_text(&report);
        assert!(text.contains("Companies with more than 10 stores:\n"));
        assert!(text.contains("Customers registered in more than 3 stores:\n"));
    }

    #[test]
    fn test_json_render() {
        let json = render_json(&small_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["companies"][0]["company"]["name"], "Acme");
        assert_eq!(value["thresholds"]["large_company"], 5);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(ReportFormat::from_str("JSON").unwrap(), ReportFormat::Json);
        assert_eq!(ReportFormat::from_str("text").unwrap(), ReportFormat::Text);
        assert!(matches!(ReportFormat::from_str("xml"), Err(Error::InvalidFormat(_))));
    }
}
