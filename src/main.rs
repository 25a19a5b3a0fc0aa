//! shopdb CLI - seed and report on the companies/stores/customers database

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use shopdb::config::{self, ShopConfig};
use shopdb::output::is_quiet;
use shopdb::report::{self, ReportFormat, ShopReport};
use shopdb::seed::SeedData;
use shopdb::pipeline;
use shopdb::ui::{self, Icons};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "shopdb")]
#[command(version)]
#[command(about = "Companies, stores and customers - a relational seed-and-report demo")]
#[command(long_about = r#"
shopdb keeps companies, their stores and the customers registered in those
stores in a SQLite database, and prints four reports over them.

Running without a subcommand resets the database, seeds the demo data and
prints the reports.

Example usage:
  shopdb
  shopdb run --database ./data/shop.db --format json
  shopdb report
  shopdb stats
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reset the database, seed the demo data and print every report
    Run {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Drop and recreate the schema (destroys all data)
    Reset {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Write the demo data into the existing schema
    Seed {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Print every report without touching the data
    Report {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show row counts per table
    Stats {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Write a starter shopdb.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(e) = run_cli(cli) {
        ui::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let shop_config = config::load_config(cli.config.as_deref())?.unwrap_or_default();
    let quiet = is_quiet();

    let command = cli.command.unwrap_or(Commands::Run {
        database: None,
        format: ReportFormat::Text.to_string(),
    });

    match command {
        Commands::Run { database, format } => {
            let format: ReportFormat = format.parse()?;
            let db = resolve_database(&shop_config, database.as_deref())?;
            let report = pipeline::run(&db, shop_config.thresholds())?;
            print_report(&report, format)?;
        }

        Commands::Reset { database } => {
            let db = resolve_database(&shop_config, database.as_deref())?;
            if !quiet {
                ui::phase(Icons::BROOM, "Resetting database");
                ui::info("Database", &db.display().to_string());
            }
            pipeline::reset_database(&db)?;
            if !quiet {
                ui::success("Schema dropped and recreated");
            }
        }

        Commands::Seed { database } => {
            let db = resolve_database(&shop_config, database.as_deref())?;
            if !quiet {
                ui::phase(Icons::SEED, "Seeding demo data");
                ui::info("Database", &db.display().to_string());
            }
            let summary = pipeline::seed_database(&db, &SeedData::shop())?;
            if !quiet {
                ui::success("Seed committed");
                ui::summary_row("Companies:", &summary.companies.to_string());
                ui::summary_row("Stores:", &summary.stores.to_string());
                ui::summary_row("Customers:", &summary.customers.to_string());
                ui::summary_row("Links:", &summary.links.to_string());
            }
        }

        Commands::Report { database, format } => {
            let format: ReportFormat = format.parse()?;
            let db = resolve_database(&shop_config, database.as_deref())?;
            let report = pipeline::build_report(&db, shop_config.thresholds())?;
            print_report(&report, format)?;
        }

        Commands::Stats { database } => {
            let db = resolve_database(&shop_config, database.as_deref())?;
            let stats = pipeline::database_stats(&db)?;

            ui::phase(Icons::STATS, &format!("shopdb statistics ({})", db.display()));
            println!("{}", ui::stats_table(&stats));
        }

        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            config::write_config(&path, &ShopConfig::starter(), force)?;
            if !quiet {
                ui::success(&format!("Wrote {}", path.display()));
            }
        }
    }

    Ok(())
}

fn resolve_database(shop_config: &ShopConfig, cli_override: Option<&Path>) -> anyhow::Result<PathBuf> {
    let db = shop_config.database_path(cli_override);
    config::ensure_db_dir(&db)?;
    Ok(db)
}

fn print_report(shop_report: &ShopReport, format: ReportFormat) -> anyhow::Result<()> {
    match format {
        ReportFormat::Text => print!("{}", report::render_text(shop_report)),
        ReportFormat::Json => println!("{}", report::render_json(shop_report)?),
    }
    Ok(())
}
