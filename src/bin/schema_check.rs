//! Command-line tool listing the exported schemas and checking JSON payloads against them.

use std::env;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use config::Config;
use dotenvy::dotenv;

use fieldservice_models::catalog::{self, Catalog};
use fieldservice_models::checker::{self, PayloadReport};
use fieldservice_models::config::CheckerConfig;

#[derive(Debug, Parser)]
#[command(name = "schema_check")]
#[command(about = "Inspect the field-service schema catalog and check payloads against it")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every exported schema in declaration order.
    List,
    /// Print the domain, role and Rust type of one schema.
    Show { name: String },
    /// Check payload files, or every `*.json` file in the given directories.
    Check {
        #[arg(long, help = "Stop at the first failing payload")]
        fail_fast: bool,
        paths: Vec<PathBuf>,
    },
}

fn load_config() -> Result<CheckerConfig, config::ConfigError> {
    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    Config::builder()
        .add_source(config::File::with_name("config/default").required(false))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(config::Environment::with_prefix("APP"))
        .build()?
        .try_deserialize()
}

fn report(report: &PayloadReport) -> bool {
    match &report.outcome {
        Ok(_) => {
            println!("ok   {}", report.path.display());
            true
        }
        Err(err) => {
            println!("FAIL {}", report.path.display());
            log::error!("{err}");
            false
        }
    }
}

/// Checks each path, returning the number of failing payloads.
fn check_paths(catalog: &Catalog, paths: &[PathBuf], fail_fast: bool) -> usize {
    let mut failures = 0;

    for path in paths {
        let reports = if path.is_dir() {
            match checker::check_directory(catalog, path, fail_fast) {
                Ok(reports) => reports,
                Err(err) => {
                    log::error!("{err}");
                    failures += 1;
                    continue;
                }
            }
        } else {
            vec![PayloadReport {
                path: path.clone(),
                outcome: checker::check_file(catalog, path),
            }]
        };

        for entry in &reports {
            if !report(entry) {
                failures += 1;
            }
        }

        if failures > 0 && fail_fast {
            break;
        }
    }

    failures
}

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    let checker_config = match load_config() {
        Ok(checker_config) => checker_config,
        Err(err) => {
            log::error!("Error loading checker config: {err}");
            std::process::exit(1);
        }
    };

    let catalog = match catalog::load() {
        Ok(catalog) => catalog,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Command::List => {
            for schema in catalog.descriptors() {
                println!("{:<20} {:<9} {}", schema.name(), schema.domain(), schema.role());
            }
        }
        Command::Show { name } => match catalog.resolve(&name) {
            Ok(schema) => {
                println!("name:   {}", schema.name());
                println!("domain: {}", schema.domain());
                println!("role:   {}", schema.role());
                println!("type:   {}", schema.type_name());
            }
            Err(err) => {
                log::error!("{err}");
                std::process::exit(1);
            }
        },
        Command::Check { fail_fast, paths } => {
            let fail_fast = fail_fast || checker_config.fail_fast;
            let paths = if paths.is_empty() {
                vec![Path::new(&checker_config.payload_dir).to_path_buf()]
            } else {
                paths
            };

            let failures = check_paths(catalog, &paths, fail_fast);
            if failures > 0 {
                log::error!("{failures} payload(s) failed");
                std::process::exit(1);
            }
            log::info!("All payloads passed");
        }
    }
}
