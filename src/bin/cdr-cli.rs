use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;

use cdr_validator::config::{load_config, ValidatorConfig};
use cdr_validator::routing::{catalog, EndpointResolver};

#[derive(Parser)]
#[command(name = "cdr-cli")]
#[command(about = "Offline tooling for the CDR compliance validator", long_about = None)]
struct Cli {
    /// Validator config file. Defaults to the full standard catalog.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the effective endpoint table
    Endpoints,
    /// Show which endpoint a request would resolve to
    Resolve { method: String, path: String },
    /// Validate a config file
    Check { file: PathBuf },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Commands::Check { file } = &cli.command {
        let config = load_config(file)?;
        println!(
            "{}: OK ({} endpoints, {} callers)",
            file.display(),
            catalog::effective_endpoints(&config).len(),
            config.callers.len()
        );
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ValidatorConfig::default(),
    };
    let base_path = config.compliance.base_path.clone();
    let resolver = EndpointResolver::new(catalog::effective_endpoints(&config), base_path.clone());

    match cli.command {
        Commands::Endpoints => {
            for endpoint in resolver.endpoints() {
                println!(
                    "{:<6} {:<60} v{}-{} {}",
                    endpoint.method,
                    endpoint.path,
                    endpoint.min_supported_version,
                    endpoint.max_supported_version,
                    endpoint.required_scope.as_deref().unwrap_or("-")
                );
            }
        }
        Commands::Resolve { method, path } => {
            let output = match resolver.resolve(&method, &path) {
                Some(route) => json!({
                    "endpoint": route.endpoint,
                    "params": route.params,
                }),
                None => {
                    let standard = catalog::standard_resolver(base_path);
                    let reason = if standard.resolve(&method, &path).is_some() {
                        "not implemented"
                    } else {
                        "not a CDR endpoint"
                    };
                    json!({ "endpoint": null, "reason": reason })
                }
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Check { .. } => {}
    }

    Ok(())
}
