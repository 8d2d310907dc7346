use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;

use radix_router::config::{load_config, ConfigError, RouteTable};
use radix_router::routing::Method;

#[derive(Parser)]
#[command(name = "route-cli")]
#[command(about = "Check, query and inspect route files offline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a route file
    Check { config: PathBuf },
    /// Resolve a request path and print the match as JSON
    Resolve {
        config: PathBuf,
        method: Method,
        path: String,
    },
    /// Print the routing tree of one or all methods
    Tree {
        config: PathBuf,
        #[arg(short, long)]
        method: Option<Method>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config } => match load_config(&config) {
            Ok(loaded) => println!("{}: {} routes OK", config.display(), loaded.routes.len()),
            Err(ConfigError::Validation(errors)) => {
                eprintln!("{}: {} problems", config.display(), errors.len());
                for error in &errors {
                    eprintln!("  - {}", error);
                }
                std::process::exit(1);
            }
            Err(e) => return Err(e.into()),
        },
        Commands::Resolve {
            config,
            method,
            path,
        } => {
            let table = compile(&config)?;
            let matched = table.router().resolve(method, &path);
            let output = match matched.value() {
                Some(target) => json!({
                    "matched": true,
                    "route": target.name,
                    "params": matched.params(),
                }),
                None => json!({
                    "matched": false,
                    "allowed": table.router().allowed_methods(&path),
                }),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Tree { config, method } => {
            let table = compile(&config)?;
            let methods = match method {
                Some(m) => vec![m],
                None => Method::ALL.to_vec(),
            };
            for m in methods {
                let tree = table.router().tree(m);
                if method.is_none() && tree.is_empty() {
                    continue;
                }
                println!("{} ({} routes)", m, tree.len());
                print!("{}", tree);
            }
        }
    }

    Ok(())
}

fn compile(path: &std::path::Path) -> Result<RouteTable, ConfigError> {
    let config = load_config(path)?;
    RouteTable::from_config(&config).map_err(ConfigError::from)
}
