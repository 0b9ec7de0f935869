use anyhow::{Context, Result};
use bijbel_api::config::Config;
use bijbel_api::library::Library;
use bijbel_api::{logging, server};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "bijbel-api")]
#[command(about = "Read-only API for Dutch Bible text and cross-references")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (defaults to ./config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data bundle directory, overrides the config
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Port to run the server on, overrides the config
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Parse every file in the data bundle and report problems
    Check,
}

fn open_library(config: &Config) -> Result<Library> {
    Library::open_dir(&config.data.dir, config.data.cache)
        .with_context(|| format!("failed to load data bundle from {}", config.data.dir.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data.dir = dir;
    }

    let _guard = logging::init_logging(&config.logging);

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            let library = Arc::new(open_library(&config)?);
            info!(
                "Serving {} books, cache {}",
                library.registry().len(),
                if config.data.cache { "on" } else { "off" }
            );

            let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
                .parse()
                .with_context(|| format!("invalid listen address {}", config.server.host))?;
            server::start_server(library, addr).await?;
        }
        Commands::Check => {
            let library = open_library(&config)?;
            let report = library.check();
            println!(
                "Checked {} books and {} cross-reference files",
                report.books_checked, report.crossref_files_checked
            );
            if !report.is_ok() {
                for failure in &report.failures {
                    error!("{}", failure);
                    println!("  - {}", failure);
                }
                anyhow::bail!("{} problems found in the data bundle", report.failures.len());
            }
            println!("Data bundle OK");
        }
    }
    Ok(())
}
