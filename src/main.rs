//! siigo-reports: turns a SIIGO trial-balance export into the balance sheet
//! and income statement workbooks.
//!
//! ```bash
//! siigo-reports serve                                  # HTTP upload service
//! siigo-reports process export.xlsx --mes Enero \
//!     --estado Definitivo --anio 2024 --centro-costos CC-01
//! siigo-reports preview export.xlsx                    # check the header row
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

mod cli;
mod config;
mod error;
mod logging;
mod routes;
mod services;
pub mod models;

#[derive(Parser)]
#[command(name = "siigo-reports")]
#[command(about = "Generate balance sheet and income statement workbooks from a SIIGO export", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP upload service
    Serve {
        /// Address to bind (default: HOST or 127.0.0.1)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (default: PORT or 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate both workbooks from an export
    Process {
        /// SIIGO export (.xlsx)
        input: PathBuf,

        #[arg(long)]
        mes: String,

        #[arg(long)]
        estado: String,

        /// AÑO
        #[arg(long)]
        anio: String,

        #[arg(long = "centro-costos")]
        centro_costos: String,

        /// Directory for the output files (default: OUTPUT_DIR or .)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Zero-based row holding the column headers (default: HEADER_ROW or 7)
        #[arg(long)]
        header_row: Option<usize>,
    },

    /// Show the columns and first rows found below the header row
    Preview {
        /// SIIGO export (.xlsx)
        input: PathBuf,

        /// Zero-based row holding the column headers (default: HEADER_ROW or 7)
        #[arg(long)]
        header_row: Option<usize>,

        /// Number of sample rows
        #[arg(long, default_value = "5")]
        rows: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging()?;

    let cli = Cli::parse();
    let mut config = config::load_config()?;

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            serve(config).await
        }
        Commands::Process { input, mes, estado, anio, centro_costos, output_dir, header_row } => {
            let metadata = models::Metadata::new(mes, estado, anio, centro_costos)?;
            let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
            let header_row = header_row.unwrap_or(config.header_row);
            let saved = cli::run_process(&input, &metadata, &output_dir, header_row)?;
            for path in saved {
                println!("{}", path.display());
            }
            Ok(())
        }
        Commands::Preview { input, header_row, rows } => {
            let header_row = header_row.unwrap_or(config.header_row);
            let preview = cli::run_preview(&input, header_row, rows)?;
            println!("{}", serde_json::to_string_pretty(&preview)?);
            Ok(())
        }
    }
}

async fn serve(config: config::Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let state = Arc::new(AppState::new(config));
    let app = routes::app(state);

    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// Application state
#[derive(Clone)]
pub struct AppState {
    config: config::Config,
}

impl AppState {
    fn new(config: config::Config) -> Self {
        Self { config }
    }
}
