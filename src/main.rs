//! Sales dashboard server.
//!
//! Serves the dashboard page on `--addr`; datasets are uploaded through the
//! page, or preloaded with `--data`.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sales_dashboard::config::{self, ServerConfig};
use sales_dashboard::{server, DashboardSession, SalesDashboard};

#[derive(Debug, Parser)]
#[command(name = "sales-dashboard", version, about = "Monthly sales dashboard for shop transaction data")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = config::DEFAULT_ADDR)]
    addr: SocketAddr,

    /// CSV file to load at startup.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Largest accepted upload, in MiB.
    #[arg(long, default_value_t = config::DEFAULT_MAX_UPLOAD_MB)]
    max_upload_mb: usize,

    /// Sales change (percent) beyond which the advisory is shown.
    #[arg(long, default_value_t = config::DEFAULT_ADVISORY_THRESHOLD)]
    advisory_threshold: f64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sales_dashboard=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = ServerConfig {
        addr: args.addr,
        max_upload_bytes: args.max_upload_mb * 1024 * 1024,
        advisory_threshold: args.advisory_threshold,
    };

    let session = DashboardSession::new(
        SalesDashboard::builder().advisory_threshold(config.advisory_threshold),
    );

    if let Some(path) = args.data {
        let rows = session.load_csv_path(path.clone()).await?;
        info!(rows, path = %path.display(), "preloaded dataset");
    }

    server::serve(session, config).await?;
    Ok(())
}
