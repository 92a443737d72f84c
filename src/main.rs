//! Projection engine server.

use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use aba_proforma::api::{AppState, create_router};
use aba_proforma::calculation::{
    DEFAULT_MILESTONE_TARGETS, aggregate, headline_kpis, run_scenario,
};
use aba_proforma::config::ConfigLoader;
use aba_proforma::export::Workbook;
use aba_proforma::models::Granularity;

#[derive(Parser, Debug)]
#[command(name = "aba-proforma")]
#[command(about = "Five-year financial projection engine for an ABA therapy provider")]
#[command(version)]
struct Args {
    /// Scenario directory with scenario.yaml, assumptions.yaml and roadmap.yaml
    #[arg(short, long, default_value = "config/baseline")]
    config: PathBuf,

    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:3000")]
    addr: SocketAddr,

    /// Write the scenario workbook as CSV files into this directory and exit
    #[arg(long, value_name = "DIR")]
    export: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let config = ConfigLoader::load(&args.config)?;

    if let Some(dir) = args.export {
        let run = run_scenario(config.roadmap(), config.assumptions());
        let periods = aggregate(&run.months, Granularity::Yearly);
        let written = Workbook::build(&run.months, &periods).write_csv_dir(&dir)?;
        info!(files = written.len(), dir = %dir.display(), "Export complete");
        let kpis = headline_kpis(&run.months, &run.hires, &DEFAULT_MILESTONE_TARGETS);
        for line in kpis.summary_lines() {
            info!("{}", line);
        }
        return Ok(());
    }

    let app = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    info!(addr = %listener.local_addr()?, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
