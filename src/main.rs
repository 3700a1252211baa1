use std::fs;
use std::time::Duration;

mod board;
mod view;

use crate::view::ResultDisplay;
use crate::view::log_buffer::LogBuffer;
use crate::view::std_out::StdoutDisplayBuilder;
use crate::view::tui::TuiDisplayBuilder;
use clap::Parser;
use serde::Deserialize;
use tracing::info;
use wmata::{Config, Context, RailPredictions};

#[derive(Debug, Deserialize)]
pub struct InputStations {
    pub stations: Vec<InputStation>,
}

#[derive(Debug, Deserialize)]
pub struct InputStation {
    /// Station code, e.g. `A01`. Several codes may be comma separated.
    pub code: String,
    pub name: String,
    /// Line codes to show. Empty shows every line serving the platform.
    #[serde(default)]
    pub lines: Vec<String>,
}

#[derive(Parser, Debug)]
struct Cli {
    /// YAML file listing the stations to show
    path: std::path::PathBuf,

    /// WMATA API key
    #[clap(long, env = "WMATA_API_KEY", hide_env_values = true)]
    api_key: String,

    /// API origin
    #[clap(long, default_value = wmata::api::BASE_URL)]
    base_url: String,

    /// Seconds to wait for each request
    #[clap(long, default_value_t = 10)]
    timeout: u64,

    /// Use a simple TUI for display
    #[clap(long, action)]
    tui: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let log_buffer = if args.tui {
        // the terminal belongs to the TUI, which shows the newest lines itself
        let log_buffer = LogBuffer::new(8);
        let subscriber = tracing_subscriber::fmt()
            .with_writer(log_buffer.make_writer())
            .with_ansi(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        Some(log_buffer)
    } else {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        None
    };

    info!("Starting with {}", args.path.display());

    let stations: InputStations = serde_yaml::from_str(&fs::read_to_string(&args.path)?)?;

    let config = Config::builder()
        .api_key(args.api_key)
        .base_url(args.base_url)
        .build()?;
    let api_client = RailPredictions::from_config(config);
    let ctx = Context::background().with_timeout(Duration::from_secs(args.timeout));

    let display: Box<dyn ResultDisplay> = if let Some(log_buffer) = log_buffer {
        Box::new(
            TuiDisplayBuilder::<RailPredictions>::default()
                .stations(stations)
                .api_client(api_client)
                .ctx(ctx)
                .log_buffer(log_buffer)
                .build()?,
        )
    } else {
        Box::new(
            StdoutDisplayBuilder::<RailPredictions>::default()
                .stations(stations)
                .api_client(api_client)
                .ctx(ctx)
                .build()?,
        )
    };

    display.display().await?;

    Ok(())
}
