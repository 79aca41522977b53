mod logging;
mod settings;
mod web;

use anyhow::Result;
use clap::Parser;
use clap_derive::Parser;
use logging::{LogConfig, LogGuard, RotationPeriod};
use settings::Settings;
use tracing::warn;
use web::state::LightState;
use web::{ServerConfig, serve};

#[derive(Parser, Debug)]
pub struct Params {
    /// Port to listen on (default: 8000, or the settings file value)
    #[clap(long)]
    port: Option<u16>,
    /// Settings file path (if not set, it will use default settings)
    #[clap(long)]
    settings: Option<String>,
    /// Log directory (if not set, logs to stdout)
    #[clap(long)]
    log_dir: Option<String>,
    /// Log rotation period: minutely, hourly, daily or never (default: daily)
    #[clap(long, default_value = "daily")]
    log_rotation: RotationPeriod,
}

#[tokio::main]
async fn main() -> Result<()> {
    let params = Params::parse();

    // Keep the guard alive so file logs are flushed on exit
    let _log_guard = setup_logging(&params)?;

    let settings = if let Some(path) = &params.settings {
        match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Failed to load settings file ({e}), using default settings");
                Settings::default()
            }
        }
    } else {
        Settings::default()
    };

    let port = params.port.unwrap_or(settings.port);
    let light = LightState::new(&settings);

    serve(ServerConfig { port }, light).await?;

    Ok(())
}

fn setup_logging(params: &Params) -> Result<LogGuard> {
    match &params.log_dir {
        Some(dir) => Ok(logging::setup_file_logging(LogConfig {
            log_dir: dir.clone(),
            rotation: params.log_rotation,
            ..LogConfig::default()
        })?),
        None => Ok(logging::setup_console_logging()),
    }
}
