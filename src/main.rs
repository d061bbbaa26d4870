//! facility-mcda - run one analysis request from a JSON document.
//!
//! Usage: `facility-mcda [--config FILE] [REQUEST.json | -]`
//!
//! The request is read from the given file, or from stdin when the path is
//! absent or `-`. The report is written to stdout; logs go to stderr.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use thiserror::Error;
use tokio::io::AsyncReadExt;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use facility_mcda::application::{AnalysisDispatcher, AnalysisRequest};
use facility_mcda::config::{AppConfig, ConfigError, LoggingConfig};
use facility_mcda::domain::foundation::DomainError;
use facility_mcda::domain::mcda::CancellationToken;

#[derive(Debug, Error)]
enum CliError {
    #[error("Usage: facility-mcda [--config FILE] [REQUEST.json | -]")]
    Usage,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read request: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed request: {0}")]
    Request(#[from] serde_json::Error),

    #[error("Analysis failed: {0}")]
    Analysis(#[from] DomainError),
}

#[derive(Debug, Default)]
struct CliArgs {
    config: Option<PathBuf>,
    request: Option<PathBuf>,
}

impl CliArgs {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, CliError> {
        let mut parsed = CliArgs::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => parsed.config = Some(args.next().ok_or(CliError::Usage)?.into()),
                "-" if parsed.request.is_none() => {}
                _ if arg.starts_with("--") || parsed.request.is_some() => {
                    return Err(CliError::Usage)
                }
                _ => parsed.request = Some(arg.into()),
            }
        }
        Ok(parsed)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.logging);

    match run(config, args.request.as_deref()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Analysis request failed");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig, CliError> {
    let config = match path {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load()?,
    };
    config.validate().map_err(ConfigError::from)?;
    Ok(config)
}

/// `RUST_LOG` takes precedence over the configured filter.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

async fn run(config: AppConfig, request_path: Option<&Path>) -> Result<(), CliError> {
    let raw = match request_path {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };
    let request: AnalysisRequest = serde_json::from_str(&raw)?;

    let cancel = CancellationToken::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, cancelling analysis");
                cancel.cancel();
            }
        })
    };

    let dispatcher = AnalysisDispatcher::new(config.analysis);
    let result = dispatcher.dispatch(request, cancel).await;
    watcher.abort();

    let report = result?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    info!("Report written");
    Ok(())
}
