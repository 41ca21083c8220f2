pub mod cli;
pub mod converter;
pub mod core;
pub mod providers;

pub use crate::converter::{Converter, supported_currencies};
pub use crate::core::{
    ConversionOptions, ConversionRequest, ConversionResult, ExchangeError, SUPPORTED_CURRENCIES,
};

use crate::cli::convert::ConvertCommand;
use crate::core::config::AppConfig;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Convert(ConvertCommand),
    Currencies,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("naverfx starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Convert(cmd) => {
            let converter = Converter::from_config(&config)?;
            cli::convert::run(&converter, &cmd).await
        }
        AppCommand::Currencies => {
            cli::currencies::run();
            Ok(())
        }
    }
}
