use clap::Parser;
mod commands;
mod error;
mod logging;

use commands::cli;
use deid_core::api::{load, AppConfig, ServicesFactory};
use deid_plugins::PluginServicesFactory;

#[tokio::main]
async fn main() -> Result<(), error::CliError> {
    let args = cli::Args::parse();
    let cfg = load_config(&args)?;
    let guard = logging::init(&cfg.logging);

    let exit = dispatch(args.command, cfg).await?;
    // flush the non-blocking writer before exiting
    drop(guard);
    std::process::exit(exit);
}

fn load_config(args: &cli::Args) -> Result<AppConfig, error::CliError> {
    let mut cfg = load(args.config.as_deref())?;
    if let Some(url) = &args.api_url {
        cfg.service.base_url = url.clone();
    }
    cfg.validate()?;
    Ok(cfg)
}

async fn dispatch(cmd: cli::Commands, cfg: AppConfig) -> Result<i32, error::CliError> {
    let services = PluginServicesFactory.build_services(&cfg)?;
    tracing::debug!(target: "deid.cli", base_url = %cfg.service.base_url, "dispatch");

    match cmd {
        cli::Commands::Redact(redact_args) => {
            commands::redact::run(cfg, &services, redact_args).await
        }
        cli::Commands::History(history_args) => {
            commands::history::run(&cfg, &services, history_args).await
        }
        cli::Commands::Dashboard => commands::history::dashboard(&cfg, &services).await,
        cli::Commands::Fetch(fetch_args) => commands::fetch::run(&services, fetch_args).await,
    }
}
