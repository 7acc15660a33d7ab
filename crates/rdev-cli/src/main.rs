mod cli;
mod commands;
mod config;
mod error;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use rdev_infra::{RebuildConfig, TemplateStore};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs on stderr; stdout carries the command reports
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", error::report(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env()?;
    let api = config.client();
    let templates = TemplateStore::new(&config.template_dir);
    let mut out = io::stdout();

    match cli.command {
        Commands::GetDroplet { name } => commands::get_droplet(&api, &name, &mut out).await,
        Commands::DestroyDroplet { name } => {
            commands::destroy_droplet(&api, &name, &mut out).await
        }
        Commands::CreateDroplet(args) => {
            commands::create_droplet(&api, &templates, &args.template, args.spec(), &mut out).await
        }
        Commands::RebuildDevServer => {
            let rebuild = RebuildConfig::new(config.reserved_ip()?, templates);
            commands::rebuild_dev_server(&api, &rebuild, &mut out).await
        }
        Commands::DestroyDevServer => commands::destroy_dev_server(&api, &mut out).await,
    }
}
