// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use routectl::cli::{Cli, Command, CreateCommand, RouteCommand};
use routectl::config::Config;
use routectl::create::CreatePassthroughRouteOptions;
use routectl::kubernetes::create_client_context;
use routectl::shim::{shim_for_oc, Toolkit};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

/// Log to stderr so command output stays clean; RUST_LOG overrides -v
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    // Load configuration and customize the toolkit before any command runs
    let config = Config::from_env()?;
    let toolkit = shim_for_oc(Toolkit::upstream(), &config);

    match cli.command {
        Command::Create {
            command:
                CreateCommand::Route {
                    command: RouteCommand::Passthrough(args),
                },
        } => {
            let context =
                create_client_context(&cli.connection.into(), &toolkit.client_defaults).await?;
            debug!("Creating passthrough route in namespace {}", context.namespace);

            let options = CreatePassthroughRouteOptions::complete(args, &context)?;
            options.run(&mut std::io::stdout()).await?;
        }
    }

    Ok(())
}
