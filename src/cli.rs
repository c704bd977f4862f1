// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Command line surface

use crate::kubernetes::ConnectionOptions;
use crate::create::PassthroughArgs;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "routectl", version)]
#[command(about = "OpenShift client for exposing services through routes", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionFlags,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags selecting the cluster and namespace
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionFlags {
    /// Path to the kubeconfig file to use
    #[arg(long, global = true)]
    pub kubeconfig: Option<PathBuf>,

    /// The name of the kubeconfig context to use
    #[arg(long, global = true)]
    pub context: Option<String>,

    /// The name of the kubeconfig cluster to use
    #[arg(long, global = true)]
    pub cluster: Option<String>,

    /// The name of the kubeconfig user to use
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// The address and port of the API server
    #[arg(short, long, global = true)]
    pub server: Option<String>,

    /// If present, the namespace scope for this request
    #[arg(short, long, global = true)]
    pub namespace: Option<String>,
}

impl From<ConnectionFlags> for ConnectionOptions {
    fn from(flags: ConnectionFlags) -> Self {
        ConnectionOptions {
            kubeconfig: flags.kubeconfig,
            context: flags.context,
            cluster: flags.cluster,
            user: flags.user,
            server: flags.server,
            namespace: flags.namespace,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a resource
    Create {
        #[command(subcommand)]
        command: CreateCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum CreateCommand {
    /// Expose containers externally via secured routes
    Route {
        #[command(subcommand)]
        command: RouteCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum RouteCommand {
    Passthrough(PassthroughArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "routectl",
            "create",
            "route",
            "passthrough",
            "--service=frontend",
            "-n",
            "shop",
            "--context=dev",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        let options = ConnectionOptions::from(cli.connection);
        assert_eq!(options.namespace.as_deref(), Some("shop"));
        assert_eq!(options.context.as_deref(), Some("dev"));
        assert!(options.kubeconfig.is_none());
    }
}
