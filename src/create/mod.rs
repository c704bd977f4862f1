// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! `create` subcommands.

pub mod passthrough;
pub mod printer;
pub mod route;

pub use passthrough::{CreatePassthroughRouteOptions, PassthroughArgs};
pub use route::{CreateRouteSubcommandOptions, DryRunStrategy, OutputFormat, ValidationDirective};
