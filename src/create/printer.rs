// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

use crate::create::route::{DryRunStrategy, OutputFormat};
use crate::error::{Result, RouteCtlError};
use crate::types::Route;
use kube::ResourceExt;
use std::io::Write;

const ROUTE_RESOURCE: &str = "route.route.openshift.io";

pub fn print_route<W: Write>(
    route: &Route,
    format: Option<OutputFormat>,
    dry_run: DryRunStrategy,
    out: &mut W,
) -> Result<()> {
    match format {
        None => {
            let suffix = match dry_run {
                DryRunStrategy::None => "",
                DryRunStrategy::Client => " (dry run)",
                DryRunStrategy::Server => " (server dry run)",
            };
            writeln!(out, "{}/{} created{}", ROUTE_RESOURCE, route.name_any(), suffix)?;
        }
        Some(OutputFormat::Name) => {
            writeln!(out, "{}/{}", ROUTE_RESOURCE, route.name_any())?;
        }
        Some(OutputFormat::Json) => {
            let json = serde_json::to_string_pretty(route)
                .map_err(|e| RouteCtlError::SerializationError(e.to_string()))?;
            writeln!(out, "{}", json)?;
        }
        Some(OutputFormat::Yaml) => {
            let yaml = serde_yaml::to_string(route)
                .map_err(|e| RouteCtlError::SerializationError(e.to_string()))?;
            write!(out, "{}", yaml)?;
        }
    }
    Ok(())
}
