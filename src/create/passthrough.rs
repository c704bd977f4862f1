// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! `create route passthrough`

use crate::create::route::{
    create_or_update_annotation, resolve_service_name, unsecured_route,
    CreateRouteSubcommandOptions, RouteSubcommandFlags,
};
use crate::error::Result;
use crate::kubernetes::ClientContext;
use crate::types::{InsecureEdgeTerminationPolicy, Route, TlsConfig, TlsTermination, WildcardPolicy};
use clap::Args;
use std::io::Write;
use tracing::instrument;

const LONG_ABOUT: &str = "Create a route that uses passthrough TLS termination.

Specify the service (either just its name or using type/name syntax) that the
generated route should expose via the --service flag.";

const EXAMPLES: &str = "Examples:
  # Create a passthrough route named \"my-route\" that exposes the frontend service
  routectl create route passthrough my-route --service=frontend

  # Create a passthrough route that exposes the frontend service and specify
  # a host name. If the route name is omitted, the service name will be used
  routectl create route passthrough --service=frontend --hostname=www.example.com";

#[derive(Args, Debug, Clone)]
#[command(
    about = "Create a route that uses passthrough TLS termination",
    long_about = LONG_ABOUT,
    after_help = EXAMPLES,
    override_usage = "routectl create route passthrough [NAME] --service=SERVICE"
)]
pub struct PassthroughArgs {
    /// Name of the route. Defaults to the service name
    pub name: Option<String>,

    /// Set a hostname for the new route
    #[arg(long)]
    pub hostname: Option<String>,

    /// Name of the service port or number of the container port the route will route traffic to
    #[arg(long)]
    pub port: Option<String>,

    /// Set an insecure policy for the new route
    #[arg(long, value_enum)]
    pub insecure_policy: Option<InsecureEdgeTerminationPolicy>,

    /// Name of the service that the new route is exposing
    #[arg(long)]
    pub service: String,

    /// Sets the WildcardPolicy for the hostname, the default is "None"
    #[arg(long, value_enum)]
    pub wildcard_policy: Option<WildcardPolicy>,

    #[command(flatten)]
    pub common: RouteSubcommandFlags,
}

pub struct CreatePassthroughRouteOptions {
    pub create_route: CreateRouteSubcommandOptions,

    pub hostname: Option<String>,
    pub port: String,
    pub insecure_policy: Option<InsecureEdgeTerminationPolicy>,
    pub service: String,
    pub wildcard_policy: Option<WildcardPolicy>,
}

impl CreatePassthroughRouteOptions {
    pub fn complete(args: PassthroughArgs, context: &ClientContext) -> Result<Self> {
        let create_route = CreateRouteSubcommandOptions::complete(&args.common, context, args.name)?;
        Ok(Self {
            create_route,
            hostname: args.hostname,
            port: args.port.unwrap_or_default(),
            insecure_policy: args.insecure_policy,
            service: args.service,
            wildcard_policy: args.wildcard_policy,
        })
    }

    /// Build the passthrough route without sending it
    #[instrument(skip(self), fields(service = %self.service))]
    pub async fn build_route(&self) -> Result<Route> {
        let o = &self.create_route;
        let service_name = resolve_service_name(&o.mapper, &self.service)?;
        let mut route = unsecured_route(
            &o.client,
            &o.namespace,
            &o.name,
            &service_name,
            &self.port,
            false,
            o.enforce_namespace,
        )
        .await?;

        if self.wildcard_policy.is_some() {
            route.spec.wildcard_policy = self.wildcard_policy;
        }

        route.spec.host = self.hostname.clone();
        route.spec.tls = Some(TlsConfig {
            termination: TlsTermination::Passthrough,
            insecure_edge_termination_policy: self.insecure_policy,
            ..Default::default()
        });

        create_or_update_annotation(o.create_annotation, &mut route)?;
        Ok(route)
    }

    pub async fn run<W: Write>(&self, out: &mut W) -> Result<()> {
        let route = self.build_route().await?;
        self.create_route.check(&route)?;
        let route = self.create_route.submit(route).await?;
        self.create_route.print(&route, out)
    }
}
