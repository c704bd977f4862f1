// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Plumbing shared by the `create route` subcommands

use crate::constants::{annotations, DEFAULT_FIELD_MANAGER};
use crate::create::printer::print_route;
use crate::error::{Result, RouteCtlError};
use crate::kubernetes::{resolve_resource, ClientContext, GroupResource, RestMapper};
use crate::types::{Route, RoutePort, RouteSpec, RouteTargetReference};
use clap::{Args, ValueEnum};
use k8s_openapi::api::core::v1::Service;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::{
    api::{ObjectMeta, PostParams},
    Api, Client, ResourceExt,
};
use std::io::Write;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DryRunStrategy {
    /// Send the object to the server
    #[default]
    None,
    /// Only print the object that would be sent
    Client,
    /// Submit a server-side dry-run request
    Server,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Name,
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ValidationDirective {
    /// Reject invalid routes before sending them
    #[default]
    #[value(alias = "true")]
    Strict,
    /// Log problems and send the route anyway
    Warn,
    /// Skip client-side validation
    #[value(alias = "false")]
    Ignore,
}

/// Flags every `create route` subcommand accepts
#[derive(Args, Debug, Clone)]
pub struct RouteSubcommandFlags {
    /// Must be "none", "server", or "client". With "client" the route is only printed
    #[arg(
        long,
        value_enum,
        default_value_t = DryRunStrategy::None,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "client"
    )]
    pub dry_run: DryRunStrategy,

    /// Must be "strict" (or "true"), "warn", or "ignore" (or "false")
    #[arg(
        long,
        value_enum,
        default_value_t = ValidationDirective::Strict,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "strict"
    )]
    pub validate: ValidationDirective,

    /// Store the route's configuration in its last-applied-configuration annotation
    #[arg(long)]
    pub save_config: bool,

    /// Name of the manager used to track field ownership
    #[arg(long, default_value = DEFAULT_FIELD_MANAGER)]
    pub field_manager: String,

    /// Output format. One of: name, json, yaml
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,
}

/// Completed state shared by the `create route` subcommands
pub struct CreateRouteSubcommandOptions {
    /// Route name; empty means "use the service name"
    pub name: String,
    pub namespace: String,
    pub enforce_namespace: bool,
    pub dry_run: DryRunStrategy,
    pub validate: ValidationDirective,
    pub create_annotation: bool,
    pub field_manager: String,
    pub output: Option<OutputFormat>,
    pub client: Client,
    pub mapper: RestMapper,
}

impl CreateRouteSubcommandOptions {
    pub fn complete(
        flags: &RouteSubcommandFlags,
        context: &ClientContext,
        name: Option<String>,
    ) -> Result<Self> {
        if flags.field_manager.trim().is_empty() {
            return Err(RouteCtlError::InvalidArgument(
                "--field-manager must not be empty".to_string(),
            ));
        }

        Ok(Self {
            name: name.unwrap_or_default(),
            namespace: context.namespace.clone(),
            enforce_namespace: context.enforce_namespace,
            dry_run: flags.dry_run,
            validate: flags.validate,
            create_annotation: flags.save_config,
            field_manager: flags.field_manager.clone(),
            output: flags.output,
            client: context.client.clone(),
            mapper: RestMapper::builtin(),
        })
    }

    /// Apply the validation directive to a route about to be submitted
    pub fn check(&self, route: &Route) -> Result<()> {
        match (self.validate, route.validate()) {
            (_, Ok(())) | (ValidationDirective::Ignore, _) => Ok(()),
            (ValidationDirective::Warn, Err(e)) => {
                warn!("{}", e);
                Ok(())
            }
            (ValidationDirective::Strict, Err(e)) => Err(e),
        }
    }

    fn post_params(&self) -> PostParams {
        PostParams {
            dry_run: self.dry_run == DryRunStrategy::Server,
            field_manager: Some(self.field_manager.clone()),
        }
    }

    /// Create the route unless this is a client-side dry run, returning what the server stored
    #[instrument(skip(self, route), fields(route = %route.name_any(), namespace = %self.namespace))]
    pub async fn submit(&self, route: Route) -> Result<Route> {
        if self.dry_run == DryRunStrategy::Client {
            debug!("Client dry run, not sending route");
            return Ok(route);
        }

        let routes: Api<Route> = Api::namespaced(self.client.clone(), &self.namespace);
        let created = routes.create(&self.post_params(), &route).await?;
        info!("Route {}/{} created", self.namespace, created.name_any());
        Ok(created)
    }

    pub fn print<W: Write>(&self, route: &Route, out: &mut W) -> Result<()> {
        print_route(route, self.output, self.dry_run, out)
    }
}

/// Resolve `--service` to a service name; `type/name` forms must name a service
pub fn resolve_service_name(mapper: &RestMapper, resource: &str) -> Result<String> {
    if resource.is_empty() {
        return Err(RouteCtlError::InvalidArgument(
            "you need to provide a service name via --service".to_string(),
        ));
    }

    let services = GroupResource::new("", "services");
    let (resource_type, name) = resolve_resource(&services, resource, mapper)?;
    if resource_type != services {
        return Err(RouteCtlError::CannotExposeAsRoute(resource_type.to_string()));
    }
    Ok(name)
}

/// Build a route without TLS settings that exposes `service_name`.
///
/// A service that does not exist is only accepted when a port is given. With
/// `force_port` and a single service port, that port becomes the route port.
#[instrument(skip(client))]
pub async fn unsecured_route(
    client: &Client,
    namespace: &str,
    route_name: &str,
    service_name: &str,
    port: &str,
    force_port: bool,
    enforce_namespace: bool,
) -> Result<Route> {
    let route_name = if route_name.is_empty() {
        service_name
    } else {
        route_name
    };

    let services: Api<Service> = Api::namespaced(client.clone(), namespace);
    let service = match services.get(service_name).await {
        Ok(service) => Some(service),
        Err(kube::Error::Api(err)) if err.code == 404 => None,
        Err(e) => return Err(e.into()),
    };

    let mut route = Route {
        metadata: ObjectMeta {
            name: Some(route_name.to_string()),
            namespace: enforce_namespace.then(|| namespace.to_string()),
            ..Default::default()
        },
        spec: RouteSpec {
            to: RouteTargetReference::service(service_name),
            port: RoutePort::parse(port),
            ..Default::default()
        },
        status: None,
    };

    let Some(service) = service else {
        if port.is_empty() {
            return Err(RouteCtlError::InvalidArgument(
                "you need to provide a route port via --port when exposing a non-existent service"
                    .to_string(),
            ));
        }
        debug!("Service {}/{} not found, exposing it anyway", namespace, service_name);
        return Ok(route);
    };

    let service_ports = service
        .spec
        .as_ref()
        .and_then(|spec| spec.ports.as_deref())
        .unwrap_or_default();

    let supports_tcp = service_ports
        .iter()
        .any(|p| p.protocol.as_deref().map_or(true, |protocol| protocol == "TCP"));
    if !supports_tcp {
        return Err(RouteCtlError::ServiceNotTcp(service.name_any()));
    }

    route.metadata.labels = service.metadata.labels.clone();

    // Without a port the router picks the first service port
    if force_port && route.spec.port.is_none() {
        if let [only] = service_ports {
            let target_port = match only.name.as_deref().filter(|n| !n.is_empty()) {
                Some(name) => IntOrString::String(name.to_string()),
                None => IntOrString::Int(only.port),
            };
            route.spec.port = Some(RoutePort { target_port });
        }
    }

    Ok(route)
}

/// Record the route's own JSON under the last-applied-configuration annotation
pub fn create_or_update_annotation(enabled: bool, route: &mut Route) -> Result<()> {
    if !enabled {
        return Ok(());
    }

    let mut unannotated = route.clone();
    if let Some(existing) = unannotated.metadata.annotations.as_mut() {
        existing.remove(annotations::LAST_APPLIED_CONFIG);
        if existing.is_empty() {
            unannotated.metadata.annotations = None;
        }
    }

    let configuration = serde_json::to_string(&unannotated)
        .map_err(|e| RouteCtlError::SerializationError(e.to_string()))?;
    route
        .annotations_mut()
        .insert(annotations::LAST_APPLIED_CONFIG.to_string(), configuration);
    Ok(())
}
