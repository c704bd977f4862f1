// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client configuration loading and creation

use crate::error::{Result, RouteCtlError};
use crate::shim::ClientDefaults;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config as KConfig};
use std::path::PathBuf;
use tracing::{debug, info, instrument};
use url::Url;

/// Connection flags shared by every command
#[derive(Debug, Clone, Default)]
pub struct ConnectionOptions {
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
    pub cluster: Option<String>,
    pub user: Option<String>,
    pub server: Option<String>,
    pub namespace: Option<String>,
}

impl ConnectionOptions {
    fn kubeconfig_options(&self) -> KubeConfigOptions {
        KubeConfigOptions {
            context: self.context.clone(),
            cluster: self.cluster.clone(),
            user: self.user.clone(),
        }
    }
}

/// A connected client together with the namespace commands act in
#[derive(Clone)]
pub struct ClientContext {
    pub client: Client,
    pub namespace: String,
    /// Whether the namespace was given explicitly rather than taken from the configuration
    pub enforce_namespace: bool,
}

impl ClientContext {
    pub fn new(client: Client, namespace: &str, enforce_namespace: bool) -> Self {
        Self {
            client,
            namespace: namespace.to_string(),
            enforce_namespace,
        }
    }
}

/// Build a client context from the connection flags
#[instrument(skip(options, defaults))]
pub async fn create_client_context(
    options: &ConnectionOptions,
    defaults: &ClientDefaults,
) -> Result<ClientContext> {
    let mut config = load_config(options, defaults).await?;

    override_server(&mut config, options)?;

    let (namespace, enforce_namespace) = match &options.namespace {
        Some(namespace) => (namespace.clone(), true),
        None => (config.default_namespace.clone(), false),
    };

    info!("Using server {} and namespace {}", config.cluster_url, namespace);

    let client = Client::try_from(config)
        .map_err(|e| RouteCtlError::KubeconfigError(format!("Failed to create client: {}", e)))?;

    Ok(ClientContext {
        client,
        namespace,
        enforce_namespace,
    })
}

/// Explicit kubeconfig first, then the default kubeconfig locations, the
/// in-cluster service account, and finally the configured default server
async fn load_config(options: &ConnectionOptions, defaults: &ClientDefaults) -> Result<KConfig> {
    let kube_options = options.kubeconfig_options();

    if let Some(path) = &options.kubeconfig {
        debug!("Loading kubeconfig from {}", path.display());
        let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
            RouteCtlError::KubeconfigError(format!(
                "Failed to read kubeconfig {}: {}",
                path.display(),
                e
            ))
        })?;
        return KConfig::from_custom_kubeconfig(kubeconfig, &kube_options)
            .await
            .map_err(|e| RouteCtlError::KubeconfigError(format!("Failed to create config: {}", e)));
    }

    match KConfig::from_kubeconfig(&kube_options).await {
        Ok(config) => return Ok(config),
        Err(e) => debug!("No usable kubeconfig found: {}", e),
    }

    match KConfig::incluster() {
        Ok(config) => return Ok(config),
        Err(e) => debug!("Not running in a cluster: {}", e),
    }

    fallback_config(defaults)
}

fn override_server(config: &mut KConfig, options: &ConnectionOptions) -> Result<()> {
    if let Some(server) = &options.server {
        config.cluster_url = normalize_server(server)?;
    }
    Ok(())
}

fn fallback_config(defaults: &ClientDefaults) -> Result<KConfig> {
    match &defaults.cluster_server {
        Some(server) => {
            debug!("Falling back to default server {}", server);
            Ok(KConfig::new(normalize_server(server)?))
        }
        None => Err(RouteCtlError::EmptyConfig(
            defaults.empty_config_message.clone(),
        )),
    }
}

/// Parse a server address from `--server` or the default server.
/// Bare `host:port` values get an `https://` scheme, as kubeconfig servers do.
pub fn normalize_server(server: &str) -> Result<http::Uri> {
    let invalid = |e: &dyn std::fmt::Display| {
        RouteCtlError::KubeconfigError(format!("Invalid server URL {}: {}", server, e))
    };

    let server = server.trim();
    let candidate = if server.contains("://") {
        server.to_string()
    } else {
        format!("https://{}", server)
    };
    let url = Url::parse(&candidate).map_err(|e| invalid(&e))?;
    if !url.has_host() {
        return Err(invalid(&"missing host"));
    }

    url.as_str()
        .trim_end_matches('/')
        .parse::<http::Uri>()
        .map_err(|e| invalid(&e))
}
