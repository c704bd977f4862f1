// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use std::env;

use crate::constants::env as env_keys;

/// Process configuration loaded from environment variables
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Server used when no kubeconfig or in-cluster configuration is found.
    /// Kept as given; it is only parsed once client construction falls back to it.
    pub default_server: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::with_default_server(
            env::var(env_keys::KUBERNETES_MASTER).ok(),
        ))
    }

    fn with_default_server(server: Option<String>) -> Self {
        let default_server = server
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Config { default_server }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_server_is_trimmed() {
        let config = Config::with_default_server(Some(" https://master.example.com:8443 \n".into()));
        assert_eq!(
            config.default_server.as_deref(),
            Some("https://master.example.com:8443")
        );
    }

    #[test]
    fn test_blank_default_server_is_ignored() {
        assert!(Config::with_default_server(Some("   ".into())).default_server.is_none());
        assert!(Config::with_default_server(None).default_server.is_none());
    }

    #[test]
    fn test_malformed_default_server_does_not_fail_loading() {
        let config = Config::with_default_server(Some("http://bad host".into()));
        assert_eq!(config.default_server.as_deref(), Some("http://bad host"));
    }

    #[test]
    fn test_from_env_accepts_malformed_master() {
        // Only this test touches the variable
        env::set_var(env_keys::KUBERNETES_MASTER, "http://bad host");
        let config = Config::from_env();
        env::remove_var(env_keys::KUBERNETES_MASTER);

        assert_eq!(config.unwrap().default_server.as_deref(), Some("http://bad host"));
    }
}
