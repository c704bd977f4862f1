// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Environment variables read at startup
pub mod env {
    /// Default API server address used when no client configuration exists
    pub const KUBERNETES_MASTER: &str = "KUBERNETES_MASTER";
}

/// Kubernetes annotation keys
pub mod annotations {
    /// Holds the JSON of the object as it was last created or applied
    pub const LAST_APPLIED_CONFIG: &str = "kubectl.kubernetes.io/last-applied-configuration";
}

/// Field manager recorded on objects created by this client
pub const DEFAULT_FIELD_MANAGER: &str = "kubectl-create";

/// OpenShift API groups
pub mod groups {
    pub const ROUTE: &str = "route.openshift.io";
    pub const APPS: &str = "apps.openshift.io";
    pub const SECURITY: &str = "security.openshift.io";
}

/// Message reported when no client configuration can be found
pub const EMPTY_CONFIG_MESSAGE: &str = "Missing or incomplete configuration info.  Please point to an existing, complete config file:

  1. Via the command-line flag --kubeconfig
  2. Via the KUBECONFIG environment variable
  3. In your home directory as ~/.kube/config

To view or setup config directly use the 'config' command.";
