// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client toolkit extension points and the OpenShift customization applied at startup.
//!
//! `create route` only reads [`Toolkit::client_defaults`], and only for the server
//! and empty-config message. The polymorphic helpers, special verbs, image
//! reference parser and `use_modify_config_lock` are the hooks for commands that
//! expose, pause, resume, roll out, create roles, set images or write kubeconfig.
//! None of those ship yet, so those fields are only read by the tests below.

pub mod helpers;
pub mod image;
pub mod openshift;
pub mod verbs;

pub use helpers::{GroupKind, PolymorphicHelpers, RolloutStatus};
pub use image::{ImageReference, ImageReferenceParserFn};
pub use verbs::SpecialVerbs;

use crate::config::Config;
use crate::constants::{groups, EMPTY_CONFIG_MESSAGE};
use crate::kubernetes::mapper::GroupResource;
use tracing::debug;

const UPSTREAM_EMPTY_CONFIG_MESSAGE: &str =
    "invalid configuration: no configuration has been provided, try setting KUBERNETES_MASTER environment variable";

/// Defaults applied while building the client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientDefaults {
    /// Server used when no other configuration is found
    pub cluster_server: Option<String>,
    /// Reported when no configuration is found at all
    pub empty_config_message: String,
    /// Whether kubeconfig writes take a lock file first; nothing writes kubeconfig yet
    pub use_modify_config_lock: bool,
}

impl Default for ClientDefaults {
    fn default() -> Self {
        Self {
            cluster_server: None,
            empty_config_message: UPSTREAM_EMPTY_CONFIG_MESSAGE.to_string(),
            use_modify_config_lock: true,
        }
    }
}

/// Every extension point commands consult
pub struct Toolkit {
    pub client_defaults: ClientDefaults,
    pub helpers: PolymorphicHelpers,
    pub special_verbs: SpecialVerbs,
    pub parse_image_reference: ImageReferenceParserFn,
}

impl Toolkit {
    pub fn upstream() -> Self {
        Self {
            client_defaults: ClientDefaults::default(),
            helpers: PolymorphicHelpers::upstream(),
            special_verbs: SpecialVerbs::upstream(),
            parse_image_reference: image::parse_docker_reference,
        }
    }
}

impl Default for Toolkit {
    fn default() -> Self {
        Self::upstream()
    }
}

/// Switch the toolkit to OpenShift behavior. Runs once, before any command.
pub fn shim_for_oc(mut toolkit: Toolkit, config: &Config) -> Toolkit {
    toolkit.client_defaults = ClientDefaults {
        cluster_server: config.default_server.clone(),
        empty_config_message: EMPTY_CONFIG_MESSAGE.to_string(),
        use_modify_config_lock: false,
    };
    toolkit.parse_image_reference = image::parse_openshift_reference;
    toolkit.special_verbs.add(
        "use",
        GroupResource::new(groups::SECURITY, "securitycontextconstraints"),
    );

    let PolymorphicHelpers {
        can_be_exposed,
        ports_for_object,
        protocols_for_object,
        map_based_selector_for_object,
        object_pauser,
        object_resumer,
        status_viewer,
        update_pod_spec_for_object,
    } = toolkit.helpers;
    toolkit.helpers = PolymorphicHelpers {
        can_be_exposed: openshift::can_be_exposed(can_be_exposed),
        ports_for_object: openshift::ports_for_object(ports_for_object),
        protocols_for_object: openshift::protocols_for_object(protocols_for_object),
        map_based_selector_for_object: openshift::map_based_selector_for_object(
            map_based_selector_for_object,
        ),
        object_pauser: openshift::object_pauser(object_pauser),
        object_resumer: openshift::object_resumer(object_resumer),
        status_viewer: openshift::status_viewer(status_viewer),
        update_pod_spec_for_object: openshift::update_pod_spec_for_object(
            update_pod_spec_for_object,
        ),
    };

    debug!(
        "Toolkit shimmed for OpenShift: default_server={:?}",
        toolkit.client_defaults.cluster_server
    );
    toolkit
}
