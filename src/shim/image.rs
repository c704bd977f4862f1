// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Container image reference parsing.

use crate::error::{Result, RouteCtlError};
use std::fmt;
use std::str::FromStr;

/// Turns a user supplied image reference into the form written to pod specs
pub type ImageReferenceParserFn = fn(&str) -> Result<String>;

const DOCKER_HUB: &str = "docker.io";
const LEGACY_DOCKER_HUB: &str = "index.docker.io";
const DOCKER_HUB_NAMESPACE: &str = "library";

/// `[registry/][namespace/]name[:tag][@id]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageReference {
    pub registry: String,
    pub namespace: String,
    pub name: String,
    pub tag: String,
    pub id: String,
}

impl FromStr for ImageReference {
    type Err = RouteCtlError;

    fn from_str(spec: &str) -> Result<Self> {
        let invalid = |reason: &str| RouteCtlError::InvalidImageReference {
            reference: spec.to_string(),
            reason: reason.to_string(),
        };

        if spec.is_empty() {
            return Err(invalid("repository name must have at least one component"));
        }

        let mut reference = ImageReference::default();

        let (repository, id) = match spec.split_once('@') {
            Some((repository, id)) => (repository, Some(id)),
            None => (spec, None),
        };
        if let Some(id) = id {
            if !is_valid_digest(id) {
                return Err(invalid("invalid digest format"));
            }
            reference.id = id.to_string();
        }

        // A ':' after the last '/' separates the tag; earlier ones belong to a registry port
        let last_slash = repository.rfind('/').map_or(0, |i| i + 1);
        let repository = match repository[last_slash..].rfind(':') {
            Some(i) => {
                let tag = &repository[last_slash + i + 1..];
                if !is_valid_tag(tag) {
                    return Err(invalid("invalid tag format"));
                }
                reference.tag = tag.to_string();
                &repository[..last_slash + i]
            }
            None => repository,
        };

        let components: Vec<&str> = repository.split('/').collect();
        if components.iter().any(|c| c.is_empty()) {
            return Err(invalid("repository name components must not be empty"));
        }

        match components.as_slice() {
            [name] => reference.name = name.to_string(),
            [first, name] if is_registry(first) => {
                reference.registry = first.to_string();
                reference.name = name.to_string();
            }
            [namespace, name] => {
                reference.namespace = namespace.to_string();
                reference.name = name.to_string();
            }
            [registry, namespace, rest @ ..] => {
                reference.registry = registry.to_string();
                reference.namespace = namespace.to_string();
                reference.name = rest.join("/");
            }
            [] => return Err(invalid("repository name must have at least one component")),
        }

        let repository_parts = [reference.namespace.as_str(), reference.name.as_str()];
        if repository_parts
            .iter()
            .flat_map(|part| part.split('/'))
            .filter(|c| !c.is_empty())
            .any(|c| !is_valid_path_component(c))
        {
            return Err(invalid(
                "repository name must be lowercase alphanumerics separated by '.', '_' or '-'",
            ));
        }

        Ok(reference)
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in [&self.registry, &self.namespace] {
            if !part.is_empty() {
                write!(f, "{}/", part)?;
            }
        }
        write!(f, "{}", self.name)?;
        if !self.tag.is_empty() {
            write!(f, ":{}", self.tag)?;
        }
        if !self.id.is_empty() {
            write!(f, "@{}", self.id)?;
        }
        Ok(())
    }
}

impl ImageReference {
    /// Fill in the implicit Docker Hub registry and `library` namespace
    pub fn docker_normalized(mut self) -> Self {
        if self.registry.is_empty() || self.registry == LEGACY_DOCKER_HUB {
            self.registry = DOCKER_HUB.to_string();
        }
        if self.registry == DOCKER_HUB && self.namespace.is_empty() {
            self.namespace = DOCKER_HUB_NAMESPACE.to_string();
        }
        self
    }
}

/// Docker's interpretation: references without a registry point at Docker Hub
pub fn parse_docker_reference(spec: &str) -> Result<String> {
    Ok(spec.parse::<ImageReference>()?.docker_normalized().to_string())
}

/// OpenShift's interpretation: references are kept exactly as written,
/// the registry is resolved later by the cluster's image policy
pub fn parse_openshift_reference(spec: &str) -> Result<String> {
    Ok(spec.parse::<ImageReference>()?.to_string())
}

fn is_registry(component: &str) -> bool {
    component.contains('.') || component.contains(':') || component == "localhost"
}

fn is_valid_path_component(component: &str) -> bool {
    let mut chars = component.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-'))
}

fn is_valid_tag(tag: &str) -> bool {
    let mut chars = tag.chars();
    tag.len() <= 128
        && chars
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

fn is_valid_digest(id: &str) -> bool {
    let Some((algorithm, hex)) = id.split_once(':') else {
        return false;
    };
    !algorithm.is_empty()
        && algorithm
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '+' | '.' | '_' | '-'))
        && hex.len() >= 32
        && hex.chars().all(|c| c.is_ascii_hexdigit())
}
