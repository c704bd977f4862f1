// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resource name mapping for `type/name` arguments

use crate::constants::groups;
use crate::error::{Result, RouteCtlError};
use std::collections::BTreeMap;
use std::fmt;

/// A resource within an API group, e.g. `deploymentconfigs.apps.openshift.io`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupResource {
    pub group: String,
    pub resource: String,
}

impl GroupResource {
    pub fn new(group: &str, resource: &str) -> Self {
        Self {
            group: group.to_string(),
            resource: resource.to_string(),
        }
    }

    /// Parse `resource[.group]`; everything after the first dot is the group
    pub fn parse(value: &str) -> Self {
        match value.split_once('.') {
            Some((resource, group)) => Self::new(group, resource),
            None => Self::new("", value),
        }
    }
}

impl fmt::Display for GroupResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}", self.resource)
        } else {
            write!(f, "{}.{}", self.resource, self.group)
        }
    }
}

/// Maps plural, singular and short resource names onto their group resource
#[derive(Debug, Clone, Default)]
pub struct RestMapper {
    aliases: BTreeMap<String, Vec<GroupResource>>,
}

impl RestMapper {
    /// Mapper preloaded with the resources this client works with
    pub fn builtin() -> Self {
        let mut mapper = Self::default();
        mapper.add(GroupResource::new("", "services"), &["svc", "service"]);
        mapper.add(GroupResource::new("", "pods"), &["po", "pod"]);
        mapper.add(
            GroupResource::new("", "replicationcontrollers"),
            &["rc", "replicationcontroller"],
        );
        mapper.add(GroupResource::new("", "namespaces"), &["ns", "namespace"]);
        mapper.add(GroupResource::new("", "configmaps"), &["cm", "configmap"]);
        mapper.add(GroupResource::new("", "secrets"), &["secret"]);
        mapper.add(GroupResource::new("apps", "deployments"), &["deploy", "deployment"]);
        mapper.add(GroupResource::new("apps", "replicasets"), &["rs", "replicaset"]);
        mapper.add(GroupResource::new("apps", "daemonsets"), &["ds", "daemonset"]);
        mapper.add(GroupResource::new("apps", "statefulsets"), &["sts", "statefulset"]);
        mapper.add(
            GroupResource::new(groups::APPS, "deploymentconfigs"),
            &["dc", "deploymentconfig"],
        );
        mapper.add(GroupResource::new(groups::ROUTE, "routes"), &["route"]);
        mapper.add(
            GroupResource::new(groups::SECURITY, "securitycontextconstraints"),
            &["scc", "securitycontextconstraint"],
        );
        mapper
    }

    /// Register a resource under its plural name and the given aliases
    pub fn add(&mut self, resource: GroupResource, aliases: &[&str]) {
        for alias in std::iter::once(resource.resource.as_str()).chain(aliases.iter().copied()) {
            let entry = self.aliases.entry(alias.to_string()).or_default();
            if !entry.contains(&resource) {
                entry.push(resource.clone());
            }
        }
    }

    /// Resolve a possibly abbreviated resource; when no group is given and
    /// several groups match, the core group wins
    pub fn resource_for(&self, input: &GroupResource) -> Result<GroupResource> {
        let resource = input.resource.to_lowercase();
        let candidates: Vec<&GroupResource> = self
            .aliases
            .get(&resource)
            .into_iter()
            .flatten()
            .filter(|gr| input.group.is_empty() || gr.group == input.group)
            .collect();

        candidates
            .iter()
            .find(|gr| gr.group.is_empty())
            .or_else(|| candidates.first())
            .map(|gr| (*gr).clone())
            .ok_or_else(|| RouteCtlError::UnknownResource(input.to_string()))
    }
}

/// Split `type/name` into the mapped resource and the name; a bare name maps to `default`
pub fn resolve_resource(
    default: &GroupResource,
    value: &str,
    mapper: &RestMapper,
) -> Result<(GroupResource, String)> {
    let parts: Vec<&str> = value.split('/').collect();
    match parts.as_slice() {
        [name] => Ok((default.clone(), name.to_string())),
        [resource, name] => {
            let resource = mapper.resource_for(&GroupResource::parse(resource))?;
            Ok((resource, name.to_string()))
        }
        _ => Err(RouteCtlError::InvalidArgument(format!(
            "invalid resource format: {}",
            value
        ))),
    }
}
