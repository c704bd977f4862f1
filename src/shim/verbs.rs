// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Verbs that only make sense for specific resources when creating roles.
//!
//! Consulted by role creation, which this binary does not include yet.

use crate::kubernetes::mapper::GroupResource;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct SpecialVerbs {
    verbs: BTreeMap<String, Vec<GroupResource>>,
}

impl SpecialVerbs {
    pub fn upstream() -> Self {
        let mut verbs = Self::default();
        verbs.add("use", GroupResource::new("policy", "podsecuritypolicies"));
        verbs.add("use", GroupResource::new("extensions", "podsecuritypolicies"));
        for resource in ["roles", "clusterroles"] {
            verbs.add("bind", GroupResource::new("rbac.authorization.k8s.io", resource));
            verbs.add("escalate", GroupResource::new("rbac.authorization.k8s.io", resource));
        }
        for resource in ["users", "serviceaccounts", "groups"] {
            verbs.add("impersonate", GroupResource::new("", resource));
        }
        verbs.add(
            "impersonate",
            GroupResource::new("authentication.k8s.io", "userextras"),
        );
        verbs
    }

    pub fn add(&mut self, verb: &str, resource: GroupResource) {
        let resources = self.verbs.entry(verb.to_string()).or_default();
        if !resources.contains(&resource) {
            resources.push(resource);
        }
    }

    pub fn is_special(&self, verb: &str) -> bool {
        self.verbs.contains_key(verb)
    }

    /// Whether `verb` may be granted on `resource`; ordinary verbs are always allowed
    pub fn allows(&self, verb: &str, resource: &GroupResource) -> bool {
        match self.verbs.get(verb) {
            Some(resources) => resources.contains(resource),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinary_verbs_are_allowed_everywhere() {
        let verbs = SpecialVerbs::upstream();
        assert!(!verbs.is_special("get"));
        assert!(verbs.allows("get", &GroupResource::new("", "pods")));
    }

    #[test]
    fn test_special_verb_limited_to_its_resources() {
        let verbs = SpecialVerbs::upstream();
        assert!(verbs.allows("bind", &GroupResource::new("rbac.authorization.k8s.io", "roles")));
        assert!(!verbs.allows("bind", &GroupResource::new("", "pods")));
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut verbs = SpecialVerbs::default();
        verbs.add("use", GroupResource::new("policy", "podsecuritypolicies"));
        verbs.add("use", GroupResource::new("policy", "podsecuritypolicies"));
        assert_eq!(verbs.verbs["use"].len(), 1);
    }
}
