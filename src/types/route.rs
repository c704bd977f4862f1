// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use clap::ValueEnum;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::{CustomResource, ResourceExt};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RouteCtlError};

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[kube(group = "route.openshift.io", version = "v1", kind = "Route")]
#[kube(namespaced)]
#[kube(status = "RouteStatus")]
#[serde(rename_all = "camelCase")]
pub struct RouteSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub to: RouteTargetReference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<RoutePort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wildcard_policy: Option<WildcardPolicy>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteTargetReference {
    pub kind: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
}

impl Default for RouteTargetReference {
    fn default() -> Self {
        Self {
            kind: "Service".to_string(),
            name: String::new(),
            weight: None,
        }
    }
}

impl RouteTargetReference {
    pub fn service(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoutePort {
    pub target_port: IntOrString,
}

impl RoutePort {
    /// Interpret a `--port` value as a port number when it parses as one, a port name otherwise.
    /// An empty value means "no port".
    pub fn parse(port: &str) -> Option<Self> {
        if port.is_empty() {
            return None;
        }
        let target_port = match port.parse::<i32>() {
            Ok(number) => IntOrString::Int(number),
            Err(_) => IntOrString::String(port.to_string()),
        };
        Some(Self { target_port })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TlsConfig {
    pub termination: TlsTermination,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_certificate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_ca_certificate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecure_edge_termination_policy: Option<InsecureEdgeTerminationPolicy>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TlsTermination {
    #[default]
    Edge,
    Passthrough,
    Reencrypt,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, ValueEnum, schemars::JsonSchema)]
pub enum InsecureEdgeTerminationPolicy {
    #[value(name = "None")]
    None,
    #[value(name = "Allow")]
    Allow,
    #[value(name = "Redirect")]
    Redirect,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, ValueEnum, schemars::JsonSchema)]
pub enum WildcardPolicy {
    #[value(name = "None")]
    None,
    #[value(name = "Subdomain")]
    Subdomain,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingress: Vec<RouteIngress>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteIngress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub router_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wildcard_policy: Option<WildcardPolicy>,
}

impl Route {
    /// Check the fields the API server rejects before sending the route.
    pub fn validate(&self) -> Result<()> {
        let mut reasons = Vec::new();
        let name = self.name_any();

        if name.is_empty() {
            reasons.push("metadata.name: Required value".to_string());
        } else if !is_dns1123_subdomain(&name) {
            reasons.push(format!(
                "metadata.name: Invalid value: \"{}\": must be a lowercase RFC 1123 subdomain",
                name
            ));
        }

        if self.spec.to.name.is_empty() {
            reasons.push("spec.to.name: Required value".to_string());
        }

        if let Some(host) = self.spec.host.as_deref().filter(|h| !h.is_empty()) {
            if !is_dns1123_subdomain(host) {
                reasons.push(format!(
                    "spec.host: Invalid value: \"{}\": must be a lowercase RFC 1123 subdomain",
                    host
                ));
            }
        }

        if let Some(tls) = &self.spec.tls {
            if tls.termination == TlsTermination::Passthrough {
                if tls.insecure_edge_termination_policy == Some(InsecureEdgeTerminationPolicy::Allow) {
                    reasons.push(
                        "spec.tls.insecureEdgeTerminationPolicy: Invalid value: \"Allow\": passthrough termination does not support Allow"
                            .to_string(),
                    );
                }
                if self.spec.path.as_deref().is_some_and(|p| !p.is_empty()) {
                    reasons.push(
                        "spec.path: Invalid value: passthrough termination does not support paths"
                            .to_string(),
                    );
                }
            }
        }

        if reasons.is_empty() {
            Ok(())
        } else {
            Err(RouteCtlError::InvalidRoute {
                name,
                reasons: reasons.join(", "),
            })
        }
    }
}

fn is_dns1123_subdomain(value: &str) -> bool {
    value.len() <= 253
        && value.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && label
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
                && !label.starts_with('-')
                && !label.ends_with('-')
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::api::ObjectMeta;

    fn make_route(name: &str, service: &str) -> Route {
        Route {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            spec: RouteSpec {
                to: RouteTargetReference::service(service),
                ..Default::default()
            },
            status: None,
        }
    }

    fn passthrough() -> TlsConfig {
        TlsConfig {
            termination: TlsTermination::Passthrough,
            ..Default::default()
        }
    }

    #[test]
    fn test_route_port_parse_number() {
        let port = RoutePort::parse("8443").unwrap();
        assert_eq!(port.target_port, IntOrString::Int(8443));
    }

    #[test]
    fn test_route_port_parse_name() {
        let port = RoutePort::parse("https").unwrap();
        assert_eq!(port.target_port, IntOrString::String("https".to_string()));
    }

    #[test]
    fn test_route_port_parse_empty() {
        assert!(RoutePort::parse("").is_none());
    }

    #[test]
    fn test_serialize_uses_api_field_names() {
        let mut route = make_route("my-route", "frontend");
        route.spec.tls = Some(TlsConfig {
            insecure_edge_termination_policy: Some(InsecureEdgeTerminationPolicy::Redirect),
            ..passthrough()
        });
        route.spec.wildcard_policy = Some(WildcardPolicy::Subdomain);

        let value = serde_json::to_value(&route).unwrap();

        assert_eq!(value["apiVersion"], "route.openshift.io/v1");
        assert_eq!(value["kind"], "Route");
        assert_eq!(value["spec"]["to"]["kind"], "Service");
        assert_eq!(value["spec"]["tls"]["termination"], "passthrough");
        assert_eq!(value["spec"]["tls"]["insecureEdgeTerminationPolicy"], "Redirect");
        assert_eq!(value["spec"]["wildcardPolicy"], "Subdomain");
        assert!(value["spec"].get("host").is_none());
    }

    #[test]
    fn test_validate_accepts_minimal_route() {
        assert!(make_route("my-route", "frontend").validate().is_ok());
    }

    #[test]
    fn test_validate_requires_name_and_service() {
        let err = make_route("", "").validate().unwrap_err().to_string();
        assert!(err.contains("metadata.name: Required value"));
        assert!(err.contains("spec.to.name: Required value"));
    }

    #[test]
    fn test_validate_rejects_uppercase_host() {
        let mut route = make_route("my-route", "frontend");
        route.spec.host = Some("WWW.example.com".to_string());
        assert!(route.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_allow_for_passthrough() {
        let mut route = make_route("my-route", "frontend");
        route.spec.tls = Some(TlsConfig {
            insecure_edge_termination_policy: Some(InsecureEdgeTerminationPolicy::Allow),
            ..passthrough()
        });
        let err = route.validate().unwrap_err().to_string();
        assert!(err.contains("does not support Allow"));
    }

    #[test]
    fn test_validate_allows_redirect_for_passthrough() {
        let mut route = make_route("my-route", "frontend");
        route.spec.tls = Some(TlsConfig {
            insecure_edge_termination_policy: Some(InsecureEdgeTerminationPolicy::Redirect),
            ..passthrough()
        });
        assert!(route.validate().is_ok());
    }

    #[test]
    fn test_dns1123_subdomain() {
        assert!(is_dns1123_subdomain("www.example.com"));
        assert!(!is_dns1123_subdomain("-bad.example.com"));
        assert!(!is_dns1123_subdomain("a..b"));
        assert!(!is_dns1123_subdomain(&"a".repeat(64)));
    }
}
