// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! OpenShift variants of the polymorphic helpers.
//!
//! Every constructor takes the strategy being replaced and returns one that
//! answers for `DeploymentConfig` and delegates all other kinds.

use crate::constants::groups;
use crate::error::{Result, RouteCtlError};
use crate::shim::helpers::{
    container_ports, container_protocols, mutate_at, render_selector, rollout_status, set_paused,
    CanBeExposedFn, GroupKind, MapBasedSelectorForObjectFn, ObjectPauserFn, ObjectResumerFn,
    PortsForObjectFn, ProtocolsForObjectFn, StatusViewerFn,
    UpdatePodSpecForObjectFn,
};
use kube::core::DynamicObject;
use serde_json::Value;

const DEPLOYMENT_CONFIG: &str = "DeploymentConfig";

fn is_deployment_config(gk: &GroupKind) -> bool {
    // Legacy clusters serve DeploymentConfig from the core group
    gk.is(groups::APPS, DEPLOYMENT_CONFIG) || gk.is("", DEPLOYMENT_CONFIG)
}

fn object_is_deployment_config(object: &DynamicObject) -> bool {
    GroupKind::of(object).is_ok_and(|gk| is_deployment_config(&gk))
}

pub fn can_be_exposed(delegate: CanBeExposedFn) -> CanBeExposedFn {
    Box::new(move |gk: &GroupKind| {
        if is_deployment_config(gk) {
            return Ok(());
        }
        delegate(gk)
    })
}

pub fn ports_for_object(delegate: PortsForObjectFn) -> PortsForObjectFn {
    Box::new(move |object: &DynamicObject| {
        if object_is_deployment_config(object) {
            return Ok(container_ports(object.data.pointer("/spec/template/spec")));
        }
        delegate(object)
    })
}

pub fn protocols_for_object(delegate: ProtocolsForObjectFn) -> ProtocolsForObjectFn {
    Box::new(move |object: &DynamicObject| {
        if object_is_deployment_config(object) {
            return Ok(container_protocols(object.data.pointer("/spec/template/spec")));
        }
        delegate(object)
    })
}

pub fn map_based_selector_for_object(
    delegate: MapBasedSelectorForObjectFn,
) -> MapBasedSelectorForObjectFn {
    Box::new(move |object: &DynamicObject| {
        if object_is_deployment_config(object) {
            let selector = object.data.pointer("/spec/selector");
            if selector.and_then(Value::as_object).map_or(true, |s| s.is_empty()) {
                return Err(RouteCtlError::UnsupportedKind(
                    "the deployment config has no pod selector set".to_string(),
                ));
            }
            return render_selector(selector);
        }
        delegate(object)
    })
}

pub fn object_pauser(delegate: ObjectPauserFn) -> ObjectPauserFn {
    Box::new(move |object: &DynamicObject| {
        if object_is_deployment_config(object) {
            return set_paused(object, true);
        }
        delegate(object)
    })
}

pub fn object_resumer(delegate: ObjectResumerFn) -> ObjectResumerFn {
    Box::new(move |object: &DynamicObject| {
        if object_is_deployment_config(object) {
            return set_paused(object, false);
        }
        delegate(object)
    })
}

pub fn status_viewer(delegate: StatusViewerFn) -> StatusViewerFn {
    Box::new(move |object: &DynamicObject| {
        if object_is_deployment_config(object) {
            return rollout_status(object, "deployment config");
        }
        delegate(object)
    })
}

pub fn update_pod_spec_for_object(delegate: UpdatePodSpecForObjectFn) -> UpdatePodSpecForObjectFn {
    Box::new(
        move |object: &mut DynamicObject, mutate: &mut dyn FnMut(&mut Value) -> Result<()>| {
            if object_is_deployment_config(object) {
                return mutate_at(object, "/spec/template/spec", mutate);
            }
            delegate(object, mutate)
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shim::helpers::tests::make_object;
    use crate::shim::helpers::PolymorphicHelpers;
    use serde_json::json;

    fn deployment_config(body: Value) -> DynamicObject {
        make_object("apps.openshift.io/v1", "DeploymentConfig", "frontend", body)
    }

    fn template() -> Value {
        json!({
            "selector": { "name": "frontend", "app": "shop" },
            "replicas": 2,
            "template": {
                "spec": {
                    "containers": [
                        { "name": "web", "ports": [{ "containerPort": 8443, "protocol": "TCP" }] }
                    ]
                }
            }
        })
    }

    #[test]
    fn test_can_be_exposed_accepts_deployment_config() {
        let upstream = PolymorphicHelpers::upstream();
        let wrapped = can_be_exposed(upstream.can_be_exposed);

        assert!(wrapped(&GroupKind::new("apps.openshift.io", "DeploymentConfig")).is_ok());
        assert!(wrapped(&GroupKind::new("", "DeploymentConfig")).is_ok());
    }

    #[test]
    fn test_can_be_exposed_delegates_other_kinds() {
        let upstream = PolymorphicHelpers::upstream();
        let wrapped = can_be_exposed(upstream.can_be_exposed);

        assert!(wrapped(&GroupKind::new("", "Service")).is_ok());
        assert!(wrapped(&GroupKind::new("batch", "Job")).is_err());
    }

    #[test]
    fn test_ports_and_protocols_for_deployment_config() {
        let upstream = PolymorphicHelpers::upstream();
        let ports = ports_for_object(upstream.ports_for_object);
        let protocols = protocols_for_object(upstream.protocols_for_object);
        let dc = deployment_config(json!({ "spec": template() }));

        assert_eq!(ports(&dc).unwrap(), vec!["8443"]);
        assert_eq!(protocols(&dc).unwrap().get("8443").unwrap(), "TCP");
    }

    #[test]
    fn test_selector_for_deployment_config() {
        let upstream = PolymorphicHelpers::upstream();
        let selector = map_based_selector_for_object(upstream.map_based_selector_for_object);
        let dc = deployment_config(json!({ "spec": template() }));

        assert_eq!(selector(&dc).unwrap(), "app=shop,name=frontend");
    }

    #[test]
    fn test_selector_delegates_for_service() {
        let upstream = PolymorphicHelpers::upstream();
        let selector = map_based_selector_for_object(upstream.map_based_selector_for_object);
        let svc = make_object(
            "v1",
            "Service",
            "frontend",
            json!({ "spec": { "selector": { "app": "shop" } } }),
        );

        assert_eq!(selector(&svc).unwrap(), "app=shop");
    }

    #[test]
    fn test_pause_and_resume_deployment_config() {
        let upstream = PolymorphicHelpers::upstream();
        let pauser = object_pauser(upstream.object_pauser);
        let resumer = object_resumer(upstream.object_resumer);
        let dc = deployment_config(json!({ "spec": template() }));

        let paused = pauser(&dc).unwrap();
        assert_eq!(paused.data["spec"]["paused"], json!(true));
        assert!(resumer(&dc).is_err());
        assert_eq!(resumer(&paused).unwrap().data["spec"]["paused"], json!(false));
    }

    #[test]
    fn test_status_viewer_for_deployment_config() {
        let upstream = PolymorphicHelpers::upstream();
        let viewer = status_viewer(upstream.status_viewer);
        let mut dc = deployment_config(json!({
            "spec": template(),
            "status": { "observedGeneration": 3, "updatedReplicas": 2, "replicas": 2, "availableReplicas": 2 }
        }));
        dc.metadata.generation = Some(3);

        let status = viewer(&dc).unwrap();
        assert!(status.done);
        assert_eq!(status.message, "deployment config \"frontend\" successfully rolled out");
    }

    #[test]
    fn test_update_pod_spec_for_deployment_config() {
        let upstream = PolymorphicHelpers::upstream();
        let update = update_pod_spec_for_object(upstream.update_pod_spec_for_object);
        let mut dc = deployment_config(json!({ "spec": template() }));

        update(&mut dc, &mut |spec: &mut Value| {
            spec["nodeSelector"] = json!({ "region": "primary" });
            Ok(())
        })
        .unwrap();

        assert_eq!(
            dc.data["spec"]["template"]["spec"]["nodeSelector"]["region"],
            json!("primary")
        );
    }
}
