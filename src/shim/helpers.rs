// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Polymorphic helpers: overridable per-purpose strategies that operate on
//! arbitrary API objects.
//!
//! The upstream set only understands core Kubernetes workload kinds. Vendor
//! layers replace individual strategies with wrappers that handle their own
//! kinds and delegate everything else to the strategy they replaced.

use crate::error::{Result, RouteCtlError};
use kube::core::DynamicObject;
use kube::ResourceExt;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

pub type CanBeExposedFn = Box<dyn Fn(&GroupKind) -> Result<()> + Send + Sync>;
pub type PortsForObjectFn = Box<dyn Fn(&DynamicObject) -> Result<Vec<String>> + Send + Sync>;
pub type ProtocolsForObjectFn =
    Box<dyn Fn(&DynamicObject) -> Result<BTreeMap<String, String>> + Send + Sync>;
pub type MapBasedSelectorForObjectFn = Box<dyn Fn(&DynamicObject) -> Result<String> + Send + Sync>;
pub type ObjectPauserFn = Box<dyn Fn(&DynamicObject) -> Result<DynamicObject> + Send + Sync>;
pub type ObjectResumerFn = Box<dyn Fn(&DynamicObject) -> Result<DynamicObject> + Send + Sync>;
pub type StatusViewerFn = Box<dyn Fn(&DynamicObject) -> Result<RolloutStatus> + Send + Sync>;
pub type PodSpecMutator<'a> = &'a mut dyn FnMut(&mut Value) -> Result<()>;
pub type UpdatePodSpecForObjectFn =
    Box<dyn for<'a> Fn(&mut DynamicObject, PodSpecMutator<'a>) -> Result<()> + Send + Sync>;

/// API group and kind of an object, e.g. `Deployment.apps`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKind {
    pub group: String,
    pub kind: String,
}

impl GroupKind {
    pub fn new(group: &str, kind: &str) -> Self {
        Self {
            group: group.to_string(),
            kind: kind.to_string(),
        }
    }

    /// Read the group and kind from an object's `apiVersion` and `kind`
    pub fn of(object: &DynamicObject) -> Result<Self> {
        let types = object.types.as_ref().ok_or_else(|| {
            RouteCtlError::UnsupportedKind(format!(
                "object \"{}\" has no apiVersion or kind",
                object.name_any()
            ))
        })?;
        let group = types
            .api_version
            .rsplit_once('/')
            .map(|(group, _)| group)
            .unwrap_or("");
        Ok(Self::new(group, &types.kind))
    }

    pub fn is(&self, group: &str, kind: &str) -> bool {
        self.group == group && self.kind == kind
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}.{}", self.kind, self.group)
        }
    }
}

/// Outcome of inspecting a workload's rollout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolloutStatus {
    pub message: String,
    pub done: bool,
}

/// The full set of overridable strategies
pub struct PolymorphicHelpers {
    pub can_be_exposed: CanBeExposedFn,
    pub ports_for_object: PortsForObjectFn,
    pub protocols_for_object: ProtocolsForObjectFn,
    pub map_based_selector_for_object: MapBasedSelectorForObjectFn,
    pub object_pauser: ObjectPauserFn,
    pub object_resumer: ObjectResumerFn,
    pub status_viewer: StatusViewerFn,
    pub update_pod_spec_for_object: UpdatePodSpecForObjectFn,
}

impl PolymorphicHelpers {
    /// Strategies for core Kubernetes kinds only
    pub fn upstream() -> Self {
        Self {
            can_be_exposed: Box::new(can_be_exposed),
            ports_for_object: Box::new(ports_for_object),
            protocols_for_object: Box::new(protocols_for_object),
            map_based_selector_for_object: Box::new(map_based_selector_for_object),
            object_pauser: Box::new(|object: &DynamicObject| pause_deployment(object, true)),
            object_resumer: Box::new(|object: &DynamicObject| pause_deployment(object, false)),
            status_viewer: Box::new(status_viewer),
            update_pod_spec_for_object: Box::new(update_pod_spec_for_object),
        }
    }
}

impl Default for PolymorphicHelpers {
    fn default() -> Self {
        Self::upstream()
    }
}

fn is_deployment(gk: &GroupKind) -> bool {
    gk.is("apps", "Deployment") || gk.is("extensions", "Deployment")
}

fn is_replica_set(gk: &GroupKind) -> bool {
    gk.is("apps", "ReplicaSet") || gk.is("extensions", "ReplicaSet")
}

fn can_be_exposed(gk: &GroupKind) -> Result<()> {
    if gk.is("", "ReplicationController")
        || gk.is("", "Service")
        || gk.is("", "Pod")
        || is_deployment(gk)
        || is_replica_set(gk)
    {
        Ok(())
    } else {
        Err(RouteCtlError::CannotExpose(gk.to_string()))
    }
}

fn ports_for_object(object: &DynamicObject) -> Result<Vec<String>> {
    let gk = GroupKind::of(object)?;
    if gk.is("", "Pod") {
        Ok(container_ports(object.data.pointer("/spec")))
    } else if gk.is("", "Service") {
        Ok(service_ports(object)
            .map(|(port, _)| port)
            .collect())
    } else if gk.is("", "ReplicationController") || is_deployment(&gk) || is_replica_set(&gk) {
        Ok(container_ports(object.data.pointer("/spec/template/spec")))
    } else {
        Err(RouteCtlError::UnsupportedKind(format!(
            "cannot extract ports from {}",
            gk
        )))
    }
}

fn protocols_for_object(object: &DynamicObject) -> Result<BTreeMap<String, String>> {
    let gk = GroupKind::of(object)?;
    if gk.is("", "Pod") {
        Ok(container_protocols(object.data.pointer("/spec")))
    } else if gk.is("", "Service") {
        Ok(service_ports(object).collect())
    } else if gk.is("", "ReplicationController") || is_deployment(&gk) || is_replica_set(&gk) {
        Ok(container_protocols(object.data.pointer("/spec/template/spec")))
    } else {
        Err(RouteCtlError::UnsupportedKind(format!(
            "cannot extract protocols from {}",
            gk
        )))
    }
}

fn map_based_selector_for_object(object: &DynamicObject) -> Result<String> {
    let gk = GroupKind::of(object)?;
    if gk.is("", "Service") {
        let selector = object.data.pointer("/spec/selector");
        if selector.and_then(Value::as_object).map_or(true, |s| s.is_empty()) {
            return Err(RouteCtlError::UnsupportedKind(
                "the service has no pod selector set".to_string(),
            ));
        }
        render_selector(selector)
    } else if gk.is("", "ReplicationController") {
        render_selector(object.data.pointer("/spec/selector"))
    } else if gk.is("", "Pod") {
        if object.labels().is_empty() {
            return Err(RouteCtlError::UnsupportedKind(
                "the pod has no labels and cannot be exposed".to_string(),
            ));
        }
        Ok(object
            .labels()
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(","))
    } else if is_deployment(&gk) || is_replica_set(&gk) {
        if let Some(expressions) = object
            .data
            .pointer("/spec/selector/matchExpressions")
            .and_then(Value::as_array)
            .filter(|e| !e.is_empty())
        {
            return Err(RouteCtlError::UnsupportedKind(format!(
                "couldn't convert expressions - \"{}\" to map-based selector format",
                Value::Array(expressions.clone())
            )));
        }
        render_selector(object.data.pointer("/spec/selector/matchLabels"))
    } else {
        Err(RouteCtlError::UnsupportedKind(format!(
            "cannot extract pod selector from {}",
            gk
        )))
    }
}

fn pause_deployment(object: &DynamicObject, pause: bool) -> Result<DynamicObject> {
    let gk = GroupKind::of(object)?;
    if !is_deployment(&gk) {
        let verb = if pause { "pausing" } else { "resuming" };
        return Err(RouteCtlError::UnsupportedKind(format!(
            "{} is not supported for {}",
            verb, gk
        )));
    }
    set_paused(object, pause)
}

fn status_viewer(object: &DynamicObject) -> Result<RolloutStatus> {
    let gk = GroupKind::of(object)?;
    if !is_deployment(&gk) {
        return Err(RouteCtlError::UnsupportedKind(format!(
            "no status viewer has been implemented for {}",
            gk
        )));
    }
    rollout_status(object, "deployment")
}

fn update_pod_spec_for_object(object: &mut DynamicObject, mutate: PodSpecMutator<'_>) -> Result<()> {
    let gk = GroupKind::of(object)?;
    let pointer = if gk.is("", "Pod") {
        "/spec"
    } else if gk.is("", "ReplicationController")
        || is_deployment(&gk)
        || is_replica_set(&gk)
        || gk.is("apps", "DaemonSet")
        || gk.is("apps", "StatefulSet")
        || gk.is("batch", "Job")
    {
        "/spec/template/spec"
    } else if gk.is("batch", "CronJob") {
        "/spec/jobTemplate/spec/template/spec"
    } else {
        return Err(RouteCtlError::UnsupportedKind(format!(
            "the object is not a pod or does not have a pod template: {}",
            gk
        )));
    };
    mutate_at(object, pointer, mutate)
}

/// `containerPort` values of every container in a pod spec
pub(crate) fn container_ports(pod_spec: Option<&Value>) -> Vec<String> {
    container_port_entries(pod_spec)
        .map(|(port, _)| port)
        .collect()
}

/// `containerPort` to protocol for every container in a pod spec, TCP when unset
pub(crate) fn container_protocols(pod_spec: Option<&Value>) -> BTreeMap<String, String> {
    container_port_entries(pod_spec).collect()
}

fn container_port_entries(pod_spec: Option<&Value>) -> impl Iterator<Item = (String, String)> + '_ {
    pod_spec
        .and_then(|spec| spec.get("containers"))
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|container| container.get("ports").and_then(Value::as_array))
        .flatten()
        .filter_map(|port| {
            let number = port.get("containerPort")?.as_i64()?;
            Some((number.to_string(), protocol_of(port)))
        })
}

fn service_ports(object: &DynamicObject) -> impl Iterator<Item = (String, String)> + '_ {
    object
        .data
        .pointer("/spec/ports")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|port| {
            let number = port.get("port")?.as_i64()?;
            Some((number.to_string(), protocol_of(port)))
        })
}

fn protocol_of(port: &Value) -> String {
    port.get("protocol")
        .and_then(Value::as_str)
        .unwrap_or("TCP")
        .to_string()
}

/// Render a string map as `k=v,...` sorted by key
pub(crate) fn render_selector(selector: Option<&Value>) -> Result<String> {
    let Some(map) = selector.and_then(Value::as_object) else {
        return Err(RouteCtlError::UnsupportedKind(
            "object has no map-based selector".to_string(),
        ));
    };
    let pairs: BTreeMap<&str, &str> = map
        .iter()
        .filter_map(|(k, v)| v.as_str().map(|v| (k.as_str(), v)))
        .collect();
    Ok(pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(","))
}

/// Copy of `object` with `spec.paused` set, erroring when it already has that value
pub(crate) fn set_paused(object: &DynamicObject, pause: bool) -> Result<DynamicObject> {
    let currently_paused = object
        .data
        .pointer("/spec/paused")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if currently_paused == pause {
        let state = if pause { "is already paused" } else { "is not paused" };
        return Err(RouteCtlError::InvalidArgument(format!(
            "{} {}",
            object.name_any(),
            state
        )));
    }

    let mut patched = object.clone();
    match patched.data.get_mut("spec").and_then(Value::as_object_mut) {
        Some(spec) => {
            spec.insert("paused".to_string(), Value::Bool(pause));
        }
        None => {
            patched.data["spec"] = serde_json::json!({ "paused": pause });
        }
    }
    Ok(patched)
}

/// Rollout progress of a replicated workload, `noun` names the kind in messages
pub(crate) fn rollout_status(object: &DynamicObject, noun: &str) -> Result<RolloutStatus> {
    let name = object.name_any();
    let int_at = |pointer: &str| object.data.pointer(pointer).and_then(Value::as_i64);

    let generation = object.metadata.generation.unwrap_or(0);
    let observed = int_at("/status/observedGeneration").unwrap_or(0);
    if generation > observed {
        return Ok(RolloutStatus {
            message: format!("Waiting for {} spec update to be observed...", noun),
            done: false,
        });
    }

    let timed_out = object
        .data
        .pointer("/status/conditions")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .any(|c| {
            c.get("type").and_then(Value::as_str) == Some("Progressing")
                && c.get("reason").and_then(Value::as_str) == Some("ProgressDeadlineExceeded")
        });
    if timed_out {
        return Err(RouteCtlError::InvalidArgument(format!(
            "{} \"{}\" exceeded its progress deadline",
            noun, name
        )));
    }

    let updated = int_at("/status/updatedReplicas").unwrap_or(0);
    let current = int_at("/status/replicas").unwrap_or(0);
    let available = int_at("/status/availableReplicas").unwrap_or(0);

    let message = if let Some(desired) = int_at("/spec/replicas").filter(|d| updated < *d) {
        format!(
            "Waiting for {} \"{}\" rollout to finish: {} out of {} new replicas have been updated...",
            noun, name, updated, desired
        )
    } else if current > updated {
        format!(
            "Waiting for {} \"{}\" rollout to finish: {} old replicas are pending termination...",
            noun,
            name,
            current - updated
        )
    } else if available < updated {
        format!(
            "Waiting for {} \"{}\" rollout to finish: {} of {} updated replicas are available...",
            noun, name, available, updated
        )
    } else {
        return Ok(RolloutStatus {
            message: format!("{} \"{}\" successfully rolled out", noun, name),
            done: true,
        });
    };

    Ok(RolloutStatus {
        message,
        done: false,
    })
}

/// Run `mutate` against the JSON value at `pointer`, which must exist
pub(crate) fn mutate_at(
    object: &mut DynamicObject,
    pointer: &str,
    mutate: PodSpecMutator<'_>,
) -> Result<()> {
    let name = object.name_any();
    let target = object.data.pointer_mut(pointer).ok_or_else(|| {
        RouteCtlError::UnsupportedKind(format!("{} has no pod template at {}", name, pointer))
    })?;
    mutate(target)
}
