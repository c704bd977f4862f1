// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! API object types sent to the cluster.

pub mod route;

pub use route::{
    InsecureEdgeTerminationPolicy, Route, RoutePort, RouteSpec, RouteTargetReference, TlsConfig,
    TlsTermination, WildcardPolicy,
};
