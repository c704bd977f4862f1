// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for client creation and resource name mapping.

pub mod client;
pub mod mapper;

pub use client::{create_client_context, normalize_server, ClientContext, ConnectionOptions};
pub use mapper::{resolve_resource, GroupResource, RestMapper};
