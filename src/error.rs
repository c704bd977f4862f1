// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouteCtlError {
    #[error(transparent)]
    KubeError(#[from] kube::Error),

    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("{0}")]
    EmptyConfig(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("the server doesn't have a resource type \"{0}\"")]
    UnknownResource(String),

    #[error("cannot expose {0} as routes")]
    CannotExposeAsRoute(String),

    #[error("service \"{0}\" doesn't support TCP")]
    ServiceNotTcp(String),

    #[error("Route \"{name}\" is invalid: {reasons}")]
    InvalidRoute { name: String, reasons: String },

    #[error("cannot expose a {0}")]
    CannotExpose(String),

    #[error("{0}")]
    UnsupportedKind(String),

    #[error("invalid image reference \"{reference}\": {reason}")]
    InvalidImageReference { reference: String, reason: String },

    #[error("Failed to serialize object: {0}")]
    SerializationError(String),

    #[error("Failed to write output: {0}")]
    OutputError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RouteCtlError>;
