// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod cli;
pub mod config;
pub mod constants;
pub mod create;
pub mod error;
pub mod kubernetes;
pub mod shim;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;
