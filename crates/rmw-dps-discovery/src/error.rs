// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use thiserror::Error;

/// Errors emitted by the discovery layer.
///
/// Ingestion and graph queries never fail; these variants only surface at the
/// edges (notifier implementations, configuration parsing, argument checks).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("failed to trigger graph notification: {0}")]
    TriggerFailed(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
