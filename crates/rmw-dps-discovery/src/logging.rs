// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Log severity passthrough.
//!
//! The bus itself offers no per-component log control, so the rmw severity is
//! simply forwarded to the `log` facade's global maximum level.

use crate::error::{Error, Result};
use log::LevelFilter;
use std::str::FromStr;

/// rmw log severities, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl LogSeverity {
    /// `log` has no fatal level; fatal keeps errors only.
    #[must_use]
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Self::Debug => LevelFilter::Debug,
            Self::Info => LevelFilter::Info,
            Self::Warn => LevelFilter::Warn,
            Self::Error | Self::Fatal => LevelFilter::Error,
        }
    }
}

impl FromStr for LogSeverity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            other => Err(Error::Config(format!("unknown log severity '{}'", other))),
        }
    }
}

/// Apply an rmw log severity. Always succeeds.
pub fn set_log_severity(severity: LogSeverity) -> Result<()> {
    log::set_max_level(severity.level_filter());
    Ok(())
}
