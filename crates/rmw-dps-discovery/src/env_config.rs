// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Environment variable configuration for the discovery layer.
//!
//! - `RMW_DPS_DOMAIN_ID`: domain ID (default: 0, or ROS_DOMAIN_ID if set)
//! - `RMW_DPS_LOG_LEVEL`: log severity (default: "info")
//! - `RMW_DPS_NODE_UUID`: fixed identity for the local node (default: random)
//!
//! # Example
//!
//! ```bash
//! export RMW_DPS_DOMAIN_ID=42
//! export RMW_DPS_LOG_LEVEL=debug
//! ```

use crate::error::Result;
use crate::logging::{set_log_severity, LogSeverity};
use std::env;

pub const ENV_DOMAIN_ID: &str = "RMW_DPS_DOMAIN_ID";
pub const ENV_LOG_LEVEL: &str = "RMW_DPS_LOG_LEVEL";
pub const ENV_NODE_UUID: &str = "RMW_DPS_NODE_UUID";

/// ROS 2 environment variable for domain ID (fallback)
pub const ENV_ROS_DOMAIN_ID: &str = "ROS_DOMAIN_ID";

const DEFAULT_LOG_LEVEL: &str = "info";

/// Runtime configuration from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub domain_id: u32,

    /// Logging level (debug, info, warn, error, fatal)
    pub log_level: String,

    /// Identity override for the local node
    pub node_uuid: Option<String>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            domain_id: 0,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            node_uuid: None,
        }
    }
}

impl EnvConfig {
    /// Load configuration from environment variables
    ///
    /// Priority for domain ID:
    /// 1. RMW_DPS_DOMAIN_ID
    /// 2. ROS_DOMAIN_ID
    /// 3. Default (0)
    #[must_use]
    pub fn from_env() -> Self {
        let domain_id = env::var(ENV_DOMAIN_ID)
            .ok()
            .and_then(|s| s.trim().parse::<u32>().ok())
            .or_else(|| {
                env::var(ENV_ROS_DOMAIN_ID)
                    .ok()
                    .and_then(|s| s.trim().parse::<u32>().ok())
            })
            .unwrap_or(0);

        let log_level = env::var(ENV_LOG_LEVEL)
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let node_uuid = env::var(ENV_NODE_UUID).ok().filter(|s| !s.is_empty());

        Self {
            domain_id,
            log_level,
            node_uuid,
        }
    }

    /// Check if any custom configuration was provided
    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.domain_id != 0 || self.log_level != DEFAULT_LOG_LEVEL || self.node_uuid.is_some()
    }

    pub fn log_severity(&self) -> Result<LogSeverity> {
        self.log_level.parse()
    }

    /// Apply the configured log level to the `log` facade.
    pub fn apply_log_level(&self) -> Result<()> {
        set_log_severity(self.log_severity()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_default_config() {
        let config = EnvConfig::default();
        assert_eq!(config.domain_id, 0);
        assert_eq!(config.log_level, "info");
        assert!(config.node_uuid.is_none());
        assert!(!config.is_custom());
    }

    // The only test that touches the process environment.
    #[test]
    fn test_from_env() {
        let saved: Vec<_> = [ENV_DOMAIN_ID, ENV_ROS_DOMAIN_ID, ENV_LOG_LEVEL, ENV_NODE_UUID]
            .iter()
            .map(|key| (*key, env::var(key).ok()))
            .collect();

        env::set_var(ENV_DOMAIN_ID, "42");
        env::set_var(ENV_ROS_DOMAIN_ID, "99");
        env::set_var(ENV_LOG_LEVEL, "debug");
        env::set_var(ENV_NODE_UUID, "");
        let config = EnvConfig::from_env();
        assert_eq!(config.domain_id, 42);
        assert_eq!(config.log_level, "debug");
        assert!(config.node_uuid.is_none());

        env::remove_var(ENV_DOMAIN_ID);
        env::set_var(ENV_ROS_DOMAIN_ID, "77");
        env::set_var(ENV_NODE_UUID, "cafe");
        let config = EnvConfig::from_env();
        assert_eq!(config.domain_id, 77);
        assert_eq!(config.node_uuid.as_deref(), Some("cafe"));

        env::set_var(ENV_DOMAIN_ID, "not-a-number");
        env::remove_var(ENV_ROS_DOMAIN_ID);
        assert_eq!(EnvConfig::from_env().domain_id, 0);

        for (key, value) in saved {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }

    #[test]
    fn test_is_custom() {
        let mut config = EnvConfig::default();
        config.domain_id = 1;
        assert!(config.is_custom());

        config.domain_id = 0;
        config.node_uuid = Some("abc".to_string());
        assert!(config.is_custom());
    }

    #[test]
    fn test_invalid_log_level() {
        let config = EnvConfig {
            log_level: "loud".to_string(),
            ..EnvConfig::default()
        };
        assert!(matches!(config.apply_log_level(), Err(Error::Config(_))));
    }
}
