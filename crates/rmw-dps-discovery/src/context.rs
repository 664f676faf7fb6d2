// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-node discovery context.
//!
//! Each rmw node owns one context: its identity, the graph guard condition
//! that wakes graph waiters, the discovery store fed by the transport's
//! delivery callback, and the advertisement it publishes about itself. The
//! transport only needs the shared store handle returned by
//! [`NodeContext::discovery`].

use crate::advertisement::NodeAdvertisement;
use crate::condition::{FaultSink, GraphNotifier, GuardCondition};
use crate::env_config::EnvConfig;
use crate::error::{Error, Result};
use crate::graph::DiscoveryStore;
use parking_lot::Mutex;
use std::sync::Arc;

pub struct NodeContext {
    identity: String,
    domain_id: u32,
    graph_guard: Arc<GuardCondition>,
    discovery: Arc<DiscoveryStore>,
    advertisement: Mutex<NodeAdvertisement>,
}

impl NodeContext {
    /// Create a context for node `name` in `namespace`.
    ///
    /// The identity comes from `config.node_uuid` when set, otherwise a fresh
    /// random 128-bit hex token is generated.
    pub fn new(name: &str, namespace: &str, config: &EnvConfig) -> Result<Self> {
        Self::build(name, namespace, config, None)
    }

    /// Same as [`NodeContext::new`] with a custom fault sink for the store.
    pub fn with_fault_sink(
        name: &str,
        namespace: &str,
        config: &EnvConfig,
        faults: Arc<dyn FaultSink>,
    ) -> Result<Self> {
        Self::build(name, namespace, config, Some(faults))
    }

    fn build(
        name: &str,
        namespace: &str,
        config: &EnvConfig,
        faults: Option<Arc<dyn FaultSink>>,
    ) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::InvalidArgument("node name is empty".to_string()));
        }
        let namespace = if namespace.is_empty() { "/" } else { namespace };

        let identity = config.node_uuid.clone().unwrap_or_else(generate_identity);

        let graph_guard = Arc::new(GuardCondition::new());
        let notifier = Arc::clone(&graph_guard) as Arc<dyn GraphNotifier>;
        let discovery = Arc::new(match faults {
            Some(faults) => DiscoveryStore::with_fault_sink(notifier, faults),
            None => DiscoveryStore::new(notifier),
        });

        log::info!(
            "[rmw_dps] node '{}' in '{}' on domain {} announced as {}",
            name,
            namespace,
            config.domain_id,
            identity
        );

        Ok(Self {
            advertisement: Mutex::new(NodeAdvertisement::new(&identity, name, namespace)),
            identity,
            domain_id: config.domain_id,
            graph_guard,
            discovery,
        })
    }

    #[must_use]
    pub fn identity(&self) -> &str {
        &self.identity
    }

    #[must_use]
    pub fn domain_id(&self) -> u32 {
        self.domain_id
    }

    /// Guard condition triggered whenever the discovered graph changes.
    #[must_use]
    pub fn graph_guard(&self) -> Arc<GuardCondition> {
        Arc::clone(&self.graph_guard)
    }

    /// Shared store handle for the transport callback and graph queries.
    #[must_use]
    pub fn discovery(&self) -> Arc<DiscoveryStore> {
        Arc::clone(&self.discovery)
    }

    /// Topic strings the local node currently announces.
    #[must_use]
    pub fn advertisement_topics(&self) -> Vec<String> {
        self.advertisement.lock().topics()
    }

    pub fn advertise_publisher(&self, topic: &str, types: &[&str]) -> bool {
        self.advertisement.lock().add_publisher(topic, types)
    }

    pub fn advertise_subscriber(&self, topic: &str, types: &[&str]) -> bool {
        self.advertisement.lock().add_subscriber(topic, types)
    }

    pub fn withdraw_publisher(&self, topic: &str) -> bool {
        self.advertisement.lock().remove_publisher(topic)
    }

    pub fn withdraw_subscriber(&self, topic: &str) -> bool {
        self.advertisement.lock().remove_subscriber(topic)
    }
}

fn generate_identity() -> String {
    format!("{:032x}", fastrand::u128(..))
}
