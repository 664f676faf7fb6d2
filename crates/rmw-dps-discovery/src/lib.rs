// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # rmw-dps-discovery
//!
//! Graph discovery for the ROS 2 middleware bridge over a DPS publish/subscribe
//! bus. Nodes announce themselves by publishing on topic strings that encode
//! their identity and endpoints; this crate decodes those announcements and
//! keeps a live, thread-safe view of the discovered graph.
//!
//! ```text
//! transport delivery thread          graph queries (any thread)
//!            |                                 |
//!            v                                 v
//!   DiscoveryStore::ingest  --(write)-->  RwLock<table>  <--(read)--  snapshot / count_*
//!            |
//!            +-- changed? --> GraphNotifier::trigger  (GuardCondition)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use rmw_dps_discovery::{EnvConfig, NodeContext};
//!
//! let config = EnvConfig::default();
//! let local = NodeContext::new("listener", "/", &config)?;
//! let peer = NodeContext::new("talker", "/", &config)?;
//! peer.advertise_publisher("/chatter", &["std_msgs::msg::dds_::String_"]);
//!
//! // Called by the transport for every received announcement.
//! local.discovery().ingest(peer.advertisement_topics());
//!
//! assert!(local.graph_guard().take_trigger());
//! assert_eq!(local.discovery().count_publishers("/chatter"), 1);
//! # Ok::<(), rmw_dps_discovery::Error>(())
//! ```

pub mod advertisement;
pub mod condition;
pub mod context;
pub mod env_config;
pub mod error;
pub mod graph;
pub mod logging;
pub mod topic_codec;

pub use advertisement::NodeAdvertisement;
pub use condition::{Fault, FaultSink, GraphNotifier, GuardCondition, LogFaultSink};
pub use context::NodeContext;
pub use env_config::EnvConfig;
pub use error::{Error, Result};
pub use graph::{DiscoveryStore, IngestOutcome, NodeDescription, Publication, TopicDescriptor};
pub use logging::{set_log_severity, LogSeverity};
