// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use crate::condition::{Fault, FaultSink, GraphNotifier, LogFaultSink};
use crate::topic_codec;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// One publisher or subscriber endpoint as announced on the bus.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TopicDescriptor {
    pub topic: String,
    pub types: Vec<String>,
}

impl TopicDescriptor {
    pub fn new<I, S>(topic: &str, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            topic: topic.to_string(),
            types: types.into_iter().map(Into::into).collect(),
        }
    }
}

/// Last announced state of one node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeDescription {
    pub name: String,
    pub namespace: String,
    pub publishers: Vec<TopicDescriptor>,
    pub subscribers: Vec<TopicDescriptor>,
}

impl NodeDescription {
    pub fn new(name: &str, namespace: &str) -> Self {
        Self {
            name: name.to_string(),
            namespace: namespace.to_string(),
            ..Self::default()
        }
    }
}

impl Default for NodeDescription {
    fn default() -> Self {
        Self {
            name: String::new(),
            namespace: "/".to_string(),
            publishers: Vec::new(),
            subscribers: Vec::new(),
        }
    }
}

/// Source of announcement topic strings (one received publication).
pub trait Publication {
    fn topics(&self) -> Vec<&str>;
}

impl Publication for [String] {
    fn topics(&self) -> Vec<&str> {
        self.iter().map(String::as_str).collect()
    }
}

impl Publication for Vec<String> {
    fn topics(&self) -> Vec<&str> {
        self.as_slice().topics()
    }
}

/// What a single [`DiscoveryStore::ingest`] call did to the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IngestOutcome {
    /// No identity in the announcement; table untouched.
    Skipped,
    /// Entry rewritten with an identical description; no notification.
    Unchanged,
    /// Entry created or modified; the notifier was triggered.
    Changed,
}

#[derive(Default)]
struct DiscoveryState {
    version: u64,
    nodes: HashMap<String, NodeDescription>,
}

/// Discovered nodes keyed by identity.
///
/// `ingest` replaces the entry for an identity under the write lock and
/// triggers the notifier (after releasing it) when the stored description
/// changed. Queries run under the read lock and never see a partial entry.
/// Entries are never removed.
pub struct DiscoveryStore {
    state: RwLock<DiscoveryState>,
    notifier: Arc<dyn GraphNotifier>,
    faults: Arc<dyn FaultSink>,
}

impl DiscoveryStore {
    pub fn new(notifier: Arc<dyn GraphNotifier>) -> Self {
        Self::with_fault_sink(notifier, Arc::new(LogFaultSink))
    }

    pub fn with_fault_sink(notifier: Arc<dyn GraphNotifier>, faults: Arc<dyn FaultSink>) -> Self {
        Self {
            state: RwLock::new(DiscoveryState::default()),
            notifier,
            faults,
        }
    }

    /// Apply one announcement.
    pub fn ingest<I, S>(&self, topics: I) -> IngestOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let topics: Vec<S> = topics.into_iter().collect();
        let (identity, node) = topic_codec::decode(&topics);
        let Some(identity) = identity else {
            log::debug!(
                "[rmw_dps] announcement without identity ignored ({} topics)",
                topics.len()
            );
            return IngestOutcome::Skipped;
        };
        log::debug!(
            "[rmw_dps] announcement from {} ({} topics)",
            identity,
            topics.len()
        );

        let changed = {
            let mut guard = self.state.write();
            // A previously unseen identity is always a change, even when it
            // decodes to the default description.
            let changed = match guard.nodes.get(&identity) {
                Some(old) => *old != node,
                None => true,
            };
            guard.nodes.insert(identity.clone(), node);
            if changed {
                guard.version += 1;
            }
            changed
        };

        if !changed {
            return IngestOutcome::Unchanged;
        }

        log::debug!("[rmw_dps] graph changed for node {}", identity);
        if let Err(err) = self.notifier.trigger() {
            self.faults.report(Fault::NotificationFailed {
                reason: err.to_string(),
            });
        }
        IngestOutcome::Changed
    }

    /// Transport-facing adapter for [`DiscoveryStore::ingest`].
    pub fn on_publication<P: Publication + ?Sized>(&self, publication: &P) -> IngestOutcome {
        self.ingest(publication.topics())
    }

    /// Copy of every discovered node, in unspecified order.
    pub fn snapshot(&self) -> Vec<NodeDescription> {
        self.state.read().nodes.values().cloned().collect()
    }

    /// Description last announced under `identity`.
    pub fn node(&self, identity: &str) -> Option<NodeDescription> {
        self.state.read().nodes.get(identity).cloned()
    }

    pub fn count_publishers(&self, topic_name: &str) -> usize {
        let guard = self.state.read();
        guard
            .nodes
            .values()
            .map(|node| count_matching(&node.publishers, topic_name))
            .sum()
    }

    pub fn count_subscribers(&self, topic_name: &str) -> usize {
        let guard = self.state.read();
        guard
            .nodes
            .values()
            .map(|node| count_matching(&node.subscribers, topic_name))
            .sum()
    }

    /// `(name, namespace)` of every discovered node, sorted.
    pub fn node_names(&self) -> Vec<(String, String)> {
        let guard = self.state.read();
        let mut names: Vec<_> = guard
            .nodes
            .values()
            .map(|node| (node.name.clone(), node.namespace.clone()))
            .collect();
        names.sort();
        names
    }

    /// Every topic carried by any endpoint, with its types de-duplicated in
    /// first-seen order per node (nodes themselves are visited in no
    /// particular order).
    pub fn topic_names_and_types(&self) -> BTreeMap<String, Vec<String>> {
        let guard = self.state.read();
        let mut topics: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for node in guard.nodes.values() {
            for endpoint in node.publishers.iter().chain(node.subscribers.iter()) {
                let types = topics.entry(endpoint.topic.clone()).or_default();
                for ty in &endpoint.types {
                    if !types.contains(ty) {
                        types.push(ty.clone());
                    }
                }
            }
        }

        topics
    }

    /// Number of changed ingests so far.
    pub fn version(&self) -> u64 {
        self.state.read().version
    }

    pub fn len(&self) -> usize {
        self.state.read().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().nodes.is_empty()
    }
}

fn count_matching(endpoints: &[TopicDescriptor], topic_name: &str) -> usize {
    endpoints
        .iter()
        .filter(|endpoint| endpoint.topic == topic_name)
        .count()
}
