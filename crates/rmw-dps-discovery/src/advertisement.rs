// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Encode side of discovery: what the local node announces about itself.

use crate::graph::{NodeDescription, TopicDescriptor};
use crate::topic_codec;

/// Local node description plus the identity it is announced under.
///
/// Every mutator reports whether the announced topic set changed, so the
/// caller knows when the advertisement has to be republished.
#[derive(Clone, Debug)]
pub struct NodeAdvertisement {
    identity: String,
    node: NodeDescription,
}

impl NodeAdvertisement {
    pub fn new(identity: &str, name: &str, namespace: &str) -> Self {
        Self {
            identity: identity.to_string(),
            node: NodeDescription::new(name, namespace),
        }
    }

    #[must_use]
    pub fn identity(&self) -> &str {
        &self.identity
    }

    #[must_use]
    pub fn description(&self) -> &NodeDescription {
        &self.node
    }

    pub fn add_publisher(&mut self, topic: &str, types: &[&str]) -> bool {
        push_unique(
            &mut self.node.publishers,
            TopicDescriptor::new(topic, types.iter().copied()),
        )
    }

    pub fn add_subscriber(&mut self, topic: &str, types: &[&str]) -> bool {
        push_unique(
            &mut self.node.subscribers,
            TopicDescriptor::new(topic, types.iter().copied()),
        )
    }

    /// Drop the first publisher on `topic`.
    pub fn remove_publisher(&mut self, topic: &str) -> bool {
        remove_first(&mut self.node.publishers, topic)
    }

    /// Drop the first subscriber on `topic`.
    pub fn remove_subscriber(&mut self, topic: &str) -> bool {
        remove_first(&mut self.node.subscribers, topic)
    }

    /// Encoded topic strings to publish the advertisement on.
    #[must_use]
    pub fn topics(&self) -> Vec<String> {
        topic_codec::advertisement_topics(&self.identity, &self.node)
    }
}

fn push_unique(endpoints: &mut Vec<TopicDescriptor>, endpoint: TopicDescriptor) -> bool {
    if endpoints.contains(&endpoint) {
        return false;
    }
    endpoints.push(endpoint);
    true
}

fn remove_first(endpoints: &mut Vec<TopicDescriptor>, topic: &str) -> bool {
    match endpoints.iter().position(|endpoint| endpoint.topic == topic) {
        Some(index) => {
            endpoints.remove(index);
            true
        }
        None => false,
    }
}
