// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Node announcements encoded as bus topic strings.
//!
//! A node advertises itself by publishing on a set of topic strings, each
//! carrying one fragment of its description behind a reserved prefix:
//!
//! ```text
//! uuid=<identity>
//! ns=<namespace>
//! name=<name>
//! pub=<topic>[&types=<t1>,<t2>,...]
//! sub=<topic>[&types=<t1>,<t2>,...]
//! ```
//!
//! Decoding is best-effort. Unknown fragments are ignored and malformed ones
//! degrade to partial fields, so newer peers can add fragments without
//! breaking older listeners.

use crate::graph::{NodeDescription, TopicDescriptor};

pub const UUID_PREFIX: &str = "uuid=";
pub const NAMESPACE_PREFIX: &str = "ns=";
pub const NAME_PREFIX: &str = "name=";
pub const PUBLISHER_PREFIX: &str = "pub=";
pub const SUBSCRIBER_PREFIX: &str = "sub=";
pub const TYPES_MARKER: &str = "&types=";
pub const TYPE_SEPARATOR: char = ',';

/// Category of a single announcement fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment<'a> {
    Identity(&'a str),
    Namespace(&'a str),
    Name(&'a str),
    Publisher(TopicDescriptor),
    Subscriber(TopicDescriptor),
}

/// Classify one topic string.
///
/// Prefixes are tried in a fixed order (uuid, ns, name, pub, sub) and may
/// occur anywhere in the string; the first one found decides the category.
/// Returns `None` for strings carrying none of the reserved prefixes.
#[must_use]
pub fn classify(topic: &str) -> Option<Fragment<'_>> {
    if let Some(value) = value_after(topic, UUID_PREFIX) {
        return Some(Fragment::Identity(value));
    }
    if let Some(value) = value_after(topic, NAMESPACE_PREFIX) {
        return Some(Fragment::Namespace(value));
    }
    if let Some(value) = value_after(topic, NAME_PREFIX) {
        return Some(Fragment::Name(value));
    }
    if let Some(value) = value_after(topic, PUBLISHER_PREFIX) {
        return Some(Fragment::Publisher(parse_endpoint(value)));
    }
    if let Some(value) = value_after(topic, SUBSCRIBER_PREFIX) {
        return Some(Fragment::Subscriber(parse_endpoint(value)));
    }
    None
}

/// Decode the full topic set of one announcement.
///
/// The identity is `None` when no `uuid=` fragment was present or when the
/// last one carried an empty value. Repeated `uuid=` fragments are resolved
/// last-write-wins.
pub fn decode<I, S>(topics: I) -> (Option<String>, NodeDescription)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut identity: Option<String> = None;
    let mut node = NodeDescription::default();

    for topic in topics {
        match classify(topic.as_ref()) {
            Some(Fragment::Identity(value)) => identity = Some(value.to_string()),
            Some(Fragment::Namespace(value)) => node.namespace = value.to_string(),
            Some(Fragment::Name(value)) => node.name = value.to_string(),
            Some(Fragment::Publisher(endpoint)) => node.publishers.push(endpoint),
            Some(Fragment::Subscriber(endpoint)) => node.subscribers.push(endpoint),
            None => {}
        }
    }

    (identity.filter(|id| !id.is_empty()), node)
}

fn value_after<'a>(topic: &'a str, prefix: &str) -> Option<&'a str> {
    topic.find(prefix).map(|pos| &topic[pos + prefix.len()..])
}

/// Split `<topic>[&types=<t1>,<t2>,...]`.
///
/// Without the marker the types list is empty. With it, the list is split on
/// `,` verbatim: no trimming, and a trailing separator yields an empty type.
fn parse_endpoint(value: &str) -> TopicDescriptor {
    match value.find(TYPES_MARKER) {
        Some(pos) => TopicDescriptor {
            topic: value[..pos].to_string(),
            types: value[pos + TYPES_MARKER.len()..]
                .split(TYPE_SEPARATOR)
                .map(str::to_string)
                .collect(),
        },
        None => TopicDescriptor {
            topic: value.to_string(),
            types: Vec::new(),
        },
    }
}

#[must_use]
pub fn encode_identity(identity: &str) -> String {
    format!("{}{}", UUID_PREFIX, identity)
}

#[must_use]
pub fn encode_namespace(namespace: &str) -> String {
    format!("{}{}", NAMESPACE_PREFIX, namespace)
}

#[must_use]
pub fn encode_name(name: &str) -> String {
    format!("{}{}", NAME_PREFIX, name)
}

#[must_use]
pub fn encode_publisher(endpoint: &TopicDescriptor) -> String {
    encode_endpoint(PUBLISHER_PREFIX, endpoint)
}

#[must_use]
pub fn encode_subscriber(endpoint: &TopicDescriptor) -> String {
    encode_endpoint(SUBSCRIBER_PREFIX, endpoint)
}

fn encode_endpoint(prefix: &str, endpoint: &TopicDescriptor) -> String {
    if endpoint.types.is_empty() {
        format!("{}{}", prefix, endpoint.topic)
    } else {
        let joined = endpoint.types.join(TYPE_SEPARATOR.encode_utf8(&mut [0; 4]));
        format!("{}{}{}{}", prefix, endpoint.topic, TYPES_MARKER, joined)
    }
}

/// Full topic set advertising `node` under `identity`.
///
/// Round-trips through [`decode`] as long as no field value itself contains
/// a reserved prefix (and no type contains `,`).
#[must_use]
pub fn advertisement_topics(identity: &str, node: &NodeDescription) -> Vec<String> {
    let mut topics = Vec::with_capacity(3 + node.publishers.len() + node.subscribers.len());
    topics.push(encode_identity(identity));
    topics.push(encode_namespace(&node.namespace));
    topics.push(encode_name(&node.name));
    topics.extend(node.publishers.iter().map(encode_publisher));
    topics.extend(node.subscribers.iter().map(encode_subscriber));
    topics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(topic: &str, types: &[&str]) -> TopicDescriptor {
        TopicDescriptor::new(topic, types.iter().copied())
    }

    #[test]
    fn publisher_without_types_marker_has_no_types() {
        let (_, node) = decode(["uuid=a", "pub=/foo"]);
        assert_eq!(node.publishers, vec![endpoint("/foo", &[])]);
    }

    #[test]
    fn trailing_separator_keeps_empty_type() {
        let (_, node) = decode(["uuid=a", "pub=/foo&types=A,B,"]);
        assert_eq!(node.publishers, vec![endpoint("/foo", &["A", "B", ""])]);
    }

    #[test]
    fn single_type_without_separator() {
        let (_, node) = decode(["sub=/scan&types=sensor_msgs::msg::dds_::LaserScan_"]);
        assert_eq!(
            node.subscribers,
            vec![endpoint("/scan", &["sensor_msgs::msg::dds_::LaserScan_"])]
        );
    }

    #[test]
    fn empty_types_value_yields_one_empty_type() {
        let (_, node) = decode(["pub=/foo&types="]);
        assert_eq!(node.publishers, vec![endpoint("/foo", &[""])]);
    }

    #[test]
    fn last_identity_wins() {
        let (identity, _) = decode(["uuid=first", "name=talker", "uuid=second"]);
        assert_eq!(identity.as_deref(), Some("second"));
    }

    #[test]
    fn trailing_empty_identity_clears_earlier_one() {
        let (identity, _) = decode(["uuid=first", "uuid="]);
        assert_eq!(identity, None);
    }

    #[test]
    fn missing_identity_still_decodes_description() {
        let (identity, node) = decode(["name=talker", "ns=/demo"]);
        assert_eq!(identity, None);
        assert_eq!(node.name, "talker");
        assert_eq!(node.namespace, "/demo");
    }

    #[test]
    fn namespace_defaults_to_root() {
        let (_, node) = decode(["uuid=a", "name=talker"]);
        assert_eq!(node.namespace, "/");
    }

    #[test]
    fn prefix_matches_anywhere_in_string() {
        let (identity, node) = decode(["domain/0/uuid=abc", "x/name=listener"]);
        assert_eq!(identity.as_deref(), Some("abc"));
        assert_eq!(node.name, "listener");
    }

    #[test]
    fn earlier_category_wins_over_later_prefix() {
        // "name=" is tested before "pub=", regardless of position.
        assert_eq!(classify("pub=/x/name=y"), Some(Fragment::Name("y")));
        assert_eq!(classify("pub=/a&types=uuid=z"), Some(Fragment::Identity("z")));
    }

    #[test]
    fn unknown_fragments_are_ignored() {
        assert_eq!(classify("/rt/chatter"), None);
        let (identity, node) = decode(["qos=reliable", "uuid=n1", "hello"]);
        assert_eq!(identity.as_deref(), Some("n1"));
        assert_eq!(node, NodeDescription::default());
    }

    #[test]
    fn endpoint_order_is_preserved() {
        let (_, node) = decode([
            "pub=/b&types=B",
            "sub=/z",
            "pub=/a&types=A",
            "sub=/y&types=Y1,Y2",
        ]);
        assert_eq!(
            node.publishers,
            vec![endpoint("/b", &["B"]), endpoint("/a", &["A"])]
        );
        assert_eq!(
            node.subscribers,
            vec![endpoint("/z", &[]), endpoint("/y", &["Y1", "Y2"])]
        );
    }

    #[test]
    fn encode_endpoint_omits_marker_without_types() {
        assert_eq!(encode_publisher(&endpoint("/foo", &[])), "pub=/foo");
        assert_eq!(
            encode_subscriber(&endpoint("/foo", &["A", "B"])),
            "sub=/foo&types=A,B"
        );
        assert_eq!(encode_publisher(&endpoint("/foo", &["A"])), "pub=/foo&types=A");
        assert_eq!(
            encode_publisher(&endpoint("/foo", &["A", ""])),
            "pub=/foo&types=A,"
        );
    }

    #[test]
    fn advertisement_round_trips() {
        let node = NodeDescription {
            name: "talker".to_string(),
            namespace: "/demo".to_string(),
            publishers: vec![
                endpoint("/chatter", &["std_msgs::msg::dds_::String_"]),
                endpoint("/rosout", &["A", "B", ""]),
            ],
            subscribers: vec![endpoint("/parameter_events", &[])],
        };

        let topics = advertisement_topics("0123abcd", &node);
        assert_eq!(topics[0], "uuid=0123abcd");

        let (identity, decoded) = decode(&topics);
        assert_eq!(identity.as_deref(), Some("0123abcd"));
        assert_eq!(decoded, node);
    }
}
