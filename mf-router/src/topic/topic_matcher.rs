//! Pairs a topic pattern against a concrete topic and captures wildcard bindings.

use serde::{Deserialize, Serialize};

/// Separator between topic segments.
pub const TOPIC_SEPARATOR: char = '/';
/// Prefix marking a named wildcard segment, e.g. `:room`.
pub const WILDCARD_MARKER: char = ':';

/// Wildcard bindings captured by a match, in pattern segment order.
///
/// A pattern naming the same wildcard twice keeps the position of the first occurrence and
/// the value of the last one.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TopicParams(Vec<(String, String)>);

impl TopicParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for TopicParams {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut params = TopicParams::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

/// Outcome of [`match_topic`]. `params` is empty whenever `matches` is `false`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TopicMatch {
    pub matches: bool,
    pub params: TopicParams,
}

impl TopicMatch {
    fn no_match() -> Self {
        Self::default()
    }
}

/// Returns the wildcard name when `segment` is of the form `:<name>`, where the name is
/// non-empty and carries no further colon.
fn wildcard_name(segment: &str) -> Option<&str> {
    segment
        .strip_prefix(WILDCARD_MARKER)
        .filter(|name| !name.is_empty() && !name.contains(WILDCARD_MARKER))
}

pub fn is_wildcard_segment(segment: &str) -> bool {
    wildcard_name(segment).is_some()
}

/// Returns `true` if any segment of `topic` is a wildcard segment.
pub fn is_wildcard_topic(topic: &str) -> bool {
    topic.split(TOPIC_SEPARATOR).any(is_wildcard_segment)
}

/// Matches `pattern` against the concrete `topic`.
///
/// Both must have the same number of segments. Literal segments compare byte-for-byte; a
/// wildcard segment matches exactly one non-empty concrete segment and binds it by name.
pub fn match_topic(pattern: &str, topic: &str) -> TopicMatch {
    let mut pattern_segments = pattern.split(TOPIC_SEPARATOR);
    let mut topic_segments = topic.split(TOPIC_SEPARATOR);
    let mut params = TopicParams::new();

    loop {
        match (pattern_segments.next(), topic_segments.next()) {
            (None, None) => {
                return TopicMatch {
                    matches: true,
                    params,
                }
            }
            (Some(pattern_segment), Some(topic_segment)) => {
                match wildcard_name(pattern_segment) {
                    Some(_) if topic_segment.is_empty() => return TopicMatch::no_match(),
                    Some(name) => params.insert(name, topic_segment),
                    None if pattern_segment != topic_segment => return TopicMatch::no_match(),
                    None => {}
                }
            }
            _ => return TopicMatch::no_match(),
        }
    }
}
