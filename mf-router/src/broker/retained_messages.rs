//! Last retained message per concrete topic.

use std::collections::BTreeMap;

use crate::message::TopicMessage;
use crate::topic::{match_topic, TopicParams};

#[derive(Default)]
pub(crate) struct RetainedMessages {
    by_topic: BTreeMap<String, TopicMessage>,
}

impl RetainedMessages {
    /// Keeps `message` as the retained message of its topic, replacing any previous one.
    pub(crate) fn store(&mut self, message: TopicMessage) {
        self.by_topic.insert(message.topic.clone(), message);
    }

    pub(crate) fn delete(&mut self, topic: &str) -> bool {
        self.by_topic.remove(topic).is_some()
    }

    /// Retained messages whose topic matches the subscription `pattern`, with the bindings
    /// of each match.
    pub(crate) fn matching(&self, pattern: &str) -> Vec<(TopicMessage, TopicParams)> {
        self.by_topic
            .values()
            .filter_map(|message| {
                let matched = match_topic(pattern, &message.topic);
                matched
                    .matches
                    .then(|| (message.clone(), matched.params))
            })
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_topic.len()
    }
}
