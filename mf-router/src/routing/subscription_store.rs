//! Insertion-ordered subscription storage keyed by subscriber id.

use std::collections::{BTreeMap, HashMap};

use crate::client::ClientId;

/// One subscriber's interest in a topic pattern.
///
/// `client_id` refers to a registered client by identifier; the subscription does not own
/// or keep the client alive.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TopicSubscription {
    pub subscriber_id: String,
    pub topic: String,
    pub client_id: ClientId,
}

/// Subscriptions iterate in first-insertion order. Overwriting an existing subscriber id
/// replaces the entry in place; removal does not disturb the order of the remaining entries.
#[derive(Default)]
pub(crate) struct SubscriptionStore {
    entries: BTreeMap<u64, TopicSubscription>,
    positions: HashMap<String, u64>,
    next_position: u64,
}

impl SubscriptionStore {
    /// Inserts or overwrites the entry for `subscription.subscriber_id`, returning the
    /// previous entry if there was one.
    pub(crate) fn upsert(&mut self, subscription: TopicSubscription) -> Option<TopicSubscription> {
        match self.positions.get(&subscription.subscriber_id) {
            Some(position) => self.entries.insert(*position, subscription),
            None => {
                let position = self.next_position;
                self.next_position += 1;
                self.positions
                    .insert(subscription.subscriber_id.clone(), position);
                self.entries.insert(position, subscription)
            }
        }
    }

    pub(crate) fn remove(&mut self, subscriber_id: &str) -> Option<TopicSubscription> {
        let position = self.positions.remove(subscriber_id)?;
        self.entries.remove(&position)
    }

    /// Removes every subscription held by `client_id`, returned in store order.
    pub(crate) fn remove_client(&mut self, client_id: &str) -> Vec<TopicSubscription> {
        let doomed: Vec<u64> = self
            .entries
            .iter()
            .filter(|(_, subscription)| subscription.client_id == client_id)
            .map(|(position, _)| *position)
            .collect();

        let mut removed = Vec::with_capacity(doomed.len());
        for position in doomed {
            if let Some(subscription) = self.entries.remove(&position) {
                self.positions.remove(&subscription.subscriber_id);
                removed.push(subscription);
            }
        }
        removed
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &TopicSubscription> {
        self.entries.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{SubscriptionStore, TopicSubscription};

    fn subscription(subscriber_id: &str, topic: &str, client_id: &str) -> TopicSubscription {
        TopicSubscription {
            subscriber_id: subscriber_id.to_string(),
            topic: topic.to_string(),
            client_id: client_id.to_string(),
        }
    }

    fn subscriber_ids(store: &SubscriptionStore) -> Vec<&str> {
        store
            .iter()
            .map(|subscription| subscription.subscriber_id.as_str())
            .collect()
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut store = SubscriptionStore::default();
        store.upsert(subscription("c", "t", "client#1"));
        store.upsert(subscription("a", "t", "client#1"));
        store.upsert(subscription("b", "t", "client#1"));

        assert_eq!(subscriber_ids(&store), vec!["c", "a", "b"]);
    }

    #[test]
    fn overwrite_keeps_original_position() {
        let mut store = SubscriptionStore::default();
        store.upsert(subscription("a", "t1", "client#1"));
        store.upsert(subscription("b", "t1", "client#1"));

        let previous = store.upsert(subscription("a", "t2", "client#2"));

        assert_eq!(previous.map(|s| s.topic), Some("t1".to_string()));
        assert_eq!(subscriber_ids(&store), vec!["a", "b"]);
        assert_eq!(store.iter().next().unwrap().topic, "t2");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn removed_id_reinserts_at_the_end() {
        let mut store = SubscriptionStore::default();
        store.upsert(subscription("a", "t", "client#1"));
        store.upsert(subscription("b", "t", "client#1"));

        assert!(store.remove("a").is_some());
        assert!(store.remove("a").is_none());
        store.upsert(subscription("a", "t", "client#1"));

        assert_eq!(subscriber_ids(&store), vec!["b", "a"]);
    }

    #[test]
    fn remove_client_only_touches_that_client() {
        let mut store = SubscriptionStore::default();
        store.upsert(subscription("a", "t", "client#1"));
        store.upsert(subscription("b", "t", "client#2"));
        store.upsert(subscription("c", "u", "client#1"));

        let removed = store.remove_client("client#1");

        assert_eq!(
            removed
                .iter()
                .map(|s| s.subscriber_id.as_str())
                .collect::<Vec<_>>(),
            vec!["a", "c"]
        );
        assert_eq!(subscriber_ids(&store), vec!["b"]);
        assert!(store.remove_client("client#1").is_empty());
    }
}
