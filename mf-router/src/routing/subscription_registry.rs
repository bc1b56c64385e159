/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Topic subscription registry: publish-time fan-out and live subscriber counts.

use tracing::{debug, trace};

use crate::error::RouterError;
use crate::observability::events;
use crate::routing::subscription_count::{CountObservers, SubscriptionCountStream};
use crate::routing::subscription_store::{SubscriptionStore, TopicSubscription};
use crate::topic::{is_wildcard_topic, match_topic, TopicParams};

const COMPONENT: &str = "subscription_registry";

/// One subscription matched against one concrete publish.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedTopicDestination {
    /// The concrete topic that was published.
    pub topic: String,
    /// Wildcard bindings of the matched pattern; empty for exact subscriptions.
    pub params: TopicParams,
    pub subscription: TopicSubscription,
}

/// Owns the active topic subscriptions.
///
/// Every mutation commits to the store before any subscriber-count observer is notified, so
/// observers only ever see post-mutation counts.
///
/// ```
/// use mf_router::TopicSubscriptionRegistry;
///
/// let mut registry = TopicSubscriptionRegistry::new();
/// let mut counts = registry.subscription_count("myhome/livingroom/temperature").unwrap();
///
/// registry.subscribe("myhome/:room/temperature", "client#1", "sub#1").unwrap();
/// registry.subscribe("myhome/livingroom/temperature", "client#1", "sub#2").unwrap();
///
/// let destinations = registry.resolve_topic_destinations("myhome/livingroom/temperature");
/// assert_eq!(destinations.len(), 2);
/// assert_eq!(destinations[0].params.get("room"), Some("livingroom"));
///
/// registry.unsubscribe_client("client#1").unwrap();
/// assert_eq!(counts.drain_counts(), vec![0, 1, 2, 0]);
/// ```
#[derive(Default)]
pub struct TopicSubscriptionRegistry {
    store: SubscriptionStore,
    count_observers: CountObservers,
}

impl TopicSubscriptionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `client_id` to the topic pattern `topic` under `subscriber_id`.
    ///
    /// An existing subscription with the same `subscriber_id` is overwritten.
    pub fn subscribe(
        &mut self,
        topic: &str,
        client_id: &str,
        subscriber_id: &str,
    ) -> Result<(), RouterError> {
        if subscriber_id.is_empty() {
            return Err(RouterError::subscribe("Missing required subscriber id."));
        }
        if topic.is_empty() {
            return Err(RouterError::subscribe("Missing required topic."));
        }
        if client_id.is_empty() {
            return Err(RouterError::subscribe("Missing required client."));
        }

        let replaced = self.store.upsert(TopicSubscription {
            subscriber_id: subscriber_id.to_string(),
            topic: topic.to_string(),
            client_id: client_id.to_string(),
        });

        debug!(
            event = events::TOPIC_SUBSCRIBED,
            component = COMPONENT,
            subscriber_id,
            topic,
            client_id,
            replaced = replaced.is_some(),
            "topic subscription added"
        );

        // An overwrite may have moved the subscriber off another pattern.
        if let Some(previous) = replaced.filter(|previous| previous.topic != topic) {
            self.notify_subscription_change(&previous.topic);
        }
        self.notify_subscription_change(topic);
        Ok(())
    }

    /// Removes the subscription registered under `subscriber_id`, if any.
    pub fn unsubscribe(&mut self, subscriber_id: &str) -> Result<(), RouterError> {
        if subscriber_id.is_empty() {
            return Err(RouterError::unsubscribe("Missing required subscriber id."));
        }

        let Some(removed) = self.store.remove(subscriber_id) else {
            return Ok(());
        };

        debug!(
            event = events::TOPIC_UNSUBSCRIBED,
            component = COMPONENT,
            subscriber_id,
            topic = removed.topic.as_str(),
            client_id = removed.client_id.as_str(),
            "topic subscription removed"
        );
        self.notify_subscription_change(&removed.topic);
        Ok(())
    }

    /// Removes every subscription held by `client_id`.
    ///
    /// All removals commit before the first notification goes out, so a client holding
    /// several subscriptions on one topic yields a single count transition to observers.
    pub fn unsubscribe_client(&mut self, client_id: &str) -> Result<(), RouterError> {
        if client_id.is_empty() {
            return Err(RouterError::unsubscribe("Missing required client id."));
        }

        let removed = self.store.remove_client(client_id);
        if removed.is_empty() {
            return Ok(());
        }

        debug!(
            event = events::CLIENT_SUBSCRIPTIONS_REMOVED,
            component = COMPONENT,
            client_id,
            removed = removed.len(),
            "client subscriptions removed"
        );
        for subscription in &removed {
            self.notify_subscription_change(&subscription.topic);
        }
        Ok(())
    }

    /// Observes the number of destinations a publish to the exact `topic` would reach.
    ///
    /// Fails with [`RouterError::TopicObserve`] for wildcard or empty topics.
    pub fn subscription_count(
        &mut self,
        topic: &str,
    ) -> Result<SubscriptionCountStream, RouterError> {
        if topic.is_empty() {
            return Err(RouterError::observe("Missing required topic."));
        }
        if is_wildcard_topic(topic) {
            return Err(RouterError::observe(format!(
                "Observing the subscriber count of a wildcard topic is not supported. [topic={topic}]"
            )));
        }

        let current_count = Self::count_destinations(&self.store, topic);
        Ok(self.count_observers.observe(topic, current_count))
    }

    /// Resolves the subscriptions matching the concrete `publish_topic`, in subscription
    /// order.
    ///
    /// A client holding several matching subscriptions gets one destination per
    /// subscription.
    pub fn resolve_topic_destinations(&self, publish_topic: &str) -> Vec<ResolvedTopicDestination> {
        let destinations: Vec<ResolvedTopicDestination> = self
            .store
            .iter()
            .filter_map(|subscription| {
                let matched = match_topic(&subscription.topic, publish_topic);
                matched.matches.then(|| ResolvedTopicDestination {
                    topic: publish_topic.to_string(),
                    params: matched.params,
                    subscription: subscription.clone(),
                })
            })
            .collect();

        trace!(
            event = events::TOPIC_DESTINATIONS_RESOLVED,
            component = COMPONENT,
            topic = publish_topic,
            destinations = destinations.len(),
            "topic destinations resolved"
        );
        destinations
    }

    /// Active subscriptions in store order.
    pub fn subscriptions(&self) -> impl Iterator<Item = &TopicSubscription> {
        self.store.iter()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.len() == 0
    }

    /// Number of subscriber-count streams still attached.
    pub fn observer_count(&self) -> usize {
        self.count_observers.live_len()
    }

    fn count_destinations(store: &SubscriptionStore, topic: &str) -> usize {
        store
            .iter()
            .filter(|subscription| match_topic(&subscription.topic, topic).matches)
            .count()
    }

    fn notify_subscription_change(&mut self, pattern: &str) {
        let store = &self.store;
        self.count_observers
            .on_subscription_change(pattern, |topic| Self::count_destinations(store, topic));
    }
}

#[cfg(test)]
mod tests {
    use super::TopicSubscriptionRegistry;
    use crate::error::RouterError;

    #[test]
    fn subscribe_reports_each_missing_argument() {
        let mut registry = TopicSubscriptionRegistry::new();

        assert_eq!(
            registry.subscribe("a/b", "client#1", ""),
            Err(RouterError::TopicSubscribe(
                "Missing required subscriber id.".to_string()
            ))
        );
        assert_eq!(
            registry.subscribe("", "client#1", "sub#1"),
            Err(RouterError::TopicSubscribe("Missing required topic.".to_string()))
        );
        assert_eq!(
            registry.subscribe("a/b", "", "sub#1"),
            Err(RouterError::TopicSubscribe("Missing required client.".to_string()))
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn unsubscribe_requires_ids() {
        let mut registry = TopicSubscriptionRegistry::new();

        assert!(matches!(
            registry.unsubscribe(""),
            Err(RouterError::TopicUnsubscribe(_))
        ));
        assert!(matches!(
            registry.unsubscribe_client(""),
            Err(RouterError::TopicUnsubscribe(_))
        ));
    }

    #[test]
    fn unsubscribe_unknown_subscriber_is_silent() {
        let mut registry = TopicSubscriptionRegistry::new();
        registry.subscribe("a/b", "client#1", "sub#1").unwrap();
        let mut counts = registry.subscription_count("a/b").unwrap();

        assert!(registry.unsubscribe("sub#2").is_ok());
        assert!(registry.unsubscribe_client("client#2").is_ok());

        assert_eq!(counts.drain_counts(), vec![1]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn subscription_count_rejects_wildcard_and_empty_topics() {
        let mut registry = TopicSubscriptionRegistry::new();

        assert!(matches!(
            registry.subscription_count("myhome/livingroom/:measurement"),
            Err(RouterError::TopicObserve(_))
        ));
        assert!(matches!(
            registry.subscription_count(""),
            Err(RouterError::TopicObserve(_))
        ));
        assert_eq!(registry.observer_count(), 0);
    }

    #[test]
    fn overwrite_moving_topic_updates_both_counts() {
        let mut registry = TopicSubscriptionRegistry::new();
        registry.subscribe("a/b", "client#1", "sub#1").unwrap();
        let mut old_topic = registry.subscription_count("a/b").unwrap();
        let mut new_topic = registry.subscription_count("a/c").unwrap();

        registry.subscribe("a/c", "client#1", "sub#1").unwrap();

        assert_eq!(old_topic.drain_counts(), vec![1, 0]);
        assert_eq!(new_topic.drain_counts(), vec![0, 1]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_subscriptions_resolve_independently() {
        let mut registry = TopicSubscriptionRegistry::new();
        registry.subscribe("a/b", "client#1", "sub#1").unwrap();
        registry.subscribe("a/b", "client#1", "sub#2").unwrap();
        registry.subscribe("a/:x", "client#1", "sub#3").unwrap();

        let destinations = registry.resolve_topic_destinations("a/b");

        assert_eq!(
            destinations
                .iter()
                .map(|destination| destination.subscription.subscriber_id.as_str())
                .collect::<Vec<_>>(),
            vec!["sub#1", "sub#2", "sub#3"]
        );
        assert!(destinations[0].params.is_empty());
        assert_eq!(destinations[2].params.get("x"), Some("b"));
        assert!(destinations.iter().all(|destination| destination.topic == "a/b"));
    }

    #[test]
    fn resolve_without_subscribers_is_empty() {
        let registry = TopicSubscriptionRegistry::new();
        assert!(registry.resolve_topic_destinations("a/b").is_empty());
    }

    #[test]
    fn dropping_count_stream_detaches_observer() {
        let mut registry = TopicSubscriptionRegistry::new();
        let counts = registry.subscription_count("a/b").unwrap();
        assert_eq!(registry.observer_count(), 1);

        drop(counts);
        registry.subscribe("a/b", "client#1", "sub#1").unwrap();

        assert_eq!(registry.observer_count(), 0);
        assert_eq!(registry.len(), 1);
    }
}
