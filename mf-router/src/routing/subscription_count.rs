//! Live subscriber-count streams for exact topics.

use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::trace;

use crate::observability::events;
use crate::topic::match_topic;

const COMPONENT: &str = "subscription_count";

/// Stream of subscriber counts for one exact topic.
///
/// The count current at observation time is available immediately; afterwards only value
/// transitions are delivered. The stream never ends while its registry is alive. Dropping
/// it detaches the observer.
#[derive(Debug)]
pub struct SubscriptionCountStream {
    topic: String,
    receiver: UnboundedReceiver<usize>,
}

impl SubscriptionCountStream {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Returns the next queued count without waiting.
    pub fn try_next_count(&mut self) -> Option<usize> {
        self.receiver.try_recv().ok()
    }

    /// Drains every queued count without waiting.
    pub fn drain_counts(&mut self) -> Vec<usize> {
        std::iter::from_fn(|| self.try_next_count()).collect()
    }
}

impl Stream for SubscriptionCountStream {
    type Item = usize;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().receiver.poll_recv(cx)
    }
}

struct CountObserver {
    topic: String,
    last_count: usize,
    sender: UnboundedSender<usize>,
}

/// Observers attached to a subscription registry.
#[derive(Default)]
pub(crate) struct CountObservers {
    observers: Vec<CountObserver>,
}

impl CountObservers {
    /// Attaches an observer for `topic` and queues `current_count` as its first value.
    pub(crate) fn observe(&mut self, topic: &str, current_count: usize) -> SubscriptionCountStream {
        self.prune_closed();

        let (sender, receiver) = unbounded_channel();
        // The receiver is alive here, so the first send cannot fail.
        let _ = sender.send(current_count);
        self.observers.push(CountObserver {
            topic: topic.to_string(),
            last_count: current_count,
            sender,
        });

        SubscriptionCountStream {
            topic: topic.to_string(),
            receiver,
        }
    }

    /// Re-counts every observer whose topic matches the changed subscription `pattern`.
    ///
    /// Must be called after the store mutation committed. `count_for` resolves the full
    /// destination count of an exact topic against the current store.
    pub(crate) fn on_subscription_change<F>(&mut self, pattern: &str, count_for: F)
    where
        F: Fn(&str) -> usize,
    {
        self.prune_closed();

        for observer in self
            .observers
            .iter_mut()
            .filter(|observer| match_topic(pattern, &observer.topic).matches)
        {
            let count = count_for(&observer.topic);
            if count == observer.last_count {
                continue;
            }

            trace!(
                event = events::SUBSCRIPTION_COUNT_CHANGED,
                component = COMPONENT,
                topic = observer.topic.as_str(),
                pattern,
                previous = observer.last_count,
                count,
                "subscriber count changed"
            );
            observer.last_count = count;
            let _ = observer.sender.send(count);
        }
    }

    fn prune_closed(&mut self) {
        self.observers.retain(|observer| !observer.sender.is_closed());
    }

    /// Number of observers whose stream has not been dropped.
    pub(crate) fn live_len(&self) -> usize {
        self.observers
            .iter()
            .filter(|observer| !observer.sender.is_closed())
            .count()
    }
}
