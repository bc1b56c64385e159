#![allow(dead_code)]

use async_trait::async_trait;
use mf_router::{
    ApplicationDescriptor, Client, ClientTransport, RouterError, TopicMessage,
    TopicSubscriptionRegistry, WindowHandle,
};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

pub(crate) fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub(crate) fn client(id: &str, application: &str) -> Client {
    Client::new(
        id,
        WindowHandle::new(id),
        ApplicationDescriptor::new(application),
    )
}

/// One delivery observed by [`RecordingTransport`].
#[derive(Clone, Debug)]
pub(crate) struct RecordedDelivery {
    pub client_id: String,
    pub message: TopicMessage,
}

/// Transport that records deliveries instead of posting them anywhere.
#[derive(Default)]
pub(crate) struct RecordingTransport {
    deliveries: Mutex<Vec<RecordedDelivery>>,
}

impl RecordingTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn deliveries(&self) -> Vec<RecordedDelivery> {
        self.deliveries
            .lock()
            .expect("recording lock poisoned")
            .clone()
    }

    pub(crate) fn take_deliveries(&self) -> Vec<RecordedDelivery> {
        std::mem::take(&mut *self.deliveries.lock().expect("recording lock poisoned"))
    }
}

#[async_trait]
impl ClientTransport for RecordingTransport {
    async fn deliver(&self, client: &Client, message: TopicMessage) -> Result<(), RouterError> {
        self.deliveries
            .lock()
            .expect("recording lock poisoned")
            .push(RecordedDelivery {
                client_id: client.id.clone(),
                message,
            });
        Ok(())
    }
}

/// Subscribes `client_id` to the six reference topics used by the resolution scenarios.
///
/// Subscriber ids are `<client_id>;sub#1` .. `<client_id>;sub#6`.
pub(crate) fn subscribe_reference_topics(
    registry: &mut TopicSubscriptionRegistry,
    client_id: &str,
) {
    let topics = [
        "myhome/livingroom/temperature",
        "myhome/livingroom/:measurement",
        "myhome/kitchen/:measurement",
        ":building/livingroom/:measurement",
        ":building/:room/:measurement",
        ":building/:room/:measurement/:unit",
    ];

    for (index, topic) in topics.iter().enumerate() {
        registry
            .subscribe(topic, client_id, &format!("{client_id};sub#{}", index + 1))
            .expect("reference subscription should succeed");
    }
}
