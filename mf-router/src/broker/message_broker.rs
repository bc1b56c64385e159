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

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::broker::client_transport::ClientTransport;
use crate::broker::retained_messages::RetainedMessages;
use crate::client::{Client, ClientRegistry};
use crate::error::RouterError;
use crate::message::TopicMessage;
use crate::observability::{events, fields};
use crate::routing::subscription_count::SubscriptionCountStream;
use crate::routing::subscription_registry::{ResolvedTopicDestination, TopicSubscriptionRegistry};
use crate::topic::TopicParams;

const COMPONENT: &str = "message_broker";

/// Outcome of one [`MessageBroker::publish`] fan-out.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PublishReport {
    /// Destinations the transport accepted.
    pub delivered: usize,
    /// Destinations the transport rejected.
    pub failed: usize,
    /// Destinations whose client is no longer registered.
    pub skipped: usize,
}

/// Routes topic messages between connected clients.
///
/// The broker owns a [`ClientRegistry`] and a [`TopicSubscriptionRegistry`]. Locks are taken
/// in the order retained messages, subscriptions, clients, and none is held while the
/// transport is awaited.
///
/// `subscribe` and `publish` both resolve under the retained-message lock, so a retained
/// message reaches a concurrently subscribing client exactly once: either through the
/// publish fan-out or through the replay, never both.
pub struct MessageBroker {
    name: String,
    clients: Mutex<ClientRegistry>,
    subscriptions: Mutex<TopicSubscriptionRegistry>,
    retained_messages: Mutex<RetainedMessages>,
    transport: Arc<dyn ClientTransport>,
}

impl MessageBroker {
    pub fn new(name: &str, transport: Arc<dyn ClientTransport>) -> Self {
        info!(
            event = events::BROKER_CREATED,
            component = COMPONENT,
            broker = name,
            "message broker created"
        );

        Self {
            name: name.to_string(),
            clients: Mutex::new(ClientRegistry::new()),
            subscriptions: Mutex::new(TopicSubscriptionRegistry::new()),
            retained_messages: Mutex::new(RetainedMessages::default()),
            transport,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn connect_client(&self, client: Client) {
        let client_id = client.id.clone();
        self.clients.lock().await.register_client(client);

        info!(
            event = events::CLIENT_CONNECTED,
            component = COMPONENT,
            broker = self.name.as_str(),
            client_id = client_id.as_str(),
            "client connected"
        );
    }

    /// Drops every subscription of `client_id`, then unregisters the client.
    pub async fn disconnect_client(&self, client_id: &str) -> Result<(), RouterError> {
        self.subscriptions
            .lock()
            .await
            .unsubscribe_client(client_id)?;

        let mut clients = self.clients.lock().await;
        if let Some(client) = clients.get_by_client_id(client_id) {
            clients.unregister_client(&client);
            info!(
                event = events::CLIENT_DISCONNECTED,
                component = COMPONENT,
                broker = self.name.as_str(),
                client_id,
                "client disconnected"
            );
        }
        Ok(())
    }

    pub async fn client(&self, client_id: &str) -> Option<Arc<Client>> {
        self.clients.lock().await.get_by_client_id(client_id)
    }

    /// Subscribes and replays matching retained messages to the subscribing client.
    pub async fn subscribe(
        &self,
        topic: &str,
        client_id: &str,
        subscriber_id: &str,
    ) -> Result<(), RouterError> {
        let replay = {
            let retained_messages = self.retained_messages.lock().await;
            self.subscriptions
                .lock()
                .await
                .subscribe(topic, client_id, subscriber_id)?;
            retained_messages.matching(topic)
        };

        let Some(client) = self.clients.lock().await.get_by_client_id(client_id) else {
            return Ok(());
        };

        for (message, params) in replay {
            debug!(
                event = events::RETAINED_MESSAGE_REPLAYED,
                component = COMPONENT,
                broker = self.name.as_str(),
                topic = message.topic.as_str(),
                client_id,
                subscriber_id,
                "replaying retained message"
            );
            self.deliver(&client, message.for_destination(params)).await;
        }
        Ok(())
    }

    /// Number of topics currently holding a retained message.
    pub async fn retained_message_count(&self) -> usize {
        self.retained_messages.lock().await.len()
    }

    pub async fn unsubscribe(&self, subscriber_id: &str) -> Result<(), RouterError> {
        self.subscriptions.lock().await.unsubscribe(subscriber_id)
    }

    /// Observes the subscriber count of the exact `topic`.
    pub async fn subscription_count(
        &self,
        topic: &str,
    ) -> Result<SubscriptionCountStream, RouterError> {
        self.subscriptions.lock().await.subscription_count(topic)
    }

    pub async fn resolve_topic_destinations(&self, topic: &str) -> Vec<ResolvedTopicDestination> {
        self.subscriptions
            .lock()
            .await
            .resolve_topic_destinations(topic)
    }

    /// Fans `message` out to every destination resolved for its topic.
    ///
    /// Retained messages are stored before the fan-out; a retained message without body
    /// only deletes the stored one and reaches nobody.
    pub async fn publish(&self, message: TopicMessage) -> Result<PublishReport, RouterError> {
        if message.topic.is_empty() {
            return Err(RouterError::Publish("Missing required topic.".to_string()));
        }

        debug!(
            event = events::PUBLISH_RECEIVED,
            component = COMPONENT,
            broker = self.name.as_str(),
            msg_id = %fields::format_message_id(&message),
            topic = message.topic.as_str(),
            retain = message.retain,
            "publish received"
        );

        let destinations = {
            let mut retained_messages = self.retained_messages.lock().await;
            if message.retain && message.is_retained_delete() {
                let deleted = retained_messages.delete(&message.topic);
                debug!(
                    event = events::RETAINED_MESSAGE_DELETED,
                    component = COMPONENT,
                    broker = self.name.as_str(),
                    topic = message.topic.as_str(),
                    deleted,
                    "retained message deleted"
                );
                return Ok(PublishReport::default());
            }
            if message.retain {
                retained_messages.store(message.clone());
                debug!(
                    event = events::RETAINED_MESSAGE_STORED,
                    component = COMPONENT,
                    broker = self.name.as_str(),
                    topic = message.topic.as_str(),
                    "retained message stored"
                );
            }

            self.subscriptions
                .lock()
                .await
                .resolve_topic_destinations(&message.topic)
        };
        let (deliveries, skipped) = self.bind_clients(destinations).await;

        let mut report = PublishReport {
            skipped,
            ..Default::default()
        };
        for (client, params) in deliveries {
            if self.deliver(&client, message.for_destination(params)).await {
                report.delivered += 1;
            } else {
                report.failed += 1;
            }
        }

        debug!(
            event = events::PUBLISH_COMPLETED,
            component = COMPONENT,
            broker = self.name.as_str(),
            msg_id = %fields::format_message_id(&message),
            topic = message.topic.as_str(),
            delivered = report.delivered,
            failed = report.failed,
            skipped = report.skipped,
            "publish completed"
        );
        Ok(report)
    }

    /// Looks up the client of each destination, keeping destination order.
    async fn bind_clients(
        &self,
        destinations: Vec<ResolvedTopicDestination>,
    ) -> (Vec<(Arc<Client>, TopicParams)>, usize) {
        let clients = self.clients.lock().await;
        let mut deliveries = Vec::with_capacity(destinations.len());
        let mut skipped = 0;

        for destination in destinations {
            let client_id = destination.subscription.client_id.as_str();
            match clients.get_by_client_id(client_id) {
                Some(client) => deliveries.push((client, destination.params)),
                None => {
                    skipped += 1;
                    warn!(
                        event = events::DELIVERY_SKIPPED_UNKNOWN_CLIENT,
                        component = COMPONENT,
                        broker = self.name.as_str(),
                        topic = destination.topic.as_str(),
                        client_id,
                        subscriber_id = destination.subscription.subscriber_id.as_str(),
                        reason = fields::REASON_CLIENT_NOT_REGISTERED,
                        "skipping destination"
                    );
                }
            }
        }
        (deliveries, skipped)
    }

    async fn deliver(&self, client: &Client, message: TopicMessage) -> bool {
        let msg_id = fields::format_message_id(&message);
        let params = fields::format_params(&message.params);
        let topic = message.topic.clone();

        match self.transport.deliver(client, message).await {
            Ok(()) => {
                debug!(
                    event = events::DELIVERY_OK,
                    component = COMPONENT,
                    broker = self.name.as_str(),
                    msg_id = msg_id.as_str(),
                    topic = topic.as_str(),
                    params = params.as_str(),
                    client_id = client.id.as_str(),
                    "delivery succeeded"
                );
                true
            }
            Err(err) => {
                warn!(
                    event = events::DELIVERY_FAILED,
                    component = COMPONENT,
                    broker = self.name.as_str(),
                    msg_id = msg_id.as_str(),
                    topic = topic.as_str(),
                    params = params.as_str(),
                    client_id = client.id.as_str(),
                    err = %err,
                    "delivery failed"
                );
                false
            }
        }
    }
}
