/********************************************************************************
 * Copyright (c) 2025 Contributors to the Eclipse Foundation
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

use mf_router::{ClientRegistry, TopicParams, TopicSubscriptionRegistry};
use serde::Serialize;
use std::fmt;

#[derive(Serialize, Debug, Clone)]
pub struct TopicReport {
    pub(crate) topic: String,
    /// `None` for empty topics and topics containing wildcard segments.
    pub(crate) subscriber_count: Option<usize>,
    pub(crate) destinations: Vec<DestinationReport>,
}

#[derive(Serialize, Debug, Clone)]
pub struct DestinationReport {
    pub(crate) subscriber_id: String,
    pub(crate) subscription_topic: String,
    pub(crate) client_id: String,
    pub(crate) application: Option<String>,
    pub(crate) params: TopicParams,
}

impl TopicReport {
    pub(crate) fn inspect(
        topic: &str,
        clients: &ClientRegistry,
        subscriptions: &mut TopicSubscriptionRegistry,
    ) -> Self {
        let subscriber_count = subscriptions
            .subscription_count(topic)
            .ok()
            .and_then(|mut counts| counts.try_next_count());

        let destinations = subscriptions
            .resolve_topic_destinations(topic)
            .into_iter()
            .map(|destination| DestinationReport {
                application: clients
                    .get_by_client_id(&destination.subscription.client_id)
                    .map(|client| client.application.symbolic_name.clone()),
                subscriber_id: destination.subscription.subscriber_id,
                subscription_topic: destination.subscription.topic,
                client_id: destination.subscription.client_id,
                params: destination.params,
            })
            .collect();

        Self {
            topic: topic.to_string(),
            subscriber_count,
            destinations,
        }
    }
}

impl fmt::Display for TopicReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.subscriber_count {
            Some(count) => writeln!(f, "{} ({count} subscribers)", self.topic)?,
            None if self.topic.is_empty() => writeln!(f, "<empty> (empty topic, not observable)")?,
            None => writeln!(f, "{} (wildcard topic, not observable)", self.topic)?,
        }
        for destination in &self.destinations {
            let params = destination
                .params
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join(",");
            writeln!(
                f,
                "  {} -> {} [{}] via '{}' {{{}}}",
                destination.subscriber_id,
                destination.client_id,
                destination.application.as_deref().unwrap_or("unknown"),
                destination.subscription_topic,
                params
            )?;
        }
        Ok(())
    }
}
