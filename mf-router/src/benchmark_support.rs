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

//! Deterministic benchmark fixtures for the Criterion harness.

use crate::error::RouterError;
use crate::routing::subscription_count::SubscriptionCountStream;
use crate::routing::subscription_registry::TopicSubscriptionRegistry;

const ROOMS: [&str; 4] = ["livingroom", "kitchen", "bedroom", "office"];
const MEASUREMENTS: [&str; 3] = ["temperature", "humidity", "luminance"];

/// Concrete topic published by every resolution benchmark.
pub const PUBLISH_TOPIC: &str = "myhome/livingroom/temperature";

fn topic_pattern(index: usize) -> String {
    let room = ROOMS[index % ROOMS.len()];
    let measurement = MEASUREMENTS[index % MEASUREMENTS.len()];

    match index % 4 {
        0 => format!("myhome/{room}/{measurement}"),
        1 => format!("myhome/:room/{measurement}"),
        2 => format!("myhome/{room}/:measurement"),
        _ => ":building/:room/:measurement".to_string(),
    }
}

fn populate(
    registry: &mut TopicSubscriptionRegistry,
    rows: usize,
    clients: usize,
) -> Result<(), RouterError> {
    let clients = clients.max(1);
    for index in 0..rows.max(1) {
        registry.subscribe(
            &topic_pattern(index),
            &format!("client#{}", index % clients),
            &format!("sub#{index}"),
        )?;
    }
    Ok(())
}

/// Fixed fixture for `destination_resolution/*` benchmark IDs.
pub struct DestinationResolutionFixture {
    registry: TopicSubscriptionRegistry,
}

impl DestinationResolutionFixture {
    pub fn new(rows: usize) -> Result<Self, RouterError> {
        let mut registry = TopicSubscriptionRegistry::new();
        populate(&mut registry, rows, 16)?;
        Ok(Self { registry })
    }

    pub fn resolve_count(&self) -> usize {
        self.registry.resolve_topic_destinations(PUBLISH_TOPIC).len()
    }
}

/// Fixture for `subscription_churn/*`: one client repeatedly joins and leaves while a
/// subscriber-count observer is attached.
pub struct SubscriptionChurnFixture {
    registry: TopicSubscriptionRegistry,
    counts: SubscriptionCountStream,
    subscriptions_per_client: usize,
}

impl SubscriptionChurnFixture {
    pub fn new(background_rows: usize, subscriptions_per_client: usize) -> Result<Self, RouterError> {
        let mut registry = TopicSubscriptionRegistry::new();
        populate(&mut registry, background_rows, 8)?;
        let counts = registry.subscription_count(PUBLISH_TOPIC)?;

        Ok(Self {
            registry,
            counts,
            subscriptions_per_client,
        })
    }

    /// Subscribes the churn client, removes it with `unsubscribe_client`, and returns the
    /// number of count transitions observed.
    pub fn churn_once(&mut self) -> Result<usize, RouterError> {
        for index in 0..self.subscriptions_per_client {
            self.registry
                .subscribe(PUBLISH_TOPIC, "churn-client", &format!("churn#{index}"))?;
        }
        self.registry.unsubscribe_client("churn-client")?;
        Ok(self.counts.drain_counts().len())
    }
}
