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

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::topic::TopicParams;

/// A message published to a concrete topic.
///
/// `params` is empty on the publisher's side; the broker fills it per destination with the
/// wildcard bindings of the subscription that matched.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TopicMessage {
    pub message_id: Uuid,
    pub topic: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub params: TopicParams,
    #[serde(default)]
    pub body: Value,
    #[serde(default)]
    pub retain: bool,
}

impl TopicMessage {
    pub fn new(topic: &str, body: Value) -> Self {
        Self {
            message_id: Uuid::new_v4(),
            topic: topic.to_string(),
            headers: BTreeMap::new(),
            params: TopicParams::new(),
            body,
            retain: false,
        }
    }

    /// Marks the message to be kept as the topic's retained message.
    pub fn retained(mut self) -> Self {
        self.retain = true;
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    /// A retained message without body deletes the topic's retained message.
    pub fn is_retained_delete(&self) -> bool {
        self.retain && self.body.is_null()
    }

    pub(crate) fn for_destination(&self, params: TopicParams) -> Self {
        Self {
            params,
            ..self.clone()
        }
    }
}
