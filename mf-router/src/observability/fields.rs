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

//! Canonical structured field keys and value-format helpers.

use crate::message::TopicMessage;
use crate::topic::TopicParams;

pub const EVENT: &str = "event";
pub const COMPONENT: &str = "component";
pub const BROKER: &str = "broker";

pub const MSG_ID: &str = "msg_id";
pub const TOPIC: &str = "topic";
pub const PARAMS: &str = "params";
pub const CLIENT_ID: &str = "client_id";
pub const SUBSCRIBER_ID: &str = "subscriber_id";

pub const DELIVERED: &str = "delivered";
pub const FAILED: &str = "failed";
pub const SKIPPED: &str = "skipped";
pub const REASON: &str = "reason";
pub const ERR: &str = "err";

pub const NONE: &str = "none";
pub const REASON_CLIENT_NOT_REGISTERED: &str = "client_not_registered";

pub fn format_message_id(message: &TopicMessage) -> String {
    message.message_id.hyphenated().to_string()
}

/// Renders params as `name=value` pairs joined by `,`, or [`NONE`] when empty.
pub fn format_params(params: &TopicParams) -> String {
    if params.is_empty() {
        return NONE.to_string();
    }

    params
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::{format_message_id, format_params, NONE};
    use crate::message::TopicMessage;
    use crate::topic::TopicParams;
    use serde_json::json;

    #[test]
    fn format_message_id_is_hyphenated_uuid() {
        let message = TopicMessage::new("a/b", json!(null));

        let formatted = format_message_id(&message);

        assert_eq!(formatted.len(), 36);
        assert_eq!(formatted, message.message_id.to_string());
    }

    #[test]
    fn format_params_returns_none_when_empty() {
        assert_eq!(format_params(&TopicParams::new()), NONE);
    }

    #[test]
    fn format_params_keeps_segment_order() {
        let params: TopicParams = [("room", "kitchen"), ("measurement", "temperature")]
            .into_iter()
            .collect();

        assert_eq!(format_params(&params), "room=kitchen,measurement=temperature");
    }
}
