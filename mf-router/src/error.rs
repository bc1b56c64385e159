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

//! Error kinds surfaced by the registries and the broker facade.

use thiserror::Error;

/// Failures raised synchronously at the call site.
///
/// The `Topic*` variants signal calling mistakes (missing identifiers, wildcard topics passed
/// to exact-only queries). Benign absence, such as unsubscribing an unknown subscriber, is
/// never reported through this type.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum RouterError {
    #[error("[TopicSubscribeError] {0}")]
    TopicSubscribe(String),
    #[error("[TopicUnsubscribeError] {0}")]
    TopicUnsubscribe(String),
    #[error("[TopicObserveError] {0}")]
    TopicObserve(String),
    #[error("[PublishError] {0}")]
    Publish(String),
    #[error("[DeliveryError] client '{client_id}': {reason}")]
    Delivery { client_id: String, reason: String },
}

impl RouterError {
    pub(crate) fn subscribe(reason: impl Into<String>) -> Self {
        Self::TopicSubscribe(reason.into())
    }

    pub(crate) fn unsubscribe(reason: impl Into<String>) -> Self {
        Self::TopicUnsubscribe(reason.into())
    }

    pub(crate) fn observe(reason: impl Into<String>) -> Self {
        Self::TopicObserve(reason.into())
    }

    /// Builds a delivery failure for one client. Used by transport implementations.
    pub fn delivery(client_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Delivery {
            client_id: client_id.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RouterError;

    #[test]
    fn display_carries_error_kind_prefix() {
        assert_eq!(
            RouterError::subscribe("Missing required topic.").to_string(),
            "[TopicSubscribeError] Missing required topic."
        );
        assert_eq!(
            RouterError::observe("wildcard").to_string(),
            "[TopicObserveError] wildcard"
        );
        assert_eq!(
            RouterError::delivery("client#1", "closed").to_string(),
            "[DeliveryError] client 'client#1': closed"
        );
    }
}
