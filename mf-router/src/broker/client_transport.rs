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

use async_trait::async_trait;

use crate::client::Client;
use crate::error::RouterError;
use crate::message::TopicMessage;

///
/// [`ClientTransport`] hands a routed message to one client, typically by posting it to the
/// client's `gateway_window`. Framing and serialization are up to the implementation.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use mf_router::{Client, ClientTransport, RouterError, TopicMessage};
///
/// struct LoggingTransport;
///
/// #[async_trait]
/// impl ClientTransport for LoggingTransport {
///     async fn deliver(&self, client: &Client, message: TopicMessage) -> Result<(), RouterError> {
///         println!("{} <- {}", client.gateway_window.label(), message.topic);
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait ClientTransport: Send + Sync {
    async fn deliver(&self, client: &Client, message: TopicMessage) -> Result<(), RouterError>;
}
