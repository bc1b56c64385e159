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

use crate::client::WindowHandle;
use serde::{Deserialize, Serialize};

/// Unique, opaque identifier of a connected client.
pub type ClientId = String;

/// Describes the application owning a client.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ApplicationDescriptor {
    pub symbolic_name: String,
}

impl ApplicationDescriptor {
    pub fn new(symbolic_name: &str) -> Self {
        Self {
            symbolic_name: symbolic_name.to_string(),
        }
    }
}

///
/// [`Client`] is one connected peer: a host application or an embedded microfrontend.
///
/// `gateway_window` is the nearest addressable transport endpoint of the peer. It equals
/// `window` unless the peer is nested behind another context.
///
/// # Examples
///
/// ```
/// use mf_router::{ApplicationDescriptor, Client, WindowHandle};
///
/// let window = WindowHandle::new("app-1");
/// let client = Client::new("client#1", window.clone(), ApplicationDescriptor::new("app-1"));
///
/// assert_eq!(client.gateway_window, window);
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    pub id: ClientId,
    pub window: WindowHandle,
    pub gateway_window: WindowHandle,
    pub application: ApplicationDescriptor,
}

impl Client {
    /// Creates a client that is its own gateway.
    pub fn new(id: &str, window: WindowHandle, application: ApplicationDescriptor) -> Self {
        Self {
            id: id.to_string(),
            gateway_window: window.clone(),
            window,
            application,
        }
    }

    /// Creates a client reachable through a separate gateway window.
    pub fn with_gateway(
        id: &str,
        window: WindowHandle,
        gateway_window: WindowHandle,
        application: ApplicationDescriptor,
    ) -> Self {
        Self {
            id: id.to_string(),
            window,
            gateway_window,
            application,
        }
    }
}
