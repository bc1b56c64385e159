/********************************************************************************
 * Copyright (c) 2024 Contributors to the Eclipse Foundation
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

//! Static client and subscription topology read from a json5 file.
//!
//! ```
//! use mf_router::{ClientRegistry, TopicSubscriptionRegistry};
//! use static_topology::StaticTopology;
//!
//! let topology: StaticTopology = r#"{
//!     clients: [{ id: "client#1", application: "app-1", window: "frame-1" }],
//!     subscriptions: [{ subscriber_id: "sub#1", topic: "myhome/:room", client_id: "client#1" }],
//! }"#
//! .parse()
//! .unwrap();
//!
//! let mut clients = ClientRegistry::new();
//! let mut subscriptions = TopicSubscriptionRegistry::new();
//! topology.apply(&mut clients, &mut subscriptions).unwrap();
//!
//! assert_eq!(subscriptions.resolve_topic_destinations("myhome/kitchen").len(), 1);
//! ```

use mf_router::{
    ApplicationDescriptor, Client, ClientRegistry, RouterError, TopicSubscriptionRegistry,
    WindowHandle,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("Unable to read topology file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Unable to parse topology: {0}")]
    Parse(#[from] json5::Error),
    #[error("Subscription '{subscriber_id}' references unknown client '{client_id}'")]
    UnknownClient {
        subscriber_id: String,
        client_id: String,
    },
    #[error(transparent)]
    Router(#[from] RouterError),
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct StaticTopology {
    #[serde(default)]
    pub clients: Vec<ClientConfig>,
    #[serde(default)]
    pub subscriptions: Vec<SubscriptionConfig>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub id: String,
    pub application: String,
    pub window: String,
    /// Defaults to `window`.
    #[serde(default)]
    pub gateway_window: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct SubscriptionConfig {
    pub subscriber_id: String,
    pub topic: String,
    pub client_id: String,
}

impl FromStr for StaticTopology {
    type Err = TopologyError;

    fn from_str(contents: &str) -> Result<Self, Self::Err> {
        Ok(json5::from_str(contents)?)
    }
}

impl StaticTopology {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TopologyError> {
        let path = path.as_ref();
        debug!("reading topology file: {path:?}");

        let contents = fs::read_to_string(path).map_err(|source| TopologyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        contents.parse()
    }

    /// Registers every client, then every subscription, in file order.
    ///
    /// Subscriptions are checked against the declared clients before anything is registered.
    /// Equal window labels share one [`WindowHandle`].
    pub fn apply(
        &self,
        clients: &mut ClientRegistry,
        subscriptions: &mut TopicSubscriptionRegistry,
    ) -> Result<(), TopologyError> {
        let declared: HashSet<&str> = self.clients.iter().map(|client| client.id.as_str()).collect();
        if let Some(orphan) = self
            .subscriptions
            .iter()
            .find(|subscription| !declared.contains(subscription.client_id.as_str()))
        {
            return Err(TopologyError::UnknownClient {
                subscriber_id: orphan.subscriber_id.clone(),
                client_id: orphan.client_id.clone(),
            });
        }

        let mut windows: HashMap<String, WindowHandle> = HashMap::new();
        let mut window = |label: &str| -> WindowHandle {
            windows
                .entry(label.to_string())
                .or_insert_with(|| WindowHandle::new(label))
                .clone()
        };

        for client in &self.clients {
            let client_window = window(&client.window);
            let gateway_window = match &client.gateway_window {
                Some(label) => window(label),
                None => client_window.clone(),
            };
            debug!(
                "registering client '{}' of '{}'",
                client.id, client.application
            );
            clients.register_client(Client::with_gateway(
                &client.id,
                client_window,
                gateway_window,
                ApplicationDescriptor::new(&client.application),
            ));
        }

        for subscription in &self.subscriptions {
            debug!(
                "subscribing '{}' to '{}'",
                subscription.subscriber_id, subscription.topic
            );
            subscriptions.subscribe(
                &subscription.topic,
                &subscription.client_id,
                &subscription.subscriber_id,
            )?;
        }
        Ok(())
    }
}
