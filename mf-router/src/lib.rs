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

//! # mf-router
//!
//! `mf-router` is the message routing engine of a microfrontend platform. Isolated
//! documents (the host application and its embedded microfrontends) exchange topic-based
//! messages without holding references to each other; this crate decides who receives what.
//!
//! Typical usage is API-first and centered on [`ClientRegistry`],
//! [`TopicSubscriptionRegistry`] and, for end-to-end delivery, [`MessageBroker`].
//!
//! ## Topic subscriptions
//!
//! ```
//! use mf_router::TopicSubscriptionRegistry;
//!
//! let mut registry = TopicSubscriptionRegistry::new();
//! registry
//!     .subscribe("myhome/:room/:measurement/:unit", "client#1", "sub#1")
//!     .unwrap();
//!
//! let destinations =
//!     registry.resolve_topic_destinations("myhome/livingroom/temperature/celcius");
//! assert_eq!(destinations.len(), 1);
//! assert_eq!(destinations[0].params.get("room"), Some("livingroom"));
//! assert_eq!(destinations[0].params.get("measurement"), Some("temperature"));
//! assert_eq!(destinations[0].params.get("unit"), Some("celcius"));
//! ```
//!
//! ## Subscriber counts
//!
//! Subscriber counts are observed per exact topic. Wildcard topics are rejected at the call
//! site.
//!
//! ```
//! use mf_router::{RouterError, TopicSubscriptionRegistry};
//!
//! let mut registry = TopicSubscriptionRegistry::new();
//! let mut counts = registry
//!     .subscription_count("myhome/livingroom/temperature")
//!     .unwrap();
//!
//! registry.subscribe("myhome/livingroom/temperature", "client#1", "sub#1").unwrap();
//! registry.subscribe("myhome/livingroom/temperature", "client#1", "sub#2").unwrap();
//! registry.unsubscribe_client("client#1").unwrap();
//!
//! assert_eq!(counts.drain_counts(), vec![0, 1, 2, 0]);
//! assert!(matches!(
//!     registry.subscription_count("myhome/livingroom/:measurement"),
//!     Err(RouterError::TopicObserve(_))
//! ));
//! ```
//!
//! ## Internal architecture map
//!
//! - Topic: pattern grammar and the pure matcher
//! - Client: connected-peer model and identity-keyed registry
//! - Routing: insertion-ordered subscription store, destination resolution, count streams
//! - Broker: client lifecycle, publish fan-out, retained messages over a [`ClientTransport`]
//!
//! ## Observability model
//!
//! The workspace uses `tracing` for logs/events.
//! Library code emits events/spans and does not unconditionally initialize a global
//! subscriber. Binaries/tests are responsible for one-time `tracing_subscriber`
//! initialization at process boundaries.

mod broker;
pub use broker::{ClientTransport, MessageBroker, PublishReport};

mod client;
pub use client::{ApplicationDescriptor, Client, ClientId, ClientRegistry, WindowHandle};

mod error;
pub use error::RouterError;

mod message;
pub use message::TopicMessage;

#[doc(hidden)]
pub mod observability;

mod routing;
pub use routing::subscription_count::SubscriptionCountStream;
pub use routing::subscription_registry::{ResolvedTopicDestination, TopicSubscriptionRegistry};
pub use routing::subscription_store::TopicSubscription;

pub mod topic;
pub use topic::{TopicMatch, TopicParams};

#[doc(hidden)]
pub mod benchmark_support;
