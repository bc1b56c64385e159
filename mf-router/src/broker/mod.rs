//! Broker facade.
//!
//! Wires the client registry and the topic subscription registry to a [`ClientTransport`]:
//! connect/disconnect lifecycle, publish fan-out with wildcard bindings, and retained
//! messages replayed to new subscribers.
//!
//! ```
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use mf_router::{
//!     ApplicationDescriptor, Client, ClientTransport, MessageBroker, RouterError, TopicMessage,
//!     WindowHandle,
//! };
//! use serde_json::json;
//!
//! # struct MockTransport;
//! #
//! # #[async_trait]
//! # impl ClientTransport for MockTransport {
//! #     async fn deliver(&self, _client: &Client, _message: TopicMessage) -> Result<(), RouterError> {
//! #         Ok(())
//! #     }
//! # }
//! #
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let broker = MessageBroker::new("broker-doc", Arc::new(MockTransport));
//! let window = WindowHandle::new("app-1");
//! broker
//!     .connect_client(Client::new("client#1", window, ApplicationDescriptor::new("app-1")))
//!     .await;
//! broker
//!     .subscribe("myhome/:room/temperature", "client#1", "sub#1")
//!     .await
//!     .unwrap();
//!
//! let report = broker
//!     .publish(TopicMessage::new("myhome/kitchen/temperature", json!(21)))
//!     .await
//!     .unwrap();
//! assert_eq!(report.delivered, 1);
//! # });
//! ```

mod client_transport;
mod message_broker;
mod retained_messages;

pub use client_transport::ClientTransport;
pub use message_broker::{MessageBroker, PublishReport};
