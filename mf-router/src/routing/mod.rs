//! Subscription registry and destination resolution.
//!
//! Owns the mutable subscription set, resolves publish-time destinations against it, and
//! drives the live subscriber-count streams.

pub(crate) mod subscription_count;
pub(crate) mod subscription_registry;
pub(crate) mod subscription_store;
