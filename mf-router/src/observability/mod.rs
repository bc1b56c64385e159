//! Structured logging vocabulary.
//!
//! The crate emits `tracing` events with a stable `event` name and `component` field.
//! Library code never installs a global subscriber.

pub mod events;
pub mod fields;
