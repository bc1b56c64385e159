//! Canonical structured event names used across `mf-router`.

// Client registry events.
pub const CLIENT_REGISTERED: &str = "client_registered";
pub const CLIENT_UNREGISTERED: &str = "client_unregistered";

// Subscription registry events.
pub const TOPIC_SUBSCRIBED: &str = "topic_subscribed";
pub const TOPIC_UNSUBSCRIBED: &str = "topic_unsubscribed";
pub const CLIENT_SUBSCRIPTIONS_REMOVED: &str = "client_subscriptions_removed";
pub const TOPIC_DESTINATIONS_RESOLVED: &str = "topic_destinations_resolved";
pub const SUBSCRIPTION_COUNT_CHANGED: &str = "subscription_count_changed";

// Broker lifecycle and delivery events.
pub const BROKER_CREATED: &str = "broker_created";
pub const CLIENT_CONNECTED: &str = "client_connected";
pub const CLIENT_DISCONNECTED: &str = "client_disconnected";
pub const PUBLISH_RECEIVED: &str = "publish_received";
pub const PUBLISH_COMPLETED: &str = "publish_completed";
pub const RETAINED_MESSAGE_STORED: &str = "retained_message_stored";
pub const RETAINED_MESSAGE_DELETED: &str = "retained_message_deleted";
pub const RETAINED_MESSAGE_REPLAYED: &str = "retained_message_replayed";
pub const DELIVERY_OK: &str = "delivery_ok";
pub const DELIVERY_FAILED: &str = "delivery_failed";
pub const DELIVERY_SKIPPED_UNKNOWN_CLIENT: &str = "delivery_skipped_unknown_client";
