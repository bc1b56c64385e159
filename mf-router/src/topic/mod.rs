//! Topic grammar and matching.
//!
//! A topic is a `/`-delimited sequence of segments. Subscriptions may use named wildcard
//! segments (`:name`), each matching exactly one concrete segment.
//!
//! ```
//! use mf_router::topic::{is_wildcard_topic, match_topic};
//!
//! let matched = match_topic("myhome/:room/temperature", "myhome/kitchen/temperature");
//! assert!(matched.matches);
//! assert_eq!(matched.params.get("room"), Some("kitchen"));
//!
//! assert!(is_wildcard_topic("myhome/:room/temperature"));
//! assert!(!match_topic("myhome/:room", "myhome/kitchen/temperature").matches);
//! ```

mod topic_matcher;

pub use topic_matcher::{
    is_wildcard_segment, is_wildcard_topic, match_topic, TopicMatch, TopicParams,
    TOPIC_SEPARATOR, WILDCARD_MARKER,
};
