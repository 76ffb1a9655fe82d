//! Environment configuration for the publisher and subscriber.
//!
//! Every variable has a default so both programs run against a local gateway with no setup. A variable that is set
//! but empty counts as unset.

use crate::{
    errors::ConfigError,
    gateway::{Publication, Subscription},
    topic::TopicList,
};

pub const GATEWAY_URL_VAR: &str = "GATEWAY_URL";
pub const TOPIC_VAR: &str = "TOPIC";
pub const EVENT_ID_VAR: &str = "EVENT_ID";
pub const API_KEY_VAR: &str = "API_KEY";
pub const PAYLOAD_VAR: &str = "PAYLOAD";
pub const SUBSCRIBER_ID_VAR: &str = "SUBSCRIBER_ID";

pub const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:8787";
pub const DEFAULT_TOPIC: &str = "alerts";
pub const DEFAULT_EVENT_ID: &str = "rust-event-1";
pub const DEFAULT_API_KEY: &str = "dev-key";
pub const DEFAULT_PAYLOAD: &str = "hello from rust publisher";
pub const DEFAULT_SUBSCRIBER_ID: &str = "rust-sub-1";

fn var_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key)
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_owned())
}

fn topics_from(lookup: &impl Fn(&str) -> Option<String>) -> Result<TopicList, ConfigError> {
    TopicList::parse(&var_or(lookup, TOPIC_VAR, DEFAULT_TOPIC)).map_err(|source| {
        ConfigError::Topic {
            var: TOPIC_VAR,
            source,
        }
    })
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Settings for one publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherConfig {
    pub gateway_url: String,
    pub publication: Publication,
}

impl PublisherConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    /// Builds the config from any variable source, `lookup` returns [None] for unset variables
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let event_id = var_or(&lookup, EVENT_ID_VAR, DEFAULT_EVENT_ID);
        if event_id.trim().is_empty() {
            return Err(ConfigError::Blank { var: EVENT_ID_VAR });
        }

        Ok(Self {
            gateway_url: var_or(&lookup, GATEWAY_URL_VAR, DEFAULT_GATEWAY_URL),
            publication: Publication {
                topics: topics_from(&lookup)?,
                event_id,
                api_key: var_or(&lookup, API_KEY_VAR, DEFAULT_API_KEY),
                payload: var_or(&lookup, PAYLOAD_VAR, DEFAULT_PAYLOAD),
            },
        })
    }
}

/// Settings for one subscription
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberConfig {
    pub gateway_url: String,
    pub subscription: Subscription,
}

impl SubscriberConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    /// Builds the config from any variable source, `lookup` returns [None] for unset variables
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            gateway_url: var_or(&lookup, GATEWAY_URL_VAR, DEFAULT_GATEWAY_URL),
            subscription: Subscription::new(topics_from(&lookup)?)
                .with_subscriber_id(var_or(&lookup, SUBSCRIBER_ID_VAR, DEFAULT_SUBSCRIBER_ID)),
        })
    }
}
