//! The `x-sse-topic` header value

use core::fmt::{Display, Formatter};

use crate::errors::TopicError;

/// Non-empty, de-duplicated list of topics, sent comma separated.
///
/// Parsing follows the gateway: entries are trimmed, a blank entry rejects the whole list and duplicates keep their
/// first position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicList(Vec<String>);

impl TopicList {
    pub fn parse(raw: &str) -> Result<Self, TopicError> {
        if raw.trim().is_empty() {
            return Err(TopicError::Empty);
        }

        let mut topics: Vec<String> = Vec::new();
        for topic in raw.split(',').map(str::trim) {
            if topic.is_empty() {
                return Err(TopicError::EmptyTopic);
            }
            if !topics.iter().any(|seen| seen == topic) {
                topics.push(topic.to_owned());
            }
        }

        Ok(Self(topics))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a parsed list
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Header value, topics joined with `,`
    pub fn to_header_value(&self) -> String {
        self.0.join(",")
    }
}

impl Display for TopicList {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        self.to_header_value().fmt(f)
    }
}

impl core::str::FromStr for TopicList {
    type Err = TopicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
