//! The event handed out by the frame readers

use bytes_utils::Str;

/// A complete SSE event: the last `id: ` of its frame and every `data: ` fragment joined with `\n`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub id: Str,
    pub data: Str,
}

impl Event {
    pub fn new(id: impl Into<Str>, data: impl Into<Str>) -> Self {
        Self {
            id: id.into(),
            data: data.into(),
        }
    }

    /// Renders the event as a single line of JSON, `{"id":"..","data":".."}`
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_static_strs() {
        let event = Event::new("evt-1", "hello");
        assert_eq!(&*event.id, "evt-1");
        assert_eq!(&*event.data, "hello");
    }

    #[cfg(feature = "json")]
    #[test]
    fn renders_json_line() {
        let event = Event::new("evt-1", "line one\nline \"two\"");
        assert_eq!(
            event.to_json().unwrap(),
            r#"{"id":"evt-1","data":"line one\nline \"two\""}"#
        );
    }
}
