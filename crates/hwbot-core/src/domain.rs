use std::fmt;

use serde_json::Value;

/// Telegram destination: a numeric chat id or a public `@channel` username.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChatId {
    Id(i64),
    Channel(String),
}

impl ChatId {
    /// Integers are chat ids; anything else is passed through as a channel username.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<i64>() {
            Ok(id) => ChatId::Id(id),
            Err(_) => ChatId::Channel(raw.to_string()),
        }
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatId::Id(id) => write!(f, "{id}"),
            ChatId::Channel(name) => f.write_str(name),
        }
    }
}

/// Lower bound (Unix seconds) of the next status query.
///
/// Only ever moves forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cursor(pub i64);

impl Cursor {
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp())
    }

    /// Move to `next` unless that would go backwards. Returns whether the cursor moved.
    pub fn advance_to(&mut self, next: i64) -> bool {
        if next > self.0 {
            self.0 = next;
            true
        } else {
            false
        }
    }
}

/// One entry of the `homeworks` array, kept as the API sent it.
///
/// Field checks happen when the record is formatted, not when it is extracted.
#[derive(Clone, Debug, PartialEq)]
pub struct HomeworkRecord(pub Value);

impl HomeworkRecord {
    pub fn name(&self) -> Option<&str> {
        self.0.get("homework_name").and_then(Value::as_str)
    }

    pub fn status(&self) -> Option<&Value> {
        self.0.get("status")
    }
}

/// A validated status API payload.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBatch {
    pub records: Vec<HomeworkRecord>,
    pub next_cursor: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chat_id_accepts_numbers_and_channel_names() {
        assert_eq!(ChatId::parse(" -1001 "), ChatId::Id(-1001));
        assert_eq!(
            ChatId::parse("@my_channel"),
            ChatId::Channel("@my_channel".to_string())
        );
        assert_eq!(ChatId::parse("@my_channel").to_string(), "@my_channel");
        assert_eq!(ChatId::Id(42).to_string(), "42");
    }

    #[test]
    fn cursor_only_moves_forward() {
        let mut c = Cursor(100);
        assert!(c.advance_to(150));
        assert_eq!(c, Cursor(150));
        assert!(!c.advance_to(150));
        assert!(!c.advance_to(10));
        assert_eq!(c, Cursor(150));
    }

    #[test]
    fn record_accessors_tolerate_missing_fields() {
        let r = HomeworkRecord(json!({"homework_name": "hw1", "status": 5}));
        assert_eq!(r.name(), Some("hw1"));
        assert_eq!(r.status(), Some(&json!(5)));
        assert_eq!(HomeworkRecord(json!(null)).name(), None);
    }
}
