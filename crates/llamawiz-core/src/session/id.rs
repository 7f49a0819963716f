//! Session identifiers.
//!
//! Format: `chat_YYYYmmdd_HHMMSS_xxxxxxxx` — the local creation time for
//! readability, plus 8 hex digits from a v4 UUID so two sessions created in
//! the same second never share an id.

use std::borrow::Borrow;
use std::fmt;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque session identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh id from the current local time.
    pub fn generate() -> Self {
        Self::generate_at(Local::now().naive_local())
    }

    /// Generate a fresh id stamped with `at`.
    pub fn generate_at(at: NaiveDateTime) -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        SessionId(format!(
            "chat_{}_{}",
            at.format("%Y%m%d_%H%M%S"),
            &suffix[..8]
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        SessionId(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        SessionId(s.to_string())
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SessionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap()
    }

    #[test]
    fn test_id_format() {
        let id = SessionId::generate_at(fixed_time());
        let s = id.as_str();
        assert!(s.starts_with("chat_20260102_030405_"), "got {s}");
        let suffix = s.rsplit('_').next().unwrap();
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_same_second_ids_differ() {
        let ids: HashSet<SessionId> = (0..100)
            .map(|_| SessionId::generate_at(fixed_time()))
            .collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = SessionId::from("chat_x");
        assert_eq!(serde_json::to_value(&id).unwrap(), serde_json::json!("chat_x"));
        let back: SessionId = serde_json::from_str("\"chat_x\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_display() {
        assert_eq!(SessionId::from("chat_abc").to_string(), "chat_abc");
    }
}
