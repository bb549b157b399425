//! Player keys and deterministic session IDs.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Stable player key, the `id` half of a `"name @ id"` log reference.
///
/// Display names can change between sessions; the id does not, so every
/// accumulator is keyed on it.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerId({})", self.0)
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A deterministic session ID derived from the log content.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Hash the lines in order with SHA256 and keep the first 16 hex characters.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut hasher = Sha256::new();
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                hasher.update(b"\n");
            }
            hasher.update(line.as_ref().as_bytes());
        }
        let hash = hex::encode(hasher.finalize());
        Self(hash[..16].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_deterministic() {
        let lines = ["-- starting hand #1", "-- ending hand #1 --"];
        assert_eq!(SessionId::from_lines(&lines), SessionId::from_lines(&lines));
    }

    #[test]
    fn test_session_id_order_sensitive() {
        let a = SessionId::from_lines(&["first", "second"]);
        let b = SessionId::from_lines(&["second", "first"]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_session_id_hex_format() {
        let id = SessionId::from_lines(&["test"]);
        assert_eq!(id.as_str().len(), 16);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_player_id_serializes_as_plain_string() {
        let id = PlayerId::from("a1b2c3");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"a1b2c3\"");
    }

    #[test]
    fn test_player_id_display_and_debug() {
        let id = PlayerId::new("xyz".to_string());
        assert_eq!(format!("{}", id), "xyz");
        assert!(format!("{:?}", id).contains("xyz"));
    }

    #[test]
    fn test_player_id_ordering() {
        let mut ids = vec![PlayerId::from("b"), PlayerId::from("a")];
        ids.sort();
        assert_eq!(ids[0].as_str(), "a");
    }
}
