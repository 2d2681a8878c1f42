//! Session-scoped identifiers.
//!
//! Every game object crossing the client/server boundary (player, card,
//! action) carries a `session_object_id` unique within the session; the
//! session itself is identified by a `SessionId`. Both are opaque strings
//! minted by the server - the client never derives meaning from their
//! contents, it only compares them.

use serde::{Deserialize, Serialize};

/// Unique identifier for a server-side game object within a session.
///
/// Players, cards, and actions all carry one. The server guarantees
/// uniqueness; a missing or colliding id is a server bug the client does
/// not defend against.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub String);

impl ObjectId {
    /// Create an object id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier for one game session.
///
/// Echoed back to the server on every outbound request so it can route
/// the message to the right game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    /// Create a session id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_equality() {
        assert_eq!(ObjectId::from("card-1"), ObjectId::new("card-1"));
        assert_ne!(ObjectId::from("card-1"), ObjectId::from("card-2"));
    }

    #[test]
    fn test_transparent_serialization() {
        let id = ObjectId::from("card-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"card-1\"");

        let back: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", SessionId::from("s-9")), "s-9");
        assert_eq!(format!("{}", ObjectId::from("o-3")), "o-3");
    }
}
