use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier correlating a conversation with server-side state.
///
/// `SessionId::NEW` (zero) means no session has been assigned yet; the server
/// picks an identifier on the first message sent with it.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(u64);

impl SessionId {
    /// The unset identifier.
    pub const NEW: SessionId = SessionId(0);

    /// Create a session identifier from a raw value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub fn get(self) -> u64 {
        self.0
    }

    /// Returns true if no session has been assigned.
    pub fn is_new(self) -> bool {
        self.0 == 0
    }

    /// Interpret text typed into the join box.
    ///
    /// Leading whitespace and an optional sign are accepted, then the leading
    /// run of digits is read and anything after it is ignored.  Input without
    /// digits, or that denotes zero, a negative number, or a value too large
    /// to represent, yields [`SessionId::NEW`].
    pub fn parse_join(input: &str) -> Self {
        let s = input.trim_start();
        let (negative, rest) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .map(|end| &rest[..end])
            .unwrap_or(rest);
        if negative || digits.is_empty() {
            return Self::NEW;
        }
        digits.parse::<u64>().map(Self).unwrap_or(Self::NEW)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for SessionId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
