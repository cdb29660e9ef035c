use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of an attendance event, as stored in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "check-in")]
    CheckIn,
    #[serde(rename = "check-out")]
    CheckOut,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::CheckIn => "check-in",
            EventKind::CheckOut => "check-out",
        }
    }

    /// Parse user input. Accepts `check-in`/`in` and `check-out`/`out`, any case.
    pub fn from_input(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "check-in" | "checkin" | "in" => Some(EventKind::CheckIn),
            "check-out" | "checkout" | "out" => Some(EventKind::CheckOut),
            _ => None,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
