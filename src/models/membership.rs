use serde::{Deserialize, Serialize};
use std::fmt;

/// Membership category of a registered member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Membership {
    Student,
    Faculty,
    Staff,
    Visitor,
    Premium,
}

impl Membership {
    pub const ALL: [Membership; 5] = [
        Membership::Student,
        Membership::Faculty,
        Membership::Staff,
        Membership::Visitor,
        Membership::Premium,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Membership::Student => "student",
            Membership::Faculty => "faculty",
            Membership::Staff => "staff",
            Membership::Visitor => "visitor",
            Membership::Premium => "premium",
        }
    }

    /// Human readable label used in roster output.
    pub fn label(&self) -> &'static str {
        match self {
            Membership::Student => "Student",
            Membership::Faculty => "Faculty",
            Membership::Staff => "Staff",
            Membership::Visitor => "Visitor",
            Membership::Premium => "Premium Member",
        }
    }

    /// Helper: convert input from CLI (lowercase or uppercase)
    pub fn from_input(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "student" => Some(Membership::Student),
            "faculty" => Some(Membership::Faculty),
            "staff" => Some(Membership::Staff),
            "visitor" => Some(Membership::Visitor),
            "premium" => Some(Membership::Premium),
            _ => None,
        }
    }
}

impl fmt::Display for Membership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
