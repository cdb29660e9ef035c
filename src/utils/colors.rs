/// ANSI color helper utilities for terminal output.
use crate::models::{EventKind, Membership};

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// check-in → green, check-out → red
pub fn color_for_kind(kind: EventKind) -> &'static str {
    match kind {
        EventKind::CheckIn => GREEN,
        EventKind::CheckOut => RED,
    }
}

pub fn color_for_membership(m: Membership) -> &'static str {
    match m {
        Membership::Student => BLUE,
        Membership::Faculty => GREEN,
        Membership::Staff => YELLOW,
        Membership::Visitor => GREY,
        Membership::Premium => MAGENTA,
    }
}

pub fn colorize_kind(kind: EventKind) -> String {
    format!("{}{}{}", color_for_kind(kind), kind, RESET)
}

pub fn colorize_membership(m: Membership) -> String {
    format!("{}{}{}", color_for_membership(m), m, RESET)
}

/// Paint the trailing check-in / check-out word of a rendered table row.
pub fn color_kind_cell(line: &str) -> String {
    for kind in [EventKind::CheckIn, EventKind::CheckOut] {
        if let Some(prefix) = line.trim_end().strip_suffix(kind.as_str()) {
            return format!("{}{}", prefix, colorize_kind(kind));
        }
    }
    line.to_string()
}
