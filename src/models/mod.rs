pub mod attendance;
pub mod event_kind;
pub mod member;
pub mod membership;

pub use attendance::AttendanceEvent;
pub use event_kind::EventKind;
pub use member::Member;
pub use membership::Membership;
