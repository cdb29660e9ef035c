use crate::db::Repository;
use crate::errors::{AppError, AppResult};
use crate::models::{Member, Membership};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{info, warn};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("valid email regex"));

/// Raw registration form, as typed by the operator.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub membership: String,
}

impl Registration {
    pub fn new(name: &str, email: &str, membership: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            membership: membership.to_string(),
        }
    }

    /// Check required fields and return the trimmed name, email and category.
    fn validate(&self) -> AppResult<(String, String, Membership)> {
        let name = self.name.trim();
        let email = self.email.trim();
        let membership = self.membership.trim();

        if name.is_empty() {
            return Err(AppError::MissingField("name"));
        }
        if email.is_empty() {
            return Err(AppError::MissingField("email"));
        }
        if membership.is_empty() {
            return Err(AppError::MissingField("membership type"));
        }

        if !EMAIL_RE.is_match(email) {
            return Err(AppError::InvalidEmail(email.to_string()));
        }

        let membership = Membership::from_input(membership)
            .ok_or_else(|| AppError::InvalidMembership(membership.to_string()))?;

        Ok((name.to_string(), email.to_string(), membership))
    }
}

/// `<prefix><millis>`, bumping the millisecond value until it is not taken.
pub fn generate_member_id(prefix: &str, now: DateTime<Utc>, existing: &[Member]) -> String {
    let mut millis = now.timestamp_millis();
    loop {
        let candidate = format!("{prefix}{millis}");
        if !existing.iter().any(|m| m.id == candidate) {
            return candidate;
        }
        millis += 1;
    }
}

/// High-level business logic for the `register` command.
pub struct RegisterLogic;

impl RegisterLogic {
    pub fn register(
        repo: &mut Repository,
        form: &Registration,
        id_prefix: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Member> {
        let (name, email, membership) = form.validate()?;

        let member = repo.insert_member(|existing| {
            Ok(Member {
                id: generate_member_id(id_prefix, now, existing),
                name,
                email,
                membership_type: membership,
                registration_date: now,
            })
        })?;

        info!(id = %member.id, membership = %member.membership_type, "member registered");

        if let Err(e) = repo.log(
            "register",
            &member.id,
            &format!("Registered {} ({})", member.name, member.membership_type),
        ) {
            warn!(error = %e, "failed to write internal log");
        }

        Ok(member)
    }
}
