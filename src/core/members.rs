use crate::core::stats::MemberSummary;
use crate::db::Repository;
use crate::errors::{AppError, AppResult};
use crate::models::Member;
use tracing::{info, warn};

/// Roster lookup and deletion.
pub struct MemberLogic;

impl MemberLogic {
    /// Members matching `term` on name, email or id. `None` or blank keeps all.
    pub fn search(members: &[Member], term: Option<&str>) -> Vec<Member> {
        match term.map(str::trim).filter(|t| !t.is_empty()) {
            Some(t) => members.iter().filter(|m| m.matches(t)).cloned().collect(),
            None => members.to_vec(),
        }
    }

    /// Member details plus the attendance summary over the full history.
    pub fn details(repo: &Repository, id: &str) -> AppResult<(Member, MemberSummary)> {
        let member = repo
            .find_member(id)?
            .ok_or_else(|| AppError::MemberNotFound(id.to_string()))?;
        let summary = MemberSummary::for_member(&member.id, &repo.attendance()?);
        Ok((member, summary))
    }

    /// Remove a member from the registry. Their attendance events stay.
    pub fn delete(repo: &mut Repository, id: &str) -> AppResult<Member> {
        let removed = repo
            .remove_member(id)?
            .ok_or_else(|| AppError::MemberNotFound(id.to_string()))?;

        info!(id, "member deleted");

        if let Err(e) = repo.log(
            "delete",
            &removed.id,
            &format!("Deleted member {}", removed.name),
        ) {
            warn!(error = %e, "failed to write internal log");
        }

        Ok(removed)
    }
}
