//! Unified application error type.
//! All modules (db, core, cli, export) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Storage-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Stored collection '{key}' is corrupt: {reason}")]
    CorruptCollection { key: String, reason: String },

    // ---------------------------
    // Validation errors
    // ---------------------------
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid membership type: {0} (use student, faculty, staff, visitor or premium)")]
    InvalidMembership(String),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Invalid event type: {0} (use check-in, check-out or all)")]
    InvalidEventKind(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("Member not found: {0}. Please register first.")]
    MemberNotFound(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
