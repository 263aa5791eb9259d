//! The one error kind of this crate: a wrapped SQLite execution failure.
//!
//! Carries the SQLite (extended) result code, the driver message and the
//! exact SQL text that failed. Repository methods wrap the low-level
//! rusqlite error; the service layer performs no recovery and lets the
//! error propagate unchanged. No retries anywhere: every operation here is
//! an idempotent read and is safe to simply re-invoke.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("sqlite error {code}: {message} (sql: {sql})")]
pub struct SpaceError {
    /// SQLite extended result code (SQLITE_ERROR when none is available).
    pub code: i32,
    pub message: String,
    /// The SQL text whose execution failed.
    pub sql: String,
}

impl SpaceError {
    /// Wrap a rusqlite error together with the offending SQL.
    pub fn wrap(err: rusqlite::Error, sql: &str) -> Self {
        let (code, message) = match &err {
            rusqlite::Error::SqliteFailure(e, msg) => (
                e.extended_code,
                msg.clone().unwrap_or_else(|| e.to_string()),
            ),
            other => (rusqlite::ffi::SQLITE_ERROR, other.to_string()),
        };
        Self {
            code,
            message,
            sql: sql.to_string(),
        }
    }
}
