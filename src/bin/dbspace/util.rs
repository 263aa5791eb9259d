use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

/// Open the database read-only (the analyzer never mutates user files) and
/// derive the cache identifier from the path.
pub fn open_ro(path: &Path) -> Result<(Connection, String)> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("open {}", path.display()))?;
    Ok((conn, path.display().to_string()))
}
