use anyhow::Result;
use std::path::PathBuf;

use dbspace::SpaceAnalyzer;

use crate::util::open_ro;

pub fn exec(path: PathBuf, json: bool) -> Result<()> {
    let (conn, id) = open_ro(&path)?;
    let mut analyzer = SpaceAnalyzer::new();
    let du = analyzer.db_space_used(&id, &conn)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&du)?);
        return Ok(());
    }

    println!("DB {}", path.display());
    println!("  page_size        = {}", du.page_size);
    println!("  pages_total      = {}", du.file_pgcnt);
    println!("  file_bytes       = {}", du.file_bytes);
    println!("  ptrmap_pages     = {} ({:.2}%)", du.av_pgcnt, du.av_percent);
    println!("  pages_in_use     = {} ({:.2}%)", du.inuse_pgcnt, du.inuse_percent);
    // Residual vs. freelist free counts may disagree; print both.
    println!("  free_pages       = {} ({:.2}%)", du.free_pgcnt, du.free_percent);
    println!("  freelist_pages   = {} ({:.2}%)", du.free_pgcnt2, du.free_percent2);
    println!("  pages_reconciled = {}", du.file_pgcnt2);
    println!("  tables           = {}", du.ntable);
    println!(
        "  indexes          = {} (auto {}, manual {})",
        du.nindex, du.nautoindex, du.nmanindex
    );
    println!("  user_payload     = {} ({:.2}%)", du.user_payload, du.user_percent);
    Ok(())
}
