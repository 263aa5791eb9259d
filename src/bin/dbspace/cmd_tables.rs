use anyhow::Result;
use std::path::PathBuf;

use dbspace::SpaceAnalyzer;

use crate::util::open_ro;

pub fn exec(path: PathBuf, separate: bool, json: bool) -> Result<()> {
    let (conn, id) = open_ro(&path)?;
    let mut analyzer = SpaceAnalyzer::new();
    let entries = if separate {
        analyzer.separate_page_counts(&id, &conn)?
    } else {
        analyzer.all_page_counts(&id, &conn)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("DB {}", path.display());
    for e in &entries {
        println!("  {:<32} {:>8} pages  {:>6.2}%", e.name, e.page_cnt, e.percent);
    }
    Ok(())
}
