use anyhow::{bail, Result};
use std::path::PathBuf;

use dbspace::{SpaceAnalyzer, SpaceReport, StatSource};

use crate::util::open_ro;

pub fn exec(path: PathBuf, name: Option<String>, json: bool) -> Result<()> {
    let (conn, id) = open_ro(&path)?;
    let mut analyzer = SpaceAnalyzer::new();

    let folded = match &name {
        Some(n) => match analyzer.obj_report(&id, &conn, n)? {
            Some(obj) => obj,
            None => bail!("no table or index named {:?} in {}", n, path.display()),
        },
        None => analyzer.all_report(&id, &conn)?,
    };

    let page_size = conn.page_size()?;
    let file_pgcnt = conn.page_count()?;
    let report = SpaceReport::new(&folded, page_size, file_pgcnt);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match &name {
        Some(n) => println!("Report for {} ({})", n, path.display()),
        None => println!("Report for all tables and indexes ({})", path.display()),
    }
    println!("  entries            = {}", report.nentry);
    println!(
        "  total_pages        = {} ({:.2}% of file)",
        report.total_pages, report.total_pages_percent
    );
    println!("  storage_bytes      = {}", report.storage);
    if let Some(c) = report.compressed_size {
        println!("  compressed_bytes   = {}", c);
    }
    println!(
        "  payload_bytes      = {} ({:.2}%)",
        report.payload, report.payload_percent
    );
    println!("  unused_bytes       = {}", report.total_unused);
    println!("  metadata_bytes     = {}", report.total_meta);
    println!("  avg_payload        = {:.2}", report.avg_payload);
    println!("  avg_unused         = {:.2}", report.avg_unused);
    println!("  avg_meta           = {:.2}", report.avg_meta);
    println!("  max_payload        = {}", report.mx_payload);
    if let Some(frag) = report.fragmentation {
        println!("  fragmentation      = {:.2}%", frag);
    }
    println!(
        "  overflow_chains    = {} ({:.2}% of entries)",
        report.ovfl_cnt, report.ovfl_cnt_percent
    );
    println!(
        "  pages int/leaf/ovfl= {}/{}/{}",
        report.int_pages, report.leaf_pages, report.ovfl_pages
    );
    if let Some(p) = report.int_unused_percent {
        println!("  int_unused         = {:.2}%", p);
    }
    if let Some(p) = report.leaf_unused_percent {
        println!("  leaf_unused        = {:.2}%", p);
    }
    if let Some(p) = report.ovfl_unused_percent {
        println!("  ovfl_unused        = {:.2}%", p);
    }
    if let Some(d) = report.depth {
        println!("  btree_depth        = {}", d);
    }
    Ok(())
}
