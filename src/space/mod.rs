//! space — the space-analysis service.
//!
//! Orchestrates the per-object dbstat queries, aggregates them into
//! whole-file and per-table/per-index reports, applies the derived-metric
//! arithmetic and caches results per database identifier.
//!
//! Single-threaded and synchronous by design: every operation runs on the
//! caller's thread and performs blocking SQLite I/O. The analyzer is a plain
//! owned value; the only mutation discipline on its two cache maps is
//! read-or-populate on access and full-entry erase on [`SpaceAnalyzer::clear_cache`].

use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::consts::{PTRMAP_ENTRY_BYTES, SQLITE_SCHEMA};
use crate::errors::SpaceError;
use crate::model::{DbSpaceUsed, ObjSpaceUsed, PageCntEntry};
use crate::stat::StatSource;
use crate::util::percent;

pub mod report;

/// Count of pointer-map pages auto-vacuum maintains for a file of
/// `file_pgcnt` pages. One pointer-map entry is [`PTRMAP_ENTRY_BYTES`] wide
/// and page 2 is the first pointer-map page, then one group of data pages,
/// repeating; hence the fractional group size.
pub fn autovacuum_overhead(auto_vacuum: i64, file_pgcnt: i64, page_size: i64) -> i64 {
    if auto_vacuum == 0 || file_pgcnt == 1 {
        return 0;
    }
    let pages_per_group = page_size as f64 / PTRMAP_ENTRY_BYTES as f64 + 1.0;
    ((file_pgcnt - 1) as f64 / pages_per_group).ceil() as i64
}

/// Space-analysis service. Owns two caches keyed by database identifier:
/// id -> per-object list and id -> whole-file summary. Entries are created
/// lazily on first access and dropped only by [`SpaceAnalyzer::clear_cache`]
/// (view closed, schema changed); there is no partial invalidation.
#[derive(Debug, Default)]
pub struct SpaceAnalyzer {
    list_cache: HashMap<String, Vec<ObjSpaceUsed>>,
    db_cache: HashMap<String, DbSpaceUsed>,
}

impl SpaceAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whole-file summary, memoized. A second call without an intervening
    /// `clear_cache` issues zero queries against `src`.
    pub fn db_space_used(
        &mut self,
        id: &str,
        src: &impl StatSource,
    ) -> Result<DbSpaceUsed, SpaceError> {
        if let Some(cached) = self.db_cache.get(id) {
            debug!("db_space_used: cache hit for {}", id);
            return Ok(cached.clone());
        }

        let page_size = src.page_size()?;
        let file_pgcnt = src.page_count()?;
        let file_bytes = page_size * file_pgcnt;

        let av_pgcnt = autovacuum_overhead(src.auto_vacuum()?, file_pgcnt, page_size);

        let list = self.space_used_list(id, src)?;
        let inuse_pgcnt: i64 = list.iter().map(|o| o.page_count()).sum();

        // Residual free count, kept alongside the authoritative freelist
        // figure; the two may legitimately disagree and are never reconciled.
        let free_pgcnt = file_pgcnt - inuse_pgcnt - av_pgcnt;
        let free_pgcnt2 = src.freelist_count()?;
        let file_pgcnt2 = inuse_pgcnt + free_pgcnt2 + av_pgcnt;

        let counts = src.schema_counts()?;

        let user_payload: i64 = list
            .iter()
            .filter(|o| o.name != SQLITE_SCHEMA)
            .map(|o| o.payload)
            .sum();

        let du = DbSpaceUsed {
            page_size,
            file_pgcnt,
            file_bytes,
            av_pgcnt,
            av_percent: percent(av_pgcnt as f64, file_pgcnt as f64),
            inuse_pgcnt,
            inuse_percent: percent(inuse_pgcnt as f64, file_pgcnt as f64),
            free_pgcnt,
            free_percent: percent(free_pgcnt as f64, file_pgcnt as f64),
            free_pgcnt2,
            free_percent2: percent(free_pgcnt2 as f64, file_pgcnt as f64),
            file_pgcnt2,
            ntable: counts.ntable,
            nindex: counts.nindex,
            nautoindex: counts.nautoindex,
            nmanindex: counts.nindex - counts.nautoindex,
            user_payload,
            user_percent: percent(user_payload as f64, file_bytes as f64),
        };

        self.db_cache.insert(id.to_string(), du.clone());
        Ok(du)
    }

    /// Pages per owning table (indexes folded into their table), ordered by
    /// `(page_cnt desc, name asc)`.
    pub fn all_page_counts(
        &mut self,
        id: &str,
        src: &impl StatSource,
    ) -> Result<Vec<PageCntEntry>, SpaceError> {
        let list = self.space_used_list(id, src)?;
        let file_pgcnt = src.page_count()?;
        Ok(group_page_counts(&list, file_pgcnt, |o| o.tbl_name.as_str()))
    }

    /// Pages per schema object (each index on its own), ordered by
    /// `(page_cnt desc, name asc)`.
    pub fn separate_page_counts(
        &mut self,
        id: &str,
        src: &impl StatSource,
    ) -> Result<Vec<PageCntEntry>, SpaceError> {
        let list = self.space_used_list(id, src)?;
        let file_pgcnt = src.page_count()?;
        Ok(group_page_counts(&list, file_pgcnt, |o| o.name.as_str()))
    }

    /// Fold the full per-object list into one summary record.
    pub fn all_report(
        &mut self,
        id: &str,
        src: &impl StatSource,
    ) -> Result<ObjSpaceUsed, SpaceError> {
        let list = self.space_used_list(id, src)?;
        let mut total = ObjSpaceUsed::default();
        for item in &list {
            total.fold(item);
        }
        Ok(total)
    }

    /// Single-object report (cnt == 1, so depth stays meaningful). `None`
    /// when no schema object has that name.
    pub fn obj_report(
        &mut self,
        id: &str,
        src: &impl StatSource,
        name: &str,
    ) -> Result<Option<ObjSpaceUsed>, SpaceError> {
        let list = self.space_used_list(id, src)?;
        Ok(list.iter().find(|o| o.name == name).map(|item| {
            let mut one = ObjSpaceUsed {
                name: item.name.clone(),
                tbl_name: item.tbl_name.clone(),
                is_index: item.is_index,
                is_without_rowid: item.is_without_rowid,
                ..ObjSpaceUsed::default()
            };
            one.fold(item);
            one
        }))
    }

    /// Drop both cache entries for `id`; the next access recomputes from
    /// scratch. Call when the owning view closes or the schema changed.
    pub fn clear_cache(&mut self, id: &str) {
        debug!("clear_cache for {}", id);
        self.list_cache.remove(id);
        self.db_cache.remove(id);
    }

    /// Per-object statistics for every schema object with a root page, plus
    /// one synthetic entry for sqlite_schema itself. Memoized per id; aborts
    /// entirely on the first failing object (no partial lists are cached or
    /// returned).
    fn space_used_list(
        &mut self,
        id: &str,
        src: &impl StatSource,
    ) -> Result<Vec<ObjSpaceUsed>, SpaceError> {
        if let Some(cached) = self.list_cache.get(id) {
            debug!("space_used_list: cache hit for {}", id);
            return Ok(cached.clone());
        }

        let objects = src.schema_objects()?;
        let mut list = Vec::with_capacity(objects.len() + 1);
        for obj in &objects {
            let mut stats = src.obj_space_used(&obj.name)?;
            stats.name = obj.name.clone();
            stats.tbl_name = obj.tbl_name.clone();
            stats.is_index = obj.is_index();
            stats.is_without_rowid = obj.is_without_rowid();
            list.push(stats);
        }

        // The schema table has no sqlite_schema row of its own.
        let mut schema = src.obj_space_used(SQLITE_SCHEMA)?;
        schema.name = SQLITE_SCHEMA.to_string();
        schema.tbl_name = SQLITE_SCHEMA.to_string();
        list.push(schema);

        self.list_cache.insert(id.to_string(), list.clone());
        Ok(list)
    }
}

// ---------- helpers ----------

fn group_page_counts<'a, F>(
    list: &'a [ObjSpaceUsed],
    file_pgcnt: i64,
    key: F,
) -> Vec<PageCntEntry>
where
    F: Fn(&'a ObjSpaceUsed) -> &'a str,
{
    let mut groups: BTreeMap<&str, i64> = BTreeMap::new();
    for item in list {
        *groups.entry(key(item)).or_insert(0) += item.page_count();
    }

    let mut out: Vec<PageCntEntry> = groups
        .into_iter()
        .map(|(name, page_cnt)| PageCntEntry {
            name: name.to_string(),
            page_cnt,
            percent: if file_pgcnt > 0 {
                page_cnt as f64 * 100.0 / file_pgcnt as f64
            } else {
                0.0
            },
        })
        .collect();

    // One sort on the composite key; two chained unstable sorts would not
    // compose deterministically.
    out.sort_by(|a, b| b.page_cnt.cmp(&a.page_cnt).then_with(|| a.name.cmp(&b.name)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autovacuum_overhead_off_or_single_page() {
        assert_eq!(autovacuum_overhead(0, 100, 4096), 0);
        assert_eq!(autovacuum_overhead(0, 1, 512), 0);
        assert_eq!(autovacuum_overhead(1, 1, 4096), 0);
        assert_eq!(autovacuum_overhead(2, 1, 65536), 0);
    }

    #[test]
    fn autovacuum_overhead_one_ptrmap_page() {
        // ceil(99 / (4096/5 + 1)) = ceil(99 / 820.2) = 1.
        assert_eq!(autovacuum_overhead(1, 100, 4096), 1);
    }

    #[test]
    fn autovacuum_overhead_multiple_groups() {
        // 4096/5 + 1 = 820.2 pages per group; 10000 data pages need 13 maps.
        assert_eq!(autovacuum_overhead(1, 10001, 4096), 13);
        // Tiny pages, page_size 512: group = 103.4; ceil(999/103.4) = 10.
        assert_eq!(autovacuum_overhead(2, 1000, 512), 10);
    }
}
