//! Value types produced by the analyzer.
//!
//! All of these are plain owned values: constructed fresh per query,
//! aggregated by folding, cloned out of the cache, never shared mutably.

use serde::Serialize;

/// Per-schema-object space statistics, one b-tree (plus its overflow chains)
/// per instance. Also serves as the accumulator of [`ObjSpaceUsed::fold`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ObjSpaceUsed {
    /// Object name ("sqlite_schema" for the synthetic schema-table entry).
    pub name: String,
    /// Owning table; equals `name` for a table itself.
    pub tbl_name: String,
    pub is_index: bool,
    pub is_without_rowid: bool,

    /// Cells across all page types. Row count for indexes and WITHOUT ROWID
    /// tables; an overcount for ordinary rowid tables (see `leaf_entries`).
    pub nentry: i64,
    /// Cells on leaf pages only. Row count for ordinary rowid tables.
    pub leaf_entries: i64,
    pub payload: i64,
    pub ovfl_payload: i64,
    /// Number of overflow chains (first overflow page of each chain).
    pub ovfl_cnt: i64,
    pub mx_payload: i64,
    pub int_pages: i64,
    pub leaf_pages: i64,
    pub ovfl_pages: i64,
    pub int_unused: i64,
    pub leaf_unused: i64,
    pub ovfl_unused: i64,
    /// sum(pgsize) over dbstat rows; differs from page-count * page_size only
    /// on a compressed backing store.
    pub compressed_size: i64,
    pub depth: i64,
    /// Non-sequential page transitions (fragmentation input). Not produced by
    /// the dbstat aggregation query; stays 0 unless folded from elsewhere.
    pub gap_cnt: i64,
    /// How many objects were folded into this instance.
    pub cnt: i64,
}

impl ObjSpaceUsed {
    /// Row count under the semantics of this object's kind: indexes and
    /// WITHOUT ROWID tables count every cell, rowid tables only leaf cells
    /// (interior cells are duplicated key routing, not rows).
    pub fn row_count(&self) -> i64 {
        if self.is_without_rowid || self.is_index {
            self.nentry
        } else {
            self.leaf_entries
        }
    }

    /// Total pages owned by this object.
    pub fn page_count(&self) -> i64 {
        self.int_pages + self.leaf_pages + self.ovfl_pages
    }

    /// Fold `item` into this accumulator.
    pub fn fold(&mut self, item: &ObjSpaceUsed) {
        self.nentry += item.row_count();
        self.payload += item.payload;
        self.ovfl_payload += item.ovfl_payload;
        self.ovfl_cnt += item.ovfl_cnt;
        self.mx_payload = self.mx_payload.max(item.mx_payload);
        self.int_pages += item.int_pages;
        self.leaf_pages += item.leaf_pages;
        self.ovfl_pages += item.ovfl_pages;
        self.int_unused += item.int_unused;
        self.leaf_unused += item.leaf_unused;
        self.ovfl_unused += item.ovfl_unused;
        self.compressed_size += item.compressed_size;
        self.depth = self.depth.max(item.depth);
        self.gap_cnt += item.gap_cnt;
        self.cnt += 1;
    }
}

/// Whole-file space summary.
///
/// `free_pgcnt` (residual: total minus in-use minus pointer-map) and
/// `free_pgcnt2` (authoritative: PRAGMA freelist_count) may legitimately
/// disagree; both are reported side by side, never reconciled. Likewise
/// `file_pgcnt2` is a reconciliation sum, not forced equal to `file_pgcnt`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DbSpaceUsed {
    pub page_size: i64,
    pub file_pgcnt: i64,
    pub file_bytes: i64,

    /// Pointer-map pages maintained by auto-vacuum (0 when off).
    pub av_pgcnt: i64,
    pub av_percent: f64,

    pub inuse_pgcnt: i64,
    pub inuse_percent: f64,

    pub free_pgcnt: i64,
    pub free_percent: f64,
    pub free_pgcnt2: i64,
    pub free_percent2: f64,
    pub file_pgcnt2: i64,

    pub ntable: i64,
    pub nindex: i64,
    pub nautoindex: i64,
    pub nmanindex: i64,

    /// Payload bytes of user objects (the sqlite_schema entry excluded).
    pub user_payload: i64,
    pub user_percent: f64,
}

/// One bar-chart row: pages owned by a table (or a single object) and the
/// share of the whole file they occupy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageCntEntry {
    pub name: String,
    pub page_cnt: i64,
    pub percent: f64,
}

/// One row of sqlite_schema with a b-tree behind it (rootpage > 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaObj {
    /// "table" or "index" (views/triggers are filtered out by rootpage > 0).
    pub kind: String,
    pub name: String,
    pub tbl_name: String,
    pub rootpage: i64,
    pub sql: Option<String>,
}

impl SchemaObj {
    /// An index entry names a different owning table than itself.
    pub fn is_index(&self) -> bool {
        self.name != self.tbl_name
    }

    /// WITHOUT ROWID detection via the stored CREATE TABLE text. The clause
    /// can only appear after the closing paren, so a substring match on the
    /// normalized tail is sufficient for schema SQL SQLite itself accepted.
    pub fn is_without_rowid(&self) -> bool {
        if self.kind != "table" {
            return false;
        }
        match &self.sql {
            Some(sql) => sql.to_ascii_uppercase().contains("WITHOUT ROWID"),
            None => false,
        }
    }
}

/// Object counts for the whole-file summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SchemaCounts {
    pub ntable: i64,
    pub nindex: i64,
    pub nautoindex: i64,
}
