//! Presentation-facing derived metrics.
//!
//! [`SpaceReport`] performs the arithmetic a display layer renders verbatim,
//! on top of a folded [`ObjSpaceUsed`]. The formulas mirror what
//! sqlite3_analyzer prints for a table/index group and have to stay
//! bit-for-bit stable; optional fields are `None` exactly when the
//! corresponding line would be suppressed.

use serde::Serialize;

use crate::consts::{COMPRESSED_PAGE_OVERHEAD, OVFL_PTR_BYTES};
use crate::model::ObjSpaceUsed;
use crate::util::percent;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpaceReport {
    /// Entries under the per-kind row-count semantics of the folded objects.
    pub nentry: i64,

    pub total_pages: i64,
    pub total_pages_percent: f64,
    /// Bytes of file space the pages occupy (total_pages * page_size).
    pub storage: i64,

    /// Hypothetical compressed size including the per-page overhead
    /// heuristic; `None` when the backing store does not compress
    /// (dbstat pgsize sum equals the raw storage).
    pub compressed_size: Option<i64>,

    pub payload: i64,
    pub payload_percent: f64,

    pub total_unused: i64,
    /// Bytes of b-tree metadata: storage minus payload minus unused, plus
    /// the next-page pointer of every overflow page beyond the first of each
    /// chain.
    pub total_meta: i64,

    pub avg_payload: f64,
    pub avg_unused: f64,
    pub avg_meta: f64,

    pub mx_payload: i64,

    /// percent(gap_cnt, total_pages - 1); `None` for single-page objects.
    pub fragmentation: Option<f64>,

    pub ovfl_cnt: i64,
    pub ovfl_cnt_percent: f64,

    pub int_pages: i64,
    pub leaf_pages: i64,
    pub ovfl_pages: i64,
    pub int_unused_percent: Option<f64>,
    pub leaf_unused_percent: Option<f64>,
    pub ovfl_unused_percent: Option<f64>,

    /// B-tree depth; only meaningful (Some) when exactly one object was
    /// folded into the report.
    pub depth: Option<i64>,
}

impl SpaceReport {
    pub fn new(obj: &ObjSpaceUsed, page_size: i64, file_pgcnt: i64) -> Self {
        let total_pages = obj.page_count();
        let storage = total_pages * page_size;

        // Compression heuristic: when the pgsize sum is below raw storage the
        // backing store compresses pages, and a real compressed store would
        // pay some bookkeeping per page on top.
        let mut compressed = obj.compressed_size;
        if storage > compressed {
            compressed += COMPRESSED_PAGE_OVERHEAD * total_pages;
        }
        let compressed_size = (compressed != storage).then_some(compressed);

        let total_unused = obj.ovfl_unused + obj.int_unused + obj.leaf_unused;
        let total_meta = storage - obj.payload - total_unused
            + OVFL_PTR_BYTES * (obj.ovfl_pages - obj.ovfl_cnt);

        // Averages over an empty object are reported as 0 rather than
        // dividing by zero (deliberate deviation, see DESIGN.md).
        let avg = |v: i64| {
            if obj.nentry > 0 {
                v as f64 / obj.nentry as f64
            } else {
                0.0
            }
        };

        let fragmentation = (total_pages > 1)
            .then(|| percent(obj.gap_cnt as f64, (total_pages - 1) as f64));

        let cat_percent = |unused: i64, pages: i64| {
            (pages > 0).then(|| percent(unused as f64, (pages * page_size) as f64))
        };

        Self {
            nentry: obj.nentry,
            total_pages,
            total_pages_percent: percent(total_pages as f64, file_pgcnt as f64),
            storage,
            compressed_size,
            payload: obj.payload,
            payload_percent: percent(obj.payload as f64, storage as f64),
            total_unused,
            total_meta,
            avg_payload: avg(obj.payload),
            avg_unused: avg(total_unused),
            avg_meta: avg(total_meta),
            mx_payload: obj.mx_payload,
            fragmentation,
            ovfl_cnt: obj.ovfl_cnt,
            ovfl_cnt_percent: percent(obj.ovfl_cnt as f64, obj.nentry as f64),
            int_pages: obj.int_pages,
            leaf_pages: obj.leaf_pages,
            ovfl_pages: obj.ovfl_pages,
            int_unused_percent: cat_percent(obj.int_unused, obj.int_pages),
            leaf_unused_percent: cat_percent(obj.leaf_unused, obj.leaf_pages),
            ovfl_unused_percent: cat_percent(obj.ovfl_unused, obj.ovfl_pages),
            depth: (obj.cnt == 1).then_some(obj.depth),
        }
    }
}
