//! dbspace — point-in-time, read-only space-usage analysis for SQLite files.
//!
//! Reproduces the computation of SQLite's reference sqlite3_analyzer tool on
//! top of the `dbstat` virtual table and derived PRAGMAs: per table/index and
//! for the whole file, pages in use, payload vs. overhead vs. free space,
//! auto-vacuum bookkeeping cost and fragmentation. The analyzer consumes
//! dbstat's already-computed rows; it never reads raw page bytes and never
//! mutates the database.

// Base modules
pub mod consts;
pub mod errors;
pub mod util;

// Data model and the query seam
pub mod model;
pub mod stat;   // src/stat.rs — StatSource trait + rusqlite implementation

// The analysis service (aggregation, derived metrics, per-db cache)
pub mod space;  // src/space/{mod,report}.rs

// Convenience re-exports
pub use errors::SpaceError;
pub use model::{DbSpaceUsed, ObjSpaceUsed, PageCntEntry, SchemaCounts, SchemaObj};
pub use space::report::SpaceReport;
pub use space::{autovacuum_overhead, SpaceAnalyzer};
pub use stat::StatSource;
pub use util::percent;
