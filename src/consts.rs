//! Shared constants (SQL text, SQLite format figures, report heuristics).

// -------- SQLite format figures --------

/// Bytes occupied by one pointer-map entry under auto-vacuum.
pub const PTRMAP_ENTRY_BYTES: i64 = 5;

/// Bytes of the next-page pointer stored in every overflow page.
pub const OVFL_PTR_BYTES: i64 = 4;

/// Name of the schema table itself (gets a synthetic per-object entry).
pub const SQLITE_SCHEMA: &str = "sqlite_schema";

// -------- Report heuristics --------

/// Assumed per-page bookkeeping overhead of a hypothetical compressed backing
/// store. Speculative: the figure is not verified against any particular
/// compressed VFS and only affects the optional "compressed size" line of a
/// report.
pub const COMPRESSED_PAGE_OVERHEAD: i64 = 14;

// -------- SQL --------

/// Per-object aggregation over the dbstat virtual table.
///
/// Every summed column may come back NULL when dbstat produces no rows for
/// `name` (empty object); readers treat NULL as 0.
pub const OBJ_SPACE_SQL: &str = "\
SELECT sum(ncell) AS nentry,
       sum((pagetype=='leaf')*ncell) AS leaf_entries,
       sum(payload) AS payload,
       sum((pagetype=='overflow')*payload) AS ovfl_payload,
       sum(path LIKE '%+000000') AS ovfl_cnt,
       max(mx_payload) AS mx_payload,
       sum(pagetype=='internal') AS int_pages,
       sum(pagetype=='leaf') AS leaf_pages,
       sum(pagetype=='overflow') AS ovfl_pages,
       sum((pagetype=='internal')*unused) AS int_unused,
       sum((pagetype=='leaf')*unused) AS leaf_unused,
       sum((pagetype=='overflow')*unused) AS ovfl_unused,
       sum(pgsize) AS compressed_size,
       max((length(CASE WHEN path LIKE '%+%' THEN '' ELSE path END)+3)/4) AS depth
FROM temp.dbstat WHERE name = :name";

/// Materializes the dbstat module in the temp schema so OBJ_SPACE_SQL can
/// reference it as `temp.dbstat` (same trick sqlite3_analyzer uses).
pub const DBSTAT_VTAB_SQL: &str =
    "CREATE VIRTUAL TABLE IF NOT EXISTS temp.dbstat USING dbstat(main)";

/// Schema objects that own b-tree pages (views/triggers have rootpage 0).
pub const SCHEMA_OBJECTS_SQL: &str =
    "SELECT type, name, tbl_name, rootpage, sql FROM sqlite_schema WHERE rootpage > 0 ORDER BY name";

/// Object counts for the whole-file summary.
pub const SCHEMA_COUNTS_SQL: &str = "\
SELECT sum(type = 'table') AS ntable,
       sum(type = 'index') AS nindex,
       sum(name LIKE 'sqlite_autoindex_%') AS nautoindex
FROM sqlite_schema";
