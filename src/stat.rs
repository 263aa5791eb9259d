//! stat — the query seam between the analyzer and an open SQLite database.
//!
//! [`StatSource`] is what the space analyzer computes from: the four derived
//! PRAGMAs, the per-object dbstat aggregation and the schema enumeration.
//! The real implementation lives on `rusqlite::Connection`; tests drive the
//! analyzer with a query-counting fake instead.
//!
//! Everything here is read-only and idempotent. Failures are wrapped into
//! [`SpaceError`] with the offending SQL attached and propagate as-is; there
//! are no retries.

use log::debug;
use rusqlite::{named_params, Connection};

use crate::consts::{
    DBSTAT_VTAB_SQL, OBJ_SPACE_SQL, SCHEMA_COUNTS_SQL, SCHEMA_OBJECTS_SQL,
};
use crate::errors::SpaceError;
use crate::model::{ObjSpaceUsed, SchemaCounts, SchemaObj};

pub trait StatSource {
    /// PRAGMA page_size (0 if the pragma produced no row).
    fn page_size(&self) -> Result<i64, SpaceError>;
    /// PRAGMA page_count.
    fn page_count(&self) -> Result<i64, SpaceError>;
    /// PRAGMA auto_vacuum (0 = off).
    fn auto_vacuum(&self) -> Result<i64, SpaceError>;
    /// PRAGMA freelist_count.
    fn freelist_count(&self) -> Result<i64, SpaceError>;

    /// One dbstat aggregation pass for the named object. Identity fields
    /// (`name`, `tbl_name`, flags) are left blank; the service stamps them.
    fn obj_space_used(&self, name: &str) -> Result<ObjSpaceUsed, SpaceError>;

    /// Schema objects with rootpage > 0 (tables and indexes only).
    fn schema_objects(&self) -> Result<Vec<SchemaObj>, SpaceError>;

    /// Table/index/auto-index counts.
    fn schema_counts(&self) -> Result<SchemaCounts, SpaceError>;
}

// ---------- rusqlite implementation ----------

/// First row, first column as i64; 0 when the statement yields no row.
fn query_i64(conn: &Connection, sql: &str) -> Result<i64, SpaceError> {
    let mut stmt = conn.prepare(sql).map_err(|e| SpaceError::wrap(e, sql))?;
    let mut rows = stmt.query([]).map_err(|e| SpaceError::wrap(e, sql))?;
    match rows.next().map_err(|e| SpaceError::wrap(e, sql))? {
        Some(row) => row.get(0).map_err(|e| SpaceError::wrap(e, sql)),
        None => Ok(0),
    }
}

impl StatSource for Connection {
    fn page_size(&self) -> Result<i64, SpaceError> {
        query_i64(self, "PRAGMA page_size")
    }

    fn page_count(&self) -> Result<i64, SpaceError> {
        query_i64(self, "PRAGMA page_count")
    }

    fn auto_vacuum(&self) -> Result<i64, SpaceError> {
        query_i64(self, "PRAGMA auto_vacuum")
    }

    fn freelist_count(&self) -> Result<i64, SpaceError> {
        query_i64(self, "PRAGMA freelist_count")
    }

    fn obj_space_used(&self, name: &str) -> Result<ObjSpaceUsed, SpaceError> {
        // dbstat is eponymous but only in the main namespace; materialize it
        // in temp so the aggregation query can say `temp.dbstat`. Temp-schema
        // DDL works on read-only connections.
        self.execute_batch(DBSTAT_VTAB_SQL)
            .map_err(|e| SpaceError::wrap(e, DBSTAT_VTAB_SQL))?;

        debug!("dbstat aggregation for {:?}", name);
        let mut stmt = self
            .prepare(OBJ_SPACE_SQL)
            .map_err(|e| SpaceError::wrap(e, OBJ_SPACE_SQL))?;

        // The aggregation always yields exactly one row; every column is NULL
        // when the object owns no pages.
        stmt.query_row(named_params! {":name": name}, |row| {
            let col = |i: usize| -> rusqlite::Result<i64> {
                Ok(row.get::<_, Option<i64>>(i)?.unwrap_or(0))
            };
            Ok(ObjSpaceUsed {
                nentry: col(0)?,
                leaf_entries: col(1)?,
                payload: col(2)?,
                ovfl_payload: col(3)?,
                ovfl_cnt: col(4)?,
                mx_payload: col(5)?,
                int_pages: col(6)?,
                leaf_pages: col(7)?,
                ovfl_pages: col(8)?,
                int_unused: col(9)?,
                leaf_unused: col(10)?,
                ovfl_unused: col(11)?,
                compressed_size: col(12)?,
                depth: col(13)?,
                ..ObjSpaceUsed::default()
            })
        })
        .map_err(|e| SpaceError::wrap(e, OBJ_SPACE_SQL))
    }

    fn schema_objects(&self) -> Result<Vec<SchemaObj>, SpaceError> {
        let sql = SCHEMA_OBJECTS_SQL;
        let mut stmt = self.prepare(sql).map_err(|e| SpaceError::wrap(e, sql))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(SchemaObj {
                    kind: row.get(0)?,
                    name: row.get(1)?,
                    tbl_name: row.get(2)?,
                    rootpage: row.get(3)?,
                    sql: row.get(4)?,
                })
            })
            .map_err(|e| SpaceError::wrap(e, sql))?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row.map_err(|e| SpaceError::wrap(e, sql))?);
        }
        Ok(out)
    }

    fn schema_counts(&self) -> Result<SchemaCounts, SpaceError> {
        let sql = SCHEMA_COUNTS_SQL;
        let mut stmt = self.prepare(sql).map_err(|e| SpaceError::wrap(e, sql))?;
        stmt.query_row([], |row| {
            let col = |i: usize| -> rusqlite::Result<i64> {
                Ok(row.get::<_, Option<i64>>(i)?.unwrap_or(0))
            };
            Ok(SchemaCounts {
                ntable: col(0)?,
                nindex: col(1)?,
                nautoindex: col(2)?,
            })
        })
        .map_err(|e| SpaceError::wrap(e, sql))
    }
}
