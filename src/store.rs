use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rusqlite::{params_from_iter, Connection};

use crate::db::{ensure_indexes, get_connection, init_db, table_exists};
use crate::error::{AuditError, Result};
use crate::models::{BalanceEntry, Columnar, LedgerEntry, TableRecord};

/// Indexed on-disk store for the two audit tables. Row order is insertion
/// order (rowid), which makes paging deterministic.
///
/// The `write_gate` serializes `replace_table` against long-running reads
/// from other connections on the same file — the background validator takes
/// the same gate before aggregating.
#[derive(Debug)]
pub struct Store {
    conn: Connection,
    path: PathBuf,
    write_gate: Arc<Mutex<()>>,
}

impl Store {
    /// Open (or create) the working database and make sure the schema and
    /// per-column indexes exist.
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = get_connection(db_path)?;
        init_db(&conn)?;
        Ok(Self {
            conn,
            path: db_path.to_path_buf(),
            write_gate: Arc::new(Mutex::new(())),
        })
    }

    /// Attach an external, pre-populated snapshot. Both tables must already
    /// exist; missing per-column indexes are rebuilt.
    pub fn open_snapshot(db_path: &Path) -> Result<Self> {
        let conn = get_connection(db_path)?;
        for table in [LedgerEntry::TABLE, BalanceEntry::TABLE] {
            if !table_exists(&conn, table)? {
                return Err(AuditError::MissingTable(table.to_string()));
            }
        }
        ensure_indexes(&conn, LedgerEntry::TABLE, LedgerEntry::columns())?;
        ensure_indexes(&conn, BalanceEntry::TABLE, BalanceEntry::columns())?;
        Ok(Self {
            conn,
            path: db_path.to_path_buf(),
            write_gate: Arc::new(Mutex::new(())),
        })
    }

    /// Second connection to the same database, sharing the write gate. Used
    /// by the background validator so the main connection stays free.
    pub fn reopen(&self) -> Result<Self> {
        Ok(Self {
            conn: get_connection(&self.path)?,
            path: self.path.clone(),
            write_gate: Arc::clone(&self.write_gate),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Swap all rows of `T`'s table. All-or-nothing: on failure the previous
    /// contents are left intact.
    pub fn replace_table<T: TableRecord>(&mut self, rows: &[T]) -> Result<()> {
        let _gate = self.write_gate.lock().unwrap();
        let tx = self.conn.transaction()?;
        {
            tx.execute(&format!("DELETE FROM {}", T::TABLE), [])?;
            let placeholders = (1..=T::columns().len())
                .map(|i| format!("?{i}"))
                .collect::<Vec<_>>()
                .join(", ");
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {} ({}) VALUES ({})",
                T::TABLE,
                T::columns().join(", "),
                placeholders
            ))?;
            for row in rows {
                stmt.execute(params_from_iter(row.values()))?;
            }
        }
        tx.commit()?;
        ensure_indexes(&self.conn, T::TABLE, T::columns())?;
        Ok(())
    }

    /// Rows in insertion order, `limit = None` for the whole table. An
    /// offset past the end yields an empty page, not an error.
    pub fn page<T: TableRecord>(&self, limit: Option<usize>, offset: usize) -> Result<Vec<T>> {
        let limit = limit.map(|n| n as i64).unwrap_or(-1);
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM {} ORDER BY rowid LIMIT ?1 OFFSET ?2",
            T::columns().join(", "),
            T::TABLE
        ))?;
        let rows = stmt
            .query_map(rusqlite::params![limit, offset as i64], T::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn count<T: TableRecord>(&self) -> Result<i64> {
        let n = self
            .conn
            .query_row(&format!("SELECT count(*) FROM {}", T::TABLE), [], |r| {
                r.get(0)
            })?;
        Ok(n)
    }

    /// All rows whose `column` equals `value` exactly.
    pub fn filter_equals<T: TableRecord>(&self, column: &str, value: &str) -> Result<Vec<T>> {
        let column = checked_column::<T>(column)?;
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM {} WHERE {} = ?1 ORDER BY rowid",
            T::columns().join(", "),
            T::TABLE,
            column
        ))?;
        let rows = stmt
            .query_map([value], T::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// All rows whose `column` contains `needle`, case-insensitively.
    pub fn filter_contains<T: TableRecord>(&self, column: &str, needle: &str) -> Result<Vec<T>> {
        let column = checked_column::<T>(column)?;
        let pattern = format!("%{}%", escape_like(needle));
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM {} WHERE {} LIKE ?1 ESCAPE '\\' ORDER BY rowid",
            T::columns().join(", "),
            T::TABLE,
            column
        ))?;
        let rows = stmt
            .query_map([pattern], T::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Journal rows for one voucher key: exact match on both fields.
    pub fn voucher_rows(&self, voucher_id: &str, date: &str) -> Result<Vec<LedgerEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM {} WHERE voucher_id = ?1 AND date = ?2 ORDER BY rowid",
            LedgerEntry::columns().join(", "),
            LedgerEntry::TABLE
        ))?;
        let rows = stmt
            .query_map([voucher_id, date], LedgerEntry::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Per-group sums of the requested numeric columns. NULL cells count as
    /// 0, and so does a group key with no rows on the caller's side. Takes
    /// the write gate so a concurrent `replace_table` cannot interleave.
    pub fn aggregate_sum<T: TableRecord>(
        &self,
        group_by: &str,
        sum_columns: &[&str],
    ) -> Result<HashMap<String, Vec<f64>>> {
        let group_by = checked_column::<T>(group_by)?;
        let sums = sum_columns
            .iter()
            .map(|c| checked_column::<T>(c).map(|c| format!("SUM(COALESCE({c}, 0))")))
            .collect::<Result<Vec<_>>>()?
            .join(", ");

        let _gate = self.write_gate.lock().unwrap();
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {group_by}, {sums} FROM {} GROUP BY {group_by}",
            T::TABLE
        ))?;
        let mut out = HashMap::new();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let key: Option<String> = row.get(0)?;
            let mut totals = Vec::with_capacity(sum_columns.len());
            for i in 0..sum_columns.len() {
                totals.push(row.get::<_, f64>(i + 1)?);
            }
            out.insert(key.unwrap_or_default(), totals);
        }
        Ok(out)
    }

    pub fn require_table(&self, table: &str) -> Result<()> {
        if table_exists(&self.conn, table)? {
            Ok(())
        } else {
            Err(AuditError::MissingTable(table.to_string()))
        }
    }

    /// Online backup of the whole database to `dest`.
    pub fn backup_to(&self, dest: &Path) -> Result<()> {
        let mut dest_conn = Connection::open(dest)?;
        let backup = rusqlite::backup::Backup::new(&self.conn, &mut dest_conn)?;
        backup.run_to_completion(100, std::time::Duration::from_millis(10), None)?;
        Ok(())
    }
}

fn checked_column<T: TableRecord>(column: &str) -> Result<&'static str> {
    match T::columns().iter().copied().find(|c| *c == column) {
        Some(c) => Ok(c),
        None => Err(AuditError::UnknownColumn {
            table: T::TABLE.to_string(),
            column: column.to_string(),
        }),
    }
}

fn escape_like(needle: &str) -> String {
    needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
