use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;
use crate::models::{BalanceEntry, Columnar, LedgerEntry, TableRecord};

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS journal (
    date TEXT NOT NULL DEFAULT '',
    voucher_id TEXT NOT NULL DEFAULT '',
    account_code TEXT NOT NULL DEFAULT '',
    account_name TEXT NOT NULL DEFAULT '',
    aux_dimension TEXT NOT NULL DEFAULT '',
    memo TEXT NOT NULL DEFAULT '',
    debit REAL NOT NULL DEFAULT 0,
    credit REAL NOT NULL DEFAULT 0,
    quantity REAL,
    foreign_amount REAL
);

CREATE TABLE IF NOT EXISTS balance (
    account_code TEXT NOT NULL DEFAULT '',
    account_name TEXT NOT NULL DEFAULT '',
    opening_debit REAL NOT NULL DEFAULT 0,
    opening_credit REAL NOT NULL DEFAULT 0,
    period_debit REAL NOT NULL DEFAULT 0,
    period_credit REAL NOT NULL DEFAULT 0,
    closing_debit REAL NOT NULL DEFAULT 0,
    closing_credit REAL NOT NULL DEFAULT 0
);
";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    ensure_indexes(conn, LedgerEntry::TABLE, LedgerEntry::columns())?;
    ensure_indexes(conn, BalanceEntry::TABLE, BalanceEntry::columns())?;
    Ok(())
}

/// Every column carries a supporting index so equality lookups prune without
/// a table scan. Substring filters still scan, but only the first filter in a
/// chain hits the store at all.
pub fn ensure_indexes(conn: &Connection, table: &str, columns: &[&str]) -> Result<()> {
    for col in columns {
        conn.execute(
            &format!("CREATE INDEX IF NOT EXISTS idx_{table}_{col} ON {table} ({col})"),
            [],
        )?;
    }
    Ok(())
}

pub fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")?;
    Ok(stmt.exists([table])?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    #[test]
    fn test_init_db_creates_tables() {
        let (_dir, conn) = test_db();
        assert!(table_exists(&conn, "journal").unwrap());
        assert!(table_exists(&conn, "balance").unwrap());
        assert!(!table_exists(&conn, "voucher").unwrap());
    }

    #[test]
    fn test_init_db_is_idempotent() {
        let (_dir, conn) = test_db();
        init_db(&conn).unwrap();
    }

    #[test]
    fn test_init_db_indexes_every_column() {
        let (_dir, conn) = test_db();
        let count: i64 = conn
            .query_row(
                "SELECT count(*) FROM sqlite_master WHERE type = 'index' AND name LIKE 'idx_%'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(count, 18, "expected one index per column of each table");
    }
}
