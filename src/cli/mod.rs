pub mod backup;
pub mod browse;
pub mod demo;
pub mod drill;
pub mod export;
pub mod filter;
pub mod import;
pub mod init;
pub mod load;
pub mod reconcile;
pub mod render;
pub mod status;
pub mod voucher;

use clap::{Parser, Subcommand};

use crate::error::{AuditError, Result};

/// Split a `column=text` predicate as typed on the command line.
pub(crate) fn parse_predicate(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((column, text)) => Ok((column.trim(), text)),
        None => Err(AuditError::BadPredicate(raw.to_string())),
    }
}

#[derive(Parser)]
#[command(name = "audit", about = "Audit cross-checking CLI for journal and balance data.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up the tool: choose a data directory and create the database.
    Init {
        /// Path for audit data (default: ~/Documents/audit-inspector)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Import a CSV file into a table, replacing its contents.
    Import {
        /// Target table: journal or balance
        table: String,
        /// Path to the CSV file
        file: String,
    },
    /// Page through a table.
    Browse {
        /// Table: journal (paged) or balance (loaded in full)
        table: String,
        /// How many pages of the journal to load
        #[arg(long, default_value = "1")]
        pages: u32,
    },
    /// Apply a chain of substring filters to a view.
    Filter {
        /// View: journal or balance
        view: String,
        /// Predicates, applied in order: column=text
        #[arg(required = true)]
        predicates: Vec<String>,
        /// Undo the last N filter steps after applying the chain
        #[arg(long, default_value = "0")]
        undo: u32,
    },
    /// Cross-check the balance table against aggregated journal activity.
    Reconcile,
    /// Rebuild one voucher from its journal rows and check its balance.
    Voucher {
        /// Voucher id, e.g. JE-001
        voucher_id: String,
        /// Voucher date: YYYY-MM-DD
        #[arg(long)]
        date: String,
    },
    /// Show all journal rows for one account code.
    Drill {
        /// Account code, exact match
        account_code: String,
    },
    /// Export a full table to CSV.
    Export {
        /// Table: journal or balance
        table: String,
        /// Output file path
        output: String,
    },
    /// Switch to an external database snapshot.
    Load {
        /// Path to a .db file with journal and balance tables
        path: String,
    },
    /// Back up the working database.
    Backup {
        /// Output path (default: <data_dir>/backups/audit-YYYYMMDD-HHMMSS.db)
        #[arg(long)]
        output: Option<String>,
    },
    /// Show current database and per-table row counts.
    Status,
    /// Load a small sample dataset to explore the tool.
    Demo,
}
