use colored::Colorize;

use crate::cli::{parse_predicate, render};
use crate::error::{AuditError, Result};
use crate::session::{Session, View};
use crate::settings::db_path;

/// Apply a filter chain — the first predicate queries the store, the rest
/// narrow in memory — then optionally undo the last few steps.
pub fn run(view: &str, predicates: &[String], undo: u32) -> Result<()> {
    let view: View = view.parse()?;
    if view == View::Voucher {
        return Err(AuditError::UnknownTable(
            "voucher (build one with `audit voucher` first)".to_string(),
        ));
    }
    let mut session = Session::open(&db_path())?;

    for raw in predicates {
        let (column, text) = parse_predicate(raw)?;
        let count = session.apply_filter(view, column, text)?;
        println!("{} {column}={text}: {count} rows", "filter".cyan());
    }
    for _ in 0..undo {
        let count = session.undo_filter(view)?;
        println!("{}: back to {count} rows", "undo".yellow());
    }

    match view {
        View::Journal => println!("{}", render::journal_table(session.journal_rows())),
        View::Balance => println!("{}", render::balance_table(session.balance_rows())),
        View::Voucher => unreachable!(),
    }
    Ok(())
}
