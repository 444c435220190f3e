use std::path::Path;

use colored::Colorize;

use crate::error::{AuditError, Result};
use crate::importer;
use crate::session::{Session, View};
use crate::settings::db_path;

pub fn run(table: &str, file: &str) -> Result<()> {
    let view: View = table.parse()?;
    let mut session = Session::open(&db_path())?;

    let total = match view {
        View::Journal => {
            let rows = importer::read_journal_csv(Path::new(file))?;
            let total = rows.len();
            session.replace_journal(&rows)?;
            total
        }
        View::Balance => {
            let rows = importer::read_balance_csv(Path::new(file))?;
            let total = rows.len();
            session.replace_balance(&rows)?;
            total
        }
        View::Voucher => return Err(AuditError::UnknownTable(table.to_string())),
    };

    println!(
        "{} {total} rows into {}",
        "Imported".green(),
        view.name()
    );
    Ok(())
}
