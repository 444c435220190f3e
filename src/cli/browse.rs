use crate::cli::render;
use crate::error::{AuditError, Result};
use crate::session::{Session, View};
use crate::settings::db_path;

pub fn run(table: &str, pages: u32) -> Result<()> {
    let view: View = table.parse()?;
    let mut session = Session::open(&db_path())?;

    match view {
        View::Journal => {
            for _ in 0..pages {
                session.load_page(View::Journal)?;
            }
            let rows = session.journal_rows();
            println!("{}", render::journal_table(rows));
            let total = session.store().count::<crate::models::LedgerEntry>()?;
            println!("{} of {total} journal rows loaded", rows.len());
        }
        View::Balance => {
            session.load_page(View::Balance)?;
            let rows = session.balance_rows();
            println!("{}", render::balance_table(rows));
            println!("{} balance rows", rows.len());
        }
        View::Voucher => return Err(AuditError::UnknownTable(table.to_string())),
    }
    Ok(())
}
