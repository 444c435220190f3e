use crate::cli::render;
use crate::error::Result;
use crate::session::Session;
use crate::settings::db_path;

pub fn run(account_code: &str) -> Result<()> {
    let mut session = Session::open(&db_path())?;
    let rows = session.drill_down_by_account(account_code)?;

    if rows.is_empty() {
        println!("No journal rows for account {account_code}.");
        return Ok(());
    }
    println!("{}", render::journal_table(rows));
    println!("{} journal rows for account {account_code}", rows.len());
    Ok(())
}
