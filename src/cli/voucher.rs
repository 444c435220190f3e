use colored::Colorize;

use crate::cli::render;
use crate::error::Result;
use crate::fmt::amount;
use crate::session::Session;
use crate::settings::db_path;

pub fn run(voucher_id: &str, date: &str) -> Result<()> {
    let mut session = Session::open(&db_path())?;
    let view = session.build_voucher(voucher_id, date)?;

    println!("{}", render::voucher_table(&view.rows));
    if view.imbalanced {
        println!(
            "{} debit {} vs credit {}",
            "Voucher does not balance:".red().bold(),
            amount(view.total_debit),
            amount(view.total_credit)
        );
    } else {
        println!("{}", "Voucher balances.".green());
    }
    Ok(())
}
