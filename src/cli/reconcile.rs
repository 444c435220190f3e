use colored::Colorize;

use crate::error::Result;
use crate::reconciler::ReconcileOutcome;
use crate::session::Session;
use crate::settings::db_path;

pub fn run() -> Result<()> {
    let session = Session::open(&db_path())?;

    // The validator runs on its own thread with its own connection; here we
    // just wait for the outcome message.
    let rx = session.reconcile_in_background()?;
    match rx.recv() {
        Ok(ReconcileOutcome::Reconciled) => {
            println!("{}", "Balance table and journal reconcile.".green());
        }
        Ok(ReconcileOutcome::Discrepancies(report)) => {
            println!(
                "{}",
                format!("{} account(s) do not reconcile:", report.len()).red()
            );
            for d in &report {
                println!("  {d}");
            }
        }
        Ok(ReconcileOutcome::Failed(msg)) => {
            println!("{} {msg}", "Reconciliation failed:".red());
        }
        Err(_) => {
            println!("{}", "Reconciliation worker went away.".red());
        }
    }
    Ok(())
}
