use std::fmt;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use crate::error::Result;
use crate::models::{BalanceEntry, LedgerEntry, TableRecord};
use crate::store::Store;

/// Aggregated journal activity may differ from the balance table by float
/// noise; anything beyond this is a real discrepancy.
pub const TOLERANCE: f64 = 1e-3;

#[derive(Debug, Clone, PartialEq)]
pub struct Discrepancy {
    pub account_code: String,
    pub account_name: String,
    pub amount: f64,
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "account {} ({}): off by {:.2}",
            self.account_code, self.account_name, self.amount
        )
    }
}

/// Cross-check the balance table against per-account journal totals.
/// An empty result means the books reconcile.
pub fn run(store: &Store) -> Result<Vec<Discrepancy>> {
    store.require_table(LedgerEntry::TABLE)?;
    store.require_table(BalanceEntry::TABLE)?;

    let journal_totals =
        store.aggregate_sum::<LedgerEntry>("account_code", &["debit", "credit"])?;
    let balances: Vec<BalanceEntry> = store.page(None, 0)?;

    let mut discrepancies = Vec::new();
    for b in balances {
        // Accounts with no journal activity aggregate to (0, 0).
        let (journal_debit, journal_credit) = journal_totals
            .get(&b.account_code)
            .map(|sums| (sums[0], sums[1]))
            .unwrap_or((0.0, 0.0));
        let amount =
            (b.period_debit - journal_debit) + (b.period_credit - journal_credit);
        if amount.abs() > TOLERANCE {
            discrepancies.push(Discrepancy {
                account_code: b.account_code,
                account_name: b.account_name,
                amount,
            });
        }
    }
    Ok(discrepancies)
}

/// What the background validator reports back. Failure travels over the same
/// channel as success; the worker never touches caller state.
#[derive(Debug)]
pub enum ReconcileOutcome {
    Reconciled,
    Discrepancies(Vec<Discrepancy>),
    Failed(String),
}

/// Run the validator on a worker thread against its own connection. The
/// worker only reads, so it is safe to abandon; the shared write gate keeps
/// `replace_table` from interleaving with the aggregate.
pub fn spawn(store: &Store) -> Result<Receiver<ReconcileOutcome>> {
    let worker_store = store.reopen()?;
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let outcome = match run(&worker_store) {
            Ok(d) if d.is_empty() => ReconcileOutcome::Reconciled,
            Ok(d) => ReconcileOutcome::Discrepancies(d),
            Err(e) => ReconcileOutcome::Failed(e.to_string()),
        };
        // Receiver may be gone if the host shut down; nothing to do then.
        let _ = tx.send(outcome);
    });
    Ok(rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(&dir.path().join("test.db")).unwrap();
        (dir, store)
    }

    fn journal_row(code: &str, debit: f64, credit: f64) -> LedgerEntry {
        LedgerEntry {
            date: "2024-03-01".to_string(),
            voucher_id: "JE-001".to_string(),
            account_code: code.to_string(),
            account_name: format!("Account {code}"),
            debit,
            credit,
            ..Default::default()
        }
    }

    fn balance_row(code: &str, period_debit: f64, period_credit: f64) -> BalanceEntry {
        BalanceEntry {
            account_code: code.to_string(),
            account_name: format!("Account {code}"),
            period_debit,
            period_credit,
            ..Default::default()
        }
    }

    #[test]
    fn test_matching_books_reconcile() {
        let (_dir, mut store) = test_store();
        store
            .replace_table(&[
                journal_row("6001", 600.0, 0.0),
                journal_row("6001", 400.0, 1000.0),
            ])
            .unwrap();
        store
            .replace_table(&[balance_row("6001", 1000.0, 1000.0)])
            .unwrap();

        assert!(run(&store).unwrap().is_empty());
    }

    #[test]
    fn test_off_by_one_is_reported() {
        let (_dir, mut store) = test_store();
        store
            .replace_table(&[journal_row("6001", 1000.0, 1000.0)])
            .unwrap();
        store
            .replace_table(&[balance_row("6001", 1001.0, 1000.0)])
            .unwrap();

        let report = run(&store).unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].account_code, "6001");
        assert!((report[0].amount - 1.0).abs() < 1e-9);
        assert_eq!(format!("{:.2}", report[0].amount), "1.00");
    }

    #[test]
    fn test_balance_account_missing_from_journal_defaults_to_zero() {
        let (_dir, mut store) = test_store();
        store
            .replace_table(&[journal_row("6001", 1000.0, 0.0)])
            .unwrap();
        store
            .replace_table(&[
                balance_row("6001", 1000.0, 0.0),
                balance_row("9999", 250.0, 0.0),
            ])
            .unwrap();

        let report = run(&store).unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].account_code, "9999");
        assert!((report[0].amount - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_float_noise_below_tolerance_is_ignored() {
        let (_dir, mut store) = test_store();
        store
            .replace_table(&[journal_row("6001", 1000.0, 0.0)])
            .unwrap();
        store
            .replace_table(&[balance_row("6001", 1000.0005, 0.0)])
            .unwrap();

        assert!(run(&store).unwrap().is_empty());
    }

    #[test]
    fn test_background_run_reports_over_channel() {
        let (_dir, mut store) = test_store();
        store
            .replace_table(&[journal_row("6001", 1000.0, 1000.0)])
            .unwrap();
        store
            .replace_table(&[balance_row("6001", 1001.0, 1000.0)])
            .unwrap();

        let rx = spawn(&store).unwrap();
        match rx.recv().unwrap() {
            ReconcileOutcome::Discrepancies(d) => {
                assert_eq!(d.len(), 1);
                assert_eq!(d[0].account_code, "6001");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_background_run_reconciled_outcome() {
        let (_dir, mut store) = test_store();
        store
            .replace_table(&[journal_row("6001", 1000.0, 1000.0)])
            .unwrap();
        store
            .replace_table(&[balance_row("6001", 1000.0, 1000.0)])
            .unwrap();

        let rx = spawn(&store).unwrap();
        assert!(matches!(rx.recv().unwrap(), ReconcileOutcome::Reconciled));
    }
}
