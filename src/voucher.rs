use crate::error::{AuditError, Result};
use crate::models::{LedgerEntry, VoucherRow};
use crate::store::Store;

/// Debit/credit totals further apart than this flag the voucher as
/// imbalanced.
pub const BALANCE_TOLERANCE: f64 = 1e-6;

pub const TOTAL_MEMO: &str = "TOTAL";

/// A voucher bundle reconstructed from the journal: the member rows plus one
/// synthesized total row at the end. Imbalance is reported, never fatal —
/// the auditor wants to see the broken voucher, not an error box.
#[derive(Debug, Clone, Default)]
pub struct VoucherView {
    pub rows: Vec<VoucherRow>,
    pub total_debit: f64,
    pub total_credit: f64,
    pub imbalanced: bool,
}

/// Rebuild the voucher identified by `(voucher_id, date)` from its journal
/// rows. Both fields match exactly.
pub fn build(store: &Store, voucher_id: &str, date: &str) -> Result<VoucherView> {
    let entries = store.voucher_rows(voucher_id, date)?;
    if entries.is_empty() {
        return Err(AuditError::VoucherNotFound {
            voucher_id: voucher_id.to_string(),
            date: date.to_string(),
        });
    }

    let total_debit: f64 = entries.iter().map(|e| e.debit).sum();
    let total_credit: f64 = entries.iter().map(|e| e.credit).sum();

    let mut rows: Vec<VoucherRow> = entries.iter().map(voucher_row).collect();
    rows.push(VoucherRow {
        memo: TOTAL_MEMO.to_string(),
        debit: Some(total_debit),
        credit: Some(total_credit),
        ..Default::default()
    });

    Ok(VoucherView {
        rows,
        total_debit,
        total_credit,
        imbalanced: (total_debit - total_credit).abs() > BALANCE_TOLERANCE,
    })
}

/// All journal rows for one account code, exact match. No rows is a valid,
/// empty result.
pub fn drill_down(store: &Store, account_code: &str) -> Result<Vec<LedgerEntry>> {
    store.filter_equals("account_code", account_code)
}

fn voucher_row(entry: &LedgerEntry) -> VoucherRow {
    let account_name = if entry.aux_dimension.trim().is_empty() {
        entry.account_name.clone()
    } else {
        format!("{}【{}】", entry.account_name, entry.aux_dimension.trim())
    };
    VoucherRow {
        date: entry.date.clone(),
        voucher_id: entry.voucher_id.clone(),
        memo: entry.memo.clone(),
        account_name,
        debit: blank_zero(entry.debit),
        credit: blank_zero(entry.credit),
        quantity: entry.quantity.and_then(blank_zero),
        foreign_amount: entry.foreign_amount.and_then(blank_zero),
    }
}

// An exact 0 and an absent entry present identically as a blank cell.
fn blank_zero(v: f64) -> Option<f64> {
    if v == 0.0 {
        None
    } else {
        Some(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(&dir.path().join("test.db")).unwrap();
        (dir, store)
    }

    fn entry(debit: f64, credit: f64, aux: &str) -> LedgerEntry {
        LedgerEntry {
            date: "2024-03-01".to_string(),
            voucher_id: "JE-001".to_string(),
            account_code: "6001".to_string(),
            account_name: "Rent Expense".to_string(),
            aux_dimension: aux.to_string(),
            memo: "march rent".to_string(),
            debit,
            credit,
            ..Default::default()
        }
    }

    #[test]
    fn test_balanced_voucher() {
        let (_dir, mut store) = test_store();
        store
            .replace_table(&[entry(500.0, 0.0, ""), entry(0.0, 500.0, "")])
            .unwrap();

        let view = build(&store, "JE-001", "2024-03-01").unwrap();
        assert_eq!(view.rows.len(), 3, "2 member rows + total row");
        assert!(!view.imbalanced);

        let total = view.rows.last().unwrap();
        assert_eq!(total.memo, TOTAL_MEMO);
        assert_eq!(total.debit, Some(500.0));
        assert_eq!(total.credit, Some(500.0));
    }

    #[test]
    fn test_imbalanced_voucher_is_still_built() {
        let (_dir, mut store) = test_store();
        store
            .replace_table(&[entry(500.0, 0.0, ""), entry(0.0, 400.0, "")])
            .unwrap();

        let view = build(&store, "JE-001", "2024-03-01").unwrap();
        assert!(view.imbalanced);
        assert_eq!(view.rows.len(), 3);
        assert!((view.total_debit - view.total_credit - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_cells_become_blank_markers() {
        let (_dir, mut store) = test_store();
        store
            .replace_table(&[entry(500.0, 0.0, ""), entry(0.0, 500.0, "")])
            .unwrap();

        let view = build(&store, "JE-001", "2024-03-01").unwrap();
        assert_eq!(view.rows[0].debit, Some(500.0));
        assert_eq!(view.rows[0].credit, None);
        assert_eq!(view.rows[1].debit, None);
        assert_eq!(view.rows[1].credit, Some(500.0));
    }

    #[test]
    fn test_aux_dimension_annotates_account_name() {
        let (_dir, mut store) = test_store();
        store
            .replace_table(&[entry(500.0, 0.0, "Project A"), entry(0.0, 500.0, "")])
            .unwrap();

        let view = build(&store, "JE-001", "2024-03-01").unwrap();
        assert_eq!(view.rows[0].account_name, "Rent Expense【Project A】");
        assert_eq!(view.rows[1].account_name, "Rent Expense");
    }

    #[test]
    fn test_missing_voucher_is_not_found() {
        let (_dir, mut store) = test_store();
        store.replace_table(&[entry(1.0, 0.0, "")]).unwrap();

        let err = build(&store, "JE-999", "2024-03-01").unwrap_err();
        assert!(matches!(err, AuditError::VoucherNotFound { .. }));
        // Same voucher id on another date does not match either.
        let err = build(&store, "JE-001", "2024-04-01").unwrap_err();
        assert!(matches!(err, AuditError::VoucherNotFound { .. }));
    }

    #[test]
    fn test_drill_down_empty_is_ok() {
        let (_dir, mut store) = test_store();
        store.replace_table(&[entry(1.0, 0.0, "")]).unwrap();

        let rows = drill_down(&store, "9999").unwrap();
        assert!(rows.is_empty());
        let rows = drill_down(&store, "6001").unwrap();
        assert_eq!(rows.len(), 1);
    }
}
