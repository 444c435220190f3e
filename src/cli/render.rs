use comfy_table::Table;

use crate::fmt::{amount, blank_or_amount};
use crate::models::{BalanceEntry, LedgerEntry, VoucherRow};

pub fn journal_table(rows: &[LedgerEntry]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Date", "Voucher", "Code", "Account", "Aux", "Memo", "Debit", "Credit",
    ]);
    for row in rows {
        table.add_row(vec![
            row.date.clone(),
            row.voucher_id.clone(),
            row.account_code.clone(),
            row.account_name.clone(),
            row.aux_dimension.clone(),
            row.memo.clone(),
            amount(row.debit),
            amount(row.credit),
        ]);
    }
    table
}

pub fn balance_table(rows: &[BalanceEntry]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Code",
        "Account",
        "Opening Dr",
        "Opening Cr",
        "Period Dr",
        "Period Cr",
        "Closing Dr",
        "Closing Cr",
    ]);
    for row in rows {
        table.add_row(vec![
            row.account_code.clone(),
            row.account_name.clone(),
            amount(row.opening_debit),
            amount(row.opening_credit),
            amount(row.period_debit),
            amount(row.period_credit),
            amount(row.closing_debit),
            amount(row.closing_credit),
        ]);
    }
    table
}

pub fn voucher_table(rows: &[VoucherRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Date", "Voucher", "Memo", "Account", "Debit", "Credit", "Qty", "FX",
    ]);
    for row in rows {
        table.add_row(vec![
            row.date.clone(),
            row.voucher_id.clone(),
            row.memo.clone(),
            row.account_name.clone(),
            blank_or_amount(row.debit),
            blank_or_amount(row.credit),
            blank_or_amount(row.quantity),
            blank_or_amount(row.foreign_amount),
        ]);
    }
    table
}
