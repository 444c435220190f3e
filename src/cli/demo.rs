use colored::Colorize;

use crate::error::Result;
use crate::models::{BalanceEntry, LedgerEntry};
use crate::session::Session;
use crate::settings::db_path;

// (date, voucher_id, account_code, account_name, aux, memo, debit, credit)
const JOURNAL: &[(&str, &str, &str, &str, &str, &str, f64, f64)] = &[
    ("2024-03-05", "JE-001", "6601", "Rent Expense", "", "March office rent", 8000.0, 0.0),
    ("2024-03-05", "JE-001", "1002", "Bank Deposit", "", "March office rent", 0.0, 8000.0),
    ("2024-03-12", "JE-002", "6602", "Office Supplies", "", "Printer paper and toner", 450.0, 0.0),
    ("2024-03-12", "JE-002", "1001", "Cash", "", "Printer paper and toner", 0.0, 450.0),
    ("2024-03-20", "JE-003", "1002", "Bank Deposit", "", "Consulting invoice 2024-017", 12000.0, 0.0),
    ("2024-03-20", "JE-003", "6001", "Service Revenue", "Client A", "Consulting invoice 2024-017", 0.0, 12000.0),
    ("2024-03-28", "JE-004", "6603", "Travel", "Project X", "Site visit, rail and hotel", 1800.0, 0.0),
    ("2024-03-28", "JE-004", "1002", "Bank Deposit", "", "Site visit, rail and hotel", 0.0, 1800.0),
];

// (account_code, account_name, period_debit, period_credit)
const BALANCE: &[(&str, &str, f64, f64)] = &[
    ("1001", "Cash", 0.0, 450.0),
    ("1002", "Bank Deposit", 12000.0, 9800.0),
    ("6001", "Service Revenue", 0.0, 12000.0),
    ("6601", "Rent Expense", 8000.0, 0.0),
    ("6602", "Office Supplies", 450.0, 0.0),
    ("6603", "Travel", 1800.0, 0.0),
];

pub fn run() -> Result<()> {
    let mut session = Session::open(&db_path())?;

    let journal: Vec<LedgerEntry> = JOURNAL
        .iter()
        .map(|&(date, voucher, code, name, aux, memo, debit, credit)| LedgerEntry {
            date: date.to_string(),
            voucher_id: voucher.to_string(),
            account_code: code.to_string(),
            account_name: name.to_string(),
            aux_dimension: aux.to_string(),
            memo: memo.to_string(),
            debit,
            credit,
            ..Default::default()
        })
        .collect();
    let balance: Vec<BalanceEntry> = BALANCE
        .iter()
        .map(|&(code, name, period_debit, period_credit)| BalanceEntry {
            account_code: code.to_string(),
            account_name: name.to_string(),
            period_debit,
            period_credit,
            closing_debit: period_debit,
            closing_credit: period_credit,
            ..Default::default()
        })
        .collect();

    session.replace_journal(&journal)?;
    session.replace_balance(&balance)?;

    println!("{}", "Demo data loaded.".green());
    println!("Try:");
    println!("  audit browse journal");
    println!("  audit filter journal memo=rent");
    println!("  audit reconcile");
    println!("  audit voucher JE-001 --date 2024-03-05");
    println!("  audit drill 1002");
    Ok(())
}
