use std::path::Path;

use csv::StringRecord;

use crate::error::{AuditError, Result};
use crate::models::{BalanceEntry, Columnar, LedgerEntry};

/// Tolerant numeric cell parsing: thousands separators, quotes, blank cells
/// and parenthesized negatives all appear in exported ledgers.
pub fn parse_amount(raw: &str) -> f64 {
    let s = raw.replace(',', "").replace('"', "");
    let s = s.trim();
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return -inner.trim().parse::<f64>().unwrap_or(0.0);
    }
    s.parse().unwrap_or(0.0)
}

fn parse_opt_amount(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        None
    } else {
        Some(parse_amount(s))
    }
}

/// Positions of the schema columns within the CSV header, in schema order.
/// Extra CSV columns are ignored; a missing schema column is an error.
fn header_indexes(headers: &StringRecord, columns: &[&str]) -> Result<Vec<usize>> {
    columns
        .iter()
        .map(|col| {
            headers
                .iter()
                .position(|h| h.trim() == *col)
                .ok_or_else(|| AuditError::Import(format!("missing column '{col}' in header")))
        })
        .collect()
}

fn field<'a>(record: &'a StringRecord, idx: usize) -> &'a str {
    record.get(idx).unwrap_or("").trim()
}

pub fn read_journal_csv(path: &Path) -> Result<Vec<LedgerEntry>> {
    let mut reader = csv::Reader::from_path(path)?;
    let idx = header_indexes(reader.headers()?, LedgerEntry::columns())?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(LedgerEntry {
            date: field(&record, idx[0]).to_string(),
            voucher_id: field(&record, idx[1]).to_string(),
            account_code: field(&record, idx[2]).to_string(),
            account_name: field(&record, idx[3]).to_string(),
            aux_dimension: field(&record, idx[4]).to_string(),
            memo: field(&record, idx[5]).to_string(),
            debit: parse_amount(field(&record, idx[6])),
            credit: parse_amount(field(&record, idx[7])),
            quantity: parse_opt_amount(field(&record, idx[8])),
            foreign_amount: parse_opt_amount(field(&record, idx[9])),
        });
    }
    Ok(rows)
}

pub fn read_balance_csv(path: &Path) -> Result<Vec<BalanceEntry>> {
    let mut reader = csv::Reader::from_path(path)?;
    let idx = header_indexes(reader.headers()?, BalanceEntry::columns())?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(BalanceEntry {
            account_code: field(&record, idx[0]).to_string(),
            account_name: field(&record, idx[1]).to_string(),
            opening_debit: parse_amount(field(&record, idx[2])),
            opening_credit: parse_amount(field(&record, idx[3])),
            period_debit: parse_amount(field(&record, idx[4])),
            period_credit: parse_amount(field(&record, idx[5])),
            closing_debit: parse_amount(field(&record, idx[6])),
            closing_credit: parse_amount(field(&record, idx[7])),
        });
    }
    Ok(rows)
}
