use rusqlite::types::Value;
use rusqlite::Row;

/// Row types whose cells can be addressed by schema position. This is what
/// the filter engine matches against, so every column a user can type into a
/// filter box must be listed here.
pub trait Columnar {
    fn columns() -> &'static [&'static str];

    /// Text form of one cell, used for in-memory substring matching.
    fn cell(&self, idx: usize) -> String;

    fn column_index(column: &str) -> Option<usize> {
        Self::columns().iter().position(|c| *c == column)
    }
}

/// Row types persisted in the store.
pub trait TableRecord: Columnar + Clone {
    const TABLE: &'static str;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>
    where
        Self: Sized;

    /// Values in schema column order, for bulk insert.
    fn values(&self) -> Vec<Value>;
}

fn num_text(v: f64) -> String {
    v.to_string()
}

fn opt_text(v: Option<f64>) -> String {
    v.map(num_text).unwrap_or_default()
}

/// One transaction-level journal line. Identity is positional; several rows
/// may share (date, voucher_id).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LedgerEntry {
    pub date: String,
    pub voucher_id: String,
    pub account_code: String,
    pub account_name: String,
    pub aux_dimension: String,
    pub memo: String,
    pub debit: f64,
    pub credit: f64,
    pub quantity: Option<f64>,
    pub foreign_amount: Option<f64>,
}

impl Columnar for LedgerEntry {
    fn columns() -> &'static [&'static str] {
        &[
            "date",
            "voucher_id",
            "account_code",
            "account_name",
            "aux_dimension",
            "memo",
            "debit",
            "credit",
            "quantity",
            "foreign_amount",
        ]
    }

    fn cell(&self, idx: usize) -> String {
        match idx {
            0 => self.date.clone(),
            1 => self.voucher_id.clone(),
            2 => self.account_code.clone(),
            3 => self.account_name.clone(),
            4 => self.aux_dimension.clone(),
            5 => self.memo.clone(),
            6 => num_text(self.debit),
            7 => num_text(self.credit),
            8 => opt_text(self.quantity),
            9 => opt_text(self.foreign_amount),
            _ => String::new(),
        }
    }
}

impl TableRecord for LedgerEntry {
    const TABLE: &'static str = "journal";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            date: row.get(0)?,
            voucher_id: row.get(1)?,
            account_code: row.get(2)?,
            account_name: row.get(3)?,
            aux_dimension: row.get(4)?,
            memo: row.get(5)?,
            debit: row.get(6)?,
            credit: row.get(7)?,
            quantity: row.get(8)?,
            foreign_amount: row.get(9)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.date.clone().into(),
            self.voucher_id.clone().into(),
            self.account_code.clone().into(),
            self.account_name.clone().into(),
            self.aux_dimension.clone().into(),
            self.memo.clone().into(),
            self.debit.into(),
            self.credit.into(),
            self.quantity.into(),
            self.foreign_amount.into(),
        ]
    }
}

/// One account's period summary from the balance table. `account_code` is
/// unique per load.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BalanceEntry {
    pub account_code: String,
    pub account_name: String,
    pub opening_debit: f64,
    pub opening_credit: f64,
    pub period_debit: f64,
    pub period_credit: f64,
    pub closing_debit: f64,
    pub closing_credit: f64,
}

impl Columnar for BalanceEntry {
    fn columns() -> &'static [&'static str] {
        &[
            "account_code",
            "account_name",
            "opening_debit",
            "opening_credit",
            "period_debit",
            "period_credit",
            "closing_debit",
            "closing_credit",
        ]
    }

    fn cell(&self, idx: usize) -> String {
        match idx {
            0 => self.account_code.clone(),
            1 => self.account_name.clone(),
            2 => num_text(self.opening_debit),
            3 => num_text(self.opening_credit),
            4 => num_text(self.period_debit),
            5 => num_text(self.period_credit),
            6 => num_text(self.closing_debit),
            7 => num_text(self.closing_credit),
            _ => String::new(),
        }
    }
}

impl TableRecord for BalanceEntry {
    const TABLE: &'static str = "balance";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            account_code: row.get(0)?,
            account_name: row.get(1)?,
            opening_debit: row.get(2)?,
            opening_credit: row.get(3)?,
            period_debit: row.get(4)?,
            period_credit: row.get(5)?,
            closing_debit: row.get(6)?,
            closing_credit: row.get(7)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.account_code.clone().into(),
            self.account_name.clone().into(),
            self.opening_debit.into(),
            self.opening_credit.into(),
            self.period_debit.into(),
            self.period_credit.into(),
            self.closing_debit.into(),
            self.closing_credit.into(),
        ]
    }
}

/// One line of a reconstructed voucher. Numeric cells are `None` when the
/// journal stored an exact 0 — a stored zero and "no entry" are presented
/// identically, and the blank is rendered only at the formatting boundary.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VoucherRow {
    pub date: String,
    pub voucher_id: String,
    pub memo: String,
    pub account_name: String,
    pub debit: Option<f64>,
    pub credit: Option<f64>,
    pub quantity: Option<f64>,
    pub foreign_amount: Option<f64>,
}

impl Columnar for VoucherRow {
    fn columns() -> &'static [&'static str] {
        &[
            "date",
            "voucher_id",
            "memo",
            "account_name",
            "debit",
            "credit",
            "quantity",
            "foreign_amount",
        ]
    }

    fn cell(&self, idx: usize) -> String {
        match idx {
            0 => self.date.clone(),
            1 => self.voucher_id.clone(),
            2 => self.memo.clone(),
            3 => self.account_name.clone(),
            4 => opt_text(self.debit),
            5 => opt_text(self.credit),
            6 => opt_text(self.quantity),
            7 => opt_text(self.foreign_amount),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_index_lookup() {
        assert_eq!(LedgerEntry::column_index("memo"), Some(5));
        assert_eq!(BalanceEntry::column_index("period_debit"), Some(4));
        assert_eq!(LedgerEntry::column_index("no_such_column"), None);
    }

    #[test]
    fn test_cell_renders_blank_for_missing_numeric() {
        let entry = LedgerEntry {
            debit: 500.0,
            quantity: None,
            ..Default::default()
        };
        assert_eq!(entry.cell(6), "500");
        assert_eq!(entry.cell(8), "");
    }

    #[test]
    fn test_values_match_column_count() {
        assert_eq!(
            LedgerEntry::default().values().len(),
            LedgerEntry::columns().len()
        );
        assert_eq!(
            BalanceEntry::default().values().len(),
            BalanceEntry::columns().len()
        );
    }
}
