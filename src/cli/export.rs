use std::path::Path;

use crate::error::{AuditError, Result};
use crate::models::{BalanceEntry, LedgerEntry, TableRecord};
use crate::session::View;
use crate::settings::db_path;
use crate::store::Store;

pub fn run(table: &str, output: &str) -> Result<()> {
    let view: View = table.parse()?;
    let store = Store::open(&db_path())?;

    let written = match view {
        View::Journal => write_csv::<LedgerEntry>(&store, Path::new(output))?,
        View::Balance => write_csv::<BalanceEntry>(&store, Path::new(output))?,
        View::Voucher => return Err(AuditError::UnknownTable(table.to_string())),
    };

    println!("Wrote {written} rows to {output}");
    Ok(())
}

fn write_csv<T: TableRecord>(store: &Store, output: &Path) -> Result<usize> {
    let rows: Vec<T> = store.page(None, 0)?;
    let mut writer = csv::Writer::from_path(output)?;
    writer.write_record(T::columns())?;
    for row in &rows {
        let record: Vec<String> = (0..T::columns().len()).map(|i| row.cell(i)).collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(rows.len())
}
