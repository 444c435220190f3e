use crate::error::Result;
use crate::fmt::format_bytes;
use crate::models::{BalanceEntry, LedgerEntry};
use crate::settings::{db_path, load_settings};
use crate::store::Store;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let db = db_path();

    println!("Data dir:   {}", settings.data_dir);
    println!("Database:   {}", db.display());

    if db.exists() {
        let size = std::fs::metadata(&db)?.len();
        println!("DB size:    {}", format_bytes(size));

        let store = Store::open(&db)?;
        let journal = store.count::<LedgerEntry>()?;
        let balance = store.count::<BalanceEntry>()?;

        println!();
        println!("Journal rows:  {journal}");
        println!("Balance rows:  {balance}");
    } else {
        println!();
        println!("Database not found. Run `audit init` to set up.");
    }

    Ok(())
}
