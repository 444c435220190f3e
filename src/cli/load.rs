use std::path::PathBuf;

use crate::error::Result;
use crate::settings::{load_settings, save_settings, shellexpand_path};
use crate::store::Store;

/// Point the tool at an external snapshot. The snapshot is validated (both
/// tables must exist) and any missing per-column indexes are rebuilt before
/// it becomes the working database.
pub fn run(path: &str) -> Result<()> {
    let resolved = PathBuf::from(shellexpand_path(path));
    Store::open_snapshot(&resolved)?;

    let mut settings = load_settings();
    settings.db_file = Some(resolved.to_string_lossy().to_string());
    save_settings(&settings)?;

    println!("Switched to {}", resolved.display());
    Ok(())
}
