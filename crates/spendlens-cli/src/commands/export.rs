//! Export command implementation

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use spendlens_core::{export, Error, SyncController};

pub fn cmd_export(
    controller: &SyncController,
    output: Option<&Path>,
    today: NaiveDate,
) -> Result<()> {
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(export::default_filename(today)));

    match export::write_csv(&controller.cache().current_expenses(), &path) {
        Ok(count) => {
            println!("✅ Exported {} expenses to {}", count, path.display());
            Ok(())
        }
        Err(Error::NothingToExport) => {
            println!("No expenses to export.");
            Ok(())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to write {}", path.display())),
    }
}
