// src/summary/mod.rs
pub mod table;

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto_from_rs, Reader};

use crate::storage::{StorageManager, TempFileGuard};
use crate::utils::error::SummaryError;
pub use table::{CellValue, RawTable, SummaryTable};

const PREVIEW_ROWS: usize = 5;

/// Reads the first sheet of the workbook at `path`, every row included.
/// The format (xls, xlsx, xlsb, ods) is detected from the bytes, not the file name.
pub fn load_first_sheet(path: &Path) -> Result<RawTable, SummaryError> {
    let bytes = fs::read(path)?;
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SummaryError::EmptyWorkbook)??;

    let raw = RawTable::from_range(&range);
    tracing::debug!("Loaded first sheet: {} rows x {} columns", raw.height(), raw.width());
    Ok(raw)
}

/// Turns the downloaded spreadsheet into the summary workbook.
///
/// Returns `true` when the summary was written. The input file at `path` is
/// removed before returning, whatever the outcome.
pub fn summarize(path: &Path, label: &str, storage: &StorageManager) -> bool {
    let _cleanup = TempFileGuard::new(path);

    match build_summary(path, label, storage) {
        Ok(output) => {
            tracing::info!("Summary created: {}", output.display());
            true
        }
        Err(e) => {
            tracing::error!("Error processing the spreadsheet: {}", e);
            false
        }
    }
}

fn build_summary(path: &Path, label: &str, storage: &StorageManager) -> Result<PathBuf, SummaryError> {
    tracing::info!("Processing spreadsheet {}", path.display());
    let raw = load_first_sheet(path)?;
    let summary = SummaryTable::from_raw(&raw)?;

    if summary.is_empty() {
        tracing::warn!("No rows with a fund name; the summary will only have headers");
    }

    let output = storage.save_summary(&summary, label, chrono::Local::now().naive_local())?;

    tracing::info!("Total funds processed: {}", summary.len());
    tracing::info!("Preview:\n{}", summary.preview(PREVIEW_ROWS));
    Ok(output)
}
