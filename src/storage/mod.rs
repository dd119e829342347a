// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use rust_xlsxwriter::Workbook;

use crate::summary::table::{NAME_HEADER, YIELD_HEADER};
use crate::summary::{CellValue, SummaryTable};
use crate::utils::error::StorageError;

const TEMP_FILE_PREFIX: &str = "valores_diarios_temp";
const SUMMARY_FILE_PREFIX: &str = "Resumen_Fondos_Rendimientos";
pub const SUMMARY_SHEET_NAME: &str = "Resumen_Rendimientos";

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager rooted at the download directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn temp_file_path(&self, date: NaiveDate) -> PathBuf {
        self.base_dir
            .join(format!("{}_{}.xlsx", TEMP_FILE_PREFIX, date.format("%Y%m%d")))
    }

    pub fn summary_file_path(&self, label: &str, now: NaiveDateTime) -> PathBuf {
        self.base_dir.join(format!(
            "{}_{}_{}.xlsx",
            SUMMARY_FILE_PREFIX,
            sanitize_label(label),
            now.format("%Y%m%d_%H%M")
        ))
    }

    /// Writes the downloaded spreadsheet, replacing any earlier download from the same day
    pub fn save_download(&self, bytes: &[u8], date: NaiveDate) -> Result<PathBuf, StorageError> {
        let file_path = self.temp_file_path(date);
        fs::write(&file_path, bytes).map_err(StorageError::IoError)?;

        tracing::info!("Downloaded file: {}", file_path.display());
        Ok(file_path)
    }

    /// Writes the summary as a single-sheet workbook with a header row and no index column
    pub fn save_summary(
        &self,
        summary: &SummaryTable,
        label: &str,
        now: NaiveDateTime,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.summary_file_path(label, now);

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SUMMARY_SHEET_NAME)?;
        sheet.write_string(0, 0, NAME_HEADER)?;
        sheet.write_string(0, 1, YIELD_HEADER)?;

        for (index, row) in summary.rows().iter().enumerate() {
            let excel_row = index as u32 + 1;
            for (col, value) in [(0u16, &row.fund_name), (1u16, &row.yield_value)] {
                match value {
                    CellValue::Empty => {}
                    CellValue::Text(s) => {
                        sheet.write_string(excel_row, col, s.as_str())?;
                    }
                    CellValue::Number(n) => {
                        sheet.write_number(excel_row, col, *n)?;
                    }
                    CellValue::Int(i) => {
                        sheet.write_number(excel_row, col, *i as f64)?;
                    }
                    CellValue::Bool(b) => {
                        sheet.write_boolean(excel_row, col, *b)?;
                    }
                }
            }
        }

        workbook.save(&file_path)?;
        tracing::info!("Saved summary to {}", file_path.display());

        Ok(file_path)
    }
}

/// Label fragment used in summary file names: spaces become underscores, periods are dropped.
pub fn sanitize_label(label: &str) -> String {
    label.replace(' ', "_").replace('.', "")
}

/// Deletes `path` if it is still there. Missing files and deletion errors are ignored.
pub fn remove_temp_file(path: &Path) {
    if path.exists() {
        match fs::remove_file(path) {
            Ok(()) => tracing::info!("Temporary file removed"),
            Err(e) => tracing::debug!("Ignoring failure to remove {}: {}", path.display(), e),
        }
    }
}

/// Removes the wrapped file when dropped, on success and error paths alike.
pub struct TempFileGuard {
    path: PathBuf,
}

impl TempFileGuard {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        remove_temp_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use tempfile::tempdir;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(h, min, 7).unwrap())
    }

    #[test]
    fn test_sanitize_label() {
        assert_eq!(sanitize_label("jun. 2025"), "jun_2025");
        assert_eq!(sanitize_label("may 2025"), "may_2025");
        assert_eq!(sanitize_label("Valores 3.jun. 2025"), "Valores_3jun_2025");
    }

    #[test]
    fn test_file_names() {
        let dir = tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let now = at(2025, 6, 3, 9, 5);

        assert_eq!(
            storage.temp_file_path(now.date()),
            dir.path().join("valores_diarios_temp_20250603.xlsx")
        );
        assert_eq!(
            storage.summary_file_path("jun. 2025", now),
            dir.path().join("Resumen_Fondos_Rendimientos_jun_2025_20250603_0905.xlsx")
        );
    }

    #[test]
    fn test_new_creates_missing_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("Downloads");
        StorageManager::new(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_save_download_overwrites_same_day() {
        let dir = tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();

        let first = storage.save_download(b"first", date).unwrap();
        let second = storage.save_download(b"second", date).unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read(&second).unwrap(), b"second");
    }

    #[test]
    fn test_remove_temp_file_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone.xlsx");
        fs::write(&path, b"data").unwrap();

        remove_temp_file(&path);
        assert!(!path.exists());
        remove_temp_file(&path);
        assert!(!path.exists());
    }

    #[test]
    fn test_guard_removes_on_drop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scoped.xlsx");
        fs::write(&path, b"data").unwrap();
        {
            let _guard = TempFileGuard::new(&path);
            assert!(path.exists());
        }
        assert!(!path.exists());
        // A second guard over an already removed file is harmless
        drop(TempFileGuard::new(&path));
    }
}
