// src/summary/table.rs
use std::fmt;

use calamine::{Data, Range};

use crate::utils::error::SummaryError;

// Columns are addressed by position only; the regulator's sheet has no stable header.
pub const NAME_COLUMN: usize = 0; // Column A
pub const YIELD_COLUMN: usize = 9; // Column J
pub const REQUIRED_COLUMNS: usize = YIELD_COLUMN + 1;

pub const NAME_HEADER: &str = "Nombre_Fondo";
pub const YIELD_HEADER: &str = "Rendimiento";

/// A single spreadsheet cell, detached from the reader's representation.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Int(i64),
    Bool(bool),
}

impl CellValue {
    /// Empty cells, error cells and empty strings all count as missing.
    pub fn is_null(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => CellValue::Empty,
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Int(*i),
            Data::Bool(b) => CellValue::Bool(*b),
            // Keep the serial value; the summary never interprets dates
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => write!(f, "NaN"),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// First sheet of the downloaded workbook as a positional grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    rows: Vec<Vec<CellValue>>,
    width: usize,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, width }
    }

    /// Builds the grid using absolute column positions, so a sheet whose
    /// used range starts at column C still has its first cells at position 2.
    pub fn from_range(range: &Range<Data>) -> Self {
        let (start, end) = match (range.start(), range.end()) {
            (Some(start), Some(end)) => (start, end),
            _ => return Self::default(),
        };

        let rows = (start.0..=end.0)
            .map(|row| {
                (0..=end.1)
                    .map(|col| {
                        range
                            .get_value((row, col))
                            .map(CellValue::from)
                            .unwrap_or(CellValue::Empty)
                    })
                    .collect()
            })
            .collect();

        Self::new(rows)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Every row's value at `position`, short rows padded with `Empty`.
    pub fn column(&self, position: usize) -> Vec<CellValue> {
        self.rows
            .iter()
            .map(|row| row.get(position).cloned().unwrap_or(CellValue::Empty))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub fund_name: CellValue,
    pub yield_value: CellValue,
}

/// Cleaned (fund name, yield) pairs; no row has a null fund name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryTable {
    rows: Vec<SummaryRow>,
}

impl SummaryTable {
    /// Pairs column A with column J row by row and drops rows without a fund name.
    pub fn from_raw(raw: &RawTable) -> Result<Self, SummaryError> {
        if raw.width() < REQUIRED_COLUMNS {
            return Err(SummaryError::TooFewColumns {
                found: raw.width(),
                required: REQUIRED_COLUMNS,
            });
        }

        let names = raw.column(NAME_COLUMN);
        let yields = raw.column(YIELD_COLUMN);
        debug_assert_eq!(names.len(), yields.len());

        let rows = names
            .into_iter()
            .zip(yields)
            .filter(|(name, _)| !name.is_null())
            .map(|(fund_name, yield_value)| SummaryRow { fund_name, yield_value })
            .collect::<Vec<_>>();

        tracing::debug!("Kept {} of {} raw rows", rows.len(), raw.height());
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Plain-text rendering of the first `n` rows, header included.
    pub fn preview(&self, n: usize) -> String {
        let shown = &self.rows[..n.min(self.rows.len())];
        let names: Vec<String> = shown.iter().map(|r| r.fund_name.to_string()).collect();
        let name_width = names
            .iter()
            .map(|s| s.chars().count())
            .chain(std::iter::once(NAME_HEADER.len()))
            .max()
            .unwrap_or(0);

        let mut out = format!("{:<width$}  {}", NAME_HEADER, YIELD_HEADER, width = name_width);
        for (name, row) in names.iter().zip(shown) {
            out.push('\n');
            out.push_str(&format!("{:<width$}  {}", name, row.yield_value, width = name_width));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    /// Row with `width` cells: name at 0, yield at 9, filler elsewhere.
    fn row(width: usize, name: CellValue, yield_value: CellValue) -> Vec<CellValue> {
        (0..width)
            .map(|col| match col {
                NAME_COLUMN => name.clone(),
                YIELD_COLUMN => yield_value.clone(),
                _ => text("x"),
            })
            .collect()
    }

    #[test]
    fn test_too_few_columns_is_rejected() {
        let raw = RawTable::new(vec![vec![text("Fondo A"); 9]; 3]);
        match SummaryTable::from_raw(&raw) {
            Err(SummaryError::TooFewColumns { found, required }) => {
                assert_eq!(found, 9);
                assert_eq!(required, 10);
            }
            other => panic!("expected TooFewColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_null_names_dropped_in_order() {
        let raw = RawTable::new(vec![
            row(12, text("Fondo 1"), CellValue::Number(1.5)),
            row(12, text("Fondo 2"), CellValue::Empty),
            row(12, CellValue::Empty, CellValue::Number(99.0)),
            row(12, text("Fondo 4"), text("n/d")),
            row(12, text("Fondo 5"), CellValue::Int(-3)),
        ]);

        let summary = SummaryTable::from_raw(&raw).unwrap();
        let names: Vec<_> = summary.rows().iter().map(|r| r.fund_name.clone()).collect();
        let yields: Vec<_> = summary.rows().iter().map(|r| r.yield_value.clone()).collect();

        assert_eq!(summary.len(), 4);
        assert_eq!(names, vec![text("Fondo 1"), text("Fondo 2"), text("Fondo 4"), text("Fondo 5")]);
        assert_eq!(
            yields,
            vec![CellValue::Number(1.5), CellValue::Empty, text("n/d"), CellValue::Int(-3)]
        );
    }

    #[test]
    fn test_empty_string_name_counts_as_null() {
        let raw = RawTable::new(vec![
            row(10, text(""), CellValue::Number(2.0)),
            row(10, text("Fondo"), CellValue::Number(3.0)),
        ]);
        let summary = SummaryTable::from_raw(&raw).unwrap();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary.rows()[0].yield_value, CellValue::Number(3.0));
    }

    #[test]
    fn test_na_like_text_names_are_kept() {
        let raw = RawTable::new(vec![
            row(10, text("NA"), CellValue::Number(1.0)),
            row(10, text("N/A"), CellValue::Number(2.0)),
            row(10, text("NULL"), CellValue::Number(3.0)),
            row(10, text("nan"), CellValue::Number(4.0)),
            row(10, text(" "), CellValue::Number(5.0)),
        ]);
        let summary = SummaryTable::from_raw(&raw).unwrap();
        assert_eq!(summary.len(), 5);
    }

    #[test]
    fn test_short_rows_are_padded() {
        // Width comes from the longest row; the short one has no yield cell.
        let raw = RawTable::new(vec![
            vec![text("Corto")],
            row(10, text("Largo"), CellValue::Number(4.0)),
        ]);
        let summary = SummaryTable::from_raw(&raw).unwrap();
        assert_eq!(summary.rows()[0].yield_value, CellValue::Empty);
        assert_eq!(summary.rows()[1].yield_value, CellValue::Number(4.0));
    }

    #[test]
    fn test_from_range_uses_absolute_columns() {
        // Used range starts at column C; column A must still be position 0.
        let mut range: Range<Data> = Range::new((1, 2), (2, 9));
        range.set_value((1, 2), Data::String("c".into()));
        range.set_value((2, 9), Data::Float(7.25));

        let raw = RawTable::from_range(&range);
        assert_eq!(raw.width(), 10);
        assert_eq!(raw.height(), 2);
        assert_eq!(raw.column(0), vec![CellValue::Empty, CellValue::Empty]);
        assert_eq!(raw.column(2)[0], text("c"));
        assert_eq!(raw.column(9)[1], CellValue::Number(7.25));
    }

    #[test]
    fn test_error_cells_are_null() {
        let cell = CellValue::from(&Data::Error(calamine::CellErrorType::NA));
        assert!(cell.is_null());
    }

    #[test]
    fn test_preview_limits_rows() {
        let raw = RawTable::new(
            (1..=7)
                .map(|i| row(10, text(&format!("Fondo {}", i)), CellValue::Int(i)))
                .collect(),
        );
        let summary = SummaryTable::from_raw(&raw).unwrap();
        let preview = summary.preview(5);

        assert_eq!(preview.lines().count(), 6);
        assert!(preview.starts_with("Nombre_Fondo"));
        assert!(preview.contains("Fondo 5"));
        assert!(!preview.contains("Fondo 6"));
    }
}
