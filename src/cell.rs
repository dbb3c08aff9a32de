//! Xlmap cell coercion
//!
//! Stateless conversions between a weakly-typed cell and a strongly-typed
//! application value. The stored kind of a cell is decided by whoever wrote
//! the document, so every accessor here tolerates a mismatch between the
//! kind it wants and the kind it finds: an absent or blank cell is `None`
//! for every accessor, and an irreconcilable kind is a `TypeMismatch`.

use calamine::{Data, DataType, Range};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_xlsxwriter::Worksheet;

use crate::{CellValue, XlError, XlResult};

/// Text format used when a date is written into a cell.
pub const DATE_FORMAT: &str = "%d-%m-%Y";
/// Text format used when a date-with-time is written into a cell.
pub const DATE_TIME_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Read a cell as trimmed text.
///
/// A natively numeric (or boolean, or error) cell does not silently
/// stringify; it surfaces as a `TypeMismatch` so the caller knows the sheet
/// does not look the way its descriptor claims.
pub fn read_cell_str(row: &[Data], col: usize) -> XlResult<Option<String>> {
    match row.get(col) {
        None | Some(Data::Empty) => Ok(None),
        Some(Data::String(s)) => Ok(Some(s.trim().to_string())),
        Some(other) => Err(XlError::type_mismatch(col, "text", other)),
    }
}

/// Read a cell as a 64-bit integer, truncating any fractional part toward
/// zero (no rounding).
pub fn read_cell_i64(row: &[Data], col: usize) -> XlResult<Option<i64>> {
    match row.get(col) {
        None | Some(Data::Empty) => Ok(None),
        Some(Data::Int(i)) => Ok(Some(*i)),
        Some(Data::Float(f)) => Ok(Some(*f as i64)),
        Some(other) => Err(XlError::type_mismatch(col, "number", other)),
    }
}

/// Read a cell as a 32-bit integer.
///
/// Number-bearing columns in hand-edited sheets routinely arrive as text,
/// and some producers store a truly blank cell as text `""`. The contract
/// here keeps blank and zero distinct: absent cells, blank-kind cells and
/// text that trims to empty are all `None`, while any other text must
/// parse as a number.
pub fn read_cell_i32(row: &[Data], col: usize) -> XlResult<Option<i32>> {
    let cell = match row.get(col) {
        None => return Ok(None),
        Some(c) => c,
    };
    match cell {
        Data::Empty => Ok(None),
        Data::String(s) if s.trim().is_empty() => Ok(None),
        Data::String(s) => match s.trim().parse::<f64>() {
            Ok(f) => Ok(Some(f as i32)),
            Err(_) => Err(XlError::type_mismatch(col, "number", cell)),
        },
        Data::Int(i) => Ok(Some(*i as i32)),
        Data::Float(f) => Ok(Some(*f as i32)),
        other => Err(XlError::type_mismatch(col, "number", other)),
    }
}

/// Read the full date/time content of a cell.
///
/// Recognized representations: native datetime cells, numeric serials, and
/// text in the crate's canonical formats (dates leave [`write_cell`] as
/// text, so text must read back). Empty text counts as blank, since absent
/// values are written as `""`. A date-only representation yields midnight.
pub fn read_cell_datetime(row: &[Data], col: usize) -> XlResult<Option<NaiveDateTime>> {
    let cell = match row.get(col) {
        None => return Ok(None),
        Some(c) => c,
    };
    match cell {
        Data::Empty => Ok(None),
        Data::String(s) if s.trim().is_empty() => Ok(None),
        Data::String(s) => {
            let s = s.trim();
            NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT)
                .or_else(|_| {
                    NaiveDate::parse_from_str(s, DATE_FORMAT).map(|d| d.and_time(NaiveTime::MIN))
                })
                .map(Some)
                .map_err(|_| XlError::type_mismatch(col, "date/time", cell))
        }
        other => match other.as_datetime() {
            Some(ndt) => Ok(Some(ndt)),
            None => Err(XlError::type_mismatch(col, "date/time", other)),
        },
    }
}

/// Read the calendar-date portion of a cell's date/time content.
pub fn read_cell_date(row: &[Data], col: usize) -> XlResult<Option<NaiveDate>> {
    Ok(read_cell_datetime(row, col)?.map(|ndt| ndt.date()))
}

/// Write one typed value into a cell.
///
/// `Empty` writes an empty text cell rather than skipping the column, so
/// no write is ever silently dropped; a reader sees the cell as blank
/// (`None` from every accessor), never as zero. Numbers stay native
/// numeric cells; dates are rendered as text in [`DATE_FORMAT`] /
/// [`DATE_TIME_FORMAT`].
pub fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, value: &CellValue) -> XlResult<()> {
    match value {
        CellValue::Empty => sheet.write_string(row, col, "")?,
        CellValue::Int(v) => sheet.write_number(row, col, *v as f64)?,
        CellValue::Float(v) => sheet.write_number(row, col, *v)?,
        CellValue::Date(v) => sheet.write_string(row, col, v.format(DATE_FORMAT).to_string())?,
        CellValue::DateTime(v) => {
            sheet.write_string(row, col, v.format(DATE_TIME_FORMAT).to_string())?
        }
        CellValue::Text(v) => sheet.write_string(row, col, v.as_str())?,
    };
    Ok(())
}

/// True if the row is absent, has no cells, or every cell in
/// `[0, last_col]` is absent, blank, or stringifies to empty.
///
/// Meant for callers walking trailing regions of a sheet; the executors do
/// not call it.
pub fn is_row_empty(row: Option<&[Data]>, last_col: usize) -> bool {
    let row = match row {
        None => return true,
        Some(r) => r,
    };
    if row.is_empty() {
        return true;
    }
    for cell in row.iter().take(last_col + 1) {
        match cell {
            Data::Empty => {}
            Data::String(s) if s.is_empty() => {}
            _ => return false,
        }
    }
    true
}

/// Find the first row holding a text cell whose trimmed content equals
/// `label`, scanning cells in row order. Returns the absolute row index;
/// `None` when no cell matches.
pub fn find_label_row(sheet: &Range<Data>, label: &str) -> Option<u32> {
    let (start_row, _) = sheet.start()?;
    for (i, row) in sheet.rows().enumerate() {
        for cell in row {
            if let Data::String(s) = cell {
                if s.trim() == label {
                    return Some(start_row + i as u32);
                }
            }
        }
    }
    None
}
