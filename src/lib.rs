//! Xlmap
//!
//! Typed mapping between xlsx worksheets and application records.
//!
//! Calling code describes each sheet once with a descriptor — a
//! [`ReadSheet`] mapping a ledger of rows into typed records, or a
//! [`WriteSheet`] mapping typed records into rows under a bold header —
//! and an executor drives the whole pass: sheet lookup, header-row
//! skipping, the row-count cap, header rendering, and the dispatch into
//! each descriptor's content function. Cell-level conversions live in
//! [`cell`]: every accessor treats an absent or blank cell as `None` and an
//! irreconcilable stored kind as a [`XlError::TypeMismatch`].
//!
//! The xlsx format itself is delegated: `calamine` parses,
//! `rust_xlsxwriter` generates. Both are re-exported since descriptor
//! impls name their types.

pub mod cell;
pub mod descriptor;
pub mod error;
pub mod executor;
pub mod value;

pub use cell::{
    find_label_row, is_row_empty, read_cell_date, read_cell_datetime, read_cell_i32,
    read_cell_i64, read_cell_str, write_cell, DATE_FORMAT, DATE_TIME_FORMAT,
};
pub use descriptor::{ReadSheet, WriteSheet};
pub use error::{XlError, XlResult};
pub use executor::{XlReader, XlWriter, DEFAULT_COLUMN_WIDTH, MAX_ROWS};
pub use value::CellValue;

pub use calamine;
pub use chrono;
pub use rust_xlsxwriter;
pub use rust_xlsxwriter::Worksheet;
