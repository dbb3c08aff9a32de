//! Xlmap executor
//!
//! Executors drive a whole pass over one workbook: sheet lookup, the
//! row-count guard, header-row skipping and header rendering, and the
//! dispatch into each descriptor's content function. One executor value is
//! one pass's configuration; build a fresh one (or a separate one per
//! thread) for independent passes.

use std::io::{Cursor, Read, Seek};

use calamine::{Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook};
use tracing::{debug, trace};

use crate::{ReadSheet, WriteSheet, XlError, XlResult};

/// Hard cap on the number of occupied rows a sheet may hold in a read
/// pass. Exceeding it fails the whole pass; nothing is truncated.
pub const MAX_ROWS: u32 = 100_000;

/// Width applied to every header column of a written sheet.
pub const DEFAULT_COLUMN_WIDTH: f64 = 30.0;

/// Read executor: an ordered list of [`ReadSheet`] descriptors applied to
/// one workbook, yielding one opaque result per descriptor.
pub struct XlReader<O> {
    sheets: Vec<Box<dyn ReadSheet<Output = O>>>,
}

impl<O> Default for XlReader<O> {
    fn default() -> Self {
        Self { sheets: Vec::new() }
    }
}

impl<O> XlReader<O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet descriptor; descriptors run in insertion order.
    pub fn add_sheet<S>(&mut self, sheet: S) -> &mut Self
    where
        S: ReadSheet<Output = O> + 'static,
    {
        self.sheets.push(Box::new(sheet));
        self
    }

    /// Run the pass against a workbook the caller already holds open.
    ///
    /// Fails atomically: the first failing sheet aborts the pass and no
    /// partial result list is returned.
    pub fn read_workbook<RS>(&mut self, workbook: &mut Xlsx<RS>) -> XlResult<Vec<O>>
    where
        RS: Read + Seek,
    {
        debug!(sheets = self.sheets.len(), "read pass over open workbook");
        self.process(workbook)
    }

    /// Run the pass against raw xlsx bytes.
    ///
    /// The workbook handle is scoped to this call and released on every
    /// exit path. A byte stream that does not open as an xlsx document is
    /// a [`XlError::MalformedDocument`].
    pub fn read_bytes(&mut self, bytes: &[u8]) -> XlResult<Vec<O>> {
        debug!(
            sheets = self.sheets.len(),
            bytes = bytes.len(),
            "read pass over byte stream"
        );
        let mut workbook = Xlsx::new(Cursor::new(bytes)).map_err(XlError::MalformedDocument)?;
        self.process(&mut workbook)
    }

    fn process<RS>(&mut self, workbook: &mut Xlsx<RS>) -> XlResult<Vec<O>>
    where
        RS: Read + Seek,
    {
        let mut out = Vec::with_capacity(self.sheets.len());

        for desc in &mut self.sheets {
            let index = desc.index();
            let range = workbook
                .worksheet_range_at(index)
                .ok_or(XlError::SheetNotFound { index })?
                .map_err(XlError::MalformedDocument)?;

            // occupied row count, through the last occupied row
            let row_count = range.end().map_or(0, |(r, _)| r + 1);
            if row_count > MAX_ROWS {
                return Err(XlError::RowLimitExceeded {
                    rows: row_count,
                    max: MAX_ROWS,
                });
            }

            let skip = desc.skip_header_rows();
            let mut rows = range.rows();
            for _ in 0..skip {
                rows.next().ok_or(XlError::IteratorExhausted { skip })?;
            }

            trace!(index, rows = row_count, skipped = skip, "sheet content");
            out.push(desc.read_content(&range, &mut rows)?);
        }

        Ok(out)
    }
}

/// Write executor: an ordered list of [`WriteSheet`] descriptors rendered
/// into one serialized workbook.
#[derive(Default)]
pub struct XlWriter {
    sheets: Vec<Box<dyn WriteSheet>>,
}

impl XlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet descriptor; sheets are created in insertion order.
    pub fn add_sheet<S>(&mut self, sheet: S) -> &mut Self
    where
        S: WriteSheet + 'static,
    {
        self.sheets.push(Box::new(sheet));
        self
    }

    /// Build the workbook and serialize it to bytes.
    ///
    /// Per descriptor: create the named sheet, set every header column to
    /// [`DEFAULT_COLUMN_WIDTH`], render the bold header at row 0, then
    /// delegate the body. Fails atomically; the in-memory workbook is
    /// dropped on every exit path and no partial buffer is returned.
    pub fn generate_body(&mut self) -> XlResult<Vec<u8>> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();

        for desc in &mut self.sheets {
            let sheet = workbook.add_worksheet();
            sheet.set_name(desc.sheet_name())?;

            let header = desc.header();
            for (col, label) in header.iter().enumerate() {
                let col = col as u16;
                sheet.set_column_width(col, DEFAULT_COLUMN_WIDTH)?;
                sheet.write_string_with_format(0, col, label.as_str(), &bold)?;
            }

            trace!(name = desc.sheet_name(), columns = header.len(), "header");
            desc.generate_content(sheet)?;
        }

        let buf = workbook.save_to_buffer()?;
        debug!(
            sheets = self.sheets.len(),
            bytes = buf.len(),
            "workbook serialized"
        );
        Ok(buf)
    }
}
