//! Xlmap sheet descriptors
//!
//! A descriptor pairs one sheet's identity and shape metadata with the
//! conversion logic for its content. Reading and writing are distinct
//! contracts held in distinct collections: a read pass only ever sees
//! [`ReadSheet`] values and a write pass only [`WriteSheet`] values, so
//! there is no mixed list and no runtime downcast to pick a side.

use calamine::{Data, Range, Rows};
use rust_xlsxwriter::Worksheet;

use crate::XlResult;

/// One input sheet of a read pass.
///
/// `read_content` receives the sheet and a row cursor already advanced past
/// [`skip_header_rows`](ReadSheet::skip_header_rows) rows. It consumes as
/// many rows as it needs and returns one result; what that result is stays
/// opaque to the executor. Descriptors of one pass share an `Output` type
/// (commonly a record list, or an enum when sheets carry different record
/// shapes).
pub trait ReadSheet {
    type Output;

    /// Position of the sheet in the workbook.
    fn index(&self) -> usize;

    /// Leading rows to skip before content starts.
    fn skip_header_rows(&self) -> usize {
        0
    }

    /// Convert the remaining rows into one application-level result.
    fn read_content(
        &mut self,
        sheet: &Range<Data>,
        rows: &mut Rows<'_, Data>,
    ) -> XlResult<Self::Output>;
}

/// One output sheet of a write pass.
///
/// The executor creates the sheet, applies the column width, renders the
/// bold header at row 0, then hands the sheet over. `generate_content`
/// reads its records from the descriptor's own fields and must write each
/// row fully before moving to the next; content starts at row 1.
pub trait WriteSheet {
    /// Name of the sheet tab to create.
    fn sheet_name(&self) -> &str;

    /// Header labels for row 0. The length also decides how many columns
    /// get the default width; content may exceed it.
    fn header(&self) -> Vec<String>;

    /// Populate the sheet body from the descriptor's own data.
    fn generate_content(&mut self, sheet: &mut Worksheet) -> XlResult<()>;
}
