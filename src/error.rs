//! Xlmap error
//!
//! Every failure aborts the current pass and surfaces as one of the kinds
//! below, with the collaborator's original error kept in the source chain.

use thiserror::Error;

pub type XlResult<T> = Result<T, XlError>;

#[derive(Error, Debug)]
pub enum XlError {
    #[error("sheet index {index} not found in workbook")]
    SheetNotFound { index: usize },

    #[error("cannot skip {skip} header rows, sheet exhausted")]
    IteratorExhausted { skip: usize },

    #[error("sheet holds {rows} rows, more than the {max} allowed")]
    RowLimitExceeded { rows: u32, max: u32 },

    #[error("column {col}: expected {expected}, cell holds {found}")]
    TypeMismatch {
        col: usize,
        expected: &'static str,
        found: String,
    },

    #[error("malformed xlsx document")]
    MalformedDocument(#[source] calamine::XlsxError),

    #[error("workbook generation failed")]
    WriteFailed(#[source] rust_xlsxwriter::XlsxError),
}

impl XlError {
    pub fn type_mismatch(col: usize, expected: &'static str, found: &calamine::Data) -> XlError {
        XlError::TypeMismatch {
            col,
            expected,
            found: stored_kind(found).to_string(),
        }
    }
}

/// Human-readable name of a cell's stored kind, for error messages.
fn stored_kind(data: &calamine::Data) -> &'static str {
    use calamine::Data;

    match data {
        Data::Empty => "blank",
        Data::String(_) => "text",
        Data::Int(_) | Data::Float(_) => "number",
        Data::Bool(_) => "boolean",
        Data::DateTime(_) | Data::DateTimeIso(_) => "date/time",
        _ => "other",
    }
}

impl From<rust_xlsxwriter::XlsxError> for XlError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        XlError::WriteFailed(e)
    }
}
