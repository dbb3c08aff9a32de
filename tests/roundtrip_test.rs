//! Full-pass tests: records written through `XlWriter` read back through
//! both read paths with their types intact.

use std::io::Cursor;

use pretty_assertions::assert_eq;

use xlmap::calamine::{Data, Range, Reader, Rows, Xlsx};
use xlmap::chrono::{NaiveDate, NaiveDateTime};
use xlmap::{
    read_cell_date, read_cell_datetime, read_cell_i32, read_cell_i64, read_cell_str, write_cell,
    CellValue, ReadSheet, WriteSheet, Worksheet, XlError, XlReader, XlResult, XlWriter,
};

#[derive(Debug, Clone, PartialEq)]
struct Order {
    id: i64,
    customer: Option<String>,
    qty: Option<i32>,
    placed: Option<NaiveDate>,
    updated: Option<NaiveDateTime>,
}

fn sample_orders() -> Vec<Order> {
    let placed = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    let updated = placed.and_hms_opt(9, 45, 0).unwrap();
    vec![
        Order {
            id: 1,
            customer: Some("ACME".to_string()),
            qty: Some(12),
            placed: Some(placed),
            updated: Some(updated),
        },
        Order {
            id: 2,
            customer: None,
            qty: None,
            placed: None,
            updated: None,
        },
        Order {
            id: -3,
            customer: Some("Bolt & Co".to_string()),
            qty: Some(0),
            placed: Some(placed),
            updated: None,
        },
    ]
}

struct OrdersOut {
    orders: Vec<Order>,
}

impl WriteSheet for OrdersOut {
    fn sheet_name(&self) -> &str {
        "orders"
    }

    fn header(&self) -> Vec<String> {
        ["id", "customer", "qty", "placed", "updated"]
            .map(String::from)
            .to_vec()
    }

    fn generate_content(&mut self, sheet: &mut Worksheet) -> XlResult<()> {
        for (i, o) in self.orders.iter().enumerate() {
            let r = i as u32 + 1;
            write_cell(sheet, r, 0, &CellValue::Int(o.id))?;
            write_cell(sheet, r, 1, &CellValue::from(o.customer.clone()))?;
            write_cell(sheet, r, 2, &CellValue::from(o.qty))?;
            write_cell(sheet, r, 3, &CellValue::from(o.placed))?;
            write_cell(sheet, r, 4, &CellValue::from(o.updated))?;
        }
        Ok(())
    }
}

struct TagsOut;

impl WriteSheet for TagsOut {
    fn sheet_name(&self) -> &str {
        "tags"
    }

    fn header(&self) -> Vec<String> {
        vec!["tag".to_string()]
    }

    fn generate_content(&mut self, sheet: &mut Worksheet) -> XlResult<()> {
        for (i, tag) in ["red", "green"].iter().enumerate() {
            write_cell(sheet, i as u32 + 1, 0, &CellValue::from(*tag))?;
        }
        Ok(())
    }
}

/// One opaque result per descriptor; a pass over differently-shaped sheets
/// shares this enum as its output type.
#[derive(Debug, PartialEq)]
enum PassOut {
    Orders(Vec<Order>),
    Tags(Vec<String>),
}

struct OrdersIn;

impl ReadSheet for OrdersIn {
    type Output = PassOut;

    fn index(&self) -> usize {
        0
    }

    fn skip_header_rows(&self) -> usize {
        1
    }

    fn read_content(
        &mut self,
        _sheet: &Range<Data>,
        rows: &mut Rows<'_, Data>,
    ) -> XlResult<Self::Output> {
        let mut orders = Vec::new();
        for row in rows {
            orders.push(Order {
                id: read_cell_i64(row, 0)?.ok_or_else(|| XlError::TypeMismatch {
                    col: 0,
                    expected: "non-blank id",
                    found: "blank".to_string(),
                })?,
                customer: read_cell_str(row, 1)?.filter(|s| !s.is_empty()),
                qty: read_cell_i32(row, 2)?,
                placed: read_cell_date(row, 3)?,
                updated: read_cell_datetime(row, 4)?,
            });
        }
        Ok(PassOut::Orders(orders))
    }
}

struct TagsIn;

impl ReadSheet for TagsIn {
    type Output = PassOut;

    fn index(&self) -> usize {
        1
    }

    fn skip_header_rows(&self) -> usize {
        1
    }

    fn read_content(
        &mut self,
        _sheet: &Range<Data>,
        rows: &mut Rows<'_, Data>,
    ) -> XlResult<Self::Output> {
        let mut tags = Vec::new();
        for row in rows {
            if let Some(tag) = read_cell_str(row, 0)? {
                tags.push(tag);
            }
        }
        Ok(PassOut::Tags(tags))
    }
}

fn orders_body() -> Vec<u8> {
    let mut writer = XlWriter::new();
    writer
        .add_sheet(OrdersOut {
            orders: sample_orders(),
        })
        .add_sheet(TagsOut);
    writer.generate_body().unwrap()
}

#[test]
fn two_sheet_pass_round_trips_typed_records() {
    let body = orders_body();

    let mut reader = XlReader::new();
    reader.add_sheet(OrdersIn).add_sheet(TagsIn);
    let out = reader.read_bytes(&body).unwrap();

    assert_eq!(
        out,
        vec![
            PassOut::Orders(sample_orders()),
            PassOut::Tags(vec!["red".to_string(), "green".to_string()]),
        ]
    );
}

#[test]
fn open_workbook_path_matches_byte_path() {
    let body = orders_body();
    let mut workbook = Xlsx::new(Cursor::new(body.clone())).unwrap();

    let mut reader = XlReader::new();
    reader.add_sheet(OrdersIn).add_sheet(TagsIn);
    let from_handle = reader.read_workbook(&mut workbook).unwrap();

    let mut reader = XlReader::new();
    reader.add_sheet(OrdersIn).add_sheet(TagsIn);
    let from_bytes = reader.read_bytes(&body).unwrap();

    assert_eq!(from_handle, from_bytes);
}

#[test]
fn absent_values_read_back_as_blank() {
    let body = orders_body();

    struct RawSecondRow;
    impl ReadSheet for RawSecondRow {
        type Output = (Option<String>, Option<i32>);

        fn index(&self) -> usize {
            0
        }

        fn skip_header_rows(&self) -> usize {
            2 // header plus the fully populated first order
        }

        fn read_content(
            &mut self,
            _sheet: &Range<Data>,
            rows: &mut Rows<'_, Data>,
        ) -> XlResult<Self::Output> {
            let row = rows.next().expect("row for order 2");
            // the blank customer and qty read back as None — blank stays
            // distinct from zero and from the empty string
            Ok((read_cell_str(row, 1)?, read_cell_i32(row, 2)?))
        }
    }

    let mut reader = XlReader::new();
    reader.add_sheet(RawSecondRow);
    let out = reader.read_bytes(&body).unwrap();

    assert_eq!(out, vec![(None, None)]);
}

// ================================================================================================
// row-count cap
// ================================================================================================

struct Bulk {
    data_rows: u32,
}

impl WriteSheet for Bulk {
    fn sheet_name(&self) -> &str {
        "bulk"
    }

    fn header(&self) -> Vec<String> {
        vec!["v".to_string()]
    }

    fn generate_content(&mut self, sheet: &mut Worksheet) -> XlResult<()> {
        for i in 0..self.data_rows {
            write_cell(sheet, i + 1, 0, &CellValue::Int(i as i64))?;
        }
        Ok(())
    }
}

struct CountRows;

impl ReadSheet for CountRows {
    type Output = usize;

    fn index(&self) -> usize {
        0
    }

    fn skip_header_rows(&self) -> usize {
        1
    }

    fn read_content(
        &mut self,
        _sheet: &Range<Data>,
        rows: &mut Rows<'_, Data>,
    ) -> XlResult<Self::Output> {
        Ok(rows.count())
    }
}

fn bulk_body(data_rows: u32) -> Vec<u8> {
    let mut writer = XlWriter::new();
    writer.add_sheet(Bulk { data_rows });
    writer.generate_body().unwrap()
}

#[test]
fn sheet_at_the_row_cap_reads() {
    // header + 99_999 data rows = exactly 100_000 occupied rows
    let body = bulk_body(99_999);

    let mut reader = XlReader::new();
    reader.add_sheet(CountRows);
    let out = reader.read_bytes(&body).unwrap();

    assert_eq!(out, vec![99_999]);
}

#[test]
fn sheet_over_the_row_cap_fails_both_paths() {
    // header + 100_000 data rows = 100_001 occupied rows
    let body = bulk_body(100_000);

    let mut reader = XlReader::new();
    reader.add_sheet(CountRows);
    assert!(matches!(
        reader.read_bytes(&body),
        Err(XlError::RowLimitExceeded { rows: 100_001, .. })
    ));

    let mut workbook = Xlsx::new(Cursor::new(body)).unwrap();
    let mut reader = XlReader::new();
    reader.add_sheet(CountRows);
    assert!(matches!(
        reader.read_workbook(&mut workbook),
        Err(XlError::RowLimitExceeded { rows: 100_001, .. })
    ));
}
