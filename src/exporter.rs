//! Record to XLSX export.
//!
//! One header row of field names, then one row per record, in a single
//! worksheet. Integers become numeric cells, text becomes string cells and
//! dates are written as ISO-8601 text. Integers beyond 2^53 in magnitude do
//! not fit a spreadsheet number exactly and are written as text.

use log::warn;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::error::ExportError;
use crate::record::{Record, Schema, Tabular, Value};

/// File name offered to the browser for the users report
pub const REPORT_FILENAME: &str = "report.xlsx";

/// MIME type of an Office Open XML workbook
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const MAX_COLUMNS: usize = 16_384;
const MAX_ROWS: usize = 1_048_576;

/// Largest magnitude an `f64` cell holds without rounding (2^53)
const MAX_EXACT_NUMBER: u64 = 1 << 53;

/// What to do with a record whose fields differ from the header
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SchemaPolicy {
    /// Abort the export with `ExportError::SchemaMismatch`
    #[default]
    Reject,

    /// Log a warning and write the record's values in its own field order
    Positional,
}

/// Builds a single-sheet workbook from records
///
/// Without a declared schema the header is taken from the first record.
#[derive(Clone, Debug, Default)]
pub struct Exporter {
    header: Option<Vec<String>>,
    policy: SchemaPolicy,
}

impl Exporter {
    /// Exporter that derives its header from the first record
    pub fn new() -> Self {
        Exporter::default()
    }

    /// Exporter with a fixed header, which also makes empty input valid
    pub fn with_schema(schema: &Schema) -> Self {
        Exporter {
            header: Some(schema.names()),
            policy: SchemaPolicy::default(),
        }
    }

    pub fn policy(mut self, policy: SchemaPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Convert records to XLSX bytes
    ///
    /// # Arguments
    /// * `records` - Records in output row order
    ///
    /// # Returns
    /// * `Result<Vec<u8>, ExportError>` - XLSX file content as bytes or an error
    ///
    /// # Examples
    /// ```
    /// use user_report::exporter::Exporter;
    /// use user_report::record::Record;
    ///
    /// let records = vec![Record::new().with("id", 1).with("name", "John")];
    /// match Exporter::new().export(&records) {
    ///     Ok(xlsx_data) => println!("XLSX generated: {} bytes", xlsx_data.len()),
    ///     Err(e) => eprintln!("Failed to generate XLSX: {}", e),
    /// }
    /// ```
    pub fn export(&self, records: &[Record]) -> Result<Vec<u8>, ExportError> {
        let header = match (&self.header, records.first()) {
            (Some(header), _) => header.clone(),
            (None, Some(first)) => first.keys().map(str::to_string).collect(),
            (None, None) => return Err(ExportError::EmptyInput),
        };

        if header.len() > MAX_COLUMNS {
            return Err(ExportError::TooManyColumns(header.len()));
        }
        if records.len() >= MAX_ROWS {
            return Err(ExportError::TooManyRows(records.len() + 1));
        }

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (col, name) in header.iter().enumerate() {
            worksheet.write_string(0, col as u16, name.as_str())?;
        }

        for (index, record) in records.iter().enumerate() {
            let row = index + 1;
            if !record.has_fields(&header) {
                let found: Vec<String> = record.keys().map(str::to_string).collect();
                match self.policy {
                    SchemaPolicy::Reject => {
                        return Err(ExportError::SchemaMismatch {
                            row,
                            expected: header,
                            found,
                        });
                    }
                    SchemaPolicy::Positional => {
                        warn!(
                            "Row {} fields {:?} do not match header {:?}; writing positionally",
                            row, found, header
                        );
                    }
                }
            }

            for (col, value) in record.values().enumerate() {
                if col >= MAX_COLUMNS {
                    return Err(ExportError::TooManyColumns(record.len()));
                }
                write_value(worksheet, row as u32, col as u16, value)?;
            }
        }

        let buffer = workbook.save_to_buffer()?;

        Ok(buffer)
    }
}

/// Export typed rows using their declared schema
///
/// A `Tabular` type cannot produce a mismatching record, so this never fails
/// with `SchemaMismatch`; an empty slice yields a header-only workbook.
pub fn export_rows<T: Tabular>(rows: &[T]) -> Result<Vec<u8>, ExportError> {
    let records: Vec<Record> = rows.iter().map(Tabular::to_record).collect();
    Exporter::with_schema(&T::schema()).export(&records)
}

fn write_value(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &Value,
) -> Result<(), ExportError> {
    match value {
        Value::Integer(n) if n.unsigned_abs() <= MAX_EXACT_NUMBER => {
            worksheet.write_number(row, col, *n as f64)?
        }
        // a numeric cell would round it
        Value::Integer(n) => worksheet.write_string(row, col, n.to_string().as_str())?,
        Value::Text(s) => worksheet.write_string(row, col, s.as_str())?,
        Value::Date(_) => worksheet.write_string(row, col, value.to_string().as_str())?,
    };
    Ok(())
}
