// src/csv_import.rs

use csv::{ReaderBuilder, Trim};
use thiserror::Error;

use crate::phone;

/// Column the importer reads numbers from.
pub const PHONE_COLUMN: &str = "phone";

#[derive(Debug, Error)]
pub enum CsvImportError {
    #[error("could not read CSV header: {0}")]
    Header(#[from] csv::Error),
}

/// Parse an uploaded CSV (first line is the header) into the ordered list
/// of valid 10-digit numbers found in its `phone` column.
///
/// Rows that are malformed, lack the column, or hold anything other than
/// 10 digits are dropped without being reported.
pub fn import_phones(bytes: &[u8]) -> Result<Vec<String>, CsvImportError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(bytes);

    let Some(col) = rdr.headers()?.iter().position(|h| h == PHONE_COLUMN) else {
        tracing::debug!("csv upload has no `{PHONE_COLUMN}` column");
        return Ok(Vec::new());
    };

    let mut phones = Vec::new();
    for (index, record) in rdr.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(record = index, "skipping malformed csv row: {e}");
                continue;
            }
        };

        match record.get(col).and_then(phone::normalize) {
            Some(p) => phones.push(p),
            None => tracing::debug!(record = index, "skipping csv row without a 10-digit phone"),
        }
    }

    Ok(phones)
}
