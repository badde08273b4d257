// ============================================================
// CSV PARSER
// ============================================================
// Parse decoded CSV text into a header-having raw table

use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;

use crate::domain::dataset::RawTable;
use crate::domain::error::{AppError, Result};

/// Cell contents read as a missing value
pub const NULL_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Comma-delimited CSV parser producing a `RawTable`
#[derive(Debug, Default)]
pub struct CsvParser;

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse CSV content from string.
    ///
    /// Fails when there is no header, or when a record has more fields than
    /// the header. Short records are padded with nulls.
    pub fn parse_content(&self, content: &str) -> Result<RawTable> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();

        if headers.is_empty() || (headers.len() == 1 && headers[0].trim().is_empty()) {
            return Err(AppError::ParseError(
                "No columns to parse from file".to_string(),
            ));
        }

        let width = headers.len();
        let mut records = Vec::new();

        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;

            if record.len() > width {
                let line = record
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(index as u64 + 2);
                return Err(AppError::ParseError(format!(
                    "Expected {} fields in line {}, saw {}",
                    width,
                    line,
                    record.len()
                )));
            }

            records.push(Self::parse_row(width, &record));
        }

        Ok(RawTable {
            headers: Self::dedupe_headers(&headers),
            records,
        })
    }

    /// Convert a record to cells, padding to the header width
    fn parse_row(width: usize, record: &StringRecord) -> Vec<Option<String>> {
        (0..width)
            .map(|idx| {
                record
                    .get(idx)
                    .filter(|value| !NULL_TOKENS.contains(value))
                    .map(str::to_string)
            })
            .collect()
    }

    /// Name blank headers `Unnamed: {i}` and suffix repeats with `.1`, `.2`, ...
    fn dedupe_headers(headers: &StringRecord) -> Vec<String> {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut names = Vec::with_capacity(headers.len());

        for (idx, header) in headers.iter().enumerate() {
            let base = if header.trim().is_empty() {
                format!("Unnamed: {}", idx)
            } else {
                header.to_string()
            };

            let mut name = base.clone();
            if let Some(&last) = seen.get(&base) {
                let mut suffix = last;
                loop {
                    suffix += 1;
                    name = format!("{}.{}", base, suffix);
                    if !seen.contains_key(&name) {
                        break;
                    }
                }
                seen.insert(base, suffix);
            }
            seen.insert(name.clone(), 0);
            names.push(name);
        }

        names
    }
}
