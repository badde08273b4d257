// ============================================================
// CSV EXPORT
// ============================================================
// Serialize a filtered view back to UTF-8 CSV for download

use csv::WriterBuilder;

use crate::domain::dataset::Dataset;
use crate::domain::error::{AppError, Result};

/// Header row plus every row of `view`, UTF-8 encoded. Nulls are written as
/// empty fields.
pub fn export_csv(view: &Dataset) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());

    writer.write_record(view.headers())?;
    for record in view.records() {
        writer.write_record(record.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Failed to finish CSV export: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::Column;
    use crate::infrastructure::csv::CsvParser;

    fn view() -> Dataset {
        Dataset::new(vec![
            Column::text("종목명", vec![Some("Apple, Inc.".into()), None]),
            Column::number("평가액(억 원)", vec![Some(1000.0), Some(2500.0)], true),
            Column::number("지분율(퍼센트)", vec![Some(0.5), None], false),
        ])
        .unwrap()
    }

    #[test]
    fn test_export_writes_header_and_rows() {
        let bytes = export_csv(&view()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "종목명,평가액(억 원),지분율(퍼센트)\n\"Apple, Inc.\",1000,0.5\n,2500,\n"
        );
    }

    #[test]
    fn test_export_of_empty_view_is_header_only() {
        let empty = view().select_rows(&[]);
        let text = String::from_utf8(export_csv(&empty).unwrap()).unwrap();
        assert_eq!(text, "종목명,평가액(억 원),지분율(퍼센트)\n");
    }

    #[test]
    fn test_export_large_integral_values_without_fraction() {
        let view = Dataset::new(vec![
            Column::text("종목명", vec![Some("Big".into())]),
            Column::number("평가액(억 원)", vec![Some(1.0e16)], true),
        ])
        .unwrap();
        let text = String::from_utf8(export_csv(&view).unwrap()).unwrap();
        assert_eq!(text, "종목명,평가액(억 원)\nBig,10000000000000000\n");
    }

    #[test]
    fn test_export_reparses_to_same_cells() {
        let bytes = export_csv(&view()).unwrap();
        let table = CsvParser::new()
            .parse_content(std::str::from_utf8(&bytes).unwrap())
            .unwrap();
        assert_eq!(table.headers, view().headers());
        assert_eq!(table.records[0][0].as_deref(), Some("Apple, Inc."));
        assert_eq!(table.records[1][0], None);
    }
}
