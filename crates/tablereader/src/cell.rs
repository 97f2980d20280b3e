//! Stringification of native spreadsheet cell values.

use calamine::{Data, ExcelDateTime};

/// Convert a calamine cell to its canonical string form.
///
/// Numbers use the shortest decimal representation that round-trips, so an
/// integral float renders without a fractional part (`12345.0` -> `"12345"`)
/// and fractions keep full precision (`0.125` -> `"0.125"`). The same policy
/// applies to binary and zip workbooks.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Error(e) => e.to_string(),
        Data::DateTime(dt) => datetime_to_string(dt),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Render a date cell as `YYYY-MM-DD HH:MM:SS`.
///
/// Durations and serials outside the calendar fall back to the serial number.
fn datetime_to_string(dt: &ExcelDateTime) -> String {
    if dt.is_datetime() {
        if let Some(value) = dt.as_datetime() {
            return value.to_string();
        }
    }
    dt.as_f64().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{CellErrorType, ExcelDateTimeType};

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String("Beispiel".to_string())), "Beispiel");
        assert_eq!(cell_to_string(&Data::Int(42)), "42");
        assert_eq!(cell_to_string(&Data::Bool(true)), "true");
        assert_eq!(cell_to_string(&Data::Bool(false)), "false");
    }

    #[test]
    fn test_numeric_policy_keeps_full_decimals() {
        assert_eq!(cell_to_string(&Data::Float(12345.0)), "12345");
        assert_eq!(cell_to_string(&Data::Float(0.125)), "0.125");
        assert_eq!(cell_to_string(&Data::Float(2.35)), "2.35");
        assert_eq!(cell_to_string(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_to_string(&Data::Float(-7.0)), "-7");
    }

    #[test]
    fn test_text_passes_through_unchanged() {
        assert_eq!(cell_to_string(&Data::String("  padded ".to_string())), "  padded ");
        assert_eq!(
            cell_to_string(&Data::DateTimeIso("2015-12-01T10:00:00".to_string())),
            "2015-12-01T10:00:00"
        );
    }

    #[test]
    fn test_error_cell() {
        assert_eq!(cell_to_string(&Data::Error(CellErrorType::Div0)), "#DIV/0!");
    }

    #[test]
    fn test_datetime_cell() {
        // 42339 is 2015-12-01 in the 1900 date system
        let dt = ExcelDateTime::new(42339.5, ExcelDateTimeType::DateTime, false);
        assert_eq!(cell_to_string(&Data::DateTime(dt)), "2015-12-01 12:00:00");
    }

    #[test]
    fn test_duration_falls_back_to_serial() {
        let dt = ExcelDateTime::new(1.5, ExcelDateTimeType::TimeDelta, false);
        assert_eq!(cell_to_string(&Data::DateTime(dt)), "1.5");
    }
}
