use thiserror::Error;

/// Header names accepted for the numeric column, compared case-insensitively.
pub const PERCENT_HEADERS: &[&str] = &["percentage", "percent", "value"];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CsvError {
    #[error("CSV file is empty or invalid")]
    Format,

    #[error("CSV must contain a \"percentage\", \"percent\", or \"value\" column")]
    Schema,

    #[error("No valid percentage values found in CSV")]
    NoData,

    #[error("CSV average {0:.2} is outside the 0-100 range")]
    OutOfRange(f64),
}

impl CsvError {
    pub fn code(&self) -> &'static str {
        match self {
            CsvError::Format => "CSV_FORMAT_ERROR",
            CsvError::Schema => "CSV_SCHEMA_ERROR",
            CsvError::NoData => "CSV_NO_DATA",
            CsvError::OutOfRange(_) => "CSV_OUT_OF_RANGE",
        }
    }
}

/// Averages the percentage column of an uploaded CSV document.
///
/// The first row is the header. The first column named `percentage`, `percent`
/// or `value` is averaged; rows that are too short or hold a non-numeric value
/// in that column are skipped without aborting the aggregate.
pub fn extract_average(text: &str) -> Result<f64, CsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.trim().as_bytes());

    let mut records = reader.records();
    let header = match records.next() {
        Some(Ok(header)) => header,
        _ => return Err(CsvError::Format),
    };
    let rows: Vec<csv::StringRecord> = records.filter_map(Result::ok).collect();
    if rows.is_empty() {
        return Err(CsvError::Format);
    }

    let column = header
        .iter()
        .position(|h| {
            let h = h.to_lowercase();
            PERCENT_HEADERS.contains(&h.as_str())
        })
        .ok_or(CsvError::Schema)?;

    let mut total = 0.0_f64;
    let mut count = 0usize;
    for row in &rows {
        let Some(raw) = row.get(column) else {
            continue;
        };
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => {
                total += v;
                count += 1;
            }
            _ => continue,
        }
    }

    if count == 0 {
        return Err(CsvError::NoData);
    }
    Ok(total / count as f64)
}

/// [`extract_average`] plus the [0, 100] range check applied before a course is created.
pub fn extract_percentage(text: &str) -> Result<f64, CsvError> {
    let average = extract_average(text)?;
    if !(0.0..=100.0).contains(&average) {
        return Err(CsvError::OutOfRange(average));
    }
    Ok(average)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_average() {
        assert_eq!(extract_average("percentage\n10\n20\n30"), Ok(20.0));
    }

    #[test]
    fn test_header_only_is_format_error() {
        assert_eq!(extract_average("percentage"), Err(CsvError::Format));
        assert_eq!(extract_average("percentage\n\n\n"), Err(CsvError::Format));
    }

    #[test]
    fn test_empty_input_is_format_error() {
        assert_eq!(extract_average(""), Err(CsvError::Format));
        assert_eq!(extract_average("   \n  "), Err(CsvError::Format));
    }

    #[test]
    fn test_unknown_header_is_schema_error() {
        assert_eq!(extract_average("foo\n1\n2"), Err(CsvError::Schema));
    }

    #[test]
    fn test_non_numeric_only_is_no_data() {
        assert_eq!(extract_average("percentage\nabc"), Err(CsvError::NoData));
    }

    #[test]
    fn test_header_match_is_case_insensitive_and_trimmed() {
        assert_eq!(extract_average("student, Percent \nA, 80\nB, 90"), Ok(85.0));
        assert_eq!(extract_average("VALUE\n50"), Ok(50.0));
    }

    #[test]
    fn test_first_matching_column_wins() {
        assert_eq!(extract_average("value,percentage\n10,90\n20,80"), Ok(15.0));
    }

    #[test]
    fn test_short_and_bad_rows_are_skipped() {
        let text = "name,week,percentage\nalice,1,60\nbob,2\ncarol,3,n/a\ndave,4,80";
        assert_eq!(extract_average(text), Ok(70.0));
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(extract_average("percentage\r\n40\r\n60\r\n"), Ok(50.0));
    }

    #[test]
    fn test_nan_and_infinity_are_not_counted() {
        assert_eq!(extract_average("percentage\nNaN\ninf\n42"), Ok(42.0));
    }

    #[test]
    fn test_percentage_range_check() {
        assert_eq!(extract_percentage("percentage\n95\n85"), Ok(90.0));
        assert_eq!(
            extract_percentage("percentage\n150\n170"),
            Err(CsvError::OutOfRange(160.0))
        );
    }

    #[test]
    fn test_error_messages_match_user_text() {
        assert_eq!(CsvError::Format.to_string(), "CSV file is empty or invalid");
        assert_eq!(CsvError::NoData.code(), "CSV_NO_DATA");
    }
}
