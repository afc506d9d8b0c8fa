/// True when the text holds nothing but whitespace or control characters
pub fn is_blank(value: &str) -> bool {
    value.chars().all(|c| c.is_whitespace() || c.is_control())
}

/// Parse numeric text as typed into a spreadsheet cell.
/// Thousands separators (`,` and the full-width `，`) and surrounding whitespace are ignored.
pub fn parse_numeric_text(value: &str) -> Option<f64> {
    let cleaned: String = value
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '，')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("\n\t "));
        assert!(!is_blank(" 新宿 "));
    }

    #[test]
    fn test_parse_numeric_text() {
        assert_eq!(parse_numeric_text("500"), Some(500.0));
        assert_eq!(parse_numeric_text(" 1,000 "), Some(1000.0));
        assert_eq!(parse_numeric_text("1，000"), Some(1000.0));
        assert_eq!(parse_numeric_text("12.5"), Some(12.5));
        assert_eq!(parse_numeric_text(""), None);
        assert_eq!(parse_numeric_text("abc"), None);
        assert_eq!(parse_numeric_text("NaN"), None);
        assert_eq!(parse_numeric_text("inf"), None);
    }
}
