use crate::format::tiff::DecodedValue;

/// Separator between elements of list values.
pub const LIST_SEPARATOR: &str = ", ";

/// Render a decoded value as a display string.
///
/// Rationals are rounded to `decimal_places` with trailing zeros trimmed, so
/// `1/3` becomes `0.3333` and `72/1` becomes `72`. [`DecodedValue::None`]
/// renders as the empty string.
pub fn normalize_value(value: &DecodedValue, decimal_places: u8) -> String {
    match value {
        DecodedValue::Text(text) => text.trim_end().to_string(),
        DecodedValue::Integer(v) => v.to_string(),
        DecodedValue::IntegerList(values) => values
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR),
        DecodedValue::Rational(v) => format_decimal(*v, decimal_places),
        DecodedValue::RationalList(values) => values
            .iter()
            .map(|v| format_decimal(*v, decimal_places))
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR),
        DecodedValue::None => String::new(),
    }
}

/// Round to `decimal_places` and drop trailing zeros.
pub fn format_decimal(value: f64, decimal_places: u8) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let mut text = format!("{:.*}", decimal_places as usize, value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }

    // Small negatives round to "-0"
    if text == "-0" {
        text = "0".to_string();
    }
    text
}
