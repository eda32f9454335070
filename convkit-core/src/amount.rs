//! Amount parsing from free-form text input

/// Parse the amount typed by the user.
///
/// - Empty text means "nothing entered yet" and yields `None`.
/// - Anything else yields a number; text that is not a finite decimal
///   number is read as `0.0`. Surrounding whitespace is ignored.
pub fn parse_amount(text: &str) -> Option<f64> {
    if text.is_empty() {
        return None;
    }

    let value = text
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0);

    Some(value)
}
