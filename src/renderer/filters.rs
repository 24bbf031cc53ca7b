use chrono::format::{Item, StrftimeItems};
use chrono::DateTime;
use minijinja::{Error, ErrorKind};

/// Pattern used by `datetimeformat` when the template does not give one.
pub const DEFAULT_DATETIME_PATTERN: &str = "%H:%M / %d-%m-%Y";

/// Formats an RFC 3339 timestamp with a strftime pattern.
///
/// # Arguments
/// * `value` - The timestamp, e.g. the `now` context variable
/// * `pattern` - A `chrono` strftime pattern
///
/// # Returns
/// * `Result<String, Error>` - The formatted timestamp, or an error for an
///   unparsable timestamp or an invalid pattern
pub fn datetimeformat(value: &str, pattern: Option<&str>) -> Result<String, Error> {
    let timestamp = DateTime::parse_from_rfc3339(value).map_err(|e| {
        Error::new(ErrorKind::InvalidOperation, format!("invalid timestamp '{value}': {e}"))
    })?;

    let pattern = pattern.unwrap_or(DEFAULT_DATETIME_PATTERN);
    let items: Vec<Item> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("invalid datetime pattern '{pattern}'"),
        ));
    }
    Ok(timestamp.format_with_items(items.into_iter()).to_string())
}
