use crate::error::WlgenError;

/// Quotes `text` the way JSON would, for use in error messages.
pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

pub fn error(msg: &str, line: usize, column: usize) -> WlgenError {
    WlgenError::ParseError {
        msg: msg.to_string(),
        line,
        column,
    }
}
