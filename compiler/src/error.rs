use std::string::FromUtf8Error;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WlgenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    #[error("Malformed XML at line {line}, column {column}: {msg}")]
    Xml {
        msg:    String,
        line:   usize,
        column: usize,
    },

    #[error("Parse error at line {line}, column {column}: {msg}")]
    ParseError {
        msg:    String,
        line:   usize,
        column: usize,
    },

    #[error("Protocol {0} has no interfaces")]
    NoInterfaces(String),

    #[error("Enum {interface}::{name} has no entries")]
    EmptyEnum {
        interface: String,
        name:      String,
    },

    #[error("Verifier error: {0}")]
    VerifierError(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JSON rendering failed: {0}")]
    Json(#[from] serde_json::Error),
}
