use serde::Serialize;
use thiserror::Error;

use crate::cell::LineKind;

/// Hard failure. Only input that is not text at all ends up here.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("modem output is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Why a recognised line could not be turned into a record.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineError {
    #[error("unrecognised radio type {token:?}")]
    UnknownRadio { token: String },

    #[error("unrecognised carrier role {token:?}")]
    UnknownRole { token: String },

    #[error("{layout} expects {min}..={max} fields, found {found}")]
    FieldCount {
        layout: &'static str,
        min: usize,
        max: usize,
        found: usize,
    },

    #[error("field {field} has invalid value {value:?}")]
    InvalidField { field: &'static str, value: String },
}

/// A line that was skipped. Decoding carries on with the next line.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("line {line_number} ({kind:?}): {reason}")]
pub struct MalformedLine {
    /// 1-based, counted after unescaping.
    pub line_number: usize,
    pub kind: LineKind,
    pub reason: LineError,
    pub raw: String,
}
