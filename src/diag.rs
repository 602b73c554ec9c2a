//! Diagnostics surface: warnings collected during a scan and the single
//! fatal error a scan can end with.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::eval::EvalError;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A non-fatal finding reported back alongside the transformed text.
/// `line` is 1-based; `column` counts leading whitespace characters and
/// `length` the trimmed directive text, so editors can underline it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub length: usize,
}

/// Where a fatal error was raised. `column`/`length` are present when the
/// offending line still matches the directive grammar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub line: usize,
    pub line_text: String,
    pub column: Option<usize>,
    pub length: Option<usize>,
}

/// The one error a preprocessing run can fail with. Scanning stops at the
/// first of these; no partial output is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PreprocessError {
    #[error("line {line}: `#if` without matching `#endif`", line = .location.line)]
    UnterminatedBlock { location: Location },

    #[error(
        "line {line}: cannot evaluate `{expression}`: {reason}",
        line = .location.line
    )]
    Expression {
        expression: String,
        reason: EvalError,
        location: Location,
    },

    #[error("line {line}: {message}", line = .location.line)]
    Directive { message: String, location: Location },
}

impl PreprocessError {
    pub fn location(&self) -> &Location {
        match self {
            PreprocessError::UnterminatedBlock { location } => location,
            PreprocessError::Expression { location, .. } => location,
            PreprocessError::Directive { location, .. } => location,
        }
    }
}
