use std::collections::HashSet;

use crate::eval::EvalError;

/// Kind of a matched directive line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    If,
    ElseIf,
    Else,
    EndIf,
    Warning,
    Error,
}

impl DirectiveKind {
    /// Map a captured token word to its kind. An unknown word means the
    /// line is not a directive at all. Matching is case-sensitive.
    pub(crate) fn from_token(token: &str) -> Option<Self> {
        match token {
            "if" => Some(DirectiveKind::If),
            "elseif" | "elif" => Some(DirectiveKind::ElseIf),
            "else" => Some(DirectiveKind::Else),
            "endif" => Some(DirectiveKind::EndIf),
            "warning" | "warn" => Some(DirectiveKind::Warning),
            "error" | "err" => Some(DirectiveKind::Error),
            _ => None,
        }
    }
}

/// One matched directive line.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub kind: DirectiveKind,
    /// Condition or message text; absent when the capture is empty.
    pub expression: Option<String>,
    /// Leading-whitespace width of the line, in characters.
    pub column: usize,
    /// Width of the trimmed directive text, in characters.
    pub length: usize,
}

/// Branch state for one open `if` chain.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BlockFrame {
    /// Index of the opening `if` line.
    pub start: usize,
    /// Some branch of this chain has matched.
    pub done: bool,
    /// The branch currently being scanned is inactive.
    pub prune: bool,
    /// The whole block sits inside an inactive outer branch.
    pub ignore: bool,
}

/// Line indices marked for suppression during a scan.
#[derive(Debug, Default)]
pub(crate) struct SuppressionSet {
    lines: HashSet<usize>,
}

impl SuppressionSet {
    pub fn new() -> Self {
        Self {
            lines: HashSet::new(),
        }
    }

    pub fn mark(&mut self, index: usize) {
        self.lines.insert(index);
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.lines.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

/// Scan failure, fatal for the whole file. Indices are 0-based here; the
/// formatter converts them to user-facing positions.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ScanError {
    /// The `if` at this index never found its `endif`.
    Unterminated { opening: usize },
    /// An `if`/`elseif` expression failed to evaluate.
    Expression {
        line: usize,
        expression: String,
        source: EvalError,
    },
    /// An `#error` directive in an active branch.
    Directive { line: usize, message: String },
}

impl ScanError {
    pub fn line_index(&self) -> usize {
        match self {
            ScanError::Unterminated { opening } => *opening,
            ScanError::Expression { line, .. } => *line,
            ScanError::Directive { line, .. } => *line,
        }
    }
}
