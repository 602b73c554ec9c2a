//! The preprocessor front: finds conditional blocks, applies suppression,
//! renders the transformed text, and attaches location context to the one
//! fatal error a run can end with.

mod render;

pub use render::RenderMode;

use crate::diag::{Diagnostic, Location, PreprocessError};
use crate::env::Environment;
use crate::parser::{parse_block, DirectiveKind, DirectiveMatcher, ScanError, ScanState};

/// Rendering and tracing knobs.
#[derive(Debug, Clone)]
pub struct Options {
    pub render: RenderMode,
    /// Prefix for suppressed lines in `Comment` mode.
    pub comment_marker: String,
    /// Trace branch decisions to stderr.
    pub verbose: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            render: RenderMode::Comment,
            comment_marker: "// ".to_string(),
            verbose: false,
        }
    }
}

/// Output of a successful run: transformed text plus collected warnings.
#[derive(Debug)]
pub struct ProcessResult {
    pub text: String,
    pub warnings: Vec<Diagnostic>,
}

/// Conditional-compilation preprocessor over in-memory text. Holds the
/// directive grammar, the variable environment, and rendering options;
/// `process` only borrows them, so one instance can serve many files.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    matcher: DirectiveMatcher,
    env: Environment,
    options: Options,
}

impl Preprocessor {
    pub fn new(env: Environment) -> Self {
        Self::with_options(env, Options::default())
    }

    pub fn with_options(env: Environment, options: Options) -> Self {
        Self {
            matcher: DirectiveMatcher::new(),
            env,
            options,
        }
    }

    /// Swap in a different directive grammar.
    pub fn set_matcher(&mut self, matcher: DirectiveMatcher) {
        self.matcher = matcher;
    }

    /// Transform one file's text. Stops at the first fatal condition; on
    /// success the output has exactly as many lines as the input.
    pub fn process(&self, source: &str) -> Result<ProcessResult, PreprocessError> {
        let lines: Vec<&str> = source.split('\n').collect();
        let mut state = ScanState::new(&self.matcher, &self.env, self.options.verbose);

        // Only `if` opens a block here; any other directive word outside an
        // open block is ordinary content.
        let mut index = 0;
        while index < lines.len() {
            let opening = self
                .matcher
                .match_line(lines[index])
                .filter(|directive| directive.kind == DirectiveKind::If);

            match opening {
                Some(directive) => {
                    let end = parse_block(&lines, index, &directive, false, &mut state)
                        .map_err(|err| enrich(err, &lines, &self.matcher))?;
                    index = end + 1;
                }
                None => index += 1,
            }
        }

        if self.options.verbose {
            eprintln!(
                "  └─ {} of {} line(s) suppressed, {} warning(s)",
                state.suppressed.len(),
                lines.len(),
                state.warnings.len()
            );
        }

        let text = render::render(&lines, &state.suppressed, &self.options);
        Ok(ProcessResult {
            text,
            warnings: state.warnings,
        })
    }
}

/// Attach user-facing location context to a scan failure. Column and length
/// are recovered by re-matching the offending line.
fn enrich(err: ScanError, lines: &[&str], matcher: &DirectiveMatcher) -> PreprocessError {
    let index = err.line_index();
    let line_text = lines.get(index).copied().unwrap_or("").to_string();
    let (column, length) = match matcher.match_line(&line_text) {
        Some(directive) => (Some(directive.column), Some(directive.length)),
        None => (None, None),
    };
    let location = Location {
        line: index + 1,
        line_text,
        column,
        length,
    };

    match err {
        ScanError::Unterminated { .. } => PreprocessError::UnterminatedBlock { location },
        ScanError::Expression {
            expression, source, ..
        } => PreprocessError::Expression {
            expression,
            reason: source,
            location,
        },
        ScanError::Directive { message, .. } => PreprocessError::Directive { message, location },
    }
}
