use crate::diag::{Diagnostic, Severity};
use crate::env::Environment;
use crate::eval;

use super::directive::DirectiveMatcher;
use super::types::{BlockFrame, Directive, DirectiveKind, ScanError, SuppressionSet};

/// Shared bookkeeping for one scan over a file.
pub(crate) struct ScanState<'a> {
    pub matcher: &'a DirectiveMatcher,
    pub env: &'a Environment,
    pub suppressed: SuppressionSet,
    pub warnings: Vec<Diagnostic>,
    pub verbose: bool,
}

impl<'a> ScanState<'a> {
    pub fn new(matcher: &'a DirectiveMatcher, env: &'a Environment, verbose: bool) -> Self {
        Self {
            matcher,
            env,
            suppressed: SuppressionSet::new(),
            warnings: Vec::new(),
            verbose,
        }
    }

    fn evaluate(&self, directive: &Directive, index: usize) -> Result<bool, ScanError> {
        let expression = directive.expression.as_deref().unwrap_or("");
        let active =
            eval::evaluate(expression, self.env).map_err(|source| ScanError::Expression {
                line: index,
                expression: expression.to_string(),
                source,
            })?;
        if self.verbose {
            eprintln!("  ├─ line {}: `{}` => {}", index + 1, expression, active);
        }
        Ok(active)
    }
}

/// Walk one conditional block from its opening `if` (already matched by the
/// caller) to the matching `endif`, marking suppressed lines and collecting
/// warnings as it goes. Returns the `endif` index so the caller resumes
/// after it. Nesting lives on an explicit frame stack, not the call stack.
pub(crate) fn parse_block(
    lines: &[&str],
    start: usize,
    opening: &Directive,
    inherited_ignore: bool,
    state: &mut ScanState,
) -> Result<usize, ScanError> {
    state.suppressed.mark(start);
    let mut frames = vec![open_frame(opening, start, inherited_ignore, state)?];

    let mut index = start + 1;
    while index < lines.len() {
        let Some(&top) = frames.last() else {
            break;
        };

        match state.matcher.match_line(lines[index]) {
            None => {
                if top.prune || top.ignore {
                    state.suppressed.mark(index);
                }
            }
            Some(directive) => {
                // Directive lines never survive into the output, active
                // branch or not.
                state.suppressed.mark(index);

                match directive.kind {
                    DirectiveKind::If => {
                        let nested_ignore = top.ignore || top.prune;
                        frames.push(open_frame(&directive, index, nested_ignore, state)?);
                    }
                    DirectiveKind::ElseIf => {
                        let (done, prune) = if top.ignore || top.done {
                            (top.done, true)
                        } else {
                            let active = state.evaluate(&directive, index)?;
                            (active, !active)
                        };
                        if let Some(frame) = frames.last_mut() {
                            frame.done = done;
                            frame.prune = prune;
                        }
                    }
                    DirectiveKind::Else => {
                        if !top.ignore {
                            if let Some(frame) = frames.last_mut() {
                                frame.prune = frame.done;
                            }
                        }
                    }
                    DirectiveKind::EndIf => {
                        frames.pop();
                        if frames.is_empty() {
                            return Ok(index);
                        }
                    }
                    DirectiveKind::Warning => {
                        if !top.prune && !top.ignore {
                            state.warnings.push(Diagnostic {
                                severity: Severity::Warning,
                                message: directive.expression.clone().unwrap_or_default(),
                                line: index + 1,
                                column: directive.column,
                                length: directive.length,
                            });
                        }
                    }
                    DirectiveKind::Error => {
                        if !top.prune && !top.ignore {
                            return Err(ScanError::Directive {
                                line: index,
                                message: directive.expression.clone().unwrap_or_default(),
                            });
                        }
                    }
                }
            }
        }

        index += 1;
    }

    // Ran out of lines with frames still open: report the innermost one.
    Err(ScanError::Unterminated {
        opening: frames.last().map(|frame| frame.start).unwrap_or(start),
    })
}

fn open_frame(
    directive: &Directive,
    index: usize,
    ignore: bool,
    state: &ScanState,
) -> Result<BlockFrame, ScanError> {
    // Blocks inside an inactive branch are located but never evaluated.
    if ignore {
        return Ok(BlockFrame {
            start: index,
            done: false,
            prune: true,
            ignore: true,
        });
    }

    let active = state.evaluate(directive, index)?;
    Ok(BlockFrame {
        start: index,
        done: active,
        prune: !active,
        ignore: false,
    })
}
