use crate::parser::SuppressionSet;

use super::Options;

/// How suppressed lines appear in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Prefix the original text with a line-comment marker (default).
    Comment,
    /// Replace the text with spaces of equal character length.
    Blank,
}

/// Rebuild the file, replacing suppressed lines per the render mode. One
/// output line per input line, by construction.
pub(crate) fn render(lines: &[&str], suppressed: &SuppressionSet, options: &Options) -> String {
    let mut out = Vec::with_capacity(lines.len());
    for (index, line) in lines.iter().enumerate() {
        if suppressed.is_marked(index) {
            out.push(render_suppressed(line, options));
        } else {
            out.push((*line).to_string());
        }
    }
    out.join("\n")
}

fn render_suppressed(line: &str, options: &Options) -> String {
    match options.render {
        RenderMode::Comment => format!("{}{}", options.comment_marker, line),
        RenderMode::Blank => {
            // Keep a trailing CR so CRLF files stay CRLF
            match line.strip_suffix('\r') {
                Some(text) => {
                    let mut blanked = " ".repeat(text.chars().count());
                    blanked.push('\r');
                    blanked
                }
                None => " ".repeat(line.chars().count()),
            }
        }
    }
}
