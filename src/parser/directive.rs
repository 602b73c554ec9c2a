use regex::Regex;
use thiserror::Error;

use super::types::{Directive, DirectiveKind};

const TRIPLE_SLASH_PATTERN: &str = r"^[ \t]*///[ \t]*#(?P<token>if|elseif|elif|else|endif|warning|warn|error|err)\b[ \t]*(?P<expression>.*?)[ \t\r]*$";

const DOUBLE_SLASH_PATTERN: &str = r"^[ \t]*//+[ \t]*#(?P<token>if|elseif|elif|else|endif|warning|warn|error|err)\b[ \t]*(?P<expression>.*?)[ \t\r]*$";

/// Rejected custom directive pattern.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid directive pattern: {0}")]
    Invalid(#[from] regex::Error),

    #[error("directive pattern has no `token` capture group")]
    MissingTokenGroup,
}

/// Recognizes directive lines. One instance per grammar; a matcher is
/// immutable and can be shared across files.
#[derive(Debug, Clone)]
pub struct DirectiveMatcher {
    pattern: Regex,
}

impl DirectiveMatcher {
    /// Triple-marker grammar (`///#if`), the default. Ordinary `//` comments
    /// that happen to start with `#` stay untouched.
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(TRIPLE_SLASH_PATTERN).expect("built-in pattern compiles"),
        }
    }

    /// Double-marker grammar (`//#if`) for files written against the looser
    /// convention; the triple form still matches.
    pub fn double_slash() -> Self {
        Self {
            pattern: Regex::new(DOUBLE_SLASH_PATTERN).expect("built-in pattern compiles"),
        }
    }

    /// Custom grammar. The pattern must capture the directive word in a
    /// named group `token`; an optional named group `expression` carries
    /// the condition or message text.
    pub fn from_pattern(pattern: &str) -> Result<Self, PatternError> {
        let compiled = Regex::new(pattern)?;
        let has_token = compiled
            .capture_names()
            .flatten()
            .any(|name| name == "token");
        if !has_token {
            return Err(PatternError::MissingTokenGroup);
        }
        Ok(Self { pattern: compiled })
    }

    /// Match one line. `None` means ordinary content.
    pub fn match_line(&self, line: &str) -> Option<Directive> {
        let caps = self.pattern.captures(line)?;
        let kind = DirectiveKind::from_token(caps.name("token")?.as_str())?;
        let expression = caps
            .name("expression")
            .map(|m| m.as_str().trim())
            .filter(|text| !text.is_empty())
            .map(str::to_string);

        let column = line.chars().take_while(|ch| ch.is_whitespace()).count();
        let length = line.trim().chars().count();

        Some(Directive {
            kind,
            expression,
            column,
            length,
        })
    }
}

impl Default for DirectiveMatcher {
    fn default() -> Self {
        Self::new()
    }
}
