//! Line-oriented conditional compilation for source text.
//!
//! Scans a file for `///#if` / `///#elseif` / `///#else` / `///#endif`
//! directive comments, evaluates their conditions against an injected
//! [`Environment`], and comments out (or blanks) every line of an inactive
//! branch while keeping the file's line count intact. `///#warning` and
//! `///#error` raise diagnostics from active branches.
//!
//! ```
//! use ifdef_preprocessor::{Environment, Preprocessor};
//!
//! let mut env = Environment::new();
//! env.define("DEBUG", true);
//!
//! let source = "///#if DEBUG\nlet log = true;\n///#endif";
//! let result = Preprocessor::new(env).process(source).unwrap();
//! assert_eq!(result.text, "// ///#if DEBUG\nlet log = true;\n// ///#endif");
//! ```

pub mod diag;
pub mod env;
pub mod eval;
pub mod formatter;
pub mod parser;

pub use diag::{Diagnostic, Location, PreprocessError, Severity};
pub use env::{parse_define, parse_define_list, Environment};
pub use eval::{evaluate, EvalError};
pub use formatter::{Options, Preprocessor, ProcessResult, RenderMode};
pub use parser::{Directive, DirectiveKind, DirectiveMatcher, PatternError};
