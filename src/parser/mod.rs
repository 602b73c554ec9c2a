mod block;
mod directive;
mod types;


pub use directive::{DirectiveMatcher, PatternError};
pub use types::{Directive, DirectiveKind};

pub(crate) use block::{parse_block, ScanState};
pub(crate) use types::{ScanError, SuppressionSet};
