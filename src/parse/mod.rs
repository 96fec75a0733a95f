//! Template grammar and ruleset loading.

mod grammar;
#[cfg(feature = "yaml")]
mod ruleset;

#[cfg(feature = "yaml")]
pub use ruleset::{parse_ruleset, ParsedRuleset};

use crate::types::Segment;

/// Split a replacement template into literal and placeholder segments.
pub(crate) fn template_segments(input: &str) -> Vec<Segment> {
    grammar::template(input)
}
