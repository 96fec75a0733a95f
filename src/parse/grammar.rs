use winnow::combinator::{alt, preceded};
use winnow::error::ModalResult;
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

use crate::types::Segment;

// -- Template pieces --------------------------------------------------------

fn placeholder(input: &mut &str) -> ModalResult<Segment> {
    preceded('$', one_of(|c: char| c.is_ascii_digit()))
        .map(|d: char| Segment::Group(usize::from(d as u8 - b'0')))
        .parse_next(input)
}

fn literal_run(input: &mut &str) -> ModalResult<Segment> {
    take_while(1.., |c: char| c != '$')
        .map(|s: &str| Segment::Literal(s.to_owned()))
        .parse_next(input)
}

/// A `$` that does not start a placeholder.
fn lone_dollar(input: &mut &str) -> ModalResult<Segment> {
    '$'.map(|_| Segment::Literal("$".to_owned()))
        .parse_next(input)
}

// -- Top level --------------------------------------------------------------

/// Tokenize a whole template. Any `$` that does not start a placeholder is
/// literal text, so every string tokenizes.
pub(crate) fn template(source: &str) -> Vec<Segment> {
    let mut input = source;
    let mut segments = Vec::new();
    while !input.is_empty() {
        match alt((placeholder, literal_run, lone_dollar)).parse_next(&mut input) {
            Ok(segment) => push_merged(&mut segments, segment),
            Err(_) => {
                push_merged(&mut segments, Segment::Literal(input.to_owned()));
                break;
            }
        }
    }
    segments
}

fn push_merged(segments: &mut Vec<Segment>, segment: Segment) {
    if let (Segment::Literal(next), Some(Segment::Literal(prev))) =
        (&segment, segments.last_mut())
    {
        prev.push_str(next);
        return;
    }
    segments.push(segment);
}
