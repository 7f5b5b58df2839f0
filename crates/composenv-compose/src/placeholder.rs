//! Tokenization of variable references in compose text using `nom`.
//!
//! Splits raw text into [`Segment`]s: literal text, braced references
//! (`${NAME}` / `${NAME:default}`), and bare references (`$NAME`).
//!
//! Two views share the same parsers:
//! - [`tokenize`] walks the text once; a braced reference swallows its default.
//! - [`references`] tries every `$`, so it also sees references written
//!   inside another reference's default (`${URL:http://$HOST}`).

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_till1, take_while, take_while1},
    character::complete::{char, satisfy},
    combinator::recognize,
    error::{Error, ErrorKind},
    sequence::{delimited, pair, preceded},
};

/// A piece of compose text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text that is not a reference.
    Text(&'a str),
    /// `${NAME}` or `${NAME:default}`.
    Braced {
        /// The full reference as written.
        raw: &'a str,
        /// Everything before the first `:`.
        name: &'a str,
        /// Everything after the first `:`, verbatim (so `${A:-x}` yields `-x`).
        default: Option<&'a str>,
    },
    /// `$NAME` where `NAME` matches `[A-Z_][A-Z0-9_]*`, taken greedily.
    Bare {
        /// The full reference as written.
        raw: &'a str,
        /// The referenced name.
        name: &'a str,
    },
}

impl<'a> Segment<'a> {
    /// Returns the referenced name, if this segment is a reference.
    #[must_use]
    pub const fn name(&self) -> Option<&'a str> {
        match *self {
            Self::Text(_) => None,
            Self::Braced { name, .. } | Self::Bare { name, .. } => Some(name),
        }
    }

    /// Returns the segment exactly as it appears in the source.
    #[must_use]
    pub const fn raw(&self) -> &'a str {
        match *self {
            Self::Text(raw) | Self::Braced { raw, .. } | Self::Bare { raw, .. } => raw,
        }
    }
}

const fn is_name_start(c: char) -> bool {
    c.is_ascii_uppercase() || c == '_'
}

const fn is_name_continue(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'
}

/// Parses `${...}`. The body runs to the first `}` and never crosses a line.
fn braced(input: &str) -> IResult<&str, Segment<'_>> {
    let (rest, body) =
        delimited(tag("${"), take_while1(|c: char| c != '}' && c != '\n'), char('}')).parse(input)?;
    let (name, default) = match body.split_once(':') {
        Some((name, default)) => (name, Some(default)),
        None => (body, None),
    };
    if name.is_empty() {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::Verify)));
    }
    let raw = &input[..input.len() - rest.len()];
    Ok((rest, Segment::Braced { raw, name, default }))
}

/// Parses `$NAME`.
fn bare(input: &str) -> IResult<&str, Segment<'_>> {
    let (rest, name) = preceded(
        char('$'),
        recognize(pair(satisfy(is_name_start), take_while(is_name_continue))),
    )
    .parse(input)?;
    let raw = &input[..input.len() - rest.len()];
    Ok((rest, Segment::Bare { raw, name }))
}

/// Parses a run of text up to the next `$`.
fn text(input: &str) -> IResult<&str, Segment<'_>> {
    let (rest, run) = take_till1(|c: char| c == '$').parse(input)?;
    Ok((rest, Segment::Text(run)))
}

/// Parses a `$` that does not start a reference.
fn lone_dollar(input: &str) -> IResult<&str, Segment<'_>> {
    let (rest, run) = recognize(char('$')).parse(input)?;
    Ok((rest, Segment::Text(run)))
}

fn segment(input: &str) -> IResult<&str, Segment<'_>> {
    alt((braced, bare, text, lone_dollar)).parse(input)
}

fn reference(input: &str) -> IResult<&str, Segment<'_>> {
    alt((braced, bare)).parse(input)
}

/// Yields the reference starting at each `$` of the text, with its byte offset.
///
/// Spans may overlap: `${A:${B}}` yields `A` at 0 and `B` at 4.
pub fn references(input: &str) -> impl Iterator<Item = (usize, Segment<'_>)> + '_ {
    input
        .match_indices('$')
        .filter_map(move |(at, _)| reference(&input[at..]).ok().map(|(_, seg)| (at, seg)))
}

/// Splits text into segments, left to right.
///
/// Concatenating the [`raw`](Segment::raw) form of every segment reproduces
/// the input exactly.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut remaining = input;

    while !remaining.is_empty() {
        match segment(remaining) {
            Ok((rest, seg)) => {
                segments.push(seg);
                remaining = rest;
            }
            Err(_) => {
                segments.push(Segment::Text(remaining));
                break;
            }
        }
    }

    segments
}
