// Token-level parsers for layer arguments and inline data lists

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, satisfy},
    combinator::{eof, map, opt, rest},
    multi::separated_list0,
    sequence::{pair, preceded, tuple},
    IResult,
};

/// One command-line argument, classified getopt-style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// `--name` or `--name=value`
    Long { name: &'a str, value: Option<&'a str> },
    /// `-x` or `-xVALUE`
    Short { flag: char, value: Option<&'a str> },
    /// Anything else, including a lone `-`
    Value(&'a str),
}

fn long_flag(input: &str) -> IResult<&str, Token<'_>> {
    map(
        tuple((
            tag("--"),
            take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
            opt(preceded(char('='), rest)),
            eof,
        )),
        |(_, name, value, _)| Token::Long { name, value },
    )(input)
}

fn short_flag(input: &str) -> IResult<&str, Token<'_>> {
    map(
        preceded(char('-'), pair(satisfy(|c| c.is_ascii_alphabetic()), rest)),
        |(flag, attached): (char, &str)| Token::Short {
            flag,
            value: (!attached.is_empty()).then_some(attached),
        },
    )(input)
}

/// Classify an argument. Never fails: unrecognised shapes are plain values.
pub fn classify(arg: &str) -> Token<'_> {
    alt((long_flag, short_flag))(arg)
        .map(|(_, token)| token)
        .unwrap_or(Token::Value(arg))
}

fn data_tokens(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list0(char(','), map(take_while(|c: char| c != ','), str::trim))(input)
}

/// Split `1, 2,3` into `["1", "2", "3"]`. An empty list or a trailing comma adds no token.
pub fn data_list(input: &str) -> Vec<&str> {
    if input.trim().is_empty() {
        return Vec::new();
    }
    let mut tokens = data_tokens(input).map(|(_, t)| t).unwrap_or_default();
    if tokens.last() == Some(&"") {
        tokens.pop();
    }
    tokens
}
