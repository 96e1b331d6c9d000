use crate::error::ParseError;
use crate::future::Future;
use crate::input::Input;
use crate::parser::{ParseFuture, Parser, ParserResult};
use std::borrow::Cow;

/// Parser that consumes a single char satisfying a predicate
///
/// Fails with `expected` both on a rejected char and at the end of input.
pub struct Sat<F> {
    predicate: F,
    expected: Cow<'static, str>,
}

impl<F> Sat<F>
where
    F: Fn(char) -> bool,
{
    pub fn new(predicate: F, expected: Cow<'static, str>) -> Self {
        Sat {
            predicate,
            expected,
        }
    }
}

impl<F> Parser for Sat<F>
where
    F: Fn(char) -> bool + 'static,
{
    type Output = char;

    fn parse(&self, input: Input) -> ParseFuture<char> {
        match input.advance() {
            Some((ch, rest)) if (self.predicate)(ch) => {
                Future::unit(ParserResult::new(ch, input, rest))
            }
            _ => Future::fail(ParseError::mismatch(
                self.expected.clone(),
                input.describe_head(),
                input.pos(),
            )),
        }
    }
}

/// A single char satisfying `predicate`
pub fn sat<F>(predicate: F, expected: impl Into<Cow<'static, str>>) -> Sat<F>
where
    F: Fn(char) -> bool + 'static,
{
    Sat::new(predicate, expected.into())
}

/// Exactly the char `expected`
pub fn char(expected: char) -> impl Parser<Output = char> {
    sat(move |c| c == expected, format!("{:?}", expected))
}
