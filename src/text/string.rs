use crate::error::ParseError;
use crate::future::Future;
use crate::input::Input;
use crate::parser::{ParseFuture, Parser, ParserResult};
use std::borrow::Cow;

/// Parser that matches an exact string char by char
pub struct StringParser {
    expected: Cow<'static, str>,
}

impl StringParser {
    pub fn new(expected: impl Into<Cow<'static, str>>) -> Self {
        Self {
            expected: expected.into(),
        }
    }
}

impl Parser for StringParser {
    type Output = String;

    fn parse(&self, input: Input) -> ParseFuture<String> {
        let mut current = input.clone();

        for expected_char in self.expected.chars() {
            match current.advance() {
                Some((ch, rest)) if ch == expected_char => current = rest,
                _ => {
                    return Future::fail(ParseError::mismatch(
                        format!("{:?}", expected_char),
                        current.describe_head(),
                        current.pos(),
                    ));
                }
            }
        }

        Future::unit(ParserResult::new(self.expected.to_string(), input, current))
    }
}

/// Match the literal `expected`
pub fn string(expected: impl Into<Cow<'static, str>>) -> StringParser {
    StringParser::new(expected)
}
