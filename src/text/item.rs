use crate::error::{END_OF_INPUT, ParseError};
use crate::future::Future;
use crate::input::Input;
use crate::parser::{ParseFuture, Parser, ParserResult};

/// Parser that consumes and returns a single char
pub struct Item;

impl Parser for Item {
    type Output = char;

    fn parse(&self, input: Input) -> ParseFuture<char> {
        match input.advance() {
            Some((ch, rest)) => Future::unit(ParserResult::new(ch, input, rest)),
            None => Future::fail(ParseError::mismatch("any char", END_OF_INPUT, input.pos())),
        }
    }
}

pub fn item() -> Item {
    Item
}

/// Parser that only succeeds at the end of input, consuming nothing
pub struct Eof;

impl Parser for Eof {
    type Output = ();

    fn parse(&self, input: Input) -> ParseFuture<()> {
        if input.is_end() {
            Future::unit(ParserResult::empty((), input))
        } else {
            Future::fail(ParseError::mismatch(
                END_OF_INPUT,
                input.describe_head(),
                input.pos(),
            ))
        }
    }
}

pub fn eof() -> Eof {
    Eof
}
