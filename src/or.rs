use crate::error::ParseError;
use crate::input::Input;
use crate::parser::{BoxedParser, ParseFuture, Parser};
use crate::pure::failure;
use std::rc::Rc;

/// Parser combinator that tries the first parser, and if it fails, tries the second
/// parser from the same input
///
/// When both fail, the error keeps both failures: `Alternatives(first, second)`.
pub struct Or<P1, P2> {
    parser1: P1,
    parser2: Rc<P2>,
}

impl<P1, P2> Or<P1, P2> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        Or {
            parser1,
            parser2: Rc::new(parser2),
        }
    }
}

impl<P1, P2, O> Parser for Or<P1, P2>
where
    P1: Parser<Output = O>,
    P2: Parser<Output = O>,
    O: 'static,
{
    type Output = O;

    fn parse(&self, input: Input) -> ParseFuture<O> {
        let parser2 = Rc::clone(&self.parser2);
        self.parser1.parse(input.clone()).or_else(move |error1| {
            parser2
                .parse(input)
                .map_err(move |error2| ParseError::alternatives(error1, error2))
        })
    }
}

/// Extension trait to add .or() method support for parsers
pub trait OrExt: Parser + Sized {
    fn or<P>(self, other: P) -> Or<Self, P>
    where
        P: Parser<Output = Self::Output>,
    {
        Or::new(self, other)
    }
}

/// Implement OrExt for all parsers
impl<P> OrExt for P where P: Parser {}

/// Convenience function to create an Or parser
pub fn or<P1, P2, O>(parser1: P1, parser2: P2) -> Or<P1, P2>
where
    P1: Parser<Output = O>,
    P2: Parser<Output = O>,
    O: 'static,
{
    Or::new(parser1, parser2)
}

/// Try each parser in order until one succeeds
///
/// Fails with the nested alternatives of every failure, or with `expected` when
/// given no parsers.
pub fn choice<T: 'static>(parsers: Vec<BoxedParser<T>>, expected: &'static str) -> BoxedParser<T> {
    let mut parsers = parsers.into_iter().rev();
    let Some(last) = parsers.next() else {
        return Rc::new(failure(expected));
    };
    parsers.fold(last, |rest, parser| -> BoxedParser<T> {
        Rc::new(Or::new(parser, rest))
    })
}
