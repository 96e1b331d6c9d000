use crate::input::Input;
use crate::parser::{ParseFuture, Parser, then_parse};
use std::rc::Rc;

/// Parser combinator that sequences two parsers and returns both results as a tuple
///
/// Chained `.seq()` calls produce nested tuples like `((a, b), c)`.
pub struct Seq<P1, P2> {
    first: P1,
    second: Rc<P2>,
}

impl<P1, P2> Seq<P1, P2> {
    pub fn new(first: P1, second: P2) -> Self {
        Seq {
            first,
            second: Rc::new(second),
        }
    }
}

impl<P1, P2> Parser for Seq<P1, P2>
where
    P1: Parser,
    P2: Parser,
{
    type Output = (P1::Output, P2::Output);

    fn parse(&self, input: Input) -> ParseFuture<Self::Output> {
        let second = Rc::clone(&self.second);
        then_parse(self.first.parse(input), move |x, rest| {
            second.parse(rest).map(move |parsed| parsed.map(|y| (x, y)))
        })
    }
}

/// Sequences two parsers and keeps the result of the first
pub struct Seql<P1, P2> {
    first: P1,
    second: Rc<P2>,
}

impl<P1, P2> Seql<P1, P2> {
    pub fn new(first: P1, second: P2) -> Self {
        Seql {
            first,
            second: Rc::new(second),
        }
    }
}

impl<P1, P2> Parser for Seql<P1, P2>
where
    P1: Parser,
    P2: Parser,
{
    type Output = P1::Output;

    fn parse(&self, input: Input) -> ParseFuture<Self::Output> {
        let second = Rc::clone(&self.second);
        then_parse(self.first.parse(input), move |x, rest| {
            second.parse(rest).map(move |parsed| parsed.map(|_| x))
        })
    }
}

/// Sequences two parsers and keeps the result of the second
pub struct Seqr<P1, P2> {
    first: P1,
    second: Rc<P2>,
}

impl<P1, P2> Seqr<P1, P2> {
    pub fn new(first: P1, second: P2) -> Self {
        Seqr {
            first,
            second: Rc::new(second),
        }
    }
}

impl<P1, P2> Parser for Seqr<P1, P2>
where
    P1: Parser,
    P2: Parser,
{
    type Output = P2::Output;

    fn parse(&self, input: Input) -> ParseFuture<Self::Output> {
        let second = Rc::clone(&self.second);
        then_parse(self.first.parse(input), move |_, rest| second.parse(rest))
    }
}

/// Extension trait to add sequencing methods to parsers
pub trait SeqExt: Parser + Sized {
    fn seq<P>(self, other: P) -> Seq<Self, P>
    where
        P: Parser,
    {
        Seq::new(self, other)
    }

    fn seql<P>(self, other: P) -> Seql<Self, P>
    where
        P: Parser,
    {
        Seql::new(self, other)
    }

    fn seqr<P>(self, other: P) -> Seqr<Self, P>
    where
        P: Parser,
    {
        Seqr::new(self, other)
    }
}

impl<P> SeqExt for P where P: Parser {}

/// Convenience function to create a Seq parser
pub fn seq<P1, P2>(first: P1, second: P2) -> Seq<P1, P2>
where
    P1: Parser,
    P2: Parser,
{
    Seq::new(first, second)
}

/// `open`, then `content`, then `close`, keeping only the content
pub fn between<P1, P2, P3>(open: P1, content: P2, close: P3) -> Seql<Seqr<P1, P2>, P3>
where
    P1: Parser,
    P2: Parser,
    P3: Parser,
{
    open.seqr(content).seql(close)
}
