use crate::error::ParseError;
use crate::future::Future;
use crate::input::Input;
use crate::sequence::Seql;
use crate::text::item::{Eof, eof};
use std::rc::Rc;

/// Successful parse: the value, where the match started and what is left
#[derive(Debug, Clone, PartialEq)]
pub struct ParserResult<T> {
    pub value: T,
    pub start: Input,
    pub next: Input,
}

impl<T> ParserResult<T> {
    pub fn new(value: T, start: Input, next: Input) -> Self {
        ParserResult { value, start, next }
    }

    /// A match that consumed nothing
    pub fn empty(value: T, input: Input) -> Self {
        ParserResult {
            value,
            start: input.clone(),
            next: input,
        }
    }

    /// The source text consumed by the match
    pub fn matched(&self) -> &str {
        self.start.text_until(&self.next)
    }

    /// Char offset where the match started
    pub fn pos(&self) -> usize {
        self.start.pos()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParserResult<U> {
        ParserResult {
            value: f(self.value),
            start: self.start,
            next: self.next,
        }
    }
}

pub type ParseFuture<T> = Future<ParserResult<T>, ParseError>;

/// Core parser trait for parser combinators
///
/// Parsing never blocks: `parse` returns a future of the outcome. A failed parse
/// consumes nothing; callers backtrack by parsing again from the same `Input`.
pub trait Parser: 'static {
    type Output: 'static;

    fn parse(&self, input: Input) -> ParseFuture<Self::Output>;
}

impl<P: Parser + ?Sized> Parser for Rc<P> {
    type Output = P::Output;

    fn parse(&self, input: Input) -> ParseFuture<Self::Output> {
        (**self).parse(input)
    }
}

impl<P: Parser + ?Sized> Parser for Box<P> {
    type Output = P::Output;

    fn parse(&self, input: Input) -> ParseFuture<Self::Output> {
        (**self).parse(input)
    }
}

/// Type-erased parser, cheap to clone
pub type BoxedParser<T> = Rc<dyn Parser<Output = T>>;

/// Run `next` on the remainder of `first` and join the two matches
///
/// The joined match starts where `first` started and ends where `next` ended, so
/// its text is the concatenation of both matched texts.
pub(crate) fn then_parse<A, B, F>(first: ParseFuture<A>, next: F) -> ParseFuture<B>
where
    A: 'static,
    B: 'static,
    F: FnOnce(A, Input) -> ParseFuture<B> + 'static,
{
    first.bind(move |left| {
        let ParserResult { value, start, next: rest } = left;
        next(value, rest).map(move |right| ParserResult {
            value: right.value,
            start,
            next: right.next,
        })
    })
}

/// Entry points and conversions available on every parser
pub trait ParserExt: Parser + Sized {
    /// Parse a whole source string from its first char
    fn parse_str(&self, source: &str) -> ParseFuture<Self::Output> {
        self.parse(Input::new(source))
    }

    /// Require the parse to reach the end of input
    fn complete(self) -> Seql<Self, Eof> {
        Seql::new(self, eof())
    }

    fn boxed(self) -> BoxedParser<Self::Output> {
        Rc::new(self)
    }
}

impl<P> ParserExt for P where P: Parser {}
