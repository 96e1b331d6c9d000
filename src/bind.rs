use crate::input::Input;
use crate::parser::{ParseFuture, Parser, then_parse};
use std::rc::Rc;

/// Parser combinator feeding the value of one parser to a function that picks
/// the parser for the rest of the input
///
/// The joined match starts where the first parser started and ends where the
/// chosen parser ended.
pub struct Bind<P, F> {
    parser: P,
    binder: Rc<F>,
}

impl<P, F> Bind<P, F> {
    pub fn new(parser: P, binder: F) -> Self {
        Bind {
            parser,
            binder: Rc::new(binder),
        }
    }
}

impl<P, F, Q> Parser for Bind<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> Q + 'static,
    Q: Parser,
{
    type Output = Q::Output;

    fn parse(&self, input: Input) -> ParseFuture<Self::Output> {
        let binder = Rc::clone(&self.binder);
        then_parse(self.parser.parse(input), move |value, rest| {
            binder(value).parse(rest)
        })
    }
}

/// Extension trait to add .bind() method support for parsers
pub trait BindExt: Parser + Sized {
    fn bind<F, Q>(self, binder: F) -> Bind<Self, F>
    where
        F: Fn(Self::Output) -> Q + 'static,
        Q: Parser,
    {
        Bind::new(self, binder)
    }
}

impl<P> BindExt for P where P: Parser {}

/// Convenience function to create a Bind parser
pub fn bind<P, F, Q>(parser: P, binder: F) -> Bind<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> Q + 'static,
    Q: Parser,
{
    Bind::new(parser, binder)
}
