use crate::future::Future;
use crate::input::Input;
use crate::parser::{ParseFuture, Parser, ParserResult};
use std::rc::Rc;

/// Parser combinator that matches its parser as many times as possible
///
/// Repetition is greedy and unbounded: it stops at the first failing attempt and
/// returns everything matched so far. It fails only when fewer than `min` items
/// matched, with the error of the attempt that stopped it. An attempt that
/// succeeds without consuming input is kept and ends the repetition.
pub struct Rep<P> {
    parser: Rc<P>,
    min: usize,
}

impl<P> Rep<P> {
    pub fn new(parser: P, min: usize) -> Self {
        Rep {
            parser: Rc::new(parser),
            min,
        }
    }
}

impl<P: Parser> Parser for Rep<P> {
    type Output = Vec<P::Output>;

    fn parse(&self, input: Input) -> ParseFuture<Self::Output> {
        repeat(
            Rc::clone(&self.parser),
            self.min,
            input.clone(),
            input,
            Vec::new(),
        )
    }
}

fn repeat<P: Parser>(
    parser: Rc<P>,
    min: usize,
    start: Input,
    current: Input,
    mut values: Vec<P::Output>,
) -> ParseFuture<Vec<P::Output>> {
    parser
        .parse(current.clone())
        .bind_result(move |outcome| match outcome {
            Ok(parsed) => {
                let consumed = parsed.next.pos() > current.pos();
                values.push(parsed.value);
                if consumed {
                    repeat(parser, min, start, parsed.next, values)
                } else {
                    Future::unit(ParserResult::new(values, start, parsed.next))
                }
            }
            Err(error) => {
                if values.len() >= min {
                    Future::unit(ParserResult::new(values, start, current))
                } else {
                    Future::fail(error)
                }
            }
        })
}

/// Extension trait to add repetition methods to parsers
pub trait RepExt: Parser + Sized {
    /// Zero or more
    fn rep(self) -> Rep<Self> {
        Rep::new(self, 0)
    }

    /// One or more
    fn rep1(self) -> Rep<Self> {
        Rep::new(self, 1)
    }
}

impl<P> RepExt for P where P: Parser {}

/// Convenience function to create a zero-or-more repetition
pub fn rep<P: Parser>(parser: P) -> Rep<P> {
    Rep::new(parser, 0)
}

/// Convenience function to create a one-or-more repetition
pub fn rep1<P: Parser>(parser: P) -> Rep<P> {
    Rep::new(parser, 1)
}
