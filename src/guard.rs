use crate::error::ParseError;
use crate::future::Future;
use crate::input::Input;
use crate::parser::{ParseFuture, Parser};
use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

/// Parser that applies a predicate to the output of another parser
///
/// A rejected value fails with `expected` and the debug rendering of the value,
/// at the position where the inner match started.
pub struct Guard<P, F> {
    parser: P,
    predicate: Rc<F>,
    expected: Cow<'static, str>,
}

impl<P, F> Guard<P, F> {
    pub fn new(parser: P, predicate: F, expected: Cow<'static, str>) -> Self {
        Guard {
            parser,
            predicate: Rc::new(predicate),
            expected,
        }
    }
}

impl<P, F> Parser for Guard<P, F>
where
    P: Parser,
    P::Output: fmt::Debug,
    F: Fn(&P::Output) -> bool + 'static,
{
    type Output = P::Output;

    fn parse(&self, input: Input) -> ParseFuture<Self::Output> {
        let predicate = Rc::clone(&self.predicate);
        let expected = self.expected.clone();
        self.parser.parse(input).bind(move |parsed| {
            if predicate(&parsed.value) {
                Future::unit(parsed)
            } else {
                Future::fail(ParseError::mismatch(
                    expected,
                    format!("{:?}", parsed.value),
                    parsed.pos(),
                ))
            }
        })
    }
}

/// Extension trait to add .guard() method support for parsers
pub trait GuardExt: Parser + Sized {
    fn guard<F>(self, predicate: F, expected: impl Into<Cow<'static, str>>) -> Guard<Self, F>
    where
        F: Fn(&Self::Output) -> bool + 'static,
    {
        Guard::new(self, predicate, expected.into())
    }
}

impl<P> GuardExt for P where P: Parser {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParserExt;
    use crate::rep::RepExt;
    use crate::scheduler::block_on;
    use crate::text::item;

    #[test]
    fn test_guard_accepts() {
        let parser = item().guard(|c| c.is_ascii_digit(), "digit");
        let parsed = block_on(parser.parse_str("5x")).unwrap().unwrap();
        assert_eq!(parsed.value, '5');
        assert_eq!(parsed.next.head(), Some('x'));
    }

    #[test]
    fn test_guard_rejects_with_found_value() {
        let parser = item().guard(|c| c.is_ascii_digit(), "digit");
        let error = block_on(parser.parse_str("x5")).unwrap().unwrap_err();
        assert_eq!(error, ParseError::mismatch("digit", "'x'", 0));
    }

    #[test]
    fn test_guard_inner_failure_passes_through() {
        let parser = item().guard(|c| c.is_ascii_digit(), "digit");
        let error = block_on(parser.parse_str("")).unwrap().unwrap_err();
        assert_eq!(error, ParseError::mismatch("any char", "end of input", 0));
    }

    #[test]
    fn test_guard_on_composite_value() {
        let parser = item()
            .rep()
            .guard(|chars| chars.len() == 2, String::from("two chars"));
        let error = block_on(parser.parse_str("abc")).unwrap().unwrap_err();
        assert_eq!(error, ParseError::mismatch("two chars", "['a', 'b', 'c']", 0));
    }
}
