use crate::error::ParseError;
use crate::future::Future;
use crate::input::Input;
use crate::parser::{ParseFuture, Parser, ParserResult};
use std::borrow::Cow;

/// Parser that always succeeds with a copy of its value without consuming input
pub struct Pure<T> {
    value: T,
}

impl<T> Pure<T> {
    pub fn new(value: T) -> Self {
        Pure { value }
    }
}

impl<T> Parser for Pure<T>
where
    T: Clone + 'static,
{
    type Output = T;

    fn parse(&self, input: Input) -> ParseFuture<T> {
        Future::unit(ParserResult::empty(self.value.clone(), input))
    }
}

/// Succeed with `value` and an empty match
pub fn result<T: Clone + 'static>(value: T) -> Pure<T> {
    Pure::new(value)
}

/// Parser that always fails at the current position
pub struct Failure<T> {
    expected: Cow<'static, str>,
    _phantom: std::marker::PhantomData<fn() -> T>,
}

impl<T> Failure<T> {
    pub fn new(expected: Cow<'static, str>) -> Self {
        Failure {
            expected,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T: 'static> Parser for Failure<T> {
    type Output = T;

    fn parse(&self, input: Input) -> ParseFuture<T> {
        Future::fail(ParseError::mismatch(
            self.expected.clone(),
            input.describe_head(),
            input.pos(),
        ))
    }
}

/// Fail with `expected`, reporting whatever is at the current position
pub fn failure<T: 'static>(expected: impl Into<Cow<'static, str>>) -> Failure<T> {
    Failure::new(expected.into())
}
