use crate::input::Input;
use crate::parser::{ParseFuture, Parser};
use crate::reduce::Flatten;
use std::rc::Rc;

/// Parser combinator that transforms the output of a parser using a mapping function
pub struct Map<P, F> {
    parser: P,
    mapper: Rc<F>,
}

impl<P, F> Map<P, F> {
    pub fn new(parser: P, mapper: F) -> Self {
        Map {
            parser,
            mapper: Rc::new(mapper),
        }
    }
}

impl<P, F, U> Parser for Map<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> U + 'static,
    U: 'static,
{
    type Output = U;

    fn parse(&self, input: Input) -> ParseFuture<U> {
        let mapper = Rc::clone(&self.mapper);
        self.parser
            .parse(input)
            .map(move |parsed| parsed.map(|value| mapper(value)))
    }
}

/// Parser combinator that replaces the output of a parser with a fixed value
pub struct Val<P, V> {
    parser: P,
    value: V,
}

impl<P, V> Val<P, V> {
    pub fn new(parser: P, value: V) -> Self {
        Val { parser, value }
    }
}

impl<P, V> Parser for Val<P, V>
where
    P: Parser,
    V: Clone + 'static,
{
    type Output = V;

    fn parse(&self, input: Input) -> ParseFuture<V> {
        let value = self.value.clone();
        self.parser
            .parse(input)
            .map(move |parsed| parsed.map(|_| value))
    }
}

/// Parser combinator that flattens nested sequences before mapping them
///
/// `digit().seq(digit().rep())` produces `(char, Vec<char>)`; with `map_flat` the
/// mapper receives the flat `Vec<String>` of every char instead.
pub struct MapFlat<P, F> {
    parser: P,
    mapper: Rc<F>,
}

impl<P, F> MapFlat<P, F> {
    pub fn new(parser: P, mapper: F) -> Self {
        MapFlat {
            parser,
            mapper: Rc::new(mapper),
        }
    }
}

impl<P, F, U> Parser for MapFlat<P, F>
where
    P: Parser,
    P::Output: Flatten,
    F: Fn(Vec<<P::Output as Flatten>::Item>) -> U + 'static,
    U: 'static,
{
    type Output = U;

    fn parse(&self, input: Input) -> ParseFuture<U> {
        let mapper = Rc::clone(&self.mapper);
        self.parser
            .parse(input)
            .map(move |parsed| parsed.map(|value| mapper(value.flatten())))
    }
}

/// Extension trait to add mapping methods to parsers
pub trait MapExt: Parser + Sized {
    fn map<F, U>(self, mapper: F) -> Map<Self, F>
    where
        F: Fn(Self::Output) -> U + 'static,
    {
        Map::new(self, mapper)
    }

    /// Discard the parsed value and produce `value` instead
    fn val<V: Clone + 'static>(self, value: V) -> Val<Self, V> {
        Val::new(self, value)
    }

    fn map_flat<F, U>(self, mapper: F) -> MapFlat<Self, F>
    where
        Self::Output: Flatten,
        F: Fn(Vec<<Self::Output as Flatten>::Item>) -> U + 'static,
    {
        MapFlat::new(self, mapper)
    }
}

/// Implement MapExt for all parsers
impl<P> MapExt for P where P: Parser {}

/// Convenience function to create a Map parser
pub fn map<P, F, U>(parser: P, mapper: F) -> Map<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> U + 'static,
{
    Map::new(parser, mapper)
}
