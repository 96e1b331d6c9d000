//! Folding the output of sequences
//!
//! [`Flatten`] turns the nested tuples, vectors and options built by `seq` and
//! `rep` into one flat vector of leaves. Chars flatten to one-char strings, so
//! `letter().seq(alphanumeric().rep()).reduce()` concatenates into a `String`.

use crate::error::ParseError;
use crate::future::Future;
use crate::input::Input;
use crate::parser::{ParseFuture, Parser, ParserResult};
use std::rc::Rc;

/// Values that can be flattened into a sequence of leaves
pub trait Flatten {
    type Item;

    fn flatten_into(self, out: &mut Vec<Self::Item>);

    fn flatten(self) -> Vec<Self::Item>
    where
        Self: Sized,
    {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }
}

impl Flatten for char {
    type Item = String;

    fn flatten_into(self, out: &mut Vec<String>) {
        out.push(self.to_string());
    }
}

impl Flatten for String {
    type Item = String;

    fn flatten_into(self, out: &mut Vec<String>) {
        out.push(self);
    }
}

impl Flatten for &'static str {
    type Item = String;

    fn flatten_into(self, out: &mut Vec<String>) {
        out.push(self.to_string());
    }
}

macro_rules! impl_flatten_leaf {
    ($($ty:ty),+) => {
        $(
            impl Flatten for $ty {
                type Item = $ty;

                fn flatten_into(self, out: &mut Vec<$ty>) {
                    out.push(self);
                }
            }
        )+
    };
}

impl_flatten_leaf!(i32, i64, u32, u64, usize, f64);

impl<T: Flatten> Flatten for Vec<T> {
    type Item = T::Item;

    fn flatten_into(self, out: &mut Vec<T::Item>) {
        for value in self {
            value.flatten_into(out);
        }
    }
}

impl<T: Flatten> Flatten for Option<T> {
    type Item = T::Item;

    fn flatten_into(self, out: &mut Vec<T::Item>) {
        if let Some(value) = self {
            value.flatten_into(out);
        }
    }
}

impl<A, B> Flatten for (A, B)
where
    A: Flatten,
    B: Flatten<Item = A::Item>,
{
    type Item = A::Item;

    fn flatten_into(self, out: &mut Vec<A::Item>) {
        self.0.flatten_into(out);
        self.1.flatten_into(out);
    }
}

impl<A, B, C> Flatten for (A, B, C)
where
    A: Flatten,
    B: Flatten<Item = A::Item>,
    C: Flatten<Item = A::Item>,
{
    type Item = A::Item;

    fn flatten_into(self, out: &mut Vec<A::Item>) {
        self.0.flatten_into(out);
        self.1.flatten_into(out);
        self.2.flatten_into(out);
    }
}

/// An associative combination: concatenation for strings and vectors, addition
/// for numbers
pub trait Semigroup {
    fn combine(self, other: Self) -> Self;
}

impl Semigroup for String {
    fn combine(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }
}

impl<T> Semigroup for Vec<T> {
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

// Integers wrap on overflow, like the arithmetic evaluators
macro_rules! impl_semigroup_wrapping_add {
    ($($ty:ty),+) => {
        $(
            impl Semigroup for $ty {
                fn combine(self, other: Self) -> Self {
                    self.wrapping_add(other)
                }
            }
        )+
    };
}

impl_semigroup_wrapping_add!(i32, i64, u32, u64, usize);

impl Semigroup for f64 {
    fn combine(self, other: Self) -> Self {
        self + other
    }
}

/// Parser combinator that flattens the output of a parser and folds it with a
/// binary function
///
/// Fails when the flattened sequence is empty.
pub struct Reduce<P, F> {
    parser: P,
    reducer: Rc<F>,
}

impl<P, F> Reduce<P, F> {
    pub fn new(parser: P, reducer: F) -> Self {
        Reduce {
            parser,
            reducer: Rc::new(reducer),
        }
    }
}

impl<P, F> Parser for Reduce<P, F>
where
    P: Parser,
    P::Output: Flatten,
    <P::Output as Flatten>::Item: 'static,
    F: Fn(<P::Output as Flatten>::Item, <P::Output as Flatten>::Item) -> <P::Output as Flatten>::Item
        + 'static,
{
    type Output = <P::Output as Flatten>::Item;

    fn parse(&self, input: Input) -> ParseFuture<Self::Output> {
        let reducer = Rc::clone(&self.reducer);
        self.parser.parse(input).bind(move |parsed| {
            let ParserResult { value, start, next } = parsed;
            let mut items = value.flatten().into_iter();
            match items.next() {
                Some(first) => {
                    let folded = items.fold(first, |acc, item| reducer(acc, item));
                    Future::unit(ParserResult::new(folded, start, next))
                }
                None => Future::fail(ParseError::mismatch(
                    "a non-empty sequence",
                    "an empty sequence",
                    start.pos(),
                )),
            }
        })
    }
}

type Combine<T> = fn(T, T) -> T;

/// Extension trait to add folding methods to parsers
pub trait ReduceExt: Parser + Sized {
    /// Fold the flattened output with [`Semigroup::combine`]
    fn reduce(self) -> Reduce<Self, Combine<<Self::Output as Flatten>::Item>>
    where
        Self::Output: Flatten,
        <Self::Output as Flatten>::Item: Semigroup + 'static,
    {
        Reduce::new(self, <<Self::Output as Flatten>::Item as Semigroup>::combine)
    }

    fn reduce_with<F>(self, reducer: F) -> Reduce<Self, F>
    where
        Self::Output: Flatten,
        <Self::Output as Flatten>::Item: 'static,
        F: Fn(<Self::Output as Flatten>::Item, <Self::Output as Flatten>::Item) -> <Self::Output as Flatten>::Item
            + 'static,
    {
        Reduce::new(self, reducer)
    }
}

impl<P> ReduceExt for P where P: Parser {}
