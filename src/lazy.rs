use crate::input::Input;
use crate::parser::{ParseFuture, Parser};

/// A lazy parser that defers the construction of the actual parser until parse time.
/// This is useful for breaking mutual recursion between parsers.
///
/// The factory runs on every parse. For a grammar rule that is parsed often,
/// [`crate::forward::recursive`] builds the rule once instead.
pub struct Lazy<F> {
    factory: F,
}

impl<F, P> Lazy<F>
where
    F: Fn() -> P,
    P: Parser,
{
    /// Create a new lazy parser with the given factory function
    pub fn new(factory: F) -> Self {
        Self { factory }
    }
}

impl<F, P> Parser for Lazy<F>
where
    F: Fn() -> P + 'static,
    P: Parser,
{
    type Output = P::Output;

    fn parse(&self, input: Input) -> ParseFuture<Self::Output> {
        let parser = (self.factory)();
        parser.parse(input)
    }
}

/// Create a lazy parser from a factory function
pub fn lazy<F, P>(factory: F) -> Lazy<F>
where
    F: Fn() -> P + 'static,
    P: Parser,
{
    Lazy::new(factory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapExt;
    use crate::or::OrExt;
    use crate::parser::{BoxedParser, ParserExt};
    use crate::scheduler::block_on;
    use crate::sequence::SeqExt;
    use crate::text::char;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_lazy_basic() {
        let parser = lazy(|| char('a'));
        let parsed = block_on(parser.parse_str("abc")).unwrap().unwrap();
        assert_eq!(parsed.value, 'a');
    }

    #[test]
    fn test_lazy_factory_runs_per_parse() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let parser = lazy(move || {
            counter.set(counter.get() + 1);
            char('x')
        });
        assert_eq!(calls.get(), 0);

        block_on(parser.parse_str("x"));
        block_on(parser.parse_str("y"));
        assert_eq!(calls.get(), 2);
    }

    // nested := '(' nested ')' | 'x', counting the depth
    fn nested() -> BoxedParser<usize> {
        char('(')
            .seqr(lazy(nested))
            .seql(char(')'))
            .map(|depth| depth + 1)
            .or(char('x').val(0))
            .boxed()
    }

    #[test]
    fn test_lazy_recursion() {
        let parsed = block_on(nested().parse_str("(((x)))")).unwrap().unwrap();
        assert_eq!(parsed.value, 3);
        assert_eq!(parsed.matched(), "(((x)))");
    }

    #[test]
    fn test_lazy_recursion_unbalanced() {
        assert!(block_on(nested().parse_str("((x)")).unwrap().is_err());
    }
}
