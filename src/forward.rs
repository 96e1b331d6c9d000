//! Recursive grammar rules
//!
//! A [`Forward`] is a parser slot that is bound to its rule exactly once. Clones
//! share the slot, so a rule can refer to itself, or to a rule defined later, by
//! holding a clone. The binding forms a reference cycle which is never freed;
//! grammars are expected to live as long as the program.

use crate::error::{GrammarError, ParseError};
use crate::future::Future;
use crate::input::Input;
use crate::parser::{BoxedParser, ParseFuture, Parser};
use std::cell::OnceCell;
use std::rc::Rc;
use tracing::debug;

pub struct Forward<T> {
    rule: Rc<OnceCell<BoxedParser<T>>>,
}

impl<T> Clone for Forward<T> {
    fn clone(&self) -> Self {
        Forward {
            rule: Rc::clone(&self.rule),
        }
    }
}

impl<T: 'static> Forward<T> {
    pub fn new() -> Self {
        Forward {
            rule: Rc::new(OnceCell::new()),
        }
    }

    /// Bind the rule; every clone of this reference parses with it from now on
    pub fn define<P>(&self, parser: P) -> Result<(), GrammarError>
    where
        P: Parser<Output = T>,
    {
        let rule: BoxedParser<T> = Rc::new(parser);
        self.rule
            .set(rule)
            .map_err(|_| GrammarError::AlreadyDefined)?;
        debug!(output = std::any::type_name::<T>(), "forward rule defined");
        Ok(())
    }

    pub fn is_defined(&self) -> bool {
        self.rule.get().is_some()
    }
}

impl<T: 'static> Default for Forward<T> {
    fn default() -> Self {
        Forward::new()
    }
}

impl<T: 'static> Parser for Forward<T> {
    type Output = T;

    fn parse(&self, input: Input) -> ParseFuture<T> {
        match self.rule.get() {
            Some(rule) => rule.parse(input),
            None => Future::fail(ParseError::Undefined { pos: input.pos() }),
        }
    }
}

/// An undefined forward reference
pub fn forward<T: 'static>() -> Forward<T> {
    Forward::new()
}

/// Build a self-referential rule
///
/// `build` receives a reference to the rule being built and returns its body.
///
/// ```
/// use futuristic::prelude::*;
/// use futuristic::text::char;
///
/// // parens := '(' parens ')' | ""
/// let parens = recursive(|parens: Forward<i32>| {
///     char('(').seqr(parens).seql(char(')')).map(|depth| depth + 1).or(result(0))
/// });
/// let parsed = block_on(parens.parse_str("(())")).unwrap().unwrap();
/// assert_eq!(parsed.value, 2);
/// ```
pub fn recursive<T, P, F>(build: F) -> Forward<T>
where
    T: 'static,
    P: Parser<Output = T>,
    F: FnOnce(Forward<T>) -> P,
{
    let reference = Forward::new();
    let body = build(reference.clone());
    let rule: BoxedParser<T> = Rc::new(body);
    // A fresh cell is always empty
    let _ = reference.rule.set(rule);
    reference
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapExt;
    use crate::or::OrExt;
    use crate::parser::ParserExt;
    use crate::pure::result;
    use crate::scheduler::block_on;
    use crate::sequence::SeqExt;
    use crate::text::{char, digit};

    #[test]
    fn test_undefined_forward_fails() {
        let rule = forward::<char>();
        assert!(!rule.is_defined());
        let error = block_on(rule.parse_str("abc")).unwrap().unwrap_err();
        assert_eq!(error, ParseError::Undefined { pos: 0 });
    }

    #[test]
    fn test_define_once() {
        let rule = forward();
        assert_eq!(rule.define(digit()), Ok(()));
        assert_eq!(rule.define(char('x')), Err(GrammarError::AlreadyDefined));

        let parsed = block_on(rule.parse_str("5")).unwrap().unwrap();
        assert_eq!(parsed.value, '5');
    }

    #[test]
    fn test_clones_share_the_rule() {
        let rule = forward();
        let copy = rule.clone();
        rule.define(char('q')).unwrap();
        assert!(copy.is_defined());
        assert!(block_on(copy.parse_str("q")).unwrap().is_ok());
    }

    #[test]
    fn test_mutual_recursion() {
        // even := 'a' odd | "" ; odd := 'a' even
        let even = forward::<usize>();
        let odd = forward::<usize>();
        even.define(char('a').seqr(odd.clone()).map(|n| n + 1).or(result(0)))
            .unwrap();
        odd.define(char('a').seqr(even.clone()).map(|n| n + 1)).unwrap();

        let parsed = block_on(even.clone().complete().parse_str("aaaa")).unwrap().unwrap();
        assert_eq!(parsed.value, 4);
        assert!(block_on(even.complete().parse_str("aaa")).unwrap().is_err());
    }

    #[test]
    fn test_recursive_nesting() {
        let nested = recursive(|nested: Forward<usize>| {
            char('[')
                .seqr(nested)
                .seql(char(']'))
                .map(|depth| depth + 1)
                .or(result(0))
        });
        let parsed = block_on(nested.parse_str("[[[]]]")).unwrap().unwrap();
        assert_eq!(parsed.value, 3);
        assert_eq!(parsed.matched(), "[[[]]]");
    }

    #[test]
    fn test_deep_recursion() {
        let nested = recursive(|nested: Forward<usize>| {
            char('(')
                .seqr(nested)
                .seql(char(')'))
                .map(|depth| depth + 1)
                .or(result(0))
        });
        let source = format!("{}{}", "(".repeat(2_000), ")".repeat(2_000));
        let parsed = block_on(nested.parse_str(&source)).unwrap().unwrap();
        assert_eq!(parsed.value, 2_000);
    }
}
