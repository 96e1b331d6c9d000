use crate::future::Future;
use crate::input::Input;
use crate::parser::{ParseFuture, Parser, ParserResult, then_parse};
use std::rc::Rc;

/// Parser combinator that matches items separated by a parser
///
/// Separator values are discarded. A separator that is not followed by an item is
/// left unconsumed, so `"1,2,"` yields `[1, 2]` with `","` remaining.
///
/// # Examples
/// - `"a,b,c"` with separator `,` → `vec!['a', 'b', 'c']`
/// - `""` → `vec![]` for `repsep`, an error for `repsep1`
pub struct RepSep<P, S> {
    item: Rc<P>,
    separator: Rc<S>,
    min: usize,
}

impl<P, S> RepSep<P, S> {
    pub fn new(item: P, separator: S, min: usize) -> Self {
        RepSep {
            item: Rc::new(item),
            separator: Rc::new(separator),
            min,
        }
    }
}

impl<P, S> Parser for RepSep<P, S>
where
    P: Parser,
    S: Parser,
{
    type Output = Vec<P::Output>;

    fn parse(&self, input: Input) -> ParseFuture<Self::Output> {
        let item = Rc::clone(&self.item);
        let separator = Rc::clone(&self.separator);
        let min = self.min;
        let start = input.clone();

        self.item
            .parse(input)
            .bind_result(move |outcome| match outcome {
                Ok(first) => {
                    let next = first.next.clone();
                    separated_rest(item, separator, start, next, vec![first.value])
                }
                Err(error) => {
                    if min == 0 {
                        Future::unit(ParserResult::empty(Vec::new(), start))
                    } else {
                        Future::fail(error)
                    }
                }
            })
    }
}

// Keep matching `separator item` pairs from `current`
fn separated_rest<P: Parser, S: Parser>(
    item: Rc<P>,
    separator: Rc<S>,
    start: Input,
    current: Input,
    mut values: Vec<P::Output>,
) -> ParseFuture<Vec<P::Output>> {
    let next_item = Rc::clone(&item);
    then_parse(separator.parse(current.clone()), move |_, rest| {
        next_item.parse(rest)
    })
    .bind_result(move |outcome| match outcome {
        Ok(parsed) => {
            let consumed = parsed.next.pos() > current.pos();
            values.push(parsed.value);
            if consumed {
                separated_rest(item, separator, start, parsed.next, values)
            } else {
                Future::unit(ParserResult::new(values, start, parsed.next))
            }
        }
        Err(_) => Future::unit(ParserResult::new(values, start, current)),
    })
}

/// Extension trait to add separated repetition methods to parsers
pub trait RepSepExt: Parser + Sized {
    /// Zero or more items separated by `separator`
    fn repsep<S: Parser>(self, separator: S) -> RepSep<Self, S> {
        RepSep::new(self, separator, 0)
    }

    /// One or more items separated by `separator`
    fn repsep1<S: Parser>(self, separator: S) -> RepSep<Self, S> {
        RepSep::new(self, separator, 1)
    }
}

impl<P> RepSepExt for P where P: Parser {}

/// Convenience function to create a zero-or-more separated repetition
pub fn repsep<P: Parser, S: Parser>(item: P, separator: S) -> RepSep<P, S> {
    RepSep::new(item, separator, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::number::nat;
    use crate::parser::ParserExt;
    use crate::scheduler::block_on;
    use crate::text::{char, string};

    #[test]
    fn test_repsep_empty_input() {
        let parser = repsep(nat(), char(','));
        let parsed = block_on(parser.parse_str("")).unwrap().unwrap();
        assert_eq!(parsed.value, Vec::<i64>::new());
    }

    #[test]
    fn test_repsep1_empty_input_fails() {
        let parser = nat().repsep1(char(','));
        let error = block_on(parser.parse_str("")).unwrap().unwrap_err();
        assert_eq!(error, ParseError::mismatch("digit", "end of input", 0));
    }

    #[test]
    fn test_single_element() {
        let parsed = block_on(nat().repsep1(char(',')).parse_str("42"))
            .unwrap()
            .unwrap();
        assert_eq!(parsed.value, vec![42]);
    }

    #[test]
    fn test_multiple_elements() {
        let parsed = block_on(nat().repsep(char(',')).parse_str("1,2,3"))
            .unwrap()
            .unwrap();
        assert_eq!(parsed.value, vec![1, 2, 3]);
        assert_eq!(parsed.matched(), "1,2,3");
    }

    #[test]
    fn test_trailing_separator_is_not_consumed() {
        let parsed = block_on(nat().repsep(char(',')).parse_str("1,2,"))
            .unwrap()
            .unwrap();
        assert_eq!(parsed.value, vec![1, 2]);
        assert_eq!(parsed.next.rest(), ",");
    }

    #[test]
    fn test_non_matching_separator() {
        let parsed = block_on(nat().repsep(char(',')).parse_str("1;2;3"))
            .unwrap()
            .unwrap();
        assert_eq!(parsed.value, vec![1]);
        assert_eq!(parsed.next.head(), Some(';'));
    }

    #[test]
    fn test_string_separator() {
        let parser = string("ab").repsep1(string("::"));
        let parsed = block_on(parser.parse_str("ab::ab::abc")).unwrap().unwrap();
        assert_eq!(parsed.value.len(), 3);
        assert_eq!(parsed.next.rest(), "c");
    }
}
