//! List-of-successes parsing
//!
//! A [`ListParser`] returns every way its grammar can match a prefix of the
//! input, as a lazy [`FutureList`] of values paired with the remaining input.
//! No parse is an error: a parser that cannot match returns the empty list.
//! Alternatives are kept side by side with [`ListParser::plus`], so ambiguous
//! grammars produce all their readings, longest first for [`ListParser::many`].

use crate::future::Future;
use crate::input::Input;
use crate::list::FutureList;
use std::convert::Infallible;
use std::rc::Rc;

/// Every parse of a prefix, with the input left after it
pub type Parses<T> = FutureList<(T, Input), Infallible>;

pub struct ListParser<T> {
    run: Rc<dyn Fn(Input) -> Parses<T>>,
}

impl<T> Clone for ListParser<T> {
    fn clone(&self) -> Self {
        ListParser {
            run: Rc::clone(&self.run),
        }
    }
}

impl<T: 'static> ListParser<T> {
    pub fn new<F>(run: F) -> Self
    where
        F: Fn(Input) -> Parses<T> + 'static,
    {
        ListParser { run: Rc::new(run) }
    }

    pub fn parse(&self, input: Input) -> Parses<T> {
        (self.run)(input)
    }

    /// Force every parse of `source`
    pub fn parse_all(&self, source: &str) -> Future<Vec<(T, Input)>, Infallible> {
        self.parse(Input::new(source)).collect()
    }

    /// Never matches
    pub fn zero() -> Self {
        ListParser::new(|_| FutureList::nil())
    }

    /// Continue every parse of `self` with the parser `f` picks for its value
    pub fn bind<U, F>(&self, f: F) -> ListParser<U>
    where
        U: 'static,
        F: Fn(T) -> ListParser<U> + 'static,
    {
        let first = self.clone();
        let f = Rc::new(f);
        ListParser::new(move |input| {
            let f = Rc::clone(&f);
            first
                .parse(input)
                .flat_map(move |(value, rest)| f(value).parse(rest))
        })
    }

    pub fn map<U, F>(&self, f: F) -> ListParser<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        let parser = self.clone();
        let f = Rc::new(f);
        ListParser::new(move |input| {
            let f = Rc::clone(&f);
            parser.parse(input).map(move |(value, rest)| (f(value), rest))
        })
    }

    /// The parses of `self` followed by the parses of `other`
    pub fn plus(&self, other: &ListParser<T>) -> Self {
        let first = self.clone();
        let second = other.clone();
        ListParser::new(move |input: Input| {
            first.parse(input.clone()).concat(second.parse(input))
        })
    }

    pub fn seqr<U: 'static>(&self, other: &ListParser<U>) -> ListParser<U> {
        let other = other.clone();
        self.bind(move |_| other.clone())
    }
}

impl<T: Clone + 'static> ListParser<T> {
    /// Matches the empty prefix once, producing `value`
    pub fn result(value: T) -> Self {
        ListParser::new(move |input| FutureList::singleton((value.clone(), input)))
    }

    pub fn seq<U: 'static>(&self, other: &ListParser<U>) -> ListParser<(T, U)> {
        let other = other.clone();
        self.bind(move |x| other.map(move |y| (x.clone(), y)))
    }

    pub fn seql<U: 'static>(&self, other: &ListParser<U>) -> ListParser<T> {
        let other = other.clone();
        self.bind(move |x| other.map(move |_| x.clone()))
    }

    /// Zero or more repetitions, every count of them
    ///
    /// The repeated parser must consume input when it matches.
    pub fn many(&self) -> ListParser<Vec<T>> {
        let item = self.clone();
        let more = self.bind(move |x| {
            item.many().map(move |mut xs: Vec<T>| {
                xs.insert(0, x.clone());
                xs
            })
        });
        more.plus(&ListParser::result(Vec::new()))
    }
}

impl ListParser<char> {
    /// Any single char
    pub fn item() -> Self {
        ListParser::new(|input: Input| match input.advance() {
            Some((ch, rest)) => FutureList::singleton((ch, rest)),
            None => FutureList::nil(),
        })
    }

    pub fn sat<F>(predicate: F) -> Self
    where
        F: Fn(char) -> bool + 'static,
    {
        ListParser::item().bind(move |ch| {
            if predicate(ch) {
                ListParser::result(ch)
            } else {
                ListParser::zero()
            }
        })
    }

    pub fn char(expected: char) -> Self {
        ListParser::sat(move |ch| ch == expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::block_on;
    use pretty_assertions::assert_eq;

    fn readings<T: 'static>(parser: &ListParser<T>, source: &str) -> Vec<(T, String)> {
        let parses = match block_on(parser.parse_all(source)) {
            Some(Ok(parses)) => parses,
            Some(Err(never)) => match never {},
            None => panic!("parse did not settle"),
        };
        parses
            .into_iter()
            .map(|(value, rest)| (value, rest.rest().to_string()))
            .collect()
    }

    #[test]
    fn test_result_and_zero() {
        assert_eq!(
            readings(&ListParser::result(7), "ab"),
            vec![(7, "ab".to_string())]
        );
        assert!(readings(&ListParser::<i32>::zero(), "ab").is_empty());
    }

    #[test]
    fn test_item() {
        assert_eq!(
            readings(&ListParser::item(), "ab"),
            vec![('a', "b".to_string())]
        );
        assert!(readings(&ListParser::item(), "").is_empty());
    }

    #[test]
    fn test_sat() {
        let digit = ListParser::sat(|c| c.is_ascii_digit());
        assert_eq!(readings(&digit, "7x"), vec![('7', "x".to_string())]);
        assert!(readings(&digit, "x7").is_empty());
    }

    #[test]
    fn test_sequencing() {
        let a = ListParser::char('a');
        let b = ListParser::char('b');
        assert_eq!(
            readings(&a.seq(&b), "abc"),
            vec![(('a', 'b'), "c".to_string())]
        );
        assert_eq!(readings(&a.seql(&b), "abc"), vec![('a', "c".to_string())]);
        assert_eq!(readings(&a.seqr(&b), "abc"), vec![('b', "c".to_string())]);
        assert!(readings(&a.seq(&b), "ba").is_empty());
    }

    #[test]
    fn test_plus_keeps_every_parse() {
        // "a" or "aa": both readings of "aa" are returned
        let a = ListParser::char('a');
        let one = a.map(|_| 1);
        let two = a.seq(&a).map(|_| 2);
        assert_eq!(
            readings(&one.plus(&two), "aab"),
            vec![(1, "ab".to_string()), (2, "b".to_string())]
        );
    }

    #[test]
    fn test_many_longest_first() {
        let a = ListParser::char('a');
        let counts: Vec<(usize, String)> = readings(&a.many().map(|xs| xs.len()), "aab");
        assert_eq!(
            counts,
            vec![
                (2, "b".to_string()),
                (1, "ab".to_string()),
                (0, "aab".to_string()),
            ]
        );
    }

    #[test]
    fn test_ambiguous_split() {
        // Every way to split a run of letters into two non-empty words
        let letter = ListParser::sat(char::is_alphabetic);
        let word = letter
            .seq(&letter.many())
            .map(|(first, rest)| std::iter::once(first).chain(rest).collect::<String>());
        let split = word.seq(&word);
        let mut complete: Vec<(String, String)> = readings(&split, "abc")
            .into_iter()
            .filter(|(_, rest)| rest.is_empty())
            .map(|(pair, _)| pair)
            .collect();
        complete.sort();
        assert_eq!(
            complete,
            vec![
                ("a".to_string(), "bc".to_string()),
                ("ab".to_string(), "c".to_string()),
            ]
        );
    }

    #[test]
    fn test_bind_uses_the_value() {
        // A digit n followed by exactly n 'x'
        let counted = ListParser::sat(|c| c.is_ascii_digit()).bind(|d| {
            let n = d.to_digit(10).unwrap_or(0) as usize;
            ListParser::char('x').many().bind(move |xs| {
                if xs.len() == n {
                    ListParser::result(n)
                } else {
                    ListParser::zero()
                }
            })
        });
        assert_eq!(readings(&counted, "2xxx"), vec![(2, "x".to_string())]);
    }
}
