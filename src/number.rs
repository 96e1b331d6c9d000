//! Decimal integers
//!
//! Digits are accumulated with checked arithmetic, so a literal outside the
//! `i64` range fails instead of wrapping. `int` accumulates negative literals
//! downwards, which keeps `i64::MIN` parseable.

use crate::error::ParseError;
use crate::future::Future;
use crate::input::Input;
use crate::map::MapExt;
use crate::or::OrExt;
use crate::parser::{ParseFuture, Parser, ParserResult};
use crate::pure::result;
use crate::rep::RepExt;
use crate::sequence::SeqExt;
use crate::text::{char, digit};

const OUT_OF_RANGE: &str = "a number that fits in 64 bits";

/// Parser that turns a sign flag and a run of digits into an `i64`
pub struct Numeral<P> {
    parser: P,
}

impl<P> Numeral<P>
where
    P: Parser<Output = (bool, Vec<char>)>,
{
    pub fn new(parser: P) -> Self {
        Numeral { parser }
    }
}

impl<P> Parser for Numeral<P>
where
    P: Parser<Output = (bool, Vec<char>)>,
{
    type Output = i64;

    fn parse(&self, input: Input) -> ParseFuture<i64> {
        self.parser.parse(input).bind(|parsed| {
            let (negative, digits) = &parsed.value;
            match accumulate(*negative, digits) {
                Some(value) => Future::unit(ParserResult::new(value, parsed.start, parsed.next)),
                None => Future::fail(ParseError::mismatch(
                    OUT_OF_RANGE,
                    parsed.matched().to_string(),
                    parsed.pos(),
                )),
            }
        })
    }
}

fn accumulate(negative: bool, digits: &[char]) -> Option<i64> {
    digits.iter().try_fold(0_i64, |acc, c| {
        let d = i64::from(c.to_digit(10)?);
        let shifted = acc.checked_mul(10)?;
        if negative {
            shifted.checked_sub(d)
        } else {
            shifted.checked_add(d)
        }
    })
}

/// A natural number: one or more ASCII digits
pub fn nat() -> impl Parser<Output = i64> {
    Numeral::new(result(false).seq(digit().rep1()))
}

/// An integer: an optional `-` followed by a natural number
pub fn int() -> impl Parser<Output = i64> {
    let sign = char('-').val(true).or(result(false));
    Numeral::new(sign.seq(digit().rep1()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParserExt;
    use crate::scheduler::block_on;

    fn value_of<P: Parser<Output = i64>>(parser: &P, source: &str) -> i64 {
        block_on(parser.parse_str(source)).unwrap().unwrap().value
    }

    #[test]
    fn test_nat_single_digit() {
        let parsed = block_on(nat().parse_str("5abc")).unwrap().unwrap();
        assert_eq!(parsed.value, 5);
        assert_eq!(parsed.next.rest(), "abc");
    }

    #[test]
    fn test_nat_multiple_digits() {
        assert_eq!(value_of(&nat(), "123abc"), 123);
        assert_eq!(value_of(&nat(), "0"), 0);
        assert_eq!(value_of(&nat(), "007"), 7);
    }

    #[test]
    fn test_nat_rejects_sign() {
        let error = block_on(nat().parse_str("-1")).unwrap().unwrap_err();
        assert_eq!(error, ParseError::mismatch("digit", "'-'", 0));
    }

    #[test]
    fn test_nat_empty_input() {
        let error = block_on(nat().parse_str("")).unwrap().unwrap_err();
        assert_eq!(error, ParseError::mismatch("digit", "end of input", 0));
    }

    #[test]
    fn test_nat_limits() {
        assert_eq!(value_of(&nat(), "9223372036854775807"), i64::MAX);

        let error = block_on(nat().parse_str("9223372036854775808"))
            .unwrap()
            .unwrap_err();
        assert_eq!(
            error,
            ParseError::mismatch(OUT_OF_RANGE, "9223372036854775808", 0)
        );
    }

    #[test]
    fn test_int() {
        assert_eq!(value_of(&int(), "42"), 42);
        assert_eq!(value_of(&int(), "-42"), -42);
        assert_eq!(value_of(&int(), "-0"), 0);
        assert_eq!(value_of(&int(), "-9223372036854775808"), i64::MIN);
    }

    #[test]
    fn test_int_errors() {
        let error = block_on(int().parse_str("-")).unwrap().unwrap_err();
        assert_eq!(error, ParseError::mismatch("digit", "end of input", 1));
        assert!(block_on(int().parse_str("-9223372036854775809")).unwrap().is_err());
        assert!(block_on(int().parse_str("+1")).unwrap().is_err());
    }
}
