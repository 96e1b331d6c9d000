//! Whitespace-insensitive lexical parsers
//!
//! [`token`] wraps a parser so that white space on both sides is skipped. The
//! remaining helpers are tokenized versions of the common lexemes.

use crate::guard::GuardExt;
use crate::map::MapExt;
use crate::number::{int, nat};
use crate::or::OrExt;
use crate::parser::Parser;
use crate::pure::result;
use crate::reduce::ReduceExt;
use crate::rep::RepExt;
use crate::sequence::SeqExt;
use crate::text::{alphanumeric, char, letter, sat, string, whitespace};
use std::borrow::Cow;

/// Any amount of white space, possibly none
pub fn spaces() -> impl Parser<Output = Vec<char>> {
    whitespace().rep()
}

/// Skip white space before `parser`
pub fn triml<P: Parser>(parser: P) -> impl Parser<Output = P::Output> {
    spaces().seqr(parser)
}

/// Skip white space after `parser`
pub fn trimr<P: Parser>(parser: P) -> impl Parser<Output = P::Output> {
    parser.seql(spaces())
}

/// Skip white space around `parser`
pub fn token<P: Parser>(parser: P) -> impl Parser<Output = P::Output> {
    spaces().seqr(parser.seql(spaces()))
}

/// The exact text `literal` as a token
pub fn symbol(literal: impl Into<Cow<'static, str>>) -> impl Parser<Output = String> {
    token(string(literal))
}

/// A letter followed by letters and digits, other than a reserved word
pub fn identifier(reserved: &[&str]) -> impl Parser<Output = String> + use<> {
    let reserved: Vec<String> = reserved.iter().map(|word| word.to_string()).collect();
    let word = letter().seq(alphanumeric().rep()).reduce();
    token(word.guard(
        move |candidate: &String| !reserved.contains(candidate),
        "non-reserved word",
    ))
}

pub fn natural() -> impl Parser<Output = i64> {
    token(nat())
}

pub fn integer() -> impl Parser<Output = i64> {
    token(int())
}

/// A single-quoted string, where `\'` stands for a quote
pub fn string_literal() -> impl Parser<Output = String> {
    let escaped_quote = string("\\'").val('\'');
    let non_quote = sat(|c| c != '\'', "non quote");
    let body = escaped_quote
        .or(non_quote)
        .rep1()
        .reduce()
        .or(result(String::new()));
    token(char('\'').seqr(body).seql(char('\'')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::parser::ParserExt;
    use crate::scheduler::block_on;

    #[test]
    fn test_spaces() {
        let parsed = block_on(spaces().parse_str(" \t\nx")).unwrap().unwrap();
        assert_eq!(parsed.value.len(), 3);
        assert_eq!(parsed.next.rest(), "x");

        let parsed = block_on(spaces().parse_str("x")).unwrap().unwrap();
        assert!(parsed.value.is_empty());
    }

    #[test]
    fn test_trim() {
        let parsed = block_on(triml(char('a')).parse_str("  a  ")).unwrap().unwrap();
        assert_eq!(parsed.next.rest(), "  ");

        let parsed = block_on(trimr(char('a')).parse_str("a  b")).unwrap().unwrap();
        assert_eq!(parsed.next.rest(), "b");
        assert!(block_on(trimr(char('a')).parse_str(" a")).unwrap().is_err());
    }

    #[test]
    fn test_token_and_symbol() {
        let parsed = block_on(symbol("let").parse_str("  let  x")).unwrap().unwrap();
        assert_eq!(parsed.value, "let");
        assert_eq!(parsed.matched(), "  let  ");
        assert_eq!(parsed.next.rest(), "x");
    }

    #[test]
    fn test_natural_and_integer() {
        let parsed = block_on(natural().parse_str(" 12 ")).unwrap().unwrap();
        assert_eq!(parsed.value, 12);
        assert!(parsed.next.is_end());

        let parsed = block_on(integer().parse_str(" -7 ")).unwrap().unwrap();
        assert_eq!(parsed.value, -7);
    }

    #[test]
    fn test_identifier() {
        let parser = identifier(&["let", "in"]);
        let parsed = block_on(parser.parse_str(" x1 = 2")).unwrap().unwrap();
        assert_eq!(parsed.value, "x1");
        assert_eq!(parsed.next.rest(), "= 2");

        // A reserved prefix is fine
        let parsed = block_on(parser.parse_str("letter")).unwrap().unwrap();
        assert_eq!(parsed.value, "letter");
    }

    #[test]
    fn test_identifier_reserved() {
        let parser = identifier(&["let", "in"]);
        let error = block_on(parser.parse_str(" let x")).unwrap().unwrap_err();
        assert_eq!(
            error,
            ParseError::mismatch("non-reserved word", "\"let\"", 1)
        );
        assert!(block_on(parser.parse_str("1x")).unwrap().is_err());
    }

    #[test]
    fn test_string_literal() {
        let parsed = block_on(string_literal().parse_str("'hello world' rest"))
            .unwrap()
            .unwrap();
        assert_eq!(parsed.value, "hello world");
        assert_eq!(parsed.next.rest(), "rest");
    }

    #[test]
    fn test_string_literal_escapes_and_empty() {
        let parsed = block_on(string_literal().parse_str(r"'it\'s'")).unwrap().unwrap();
        assert_eq!(parsed.value, "it's");

        let parsed = block_on(string_literal().parse_str("''")).unwrap().unwrap();
        assert_eq!(parsed.value, "");
    }

    #[test]
    fn test_string_literal_unterminated() {
        let error = block_on(string_literal().parse_str("'abc")).unwrap().unwrap_err();
        assert_eq!(error, ParseError::mismatch("'\\''", "end of input", 4));
    }
}
