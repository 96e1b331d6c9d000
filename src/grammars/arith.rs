//! Integer arithmetic
//!
//! ```text
//! Expr   -> Term (('+' | '-') Term)*
//! Term   -> Factor ('*' Factor)*
//! Factor -> '(' Expr ')' | Integer
//! ```
//!
//! Arithmetic wraps on overflow.

use crate::chain::ChainExt;
use crate::forward::{Forward, recursive};
use crate::map::MapExt;
use crate::or::OrExt;
use crate::parser::Parser;
use crate::sequence::SeqExt;
use crate::token::{integer, symbol};

type BinOp = fn(i64, i64) -> i64;

/// An arithmetic expression, evaluated
pub fn expression() -> impl Parser<Output = i64> {
    recursive(|expr: Forward<i64>| {
        let add: BinOp = i64::wrapping_add;
        let sub: BinOp = i64::wrapping_sub;
        let mul: BinOp = i64::wrapping_mul;

        let factor = symbol("(").seqr(expr).seql(symbol(")")).or(integer());
        let term = factor.chainl1(symbol("*").val(mul));
        term.chainl1(symbol("+").val(add).or(symbol("-").val(sub)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::parser::ParserExt;
    use crate::scheduler::block_on;

    fn evaluate(source: &str) -> Result<i64, ParseError> {
        block_on(expression().complete().parse_str(source))
            .unwrap()
            .map(|parsed| parsed.value)
    }

    #[test]
    fn test_precedence() {
        assert_eq!(evaluate("(1+2)*3"), Ok(9));
        assert_eq!(evaluate("1+2*3"), Ok(7));
        assert_eq!(evaluate("2*3+4*5"), Ok(26));
    }

    #[test]
    fn test_left_associative_subtraction() {
        assert_eq!(evaluate("10-4-3"), Ok(3));
        assert_eq!(evaluate("10-(4-3)"), Ok(9));
    }

    #[test]
    fn test_whitespace_and_negative_literals() {
        assert_eq!(evaluate("  ( 1 + 2 ) * -3 "), Ok(-9));
        assert_eq!(evaluate("1 - -1"), Ok(2));
    }

    #[test]
    fn test_nested_parentheses() {
        assert_eq!(evaluate("((((7))))"), Ok(7));
    }

    #[test]
    fn test_incomplete_expression() {
        let error = evaluate("1+").unwrap_err();
        assert_eq!(error.position(), 1);
        assert_eq!(error, ParseError::mismatch("end of input", "'+'", 1));
    }

    #[test]
    fn test_unbalanced_parenthesis() {
        let error = evaluate("(1+2").unwrap_err();
        assert_eq!(error.position(), 4);
        assert!(evaluate("").is_err());
    }

    #[test]
    fn test_reuse_across_parses() {
        let parser = expression();
        for (source, expected) in [("1", 1), ("2*2", 4), ("(3)", 3)] {
            let parsed = block_on(parser.parse_str(source)).unwrap().unwrap();
            assert_eq!(parsed.value, expected);
        }
    }
}
