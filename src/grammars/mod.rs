//! Worked grammars built from the combinators
//!
//! [`arith`] evaluates integer arithmetic while parsing; [`ast`] builds a
//! serializable syntax tree with variables and exponentiation.

pub mod arith;
pub mod ast;
