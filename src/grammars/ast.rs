//! Arithmetic syntax trees
//!
//! ```text
//! Expr   -> Term (('+' | '-') Term)*
//! Term   -> Factor ('*' Factor)*
//! Factor -> Exp ('^' Factor)?
//! Exp    -> '(' Expr ')' | Integer | Identifier
//! ```
//!
//! Trees serialize to plain JSON-like values: integers as numbers and every
//! other node as an object tagged by `node`, for example
//! `{"node":"add","left":{"node":"var","child":"x"},"right":1}`.

use crate::chain::ChainExt;
use crate::forward::{Forward, recursive};
use crate::map::MapExt;
use crate::or::OrExt;
use crate::parser::Parser;
use crate::sequence::SeqExt;
use crate::token::{identifier, integer, symbol};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Ast {
    Int(i64),
    Node(Node),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "lowercase")]
pub enum Node {
    Add { left: Box<Ast>, right: Box<Ast> },
    Sub { left: Box<Ast>, right: Box<Ast> },
    Mul { left: Box<Ast>, right: Box<Ast> },
    Pow { left: Box<Ast>, right: Box<Ast> },
    Var { child: String },
}

impl Ast {
    pub fn var(name: impl Into<String>) -> Ast {
        Ast::Node(Node::Var { child: name.into() })
    }

    pub fn add(left: Ast, right: Ast) -> Ast {
        Ast::Node(Node::Add {
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn sub(left: Ast, right: Ast) -> Ast {
        Ast::Node(Node::Sub {
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn mul(left: Ast, right: Ast) -> Ast {
        Ast::Node(Node::Mul {
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn pow(left: Ast, right: Ast) -> Ast {
        Ast::Node(Node::Pow {
            left: Box::new(left),
            right: Box::new(right),
        })
    }
}

type Combine = fn(Ast, Ast) -> Ast;

/// An arithmetic expression over integers and variables, as a tree
pub fn expression() -> impl Parser<Output = Ast> {
    recursive(|expr: Forward<Ast>| {
        let add: Combine = Ast::add;
        let sub: Combine = Ast::sub;
        let mul: Combine = Ast::mul;
        let pow: Combine = Ast::pow;

        let exp = symbol("(")
            .seqr(expr)
            .seql(symbol(")"))
            .or(integer().map(Ast::Int))
            .or(identifier(&[]).map(Ast::var));
        let factor = exp.chainr1(symbol("^").val(pow));
        let term = factor.chainl1(symbol("*").val(mul));
        term.chainl1(symbol("+").val(add).or(symbol("-").val(sub)))
    })
}
