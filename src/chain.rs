//! Operator chains
//!
//! `operand.chainl1(op)` matches `operand (op operand)*` where `op` produces the
//! binary function combining the operands. It is `repsep1` whose separators carry
//! the fold. Chains are matched iteratively: operator and operand are parsed as a
//! pair, and a trailing operator without an operand is left unconsumed.

use crate::future::Future;
use crate::input::Input;
use crate::parser::{ParseFuture, Parser, ParserResult, then_parse};
use std::rc::Rc;

/// Left-associative chain: `1-2-3` folds as `(1-2)-3`
pub struct ChainLeft<P, O> {
    operand: Rc<P>,
    operator: Rc<O>,
}

impl<P, O> ChainLeft<P, O> {
    pub fn new(operand: P, operator: O) -> Self {
        ChainLeft {
            operand: Rc::new(operand),
            operator: Rc::new(operator),
        }
    }
}

impl<P, O, F> Parser for ChainLeft<P, O>
where
    P: Parser,
    O: Parser<Output = F>,
    F: Fn(P::Output, P::Output) -> P::Output + 'static,
{
    type Output = P::Output;

    fn parse(&self, input: Input) -> ParseFuture<Self::Output> {
        let operand = Rc::clone(&self.operand);
        let operator = Rc::clone(&self.operator);
        self.operand.parse(input).bind(move |first| {
            let ParserResult { value, start, next } = first;
            fold_left(operand, operator, start, next, value)
        })
    }
}

// Parse `op operand` from `current`, returning the operator and the operand
fn operation<P, O>(operand: Rc<P>, operator: &O, current: Input) -> ParseFuture<(O::Output, P::Output)>
where
    P: Parser,
    O: Parser,
{
    then_parse(operator.parse(current), move |f, rest| {
        operand.parse(rest).map(move |parsed| parsed.map(|y| (f, y)))
    })
}

fn fold_left<P, O, F>(
    operand: Rc<P>,
    operator: Rc<O>,
    start: Input,
    current: Input,
    acc: P::Output,
) -> ParseFuture<P::Output>
where
    P: Parser,
    O: Parser<Output = F>,
    F: Fn(P::Output, P::Output) -> P::Output + 'static,
{
    operation(Rc::clone(&operand), &*operator, current.clone()).bind_result(move |outcome| {
        match outcome {
            Ok(parsed) => {
                let consumed = parsed.next.pos() > current.pos();
                let (f, y) = parsed.value;
                let acc = f(acc, y);
                if consumed {
                    fold_left(operand, operator, start, parsed.next, acc)
                } else {
                    Future::unit(ParserResult::new(acc, start, parsed.next))
                }
            }
            Err(_) => Future::unit(ParserResult::new(acc, start, current)),
        }
    })
}

/// Right-associative chain: `2^3^2` folds as `2^(3^2)`
pub struct ChainRight<P, O> {
    operand: Rc<P>,
    operator: Rc<O>,
}

impl<P, O> ChainRight<P, O> {
    pub fn new(operand: P, operator: O) -> Self {
        ChainRight {
            operand: Rc::new(operand),
            operator: Rc::new(operator),
        }
    }
}

impl<P, O, F> Parser for ChainRight<P, O>
where
    P: Parser,
    O: Parser<Output = F>,
    F: Fn(P::Output, P::Output) -> P::Output + 'static,
{
    type Output = P::Output;

    fn parse(&self, input: Input) -> ParseFuture<Self::Output> {
        let operand = Rc::clone(&self.operand);
        let operator = Rc::clone(&self.operator);
        self.operand.parse(input).bind(move |first| {
            let ParserResult { value, start, next } = first;
            collect_right(operand, operator, start, next, value, Vec::new())
        })
    }
}

// Gather every `op operand` pair, then fold from the right
fn collect_right<P, O, F>(
    operand: Rc<P>,
    operator: Rc<O>,
    start: Input,
    current: Input,
    head: P::Output,
    mut tail: Vec<(F, P::Output)>,
) -> ParseFuture<P::Output>
where
    P: Parser,
    O: Parser<Output = F>,
    F: Fn(P::Output, P::Output) -> P::Output + 'static,
{
    operation(Rc::clone(&operand), &*operator, current.clone()).bind_result(move |outcome| {
        match outcome {
            Ok(parsed) => {
                let consumed = parsed.next.pos() > current.pos();
                tail.push(parsed.value);
                if consumed {
                    collect_right(operand, operator, start, parsed.next, head, tail)
                } else {
                    Future::unit(ParserResult::new(fold_right(head, tail), start, parsed.next))
                }
            }
            Err(_) => Future::unit(ParserResult::new(fold_right(head, tail), start, current)),
        }
    })
}

// x0 f1 x1 f2 x2 ... => f1(x0, f2(x1, ...))
fn fold_right<T, F>(head: T, tail: Vec<(F, T)>) -> T
where
    F: Fn(T, T) -> T,
{
    let mut pending = Vec::with_capacity(tail.len());
    let mut left = head;
    for (f, right) in tail {
        pending.push((left, f));
        left = right;
    }

    let mut acc = left;
    while let Some((x, f)) = pending.pop() {
        acc = f(x, acc);
    }
    acc
}

/// Extension trait to add operator chains to parsers
pub trait ChainExt: Parser + Sized {
    fn chainl1<O, F>(self, operator: O) -> ChainLeft<Self, O>
    where
        O: Parser<Output = F>,
        F: Fn(Self::Output, Self::Output) -> Self::Output + 'static,
    {
        ChainLeft::new(self, operator)
    }

    fn chainr1<O, F>(self, operator: O) -> ChainRight<Self, O>
    where
        O: Parser<Output = F>,
        F: Fn(Self::Output, Self::Output) -> Self::Output + 'static,
    {
        ChainRight::new(self, operator)
    }
}

impl<P> ChainExt for P where P: Parser {}
