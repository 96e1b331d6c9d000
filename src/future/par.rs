//! Concurrent combinators
//!
//! Every computation is started in the same turn. They interleave on the thread's
//! event loop, so "concurrent" means cooperative, never multi-core. Ordered
//! results are written into slots indexed by input position and do not depend on
//! completion order. None of these combinators cancel the computations they stop
//! waiting for.

use super::{Continuation, Future};
use crate::computation::Computation;
use crate::error::RaceError;
use crate::scheduler::schedule;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, trace};

// The downstream continuation, taken by whichever outcome settles first
struct Pending<T, E> {
    continuation: RefCell<Option<Continuation<T, E>>>,
}

impl<T, E> Pending<T, E> {
    fn new(continuation: Continuation<T, E>) -> Rc<Self> {
        Rc::new(Pending {
            continuation: RefCell::new(Some(continuation)),
        })
    }

    /// Returns false when the outcome arrived after settlement and was dropped
    fn settle(&self, outcome: Result<T, E>) -> bool {
        let continuation = self.continuation.borrow_mut().take();
        match continuation {
            Some(continuation) => {
                continuation(outcome);
                true
            }
            None => false,
        }
    }
}

// Pre-sized storage for outcomes that arrive out of order
struct Slots<T> {
    values: RefCell<Vec<Option<T>>>,
    remaining: Cell<usize>,
}

impl<T> Slots<T> {
    fn new(len: usize) -> Rc<Self> {
        Rc::new(Slots {
            values: RefCell::new((0..len).map(|_| None).collect()),
            remaining: Cell::new(len),
        })
    }

    /// Store the value for `index`; true once every slot is filled
    fn fill(&self, index: usize, value: T) -> bool {
        self.values.borrow_mut()[index] = Some(value);
        let remaining = self.remaining.get() - 1;
        self.remaining.set(remaining);
        trace!(index, remaining, "slot filled");
        remaining == 0
    }

    fn take_all(&self) -> Vec<T> {
        self.values.take().into_iter().flatten().collect()
    }
}

fn settle_later<T: 'static, E: 'static>(continuation: Continuation<T, E>, outcome: Result<T, E>) {
    schedule(move || continuation(outcome));
}

/// Wait for every computation and collect each outcome in input order
///
/// Never fails. An empty input resolves to an empty vector.
pub fn wait_for_all<C, I>(computations: I) -> Future<Vec<Result<C::Output, C::Error>>, C::Error>
where
    C: Computation,
    I: IntoIterator<Item = C>,
{
    let computations: Vec<C> = computations.into_iter().collect();
    Future::new(move |continuation| {
        if computations.is_empty() {
            return settle_later(continuation, Ok(Vec::new()));
        }
        let slots = Slots::new(computations.len());
        let pending = Pending::new(continuation);

        for (index, computation) in computations.into_iter().enumerate() {
            let slots = Rc::clone(&slots);
            let pending = Rc::clone(&pending);
            computation.run(Box::new(move |outcome| {
                if slots.fill(index, outcome) {
                    pending.settle(Ok(slots.take_all()));
                }
            }));
        }
    })
}

/// Succeed with every value in input order, or fail with the first failure to arrive
pub fn all<C, I>(computations: I) -> Future<Vec<C::Output>, C::Error>
where
    C: Computation,
    I: IntoIterator<Item = C>,
{
    let computations: Vec<C> = computations.into_iter().collect();
    Future::new(move |continuation| {
        if computations.is_empty() {
            return settle_later(continuation, Ok(Vec::new()));
        }
        let slots = Slots::new(computations.len());
        let pending = Pending::new(continuation);

        for (index, computation) in computations.into_iter().enumerate() {
            let slots = Rc::clone(&slots);
            let pending = Rc::clone(&pending);
            computation.run(Box::new(move |outcome| match outcome {
                Ok(value) => {
                    if slots.fill(index, value) {
                        pending.settle(Ok(slots.take_all()));
                    }
                }
                Err(error) => {
                    if pending.settle(Err(error)) {
                        debug!(index, "all: computation failed");
                    }
                }
            }));
        }
    })
}

/// Succeed with the first success to arrive
///
/// Fails with every error, in input order, when all computations fail.
pub fn any<C, I>(computations: I) -> Future<C::Output, RaceError<C::Error>>
where
    C: Computation,
    I: IntoIterator<Item = C>,
{
    let computations: Vec<C> = computations.into_iter().collect();
    Future::new(move |continuation| {
        if computations.is_empty() {
            return settle_later(continuation, Err(RaceError::Empty));
        }
        let errors = Slots::new(computations.len());
        let pending = Pending::new(continuation);

        for (index, computation) in computations.into_iter().enumerate() {
            let errors = Rc::clone(&errors);
            let pending = Rc::clone(&pending);
            computation.run(Box::new(move |outcome| match outcome {
                Ok(value) => {
                    if pending.settle(Ok(value)) {
                        debug!(index, "any: settled with a success");
                    }
                }
                Err(error) => {
                    if errors.fill(index, error) {
                        pending.settle(Err(RaceError::AllFailed(errors.take_all())));
                    }
                }
            }));
        }
    })
}

/// Settle with the first outcome to arrive, success or failure
pub fn first<C, I>(computations: I) -> Future<C::Output, RaceError<C::Error>>
where
    C: Computation,
    I: IntoIterator<Item = C>,
{
    let computations: Vec<Future<C::Output, RaceError<C::Error>>> = computations
        .into_iter()
        .map(|computation| computation.into_future().map_err(RaceError::Failed))
        .collect();
    if computations.is_empty() {
        return Future::fail(RaceError::Empty);
    }
    race(computations)
}

/// Run two computations of different types concurrently
///
/// Succeeds with both values, or fails with the first failure to arrive.
pub fn zip<A, B, E>(left: Future<A, E>, right: Future<B, E>) -> Future<(A, B), E>
where
    A: 'static,
    B: 'static,
    E: 'static,
{
    Future::new(move |continuation| {
        let pending = Pending::new(continuation);
        let pair: Rc<RefCell<(Option<A>, Option<B>)>> = Rc::new(RefCell::new((None, None)));

        let settle_pair = |pair: &RefCell<(Option<A>, Option<B>)>, pending: &Pending<(A, B), E>| {
            let both = {
                let mut pair = pair.borrow_mut();
                match (pair.0.take(), pair.1.take()) {
                    (Some(a), Some(b)) => Some((a, b)),
                    (a, b) => {
                        *pair = (a, b);
                        None
                    }
                }
            };
            if let Some(both) = both {
                pending.settle(Ok(both));
            }
        };

        let left_pair = Rc::clone(&pair);
        let left_pending = Rc::clone(&pending);
        left.run(move |outcome| match outcome {
            Ok(a) => {
                left_pair.borrow_mut().0 = Some(a);
                settle_pair(&left_pair, &left_pending);
            }
            Err(error) => {
                left_pending.settle(Err(error));
            }
        });

        right.run(move |outcome| match outcome {
            Ok(b) => {
                pair.borrow_mut().1 = Some(b);
                settle_pair(&pair, &pending);
            }
            Err(error) => {
                pending.settle(Err(error));
            }
        });
    })
}

/// First outcome wins, errors pass through unchanged
///
/// An empty input never settles.
pub(crate) fn race<C: Computation>(computations: Vec<C>) -> Future<C::Output, C::Error> {
    Future::new(move |continuation| {
        let pending = Pending::new(continuation);
        for (index, computation) in computations.into_iter().enumerate() {
            let pending = Rc::clone(&pending);
            computation.run(Box::new(move |outcome| {
                if pending.settle(outcome) {
                    debug!(index, "race settled");
                } else {
                    trace!(index, "late outcome discarded");
                }
            }));
        }
    })
}
