//! Sequential combinators
//!
//! Same contracts as [`super::par`], except that computation `i + 1` is started
//! only once computation `i` has settled.

use super::Future;
use crate::computation::Computation;
use std::collections::VecDeque;

/// Run each computation in turn and collect every outcome in input order
pub fn wait_for_all<C, I>(computations: I) -> Future<Vec<Result<C::Output, C::Error>>, C::Error>
where
    C: Computation,
    I: IntoIterator<Item = C>,
{
    let queue: VecDeque<C> = computations.into_iter().collect();
    let outcomes = Vec::with_capacity(queue.len());
    collect_outcomes(queue, outcomes)
}

fn collect_outcomes<C: Computation>(
    mut queue: VecDeque<C>,
    mut outcomes: Vec<Result<C::Output, C::Error>>,
) -> Future<Vec<Result<C::Output, C::Error>>, C::Error> {
    match queue.pop_front() {
        None => Future::unit(outcomes),
        Some(computation) => computation.into_future().bind_result(move |outcome| {
            outcomes.push(outcome);
            collect_outcomes(queue, outcomes)
        }),
    }
}

/// Run each computation in turn; the first failure stops the sequence
pub fn all<C, I>(computations: I) -> Future<Vec<C::Output>, C::Error>
where
    C: Computation,
    I: IntoIterator<Item = C>,
{
    let queue: VecDeque<C> = computations.into_iter().collect();
    let values = Vec::with_capacity(queue.len());
    collect_values(queue, values)
}

fn collect_values<C: Computation>(
    mut queue: VecDeque<C>,
    mut values: Vec<C::Output>,
) -> Future<Vec<C::Output>, C::Error> {
    match queue.pop_front() {
        None => Future::unit(values),
        Some(computation) => computation.into_future().bind(move |value| {
            values.push(value);
            collect_values(queue, values)
        }),
    }
}
