//! Deferred results
//!
//! A [`Future`] is a one-shot computation that eventually settles with `Ok(T)` or
//! `Err(E)`. It owns a resolution procedure which is handed a [`Continuation`] when
//! the future is run. Two guarantees hold for every future built by this module:
//!
//! - the continuation is invoked exactly once,
//! - it is invoked on a later event-loop turn than the one that ran the future.
//!
//! Composition never blocks. Every step of a chain is queued through
//! [`scheduler::schedule`](crate::scheduler::schedule), so arbitrarily long chains
//! run with a bounded call stack.
//!
//! These are not `std::future::Future`s: there is no polling and no waker, only
//! continuations driven by the crate's event loop.

pub mod par;
pub mod seq;
pub mod spread;

use crate::scheduler::{self, schedule};
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::debug;

pub use spread::Spread;

/// Receives the outcome of a [`Future`]
pub type Continuation<T, E> = Box<dyn FnOnce(Result<T, E>)>;

pub struct Future<T, E> {
    resolve: Box<dyn FnOnce(Continuation<T, E>)>,
}

impl<T, E> fmt::Debug for Future<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Future")
            .field("resolve", &"<procedure>")
            .finish()
    }
}

impl<T: 'static, E: 'static> Future<T, E> {
    /// Build a future from its resolution procedure
    ///
    /// The procedure must eventually call the continuation once, from a later turn
    /// (through [`scheduler::schedule`] or [`scheduler::after`]).
    pub fn new(resolve: impl FnOnce(Continuation<T, E>) + 'static) -> Self {
        Future {
            resolve: Box::new(resolve),
        }
    }

    /// A future that succeeds with `value`
    pub fn unit(value: T) -> Self {
        Future::new(move |continuation| schedule(move || continuation(Ok(value))))
    }

    /// A future that fails with `error`
    pub fn fail(error: E) -> Self {
        Future::new(move |continuation| schedule(move || continuation(Err(error))))
    }

    pub fn from_result(outcome: Result<T, E>) -> Self {
        Future::new(move |continuation| schedule(move || continuation(outcome)))
    }

    /// Build the future on a later turn
    ///
    /// Use this for recursive functions returning futures: the recursive call then
    /// happens from the event loop instead of growing the current stack.
    pub fn lazy(thunk: impl FnOnce() -> Future<T, E> + 'static) -> Self {
        Future::new(move |continuation| schedule(move || thunk().run_with(continuation)))
    }

    /// A future that succeeds with `value` once `duration` has elapsed
    pub fn delayed(value: T, duration: Duration) -> Self {
        Future::new(move |continuation| {
            scheduler::after(duration, move || continuation(Ok(value)))
        })
    }

    /// Start the computation
    pub fn run(self, continuation: impl FnOnce(Result<T, E>) + 'static) {
        (self.resolve)(Box::new(continuation));
    }

    pub fn run_with(self, continuation: Continuation<T, E>) {
        (self.resolve)(continuation);
    }

    // Runs `self` on a later turn and hands its outcome to `step` together with the
    // downstream continuation
    fn chain<U: 'static, E2: 'static>(
        self,
        step: impl FnOnce(Result<T, E>, Continuation<U, E2>) + 'static,
    ) -> Future<U, E2> {
        Future::new(move |continuation| {
            schedule(move || self.run(move |outcome| step(outcome, continuation)))
        })
    }

    /// Sequence `f` after this future
    ///
    /// A failure is propagated unchanged and `f` is never called.
    pub fn bind<U: 'static, F>(self, f: F) -> Future<U, E>
    where
        F: FnOnce(T) -> Future<U, E> + 'static,
    {
        self.chain(move |outcome, continuation| match outcome {
            Ok(value) => f(value).run_with(continuation),
            Err(error) => schedule(move || continuation(Err(error))),
        })
    }

    /// Sequence `f` after this future, handing it the whole outcome
    ///
    /// Never short-circuits, so `f` can observe and absorb failures.
    pub fn bind_result<U: 'static, E2: 'static, F>(self, f: F) -> Future<U, E2>
    where
        F: FnOnce(Result<T, E>) -> Future<U, E2> + 'static,
    {
        self.chain(move |outcome, continuation| f(outcome).run_with(continuation))
    }

    /// Continue with `on_success` or `on_error` depending on the outcome
    pub fn then<U: 'static, E2: 'static, S, R>(self, on_success: S, on_error: R) -> Future<U, E2>
    where
        S: FnOnce(T) -> Future<U, E2> + 'static,
        R: FnOnce(E) -> Future<U, E2> + 'static,
    {
        self.chain(move |outcome, continuation| match outcome {
            Ok(value) => on_success(value).run_with(continuation),
            Err(error) => on_error(error).run_with(continuation),
        })
    }

    /// Recover from a failure; a success passes through unchanged
    pub fn or_else<E2: 'static, R>(self, on_error: R) -> Future<T, E2>
    where
        R: FnOnce(E) -> Future<T, E2> + 'static,
    {
        self.chain(move |outcome, continuation| match outcome {
            Ok(value) => schedule(move || continuation(Ok(value))),
            Err(error) => on_error(error).run_with(continuation),
        })
    }

    /// The additive operation: on failure, discard the error and adopt `other`
    pub fn add(self, other: Future<T, E>) -> Future<T, E> {
        self.or_else(move |_| other)
    }

    /// Alias of [`Future::add`]
    pub fn or(self, other: Future<T, E>) -> Future<T, E> {
        self.add(other)
    }

    pub fn map<U: 'static, F>(self, f: F) -> Future<U, E>
    where
        F: FnOnce(T) -> U + 'static,
    {
        self.chain(move |outcome, continuation| {
            let mapped = outcome.map(f);
            schedule(move || continuation(mapped))
        })
    }

    pub fn map_err<E2: 'static, F>(self, f: F) -> Future<T, E2>
    where
        F: FnOnce(E) -> E2 + 'static,
    {
        self.chain(move |outcome, continuation| {
            let mapped = outcome.map_err(f);
            schedule(move || continuation(mapped))
        })
    }

    /// Apply `f` to the fields of a tuple value
    pub fn spread<F, U: 'static>(self, f: F) -> Future<U, E>
    where
        T: Spread<F, U, E>,
        F: 'static,
    {
        self.bind(move |args| args.spread(f))
    }

    /// Race this future against a timer failing with `error` after `duration`
    ///
    /// Whichever settles first wins. The loser is not cancelled: it keeps running
    /// and its outcome is dropped.
    pub fn timeout(self, duration: Duration, error: E) -> Future<T, E> {
        let timer = Future::new(move |continuation: Continuation<T, E>| {
            scheduler::after(duration, move || continuation(Err(error)))
        });
        par::race(vec![self, timer])
    }

    /// Emit a `tracing` debug event with the outcome and elapsed time once settled
    pub fn traced(self, name: &'static str) -> Future<T, E>
    where
        T: fmt::Debug,
        E: fmt::Debug,
    {
        Future::new(move |continuation| {
            let started = Instant::now();
            self.run(move |outcome| {
                let elapsed_ms = started.elapsed().as_millis() as u64;
                match &outcome {
                    Ok(value) => debug!(future = name, elapsed_ms, ?value, "future resolved"),
                    Err(error) => debug!(future = name, elapsed_ms, ?error, "future failed"),
                }
                continuation(outcome);
            })
        })
    }
}

impl<T: 'static, E: 'static> Future<Future<T, E>, E> {
    pub fn flatten(self) -> Future<T, E> {
        self.bind(|inner| inner)
    }
}

/// Lift a unary function over futures
pub fn lift1<A, B, E, F>(f: F) -> impl Fn(Future<A, E>) -> Future<B, E>
where
    A: 'static,
    B: 'static,
    E: 'static,
    F: Fn(A) -> B + 'static,
{
    let f = Rc::new(f);
    move |future| {
        let f = Rc::clone(&f);
        future.map(move |value| f(value))
    }
}

/// Lift a binary function over futures; the first argument settles before the
/// second is started
pub fn lift2<A, B, C, E, F>(f: F) -> impl Fn(Future<A, E>, Future<B, E>) -> Future<C, E>
where
    A: 'static,
    B: 'static,
    C: 'static,
    E: 'static,
    F: Fn(A, B) -> C + 'static,
{
    let f = Rc::new(f);
    move |first, second| {
        let f = Rc::clone(&f);
        first.bind(move |a| second.map(move |b| f(a, b)))
    }
}
