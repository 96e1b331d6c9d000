use crate::future::{Continuation, Future};

/// A one-shot asynchronous computation
///
/// `run` starts the computation and hands it the continuation that receives its
/// outcome. Implementations invoke the continuation exactly once, on a later
/// event-loop turn. Taking `self` by value makes a second run impossible.
///
/// The concurrency combinators in [`crate::future::par`] and [`crate::future::seq`]
/// accept any `Computation`.
pub trait Computation: 'static {
    type Output: 'static;
    type Error: 'static;

    fn run(self, continuation: Continuation<Self::Output, Self::Error>);

    /// Wrap the computation in a [`Future`] so it can be composed with `bind`
    fn into_future(self) -> Future<Self::Output, Self::Error>
    where
        Self: Sized,
    {
        Future::new(move |continuation| self.run(continuation))
    }
}

impl<T: 'static, E: 'static> Computation for Future<T, E> {
    type Output = T;
    type Error = E;

    fn run(self, continuation: Continuation<T, E>) {
        self.run_with(continuation);
    }

    fn into_future(self) -> Future<T, E> {
        self
    }
}
