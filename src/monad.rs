//! Monad capability traits
//!
//! [`Future`] is the monad the crate is built on. [`Identity`], [`Option`] and
//! [`Result`] implement the same traits as the classic identity, maybe and
//! exception monads, so code written against [`Monad`] runs unchanged over any
//! of them.

use crate::future::Future;

pub trait Monad: Sized {
    type Item;
    type Wrapped<U: 'static>: Monad<Item = U>;

    fn unit(value: Self::Item) -> Self;

    fn bind<U: 'static, F>(self, f: F) -> Self::Wrapped<U>
    where
        F: FnOnce(Self::Item) -> Self::Wrapped<U> + 'static;

    fn map<U: 'static, F>(self, f: F) -> Self::Wrapped<U>
    where
        F: FnOnce(Self::Item) -> U + 'static,
    {
        self.bind(move |value| <Self::Wrapped<U> as Monad>::unit(f(value)))
    }
}

/// A monad with an additive operation: keep `self` unless it failed
pub trait AddMonad: Monad {
    fn add(self, other: Self) -> Self;
}

/// The monad that adds nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity<T>(pub T);

impl<T> Identity<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Monad for Identity<T> {
    type Item = T;
    type Wrapped<U: 'static> = Identity<U>;

    fn unit(value: T) -> Self {
        Identity(value)
    }

    fn bind<U: 'static, F>(self, f: F) -> Identity<U>
    where
        F: FnOnce(T) -> Identity<U> + 'static,
    {
        f(self.0)
    }
}

impl<T> Monad for Option<T> {
    type Item = T;
    type Wrapped<U: 'static> = Option<U>;

    fn unit(value: T) -> Self {
        Some(value)
    }

    fn bind<U: 'static, F>(self, f: F) -> Option<U>
    where
        F: FnOnce(T) -> Option<U> + 'static,
    {
        self.and_then(f)
    }
}

impl<T> AddMonad for Option<T> {
    fn add(self, other: Self) -> Self {
        self.or(other)
    }
}

impl<T, E> Monad for Result<T, E> {
    type Item = T;
    type Wrapped<U: 'static> = Result<U, E>;

    fn unit(value: T) -> Self {
        Ok(value)
    }

    fn bind<U: 'static, F>(self, f: F) -> Result<U, E>
    where
        F: FnOnce(T) -> Result<U, E> + 'static,
    {
        self.and_then(f)
    }
}

impl<T, E> AddMonad for Result<T, E> {
    fn add(self, other: Self) -> Self {
        self.or(other)
    }
}

impl<T: 'static, E: 'static> Monad for Future<T, E> {
    type Item = T;
    type Wrapped<U: 'static> = Future<U, E>;

    fn unit(value: T) -> Self {
        Future::unit(value)
    }

    fn bind<U: 'static, F>(self, f: F) -> Future<U, E>
    where
        F: FnOnce(T) -> Future<U, E> + 'static,
    {
        Future::bind(self, f)
    }

    fn map<U: 'static, F>(self, f: F) -> Future<U, E>
    where
        F: FnOnce(T) -> U + 'static,
    {
        Future::map(self, f)
    }
}

impl<T: 'static, E: 'static> AddMonad for Future<T, E> {
    fn add(self, other: Self) -> Self {
        Future::add(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::block_on;

    fn increment<M: Monad<Item = i32>>(m: M) -> M::Wrapped<i32> {
        m.map(|x| x + 1)
    }

    fn halve<M: Monad<Item = i32>>(m: M) -> M::Wrapped<i32> {
        m.bind(|x| <M::Wrapped<i32> as Monad>::unit(x / 2))
    }

    fn checked_half(x: i32) -> Option<i32> {
        if x % 2 == 0 { Some(x / 2) } else { None }
    }

    #[test]
    fn test_identity_laws() {
        let f = |x: i32| Identity(x * 3);
        let g = |x: i32| Identity(x - 1);

        assert_eq!(Identity::unit(4).bind(f), f(4));
        assert_eq!(Identity(4).bind(Identity::unit), Identity(4));
        assert_eq!(
            Identity(4).bind(f).bind(g),
            Identity(4).bind(move |x| f(x).bind(g))
        );
        assert_eq!(Identity(4).map(|x| x + 1).into_inner(), 5);
    }

    #[test]
    fn test_option_is_maybe() {
        assert_eq!(Monad::bind(Some(8), checked_half), Some(4));
        assert_eq!(Monad::bind(Some(3), checked_half), None);
        assert_eq!(Monad::bind(None, checked_half), None);
        assert_eq!(None.add(Some(1)), Some(1));
        assert_eq!(Some(2).add(Some(1)), Some(2));
    }

    #[test]
    fn test_result_is_exception() {
        let parse = |text: &'static str| -> Result<i32, String> {
            text.parse().map_err(|_| format!("not a number: {}", text))
        };
        let ok: Result<&str, String> = Monad::unit("12");
        assert_eq!(Monad::bind(ok, parse), Ok(12));

        let failed: Result<&str, String> = Err("earlier".to_string());
        assert_eq!(Monad::bind(failed, parse), Err("earlier".to_string()));
        assert_eq!(parse("x").add(Ok(0)), Ok(0));
    }

    #[test]
    fn test_generic_code_over_monads() {
        assert_eq!(increment(Identity(1)), Identity(2));
        assert_eq!(increment(Some(1)), Some(2));
        assert_eq!(increment(Ok::<_, ()>(1)), Ok(2));
        assert_eq!(block_on(increment(Future::<_, ()>::unit(1))), Some(Ok(2)));

        assert_eq!(halve(Some(10)), Some(5));
        assert_eq!(block_on(halve(Future::<_, ()>::unit(10))), Some(Ok(5)));
    }

    #[test]
    fn test_future_add_through_trait() {
        let future = AddMonad::add(Future::<i32, _>::fail("left"), Future::unit(3));
        assert_eq!(block_on(future), Some(Ok(3)));
    }
}
