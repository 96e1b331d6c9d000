//! Lazy lists of futures
//!
//! A [`FutureList`] is a future of either the empty list or a [`Cons`] cell whose
//! head and tail are themselves deferred. Cells are produced on demand, so lists
//! may be infinite as long as only a finite prefix is forced.

use crate::future::Future;
use std::fmt;
use std::rc::Rc;

pub struct Cons<T, E> {
    pub head: Future<T, E>,
    pub tail: FutureList<T, E>,
}

pub struct FutureList<T, E> {
    node: Future<Option<Cons<T, E>>, E>,
}

impl<T, E> fmt::Debug for FutureList<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FutureList").finish_non_exhaustive()
    }
}

impl<T: 'static, E: 'static> FutureList<T, E> {
    pub fn from_future(node: Future<Option<Cons<T, E>>, E>) -> Self {
        FutureList { node }
    }

    pub fn nil() -> Self {
        FutureList::from_future(Future::unit(None))
    }

    pub fn cons(head: Future<T, E>, tail: FutureList<T, E>) -> Self {
        FutureList::from_future(Future::unit(Some(Cons { head, tail })))
    }

    /// A one-element list
    pub fn singleton(value: T) -> Self {
        FutureList::cons(Future::unit(value), FutureList::nil())
    }

    /// A list of `values`, in order
    ///
    /// Cells are built as they are forced, so dropping an unforced tail is flat
    /// however many values remain.
    pub fn from_values(values: impl IntoIterator<Item = T>) -> Self {
        let values: Vec<T> = values.into_iter().collect();
        FutureList::unfold(values.into_iter(), |mut rest| {
            rest.next().map(|value| (value, rest))
        })
    }

    /// Build a list by repeatedly applying `step` to a seed until it returns `None`
    ///
    /// `step` runs only when the corresponding cell is forced.
    pub fn unfold<S, F>(seed: S, step: F) -> Self
    where
        S: 'static,
        F: Fn(S) -> Option<(T, S)> + 'static,
    {
        unfold_shared(seed, Rc::new(step))
    }

    pub fn into_future(self) -> Future<Option<Cons<T, E>>, E> {
        self.node
    }

    /// All cells of `self` followed by all cells of `other`
    pub fn concat(self, other: FutureList<T, E>) -> Self {
        FutureList::from_future(self.node.bind(move |node| match node {
            None => other.node,
            Some(Cons { head, tail }) => Future::unit(Some(Cons {
                head,
                tail: tail.concat(other),
            })),
        }))
    }

    pub fn map<U: 'static, F>(self, f: F) -> FutureList<U, E>
    where
        F: Fn(T) -> U + 'static,
    {
        map_shared(self, Rc::new(f))
    }

    /// Replace every element with the list `f` produces for it, in order
    pub fn flat_map<U: 'static, F>(self, f: F) -> FutureList<U, E>
    where
        F: Fn(T) -> FutureList<U, E> + 'static,
    {
        flat_map_shared(self, Rc::new(f))
    }

    /// At most the first `count` cells; nothing past them is forced
    pub fn take(self, count: usize) -> Self {
        if count == 0 {
            return FutureList::nil();
        }
        FutureList::from_future(self.node.map(move |node| {
            node.map(|Cons { head, tail }| Cons {
                head,
                tail: tail.take(count - 1),
            })
        }))
    }

    /// Force the whole list into a vector
    ///
    /// Fails with the first failing cell or head.
    pub fn collect(self) -> Future<Vec<T>, E> {
        collect_into(self, Vec::new())
    }
}

impl<T: 'static, E: 'static> FutureList<FutureList<T, E>, E> {
    pub fn flatten(self) -> FutureList<T, E> {
        self.flat_map(|inner| inner)
    }
}

fn unfold_shared<T, E, S, F>(seed: S, step: Rc<F>) -> FutureList<T, E>
where
    T: 'static,
    E: 'static,
    S: 'static,
    F: Fn(S) -> Option<(T, S)> + 'static,
{
    FutureList::from_future(Future::lazy(move || {
        Future::unit(step(seed).map(|(value, next)| Cons {
            head: Future::unit(value),
            tail: unfold_shared(next, step),
        }))
    }))
}

fn map_shared<T, U, E, F>(list: FutureList<T, E>, f: Rc<F>) -> FutureList<U, E>
where
    T: 'static,
    U: 'static,
    E: 'static,
    F: Fn(T) -> U + 'static,
{
    FutureList::from_future(list.node.bind(move |node| match node {
        None => Future::unit(None),
        Some(Cons { head, tail }) => head.map(move |value| {
            Some(Cons {
                head: Future::unit(f(value)),
                tail: map_shared(tail, f),
            })
        }),
    }))
}

fn flat_map_shared<T, U, E, F>(list: FutureList<T, E>, f: Rc<F>) -> FutureList<U, E>
where
    T: 'static,
    U: 'static,
    E: 'static,
    F: Fn(T) -> FutureList<U, E> + 'static,
{
    FutureList::from_future(list.node.bind(move |node| match node {
        None => Future::unit(None),
        Some(Cons { head, tail }) => head.bind(move |value| {
            let rest = flat_map_shared(tail, Rc::clone(&f));
            f(value).concat(rest).node
        }),
    }))
}

fn collect_into<T: 'static, E: 'static>(list: FutureList<T, E>, mut acc: Vec<T>) -> Future<Vec<T>, E> {
    list.node.bind(move |node| match node {
        None => Future::unit(acc),
        Some(Cons { head, tail }) => head.bind(move |value| {
            acc.push(value);
            collect_into(tail, acc)
        }),
    })
}
