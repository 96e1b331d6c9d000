use super::Future;

/// Tuples whose fields can be handed to a function as separate arguments
///
/// Implemented for tuples of two to five fields, so that
/// `Future<(A, B), E>::spread(|a, b| ...)` reads like a destructuring bind.
pub trait Spread<F, U, E> {
    fn spread(self, f: F) -> Future<U, E>;
}

macro_rules! impl_spread {
    ($($name:ident),+) => {
        impl<$($name,)+ F, U, E> Spread<F, U, E> for ($($name,)+)
        where
            F: FnOnce($($name),+) -> Future<U, E>,
        {
            #[allow(non_snake_case)]
            fn spread(self, f: F) -> Future<U, E> {
                let ($($name,)+) = self;
                f($($name),+)
            }
        }
    };
}

impl_spread!(A, B);
impl_spread!(A, B, C);
impl_spread!(A, B, C, D);
impl_spread!(A, B, C, D, G);
