//! # Futuristic - Futures and Parser Combinators
//!
//! A single-threaded future substrate and a parser combinator library built on
//! top of it.
//!
//! Futures are continuation based: a [`Future`] is a computation that, once run,
//! delivers exactly one `Result` to its continuation. Every continuation hop goes
//! through the thread-local [`scheduler`], so long chains never grow the stack.
//! On top of that sit:
//!
//! - **Combinators**: ordered parallel and sequential aggregation in
//!   [`future::par`] and [`future::seq`], timeouts, and lazy lists of futures in
//!   [`list`]
//! - **Monads**: the [`monad::Monad`] interface shared by futures and the
//!   classic `Option`/`Result`/identity monads
//! - **Parsers**: a [`Parser`] returns a future of its outcome. Errors keep
//!   every alternative that was tried and render with line and context
//! - **Grammars**: arithmetic evaluators and syntax trees in [`grammars`]
//!
//! ```
//! use futuristic::grammars::arith::expression;
//! use futuristic::prelude::*;
//!
//! let parsed = block_on(expression().complete().parse_str("(1 + 2) * 3"))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(parsed.value, 9);
//! ```

pub mod ambiguous;
pub mod bind;
pub mod chain;
pub mod computation;
pub mod config;
pub mod error;
pub mod forward;
pub mod future;
pub mod grammars;
pub mod guard;
pub mod input;
pub mod lazy;
pub mod list;
pub mod map;
pub mod monad;
pub mod number;
pub mod or;
pub mod parser;
pub mod pure;
pub mod reduce;
pub mod rep;
pub mod repsep;
pub mod scheduler;
pub mod sequence;
pub mod text;
pub mod token;

pub use computation::Computation;
pub use config::SchedulerConfig;
pub use error::{GrammarError, ParseError, RaceError, ReadablePosition, SourceLoc};
pub use forward::{Forward, forward, recursive};
pub use future::Future;
pub use input::Input;
pub use lazy::lazy;
pub use list::FutureList;
pub use parser::{BoxedParser, ParseFuture, Parser, ParserResult};
pub use pure::{failure, result};
pub use scheduler::block_on;

/// Everything needed to write and run grammars
pub mod prelude {
    pub use crate::bind::BindExt;
    pub use crate::chain::ChainExt;
    pub use crate::forward::{Forward, forward, recursive};
    pub use crate::future::Future;
    pub use crate::guard::GuardExt;
    pub use crate::lazy::lazy;
    pub use crate::map::MapExt;
    pub use crate::or::{OrExt, choice};
    pub use crate::parser::{BoxedParser, Parser, ParserExt, ParserResult};
    pub use crate::pure::{failure, result};
    pub use crate::reduce::ReduceExt;
    pub use crate::rep::RepExt;
    pub use crate::repsep::RepSepExt;
    pub use crate::scheduler::block_on;
    pub use crate::sequence::{SeqExt, between};
}
