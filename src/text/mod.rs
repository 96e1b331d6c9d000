//! Character level parsers
//!
//! Every parser here consumes at most a single char, except [`string`] which
//! matches a literal char by char.

pub mod alphanumeric;
pub mod character;
pub mod digit;
pub mod item;
pub mod letter;
pub mod string;
pub mod whitespace;

pub use alphanumeric::alphanumeric;
pub use character::{char, sat};
pub use digit::digit;
pub use item::{eof, item};
pub use letter::{letter, lower, upper};
pub use string::string;
pub use whitespace::{non_whitespace, whitespace};
