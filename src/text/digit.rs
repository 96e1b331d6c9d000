use crate::parser::Parser;
use crate::text::character::sat;

/// An ASCII decimal digit
pub fn digit() -> impl Parser<Output = char> {
    sat(|c| c.is_ascii_digit(), "digit")
}
