use crate::parser::Parser;
use crate::text::character::sat;

/// An ASCII lower case letter
pub fn lower() -> impl Parser<Output = char> {
    sat(|c| c.is_ascii_lowercase(), "lower case letter")
}

/// An ASCII upper case letter
pub fn upper() -> impl Parser<Output = char> {
    sat(|c| c.is_ascii_uppercase(), "upper case letter")
}

/// Any Unicode alphabetic char
pub fn letter() -> impl Parser<Output = char> {
    sat(char::is_alphabetic, "letter")
}
