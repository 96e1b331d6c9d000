use crate::parser::Parser;
use crate::text::character::sat;

/// A Unicode white space char
pub fn whitespace() -> impl Parser<Output = char> {
    sat(char::is_whitespace, "white space")
}

/// Any char that is not white space
pub fn non_whitespace() -> impl Parser<Output = char> {
    sat(|c| !c.is_whitespace(), "non white space")
}
