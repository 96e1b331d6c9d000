use crate::parser::Parser;
use crate::text::character::sat;

/// A Unicode letter or digit
pub fn alphanumeric() -> impl Parser<Output = char> {
    sat(char::is_alphanumeric, "letter or digit")
}
