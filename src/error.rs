use serde::Serialize;
use std::borrow::Cow;
use thiserror::Error;

/// Rendering of the end sentinel in `found` fields
pub const END_OF_INPUT: &str = "end of input";

/// Failure of a parse step
///
/// Serializes without a variant tag so the shapes match the structured values
/// reported to callers: a mismatch becomes `{"expected", "found", "pos"}` and a
/// failed alternative becomes the pair `[first, second]`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(untagged)]
pub enum ParseError {
    #[error("expected {expected}, found {found} at position {pos}")]
    Mismatch {
        expected: Cow<'static, str>,
        found: String,
        pos: usize,
    },
    /// Both branches of an `or` failed; both errors are kept as they were
    #[error("{0}; {1}")]
    Alternatives(Box<ParseError>, Box<ParseError>),
    /// A forward reference was parsed before a rule was bound to it
    #[error("grammar rule used before it was defined, at position {pos}")]
    Undefined { pos: usize },
}

impl ParseError {
    pub fn mismatch(
        expected: impl Into<Cow<'static, str>>,
        found: impl Into<String>,
        pos: usize,
    ) -> Self {
        ParseError::Mismatch {
            expected: expected.into(),
            found: found.into(),
            pos,
        }
    }

    pub fn alternatives(first: ParseError, second: ParseError) -> Self {
        ParseError::Alternatives(Box::new(first), Box::new(second))
    }

    /// Every non-alternative error, left to right
    pub fn leaves(&self) -> Vec<&ParseError> {
        match self {
            ParseError::Alternatives(first, second) => {
                let mut leaves = first.leaves();
                leaves.extend(second.leaves());
                leaves
            }
            leaf => vec![leaf],
        }
    }

    /// The leaf that got furthest into the input; the leftmost one wins ties
    ///
    /// This is a reporting aid only, the error value itself keeps every branch.
    pub fn likely_error(&self) -> &ParseError {
        let mut likely = self;
        for leaf in self.leaves() {
            if std::ptr::eq(likely, self) || leaf.position() > likely.position() {
                likely = leaf;
            }
        }
        likely
    }

    /// Position of the furthest leaf
    pub fn position(&self) -> usize {
        match self {
            ParseError::Mismatch { pos, .. } | ParseError::Undefined { pos } => *pos,
            ParseError::Alternatives(first, second) => first.position().max(second.position()),
        }
    }

    /// Multi-line report of the likeliest error with the surrounding source lines
    pub fn render(&self, source: &str) -> String {
        let likely = self.likely_error();
        let loc = SourceLoc::new(source, likely.position());
        let readable = loc.readable_position();
        let mut report = format!(
            "Syntax error at line {}, offset {}: {}\n\n",
            readable.line, readable.offset, likely
        );
        for line in loc.context_lines() {
            report.push_str(&line);
            report.push('\n');
        }
        report
    }
}

/// Failure to assemble a grammar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("forward reference is already defined")]
    AlreadyDefined,
}

/// Failure of a race between computations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RaceError<E> {
    #[error("no computation to race")]
    Empty,
    #[error("first computation to settle failed: {0:?}")]
    Failed(E),
    /// Every computation failed; errors are in input order
    #[error("all {} computations failed", .0.len())]
    AllFailed(Vec<E>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadablePosition {
    pub line: usize,
    /// Offset in chars from the start of the line
    pub offset: usize,
}

/// A char offset into a source string
#[derive(Debug, Clone, Copy)]
pub struct SourceLoc<'src> {
    source: &'src str,
    loc: usize,
}

impl<'src> SourceLoc<'src> {
    pub fn new(source: &'src str, loc: usize) -> Self {
        SourceLoc { source, loc }
    }

    pub fn position(&self) -> usize {
        self.loc
    }

    /// Line number and char offset within that line
    pub fn readable_position(&self) -> ReadablePosition {
        let mut line = 1;
        let mut line_start = 0;

        for (i, ch) in self.source.chars().enumerate() {
            if i >= self.loc {
                break;
            }
            if ch == '\n' {
                line += 1;
                line_start = i + 1;
            }
        }

        ReadablePosition {
            line,
            offset: self.loc - line_start,
        }
    }

    /// Up to 2 lines before and after the error line, with a pointer under the error
    pub fn context_lines(&self) -> Vec<String> {
        let pos = self.readable_position();
        let first = pos.line.saturating_sub(2).max(1);
        let last = pos.line + 2;
        let mut lines = Vec::new();

        for (index, content) in self.source.split('\n').enumerate() {
            let number = index + 1;
            if number < first || number > last {
                continue;
            }
            let prefix = if number == pos.line {
                format!("  > {} | ", number)
            } else {
                format!("    {} | ", number)
            };
            lines.push(format!("{}{}", prefix, content));

            if number == pos.line {
                let pointer_offset = prefix.len() + pos.offset;
                lines.push(format!("{}^--- here", " ".repeat(pointer_offset)));
            }
        }

        lines
    }
}
