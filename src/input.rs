use crate::error::END_OF_INPUT;
use std::fmt;
use std::rc::Rc;

struct Node {
    head: Option<char>,
    tail: Option<Rc<Node>>,
    pos: usize,
    offset: usize,
    source: Rc<str>,
}

// Unlink the chain one node at a time; a recursive drop of a long input would
// overflow the stack
impl Drop for Node {
    fn drop(&mut self) {
        let mut tail = self.tail.take();
        while let Some(node) = tail {
            match Rc::try_unwrap(node) {
                Ok(mut node) => tail = node.tail.take(),
                Err(_) => break,
            }
        }
    }
}

/// Immutable position in a source string
///
/// The input is a linked list of chars: the tail of the node at char offset `i` is
/// the very node at `i + 1`, so cloning an `Input` to backtrack is a reference
/// count increment. The last node holds no char and marks the end of input; its
/// tail is itself.
#[derive(Clone)]
pub struct Input {
    node: Rc<Node>,
}

impl Input {
    pub fn new(source: &str) -> Self {
        let source: Rc<str> = Rc::from(source);
        let chars: Vec<(usize, char)> = source.char_indices().collect();

        let mut node = Rc::new(Node {
            head: None,
            tail: None,
            pos: chars.len(),
            offset: source.len(),
            source: Rc::clone(&source),
        });
        for (pos, (offset, ch)) in chars.into_iter().enumerate().rev() {
            node = Rc::new(Node {
                head: Some(ch),
                tail: Some(node),
                pos,
                offset,
                source: Rc::clone(&source),
            });
        }

        Input { node }
    }

    /// The current char, `None` at end of input
    pub fn head(&self) -> Option<char> {
        self.node.head
    }

    /// The input past the current char; the end of input is its own tail
    pub fn tail(&self) -> Input {
        match &self.node.tail {
            Some(tail) => Input {
                node: Rc::clone(tail),
            },
            None => self.clone(),
        }
    }

    /// The current char and the input past it
    pub fn advance(&self) -> Option<(char, Input)> {
        self.head().map(|ch| (ch, self.tail()))
    }

    /// Offset in chars from the start of the source
    pub fn pos(&self) -> usize {
        self.node.pos
    }

    /// Offset in bytes from the start of the source
    pub fn offset(&self) -> usize {
        self.node.offset
    }

    pub fn is_end(&self) -> bool {
        self.node.head.is_none()
    }

    pub fn source(&self) -> &str {
        &self.node.source
    }

    /// Text not consumed yet
    pub fn rest(&self) -> &str {
        self.source().get(self.offset()..).unwrap_or("")
    }

    /// Text between this position and a later one of the same source
    ///
    /// Empty when `later` is not actually later.
    pub fn text_until(&self, later: &Input) -> &str {
        self.source()
            .get(self.offset()..later.offset())
            .unwrap_or("")
    }

    /// How the current char is reported in errors
    pub fn describe_head(&self) -> String {
        match self.head() {
            Some(ch) => format!("{:?}", ch),
            None => END_OF_INPUT.to_string(),
        }
    }
}

impl From<&str> for Input {
    fn from(source: &str) -> Self {
        Input::new(source)
    }
}

/// Two inputs are equal when they are the same node of the same source
impl PartialEq for Input {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }
}

impl Eq for Input {}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Input")
            .field("pos", &self.pos())
            .field("head", &self.head())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_input() {
        let input = Input::new("ab");
        assert_eq!(input.head(), Some('a'));
        assert_eq!(input.pos(), 0);

        let (ch, rest) = input.advance().unwrap();
        assert_eq!(ch, 'a');
        assert_eq!(rest.head(), Some('b'));
        assert_eq!(rest.pos(), 1);

        let end = rest.tail();
        assert!(end.is_end());
        assert_eq!(end.pos(), 2);
        assert_eq!(end.advance(), None);
    }

    #[test]
    fn test_end_is_its_own_tail() {
        let end = Input::new("");
        assert!(end.is_end());
        assert_eq!(end.tail(), end);
        assert_eq!(end.describe_head(), "end of input");
    }

    #[test]
    fn test_tail_is_shared() {
        let input = Input::new("xyz");
        assert_eq!(input.tail(), input.tail());
        assert_ne!(input.tail(), input.tail().tail());
    }

    #[test]
    fn test_multibyte_offsets() {
        let input = Input::new("\u{e9}a");
        let rest = input.tail();
        assert_eq!(rest.pos(), 1);
        assert_eq!(rest.offset(), 2);
        assert_eq!(rest.rest(), "a");
        assert_eq!(input.text_until(&rest), "\u{e9}");
    }

    #[test]
    fn test_text_until() {
        let input = Input::new("hello world");
        let mut later = input.clone();
        for _ in 0..5 {
            later = later.tail();
        }
        assert_eq!(input.text_until(&later), "hello");
        assert_eq!(later.text_until(&input), "");
    }

    #[test]
    fn test_describe_head() {
        assert_eq!(Input::new("q").describe_head(), "'q'");
        assert_eq!(Input::new("\n").describe_head(), "'\\n'");
    }

    #[test]
    fn test_long_input_drops() {
        let source = "a".repeat(500_000);
        let input = Input::new(&source);
        assert_eq!(input.tail().pos(), 1);
        drop(input);
    }
}
