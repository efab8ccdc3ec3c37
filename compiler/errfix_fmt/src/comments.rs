//! Comment Cursor
//!
//! Comments live outside the syntax tree. The printer walks them in source
//! order alongside the nodes it prints: every comment that starts before the
//! next node is flushed ahead of it, and a comment that starts on the line
//! where the previous node ended stays on that line as a trailing comment.

use errfix_ir::{Comment, CommentList};

pub(crate) struct CommentCursor<'a> {
    list: &'a CommentList,
    next: usize,
}

impl<'a> CommentCursor<'a> {
    pub(crate) fn new(list: &'a CommentList) -> Self {
        CommentCursor { list, next: 0 }
    }

    /// Next unprinted comment.
    pub(crate) fn peek(&self) -> Option<&'a Comment> {
        self.list.get(self.next)
    }

    /// Next unprinted comment if it starts before `pos`.
    pub(crate) fn next_before(&mut self, pos: u32) -> Option<&'a Comment> {
        let comment = self.peek().filter(|c| c.span.start < pos)?;
        self.next += 1;
        Some(comment)
    }

    /// Any unprinted comment starting inside `start..end`.
    pub(crate) fn any_within(&self, start: u32, end: u32) -> bool {
        self.peek()
            .is_some_and(|c| c.span.start >= start && c.span.start < end)
    }

    pub(crate) fn advance(&mut self) {
        self.next += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use errfix_ir::{CommentKind, Span};

    fn list() -> CommentList {
        let mut list = CommentList::new();
        for (start, text) in [(0, "// a"), (10, "// b")] {
            list.push(Comment {
                kind: CommentKind::Line,
                text: text.to_string(),
                span: Span::new(start, start + 4),
            });
        }
        list
    }

    #[test]
    fn test_next_before_stops_at_position() {
        let list = list();
        let mut cursor = CommentCursor::new(&list);
        assert_eq!(cursor.next_before(5).map(|c| c.text.as_str()), Some("// a"));
        assert!(cursor.next_before(5).is_none());
        assert!(cursor.any_within(5, 11));
        assert!(!cursor.any_within(11, 20));
        cursor.advance();
        assert!(cursor.peek().is_none());
    }
}
