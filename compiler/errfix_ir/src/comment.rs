//! Source comments, kept out of the tree and re-attached by position.

use crate::Span;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CommentKind {
    /// `// ...`
    Line,
    /// `/* ... */`
    Block,
}

/// One comment with its raw text, delimiters included.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Comment {
    pub kind: CommentKind,
    pub text: String,
    pub span: Span,
}

/// Comments of a file in source order.
#[derive(Clone, Default, Debug, Eq, PartialEq)]
pub struct CommentList {
    comments: Vec<Comment>,
}

impl CommentList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a comment; callers push in source order.
    pub fn push(&mut self, comment: Comment) {
        debug_assert!(
            self.comments
                .last()
                .map_or(true, |last| last.span.end <= comment.span.start),
            "comments must be pushed in source order"
        );
        self.comments.push(comment);
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Comment> {
        self.comments.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Comment> {
        self.comments.get(index)
    }

    /// Index of the first comment starting at or after `offset`.
    pub fn first_at_or_after(&self, offset: u32) -> usize {
        self.comments.partition_point(|c| c.span.start < offset)
    }
}

impl<'a> IntoIterator for &'a CommentList {
    type Item = &'a Comment;
    type IntoIter = std::slice::Iter<'a, Comment>;

    fn into_iter(self) -> Self::IntoIter {
        self.comments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(start: u32, text: &str) -> Comment {
        Comment {
            kind: CommentKind::Line,
            text: text.to_owned(),
            #[expect(clippy::cast_possible_truncation, reason = "test input is short")]
            span: Span::new(start, start + text.len() as u32),
        }
    }

    #[test]
    fn test_first_at_or_after() {
        let mut list = CommentList::new();
        list.push(line(0, "// a"));
        list.push(line(10, "// b"));
        list.push(line(20, "// c"));

        assert_eq!(list.first_at_or_after(0), 0);
        assert_eq!(list.first_at_or_after(5), 1);
        assert_eq!(list.first_at_or_after(10), 1);
        assert_eq!(list.first_at_or_after(21), 3);
        assert_eq!(list.len(), 3);
    }
}
