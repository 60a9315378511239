//! AST module for the Protocol Buffers schema language
//!
//! This module provides the lossless syntax tree produced by the parser. Every
//! node keeps the tokens it was built from, so the exact source text of any
//! node can be recovered from its span.

// ============================================================================
// IMPORTS
// ============================================================================

use serde::{Deserialize, Serialize};

pub mod statement;
pub mod value;

pub use statement::*;
pub use value::*;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Represents a span in the source code.
///
/// Offsets are byte offsets into the parsed text; `end` is exclusive.
///
/// # Examples
///
/// ```rust
/// use pbkit::ast::Span;
/// let span = Span::new(2, 7);
/// assert_eq!(span.len(), 5);
/// assert_eq!(span.slice("a message"), "messa");
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} is past its end {end}");
        Self { start, end }
    }

    /// Smallest span containing both `self` and `other`.
    pub fn cover(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the text this span covers in `source`.
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::from(span.start..span.end)
    }
}

/// A matched piece of source text: keyword, punctuation, literal, identifier
/// or comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Comments attached to a statement.
///
/// Only `leading` is filled in by the parser. `trailing` and
/// `leading_detached` are kept so that tools can carry them through a
/// transformation once a later pass computes them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Comments {
    pub leading: Vec<Token>,
    pub trailing: Vec<Token>,
    pub leading_detached: Vec<Token>,
}

impl Comments {
    pub fn leading(leading: Vec<Token>) -> Self {
        Self {
            leading,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.leading.is_empty() && self.trailing.is_empty() && self.leading_detached.is_empty()
    }
}

/// Anything in the tree that covers a region of the source.
pub trait Node {
    fn span(&self) -> Span;

    /// The exact source text of this node.
    fn source_text<'a>(&self, source: &'a str) -> &'a str {
        self.span().slice(source)
    }
}

impl Node for Token {
    fn span(&self) -> Span {
        self.span
    }
}

impl<T: Node> Node for Box<T> {
    fn span(&self) -> Span {
        (**self).span()
    }
}

/// Implements [`Node`] for structs that store their span in a `span` field.
macro_rules! spanned_node {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::ast::Node for $ty {
                fn span(&self) -> $crate::ast::Span {
                    self.span
                }
            }
        )*
    };
}

pub(crate) use spanned_node;

// ============================================================================
// DOCUMENT ROOT
// ============================================================================

/// The root of a parsed `.proto` document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Proto {
    pub statements: Vec<TopLevelStatement>,
}

impl Proto {
    /// Span from the first statement to the last, or `None` for an empty document.
    pub fn span(&self) -> Option<Span> {
        let first = self.statements.first()?.span();
        let last = self.statements.last()?.span();
        Some(first.cover(last))
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
