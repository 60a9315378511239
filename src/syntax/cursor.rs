//! The cursor engine: sequential, backtrackable matching over one input text.
//!
//! The cursor knows nothing about the grammar. Rules call [`Cursor::accept`]
//! for optional pieces, [`Cursor::expect`] for mandatory ones and
//! [`Cursor::peek`] to branch without consuming. Backtracking is a
//! [`Cursor::loc`] snapshot followed by [`Cursor::set_loc`].

use miette::NamedSource;

use crate::ast::{Span, Token};
use crate::errors::{PResult, SyntaxError};
use crate::syntax::pattern::Pattern;

/// Name used for sources that do not come from a file.
pub const ANONYMOUS_SOURCE: &str = "<input>";

/// Longest snippet quoted as "found" in a syntax error.
const FOUND_SNIPPET_CHARS: usize = 24;

#[derive(Debug, Clone)]
pub struct Cursor {
    name: String,
    text: String,
    loc: usize,
}

impl Cursor {
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_name(ANONYMOUS_SOURCE, text)
    }

    /// Creates a cursor whose errors report `name` as the source.
    pub fn with_name(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            loc: 0,
        }
    }

    // =====================
    // Position
    // =====================

    pub fn loc(&self) -> usize {
        self.loc
    }

    /// Restores a position previously returned by [`Cursor::loc`].
    pub fn set_loc(&mut self, loc: usize) {
        debug_assert!(
            self.text.is_char_boundary(loc),
            "cursor moved off a char boundary: {loc}"
        );
        self.loc = loc;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The unparsed suffix of the input.
    pub fn rest(&self) -> &str {
        &self.text[self.loc..]
    }

    pub fn is_at_end(&self) -> bool {
        self.loc >= self.text.len()
    }

    /// 1-based line and column of the current offset.
    pub fn line_column(&self) -> (usize, usize) {
        line_column(&self.text, self.loc)
    }

    // =====================
    // Matching
    // =====================

    /// Matches `pattern` at the current offset and advances past it.
    pub fn accept(&mut self, pattern: &Pattern) -> Option<Token> {
        let len = pattern.match_len(self.rest())?;
        let start = self.loc;
        let end = start + len;
        self.loc = end;
        Some(Token::new(&self.text[start..end], Span::new(start, end)))
    }

    /// Like [`Cursor::accept`], but a missing match is a syntax error.
    pub fn expect(&mut self, pattern: &Pattern) -> PResult<Token> {
        match self.accept(pattern) {
            Some(token) => Ok(token),
            None => Err(self.error(&[pattern])),
        }
    }

    /// Reports whether `pattern` matches here without consuming anything.
    pub fn peek(&self, pattern: &Pattern) -> bool {
        pattern.match_len(self.rest()).is_some()
    }

    // =====================
    // Errors
    // =====================

    /// Builds a syntax error at the current offset listing every pattern that
    /// would have been accepted.
    pub fn error(&self, expected: &[&Pattern]) -> SyntaxError {
        self.error_with_descriptions(expected.iter().map(|pattern| pattern.describe()).collect())
    }

    pub(crate) fn error_with_descriptions(&self, expected: Vec<String>) -> SyntaxError {
        let (line, column) = self.line_column();
        let found_text = found_snippet(self.rest());
        let (found, len) = match found_text {
            Some(snippet) => (format!("{snippet:?}"), snippet.len()),
            None => ("end of input".to_string(), 0),
        };
        let help = match expected.as_slice() {
            [] => None,
            [only] => Some(format!("insert {only} here")),
            many => Some(format!("expected one of: {}", many.join(", "))),
        };
        SyntaxError {
            offset: self.loc,
            line,
            column,
            expected,
            found,
            src: NamedSource::new(self.name.clone(), self.text.clone()),
            span: (self.loc, len).into(),
            help,
        }
    }
}

/// First whitespace-delimited chunk of `rest`, capped in length.
fn found_snippet(rest: &str) -> Option<&str> {
    let chunk = rest.split(char::is_whitespace).next().unwrap_or_default();
    if chunk.is_empty() {
        return rest.chars().next().map(|c| &rest[..c.len_utf8()]);
    }
    let end = chunk
        .char_indices()
        .nth(FOUND_SNIPPET_CHARS)
        .map_or(chunk.len(), |(index, _)| index);
    Some(&chunk[..end])
}

/// 1-based line and column (in chars) of byte `offset` in `text`.
pub fn line_column(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset.min(text.len())];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |index| index + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
