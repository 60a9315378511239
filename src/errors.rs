//! pbkit Error Handling
//!
//! Two error types cover the crate: [`SyntaxError`], the only failure the
//! parser can produce, and [`PbError`], which the command-line front end and
//! file-level helpers use to add I/O failures on top of it.

use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

// ============================================================================
// SYNTAX ERRORS
// ============================================================================

/// Raised by any `expect` when the input does not continue the way the
/// grammar requires. Carries every alternative that would have been accepted.
#[derive(Debug, Error, Diagnostic)]
#[error("unexpected {found} at {line}:{column}, expected {}", .expected.join(" or "))]
#[diagnostic(code(pbkit::syntax))]
pub struct SyntaxError {
    /// Byte offset where matching failed.
    pub offset: usize,
    /// 1-based line of `offset`.
    pub line: usize,
    /// 1-based column of `offset`, counted in characters.
    pub column: usize,
    pub expected: Vec<String>,
    pub found: String,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("here")]
    pub span: SourceSpan,
    #[help]
    pub help: Option<String>,
}

impl SyntaxError {
    pub fn source_name(&self) -> &str {
        self.src.name()
    }
}

pub type PResult<T> = Result<T, SyntaxError>;

// ============================================================================
// TOOLING ERRORS
// ============================================================================

/// Errors surfaced by the `pb` binary and the file helpers in [`crate::discovery`].
#[derive(Debug, Error, Diagnostic)]
pub enum PbError {
    #[error("failed to read {}", path.display())]
    #[diagnostic(code(pbkit::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk {}", path.display())]
    #[diagnostic(code(pbkit::walk))]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to serialize the syntax tree")]
    #[diagnostic(code(pbkit::json))]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),
}

// ============================================================================
// ERROR FORMATTING UTILITIES
// ============================================================================

/// Prints an error with full miette diagnostics on stderr.
pub fn print_error(error: impl Diagnostic + Send + Sync + 'static) {
    let report = miette::Report::new(error);
    eprintln!("{report:?}");
}
