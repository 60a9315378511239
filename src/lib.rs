//! Lossless parser for the Protocol Buffers schema language.
//!
//! ```rust
//! let result = pbkit::parse("syntax = \"proto3\";\nmessage Empty {}\n").unwrap();
//! assert_eq!(result.ast.statements.len(), 2);
//! assert_eq!(result.ast.statements[1].kind(), "message");
//! ```

pub use crate::errors::{PResult, PbError, SyntaxError};
pub use crate::syntax::{parse, parse_complete, parse_named, ParseResult};

pub mod ast;
pub mod cli;
pub mod discovery;
pub mod errors;
pub mod syntax;
pub mod wire;
