//! pbkit Syntax module
//!
//! Parsing is layered: [`pattern`] defines what can be matched, [`cursor`]
//! matches it against the input with explicit backtracking, [`combinators`]
//! compose matches into sequences and statement lists, and [`parser`] holds
//! one rule per grammar production.

pub mod combinators;
pub mod cursor;
pub mod parser;
pub mod pattern;

pub use cursor::Cursor;
pub use parser::{parse, parse_complete, parse_named, ParseResult};
