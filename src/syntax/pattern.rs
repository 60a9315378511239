//! Patterns the cursor can match at its current offset.
//!
//! A pattern is a literal (`";"`), a keyword (a literal that must not run
//! into a following identifier character) or a regular expression anchored
//! at the current offset. Every pattern knows how to describe itself so a
//! [`SyntaxError`](crate::errors::SyntaxError) can list what was expected.

use lazy_static::lazy_static;
use regex::Regex;

#[derive(Debug, Clone)]
pub enum Pattern {
    Literal(&'static str),
    Keyword(&'static str),
    Regex { regex: Regex, name: &'static str },
}

impl Pattern {
    /// Builds a regex pattern. `source` must start with `^`.
    fn regex(source: &str, name: &'static str) -> Self {
        debug_assert!(source.starts_with('^'), "pattern {name} is not anchored");
        let regex = Regex::new(source)
            .unwrap_or_else(|error| panic!("built-in pattern {name} does not compile: {error}"));
        Pattern::Regex { regex, name }
    }

    /// Length in bytes of the match at the start of `input`. Empty matches
    /// count as no match.
    pub fn match_len(&self, input: &str) -> Option<usize> {
        let len = match self {
            Pattern::Literal(literal) => input.starts_with(literal).then_some(literal.len())?,
            Pattern::Keyword(keyword) => {
                let after = input.strip_prefix(keyword)?;
                if after.starts_with(is_ident_char) {
                    return None;
                }
                keyword.len()
            }
            Pattern::Regex { regex, .. } => {
                let found = regex.find(input)?;
                if found.start() != 0 {
                    return None;
                }
                found.end()
            }
        };
        (len > 0).then_some(len)
    }

    /// Human-readable form used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Pattern::Literal(text) | Pattern::Keyword(text) => format!("{text:?}"),
            Pattern::Regex { name, .. } => (*name).to_string(),
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

// ============================================================================
// REGULAR PATTERNS
// ============================================================================

lazy_static! {
    pub static ref WHITESPACE: Pattern = Pattern::regex(r"^\s+", "whitespace");
    pub static ref MULTILINE_COMMENT: Pattern =
        Pattern::regex(r"^/\*(?s:.)*?\*/", "block comment");
    pub static ref SINGLELINE_COMMENT: Pattern =
        Pattern::regex(r"^//[^\n]*(?:\n|$)", "line comment");
    pub static ref INT_LIT: Pattern = Pattern::regex(
        r"^(?:0[xX][0-9a-fA-F]+|0[0-7]*|[1-9][0-9]*)",
        "integer literal",
    );
    pub static ref FLOAT_LIT: Pattern = Pattern::regex(
        r"^(?:[0-9]+\.[0-9]*(?:[eE][-+]?[0-9]+)?|[0-9]+[eE][-+]?[0-9]+|\.[0-9]+(?:[eE][-+]?[0-9]+)?|(?:inf|nan)\b)",
        "float literal",
    );
    pub static ref BOOL_LIT: Pattern = Pattern::regex(r"^(?:true|false)\b", "boolean literal");
    pub static ref STR_LIT: Pattern = Pattern::regex(
        r#"^(?:'(?:\\[xX][0-9a-fA-F]{2}|\\[0-7]{3}|\\[abfnrtv\\'"]|[^'\x00\n\\])*'|"(?:\\[xX][0-9a-fA-F]{2}|\\[0-7]{3}|\\[abfnrtv\\'"]|[^"\x00\n\\])*")"#,
        "string literal",
    );
    pub static ref IDENT: Pattern = Pattern::regex(r"^[A-Za-z_][A-Za-z0-9_]*", "identifier");
    pub static ref FIELD_LABEL: Pattern =
        Pattern::regex(r"^(?:required|optional|repeated)\b", "field label");
    pub static ref WEAK_OR_PUBLIC: Pattern = Pattern::regex(r"^(?:weak|public)\b", "\"weak\" or \"public\"");
    pub static ref QUOTE: Pattern = Pattern::regex(r#"^['"]"#, "quote");
    pub static ref SYNTAX_NAME: Pattern = Pattern::regex(r#"^[^'"]+"#, "syntax name");
}

// ============================================================================
// PUNCTUATION AND KEYWORDS
// ============================================================================

pub static SEMI: Pattern = Pattern::Literal(";");
pub static EQ: Pattern = Pattern::Literal("=");
pub static DOT: Pattern = Pattern::Literal(".");
pub static COMMA: Pattern = Pattern::Literal(",");
pub static MINUS: Pattern = Pattern::Literal("-");
pub static PLUS: Pattern = Pattern::Literal("+");
pub static PAREN_OPEN: Pattern = Pattern::Literal("(");
pub static PAREN_CLOSE: Pattern = Pattern::Literal(")");
pub static BRACKET_OPEN: Pattern = Pattern::Literal("[");
pub static BRACKET_CLOSE: Pattern = Pattern::Literal("]");
pub static BRACE_OPEN: Pattern = Pattern::Literal("{");
pub static BRACE_CLOSE: Pattern = Pattern::Literal("}");
pub static ANGLE_OPEN: Pattern = Pattern::Literal("<");
pub static ANGLE_CLOSE: Pattern = Pattern::Literal(">");

pub static SYNTAX: Pattern = Pattern::Keyword("syntax");
pub static IMPORT: Pattern = Pattern::Keyword("import");
pub static PACKAGE: Pattern = Pattern::Keyword("package");
pub static OPTION: Pattern = Pattern::Keyword("option");
pub static MESSAGE: Pattern = Pattern::Keyword("message");
pub static ENUM: Pattern = Pattern::Keyword("enum");
pub static EXTEND: Pattern = Pattern::Keyword("extend");
pub static EXTENSIONS: Pattern = Pattern::Keyword("extensions");
pub static SERVICE: Pattern = Pattern::Keyword("service");
pub static GROUP: Pattern = Pattern::Keyword("group");
pub static ONEOF: Pattern = Pattern::Keyword("oneof");
pub static MAP: Pattern = Pattern::Keyword("map");
pub static RESERVED: Pattern = Pattern::Keyword("reserved");
pub static TO: Pattern = Pattern::Keyword("to");
pub static MAX: Pattern = Pattern::Keyword("max");
pub static RPC: Pattern = Pattern::Keyword("rpc");
pub static RETURNS: Pattern = Pattern::Keyword("returns");
pub static STREAM: Pattern = Pattern::Keyword("stream");
