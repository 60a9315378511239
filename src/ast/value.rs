//! Leaf and expression-level nodes: punctuation, identifiers, literals,
//! constants, option names and the comma-separated lists used by field
//! options, ranges and reserved names.

use serde::{Deserialize, Serialize};

use super::{spanned_node, Node, Span, Token};

/// Declares single-token nodes. Each one wraps the token it was matched from.
macro_rules! token_node {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(pub Token);

            impl $name {
                pub fn text(&self) -> &str {
                    &self.0.text
                }
            }

            impl Node for $name {
                fn span(&self) -> Span {
                    self.0.span
                }
            }

            impl From<Token> for $name {
                fn from(token: Token) -> Self {
                    Self(token)
                }
            }
        )*
    };
}

token_node!(
    /// `.`
    Dot,
    /// `,`
    Comma,
    Ident,
    /// Decimal, octal or hex integer, kept verbatim.
    IntLit,
    FloatLit,
    /// Quoted string including its quotes and escapes.
    StrLit,
    BoolLit,
    /// The `max` upper bound of a range.
    Max,
);

// ============================================================================
// IDENTIFIERS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum IdentOrDot {
    Dot(Dot),
    Ident(Ident),
}

impl IdentOrDot {
    pub fn text(&self) -> &str {
        match self {
            Self::Dot(dot) => dot.text(),
            Self::Ident(ident) => ident.text(),
        }
    }
}

impl Node for IdentOrDot {
    fn span(&self) -> Span {
        match self {
            Self::Dot(dot) => dot.span(),
            Self::Ident(ident) => ident.span(),
        }
    }
}

/// A dotted name such as `google.protobuf.Any`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullIdent {
    pub span: Span,
    pub ident_or_dots: Vec<IdentOrDot>,
}

/// A message or scalar type reference, possibly fully qualified (`.pkg.Msg`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Type {
    pub span: Span,
    pub ident_or_dots: Vec<IdentOrDot>,
}

impl FullIdent {
    pub fn text(&self) -> String {
        join_parts(&self.ident_or_dots)
    }

    /// Identifier segments, without the dots.
    pub fn idents(&self) -> impl Iterator<Item = &Ident> {
        self.ident_or_dots.iter().filter_map(|part| match part {
            IdentOrDot::Ident(ident) => Some(ident),
            IdentOrDot::Dot(_) => None,
        })
    }
}

impl Type {
    pub fn text(&self) -> String {
        join_parts(&self.ident_or_dots)
    }
}

fn join_parts(parts: &[IdentOrDot]) -> String {
    parts.iter().map(IdentOrDot::text).collect()
}

// ============================================================================
// LITERALS AND CONSTANTS
// ============================================================================

/// An integer literal with an optional `-` or `+` sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedIntLit {
    pub span: Span,
    pub sign: Option<Token>,
    pub value: IntLit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedFloatLit {
    pub span: Span,
    pub sign: Option<Token>,
    pub value: FloatLit,
}

impl SignedIntLit {
    pub fn is_negative(&self) -> bool {
        self.sign.as_ref().is_some_and(|sign| sign.text == "-")
    }
}

impl SignedFloatLit {
    pub fn is_negative(&self) -> bool {
        self.sign.as_ref().is_some_and(|sign| sign.text == "-")
    }
}

/// The right-hand side of an option assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Constant {
    FullIdent(FullIdent),
    SignedIntLit(SignedIntLit),
    SignedFloatLit(SignedFloatLit),
    StrLit(StrLit),
    BoolLit(BoolLit),
}

impl Constant {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FullIdent(_) => "full-ident",
            Self::SignedIntLit(_) => "signed-int-lit",
            Self::SignedFloatLit(_) => "signed-float-lit",
            Self::StrLit(_) => "str-lit",
            Self::BoolLit(_) => "bool-lit",
        }
    }
}

impl Node for Constant {
    fn span(&self) -> Span {
        match self {
            Self::FullIdent(node) => node.span,
            Self::SignedIntLit(node) => node.span,
            Self::SignedFloatLit(node) => node.span,
            Self::StrLit(node) => node.span(),
            Self::BoolLit(node) => node.span(),
        }
    }
}

// ============================================================================
// OPTION NAMES AND FIELD OPTIONS
// ============================================================================

/// One segment of an option name: `foo` or `(pkg.ext)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionNameSegment {
    pub span: Span,
    pub bracket_open: Option<Token>,
    pub name: FullIdent,
    pub bracket_close: Option<Token>,
}

impl OptionNameSegment {
    pub fn is_extension(&self) -> bool {
        self.bracket_open.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OptionNamePart {
    Dot(Dot),
    OptionNameSegment(OptionNameSegment),
}

impl Node for OptionNamePart {
    fn span(&self) -> Span {
        match self {
            Self::Dot(dot) => dot.span(),
            Self::OptionNameSegment(segment) => segment.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionName {
    pub span: Span,
    pub option_name_segment_or_dots: Vec<OptionNamePart>,
}

impl OptionName {
    pub fn segments(&self) -> impl Iterator<Item = &OptionNameSegment> {
        self.option_name_segment_or_dots
            .iter()
            .filter_map(|part| match part {
                OptionNamePart::OptionNameSegment(segment) => Some(segment),
                OptionNamePart::Dot(_) => None,
            })
    }

    /// The option name as written, minus whitespace: `(my.ext).field`.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for part in &self.option_name_segment_or_dots {
            match part {
                OptionNamePart::Dot(dot) => text.push_str(dot.text()),
                OptionNamePart::OptionNameSegment(segment) if segment.is_extension() => {
                    text.push('(');
                    text.push_str(&segment.name.text());
                    text.push(')');
                }
                OptionNamePart::OptionNameSegment(segment) => text.push_str(&segment.name.text()),
            }
        }
        text
    }
}

/// `name = constant` inside a `[...]` field option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub span: Span,
    pub option_name: OptionName,
    pub eq: Token,
    pub constant: Constant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FieldOptionOrComma {
    FieldOption(FieldOption),
    Comma(Comma),
}

impl Node for FieldOptionOrComma {
    fn span(&self) -> Span {
        match self {
            Self::FieldOption(option) => option.span(),
            Self::Comma(comma) => comma.span(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOptions {
    pub span: Span,
    pub bracket_open: Token,
    pub field_option_or_commas: Vec<FieldOptionOrComma>,
    pub bracket_close: Token,
}

impl FieldOptions {
    pub fn options(&self) -> impl Iterator<Item = &FieldOption> {
        self.field_option_or_commas.iter().filter_map(|item| match item {
            FieldOptionOrComma::FieldOption(option) => Some(option),
            FieldOptionOrComma::Comma(_) => None,
        })
    }
}

// ============================================================================
// RANGES AND RESERVED NAMES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RangeEnd {
    IntLit(IntLit),
    Max(Max),
}

impl Node for RangeEnd {
    fn span(&self) -> Span {
        match self {
            Self::IntLit(lit) => lit.span(),
            Self::Max(max) => max.span(),
        }
    }
}

/// `N` or `N to M` or `N to max`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub span: Span,
    pub range_start: IntLit,
    pub to: Option<Token>,
    pub range_end: Option<RangeEnd>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RangeOrComma {
    Range(Range),
    Comma(Comma),
}

impl Node for RangeOrComma {
    fn span(&self) -> Span {
        match self {
            Self::Range(range) => range.span(),
            Self::Comma(comma) => comma.span(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranges {
    pub span: Span,
    pub range_or_commas: Vec<RangeOrComma>,
}

impl Ranges {
    pub fn ranges(&self) -> impl Iterator<Item = &Range> {
        self.range_or_commas.iter().filter_map(|item| match item {
            RangeOrComma::Range(range) => Some(range),
            RangeOrComma::Comma(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StrLitOrComma {
    StrLit(StrLit),
    Comma(Comma),
}

impl Node for StrLitOrComma {
    fn span(&self) -> Span {
        match self {
            Self::StrLit(name) => name.span(),
            Self::Comma(comma) => comma.span(),
        }
    }
}

/// Quoted field names in a `reserved` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNames {
    pub span: Span,
    pub str_lit_or_commas: Vec<StrLitOrComma>,
}

impl FieldNames {
    pub fn names(&self) -> impl Iterator<Item = &StrLit> {
        self.str_lit_or_commas.iter().filter_map(|item| match item {
            StrLitOrComma::StrLit(name) => Some(name),
            StrLitOrComma::Comma(_) => None,
        })
    }
}

spanned_node!(
    FullIdent,
    Type,
    SignedIntLit,
    SignedFloatLit,
    OptionNameSegment,
    OptionName,
    FieldOption,
    FieldOptions,
    Range,
    Ranges,
    FieldNames,
);
