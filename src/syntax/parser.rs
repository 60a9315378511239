//! pbkit Parser - Protocol Buffers grammar rules
//!
//! One accept function per production. An accept returns `Ok(None)` when its
//! construct is absent and raises once the construct has started but does not
//! continue correctly. `expect_*` functions are the mandatory forms.
//! The candidate order in each statement list is a grammar tie-break.

use crate::ast::*;
use crate::errors::PResult;
use crate::syntax::combinators::{
    accept_pattern_and_then, accept_statements, choice, expect_separated, many,
    skip_ws_and_comments, sweep, AcceptStatementFn,
};
use crate::syntax::cursor::{Cursor, ANONYMOUS_SOURCE};
use crate::syntax::pattern::*;

/// Wraps statement accept functions so each returns the body's statement
/// enum, producing an [`AcceptStatementFn`] slice in the given order.
macro_rules! statements {
    ($statement:ty: $($accept:path),* $(,)?) => {
        &[$(
            (|cursor: &mut Cursor, comments: &[Token]| -> PResult<Option<$statement>> {
                Ok($accept(cursor, comments)?.map(<$statement>::from))
            }) as AcceptStatementFn<$statement>
        ),*]
    };
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// The parsed document together with the cursor that produced it.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub ast: Proto,
    pub cursor: Cursor,
}

impl ParseResult {
    /// Input left after the last recognized statement.
    pub fn trailing(&self) -> &str {
        self.cursor.rest()
    }
}

/// Parse Protocol Buffers source into a lossless AST.
///
/// Parsing stops at the first input that does not start a top-level
/// statement; use [`parse_complete`] to treat leftover input as an error.
pub fn parse(text: &str) -> PResult<ParseResult> {
    parse_named(ANONYMOUS_SOURCE, text)
}

/// [`parse`], naming the source in diagnostics.
pub fn parse_named(name: &str, text: &str) -> PResult<ParseResult> {
    let mut cursor = Cursor::with_name(name, text);
    let statements = accept_statements(
        &mut cursor,
        statements![TopLevelStatement:
            accept_syntax,
            accept_import,
            accept_package,
            accept_option,
            accept_message,
            accept_enum,
            accept_extend,
            accept_service,
            accept_empty,
        ],
    )?;
    Ok(ParseResult {
        ast: Proto { statements },
        cursor,
    })
}

/// Parses `text` and fails if anything but whitespace and comments follows
/// the last top-level statement.
pub fn parse_complete(name: &str, text: &str) -> PResult<ParseResult> {
    let result = parse_named(name, text)?;
    if !result.cursor.is_at_end() {
        return Err(result.cursor.error(&[
            &SYNTAX, &IMPORT, &PACKAGE, &OPTION, &MESSAGE, &ENUM, &EXTEND, &SERVICE, &SEMI,
        ]));
    }
    Ok(result)
}

// ============================================================================
// HELPERS
// ============================================================================

fn span_of<N: Node>(nodes: &[N]) -> Option<Span> {
    Some(nodes.first()?.span().cover(nodes.last()?.span()))
}

fn statement_span(start: &impl Node, end: &impl Node) -> Span {
    Span::new(start.span().start, end.span().end)
}

// ============================================================================
// IDENTIFIERS
// ============================================================================

fn accept_dot(cursor: &mut Cursor) -> Option<Dot> {
    accept_pattern_and_then(cursor, &DOT, Dot)
}

fn accept_comma(cursor: &mut Cursor) -> Option<Comma> {
    accept_pattern_and_then(cursor, &COMMA, Comma)
}

fn accept_ident(cursor: &mut Cursor) -> Option<Ident> {
    accept_pattern_and_then(cursor, &IDENT, Ident)
}

fn accept_ident_or_dots(cursor: &mut Cursor) -> PResult<Vec<IdentOrDot>> {
    many(cursor, |cursor| {
        choice(
            cursor,
            &[
                |cursor| Ok(accept_dot(cursor).map(IdentOrDot::Dot)),
                |cursor| Ok(accept_ident(cursor).map(IdentOrDot::Ident)),
            ],
        )
    })
}

pub fn accept_full_ident(cursor: &mut Cursor) -> PResult<Option<FullIdent>> {
    let ident_or_dots = accept_ident_or_dots(cursor)?;
    Ok(span_of(&ident_or_dots).map(|span| FullIdent {
        span,
        ident_or_dots,
    }))
}

pub fn expect_full_ident(cursor: &mut Cursor) -> PResult<FullIdent> {
    match accept_full_ident(cursor)? {
        Some(full_ident) => Ok(full_ident),
        None => Err(cursor.error(&[&DOT, &*IDENT])),
    }
}

pub fn accept_type(cursor: &mut Cursor) -> PResult<Option<Type>> {
    let ident_or_dots = accept_ident_or_dots(cursor)?;
    Ok(span_of(&ident_or_dots).map(|span| Type {
        span,
        ident_or_dots,
    }))
}

pub fn expect_type(cursor: &mut Cursor) -> PResult<Type> {
    match accept_type(cursor)? {
        Some(ty) => Ok(ty),
        None => Err(cursor.error(&[&DOT, &*IDENT])),
    }
}

// ============================================================================
// LITERALS AND CONSTANTS
// ============================================================================

fn accept_int_lit(cursor: &mut Cursor) -> Option<IntLit> {
    accept_pattern_and_then(cursor, &INT_LIT, IntLit)
}

fn accept_float_lit(cursor: &mut Cursor) -> Option<FloatLit> {
    accept_pattern_and_then(cursor, &FLOAT_LIT, FloatLit)
}

fn accept_str_lit(cursor: &mut Cursor) -> Option<StrLit> {
    accept_pattern_and_then(cursor, &STR_LIT, StrLit)
}

fn accept_bool_lit(cursor: &mut Cursor) -> Option<BoolLit> {
    accept_pattern_and_then(cursor, &BOOL_LIT, BoolLit)
}

fn accept_sign(cursor: &mut Cursor) -> Option<Token> {
    cursor.accept(&MINUS).or_else(|| cursor.accept(&PLUS))
}

/// A sign not followed by a literal rewinds to before the sign.
pub fn accept_signed_int_lit(cursor: &mut Cursor) -> Option<SignedIntLit> {
    let loc = cursor.loc();
    let sign = accept_sign(cursor);
    let Some(value) = accept_int_lit(cursor) else {
        cursor.set_loc(loc);
        return None;
    };
    let start = sign.as_ref().map_or(value.span().start, |sign| sign.span.start);
    Some(SignedIntLit {
        span: Span::new(start, value.span().end),
        sign,
        value,
    })
}

pub fn expect_signed_int_lit(cursor: &mut Cursor) -> PResult<SignedIntLit> {
    match accept_signed_int_lit(cursor) {
        Some(lit) => Ok(lit),
        None => Err(cursor.error(&[&MINUS, &PLUS, &*INT_LIT])),
    }
}

pub fn accept_signed_float_lit(cursor: &mut Cursor) -> Option<SignedFloatLit> {
    let loc = cursor.loc();
    let sign = accept_sign(cursor);
    let Some(value) = accept_float_lit(cursor) else {
        cursor.set_loc(loc);
        return None;
    };
    let start = sign.as_ref().map_or(value.span().start, |sign| sign.span.start);
    Some(SignedFloatLit {
        span: Span::new(start, value.span().end),
        sign,
        value,
    })
}

/// Floats are tried before integers so `6.0` is not split after the `6`,
/// and booleans before identifiers so `true` is a literal.
pub fn accept_constant(cursor: &mut Cursor) -> PResult<Option<Constant>> {
    if let Some(lit) = accept_signed_float_lit(cursor) {
        return Ok(Some(Constant::SignedFloatLit(lit)));
    }
    if let Some(lit) = accept_signed_int_lit(cursor) {
        return Ok(Some(Constant::SignedIntLit(lit)));
    }
    if let Some(lit) = accept_str_lit(cursor) {
        return Ok(Some(Constant::StrLit(lit)));
    }
    if let Some(lit) = accept_bool_lit(cursor) {
        return Ok(Some(Constant::BoolLit(lit)));
    }
    Ok(accept_full_ident(cursor)?.map(Constant::FullIdent))
}

pub fn expect_constant(cursor: &mut Cursor) -> PResult<Constant> {
    match accept_constant(cursor)? {
        Some(constant) => Ok(constant),
        None => Err(cursor.error(&[
            &*IDENT,
            &MINUS,
            &PLUS,
            &*INT_LIT,
            &*FLOAT_LIT,
            &*STR_LIT,
            &*BOOL_LIT,
        ])),
    }
}

// ============================================================================
// OPTION NAMES AND FIELD OPTIONS
// ============================================================================

fn accept_option_name_segment(cursor: &mut Cursor) -> PResult<Option<OptionNameSegment>> {
    let bracket_open = cursor.accept(&PAREN_OPEN);
    let Some(name) = accept_full_ident(cursor)? else {
        if bracket_open.is_some() {
            return Err(cursor.error(&[&DOT, &*IDENT]));
        }
        return Ok(None);
    };
    let bracket_close = match bracket_open {
        Some(_) => Some(cursor.expect(&PAREN_CLOSE)?),
        None => None,
    };
    let start = bracket_open.as_ref().map_or(name.span.start, |open| open.span.start);
    let end = bracket_close.as_ref().map_or(name.span.end, |close| close.span.end);
    Ok(Some(OptionNameSegment {
        span: Span::new(start, end),
        bracket_open,
        name,
        bracket_close,
    }))
}

pub fn accept_option_name(cursor: &mut Cursor) -> PResult<Option<OptionName>> {
    let option_name_segment_or_dots = many(cursor, |cursor| {
        choice(
            cursor,
            &[
                |cursor| Ok(accept_dot(cursor).map(OptionNamePart::Dot)),
                |cursor| {
                    Ok(accept_option_name_segment(cursor)?.map(OptionNamePart::OptionNameSegment))
                },
            ],
        )
    })?;
    Ok(span_of(&option_name_segment_or_dots).map(|span| OptionName {
        span,
        option_name_segment_or_dots,
    }))
}

pub fn expect_option_name(cursor: &mut Cursor) -> PResult<OptionName> {
    match accept_option_name(cursor)? {
        Some(option_name) => Ok(option_name),
        None => Err(cursor.error(&[&PAREN_OPEN, &*IDENT])),
    }
}

fn accept_field_option(cursor: &mut Cursor) -> PResult<Option<FieldOption>> {
    let Some(option_name) = accept_option_name(cursor)? else {
        return Ok(None);
    };
    skip_ws_and_comments(cursor);
    let eq = cursor.expect(&EQ)?;
    skip_ws_and_comments(cursor);
    let constant = expect_constant(cursor)?;
    Ok(Some(FieldOption {
        span: statement_span(&option_name, &constant),
        option_name,
        eq,
        constant,
    }))
}

pub fn accept_field_options(cursor: &mut Cursor) -> PResult<Option<FieldOptions>> {
    let Some(bracket_open) = cursor.accept(&BRACKET_OPEN) else {
        return Ok(None);
    };
    let field_option_or_commas = many(cursor, |cursor| {
        choice(
            cursor,
            &[
                sweep,
                |cursor| Ok(accept_comma(cursor).map(FieldOptionOrComma::Comma)),
                |cursor| Ok(accept_field_option(cursor)?.map(FieldOptionOrComma::FieldOption)),
            ],
        )
    })?;
    expect_separated(
        cursor,
        &field_option_or_commas,
        |item| matches!(item, FieldOptionOrComma::Comma(_)),
        &[&PAREN_OPEN, &*IDENT],
        |_| vec![&BRACKET_CLOSE, &COMMA],
    )?;
    let Some(bracket_close) = cursor.accept(&BRACKET_CLOSE) else {
        return Err(cursor.error(&[&BRACKET_CLOSE, &COMMA]));
    };
    Ok(Some(FieldOptions {
        span: statement_span(&bracket_open, &bracket_close),
        bracket_open,
        field_option_or_commas,
        bracket_close,
    }))
}

// ============================================================================
// FILE-LEVEL STATEMENTS
// ============================================================================

fn accept_syntax(cursor: &mut Cursor, leading_comments: &[Token]) -> PResult<Option<Syntax>> {
    let Some(keyword) = cursor.accept(&SYNTAX) else {
        return Ok(None);
    };
    skip_ws_and_comments(cursor);
    let eq = cursor.expect(&EQ)?;
    skip_ws_and_comments(cursor);
    let quote_open = cursor.expect(&QUOTE)?;
    let syntax = cursor.expect(&SYNTAX_NAME)?;
    let quote_close = cursor.expect(&QUOTE)?;
    skip_ws_and_comments(cursor);
    let semi = cursor.expect(&SEMI)?;
    Ok(Some(Syntax {
        span: statement_span(&keyword, &semi),
        comments: Comments::leading(leading_comments.to_vec()),
        keyword,
        eq,
        quote_open,
        syntax,
        quote_close,
        semi,
    }))
}

fn accept_import(cursor: &mut Cursor, leading_comments: &[Token]) -> PResult<Option<Import>> {
    let Some(keyword) = cursor.accept(&IMPORT) else {
        return Ok(None);
    };
    skip_ws_and_comments(cursor);
    let weak_or_public = cursor.accept(&WEAK_OR_PUBLIC);
    skip_ws_and_comments(cursor);
    let Some(str_lit) = accept_str_lit(cursor) else {
        let mut expected = vec![&*STR_LIT];
        if weak_or_public.is_none() {
            expected.push(&*WEAK_OR_PUBLIC);
        }
        return Err(cursor.error(&expected));
    };
    skip_ws_and_comments(cursor);
    let semi = cursor.expect(&SEMI)?;
    Ok(Some(Import {
        span: statement_span(&keyword, &semi),
        comments: Comments::leading(leading_comments.to_vec()),
        keyword,
        weak_or_public,
        str_lit,
        semi,
    }))
}

fn accept_package(cursor: &mut Cursor, leading_comments: &[Token]) -> PResult<Option<Package>> {
    let Some(keyword) = cursor.accept(&PACKAGE) else {
        return Ok(None);
    };
    skip_ws_and_comments(cursor);
    let full_ident = expect_full_ident(cursor)?;
    skip_ws_and_comments(cursor);
    let semi = cursor.expect(&SEMI)?;
    Ok(Some(Package {
        span: statement_span(&keyword, &semi),
        comments: Comments::leading(leading_comments.to_vec()),
        keyword,
        full_ident,
        semi,
    }))
}

fn accept_option(
    cursor: &mut Cursor,
    leading_comments: &[Token],
) -> PResult<Option<OptionStatement>> {
    let Some(keyword) = cursor.accept(&OPTION) else {
        return Ok(None);
    };
    skip_ws_and_comments(cursor);
    let option_name = expect_option_name(cursor)?;
    skip_ws_and_comments(cursor);
    let eq = cursor.expect(&EQ)?;
    skip_ws_and_comments(cursor);
    let constant = expect_constant(cursor)?;
    skip_ws_and_comments(cursor);
    let semi = cursor.expect(&SEMI)?;
    Ok(Some(OptionStatement {
        span: statement_span(&keyword, &semi),
        comments: Comments::leading(leading_comments.to_vec()),
        keyword,
        option_name,
        eq,
        constant,
        semi,
    }))
}

fn accept_empty(cursor: &mut Cursor, leading_comments: &[Token]) -> PResult<Option<Empty>> {
    let Some(semi) = cursor.accept(&SEMI) else {
        return Ok(None);
    };
    Ok(Some(Empty {
        span: semi.span,
        comments: Comments::leading(leading_comments.to_vec()),
        semi,
    }))
}

// ============================================================================
// BODIES
// ============================================================================

/// `{ statements }`. On a missing `}` the error lists the closing brace
/// together with `starters`, the keywords a statement could begin with here.
fn expect_body<S>(
    cursor: &mut Cursor,
    accept_fns: &[AcceptStatementFn<S>],
    starters: &[&Pattern],
) -> PResult<Body<S>> {
    let bracket_open = cursor.expect(&BRACE_OPEN)?;
    let statements = accept_statements(cursor, accept_fns)?;
    let Some(bracket_close) = cursor.accept(&BRACE_CLOSE) else {
        let mut expected = vec![&BRACE_CLOSE];
        expected.extend_from_slice(starters);
        return Err(cursor.error(&expected));
    };
    Ok(Body {
        span: statement_span(&bracket_open, &bracket_close),
        bracket_open,
        statements,
        bracket_close,
    })
}

fn expect_message_body(cursor: &mut Cursor) -> PResult<MessageBody> {
    expect_body(
        cursor,
        statements![MessageBodyStatement:
            accept_group,
            accept_field,
            accept_enum,
            accept_message,
            accept_extend,
            accept_extensions,
            accept_option,
            accept_oneof,
            accept_map_field,
            accept_reserved,
            accept_empty,
            accept_unlabeled_field,
        ],
        &[
            &*FIELD_LABEL,
            &ENUM,
            &MESSAGE,
            &EXTEND,
            &EXTENSIONS,
            &OPTION,
            &ONEOF,
            &MAP,
            &RESERVED,
            &SEMI,
            &*IDENT,
        ],
    )
}

fn expect_enum_body(cursor: &mut Cursor) -> PResult<EnumBody> {
    expect_body(
        cursor,
        statements![EnumBodyStatement: accept_option, accept_enum_reserved, accept_enum_field, accept_empty],
        &[&OPTION, &RESERVED, &*IDENT, &SEMI],
    )
}

fn expect_oneof_body(cursor: &mut Cursor) -> PResult<OneofBody> {
    expect_body(
        cursor,
        statements![OneofBodyStatement: accept_option, accept_oneof_field, accept_empty],
        &[&OPTION, &DOT, &*IDENT, &SEMI],
    )
}

fn expect_extend_body(cursor: &mut Cursor) -> PResult<ExtendBody> {
    expect_body(
        cursor,
        statements![ExtendBodyStatement:
            accept_group,
            accept_field,
            accept_empty,
            accept_unlabeled_field,
        ],
        &[&*FIELD_LABEL, &SEMI, &DOT, &*IDENT],
    )
}

fn expect_service_body(cursor: &mut Cursor) -> PResult<ServiceBody> {
    expect_body(
        cursor,
        statements![ServiceBodyStatement: accept_option, accept_rpc, accept_empty],
        &[&OPTION, &RPC, &SEMI],
    )
}

// ============================================================================
// MESSAGES
// ============================================================================

fn accept_message(cursor: &mut Cursor, leading_comments: &[Token]) -> PResult<Option<Message>> {
    let Some(keyword) = cursor.accept(&MESSAGE) else {
        return Ok(None);
    };
    skip_ws_and_comments(cursor);
    let message_name = cursor.expect(&IDENT)?;
    skip_ws_and_comments(cursor);
    let message_body = expect_message_body(cursor)?;
    Ok(Some(Message {
        span: statement_span(&keyword, &message_body),
        comments: Comments::leading(leading_comments.to_vec()),
        keyword,
        message_name,
        message_body,
    }))
}

/// A labeled group. Without the `group` keyword right after the label the
/// cursor rewinds to before the label, so the field rule can take it.
fn accept_group(cursor: &mut Cursor, leading_comments: &[Token]) -> PResult<Option<Group>> {
    let loc = cursor.loc();
    let Some(group_label) = cursor.accept(&FIELD_LABEL) else {
        return Ok(None);
    };
    skip_ws_and_comments(cursor);
    let Some(keyword) = cursor.accept(&GROUP) else {
        cursor.set_loc(loc);
        return Ok(None);
    };
    skip_ws_and_comments(cursor);
    let group_name = cursor.expect(&IDENT)?;
    skip_ws_and_comments(cursor);
    let eq = cursor.expect(&EQ)?;
    skip_ws_and_comments(cursor);
    let field_number = IntLit(cursor.expect(&INT_LIT)?);
    skip_ws_and_comments(cursor);
    let message_body = expect_message_body(cursor)?;
    let body_end = cursor.loc();
    skip_ws_and_comments(cursor);
    let semi = cursor.accept(&SEMI);
    if semi.is_none() {
        cursor.set_loc(body_end);
    }
    let end = semi.as_ref().map_or(message_body.span.end, |semi| semi.span.end);
    Ok(Some(Group {
        span: Span::new(group_label.span.start, end),
        comments: Comments::leading(leading_comments.to_vec()),
        group_label,
        keyword,
        group_name,
        eq,
        field_number,
        message_body,
        semi,
    }))
}

/// Everything after the type of a field: `name = N [options];`.
struct FieldTail {
    field_name: Token,
    eq: Token,
    field_number: IntLit,
    field_options: Option<FieldOptions>,
    semi: Token,
}

fn expect_field_tail(cursor: &mut Cursor) -> PResult<FieldTail> {
    skip_ws_and_comments(cursor);
    let field_name = cursor.expect(&IDENT)?;
    skip_ws_and_comments(cursor);
    let eq = cursor.expect(&EQ)?;
    skip_ws_and_comments(cursor);
    let field_number = IntLit(cursor.expect(&INT_LIT)?);
    skip_ws_and_comments(cursor);
    let field_options = accept_field_options(cursor)?;
    skip_ws_and_comments(cursor);
    let semi = match field_options {
        Some(_) => cursor.expect(&SEMI)?,
        None => match cursor.accept(&SEMI) {
            Some(semi) => semi,
            None => return Err(cursor.error(&[&SEMI, &BRACKET_OPEN])),
        },
    };
    Ok(FieldTail {
        field_name,
        eq,
        field_number,
        field_options,
        semi,
    })
}

fn accept_field(cursor: &mut Cursor, leading_comments: &[Token]) -> PResult<Option<Field>> {
    let Some(field_label) = cursor.accept(&FIELD_LABEL) else {
        return Ok(None);
    };
    skip_ws_and_comments(cursor);
    let field_type = expect_type(cursor)?;
    let tail = expect_field_tail(cursor)?;
    Ok(Some(Field {
        span: statement_span(&field_label, &tail.semi),
        comments: Comments::leading(leading_comments.to_vec()),
        field_label: Some(field_label),
        field_type,
        field_name: tail.field_name,
        eq: tail.eq,
        field_number: tail.field_number,
        field_options: tail.field_options,
        semi: tail.semi,
    }))
}

/// Proto3 field without a label: `int32 id = 1;`. Tried last in message
/// bodies, so it only sees input no keyword-led statement claimed.
fn accept_unlabeled_field(
    cursor: &mut Cursor,
    leading_comments: &[Token],
) -> PResult<Option<Field>> {
    let Some(field_type) = accept_type(cursor)? else {
        return Ok(None);
    };
    let tail = expect_field_tail(cursor)?;
    Ok(Some(Field {
        span: statement_span(&field_type, &tail.semi),
        comments: Comments::leading(leading_comments.to_vec()),
        field_label: None,
        field_type,
        field_name: tail.field_name,
        eq: tail.eq,
        field_number: tail.field_number,
        field_options: tail.field_options,
        semi: tail.semi,
    }))
}

fn accept_map_field(cursor: &mut Cursor, leading_comments: &[Token]) -> PResult<Option<MapField>> {
    let Some(keyword) = cursor.accept(&MAP) else {
        return Ok(None);
    };
    skip_ws_and_comments(cursor);
    let type_bracket_open = cursor.expect(&ANGLE_OPEN)?;
    skip_ws_and_comments(cursor);
    let key_type = expect_type(cursor)?;
    skip_ws_and_comments(cursor);
    let type_sep = cursor.expect(&COMMA)?;
    skip_ws_and_comments(cursor);
    let value_type = expect_type(cursor)?;
    skip_ws_and_comments(cursor);
    let type_bracket_close = cursor.expect(&ANGLE_CLOSE)?;
    let tail = expect_field_tail(cursor)?;
    Ok(Some(MapField {
        span: statement_span(&keyword, &tail.semi),
        comments: Comments::leading(leading_comments.to_vec()),
        keyword,
        type_bracket_open,
        key_type,
        type_sep,
        value_type,
        type_bracket_close,
        map_name: tail.field_name,
        eq: tail.eq,
        field_number: tail.field_number,
        field_options: tail.field_options,
        semi: tail.semi,
    }))
}

fn accept_oneof(cursor: &mut Cursor, leading_comments: &[Token]) -> PResult<Option<Oneof>> {
    let Some(keyword) = cursor.accept(&ONEOF) else {
        return Ok(None);
    };
    skip_ws_and_comments(cursor);
    let oneof_name = cursor.expect(&IDENT)?;
    skip_ws_and_comments(cursor);
    let oneof_body = expect_oneof_body(cursor)?;
    Ok(Some(Oneof {
        span: statement_span(&keyword, &oneof_body),
        comments: Comments::leading(leading_comments.to_vec()),
        keyword,
        oneof_name,
        oneof_body,
    }))
}

fn accept_oneof_field(
    cursor: &mut Cursor,
    leading_comments: &[Token],
) -> PResult<Option<OneofField>> {
    let Some(field_type) = accept_type(cursor)? else {
        return Ok(None);
    };
    let tail = expect_field_tail(cursor)?;
    Ok(Some(OneofField {
        span: statement_span(&field_type, &tail.semi),
        comments: Comments::leading(leading_comments.to_vec()),
        field_type,
        field_name: tail.field_name,
        eq: tail.eq,
        field_number: tail.field_number,
        field_options: tail.field_options,
        semi: tail.semi,
    }))
}

// ============================================================================
// RANGES, EXTENSIONS AND RESERVED
// ============================================================================

fn accept_range(cursor: &mut Cursor) -> PResult<Option<Range>> {
    let Some(range_start) = accept_int_lit(cursor) else {
        return Ok(None);
    };
    let after_start = cursor.loc();
    skip_ws_and_comments(cursor);
    let Some(to) = cursor.accept(&TO) else {
        cursor.set_loc(after_start);
        return Ok(Some(Range {
            span: range_start.span(),
            range_start,
            to: None,
            range_end: None,
        }));
    };
    skip_ws_and_comments(cursor);
    let range_end = match accept_int_lit(cursor) {
        Some(lit) => RangeEnd::IntLit(lit),
        None => match accept_pattern_and_then(cursor, &MAX, Max) {
            Some(max) => RangeEnd::Max(max),
            None => return Err(cursor.error(&[&*INT_LIT, &MAX])),
        },
    };
    Ok(Some(Range {
        span: statement_span(&range_start, &range_end),
        range_start,
        to: Some(to),
        range_end: Some(range_end),
    }))
}

/// What may follow a range: a bare `N` can still take `to`.
fn after_range(item: &RangeOrComma) -> Vec<&'static Pattern> {
    match item {
        RangeOrComma::Range(range) if range.to.is_none() => vec![&SEMI, &COMMA, &TO],
        _ => vec![&SEMI, &COMMA],
    }
}

/// One or more comma-separated ranges.
fn expect_ranges(cursor: &mut Cursor) -> PResult<Ranges> {
    let range_or_commas = many(cursor, |cursor| {
        choice(
            cursor,
            &[
                sweep,
                |cursor| Ok(accept_comma(cursor).map(RangeOrComma::Comma)),
                |cursor| Ok(accept_range(cursor)?.map(RangeOrComma::Range)),
            ],
        )
    })?;
    expect_separated(
        cursor,
        &range_or_commas,
        |item| matches!(item, RangeOrComma::Comma(_)),
        &[&*INT_LIT],
        after_range,
    )?;
    match span_of(&range_or_commas) {
        Some(span) => Ok(Ranges {
            span,
            range_or_commas,
        }),
        None => Err(cursor.error(&[&*INT_LIT])),
    }
}

/// The `;` closing a range list.
fn expect_ranges_semi(cursor: &mut Cursor, ranges: &Ranges) -> PResult<Token> {
    match cursor.accept(&SEMI) {
        Some(semi) => Ok(semi),
        None => {
            let expected = ranges
                .range_or_commas
                .last()
                .map_or_else(|| vec![&SEMI], after_range);
            Err(cursor.error(&expected))
        }
    }
}

/// One or more comma-separated quoted names.
fn expect_field_names(cursor: &mut Cursor) -> PResult<FieldNames> {
    let str_lit_or_commas = many(cursor, |cursor| {
        choice(
            cursor,
            &[
                sweep,
                |cursor| Ok(accept_comma(cursor).map(StrLitOrComma::Comma)),
                |cursor| Ok(accept_str_lit(cursor).map(StrLitOrComma::StrLit)),
            ],
        )
    })?;
    if str_lit_or_commas.is_empty() {
        return Err(cursor.error(&[&*INT_LIT, &*STR_LIT]));
    }
    expect_separated(
        cursor,
        &str_lit_or_commas,
        |item| matches!(item, StrLitOrComma::Comma(_)),
        &[&*STR_LIT],
        |_| vec![&SEMI, &COMMA],
    )?;
    match span_of(&str_lit_or_commas) {
        Some(span) => Ok(FieldNames {
            span,
            str_lit_or_commas,
        }),
        None => Err(cursor.error(&[&*INT_LIT, &*STR_LIT])),
    }
}

fn accept_extensions(
    cursor: &mut Cursor,
    leading_comments: &[Token],
) -> PResult<Option<Extensions>> {
    let Some(keyword) = cursor.accept(&EXTENSIONS) else {
        return Ok(None);
    };
    skip_ws_and_comments(cursor);
    let ranges = expect_ranges(cursor)?;
    skip_ws_and_comments(cursor);
    let semi = expect_ranges_semi(cursor, &ranges)?;
    Ok(Some(Extensions {
        span: statement_span(&keyword, &semi),
        comments: Comments::leading(leading_comments.to_vec()),
        keyword,
        ranges,
        semi,
    }))
}

/// `reserved` takes numeric ranges when an integer follows, quoted field
/// names otherwise. One statement never mixes the two.
fn accept_reserved(cursor: &mut Cursor, leading_comments: &[Token]) -> PResult<Option<Reserved>> {
    let Some(keyword) = cursor.accept(&RESERVED) else {
        return Ok(None);
    };
    skip_ws_and_comments(cursor);
    let reserved = if cursor.peek(&INT_LIT) {
        ReservedBody::Ranges(expect_ranges(cursor)?)
    } else {
        ReservedBody::FieldNames(expect_field_names(cursor)?)
    };
    skip_ws_and_comments(cursor);
    let semi = match &reserved {
        ReservedBody::Ranges(ranges) => expect_ranges_semi(cursor, ranges)?,
        ReservedBody::FieldNames(_) => match cursor.accept(&SEMI) {
            Some(semi) => semi,
            None => return Err(cursor.error(&[&SEMI, &COMMA])),
        },
    };
    Ok(Some(Reserved {
        span: statement_span(&keyword, &semi),
        comments: Comments::leading(leading_comments.to_vec()),
        keyword,
        reserved,
        semi,
    }))
}

/// `reserved` inside an enum. An enum value may itself be named `reserved`,
/// so unless a range or a name follows the keyword this rewinds and lets
/// the enum field rule try.
fn accept_enum_reserved(
    cursor: &mut Cursor,
    leading_comments: &[Token],
) -> PResult<Option<Reserved>> {
    let loc = cursor.loc();
    if cursor.accept(&RESERVED).is_none() {
        return Ok(None);
    }
    skip_ws_and_comments(cursor);
    let reserves = cursor.peek(&INT_LIT) || cursor.peek(&STR_LIT);
    cursor.set_loc(loc);
    if !reserves {
        return Ok(None);
    }
    accept_reserved(cursor, leading_comments)
}

// ============================================================================
// EXTEND
// ============================================================================

fn accept_extend(cursor: &mut Cursor, leading_comments: &[Token]) -> PResult<Option<Extend>> {
    let Some(keyword) = cursor.accept(&EXTEND) else {
        return Ok(None);
    };
    skip_ws_and_comments(cursor);
    let message_type = expect_type(cursor)?;
    skip_ws_and_comments(cursor);
    let extend_body = expect_extend_body(cursor)?;
    Ok(Some(Extend {
        span: statement_span(&keyword, &extend_body),
        comments: Comments::leading(leading_comments.to_vec()),
        keyword,
        message_type,
        extend_body,
    }))
}

// ============================================================================
// ENUMS
// ============================================================================

fn accept_enum(cursor: &mut Cursor, leading_comments: &[Token]) -> PResult<Option<Enum>> {
    let Some(keyword) = cursor.accept(&ENUM) else {
        return Ok(None);
    };
    skip_ws_and_comments(cursor);
    let enum_name = cursor.expect(&IDENT)?;
    skip_ws_and_comments(cursor);
    let enum_body = expect_enum_body(cursor)?;
    Ok(Some(Enum {
        span: statement_span(&keyword, &enum_body),
        comments: Comments::leading(leading_comments.to_vec()),
        keyword,
        enum_name,
        enum_body,
    }))
}

fn accept_enum_field(
    cursor: &mut Cursor,
    leading_comments: &[Token],
) -> PResult<Option<EnumField>> {
    let Some(field_name) = cursor.accept(&IDENT) else {
        return Ok(None);
    };
    skip_ws_and_comments(cursor);
    let eq = cursor.expect(&EQ)?;
    skip_ws_and_comments(cursor);
    let field_number = expect_signed_int_lit(cursor)?;
    skip_ws_and_comments(cursor);
    let field_options = accept_field_options(cursor)?;
    skip_ws_and_comments(cursor);
    let semi = match field_options {
        Some(_) => cursor.expect(&SEMI)?,
        None => match cursor.accept(&SEMI) {
            Some(semi) => semi,
            None => return Err(cursor.error(&[&SEMI, &BRACKET_OPEN])),
        },
    };
    Ok(Some(EnumField {
        span: statement_span(&field_name, &semi),
        comments: Comments::leading(leading_comments.to_vec()),
        field_name,
        eq,
        field_number,
        field_options,
        semi,
    }))
}

// ============================================================================
// SERVICES
// ============================================================================

fn expect_rpc_type(cursor: &mut Cursor) -> PResult<RpcType> {
    let bracket_open = cursor.expect(&PAREN_OPEN)?;
    skip_ws_and_comments(cursor);
    let stream = cursor.accept(&STREAM);
    skip_ws_and_comments(cursor);
    let message_type = expect_type(cursor)?;
    skip_ws_and_comments(cursor);
    let bracket_close = cursor.expect(&PAREN_CLOSE)?;
    Ok(RpcType {
        span: statement_span(&bracket_open, &bracket_close),
        bracket_open,
        stream,
        message_type,
        bracket_close,
    })
}

fn accept_rpc(cursor: &mut Cursor, leading_comments: &[Token]) -> PResult<Option<Rpc>> {
    let Some(keyword) = cursor.accept(&RPC) else {
        return Ok(None);
    };
    skip_ws_and_comments(cursor);
    let rpc_name = cursor.expect(&IDENT)?;
    skip_ws_and_comments(cursor);
    let req_type = expect_rpc_type(cursor)?;
    skip_ws_and_comments(cursor);
    let returns = cursor.expect(&RETURNS)?;
    skip_ws_and_comments(cursor);
    let res_type = expect_rpc_type(cursor)?;
    skip_ws_and_comments(cursor);
    let semi = cursor.expect(&SEMI)?;
    Ok(Some(Rpc {
        span: statement_span(&keyword, &semi),
        comments: Comments::leading(leading_comments.to_vec()),
        keyword,
        rpc_name,
        req_type,
        returns,
        res_type,
        semi,
    }))
}

fn accept_service(cursor: &mut Cursor, leading_comments: &[Token]) -> PResult<Option<Service>> {
    let Some(keyword) = cursor.accept(&SERVICE) else {
        return Ok(None);
    };
    skip_ws_and_comments(cursor);
    let service_name = cursor.expect(&IDENT)?;
    skip_ws_and_comments(cursor);
    let service_body = expect_service_body(cursor)?;
    Ok(Some(Service {
        span: statement_span(&keyword, &service_body),
        comments: Comments::leading(leading_comments.to_vec()),
        keyword,
        service_name,
        service_body,
    }))
}
