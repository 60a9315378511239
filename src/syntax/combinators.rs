//! Grammar-agnostic building blocks for the rules in [`crate::syntax::parser`].
//!
//! Every accept function has the shape `&mut Cursor -> PResult<Option<T>>`:
//! `Ok(None)` means "not here" and leaves nothing consumed, `Err` means the
//! construct started but is malformed.

use crate::ast::{Node, Token};
use crate::errors::PResult;
use crate::syntax::cursor::Cursor;
use crate::syntax::pattern::{Pattern, MULTILINE_COMMENT, SINGLELINE_COMMENT, WHITESPACE};

/// An accept function usable as a [`choice`] alternative.
pub type AcceptFn<T> = fn(&mut Cursor) -> PResult<Option<T>>;

/// A statement accept function. The second argument holds the comments swept
/// just before the statement.
pub type AcceptStatementFn<T> = fn(&mut Cursor, &[Token]) -> PResult<Option<T>>;

/// Matches `pattern` and maps the token into a node.
pub fn accept_pattern_and_then<T>(
    cursor: &mut Cursor,
    pattern: &Pattern,
    then: impl FnOnce(Token) -> T,
) -> Option<T> {
    cursor.accept(pattern).map(then)
}

/// Tries each alternative in order and returns the first success.
pub fn choice<T>(cursor: &mut Cursor, accept_fns: &[AcceptFn<T>]) -> PResult<Option<T>> {
    for accept in accept_fns {
        if let Some(node) = accept(cursor)? {
            return Ok(Some(node));
        }
    }
    Ok(None)
}

/// Repeats `accept` until it fails once. Zero matches is an empty vector.
pub fn many<T>(
    cursor: &mut Cursor,
    mut accept: impl FnMut(&mut Cursor) -> PResult<Option<T>>,
) -> PResult<Vec<T>> {
    let mut nodes = Vec::new();
    while let Some(node) = accept(cursor)? {
        nodes.push(node);
    }
    Ok(nodes)
}

/// Drives a statement list: sweep whitespace and comments, try each
/// candidate in priority order, repeat. Stops at the first position where no
/// candidate matches, leaving the cursor there for the caller.
pub fn accept_statements<T>(
    cursor: &mut Cursor,
    accept_fns: &[AcceptStatementFn<T>],
) -> PResult<Vec<T>> {
    let mut statements = Vec::new();
    'statements: loop {
        let leading_comments = skip_ws_and_sweep_comments(cursor);
        for accept in accept_fns {
            if let Some(statement) = accept(cursor, &leading_comments)? {
                statements.push(statement);
                continue 'statements;
            }
        }
        break;
    }
    Ok(statements)
}

/// Consumes whitespace and comments, returning the comments in source order.
pub fn skip_ws_and_sweep_comments(cursor: &mut Cursor) -> Vec<Token> {
    let mut comments = Vec::new();
    loop {
        if cursor.accept(&WHITESPACE).is_some() {
            continue;
        }
        if let Some(comment) = cursor.accept(&MULTILINE_COMMENT) {
            comments.push(comment);
            continue;
        }
        if let Some(comment) = cursor.accept(&SINGLELINE_COMMENT) {
            comments.push(comment);
            continue;
        }
        break;
    }
    comments
}

/// Consumes whitespace and comments and discards them.
pub fn skip_ws_and_comments(cursor: &mut Cursor) {
    skip_ws_and_sweep_comments(cursor);
}

/// [`skip_ws_and_comments`] as a [`choice`] branch: always "fails" after
/// sweeping, so the next alternative runs on the trimmed input.
pub fn sweep<T>(cursor: &mut Cursor) -> PResult<Option<T>> {
    skip_ws_and_comments(cursor);
    Ok(None)
}

/// Checks a list gathered by `many(choice([sweep, separator, element]))`.
/// Elements and separators must alternate, starting and ending with an
/// element. `element` lists what may start an element and `after` what may
/// follow a given element. The error points at the misplaced item, or at the
/// cursor when the list is empty or ends in a separator.
pub fn expect_separated<T: Node>(
    cursor: &mut Cursor,
    items: &[T],
    is_separator: impl Fn(&T) -> bool,
    element: &[&Pattern],
    after: impl Fn(&T) -> Vec<&'static Pattern>,
) -> PResult<()> {
    let mut previous: Option<&T> = None;
    for item in items {
        let want_separator = previous.is_some_and(|previous| !is_separator(previous));
        if is_separator(item) != want_separator {
            cursor.set_loc(item.span().start);
            return Err(match previous {
                Some(previous) if want_separator => cursor.error(&after(previous)),
                _ => cursor.error(element),
            });
        }
        previous = Some(item);
    }
    match previous {
        Some(last) if !is_separator(last) => Ok(()),
        _ => Err(cursor.error(element)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::pattern::{COMMA, IDENT, INT_LIT, SEMI};

    #[derive(Debug, PartialEq)]
    enum Item {
        Name(String),
        Comma,
    }

    fn accept_name(cursor: &mut Cursor) -> PResult<Option<Item>> {
        Ok(accept_pattern_and_then(cursor, &IDENT, |token| Item::Name(token.text)))
    }

    fn accept_comma(cursor: &mut Cursor) -> PResult<Option<Item>> {
        Ok(accept_pattern_and_then(cursor, &COMMA, |_| Item::Comma))
    }

    #[test]
    fn choice_returns_first_success_in_order() {
        let mut cursor = Cursor::new(",a");
        let item = choice(&mut cursor, &[accept_name, accept_comma]).unwrap();
        assert_eq!(item, Some(Item::Comma));
        assert_eq!(cursor.loc(), 1);
    }

    #[test]
    fn many_allows_zero_matches() {
        let mut cursor = Cursor::new("; rest");
        let items = many(&mut cursor, accept_name).unwrap();
        assert!(items.is_empty());
        assert_eq!(cursor.loc(), 0);
    }

    #[test]
    fn separator_list_skips_comments_between_elements() {
        let mut cursor = Cursor::new("a , /* c */ b,c ;");
        let items = many(&mut cursor, |cursor| {
            choice(cursor, &[sweep, accept_comma, accept_name])
        })
        .unwrap();
        assert_eq!(
            items,
            vec![
                Item::Name("a".into()),
                Item::Comma,
                Item::Name("b".into()),
                Item::Comma,
                Item::Name("c".into()),
            ]
        );
        assert_eq!(cursor.rest(), ";");
    }

    #[test]
    fn sweep_collects_comments_in_order() {
        let mut cursor = Cursor::new("  // one\n/* two */\n\n  x");
        let comments = skip_ws_and_sweep_comments(&mut cursor);
        let texts: Vec<_> = comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["// one\n", "/* two */"]);
        assert_eq!(cursor.rest(), "x");
    }

    #[test]
    fn statement_driver_stops_at_unrecognized_input() {
        fn accept_stmt(cursor: &mut Cursor, comments: &[Token]) -> PResult<Option<(String, usize)>> {
            Ok(cursor
                .accept(&IDENT)
                .map(|token| (token.text, comments.len())))
        }

        let mut cursor = Cursor::new("// lead\na b\n}");
        let statements = accept_statements(&mut cursor, &[accept_stmt]).unwrap();
        assert_eq!(statements, vec![("a".to_string(), 1), ("b".to_string(), 0)]);
        assert_eq!(cursor.rest(), "}");
    }

    fn separated_items(text: &str) -> Vec<Token> {
        let mut cursor = Cursor::new(text);
        many(&mut cursor, |cursor| {
            skip_ws_and_comments(cursor);
            Ok(cursor.accept(&COMMA).or_else(|| cursor.accept(&INT_LIT)))
        })
        .unwrap()
    }

    fn check_separated(text: &str) -> PResult<()> {
        let items = separated_items(text);
        let mut cursor = Cursor::new(text);
        cursor.set_loc(text.find(';').unwrap_or(text.len()));
        expect_separated(
            &mut cursor,
            &items,
            |item| item.text == ",",
            &[&*INT_LIT],
            |_| vec![&COMMA, &SEMI],
        )
    }

    #[test]
    fn separated_list_accepts_alternation() {
        assert!(check_separated("1, 2 ,3;").is_ok());
        assert!(check_separated("7;").is_ok());
    }

    #[test]
    fn separated_list_rejects_misplaced_commas() {
        let doubled = check_separated("1,,2;").unwrap_err();
        assert_eq!(doubled.offset, 2);
        assert_eq!(doubled.expected, vec!["integer literal".to_string()]);

        let leading = check_separated(", 1;").unwrap_err();
        assert_eq!(leading.offset, 0);

        let trailing = check_separated("1, 2,;").unwrap_err();
        assert_eq!(trailing.offset, 5);
        assert_eq!(trailing.found, "\";\"");

        let only_commas = check_separated(",;").unwrap_err();
        assert_eq!(only_commas.offset, 0);
    }

    #[test]
    fn separated_list_rejects_adjacent_elements() {
        let error = check_separated("1 2;").unwrap_err();
        assert_eq!(error.offset, 2);
        assert_eq!(error.expected, vec!["\",\"".to_string(), "\";\"".to_string()]);
    }

    #[test]
    fn separated_list_must_not_be_empty() {
        let error = check_separated(";").unwrap_err();
        assert_eq!(error.offset, 0);
        assert_eq!(error.span, (0, 1).into());
    }
}
