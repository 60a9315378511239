//! The `pb` command-line interface.
//!
//! This module dispatches the subcommands to the library: parsing, file
//! discovery and the wire helpers. Every failure is rendered through miette
//! and ends the process with status 1.

use std::{
    path::{Path, PathBuf},
    process,
};

use clap::Parser;

use crate::{
    ast::*,
    cli::args::{AstFormat, Command, PbArgs},
    cli::output::{print_check_status, print_check_summary, print_comments, print_zigzag},
    discovery::{discover_proto_files, parse_file},
    errors::{print_error, PbError},
    syntax::cursor::line_column,
    wire::zigzag,
};

pub mod args;
pub mod output;

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

pub fn run() {
    let args = PbArgs::parse();

    let result = match args.command {
        Command::Ast { file, format } => handle_ast(&file, format),
        Command::Check { paths, extension } => handle_check(&paths, &extension),
        Command::Comments { file } => handle_comments(&file),
        Command::Zigzag { values } => {
            for value in values {
                print_zigzag(value, zigzag::encode32(value));
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        print_error(e);
        process::exit(1);
    }
}

// ============================================================================
// SUBCOMMANDS
// ============================================================================

fn handle_ast(file: &Path, format: AstFormat) -> Result<(), PbError> {
    let result = parse_file(file)?;
    match format {
        AstFormat::Json => println!("{}", serde_json::to_string_pretty(&result.ast)?),
        AstFormat::Debug => println!("{:#?}", result.ast),
    }
    Ok(())
}

/// Parses every discovered file, reporting each one. Exits with status 1
/// after the summary if any file failed.
fn handle_check(paths: &[PathBuf], extension: &str) -> Result<(), PbError> {
    let files = discover_proto_files(paths, extension)?;
    if files.is_empty() {
        println!("no .{extension} files found");
        return Ok(());
    }

    let mut passed = 0;
    let mut failed = 0;
    for file in &files {
        match parse_file(file) {
            Ok(_) => {
                passed += 1;
                print_check_status(file, true);
            }
            Err(e) => {
                failed += 1;
                print_check_status(file, false);
                print_error(e);
            }
        }
    }

    print_check_summary(passed, failed);
    if failed > 0 {
        process::exit(1);
    }
    Ok(())
}

fn handle_comments(file: &Path) -> Result<(), PbError> {
    let result = parse_file(file)?;
    let source = result.cursor.text();
    let mut statements = Vec::new();
    for statement in &result.ast.statements {
        collect_top_level(statement, &mut statements);
    }
    for statement in statements.iter().filter(|s| !s.comments.is_empty()) {
        let (line, _) = line_column(source, statement.span.start);
        print_comments(statement.kind, statement.span, line, statement.comments);
    }
    Ok(())
}

// ============================================================================
// STATEMENT TRAVERSAL
// ============================================================================

/// A statement in document order, flattened out of its body.
struct Commented<'a> {
    kind: &'static str,
    span: Span,
    comments: &'a [Token],
}

impl<'a> Commented<'a> {
    fn push(out: &mut Vec<Commented<'a>>, kind: &'static str, span: Span, comments: &'a [Token]) {
        out.push(Commented {
            kind,
            span,
            comments,
        });
    }
}

fn collect_top_level<'a>(statement: &'a TopLevelStatement, out: &mut Vec<Commented<'a>>) {
    Commented::push(
        out,
        statement.kind(),
        statement.span(),
        statement.leading_comments(),
    );
    match statement {
        TopLevelStatement::Message(message) => collect_message_body(&message.message_body, out),
        TopLevelStatement::Enum(node) => collect_flat(&node.enum_body.statements, out),
        TopLevelStatement::Extend(extend) => {
            for statement in &extend.extend_body.statements {
                collect_extend_body(statement, out);
            }
        }
        TopLevelStatement::Service(service) => collect_flat(&service.service_body.statements, out),
        _ => {}
    }
}

fn collect_message_body<'a>(body: &'a MessageBody, out: &mut Vec<Commented<'a>>) {
    for statement in &body.statements {
        Commented::push(
            out,
            statement.kind(),
            statement.span(),
            statement.leading_comments(),
        );
        match statement {
            MessageBodyStatement::Group(group) => collect_message_body(&group.message_body, out),
            MessageBodyStatement::Message(message) => {
                collect_message_body(&message.message_body, out)
            }
            MessageBodyStatement::Enum(node) => collect_flat(&node.enum_body.statements, out),
            MessageBodyStatement::Oneof(oneof) => collect_flat(&oneof.oneof_body.statements, out),
            MessageBodyStatement::Extend(extend) => {
                for statement in &extend.extend_body.statements {
                    collect_extend_body(statement, out);
                }
            }
            _ => {}
        }
    }
}

fn collect_extend_body<'a>(statement: &'a ExtendBodyStatement, out: &mut Vec<Commented<'a>>) {
    Commented::push(
        out,
        statement.kind(),
        statement.span(),
        statement.leading_comments(),
    );
    if let ExtendBodyStatement::Group(group) = statement {
        collect_message_body(&group.message_body, out);
    }
}

/// Bodies whose statements never nest further.
fn collect_flat<'a, S: FlatStatement>(statements: &'a [S], out: &mut Vec<Commented<'a>>) {
    for statement in statements {
        Commented::push(
            out,
            statement.kind(),
            statement.span(),
            statement.leading_comments(),
        );
    }
}

trait FlatStatement: Node {
    fn kind(&self) -> &'static str;
    fn leading_comments(&self) -> &[Token];
}

macro_rules! flat_statement {
    ($($ty:ty),*) => {
        $(
            impl FlatStatement for $ty {
                fn kind(&self) -> &'static str {
                    <$ty>::kind(self)
                }

                fn leading_comments(&self) -> &[Token] {
                    <$ty>::leading_comments(self)
                }
            }
        )*
    };
}

flat_statement!(EnumBodyStatement, OneofBodyStatement, ServiceBodyStatement);
