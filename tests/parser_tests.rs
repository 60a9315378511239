// tests/parser_tests.rs

use pbkit::ast::*;
use pbkit::{parse, parse_complete, SyntaxError};

fn parse_ok(source: &str) -> Proto {
    match parse_complete("test.proto", source) {
        Ok(result) => result.ast,
        Err(e) => panic!("failed to parse:\n{source}\n{e}"),
    }
}

fn parse_err(source: &str) -> SyntaxError {
    match parse_complete("test.proto", source) {
        Ok(result) => panic!("expected an error, got {:#?}", result.ast),
        Err(e) => e,
    }
}

fn message_statements(proto: &Proto, index: usize) -> &[MessageBodyStatement] {
    match &proto.statements[index] {
        TopLevelStatement::Message(message) => &message.message_body.statements,
        other => panic!("expected a message, got {}", other.kind()),
    }
}

// ---
// Spans and comments
// ---

#[test]
fn test_syntax_statement_spans() {
    let source = r#"syntax = "proto3";"#;
    let proto = parse_ok(source);
    let TopLevelStatement::Syntax(syntax) = &proto.statements[0] else {
        panic!("expected syntax");
    };
    assert_eq!(syntax.span, Span::new(0, 18));
    assert_eq!(syntax.keyword.span, Span::new(0, 6));
    assert_eq!(syntax.syntax.text, "proto3");
    assert_eq!(syntax.syntax.span, Span::new(10, 16));
    assert_eq!(syntax.semi.span, Span::new(17, 18));
    assert_eq!(proto.span(), Some(Span::new(0, 18)));
}

#[test]
fn test_single_quoted_syntax() {
    let proto = parse_ok("syntax = 'proto2';");
    let TopLevelStatement::Syntax(syntax) = &proto.statements[0] else {
        panic!("expected syntax");
    };
    assert_eq!(syntax.quote_open.text, "'");
    assert_eq!(syntax.syntax.text, "proto2");
}

#[test]
fn test_statement_spans_cover_their_source() {
    let source = "\
syntax = \"proto3\";
package acme.shop;

message Order {
  string id = 1;
  repeated Item items = 2 [packed = true];
  message Item { int64 sku = 1; }
}

service Orders {
  rpc Place(Order) returns (Order);
}
";
    let proto = parse_ok(source);
    let texts: Vec<_> = proto
        .statements
        .iter()
        .map(|statement| statement.source_text(source))
        .collect();
    assert_eq!(texts[0], "syntax = \"proto3\";");
    assert_eq!(texts[1], "package acme.shop;");
    assert!(texts[2].starts_with("message Order {"));
    assert!(texts[2].ends_with("int64 sku = 1; }\n}"));
    assert!(texts[3].starts_with("service Orders"));
    assert!(texts[3].ends_with(");\n}"));

    for statement in message_statements(&proto, 2) {
        let outer = proto.statements[2].span();
        assert_eq!(outer.cover(statement.span()), outer);
    }
}

#[test]
fn test_leading_comments_attach_to_next_statement() {
    let source = "\
// file header
syntax = \"proto3\";

/* block */
// line
message Foo {
  // about bar
  int32 bar = 1;
  // dangling
}
";
    let proto = parse_ok(source);
    let texts = |comments: &[Token]| -> Vec<String> {
        comments.iter().map(|c| c.text.clone()).collect()
    };
    assert_eq!(
        texts(proto.statements[0].leading_comments()),
        vec!["// file header\n"]
    );
    assert_eq!(
        texts(proto.statements[1].leading_comments()),
        vec!["/* block */", "// line\n"]
    );
    let body = message_statements(&proto, 1);
    assert_eq!(body.len(), 1);
    assert_eq!(texts(body[0].leading_comments()), vec!["// about bar\n"]);
    assert!(body[0].comments().trailing.is_empty());
    assert!(body[0].comments().leading_detached.is_empty());
}

// ---
// File-level statements
// ---

#[test]
fn test_imports_with_and_without_modifier() {
    let proto = parse_ok("import \"a.proto\";\nimport public \"b.proto\";\nimport weak 'c.proto';");
    let imports: Vec<_> = proto
        .statements
        .iter()
        .map(|statement| match statement {
            TopLevelStatement::Import(import) => import,
            other => panic!("expected import, got {}", other.kind()),
        })
        .collect();
    assert!(imports[0].weak_or_public.is_none());
    assert_eq!(imports[0].str_lit.text(), "\"a.proto\"");
    assert_eq!(imports[1].weak_or_public.as_ref().unwrap().text, "public");
    assert_eq!(imports[2].weak_or_public.as_ref().unwrap().text, "weak");
    assert_eq!(imports[2].str_lit.text(), "'c.proto'");
}

#[test]
fn test_package_full_ident() {
    let proto = parse_ok("package foo.bar.baz;");
    let TopLevelStatement::Package(package) = &proto.statements[0] else {
        panic!("expected package");
    };
    assert_eq!(package.full_ident.text(), "foo.bar.baz");
    assert_eq!(package.full_ident.idents().count(), 3);
}

#[test]
fn test_option_name_with_extension_and_field_path() {
    let proto = parse_ok("option (my.ext).field = -1.5;");
    let TopLevelStatement::Option(option) = &proto.statements[0] else {
        panic!("expected option");
    };
    assert_eq!(option.option_name.text(), "(my.ext).field");
    let segments: Vec<_> = option.option_name.segments().collect();
    assert_eq!(segments.len(), 2);
    assert!(segments[0].is_extension());
    assert!(!segments[1].is_extension());
    let Constant::SignedFloatLit(value) = &option.constant else {
        panic!("expected a float");
    };
    assert_eq!(value.sign.as_ref().unwrap().text, "-");
    assert_eq!(value.span.len(), 4);
}

#[test]
fn test_empty_statements() {
    let proto = parse_ok(";;message A { ; }");
    let kinds: Vec<_> = proto.statements.iter().map(|s| s.kind()).collect();
    assert_eq!(kinds, vec!["empty", "empty", "message"]);
    assert_eq!(message_statements(&proto, 2)[0].kind(), "empty");
}

// ---
// Message bodies
// ---

#[test]
fn test_field_with_several_options() {
    let proto = parse_ok(
        "message A { optional string name = 1 [deprecated = true, (custom).x = \"y\"]; }",
    );
    let MessageBodyStatement::Field(field) = &message_statements(&proto, 0)[0] else {
        panic!("expected a field");
    };
    let field_options = field.field_options.as_ref().unwrap();
    let names: Vec<_> = field_options
        .options()
        .map(|option| option.option_name.text())
        .collect();
    assert_eq!(names, vec!["deprecated", "(custom).x"]);
    assert_eq!(field_options.field_option_or_commas.len(), 3);
}

#[test]
fn test_map_field() {
    let proto = parse_ok("message A { map<string, Project> projects = 3; }");
    let MessageBodyStatement::MapField(map) = &message_statements(&proto, 0)[0] else {
        panic!("expected a map field");
    };
    assert_eq!(map.key_type.text(), "string");
    assert_eq!(map.value_type.text(), "Project");
    assert_eq!(map.map_name.text, "projects");
    assert_eq!(map.field_number.text(), "3");
}

#[test]
fn test_oneof() {
    let proto = parse_ok(
        "message A {
           oneof test_oneof {
             option (o) = 1;
             string name = 4;
             .pkg.SubMessage sub_message = 9;
           }
         }",
    );
    let MessageBodyStatement::Oneof(oneof) = &message_statements(&proto, 0)[0] else {
        panic!("expected a oneof");
    };
    let kinds: Vec<_> = oneof.oneof_body.statements.iter().map(|s| s.kind()).collect();
    assert_eq!(kinds, vec!["option", "oneof-field", "oneof-field"]);
    let OneofBodyStatement::OneofField(field) = &oneof.oneof_body.statements[2] else {
        panic!("expected a oneof field");
    };
    assert_eq!(field.field_type.text(), ".pkg.SubMessage");
}

#[test]
fn test_nested_definitions() {
    let proto = parse_ok(
        "message Outer {
           message Inner { required int32 id = 1; }
           enum Kind { KIND_UNSPECIFIED = 0; }
           extend Other { optional Inner inner = 100; }
           extensions 100 to max, 5;
           reserved \"foo\", \"bar\";
           Inner inner = 1;
         }",
    );
    let kinds: Vec<_> = message_statements(&proto, 0).iter().map(|s| s.kind()).collect();
    assert_eq!(
        kinds,
        vec!["message", "enum", "extend", "extensions", "reserved", "field"]
    );

    let MessageBodyStatement::Extensions(extensions) = &message_statements(&proto, 0)[3] else {
        panic!("expected extensions");
    };
    let ranges: Vec<_> = extensions.ranges.ranges().collect();
    assert!(matches!(ranges[0].range_end, Some(RangeEnd::Max(_))));
    assert!(ranges[1].range_end.is_none());

    let MessageBodyStatement::Reserved(reserved) = &message_statements(&proto, 0)[4] else {
        panic!("expected reserved");
    };
    let ReservedBody::FieldNames(names) = &reserved.reserved else {
        panic!("expected field names");
    };
    let names: Vec<_> = names.names().map(|name| name.text()).collect();
    assert_eq!(names, vec!["\"foo\"", "\"bar\""]);
}

#[test]
fn test_group_with_semicolon_and_nested_fields() {
    let proto = parse_ok("message A { optional group Result = 1 { required string url = 2; }; }");
    let MessageBodyStatement::Group(group) = &message_statements(&proto, 0)[0] else {
        panic!("expected a group");
    };
    assert_eq!(group.group_label.text, "optional");
    assert_eq!(group.message_body.statements.len(), 1);
    assert_eq!(group.span.end, group.semi.as_ref().unwrap().span.end);
}

#[test]
fn test_enum_with_negative_value_and_options() {
    let proto = parse_ok("enum E { option allow_alias = true; NEG = -1 [deprecated = true]; }");
    let TopLevelStatement::Enum(node) = &proto.statements[0] else {
        panic!("expected an enum");
    };
    let EnumBodyStatement::EnumField(field) = &node.enum_body.statements[1] else {
        panic!("expected an enum field");
    };
    assert!(field.field_number.is_negative());
    assert!(field.field_options.is_some());
}

#[test]
fn test_rpc_streams() {
    let proto = parse_ok(
        "service RouteGuide {
           rpc RouteChat(stream RouteNote) returns (stream RouteNote);
           rpc GetFeature ( Point ) returns ( Feature );
         }",
    );
    let TopLevelStatement::Service(service) = &proto.statements[0] else {
        panic!("expected a service");
    };
    let rpcs: Vec<_> = service
        .service_body
        .statements
        .iter()
        .filter_map(|statement| match statement {
            ServiceBodyStatement::Rpc(rpc) => Some(rpc),
            _ => None,
        })
        .collect();
    assert_eq!(rpcs.len(), 2);
    assert!(rpcs[0].req_type.is_stream() && rpcs[0].res_type.is_stream());
    assert!(!rpcs[1].req_type.is_stream());
    assert_eq!(rpcs[1].res_type.message_type.text(), "Feature");
}

#[test]
fn test_extend_accepts_unlabeled_fields() {
    let proto = parse_ok(
        "extend google.protobuf.FieldOptions {
           string my_opt = 5000;
           optional int32 legacy = 5001;
         }",
    );
    let TopLevelStatement::Extend(extend) = &proto.statements[0] else {
        panic!("expected extend");
    };
    assert_eq!(extend.message_type.text(), "google.protobuf.FieldOptions");
    let labels: Vec<_> = extend
        .extend_body
        .statements
        .iter()
        .map(|statement| match statement {
            ExtendBodyStatement::Field(field) => field.field_label.as_ref().map(|l| l.text.clone()),
            other => panic!("expected a field, got {}", other.kind()),
        })
        .collect();
    assert_eq!(labels, vec![None, Some("optional".to_string())]);
}

// ---
// Partial input and errors
// ---

#[test]
fn test_parse_stops_at_unrecognized_input() {
    let result = parse("message A {}\n}").unwrap();
    assert_eq!(result.ast.statements.len(), 1);
    assert_eq!(result.trailing(), "}");

    let error = parse_err("message A {}\n}");
    assert_eq!(error.found, "\"}\"");
    assert!(error.expected.contains(&"\"message\"".to_string()));
}

#[test]
fn test_message_without_name_is_an_error() {
    let error = parse_err("message { }");
    assert_eq!(error.offset, 8);
    assert_eq!((error.line, error.column), (1, 9));
    assert_eq!(error.expected, vec!["identifier".to_string()]);
    assert_eq!(error.source_name(), "test.proto");
}

#[test]
fn test_unclosed_body_lists_closing_brace_first() {
    let error = parse_err("message Foo {\n  int32 x = 1;\n");
    assert_eq!(error.found, "end of input");
    assert_eq!(error.expected[0], "\"}\"");
    assert_eq!(error.line, 3);
}

#[test]
fn test_missing_semicolon() {
    let error = parse_err("syntax = \"proto3\"\nmessage A {}");
    assert_eq!(error.expected, vec!["\";\"".to_string()]);
    assert_eq!(error.line, 2);
}

#[test]
fn test_field_number_must_be_an_integer() {
    let error = parse_err("message A { optional int32 x = ; }");
    assert_eq!(error.expected, vec!["integer literal".to_string()]);
    assert_eq!(error.offset, 31);
}

#[test]
fn test_reserved_never_mixes_numbers_and_names() {
    let error = parse_err("message A { reserved 1, \"foo\"; }");
    assert_eq!(error.offset, 24);
    assert_eq!(error.expected, vec!["integer literal".to_string()]);

    let error = parse_err("message A { reserved \"foo\", 1; }");
    assert_eq!(error.offset, 28);
    assert_eq!(error.expected, vec!["string literal".to_string()]);
}

#[test]
fn test_list_end_errors_name_every_alternative() {
    let error = parse_err("message A { reserved 1 \"foo\"; }");
    assert_eq!(error.expected, vec!["\";\"", "\",\"", "\"to\""]);

    let error = parse_err("message A { reserved \"a\" 2; }");
    assert_eq!(error.expected, vec!["\";\"", "\",\""]);

    let error = parse_err("enum E { A = 1 }");
    assert_eq!(error.expected, vec!["\";\"", "\"[\""]);
}

#[test]
fn test_parse_error_is_not_a_partial_tree() {
    assert!(parse("message A { optional }").is_err());
}

// ---
// Serialization
// ---

#[test]
fn test_json_uses_kebab_case_type_tags() {
    let proto = parse_ok("message A { map<string, int32> m = 1; }");
    let value = serde_json::to_value(&proto).unwrap();
    let message = &value["statements"][0];
    assert_eq!(message["type"], "message");
    assert_eq!(message["message_body"]["statements"][0]["type"], "map-field");
    assert!(message["message_body"].get("type").is_none());

    let back: Proto = serde_json::from_value(value).unwrap();
    assert_eq!(back, proto);
}

#[test]
fn test_json_tags_list_items() {
    let proto = parse_ok("message A { extensions 1 to 9, 20; }");
    let value = serde_json::to_value(&proto).unwrap();
    let extensions = &value["statements"][0]["message_body"]["statements"][0];
    assert_eq!(extensions["type"], "extensions");
    let items = extensions["ranges"]["range_or_commas"].as_array().unwrap();
    let tags: Vec<_> = items.iter().map(|item| item["type"].as_str().unwrap()).collect();
    assert_eq!(tags, vec!["range", "comma", "range"]);
    assert_eq!(items[0]["range_end"]["type"], "int-lit");
}
