// tests/regression_tests.rs
//
// Inputs that once broke the parser. Each one must parse completely.

use pbkit::ast::*;
use pbkit::parse_complete;

fn parse_ok(source: &str) -> Proto {
    match parse_complete("regression.proto", source) {
        Ok(result) => result.ast,
        Err(e) => panic!("failed to parse:\n{source}\n{e}"),
    }
}

fn only_message(proto: &Proto) -> &Message {
    match proto.statements.as_slice() {
        [TopLevelStatement::Message(message)] => message,
        other => panic!("expected one message, got {other:?}"),
    }
}

fn only_enum(proto: &Proto) -> &Enum {
    match proto.statements.as_slice() {
        [TopLevelStatement::Enum(node)] => node,
        other => panic!("expected one enum, got {other:?}"),
    }
}

#[test]
fn labeled_field_whose_type_starts_like_map() {
    let proto = parse_ok(
        "
    message TestSubmessageMaps {
      optional TestMaps m = 1;
    }
  ",
    );
    let message = only_message(&proto);
    let [MessageBodyStatement::Field(field)] = message.message_body.statements.as_slice() else {
        panic!("expected a field");
    };
    assert_eq!(field.field_label.as_ref().unwrap().text, "optional");
    assert_eq!(field.field_type.text(), "TestMaps");
}

#[test]
fn unlabeled_field_with_leading_underscore() {
    let proto = parse_ok(
        "
    message TestAllTypesProto3 {
      int32 _field_name3 = 403;
    }
  ",
    );
    let message = only_message(&proto);
    let [MessageBodyStatement::Field(field)] = message.message_body.statements.as_slice() else {
        panic!("expected a field");
    };
    assert!(field.field_label.is_none());
    assert_eq!(field.field_name.text, "_field_name3");
    assert_eq!(field.field_number.text(), "403");
}

#[test]
fn group_without_trailing_semicolon() {
    let proto = parse_ok(
        "
    message TestDiffMessage {
      repeated group Item = 1 {}
    }
  ",
    );
    let message = only_message(&proto);
    let [MessageBodyStatement::Group(group)] = message.message_body.statements.as_slice() else {
        panic!("expected a group");
    };
    assert_eq!(group.group_name.text, "Item");
    assert!(group.semi.is_none());
    assert_eq!(group.span.end, group.message_body.span.end);
}

#[test]
fn message_option_with_bool_constant() {
    let proto = parse_ok(
        "
    message TestMessageSet {
      option message_set_wire_format = true;
    }
  ",
    );
    let message = only_message(&proto);
    let [MessageBodyStatement::Option(option)] = message.message_body.statements.as_slice() else {
        panic!("expected an option");
    };
    assert_eq!(option.option_name.text(), "message_set_wire_format");
    assert!(matches!(option.constant, Constant::BoolLit(_)));
}

#[test]
fn enum_value_in_hex() {
    let proto = parse_ok(
        "
    enum EnumWithLargeValue {
      VALUE_MAX = 0x7fffffff;
    }
  ",
    );
    let node = only_enum(&proto);
    let [EnumBodyStatement::EnumField(field)] = node.enum_body.statements.as_slice() else {
        panic!("expected an enum field");
    };
    assert_eq!(field.field_number.value.text(), "0x7fffffff");
    assert!(field.field_number.sign.is_none());
}

#[test]
fn float_default_value() {
    let proto = parse_ok(
        "
    message TestMessage {
      optional double optional_double = 6 [default = 6.0];
    }
  ",
    );
    let message = only_message(&proto);
    let [MessageBodyStatement::Field(field)] = message.message_body.statements.as_slice() else {
        panic!("expected a field");
    };
    let options: Vec<_> = field.field_options.as_ref().unwrap().options().collect();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].option_name.text(), "default");
    let Constant::SignedFloatLit(value) = &options[0].constant else {
        panic!("expected a float, got {:?}", options[0].constant);
    };
    assert_eq!(value.value.text(), "6.0");
}

#[test]
fn reserved_numbers_separated_by_commas_and_spaces() {
    let proto = parse_ok(
        "
    message MessageOptions {
      reserved 4, 5, 6;
    }
  ",
    );
    let message = only_message(&proto);
    let [MessageBodyStatement::Reserved(reserved)] = message.message_body.statements.as_slice()
    else {
        panic!("expected reserved");
    };
    let ReservedBody::Ranges(ranges) = &reserved.reserved else {
        panic!("expected ranges");
    };
    let starts: Vec<_> = ranges.ranges().map(|r| r.range_start.text()).collect();
    assert_eq!(starts, vec!["4", "5", "6"]);
    assert_eq!(ranges.range_or_commas.len(), 5);
}

#[test]
fn extension_option_name() {
    let proto = parse_ok(
        "
    message Proto3OptionalExtensions {
      option (protobuf_unittest.Proto3OptionalExtensions.ext_no_optional) = 8;
    }
  ",
    );
    let message = only_message(&proto);
    let [MessageBodyStatement::Option(option)] = message.message_body.statements.as_slice() else {
        panic!("expected an option");
    };
    let segments: Vec<_> = option.option_name.segments().collect();
    assert_eq!(segments.len(), 1);
    assert!(segments[0].is_extension());
    assert_eq!(segments[0].name.idents().count(), 4);
    assert_eq!(
        option.option_name.text(),
        "(protobuf_unittest.Proto3OptionalExtensions.ext_no_optional)"
    );
}

#[test]
fn reserved_inside_enum() {
    let proto = parse_ok(
        "
    enum Foo {
      reserved 1;
    }
  ",
    );
    let node = only_enum(&proto);
    assert!(matches!(
        node.enum_body.statements.as_slice(),
        [EnumBodyStatement::Reserved(_)]
    ));
}

#[test]
fn enum_value_named_reserved() {
    let proto = parse_ok("enum Foo { reserved = 1; }");
    let node = only_enum(&proto);
    let [EnumBodyStatement::EnumField(field)] = node.enum_body.statements.as_slice() else {
        panic!("expected an enum field");
    };
    assert_eq!(field.field_name.text, "reserved");
}
