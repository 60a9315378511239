//! Statement nodes and the bodies that contain them.
//!
//! Each body kind has its own closed statement enum, so a consumer matching on
//! a message body cannot forget, say, `reserved`, and cannot meet an `rpc`.

use serde::{Deserialize, Serialize};

use super::{
    spanned_node, Comments, Constant, FieldNames, FieldOptions, FullIdent, IntLit, Node,
    OptionName, Ranges, SignedIntLit, Span, StrLit, Token, Type,
};

/// Declares a statement enum with its serde tags, `kind`, `comments`,
/// [`Node`] and `From` conversions from each variant's node type.
macro_rules! statement_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident($ty:ty) => $tag:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "type")]
        pub enum $name {
            $(
                #[serde(rename = $tag)]
                $variant($ty),
            )*
        }

        impl $name {
            /// Node tag, e.g. `"map-field"`.
            pub fn kind(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => $tag,)*
                }
            }

            pub fn comments(&self) -> &Comments {
                match self {
                    $(Self::$variant(node) => &node.comments,)*
                }
            }

            pub fn leading_comments(&self) -> &[Token] {
                &self.comments().leading
            }
        }

        impl Node for $name {
            fn span(&self) -> Span {
                match self {
                    $(Self::$variant(node) => node.span,)*
                }
            }
        }

        $(
            impl From<$ty> for $name {
                fn from(node: $ty) -> Self {
                    Self::$variant(node)
                }
            }
        )*
    };
}

// ============================================================================
// BODIES
// ============================================================================

/// A `{ ... }` block of statements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body<S> {
    pub span: Span,
    pub bracket_open: Token,
    pub statements: Vec<S>,
    pub bracket_close: Token,
}

impl<S> Node for Body<S> {
    fn span(&self) -> Span {
        self.span
    }
}

pub type MessageBody = Body<MessageBodyStatement>;
pub type EnumBody = Body<EnumBodyStatement>;
pub type OneofBody = Body<OneofBodyStatement>;
pub type ExtendBody = Body<ExtendBodyStatement>;
pub type ServiceBody = Body<ServiceBodyStatement>;

statement_enum!(
    /// Statements allowed at the top level of a file.
    TopLevelStatement {
        Syntax(Syntax) => "syntax",
        Import(Import) => "import",
        Package(Package) => "package",
        Option(OptionStatement) => "option",
        Message(Message) => "message",
        Enum(Enum) => "enum",
        Extend(Extend) => "extend",
        Service(Service) => "service",
        Empty(Empty) => "empty",
    }
);

statement_enum!(
    MessageBodyStatement {
        Group(Group) => "group",
        Field(Field) => "field",
        Enum(Enum) => "enum",
        Message(Message) => "message",
        Extend(Extend) => "extend",
        Extensions(Extensions) => "extensions",
        Option(OptionStatement) => "option",
        Oneof(Oneof) => "oneof",
        MapField(MapField) => "map-field",
        Reserved(Reserved) => "reserved",
        Empty(Empty) => "empty",
    }
);

statement_enum!(
    EnumBodyStatement {
        Option(OptionStatement) => "option",
        Reserved(Reserved) => "reserved",
        EnumField(EnumField) => "enum-field",
        Empty(Empty) => "empty",
    }
);

statement_enum!(
    OneofBodyStatement {
        Option(OptionStatement) => "option",
        OneofField(OneofField) => "oneof-field",
        Empty(Empty) => "empty",
    }
);

statement_enum!(
    ExtendBodyStatement {
        Group(Group) => "group",
        Field(Field) => "field",
        Empty(Empty) => "empty",
    }
);

statement_enum!(
    ServiceBodyStatement {
        Option(OptionStatement) => "option",
        Rpc(Rpc) => "rpc",
        Empty(Empty) => "empty",
    }
);

// ============================================================================
// FILE-LEVEL STATEMENTS
// ============================================================================

/// `syntax = "proto3";`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Syntax {
    pub span: Span,
    pub comments: Comments,
    pub keyword: Token,
    pub eq: Token,
    pub quote_open: Token,
    pub syntax: Token,
    pub quote_close: Token,
    pub semi: Token,
}

/// `import [weak|public] "path";`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Import {
    pub span: Span,
    pub comments: Comments,
    pub keyword: Token,
    pub weak_or_public: Option<Token>,
    pub str_lit: StrLit,
    pub semi: Token,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub span: Span,
    pub comments: Comments,
    pub keyword: Token,
    pub full_ident: FullIdent,
    pub semi: Token,
}

/// `option name = constant;`, valid in every body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionStatement {
    pub span: Span,
    pub comments: Comments,
    pub keyword: Token,
    pub option_name: OptionName,
    pub eq: Token,
    pub constant: Constant,
    pub semi: Token,
}

/// A bare `;`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Empty {
    pub span: Span,
    pub comments: Comments,
    pub semi: Token,
}

// ============================================================================
// MESSAGES AND THEIR MEMBERS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub span: Span,
    pub comments: Comments,
    pub keyword: Token,
    pub message_name: Token,
    pub message_body: MessageBody,
}

/// A message field. `field_label` is `None` only for proto3-style fields
/// written without `required`, `optional` or `repeated`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub span: Span,
    pub comments: Comments,
    pub field_label: Option<Token>,
    pub field_type: Type,
    pub field_name: Token,
    pub eq: Token,
    pub field_number: IntLit,
    pub field_options: Option<FieldOptions>,
    pub semi: Token,
}

/// `repeated group Result = 1 { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub span: Span,
    pub comments: Comments,
    pub group_label: Token,
    pub keyword: Token,
    pub group_name: Token,
    pub eq: Token,
    pub field_number: IntLit,
    pub message_body: MessageBody,
    pub semi: Option<Token>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Oneof {
    pub span: Span,
    pub comments: Comments,
    pub keyword: Token,
    pub oneof_name: Token,
    pub oneof_body: OneofBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneofField {
    pub span: Span,
    pub comments: Comments,
    pub field_type: Type,
    pub field_name: Token,
    pub eq: Token,
    pub field_number: IntLit,
    pub field_options: Option<FieldOptions>,
    pub semi: Token,
}

/// `map<key, value> name = N;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapField {
    pub span: Span,
    pub comments: Comments,
    pub keyword: Token,
    pub type_bracket_open: Token,
    pub key_type: Type,
    pub type_sep: Token,
    pub value_type: Type,
    pub type_bracket_close: Token,
    pub map_name: Token,
    pub eq: Token,
    pub field_number: IntLit,
    pub field_options: Option<FieldOptions>,
    pub semi: Token,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extensions {
    pub span: Span,
    pub comments: Comments,
    pub keyword: Token,
    pub ranges: Ranges,
    pub semi: Token,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ReservedBody {
    Ranges(Ranges),
    FieldNames(FieldNames),
}

impl Node for ReservedBody {
    fn span(&self) -> Span {
        match self {
            Self::Ranges(ranges) => ranges.span,
            Self::FieldNames(names) => names.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reserved {
    pub span: Span,
    pub comments: Comments,
    pub keyword: Token,
    pub reserved: ReservedBody,
    pub semi: Token,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extend {
    pub span: Span,
    pub comments: Comments,
    pub keyword: Token,
    pub message_type: Type,
    pub extend_body: ExtendBody,
}

// ============================================================================
// ENUMS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enum {
    pub span: Span,
    pub comments: Comments,
    pub keyword: Token,
    pub enum_name: Token,
    pub enum_body: EnumBody,
}

/// `NAME = -1 [deprecated = true];`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumField {
    pub span: Span,
    pub comments: Comments,
    pub field_name: Token,
    pub eq: Token,
    pub field_number: SignedIntLit,
    pub field_options: Option<FieldOptions>,
    pub semi: Token,
}

// ============================================================================
// SERVICES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub span: Span,
    pub comments: Comments,
    pub keyword: Token,
    pub service_name: Token,
    pub service_body: ServiceBody,
}

/// `( [stream] Type )` on either side of an rpc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcType {
    pub span: Span,
    pub bracket_open: Token,
    pub stream: Option<Token>,
    pub message_type: Type,
    pub bracket_close: Token,
}

impl RpcType {
    pub fn is_stream(&self) -> bool {
        self.stream.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rpc {
    pub span: Span,
    pub comments: Comments,
    pub keyword: Token,
    pub rpc_name: Token,
    pub req_type: RpcType,
    pub returns: Token,
    pub res_type: RpcType,
    pub semi: Token,
}

spanned_node!(
    Syntax,
    Import,
    Package,
    OptionStatement,
    Empty,
    Message,
    Field,
    Group,
    Oneof,
    OneofField,
    MapField,
    Extensions,
    Reserved,
    Extend,
    Enum,
    EnumField,
    Service,
    RpcType,
    Rpc,
);
