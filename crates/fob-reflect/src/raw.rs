//! Borrowed views over the untyped TypeDoc declaration tree.
//!
//! Nothing here allocates mirrors. These helpers only answer shape questions about a JSON
//! node ("does it carry `signatures`?", "what is its `kindString`?") so that the classifier
//! and resolvers can stay free of `serde_json` plumbing.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Declaration id as emitted in the source tree.
///
/// Unique within one document; the only safe cross-reference key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclId(pub u64);

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The human-readable `kindString` tags emitted by TypeDoc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindString {
    ExternalModule,
    Module,
    Enumeration,
    EnumerationMember,
    Variable,
    Function,
    Class,
    Interface,
    Constructor,
    Property,
    Method,
    CallSignature,
    IndexSignature,
    ConstructorSignature,
    Parameter,
    TypeLiteral,
    TypeParameter,
    Accessor,
    GetSignature,
    SetSignature,
    ObjectLiteral,
    TypeAlias,
    Event,
}

impl KindString {
    /// Parses a raw `kindString` tag. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let kind = match tag {
            "External module" => Self::ExternalModule,
            "Module" => Self::Module,
            "Enumeration" => Self::Enumeration,
            "Enumeration member" => Self::EnumerationMember,
            "Variable" => Self::Variable,
            "Function" => Self::Function,
            "Class" => Self::Class,
            "Interface" => Self::Interface,
            "Constructor" => Self::Constructor,
            "Property" => Self::Property,
            "Method" => Self::Method,
            "Call signature" => Self::CallSignature,
            "Index signature" => Self::IndexSignature,
            "Constructor signature" => Self::ConstructorSignature,
            "Parameter" => Self::Parameter,
            "Type literal" => Self::TypeLiteral,
            "Type parameter" => Self::TypeParameter,
            "Accessor" => Self::Accessor,
            "Get signature" => Self::GetSignature,
            "Set signature" => Self::SetSignature,
            "Object literal" => Self::ObjectLiteral,
            "Type alias" => Self::TypeAlias,
            "Event" => Self::Event,
            _ => return None,
        };
        Some(kind)
    }

    /// The tag exactly as TypeDoc writes it.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExternalModule => "External module",
            Self::Module => "Module",
            Self::Enumeration => "Enumeration",
            Self::EnumerationMember => "Enumeration member",
            Self::Variable => "Variable",
            Self::Function => "Function",
            Self::Class => "Class",
            Self::Interface => "Interface",
            Self::Constructor => "Constructor",
            Self::Property => "Property",
            Self::Method => "Method",
            Self::CallSignature => "Call signature",
            Self::IndexSignature => "Index signature",
            Self::ConstructorSignature => "Constructor signature",
            Self::Parameter => "Parameter",
            Self::TypeLiteral => "Type literal",
            Self::TypeParameter => "Type parameter",
            Self::Accessor => "Accessor",
            Self::GetSignature => "Get signature",
            Self::SetSignature => "Set signature",
            Self::ObjectLiteral => "Object literal",
            Self::TypeAlias => "Type alias",
            Self::Event => "Event",
        }
    }

    /// Tags whose nodes describe a plain typed slot (variables, properties, events).
    pub fn is_property_like(self) -> bool {
        matches!(self, Self::Variable | Self::Property | Self::Event)
    }

    /// Tags of the individual signatures inside a `signatures` array.
    pub fn is_signature(self) -> bool {
        matches!(self, Self::CallSignature | Self::ConstructorSignature)
    }
}

impl fmt::Display for KindString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declaration flags. Absent flags are `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Flags {
    pub is_const: bool,
    pub is_exported: bool,
    pub is_external: bool,
    pub is_optional: bool,
    pub is_private: bool,
    pub is_protected: bool,
    pub is_public: bool,
    pub is_static: bool,
    pub is_abstract: bool,
}

/// A raw doc comment block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawComment {
    pub short_text: String,
    pub text: Option<String>,
    pub tags: Vec<RawCommentTag>,
}

/// A raw `@tag` entry inside a comment block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCommentTag {
    pub tag: String,
    pub text: String,
    pub param: Option<String>,
}

/// Borrowed view over one declaration node.
///
/// Construction checks the base shape shared by every declaration: numeric `id`, string
/// `name`, numeric `kind` and string `kindString`.
#[derive(Debug, Clone, Copy)]
pub struct RawDecl<'a> {
    obj: &'a Map<String, Value>,
    id: DeclId,
}

impl<'a> RawDecl<'a> {
    /// Returns `None` when `value` lacks the base declaration shape.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        let obj = value.as_object()?;
        let id = obj.get("id")?.as_u64()?;
        obj.get("name")?.as_str()?;
        obj.get("kind")?.as_u64()?;
        obj.get("kindString")?.as_str()?;
        Some(Self {
            obj,
            id: DeclId(id),
        })
    }

    pub fn id(&self) -> DeclId {
        self.id
    }

    pub fn name(&self) -> &'a str {
        self.str_field("name").unwrap_or_default()
    }

    pub fn kind(&self) -> u64 {
        self.obj.get("kind").and_then(Value::as_u64).unwrap_or_default()
    }

    pub fn kind_string(&self) -> &'a str {
        self.str_field("kindString").unwrap_or_default()
    }

    /// The parsed `kindString`, if it is one TypeDoc emits.
    pub fn kind_tag(&self) -> Option<KindString> {
        KindString::from_tag(self.kind_string())
    }

    /// Equivalent of `key in node`.
    pub fn has(&self, key: &str) -> bool {
        self.obj.contains_key(key)
    }

    pub fn flags(&self) -> Flags {
        self.obj
            .get("flags")
            .and_then(|flags| Flags::deserialize(flags).ok())
            .unwrap_or_default()
    }

    pub fn comment(&self) -> Option<RawComment> {
        self.obj
            .get("comment")
            .and_then(|comment| RawComment::deserialize(comment).ok())
    }

    pub fn original_name(&self) -> Option<&'a str> {
        self.str_field("originalName")
    }

    pub fn default_value(&self) -> Option<&'a str> {
        self.str_field("defaultValue")
    }

    /// `children`, or `None` when absent or not an array.
    pub fn children(&self) -> Option<&'a [Value]> {
        self.array_field("children")
    }

    /// `signatures`, or `None` when absent or not an array.
    pub fn signatures(&self) -> Option<&'a [Value]> {
        self.array_field("signatures")
    }

    pub fn parameters(&self) -> &'a [Value] {
        self.array_field("parameters").unwrap_or_default()
    }

    pub fn type_arguments(&self) -> &'a [Value] {
        self.array_field("typeArguments").unwrap_or_default()
    }

    pub fn extended_types(&self) -> &'a [Value] {
        self.array_field("extendedTypes").unwrap_or_default()
    }

    pub fn implemented_types(&self) -> &'a [Value] {
        self.array_field("implementedTypes").unwrap_or_default()
    }

    /// Names from the `typeParameter` list, in declaration order.
    pub fn type_parameter_names(&self) -> Vec<String> {
        self.array_field("typeParameter")
            .or_else(|| self.array_field("typeParameters"))
            .unwrap_or_default()
            .iter()
            .filter_map(|param| param.get("name").and_then(Value::as_str))
            .map(str::to_owned)
            .collect()
    }

    /// The `type` field when it is a type-details object.
    pub fn type_details(&self) -> Option<&'a Value> {
        self.obj.get("type").filter(|value| value.is_object())
    }

    pub fn index_signature(&self) -> Option<&'a Value> {
        self.obj.get("indexSignature").and_then(single_or_first)
    }

    pub fn get_signature(&self) -> Option<&'a Value> {
        self.obj.get("getSignature").and_then(single_or_first)
    }

    pub fn set_signature(&self) -> Option<&'a Value> {
        self.obj.get("setSignature").and_then(single_or_first)
    }

    fn str_field(&self, key: &str) -> Option<&'a str> {
        self.obj.get(key).and_then(Value::as_str)
    }

    fn array_field(&self, key: &str) -> Option<&'a [Value]> {
        self.obj
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }
}

/// Some emitters wrap single signatures in one-element arrays.
fn single_or_first(value: &Value) -> Option<&Value> {
    match value {
        Value::Object(_) => Some(value),
        Value::Array(items) => items.first().filter(|item| item.is_object()),
        _ => None,
    }
}

/// Parsed view of a type-details node, keyed by its `type` discriminant.
#[derive(Debug, Clone, Copy)]
pub enum RawType<'a> {
    Intrinsic {
        name: &'a str,
    },
    /// A reference carrying an `id`; resolved through the table.
    InternalReference {
        id: DeclId,
    },
    /// A name-only reference to something outside the tree.
    ExternalReference {
        name: &'a str,
    },
    /// A reference with neither a usable `id` nor a `name`.
    MalformedReference,
    Array {
        element: &'a Value,
    },
    Union {
        types: &'a [Value],
    },
    Intersection {
        types: &'a [Value],
    },
    Reflection {
        declaration: &'a Value,
    },
    StringLiteral {
        value: &'a str,
    },
    TypeParameter {
        name: &'a str,
    },
    TypeOperator {
        operator: &'a str,
        target_type: &'a str,
        target_name: Option<&'a str>,
    },
    Unknown {
        name: Option<&'a str>,
    },
}

impl<'a> RawType<'a> {
    /// Classifies a type-details node. Never fails: unmatched shapes become `Unknown`.
    pub fn parse(value: &'a Value) -> Self {
        let str_of = |key: &str| value.get(key).and_then(Value::as_str);
        let Some(tag) = str_of("type") else {
            return Self::Unknown { name: None };
        };

        match tag {
            "intrinsic" => match str_of("name") {
                Some(name) => Self::Intrinsic { name },
                None => Self::Unknown { name: None },
            },
            // Some internal references carry a name as well, so `id` is checked first.
            "reference" => match value.get("id") {
                Some(id) => id
                    .as_u64()
                    .map(|id| Self::InternalReference { id: DeclId(id) })
                    .unwrap_or(Self::MalformedReference),
                None => str_of("name")
                    .map(|name| Self::ExternalReference { name })
                    .unwrap_or(Self::MalformedReference),
            },
            "array" => match value.get("elementType").filter(|e| e.is_object()) {
                Some(element) => Self::Array { element },
                None => Self::Unknown { name: None },
            },
            "union" | "intersection" => {
                let Some(types) = value.get("types").and_then(Value::as_array) else {
                    return Self::Unknown { name: None };
                };
                if tag == "union" {
                    Self::Union { types }
                } else {
                    Self::Intersection { types }
                }
            }
            "reflection" => match value.get("declaration").filter(|d| d.is_object()) {
                Some(declaration) => Self::Reflection { declaration },
                None => Self::Unknown { name: None },
            },
            "stringLiteral" => match str_of("value") {
                Some(value) => Self::StringLiteral { value },
                None => Self::Unknown { name: None },
            },
            "typeParameter" => match str_of("name") {
                Some(name) => Self::TypeParameter { name },
                None => Self::Unknown { name: None },
            },
            "typeOperator" => {
                let operator = str_of("operator");
                let target = value.get("target");
                let target_type = target.and_then(|t| t.get("type")).and_then(Value::as_str);
                match (operator, target_type) {
                    (Some(operator), Some(target_type)) => Self::TypeOperator {
                        operator,
                        target_type,
                        target_name: target
                            .and_then(|t| t.get("name"))
                            .and_then(Value::as_str),
                    },
                    _ => Self::Unknown { name: None },
                }
            }
            _ => Self::Unknown { name: str_of("name") },
        }
    }
}

/// `typeArguments` attached to a type-details node, in input order.
pub fn type_arguments_of(value: &Value) -> &[Value] {
    value
        .get("typeArguments")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}
