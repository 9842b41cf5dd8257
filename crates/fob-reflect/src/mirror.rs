//! The resolved mirror model.
//!
//! Mirrors form a graph, not a tree: every cross-link is a [`MirrorId`] into the owning
//! [`Reflector`](crate::Reflector), so a class whose property is typed as the class itself
//! simply holds its own id.

use serde::{Serialize, Serializer};

use crate::raw::{DeclId, Flags, RawComment};
use crate::table::MirrorId;

/// Tag carried by every mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MirrorKind {
    Accessor,
    Array,
    Class,
    Constructor,
    Enum,
    ExternalTypeReference,
    Function,
    IndexSignature,
    Interface,
    InterfaceLiteral,
    Intersection,
    Method,
    Module,
    Namespace,
    ObjectLiteral,
    Primitive,
    Property,
    StringLiteral,
    TypeAlias,
    TypeOperator,
    TypeParameter,
    Union,
    Unknown,
}

impl MirrorKind {
    /// Kinds with properties and methods.
    pub const INTERFACE_LIKE: [MirrorKind; 4] = [
        MirrorKind::Interface,
        MirrorKind::Class,
        MirrorKind::InterfaceLiteral,
        MirrorKind::ObjectLiteral,
    ];

    /// Kinds that carry call signatures.
    pub const CALLABLE: [MirrorKind; 3] = [
        MirrorKind::Function,
        MirrorKind::Method,
        MirrorKind::Constructor,
    ];
}

/// Doc comment attached to a declaration or signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocComment {
    present: bool,
    short_text: String,
    long_text: String,
    tags: Vec<CommentTag>,
}

impl DocComment {
    pub(crate) fn from_raw(raw: Option<RawComment>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        Self {
            present: true,
            short_text: raw.short_text,
            long_text: raw.text.unwrap_or_default(),
            tags: raw
                .tags
                .into_iter()
                .map(|tag| CommentTag {
                    tag: tag.tag,
                    text: tag.text.trim_end().to_owned(),
                    param: tag.param,
                })
                .collect(),
        }
    }

    pub fn has_comment(&self) -> bool {
        self.present
    }

    /// Comment heading. Empty when there is no comment.
    pub fn short_text(&self) -> &str {
        &self.short_text
    }

    /// Comment body. Empty when there is none.
    pub fn long_text(&self) -> &str {
        &self.long_text
    }

    pub fn tags(&self) -> &[CommentTag] {
        &self.tags
    }

    /// First tag named `tag`, e.g. `deprecated`.
    pub fn tag(&self, tag: &str) -> Option<&CommentTag> {
        self.tags.iter().find(|candidate| candidate.tag == tag)
    }
}

/// A `@tag` inside a doc comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentTag {
    pub tag: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

/// Builtin primitive, or the Unknown fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrimitiveMirror {
    pub name: String,
}

impl PrimitiveMirror {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArrayMirror {
    pub element_type: MirrorId,
    pub type_arguments: Vec<MirrorId>,
}

/// Union or intersection. `members` keeps input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompoundMirror {
    pub members: Vec<MirrorId>,
    pub type_arguments: Vec<MirrorId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringLiteralMirror {
    pub value: String,
    pub type_arguments: Vec<MirrorId>,
}

/// A type parameter from a surrounding generic. Its constraint is not modeled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeParameterMirror {
    pub name: String,
    pub type_arguments: Vec<MirrorId>,
}

/// A type operator such as `keyof T`, kept at the syntactic level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeOperatorMirror {
    pub operator: String,
    pub target: TypeOperatorTarget,
    pub type_arguments: Vec<MirrorId>,
}

/// Unresolved description of a type operator's operand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeOperatorTarget {
    /// The operand's own `type` discriminant, e.g. `reference`.
    pub type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Named reference to a type outside the tree, such as `Buffer` or `Promise`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalTypeReference {
    pub name: String,
    pub type_arguments: Vec<MirrorId>,
}

/// A module (source file) or a namespace.
///
/// Every member is in `members` in declaration order and in exactly one typed partition,
/// also in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NamespaceMirror {
    pub name: String,
    /// The parsed source file, for modules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    pub decl_id: Option<DeclId>,
    pub flags: Flags,
    pub comment: DocComment,
    pub members: Vec<MirrorId>,
    pub namespaces: Vec<MirrorId>,
    pub properties: Vec<MirrorId>,
    pub interfaces: Vec<MirrorId>,
    pub classes: Vec<MirrorId>,
    pub enums: Vec<MirrorId>,
    pub type_aliases: Vec<MirrorId>,
    pub functions: Vec<MirrorId>,
    pub object_literals: Vec<MirrorId>,
}

/// Interface, class body, interface literal or object literal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InterfaceLikeMirror {
    pub name: String,
    pub decl_id: Option<DeclId>,
    pub flags: Flags,
    pub comment: DocComment,
    pub type_parameters: Vec<String>,
    pub type_arguments: Vec<MirrorId>,
    pub extended_types: Vec<MirrorId>,
    pub implemented_types: Vec<MirrorId>,
    /// All members in declaration order, including ones not exposed by a partition.
    pub members: Vec<MirrorId>,
    pub properties: Vec<MirrorId>,
    pub methods: Vec<MirrorId>,
    /// Nested literal members (object literals inside object literals).
    pub object_literals: Vec<MirrorId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_signature: Option<IndexSignature>,
    pub(crate) property_names: Vec<String>,
}

impl InterfaceLikeMirror {
    pub(crate) fn push_property(&mut self, name: &str, id: MirrorId) {
        self.property_names.push(name.to_owned());
        self.properties.push(id);
    }

    /// Names of `properties`, in the same order.
    pub fn property_names(&self) -> &[String] {
        &self.property_names
    }

    /// The first property called `name`, including accessors.
    pub fn describe_property(&self, name: &str) -> Option<MirrorId> {
        self.property_names
            .iter()
            .position(|candidate| candidate == name)
            .and_then(|index| self.properties.get(index).copied())
    }
}

/// A class: an interface-like body plus constructor and abstractness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassMirror {
    pub body: InterfaceLikeMirror,
    pub is_abstract: bool,
    /// First constructor in declaration order. Later ones stay in `body.members`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constructor: Option<MirrorId>,
}

/// `[key: IndexType]: ValueType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexSignature {
    pub parameter_name: String,
    pub index_type: MirrorId,
    pub value_type: MirrorId,
    pub comment: DocComment,
}

impl IndexSignature {
    pub fn mirror_kind(&self) -> MirrorKind {
        MirrorKind::IndexSignature
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnumMirror {
    pub name: String,
    pub decl_id: Option<DeclId>,
    pub flags: Flags,
    pub comment: DocComment,
    pub members: Vec<EnumMember>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumMember {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    pub comment: DocComment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeAliasMirror {
    pub name: String,
    pub decl_id: Option<DeclId>,
    pub comment: DocComment,
    pub type_parameters: Vec<String>,
    /// The right-hand side of the alias.
    pub target_definition: MirrorId,
}

/// A property, variable, const, or get/set accessor pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyMirror {
    pub name: String,
    pub decl_id: Option<DeclId>,
    pub flags: Flags,
    pub comment: DocComment,
    #[serde(rename = "type")]
    pub ty: MirrorId,
    /// Initializer as source text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    pub readable: bool,
    pub writeable: bool,
    pub is_static: bool,
    pub is_optional: bool,
    /// Backed by get/set signatures rather than a field.
    pub is_accessor: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CallableKind {
    Function,
    Method,
    Constructor,
}

/// Function, method or constructor, with every overload signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallableMirror {
    pub name: String,
    pub decl_id: Option<DeclId>,
    pub kind: CallableKind,
    pub flags: Flags,
    pub comment: DocComment,
    pub signatures: Vec<CallableSignature>,
    pub type_arguments: Vec<MirrorId>,
}

impl CallableMirror {
    pub fn is_method(&self) -> bool {
        self.kind == CallableKind::Method
    }

    pub fn is_constructor(&self) -> bool {
        self.kind == CallableKind::Constructor
    }

    /// Static class member. Meaningless outside class bodies.
    pub fn is_static(&self) -> bool {
        self.flags.is_static
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallableSignature {
    pub comment: DocComment,
    pub type_parameters: Vec<String>,
    pub parameters: Vec<Parameter>,
    pub return_type: MirrorId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: MirrorId,
    pub is_optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    pub comment: DocComment,
}

/// Any resolved declaration or type expression.
///
/// Serializes as its payload plus a `mirrorKind` field holding [`Mirror::mirror_kind`], so
/// callables and accessors carry their precise kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mirror {
    Primitive(PrimitiveMirror),
    Unknown(PrimitiveMirror),
    Array(ArrayMirror),
    Union(CompoundMirror),
    Intersection(CompoundMirror),
    StringLiteral(StringLiteralMirror),
    TypeParameter(TypeParameterMirror),
    TypeOperator(TypeOperatorMirror),
    ExternalTypeReference(ExternalTypeReference),
    Module(NamespaceMirror),
    Namespace(NamespaceMirror),
    Class(ClassMirror),
    Interface(InterfaceLikeMirror),
    InterfaceLiteral(InterfaceLikeMirror),
    ObjectLiteral(InterfaceLikeMirror),
    Enum(EnumMirror),
    TypeAlias(TypeAliasMirror),
    Property(PropertyMirror),
    Callable(CallableMirror),
}

impl Mirror {
    pub fn mirror_kind(&self) -> MirrorKind {
        match self {
            Self::Primitive(_) => MirrorKind::Primitive,
            Self::Unknown(_) => MirrorKind::Unknown,
            Self::Array(_) => MirrorKind::Array,
            Self::Union(_) => MirrorKind::Union,
            Self::Intersection(_) => MirrorKind::Intersection,
            Self::StringLiteral(_) => MirrorKind::StringLiteral,
            Self::TypeParameter(_) => MirrorKind::TypeParameter,
            Self::TypeOperator(_) => MirrorKind::TypeOperator,
            Self::ExternalTypeReference(_) => MirrorKind::ExternalTypeReference,
            Self::Module(_) => MirrorKind::Module,
            Self::Namespace(_) => MirrorKind::Namespace,
            Self::Class(_) => MirrorKind::Class,
            Self::Interface(_) => MirrorKind::Interface,
            Self::InterfaceLiteral(_) => MirrorKind::InterfaceLiteral,
            Self::ObjectLiteral(_) => MirrorKind::ObjectLiteral,
            Self::Enum(_) => MirrorKind::Enum,
            Self::TypeAlias(_) => MirrorKind::TypeAlias,
            Self::Property(property) if property.is_accessor => MirrorKind::Accessor,
            Self::Property(_) => MirrorKind::Property,
            Self::Callable(callable) => match callable.kind {
                CallableKind::Function => MirrorKind::Function,
                CallableKind::Method => MirrorKind::Method,
                CallableKind::Constructor => MirrorKind::Constructor,
            },
        }
    }

    /// Name of this mirror, if it has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Primitive(primitive) | Self::Unknown(primitive) => Some(&primitive.name),
            Self::TypeParameter(param) => Some(&param.name),
            Self::ExternalTypeReference(reference) => Some(&reference.name),
            Self::Module(namespace) | Self::Namespace(namespace) => Some(&namespace.name),
            Self::Class(class) => Some(&class.body.name),
            Self::Interface(body) | Self::InterfaceLiteral(body) | Self::ObjectLiteral(body) => {
                Some(&body.name)
            }
            Self::Enum(enumeration) => Some(&enumeration.name),
            Self::TypeAlias(alias) => Some(&alias.name),
            Self::Property(property) => Some(&property.name),
            Self::Callable(callable) => Some(&callable.name),
            Self::Array(_)
            | Self::Union(_)
            | Self::Intersection(_)
            | Self::StringLiteral(_)
            | Self::TypeOperator(_) => None,
        }
    }

    /// Type arguments used at this position, in input order.
    pub fn type_arguments(&self) -> &[MirrorId] {
        match self {
            Self::Array(array) => &array.type_arguments,
            Self::Union(compound) | Self::Intersection(compound) => &compound.type_arguments,
            Self::StringLiteral(literal) => &literal.type_arguments,
            Self::TypeParameter(param) => &param.type_arguments,
            Self::TypeOperator(operator) => &operator.type_arguments,
            Self::ExternalTypeReference(reference) => &reference.type_arguments,
            Self::Class(class) => &class.body.type_arguments,
            Self::Interface(body) | Self::InterfaceLiteral(body) | Self::ObjectLiteral(body) => {
                &body.type_arguments
            }
            Self::Callable(callable) => &callable.type_arguments,
            Self::Primitive(_)
            | Self::Unknown(_)
            | Self::Module(_)
            | Self::Namespace(_)
            | Self::Enum(_)
            | Self::TypeAlias(_)
            | Self::Property(_) => &[],
        }
    }

    /// Doc comment of a declaration mirror.
    pub fn comment(&self) -> Option<&DocComment> {
        match self {
            Self::Module(namespace) | Self::Namespace(namespace) => Some(&namespace.comment),
            Self::Class(class) => Some(&class.body.comment),
            Self::Interface(body) | Self::InterfaceLiteral(body) | Self::ObjectLiteral(body) => {
                Some(&body.comment)
            }
            Self::Enum(enumeration) => Some(&enumeration.comment),
            Self::TypeAlias(alias) => Some(&alias.comment),
            Self::Property(property) => Some(&property.comment),
            Self::Callable(callable) => Some(&callable.comment),
            _ => None,
        }
    }

    /// Classes, interfaces, literals, enums, unions, intersections and arrays.
    pub fn is_complex(&self) -> bool {
        self.is_interface_like()
            || matches!(
                self.mirror_kind(),
                MirrorKind::Enum | MirrorKind::Union | MirrorKind::Intersection | MirrorKind::Array
            )
    }

    /// Types provided by the language or type system rather than the source tree.
    pub fn is_builtin(&self) -> bool {
        matches!(
            self.mirror_kind(),
            MirrorKind::Primitive
                | MirrorKind::Unknown
                | MirrorKind::Array
                | MirrorKind::Union
                | MirrorKind::Intersection
                | MirrorKind::StringLiteral
                | MirrorKind::TypeOperator
        )
    }

    /// `string`, `number`, `boolean` or `undefined`, and string literals.
    pub fn is_primitive_type(&self) -> bool {
        match self {
            Self::Primitive(primitive) => {
                matches!(
                    primitive.name.as_str(),
                    "string" | "number" | "boolean" | "undefined"
                )
            }
            Self::StringLiteral(_) => true,
            _ => false,
        }
    }

    // Kind predicates: exactly one holds for any mirror.

    pub fn is_accessor(&self) -> bool {
        self.mirror_kind() == MirrorKind::Accessor
    }

    pub fn is_array(&self) -> bool {
        self.mirror_kind() == MirrorKind::Array
    }

    pub fn is_class(&self) -> bool {
        self.mirror_kind() == MirrorKind::Class
    }

    pub fn is_constructor(&self) -> bool {
        self.mirror_kind() == MirrorKind::Constructor
    }

    pub fn is_enum(&self) -> bool {
        self.mirror_kind() == MirrorKind::Enum
    }

    pub fn is_external_type_reference(&self) -> bool {
        self.mirror_kind() == MirrorKind::ExternalTypeReference
    }

    pub fn is_function(&self) -> bool {
        self.mirror_kind() == MirrorKind::Function
    }

    pub fn is_interface(&self) -> bool {
        self.mirror_kind() == MirrorKind::Interface
    }

    pub fn is_interface_literal(&self) -> bool {
        self.mirror_kind() == MirrorKind::InterfaceLiteral
    }

    pub fn is_intersection(&self) -> bool {
        self.mirror_kind() == MirrorKind::Intersection
    }

    pub fn is_method(&self) -> bool {
        self.mirror_kind() == MirrorKind::Method
    }

    pub fn is_module(&self) -> bool {
        self.mirror_kind() == MirrorKind::Module
    }

    pub fn is_namespace(&self) -> bool {
        self.mirror_kind() == MirrorKind::Namespace
    }

    pub fn is_object_literal(&self) -> bool {
        self.mirror_kind() == MirrorKind::ObjectLiteral
    }

    pub fn is_primitive(&self) -> bool {
        self.mirror_kind() == MirrorKind::Primitive
    }

    pub fn is_property(&self) -> bool {
        self.mirror_kind() == MirrorKind::Property
    }

    pub fn is_string_literal(&self) -> bool {
        self.mirror_kind() == MirrorKind::StringLiteral
    }

    pub fn is_type_alias(&self) -> bool {
        self.mirror_kind() == MirrorKind::TypeAlias
    }

    pub fn is_type_operator(&self) -> bool {
        self.mirror_kind() == MirrorKind::TypeOperator
    }

    pub fn is_type_parameter(&self) -> bool {
        self.mirror_kind() == MirrorKind::TypeParameter
    }

    pub fn is_union(&self) -> bool {
        self.mirror_kind() == MirrorKind::Union
    }

    pub fn is_unknown(&self) -> bool {
        self.mirror_kind() == MirrorKind::Unknown
    }

    // Category predicates.

    pub fn is_interface_like(&self) -> bool {
        MirrorKind::INTERFACE_LIKE.contains(&self.mirror_kind())
    }

    pub fn is_callable(&self) -> bool {
        MirrorKind::CALLABLE.contains(&self.mirror_kind())
    }

    pub fn is_namespace_like(&self) -> bool {
        matches!(self.mirror_kind(), MirrorKind::Module | MirrorKind::Namespace)
    }

    // Narrowing.

    pub fn as_namespace_like(&self) -> Option<&NamespaceMirror> {
        match self {
            Self::Module(namespace) | Self::Namespace(namespace) => Some(namespace),
            _ => None,
        }
    }

    /// The interface-like body; for classes, the class body.
    pub fn as_interface_like(&self) -> Option<&InterfaceLikeMirror> {
        match self {
            Self::Class(class) => Some(&class.body),
            Self::Interface(body) | Self::InterfaceLiteral(body) | Self::ObjectLiteral(body) => {
                Some(body)
            }
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassMirror> {
        match self {
            Self::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumMirror> {
        match self {
            Self::Enum(enumeration) => Some(enumeration),
            _ => None,
        }
    }

    pub fn as_type_alias(&self) -> Option<&TypeAliasMirror> {
        match self {
            Self::TypeAlias(alias) => Some(alias),
            _ => None,
        }
    }

    /// Properties and accessors.
    pub fn as_property(&self) -> Option<&PropertyMirror> {
        match self {
            Self::Property(property) => Some(property),
            _ => None,
        }
    }

    pub fn as_callable(&self) -> Option<&CallableMirror> {
        match self {
            Self::Callable(callable) => Some(callable),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayMirror> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_union(&self) -> Option<&CompoundMirror> {
        match self {
            Self::Union(compound) => Some(compound),
            _ => None,
        }
    }

    pub fn as_intersection(&self) -> Option<&CompoundMirror> {
        match self {
            Self::Intersection(compound) => Some(compound),
            _ => None,
        }
    }

    pub fn as_external_type_reference(&self) -> Option<&ExternalTypeReference> {
        match self {
            Self::ExternalTypeReference(reference) => Some(reference),
            _ => None,
        }
    }

    pub fn as_string_literal(&self) -> Option<&StringLiteralMirror> {
        match self {
            Self::StringLiteral(literal) => Some(literal),
            _ => None,
        }
    }

    pub fn as_type_parameter(&self) -> Option<&TypeParameterMirror> {
        match self {
            Self::TypeParameter(param) => Some(param),
            _ => None,
        }
    }

    pub fn as_type_operator(&self) -> Option<&TypeOperatorMirror> {
        match self {
            Self::TypeOperator(operator) => Some(operator),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct Tagged<'a, T> {
    #[serde(rename = "mirrorKind")]
    mirror_kind: MirrorKind,
    #[serde(flatten)]
    payload: &'a T,
}

impl Serialize for Mirror {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mirror_kind = self.mirror_kind();
        match self {
            Self::Primitive(payload) | Self::Unknown(payload) => Tagged { mirror_kind, payload }.serialize(serializer),
            Self::Array(payload) => Tagged { mirror_kind, payload }.serialize(serializer),
            Self::Union(payload) | Self::Intersection(payload) => {
                Tagged { mirror_kind, payload }.serialize(serializer)
            }
            Self::StringLiteral(payload) => Tagged { mirror_kind, payload }.serialize(serializer),
            Self::TypeParameter(payload) => Tagged { mirror_kind, payload }.serialize(serializer),
            Self::TypeOperator(payload) => Tagged { mirror_kind, payload }.serialize(serializer),
            Self::ExternalTypeReference(payload) => {
                Tagged { mirror_kind, payload }.serialize(serializer)
            }
            Self::Module(payload) | Self::Namespace(payload) => {
                Tagged { mirror_kind, payload }.serialize(serializer)
            }
            Self::Class(payload) => Tagged { mirror_kind, payload }.serialize(serializer),
            Self::Interface(payload) | Self::InterfaceLiteral(payload) | Self::ObjectLiteral(payload) => {
                Tagged { mirror_kind, payload }.serialize(serializer)
            }
            Self::Enum(payload) => Tagged { mirror_kind, payload }.serialize(serializer),
            Self::TypeAlias(payload) => Tagged { mirror_kind, payload }.serialize(serializer),
            Self::Property(payload) => Tagged { mirror_kind, payload }.serialize(serializer),
            Self::Callable(payload) => Tagged { mirror_kind, payload }.serialize(serializer),
        }
    }
}
