//! Structural classification of declaration nodes.
//!
//! The tree has no single discriminant: the same `kindString` covers different shapes
//! (a `Type literal` may be an anonymous interface, an object literal, or a bag of call
//! signatures), so a node is matched against an ordered chain of rules. The first rule
//! that yields a kind wins.

use serde::Serialize;
use serde_json::Value;

use crate::raw::{KindString, RawDecl};

/// Syntactic position a node is being classified from.
///
/// Whether a `Type literal` is an interface literal or an object literal cannot be read
/// off the node itself; callers must say where it appeared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Direct child of a module or namespace.
    NamespaceBody,
    /// Member of an interface, class or interface literal.
    InterfaceBody,
    /// Member of an object literal.
    ObjectLiteralBody,
    /// A type annotation: property, parameter, return or alias target.
    TypeAnnotation,
    /// The type of a value written inside an object literal initializer.
    Initializer,
    /// The target of an internal type reference.
    Reference,
}

impl Position {
    /// Positions where an anonymous literal denotes a value rather than a type.
    pub fn is_initializer(self) -> bool {
        matches!(self, Self::Initializer | Self::ObjectLiteralBody)
    }

    /// Positions where a signature literal is a member of some body.
    fn is_member(self) -> bool {
        matches!(self, Self::InterfaceBody | Self::ObjectLiteralBody)
    }
}

/// Declaration shapes the builder knows how to mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeclKind {
    Module,
    Namespace,
    Class,
    Interface,
    Enum,
    TypeAlias,
    Property,
    Accessor,
    Function,
    Method,
    Constructor,
    InterfaceLiteral,
    ObjectLiteral,
    IndexSignature,
}

/// A node that matched no rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unrecognized {
    pub kind_string: String,
}

type Rule = fn(&RawDecl<'_>, Position) -> Option<DeclKind>;

/// Rules in priority order.
const RULES: &[(&str, Rule)] = &[
    ("kind-string", exact_kind_string),
    ("signature-literal", signature_literal),
    ("type-literal", type_literal),
    ("signature-bearing", signature_bearing),
    ("typed-slot", typed_slot),
];

/// Classifies `decl` as seen from `position`.
pub fn classify(decl: &RawDecl<'_>, position: Position) -> Result<DeclKind, Unrecognized> {
    for (rule, predicate) in RULES {
        if let Some(kind) = predicate(decl, position) {
            tracing::trace!(id = %decl.id(), rule, ?kind, "classified declaration");
            return Ok(kind);
        }
    }
    Err(Unrecognized {
        kind_string: decl.kind_string().to_owned(),
    })
}

fn children_array_or_absent(decl: &RawDecl<'_>) -> bool {
    !decl.has("children") || decl.children().is_some()
}

fn exact_kind_string(decl: &RawDecl<'_>, _: Position) -> Option<DeclKind> {
    let kind = match decl.kind_tag()? {
        KindString::ExternalModule if children_array_or_absent(decl) => DeclKind::Module,
        KindString::Module if children_array_or_absent(decl) => DeclKind::Namespace,
        KindString::Class if children_array_or_absent(decl) => DeclKind::Class,
        KindString::Interface if children_array_or_absent(decl) => DeclKind::Interface,
        KindString::ObjectLiteral if children_array_or_absent(decl) => DeclKind::ObjectLiteral,
        KindString::Enumeration if decl.children().is_some() => DeclKind::Enum,
        KindString::Accessor if decl.get_signature().is_some() || decl.set_signature().is_some() => {
            DeclKind::Accessor
        }
        KindString::IndexSignature if is_index_signature(decl) => DeclKind::IndexSignature,
        _ => return None,
    };
    Some(kind)
}

fn is_index_signature(decl: &RawDecl<'_>) -> bool {
    let [parameter] = decl.parameters() else {
        return false;
    };
    parameter.get("name").and_then(Value::as_str).is_some() && decl.type_details().is_some()
}

/// Whether `value` is a well-formed call or constructor signature.
pub(crate) fn is_signature(value: &Value) -> bool {
    let Some(signature) = RawDecl::from_value(value) else {
        return false;
    };
    signature.kind_tag().is_some_and(KindString::is_signature)
        && (!signature.has("parameters") || value.get("parameters").is_some_and(Value::is_array))
        && signature.type_details().is_some()
}

/// Non-empty, well-formed `signatures` with no interface body alongside.
fn pure_signatures<'a>(decl: &RawDecl<'a>) -> Option<&'a [Value]> {
    let signatures = decl.signatures()?;
    let well_formed = !signatures.is_empty() && signatures.iter().all(is_signature);
    (well_formed && !decl.has("children") && !decl.has("indexSignature")).then_some(signatures)
}

fn signature_literal(decl: &RawDecl<'_>, position: Position) -> Option<DeclKind> {
    if decl.kind_tag()? != KindString::TypeLiteral {
        return None;
    }
    let signatures = pure_signatures(decl)?;
    let all_constructors = signatures.iter().all(|signature| {
        signature.get("kindString").and_then(Value::as_str)
            == Some(KindString::ConstructorSignature.as_str())
    });

    Some(if all_constructors {
        DeclKind::Constructor
    } else if position.is_member() {
        DeclKind::Method
    } else {
        DeclKind::Function
    })
}

fn type_literal(decl: &RawDecl<'_>, position: Position) -> Option<DeclKind> {
    if decl.kind_tag()? != KindString::TypeLiteral || !children_array_or_absent(decl) {
        return None;
    }
    Some(if position.is_initializer() {
        DeclKind::ObjectLiteral
    } else {
        DeclKind::InterfaceLiteral
    })
}

fn signature_bearing(decl: &RawDecl<'_>, _: Position) -> Option<DeclKind> {
    let kind = match decl.kind_tag()? {
        KindString::Function => DeclKind::Function,
        KindString::Method => DeclKind::Method,
        KindString::Constructor => DeclKind::Constructor,
        _ => return None,
    };
    pure_signatures(decl).map(|_| kind)
}

fn typed_slot(decl: &RawDecl<'_>, _: Position) -> Option<DeclKind> {
    if decl.type_details().is_none() || decl.has("children") || decl.has("signatures") {
        return None;
    }
    match decl.kind_tag()? {
        KindString::TypeAlias => Some(DeclKind::TypeAlias),
        tag if tag.is_property_like() => Some(DeclKind::Property),
        _ => None,
    }
}
