use std::fmt;

use serde::Serialize;

use crate::raw::DeclId;

/// A non-fatal finding recorded while resolving a tree.
///
/// The affected position degrades to the Unknown mirror and resolution continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A node matched no classification rule, or lacks the base declaration shape.
    UnrecognizedDeclaration {
        id: Option<DeclId>,
        kind_string: Option<String>,
    },
    /// A reference `id` with no declaration in the tree.
    DanglingReference { id: DeclId },
    /// A `reference` with neither `id` nor `name`.
    MalformedReference,
    /// Two declaration nodes share an id; the first one seen is used.
    DuplicateDeclarationId { id: DeclId },
    /// Type-details nesting went past the configured bound.
    TypeDepthExceeded { depth: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedDeclaration { id, kind_string } => {
                write!(
                    f,
                    "unrecognized declaration {} (kindString: {})",
                    id.map(|id| id.to_string()).unwrap_or_else(|| "without id".to_owned()),
                    kind_string.as_deref().unwrap_or("<missing>")
                )
            }
            Self::DanglingReference { id } => write!(f, "reference to missing declaration {id}"),
            Self::MalformedReference => f.write_str("reference without id or name"),
            Self::DuplicateDeclarationId { id } => write!(f, "duplicate declaration id {id}"),
            Self::TypeDepthExceeded { depth } => {
                write!(f, "type nesting exceeded depth {depth}")
            }
        }
    }
}
