//! Resolution of type-details nodes into type mirrors.

use serde_json::Value;

use crate::builder::Builder;
use crate::classify::Position;
use crate::diagnostics::Diagnostic;
use crate::error::Result;
use crate::mirror::{
    ArrayMirror, CompoundMirror, ExternalTypeReference, Mirror, StringLiteralMirror,
    TypeOperatorMirror, TypeOperatorTarget, TypeParameterMirror,
};
use crate::raw::{type_arguments_of, DeclId, RawType};
use crate::table::MirrorId;

impl<'a> Builder<'a> {
    /// Resolves one type-details node. Never fails on bad input; unmatched or broken
    /// positions resolve to the Unknown builtin.
    pub(crate) fn resolve_type(&mut self, value: &'a Value, position: Position) -> Result<MirrorId> {
        if self.depth >= self.options.max_type_depth {
            self.record(Diagnostic::TypeDepthExceeded { depth: self.depth });
            return Ok(self.builtins.unknown);
        }
        self.depth += 1;
        let resolved = self.resolve_type_details(value, position);
        self.depth -= 1;
        resolved
    }

    pub(crate) fn resolve_optional_type(
        &mut self,
        value: Option<&'a Value>,
        position: Position,
    ) -> Result<MirrorId> {
        match value {
            Some(value) => self.resolve_type(value, position),
            None => Ok(self.builtins.unknown),
        }
    }

    /// Resolves a sequence of type-details, keeping input order.
    pub(crate) fn resolve_types(
        &mut self,
        values: &'a [Value],
        position: Position,
    ) -> Result<Vec<MirrorId>> {
        values
            .iter()
            .map(|value| self.resolve_type(value, position))
            .collect()
    }

    /// Follows an internal reference through the resolution table. The target is only
    /// reserved here; its body is built after the top-level modules.
    pub(crate) fn resolve_reference(&mut self, id: DeclId) -> Result<MirrorId> {
        if let Some(resolved) = self.table.lookup(id) {
            return Ok(resolved.mirror);
        }
        let Some(node) = self.index.get(&id).copied() else {
            self.record(Diagnostic::DanglingReference { id });
            return Ok(self.builtins.unknown);
        };
        Ok(self.defer_declaration(node, Position::Reference).mirror)
    }

    fn resolve_type_details(&mut self, value: &'a Value, position: Position) -> Result<MirrorId> {
        let raw_arguments = type_arguments_of(value);

        let mirror = match RawType::parse(value) {
            RawType::Intrinsic { name } => {
                return Ok(self.builtins.lookup(name).unwrap_or_else(|| {
                    tracing::trace!(name, "unknown intrinsic");
                    self.builtins.unknown
                }));
            }
            RawType::InternalReference { id } => {
                // The declaration mirror is shared by every use site, so per-use arguments
                // are resolved for their side effects only.
                self.resolve_types(raw_arguments, Position::TypeAnnotation)?;
                return self.resolve_reference(id);
            }
            RawType::MalformedReference => {
                self.record(Diagnostic::MalformedReference);
                return Ok(self.builtins.unknown);
            }
            RawType::Reflection { declaration } => {
                return Ok(self.resolve_declaration(declaration, position)?.mirror);
            }
            RawType::Unknown { name } => {
                tracing::trace!(?name, "unknown type details");
                return Ok(self.builtins.unknown);
            }
            RawType::ExternalReference { name } => {
                Mirror::ExternalTypeReference(ExternalTypeReference {
                    name: name.to_owned(),
                    type_arguments: self.resolve_types(raw_arguments, Position::TypeAnnotation)?,
                })
            }
            RawType::Array { element } => Mirror::Array(ArrayMirror {
                element_type: self.resolve_type(element, position)?,
                type_arguments: self.resolve_types(raw_arguments, Position::TypeAnnotation)?,
            }),
            RawType::Union { types } => Mirror::Union(CompoundMirror {
                members: self.resolve_types(types, position)?,
                type_arguments: self.resolve_types(raw_arguments, Position::TypeAnnotation)?,
            }),
            RawType::Intersection { types } => Mirror::Intersection(CompoundMirror {
                members: self.resolve_types(types, position)?,
                type_arguments: self.resolve_types(raw_arguments, Position::TypeAnnotation)?,
            }),
            RawType::StringLiteral { value } => Mirror::StringLiteral(StringLiteralMirror {
                value: value.to_owned(),
                type_arguments: self.resolve_types(raw_arguments, Position::TypeAnnotation)?,
            }),
            RawType::TypeParameter { name } => Mirror::TypeParameter(TypeParameterMirror {
                name: name.to_owned(),
                type_arguments: self.resolve_types(raw_arguments, Position::TypeAnnotation)?,
            }),
            RawType::TypeOperator {
                operator,
                target_type,
                target_name,
            } => Mirror::TypeOperator(TypeOperatorMirror {
                operator: operator.to_owned(),
                target: TypeOperatorTarget {
                    type_name: target_type.to_owned(),
                    name: target_name.map(str::to_owned),
                },
                type_arguments: self.resolve_types(raw_arguments, Position::TypeAnnotation)?,
            }),
        };

        Ok(self.arena.alloc(mirror))
    }
}
