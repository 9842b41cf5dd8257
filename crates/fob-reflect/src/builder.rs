//! Builds mirrors for declaration nodes.
//!
//! Every declaration goes through [`Builder::resolve_declaration`], which classifies the
//! node, reserves its slot in the resolution table and only then builds its children. Type
//! positions are handled by the resolver in [`crate::types`].

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::classify::{classify, DeclKind, Position};
use crate::diagnostics::Diagnostic;
use crate::error::{ReflectError, Result};
use crate::mirror::{
    CallableKind, CallableMirror, CallableSignature, ClassMirror, DocComment, EnumMember,
    EnumMirror, IndexSignature, InterfaceLikeMirror, Mirror, NamespaceMirror, Parameter,
    PrimitiveMirror, PropertyMirror, TypeAliasMirror,
};
use crate::options::ReflectOptions;
use crate::raw::{DeclId, KindString, RawDecl};
use crate::table::{MirrorArena, MirrorId, Reservation, ResolutionTable, Resolved};

/// Singleton mirrors for the intrinsic types, allocated before anything else.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Builtins {
    pub any: MirrorId,
    pub undefined: MirrorId,
    pub void: MirrorId,
    pub string: MirrorId,
    pub number: MirrorId,
    pub boolean: MirrorId,
    pub unknown: MirrorId,
}

impl Builtins {
    fn alloc(arena: &mut MirrorArena) -> Self {
        let mut primitive = |name: &str| arena.alloc(Mirror::Primitive(PrimitiveMirror::new(name)));
        let any = primitive("any");
        let undefined = primitive("undefined");
        let void = primitive("void");
        let string = primitive("string");
        let number = primitive("number");
        let boolean = primitive("boolean");
        let unknown = arena.alloc(Mirror::Unknown(PrimitiveMirror::new("unknown")));
        Self {
            any,
            undefined,
            void,
            string,
            number,
            boolean,
            unknown,
        }
    }

    /// Builtin for an intrinsic name. Unlisted names have none.
    pub fn lookup(&self, name: &str) -> Option<MirrorId> {
        match name {
            "any" => Some(self.any),
            "undefined" => Some(self.undefined),
            "void" => Some(self.void),
            "string" => Some(self.string),
            "number" => Some(self.number),
            "boolean" => Some(self.boolean),
            _ => None,
        }
    }
}

/// Everything a finished pass hands to the reflector.
#[derive(Debug)]
pub(crate) struct Resolution {
    pub mirrors: Vec<Mirror>,
    pub modules: Vec<MirrorId>,
    pub declarations: FxHashMap<DeclId, MirrorId>,
    pub builtins: Builtins,
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolves one declaration tree. Single writer; consumed by [`Builder::finish`].
pub(crate) struct Builder<'a> {
    pub(crate) options: &'a ReflectOptions,
    pub(crate) index: FxHashMap<DeclId, &'a Value>,
    pub(crate) arena: MirrorArena,
    pub(crate) table: ResolutionTable,
    pub(crate) builtins: Builtins,
    pub(crate) diagnostics: Vec<Diagnostic>,
    pub(crate) depth: usize,
    modules: Vec<MirrorId>,
    pending: Vec<Pending<'a>>,
}

/// A declaration reached through a reference whose slot is reserved but not yet built.
#[derive(Debug, Clone, Copy)]
struct Pending<'a> {
    decl: RawDecl<'a>,
    kind: DeclKind,
    position: Position,
    slot: MirrorId,
}

/// Outcome of classifying a node and claiming its table slot.
enum Claim<'a> {
    /// Already in the table, or unrecognized and pinned to Unknown.
    Settled(Resolved),
    /// The caller owns `slot` and must build and fill it.
    Fresh {
        decl: RawDecl<'a>,
        kind: DeclKind,
        slot: MirrorId,
    },
}

impl<'a> Builder<'a> {
    pub fn new(root: &'a Value, options: &'a ReflectOptions) -> Self {
        let mut arena = MirrorArena::default();
        let builtins = Builtins::alloc(&mut arena);
        let mut builder = Self {
            options,
            index: FxHashMap::default(),
            arena,
            table: ResolutionTable::default(),
            builtins,
            diagnostics: Vec::new(),
            depth: 0,
            modules: Vec::new(),
            pending: Vec::new(),
        };
        builder.index_declarations(root);
        builder
    }

    /// Resolves every top-level module of `root`, in input order.
    pub fn build_modules(&mut self, root: &'a Value) -> Result<()> {
        let children = match root.get("children") {
            None => &[][..],
            Some(Value::Array(children)) => children.as_slice(),
            Some(_) => {
                return Err(ReflectError::InvalidRoot {
                    details: "`children` is not an array".to_owned(),
                });
            }
        };

        for child in children {
            if let Some(decl) = RawDecl::from_value(child) {
                if self.options.skip_external_modules && decl.flags().is_external {
                    tracing::debug!(id = %decl.id(), name = decl.name(), "skipping external module");
                    continue;
                }
            }

            let resolved = self.resolve_declaration(child, Position::NamespaceBody)?;
            if resolved.kind == Some(DeclKind::Module) {
                self.modules.push(resolved.mirror);
            } else {
                tracing::debug!(mirror = %resolved.mirror, kind = ?resolved.kind, "top-level declaration is not a module");
            }
        }
        self.build_pending()
    }

    /// Builds every declaration that was reserved through a reference.
    ///
    /// Building one may reserve more; the loop runs until none are left.
    fn build_pending(&mut self) -> Result<()> {
        while let Some(pending) = self.pending.pop() {
            let mirror = self.build_declaration(pending.decl, pending.kind, pending.position)?;
            self.arena.fill(pending.slot, mirror)?;
            tracing::trace!(id = %pending.decl.id(), kind = ?pending.kind, mirror = %pending.slot, "built referenced declaration");
        }
        Ok(())
    }

    pub fn finish(self) -> Result<Resolution> {
        let mirrors = self.arena.freeze()?;
        Ok(Resolution {
            mirrors,
            modules: self.modules,
            declarations: self.table.into_mirrors(),
            builtins: self.builtins,
            diagnostics: self.diagnostics,
        })
    }

    pub(crate) fn record(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(%diagnostic, "declaration tree diagnostic");
        self.diagnostics.push(diagnostic);
    }

    /// Indexes every declaration node by id so references can be followed lazily.
    fn index_declarations(&mut self, root: &'a Value) {
        let mut stack = vec![root];
        while let Some(value) = stack.pop() {
            match value {
                Value::Object(object) => {
                    if let Some(decl) = RawDecl::from_value(value) {
                        if self.index.contains_key(&decl.id()) {
                            self.record(Diagnostic::DuplicateDeclarationId { id: decl.id() });
                        } else {
                            self.index.insert(decl.id(), value);
                        }
                    }
                    stack.extend(object.values().rev());
                }
                Value::Array(items) => stack.extend(items.iter().rev()),
                _ => {}
            }
        }
        tracing::debug!(declarations = self.index.len(), "indexed declaration tree");
    }

    /// Returns the single mirror for a declaration node, building it on first request.
    ///
    /// The slot is reserved before children are resolved; a request for the same id made
    /// while building returns the reserved handle. A declaration is classified once, from
    /// the position it is first reached from, and keeps that kind wherever it is reached
    /// later.
    pub(crate) fn resolve_declaration(
        &mut self,
        value: &'a Value,
        position: Position,
    ) -> Result<Resolved> {
        match self.claim(value, position) {
            Claim::Settled(resolved) => Ok(resolved),
            Claim::Fresh { decl, kind, slot } => {
                let mirror = self.build_declaration(decl, kind, position)?;
                self.arena.fill(slot, mirror)?;
                tracing::trace!(id = %decl.id(), ?kind, mirror = %slot, "built declaration");
                Ok(Resolved {
                    mirror: slot,
                    kind: Some(kind),
                })
            }
        }
    }

    /// Like [`Builder::resolve_declaration`], but a fresh declaration is only reserved and
    /// queued. It is built by [`Builder::build_pending`] with the type nesting depth reset,
    /// so reference chains neither count against `max_type_depth` nor recurse natively.
    pub(crate) fn defer_declaration(&mut self, value: &'a Value, position: Position) -> Resolved {
        match self.claim(value, position) {
            Claim::Settled(resolved) => resolved,
            Claim::Fresh { decl, kind, slot } => {
                self.pending.push(Pending {
                    decl,
                    kind,
                    position,
                    slot,
                });
                Resolved {
                    mirror: slot,
                    kind: Some(kind),
                }
            }
        }
    }

    fn claim(&mut self, value: &'a Value, position: Position) -> Claim<'a> {
        let Some(decl) = RawDecl::from_value(value) else {
            self.record(Diagnostic::UnrecognizedDeclaration {
                id: None,
                kind_string: value
                    .get("kindString")
                    .and_then(Value::as_str)
                    .map(str::to_owned),
            });
            return Claim::Settled(Resolved {
                mirror: self.builtins.unknown,
                kind: None,
            });
        };

        if let Some(existing) = self.table.lookup(decl.id()) {
            return Claim::Settled(existing);
        }

        // Index signatures only exist as part of an interface-like body.
        let kind = match classify(&decl, position) {
            Ok(DeclKind::IndexSignature) | Err(_) => {
                self.record(Diagnostic::UnrecognizedDeclaration {
                    id: Some(decl.id()),
                    kind_string: Some(decl.kind_string().to_owned()),
                });
                let pinned = self.table.pin_unrecognized(decl.id(), self.builtins.unknown);
                return Claim::Settled(pinned);
            }
            Ok(kind) => kind,
        };

        match self.table.reserve(&mut self.arena, decl.id(), kind) {
            Reservation::Existing(existing) => Claim::Settled(existing),
            Reservation::Fresh(slot) => Claim::Fresh { decl, kind, slot },
        }
    }

    fn build_declaration(
        &mut self,
        decl: RawDecl<'a>,
        kind: DeclKind,
        position: Position,
    ) -> Result<Mirror> {
        match kind {
            DeclKind::Module | DeclKind::Namespace => self.build_namespace(decl, kind),
            DeclKind::Class
            | DeclKind::Interface
            | DeclKind::InterfaceLiteral
            | DeclKind::ObjectLiteral => self.build_interface_like(decl, kind),
            DeclKind::Enum => Ok(self.build_enum(decl)),
            DeclKind::TypeAlias => self.build_type_alias(decl),
            DeclKind::Property => self.build_property(decl, position),
            DeclKind::Accessor => self.build_accessor(decl),
            DeclKind::Function | DeclKind::Method | DeclKind::Constructor => {
                self.build_callable(decl, kind)
            }
            DeclKind::IndexSignature => Err(ReflectError::invariant(format!(
                "index signature {} reached the declaration builder",
                decl.id()
            ))),
        }
    }

    fn is_skipped(&self, child: &Value) -> bool {
        self.options.skip_private_members
            && RawDecl::from_value(child).is_some_and(|decl| decl.flags().is_private)
    }

    fn build_namespace(&mut self, decl: RawDecl<'a>, kind: DeclKind) -> Result<Mirror> {
        let mut namespace = NamespaceMirror {
            name: decl.name().to_owned(),
            original_name: decl.original_name().map(str::to_owned),
            decl_id: Some(decl.id()),
            flags: decl.flags(),
            comment: DocComment::from_raw(decl.comment()),
            ..NamespaceMirror::default()
        };

        for child in decl.children().unwrap_or_default() {
            if self.is_skipped(child) {
                continue;
            }
            let resolved = self.resolve_declaration(child, Position::NamespaceBody)?;
            let Some(child_kind) = resolved.kind else {
                continue;
            };
            let partition = match child_kind {
                DeclKind::Module | DeclKind::Namespace => &mut namespace.namespaces,
                DeclKind::Class => &mut namespace.classes,
                DeclKind::Interface => &mut namespace.interfaces,
                DeclKind::Enum => &mut namespace.enums,
                DeclKind::TypeAlias => &mut namespace.type_aliases,
                DeclKind::Property | DeclKind::Accessor => &mut namespace.properties,
                DeclKind::Function | DeclKind::Method | DeclKind::Constructor => {
                    &mut namespace.functions
                }
                DeclKind::ObjectLiteral | DeclKind::InterfaceLiteral => {
                    &mut namespace.object_literals
                }
                DeclKind::IndexSignature => continue,
            };
            partition.push(resolved.mirror);
            namespace.members.push(resolved.mirror);
        }

        Ok(if kind == DeclKind::Module {
            Mirror::Module(namespace)
        } else {
            Mirror::Namespace(namespace)
        })
    }

    fn build_interface_like(&mut self, decl: RawDecl<'a>, kind: DeclKind) -> Result<Mirror> {
        let body_position = if kind == DeclKind::ObjectLiteral {
            Position::ObjectLiteralBody
        } else {
            Position::InterfaceBody
        };
        let flags = decl.flags();

        let mut body = InterfaceLikeMirror {
            name: decl.name().to_owned(),
            decl_id: Some(decl.id()),
            flags,
            comment: DocComment::from_raw(decl.comment()),
            type_parameters: decl.type_parameter_names(),
            type_arguments: self.resolve_types(decl.type_arguments(), Position::TypeAnnotation)?,
            extended_types: self.resolve_types(decl.extended_types(), Position::TypeAnnotation)?,
            implemented_types: self
                .resolve_types(decl.implemented_types(), Position::TypeAnnotation)?,
            ..InterfaceLikeMirror::default()
        };
        let mut constructor = None;

        for child in decl.children().unwrap_or_default() {
            if self.is_skipped(child) {
                continue;
            }
            let resolved = self.resolve_declaration(child, body_position)?;
            let Some(child_kind) = resolved.kind else {
                continue;
            };
            match child_kind {
                DeclKind::Property | DeclKind::Accessor => {
                    let name = RawDecl::from_value(child).map(|c| c.name()).unwrap_or_default();
                    body.push_property(name, resolved.mirror);
                }
                DeclKind::Function | DeclKind::Method => body.methods.push(resolved.mirror),
                DeclKind::Constructor if kind == DeclKind::Class && constructor.is_none() => {
                    constructor = Some(resolved.mirror);
                }
                DeclKind::Constructor => {
                    tracing::debug!(owner = %decl.id(), mirror = %resolved.mirror, "additional constructor kept in members only");
                }
                DeclKind::ObjectLiteral | DeclKind::InterfaceLiteral => {
                    body.object_literals.push(resolved.mirror);
                }
                other => {
                    tracing::debug!(owner = %decl.id(), kind = ?other, "nested declaration kept in members only");
                }
            }
            body.members.push(resolved.mirror);
        }

        if let Some(signature) = decl.index_signature() {
            body.index_signature = self.build_index_signature(signature)?;
        }

        Ok(match kind {
            DeclKind::Class => Mirror::Class(ClassMirror {
                body,
                is_abstract: flags.is_abstract,
                constructor,
            }),
            DeclKind::Interface => Mirror::Interface(body),
            DeclKind::InterfaceLiteral => Mirror::InterfaceLiteral(body),
            _ => Mirror::ObjectLiteral(body),
        })
    }

    fn build_index_signature(&mut self, value: &'a Value) -> Result<Option<IndexSignature>> {
        let classified = RawDecl::from_value(value)
            .filter(|decl| classify(decl, Position::InterfaceBody) == Ok(DeclKind::IndexSignature));
        let Some(decl) = classified else {
            self.record(Diagnostic::UnrecognizedDeclaration {
                id: value.get("id").and_then(Value::as_u64).map(DeclId),
                kind_string: value
                    .get("kindString")
                    .and_then(Value::as_str)
                    .map(str::to_owned),
            });
            return Ok(None);
        };

        let parameter = decl.parameters().first();
        let parameter_name = parameter
            .and_then(|p| p.get("name"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        let index_details = parameter.and_then(|p| p.get("type")).filter(|t| t.is_object());
        let index_type = self.resolve_optional_type(index_details, Position::TypeAnnotation)?;
        let value_type = self.resolve_optional_type(decl.type_details(), Position::TypeAnnotation)?;

        Ok(Some(IndexSignature {
            parameter_name,
            index_type,
            value_type,
            comment: DocComment::from_raw(decl.comment()),
        }))
    }

    fn build_enum(&mut self, decl: RawDecl<'a>) -> Mirror {
        let mut members = Vec::new();
        for child in decl.children().unwrap_or_default() {
            match RawDecl::from_value(child) {
                Some(member) if member.kind_tag() == Some(KindString::EnumerationMember) => {
                    members.push(EnumMember {
                        name: member.name().to_owned(),
                        default_value: member.default_value().map(str::to_owned),
                        comment: DocComment::from_raw(member.comment()),
                    });
                }
                other => self.record(Diagnostic::UnrecognizedDeclaration {
                    id: other.map(|member| member.id()),
                    kind_string: other.map(|member| member.kind_string().to_owned()),
                }),
            }
        }

        Mirror::Enum(EnumMirror {
            name: decl.name().to_owned(),
            decl_id: Some(decl.id()),
            flags: decl.flags(),
            comment: DocComment::from_raw(decl.comment()),
            members,
        })
    }

    fn build_type_alias(&mut self, decl: RawDecl<'a>) -> Result<Mirror> {
        let target_definition =
            self.resolve_optional_type(decl.type_details(), Position::TypeAnnotation)?;
        Ok(Mirror::TypeAlias(TypeAliasMirror {
            name: decl.name().to_owned(),
            decl_id: Some(decl.id()),
            comment: DocComment::from_raw(decl.comment()),
            type_parameters: decl.type_parameter_names(),
            target_definition,
        }))
    }

    fn build_property(&mut self, decl: RawDecl<'a>, position: Position) -> Result<Mirror> {
        // Literal types written inside object literals describe values, not shapes.
        let type_position = if position.is_initializer() {
            Position::Initializer
        } else {
            Position::TypeAnnotation
        };
        let ty = self.resolve_optional_type(decl.type_details(), type_position)?;
        let flags = decl.flags();

        Ok(Mirror::Property(PropertyMirror {
            name: decl.name().to_owned(),
            decl_id: Some(decl.id()),
            flags,
            comment: DocComment::from_raw(decl.comment()),
            ty,
            default_value: decl.default_value().map(str::to_owned),
            readable: true,
            writeable: !flags.is_const,
            is_static: flags.is_static,
            is_optional: flags.is_optional,
            is_accessor: false,
        }))
    }

    fn build_accessor(&mut self, decl: RawDecl<'a>) -> Result<Mirror> {
        let getter = decl.get_signature().and_then(RawDecl::from_value);
        let setter = decl.set_signature().and_then(RawDecl::from_value);

        let details = match getter.and_then(|get| get.type_details()) {
            Some(details) => Some(details),
            None => setter
                .and_then(|set| set.parameters().first())
                .and_then(|parameter| parameter.get("type"))
                .filter(|details| details.is_object()),
        };
        let ty = self.resolve_optional_type(details, Position::TypeAnnotation)?;

        // Comments usually sit on the signatures rather than the accessor itself.
        let comment = decl
            .comment()
            .or_else(|| getter.and_then(|get| get.comment()))
            .or_else(|| setter.and_then(|set| set.comment()));
        let flags = decl.flags();

        Ok(Mirror::Property(PropertyMirror {
            name: decl.name().to_owned(),
            decl_id: Some(decl.id()),
            flags,
            comment: DocComment::from_raw(comment),
            ty,
            default_value: None,
            readable: getter.is_some(),
            writeable: setter.is_some(),
            is_static: flags.is_static,
            is_optional: flags.is_optional,
            is_accessor: true,
        }))
    }

    fn build_callable(&mut self, decl: RawDecl<'a>, kind: DeclKind) -> Result<Mirror> {
        let kind = match kind {
            DeclKind::Method => CallableKind::Method,
            DeclKind::Constructor => CallableKind::Constructor,
            _ => CallableKind::Function,
        };

        let raw_signatures: Vec<RawDecl<'a>> = decl
            .signatures()
            .unwrap_or_default()
            .iter()
            .filter_map(RawDecl::from_value)
            .collect();
        let mut signatures = Vec::with_capacity(raw_signatures.len());
        for signature in &raw_signatures {
            signatures.push(self.build_signature(*signature)?);
        }

        let comment = decl
            .comment()
            .or_else(|| raw_signatures.first().and_then(|first| first.comment()));

        Ok(Mirror::Callable(CallableMirror {
            name: decl.name().to_owned(),
            decl_id: Some(decl.id()),
            kind,
            flags: decl.flags(),
            comment: DocComment::from_raw(comment),
            signatures,
            type_arguments: self.resolve_types(decl.type_arguments(), Position::TypeAnnotation)?,
        }))
    }

    fn build_signature(&mut self, signature: RawDecl<'a>) -> Result<CallableSignature> {
        let mut parameters = Vec::new();
        for value in signature.parameters() {
            let Some(parameter) = RawDecl::from_value(value) else {
                self.record(Diagnostic::UnrecognizedDeclaration {
                    id: None,
                    kind_string: None,
                });
                continue;
            };
            let ty = self.resolve_optional_type(parameter.type_details(), Position::TypeAnnotation)?;
            let name = parameter.name();
            parameters.push(Parameter {
                name: (!name.is_empty()).then(|| name.to_owned()),
                ty,
                is_optional: parameter.flags().is_optional,
                default_value: parameter.default_value().map(str::to_owned),
                comment: DocComment::from_raw(parameter.comment()),
            });
        }

        Ok(CallableSignature {
            comment: DocComment::from_raw(signature.comment()),
            type_parameters: signature.type_parameter_names(),
            parameters,
            return_type: self
                .resolve_optional_type(signature.type_details(), Position::TypeAnnotation)?,
        })
    }
}
