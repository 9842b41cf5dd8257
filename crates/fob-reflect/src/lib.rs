#![deny(clippy::all)]
// fob-reflect reads declaration trees with std::fs in `Reflector::from_path`
#![allow(clippy::disallowed_methods)]

//! Typed, cross-referenced mirrors over TypeDoc declaration trees.
//!
//! This crate provides:
//! - A structural classifier for loosely-typed declaration nodes.
//! - A resolution table that gives every declaration exactly one mirror, so cyclic
//!   references (a class property typed as the class itself, mutually recursive
//!   interfaces) resolve to a finite graph.
//! - A resolver for compound type expressions (arrays, unions, intersections, literals,
//!   reflections, type operators).
//! - The [`Reflector`] facade for querying the resulting mirror graph.
//!
//! ```rust
//! use fob_reflect::Reflector;
//! use serde_json::json;
//!
//! let tree = json!({
//!     "id": 0, "name": "app", "kind": 0, "flags": {},
//!     "children": [{
//!         "id": 1, "name": "\"widgets\"", "kind": 1, "kindString": "External module",
//!         "originalName": "src/widgets.ts",
//!         "children": [{ "id": 2, "name": "Button", "kind": 128, "kindString": "Class" }]
//!     }]
//! });
//!
//! let reflector = Reflector::from_value(&tree).unwrap();
//! let module = reflector.describe_module("\"widgets\"").unwrap();
//! assert!(reflector.mirror(module.classes[0]).is_class());
//! assert_eq!(reflector.find_classes_by_name("Button").len(), 1);
//! ```

mod builder;
pub mod classify;
pub mod diagnostics;
pub mod error;
pub mod mirror;
pub mod options;
pub mod raw;
pub mod reflector;
mod table;
mod types;

pub use classify::{classify, DeclKind, Position};
pub use diagnostics::Diagnostic;
pub use error::{ReflectError, Result};
pub use mirror::{
    ArrayMirror, CallableKind, CallableMirror, CallableSignature, ClassMirror, CommentTag,
    CompoundMirror, DocComment, EnumMember, EnumMirror, ExternalTypeReference, IndexSignature,
    InterfaceLikeMirror, Mirror, MirrorKind, NamespaceMirror, Parameter, PrimitiveMirror,
    PropertyMirror, StringLiteralMirror, TypeAliasMirror, TypeOperatorMirror,
    TypeOperatorTarget, TypeParameterMirror,
};
pub use options::ReflectOptions;
pub use raw::{DeclId, Flags, KindString, RawDecl};
pub use reflector::Reflector;
pub use table::MirrorId;
