use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::builder::{Builder, Builtins};
use crate::diagnostics::Diagnostic;
use crate::error::{ReflectError, Result};
use crate::mirror::{ClassMirror, Mirror, NamespaceMirror};
use crate::options::ReflectOptions;
use crate::raw::DeclId;
use crate::table::MirrorId;

/// Read-only view over one resolved declaration tree.
///
/// All mirrors are built when the reflector is created and never change afterwards. Mirrors
/// refer to each other by [`MirrorId`]; [`Reflector::mirror`] turns an id back into a mirror.
/// Identity is per reflector: ids from one reflector mean nothing to another.
#[derive(Debug)]
pub struct Reflector {
    mirrors: Vec<Mirror>,
    modules: Vec<MirrorId>,
    modules_by_name: IndexMap<String, MirrorId>,
    declarations: FxHashMap<DeclId, MirrorId>,
    builtins: Builtins,
    diagnostics: Vec<Diagnostic>,
    options: ReflectOptions,
}

impl Reflector {
    /// Resolve an in-memory declaration tree with default options.
    pub fn from_value(root: &Value) -> Result<Self> {
        Self::from_value_with_options(root, ReflectOptions::default())
    }

    /// Resolve an in-memory declaration tree.
    pub fn from_value_with_options(root: &Value, options: ReflectOptions) -> Result<Self> {
        if !root.is_object() {
            return Err(ReflectError::InvalidRoot {
                details: "expected a JSON object".to_owned(),
            });
        }

        let mut builder = Builder::new(root, &options);
        builder.build_modules(root)?;
        let resolution = builder.finish()?;

        let mut modules_by_name = IndexMap::new();
        for &module in &resolution.modules {
            if let Some(name) = resolution.mirrors[module.index()].name() {
                // First module with a given name wins.
                modules_by_name.entry(name.to_owned()).or_insert(module);
            }
        }

        tracing::debug!(
            modules = resolution.modules.len(),
            mirrors = resolution.mirrors.len(),
            diagnostics = resolution.diagnostics.len(),
            "resolved declaration tree"
        );

        Ok(Self {
            mirrors: resolution.mirrors,
            modules: resolution.modules,
            modules_by_name,
            declarations: resolution.declarations,
            builtins: resolution.builtins,
            diagnostics: resolution.diagnostics,
            options,
        })
    }

    /// Parse and resolve a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self> {
        Self::from_json_str_with_options(source, ReflectOptions::default())
    }

    pub fn from_json_str_with_options(source: &str, options: ReflectOptions) -> Result<Self> {
        let root: Value =
            serde_json::from_str(source).map_err(|error| ReflectError::Json { path: None, error })?;
        Self::from_value_with_options(&root, options)
    }

    /// Read, parse and resolve a JSON document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_path_with_options(path, ReflectOptions::default())
    }

    pub fn from_path_with_options(path: impl AsRef<Path>, options: ReflectOptions) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|error| ReflectError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        let root: Value = serde_json::from_str(&source).map_err(|error| ReflectError::Json {
            path: Some(path.to_path_buf()),
            error,
        })?;
        Self::from_value_with_options(&root, options)
    }

    /// Local names of the top-level modules, in input order.
    pub fn module_names(&self) -> Vec<&str> {
        self.modules
            .iter()
            .filter_map(|&module| self.mirror(module).name())
            .collect()
    }

    /// Ids of the top-level modules, in input order.
    pub fn module_ids(&self) -> &[MirrorId] {
        &self.modules
    }

    /// The top-level modules, in input order.
    pub fn modules(&self) -> impl Iterator<Item = &NamespaceMirror> + '_ {
        self.modules
            .iter()
            .filter_map(|&module| self.mirror(module).as_namespace_like())
    }

    /// Id of the module called exactly `name`.
    pub fn module_id(&self, name: &str) -> Result<MirrorId> {
        self.modules_by_name
            .get(name)
            .copied()
            .ok_or_else(|| ReflectError::ModuleNotFound {
                name: name.to_owned(),
            })
    }

    /// Reflect on the module called exactly `name`.
    pub fn describe_module(&self, name: &str) -> Result<&NamespaceMirror> {
        let id = self.module_id(name)?;
        self.mirror(id)
            .as_namespace_like()
            .ok_or_else(|| ReflectError::invariant(format!("module {id} is not namespace-like")))
    }

    /// Every class called `name` in any module's class partition.
    ///
    /// Nested namespaces are not searched.
    pub fn find_classes_by_name(&self, name: &str) -> Vec<&ClassMirror> {
        self.find_class_ids_by_name(name)
            .into_iter()
            .filter_map(|id| self.mirror(id).as_class())
            .collect()
    }

    /// Ids of every class called `name` in any module's class partition.
    pub fn find_class_ids_by_name(&self, name: &str) -> Vec<MirrorId> {
        self.modules()
            .flat_map(|module| module.classes.iter().copied())
            .filter(|&class| self.mirror(class).name() == Some(name))
            .collect()
    }

    /// The mirror behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this reflector.
    pub fn mirror(&self, id: MirrorId) -> &Mirror {
        &self.mirrors[id.index()]
    }

    pub fn get(&self, id: MirrorId) -> Option<&Mirror> {
        self.mirrors.get(id.index())
    }

    /// Mirror built for the declaration with the given source-tree id, if it was reached.
    pub fn mirror_for_declaration(&self, decl: DeclId) -> Option<MirrorId> {
        self.declarations.get(&decl).copied()
    }

    /// Every mirror with its id, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (MirrorId, &Mirror)> + '_ {
        self.mirrors
            .iter()
            .enumerate()
            .map(|(index, mirror)| (MirrorId::new(index as u32), mirror))
    }

    pub fn mirror_count(&self) -> usize {
        self.mirrors.len()
    }

    /// Findings recorded while resolving, in discovery order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn options(&self) -> &ReflectOptions {
        &self.options
    }

    pub fn builtin_any(&self) -> MirrorId {
        self.builtins.any
    }

    pub fn builtin_undefined(&self) -> MirrorId {
        self.builtins.undefined
    }

    pub fn builtin_void(&self) -> MirrorId {
        self.builtins.void
    }

    pub fn builtin_string(&self) -> MirrorId {
        self.builtins.string
    }

    pub fn builtin_number(&self) -> MirrorId {
        self.builtins.number
    }

    pub fn builtin_boolean(&self) -> MirrorId {
        self.builtins.boolean
    }

    /// The fallback for anything that could not be resolved.
    pub fn builtin_unknown(&self) -> MirrorId {
        self.builtins.unknown
    }
}
