//! Reflector configuration.

use std::path::Path;

use figment::{
    providers::{Env, Format as _, Json, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{ReflectError, Result};

/// Options controlling one resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReflectOptions {
    /// Leave top-level modules flagged `isExternal` out of `modules()`.
    ///
    /// Their declarations still resolve when referenced by id.
    pub skip_external_modules: bool,
    /// Leave members flagged `isPrivate` out of every partition and `members` list.
    pub skip_private_members: bool,
    /// Maximum nesting of type-details before a position degrades to Unknown.
    pub max_type_depth: usize,
}

impl Default for ReflectOptions {
    fn default() -> Self {
        Self {
            skip_external_modules: false,
            skip_private_members: false,
            max_type_depth: 256,
        }
    }
}

impl ReflectOptions {
    /// Load options from multiple sources.
    /// Priority: environment variables (`FOB_REFLECT_*`) > JSON file > defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            if !path.exists() {
                return Err(ReflectError::Config {
                    message: format!("options file '{}' does not exist", path.display()),
                });
            }
            figment = figment.merge(Json::file(path));
        }

        // FOB_REFLECT_MAX_TYPE_DEPTH -> max_type_depth
        figment = figment.merge(Env::prefixed("FOB_REFLECT_"));

        figment.extract().map_err(|e| ReflectError::Config {
            message: e.to_string(),
        })
    }
}
