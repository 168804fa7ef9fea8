//! Namespace aliases for imported declaration modules.
//!
//! Every `.proto` file that is imported by generated code is bound to a
//! TypeScript identifier (`import * as acme_user_pb from "..."`). The alias is
//! a pure function of the file path, so the same file gets the same alias in
//! every generated artifact and across runs.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Identifier under which the `google-protobuf` runtime is imported.
pub const RUNTIME_ALIAS: &str = "jspb";

/// Module the runtime identifier is imported from.
pub const RUNTIME_MODULE: &str = "google-protobuf";

const ALIAS_SUFFIX: &str = "_pb";

/// Derive the namespace alias for a `.proto` file path.
///
/// - `"user.proto"` → `"user_pb"`
/// - `"acme/api/user-v2.proto"` → `"acme_api_user_v2_pb"`
/// - `"3d/mesh.proto"` → `"_3d_mesh_pb"`
///
/// The `_pb` suffix keeps aliases disjoint from [`RUNTIME_ALIAS`].
pub fn alias_for(file_path: &str) -> String {
    let stem = file_path.strip_suffix(".proto").unwrap_or(file_path);
    let mut alias: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if alias.starts_with(|c: char| c.is_ascii_digit()) {
        alias.insert(0, '_');
    }
    alias.push_str(ALIAS_SUFFIX);
    alias
}

/// Aliases for every file in one run, checked for collisions up front.
#[derive(Debug, Default)]
pub struct AliasTable {
    by_path: BTreeMap<String, String>,
}

impl AliasTable {
    /// Build the table over all file paths of a run.
    ///
    /// Fails with [`Error::AliasCollision`] if two distinct paths derive the
    /// same alias. Repeated paths are fine.
    pub fn build<'a>(paths: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let mut by_path = BTreeMap::new();
        let mut by_alias: BTreeMap<String, &str> = BTreeMap::new();

        for path in paths {
            if by_path.contains_key(path) {
                continue;
            }
            let alias = alias_for(path);
            if let Some(first) = by_alias.get(&alias) {
                return Err(Error::AliasCollision {
                    alias,
                    first: first.to_string(),
                    second: path.to_string(),
                });
            }
            by_alias.insert(alias.clone(), path);
            by_path.insert(path.to_string(), alias);
        }

        Ok(Self { by_path })
    }

    /// Alias for `path`.
    ///
    /// Paths outside the table fall back to [`alias_for`], which yields the
    /// same value the table would have cached.
    pub fn alias(&self, path: &str) -> String {
        self.by_path
            .get(path)
            .cloned()
            .unwrap_or_else(|| alias_for(path))
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}
