//! Global symbol table over every message and enum in a descriptor set.
//!
//! Built once per run before any file is synthesized, since any file may
//! refer to types defined in any other. Entries hold owned path strings and
//! kind tags only, so the table outlives nothing it was built from.

use std::collections::BTreeMap;

use prost_types::field_descriptor_proto::Type;
use prost_types::field_options::JsType;
use prost_types::{DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorProto};

use crate::error::{Error, Result};

/// Where a fully-qualified type is defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportEntry {
    /// Path of the defining `.proto` file.
    pub file: String,
    /// Package of the defining file (may be empty).
    pub package: String,
    /// Dotted name within the defining file, e.g. `Outer.Inner`.
    pub local_path: String,
    pub kind: ExportKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportKind {
    Message {
        /// Present for the synthetic `FooEntry` messages backing map fields.
        map_entry: Option<MapEntry>,
    },
    Enum,
}

/// Key and value of a map-entry message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry {
    pub key: ValueRef,
    pub value: ValueRef,
}

/// A detached copy of the type-relevant bits of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueRef {
    pub kind: Type,
    /// Fully-qualified name for message/enum kinds, empty otherwise.
    pub type_name: String,
    pub js_string: bool,
}

impl ValueRef {
    pub fn from_field(field: &FieldDescriptorProto) -> Self {
        Self {
            kind: field.r#type(),
            type_name: field.type_name().to_string(),
            js_string: field
                .options
                .as_ref()
                .is_some_and(|o| o.jstype() == JsType::JsString),
        }
    }
}

/// Fully-qualified type name → defining file and local path.
#[derive(Debug, Default)]
pub struct ExportMap {
    entries: BTreeMap<String, ExportEntry>,
}

impl ExportMap {
    /// Walk every file's message and enum trees, including nested types.
    pub fn build(files: &[FileDescriptorProto]) -> Self {
        let mut map = Self::default();
        for file in files {
            let scope = Scope {
                file: file.name(),
                package: file.package(),
            };
            for message in &file.message_type {
                map.add_message(&scope, "", message);
            }
            for enum_type in &file.enum_type {
                map.add_enum(&scope, "", enum_type);
            }
        }
        map
    }

    fn add_message(&mut self, scope: &Scope<'_>, parent: &str, message: &DescriptorProto) {
        let local_path = join(parent, message.name());

        let map_entry = message
            .options
            .as_ref()
            .is_some_and(|o| o.map_entry())
            .then(|| map_entry_of(message))
            .flatten();

        self.insert(scope, &local_path, ExportKind::Message { map_entry });

        for nested in &message.nested_type {
            self.add_message(scope, &local_path, nested);
        }
        for enum_type in &message.enum_type {
            self.add_enum(scope, &local_path, enum_type);
        }
    }

    fn add_enum(&mut self, scope: &Scope<'_>, parent: &str, enum_type: &EnumDescriptorProto) {
        let local_path = join(parent, enum_type.name());
        self.insert(scope, &local_path, ExportKind::Enum);
    }

    fn insert(&mut self, scope: &Scope<'_>, local_path: &str, kind: ExportKind) {
        let full_name = join(scope.package, local_path);
        self.entries.entry(full_name).or_insert_with(|| ExportEntry {
            file: scope.file.to_string(),
            package: scope.package.to_string(),
            local_path: local_path.to_string(),
            kind,
        });
    }

    /// Resolve a type reference as it appears on a field or method.
    ///
    /// Accepts names with or without the leading `.` that descriptors use
    /// for fully-qualified references. `referenced_from` names the file
    /// being synthesized, for the error report.
    pub fn resolve(&self, type_name: &str, referenced_from: &str) -> Result<&ExportEntry> {
        let name = type_name.strip_prefix('.').unwrap_or(type_name);
        self.entries.get(name).ok_or_else(|| Error::Resolution {
            type_name: name.to_string(),
            file: referenced_from.to_string(),
        })
    }

    /// Non-failing lookup.
    pub fn get(&self, type_name: &str) -> Option<&ExportEntry> {
        let name = type_name.strip_prefix('.').unwrap_or(type_name);
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct Scope<'a> {
    file: &'a str,
    package: &'a str,
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn map_entry_of(message: &DescriptorProto) -> Option<MapEntry> {
    let key = message.field.iter().find(|f| f.number() == 1)?;
    let value = message.field.iter().find(|f| f.number() == 2)?;
    Some(MapEntry {
        key: ValueRef::from_field(key),
        value: ValueRef::from_field(value),
    })
}
