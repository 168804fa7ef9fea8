//! Maps protobuf field types to TypeScript type expressions.
//!
//! # Type Mapping Table
//!
//! | Proto type | TypeScript type | Notes |
//! |-----------|-----------------|-------|
//! | `double`, `float`, `int32`, `uint32`, `sint32`, `fixed32`, `sfixed32` | `number` | |
//! | `int64`, `uint64`, `sint64`, `fixed64`, `sfixed64` | `number` | `string` with `[jstype = JS_STRING]` |
//! | `bool` | `boolean` | |
//! | `string` | `string` | |
//! | `bytes` | `Uint8Array \| string` | |
//! | message, group, enum | qualified reference | Resolved through [`ExportMap`] |
//!
//! A reference to a type defined in the file being emitted is written bare
//! (`Outer.Inner`); anything else is qualified with the defining file's alias
//! (`acme_user_pb.Outer.Inner`) and that file is recorded as an import.

use std::collections::BTreeSet;

use prost_types::FieldDescriptorProto;
use prost_types::field_descriptor_proto::{Label, Type};

use crate::alias::{AliasTable, RUNTIME_ALIAS};
use crate::error::Result;
use crate::export_map::{ExportKind, ExportMap, ValueRef};

/// TypeScript type for a scalar protobuf kind.
///
/// Returns `None` for message, group and enum kinds, which need resolution.
pub fn scalar_ts_type(kind: Type, js_string: bool) -> Option<&'static str> {
    let ts = match kind {
        Type::Double | Type::Float => "number",
        Type::Int32 | Type::Uint32 | Type::Sint32 | Type::Fixed32 | Type::Sfixed32 => "number",
        Type::Int64 | Type::Uint64 | Type::Sint64 | Type::Fixed64 | Type::Sfixed64 => {
            if js_string {
                "string"
            } else {
                "number"
            }
        }
        Type::Bool => "boolean",
        Type::String => "string",
        Type::Bytes => "Uint8Array | string",
        Type::Message | Type::Group | Type::Enum => return None,
    };
    Some(ts)
}

/// What an element type expression refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Scalar,
    Bytes,
    Message,
    Enum,
}

/// A resolved element type: a scalar, or a message/enum reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub expr: String,
    pub kind: ElementKind,
}

impl Element {
    /// Type of this element in the plain-object (`AsObject`) form.
    pub fn object_expr(&self) -> String {
        match self.kind {
            ElementKind::Message => format!("{}.AsObject", self.expr),
            _ => self.expr.clone(),
        }
    }
}

/// Cardinality wrapper around an element type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Singular,
    Repeated,
    Map { key: Element },
}

/// Fully resolved type of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldType {
    pub element: Element,
    pub shape: Shape,
}

impl FieldType {
    /// Type returned by the field's getter.
    pub fn accessor_expr(&self) -> String {
        match &self.shape {
            Shape::Singular => self.element.expr.clone(),
            Shape::Repeated => format!("Array<{}>", self.element.expr),
            Shape::Map { key } => {
                format!("{RUNTIME_ALIAS}.Map<{}, {}>", key.expr, self.element.expr)
            }
        }
    }

    /// Type of the field in the plain-object form.
    pub fn object_expr(&self) -> String {
        match &self.shape {
            Shape::Singular => self.element.object_expr(),
            Shape::Repeated => format!("Array<{}>", self.element.object_expr()),
            Shape::Map { key } => {
                format!("Array<[{}, {}]>", key.expr, self.element.object_expr())
            }
        }
    }

    pub fn is_message(&self) -> bool {
        self.element.kind == ElementKind::Message
    }
}

/// Resolves type references on behalf of one generated artifact.
///
/// Every foreign file a reference lands in is remembered, so the caller can
/// check that each one is imported exactly once.
#[derive(Debug)]
pub struct TypeMapper<'a> {
    exports: &'a ExportMap,
    aliases: &'a AliasTable,
    referencing_file: &'a str,
    local: bool,
    foreign_files: BTreeSet<String>,
}

impl<'a> TypeMapper<'a> {
    /// Mapper for an artifact that contains `referencing_file`'s own
    /// declarations; references into that file are written bare.
    pub fn new(exports: &'a ExportMap, aliases: &'a AliasTable, referencing_file: &'a str) -> Self {
        Self {
            exports,
            aliases,
            referencing_file,
            local: true,
            foreign_files: BTreeSet::new(),
        }
    }

    /// Mapper for an artifact that imports `referencing_file`'s declarations
    /// rather than containing them; every reference is aliased.
    pub fn detached(
        exports: &'a ExportMap,
        aliases: &'a AliasTable,
        referencing_file: &'a str,
    ) -> Self {
        Self {
            local: false,
            ..Self::new(exports, aliases, referencing_file)
        }
    }

    /// Type expression for a message or enum reference such as `.acme.User`.
    pub fn type_ref(&mut self, type_name: &str) -> Result<String> {
        let entry = self.exports.resolve(type_name, self.referencing_file)?;
        if self.local && entry.file == self.referencing_file {
            return Ok(entry.local_path.clone());
        }
        self.foreign_files.insert(entry.file.clone());
        Ok(format!(
            "{}.{}",
            self.aliases.alias(&entry.file),
            entry.local_path
        ))
    }

    /// Resolve the element type of a value.
    pub fn element(&mut self, value: &ValueRef) -> Result<Element> {
        let element = match value.kind {
            Type::Message | Type::Group => Element {
                expr: self.type_ref(&value.type_name)?,
                kind: ElementKind::Message,
            },
            Type::Enum => Element {
                expr: self.type_ref(&value.type_name)?,
                kind: ElementKind::Enum,
            },
            Type::Bytes => Element {
                expr: "Uint8Array | string".to_string(),
                kind: ElementKind::Bytes,
            },
            scalar => Element {
                expr: scalar_ts_type(scalar, value.js_string)
                    .unwrap_or("number")
                    .to_string(),
                kind: ElementKind::Scalar,
            },
        };
        Ok(element)
    }

    /// Resolve a field's full type, including repeated and map wrapping.
    pub fn field_type(&mut self, field: &FieldDescriptorProto) -> Result<FieldType> {
        if field.label() == Label::Repeated && field.r#type() == Type::Message {
            let entry = self.exports.resolve(field.type_name(), self.referencing_file)?;
            if let ExportKind::Message {
                map_entry: Some(map_entry),
            } = &entry.kind
            {
                let key = self.element(&map_entry.key)?;
                let value = self.element(&map_entry.value)?;
                return Ok(FieldType {
                    element: value,
                    shape: Shape::Map { key },
                });
            }
        }

        let element = self.element(&ValueRef::from_field(field))?;
        let shape = if field.label() == Label::Repeated {
            Shape::Repeated
        } else {
            Shape::Singular
        };
        Ok(FieldType { element, shape })
    }

    /// Files outside the referencing file that resolved references landed in.
    pub fn foreign_files(&self) -> &BTreeSet<String> {
        &self.foreign_files
    }
}

/// Convert a snake_case field name to lowerCamelCase.
///
/// - `"user_id"` → `"userId"`
/// - `"ip_v4_address"` → `"ipV4Address"`
/// - `"already_camelCase"` → `"alreadyCamelCase"`
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper_next = false;
    for c in s.chars() {
        if c == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Convert a snake_case field name to UpperCamelCase for accessor names.
///
/// - `"user_id"` → `"UserId"`
/// - `"name"` → `"Name"`
pub fn to_upper_camel_case(s: &str) -> String {
    let camel = to_camel_case(s);
    let mut chars = camel.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// Convert a name to SCREAMING_SNAKE_CASE for oneof case constants.
///
/// - `"user_id"` → `"USER_ID"`
/// - `"userId"` → `"USERID"`
pub fn to_screaming_snake(s: &str) -> String {
    s.to_uppercase()
}
