//! Message declarations: a `jspb.Message` subclass plus a companion namespace.
//!
//! ```text
//! export class User extends jspb.Message {
//!   getName(): string;
//!   setName(value: string): void;
//!   ...
//! }
//!
//! export namespace User {
//!   export type AsObject = {
//!     name: string,
//!   }
//!   <nested messages, enums, extensions, oneof cases>
//! }
//! ```

use prost_types::field_descriptor_proto::Label;
use prost_types::{DescriptorProto, FieldDescriptorProto};

use super::{Syntax, enums, extension};
use crate::alias::RUNTIME_ALIAS;
use crate::error::Result;
use crate::printer::Printer;
use crate::type_map::{
    ElementKind, FieldType, Shape, TypeMapper, to_camel_case, to_screaming_snake,
    to_upper_camel_case,
};

struct Field<'d> {
    desc: &'d FieldDescriptorProto,
    ty: FieldType,
}

impl Field<'_> {
    /// Suffix jspb appends to accessor and property names.
    fn suffix(&self) -> &'static str {
        match self.ty.shape {
            Shape::Singular => "",
            Shape::Repeated => "List",
            Shape::Map { .. } => "Map",
        }
    }

    fn has_presence(&self, syntax: Syntax) -> bool {
        if self.desc.label() == Label::Repeated {
            return false;
        }
        self.ty.is_message()
            || self.desc.proto3_optional()
            || self.desc.oneof_index.is_some()
            || syntax != Syntax::Proto3
    }
}

/// A oneof that exists in the schema, as opposed to the synthetic oneof
/// protoc wraps around each proto3 `optional` field.
struct Oneof<'d> {
    name: &'d str,
    fields: Vec<&'d FieldDescriptorProto>,
}

fn real_oneofs(message: &DescriptorProto) -> Vec<Oneof<'_>> {
    message
        .oneof_decl
        .iter()
        .enumerate()
        .filter_map(|(index, decl)| {
            let fields: Vec<_> = message
                .field
                .iter()
                .filter(|f| f.oneof_index == Some(index as i32) && !f.proto3_optional())
                .collect();
            (!fields.is_empty()).then_some(Oneof {
                name: decl.name(),
                fields,
            })
        })
        .collect()
}

pub(crate) fn is_map_entry(message: &DescriptorProto) -> bool {
    message.options.as_ref().is_some_and(|o| o.map_entry())
}

/// Emit `message` and, inside its namespace, everything nested in it.
pub(crate) fn emit_message(
    p: &mut Printer,
    types: &mut TypeMapper<'_>,
    syntax: Syntax,
    message: &DescriptorProto,
) -> Result<()> {
    let name = message.name();
    let mut fields = Vec::with_capacity(message.field.len());
    for desc in &message.field {
        fields.push(Field {
            desc,
            ty: types.field_type(desc)?,
        });
    }
    let oneofs = real_oneofs(message);

    p.open(format!("export class {name} extends {RUNTIME_ALIAS}.Message"));
    for field in &fields {
        emit_accessors(p, field, syntax);
        p.blank();
    }
    for oneof in &oneofs {
        let case = to_upper_camel_case(oneof.name);
        p.line(format!("get{case}Case(): {name}.{case}Case;"));
    }
    emit_statics(p, message);
    p.close();
    p.blank();

    p.open(format!("export namespace {name}"));
    p.open("export type AsObject =");
    for field in &fields {
        let prop = format!("{}{}", to_camel_case(field.desc.name()), field.suffix());
        let optional = if field.ty.is_message() && field.ty.shape == Shape::Singular {
            "?"
        } else {
            ""
        };
        p.line(format!("{prop}{optional}: {},", field.ty.object_expr()));
    }
    p.close();

    for nested in message.nested_type.iter().filter(|m| !is_map_entry(m)) {
        p.blank();
        emit_message(p, types, syntax, nested)?;
    }
    for enum_type in &message.enum_type {
        p.blank();
        enums::emit_enum(p, enum_type);
    }
    for ext in &message.extension {
        p.blank();
        extension::emit_extension(p, types, ext)?;
    }
    for oneof in &oneofs {
        p.blank();
        emit_oneof_case(p, oneof);
    }
    p.close();

    Ok(())
}

fn emit_accessors(p: &mut Printer, field: &Field<'_>, syntax: Syntax) {
    let accessor = format!("{}{}", to_upper_camel_case(field.desc.name()), field.suffix());
    let element = &field.ty.element.expr;
    let full = field.ty.accessor_expr();

    match &field.ty.shape {
        Shape::Map { .. } => {
            p.line(format!("get{accessor}(): {full};"));
            p.line(format!("clear{accessor}(): void;"));
        }
        Shape::Repeated => {
            let singular = to_upper_camel_case(field.desc.name());
            p.line(format!("clear{accessor}(): void;"));
            p.line(format!("get{accessor}(): {full};"));
            if field.ty.element.kind == ElementKind::Bytes {
                p.line(format!("get{accessor}_asU8(): Array<Uint8Array>;"));
                p.line(format!("get{accessor}_asB64(): Array<string>;"));
            }
            p.line(format!("set{accessor}(value: {full}): void;"));
            if field.ty.is_message() {
                p.line(format!(
                    "add{singular}(value?: {element}, index?: number): {element};"
                ));
            } else {
                p.line(format!(
                    "add{singular}(value: {element}, index?: number): {element};"
                ));
            }
        }
        Shape::Singular => {
            if field.has_presence(syntax) {
                p.line(format!("has{accessor}(): boolean;"));
                p.line(format!("clear{accessor}(): void;"));
            }
            if field.ty.is_message() {
                p.line(format!("get{accessor}(): {element} | undefined;"));
                p.line(format!("set{accessor}(value?: {element}): void;"));
            } else {
                p.line(format!("get{accessor}(): {element};"));
                if field.ty.element.kind == ElementKind::Bytes {
                    p.line(format!("get{accessor}_asU8(): Uint8Array;"));
                    p.line(format!("get{accessor}_asB64(): string;"));
                }
                p.line(format!("set{accessor}(value: {element}): void;"));
            }
        }
    }
}

fn emit_statics(p: &mut Printer, message: &DescriptorProto) {
    let name = message.name();
    let rt = RUNTIME_ALIAS;

    p.line("serializeBinary(): Uint8Array;");
    p.line(format!("toObject(includeInstance?: boolean): {name}.AsObject;"));
    p.line(format!(
        "static toObject(includeInstance: boolean, msg: {name}): {name}.AsObject;"
    ));
    if !message.extension_range.is_empty() {
        p.line(format!(
            "static extensions: {{[key: number]: {rt}.ExtensionFieldInfo<{rt}.Message>}};"
        ));
        p.line(format!(
            "static extensionsBinary: {{[key: number]: {rt}.ExtensionFieldBinaryInfo<{rt}.Message>}};"
        ));
    }
    p.line(format!(
        "static serializeBinaryToWriter(message: {name}, writer: {rt}.BinaryWriter): void;"
    ));
    p.line(format!("static deserializeBinary(bytes: Uint8Array): {name};"));
    p.line(format!(
        "static deserializeBinaryFromReader(message: {name}, reader: {rt}.BinaryReader): {name};"
    ));
}

fn emit_oneof_case(p: &mut Printer, oneof: &Oneof<'_>) {
    let case = to_upper_camel_case(oneof.name);
    p.open(format!("export enum {case}Case"));
    p.line(format!("{}_NOT_SET = 0,", to_screaming_snake(oneof.name)));
    for field in &oneof.fields {
        p.line(format!(
            "{} = {},",
            to_screaming_snake(field.name()),
            field.number()
        ));
    }
    p.close();
}
