//! Enum declarations.

use prost_types::EnumDescriptorProto;

use crate::printer::Printer;

/// Emit `enum_type` as a TypeScript enum, values in declaration order.
pub(crate) fn emit_enum(p: &mut Printer, enum_type: &EnumDescriptorProto) {
    p.open(format!("export enum {}", enum_type.name()));
    for value in &enum_type.value {
        p.line(format!("{} = {},", value.name(), value.number()));
    }
    p.close();
}
