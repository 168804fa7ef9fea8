//! Extension field declarations.

use prost_types::FieldDescriptorProto;

use crate::alias::RUNTIME_ALIAS;
use crate::error::Result;
use crate::printer::Printer;
use crate::type_map::{TypeMapper, to_camel_case};

/// Emit one extension as an `ExtensionFieldInfo` constant.
///
/// Both the extendee and the value type go through the same local/foreign
/// resolution as any other reference.
pub(crate) fn emit_extension(
    p: &mut Printer,
    types: &mut TypeMapper<'_>,
    ext: &FieldDescriptorProto,
) -> Result<()> {
    let extendee = types.type_ref(ext.extendee())?;
    let value = types.field_type(ext)?.accessor_expr();

    p.line(format!("/** Extends {{@link {extendee}}}. */"));
    p.line(format!(
        "export const {}: {RUNTIME_ALIAS}.ExtensionFieldInfo<{value}>;",
        to_camel_case(ext.name())
    ));
    Ok(())
}
