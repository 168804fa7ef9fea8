//! Service descriptors: one class per service and one per method.
//!
//! ```text
//! export class Greeter {
//!   static serviceName = "demo.Greeter";
//! }
//! export namespace Greeter {
//!   export class SayHello {
//!     static readonly methodName = "SayHello";
//!     static readonly service = Greeter;
//!     static readonly requestStream = false;
//!     static readonly responseStream = false;
//!     static readonly requestType = demo_pb.HelloRequest;
//!     static readonly responseType = demo_pb.HelloReply;
//!   }
//! }
//! ```

use prost_types::ServiceDescriptorProto;

use crate::error::Result;
use crate::printer::Printer;
use crate::type_map::TypeMapper;

pub(crate) fn emit_service(
    p: &mut Printer,
    types: &mut TypeMapper<'_>,
    package: &str,
    service: &ServiceDescriptorProto,
) -> Result<()> {
    let name = service.name();
    let qualified = if package.is_empty() {
        name.to_string()
    } else {
        format!("{package}.{name}")
    };

    p.open(format!("export class {name}"));
    p.line(format!("static serviceName = \"{qualified}\";"));
    p.close();

    p.open(format!("export namespace {name}"));
    for method in &service.method {
        let request = types.type_ref(method.input_type())?;
        let response = types.type_ref(method.output_type())?;

        p.open(format!("export class {}", method.name()));
        p.line(format!("static readonly methodName = \"{}\";", method.name()));
        p.line(format!("static readonly service = {name};"));
        p.line(format!(
            "static readonly requestStream = {};",
            method.client_streaming()
        ));
        p.line(format!(
            "static readonly responseStream = {};",
            method.server_streaming()
        ));
        p.line(format!("static readonly requestType = {request};"));
        p.line(format!("static readonly responseType = {response};"));
        p.close();
    }
    p.close();

    Ok(())
}
