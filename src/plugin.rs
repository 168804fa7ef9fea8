//! protoc plugin protocol.
//!
//! `protoc --plugin=protoc-gen-tsd --tsd_out=<dir> --tsd_opt=service=false`
//! writes a `CodeGeneratorRequest` to the plugin's stdin and reads a
//! `CodeGeneratorResponse` from its stdout. Generation failures are reported
//! in the response's `error` field rather than through the exit status.

use prost::Message;
use prost_types::compiler::code_generator_response::{Feature, File};
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};

use crate::codegen::{self, GeneratorOptions};
use crate::error::{Error, Result};

/// Parse the comma-separated `key=value` parameter string.
///
/// Recognized keys: `service` (`true`/`false`).
pub fn parse_parameter(parameter: &str) -> Result<GeneratorOptions> {
    let mut options = GeneratorOptions::default();

    for part in parameter.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = part.split_once('=').unwrap_or((part, "true"));
        match key.trim() {
            "service" => {
                options.services = match value.trim() {
                    "true" => true,
                    "false" => false,
                    other => {
                        return Err(Error::Parameter(format!(
                            "service expects true or false, got '{other}'"
                        )));
                    }
                }
            }
            other => return Err(Error::Parameter(format!("unknown option '{other}'"))),
        }
    }

    Ok(options)
}

/// Answer one request. Never fails: errors go into the response.
pub fn handle(request: &CodeGeneratorRequest) -> CodeGeneratorResponse {
    let supported_features = Some(Feature::Proto3Optional as u64);

    match respond(request) {
        Ok(file) => CodeGeneratorResponse {
            supported_features,
            file,
            ..Default::default()
        },
        Err(e) => {
            tracing::error!(error = %e, "generation failed");
            CodeGeneratorResponse {
                error: Some(e.to_string()),
                supported_features,
                ..Default::default()
            }
        }
    }
}

fn respond(request: &CodeGeneratorRequest) -> Result<Vec<File>> {
    let options = parse_parameter(request.parameter())?;
    let generated = codegen::generate(&request.proto_file, &request.file_to_generate, &options)?;

    Ok(generated
        .files
        .into_iter()
        .map(|f| File {
            name: Some(f.name),
            content: Some(f.content),
            ..Default::default()
        })
        .collect())
}

/// Decode a serialized request, handle it, and encode the response.
pub fn run(input: &[u8]) -> Result<Vec<u8>> {
    let request = CodeGeneratorRequest::decode(input)?;
    Ok(handle(&request).encode_to_vec())
}
