//! Well-known types shipped with the `google-protobuf` runtime.
//!
//! Imports of these files point at the runtime package rather than at
//! generated output under the output root.

/// The closed set of well-known schema files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WellKnownFile {
    Any,
    Api,
    CompilerPlugin,
    Descriptor,
    Duration,
    Empty,
    FieldMask,
    SourceContext,
    Struct,
    Timestamp,
    Type,
    Wrappers,
}

impl WellKnownFile {
    pub const ALL: [WellKnownFile; 12] = [
        WellKnownFile::Any,
        WellKnownFile::Api,
        WellKnownFile::CompilerPlugin,
        WellKnownFile::Descriptor,
        WellKnownFile::Duration,
        WellKnownFile::Empty,
        WellKnownFile::FieldMask,
        WellKnownFile::SourceContext,
        WellKnownFile::Struct,
        WellKnownFile::Timestamp,
        WellKnownFile::Type,
        WellKnownFile::Wrappers,
    ];

    /// Look up a schema file path.
    pub fn from_path(path: &str) -> Option<Self> {
        let file = match path {
            "google/protobuf/any.proto" => WellKnownFile::Any,
            "google/protobuf/api.proto" => WellKnownFile::Api,
            "google/protobuf/compiler/plugin.proto" => WellKnownFile::CompilerPlugin,
            "google/protobuf/descriptor.proto" => WellKnownFile::Descriptor,
            "google/protobuf/duration.proto" => WellKnownFile::Duration,
            "google/protobuf/empty.proto" => WellKnownFile::Empty,
            "google/protobuf/field_mask.proto" => WellKnownFile::FieldMask,
            "google/protobuf/source_context.proto" => WellKnownFile::SourceContext,
            "google/protobuf/struct.proto" => WellKnownFile::Struct,
            "google/protobuf/timestamp.proto" => WellKnownFile::Timestamp,
            "google/protobuf/type.proto" => WellKnownFile::Type,
            "google/protobuf/wrappers.proto" => WellKnownFile::Wrappers,
            _ => return None,
        };
        Some(file)
    }

    /// Runtime module that provides this file's declarations.
    pub fn import_target(self) -> &'static str {
        match self {
            WellKnownFile::Any => "google-protobuf/google/protobuf/any_pb",
            WellKnownFile::Api => "google-protobuf/google/protobuf/api_pb",
            WellKnownFile::CompilerPlugin => "google-protobuf/google/protobuf/compiler/plugin_pb",
            WellKnownFile::Descriptor => "google-protobuf/google/protobuf/descriptor_pb",
            WellKnownFile::Duration => "google-protobuf/google/protobuf/duration_pb",
            WellKnownFile::Empty => "google-protobuf/google/protobuf/empty_pb",
            WellKnownFile::FieldMask => "google-protobuf/google/protobuf/field_mask_pb",
            WellKnownFile::SourceContext => "google-protobuf/google/protobuf/source_context_pb",
            WellKnownFile::Struct => "google-protobuf/google/protobuf/struct_pb",
            WellKnownFile::Timestamp => "google-protobuf/google/protobuf/timestamp_pb",
            WellKnownFile::Type => "google-protobuf/google/protobuf/type_pb",
            WellKnownFile::Wrappers => "google-protobuf/google/protobuf/wrappers_pb",
        }
    }
}

/// Import target for `file_path`: the runtime module for well-known files,
/// otherwise `computed_path` unchanged.
pub fn resolve_import_target(file_path: &str, computed_path: String) -> String {
    match WellKnownFile::from_path(file_path) {
        Some(file) => file.import_target().to_string(),
        None => computed_path,
    }
}
