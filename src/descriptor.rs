//! Loading protobuf descriptor sets.
//!
//! Descriptors come from `protoc`, either as a plugin request on stdin (see
//! [`crate::plugin`]) or as a serialized `FileDescriptorSet` written with
//! `protoc --include_imports --descriptor_set_out=<path>`. Parsing `.proto`
//! text is left to `protoc`.

use std::path::Path;

use prost::Message;
use prost_types::FileDescriptorSet;

use crate::error::{Error, Result};

/// Decode a binary `FileDescriptorSet`.
pub fn decode_descriptor_set(bytes: &[u8]) -> Result<FileDescriptorSet> {
    Ok(FileDescriptorSet::decode(bytes)?)
}

/// Load a binary `FileDescriptorSet` from disk.
///
/// The set should include imports, otherwise references into dependencies
/// cannot be resolved.
pub fn load_descriptor_set(path: &Path) -> Result<FileDescriptorSet> {
    let bytes = std::fs::read(path).map_err(|e| Error::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    decode_descriptor_set(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost_types::{DescriptorProto, FileDescriptorProto};

    fn sample_set() -> FileDescriptorSet {
        FileDescriptorSet {
            file: vec![FileDescriptorProto {
                name: Some("acme/user.proto".to_string()),
                package: Some("acme".to_string()),
                message_type: vec![DescriptorProto {
                    name: Some("User".to_string()),
                    ..Default::default()
                }],
                ..Default::default()
            }],
        }
    }

    #[test]
    fn decode_encoded_set() {
        let bytes = sample_set().encode_to_vec();
        let set = decode_descriptor_set(&bytes).unwrap();
        assert_eq!(set.file.len(), 1);
        assert_eq!(set.file[0].name(), "acme/user.proto");
        assert_eq!(set.file[0].message_type[0].name(), "User");
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = decode_descriptor_set(&[0xff, 0xff, 0xff]).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_descriptor_set(Path::new("/nonexistent/descriptors.pb")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/descriptors.pb"));
    }
}
