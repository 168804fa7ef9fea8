//! Mapping from `.proto` file paths to generated module paths.
//!
//! | Schema path | `path_to_root` | `output_path` |
//! |-------------|----------------|---------------|
//! | `user.proto` | `./` | `user_pb` |
//! | `acme/api/user.proto` | `../../` | `acme/api/user_pb` |

const PROTO_EXTENSION: &str = ".proto";

/// Relative prefix from the generated file for `file_path` back to the
/// output root.
///
/// One `../` per path separator; a file at the root gets `./`.
pub fn path_to_root(file_path: &str) -> String {
    let depth = file_path.matches('/').count();
    if depth == 0 {
        "./".to_string()
    } else {
        "../".repeat(depth)
    }
}

/// Logical module path of the generated declarations for `file_path`,
/// without any file extension.
pub fn output_path(file_path: &str) -> String {
    let stem = file_path.strip_suffix(PROTO_EXTENSION).unwrap_or(file_path);
    format!("{stem}_pb")
}

/// File name of the declarations artifact.
pub fn declarations_file(file_path: &str) -> String {
    format!("{}.d.ts", output_path(file_path))
}

/// File name of the services artifact.
pub fn services_file(file_path: &str) -> String {
    format!("{}_service.d.ts", output_path(file_path))
}
