//! Generate TypeScript declarations from Protocol Buffer descriptors.
//!
//! `protoc-gen-tsd` takes the descriptors `protoc` produces and writes, for
//! each `.proto` file, a `.d.ts` file describing the `google-protobuf`
//! JavaScript classes for its messages, enums and extensions, plus a
//! `_service.d.ts` file describing its services.
//!
//! # Features
//!
//! - Runs as a `protoc` plugin or from a `FileDescriptorSet` on disk
//! - Resolves type references across files through one global symbol table
//! - Imports each dependency under a stable, collision-checked alias
//! - Routes well-known types (`google/protobuf/*.proto`) to the runtime package
//! - Deterministic output: byte-identical across runs
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! use protoc_gen_tsd::codegen::{self, GeneratorOptions};
//!
//! let set = protoc_gen_tsd::descriptor::load_descriptor_set(Path::new("descriptors.pb"))?;
//! let generated = codegen::generate(
//!     &set.file,
//!     &["acme/user.proto".to_string()],
//!     &GeneratorOptions::default(),
//! )?;
//! codegen::write_files(Path::new("out/"), &generated.files)?;
//! eprintln!("Generated {} files", generated.files.len());
//! # Ok::<(), protoc_gen_tsd::error::Error>(())
//! ```

pub mod alias;
pub mod codegen;
pub mod descriptor;
pub mod error;
pub mod export_map;
pub mod paths;
pub mod plugin;
pub mod printer;
pub mod type_map;
pub mod well_known;
