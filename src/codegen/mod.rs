//! TypeScript declaration synthesis from protobuf descriptors.
//!
//! For each requested `.proto` file two artifacts are produced:
//! - `<name>_pb.d.ts`: messages, extensions and enums
//! - `<name>_pb_service.d.ts`: service and method descriptors (skipped when
//!   the file declares no services)
//!
//! The symbol table and alias table are built once over the full descriptor
//! set before any file is synthesized. After that, synthesis of one file only
//! reads them, and the output is deterministic: identical input always
//! produces byte-identical output.

mod enums;
mod extension;
mod message;
mod service;

use std::collections::BTreeSet;
use std::path::Path;

use prost_types::{DescriptorProto, FileDescriptorProto};
use serde::Serialize;

use crate::alias::{AliasTable, RUNTIME_ALIAS, RUNTIME_MODULE};
use crate::error::{Error, Result};
use crate::export_map::ExportMap;
use crate::paths::{declarations_file, output_path, path_to_root, services_file};
use crate::printer::Printer;
use crate::type_map::TypeMapper;
use crate::well_known::resolve_import_target;

/// Generation settings, from the CLI or the protoc parameter string.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Emit `_pb_service.d.ts` artifacts.
    pub services: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self { services: true }
    }
}

/// Statistics collected during generation for reporting.
#[derive(Debug, Default, Serialize)]
pub struct GenerationStats {
    pub files_synthesized: usize,
    pub messages_generated: usize,
    pub enums_generated: usize,
    pub extensions_generated: usize,
    pub services_generated: usize,
    pub methods_generated: usize,
    pub artifacts_written: usize,
}

/// One generated output file, path relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub name: String,
    #[serde(skip)]
    pub content: String,
}

/// Both artifacts for one `.proto` file.
#[derive(Debug, Clone)]
pub struct SynthesizedFile {
    pub source: String,
    pub declarations: String,
    /// Empty when the file declares no services.
    pub services: String,
}

impl SynthesizedFile {
    /// Non-empty artifacts with their output paths.
    pub fn into_artifacts(self, options: &GeneratorOptions) -> Vec<GeneratedFile> {
        let mut files = vec![GeneratedFile {
            name: declarations_file(&self.source),
            content: self.declarations,
        }];
        if options.services && !self.services.is_empty() {
            files.push(GeneratedFile {
                name: services_file(&self.source),
                content: self.services,
            });
        }
        files
    }
}

/// Result of a full generation run.
#[derive(Debug, Default, Serialize)]
pub struct Generated {
    pub stats: GenerationStats,
    pub files: Vec<GeneratedFile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Syntax {
    Proto2,
    Proto3,
    Editions,
}

impl Syntax {
    pub(crate) fn of(file: &FileDescriptorProto) -> Self {
        match file.syntax() {
            "proto3" => Syntax::Proto3,
            "editions" => Syntax::Editions,
            _ => Syntax::Proto2,
        }
    }
}

/// Per-run synthesis state: the global symbol table and alias table.
#[derive(Debug)]
pub struct Generator {
    exports: ExportMap,
    aliases: AliasTable,
}

impl Generator {
    /// Index every file of the descriptor set.
    ///
    /// Fails if two files derive the same namespace alias.
    pub fn new(files: &[FileDescriptorProto]) -> Result<Self> {
        let aliases = AliasTable::build(files.iter().map(|f| f.name()))?;
        let exports = ExportMap::build(files);
        tracing::debug!(
            files = files.len(),
            types = exports.len(),
            "built symbol table"
        );
        Ok(Self { exports, aliases })
    }

    pub fn exports(&self) -> &ExportMap {
        &self.exports
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Synthesize both artifacts for `file`.
    pub fn synthesize(&self, file: &FileDescriptorProto) -> Result<SynthesizedFile> {
        Ok(SynthesizedFile {
            source: file.name().to_string(),
            declarations: self.declarations(file)?,
            services: self.services(file)?,
        })
    }

    /// The declarations artifact: messages, extensions, then enums.
    pub fn declarations(&self, file: &FileDescriptorProto) -> Result<String> {
        tracing::debug!(file = file.name(), "synthesizing declarations");
        let syntax = Syntax::of(file);
        let mut types = TypeMapper::new(&self.exports, &self.aliases, file.name());
        let mut body = Printer::new();

        for msg in file.message_type.iter().filter(|m| !message::is_map_entry(m)) {
            message::emit_message(&mut body, &mut types, syntax, msg)?;
            body.blank();
        }
        for ext in &file.extension {
            extension::emit_extension(&mut body, &mut types, ext)?;
            body.blank();
        }
        for enum_type in &file.enum_type {
            enums::emit_enum(&mut body, enum_type);
            body.blank();
        }

        let mut out = Printer::new();
        write_header(&mut out, file);
        out.line(import_line(RUNTIME_ALIAS, RUNTIME_MODULE));
        for line in self.dependency_imports(file, types.foreign_files()) {
            out.line(line);
        }
        out.blank();

        let mut text = out.finish();
        text.push_str(&body.finish());
        Ok(text)
    }

    /// The services artifact, or an empty string if `file` has no services.
    ///
    /// Method types are referenced through the file's own declarations
    /// module, which is imported under its alias like any dependency.
    pub fn services(&self, file: &FileDescriptorProto) -> Result<String> {
        if file.service.is_empty() {
            return Ok(String::new());
        }
        tracing::debug!(file = file.name(), "synthesizing services");

        let mut types = TypeMapper::detached(&self.exports, &self.aliases, file.name());
        let mut body = Printer::new();
        for service in &file.service {
            service::emit_service(&mut body, &mut types, file.package(), service)?;
        }

        let mut out = Printer::new();
        write_header(&mut out, file);
        out.line(import_line(RUNTIME_ALIAS, RUNTIME_MODULE));
        let own_target = format!("{}{}", path_to_root(file.name()), output_path(file.name()));
        out.line(import_line(&self.aliases.alias(file.name()), &own_target));
        for line in self.dependency_imports(file, types.foreign_files()) {
            out.line(line);
        }
        out.blank();

        let mut text = out.finish();
        text.push_str(&body.finish());
        Ok(text)
    }

    /// One import per dependency in declaration order, then one per file
    /// that a reference resolved into without being a direct dependency
    /// (reachable through `import public`). Never imports `file` itself.
    fn dependency_imports(
        &self,
        file: &FileDescriptorProto,
        referenced: &BTreeSet<String>,
    ) -> Vec<String> {
        let root = path_to_root(file.name());
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        seen.insert(file.name());

        let transitive = referenced
            .iter()
            .map(String::as_str)
            .filter(|r| !file.dependency.iter().any(|d| d == r));

        let mut lines = Vec::new();
        for dep in file.dependency.iter().map(String::as_str) {
            if seen.insert(dep) {
                lines.push(self.import_for(&root, dep));
            }
        }
        for dep in transitive {
            if seen.insert(dep) {
                tracing::warn!(
                    file = file.name(),
                    import = dep,
                    "importing file not listed as a direct dependency"
                );
                lines.push(self.import_for(&root, dep));
            }
        }
        lines
    }

    fn import_for(&self, root: &str, dep: &str) -> String {
        let computed = format!("{root}{}", output_path(dep));
        let target = resolve_import_target(dep, computed);
        tracing::debug!(dependency = dep, module = %target, "import");
        import_line(&self.aliases.alias(dep), &target)
    }
}

/// Synthesize every file named in `targets`.
///
/// The whole of `files` is indexed so references into files that are not
/// themselves generated still resolve. Stops at the first file that fails.
pub fn generate(
    files: &[FileDescriptorProto],
    targets: &[String],
    options: &GeneratorOptions,
) -> Result<Generated> {
    let generator = Generator::new(files)?;
    let mut generated = Generated::default();

    for target in targets {
        let file = files
            .iter()
            .find(|f| f.name() == target)
            .ok_or_else(|| Error::FileNotFound {
                name: target.clone(),
            })?;

        let synthesized = SynthesizedFile {
            source: file.name().to_string(),
            declarations: generator.declarations(file)?,
            services: if options.services {
                generator.services(file)?
            } else {
                String::new()
            },
        };
        count_declarations(file, &mut generated.stats);
        generated.stats.files_synthesized += 1;
        generated.files.extend(synthesized.into_artifacts(options));
    }

    generated.stats.artifacts_written = generated.files.len();
    Ok(generated)
}

/// Write generated files below `output_dir`, creating directories as needed.
pub fn write_files(output_dir: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        write_file(&output_dir.join(&file.name), &file.content)?;
    }
    Ok(())
}

/// Pretty JSON listing the run's statistics and written artifact names.
pub fn manifest_json(generated: &Generated) -> Result<String> {
    Ok(serde_json::to_string_pretty(generated)?)
}

// ── Shared helpers ─────────────────────────────────────────────────────

fn write_header(p: &mut Printer, file: &FileDescriptorProto) {
    p.line(format!("// package: {}", file.package()));
    p.line(format!("// file: {}", file.name()));
    p.blank();
}

fn import_line(alias: &str, target: &str) -> String {
    format!("import * as {alias} from \"{target}\";")
}

fn count_declarations(file: &FileDescriptorProto, stats: &mut GenerationStats) {
    fn count_message(msg: &DescriptorProto, stats: &mut GenerationStats) {
        if message::is_map_entry(msg) {
            return;
        }
        stats.messages_generated += 1;
        stats.enums_generated += msg.enum_type.len();
        stats.extensions_generated += msg.extension.len();
        for nested in &msg.nested_type {
            count_message(nested, stats);
        }
    }

    for msg in &file.message_type {
        count_message(msg, stats);
    }
    stats.enums_generated += file.enum_type.len();
    stats.extensions_generated += file.extension.len();
    stats.services_generated += file.service.len();
    stats.methods_generated += file.service.iter().map(|s| s.method.len()).sum::<usize>();
}

/// Write content to a file, creating parent directories as needed.
fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::Write {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::write(path, content).map_err(|e| Error::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost_types::field_descriptor_proto::{Label, Type};
    use prost_types::{FieldDescriptorProto, MethodDescriptorProto, ServiceDescriptorProto};

    fn message(name: &str, fields: Vec<FieldDescriptorProto>) -> DescriptorProto {
        DescriptorProto {
            name: Some(name.to_string()),
            field: fields,
            ..Default::default()
        }
    }

    fn message_field(name: &str, type_name: &str) -> FieldDescriptorProto {
        let mut f = FieldDescriptorProto {
            name: Some(name.to_string()),
            number: Some(1),
            type_name: Some(type_name.to_string()),
            ..Default::default()
        };
        f.set_type(Type::Message);
        f.set_label(Label::Optional);
        f
    }

    fn file(name: &str, package: &str, deps: &[&str]) -> FileDescriptorProto {
        FileDescriptorProto {
            name: Some(name.to_string()),
            package: Some(package.to_string()),
            dependency: deps.iter().map(|d| d.to_string()).collect(),
            syntax: Some("proto3".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn header_and_runtime_import_come_first() {
        let mut a = file("a.proto", "pkg", &[]);
        a.message_type.push(message("Empty", vec![]));
        let generator = Generator::new(std::slice::from_ref(&a)).unwrap();
        let out = generator.declarations(&a).unwrap();

        assert!(out.starts_with(
            "// package: pkg\n// file: a.proto\n\nimport * as jspb from \"google-protobuf\";\n\n"
        ));
    }

    #[test]
    fn duplicate_dependencies_import_once() {
        let mut b = file("lib/b.proto", "lib", &[]);
        b.message_type.push(message("M", vec![]));
        let mut a = file("app/a.proto", "app", &["lib/b.proto", "lib/b.proto"]);
        a.message_type
            .push(message("Holder", vec![message_field("m", ".lib.M")]));
        let files = vec![b, a];
        let generator = Generator::new(&files).unwrap();
        let out = generator.declarations(&files[1]).unwrap();

        assert_eq!(out.matches("import * as lib_b_pb").count(), 1);
        assert!(out.contains("import * as lib_b_pb from \"../lib/b_pb\";"));
        assert!(out.contains("getM(): lib_b_pb.M | undefined;"));
    }

    #[test]
    fn publicly_imported_file_is_added_once() {
        let mut c = file("c.proto", "c", &[]);
        c.message_type.push(message("Deep", vec![]));
        let mut b = file("b.proto", "b", &["c.proto"]);
        b.public_dependency.push(0);
        let mut a = file("a.proto", "a", &["b.proto"]);
        a.message_type
            .push(message("Uses", vec![message_field("deep", ".c.Deep")]));
        let files = vec![c, b, a];
        let generator = Generator::new(&files).unwrap();
        let out = generator.declarations(&files[2]).unwrap();

        assert!(out.contains("import * as b_pb from \"./b_pb\";"));
        assert_eq!(out.matches("import * as c_pb from \"./c_pb\";").count(), 1);
        let b_pos = out.find("b_pb from").unwrap();
        let c_pos = out.find("c_pb from").unwrap();
        assert!(b_pos < c_pos);
    }

    #[test]
    fn services_import_own_declarations() {
        let mut a = file("svc/a.proto", "svc", &[]);
        a.message_type.push(message("Req", vec![]));
        a.service.push(ServiceDescriptorProto {
            name: Some("Api".to_string()),
            method: vec![MethodDescriptorProto {
                name: Some("Call".to_string()),
                input_type: Some(".svc.Req".to_string()),
                output_type: Some(".svc.Req".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        });
        let generator = Generator::new(std::slice::from_ref(&a)).unwrap();
        let out = generator.services(&a).unwrap();

        assert!(out.contains("import * as svc_a_pb from \"../svc/a_pb\";"));
        assert_eq!(out.matches("import * as svc_a_pb").count(), 1);
        assert!(out.contains("static readonly requestType = svc_a_pb.Req;"));
    }

    #[test]
    fn unresolvable_type_aborts_file() {
        let mut a = file("a.proto", "a", &[]);
        a.message_type
            .push(message("Broken", vec![message_field("x", ".nowhere.X")]));
        let generator = Generator::new(std::slice::from_ref(&a)).unwrap();
        let err = generator.synthesize(&a).unwrap_err();
        assert!(matches!(err, Error::Resolution { .. }));
    }

    #[test]
    fn generate_counts_and_skips_empty_services() {
        let mut a = file("a.proto", "a", &[]);
        a.message_type.push(message("One", vec![]));
        let files = vec![a];
        let generated = generate(&files, &["a.proto".to_string()], &GeneratorOptions::default())
            .unwrap();

        assert_eq!(generated.stats.files_synthesized, 1);
        assert_eq!(generated.stats.messages_generated, 1);
        assert_eq!(generated.files.len(), 1);
        assert_eq!(generated.files[0].name, "a_pb.d.ts");
    }

    #[test]
    fn generate_rejects_unknown_target() {
        let files = vec![file("a.proto", "a", &[])];
        let err = generate(&files, &["b.proto".to_string()], &GeneratorOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("b.proto"));
    }
}
