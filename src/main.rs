use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use protoc_gen_tsd::codegen::{self, GeneratorOptions};
use protoc_gen_tsd::error::Error;
use tracing_subscriber::EnvFilter;

/// Generate TypeScript declarations from Protocol Buffer descriptors.
///
/// Without a subcommand, runs as a protoc plugin: reads a
/// CodeGeneratorRequest from stdin and writes a CodeGeneratorResponse to
/// stdout.
#[derive(Parser)]
#[command(name = "protoc-gen-tsd", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log debug output to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate declarations from a serialized FileDescriptorSet.
    Generate {
        /// Path to a FileDescriptorSet written with
        /// `protoc --include_imports --descriptor_set_out`.
        #[arg(long, env = "TSD_DESCRIPTOR_SET")]
        descriptor_set: PathBuf,

        /// Comma-separated .proto paths to generate, or "all" for every file
        /// in the set.
        ///
        /// Example: --files acme/user.proto,acme/api.proto
        #[arg(long, default_value = "all")]
        files: String,

        /// Output directory for generated .d.ts files.
        #[arg(long, default_value = ".", env = "TSD_OUTPUT_DIR")]
        output_dir: PathBuf,

        /// Do not write _pb_service.d.ts files.
        #[arg(long)]
        no_services: bool,

        /// Also write manifest.json with generation statistics.
        #[arg(long)]
        manifest: bool,

        /// Suppress non-error output.
        #[arg(long, short)]
        quiet: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");

        // Print cause chain.
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = std::error::Error::source(cause);
        }

        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> protoc_gen_tsd::error::Result<()> {
    match cli.command {
        None => {
            let mut input = Vec::new();
            io::stdin().read_to_end(&mut input).map_err(|e| Error::Read {
                path: PathBuf::from("<stdin>"),
                source: e,
            })?;
            let output = protoc_gen_tsd::plugin::run(&input)?;
            io::stdout().write_all(&output).map_err(|e| Error::Write {
                path: PathBuf::from("<stdout>"),
                source: e,
            })?;
        }

        Some(Commands::Generate {
            descriptor_set,
            files,
            output_dir,
            no_services,
            manifest,
            quiet,
        }) => {
            if !quiet {
                eprintln!("Loading descriptors from {}", descriptor_set.display());
            }
            let set = protoc_gen_tsd::descriptor::load_descriptor_set(&descriptor_set)?;

            let targets: Vec<String> = if files == "all" {
                set.file.iter().map(|f| f.name().to_string()).collect()
            } else {
                files
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            };

            if !quiet {
                eprintln!(
                    "Generating declarations for {} of {} files",
                    targets.len(),
                    set.file.len()
                );
            }

            let options = GeneratorOptions {
                services: !no_services,
            };
            let generated = codegen::generate(&set.file, &targets, &options)?;
            codegen::write_files(&output_dir, &generated.files)?;

            if manifest {
                let path = output_dir.join("manifest.json");
                let json = codegen::manifest_json(&generated)?;
                std::fs::write(&path, json).map_err(|e| Error::Write { path, source: e })?;
            }

            if !quiet {
                let stats = &generated.stats;
                eprintln!(
                    "Generated {} messages, {} enums, {} extensions, {} services ({} methods)",
                    stats.messages_generated,
                    stats.enums_generated,
                    stats.extensions_generated,
                    stats.services_generated,
                    stats.methods_generated
                );
                eprintln!(
                    "Wrote {} files to {}",
                    stats.artifacts_written,
                    output_dir.display()
                );
                eprintln!("Done.");
            }
        }
    }

    Ok(())
}
