mod fs_io;

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use wlgen::{check_protocol, compile_batch, opcodes_to_json, protocol_to_json, EmitOptions};
use wlgen_compiler::error::WlgenError;

use crate::fs_io::{DirSink, FsSource, StdoutSink};

#[derive(Parser)]
#[command(name = "wlgen")]
#[command(about = "Generate C++ protocol headers from Wayland protocol XML", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one `<name>_protocol.hpp` per protocol XML file
    GenCxx {
        /// Input protocol XML files, compiled in the given order
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Destination directory (if omitted, prints to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// TOML file overriding namespaces, include path and file suffix
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Also verify identifiers and enum references before generating
        #[arg(long)]
        strict: bool,
    },

    /// Parse (and with `--strict` verify) protocol XML without generating anything
    Check {
        /// Input protocol XML files
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        #[arg(long)]
        strict: bool,
    },

    /// Print the opcode and enum value table of a protocol as JSON
    Opcodes {
        /// Input protocol XML file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print the parsed protocol model as JSON
    Dump {
        /// Input protocol XML file
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<(), WlgenError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::GenCxx { input, output, config, strict } => {
            let options = load_options(config.as_deref())?;
            let names: Vec<String> = input.iter().map(|p| p.to_string_lossy().into_owned()).collect();
            let written = match output {
                Some(dir) => compile_batch(&names, FsSource, DirSink { dir: dir.clone() }, &options, *strict)?,
                None => compile_batch(&names, FsSource, StdoutSink, &options, *strict)?,
            };
            info!(headers = written.len(), "done");
            Ok(())
        }

        Commands::Check { input, strict } => {
            for path in input {
                let text = fs::read_to_string(path)?;
                let protocol = check_protocol(&text, *strict)?;
                println!(
                    "{}: protocol {} with {} interface(s)",
                    path.display(),
                    protocol.name,
                    protocol.interfaces.len()
                );
            }
            Ok(())
        }

        Commands::Opcodes { input } => {
            let text = fs::read_to_string(input)?;
            println!("{}", opcodes_to_json(&text)?);
            Ok(())
        }

        Commands::Dump { input } => {
            let text = fs::read_to_string(input)?;
            println!("{}", protocol_to_json(&text)?);
            Ok(())
        }
    }
}

fn load_options(config: Option<&Path>) -> Result<EmitOptions, WlgenError> {
    match config {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            EmitOptions::from_toml_str(&text)
        }
        None => Ok(EmitOptions::default()),
    }
}
