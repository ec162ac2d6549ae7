//! Quartz C Compiler Driver
//!
//! Command-line entry point. Until the frontend lands, the driver
//! lowers built-in demo programs through the backend and writes the
//! resulting assembly, which exercises statement lowering and frame
//! layout end to end.

use clap::{Parser, Subcommand};
use log::info;
use qcc_backend::emit_unit;
use qcc_codegen::Architecture;
use qcc_common::CompilerError;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

mod emitters;
mod programs;

use emitters::{MarkerDecls, MarkerValues};

#[derive(Parser)]
#[command(name = "qcc")]
#[command(about = "Quartz C compiler")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lower a built-in demo program to assembly
    Demo {
        /// Which demo to lower (see `qcc list`)
        #[arg(short, long, default_value = "countdown")]
        name: String,

        /// Output file for generated assembly (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target architecture (amd64 or i686)
        #[arg(long, default_value = "amd64")]
        target: String,

        /// Print the demo's AST as JSON instead of lowering it
        #[arg(long)]
        dump_ast: bool,
    },

    /// List the built-in demo programs
    List,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo {
            name,
            output,
            target,
            dump_ast,
        } => {
            if let Err(e) = run_demo(&name, output.as_deref(), &target, dump_ast) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Commands::List => {
            for name in programs::names() {
                println!("{name}");
            }
        }
    }
}

fn run_demo(
    name: &str,
    output: Option<&Path>,
    target: &str,
    dump_ast: bool,
) -> Result<(), CompilerError> {
    let arch = match target {
        "amd64" => Architecture::amd64(),
        "i686" => Architecture::i686(),
        other => {
            return Err(CompilerError::codegen_error(format!(
                "unknown target '{other}'"
            )))
        }
    };

    let (unit, mut symbols) = programs::build(name)
        .ok_or_else(|| CompilerError::codegen_error(format!("unknown demo '{name}'")))?;

    if dump_ast {
        let json = serde_json::to_string_pretty(&unit)
            .map_err(|e| CompilerError::internal(e.to_string()))?;
        println!("{json}");
        return Ok(());
    }

    info!("lowering demo '{name}' for {}", arch.name);
    let asm = emit_unit(&unit, &arch, &mut symbols, &mut MarkerValues, &mut MarkerDecls)?;

    match output {
        Some(path) => {
            let mut file = File::create(path)?;
            asm.flush(&mut file)?;
            info!("wrote {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            asm.flush(&mut stdout.lock())?;
        }
    }
    Ok(())
}
