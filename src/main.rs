//! minijson CLI.
//!
//! Thin wrapper that opens a file (or stdin), hands it to the parser and
//! optionally writes the value back out.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use minijson::{dump_with, loads_with, DumpOptions, ParseOptions, Value};

#[derive(Parser)]
#[command(name = "minijson")]
#[command(about = "Parse, validate and re-emit JSON documents", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information
    Version,

    /// Parse a document and report whether it is valid JSON
    Check {
        /// Input file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Accept trailing input, trailing commas and unterminated arrays
        #[arg(long)]
        compat: bool,
    },

    /// Parse a document and print it back as compact JSON
    Dump {
        /// Input file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Emit object keys in sorted order
        #[arg(long)]
        sort_keys: bool,

        /// Accept trailing input, trailing commas and unterminated arrays
        #[arg(long)]
        compat: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .format_timestamp(None)
        .init();

    match cli.command {
        Some(Commands::Check { file, compat }) => match parse_input(file.as_deref(), compat) {
            Ok(_) => {
                println!("ok");
                ExitCode::SUCCESS
            }
            Err(msg) => fail(&msg),
        },
        Some(Commands::Dump {
            file,
            sort_keys,
            compat,
        }) => {
            let value = match parse_input(file.as_deref(), compat) {
                Ok(value) => value,
                Err(msg) => return fail(&msg),
            };
            match write_value(&value, DumpOptions { sort_keys }) {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => fail(&format!("cannot write output: {err}")),
            }
        }
        Some(Commands::Version) => {
            println!("minijson v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        None => {
            println!("minijson v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
            ExitCode::SUCCESS
        }
    }
}

fn fail(msg: &str) -> ExitCode {
    eprintln!("error: {msg}");
    ExitCode::FAILURE
}

fn read_input(file: Option<&Path>) -> io::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn parse_input(file: Option<&Path>, compat: bool) -> Result<Value, String> {
    let source = file.map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());
    let text = read_input(file).map_err(|e| format!("cannot read {source}: {e}"))?;
    log::info!("read {} bytes from {}", text.len(), source);

    let options = if compat {
        ParseOptions::compat()
    } else {
        ParseOptions::strict()
    };
    let value = loads_with(&text, options).map_err(|e| format!("{source}: {e}"))?;
    log::debug!("parsed top-level {}", value.type_name());
    Ok(value)
}

fn write_value(value: &Value, options: DumpOptions) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    dump_with(value, &mut out, options)?;
    writeln!(out)?;
    out.flush()
}
