//! strict-json CLI.
//!
//! Parses one document from a file or stdin and prints the value tree, or the error with its
//! byte offset.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use strict_json::{EscapeMode, ParserOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "strict-json")]
#[command(about = "Parse a JSON document and print its value tree", long_about = None)]
#[command(version)]
struct Cli {
    /// Input file, stdin when omitted
    path: Option<PathBuf>,

    /// How backslash escapes inside strings are handled
    #[arg(long, value_enum, default_value_t = Escapes::Raw)]
    escapes: Escapes,

    /// Maximum nesting depth of objects and arrays
    #[arg(long, conflicts_with = "unbounded")]
    max_depth: Option<usize>,

    /// Disable the nesting depth limit
    #[arg(long)]
    unbounded: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Escapes {
    /// Keep the backslash and the escaped character
    Raw,
    /// Drop the backslash, keep the escaped character
    Strip,
    /// Decode escape sequences
    Decode,
}

impl From<Escapes> for EscapeMode {
    fn from(escapes: Escapes) -> Self {
        match escapes {
            Escapes::Raw => EscapeMode::Raw,
            Escapes::Strip => EscapeMode::StripBackslash,
            Escapes::Decode => EscapeMode::Decode,
        }
    }
}

impl Cli {
    fn options(&self) -> ParserOptions {
        let options = if self.unbounded {
            ParserOptions::unbounded()
        } else {
            ParserOptions::new()
        };
        let options = match self.max_depth {
            Some(depth) => options.max_depth(Some(depth)),
            None => options,
        };
        options.escapes(self.escapes.into())
    }

    fn read_input(&self) -> io::Result<Vec<u8>> {
        match &self.path {
            Some(path) => std::fs::read(path),
            None => {
                let mut buffer = Vec::new();
                io::stdin().read_to_end(&mut buffer)?;
                Ok(buffer)
            }
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let input = match cli.read_input() {
        Ok(input) => input,
        Err(err) => {
            let source = cli
                .path
                .as_ref()
                .map_or_else(|| "stdin".to_string(), |path| path.display().to_string());
            eprintln!("error: failed to read {source}: {err}");
            return ExitCode::FAILURE;
        }
    };

    match strict_json::from_slice_with(&input, &cli.options()) {
        Ok(value) => {
            println!("{value:#?}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
