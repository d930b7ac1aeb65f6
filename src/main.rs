//! CLI tool to scan, parse, and format wcc source files.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wcc::{ParseOptions, TracingDiagnostics};

/// wcc front end: scan and parse source files
#[derive(Debug, Parser)]
#[command(name = "wcc", version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Increase log verbosity (-v debug, -vv trace); `RUST_LOG` overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Maximum nesting of bodies and operator chains
    #[arg(long, default_value_t = wcc::config::DEFAULT_MAX_DEPTH, global = true)]
    max_depth: usize,

    /// Emit a debug event when scanning reaches this line (repeatable)
    #[arg(long = "break-line", value_name = "LINE", global = true)]
    break_lines: Vec<usize>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the token stream of each file
    Tokens { files: Vec<PathBuf> },
    /// Print the syntax tree of each file
    Parse { files: Vec<PathBuf> },
    /// Print each file in canonical format
    Fmt { files: Vec<PathBuf> },
    /// Check that each file parses
    Check { files: Vec<PathBuf> },
}

impl Command {
    fn files(&self) -> &[PathBuf] {
        match self {
            Self::Tokens { files }
            | Self::Parse { files }
            | Self::Fmt { files }
            | Self::Check { files } => files,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let files = args.command.files();
    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let options = ParseOptions {
        max_depth: args.max_depth,
        breakpoints: args.break_lines.clone(),
    };
    let mut had_error = false;

    for path in files {
        let shown = path.display();
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{shown}: {e}");
                had_error = true;
                continue;
            }
        };

        if let Command::Tokens { .. } = args.command {
            for token in wcc::tokenize(&content) {
                println!("{}:{}\t{token}", token.span.line + 1, token.span.column + 1);
            }
            continue;
        }

        let parsed = wcc::parse_with(&content, &options, TracingDiagnostics);
        if let Err(e) = &parsed.result {
            eprintln!("{shown}: {e}");
            had_error = true;
        }

        match args.command {
            Command::Parse { .. } => print!("{}", wcc::dump(&parsed.ast)),
            Command::Fmt { .. } if parsed.is_ok() => print!("{}", wcc::format(&parsed.ast)),
            Command::Check { .. } if parsed.is_ok() => {
                let items = parsed.ast.items().len();
                let nodes = parsed.ast.root.subtree_len() - 1;
                eprintln!("{shown}: valid ({items} item(s), {nodes} node(s))");
            }
            _ => {}
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
