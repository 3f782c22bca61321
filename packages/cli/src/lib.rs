//! `xrt` command-line front end.
//!
//! Each subcommand exercises one `xrt-sys` primitive; `collect` loads files
//! into an [`IndexedStore`](xrt_store::IndexedStore).

mod commands;

use std::io::Write;
use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

pub use commands::CaseMode;

/// xrt - portable runtime primitives and an indexed store
#[derive(Parser, Debug)]
#[command(name = "xrt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Select a locale, falling back through the UTF-8 aliases
    Locale {
        /// Requested locale name
        name: Option<String>,

        /// Category such as all, ctype or LC_TIME
        #[arg(long, default_value = "all")]
        category: String,
    },

    /// Print the byte and character length of TEXT
    FormatLen { text: String },

    /// Print a file from start to end
    Cat { path: PathBuf },

    /// Run a shell command and exit with its status
    Run {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Change the case of TEXT
    #[command(group(ArgGroup::new("mode").required(true).args(["lower", "upper", "ascii"])))]
    Case {
        #[arg(long)]
        lower: bool,
        #[arg(long)]
        upper: bool,
        /// Replace characters above U+00FF with '?'
        #[arg(long)]
        ascii: bool,
        /// Go through the wide-string conversion
        #[arg(long)]
        wide: bool,
        text: String,
    },

    /// List entries of DIR named PATTERN
    Search {
        dir: PathBuf,
        pattern: String,
        /// Treat PATTERN as a regular expression
        #[arg(long)]
        regex: bool,
    },

    /// Load files into an indexed store and summarize it
    Collect {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// JSON store configuration, applied over XRT_STORE_* variables
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Sys(#[from] xrt_sys::SysError),

    #[error("{0}")]
    Store(#[from] xrt_store::StoreError),

    #[error("configuration: {0}")]
    Config(#[from] xrt_store::ConfigError),

    #[error("output: {0}")]
    Output(#[from] std::io::Error),
}

/// Install the stderr log subscriber.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run one command, writing its output to `out`. Returns the exit code.
pub fn run(cli: Cli, out: &mut impl Write) -> Result<i32, CliError> {
    match cli.command {
        Command::Locale { name, category } => {
            commands::locale(out, name.as_deref(), &category)?;
        }
        Command::FormatLen { text } => commands::format_len(out, &text)?,
        Command::Cat { path } => commands::cat(out, &path)?,
        Command::Run { command } => return commands::run(&command.join(" ")),
        Command::Case {
            lower,
            upper,
            ascii: _,
            wide,
            text,
        } => {
            let mode = if lower {
                CaseMode::Lower
            } else if upper {
                CaseMode::Upper
            } else {
                CaseMode::Ascii
            };
            commands::case(out, mode, wide, &text)?;
        }
        Command::Search {
            dir,
            pattern,
            regex,
        } => commands::search(out, &dir, &pattern, regex)?,
        Command::Collect { paths, config } => {
            commands::collect(out, &paths, config.as_deref())?;
        }
    }
    Ok(0)
}
