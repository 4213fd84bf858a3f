//! Command-line interface for sessiondir.
//!
//! This binary exposes the working-directory operations of the library,
//! printing listings and file info as JSON.

use clap::{Parser, Subcommand, ValueEnum};
use sessiondir::{
    DEFAULT_MAX_CONCURRENCY, DEFAULT_TEXT_SIZE_LIMIT, MimeTable, SessionDirError,
    WorkingDirBuilder, WorkingDirectory, output,
};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::exit;

/// sessiondir — working directory backend for editing sessions
#[derive(Parser)]
#[command(name = "sessiondir", version, about, long_about = None)]
struct Cli {
    /// Working directory (default current dir)
    #[arg(long, env = "SESSIONDIR_ROOT", default_value = ".")]
    root: PathBuf,

    /// Text files larger than this many bytes are listed without content
    #[arg(long, env = "SESSIONDIR_TEXT_SIZE_LIMIT", default_value_t = DEFAULT_TEXT_SIZE_LIMIT)]
    text_size_limit: u64,

    /// Maximum number of entries classified at once
    #[arg(long, env = "SESSIONDIR_MAX_CONCURRENCY", default_value_t = DEFAULT_MAX_CONCURRENCY)]
    max_concurrency: usize,

    /// Supplemental MIME table in mime.types format
    #[arg(long, env = "SESSIONDIR_MIME_TYPES")]
    mime_types: Option<PathBuf>,

    /// Pretty output (indented JSON)
    #[arg(short, long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List and classify every entry of the working directory
    List {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Classify a single file
    Info { name: String },
    /// Overwrite a file with the contents of --from, or stdin
    Save {
        name: String,
        #[arg(long)]
        from: Option<PathBuf>,
    },
    /// Rename a file
    Rename { old: String, new: String },
    /// Delete a file
    Delete { name: String },
    /// Print a file as base64 together with its MIME type
    ReadBinary { name: String },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

impl From<OutputFormat> for output::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => output::OutputFormat::Json,
            OutputFormat::Text => output::OutputFormat::Text,
        }
    }
}

impl Cli {
    fn working_directory(&self) -> Result<WorkingDirectory, SessionDirError> {
        let mut mime_types = MimeTable::new();
        if let Some(path) = &self.mime_types {
            mime_types = mime_types.load(path)?;
        }
        let options = WorkingDirBuilder::new(&self.root)
            .text_size_limit(self.text_size_limit)
            .max_concurrency(self.max_concurrency)
            .mime_types(mime_types)
            .build();
        WorkingDirectory::new(options)
    }
}

fn main() {
    let cli = Cli::parse();
    #[cfg(feature = "logging")]
    init_logging();

    let dir = match cli.working_directory() {
        Ok(dir) => dir,
        Err(e) => fail(e),
    };
    if let Err(e) = run(&dir, cli.command, cli.pretty) {
        fail(e);
    }
}

#[cfg(feature = "logging")]
fn init_logging() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(dir: &WorkingDirectory, command: Command, pretty: bool) -> Result<(), SessionDirError> {
    match command {
        Command::List { format } => {
            let listing = dir.list_all()?;
            let out = output::format_listing(&listing, format.into(), pretty);
            match format {
                OutputFormat::Json => println!("{}", out),
                OutputFormat::Text => print!("{}", out),
            }
        }
        Command::Info { name } => match dir.get_file_info(&name)? {
            Some(info) => print_json(&info, pretty),
            None => println!("null"),
        },
        Command::Save { name, from } => {
            let contents = match from {
                Some(path) => fs::read(&path).map_err(|e| io_error(path, e))?,
                None => {
                    let mut buf = Vec::new();
                    io::stdin()
                        .read_to_end(&mut buf)
                        .map_err(|e| io_error("<stdin>", e))?;
                    buf
                }
            };
            dir.save_file(&name, &contents)?;
        }
        Command::Rename { old, new } => dir.rename_file(&old, &new)?,
        Command::Delete { name } => dir.delete_file(&name)?,
        Command::ReadBinary { name } => print_json(&dir.read_binary(&name)?, pretty),
    }
    Ok(())
}

fn io_error(path: impl Into<PathBuf>, source: io::Error) -> SessionDirError {
    SessionDirError::Io {
        path: path.into(),
        source,
    }
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .unwrap_or_else(|e| {
        eprintln!("JSON serialization error: {}", e);
        exit(1);
    });
    println!("{}", json);
}

fn fail(e: SessionDirError) -> ! {
    eprintln!("Error: {}", e);
    exit(1);
}
