//! Command-line front end for the note store.
//!
//! # Responsibility
//! - Parse arguments, resolve store configuration and optional logging.
//! - Dispatch to `commands` and map failures to exit code 1.

mod commands;

use clap::{Parser, Subcommand};
use commands::EditFields;
use log::info;
use notekeeper_core::{
    core_version, default_log_level, init_logging, LoadPolicy, NoteStore, StoreConfig,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "notekeeper", about = "Personal notes with deadlines")]
struct Cli {
    /// Note file (falls back to NOTEKEEPER_FILE, then ./notes.json).
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, global = true, env = "NOTEKEEPER_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Start with an empty collection when the note file is unreadable.
    #[arg(long, global = true)]
    lenient: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print note titles in display order.
    List,
    /// Create a note; deadline format is "YYYY-MM-DD HH:MM:SS".
    Create {
        title: String,
        description: String,
        deadline: String,
    },
    /// Print details of one note.
    Show { title: String },
    /// Change a note; omitted options keep their current value.
    Edit {
        title: String,
        #[arg(long = "title")]
        new_title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        deadline: Option<String>,
    },
    /// Delete a note after confirmation.
    Delete {
        title: String,
        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Print the core version.
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> commands::CommandResult {
    if let Some(dir) = cli.log_dir.as_ref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, dir)?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Command::Version = cli.command {
        writeln!(out, "notekeeper_core {}", core_version())?;
        return Ok(());
    }

    let policy = if cli.lenient {
        LoadPolicy::Lenient
    } else {
        LoadPolicy::Strict
    };
    let config = StoreConfig::resolve(cli.file).with_load_policy(policy);
    info!(
        "event=cli_start module=cli status=ok policy={:?}",
        config.load_policy
    );
    let mut store = NoteStore::open(&config)?;

    match cli.command {
        Command::List => commands::list(&store, &mut out),
        Command::Create {
            title,
            description,
            deadline,
        } => commands::create(&mut store, title, description, &deadline, &mut out),
        Command::Show { title } => commands::show(&store, &title, &mut out),
        Command::Edit {
            title,
            new_title,
            description,
            deadline,
        } => {
            let fields = EditFields {
                title: new_title,
                description,
                deadline,
            };
            commands::edit(&mut store, &title, fields, &mut out)
        }
        Command::Delete { title, yes } => {
            let stdin = io::stdin();
            commands::delete(&mut store, &title, yes, &mut stdin.lock(), &mut out)
        }
        Command::Version => Ok(()),
    }
}
