//! DBC Studio CLI Application
//!
//! Command-line front end for the dbc-studio-core library:
//! - Inspect DBC files (listing or JSON)
//! - Rewrite DBC files in canonical form
//! - Create files and add/remove messages and signals

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod report;

use commands::{parse_frame_id, NewMessage, NewSignal};
use config::AppConfig;

/// DBC Studio - Inspect and edit CAN database (DBC) files
#[derive(Parser, Debug)]
#[command(name = "dbc-studio")]
#[command(about = "Inspect and edit CAN database (DBC) files", long_about = None)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the messages and signals of a DBC file
    Show {
        file: PathBuf,

        /// Only messages whose name or ID contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Print the document as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rewrite DBC files in canonical form
    Normalize {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Write results here instead of in place
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Create an empty DBC file
    New {
        file: PathBuf,

        /// Content of the VERSION line
        #[arg(long = "dbc-version", value_name = "VERSION")]
        dbc_version: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Append a message
    AddMessage {
        file: PathBuf,

        #[arg(long)]
        name: Option<String>,

        /// Frame ID, decimal or 0x hex (default: next free ID)
        #[arg(long, value_parser = parse_frame_id)]
        id: Option<u32>,

        /// Payload length in bytes
        #[arg(long, value_parser = clap::value_parser!(u64).range(0..=64))]
        length: Option<u64>,

        #[arg(long)]
        sender: Option<String>,
    },

    /// Remove a message by name
    RemoveMessage { file: PathBuf, name: String },

    /// Append a signal to a message
    AddSignal {
        file: PathBuf,
        message: String,

        #[arg(long)]
        name: Option<String>,

        /// Start bit
        #[arg(long, default_value_t = 0)]
        start: u64,

        /// Length in bits
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..=64))]
        length: Option<u64>,

        /// Motorola byte order (default: Intel)
        #[arg(long)]
        big_endian: bool,

        #[arg(long)]
        signed: bool,

        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        scale: f64,

        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        offset: f64,

        #[arg(long, allow_negative_numbers = true)]
        min: Option<f64>,

        #[arg(long, allow_negative_numbers = true)]
        max: Option<f64>,

        #[arg(long, default_value = "")]
        unit: String,

        /// Receiving node (can be repeated)
        #[arg(long = "receiver", value_name = "NODE")]
        receivers: Vec<String>,
    },

    /// Remove a signal from a message
    RemoveSignal {
        file: PathBuf,
        message: String,
        signal: String,
    },
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::debug!("DBC Studio CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using core library v{}", dbc_studio_core::VERSION);

    let config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    match args.command {
        Command::Show { file, search, json } => {
            commands::show(&config, &file, search.as_deref(), json)
        }
        Command::Normalize { files, output_dir } => {
            commands::normalize(&config, &files, output_dir.as_deref())
        }
        Command::New {
            file,
            dbc_version,
            force,
        } => commands::new_file(&file, dbc_version, force),
        Command::AddMessage {
            file,
            name,
            id,
            length,
            sender,
        } => commands::add_message(
            &config,
            &file,
            NewMessage {
                name,
                frame_id: id,
                length,
                sender,
            },
        ),
        Command::RemoveMessage { file, name } => commands::remove_message(&file, &name),
        Command::AddSignal {
            file,
            message,
            name,
            start,
            length,
            big_endian,
            signed,
            scale,
            offset,
            min,
            max,
            unit,
            receivers,
        } => commands::add_signal(
            &config,
            &file,
            &message,
            NewSignal {
                name,
                start,
                length,
                big_endian,
                signed,
                scale,
                offset,
                minimum: min,
                maximum: max,
                unit,
                receivers,
            },
        ),
        Command::RemoveSignal {
            file,
            message,
            signal,
        } => commands::remove_signal(&file, &message, &signal),
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
