//! RecordX CLI
//!
//! Interactive shell and script runner for the record manager

use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use recordx_core::logging_facility;
use recordx_core::RecordBook;
use recordx_engine::Dispatcher;
use recordx_store::sqlite_sink::DATABASE_FILE;
use recordx_store::{JsonFileSink, PersistenceSink, SqliteSink};

mod config;
mod repl;

use config::{Backend, CliConfig};

#[derive(Debug, Parser)]
#[command(name = "recordx")]
#[command(about = "RecordX - command-driven contact records", long_about = None)]
struct Cli {
    /// Config file (defaults to ./recordx.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the saved records; overrides the config file
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Interactive shell
    Repl,
    /// Run commands from a file, one per line (`-` reads stdin)
    Run(RunArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    script: PathBuf,

    /// Report failing lines and keep going
    #[arg(long)]
    continue_on_error: bool,

    /// Do not echo each command
    #[arg(long, short)]
    quiet: bool,
}

type SessionDispatcher = Dispatcher<RecordBook, Box<dyn PersistenceSink>>;

fn open_dispatcher(config: CliConfig) -> Result<SessionDispatcher, Box<dyn std::error::Error>> {
    let data_dir = config.storage.data_dir;
    let sink: Box<dyn PersistenceSink> = match config.storage.backend {
        Backend::Json => Box::new(JsonFileSink::new(&data_dir)),
        Backend::Sqlite => Box::new(SqliteSink::open(data_dir.join(DATABASE_FILE))?),
    };
    tracing::debug!(data_dir = %data_dir.display(), backend = ?config.storage.backend, "opening record book");
    Ok(Dispatcher::open(sink, config.engine)?)
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = data_dir;
    }
    if let Some(profile) = config.logging.profile.profile() {
        logging_facility::init(profile);
    }

    let mut dispatcher = open_dispatcher(config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Repl => repl::run_repl(&mut dispatcher, io::stdin().lock(), &mut out)?,
        Commands::Run(args) => {
            let script = if args.script.as_os_str() == "-" {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                std::fs::read_to_string(&args.script)
                    .map_err(|e| format!("cannot read {}: {}", args.script.display(), e))?
            };
            repl::run_script(
                &mut dispatcher,
                &script,
                args.continue_on_error,
                args.quiet,
                &mut out,
            )?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
