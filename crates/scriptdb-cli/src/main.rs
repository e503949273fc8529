mod logging;

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Args, Parser, Subcommand};
use scriptdb_build::{DatabaseBuilder, update_database};
use scriptdb_core::{
    Error as CoreError, Settings, load_settings, redact_connection_string, require_path,
    require_text,
};
use scriptdb_introspect::{ExportOptions, export_scripts, open_catalog};
use thiserror::Error;

/// Bad arguments, missing directories, invalid configuration.
const EXIT_USAGE: u8 = 1;
/// Any other failure; this is -1 as reported by POSIX shells.
const EXIT_FAILURE: u8 = 255;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Logging(#[from] logging::LoggingError),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::Core(err) if err.is_input_error() => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "scriptdb",
    version,
    about = "Build databases from SQL scripts and export schemas back to scripts",
    arg_required_else_help = true,
    disable_help_subcommand = true
)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Append JSON log events to this file.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Log debug events (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create or extend a database from a directory of .sql scripts.
    BuildDb(BuildDbArgs),
    /// Export domains, tables and procedures of a database as scripts.
    ExportScripts(ExportScriptsArgs),
    /// Apply new scripts to an existing database (not supported yet).
    UpdateDb(UpdateDbArgs),
}

#[derive(Args, Debug)]
struct BuildDbArgs {
    /// Directory holding the database file.
    #[arg(long, value_name = "PATH")]
    db_dir: PathBuf,
    /// Directory of .sql scripts, applied in file name order.
    #[arg(long, value_name = "PATH")]
    scripts_dir: PathBuf,
}

#[derive(Args, Debug)]
struct ExportScriptsArgs {
    /// Source database URL (postgres:// or sqlite:).
    #[arg(long, value_name = "URL")]
    connection_string: String,
    /// Directory receiving the numbered scripts.
    #[arg(long, value_name = "PATH")]
    output_dir: PathBuf,
    /// Sort objects by name for byte-stable output.
    #[arg(long, default_value_t = false)]
    sort_by_name: bool,
}

#[derive(Args, Debug)]
struct UpdateDbArgs {
    #[arg(long, value_name = "URL")]
    connection_string: String,
    #[arg(long, value_name = "PATH")]
    scripts_dir: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = normalize_command(std::env::args_os().collect());

    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(err) => return ExitCode::from(report_usage_error(&err)),
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

/// Global flags that consume the following argument as their value.
const VALUE_FLAGS: [&str; 2] = ["--config", "--log-file"];

/// Command words are matched case-insensitively. The command is the first
/// positional argument after any leading global flags.
fn normalize_command(mut args: Vec<OsString>) -> Vec<OsString> {
    let mut index = 1;
    while let Some(arg) = args.get(index) {
        let Some(text) = arg.to_str() else {
            break;
        };
        if text == "--" {
            break;
        }
        if text.starts_with('-') {
            index += if VALUE_FLAGS.contains(&text) { 2 } else { 1 };
            continue;
        }

        let lowered = text.to_lowercase();
        args[index] = OsString::from(lowered);
        break;
    }
    args
}

fn report_usage_error(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            0
        }
        ErrorKind::InvalidSubcommand => {
            let command = match err.get(ContextKind::InvalidSubcommand) {
                Some(ContextValue::String(command)) => command.as_str(),
                _ => "",
            };
            println!("unknown command: {command}");
            EXIT_USAGE
        }
        _ => {
            let _ = err.print();
            EXIT_USAGE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    logging::init_logging(cli.log_file.as_deref(), cli.verbose)?;
    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Command::BuildDb(args) => run_build(args, &settings).await,
        Command::ExportScripts(args) => run_export(args, &settings).await,
        Command::UpdateDb(args) => run_update(args),
    }
}

async fn run_build(args: BuildDbArgs, settings: &Settings) -> Result<(), CliError> {
    let builder = DatabaseBuilder::new(settings.database.clone());
    let report = builder.build(&args.db_dir, &args.scripts_dir).await?;

    if report.created {
        println!("Created database {}", report.database_path.display());
    }

    if report.scripts.is_empty() {
        println!("no scripts found in {}", args.scripts_dir.display());
        return Ok(());
    }

    for script in &report.scripts {
        println!("Applied {}", script.display());
    }
    println!(
        "Database built successfully: {} script(s), {} statement(s) committed.",
        report.scripts.len(),
        report.statements
    );
    Ok(())
}

async fn run_export(args: ExportScriptsArgs, settings: &Settings) -> Result<(), CliError> {
    require_text(&args.connection_string, "--connection-string")?;
    require_path(&args.output_dir, "--output-dir")?;

    let options = ExportOptions {
        sort_by_name: args.sort_by_name || settings.export.sort_by_name,
    };

    tracing::info!(
        event = "export_requested",
        connection = %redact_connection_string(&args.connection_string)
    );

    let mut source = open_catalog(&args.connection_string).await?;
    let report = export_scripts(source.as_mut(), &args.output_dir, &options).await?;

    println!("Exported schema scripts:");
    for file in &report.files {
        println!("{}", file.display());
    }
    Ok(())
}

fn run_update(args: UpdateDbArgs) -> Result<(), CliError> {
    update_database(&args.connection_string, &args.scripts_dir)?;
    Ok(())
}
