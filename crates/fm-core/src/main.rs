//! Fire Merge Core - command line driver
//!
//! The `fm-core` binary reads a fire document, runs one engine stage and
//! writes the result:
//! - `merge`: same-location fire merging
//! - `plume-merge`: grid bucketing and plume-rise aggregation
//! - `time-windows`: met-data time windows for a document
//! - `persist`: persistence growth
//! - `check`, `schema`, `version`: diagnostics

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use fm_common::{
    format_error_human, Error, Fire, FireDocument, OutputFormat, StructuredError,
};
use fm_core::config::{load_config, ConfigError, LoadedConfig};
use fm_core::exit_codes::ExitCode;
use fm_core::io::{read_document, render_document, write_output};
use fm_core::logging::{
    event_names, generate_run_id, init_logging, LogConfig, LogContext, LogFormat, LogLevel, Stage,
};
use fm_core::schema::{
    available_schemas, format_schema, generate_all_schemas, generate_schema, SchemaFormat,
};
use fm_core::{log_event, met_time_windows, persist_fires, FireMerger, PlumeMerger};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Fire Merge Core - fire merging, plume aggregation and met windows
#[derive(Parser)]
#[command(name = "fm-core")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Path to config.json
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log output format on stderr (human or jsonl)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge fires that share a location and have contiguous windows
    Merge(DocumentArgs),

    /// Merge fires per grid cell, combining their plume-rise profiles
    PlumeMerge(DocumentArgs),

    /// Compute met-data time windows for a document
    TimeWindows(DocumentArgs),

    /// Project fire activity onto following days
    Persist(PersistArgs),

    /// Validate configuration and, optionally, a fire document
    Check(CheckArgs),

    /// Print JSON schemas for the fire document types
    Schema(SchemaArgs),

    /// Print version information
    Version,
}

// ============================================================================
// Command argument structs
// ============================================================================

#[derive(Args, Debug)]
struct DocumentArgs {
    /// Input fire document (stdin when omitted or `-`)
    input: Option<PathBuf>,

    /// Write output here instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PersistArgs {
    #[command(flatten)]
    document: DocumentArgs,

    /// Reference date (YYYY-MM-DD) used for defaults and set selection
    #[arg(long)]
    today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Fire document to validate
    #[arg(long)]
    input: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SchemaArgs {
    /// Type to print the schema for
    name: Option<String>,

    /// List available schema types
    #[arg(long)]
    list: bool,

    /// Print every schema
    #[arg(long, conflicts_with = "name")]
    all: bool,

    /// Single-line JSON
    #[arg(long)]
    compact: bool,
}

// ============================================================================
// Main entry point
// ============================================================================

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::ArgsError
            } else {
                ExitCode::Clean
            };
            let _ = e.print();
            std::process::exit(code.as_i32());
        }
    };

    let cli_level = if cli.global.quiet {
        Some(LogLevel::Error)
    } else {
        match cli.global.verbose {
            0 => None,
            1 => Some(LogLevel::Info),
            2 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    };
    init_logging(&LogConfig::from_env(cli_level, cli.global.log_format));

    let ctx = LogContext::new(generate_run_id());
    log_event!(
        ctx,
        INFO,
        event_names::RUN_STARTED,
        Stage::Init,
        "Starting fm-core",
        version = env!("CARGO_PKG_VERSION")
    );

    let exit_code = match &cli.command {
        Commands::Merge(args) => run_merge(&cli.global, &ctx, args),
        Commands::PlumeMerge(args) => run_plume_merge(&cli.global, &ctx, args),
        Commands::TimeWindows(args) => run_time_windows(&cli.global, &ctx, args),
        Commands::Persist(args) => run_persist(&cli.global, &ctx, args),
        Commands::Check(args) => run_check(&cli.global, &ctx, args),
        Commands::Schema(args) => run_schema(args),
        Commands::Version => {
            print_version(&cli.global);
            ExitCode::Clean
        }
    };

    log_event!(
        ctx,
        INFO,
        event_names::RUN_FINISHED,
        Stage::Export,
        "fm-core finished",
        exit_code = exit_code.as_i32()
    );
    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Command implementations
// ============================================================================

fn run_merge(global: &GlobalOpts, ctx: &LogContext, args: &DocumentArgs) -> ExitCode {
    let loaded = match load(global, ctx) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };

    let result = load_input(ctx, args.input.as_deref()).and_then(|doc| {
        let merger = FireMerger::new(&loaded.config.merge);
        log_event!(
            ctx,
            INFO,
            event_names::MERGE_STARTED,
            Stage::Merge,
            "Merging fires",
            fires = doc.fires.len()
        );
        let merged = merger.merge(&doc.fires)?;
        log_event!(
            ctx,
            INFO,
            event_names::MERGE_FINISHED,
            Stage::Merge,
            "Merge finished",
            fires_in = doc.fires.len(),
            fires_out = merged.len()
        );
        Ok((doc.fires.len(), merged))
    });

    finish_document(global, ctx, "merge", args.output.as_deref(), result)
}

fn run_plume_merge(global: &GlobalOpts, ctx: &LogContext, args: &DocumentArgs) -> ExitCode {
    let loaded = match load(global, ctx) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };

    let result = plume_merger(&loaded).and_then(|merger| {
        let doc = load_input(ctx, args.input.as_deref())?;
        log_event!(
            ctx,
            INFO,
            event_names::PLUME_STARTED,
            Stage::Bucket,
            "Plume merging fires",
            fires = doc.fires.len(),
            spacing = merger.config().grid.spacing
        );
        let merged = merger.merge(&doc.fires)?;
        log_event!(
            ctx,
            INFO,
            event_names::PLUME_FINISHED,
            Stage::Aggregate,
            "Plume merge finished",
            fires_in = doc.fires.len(),
            fires_out = merged.len()
        );
        Ok((doc.fires.len(), merged))
    });

    finish_document(global, ctx, "plume-merge", args.output.as_deref(), result)
}

fn plume_merger(loaded: &LoadedConfig) -> fm_common::Result<PlumeMerger> {
    let config = loaded.config.plume_merge.clone().ok_or_else(|| {
        Error::Config("plume_merge section with a grid is required for plume-merge".to_string())
    })?;
    PlumeMerger::new(config)
}

fn run_time_windows(global: &GlobalOpts, ctx: &LogContext, args: &DocumentArgs) -> ExitCode {
    let loaded = match load(global, ctx) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };

    let result = load_input(ctx, args.input.as_deref())
        .and_then(|doc| met_time_windows(&doc.fires, &loaded.config))
        .and_then(|windows| {
            log_event!(
                ctx,
                INFO,
                event_names::WINDOWS_COMPUTED,
                Stage::Window,
                "Computed met time windows",
                windows = windows.len()
            );
            let payload = match global.format {
                OutputFormat::Json => {
                    let body = serde_json::json!({ "met_time_windows": windows });
                    format!("{}\n", serde_json::to_string_pretty(&body)?)
                }
                OutputFormat::Summary => {
                    let mut out = format!("time-windows: {} windows\n", windows.len());
                    for w in &windows {
                        out.push_str(&format!("  {} -> {}\n", w.start, w.end));
                    }
                    out
                }
            };
            write_output(args.output.as_deref(), &payload)
        });

    match result {
        Ok(()) => ExitCode::Clean,
        Err(e) => output_error(global, ctx, &e),
    }
}

fn run_persist(global: &GlobalOpts, ctx: &LogContext, args: &PersistArgs) -> ExitCode {
    let loaded = match load(global, ctx) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };
    let today = args
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let result = load_input(ctx, args.document.input.as_deref()).and_then(|doc| {
        let grown = persist_fires(
            &doc.fires,
            loaded.config.growth.persistence.as_ref(),
            today,
        )?;
        log_event!(
            ctx,
            INFO,
            event_names::GROWTH_PERSISTED,
            Stage::Grow,
            "Persistence applied",
            fires_in = doc.fires.len(),
            fires_out = grown.len()
        );
        Ok((doc.fires.len(), grown))
    });

    finish_document(
        global,
        ctx,
        "persist",
        args.document.output.as_deref(),
        result,
    )
}

fn run_check(global: &GlobalOpts, ctx: &LogContext, args: &CheckArgs) -> ExitCode {
    let loaded = match load(global, ctx) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };

    let mut fires_checked = None;
    if let Some(path) = &args.input {
        let checked = load_input(ctx, Some(path)).and_then(|doc| {
            doc.fires.iter().try_for_each(Fire::validate)?;
            Ok(doc.fires.len())
        });
        match checked {
            Ok(n) => fires_checked = Some(n),
            Err(e) => return output_error(global, ctx, &e),
        }
    }

    let config_path = loaded.path.as_ref().map(|p| p.display().to_string());
    match global.format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "status": "ok",
                "config": {
                    "source": loaded.source.to_string(),
                    "path": config_path,
                    "plume_merge": loaded.config.plume_merge.is_some(),
                    "persistence": loaded.config.growth.persistence.is_some(),
                },
                "fires_checked": fires_checked,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&response).unwrap_or_default()
            );
        }
        OutputFormat::Summary => {
            let mut line = format!(
                "check: ok (config: {}",
                config_path.as_deref().unwrap_or("defaults")
            );
            if let Some(n) = fires_checked {
                line.push_str(&format!(", {} fires", n));
            }
            line.push(')');
            println!("{}", line);
        }
    }
    ExitCode::Clean
}

fn run_schema(args: &SchemaArgs) -> ExitCode {
    let format = if args.compact {
        SchemaFormat::JsonCompact
    } else {
        SchemaFormat::Json
    };

    if args.list {
        for (name, desc) in available_schemas() {
            println!("{:<16} {}", name, desc);
        }
        return ExitCode::Clean;
    }

    if args.all {
        let all = serde_json::to_value(generate_all_schemas()).unwrap_or_default();
        println!("{}", format_schema(&all, format));
        return ExitCode::Clean;
    }

    let name = args.name.as_deref().unwrap_or("FireDocument");
    match generate_schema(name) {
        Some(schema) => {
            println!("{}", format_schema(&schema, format));
            ExitCode::Clean
        }
        None => {
            eprintln!("Unknown schema type: {}", name);
            eprintln!("Use --list to see available types");
            ExitCode::ArgsError
        }
    }
}

fn print_version(global: &GlobalOpts) {
    match global.format {
        OutputFormat::Json => {
            let version_info = serde_json::json!({
                "fm_core_version": env!("CARGO_PKG_VERSION"),
                "rust_version": env!("CARGO_PKG_RUST_VERSION"),
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&version_info).unwrap_or_default()
            );
        }
        OutputFormat::Summary => {
            println!("fm-core {}", env!("CARGO_PKG_VERSION"));
        }
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Load configuration, reporting failures on stderr.
fn load(global: &GlobalOpts, ctx: &LogContext) -> Result<LoadedConfig, ExitCode> {
    match load_config(global.config.as_deref()) {
        Ok(loaded) => {
            match &loaded.path {
                Some(path) => log_event!(
                    ctx,
                    INFO,
                    event_names::CONFIG_LOADED,
                    Stage::Init,
                    "Loaded configuration",
                    path = path.display().to_string(),
                    source = loaded.source.to_string()
                ),
                None => log_event!(
                    ctx,
                    INFO,
                    event_names::CONFIG_DEFAULT_USED,
                    Stage::Init,
                    "No config file found, using defaults"
                ),
            }
            Ok(loaded)
        }
        Err(e) => Err(output_config_error(global, ctx, &e)),
    }
}

fn load_input(ctx: &LogContext, path: Option<&Path>) -> fm_common::Result<FireDocument> {
    let doc = read_document(path)?;
    log_event!(
        ctx,
        INFO,
        event_names::INPUT_LOADED,
        Stage::Load,
        "Loaded fire document",
        fires = doc.fires.len()
    );
    Ok(doc)
}

/// Write a resulting fire list in the requested format.
fn finish_document(
    global: &GlobalOpts,
    ctx: &LogContext,
    command: &str,
    output: Option<&Path>,
    result: fm_common::Result<(usize, Vec<Fire>)>,
) -> ExitCode {
    let written = result.and_then(|(fires_in, fires)| {
        let payload = match global.format {
            OutputFormat::Json => render_document(&FireDocument::new(fires))?,
            OutputFormat::Summary => format!(
                "{}: {} fires in, {} fires out\n",
                command,
                fires_in,
                fires.len()
            ),
        };
        write_output(output, &payload)
    });

    match written {
        Ok(()) => {
            log_event!(
                ctx,
                DEBUG,
                event_names::OUTPUT_WRITTEN,
                Stage::Export,
                "Wrote output",
                command = command
            );
            ExitCode::Clean
        }
        Err(e) => output_error(global, ctx, &e),
    }
}

/// Report an engine error on stderr and map it to an exit code.
fn output_error(global: &GlobalOpts, ctx: &LogContext, error: &Error) -> ExitCode {
    let exit_code = ExitCode::for_error(error);
    if exit_code.is_internal_error() {
        log_event!(
            ctx,
            ERROR,
            event_names::INTERNAL_ERROR,
            Stage::Export,
            "Command failed",
            code = error.code()
        );
    }

    match global.format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "status": "error",
                "exit_code": exit_code.code_name(),
                "error": StructuredError::from(error),
            });
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&response).unwrap_or_default()
            );
        }
        OutputFormat::Summary => {
            eprintln!("{}", format_error_human(error, std::io::stderr().is_terminal()));
        }
    }
    exit_code
}

/// Report a config loading error on stderr.
fn output_config_error(global: &GlobalOpts, ctx: &LogContext, error: &ConfigError) -> ExitCode {
    let exit_code = match error {
        ConfigError::NotFound { .. }
        | ConfigError::ParseError { .. }
        | ConfigError::ValidationError(_) => ExitCode::ConfigError,
        ConfigError::IoError { .. } => ExitCode::IoError,
    };

    log_event!(
        ctx,
        ERROR,
        event_names::CONFIG_ERROR,
        Stage::Init,
        "Failed to load configuration",
        error = error.to_string()
    );

    match global.format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "status": "error",
                "exit_code": exit_code.code_name(),
                "error": {
                    "code": exit_code.as_i32(),
                    "message": error.to_string(),
                }
            });
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&response).unwrap_or_default()
            );
        }
        OutputFormat::Summary => {
            eprintln!("config error: {}", error);
        }
    }
    exit_code
}
