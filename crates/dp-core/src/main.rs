//! Dice Posterior command-line entry point.
//!
//! Selects a dice event (or the fixed coin scenario), runs one posterior
//! update and prints a report; optionally writes an SVG figure.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dp_common::error::format_error_human;
use dp_common::{Error, OutputFormat, Result, StructuredError, SCHEMA_VERSION};
use dp_core::config::{load_config, ResolvedConfig};
use dp_core::exit_codes::ExitCode;
use dp_core::inference::{Estimate, EstimatorConfig, PosteriorEstimator};
use dp_core::logging::{event_names, generate_run_id, init_logging, LogConfig, LogFormat, LogLevel};
use dp_core::render::{write_svg, EstimateReport, EventsReport, FigureLabels, ScenarioReport};
use dp_core::sampling::seeded_rng;
use dp_core::scenario::CoinScenario;
use dp_core::schema::{
    available_schemas, format_schema, generate_all_schemas, generate_schema, SchemaFormat,
};
use dp_core::selection::{parse_dice_count, parse_event};

/// Dice Posterior - Bayesian updates for dice events and coin flips
#[derive(Parser)]
#[command(name = "dp-core")]
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
    /// Path to settings.json
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Seed for the random source (overrides the configured seed)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log format on stderr (human, jsonl)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the success probability of a dice event
    Dice(DiceArgs),

    /// Update a Beta prior with a fixed run of coin flips
    Coin(CoinArgs),

    /// List dice events with probabilities for a dice count
    Events(EventsArgs),

    /// Settings management
    Config(ConfigArgs),

    /// Print JSON schema for report types
    Schema(SchemaArgs),

    /// Print version information
    Version,
}

// ============================================================================
// Command argument structs
// ============================================================================

#[derive(Args, Debug)]
struct FigureArgs {
    /// Write the SVG figure to this path
    #[arg(long)]
    plot: Option<PathBuf>,

    /// Include display-scaled curves in JSON output
    #[arg(long)]
    curves: bool,
}

#[derive(Args, Debug)]
struct DiceArgs {
    /// Event label or key (see `dp-core events`)
    event: String,

    /// Number of dice; blank or non-numeric text uses the configured default
    #[arg(long, short = 'n', allow_hyphen_values = true)]
    dice: Option<String>,

    #[command(flatten)]
    figure: FigureArgs,
}

#[derive(Args, Debug)]
struct CoinArgs {
    /// Number of flips
    #[arg(long)]
    trials: Option<u32>,

    /// Number of heads observed
    #[arg(long)]
    heads: Option<u32>,

    /// Prior alpha
    #[arg(long)]
    alpha: Option<f64>,

    /// Prior beta
    #[arg(long)]
    beta: Option<f64>,

    #[command(flatten)]
    figure: FigureArgs,
}

#[derive(Args, Debug)]
struct EventsArgs {
    /// Number of dice to adjust the probabilities for
    #[arg(long, short = 'n', allow_hyphen_values = true)]
    dice: Option<String>,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show the effective settings and where they came from
    Show,
    /// Validate a settings file
    Validate {
        /// File to validate (defaults to the resolved settings file)
        path: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct SchemaArgs {
    /// Type to print; all types when omitted
    name: Option<String>,

    /// List available types
    #[arg(long)]
    list: bool,

    /// Single-line JSON
    #[arg(long)]
    compact: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = LogLevel::from_verbosity(cli.global.verbose, cli.global.quiet);
    let log_config = LogConfig::from_env(level, cli.global.log_format);
    init_logging(&log_config);

    let run_id = generate_run_id();
    let span = tracing::info_span!("run", run_id = %run_id);
    let _enter = span.enter();
    tracing::debug!(event = event_names::RUN_STARTED, "run started");

    let global = &cli.global;
    let result = match &cli.command {
        Commands::Dice(args) => run_dice(global, args, &run_id),
        Commands::Coin(args) => run_coin(global, args, &run_id),
        Commands::Events(args) => run_events(global, args),
        Commands::Config(args) => run_config(global, args),
        Commands::Schema(args) => run_schema(global, args),
        Commands::Version => print_version(global),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(err) => output_error(global, &err),
    };
    tracing::debug!(
        event = event_names::RUN_FINISHED,
        exit_code = exit_code.code_name(),
        "run finished"
    );

    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Command implementations
// ============================================================================

fn load_settings(global: &GlobalOpts) -> Result<ResolvedConfig> {
    let config = load_config(global.config.as_deref())?;
    tracing::debug!(
        event = event_names::CONFIG_LOADED,
        source = %config.source,
        path = ?config.path,
        hash = ?config.hash,
        "settings loaded"
    );
    Ok(config)
}

fn run_dice(global: &GlobalOpts, args: &DiceArgs, run_id: &str) -> Result<ExitCode> {
    let config = load_settings(global)?;
    let settings = &config.settings;

    let event = parse_event(&args.event)?;
    let (n_dice, _) =
        parse_dice_count(args.dice.as_deref(), settings.default_dice, settings.max_dice);

    let estimator = PosteriorEstimator::new(EstimatorConfig::from_settings(settings))?;
    let mut rng = seeded_rng(global.seed.or(settings.seed));
    let result = estimator.estimate_event(event, n_dice, &mut rng)?;

    let labels = FigureLabels::for_event(
        event,
        result.n_dice,
        &result.estimate.prior,
        &result.estimate.outcome,
    );
    let report = EstimateReport::for_event(run_id, &result, config.snapshot());
    emit_estimate(global, report, &result.estimate, &labels, &args.figure)
}

fn run_coin(global: &GlobalOpts, args: &CoinArgs, run_id: &str) -> Result<ExitCode> {
    let config = load_settings(global)?;
    let settings = &config.settings;

    let scenario =
        CoinScenario::with_overrides(&settings.coin, args.trials, args.heads, args.alpha, args.beta)?;
    let estimator = PosteriorEstimator::new(EstimatorConfig::from_settings(settings))?;
    let estimate = estimator.estimate(scenario.prior, scenario.outcome)?;

    let labels = FigureLabels::for_coin(&scenario.prior, &scenario.outcome);
    let report = EstimateReport::new(run_id, ScenarioReport::Coin, &estimate, config.snapshot());
    emit_estimate(global, report, &estimate, &labels, &args.figure)
}

fn emit_estimate(
    global: &GlobalOpts,
    report: EstimateReport,
    estimate: &Estimate,
    labels: &FigureLabels,
    figure: &FigureArgs,
) -> Result<ExitCode> {
    let display = estimate.curves.display();
    if let Some(path) = &figure.plot {
        write_svg(path, &display, labels)?;
    }
    let report = report
        .with_plot_path(figure.plot.clone())
        .with_curves(figure.curves.then_some(display));

    match global.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Md => print!("{}", report.to_markdown()),
        OutputFormat::Summary => println!("{}", report.to_summary()),
    }
    Ok(ExitCode::Clean)
}

fn run_events(global: &GlobalOpts, args: &EventsArgs) -> Result<ExitCode> {
    let config = load_settings(global)?;
    let settings = &config.settings;

    let (n_dice, _) =
        parse_dice_count(args.dice.as_deref(), settings.default_dice, settings.max_dice);
    let mut rng = seeded_rng(global.seed.or(settings.seed));
    let report = EventsReport::build(n_dice, settings.simulation_samples, &mut rng);

    match global.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Md => print!("{}", report.to_markdown()),
        OutputFormat::Summary => println!("{}", report.to_summary()),
    }
    Ok(ExitCode::Clean)
}

fn run_config(global: &GlobalOpts, args: &ConfigArgs) -> Result<ExitCode> {
    match &args.command {
        ConfigCommands::Show => run_config_show(global),
        ConfigCommands::Validate { path } => run_config_validate(global, path.as_ref()),
    }
}

/// Display the effective settings (defaults when no file is present).
fn run_config_show(global: &GlobalOpts) -> Result<ExitCode> {
    let config = load_settings(global)?;
    let snapshot = config.snapshot();

    match global.format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "source": {
                    "path": snapshot.path.as_ref().map(|p| p.display().to_string()),
                    "origin": snapshot.source,
                    "hash": snapshot.hash,
                    "using_defaults": snapshot.path.is_none(),
                },
                "settings": &config.settings,
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Md => {
            println!("# dp-core settings");
            println!();
            match &snapshot.path {
                Some(path) => println!("Source: `{}` ({})", path.display(), snapshot.source),
                None => println!("Source: {}", snapshot.source),
            }
            println!();
            println!("```json");
            println!("{}", serde_json::to_string_pretty(&config.settings)?);
            println!("```");
        }
        OutputFormat::Summary => {
            let s = &config.settings;
            println!(
                "[{}] grid_points={} prior_scale={} simulation_samples={} default_dice={} max_dice={}",
                snapshot.source,
                s.grid_points,
                s.prior_scale,
                s.simulation_samples,
                s.default_dice,
                s.max_dice
            );
        }
    }
    Ok(ExitCode::Clean)
}

fn run_config_validate(global: &GlobalOpts, path: Option<&PathBuf>) -> Result<ExitCode> {
    let target = path.or(global.config.as_ref());
    let config = load_config(target.map(PathBuf::as_path))?;
    let snapshot = config.snapshot();

    match global.format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "status": "valid",
                "path": snapshot.path.as_ref().map(|p| p.display().to_string()),
                "hash": snapshot.hash,
                "using_defaults": snapshot.path.is_none(),
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        _ => match &snapshot.path {
            Some(path) => println!("valid: {}", path.display()),
            None => println!("valid: builtin defaults"),
        },
    }
    Ok(ExitCode::Clean)
}

fn run_schema(global: &GlobalOpts, args: &SchemaArgs) -> Result<ExitCode> {
    if args.list {
        for (name, description) in available_schemas() {
            println!("{:<16} {}", name, description);
        }
        return Ok(ExitCode::Clean);
    }

    let format = if args.compact {
        SchemaFormat::JsonCompact
    } else {
        SchemaFormat::Json
    };

    let schema = match &args.name {
        Some(name) => match generate_schema(name) {
            Some(schema) => schema,
            None => {
                let use_color = !global.no_color && std::io::stderr().is_terminal();
                let red = if use_color { "\x1b[31m" } else { "" };
                let reset = if use_color { "\x1b[0m" } else { "" };
                eprintln!("{red}✗{reset} Unknown schema type: {name}");
                eprintln!("  Run 'dp-core schema --list' to see available types.");
                return Ok(ExitCode::ArgsError);
            }
        },
        None => serde_json::to_value(generate_all_schemas())?,
    };
    println!("{}", format_schema(&schema, format)?);
    Ok(ExitCode::Clean)
}

fn print_version(global: &GlobalOpts) -> Result<ExitCode> {
    match global.format {
        OutputFormat::Json => {
            let version_info = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "dp_core_version": env!("CARGO_PKG_VERSION"),
                "rust_version": env!("CARGO_PKG_RUST_VERSION"),
            });
            println!("{}", serde_json::to_string_pretty(&version_info)?);
        }
        _ => {
            println!("dp-core {}", env!("CARGO_PKG_VERSION"));
            println!("schema version: {}", SCHEMA_VERSION);
        }
    }
    Ok(ExitCode::Clean)
}

/// Print an error in the requested format and map it to an exit code.
fn output_error(global: &GlobalOpts, err: &Error) -> ExitCode {
    let code = ExitCode::from(err);
    match global.format {
        OutputFormat::Json => {
            let structured = StructuredError::from(err).with_context("exit_code", code.code_name());
            println!("{}", structured.to_json_pretty());
        }
        _ => {
            let use_color = !global.no_color && std::io::stderr().is_terminal();
            eprintln!("{}", format_error_human(err, use_color));
        }
    }
    code
}
