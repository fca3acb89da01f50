//! ev-advisor: multi-criteria EV recommendation and dataset analysis tool.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use ev_advisor::advisor::{
    BudgetTier, CafvPreference, PreferenceProfile, PriorityLabel, RangeImportance, UseCase,
};
use ev_advisor::cli::{self, QueryFilter};
use ev_advisor::config::{OutputConfig, QueryConfig, RecommendConfig, StatsConfig};
use ev_advisor::model::VehicleType;
use ev_advisor::reports::ReportFormat;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ev-advisor")]
#[command(version)]
#[command(about = "Multi-criteria EV recommendation and dataset analysis tool", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Matches found / command succeeded
    1  No matches for the given criteria or query
    2  Error occurred

EXAMPLES:
    # Quick match with the three core questions
    ev-advisor recommend registrations.csv --use-case commuting --budget budget --range-importance moderate

    # Personalized ranking from stated priorities
    ev-advisor recommend registrations.csv --priority longest-range --priority lowest-price --priority best-value

    # Direct search for informed buyers
    ev-advisor query registrations.csv \"model 3\" --min-range 250

    # Dataset overview as JSON
    ev-advisor stats registrations.csv -o json > summary.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Powertrain constraint accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum EvTypeArg {
    /// Battery Electric Vehicle (BEV only)
    Bev,
    /// Plug-in Hybrid (PHEV only)
    Phev,
}

impl From<EvTypeArg> for VehicleType {
    fn from(arg: EvTypeArg) -> Self {
        match arg {
            EvTypeArg::Bev => VehicleType::BatteryElectric,
            EvTypeArg::Phev => VehicleType::PluginHybrid,
        }
    }
}

/// Arguments for the `recommend` subcommand
#[derive(Parser)]
struct RecommendArgs {
    /// Path to the registration dataset CSV
    dataset: PathBuf,

    /// What the EV will primarily be used for
    #[arg(long, value_enum, default_value = "general")]
    use_case: UseCase,

    /// Budget range (hard constraint)
    #[arg(long, value_enum, default_value = "no-preference")]
    budget: BudgetTier,

    /// How important maximum electric range is
    #[arg(long, value_enum, default_value = "moderate")]
    range_importance: RangeImportance,

    /// Powertrain preference
    #[arg(long, value_enum)]
    ev_type: Option<EvTypeArg>,

    /// Preferred brand (repeat for several)
    #[arg(long = "brand", value_name = "MAKE")]
    brands: Vec<String>,

    /// Minimum model year
    #[arg(long)]
    min_year: Option<u16>,

    /// Incentive eligibility preference
    #[arg(long, value_enum, default_value = "dont-care")]
    cafv: CafvPreference,

    /// Ranked priority (give exactly three, most important first);
    /// overrides the use-case weight table
    #[arg(long = "priority", value_enum, value_name = "PRIORITY")]
    priorities: Vec<PriorityLabel>,

    /// Number of ranked candidates in the comparison table
    #[arg(long, default_value = "10")]
    top: usize,

    /// Output format (auto detects TTY: summary if interactive, JSON otherwise)
    #[arg(short, long, value_enum, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `query` subcommand
#[derive(Parser)]
struct QueryArgs {
    /// Path to the registration dataset CSV
    dataset: PathBuf,

    /// Free-text pattern matched against make, model, type, and CAFV text
    pattern: Option<String>,

    /// Filter by make (substring)
    #[arg(long)]
    make: Option<String>,

    /// Filter by model (substring)
    #[arg(long)]
    model: Option<String>,

    /// Minimum electric range in miles
    #[arg(long)]
    min_range: Option<f64>,

    /// Minimum model year
    #[arg(long)]
    min_year: Option<u16>,

    /// Powertrain filter
    #[arg(long, value_enum)]
    ev_type: Option<EvTypeArg>,

    /// Maximum number of results to show
    #[arg(long, default_value = "15")]
    limit: usize,

    /// Output format (auto detects TTY: table if interactive, JSON otherwise)
    #[arg(short, long, value_enum, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `stats` subcommand
#[derive(Parser)]
struct StatsArgs {
    /// Path to the registration dataset CSV
    dataset: PathBuf,

    /// Minimum model year included in yearly series
    #[arg(long, default_value = "2010")]
    min_year: u16,

    /// Entries kept in top-makes and catalog listings
    #[arg(long, default_value = "10")]
    top: usize,

    /// Output format (auto detects TTY: summary if interactive, JSON otherwise)
    #[arg(short, long, value_enum, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend vehicles matching a preference profile
    Recommend(RecommendArgs),

    /// Search the dataset directly
    Query(QueryArgs),

    /// Summarize the dataset
    Stats(StatsArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(ev_advisor::output::exit_codes::ERROR);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Recommend(args) => {
            let priorities = match args.priorities.len() {
                0 => None,
                3 => Some([args.priorities[0], args.priorities[1], args.priorities[2]]),
                n => anyhow::bail!(
                    "exactly 3 --priority values are required when ranking priorities (got {n})"
                ),
            };

            let config = RecommendConfig {
                dataset: args.dataset,
                profile: PreferenceProfile {
                    use_case: args.use_case,
                    budget: args.budget,
                    range_importance: args.range_importance,
                    vehicle_type: args.ev_type.map(VehicleType::from),
                    brands: args.brands,
                    min_year: args.min_year,
                    cafv: args.cafv,
                    priorities,
                },
                top: args.top,
                output: OutputConfig {
                    format: args.output,
                    file: args.output_file,
                    no_color: cli.no_color,
                    quiet: cli.quiet,
                },
            };

            let exit_code = cli::run_recommend(config)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::Query(args) => {
            let filter = QueryFilter {
                pattern: args.pattern,
                make: args.make,
                model: args.model,
                min_range: args.min_range,
                min_year: args.min_year,
                vehicle_type: args.ev_type.map(VehicleType::from),
            };

            let config = QueryConfig {
                dataset: args.dataset,
                limit: args.limit,
                output: OutputConfig {
                    format: args.output,
                    file: args.output_file,
                    no_color: cli.no_color,
                    quiet: cli.quiet,
                },
            };

            let exit_code = cli::run_query(config, filter)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::Stats(args) => {
            let config = StatsConfig {
                dataset: args.dataset,
                min_year: args.min_year,
                top: args.top,
                output: OutputConfig {
                    format: args.output,
                    file: args.output_file,
                    no_color: cli.no_color,
                    quiet: cli.quiet,
                },
            };

            let exit_code = cli::run_stats(config)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "ev-advisor", &mut io::stdout());
            Ok(())
        }
    }
}
