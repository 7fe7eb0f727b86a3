//! skipstone CLI: throw a stone and watch it skip or sink.

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "skipstone")]
#[command(version, about = "Skipping stone flight and water-impact simulator")]
struct Cli {
    /// Show the simulation's debug log and every event on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Throw a stone and print every tick until it sinks.
    Run(RunArgs),

    /// List the available presets.
    List {
        /// Directory containing stones/, launches/ and environments/.
        #[arg(short, long, default_value = "presets")]
        presets: String,
    },
}

#[derive(Args)]
pub struct RunArgs {
    /// Directory containing stones/, launches/ and environments/.
    #[arg(short, long, default_value = "presets")]
    pub presets: String,

    /// Stone preset name. Overrides --area, --mass and --size.
    #[arg(long)]
    pub stone: Option<String>,

    /// Launch preset name. Overrides --velocity, --angle and --height.
    #[arg(long)]
    pub launch: Option<String>,

    /// Environment preset name (default: built-in calm lake).
    #[arg(long)]
    pub environment: Option<String>,

    /// Cross-sectional area (m²).
    #[arg(long, default_value_t = 0.01)]
    pub area: f64,

    /// Mass (kg).
    #[arg(long, default_value_t = 0.1)]
    pub mass: f64,

    /// Characteristic length (m).
    #[arg(long, default_value_t = 0.05)]
    pub size: f64,

    /// Release speed (m/s).
    #[arg(long, default_value_t = 10.0)]
    pub velocity: f64,

    /// Angle of attack above horizontal (degrees).
    #[arg(long, default_value_t = 20.0, allow_hyphen_values = true)]
    pub angle: f64,

    /// Release height above the water (m).
    #[arg(long, default_value_t = 1.0)]
    pub height: f64,

    /// Stop after this many ticks even if the stone is still skipping.
    #[arg(long, default_value_t = 1000)]
    pub max_ticks: u64,

    /// Only print impacts and the summary.
    #[arg(short, long)]
    pub quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Run(args) => commands::run(&args, cli.verbose),
        Commands::List { presets } => commands::list(&presets),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
