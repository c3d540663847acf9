use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use color_placement::{
    Canvas, ColorOrder, ColorSpace, DistanceMetric, StartColor, StartPosition, StrategyKind,
};
use every_color::models::GenerationConfig;
use every_color::services::Generator;

const LOG_FILE: &str = "every-color.log";

#[derive(Parser)]
#[command(name = "every-color")]
#[command(about = "Generate images that contain every color of an RGB space exactly once")]
struct Cli {
    /// Log destination
    #[arg(short, long, value_enum, default_value_t = LogTarget::Console, global = true)]
    log: LogTarget,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogTarget {
    Console,
    File,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate images
    Generate(GenerateArgs),
    /// Show color count and canvas size for a bit depth
    Info {
        /// Color depth, divisible by 3
        #[arg(short, long, default_value_t = 15)]
        bits: u32,
    },
}

/// Flags override values from the configuration file.
#[derive(Args)]
struct GenerateArgs {
    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Color depth, divisible by 3 (default 15)
    #[arg(short, long)]
    bits: Option<u32>,

    /// Number of images to generate
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Seed position: center, corner or random
    #[arg(short = 'p', long)]
    start_position: Option<StartPosition>,

    /// Seed points for corner and random start positions
    #[arg(long)]
    seed_points: Option<usize>,

    /// First color: white, black or random
    #[arg(short = 'c', long)]
    start_color: Option<StartColor>,

    /// Color order: identity, reverse, random, hue, saturation or brightness
    #[arg(long)]
    order: Option<ColorOrder>,

    /// Neighbor distance: min or average
    #[arg(long)]
    distance: Option<DistanceMetric>,

    /// Placement strategy: frontier or cube-walk
    #[arg(long)]
    strategy: Option<StrategyKind>,

    /// Progress pictures per image
    #[arg(long)]
    checkpoints: Option<usize>,

    /// RNG seed (derived from the clock if not set anywhere)
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Placement pauses while this file exists
    #[arg(long)]
    pause_file: Option<PathBuf>,

    /// Generation stops early once this file exists
    #[arg(long)]
    stop_file: Option<PathBuf>,

    /// Pause poll interval in milliseconds
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Averaging radius of the cube-walk strategy
    #[arg(long)]
    neighborhood_radius: Option<usize>,

    /// Recompress PNGs with oxipng
    #[arg(long)]
    optimize: bool,
}

impl GenerateArgs {
    fn into_config(self) -> anyhow::Result<GenerationConfig> {
        let mut config = match &self.config {
            Some(path) => GenerationConfig::load(path)?,
            None => GenerationConfig::default(),
        };

        macro_rules! apply {
            ($args:ident => $config:ident: $($field:ident),+ $(,)?) => {
                $(if let Some(value) = $args.$field {
                    $config.$field = value;
                })+
            };
        }
        let args = self;
        apply!(args => config:
            bits,
            count,
            start_position,
            seed_points,
            start_color,
            order,
            distance,
            strategy,
            checkpoints,
            output,
            poll_interval_ms,
            neighborhood_radius,
        );
        if args.seed.is_some() {
            config.seed = args.seed;
        }
        if args.pause_file.is_some() {
            config.pause_file = args.pause_file;
        }
        if args.stop_file.is_some() {
            config.stop_file = args.stop_file;
        }
        config.optimize |= args.optimize;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log)?;

    match cli.command {
        Commands::Generate(args) => run_generate_command(args),
        Commands::Info { bits } => run_info_command(bits),
    }
}

fn init_logging(target: LogTarget) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "every_color=info,color_placement=info".into());

    let (console, file) = match target {
        LogTarget::Console => (Some(tracing_subscriber::fmt::layer()), None),
        LogTarget::File => {
            let file = std::fs::File::create(LOG_FILE)
                .with_context(|| format!("Failed to create {LOG_FILE}"))?;
            println!("Logging in {LOG_FILE}");
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file));
            (None, Some(layer))
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .init();
    Ok(())
}

fn run_generate_command(args: GenerateArgs) -> anyhow::Result<()> {
    let config = args.into_config()?;
    tracing::info!(
        bits = config.bits,
        count = config.count,
        output = %config.output.display(),
        "Generation started"
    );

    let images = Generator::new(config)
        .run()
        .context("Generation failed")?;

    for image in &images {
        let status = if image.completed { "" } else { " (stopped early)" };
        println!(
            "Generated {}{status} with seed {}",
            image.path.display(),
            image.seed
        );
    }
    tracing::info!(images = images.len(), "Generation finished");
    Ok(())
}

fn run_info_command(bits: u32) -> anyhow::Result<()> {
    let space = ColorSpace::new(bits)?;
    let (width, height) = Canvas::dimensions_for(space.len())?;

    println!("Bit depth:  {bits}");
    println!("Levels:     {} per channel", space.levels());
    println!("Step:       {}", space.step());
    println!("Colors:     {}", space.len());
    println!("Canvas:     {width}x{height}");
    Ok(())
}
