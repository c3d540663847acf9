use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use color_placement::{
    ColorOrder, DistanceMetric, PlacementOptions, SeedPolicy, StartColor, StartPosition,
    StrategyKind,
};
use serde::Deserialize;

use crate::error::ConfigFileError;

/// Generation settings, loaded from an optional YAML file and overridden by
/// command line flags.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    /// Color depth, divisible by 3
    #[serde(default = "default_bits")]
    pub bits: u32,

    /// Number of images to generate
    #[serde(default = "default_count")]
    pub count: usize,

    #[serde(default)]
    pub start_position: StartPosition,

    /// Seed points for corner and random start positions
    #[serde(default = "default_seed_points")]
    pub seed_points: usize,

    #[serde(default)]
    pub start_color: StartColor,

    #[serde(default)]
    pub order: ColorOrder,

    #[serde(default)]
    pub distance: DistanceMetric,

    #[serde(default)]
    pub strategy: StrategyKind,

    /// Progress pictures per image
    #[serde(default)]
    pub checkpoints: usize,

    /// Base RNG seed; image `i` uses `seed + i`. Derived from the wall
    /// clock when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Output directory, created if missing
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Placement pauses while this file exists
    #[serde(default)]
    pub pause_file: Option<PathBuf>,

    /// Generation stops early once this file exists
    #[serde(default)]
    pub stop_file: Option<PathBuf>,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Averaging radius of the cube-walk strategy
    #[serde(default = "default_neighborhood_radius")]
    pub neighborhood_radius: usize,

    /// Recompress written PNGs with oxipng
    #[serde(default)]
    pub optimize: bool,
}

fn default_bits() -> u32 {
    15
}

fn default_count() -> usize {
    1
}

fn default_seed_points() -> usize {
    1
}

fn default_output() -> PathBuf {
    PathBuf::from("output")
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_neighborhood_radius() -> usize {
    5
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            bits: default_bits(),
            count: default_count(),
            start_position: StartPosition::default(),
            seed_points: default_seed_points(),
            start_color: StartColor::default(),
            order: ColorOrder::default(),
            distance: DistanceMetric::default(),
            strategy: StrategyKind::default(),
            checkpoints: 0,
            seed: None,
            output: default_output(),
            pause_file: None,
            stop_file: None,
            poll_interval_ms: default_poll_interval_ms(),
            neighborhood_radius: default_neighborhood_radius(),
            optimize: false,
        }
    }
}

impl GenerationConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigFileError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|source| ConfigFileError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::info!(path = %path.display(), bits = config.bits, "Loaded configuration");
        Ok(config)
    }

    /// Engine options for one image
    pub fn placement_options(&self, rng_seed: u64) -> PlacementOptions {
        PlacementOptions::new()
            .bits(self.bits)
            .seeds(SeedPolicy::new(self.start_position, self.seed_points))
            .start_color(Some(self.start_color))
            .order(self.order)
            .distance(self.distance)
            .strategy(self.strategy)
            .checkpoints(self.checkpoints)
            .rng_seed(rng_seed)
            .neighborhood_radius(self.neighborhood_radius)
            .poll_interval(self.poll_interval())
    }

    /// RNG seed for the image at `index` (0-based)
    pub fn image_seed(&self, index: usize) -> u64 {
        match self.seed {
            Some(base) => base.wrapping_add(index as u64),
            None => wall_clock_seed(),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}
