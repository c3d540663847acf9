//! Generates one or more images from a [`GenerationConfig`].

use std::path::PathBuf;
use std::time::Duration;

use color_placement::PlacementEngine;

use crate::error::{GenerateError, OutputError};
use crate::models::GenerationConfig;
use crate::rendering::write_png;
use crate::services::{LoggingReporter, SentinelFiles};

/// One image produced by [`Generator::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    pub path: PathBuf,
    pub seed: u64,
    /// `false` if a stop was requested before the canvas was full.
    pub completed: bool,
    pub checkpoints: Vec<PathBuf>,
    /// Working time, pauses excluded.
    pub elapsed: Duration,
    pub paused: Duration,
}

pub struct Generator {
    config: GenerationConfig,
    stamp: Option<String>,
}

impl Generator {
    /// Filenames are prefixed with the local time each image starts at.
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            config,
            stamp: None,
        }
    }

    /// Use a fixed filename prefix instead of the current time.
    pub fn with_stamp(config: GenerationConfig, stamp: impl Into<String>) -> Self {
        Self {
            config,
            stamp: Some(stamp.into()),
        }
    }

    /// Generate `count` images into the output directory.
    ///
    /// A stop request ends the current image early (written as
    /// `{stem}-partial.png`) and skips the remaining ones. Invalid options
    /// are rejected before anything is created on disk.
    pub fn run(&self) -> Result<Vec<GeneratedImage>, GenerateError> {
        let config = &self.config;
        config
            .placement_options(0)
            .validate()
            .map_err(color_placement::Error::from)?;
        std::fs::create_dir_all(&config.output).map_err(OutputError::from)?;

        let mut sentinels = SentinelFiles::new(
            config.pause_file.clone(),
            config.stop_file.clone(),
            config.poll_interval(),
        );

        let mut images = Vec::with_capacity(config.count);
        for index in 0..config.count {
            let label = format!("{}/{}", index + 1, config.count);
            let seed = config.image_seed(index);
            let stamp = self.stamp.clone().unwrap_or_else(now_stamp);
            let stem = image_stem(&stamp, index, config.count);
            tracing::info!(
                image = %label,
                seed,
                bits = config.bits,
                strategy = %config.strategy,
                "Started generating image"
            );

            let engine = PlacementEngine::new(&config.placement_options(seed))?;
            tracing::info!(
                image = %label,
                width = engine.canvas().width(),
                height = engine.canvas().height(),
                "Canvas ready"
            );

            let mut reporter =
                LoggingReporter::new(label.as_str(), config.output.clone(), stem.as_str(), config.optimize);
            let outcome = engine.run(&mut reporter, &mut sentinels)?;
            let checkpoints = reporter.finish()?;

            let filename = if outcome.completed {
                format!("{stem}.png")
            } else {
                format!("{stem}-partial.png")
            };
            let path = config.output.join(filename);
            let bytes = write_png(&path, &outcome.mosaic, config.optimize)?;
            tracing::info!(
                image = %label,
                path = %path.display(),
                bytes,
                elapsed_secs = outcome.progress.elapsed.as_secs(),
                paused_secs = outcome.progress.paused.as_secs(),
                "Image saved"
            );

            images.push(GeneratedImage {
                path,
                seed,
                completed: outcome.completed,
                checkpoints,
                elapsed: outcome.progress.elapsed,
                paused: outcome.progress.paused,
            });

            if !outcome.completed {
                tracing::warn!(
                    skipped = config.count - index - 1,
                    "Generation stopped early, skipping remaining images"
                );
                break;
            }
        }
        Ok(images)
    }
}

/// `{stamp}-every-color`, with a 1-based `-{n}` suffix when generating
/// more than one image.
pub fn image_stem(stamp: &str, index: usize, count: usize) -> String {
    if count > 1 {
        format!("{stamp}-every-color-{}", index + 1)
    } else {
        format!("{stamp}-every-color")
    }
}

fn now_stamp() -> String {
    chrono::Local::now().format("%Y%m%d-%H%M%S").to_string()
}
