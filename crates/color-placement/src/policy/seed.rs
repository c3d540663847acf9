//! Seed cell selection.

use rand::Rng;
use serde::Deserialize;

use crate::canvas::Coordinate;

/// Where the seed cells go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum StartPosition {
    /// A single seed in the middle of the grid.
    #[default]
    Center,
    /// Up to four seeds on the grid corners.
    Corner,
    /// Seeds on distinct, uniformly random cells.
    Random,
}

policy_names!(StartPosition, "start position", {
    Center => "center",
    Corner => "corner",
    Random => "random",
});

/// Seed placement: a position rule plus how many seed points to use.
///
/// `points` is ignored by [`StartPosition::Center`], caps the corners used by
/// [`StartPosition::Corner`] at four, and is the exact count for
/// [`StartPosition::Random`] (clamped to the number of cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPolicy {
    pub position: StartPosition,
    pub points: usize,
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self::center()
    }
}

impl SeedPolicy {
    pub fn new(position: StartPosition, points: usize) -> Self {
        Self { position, points }
    }

    pub fn center() -> Self {
        Self::new(StartPosition::Center, 1)
    }

    pub fn corners(points: usize) -> Self {
        Self::new(StartPosition::Corner, points)
    }

    pub fn random(points: usize) -> Self {
        Self::new(StartPosition::Random, points)
    }

    /// Seed cells for a `width x height` grid, in placement order.
    ///
    /// The returned cells are distinct. Only [`StartPosition::Random`] draws
    /// from `rng`.
    pub fn seed_cells<R: Rng + ?Sized>(
        &self,
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> Vec<Coordinate> {
        let cells = width * height;
        if cells == 0 {
            return Vec::new();
        }

        match self.position {
            StartPosition::Center => vec![Coordinate::new(height / 2, width / 2)],
            StartPosition::Corner => {
                let corners = [
                    Coordinate::new(0, 0),
                    Coordinate::new(0, width - 1),
                    Coordinate::new(height - 1, 0),
                    Coordinate::new(height - 1, width - 1),
                ];
                let mut seeds: Vec<Coordinate> = Vec::with_capacity(4);
                for corner in corners {
                    if !seeds.contains(&corner) {
                        seeds.push(corner);
                    }
                }
                seeds.truncate(self.points.clamp(1, 4));
                seeds
            }
            StartPosition::Random => {
                let k = self.points.clamp(1, cells);
                rand::seq::index::sample(rng, cells, k)
                    .into_iter()
                    .map(|i| Coordinate::new(i / width, i % width))
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_center_seed() {
        let mut rng = StdRng::seed_from_u64(0);
        let seeds = SeedPolicy::center().seed_cells(4, 2, &mut rng);
        assert_eq!(seeds, vec![Coordinate::new(1, 2)]);
    }

    #[test]
    fn test_corner_seeds_in_fixed_order() {
        let mut rng = StdRng::seed_from_u64(0);
        let seeds = SeedPolicy::corners(4).seed_cells(4, 2, &mut rng);
        assert_eq!(
            seeds,
            vec![
                Coordinate::new(0, 0),
                Coordinate::new(0, 3),
                Coordinate::new(1, 0),
                Coordinate::new(1, 3),
            ]
        );
    }

    #[test]
    fn test_corner_seed_count_is_capped() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(SeedPolicy::corners(1).seed_cells(8, 8, &mut rng).len(), 1);
        assert_eq!(SeedPolicy::corners(10).seed_cells(8, 8, &mut rng).len(), 4);
    }

    #[test]
    fn test_corner_seeds_deduplicate_on_single_row() {
        let mut rng = StdRng::seed_from_u64(0);
        let seeds = SeedPolicy::corners(4).seed_cells(5, 1, &mut rng);
        assert_eq!(seeds, vec![Coordinate::new(0, 0), Coordinate::new(0, 4)]);
    }

    #[test]
    fn test_random_seeds_are_distinct_and_reproducible() {
        let policy = SeedPolicy::random(10);
        let a = policy.seed_cells(8, 4, &mut StdRng::seed_from_u64(42));
        let b = policy.seed_cells(8, 4, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert_eq!(a.len(), 10);
        assert_eq!(a.iter().collect::<HashSet<_>>().len(), 10);
        assert!(a.iter().all(|c| c.row < 4 && c.col < 8));
    }

    #[test]
    fn test_random_seed_count_is_clamped() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(SeedPolicy::random(0).seed_cells(2, 2, &mut rng).len(), 1);
        assert_eq!(SeedPolicy::random(99).seed_cells(2, 2, &mut rng).len(), 4);
    }

    #[test]
    fn test_parse_start_position() {
        assert_eq!("Corner".parse::<StartPosition>(), Ok(StartPosition::Corner));
        assert_eq!(
            "edge".parse::<StartPosition>(),
            Err(ConfigError::UnknownPolicy {
                kind: "start position",
                value: "edge".to_string()
            })
        );
    }
}
