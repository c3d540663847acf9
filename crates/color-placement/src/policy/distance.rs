//! Scoring a candidate color against a cell's filled neighbors.

use serde::Deserialize;

use crate::color::Color;

/// How per-neighbor squared channel distances are aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum DistanceMetric {
    /// Smallest distance to any single filled neighbor.
    #[default]
    Min,
    /// Mean distance over all filled neighbors.
    Average,
}

policy_names!(DistanceMetric, "distance", {
    Min => "min",
    Average => "average",
});

impl DistanceMetric {
    /// Aggregate distance between `color` and `neighbors`.
    ///
    /// Returns `None` when there are no neighbors; such a cell cannot be
    /// scored.
    ///
    /// # Example
    /// ```
    /// use color_placement::{Color, DistanceMetric};
    ///
    /// let c = Color::new(0, 0, 0);
    /// let around = [Color::new(0, 0, 2), Color::new(0, 0, 4)];
    /// assert_eq!(DistanceMetric::Min.score(&c, around.into_iter()), Some(4.0));
    /// assert_eq!(DistanceMetric::Average.score(&c, around.into_iter()), Some(10.0));
    /// assert_eq!(DistanceMetric::Min.score(&c, std::iter::empty()), None);
    /// ```
    pub fn score(&self, color: &Color, neighbors: impl Iterator<Item = Color>) -> Option<f64> {
        match self {
            DistanceMetric::Min => neighbors
                .map(|n| color.squared_distance(&n))
                .min()
                .map(f64::from),
            DistanceMetric::Average => {
                let (sum, count) = neighbors.fold((0u64, 0u32), |(sum, count), n| {
                    (sum + color.squared_distance(&n) as u64, count + 1)
                });
                (count > 0).then(|| sum as f64 / count as f64)
            }
        }
    }
}
