//! Error types for the placement engine.
//!
//! [`ConfigError`] covers everything that can be rejected before a run
//! starts. [`PlacementError`] covers internal-consistency failures during a
//! run; every variant is fatal. [`Error`] wraps both for `?` propagation.

use thiserror::Error;

use crate::canvas::Coordinate;

/// Setup-time configuration failure. No partial state exists when one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The bit depth cannot be shared equally by three channels.
    #[error("bit depth {0} is not divisible by 3")]
    BitDepthNotDivisible(u32),

    /// The bit depth is divisible by 3 but outside the supported range.
    #[error("bit depth {bits} is out of range (expected {min}..={max})")]
    BitDepthOutOfRange { bits: u32, min: u32, max: u32 },

    /// A policy name did not match any known variant.
    #[error("unknown {kind} policy: {value:?}")]
    UnknownPolicy { kind: &'static str, value: String },

    /// No width/height pair multiplies out to the color count.
    #[error("cannot size a canvas for {colors} colors")]
    Sizing { colors: usize },

    /// Canvas cell count and color count disagree.
    #[error("canvas has {cells} cells but there are {colors} colors")]
    SizeMismatch { cells: usize, colors: usize },

    #[error("{name} must be at least 1")]
    ZeroValue { name: &'static str },

    /// A mosaic's cell list does not match its dimensions.
    #[error("{cells} cells do not fill a {width}x{height} mosaic")]
    MosaicShape {
        cells: usize,
        width: usize,
        height: usize,
    },
}

/// Internal-consistency failure during placement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("cell {0} is already filled")]
    CellOccupied(Coordinate),

    #[error("cell {coordinate} is outside the {width}x{height} canvas")]
    OutOfBounds {
        coordinate: Coordinate,
        width: usize,
        height: usize,
    },

    /// A frontier cell had no filled neighbor outside the seeding phase.
    #[error("frontier cell {0} has no filled neighbor to score against")]
    UnscoredCell(Coordinate),

    #[error("frontier is empty with {remaining} colors left to place")]
    FrontierExhausted { remaining: usize },

    #[error("no colors left but {empty} cells are still empty")]
    ColorsExhausted { empty: usize },

    #[error("walk has no cell left to visit with {remaining} colors left to place")]
    WalkStalled { remaining: usize },

    #[error("run finished with {placed} of {total} cells filled")]
    Incomplete { placed: usize, total: usize },
}

/// Unified error for the engine's public entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("placement error: {0}")]
    Placement(#[from] PlacementError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_depth_message() {
        let error = ConfigError::BitDepthNotDivisible(16);
        assert_eq!(error.to_string(), "bit depth 16 is not divisible by 3");
    }

    #[test]
    fn test_unknown_policy_message() {
        let error = ConfigError::UnknownPolicy {
            kind: "order",
            value: "sideways".to_string(),
        };
        assert_eq!(error.to_string(), "unknown order policy: \"sideways\"");
    }

    #[test]
    fn test_placement_error_uses_coordinate_display() {
        let error = PlacementError::CellOccupied(Coordinate::new(1, 2));
        assert_eq!(error.to_string(), "cell (1, 2) is already filled");
    }

    #[test]
    fn test_unified_error_from_config() {
        let error: Error = ConfigError::Sizing { colors: 7 }.into();
        assert!(matches!(error, Error::Config(ConfigError::Sizing { colors: 7 })));
        assert_eq!(
            error.to_string(),
            "configuration error: cannot size a canvas for 7 colors"
        );
    }

    #[test]
    fn test_unified_error_from_placement() {
        let error: Error = PlacementError::Incomplete { placed: 3, total: 8 }.into();
        assert!(matches!(error, Error::Placement(_)));
    }
}
