use crate::color::{Color, ColorSpace};

/// 3-D index of the still-available colors, keyed by channel level.
///
/// Nearest-color search starts at a given index and grows cubic shells
/// outward, so lookups near the previous color stay cheap even when most of
/// the space is still available.
#[derive(Debug, Clone)]
pub struct ColorCube {
    space: ColorSpace,
    available: Vec<bool>,
    remaining: usize,
}

impl ColorCube {
    /// A cube with every color of `space` available.
    pub fn new(space: ColorSpace) -> Self {
        Self {
            space,
            available: vec![true; space.len()],
            remaining: space.len(),
        }
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// `false` for taken colors and for indices outside the cube.
    #[inline]
    pub fn is_available(&self, index: [usize; 3]) -> bool {
        self.flat(index).is_some_and(|flat| self.available[flat])
    }

    /// Mark the color at `index` as used. Returns `None` if it already was
    /// or if `index` lies outside the cube.
    pub fn take(&mut self, index: [usize; 3]) -> Option<Color> {
        let flat = self.flat(index)?;
        if !self.available[flat] {
            return None;
        }
        self.available[flat] = false;
        self.remaining -= 1;
        Some(self.space.color_at(index[0], index[1], index[2]))
    }

    /// Closest available color to `target`, searching outward from `origin`.
    ///
    /// Shells of growing Chebyshev radius are scanned until the best
    /// candidate is within one quantization step (squared distance at most
    /// `step^2`) or the shell covers the whole cube. Ties keep the first
    /// candidate in scan order. An `origin` outside the cube is clamped onto
    /// it. Returns `None` only when nothing is left.
    pub fn nearest(&self, origin: [usize; 3], target: [f64; 3]) -> Option<([usize; 3], Color)> {
        if self.remaining == 0 {
            return None;
        }

        let top = self.space.levels() - 1;
        let origin = origin.map(|c| c.min(top));
        let step = self.space.step() as f64;
        let close_enough = step * step;
        let extent = origin
            .iter()
            .map(|&c| c.max(top - c))
            .max()
            .unwrap_or(0);

        let mut best: Option<([usize; 3], Color, f64)> = None;
        for radius in 0..=extent {
            self.visit_shell(origin, radius, |index| {
                if !self.is_available(index) {
                    return;
                }
                let color = self.space.color_at(index[0], index[1], index[2]);
                let distance = color.squared_distance_to(target);
                if best.map_or(true, |(_, _, d)| distance < d) {
                    best = Some((index, color, distance));
                }
            });
            if best.is_some_and(|(_, _, d)| d <= close_enough) {
                break;
            }
        }
        best.map(|(index, color, _)| (index, color))
    }

    /// Call `visit` for every in-bounds index at Chebyshev distance exactly
    /// `radius` from `center`.
    fn visit_shell(&self, center: [usize; 3], radius: usize, mut visit: impl FnMut([usize; 3])) {
        let top = self.space.levels() - 1;
        let lo = |c: usize| c.saturating_sub(radius);
        let hi = |c: usize| (c + radius).min(top);
        let [ci, cj, ck] = center;

        for i in lo(ci)..=hi(ci) {
            let on_i = i.abs_diff(ci) == radius;
            for j in lo(cj)..=hi(cj) {
                if on_i || j.abs_diff(cj) == radius {
                    for k in lo(ck)..=hi(ck) {
                        visit([i, j, k]);
                    }
                } else {
                    if ck >= radius {
                        visit([i, j, ck - radius]);
                    }
                    if radius > 0 && ck + radius <= top {
                        visit([i, j, ck + radius]);
                    }
                }
            }
        }
    }

    #[inline]
    fn flat(&self, [r, g, b]: [usize; 3]) -> Option<usize> {
        let levels = self.space.levels();
        if r >= levels || g >= levels || b >= levels {
            return None;
        }
        Some((r * levels + g) * levels + b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn cube(bits: u32) -> ColorCube {
        ColorCube::new(ColorSpace::new(bits).unwrap())
    }

    #[test]
    fn test_take_is_once_only() {
        let mut cube = cube(6);
        assert_eq!(cube.remaining(), 64);
        assert_eq!(cube.take([1, 2, 3]), Some(Color::new(64, 128, 192)));
        assert_eq!(cube.take([1, 2, 3]), None);
        assert_eq!(cube.remaining(), 63);
        assert!(!cube.is_available([1, 2, 3]));
    }

    #[test]
    fn test_out_of_range_index_is_never_available() {
        let mut cube = cube(6);
        assert!(!cube.is_available([4, 0, 0]));
        assert!(!cube.is_available([0, 0, usize::MAX]));
        assert_eq!(cube.take([0, 4, 0]), None);
        assert_eq!(cube.remaining(), 64);

        let (index, _) = cube.nearest([9, 9, 9], [192.0, 192.0, 192.0]).unwrap();
        assert_eq!(index, [3, 3, 3]);
    }

    #[test]
    fn test_shells_partition_the_cube() {
        let cube = cube(9);
        let center = [2, 7, 0];
        let mut seen = HashSet::new();
        for radius in 0..8 {
            cube.visit_shell(center, radius, |index| {
                let chebyshev = (0..3).map(|a| index[a].abs_diff(center[a])).max().unwrap();
                assert_eq!(chebyshev, radius);
                assert!(seen.insert(index), "{index:?} visited twice");
            });
        }
        assert_eq!(seen.len(), 512);
    }

    #[test]
    fn test_nearest_stops_within_one_step() {
        let cube = cube(6);
        // (64, 64, 0) in the first shell is one step from the target, so the
        // exact match two levels out is never reached
        let (index, color) = cube.nearest([0, 0, 0], [128.0, 64.0, 0.0]).unwrap();
        assert_eq!(index, [1, 1, 0]);
        assert_eq!(color.channels(), [64, 64, 0]);
    }

    #[test]
    fn test_nearest_keeps_searching_until_close() {
        let cube = cube(6);
        let (index, _) = cube.nearest([0, 0, 0], [192.0, 192.0, 192.0]).unwrap();
        assert_eq!(index, [3, 3, 3]);
    }

    #[test]
    fn test_nearest_skips_taken_colors() {
        let mut cube = cube(6);
        cube.take([0, 0, 0]);
        let (index, _) = cube.nearest([0, 0, 0], [0.0, 0.0, 0.0]).unwrap();
        // every one-step neighbor is equally close; the first in scan order wins
        assert_eq!(index, [0, 0, 1]);
    }

    #[test]
    fn test_nearest_searches_whole_cube_when_needed() {
        let mut cube = cube(3);
        for index in [[0, 0, 0], [0, 0, 1], [0, 1, 0], [0, 1, 1], [1, 0, 0], [1, 0, 1], [1, 1, 0]] {
            cube.take(index);
        }
        let (index, color) = cube.nearest([0, 0, 0], [0.0, 0.0, 0.0]).unwrap();
        assert_eq!(index, [1, 1, 1]);
        assert_eq!(color.channels(), [128, 128, 128]);
    }

    #[test]
    fn test_nearest_on_empty_cube() {
        let mut cube = cube(3);
        for r in 0..2 {
            for g in 0..2 {
                for b in 0..2 {
                    cube.take([r, g, b]);
                }
            }
        }
        assert_eq!(cube.nearest([1, 1, 1], [0.0, 0.0, 0.0]), None);
    }
}
