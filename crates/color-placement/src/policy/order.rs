//! The order in which colors are pulled for placement.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::color::{Color, ColorSpace};

/// Ordering applied to the generated colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum ColorOrder {
    /// Generation order: red outermost, blue innermost.
    #[default]
    Identity,
    Reverse,
    /// Uniform shuffle drawn from the run's RNG.
    Random,
    /// Ascending hue (stable).
    Hue,
    /// Ascending saturation (stable).
    Saturation,
    /// Ascending brightness (stable).
    Brightness,
}

policy_names!(ColorOrder, "color order", {
    Identity => "identity",
    Reverse => "reverse",
    Random => "random",
    Hue => "hue",
    Saturation => "saturation",
    Brightness => "brightness",
});

impl ColorOrder {
    /// Reorder `colors` in place.
    pub fn apply<R: Rng + ?Sized>(&self, colors: &mut [Color], rng: &mut R) {
        match self {
            ColorOrder::Identity => {}
            ColorOrder::Reverse => colors.reverse(),
            ColorOrder::Random => colors.shuffle(rng),
            ColorOrder::Hue => colors.sort_by(|a, b| a.hue().total_cmp(&b.hue())),
            ColorOrder::Saturation => {
                colors.sort_by(|a, b| a.saturation().total_cmp(&b.saturation()))
            }
            ColorOrder::Brightness => {
                colors.sort_by(|a, b| a.brightness().total_cmp(&b.brightness()))
            }
        }
    }
}

/// The color placed first of all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum StartColor {
    /// Top level on every channel.
    #[default]
    White,
    Black,
    /// Uniformly drawn from the color space.
    Random,
}

policy_names!(StartColor, "start color", {
    White => "white",
    Black => "black",
    Random => "random",
});

impl StartColor {
    /// Resolve the rule to a concrete color of `space`.
    pub fn pick<R: Rng + ?Sized>(&self, space: &ColorSpace, rng: &mut R) -> Color {
        match self {
            StartColor::White => space.white(),
            StartColor::Black => space.black(),
            StartColor::Random => {
                let levels = space.levels();
                space.color_at(
                    rng.gen_range(0..levels),
                    rng.gen_range(0..levels),
                    rng.gen_range(0..levels),
                )
            }
        }
    }
}

/// Every color of a run in the order it will be placed, consumed front to
/// back exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorQueue {
    colors: VecDeque<Color>,
}

impl ColorQueue {
    /// Build the queue for `space`.
    ///
    /// With a start color rule, that color is taken out, the remaining
    /// colors are ordered, and the start color is put back at the front.
    /// RNG draws happen in that order: start color first, then the shuffle.
    ///
    /// # Example
    /// ```
    /// use color_placement::{ColorOrder, ColorQueue, ColorSpace, StartColor};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let space = ColorSpace::new(3).unwrap();
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let queue = ColorQueue::build(&space, ColorOrder::Identity, Some(StartColor::White), &mut rng);
    /// let first: Vec<[u8; 3]> = queue.iter().take(2).map(|c| c.channels()).collect();
    /// assert_eq!(first, vec![[128, 128, 128], [0, 0, 0]]);
    /// ```
    pub fn build<R: Rng + ?Sized>(
        space: &ColorSpace,
        order: ColorOrder,
        start: Option<StartColor>,
        rng: &mut R,
    ) -> Self {
        let mut colors = space.colors();
        let first = start.map(|rule| {
            let color = rule.pick(space, rng);
            colors.remove(space.flat_index_of(&color))
        });

        order.apply(&mut colors, rng);

        let mut colors = VecDeque::from(colors);
        if let Some(color) = first {
            colors.push_front(color);
        }
        Self { colors }
    }

    /// Wrap an explicit ordering.
    pub fn from_colors(colors: Vec<Color>) -> Self {
        Self {
            colors: colors.into(),
        }
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Color> {
        self.colors.pop_front()
    }

    #[inline]
    pub fn peek(&self) -> Option<&Color> {
        self.colors.front()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Color> {
        self.colors.iter()
    }
}
