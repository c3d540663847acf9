//! Pluggable strategies consumed by the placement strategies.
//!
//! - [`SeedPolicy`]: where the first colors go, placed without competition
//! - [`ColorOrder`] and [`StartColor`]: the order colors are pulled in
//! - [`DistanceMetric`]: how a frontier cell is scored against a color
//!
//! Every policy is a closed enumeration. Names parse case-insensitively via
//! [`FromStr`](std::str::FromStr); anything else is a
//! [`ConfigError::UnknownPolicy`](crate::ConfigError::UnknownPolicy).

/// Implements `name()`, `ALL`, `Display`, `FromStr` and `TryFrom<String>`
/// for a fieldless policy enum.
macro_rules! policy_names {
    ($ty:ident, $kind:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// Configuration name of this variant.
            pub fn name(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl ::std::str::FromStr for $ty {
            type Err = $crate::error::ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($name) {
                        return Ok($ty::$variant);
                    }
                )+
                Err($crate::error::ConfigError::UnknownPolicy {
                    kind: $kind,
                    value: s.to_string(),
                })
            }
        }

        impl ::std::convert::TryFrom<String> for $ty {
            type Error = $crate::error::ConfigError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

pub(crate) use policy_names;

mod distance;
mod order;
mod seed;

pub use distance::DistanceMetric;
pub use order::{ColorOrder, ColorQueue, StartColor};
pub use seed::{SeedPolicy, StartPosition};
