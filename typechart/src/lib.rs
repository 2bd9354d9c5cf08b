//! Elemental type chart for team building.
//!
//! # Overview
//!
//! - [`Type`] - the closed set of 18 types, in canonical order
//! - [`TYPE_CHART`] - fixed 18x18 attack/defense multiplier table, 1.0 unless
//!   listed in [`SPECIAL_MATCHUPS`]
//! - [`strengths`] / [`weaknesses`] - super-effective matchups for a type set
//!
//! ```
//! use dexteam_typechart::{weaknesses, Type};
//!
//! let weak = weaknesses(&[Type::Water, Type::Ground]);
//! assert_eq!(weak.len(), 1);
//! assert_eq!(weak[0].ty, Type::Grass);
//! assert_eq!(weak[0].multiplier, 4.0);
//! ```

mod chart;
mod effectiveness;
mod pokemon_type;

pub use chart::{SPECIAL_MATCHUPS, TYPE_CHART, lookup};
pub use effectiveness::{Matchup, keep_super_effective, strengths, weaknesses};
pub use pokemon_type::{Type, UnknownType};
