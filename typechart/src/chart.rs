//! Fixed 18x18 effectiveness table

use crate::pokemon_type::Type::{self, *};

const IMMUNE: f32 = 0.0;
const HALF: f32 = 0.5;
const DOUBLE: f32 = 2.0;

/// Every attacking type and the defending types it does not hit at 1x.
///
/// Pairs missing from this list stay at the 1.0 default of [`TYPE_CHART`].
#[rustfmt::skip]
pub const SPECIAL_MATCHUPS: &[(Type, &[(Type, f32)])] = &[
    (Normal, &[
        (Rock, HALF), (Ghost, IMMUNE), (Steel, HALF),
    ]),
    (Fire, &[
        (Fire, HALF), (Water, HALF), (Grass, DOUBLE), (Ice, DOUBLE), (Bug, DOUBLE), (Rock, HALF),
        (Dragon, HALF), (Steel, DOUBLE),
    ]),
    (Water, &[
        (Fire, DOUBLE), (Water, HALF), (Grass, HALF), (Ground, DOUBLE), (Rock, DOUBLE),
        (Dragon, HALF),
    ]),
    (Electric, &[
        (Water, DOUBLE), (Electric, HALF), (Grass, HALF), (Ground, IMMUNE), (Flying, DOUBLE),
        (Dragon, HALF),
    ]),
    (Grass, &[
        (Fire, HALF), (Water, DOUBLE), (Grass, HALF), (Poison, HALF), (Ground, DOUBLE),
        (Flying, HALF), (Bug, HALF), (Rock, DOUBLE), (Dragon, HALF), (Steel, HALF),
    ]),
    (Ice, &[
        (Fire, HALF), (Water, HALF), (Grass, DOUBLE), (Ice, HALF), (Ground, DOUBLE),
        (Flying, DOUBLE), (Dragon, DOUBLE), (Steel, HALF),
    ]),
    (Fighting, &[
        (Normal, DOUBLE), (Ice, DOUBLE), (Poison, HALF), (Flying, HALF), (Psychic, HALF),
        (Bug, HALF), (Rock, DOUBLE), (Ghost, IMMUNE), (Dark, DOUBLE), (Steel, DOUBLE),
        (Fairy, HALF),
    ]),
    (Poison, &[
        (Grass, DOUBLE), (Poison, HALF), (Ground, HALF), (Rock, HALF), (Ghost, HALF),
        (Steel, IMMUNE), (Fairy, DOUBLE),
    ]),
    (Ground, &[
        (Fire, DOUBLE), (Electric, DOUBLE), (Grass, HALF), (Poison, DOUBLE), (Flying, IMMUNE),
        (Bug, HALF), (Rock, DOUBLE), (Steel, DOUBLE),
    ]),
    (Flying, &[
        (Electric, HALF), (Grass, DOUBLE), (Fighting, DOUBLE), (Bug, DOUBLE), (Rock, HALF),
        (Steel, HALF),
    ]),
    (Psychic, &[
        (Fighting, DOUBLE), (Poison, DOUBLE), (Psychic, HALF), (Dark, IMMUNE), (Steel, HALF),
    ]),
    (Bug, &[
        (Fire, HALF), (Grass, DOUBLE), (Fighting, HALF), (Poison, HALF), (Flying, HALF),
        (Psychic, DOUBLE), (Ghost, HALF), (Dark, DOUBLE), (Steel, HALF), (Fairy, HALF),
    ]),
    (Rock, &[
        (Fire, DOUBLE), (Ice, DOUBLE), (Fighting, HALF), (Ground, HALF), (Flying, DOUBLE),
        (Bug, DOUBLE), (Steel, HALF),
    ]),
    (Ghost, &[
        (Normal, IMMUNE), (Psychic, DOUBLE), (Ghost, DOUBLE), (Dark, HALF),
    ]),
    (Dragon, &[
        (Dragon, DOUBLE), (Steel, HALF), (Fairy, IMMUNE),
    ]),
    (Dark, &[
        (Fighting, HALF), (Psychic, DOUBLE), (Ghost, DOUBLE), (Dark, HALF), (Fairy, HALF),
    ]),
    (Steel, &[
        (Fire, HALF), (Water, HALF), (Electric, HALF), (Ice, DOUBLE), (Rock, DOUBLE),
        (Steel, HALF), (Fairy, DOUBLE),
    ]),
    (Fairy, &[
        (Fire, HALF), (Fighting, DOUBLE), (Poison, HALF), (Dragon, DOUBLE), (Dark, DOUBLE),
        (Steel, HALF),
    ]),
];

/// Attack-type x defense-type multipliers.
/// Row = attacking type, Column = defending type, both in [`Type::ALL`] order.
pub static TYPE_CHART: [[f32; 18]; 18] = build_chart();

const fn build_chart() -> [[f32; 18]; 18] {
    let mut chart = [[1.0; 18]; 18];
    let mut row = 0;
    while row < SPECIAL_MATCHUPS.len() {
        let (attack, defenders) = SPECIAL_MATCHUPS[row];
        let mut col = 0;
        while col < defenders.len() {
            let (defense, multiplier) = defenders[col];
            chart[attack as usize][defense as usize] = multiplier;
            col += 1;
        }
        row += 1;
    }
    chart
}

/// Multiplier for a single attacking type against a single defending type.
pub fn lookup(attack: Type, defense: Type) -> f32 {
    TYPE_CHART[attack as usize][defense as usize]
}
