//! Strength and weakness derivation over the type chart

use std::fmt;

use crate::pokemon_type::Type;

/// A type paired with the multiplier it lands or takes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matchup {
    pub ty: Type,
    pub multiplier: f32,
}

impl Matchup {
    pub fn new(ty: Type, multiplier: f32) -> Self {
        Self { ty, multiplier }
    }
}

impl fmt::Display for Matchup {
    /// Renders as `Fire (2x)` / `Rock (0.5x)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}x)", self.ty, self.multiplier)
    }
}

/// Defending types this type set hits super-effectively.
///
/// The multiplier for defender D is the product of every attacking type's
/// multiplier against D. Only entries above 1.0 are kept.
pub fn strengths(attacker_types: &[Type]) -> Vec<Matchup> {
    let candidates = Type::ALL.iter().map(|&defense| {
        let multiplier = attacker_types
            .iter()
            .map(|attack| attack.effectiveness(defense))
            .product();
        Matchup::new(defense, multiplier)
    });
    keep_super_effective(candidates)
}

/// Attacking types that hit this type set super-effectively.
pub fn weaknesses(defender_types: &[Type]) -> Vec<Matchup> {
    let candidates = Type::ALL
        .iter()
        .map(|&attack| Matchup::new(attack, attack.effectiveness_multi(defender_types)));
    keep_super_effective(candidates)
}

/// Drops anything at or below 1.0 and sorts descending by multiplier.
///
/// Candidates must arrive in canonical order: the sort is stable, so ties keep
/// that order.
pub fn keep_super_effective(candidates: impl IntoIterator<Item = Matchup>) -> Vec<Matchup> {
    let mut kept: Vec<Matchup> = candidates
        .into_iter()
        .filter(|m| m.multiplier > 1.0)
        .collect();
    kept.sort_by(|a, b| b.multiplier.total_cmp(&a.multiplier));
    kept
}
