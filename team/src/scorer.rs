//! Team synergy scoring.
//!
//! The total is built from four parts:
//!
//! | part              | range    |
//! |-------------------|----------|
//! | offensive         | 0..=450  |
//! | defensive         | 0..=300  |
//! | base stats        | 0..=200  |
//! | weakness penalty  | 0..=150  |
//!
//! `total = clamp(offensive + defensive + base_stats - penalty, 0, 1000)`

use dexteam_model::{Species, Type};
use dexteam_typechart::{Matchup, keep_super_effective, lookup};
use serde::Serialize;
use tracing::debug;

pub const MAX_SCORE: u32 = 1000;

/// Six members at the highest possible base stat total
pub const MAX_TEAM_BST: u32 = 720 * 6;

const MAX_OFFENSIVE: u32 = 450;
const MAX_DEFENSIVE: u32 = 300;
const MAX_BASE_STATS: f64 = 200.0;
const MAX_PENALTY: u32 = 150;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub offensive: u32,
    pub defensive: u32,
    pub base_stats: u32,
    pub weakness_penalty: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamSummary {
    pub total_score: u32,
    /// Defending types the team hits super-effectively, strongest first
    pub strengths: Vec<Matchup>,
    /// Attacking types that hit some member super-effectively, worst first
    pub weaknesses: Vec<Matchup>,
    pub breakdown: ScoreBreakdown,
}

impl TeamSummary {
    /// Display labels such as `Fire (2x)`, or `["None"]` when empty
    pub fn strength_labels(&self) -> Vec<String> {
        labels(&self.strengths)
    }

    pub fn weakness_labels(&self) -> Vec<String> {
        labels(&self.weaknesses)
    }
}

fn labels(matchups: &[Matchup]) -> Vec<String> {
    if matchups.is_empty() {
        return vec!["None".to_string()];
    }
    matchups.iter().map(ToString::to_string).collect()
}

/// Score a team.
///
/// Pure: the same members always give the same summary. Members without
/// types take no part in the type analysis but still count towards the base
/// stat total. An empty team scores zero.
pub fn score(members: &[Species]) -> TeamSummary {
    if members.is_empty() {
        return TeamSummary::default();
    }

    let typed: Vec<&[Type]> = members
        .iter()
        .map(|m| m.types.as_slice())
        .filter(|types| !types.is_empty())
        .collect();

    let coverage = Type::ALL.map(|defense| best_attack(&typed, defense));
    let taken = Type::ALL.map(|attack| {
        typed
            .iter()
            .map(|types| attack.effectiveness_multi(types))
            .collect::<Vec<f32>>()
    });

    let breakdown = ScoreBreakdown {
        offensive: offensive_score(&coverage),
        defensive: defensive_score(&taken),
        base_stats: base_stat_score(members),
        weakness_penalty: weakness_penalty(&taken),
    };

    let raw = (breakdown.offensive + breakdown.defensive + breakdown.base_stats) as i64
        - breakdown.weakness_penalty as i64;
    let total_score = raw.clamp(0, MAX_SCORE as i64) as u32;

    let danger: Vec<f32> = taken
        .iter()
        .map(|per_member| per_member.iter().copied().fold(0.0, f32::max))
        .collect();
    let (strengths, weaknesses) = net_matchups(&coverage, &danger);

    debug!(
        members = members.len(),
        offensive = breakdown.offensive,
        defensive = breakdown.defensive,
        base_stats = breakdown.base_stats,
        weakness_penalty = breakdown.weakness_penalty,
        total = total_score,
        "Scored team"
    );

    TeamSummary {
        total_score,
        strengths,
        weaknesses,
        breakdown,
    }
}

/// Best multiplier any member's type lands on `defense`, never below 1.0
fn best_attack(typed: &[&[Type]], defense: Type) -> f32 {
    typed
        .iter()
        .flat_map(|types| types.iter())
        .map(|&attack| lookup(attack, defense))
        .fold(1.0, f32::max)
}

fn offensive_score(coverage: &[f32; 18]) -> u32 {
    let sum: u32 = coverage
        .iter()
        .map(|&v| match v {
            v if v >= 4.0 => 25,
            v if v >= 2.0 => 20,
            v if v >= 1.0 => 10,
            _ => 5,
        })
        .sum();
    sum.min(MAX_OFFENSIVE)
}

/// Rates the best-placed member's multiplier against each attacking type
fn defensive_score(taken: &[Vec<f32>; 18]) -> u32 {
    let sum: u32 = taken
        .iter()
        .map(|per_member| {
            let resilience = per_member.iter().copied().reduce(f32::min).unwrap_or(1.0);
            match resilience {
                v if v == 0.0 => 20,
                v if v <= 0.25 => 18,
                v if v <= 0.5 => 15,
                v if v <= 1.0 => 10,
                v if v <= 2.0 => 5,
                _ => 0,
            }
        })
        .sum();
    sum.min(MAX_DEFENSIVE)
}

fn base_stat_score(members: &[Species]) -> u32 {
    let total: u64 = members
        .iter()
        .map(|m| u64::from(m.total_base_stats()))
        .sum();
    let ratio = (total as f64 / f64::from(MAX_TEAM_BST)).min(1.0);
    (ratio * MAX_BASE_STATS) as u32
}

/// Tiers are cumulative: five members weak to one type cost 25 + 35 + 45
fn weakness_penalty(taken: &[Vec<f32>; 18]) -> u32 {
    let sum: u32 = taken
        .iter()
        .map(|per_member| {
            let weak = per_member.iter().filter(|&&m| m > 1.0).count();
            let mut penalty = 0;
            if weak >= 3 {
                penalty += 25;
            }
            if weak >= 4 {
                penalty += 35;
            }
            if weak >= 5 {
                penalty += 45;
            }
            penalty
        })
        .sum();
    sum.min(MAX_PENALTY)
}

/// Super-effective lists with any type present in both removed from both
fn net_matchups(coverage: &[f32; 18], danger: &[f32]) -> (Vec<Matchup>, Vec<Matchup>) {
    let cancelled = |i: usize| coverage[i] > 1.0 && danger[i] > 1.0;

    let strengths = Type::ALL
        .iter()
        .enumerate()
        .filter(|&(i, _)| !cancelled(i))
        .map(|(i, &ty)| Matchup::new(ty, coverage[i]));
    let weaknesses = Type::ALL
        .iter()
        .enumerate()
        .filter(|&(i, _)| !cancelled(i))
        .map(|(i, &ty)| Matchup::new(ty, danger[i]));

    (keep_super_effective(strengths), keep_super_effective(weaknesses))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mon(id: u32, types: &[Type], bst_each: u32) -> Species {
        Species::new(id, format!("mon{id}"))
            .with_types(types)
            .with_base_stats([bst_each; 6])
    }

    fn types_of(matchups: &[Matchup]) -> Vec<Type> {
        matchups.iter().map(|m| m.ty).collect()
    }

    #[test]
    fn test_empty_team_scores_zero() {
        let summary = score(&[]);
        assert_eq!(summary, TeamSummary::default());
        assert_eq!(summary.strength_labels(), vec!["None"]);
        assert_eq!(summary.weakness_labels(), vec!["None"]);
    }

    #[test]
    fn test_single_normal_member() {
        let normal = mon(1, &[Type::Normal], 50);
        let summary = score(&[normal]);

        // 18 x 10, then Ghost immunity 20 + Fighting 5 + 16 x 10, then 300 / 4320 * 200
        assert_eq!(summary.breakdown.offensive, 180);
        assert_eq!(summary.breakdown.defensive, 185);
        assert_eq!(summary.breakdown.base_stats, 13);
        assert_eq!(summary.breakdown.weakness_penalty, 0);
        assert_eq!(summary.total_score, 378);

        assert!(summary.strengths.is_empty());
        assert_eq!(summary.strength_labels(), vec!["None"]);
        assert_eq!(summary.weaknesses, vec![Matchup::new(Type::Fighting, 2.0)]);
        assert_eq!(summary.weakness_labels(), vec!["Fighting (2x)"]);
    }

    #[test]
    fn test_shared_types_cancel_out() {
        let team = [mon(7, &[Type::Water], 50), mon(1, &[Type::Grass], 50)];
        let summary = score(&team);

        // Fire is hit by Water and threatens Grass
        assert_eq!(
            types_of(&summary.strengths),
            vec![Type::Water, Type::Ground, Type::Rock]
        );
        assert_eq!(
            types_of(&summary.weaknesses),
            vec![
                Type::Electric,
                Type::Grass,
                Type::Ice,
                Type::Poison,
                Type::Flying,
                Type::Bug
            ]
        );
    }

    #[test]
    fn test_weaknesses_sorted_by_multiplier() {
        let summary = score(&[mon(1, &[Type::Grass, Type::Bug], 50)]);
        let multipliers: Vec<f32> = summary.weaknesses.iter().map(|m| m.multiplier).collect();
        assert_eq!(multipliers[0], 4.0);
        assert!(multipliers.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(summary.weakness_labels()[0], "Fire (4x)");
    }

    #[test]
    fn test_weakness_penalty_is_cumulative_and_capped() {
        let three: Vec<Species> = (1..=3).map(|id| mon(id, &[Type::Grass], 50)).collect();
        // Fire, Ice, Poison, Flying, Bug each hit three members
        assert_eq!(score(&three).breakdown.weakness_penalty, 125);

        let four: Vec<Species> = (1..=4).map(|id| mon(id, &[Type::Grass], 50)).collect();
        assert_eq!(score(&four).breakdown.weakness_penalty, MAX_PENALTY);

        let five: Vec<Species> = (1..=5).map(|id| mon(id, &[Type::Grass], 50)).collect();
        assert_eq!(score(&five).breakdown.weakness_penalty, MAX_PENALTY);
    }

    #[test]
    fn test_total_stays_in_range() {
        let huge: Vec<Species> = (1..=6)
            .map(|id| mon(id, &[Type::Dragon, Type::Steel], 10_000))
            .collect();
        let summary = score(&huge);
        assert_eq!(summary.breakdown.base_stats, 200);
        assert!(summary.total_score <= MAX_SCORE);

        let weak: Vec<Species> = (1..=6).map(|id| mon(id, &[Type::Ice], 1)).collect();
        assert!(score(&weak).total_score <= MAX_SCORE);
    }

    #[test]
    fn test_maximal_stats_do_not_overflow() {
        let maxed: Vec<Species> = (1..=6)
            .map(|id| {
                Species::new(id, format!("mon{id}"))
                    .with_types(&[Type::Normal])
                    .with_base_stats([u32::MAX; 6])
            })
            .collect();

        let summary = score(&maxed);
        assert_eq!(summary.breakdown.base_stats, 200);
        assert!(summary.total_score <= MAX_SCORE);
        assert_eq!(score(&maxed[..1]).breakdown.base_stats, 200);
    }

    #[test]
    fn test_untyped_members_are_skipped() {
        let untyped = Species::new(2, "unknown").with_base_stats([100; 6]);
        let summary = score(&[untyped.clone()]);

        // no typed member: coverage 1.0 and resilience 1.0 everywhere
        assert_eq!(summary.breakdown.offensive, 180);
        assert_eq!(summary.breakdown.defensive, 180);
        assert_eq!(summary.breakdown.base_stats, 27);
        assert!(summary.strengths.is_empty());
        assert!(summary.weaknesses.is_empty());

        let with_normal = score(&[mon(1, &[Type::Normal], 50), untyped]);
        assert_eq!(with_normal.breakdown.defensive, 185);
    }

    #[test]
    fn test_score_is_deterministic() {
        let team = [
            mon(6, &[Type::Fire, Type::Flying], 89),
            mon(9, &[Type::Water], 88),
            mon(3, &[Type::Grass, Type::Poison], 87),
        ];
        assert_eq!(score(&team), score(&team));
    }

    #[test]
    fn test_summary_serializes_breakdown() {
        let summary = score(&[mon(1, &[Type::Normal], 50)]);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total_score"], 378);
        assert_eq!(json["weaknesses"][0]["ty"], "fighting");
        assert_eq!(json["breakdown"]["defensive"], 185);
    }
}
