//! Denormalized index entries

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Species, Stat, Type};

/// Flat projection of a [`Species`] used for filtering without loading records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub generation: u8,
    #[serde(default)]
    pub is_legendary: bool,
    #[serde(default)]
    pub is_mythical: bool,
    #[serde(default)]
    pub types: Vec<Type>,
    /// Stat name -> base value
    #[serde(default)]
    pub stats: BTreeMap<String, u32>,
}

impl IndexEntry {
    pub fn has_type(&self, ty: Type) -> bool {
        self.types.contains(&ty)
    }

    pub fn total_base_stats(&self) -> u32 {
        self.stats
            .values()
            .fold(0u32, |total, &v| total.saturating_add(v))
    }
}

impl From<&Species> for IndexEntry {
    fn from(species: &Species) -> Self {
        Self {
            id: species.id,
            name: species.name.clone(),
            generation: species.generation,
            is_legendary: species.is_legendary,
            is_mythical: species.is_mythical,
            types: species.types.clone(),
            stats: Stat::ALL
                .iter()
                .filter_map(|&stat| Some((stat.as_str().to_string(), species.stat(stat)?)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BaseStat;

    #[test]
    fn test_projection() {
        let mut species = Species::new(150, "Mewtwo")
            .with_types(&[Type::Psychic])
            .with_base_stats([106, 110, 90, 154, 90, 130]);
        species.generation = 1;
        species.is_legendary = true;

        let entry = IndexEntry::from(&species);
        assert_eq!(entry.id, 150);
        assert_eq!(entry.name, "Mewtwo");
        assert_eq!(entry.generation, 1);
        assert!(entry.is_legendary);
        assert!(!entry.is_mythical);
        assert!(entry.has_type(Type::Psychic));
        assert_eq!(entry.stats["special-attack"], 154);
        assert_eq!(entry.total_base_stats(), 680);
    }

    #[test]
    fn test_projection_keeps_only_present_stats() {
        let mut species = Species::new(1, "partial");
        species.stats = vec![
            BaseStat {
                stat: Stat::Speed,
                value: u32::MAX,
            },
            BaseStat {
                stat: Stat::Hp,
                value: 10,
            },
        ];

        let entry = IndexEntry::from(&species);
        assert_eq!(entry.stats.len(), 2);
        assert_eq!(entry.stats["speed"], u32::MAX);
        assert_eq!(entry.total_base_stats(), u32::MAX);
    }
}
