//! Species records as persisted in the cache

use serde::{Deserialize, Serialize};

use crate::RecordError;
use crate::Type;

/// The six base stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stat {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl Stat {
    pub const ALL: [Stat; 6] = [
        Stat::Hp,
        Stat::Attack,
        Stat::Defense,
        Stat::SpecialAttack,
        Stat::SpecialDefense,
        Stat::Speed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stat::Hp => "hp",
            Stat::Attack => "attack",
            Stat::Defense => "defense",
            Stat::SpecialAttack => "special-attack",
            Stat::SpecialDefense => "special-defense",
            Stat::Speed => "speed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStat {
    pub stat: Stat,
    pub value: u32,
}

/// One creature's full record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    /// National dex number (> 0)
    pub id: u32,

    /// Species name; lookups are case-insensitive
    pub name: String,

    #[serde(default)]
    pub base_experience: Option<u32>,

    /// Height in decimetres
    #[serde(default)]
    pub height: u32,

    /// Weight in hectograms
    #[serde(default)]
    pub weight: u32,

    /// Generation introduced (0 when unknown)
    #[serde(default)]
    pub generation: u8,

    #[serde(default)]
    pub is_legendary: bool,

    #[serde(default)]
    pub is_mythical: bool,

    /// Ordered type list (primary first)
    #[serde(default)]
    pub types: Vec<Type>,

    #[serde(default)]
    pub stats: Vec<BaseStat>,
}

impl Species {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            base_experience: None,
            height: 0,
            weight: 0,
            generation: 0,
            is_legendary: false,
            is_mythical: false,
            types: Vec::new(),
            stats: Vec::new(),
        }
    }

    pub fn with_types(mut self, types: &[Type]) -> Self {
        self.types = types.to_vec();
        self
    }

    /// Set all six base stats in [`Stat::ALL`] order
    pub fn with_base_stats(mut self, values: [u32; 6]) -> Self {
        self.stats = Stat::ALL
            .iter()
            .zip(values)
            .map(|(&stat, value)| BaseStat { stat, value })
            .collect();
        self
    }

    pub fn stat(&self, stat: Stat) -> Option<u32> {
        self.stats.iter().find(|s| s.stat == stat).map(|s| s.value)
    }

    /// Sum of the base stats, saturating at `u32::MAX`
    pub fn total_base_stats(&self) -> u32 {
        self.stats
            .iter()
            .fold(0u32, |total, s| total.saturating_add(s.value))
    }

    /// Lowercased name used as the record's name key
    pub fn key(&self) -> String {
        name_key(&self.name)
    }

    /// Check the record can be addressed by both id and name
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.id == 0 {
            return Err(RecordError::InvalidId(self.id));
        }
        let key = self.key();
        if key.is_empty() {
            return Err(RecordError::EmptyName);
        }
        if key.starts_with('.') || key.contains(['/', '\\']) || key.parse::<u32>().is_ok() {
            return Err(RecordError::InvalidName(self.name.clone()));
        }
        if self.types.len() > 2 {
            return Err(RecordError::TooManyTypes {
                name: self.name.clone(),
                count: self.types.len(),
            });
        }
        Ok(())
    }
}

/// Normalize a species name for lookup
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pikachu() -> Species {
        Species::new(25, "Pikachu")
            .with_types(&[Type::Electric])
            .with_base_stats([35, 55, 40, 50, 50, 90])
    }

    #[test]
    fn test_total_base_stats() {
        assert_eq!(pikachu().total_base_stats(), 320);
        assert_eq!(Species::new(1, "missingno").total_base_stats(), 0);

        let huge = Species::new(2, "huge").with_base_stats([u32::MAX; 6]);
        assert_eq!(huge.total_base_stats(), u32::MAX);
    }

    #[test]
    fn test_stat_lookup() {
        let p = pikachu();
        assert_eq!(p.stat(Stat::Speed), Some(90));
        assert_eq!(p.stat(Stat::SpecialAttack), Some(50));
    }

    #[test]
    fn test_key_is_lowercase() {
        assert_eq!(pikachu().key(), "pikachu");
        assert_eq!(name_key("  Mr. Mime "), "mr. mime");
    }

    #[test]
    fn test_validate() {
        assert!(pikachu().validate().is_ok());
        assert_eq!(Species::new(0, "x").validate(), Err(RecordError::InvalidId(0)));
        assert_eq!(Species::new(1, "  ").validate(), Err(RecordError::EmptyName));
        assert!(matches!(
            Species::new(1, "../etc").validate(),
            Err(RecordError::InvalidName(_))
        ));
        assert!(matches!(
            Species::new(1, "151").validate(),
            Err(RecordError::InvalidName(_))
        ));
        let triple = Species::new(1, "odd").with_types(&[Type::Fire, Type::Water, Type::Ice]);
        assert!(matches!(triple.validate(), Err(RecordError::TooManyTypes { count: 3, .. })));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(pikachu()).unwrap();
        assert_eq!(json["types"], serde_json::json!(["electric"]));
        assert_eq!(json["stats"][3]["stat"], "special-attack");
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let s: Species = serde_json::from_str(r#"{"id": 7, "name": "Squirtle"}"#).unwrap();
        assert_eq!(s.generation, 0);
        assert!(s.types.is_empty());
        assert!(!s.is_legendary);
    }
}
