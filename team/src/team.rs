use std::path::PathBuf;

use chrono::{DateTime, Utc};
use dexteam_model::{Species, Type};
use serde::{Deserialize, Serialize};

use crate::TeamError;

pub const MAX_TEAM_SIZE: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    /// Cached sprite file, if one was available when the member was added
    #[serde(default)]
    pub sprite: Option<PathBuf>,
    #[serde(default)]
    pub types: Vec<Type>,
    pub level: u8,
}

impl TeamMember {
    pub fn new(name: impl Into<String>, types: &[Type]) -> Self {
        Self {
            name: name.into(),
            sprite: None,
            types: types.to_vec(),
            level: 100,
        }
    }

    pub fn from_species(species: &Species, sprite: Option<PathBuf>) -> Self {
        Self {
            sprite,
            ..Self::new(species.name.clone(), &species.types)
        }
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level.clamp(1, 100);
        self
    }
}

/// Ordered roster of at most [`MAX_TEAM_SIZE`] members.
///
/// Deserializing rejects a roster over the limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTeam")]
pub struct Team {
    pub id: u32,
    pub name: String,
    members: Vec<TeamMember>,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawTeam {
    id: u32,
    name: String,
    members: Vec<TeamMember>,
    created_at: DateTime<Utc>,
}

impl TryFrom<RawTeam> for Team {
    type Error = TeamError;

    fn try_from(raw: RawTeam) -> Result<Self, Self::Error> {
        if raw.members.len() > MAX_TEAM_SIZE {
            return Err(TeamError::Oversized {
                name: raw.name,
                count: raw.members.len(),
            });
        }
        Ok(Self {
            id: raw.id,
            name: raw.name,
            members: raw.members,
            created_at: raw.created_at,
        })
    }
}

impl Team {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            members: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= MAX_TEAM_SIZE
    }

    /// Append a member; fails once the team holds six
    pub fn add(&mut self, member: TeamMember) -> Result<(), TeamError> {
        if self.is_full() {
            return Err(TeamError::Full(self.name.clone()));
        }
        self.members.push(member);
        Ok(())
    }

    pub fn remove(&mut self, slot: usize) -> Result<TeamMember, TeamError> {
        if slot >= self.members.len() {
            return Err(TeamError::NoSuchMember(slot));
        }
        Ok(self.members.remove(slot))
    }

    /// Case-insensitive membership check by species name
    pub fn contains(&self, name: &str) -> bool {
        self.members
            .iter()
            .any(|m| m.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn member_names(&self) -> Vec<String> {
        self.members.iter().map(|m| m.name.clone()).collect()
    }
}
