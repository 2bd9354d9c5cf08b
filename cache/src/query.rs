//! Filtering and name completion over index entries

use dexteam_model::{IndexEntry, Type, name_key};

/// How many suggestions a search box shows by default
pub const DEFAULT_SUGGESTION_LIMIT: usize = 8;

/// Filter over [`IndexEntry`] values. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexQuery {
    pub generation: Option<u8>,
    pub ty: Option<Type>,
    pub legendary: Option<bool>,
    pub mythical: Option<bool>,
    /// Case-insensitive name prefix
    pub name_prefix: Option<String>,
}

impl IndexQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(mut self, generation: u8) -> Self {
        self.generation = Some(generation);
        self
    }

    pub fn of_type(mut self, ty: Type) -> Self {
        self.ty = Some(ty);
        self
    }

    pub fn legendary(mut self, legendary: bool) -> Self {
        self.legendary = Some(legendary);
        self
    }

    pub fn mythical(mut self, mythical: bool) -> Self {
        self.mythical = Some(mythical);
        self
    }

    pub fn name_prefix(mut self, prefix: &str) -> Self {
        self.name_prefix = Some(name_key(prefix));
        self
    }

    pub fn matches(&self, entry: &IndexEntry) -> bool {
        self.generation.is_none_or(|g| entry.generation == g)
            && self.ty.is_none_or(|t| entry.has_type(t))
            && self.legendary.is_none_or(|l| entry.is_legendary == l)
            && self.mythical.is_none_or(|m| entry.is_mythical == m)
            && self
                .name_prefix
                .as_deref()
                .is_none_or(|p| name_key(&entry.name).starts_with(p))
    }

    /// Matching entries, in index order
    pub fn apply<'a>(&self, entries: &'a [IndexEntry]) -> Vec<&'a IndexEntry> {
        entries.iter().filter(|e| self.matches(e)).collect()
    }
}

/// Lowercase names starting with `prefix`, skipping any in `exclude`.
///
/// A blank prefix yields nothing.
pub fn suggest(
    entries: &[IndexEntry],
    prefix: &str,
    limit: usize,
    exclude: &[String],
) -> Vec<String> {
    let prefix = name_key(prefix);
    if prefix.is_empty() {
        return Vec::new();
    }
    let excluded: Vec<String> = exclude.iter().map(|n| name_key(n)).collect();

    entries
        .iter()
        .map(|e| name_key(&e.name))
        .filter(|name| name.starts_with(&prefix))
        .filter(|name| !excluded.contains(name))
        .take(limit)
        .collect()
}
