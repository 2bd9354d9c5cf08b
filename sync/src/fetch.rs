use std::sync::Arc;

use async_trait::async_trait;
use dexteam_cache::{RecordStore, SpriteVariant, StoreError};
use dexteam_model::Species;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Species {0} does not exist upstream")]
    NotFound(u32),

    #[error("Transient fetch failure: {0}")]
    Transient(String),

    #[error("Asked for species {requested} but received {received}")]
    IdMismatch { requested: u32, received: u32 },
}

/// A record as returned by the remote source, with its sprite blobs
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedSpecies {
    pub species: Species,
    pub sprite: Option<Vec<u8>>,
    pub shiny_sprite: Option<Vec<u8>>,
}

impl FetchedSpecies {
    pub fn new(species: Species) -> Self {
        Self {
            species,
            sprite: None,
            shiny_sprite: None,
        }
    }

    pub fn with_sprite(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.sprite = Some(bytes.into());
        self
    }

    pub fn with_shiny_sprite(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.shiny_sprite = Some(bytes.into());
        self
    }

    /// Reject a record whose id is not the one that was asked for
    pub fn ensure_id(self, requested: u32) -> Result<Self, FetchError> {
        match self.species.id {
            received if received == requested => Ok(self),
            received => Err(FetchError::IdMismatch {
                requested,
                received,
            }),
        }
    }

    /// Write the record and whichever sprites came with it.
    ///
    /// The record goes first, so a failure between the two writes leaves an
    /// id that is not yet cached and will be fetched again.
    pub fn persist(&self, store: &RecordStore) -> Result<(), StoreError> {
        let species = &self.species;
        store.put(species)?;
        match &self.sprite {
            Some(bytes) => store.put_sprite(species, SpriteVariant::Normal, bytes)?,
            None => warn!(id = species.id, "No sprite for species; it will be fetched again next run"),
        }
        if let Some(bytes) = &self.shiny_sprite {
            store.put_sprite(species, SpriteVariant::Shiny, bytes)?;
        }
        Ok(())
    }
}

/// Remote source of species records.
///
/// Transport, authentication and timeouts are the implementor's concern. A
/// successful fetch must carry a record with id > 0 and a non-empty name.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_by_id(&self, id: u32) -> Result<FetchedSpecies, FetchError>;
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for &T {
    async fn fetch_by_id(&self, id: u32) -> Result<FetchedSpecies, FetchError> {
        (**self).fetch_by_id(id).await
    }
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for Arc<T> {
    async fn fetch_by_id(&self, id: u32) -> Result<FetchedSpecies, FetchError> {
        (**self).fetch_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_id() {
        let fetched = FetchedSpecies::new(Species::new(25, "Pikachu"));
        assert_eq!(fetched.clone().ensure_id(25), Ok(fetched.clone()));

        let err = fetched.ensure_id(26).unwrap_err();
        assert_eq!(
            err,
            FetchError::IdMismatch {
                requested: 26,
                received: 25
            }
        );
        assert_eq!(err.to_string(), "Asked for species 26 but received 25");
    }
}
