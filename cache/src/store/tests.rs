use std::collections::BTreeSet;
use std::fs;

use dexteam_model::{Species, Type};
use tempfile::TempDir;

use super::RecordStore;
use crate::layout::{RecordKey, SpriteVariant};

fn store() -> (TempDir, RecordStore) {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::open(dir.path().join("cache")).unwrap();
    (dir, store)
}

fn charmander() -> Species {
    let mut species = Species::new(4, "Charmander")
        .with_types(&[Type::Fire])
        .with_base_stats([39, 52, 43, 60, 50, 65]);
    species.generation = 1;
    species
}

#[test]
fn test_open_creates_directories() {
    let (_dir, store) = store();
    assert!(store.layout().root().is_dir());
    assert!(store.layout().sprites_dir().is_dir());
}

#[test]
fn test_put_then_get_by_both_keys() {
    let (_dir, store) = store();
    store.put(&charmander()).unwrap();

    let by_id = store.get_by_id(4).unwrap();
    let by_name = store.get_by_name("CHARMANDER").unwrap();
    assert_eq!(by_id, charmander());
    assert_eq!(by_name, by_id);
}

#[test]
fn test_keys_resolve_independently() {
    let (_dir, store) = store();
    store.put(&charmander()).unwrap();
    fs::remove_file(store.layout().record_path(&RecordKey::name("charmander"))).unwrap();

    assert!(store.get_by_id(4).is_ok());
    assert!(store.get_by_name("charmander").unwrap_err().is_not_found());
}

#[test]
fn test_missing_record_is_not_found() {
    let (_dir, store) = store();
    assert!(store.get_by_id(999).unwrap_err().is_not_found());
    assert!(store.get_by_name("nobody").unwrap_err().is_not_found());
}

#[test]
fn test_corrupt_record_is_not_found() {
    let (_dir, store) = store();
    fs::write(store.layout().record_path(&RecordKey::Id(4)), b"{ not json").unwrap();
    assert!(store.get_by_id(4).unwrap_err().is_not_found());
}

#[test]
fn test_put_rejects_invalid_record() {
    let (_dir, store) = store();
    let err = store.put(&Species::new(0, "ghost")).unwrap_err();
    assert!(matches!(err, crate::StoreError::InvalidRecord(_)));
    assert!(store.record_files().is_empty());
}

#[test]
fn test_has_both_requires_record_and_sprite() {
    let (_dir, store) = store();
    let species = charmander();
    assert!(!store.has_both(4));

    store.put(&species).unwrap();
    assert!(!store.has_both(4));

    store
        .put_sprite(&species, SpriteVariant::Normal, b"png")
        .unwrap();
    assert!(store.has_both(4));

    fs::remove_file(store.layout().record_path(&RecordKey::Id(4))).unwrap();
    assert!(!store.has_both(4));
}

#[test]
fn test_sprite_paths() {
    let (_dir, store) = store();
    let species = charmander();
    store
        .put_sprite(&species, SpriteVariant::Normal, b"normal")
        .unwrap();

    let by_id = store.sprite_path(&RecordKey::Id(4), false).unwrap();
    let by_name = store.sprite_path(&"Charmander".into(), false).unwrap();
    assert_eq!(fs::read(by_id).unwrap(), b"normal");
    assert_eq!(fs::read(by_name).unwrap(), b"normal");
    assert!(store.sprite_path(&RecordKey::Id(4), true).unwrap_err().is_not_found());

    store
        .put_sprite(&species, SpriteVariant::Shiny, b"shiny")
        .unwrap();
    let shiny = store.sprite_path(&RecordKey::Id(4), true).unwrap();
    assert!(shiny.ends_with("4_shiny.png"));
}

#[test]
fn test_remove_cascades_to_sprites_and_id_key() {
    let (_dir, store) = store();
    let species = charmander();
    store.put(&species).unwrap();
    store
        .put_sprite(&species, SpriteVariant::Normal, b"png")
        .unwrap();
    store
        .put_sprite(&species, SpriteVariant::Shiny, b"png")
        .unwrap();

    store.remove("Charmander").unwrap();

    assert!(store.get_by_name("charmander").is_err());
    assert!(store.get_by_id(4).is_err());
    assert!(!store.has_both(4));
    assert!(store.sprite_path(&RecordKey::name("charmander"), true).is_err());
}

#[test]
fn test_remove_missing_is_ok() {
    let (_dir, store) = store();
    assert!(store.remove("nothing-here").is_ok());
}

#[test]
fn test_keys_cannot_escape_the_cache() {
    let (dir, store) = store();
    let victim = dir.path().join("victim.json");
    fs::write(&victim, b"{}").unwrap();
    let victim_sprite = store.layout().root().join("victim.png");
    fs::write(&victim_sprite, b"png").unwrap();

    assert!(store.get_by_name("../victim").unwrap_err().is_not_found());
    assert!(
        store
            .sprite_path(&RecordKey::name("../victim"), false)
            .unwrap_err()
            .is_not_found()
    );
    store.remove("../victim").unwrap();
    store.remove("..\\victim").unwrap();

    assert!(victim.is_file());
    assert!(victim_sprite.is_file());
}

#[test]
fn test_remove_leaves_metadata_alone() {
    let (_dir, store) = store();
    store
        .save_favorites(&BTreeSet::from(["eevee".to_string()]))
        .unwrap();

    store.remove(".favorites").unwrap();
    assert!(store.layout().favorites_file().is_file());
    assert!(store.favorites().contains("eevee"));
}

#[test]
fn test_favorites_round_trip() {
    let (_dir, store) = store();
    assert!(store.favorites().is_empty());

    let favorites: BTreeSet<String> = ["Pikachu", "eevee"].iter().map(|s| s.to_string()).collect();
    store.save_favorites(&favorites).unwrap();

    let loaded = store.favorites();
    assert_eq!(loaded.len(), 2);
    assert!(loaded.contains("pikachu"));
    assert!(loaded.contains("eevee"));
}

#[test]
fn test_corrupt_favorites_read_as_empty() {
    let (_dir, store) = store();
    fs::write(store.layout().favorites_file(), b"[oops").unwrap();
    assert!(store.favorites().is_empty());
}

#[test]
fn test_record_files_skip_metadata() {
    let (_dir, store) = store();
    store.put(&charmander()).unwrap();
    store.save_favorites(&BTreeSet::new()).unwrap();
    fs::write(store.layout().index_file(), b"[]").unwrap();

    let files = store.record_files();
    assert_eq!(files.len(), 2);
    assert!(files[0].ends_with("4.json"));
    assert!(files[1].ends_with("charmander.json"));
}

#[test]
fn test_purge_keeps_favorites() {
    let (_dir, store) = store();
    let species = charmander();
    store.put(&species).unwrap();
    store
        .put_sprite(&species, SpriteVariant::Normal, b"png")
        .unwrap();
    store
        .save_favorites(&BTreeSet::from(["charmander".to_string()]))
        .unwrap();

    let removed = store.purge().unwrap();
    assert_eq!(removed, 4);
    assert!(store.record_files().is_empty());
    assert!(!store.has_both(4));
    assert!(store.favorites().contains("charmander"));
}
