//! Bulk Sync Example
//!
//! Fills a cache from a small in-memory roster, printing progress as it goes.
//! Ctrl-C cancels the run; running it again resumes where it stopped.
//!
//! Usage: cargo run --example bulk_sync [cache_root]
//! Set RUST_LOG=debug to see per-id logging.

use std::env;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use dexteam_client::{
    CancelToken, Dex, DexConfig, FetchError, FetchedSpecies, Fetcher, Species, SyncProgress, Type,
};
use tracing_subscriber::EnvFilter;

const ROSTER: &[(&str, &[Type], [u32; 6])] = &[
    ("Bulbasaur", &[Type::Grass, Type::Poison], [45, 49, 49, 65, 65, 45]),
    ("Ivysaur", &[Type::Grass, Type::Poison], [60, 62, 63, 80, 80, 60]),
    ("Venusaur", &[Type::Grass, Type::Poison], [80, 82, 83, 100, 100, 80]),
    ("Charmander", &[Type::Fire], [39, 52, 43, 60, 50, 65]),
    ("Charmeleon", &[Type::Fire], [58, 64, 58, 80, 65, 80]),
    ("Charizard", &[Type::Fire, Type::Flying], [78, 84, 78, 109, 85, 100]),
    ("Squirtle", &[Type::Water], [44, 48, 65, 50, 64, 43]),
    ("Wartortle", &[Type::Water], [59, 63, 80, 65, 80, 58]),
    ("Blastoise", &[Type::Water], [79, 83, 100, 85, 105, 78]),
];

/// Stands in for a remote API: slow, and missing anything past the roster
struct RosterFetcher;

#[async_trait]
impl Fetcher for RosterFetcher {
    async fn fetch_by_id(&self, id: u32) -> Result<FetchedSpecies, FetchError> {
        tokio::time::sleep(Duration::from_millis(50)).await;

        let (name, types, stats) = ROSTER
            .get(id as usize - 1)
            .ok_or(FetchError::NotFound(id))?;
        let mut species = Species::new(id, *name)
            .with_types(types)
            .with_base_stats(*stats);
        species.generation = 1;
        Ok(FetchedSpecies::new(species).with_sprite(format!("sprite {id}").into_bytes()))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match env::args().nth(1) {
        Some(root) => DexConfig::with_root(root),
        None => DexConfig::from_env(),
    };
    let config = DexConfig {
        sync_total: 12,
        ..config
    };
    let dex = Dex::open(config)?;

    let cancel = CancelToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    let report = dex
        .start_bulk_sync(RosterFetcher, cancel, &mut |p: SyncProgress| {
            if p.is_complete {
                println!("Done: {}/{} cached", p.current, p.total);
            } else {
                println!(
                    "[{:5.1}%] id {:>4}  ({} failed, {:.1}s)",
                    p.percentage(),
                    p.current_id,
                    p.failed,
                    p.elapsed.as_secs_f64()
                );
            }
        })
        .await?;

    println!(
        "\n{} cached, {} fetched, {} failed in {:?}{}",
        report.downloaded,
        report.fetched,
        report.failed,
        report.elapsed,
        if report.cancelled { " (cancelled)" } else { "" }
    );

    for entry in dex.index().iter() {
        let types: Vec<String> = entry.types.iter().map(ToString::to_string).collect();
        println!("#{:03} {:<12} {}", entry.id, entry.name, types.join("/"));
    }

    Ok(())
}
