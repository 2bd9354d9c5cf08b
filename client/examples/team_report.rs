//! Team Report Example
//!
//! Builds a team from cached species and prints its synergy score. Run
//! `bulk_sync` first so the names resolve.
//!
//! Usage: cargo run --example team_report -- charizard blastoise venusaur

use std::env;
use std::process;

use anyhow::Result;
use dexteam_client::{Dex, DexConfig, MAX_TEAM_SIZE, Team, TeamError};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let names: Vec<String> = env::args().skip(1).collect();
    if names.is_empty() {
        eprintln!("Usage: team_report <name>...  (at most {MAX_TEAM_SIZE})");
        process::exit(1);
    }

    let dex = Dex::open(DexConfig::from_env())?;
    let mut team = Team::new(dex.teams().next_id(), "Report");

    for name in &names {
        let Some(member) = dex.member(name)? else {
            println!("{name}: not cached");
            for suggestion in dex.suggest(name, &team.member_names()) {
                println!("  did you mean {suggestion}?");
            }
            continue;
        };
        match team.add(member) {
            Ok(()) => {}
            Err(TeamError::Full(_)) => {
                println!("Team is full, ignoring {name}");
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    let summary = dex.compute_team_summary(team.members())?;
    let b = summary.breakdown;

    println!("\n=== {} ({} members) ===", team.name, team.len());
    for member in team.members() {
        let types: Vec<String> = member.types.iter().map(ToString::to_string).collect();
        println!("  {:<12} {}", member.name, types.join("/"));
    }
    println!("\nScore:      {}/1000", summary.total_score);
    println!(
        "  offense {} + defense {} + stats {} - penalty {}",
        b.offensive, b.defensive, b.base_stats, b.weakness_penalty
    );
    println!("Strengths:  {}", summary.strength_labels().join(", "));
    println!("Weaknesses: {}", summary.weakness_labels().join(", "));

    if !team.is_empty() {
        dex.teams().save(&team)?;
        println!("\nSaved as team {}", team.id);
    }
    Ok(())
}
