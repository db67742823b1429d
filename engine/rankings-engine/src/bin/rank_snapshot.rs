use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use rankings_engine::logging::initialize_logging;
use rankings_engine::{BaselineMethod, Position, RankingEngine, RosterConfig, SourceSnapshot};
use tracing::{info, warn};

const DEFAULT_SNAPSHOT: &str = "data/snapshots/latest.json";

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    initialize_logging()?;

    let config = match std::env::var("RANKINGS_CONFIG") {
        Ok(path) => RosterConfig::from_file(&path)
            .with_context(|| format!("Failed to load roster config from {}", path))?,
        Err(_) => RosterConfig::from_env()?,
    };
    let method: BaselineMethod = env_or("RANKINGS_BASELINE", "vorp").parse()?;
    let top: usize =
        env_or("RANKINGS_TOP", "50").parse().context("RANKINGS_TOP must be an integer")?;

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| env_or("RANKINGS_SNAPSHOT", DEFAULT_SNAPSHOT));
    let snapshot = SourceSnapshot::load(&path)
        .await
        .with_context(|| format!("Failed to load snapshot {}", path))?;

    if snapshot.is_stale(Duration::hours(24), Utc::now()) {
        warn!("Snapshot captured at {} is more than a day old", snapshot.captured_at);
    }

    let engine = RankingEngine::new(config)?;
    let rankings = engine.build_rankings(snapshot.records, method)?;

    if env_or("RANKINGS_OUTPUT", "table") == "json" {
        println!("{}", serde_json::to_string_pretty(&rankings)?);
        return Ok(());
    }

    println!("\nTop {} by value over replacement ({}):", top, method);
    println!("Rank Name                     Pos  Team Tier  Points     VORP  Cons  Src");
    println!("--------------------------------------------------------------------------");
    for player in rankings.top(top) {
        println!(
            "{:4} {:24} {:4} {:4} {:4} {:7.1}{} {:8.1} {:5.1} {:4}",
            player.vbd.value_rank,
            player.name(),
            player.position(),
            player.entry.player.team,
            player.vbd.tier,
            player.entry.points(),
            if player.entry.points_estimated { "*" } else { " " },
            player.vbd.vorp,
            player.entry.consensus_rank,
            player.entry.source_count
        );
    }

    println!("\nBaselines:");
    for position in Position::ALL {
        if let Some(baseline) = rankings.baseline(position) {
            match &baseline.baseline_player {
                Some(name) => println!(
                    "  {:4} slot {:3} -> {} ({:.1} pts), scarcity {:.2}",
                    position,
                    baseline.baseline_slot,
                    name,
                    baseline.baseline_points,
                    baseline.scarcity
                ),
                None => println!("  {:4} no eligible players", position),
            }
        }
    }

    if !rankings.warnings.is_empty() {
        println!("\nWarnings ({}):", rankings.warnings.len());
        for warning in &rankings.warnings {
            println!("  {}", warning);
        }
    }

    info!("Ranked {} players from {} season snapshot", rankings.players.len(), snapshot.season);
    Ok(())
}
