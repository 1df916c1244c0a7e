use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use brawl_engine::SceneKind;

#[derive(Parser, Debug)]
#[command(
    about = "Headless battle driver that records per-tick replay logs",
    version
)]
pub struct Args {
    /// Scene to start in: a name (road-duel, boss-duel, ambush,
    /// cliff-duel, mine-road, road-branch, title) or a legacy id
    #[arg(long, default_value = "road-duel")]
    pub scene: String,

    /// Session RNG seed
    #[arg(long, default_value_t = 1934)]
    pub seed: u64,

    /// Number of ticks to drive
    #[arg(long, default_value_t = 600)]
    pub ticks: i32,

    /// Footage length in frames before the successor transition fires
    #[arg(long, default_value_t = 1200)]
    pub max_frame: i32,

    /// Path to write the replay log as JSON
    #[arg(long)]
    pub replay_json: Option<PathBuf>,

    /// Hold the force-win chord from this tick on (enables the debug
    /// override)
    #[arg(long)]
    pub force_win_at: Option<i32>,

    /// Inject a road-branch opcode record at this tick
    #[arg(long)]
    pub branch_at: Option<i32>,
}

pub fn parse_scene(name: &str) -> Result<SceneKind> {
    let scene = match name {
        "title" => SceneKind::Title,
        "road-duel" => SceneKind::RoadDuel,
        "mine-road" => SceneKind::MineRoad,
        "tunnel" => SceneKind::Tunnel,
        "road-branch" => SceneKind::RoadBranch,
        "ambush" => SceneKind::Ambush,
        "cliff-duel" => SceneKind::CliffDuel,
        "boss-duel" => SceneKind::BossDuel,
        other => match other.parse::<i32>() {
            Ok(id) => SceneKind::from_legacy_id(id)?,
            Err(_) => bail!("unknown scene name {other:?}"),
        },
    };
    Ok(scene)
}
