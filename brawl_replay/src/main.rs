use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;

use brawl_engine::host::recording::{RecordingHost, RecordingRig};
use brawl_engine::iact::encode_record;
use brawl_engine::{BattleSession, Input, SceneKind, TickReport};

mod cli;
use cli::{parse_scene, Args};

#[derive(Serialize)]
struct ReplayManifest {
    scene: SceneKind,
    seed: u64,
    ticks: i32,
    reports: Vec<TickReport>,
}

/// Deterministic scripted input: a triangle-wave weave across the
/// track with a periodic attack pulse, so two runs with the same seed
/// produce identical logs.
fn scripted_input(tick: i32) -> Input {
    let phase = tick % 120;
    let weave = if phase < 60 { phase } else { 120 - phase };
    Input {
        attack: tick % 9 == 0,
        switch_weapon: tick % 150 == 47,
        cursor_x: 100 + 2 * weave,
        cursor_y: 100,
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let scene = parse_scene(&args.scene)?;

    let store = RecordingHost::new();
    let mut session = BattleSession::begin(scene, args.seed, &store);
    if args.force_win_at.is_some() {
        session.enable_debug_override();
    }
    let mut rig = RecordingRig::new();
    let mut reports = Vec::with_capacity(args.ticks as usize);

    for tick in 0..args.ticks {
        session.pre_tick(&mut rig.collaborators());

        let mut input = scripted_input(tick);
        if args.force_win_at.is_some_and(|at| tick >= at) {
            input.attack = true;
            input.switch_weapon = true;
        }
        let payloads: Vec<Vec<u8>> = if args.branch_at == Some(tick) {
            vec![encode_record(5, 0, &[])]
        } else {
            Vec::new()
        };

        let report = session.post_tick(
            &mut rig.collaborators(),
            input,
            args.max_frame,
            &payloads,
        );
        let done = report.finished;
        reports.push(report);
        if done {
            info!("session finished at tick {tick}");
            break;
        }
    }

    let mut store = store;
    session.persist(&mut store);

    let last = reports.last().context("no ticks were driven")?;
    println!(
        "{:?}: {} ticks, player damage {}, opponent damage {:?}, {} host events",
        last.scene,
        reports.len(),
        last.player_damage,
        last.enemy_damage,
        rig.sound.events().len() + rig.puppets.events().len() + rig.video.events().len(),
    );

    if let Some(path) = args.replay_json.as_ref() {
        let manifest = ReplayManifest {
            scene,
            seed: args.seed,
            ticks: args.ticks,
            reports,
        };
        let file = File::create(path)
            .with_context(|| format!("creating replay log {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &manifest)
            .context("serializing replay log")?;
        println!("replay log written to {}", path.display());
    }

    Ok(())
}
