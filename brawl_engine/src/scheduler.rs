//! The per-frame entry point.
//!
//! The host video player owns the cadence: it calls [`BattleSession::pre_tick`],
//! decodes and renders exactly one frame, then calls
//! [`BattleSession::post_tick`]. Everything the battle mutates lives in
//! the session between those two calls; nothing else touches it.

use log::{debug, info, warn};
use serde::Serialize;

use crate::actor::Actor;
use crate::ai::{Brain, Decision, DecisionCode};
use crate::enemy::{
    default_definitions, ArchetypeId, EnemyArchetypeDefinition, EnemySelector, MetEnemiesWindow,
};
use crate::flags::BitFlagRegister;
use crate::host::{Collaborators, Input};
use crate::iact::{IactCommandDispatcher, ROAD_BRANCH_FLAG};
use crate::machine::{
    enter_overlay_now, enter_pose_now, ActorStateMachine, StepButtons, StepContext, StepOutcome,
    ENEMY_LAYER_BASE, PLAYER_LAYER_BASE,
};
use crate::props::{fight_props, PropTable};
use crate::rng::SessionRng;
use crate::scene::{SceneCategory, SceneKind};
use crate::states::{OverlayState, PoseState, SoundCue};
use crate::transition::{LoadPhase, SceneTransitionManager};
use crate::vars;

/// Gap under which the pursuit engine loop plays, panned by side.
const ENGINE_LOOP_RANGE: i32 = 150;
const ENGINE_LOOP_PAN: i32 = 64;

/// The player's cursor rest column; steering is the offset from it.
const CURSOR_CENTER: i32 = 160;

/// Pulling the cursor below this row ducks the rider.
const CURSOR_DUCK_ROW: i32 = 240;

/// One frame's observable state, serialized by the replay driver.
#[derive(Debug, Clone, Serialize)]
pub struct TickReport {
    pub scene: SceneKind,
    pub frame: i32,
    pub player_x: i32,
    pub player_damage: i32,
    pub enemy_x: Option<i32>,
    pub enemy_damage: Option<i32>,
    pub ai_steer: i32,
    pub ai_code: Option<DecisionCode>,
    pub hits: usize,
    pub vignette: Option<usize>,
    pub switch_pending: bool,
    pub input_locked: bool,
    pub finished: bool,
}

/// One battle session: both actors, the archetype roster, the flag
/// register, the transition queue, and the session RNG. Created by
/// [`BattleSession::begin`], retired by [`BattleSession::persist`].
pub struct BattleSession {
    scene: SceneKind,
    player: Actor,
    enemy: Option<Actor>,
    brain: Option<Brain>,
    definitions: Vec<EnemyArchetypeDefinition>,
    window: MetEnemiesWindow,
    flags: BitFlagRegister,
    props: PropTable,
    transitions: SceneTransitionManager,
    rng: SessionRng,
    /// Frame counter local to the current scene's footage; a scene
    /// switch restarts it at the switch's start frame.
    scene_frame: i32,
    road_bookmark: i32,
    /// The current duel concluded in the player's favor, so the
    /// outro's back-edge leaves the duel loop.
    duel_progressed: bool,
    debug_override_enabled: bool,
    finish_requested: bool,
    finished: bool,
}

impl BattleSession {
    /// Start a session at `scene`, seeding actors and archetype tables
    /// from the persistent variable store.
    pub fn begin(scene: SceneKind, seed: u64, store: &dyn crate::host::VariableStore) -> Self {
        let restored = vars::restore(store);
        let mut definitions = default_definitions();
        vars::apply_to_definitions(&restored, &mut definitions);

        let mut player = Actor::player();
        player.inventory = restored.inventory;
        player.damage = restored.player_damage;

        let mut session = BattleSession {
            scene,
            player,
            enemy: None,
            brain: None,
            definitions,
            window: MetEnemiesWindow::new(),
            flags: BitFlagRegister::new(),
            props: fight_props(),
            transitions: SceneTransitionManager::new(),
            rng: SessionRng::from_seed(seed),
            scene_frame: 0,
            road_bookmark: restored.road_bookmark,
            duel_progressed: false,
            debug_override_enabled: false,
            finish_requested: false,
            finished: false,
        };
        session.enter_scene(scene);
        info!("battle session begins at {scene:?} (seed {seed})");
        session
    }

    pub fn scene(&self) -> SceneKind {
        self.scene
    }

    pub fn player(&self) -> &Actor {
        &self.player
    }

    pub fn enemy(&self) -> Option<&Actor> {
        self.enemy.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Input lock mirrors the resource lifecycle: held while phase-2
    /// primary data is mid-load.
    pub fn input_locked(&self) -> bool {
        self.transitions.input_locked()
    }

    /// Enable the force-win chord (both buttons held). Off by default.
    pub fn enable_debug_override(&mut self) {
        self.debug_override_enabled = true;
    }

    /// Cooperative cancellation: the current tick completes, then the
    /// session reports finished.
    pub fn finish_now(&mut self) {
        self.finish_requested = true;
    }

    /// Write the session's persistent slice back to the store.
    pub fn persist(&self, store: &mut dyn crate::host::VariableStore) {
        let state = vars::gather(
            self.player.inventory,
            &self.definitions,
            self.road_bookmark,
            self.scene.legacy_id(),
            self.player.damage,
        );
        vars::persist(store, &state);
        debug!("session persisted at {:?}", self.scene);
    }

    /// Apply a pending scene switch if its prerequisite load finished.
    pub fn pre_tick(&mut self, hosts: &mut Collaborators<'_>) {
        let Some(switch) = self.transitions.take_ready() else {
            return;
        };
        debug!("applying queued switch {:?} -> {:?}", self.scene, switch.target);
        self.transitions.release_scene_data(self.scene);
        self.scene = switch.target;
        self.enter_scene(switch.target);
        self.transitions
            .load_scene_data(switch.target, LoadPhase::Declare, hosts);
        self.transitions
            .load_scene_data(switch.target, LoadPhase::Load, hosts);
        self.scene_frame = switch.start_frame;
        if let Some(resume) = switch.resume {
            hosts
                .video
                .seek(&switch.filename, resume.byte_offset, switch.start_frame);
        } else {
            hosts.video.play(&switch.filename, 12, 0, switch.start_frame);
        }
    }

    /// Run one frame of battle logic after the host rendered the
    /// current scene frame of footage running to `max_frame`.
    /// `payloads` holds the raw opcode records the video stream
    /// carried for this frame. The session tracks the frame number
    /// itself so a scene switch restarts the count with the footage.
    pub fn post_tick(
        &mut self,
        hosts: &mut Collaborators<'_>,
        input: Input,
        max_frame: i32,
        payloads: &[Vec<u8>],
    ) -> TickReport {
        let mut decision = Decision::idle();
        let mut hits = 0;
        let mut vignette = None;

        match self.scene.category() {
            SceneCategory::Fight => {
                let (fight_decision, fight_hits, fired) =
                    self.fight_frame(hosts, input, payloads);
                decision = fight_decision;
                hits = fight_hits;
                vignette = fired;
            }
            SceneCategory::Transit => {
                self.transit_frame(hosts, input, payloads);
            }
            SceneCategory::Cutscene => {
                // Footage only: no input, no machines, counters still
                // advance below so overlays keep their timing.
            }
        }

        self.player.slots.advance_frame_counters();
        if let Some(enemy) = self.enemy.as_mut() {
            enemy.slots.advance_frame_counters();
        }

        let frame = self.scene_frame;
        if frame >= max_frame {
            self.conclude_scene(hosts);
        }
        self.scene_frame = frame + 1;
        if self.finish_requested {
            self.finished = true;
        }

        TickReport {
            scene: self.scene,
            frame,
            player_x: self.player.x,
            player_damage: self.player.damage,
            enemy_x: self.enemy.as_ref().map(|enemy| enemy.x),
            enemy_damage: self.enemy.as_ref().map(|enemy| enemy.damage),
            ai_steer: decision.steer,
            ai_code: self.enemy.as_ref().map(|_| decision.code),
            hits,
            vignette,
            switch_pending: self.transitions.is_pending(),
            input_locked: self.input_locked(),
            finished: self.finished,
        }
    }

    /// Per-scene setup run on entry: vignette counters rewind, fight
    /// scenes get a fresh opponent from the selector.
    fn enter_scene(&mut self, scene: SceneKind) {
        self.props.reset();
        if scene.category() == SceneCategory::Fight {
            self.spawn_enemy();
        } else {
            self.enemy = None;
            self.brain = None;
        }
        if scene.category() == SceneCategory::Transit {
            self.road_bookmark = self.player.x;
        }
    }

    fn spawn_enemy(&mut self) {
        match EnemySelector::choose(&self.definitions, &mut self.window, &mut self.rng) {
            Some(id) => {
                let definition = &self.definitions[id as usize];
                let probability = probability_for(id);
                self.enemy = Some(Actor::enemy(definition, probability));
                self.brain = Some(Brain::init(id));
                info!("selected opponent {id:?} (probability {probability})");
            }
            None => {
                warn!("enemy roster exhausted; fight scene has no opponent");
                self.enemy = None;
                self.brain = None;
            }
        }
    }

    /// One frame of a duel: AI decision, both machines, combat fallout,
    /// vignettes, and the pursuit engine loop.
    fn fight_frame(
        &mut self,
        hosts: &mut Collaborators<'_>,
        input: Input,
        payloads: &[Vec<u8>],
    ) -> (Decision, usize, Option<usize>) {
        IactCommandDispatcher::process_frame(
            self.scene,
            payloads,
            &mut self.player,
            &mut self.flags,
            hosts,
        );

        let (Some(enemy), Some(brain)) = (self.enemy.as_mut(), self.brain.as_mut()) else {
            return (Decision::idle(), 0, None);
        };

        let debug_chord =
            self.debug_override_enabled && input.attack && input.switch_weapon;
        let decision = brain.decide(enemy, &self.player, &mut self.rng, debug_chord);

        if decision.code == DecisionCode::DebugWin {
            enemy.damage = enemy.max_damage;
            enter_pose_now(
                enemy,
                PoseState::FallStart,
                ENEMY_LAYER_BASE,
                &mut *hosts.sound,
                &mut *hosts.puppets,
            );
            info!("debug override collapsed the opponent");
        }

        let mut hits = 0;
        let enemy_outcome = {
            let mut ctx = StepContext {
                rng: &mut self.rng,
                sound: &mut *hosts.sound,
                puppets: &mut *hosts.puppets,
                layer_base: ENEMY_LAYER_BASE,
                opponent_layer_base: PLAYER_LAYER_BASE,
            };
            ActorStateMachine::step(
                enemy,
                &mut self.player,
                StepButtons {
                    attack: decision.attack,
                    switch_weapon: decision.switch_weapon,
                    duck: false,
                },
                decision.steer,
                &mut ctx,
            )
        };
        hits += enemy_outcome.hits.len();

        let player_locked = self.transitions.input_locked();
        let player_buttons = if player_locked {
            StepButtons::default()
        } else {
            StepButtons {
                attack: input.attack,
                switch_weapon: input.switch_weapon,
                duck: input.cursor_y > CURSOR_DUCK_ROW,
            }
        };
        let player_steer = if player_locked {
            0
        } else {
            input.cursor_x - CURSOR_CENTER
        };
        let player_outcome = {
            let mut ctx = StepContext {
                rng: &mut self.rng,
                sound: &mut *hosts.sound,
                puppets: &mut *hosts.puppets,
                layer_base: PLAYER_LAYER_BASE,
                opponent_layer_base: ENEMY_LAYER_BASE,
            };
            ActorStateMachine::step(
                &mut self.player,
                enemy,
                player_buttons,
                player_steer,
                &mut ctx,
            )
        };
        hits += player_outcome.hits.len();

        let vignette = decision
            .vignette
            .and_then(|slot| self.props.fire(slot, hosts.sound).map(|_| slot));

        Self::drive_engine_loop(&self.player, enemy, hosts);
        Self::note_successor_requests(&mut self.transitions, self.scene, &enemy_outcome);
        Self::note_successor_requests(&mut self.transitions, self.scene, &player_outcome);

        (decision, hits, vignette)
    }

    /// One frame of hazard transit: the player machine alone, driven
    /// by the cursor, with opcode records supplying the obstacles.
    fn transit_frame(
        &mut self,
        hosts: &mut Collaborators<'_>,
        input: Input,
        payloads: &[Vec<u8>],
    ) {
        IactCommandDispatcher::process_frame(
            self.scene,
            payloads,
            &mut self.player,
            &mut self.flags,
            hosts,
        );

        let steer = if self.transitions.input_locked() {
            0
        } else {
            input.cursor_x - CURSOR_CENTER
        };
        // A stand-in keeps the separation bump out of transit scenes.
        let mut absent = Actor::player();
        absent.defunct = true;
        let outcome = {
            let mut ctx = StepContext {
                rng: &mut self.rng,
                sound: &mut *hosts.sound,
                puppets: &mut *hosts.puppets,
                layer_base: PLAYER_LAYER_BASE,
                opponent_layer_base: ENEMY_LAYER_BASE,
            };
            ActorStateMachine::step(
                &mut self.player,
                &mut absent,
                StepButtons::default(),
                steer,
                &mut ctx,
            )
        };
        Self::note_successor_requests(&mut self.transitions, self.scene, &outcome);
        self.road_bookmark = self.player.x;
    }

    /// The pursuit loop plays while the two bikes ride close, panned
    /// toward the opponent's side; it stops the moment either crashes
    /// out or the gap opens.
    fn drive_engine_loop(player: &Actor, enemy: &Actor, hosts: &mut Collaborators<'_>) {
        let gap = enemy.x - player.x;
        let close = gap.abs() < ENGINE_LOOP_RANGE && !player.defunct && !enemy.defunct;
        let id = SoundCue::EngineLoop.id();
        if close {
            hosts.sound.start(id, 64);
            hosts.sound.set_pan(id, ENGINE_LOOP_PAN * gap.signum());
        } else {
            hosts.sound.stop(id);
        }
    }

    fn note_successor_requests(
        transitions: &mut SceneTransitionManager,
        scene: SceneKind,
        outcome: &StepOutcome,
    ) {
        if outcome.queue_successor {
            transitions.queue_successor(scene);
        }
    }

    /// End-of-footage bookkeeping: fight conclusions override the
    /// hand-authored graph edge, everything else follows it.
    fn conclude_scene(&mut self, hosts: &mut Collaborators<'_>) {
        if self.transitions.is_pending() {
            return;
        }
        match self.scene.category() {
            SceneCategory::Fight => self.conclude_fight(),
            SceneCategory::Transit => self.conclude_transit(hosts),
            SceneCategory::Cutscene => {
                // The duel outro loops back unless the roster moved on.
                if self.scene == SceneKind::DuelOutro && self.duel_progressed {
                    self.duel_progressed = false;
                    self.queue_scene(SceneKind::MineRoad);
                    return;
                }
                match self.scene.successor() {
                    Some(_) => self.transitions.queue_successor(self.scene),
                    None => {
                        info!("{:?} ends the session", self.scene);
                        self.finished = true;
                    }
                }
            }
        }
    }

    fn conclude_fight(&mut self) {
        let Some(enemy) = self.enemy.as_ref() else {
            self.transitions.queue_successor(self.scene);
            return;
        };

        if self.player.beaten() {
            info!("player beaten at {:?}", self.scene);
            self.queue_scene(SceneKind::Defeat);
            return;
        }

        if enemy.beaten() {
            if let Some(id) = enemy.enemy_handler {
                self.retire_archetype(id);
            }
            self.duel_progressed = true;
        }
        self.transitions.queue_successor(self.scene);
    }

    fn conclude_transit(&mut self, hosts: &mut Collaborators<'_>) {
        // A raised branch flag redirects the fork; the right branch is
        // the flagged one, the graph default covers the left.
        if self.scene == SceneKind::RoadBranch && self.flags.is_set(ROAD_BRANCH_FLAG) {
            self.flags.clear(ROAD_BRANCH_FLAG);
            enter_overlay_now(
                &mut self.player,
                OverlayState::Hidden,
                PLAYER_LAYER_BASE,
                &mut *hosts.sound,
                &mut *hosts.puppets,
            );
            self.queue_scene(SceneKind::RoadBranchRight);
            return;
        }
        self.transitions.queue_successor(self.scene);
    }

    fn retire_archetype(&mut self, id: ArchetypeId) {
        let definition = &mut self.definitions[id as usize];
        definition.occurrences -= 1;
        if definition.occurrences <= 0 {
            definition.occurrences = 0;
            definition.emptied = true;
            info!("archetype {id:?} emptied");
        }
    }

    fn queue_scene(&mut self, target: SceneKind) {
        self.transitions
            .queue_switch(target, None, target.video_filename(), 0, 0);
    }
}

/// Inverse difficulty per archetype: smaller decides faster.
fn probability_for(id: ArchetypeId) -> i32 {
    match id {
        ArchetypeId::Torque => 3,
        ArchetypeId::VultM2 => 4,
        _ => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::{BattleSession, TickReport};
    use crate::enemy::ArchetypeId;
    use crate::host::recording::RecordingRig;
    use crate::host::{Input, SoundMixer};
    use crate::iact::encode_record;
    use crate::scene::SceneKind;
    use crate::states::{PoseState, SoundCue};
    use crate::vars;
    use crate::weapons::Weapon;

    fn fresh_session(scene: SceneKind, seed: u64) -> (BattleSession, RecordingRig) {
        let store = crate::host::recording::RecordingHost::new();
        let session = BattleSession::begin(scene, seed, &store);
        (session, RecordingRig::new())
    }

    fn run_ticks(
        session: &mut BattleSession,
        rig: &mut RecordingRig,
        input: Input,
        ticks: i32,
        max_frame: i32,
    ) -> Vec<TickReport> {
        (0..ticks)
            .map(|_| {
                session.pre_tick(&mut rig.collaborators());
                session.post_tick(&mut rig.collaborators(), input, max_frame, &[])
            })
            .collect()
    }

    #[test]
    fn fight_sessions_replay_bit_for_bit_with_a_fixed_seed() {
        let mut runs = Vec::new();
        for _ in 0..2 {
            let (mut session, mut rig) = fresh_session(SceneKind::RoadDuel, 99);
            let reports = run_ticks(&mut session, &mut rig, Input::default(), 120, 1200);
            runs.push(
                reports
                    .iter()
                    .map(|report| (report.player_x, report.enemy_x, report.ai_steer))
                    .collect::<Vec<_>>(),
            );
        }
        assert_eq!(runs[0], runs[1]);
    }

    #[test]
    fn fight_scenes_spawn_an_opponent_with_a_brain() {
        let (session, _) = fresh_session(SceneKind::RoadDuel, 1);
        let enemy = session.enemy().expect("fight scene needs an opponent");
        assert!(enemy.enemy_handler.is_some());
        assert!(enemy.weapon.is_some());
    }

    #[test]
    fn cutscenes_run_no_machines() {
        let (mut session, mut rig) = fresh_session(SceneKind::Title, 1);
        let before_x = session.player().x;
        let input = Input { attack: true, switch_weapon: false, cursor_x: 320, cursor_y: 0 };
        run_ticks(&mut session, &mut rig, input, 10, 300);
        assert_eq!(session.player().x, before_x);
        assert!(session.enemy().is_none());
    }

    #[test]
    fn footage_end_queues_the_graph_successor() {
        let (mut session, mut rig) = fresh_session(SceneKind::Title, 1);
        let reports = run_ticks(&mut session, &mut rig, Input::default(), 4, 3);
        assert!(reports.last().unwrap().switch_pending);
        // The next pre-tick applies it.
        session.pre_tick(&mut rig.collaborators());
        assert_eq!(session.scene(), SceneKind::ChaseIntro);
        assert!(rig
            .video
            .events()
            .iter()
            .any(|line| line.starts_with("video.play chase.snm")));
    }

    #[test]
    fn the_session_ends_after_terminal_footage() {
        let (mut session, mut rig) = fresh_session(SceneKind::Victory, 1);
        let reports = run_ticks(&mut session, &mut rig, Input::default(), 4, 2);
        assert!(reports.last().unwrap().finished);
        assert!(session.is_finished());
    }

    #[test]
    fn a_beaten_player_is_routed_to_defeat() {
        let (mut session, mut rig) = fresh_session(SceneKind::RoadDuel, 5);
        session.player.damage = session.player.max_damage;
        run_ticks(&mut session, &mut rig, Input::default(), 1, 0);
        session.pre_tick(&mut rig.collaborators());
        assert_eq!(session.scene(), SceneKind::Defeat);
    }

    #[test]
    fn a_beaten_opponent_retires_its_archetype_and_leaves_the_duel_loop() {
        let (mut session, mut rig) = fresh_session(SceneKind::RoadDuel, 5);
        let id = session.enemy().unwrap().enemy_handler.unwrap();
        let before = session.definitions[id as usize].occurrences;
        if let Some(enemy) = session.enemy.as_mut() {
            enemy.damage = enemy.max_damage;
        }
        run_ticks(&mut session, &mut rig, Input::default(), 1, 0);
        assert_eq!(session.definitions[id as usize].occurrences, before - 1);

        // The outro now exits the loop instead of rematching.
        session.pre_tick(&mut rig.collaborators());
        assert_eq!(session.scene(), SceneKind::DuelOutro);
        run_ticks(&mut session, &mut rig, Input::default(), 1, 0);
        session.pre_tick(&mut rig.collaborators());
        assert_eq!(session.scene(), SceneKind::MineRoad);
    }

    #[test]
    fn the_engine_loop_follows_the_gap() {
        let (mut session, mut rig) = fresh_session(SceneKind::RoadDuel, 5);
        // Spawn puts the pair 90 px apart: close enough for the loop.
        run_ticks(&mut session, &mut rig, Input::default(), 1, 1200);
        assert!(rig.sound.is_playing(SoundCue::EngineLoop.id()));

        if let Some(enemy) = session.enemy.as_mut() {
            enemy.x = 0;
            enemy.defunct = true;
        }
        session.player.x = 320;
        run_ticks(&mut session, &mut rig, Input::default(), 1, 1200);
        assert!(!rig.sound.is_playing(SoundCue::EngineLoop.id()));
    }

    #[test]
    fn the_branch_flag_redirects_the_fork() {
        let (mut session, mut rig) = fresh_session(SceneKind::RoadBranch, 5);
        let branch_record = encode_record(5, 0, &[]);
        session.pre_tick(&mut rig.collaborators());
        session.post_tick(
            &mut rig.collaborators(),
            Input::default(),
            600,
            &[branch_record],
        );
        run_ticks(&mut session, &mut rig, Input::default(), 1, 1);
        session.pre_tick(&mut rig.collaborators());
        assert_eq!(session.scene(), SceneKind::RoadBranchRight);
    }

    #[test]
    fn the_fork_defaults_left_without_the_flag() {
        let (mut session, mut rig) = fresh_session(SceneKind::RoadBranch, 5);
        run_ticks(&mut session, &mut rig, Input::default(), 1, 0);
        session.pre_tick(&mut rig.collaborators());
        assert_eq!(session.scene(), SceneKind::RoadBranchLeft);
    }

    #[test]
    fn finish_now_lets_the_tick_complete_first() {
        let (mut session, mut rig) = fresh_session(SceneKind::RoadDuel, 5);
        session.finish_now();
        let report =
            session.post_tick(&mut rig.collaborators(), Input::default(), 1200, &[]);
        assert!(report.finished);
        assert!(session.is_finished());
    }

    #[test]
    fn the_debug_chord_collapses_the_opponent_when_enabled() {
        let (mut session, mut rig) = fresh_session(SceneKind::RoadDuel, 5);
        session.enable_debug_override();
        let chord = Input { attack: true, switch_weapon: true, cursor_x: 160, cursor_y: 0 };
        run_ticks(&mut session, &mut rig, chord, 1, 1200);
        let enemy = session.enemy().unwrap();
        assert!(enemy.beaten());
        assert!(enemy.lost, "the forced fall must mark the loss");
        assert_eq!(enemy.slots.pose.state, PoseState::FallStart);
        assert!(
            rig.puppets.events().iter().any(|line| line == "puppet[5].anim 50"),
            "the forced fall never animated: {:?}",
            rig.puppets.events()
        );
    }

    #[test]
    fn the_debug_chord_is_inert_by_default() {
        let (mut session, mut rig) = fresh_session(SceneKind::RoadDuel, 5);
        let chord = Input { attack: true, switch_weapon: true, cursor_x: 160, cursor_y: 0 };
        run_ticks(&mut session, &mut rig, chord, 5, 1200);
        assert!(!session.enemy().unwrap().beaten());
    }

    #[test]
    fn a_low_cursor_ducks_the_player() {
        let (mut session, mut rig) = fresh_session(SceneKind::RoadDuel, 5);
        let input = Input { attack: false, switch_weapon: false, cursor_x: 160, cursor_y: 300 };
        run_ticks(&mut session, &mut rig, input, 1, 1200);
        assert_eq!(session.player().slots.pose.state, PoseState::Duck);
    }

    #[test]
    fn a_fresh_scene_restarts_its_frame_count_after_a_switch() {
        let (mut session, mut rig) = fresh_session(SceneKind::Title, 1);
        let reports = run_ticks(&mut session, &mut rig, Input::default(), 6, 3);
        let last = reports.last().unwrap();
        // Frames 0..=3 play the title, the switch applies, then the
        // next scene counts from its own frame 0 again.
        assert_eq!(last.scene, SceneKind::ChaseIntro);
        assert_eq!(last.frame, 1);
        assert!(!last.switch_pending, "the successor concluded twice");
    }

    #[test]
    fn persist_writes_the_session_slice_back() {
        let (mut session, _) = fresh_session(SceneKind::RoadDuel, 5);
        session.player.inventory.grant(Weapon::Chain);
        session.player.damage = 37;
        let mut store = crate::host::recording::RecordingHost::new();
        session.persist(&mut store);

        let restored = vars::restore(&store);
        assert!(restored.inventory.owns(Weapon::Chain));
        assert_eq!(restored.player_damage, 37);
        assert_eq!(restored.last_scene, SceneKind::RoadDuel.legacy_id());
    }

    #[test]
    fn the_boss_is_forced_once_its_gate_opens() {
        let store = crate::host::recording::RecordingHost::new();
        let mut session = BattleSession::begin(SceneKind::BossDuel, 5, &store);
        for definition in &mut session.definitions {
            if definition.id == ArchetypeId::VultM2 {
                definition.occurrences = 0;
                definition.emptied = true;
            }
        }
        session.spawn_enemy();
        assert_eq!(
            session.enemy().unwrap().enemy_handler,
            Some(ArchetypeId::Torque)
        );
    }
}
