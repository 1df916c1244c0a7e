//! The per-actor, per-slot state machine driver.
//!
//! `ActorStateMachine::step` runs one combatant for one tick: movement
//! integration, button handling, then data-driven dispatch of all four
//! slot tables from [`crate::states`]. The tables stay pure; every
//! side effect funnels through [`apply_effect`] so the borrow of the
//! opponent, the mixer and the puppeteer happens in exactly one place.
//!
//! States entered outside the dispatch loop (combat reactions,
//! criticals, opcode records) must go through the `enter_*_now`
//! helpers, which run the target state's entry effects in the same
//! breath. A bare `SlotRecord::enter` skips them.

use log::{debug, warn};

use crate::actor::{
    Actor, SlotKind, MIN_SEPARATION, SPEED_LIMIT, STEER_DIVISOR, TRACK_MAX_X, TRACK_MIN_X,
};
use crate::combat::{CombatResolver, HitOutcome};
use crate::host::{LayerId, Puppeteer, SoundMixer};
use crate::rng::SessionRng;
use crate::states::{
    attack_accepted, body_spec, overlay_spec, pose_spec, weapon_spec, BodyState, CostumeRole,
    Effect, Guard, OverlayState, PoseState, StateSpec, WeaponState,
};
use crate::weapons::{Weapon, WeaponClass};

/// Puppeteer layer bases for the two combatants' four slots each.
pub const PLAYER_LAYER_BASE: LayerId = 0;
pub const ENEMY_LAYER_BASE: LayerId = 4;

/// Costume ids installed by `SwitchCostume` effects.
const COSTUME_RIDER_BATTERED: i32 = 301;
const COSTUME_BIKE_BATTERED: i32 = 302;
/// Weapon-layer costumes sit at a fixed base plus the weapon index.
const COSTUME_WEAPON_BASE: i32 = 400;

/// Buttons relevant to one step, already split out of the host's
/// input word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepButtons {
    pub attack: bool,
    pub switch_weapon: bool,
    pub duck: bool,
}

/// Borrowed collaborators for one actor's step.
pub struct StepContext<'a> {
    pub rng: &'a mut SessionRng,
    pub sound: &'a mut dyn SoundMixer,
    pub puppets: &'a mut dyn Puppeteer,
    /// First puppeteer layer of this actor's four slots.
    pub layer_base: LayerId,
    /// First puppeteer layer of the opponent's slots, so reactions
    /// entered on the defender animate the defender's layers.
    pub opponent_layer_base: LayerId,
}

/// What one step asked of the scheduler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// A state table requested the scene's successor transition.
    pub queue_successor: bool,
    /// The inventory cycled to a new weapon this tick.
    pub weapon_cycled: bool,
    pub hits: Vec<HitOutcome>,
}

pub struct ActorStateMachine;

impl ActorStateMachine {
    /// Run one combatant for one tick. `steer` is the signed steering
    /// magnitude for this tick (the AI's cursor nudge, or the
    /// player's cursor offset).
    pub fn step(
        actor: &mut Actor,
        opponent: &mut Actor,
        buttons: StepButtons,
        steer: i32,
        ctx: &mut StepContext<'_>,
    ) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        if actor.defunct {
            return outcome;
        }

        integrate_movement(actor, opponent, steer, ctx);

        let mut effects: Vec<(SlotKind, Effect)> = Vec::new();
        handle_buttons(actor, buttons, &mut effects);
        dispatch_slots(actor, &mut effects);

        for (slot, effect) in effects {
            apply_effect(actor, opponent, slot, effect, ctx, &mut outcome);
        }
        outcome
    }
}

/// Enter a pose from outside the dispatch loop and run the state's
/// entry effects against `layer_base`'s slots.
pub fn enter_pose_now(
    actor: &mut Actor,
    state: PoseState,
    layer_base: LayerId,
    sound: &mut dyn SoundMixer,
    puppets: &mut dyn Puppeteer,
) {
    actor.slots.pose.enter(state);
    for effect in pose_spec(state).enter {
        apply_slot_effect(actor, SlotKind::Pose, *effect, layer_base, sound, puppets);
    }
}

/// Out-of-band body-slot entry; see [`enter_pose_now`].
pub fn enter_body_now(
    actor: &mut Actor,
    state: BodyState,
    layer_base: LayerId,
    sound: &mut dyn SoundMixer,
    puppets: &mut dyn Puppeteer,
) {
    actor.slots.body.enter(state);
    for effect in body_spec(state).enter {
        apply_slot_effect(actor, SlotKind::Body, *effect, layer_base, sound, puppets);
    }
}

/// Out-of-band weapon-slot entry; see [`enter_pose_now`].
pub fn enter_weapon_now(
    actor: &mut Actor,
    state: WeaponState,
    layer_base: LayerId,
    sound: &mut dyn SoundMixer,
    puppets: &mut dyn Puppeteer,
) {
    actor.slots.weapon.enter(state);
    for effect in weapon_spec(state).enter {
        apply_slot_effect(actor, SlotKind::Weapon, *effect, layer_base, sound, puppets);
    }
}

/// Out-of-band overlay-slot entry; see [`enter_pose_now`].
pub fn enter_overlay_now(
    actor: &mut Actor,
    state: OverlayState,
    layer_base: LayerId,
    sound: &mut dyn SoundMixer,
    puppets: &mut dyn Puppeteer,
) {
    actor.slots.overlay.enter(state);
    for effect in overlay_spec(state).enter {
        apply_slot_effect(actor, SlotKind::Overlay, *effect, layer_base, sound, puppets);
    }
}

/// Speed/position integration plus the separation bump and track
/// clamps, with the exact legacy constants.
fn integrate_movement(
    actor: &mut Actor,
    opponent: &mut Actor,
    steer: i32,
    ctx: &mut StepContext<'_>,
) {
    if steer != 0 {
        actor.speed += steer / STEER_DIVISOR;
    } else if actor.speed > 0 {
        actor.speed -= 1;
    } else if actor.speed < 0 {
        actor.speed += 1;
    }
    actor.speed = actor.speed.clamp(-SPEED_LIMIT, SPEED_LIMIT);
    actor.tilt = actor.speed;
    actor.slots.pose.anim_tilt = actor.pose_tilt();
    actor.x += actor.speed;

    // The bump: whoever trails is pushed back to the 90 px line and
    // the two momenta trade places.
    if !opponent.defunct && (actor.x - opponent.x).abs() < MIN_SEPARATION {
        if actor.x <= opponent.x {
            actor.x = opponent.x - MIN_SEPARATION;
            bump(actor, BodyState::BumpBack, ctx.layer_base, ctx);
            bump(opponent, BodyState::BumpForward, ctx.opponent_layer_base, ctx);
        } else {
            opponent.x = actor.x - MIN_SEPARATION;
            bump(opponent, BodyState::BumpBack, ctx.opponent_layer_base, ctx);
            bump(actor, BodyState::BumpForward, ctx.layer_base, ctx);
        }
        std::mem::swap(&mut actor.speed, &mut opponent.speed);
    }

    if actor.x < TRACK_MIN_X || actor.x > TRACK_MAX_X {
        actor.x = actor.x.clamp(TRACK_MIN_X, TRACK_MAX_X);
        actor.x1 = if actor.x1 == 0 { 2 } else { -actor.x1 };
        actor.y1 = if actor.y1 == 0 { 1 } else { -actor.y1 };
        actor.damage += 1;
        bump(actor, BodyState::EdgeScrape, ctx.layer_base, ctx);
    }
    actor.slots.body.tilt_offset = actor.x1;

    // Riding animation is steer-driven rather than table-driven: the
    // lean angle tracks the pose tilt plus the oscillation offset.
    if actor.slots.body.state == BodyState::Ride {
        ctx.puppets.set_direction(
            layer_of(ctx.layer_base, SlotKind::Body),
            actor.slots.pose.anim_tilt + actor.slots.body.tilt_offset,
        );
    }
}

fn bump(actor: &mut Actor, state: BodyState, layer_base: LayerId, ctx: &mut StepContext<'_>) {
    if actor.slots.body.state == BodyState::Ride {
        enter_body_now(actor, state, layer_base, &mut *ctx.sound, &mut *ctx.puppets);
    }
}

/// Button handling: a switch request needs the weapon slot out of the
/// switch chain and a pose that accepts commands; ducking tucks the
/// rider; an attack request routes to the kick chain when unarmed.
fn handle_buttons(actor: &mut Actor, buttons: StepButtons, effects: &mut Vec<(SlotKind, Effect)>) {
    let pose_open = attack_accepted(actor.slots.pose.state);

    if buttons.switch_weapon && pose_open && !mid_switch(actor) {
        enter_pose(actor, PoseState::SwitchPose, effects);
        enter_weapon(actor, WeaponState::SwitchOut, effects);
        return;
    }

    if buttons.duck && pose_open && actor.slots.pose.state != PoseState::Duck {
        enter_pose(actor, PoseState::Duck, effects);
        return;
    }

    if buttons.attack && pose_open {
        match actor.weapon {
            Some(_) => {
                enter_pose(actor, PoseState::AttackWindup, effects);
                if !mid_switch(actor) {
                    enter_weapon(actor, WeaponState::SwingWindup, effects);
                }
            }
            None => enter_pose(actor, PoseState::KickWindup, effects),
        }
    }
}

fn mid_switch(actor: &Actor) -> bool {
    matches!(
        actor.slots.weapon.state,
        WeaponState::SwitchOut | WeaponState::SwitchIn
    )
}

/// Advance all four slots through their tables, collecting effects.
fn dispatch_slots(actor: &mut Actor, effects: &mut Vec<(SlotKind, Effect)>) {
    {
        let slot = &mut actor.slots.body;
        collect(SlotKind::Body, body_spec, slot.state, slot.frames, effects, |next| {
            slot.enter(next)
        });
    }
    {
        let slot = &mut actor.slots.pose;
        collect(SlotKind::Pose, pose_spec, slot.state, slot.frames, effects, |next| {
            slot.enter(next)
        });
    }
    {
        let slot = &mut actor.slots.weapon;
        collect(SlotKind::Weapon, weapon_spec, slot.state, slot.frames, effects, |next| {
            slot.enter(next)
        });
    }
    {
        let slot = &mut actor.slots.overlay;
        collect(SlotKind::Overlay, overlay_spec, slot.state, slot.frames, effects, |next| {
            slot.enter(next)
        });
    }
}

/// One slot's dispatch: fire due mid-state effects, then follow the
/// guard, applying the successor's entry effects in the same tick.
fn collect<S: Copy + PartialEq + 'static>(
    kind: SlotKind,
    spec: fn(S) -> StateSpec<S>,
    state: S,
    frames: u32,
    effects: &mut Vec<(SlotKind, Effect)>,
    mut enter: impl FnMut(S),
) {
    let row = spec(state);
    for (offset, effect) in row.during {
        if *offset == frames {
            effects.push((kind, *effect));
        }
    }
    if let Guard::Frames(limit) = row.guard {
        if frames >= limit {
            enter(row.next);
            for effect in spec(row.next).enter {
                effects.push((kind, *effect));
            }
        }
    }
}

fn enter_pose(actor: &mut Actor, state: PoseState, effects: &mut Vec<(SlotKind, Effect)>) {
    actor.slots.pose.enter(state);
    for effect in pose_spec(state).enter {
        effects.push((SlotKind::Pose, *effect));
    }
}

fn enter_weapon(actor: &mut Actor, state: WeaponState, effects: &mut Vec<(SlotKind, Effect)>) {
    actor.slots.weapon.enter(state);
    for effect in weapon_spec(state).enter {
        effects.push((SlotKind::Weapon, *effect));
    }
}

fn layer_of(base: LayerId, slot: SlotKind) -> LayerId {
    base + match slot {
        SlotKind::Body => 0,
        SlotKind::Pose => 1,
        SlotKind::Weapon => 2,
        SlotKind::Overlay => 3,
    }
}

fn set_visible(actor: &mut Actor, slot: SlotKind, visible: bool) {
    let record_visible = match slot {
        SlotKind::Body => &mut actor.slots.body.visible,
        SlotKind::Pose => &mut actor.slots.pose.visible,
        SlotKind::Weapon => &mut actor.slots.weapon.visible,
        SlotKind::Overlay => &mut actor.slots.overlay.visible,
    };
    *record_visible = visible;
}

/// Weapon-slot animations offset into the held weapon's class bank.
fn class_bank(actor: &Actor) -> i32 {
    match actor.weapon_class() {
        None | Some(WeaponClass::Brawl) => 0,
        Some(WeaponClass::Flex) => 100,
        Some(WeaponClass::Blunt) => 200,
        Some(WeaponClass::Edge) => 300,
    }
}

/// The actor-local slice of the effect set: everything that needs only
/// the acting actor's slots plus the mixer and the puppeteer. Both the
/// dispatch funnel and the out-of-band entry helpers land here.
fn apply_slot_effect(
    actor: &mut Actor,
    slot: SlotKind,
    effect: Effect,
    layer_base: LayerId,
    sound: &mut dyn SoundMixer,
    puppets: &mut dyn Puppeteer,
) {
    let layer = layer_of(layer_base, slot);
    match effect {
        Effect::Animate(frame) => {
            let frame = if slot == SlotKind::Weapon {
                frame + class_bank(actor)
            } else {
                frame
            };
            puppets.start_animation(layer, frame);
        }
        Effect::StartSound(cue) => sound.start(cue.id(), 90),
        Effect::StopSound(cue) => sound.stop(cue.id()),
        Effect::SetKicking(value) => actor.kicking = value,
        Effect::SetLocked(value) => actor.locked = value,
        Effect::SetLost => {
            actor.lost = true;
            debug!("actor at x={} lost the duel", actor.x);
        }
        Effect::MarkDefunct => actor.defunct = true,
        Effect::SwitchCostume(role) => {
            let costume = match role {
                CostumeRole::Rider => COSTUME_RIDER_BATTERED,
                CostumeRole::Bike => COSTUME_BIKE_BATTERED,
            };
            puppets.set_costume(layer, costume);
        }
        Effect::Show => {
            set_visible(actor, slot, true);
            puppets.set_layer(layer, slot as i32);
        }
        Effect::Hide => {
            set_visible(actor, slot, false);
            puppets.set_layer(layer, -1);
        }
        Effect::ResolveHit { .. } | Effect::QueueSuccessor | Effect::CycleWeapon => {
            warn!("{effect:?} requested outside the dispatch loop; ignored");
        }
    }
}

fn apply_effect(
    actor: &mut Actor,
    opponent: &mut Actor,
    slot: SlotKind,
    effect: Effect,
    ctx: &mut StepContext<'_>,
    outcome: &mut StepOutcome,
) {
    match effect {
        Effect::ResolveHit {
            apply_damage,
            allow_critical,
        } => {
            let result =
                CombatResolver::hit_check(actor, opponent, apply_damage, allow_critical, ctx);
            outcome.hits.push(result);
        }
        Effect::QueueSuccessor => outcome.queue_successor = true,
        Effect::CycleWeapon => {
            let current = actor.weapon.unwrap_or(Weapon::Hand);
            let next = actor.inventory.cycle_next(current);
            actor.weapon = Some(next);
            outcome.weapon_cycled = true;
            ctx.puppets
                .set_costume(layer_of(ctx.layer_base, slot), COSTUME_WEAPON_BASE + next as i32);
        }
        other => apply_slot_effect(
            actor,
            slot,
            other,
            ctx.layer_base,
            &mut *ctx.sound,
            &mut *ctx.puppets,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::{ActorStateMachine, StepButtons, StepContext};
    use crate::actor::{Actor, MIN_SEPARATION, SPEED_LIMIT, TRACK_MAX_X};
    use crate::host::recording::RecordingRig;
    use crate::rng::SessionRng;
    use crate::states::{PoseState, WeaponState};
    use crate::weapons::Weapon;

    fn run_tick(
        actor: &mut Actor,
        opponent: &mut Actor,
        buttons: StepButtons,
        steer: i32,
        rig: &mut RecordingRig,
        rng: &mut SessionRng,
    ) -> super::StepOutcome {
        let outcome = {
            let mut ctx = StepContext {
                rng,
                sound: &mut rig.sound,
                puppets: &mut rig.puppets,
                layer_base: 0,
                opponent_layer_base: 4,
            };
            ActorStateMachine::step(actor, opponent, buttons, steer, &mut ctx)
        };
        actor.slots.advance_frame_counters();
        outcome
    }

    fn far_apart() -> (Actor, Actor) {
        let mut actor = Actor::player();
        let mut opponent = Actor::player();
        actor.x = 40;
        opponent.x = 280;
        (actor, opponent)
    }

    #[test]
    fn speed_stays_clamped_under_sustained_steering() {
        let (mut actor, mut opponent) = far_apart();
        let mut rig = RecordingRig::new();
        let mut rng = SessionRng::from_seed(1);
        for _ in 0..40 {
            run_tick(&mut actor, &mut opponent, StepButtons::default(), 320, &mut rig, &mut rng);
            assert!(actor.speed.abs() <= SPEED_LIMIT, "speed {} escaped", actor.speed);
            assert!(actor.pose_tilt().abs() <= 7);
        }
        assert_eq!(actor.speed, SPEED_LIMIT);
        assert_eq!(actor.slots.pose.anim_tilt, 7);
    }

    #[test]
    fn speed_decays_toward_zero_without_steering() {
        let (mut actor, mut opponent) = far_apart();
        actor.speed = 5;
        let mut rig = RecordingRig::new();
        let mut rng = SessionRng::from_seed(1);
        for expected in [4, 3, 2, 1, 0, 0] {
            run_tick(&mut actor, &mut opponent, StepButtons::default(), 0, &mut rig, &mut rng);
            assert_eq!(actor.speed, expected);
        }
    }

    #[test]
    fn the_bump_pushes_the_trailing_actor_back_and_swaps_speeds() {
        let mut actor = Actor::player();
        let mut opponent = Actor::player();
        actor.x = 150;
        actor.speed = 6;
        opponent.x = 200;
        opponent.speed = -2;
        let mut rig = RecordingRig::new();
        let mut rng = SessionRng::from_seed(1);
        run_tick(&mut actor, &mut opponent, StepButtons::default(), 320, &mut rig, &mut rng);
        assert_eq!(opponent.x - actor.x, MIN_SEPARATION);
        // Actor hit the speed clamp before the bump, then took the
        // opponent's momentum.
        assert_eq!(actor.speed, -2);
        assert_eq!(opponent.speed, SPEED_LIMIT);
    }

    #[test]
    fn bump_reactions_reach_the_puppeteer_and_mixer() {
        let mut actor = Actor::player();
        let mut opponent = Actor::player();
        actor.x = 150;
        opponent.x = 200;
        let mut rig = RecordingRig::new();
        let mut rng = SessionRng::from_seed(1);
        run_tick(&mut actor, &mut opponent, StepButtons::default(), 320, &mut rig, &mut rng);
        assert_eq!(actor.slots.body.state, crate::states::BodyState::BumpBack);
        assert!(
            rig.puppets.events().iter().any(|line| line == "puppet[0].anim 102"),
            "bump-back animation never reached the puppeteer: {:?}",
            rig.puppets.events()
        );
        assert!(
            rig.puppets.events().iter().any(|line| line == "puppet[4].anim 103"),
            "the opponent's bump-forward animation is missing"
        );
        assert!(
            rig.sound.events().iter().any(|line| line.starts_with("sound.start 86")),
            "the rattle cue never started"
        );
    }

    #[test]
    fn running_off_the_track_flips_the_oscillation_and_costs_damage() {
        let (mut actor, mut opponent) = far_apart();
        opponent.x = 60;
        actor.x = TRACK_MAX_X - 1;
        actor.speed = SPEED_LIMIT;
        let mut rig = RecordingRig::new();
        let mut rng = SessionRng::from_seed(1);
        run_tick(&mut actor, &mut opponent, StepButtons::default(), 320, &mut rig, &mut rng);
        assert_eq!(actor.x, TRACK_MAX_X);
        assert_eq!(actor.damage, 1);
        assert_eq!(actor.x1, 2);
        assert_eq!(actor.y1, 1);
        assert_eq!(actor.slots.body.tilt_offset, 2);
        assert!(
            rig.sound.events().iter().any(|line| line.starts_with("sound.start 84")),
            "the skid cue never started"
        );
        run_tick(&mut actor, &mut opponent, StepButtons::default(), 320, &mut rig, &mut rng);
        assert_eq!(actor.x1, -2);
        assert_eq!(actor.y1, -1);
        assert_eq!(actor.damage, 2);
    }

    #[test]
    fn riding_direction_follows_tilt_and_oscillation() {
        let (mut actor, mut opponent) = far_apart();
        let mut rig = RecordingRig::new();
        let mut rng = SessionRng::from_seed(1);
        run_tick(&mut actor, &mut opponent, StepButtons::default(), 320, &mut rig, &mut rng);
        assert!(
            rig.puppets.events().iter().any(|line| line == "puppet[0].direction 7"),
            "the lean never reached the puppeteer: {:?}",
            rig.puppets.events()
        );
    }

    #[test]
    fn armed_attack_enters_the_weapon_chain() {
        let (mut actor, mut opponent) = far_apart();
        let mut rig = RecordingRig::new();
        let mut rng = SessionRng::from_seed(1);
        let buttons = StepButtons { attack: true, ..StepButtons::default() };
        run_tick(&mut actor, &mut opponent, buttons, 0, &mut rig, &mut rng);
        assert_eq!(actor.slots.pose.state, PoseState::AttackWindup);
        assert_eq!(actor.slots.weapon.state, WeaponState::SwingWindup);
    }

    #[test]
    fn unarmed_attack_kicks_instead() {
        let (mut actor, mut opponent) = far_apart();
        actor.weapon = None;
        let mut rig = RecordingRig::new();
        let mut rng = SessionRng::from_seed(1);
        let buttons = StepButtons { attack: true, ..StepButtons::default() };
        run_tick(&mut actor, &mut opponent, buttons, 0, &mut rig, &mut rng);
        assert_eq!(actor.slots.pose.state, PoseState::KickWindup);
        assert!(actor.kicking);
    }

    #[test]
    fn the_duck_button_tucks_the_rider() {
        let (mut actor, mut opponent) = far_apart();
        let mut rig = RecordingRig::new();
        let mut rng = SessionRng::from_seed(1);
        let buttons = StepButtons { duck: true, ..StepButtons::default() };
        run_tick(&mut actor, &mut opponent, buttons, 0, &mut rig, &mut rng);
        assert_eq!(actor.slots.pose.state, PoseState::Duck);
        assert!(!crate::states::is_vulnerable(actor.slots.pose.state));
        // Held past the chain, the duck re-enters instead of stacking.
        for _ in 0..12 {
            run_tick(&mut actor, &mut opponent, buttons, 0, &mut rig, &mut rng);
        }
        assert_eq!(actor.slots.pose.state, PoseState::Duck);
    }

    #[test]
    fn attack_requests_are_refused_mid_chain() {
        let (mut actor, mut opponent) = far_apart();
        let mut rig = RecordingRig::new();
        let mut rng = SessionRng::from_seed(1);
        let buttons = StepButtons { attack: true, ..StepButtons::default() };
        run_tick(&mut actor, &mut opponent, buttons, 0, &mut rig, &mut rng);
        let windup_frames = actor.slots.pose.frames;
        run_tick(&mut actor, &mut opponent, buttons, 0, &mut rig, &mut rng);
        assert_eq!(actor.slots.pose.state, PoseState::AttackWindup);
        assert!(actor.slots.pose.frames > windup_frames, "chain restarted");
    }

    #[test]
    fn kick_chain_lands_its_hit_at_the_fixed_offset() {
        let mut actor = Actor::player();
        let mut opponent = Actor::player();
        actor.weapon = None;
        actor.x = 100;
        opponent.x = 100 + MIN_SEPARATION + 4;
        let mut rig = RecordingRig::new();
        let mut rng = SessionRng::from_seed(1);
        let attack = StepButtons { attack: true, ..StepButtons::default() };

        run_tick(&mut actor, &mut opponent, attack, 0, &mut rig, &mut rng);
        let mut total_hits = 0;
        for _ in 0..20 {
            let outcome =
                run_tick(&mut actor, &mut opponent, StepButtons::default(), 0, &mut rig, &mut rng);
            total_hits += outcome.hits.len();
        }
        assert_eq!(total_hits, 1, "the kick strike should resolve exactly once");
        assert!(!actor.kicking, "kick flag should clear on recovery");
        assert_eq!(actor.slots.pose.state, PoseState::Idle);
    }

    #[test]
    fn weapon_switch_cycles_once_and_returns_to_held() {
        let (mut actor, mut opponent) = far_apart();
        actor.inventory.grant(Weapon::Boot);
        actor.slots.weapon.enter(WeaponState::Held);
        let mut rig = RecordingRig::new();
        let mut rng = SessionRng::from_seed(1);
        let switch = StepButtons { switch_weapon: true, ..StepButtons::default() };

        run_tick(&mut actor, &mut opponent, switch, 0, &mut rig, &mut rng);
        assert_eq!(actor.slots.weapon.state, WeaponState::SwitchOut);

        let mut cycles = 0;
        for _ in 0..30 {
            let outcome =
                run_tick(&mut actor, &mut opponent, StepButtons::default(), 0, &mut rig, &mut rng);
            if outcome.weapon_cycled {
                cycles += 1;
            }
        }
        assert_eq!(cycles, 1);
        assert_eq!(actor.weapon, Some(Weapon::Boot));
        assert_eq!(actor.slots.weapon.state, WeaponState::Held);
    }

    #[test]
    fn weapon_animations_come_from_the_class_bank() {
        let (mut actor, mut opponent) = far_apart();
        actor.weapon = Some(Weapon::Chain);
        let mut rig = RecordingRig::new();
        let mut rng = SessionRng::from_seed(1);
        let attack = StepButtons { attack: true, ..StepButtons::default() };
        run_tick(&mut actor, &mut opponent, attack, 0, &mut rig, &mut rng);
        // SwingWindup animates 63; the chain's flex bank offsets by 100.
        assert!(
            rig.puppets.events().iter().any(|line| line == "puppet[2].anim 163"),
            "weapon animation ignored the class bank: {:?}",
            rig.puppets.events()
        );
    }

    #[test]
    fn switch_requests_are_ignored_while_already_switching() {
        let (mut actor, mut opponent) = far_apart();
        actor.inventory.grant(Weapon::Boot);
        actor.inventory.grant(Weapon::Chain);
        let mut rig = RecordingRig::new();
        let mut rng = SessionRng::from_seed(1);
        let switch = StepButtons { switch_weapon: true, ..StepButtons::default() };

        let mut cycles = 0;
        for _ in 0..40 {
            let outcome = run_tick(&mut actor, &mut opponent, switch, 0, &mut rig, &mut rng);
            if outcome.weapon_cycled {
                cycles += 1;
            }
        }
        // Holding the button can start a new switch only after the
        // pose chain reopens, never stack a second cycle mid-switch.
        assert!(cycles >= 1);
        assert!(actor.inventory.owns(actor.weapon.expect("armed")));
    }

    #[test]
    fn defunct_actor_does_not_move_or_act() {
        let (mut actor, mut opponent) = far_apart();
        actor.defunct = true;
        actor.speed = 5;
        let before = actor.x;
        let mut rig = RecordingRig::new();
        let mut rng = SessionRng::from_seed(1);
        let outcome = run_tick(
            &mut actor,
            &mut opponent,
            StepButtons { attack: true, switch_weapon: true, duck: false },
            320,
            &mut rig,
            &mut rng,
        );
        assert_eq!(actor.x, before);
        assert_eq!(outcome, super::StepOutcome::default());
    }
}
