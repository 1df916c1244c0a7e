//! Shared skeleton for the archetype engines: cadence timers, the
//! three recomputed senses, vignette rolls, and the track-edge clamp.

use crate::actor::Actor;
use crate::rng::SessionRng;

/// Cursor-nudge magnitude the engines feed into movement.
pub const NUDGE: i32 = 101;

/// Hard steer applied when an engine drifts onto a track edge.
pub const EDGE_NUDGE: i32 = 320;

/// Track columns beyond which the edge clamp takes over.
pub const RIGHT_EDGE: i32 = 310;
pub const LEFT_EDGE: i32 = 10;

/// A recomputation timer. When it expires it rearms itself from the
/// session RNG as `rand(spread) / divisor + 1` ticks, which is the
/// legacy cadence family every engine draws from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cadence {
    remaining: i32,
}

impl Cadence {
    pub fn due(&mut self, rng: &mut SessionRng, spread: i32, divisor: i32) -> bool {
        self.remaining -= 1;
        if self.remaining > 0 {
            return false;
        }
        self.remaining = rng.roll(spread) / divisor.max(1) + 1;
        true
    }
}

/// The senses every engine keeps between recomputations, plus the
/// one-shot flags (vignettes, debug chord) that persist for the whole
/// encounter.
#[derive(Debug, Clone, Default)]
pub struct FightSense {
    pub aggro: Cadence,
    pub steer: Cadence,
    pub strike: Cadence,
    pub aggressive: bool,
    pub steer_value: i32,
    pub attack_intent: bool,
    pub vignette_fired: [bool; 4],
    pub debug_spent: bool,
}

/// Recompute aggression every `rand(2·probability − 1) + 1` ticks:
/// pressing the advantage once the damage gap opens, gated by a
/// probability-scaled roll (smaller probability decides more often).
pub fn refresh_aggression(
    sense: &mut FightSense,
    actor: &Actor,
    opponent: &Actor,
    rng: &mut SessionRng,
    threshold: i32,
) {
    if sense.aggro.due(rng, 2 * actor.probability - 1, 1) {
        let gap_open = opponent.damage - actor.damage >= threshold;
        sense.aggressive = gap_open && rng.chance(actor.probability);
    }
}

/// Recompute the cursor nudge every `rand(probability − 1) + 1`
/// ticks: close when out of reach, back off (if this engine retreats
/// at all) when standing in the opponent's reach without the upper
/// hand.
pub fn refresh_steering(
    sense: &mut FightSense,
    actor: &Actor,
    opponent: &Actor,
    rng: &mut SessionRng,
    retreats: bool,
) {
    if sense.steer.due(rng, actor.probability - 1, 1) {
        sense.steer_value = if !actor.in_weapon_range(opponent, 0) {
            toward(actor, opponent)
        } else if retreats && opponent.in_weapon_range(actor, 0) && !sense.aggressive {
            away(actor, opponent)
        } else {
            0
        };
    }
}

/// Recompute attack intent every `rand(probability − 1) / 2 + 1`
/// ticks from range-plus-margin, optionally waved off by an opponent
/// mid-kick.
pub fn refresh_attack_intent(
    sense: &mut FightSense,
    actor: &Actor,
    opponent: &Actor,
    rng: &mut SessionRng,
    margin: i32,
    wary_of_kicks: bool,
) {
    if sense.strike.due(rng, actor.probability - 1, 2) {
        let in_reach = actor.in_weapon_range(opponent, margin);
        let waved_off = wary_of_kicks && opponent.kicking;
        sense.attack_intent = in_reach && !waved_off;
    }
}

/// Small fixed chance to fire one idle vignette; each flag slot fires
/// at most once per encounter.
pub fn roll_vignette(
    sense: &mut FightSense,
    rng: &mut SessionRng,
    one_in: i32,
    slots: usize,
) -> Option<usize> {
    if !rng.chance(one_in) {
        return None;
    }
    let slot = rng.roll(slots.min(sense.vignette_fired.len()) as i32 - 1) as usize;
    if sense.vignette_fired[slot] {
        return None;
    }
    sense.vignette_fired[slot] = true;
    Some(slot)
}

/// Track-edge clamps override whatever the engine computed.
pub fn edge_clamp(actor: &Actor, steer: i32) -> i32 {
    if actor.x > RIGHT_EDGE {
        -EDGE_NUDGE
    } else if actor.x < LEFT_EDGE {
        EDGE_NUDGE
    } else {
        steer
    }
}

pub fn toward(actor: &Actor, opponent: &Actor) -> i32 {
    if opponent.x > actor.x {
        NUDGE
    } else {
        -NUDGE
    }
}

pub fn away(actor: &Actor, opponent: &Actor) -> i32 {
    -toward(actor, opponent)
}
