//! Third Rottwheelers grunt: a counterpuncher. Shadows the player and
//! only swings when pressing an advantage or paying back a fresh hit.

use crate::actor::Actor;
use crate::rng::SessionRng;

use super::common::{
    edge_clamp, refresh_aggression, refresh_attack_intent, refresh_steering, roll_vignette,
    FightSense,
};
use super::{Decision, DecisionCode};

const AGGRO_GAP: i32 = 30;
const ATTACK_MARGIN: i32 = 15;
const RETALIATE_TICKS: i32 = 36;
const VIGNETTE_ODDS: i32 = 26;

#[derive(Debug, Clone, Default)]
pub struct Scratch {
    pub sense: FightSense,
    /// Damage total seen last tick, to notice a fresh hit.
    last_damage: i32,
    /// Ticks of payback left after taking a hit.
    retaliate: i32,
}

pub fn decide(
    scratch: &mut Scratch,
    actor: &Actor,
    opponent: &Actor,
    rng: &mut SessionRng,
) -> Decision {
    if actor.damage > scratch.last_damage {
        scratch.retaliate = RETALIATE_TICKS;
    }
    scratch.last_damage = actor.damage;
    if scratch.retaliate > 0 {
        scratch.retaliate -= 1;
    }

    refresh_aggression(&mut scratch.sense, actor, opponent, rng, AGGRO_GAP);
    refresh_steering(&mut scratch.sense, actor, opponent, rng, true);
    refresh_attack_intent(&mut scratch.sense, actor, opponent, rng, ATTACK_MARGIN, true);
    let vignette = roll_vignette(&mut scratch.sense, rng, VIGNETTE_ODDS, 4);

    let provoked = scratch.sense.aggressive || scratch.retaliate > 0;

    Decision {
        attack: provoked && scratch.sense.attack_intent,
        switch_weapon: false,
        steer: edge_clamp(actor, scratch.sense.steer_value),
        vignette,
        code: DecisionCode::Normal,
    }
}
