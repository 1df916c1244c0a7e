//! Second Rottwheelers grunt: a brawler who never gives ground and
//! throws speculative swings from just outside reach.

use crate::actor::Actor;
use crate::rng::SessionRng;

use super::common::{
    edge_clamp, refresh_aggression, refresh_attack_intent, refresh_steering, roll_vignette,
    FightSense,
};
use super::{Decision, DecisionCode};

const AGGRO_GAP: i32 = 30;
const ATTACK_MARGIN: i32 = 15;
const FEINT_MARGIN: i32 = 45;
const FEINT_ODDS: i32 = 12;
const VIGNETTE_ODDS: i32 = 28;

#[derive(Debug, Clone, Default)]
pub struct Scratch {
    pub sense: FightSense,
}

pub fn decide(
    scratch: &mut Scratch,
    actor: &Actor,
    opponent: &Actor,
    rng: &mut SessionRng,
) -> Decision {
    refresh_aggression(&mut scratch.sense, actor, opponent, rng, AGGRO_GAP);
    // Never retreats: standing in the opponent's reach is where this
    // one wants to be.
    refresh_steering(&mut scratch.sense, actor, opponent, rng, false);
    refresh_attack_intent(&mut scratch.sense, actor, opponent, rng, ATTACK_MARGIN, true);
    let vignette = roll_vignette(&mut scratch.sense, rng, VIGNETTE_ODDS, 4);

    // Feinted swing: a whiff thrown from just outside reach to bait a
    // dodge.
    let feinting = !actor.in_weapon_range(opponent, ATTACK_MARGIN)
        && actor.in_weapon_range(opponent, FEINT_MARGIN)
        && rng.chance(FEINT_ODDS);

    Decision {
        attack: scratch.sense.attack_intent || feinting,
        switch_weapon: false,
        steer: edge_clamp(actor, scratch.sense.steer_value),
        vignette,
        code: DecisionCode::Normal,
    }
}
