//! Second Vultures heavy: the gatekeeper before the boss. Patient to
//! a fault, with doubled cadences and a razor-thin strike margin, he
//! only commits when the hit is nearly guaranteed.

use crate::actor::Actor;
use crate::rng::SessionRng;

use super::common::{away, edge_clamp, roll_vignette, toward, FightSense};
use super::{Decision, DecisionCode};

const AGGRO_GAP: i32 = 30;
const ATTACK_MARGIN: i32 = 5;
const VIGNETTE_ODDS: i32 = 34;

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
    let sense = &mut scratch.sense;
    // Double-period cadences: twice the usual spreads.
    if sense.aggro.due(rng, 4 * actor.probability - 1, 1) {
        let gap_open = opponent.damage - actor.damage >= AGGRO_GAP;
        sense.aggressive = gap_open && rng.chance(actor.probability);
    }
    if sense.steer.due(rng, 2 * (actor.probability - 1), 1) {
        sense.steer_value = if !actor.in_weapon_range(opponent, 0) {
            toward(actor, opponent)
        } else if opponent.in_weapon_range(actor, 0) && !sense.aggressive {
            away(actor, opponent)
        } else {
            0
        };
    }
    if sense.strike.due(rng, 2 * (actor.probability - 1), 2) {
        sense.attack_intent = actor.in_weapon_range(opponent, ATTACK_MARGIN) && !opponent.kicking;
    }
    let vignette = roll_vignette(sense, rng, VIGNETTE_ODDS, 4);

    Decision {
        attack: sense.attack_intent,
        switch_weapon: false,
        steer: edge_clamp(actor, sense.steer_value),
        vignette,
        code: DecisionCode::Normal,
    }
}
