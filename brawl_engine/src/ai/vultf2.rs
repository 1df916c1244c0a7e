//! Second Vultures outrider: fights in bursts. Between bursts she
//! coasts in a lull, holding her line and throwing nothing.

use crate::actor::Actor;
use crate::rng::SessionRng;

use super::common::{
    edge_clamp, refresh_aggression, refresh_attack_intent, refresh_steering, roll_vignette,
    Cadence, FightSense,
};
use super::{Decision, DecisionCode};

const AGGRO_GAP: i32 = 30;
const ATTACK_MARGIN: i32 = 15;
const LULL_SPREAD: i32 = 90;
const LULL_LENGTH: i32 = 24;
const VIGNETTE_ODDS: i32 = 22;

#[derive(Debug, Clone, Default)]
pub struct Scratch {
    pub sense: FightSense,
    lull_timer: Cadence,
    lull_left: i32,
    primed: bool,
}

pub fn decide(
    scratch: &mut Scratch,
    actor: &Actor,
    opponent: &Actor,
    rng: &mut SessionRng,
) -> Decision {
    // The timer fires on its very first tick; swallow that one so the
    // fight opens hot instead of in a lull.
    if scratch.lull_timer.due(rng, LULL_SPREAD, 1) {
        if scratch.primed && scratch.lull_left == 0 {
            scratch.lull_left = LULL_LENGTH + 1;
        }
        scratch.primed = true;
    }
    if scratch.lull_left > 0 {
        scratch.lull_left -= 1;
        if scratch.lull_left > 0 {
            return Decision {
                steer: edge_clamp(actor, 0),
                ..Decision::idle()
            };
        }
    }

    refresh_aggression(&mut scratch.sense, actor, opponent, rng, AGGRO_GAP);
    refresh_steering(&mut scratch.sense, actor, opponent, rng, true);
    refresh_attack_intent(&mut scratch.sense, actor, opponent, rng, ATTACK_MARGIN, true);
    let vignette = roll_vignette(&mut scratch.sense, rng, VIGNETTE_ODDS, 4);

    Decision {
        attack: scratch.sense.attack_intent,
        switch_weapon: false,
        steer: edge_clamp(actor, scratch.sense.steer_value),
        vignette,
        code: DecisionCode::Normal,
    }
}
