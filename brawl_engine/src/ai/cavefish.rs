//! The Cavefish rider: never brawls. Hangs far off the player's
//! flank and throws dust from outside everyone else's reach, opening
//! distance the moment the gap closes.

use crate::actor::Actor;
use crate::rng::SessionRng;

use super::common::{away, edge_clamp, refresh_attack_intent, roll_vignette, toward, FightSense};
use super::{Decision, DecisionCode};

/// Gap below which the rider bolts.
const STANDOFF: i32 = 140;
/// Gap above which closing back in is worth the risk.
const DRIFT_LIMIT: i32 = 240;
const ATTACK_MARGIN: i32 = 40;
const VIGNETTE_ODDS: i32 = 20;

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
    // Distance-band steering instead of the usual range occupancy:
    // bolt below the standoff gap, drift back in past the limit.
    if sense.steer.due(rng, actor.probability - 1, 1) {
        let gap = actor.distance_to(opponent);
        sense.steer_value = if gap < STANDOFF {
            away(actor, opponent)
        } else if gap > DRIFT_LIMIT {
            toward(actor, opponent)
        } else {
            0
        };
    }
    // Dust carries well past the standoff gap; kicks can't reach out
    // here, so nothing waves the throw off. Never turns aggressive.
    refresh_attack_intent(sense, actor, opponent, rng, ATTACK_MARGIN, false);
    let vignette = roll_vignette(sense, rng, VIGNETTE_ODDS, 4);

    Decision {
        attack: sense.attack_intent,
        switch_weapon: false,
        steer: edge_clamp(actor, sense.steer_value),
        vignette,
        code: DecisionCode::Normal,
    }
}
