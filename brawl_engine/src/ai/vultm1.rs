//! First Vultures heavy: the chainsaw bruiser. Always advances, angers
//! early, and swings through kicks without flinching.

use crate::actor::Actor;
use crate::rng::SessionRng;

use super::common::{
    edge_clamp, refresh_aggression, refresh_attack_intent, roll_vignette, toward, FightSense,
};
use super::{Decision, DecisionCode};

const AGGRO_GAP: i32 = 20;
const ATTACK_MARGIN: i32 = 25;
const VIGNETTE_ODDS: i32 = 30;

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
    // No retreat logic at all: press forward until the saw connects.
    if scratch.sense.steer.due(rng, actor.probability - 1, 1) {
        scratch.sense.steer_value = if actor.in_weapon_range(opponent, 0) {
            0
        } else {
            toward(actor, opponent)
        };
    }
    refresh_attack_intent(&mut scratch.sense, actor, opponent, rng, ATTACK_MARGIN, false);
    let vignette = roll_vignette(&mut scratch.sense, rng, VIGNETTE_ODDS, 4);

    Decision {
        attack: scratch.sense.attack_intent,
        switch_weapon: false,
        steer: edge_clamp(actor, scratch.sense.steer_value),
        vignette,
        code: DecisionCode::Normal,
    }
}

#[cfg(test)]
mod tests {
    use super::{decide, Scratch};
    use crate::actor::Actor;
    use crate::enemy::{default_definitions, ArchetypeId};
    use crate::rng::SessionRng;

    #[test]
    fn swings_straight_through_a_kick() {
        let definitions = default_definitions();
        let mut enemy = Actor::enemy(&definitions[ArchetypeId::VultM1 as usize], 5);
        let mut player = Actor::player();
        player.kicking = true;
        enemy.x = player.x + 80;
        let mut scratch = Scratch::default();
        let mut rng = SessionRng::from_seed(29);
        let swung = (0..40).any(|_| decide(&mut scratch, &enemy, &player, &mut rng).attack);
        assert!(swung, "a kick should not wave this one off");
    }

    #[test]
    fn never_steers_away() {
        let definitions = default_definitions();
        let mut enemy = Actor::enemy(&definitions[ArchetypeId::VultM1 as usize], 5);
        let player = Actor::player();
        enemy.x = player.x + 60;
        let mut scratch = Scratch::default();
        let mut rng = SessionRng::from_seed(29);
        for _ in 0..100 {
            assert!(decide(&mut scratch, &enemy, &player, &mut rng).steer <= 0);
        }
    }
}
