//! First Rottwheelers grunt: the baseline fighter every other engine
//! is a variation on. Closes, swings when in reach, backs off under
//! pressure.

use crate::actor::Actor;
use crate::rng::SessionRng;

use super::common::{
    edge_clamp, refresh_aggression, refresh_attack_intent, refresh_steering, roll_vignette,
    FightSense,
};
use super::{Decision, DecisionCode};

const AGGRO_GAP: i32 = 30;
const ATTACK_MARGIN: i32 = 15;
const VIGNETTE_ODDS: i32 = 24;

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

#[cfg(test)]
mod tests {
    use super::{decide, Scratch};
    use crate::actor::Actor;
    use crate::enemy::{default_definitions, ArchetypeId};
    use crate::rng::SessionRng;

    #[test]
    fn closes_the_gap_when_out_of_reach() {
        let definitions = default_definitions();
        let mut enemy = Actor::enemy(&definitions[ArchetypeId::Rott1 as usize], 5);
        let mut player = Actor::player();
        player.x = 60;
        enemy.x = 300;
        let mut scratch = Scratch::default();
        let mut rng = SessionRng::from_seed(7);
        let decision = decide(&mut scratch, &enemy, &player, &mut rng);
        assert!(decision.steer < 0, "should steer toward the player at x=60");
    }

    #[test]
    fn swings_once_inside_reach() {
        let definitions = default_definitions();
        let mut enemy = Actor::enemy(&definitions[ArchetypeId::Rott1 as usize], 5);
        let player = Actor::player();
        enemy.x = player.x + 80;
        let mut scratch = Scratch::default();
        let mut rng = SessionRng::from_seed(7);
        let attacked = (0..40).any(|_| decide(&mut scratch, &enemy, &player, &mut rng).attack);
        assert!(attacked, "never swung from well inside chain reach");
    }

    #[test]
    fn holds_the_swing_while_the_opponent_kicks() {
        let definitions = default_definitions();
        let mut enemy = Actor::enemy(&definitions[ArchetypeId::Rott1 as usize], 5);
        let mut player = Actor::player();
        player.kicking = true;
        enemy.x = player.x + 80;
        let mut scratch = Scratch::default();
        let mut rng = SessionRng::from_seed(7);
        for _ in 0..40 {
            assert!(!decide(&mut scratch, &enemy, &player, &mut rng).attack);
        }
    }
}
