//! First Vultures outrider: jittery. Recomputes everything at twice
//! the usual rate, so she reacts fast but telegraphs little.

use crate::actor::Actor;
use crate::rng::SessionRng;

use super::common::{away, edge_clamp, roll_vignette, toward, FightSense};
use super::{Decision, DecisionCode};

const AGGRO_GAP: i32 = 30;
const ATTACK_MARGIN: i32 = 20;
const VIGNETTE_ODDS: i32 = 22;

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
    // Half-period cadences: the usual spreads, each divided by two.
    if sense.aggro.due(rng, actor.probability - 1, 1) {
        let gap_open = opponent.damage - actor.damage >= AGGRO_GAP;
        sense.aggressive = gap_open && rng.chance(actor.probability);
    }
    if sense.steer.due(rng, actor.probability - 1, 2) {
        sense.steer_value = if !actor.in_weapon_range(opponent, 0) {
            toward(actor, opponent)
        } else if opponent.in_weapon_range(actor, 0) && !sense.aggressive {
            away(actor, opponent)
        } else {
            0
        };
    }
    if sense.strike.due(rng, actor.probability - 1, 4) {
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

#[cfg(test)]
mod tests {
    use super::{decide, Scratch};
    use crate::actor::Actor;
    use crate::enemy::{default_definitions, ArchetypeId};
    use crate::rng::SessionRng;

    #[test]
    fn reacts_within_a_few_ticks_of_entering_reach() {
        let definitions = default_definitions();
        let mut enemy = Actor::enemy(&definitions[ArchetypeId::VultF1 as usize], 5);
        let player = Actor::player();
        enemy.x = player.x + 80;
        let mut scratch = Scratch::default();
        let mut rng = SessionRng::from_seed(23);
        let first_swing = (0..30).position(|_| decide(&mut scratch, &enemy, &player, &mut rng).attack);
        assert!(
            first_swing.is_some_and(|tick| tick < 8),
            "half-period cadence should commit to a swing quickly: {first_swing:?}"
        );
    }

    #[test]
    fn backs_off_when_standing_in_the_opponents_reach() {
        let definitions = default_definitions();
        let mut enemy = Actor::enemy(&definitions[ArchetypeId::VultF1 as usize], 5);
        let mut player = Actor::player();
        // Both actors inside each other's reach, no damage advantage.
        player.x = 90;
        enemy.x = 160;
        let mut scratch = Scratch::default();
        let mut rng = SessionRng::from_seed(23);
        let mut saw_retreat = false;
        for _ in 0..40 {
            let decision = decide(&mut scratch, &enemy, &player, &mut rng);
            if decision.steer > 0 {
                saw_retreat = true;
            }
        }
        assert!(saw_retreat, "never opened distance from inside the player's reach");
    }
}
