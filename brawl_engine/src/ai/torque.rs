//! Father Torque. The boss fights like a first grunt who has seen
//! every trick: angers at the smallest gap, swings on a wide margin,
//! and cycles to a fresh weapon mid-fight when he has one spare.

use crate::actor::Actor;
use crate::rng::SessionRng;

use super::common::{
    edge_clamp, refresh_aggression, refresh_attack_intent, refresh_steering, roll_vignette,
    FightSense,
};
use super::{Decision, DecisionCode};

const AGGRO_GAP: i32 = 10;
const ATTACK_MARGIN: i32 = 30;
const SWITCH_ODDS: i32 = 40;
const VIGNETTE_ODDS: i32 = 18;

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

    // Mid-fight weapon cycling, only while pressing and only with a
    // spare beyond the bare hand and the weapon he rode in with.
    let switch_weapon = scratch.sense.aggressive
        && actor.inventory.owned_count() > 2
        && rng.chance(SWITCH_ODDS);

    Decision {
        attack: scratch.sense.attack_intent,
        switch_weapon,
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
    use crate::weapons::{Weapon, WeaponInventory};

    fn boss_pair() -> (Actor, Actor) {
        let definitions = default_definitions();
        let mut enemy = Actor::enemy(&definitions[ArchetypeId::Torque as usize], 5);
        let player = Actor::player();
        enemy.x = player.x + 80;
        (enemy, player)
    }

    #[test]
    fn a_small_gap_is_enough_to_anger_him() {
        let (enemy, mut player) = boss_pair();
        player.damage = 12;
        let mut scratch = Scratch::default();
        let mut rng = SessionRng::from_seed(43);
        let mut angered = false;
        for _ in 0..200 {
            decide(&mut scratch, &enemy, &player, &mut rng);
            angered |= scratch.sense.aggressive;
        }
        assert!(angered, "a 12-point gap never angered the boss");
    }

    #[test]
    fn never_cycles_without_a_spare_weapon() {
        let (enemy, mut player) = boss_pair();
        player.damage = 50;
        // Hand plus the chainsaw he rode in with: nothing spare.
        assert_eq!(enemy.inventory.owned_count(), 2);
        let mut scratch = Scratch::default();
        let mut rng = SessionRng::from_seed(43);
        for _ in 0..300 {
            assert!(!decide(&mut scratch, &enemy, &player, &mut rng).switch_weapon);
        }
    }

    #[test]
    fn cycles_mid_fight_with_a_spare() {
        let (mut enemy, mut player) = boss_pair();
        player.damage = 50;
        enemy.inventory = WeaponInventory::with_owned(&[Weapon::Chainsaw, Weapon::Chain]);
        let mut scratch = Scratch::default();
        let mut rng = SessionRng::from_seed(43);
        let cycled = (0..2000).any(|_| decide(&mut scratch, &enemy, &player, &mut rng).switch_weapon);
        assert!(cycled, "never cycled weapons while pressing");
    }
}
