use serde::Serialize;

use crate::rng::SessionRng;
use crate::weapons::Weapon;

/// The nine opponent archetypes, each backed by its own decision
/// engine in [`crate::ai`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum ArchetypeId {
    Rott1 = 0,
    Rott2 = 1,
    Rott3 = 2,
    VultF1 = 3,
    VultM1 = 4,
    VultF2 = 5,
    VultM2 = 6,
    Cavefish = 7,
    Torque = 8,
}

pub const ALL_ARCHETYPES: [ArchetypeId; 9] = [
    ArchetypeId::Rott1,
    ArchetypeId::Rott2,
    ArchetypeId::Rott3,
    ArchetypeId::VultF1,
    ArchetypeId::VultM1,
    ArchetypeId::VultF2,
    ArchetypeId::VultM2,
    ArchetypeId::Cavefish,
    ArchetypeId::Torque,
];

/// The boss bypass: once this archetype's prerequisite countdown hits
/// zero the selector stops rolling and forces the boss.
pub const BOSS: ArchetypeId = ArchetypeId::Torque;
pub const BOSS_PREREQUISITE: ArchetypeId = ArchetypeId::VultM2;

/// Static parameters for one archetype. One table entry per archetype
/// is built at session start; the mutable fields (occurrences,
/// emptied) persist to the variable store at session end.
#[derive(Debug, Clone, Serialize)]
pub struct EnemyArchetypeDefinition {
    pub id: ArchetypeId,
    /// Countdown of remaining appearances; reaching zero marks the
    /// archetype emptied for the rest of the playthrough.
    pub occurrences: i32,
    pub emptied: bool,
    pub max_damage: i32,
    pub weapon: Weapon,
    pub sound_id: i32,
    pub video_filename: &'static str,
    pub rider_costume: i32,
    pub bike_costume: i32,
    pub max_frame: i32,
    pub approach_animation: i32,
}

/// Fresh archetype table for a new playthrough.
pub fn default_definitions() -> Vec<EnemyArchetypeDefinition> {
    use ArchetypeId::*;
    vec![
        definition(Rott1, 3, 60, Weapon::Chain, 210, "en_rott1.snm", 320, 360, 120, 12),
        definition(Rott2, 3, 70, Weapon::Wrench, 211, "en_rott2.snm", 321, 361, 122, 12),
        definition(Rott3, 2, 80, Weapon::Board, 212, "en_rott3.snm", 322, 362, 124, 12),
        definition(VultF1, 2, 60, Weapon::Mace, 213, "en_vltf1.snm", 323, 363, 120, 14),
        definition(VultM1, 3, 70, Weapon::Chainsaw, 214, "en_vltm1.snm", 324, 364, 126, 14),
        definition(VultF2, 2, 80, Weapon::Chain, 215, "en_vltf2.snm", 325, 365, 120, 14),
        definition(VultM2, 2, 90, Weapon::Mace, 216, "en_vltm2.snm", 326, 366, 128, 14),
        definition(Cavefish, 2, 50, Weapon::Dust, 217, "en_cave.snm", 327, 367, 118, 16),
        definition(Torque, 1, 120, Weapon::Chainsaw, 218, "en_torq.snm", 328, 368, 140, 18),
    ]
}

fn definition(
    id: ArchetypeId,
    occurrences: i32,
    max_damage: i32,
    weapon: Weapon,
    sound_id: i32,
    video_filename: &'static str,
    rider_costume: i32,
    bike_costume: i32,
    max_frame: i32,
    approach_animation: i32,
) -> EnemyArchetypeDefinition {
    EnemyArchetypeDefinition {
        id,
        occurrences,
        emptied: false,
        max_damage,
        weapon,
        sound_id,
        video_filename,
        rider_costume,
        bike_costume,
        max_frame,
        approach_animation,
    }
}

/// Bounded record of recently chosen archetypes, consulted only by
/// the selector's exclusion logic.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetEnemiesWindow {
    recent: Vec<ArchetypeId>,
}

impl MetEnemiesWindow {
    pub const CAPACITY: usize = 12;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, id: ArchetypeId) {
        if self.recent.len() == Self::CAPACITY {
            self.recent.remove(0);
        }
        self.recent.push(id);
    }

    /// Whether `id` sits inside the most recent `window` entries.
    pub fn excludes(&self, id: ArchetypeId, window: usize) -> bool {
        let start = self.recent.len().saturating_sub(window);
        self.recent[start..].contains(&id)
    }

    pub fn clear(&mut self) {
        self.recent.clear();
    }

    pub fn len(&self) -> usize {
        self.recent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }
}

/// Weighted-by-retry random archetype choice with recency exclusion.
pub struct EnemySelector;

impl EnemySelector {
    /// Pick the next opponent.
    ///
    /// Emptied archetypes never come back. The exclusion window spans
    /// the `max(0, non_empty - 4)` most recent picks; a draw landing
    /// inside it is retried, and if every remaining archetype is
    /// excluded the window is cleared and the draw restarts, so the
    /// call always terminates while at least one archetype remains.
    pub fn choose(
        definitions: &[EnemyArchetypeDefinition],
        window: &mut MetEnemiesWindow,
        rng: &mut SessionRng,
    ) -> Option<ArchetypeId> {
        if let Some(boss) = Self::forced_boss(definitions) {
            window.record(boss);
            return Some(boss);
        }

        let candidates: Vec<ArchetypeId> = definitions
            .iter()
            .filter(|def| !def.emptied && def.id != BOSS)
            .map(|def| def.id)
            .collect();
        if candidates.is_empty() {
            return None;
        }

        let exclusion = candidates.len().saturating_sub(4);
        loop {
            let mut all_excluded = true;
            for _ in 0..candidates.len() * 4 {
                let pick = *rng.pick(&candidates);
                if !window.excludes(pick, exclusion) {
                    window.record(pick);
                    return Some(pick);
                }
            }
            for candidate in &candidates {
                if !window.excludes(*candidate, exclusion) {
                    all_excluded = false;
                    break;
                }
            }
            if all_excluded {
                window.clear();
            }
        }
    }

    fn forced_boss(definitions: &[EnemyArchetypeDefinition]) -> Option<ArchetypeId> {
        let prerequisite_spent = definitions
            .iter()
            .find(|def| def.id == BOSS_PREREQUISITE)
            .map(|def| def.occurrences <= 0)
            .unwrap_or(false);
        let boss_available = definitions
            .iter()
            .find(|def| def.id == BOSS)
            .map(|def| !def.emptied)
            .unwrap_or(false);
        (prerequisite_spent && boss_available).then_some(BOSS)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        default_definitions, ArchetypeId, EnemySelector, MetEnemiesWindow, BOSS,
        BOSS_PREREQUISITE,
    };
    use crate::rng::SessionRng;

    #[test]
    fn window_caps_at_twelve_entries() {
        let mut window = MetEnemiesWindow::new();
        for _ in 0..20 {
            window.record(ArchetypeId::Rott1);
        }
        assert_eq!(window.len(), MetEnemiesWindow::CAPACITY);
    }

    #[test]
    fn choose_never_repeats_inside_the_exclusion_window() {
        let definitions = default_definitions();
        let mut window = MetEnemiesWindow::new();
        let mut rng = SessionRng::from_seed(11);
        let non_empty = definitions.iter().filter(|d| !d.emptied && d.id != BOSS).count();
        let exclusion = non_empty - 4;

        let mut history: Vec<ArchetypeId> = Vec::new();
        for _ in 0..64 {
            let pick = EnemySelector::choose(&definitions, &mut window, &mut rng)
                .expect("archetypes remain");
            let recent = history.len().saturating_sub(exclusion);
            assert!(
                !history[recent..].contains(&pick),
                "{pick:?} repeated within the exclusion window"
            );
            history.push(pick);
        }
    }

    #[test]
    fn choose_terminates_when_everything_is_excluded() {
        let mut definitions = default_definitions();
        // Leave exactly one candidate so the window can only ever
        // contain it.
        for def in definitions.iter_mut() {
            def.emptied = def.id != ArchetypeId::Rott1;
        }
        let mut window = MetEnemiesWindow::new();
        window.record(ArchetypeId::Rott1);
        let mut rng = SessionRng::from_seed(5);
        let pick = EnemySelector::choose(&definitions, &mut window, &mut rng);
        assert_eq!(pick, Some(ArchetypeId::Rott1));
    }

    #[test]
    fn choose_returns_none_once_the_roster_is_spent() {
        let mut definitions = default_definitions();
        for def in definitions.iter_mut() {
            def.emptied = true;
        }
        let mut window = MetEnemiesWindow::new();
        let mut rng = SessionRng::from_seed(5);
        assert_eq!(EnemySelector::choose(&definitions, &mut window, &mut rng), None);
    }

    #[test]
    fn boss_is_forced_once_the_prerequisite_counter_runs_out() {
        let mut definitions = default_definitions();
        for def in definitions.iter_mut() {
            if def.id == BOSS_PREREQUISITE {
                def.occurrences = 0;
            }
        }
        let mut window = MetEnemiesWindow::new();
        let mut rng = SessionRng::from_seed(9);
        for _ in 0..8 {
            assert_eq!(
                EnemySelector::choose(&definitions, &mut window, &mut rng),
                Some(BOSS)
            );
        }
    }
}
