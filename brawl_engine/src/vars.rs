//! Reserved indices in the host's flat integer store.
//!
//! The layout is shared with the save system and must stay bit-for-bit
//! stable: moving an index silently corrupts every existing save.

use crate::enemy::{EnemyArchetypeDefinition, ALL_ARCHETYPES};
use crate::host::VariableStore;
use crate::weapons::{WeaponInventory, WEAPON_KINDS};

/// One slot per weapon kind: non-zero means owned.
pub const INVENTORY_BASE: usize = 50;
/// One slot per archetype: remaining appearances.
pub const OCCURRENCE_BASE: usize = 58;
/// One slot per archetype: non-zero once emptied.
pub const EMPTIED_BASE: usize = 67;
/// Player's last road position bookmark.
pub const ROAD_BOOKMARK: usize = 76;
/// Legacy id of the scene the session last ran.
pub const LAST_SCENE: usize = 77;
/// Player damage bookmark carried between sessions.
pub const PLAYER_DAMAGE: usize = 78;

/// Session state worth persisting, gathered at session end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedState {
    pub inventory: WeaponInventory,
    pub occurrences: [i32; 9],
    pub emptied: [bool; 9],
    pub road_bookmark: i32,
    pub last_scene: i32,
    pub player_damage: i32,
}

/// Write the session's persistent slice into the store.
pub fn persist(store: &mut dyn VariableStore, state: &PersistedState) {
    for weapon in WEAPON_KINDS {
        let owned = state.inventory.owns(weapon);
        store.write_slot(INVENTORY_BASE + weapon as usize, i32::from(owned));
    }
    for id in ALL_ARCHETYPES {
        store.write_slot(OCCURRENCE_BASE + id as usize, state.occurrences[id as usize]);
        store.write_slot(
            EMPTIED_BASE + id as usize,
            i32::from(state.emptied[id as usize]),
        );
    }
    store.write_slot(ROAD_BOOKMARK, state.road_bookmark);
    store.write_slot(LAST_SCENE, state.last_scene);
    store.write_slot(PLAYER_DAMAGE, state.player_damage);
}

/// Read the persistent slice back. Absent data (all zeros) yields the
/// defaults a fresh playthrough starts from.
pub fn restore(store: &dyn VariableStore) -> PersistedState {
    let mut inventory = WeaponInventory::new();
    for weapon in WEAPON_KINDS {
        if store.read_slot(INVENTORY_BASE + weapon as usize) != 0 {
            inventory.grant(weapon);
        }
    }
    let mut occurrences = [0i32; 9];
    let mut emptied = [false; 9];
    for id in ALL_ARCHETYPES {
        occurrences[id as usize] = store.read_slot(OCCURRENCE_BASE + id as usize);
        emptied[id as usize] = store.read_slot(EMPTIED_BASE + id as usize) != 0;
    }
    PersistedState {
        inventory,
        occurrences,
        emptied,
        road_bookmark: store.read_slot(ROAD_BOOKMARK),
        last_scene: store.read_slot(LAST_SCENE),
        player_damage: store.read_slot(PLAYER_DAMAGE),
    }
}

/// Overlay persisted counters onto a fresh archetype table. A stored
/// zero next to a clear emptied flag means "never persisted"; the
/// definition default stands in that case.
pub fn apply_to_definitions(state: &PersistedState, definitions: &mut [EnemyArchetypeDefinition]) {
    for definition in definitions.iter_mut() {
        let index = definition.id as usize;
        if state.emptied[index] {
            definition.emptied = true;
            definition.occurrences = 0;
        } else if state.occurrences[index] > 0 {
            definition.occurrences = state.occurrences[index];
        }
    }
}

/// Gather the persistable slice from live session tables.
pub fn gather(
    inventory: WeaponInventory,
    definitions: &[EnemyArchetypeDefinition],
    road_bookmark: i32,
    last_scene: i32,
    player_damage: i32,
) -> PersistedState {
    let mut occurrences = [0i32; 9];
    let mut emptied = [false; 9];
    for definition in definitions {
        occurrences[definition.id as usize] = definition.occurrences;
        emptied[definition.id as usize] = definition.emptied;
    }
    PersistedState {
        inventory,
        occurrences,
        emptied,
        road_bookmark,
        last_scene,
        player_damage,
    }
}

/// Every index this module may touch, for range assertions in hosts.
pub fn reserved_range() -> std::ops::Range<usize> {
    INVENTORY_BASE..PLAYER_DAMAGE + 1
}
