use serde::Serialize;

/// The eight weapon kinds a combatant can carry. `Hand` is the
/// always-owned default; "no weapon at all" is modelled as
/// `Option::<Weapon>::None` on the actor, not as a ninth kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Weapon {
    Hand = 0,
    Boot = 1,
    Chain = 2,
    Board = 3,
    Wrench = 4,
    Mace = 5,
    Chainsaw = 6,
    Dust = 7,
}

/// Animation-bank grouping for the weapon slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WeaponClass {
    Brawl,
    Flex,
    Blunt,
    Edge,
}

pub const WEAPON_KINDS: [Weapon; 8] = [
    Weapon::Hand,
    Weapon::Boot,
    Weapon::Chain,
    Weapon::Board,
    Weapon::Wrench,
    Weapon::Mace,
    Weapon::Chainsaw,
    Weapon::Dust,
];

/// Fixed per-weapon damage, indexed by `Weapon as usize`.
const DAMAGE: [i32; 8] = [3, 4, 5, 4, 5, 7, 8, 0];

/// Minimum strike distance in track pixels, indexed by weapon kind.
const MIN_RANGE: [i32; 8] = [40, 38, 60, 50, 44, 55, 48, 30];

/// Maximum strike distance in track pixels, indexed by weapon kind.
const MAX_RANGE: [i32; 8] = [104, 96, 160, 130, 120, 140, 126, 110];

impl Weapon {
    pub fn damage(self) -> i32 {
        DAMAGE[self as usize]
    }

    pub fn min_range(self) -> i32 {
        MIN_RANGE[self as usize]
    }

    pub fn max_range(self) -> i32 {
        MAX_RANGE[self as usize]
    }

    pub fn class(self) -> WeaponClass {
        match self {
            Weapon::Hand | Weapon::Boot | Weapon::Dust => WeaponClass::Brawl,
            Weapon::Chain => WeaponClass::Flex,
            Weapon::Board | Weapon::Wrench | Weapon::Mace => WeaponClass::Blunt,
            Weapon::Chainsaw => WeaponClass::Edge,
        }
    }

    fn next_cyclic(self) -> Weapon {
        WEAPON_KINDS[(self as usize + 1) % WEAPON_KINDS.len()]
    }
}

/// Per-actor ownership set over the eight weapon kinds.
///
/// Stored as a bitmask so the whole set fits the single persistent
/// inventory slot per weapon the variable store reserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeaponInventory {
    owned: u8,
}

impl WeaponInventory {
    /// A fresh inventory always owns the unarmed default.
    pub fn new() -> Self {
        let mut inventory = WeaponInventory { owned: 0 };
        inventory.grant(Weapon::Hand);
        inventory
    }

    pub fn with_owned(weapons: &[Weapon]) -> Self {
        let mut inventory = WeaponInventory::new();
        for weapon in weapons {
            inventory.grant(*weapon);
        }
        inventory
    }

    pub fn grant(&mut self, weapon: Weapon) {
        self.owned |= 1 << weapon as u8;
    }

    pub fn revoke(&mut self, weapon: Weapon) {
        // Hand never leaves the set; cycling relies on it.
        if weapon != Weapon::Hand {
            self.owned &= !(1 << weapon as u8);
        }
    }

    pub fn owns(&self, weapon: Weapon) -> bool {
        self.owned & (1 << weapon as u8) != 0
    }

    pub fn owned_count(&self) -> u32 {
        self.owned.count_ones()
    }

    /// Advance cyclically from `current`, skipping unowned kinds.
    /// Terminates because `Hand` is always owned; with a single owned
    /// weapon it returns that weapon again.
    pub fn cycle_next(&self, current: Weapon) -> Weapon {
        let mut candidate = current.next_cyclic();
        while !self.owns(candidate) {
            candidate = candidate.next_cyclic();
        }
        candidate
    }

    /// Raw ownership bits, for the persistent variable store.
    pub fn to_bits(&self) -> u8 {
        self.owned
    }

    pub fn from_bits(bits: u8) -> Self {
        let mut inventory = WeaponInventory { owned: bits };
        inventory.grant(Weapon::Hand);
        inventory
    }
}

impl Default for WeaponInventory {
    fn default() -> Self {
        Self::new()
    }
}
