//! Per-slot state tables.
//!
//! Each of the four animated slots advances through its own closed
//! state enumeration. Every state is described by one
//! [`StateSpec`] record: effects applied on entry, effects fired at
//! fixed frame offsets while the state runs, and the guard that moves
//! the slot to its successor. The tables are pure data; the machine in
//! [`crate::machine`] interprets them, so each state can be checked in
//! isolation and the compiler keeps every dispatch exhaustive.

mod body;
mod overlay;
mod pose;
mod weapon;

pub use body::{spec as body_spec, BodyState};
pub use overlay::{spec as overlay_spec, OverlayState};
pub use pose::{attack_accepted, is_vulnerable, spec as pose_spec, PoseState};
pub use weapon::{spec as weapon_spec, WeaponState};

use serde::Serialize;

/// Sound cues a state can start or stop. The numeric ids match the
/// mixer's bank layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SoundCue {
    EngineLoop,
    Swing,
    Impact,
    Kick,
    Skid,
    Crash,
    Rattle,
    Fanfare,
}

impl SoundCue {
    pub fn id(self) -> i32 {
        match self {
            SoundCue::EngineLoop => 80,
            SoundCue::Swing => 81,
            SoundCue::Impact => 82,
            SoundCue::Kick => 83,
            SoundCue::Skid => 84,
            SoundCue::Crash => 85,
            SoundCue::Rattle => 86,
            SoundCue::Fanfare => 87,
        }
    }
}

/// Which costume a `SwitchCostume` effect installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CostumeRole {
    Rider,
    Bike,
}

/// Side effects a state table can request. Interpreted by the actor
/// machine, which owns the borrows the effects need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effect {
    /// Ask the puppeteer to start this animation frame id.
    Animate(i32),
    StartSound(SoundCue),
    StopSound(SoundCue),
    /// Run the combat resolver against the opponent.
    ResolveHit {
        apply_damage: bool,
        allow_critical: bool,
    },
    SetKicking(bool),
    SetLocked(bool),
    SetLost,
    MarkDefunct,
    /// Ask the scheduler to enqueue the scene's successor.
    QueueSuccessor,
    SwitchCostume(CostumeRole),
    /// Complete a weapon switch through the inventory.
    CycleWeapon,
    Show,
    Hide,
}

/// Advancement rule for a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Guard {
    /// Stay until a command or an external event re-enters the slot.
    Hold,
    /// Advance to the successor after this many frames.
    Frames(u32),
}

/// One row of a slot's transition table.
#[derive(Debug, Clone, Copy)]
pub struct StateSpec<S: 'static> {
    pub enter: &'static [Effect],
    /// Effects fired when the slot's frame counter reaches an offset.
    pub during: &'static [(u32, Effect)],
    pub guard: Guard,
    pub next: S,
}

/// Boolean step function over sorted state-code boundaries.
///
/// `below_first` is the membership of codes before the first
/// boundary; each crossed boundary flips it. This reproduces the
/// irregular vulnerable/attackable windows without enumerating every
/// state id.
pub fn step_membership(boundaries: &[i32], code: i32, below_first: bool) -> bool {
    let crossed = boundaries.iter().filter(|bound| code >= **bound).count();
    below_first == (crossed % 2 == 0)
}

#[cfg(test)]
mod tests {
    use super::step_membership;

    #[test]
    fn step_function_alternates_across_boundaries() {
        let boundaries = [3, 10, 13];
        assert!(step_membership(&boundaries, 0, true));
        assert!(step_membership(&boundaries, 2, true));
        assert!(!step_membership(&boundaries, 3, true));
        assert!(!step_membership(&boundaries, 9, true));
        assert!(step_membership(&boundaries, 10, true));
        assert!(step_membership(&boundaries, 12, true));
        assert!(!step_membership(&boundaries, 13, true));
        assert!(!step_membership(&boundaries, 99, true));
    }

    #[test]
    fn step_function_respects_initial_membership() {
        let boundaries = [5];
        assert!(!step_membership(&boundaries, 0, false));
        assert!(step_membership(&boundaries, 5, false));
    }

    #[test]
    fn empty_boundaries_keep_the_initial_membership() {
        assert!(step_membership(&[], 42, true));
        assert!(!step_membership(&[], 42, false));
    }
}
