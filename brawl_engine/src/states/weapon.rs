use serde::Serialize;

use super::{Effect, Guard, SoundCue, StateSpec};

/// Weapon-slot states: the drawn weapon's own layer. Swing visuals
/// shadow the pose chain; the switch chain is the only place the
/// inventory cycles. Discriminants are legacy codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(i32)]
pub enum WeaponState {
    Stowed = 0,
    Draw = 2,
    Held = 3,
    SwingWindup = 5,
    Swing = 6,
    SwingRecover = 7,
    SwitchOut = 10,
    SwitchIn = 11,
    DropLost = 13,
    Hidden = 14,
}

pub const fn spec(state: WeaponState) -> StateSpec<WeaponState> {
    use Effect::*;
    use WeaponState::*;
    match state {
        Stowed => StateSpec {
            enter: &[],
            during: &[],
            guard: Guard::Hold,
            next: Stowed,
        },
        Draw => StateSpec {
            enter: &[Show, Animate(60)],
            during: &[],
            guard: Guard::Frames(6),
            next: Held,
        },
        Held => StateSpec {
            enter: &[Animate(61)],
            during: &[],
            guard: Guard::Hold,
            next: Held,
        },
        SwingWindup => StateSpec {
            enter: &[Animate(63)],
            during: &[],
            guard: Guard::Frames(5),
            next: Swing,
        },
        Swing => StateSpec {
            enter: &[Animate(64)],
            during: &[],
            guard: Guard::Frames(6),
            next: SwingRecover,
        },
        SwingRecover => StateSpec {
            enter: &[Animate(65)],
            during: &[],
            guard: Guard::Frames(8),
            next: Held,
        },
        SwitchOut => StateSpec {
            enter: &[Animate(70)],
            during: &[],
            guard: Guard::Frames(8),
            next: SwitchIn,
        },
        // The inventory advances exactly when the new weapon appears
        // in hand, so an interrupted switch never half-applies.
        SwitchIn => StateSpec {
            enter: &[CycleWeapon, Animate(71)],
            during: &[],
            guard: Guard::Frames(8),
            next: Held,
        },
        DropLost => StateSpec {
            enter: &[Animate(73), StartSound(SoundCue::Rattle)],
            during: &[(6, Hide)],
            guard: Guard::Frames(8),
            next: Hidden,
        },
        Hidden => StateSpec {
            enter: &[Hide],
            during: &[],
            guard: Guard::Hold,
            next: Hidden,
        },
    }
}
