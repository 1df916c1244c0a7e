use serde::Serialize;

use super::{Effect, Guard, StateSpec};

/// Overlay-slot states: short-lived flashes and icons drawn over the
/// rider: hit reactions set by the combat resolver and icons
/// requested by embedded opcode records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(i32)]
pub enum OverlayState {
    Hidden = 0,
    HitFlash = 2,
    CriticalFlash = 3,
    IconBranch = 5,
    IconWeapon = 6,
    DustCloud = 8,
}

pub const fn spec(state: OverlayState) -> StateSpec<OverlayState> {
    use Effect::*;
    use OverlayState::*;
    match state {
        Hidden => StateSpec {
            enter: &[Hide],
            during: &[],
            guard: Guard::Hold,
            next: Hidden,
        },
        HitFlash => StateSpec {
            enter: &[Show, Animate(90)],
            during: &[],
            guard: Guard::Frames(4),
            next: Hidden,
        },
        CriticalFlash => StateSpec {
            enter: &[Show, Animate(91)],
            during: &[],
            guard: Guard::Frames(8),
            next: Hidden,
        },
        // Stays up until the road-branch window passes; the opcode
        // dispatcher re-enters Hidden explicitly.
        IconBranch => StateSpec {
            enter: &[Show, Animate(93)],
            during: &[],
            guard: Guard::Hold,
            next: IconBranch,
        },
        IconWeapon => StateSpec {
            enter: &[Show, Animate(94)],
            during: &[],
            guard: Guard::Frames(12),
            next: Hidden,
        },
        DustCloud => StateSpec {
            enter: &[Show, Animate(96)],
            during: &[],
            guard: Guard::Frames(10),
            next: Hidden,
        },
    }
}
