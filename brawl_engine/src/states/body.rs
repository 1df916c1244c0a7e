use serde::Serialize;

use super::{Effect, Guard, SoundCue, StateSpec};

/// Body-slot states: the bike itself. Steering animation while riding
/// is tilt-driven and handled by the machine; the table covers the
/// reaction and crash chains. Discriminants are the legacy state
/// codes and must not be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(i32)]
pub enum BodyState {
    Ride = 0,
    BumpBack = 2,
    BumpForward = 3,
    Wobble = 5,
    EdgeScrape = 7,
    Crash = 9,
    CrashSettle = 10,
    Gone = 11,
}

pub const fn spec(state: BodyState) -> StateSpec<BodyState> {
    use BodyState::*;
    use Effect::*;
    match state {
        Ride => StateSpec {
            enter: &[],
            during: &[],
            guard: Guard::Hold,
            next: Ride,
        },
        BumpBack => StateSpec {
            enter: &[Animate(102), StartSound(SoundCue::Rattle)],
            during: &[],
            guard: Guard::Frames(6),
            next: Ride,
        },
        BumpForward => StateSpec {
            enter: &[Animate(103)],
            during: &[],
            guard: Guard::Frames(6),
            next: Ride,
        },
        Wobble => StateSpec {
            enter: &[Animate(105)],
            during: &[(4, StopSound(SoundCue::Rattle))],
            guard: Guard::Frames(8),
            next: Ride,
        },
        EdgeScrape => StateSpec {
            enter: &[Animate(107), StartSound(SoundCue::Skid)],
            during: &[(8, StopSound(SoundCue::Skid))],
            guard: Guard::Frames(10),
            next: Ride,
        },
        Crash => StateSpec {
            enter: &[
                Animate(109),
                StopSound(SoundCue::EngineLoop),
                StartSound(SoundCue::Crash),
            ],
            during: &[],
            guard: Guard::Frames(14),
            next: CrashSettle,
        },
        CrashSettle => StateSpec {
            enter: &[Animate(110)],
            during: &[(10, MarkDefunct)],
            guard: Guard::Frames(12),
            next: Gone,
        },
        Gone => StateSpec {
            enter: &[Hide],
            during: &[],
            guard: Guard::Hold,
            next: Gone,
        },
    }
}
