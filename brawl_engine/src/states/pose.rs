use serde::Serialize;

use super::{step_membership, Effect, Guard, SoundCue, StateSpec};

/// Pose-slot states: the rider's fight machine. This is the largest
/// of the four tables and the one combat keys off. Discriminants are
/// the legacy state codes; the gaps are load-bearing because the
/// vulnerable and attack-accepting windows below are step functions
/// over the raw codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(i32)]
pub enum PoseState {
    Idle = 0,
    Steer = 1,
    Duck = 3,
    AttackWindup = 10,
    AttackStrike = 11,
    AttackRecover = 12,
    KickWindup = 16,
    KickStrike = 17,
    KickRecover = 18,
    SwitchPose = 22,
    HitLight = 30,
    HitHeavy = 31,
    Stagger = 33,
    LockedGrab = 36,
    FallStart = 40,
    FallSlide = 41,
    FallSettle = 42,
    Defeated = 43,
    WinTaunt = 46,
}

/// Alternating vulnerable/invulnerable windows over the pose codes.
/// Idle and steering are open; ducking and the kick chain tuck the
/// rider out of reach; reactions are open again; the fall chain is
/// not.
const VULNERABLE_BOUNDARIES: [i32; 7] = [3, 10, 13, 20, 26, 30, 40];

/// States that accept a new attack or kick command. Deliberately
/// irregular: idle and steering accept, ducking accepts (a kick can
/// launch out of a duck), everything else refuses.
const ATTACK_ACCEPT_BOUNDARIES: [i32; 3] = [2, 3, 4];

pub fn is_vulnerable(state: PoseState) -> bool {
    step_membership(&VULNERABLE_BOUNDARIES, state as i32, true)
}

pub fn attack_accepted(state: PoseState) -> bool {
    step_membership(&ATTACK_ACCEPT_BOUNDARIES, state as i32, true)
}

pub const fn spec(state: PoseState) -> StateSpec<PoseState> {
    use Effect::*;
    use PoseState::*;
    match state {
        Idle => StateSpec {
            enter: &[Animate(10)],
            during: &[],
            guard: Guard::Hold,
            next: Idle,
        },
        Steer => StateSpec {
            enter: &[],
            during: &[],
            guard: Guard::Hold,
            next: Steer,
        },
        Duck => StateSpec {
            enter: &[Animate(13)],
            during: &[],
            guard: Guard::Frames(10),
            next: Idle,
        },
        AttackWindup => StateSpec {
            enter: &[Animate(20), StartSound(SoundCue::Swing)],
            during: &[],
            guard: Guard::Frames(5),
            next: AttackStrike,
        },
        AttackStrike => StateSpec {
            enter: &[Animate(21)],
            during: &[(
                2,
                ResolveHit {
                    apply_damage: true,
                    allow_critical: true,
                },
            )],
            guard: Guard::Frames(6),
            next: AttackRecover,
        },
        AttackRecover => StateSpec {
            enter: &[Animate(22)],
            during: &[],
            guard: Guard::Frames(8),
            next: Idle,
        },
        KickWindup => StateSpec {
            enter: &[Animate(26), SetKicking(true)],
            during: &[],
            guard: Guard::Frames(4),
            next: KickStrike,
        },
        KickStrike => StateSpec {
            enter: &[Animate(27), StartSound(SoundCue::Kick)],
            during: &[(
                3,
                ResolveHit {
                    apply_damage: true,
                    allow_critical: false,
                },
            )],
            guard: Guard::Frames(5),
            next: KickRecover,
        },
        KickRecover => StateSpec {
            enter: &[Animate(28), SetKicking(false)],
            during: &[],
            guard: Guard::Frames(7),
            next: Idle,
        },
        SwitchPose => StateSpec {
            enter: &[Animate(32)],
            during: &[],
            guard: Guard::Frames(16),
            next: Idle,
        },
        HitLight => StateSpec {
            enter: &[Animate(40)],
            during: &[],
            guard: Guard::Frames(6),
            next: Idle,
        },
        HitHeavy => StateSpec {
            enter: &[Animate(41), StartSound(SoundCue::Impact)],
            during: &[],
            guard: Guard::Frames(10),
            next: Stagger,
        },
        Stagger => StateSpec {
            enter: &[Animate(43)],
            during: &[],
            guard: Guard::Frames(8),
            next: Idle,
        },
        LockedGrab => StateSpec {
            enter: &[Animate(46), SetLocked(true)],
            during: &[(12, SetLocked(false))],
            guard: Guard::Frames(14),
            next: Idle,
        },
        FallStart => StateSpec {
            enter: &[Animate(50), SetLost, StartSound(SoundCue::Crash)],
            during: &[],
            guard: Guard::Frames(8),
            next: FallSlide,
        },
        FallSlide => StateSpec {
            enter: &[Animate(51), StartSound(SoundCue::Skid)],
            during: &[],
            guard: Guard::Frames(10),
            next: FallSettle,
        },
        FallSettle => StateSpec {
            enter: &[Animate(52), StopSound(SoundCue::Skid)],
            during: &[(6, QueueSuccessor)],
            guard: Guard::Frames(12),
            next: Defeated,
        },
        Defeated => StateSpec {
            enter: &[Animate(53), MarkDefunct],
            during: &[],
            guard: Guard::Hold,
            next: Defeated,
        },
        WinTaunt => StateSpec {
            enter: &[Animate(56), StartSound(SoundCue::Fanfare)],
            during: &[],
            guard: Guard::Hold,
            next: WinTaunt,
        },
    }
}
