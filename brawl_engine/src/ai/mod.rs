//! Per-archetype decision engines.
//!
//! Every archetype owns a private scratch struct, zeroed by `init` and
//! threaded explicitly through `decide`, with no hidden globals. The nine
//! engines share one skeleton (cadenced recomputation of aggression,
//! steering and attack intent, vignette rolls, track-edge clamps) but
//! tune it with their own constants and quirks, so each file reads as
//! its own fighter.

mod cavefish;
mod common;
mod rott1;
mod rott2;
mod rott3;
mod torque;
mod vultf1;
mod vultf2;
mod vultm1;
mod vultm2;

use serde::Serialize;

use crate::actor::Actor;
use crate::enemy::ArchetypeId;
use crate::rng::SessionRng;

pub use common::FightSense;

/// Result class of one decision. `Disarmed` is forced whenever the
/// deciding actor carries no weapon; `DebugWin` ends the encounter in
/// the player's favor and fires at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DecisionCode {
    Normal,
    Disarmed,
    DebugWin,
}

/// One tick's worth of AI output: the 2-bit button word, the cursor
/// nudge fed to movement, an optional idle-vignette request, and the
/// result class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub attack: bool,
    pub switch_weapon: bool,
    pub steer: i32,
    pub vignette: Option<usize>,
    pub code: DecisionCode,
}

impl Decision {
    pub fn idle() -> Self {
        Decision {
            attack: false,
            switch_weapon: false,
            steer: 0,
            vignette: None,
            code: DecisionCode::Normal,
        }
    }

    pub fn disarmed() -> Self {
        Decision {
            code: DecisionCode::Disarmed,
            ..Decision::idle()
        }
    }
}

/// The active opponent's brain: scratch state tagged by archetype.
#[derive(Debug, Clone)]
pub enum Brain {
    Rott1(rott1::Scratch),
    Rott2(rott2::Scratch),
    Rott3(rott3::Scratch),
    VultF1(vultf1::Scratch),
    VultM1(vultm1::Scratch),
    VultF2(vultf2::Scratch),
    VultM2(vultm2::Scratch),
    Cavefish(cavefish::Scratch),
    Torque(torque::Scratch),
}

impl Brain {
    /// Zeroed scratch for a freshly (re)selected archetype.
    pub fn init(id: ArchetypeId) -> Brain {
        match id {
            ArchetypeId::Rott1 => Brain::Rott1(rott1::Scratch::default()),
            ArchetypeId::Rott2 => Brain::Rott2(rott2::Scratch::default()),
            ArchetypeId::Rott3 => Brain::Rott3(rott3::Scratch::default()),
            ArchetypeId::VultF1 => Brain::VultF1(vultf1::Scratch::default()),
            ArchetypeId::VultM1 => Brain::VultM1(vultm1::Scratch::default()),
            ArchetypeId::VultF2 => Brain::VultF2(vultf2::Scratch::default()),
            ArchetypeId::VultM2 => Brain::VultM2(vultm2::Scratch::default()),
            ArchetypeId::Cavefish => Brain::Cavefish(cavefish::Scratch::default()),
            ArchetypeId::Torque => Brain::Torque(torque::Scratch::default()),
        }
    }

    /// One decision for the actor this brain drives.
    ///
    /// `debug_force_end` is the already-gated debug chord; it wins the
    /// encounter for the player once, then the scratch flag swallows
    /// any repeat.
    pub fn decide(
        &mut self,
        actor: &Actor,
        opponent: &Actor,
        rng: &mut SessionRng,
        debug_force_end: bool,
    ) -> Decision {
        if actor.weapon.is_none() {
            return Decision::disarmed();
        }
        if debug_force_end && !self.sense_mut().debug_spent {
            self.sense_mut().debug_spent = true;
            return Decision {
                code: DecisionCode::DebugWin,
                ..Decision::idle()
            };
        }
        match self {
            Brain::Rott1(scratch) => rott1::decide(scratch, actor, opponent, rng),
            Brain::Rott2(scratch) => rott2::decide(scratch, actor, opponent, rng),
            Brain::Rott3(scratch) => rott3::decide(scratch, actor, opponent, rng),
            Brain::VultF1(scratch) => vultf1::decide(scratch, actor, opponent, rng),
            Brain::VultM1(scratch) => vultm1::decide(scratch, actor, opponent, rng),
            Brain::VultF2(scratch) => vultf2::decide(scratch, actor, opponent, rng),
            Brain::VultM2(scratch) => vultm2::decide(scratch, actor, opponent, rng),
            Brain::Cavefish(scratch) => cavefish::decide(scratch, actor, opponent, rng),
            Brain::Torque(scratch) => torque::decide(scratch, actor, opponent, rng),
        }
    }

    fn sense_mut(&mut self) -> &mut FightSense {
        match self {
            Brain::Rott1(scratch) => &mut scratch.sense,
            Brain::Rott2(scratch) => &mut scratch.sense,
            Brain::Rott3(scratch) => &mut scratch.sense,
            Brain::VultF1(scratch) => &mut scratch.sense,
            Brain::VultM1(scratch) => &mut scratch.sense,
            Brain::VultF2(scratch) => &mut scratch.sense,
            Brain::VultM2(scratch) => &mut scratch.sense,
            Brain::Cavefish(scratch) => &mut scratch.sense,
            Brain::Torque(scratch) => &mut scratch.sense,
        }
    }
}
