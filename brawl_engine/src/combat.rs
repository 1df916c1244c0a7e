use log::debug;
use serde::Serialize;

use crate::actor::Actor;
use crate::enemy::ArchetypeId;
use crate::machine::{
    enter_body_now, enter_overlay_now, enter_pose_now, enter_weapon_now, StepContext,
};
use crate::states::{is_vulnerable, BodyState, OverlayState, PoseState, WeaponState};
use crate::weapons::Weapon;

/// Result of one strike resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HitOutcome {
    Miss,
    Hit,
    /// A bare-hand strike at point-blank range locks the defender
    /// instead of damaging.
    Grab,
    Critical,
}

/// Damage forced onto a locked defender by a critical; anything past
/// `max_damage` reads as an instant defeat.
const CRITICAL_OVERSHOOT: i32 = 10;

/// Weapon damage at or above this plays the heavy reaction chain.
const HEAVY_THRESHOLD: i32 = 5;

/// Bare-hand strikes inside this distance grab rather than punch.
/// Sits just past the enforced 90 px separation, so the grab lands
/// only with the bikes pressed together.
const GRAB_RANGE: i32 = 95;

/// Per-archetype "hit reaction" voice pools; the last entry is the
/// player's own pool.
fn reaction_voices(handler: Option<ArchetypeId>) -> &'static [i32] {
    match handler {
        Some(ArchetypeId::Rott1) => &[230, 231, 232],
        Some(ArchetypeId::Rott2) => &[233, 234],
        Some(ArchetypeId::Rott3) => &[235, 236, 237],
        Some(ArchetypeId::VultF1) => &[240, 241],
        Some(ArchetypeId::VultM1) => &[242, 243, 244],
        Some(ArchetypeId::VultF2) => &[245, 246],
        Some(ArchetypeId::VultM2) => &[247, 248],
        Some(ArchetypeId::Cavefish) => &[250],
        Some(ArchetypeId::Torque) => &[252, 253, 254],
        None => &[225, 226, 227],
    }
}

/// Pure range/vulnerability rules plus damage application.
pub struct CombatResolver;

impl CombatResolver {
    /// Check `attacker`'s current strike against `defender`.
    ///
    /// Misses when the lateral distance falls outside the attacking
    /// weapon's range table or the defender's pose is inside an
    /// invulnerable window. A locked defender takes an instant-defeat
    /// critical when the chain allows one; a point-blank bare-hand
    /// strike locks instead of damaging. On a landed hit with
    /// `apply_damage` the fixed per-weapon damage is added, a reaction
    /// voice line fires, and the defender's reaction states enter
    /// through the machine so their cues play. A finishing blow rolls
    /// the defender straight into the crash chain.
    pub fn hit_check(
        attacker: &Actor,
        defender: &mut Actor,
        apply_damage: bool,
        allow_critical: bool,
        ctx: &mut StepContext<'_>,
    ) -> HitOutcome {
        // A kick strikes with boot semantics even when nothing is in
        // hand; a disarmed, non-kicking attacker cannot connect.
        let kick_fallback = attacker.kicking.then_some(Weapon::Boot);
        let Some(weapon) = attacker.weapon.or(kick_fallback) else {
            return HitOutcome::Miss;
        };

        let distance = attacker.distance_to(defender);
        if distance < weapon.min_range() || distance > weapon.max_range() {
            return HitOutcome::Miss;
        }
        if !is_vulnerable(defender.slots.pose.state) {
            return HitOutcome::Miss;
        }

        if defender.locked && allow_critical {
            defender.damage = defender.max_damage + CRITICAL_OVERSHOOT;
            enter_overlay_now(
                defender,
                OverlayState::CriticalFlash,
                ctx.opponent_layer_base,
                &mut *ctx.sound,
                &mut *ctx.puppets,
            );
            collapse(defender, ctx);
            debug!("critical on locked defender at distance {distance}");
            return HitOutcome::Critical;
        }

        if weapon == Weapon::Hand && apply_damage && !defender.locked && distance <= GRAB_RANGE {
            enter_pose_now(
                defender,
                PoseState::LockedGrab,
                ctx.opponent_layer_base,
                &mut *ctx.sound,
                &mut *ctx.puppets,
            );
            debug!("grab locked the defender at distance {distance}");
            return HitOutcome::Grab;
        }

        if apply_damage {
            let mut dealt = weapon.damage();
            if weapon == Weapon::Boot && defender.kicking {
                // Boot hits land their increment twice when the
                // defender is mid-kick; saved games carry the doubled
                // totals, so the sum stays as-is.
                dealt += weapon.damage();
            }
            defender.damage += dealt;

            let voices = reaction_voices(defender.enemy_handler);
            let line = *ctx.rng.pick(voices);
            ctx.sound.start(line, 100);

            if defender.beaten() {
                collapse(defender, ctx);
                return HitOutcome::Hit;
            }

            enter_overlay_now(
                defender,
                OverlayState::HitFlash,
                ctx.opponent_layer_base,
                &mut *ctx.sound,
                &mut *ctx.puppets,
            );
            let heavy = weapon.damage() >= HEAVY_THRESHOLD;
            let reaction = if heavy {
                PoseState::HitHeavy
            } else {
                PoseState::HitLight
            };
            enter_pose_now(
                defender,
                reaction,
                ctx.opponent_layer_base,
                &mut *ctx.sound,
                &mut *ctx.puppets,
            );
            if heavy && defender.slots.body.state == BodyState::Ride {
                enter_body_now(
                    defender,
                    BodyState::Wobble,
                    ctx.opponent_layer_base,
                    &mut *ctx.sound,
                    &mut *ctx.puppets,
                );
            }
        }

        HitOutcome::Hit
    }
}

/// The defeat chain: the rider falls, the bike crashes out from under
/// them, and whatever was in hand is lost.
fn collapse(defender: &mut Actor, ctx: &mut StepContext<'_>) {
    enter_pose_now(
        defender,
        PoseState::FallStart,
        ctx.opponent_layer_base,
        &mut *ctx.sound,
        &mut *ctx.puppets,
    );
    if defender.slots.body.state == BodyState::Ride {
        enter_body_now(
            defender,
            BodyState::Crash,
            ctx.opponent_layer_base,
            &mut *ctx.sound,
            &mut *ctx.puppets,
        );
    }
    if !matches!(
        defender.slots.weapon.state,
        WeaponState::Hidden | WeaponState::DropLost
    ) {
        enter_weapon_now(
            defender,
            WeaponState::DropLost,
            ctx.opponent_layer_base,
            &mut *ctx.sound,
            &mut *ctx.puppets,
        );
    }
}
