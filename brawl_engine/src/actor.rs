use serde::Serialize;

use crate::enemy::{ArchetypeId, EnemyArchetypeDefinition};
use crate::states::{BodyState, OverlayState, PoseState, WeaponState};
use crate::weapons::{Weapon, WeaponClass, WeaponInventory};

/// Track bounds in pixels.
pub const TRACK_MIN_X: i32 = 0;
pub const TRACK_MAX_X: i32 = 320;

/// Minimum lateral separation enforced between the two combatants.
pub const MIN_SEPARATION: i32 = 90;

/// Speed integration clamps.
pub const SPEED_LIMIT: i32 = 8;
pub const POSE_TILT_LIMIT: i32 = 7;

/// Steering divisor: one tick of held cursor adds `cursor / 40`.
pub const STEER_DIVISOR: i32 = 40;

/// Which of the four animated layers a slot record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SlotKind {
    Body,
    Pose,
    Weapon,
    Overlay,
}

/// Book-keeping common to all four slots. The state itself is typed
/// per slot, so the records are kept as four concrete fields rather
/// than an array of a common supertype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotRecord<S> {
    pub state: S,
    pub visible: bool,
    /// Animation tilt selected by the current state.
    pub anim_tilt: i32,
    /// Positional tilt offset applied on top of the animation.
    pub tilt_offset: i32,
    /// Frames elapsed since the state was entered.
    pub frames: u32,
}

impl<S> SlotRecord<S> {
    pub fn new(state: S) -> Self {
        SlotRecord {
            state,
            visible: true,
            anim_tilt: 0,
            tilt_offset: 0,
            frames: 0,
        }
    }

    /// Swap in a new state and restart the frame counter.
    pub fn enter(&mut self, state: S) {
        self.state = state;
        self.frames = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slots {
    pub body: SlotRecord<BodyState>,
    pub pose: SlotRecord<PoseState>,
    pub weapon: SlotRecord<WeaponState>,
    pub overlay: SlotRecord<OverlayState>,
}

impl Slots {
    pub fn idle() -> Self {
        let mut overlay = SlotRecord::new(OverlayState::Hidden);
        overlay.visible = false;
        Slots {
            body: SlotRecord::new(BodyState::Ride),
            pose: SlotRecord::new(PoseState::Idle),
            weapon: SlotRecord::new(WeaponState::Stowed),
            overlay,
        }
    }

    /// Every slot's frame counter advances by exactly one per tick,
    /// after dispatch.
    pub fn advance_frame_counters(&mut self) {
        self.body.frames += 1;
        self.pose.frames += 1;
        self.weapon.frames += 1;
        self.overlay.frames += 1;
    }
}

/// One combatant: the player or the current AI opponent.
#[derive(Debug, Clone, Serialize)]
pub struct Actor {
    pub x: i32,
    /// Decorative oscillation offset, flipped on track excursions.
    pub x1: i32,
    pub y: i32,
    pub y1: i32,
    pub speed: i32,
    /// Steering tilt; clamps to [-8, 8] for speed integration and is
    /// narrowed to [-7, 7] when it picks a pose.
    pub tilt: i32,
    pub weapon: Option<Weapon>,
    pub inventory: WeaponInventory,
    pub damage: i32,
    pub max_damage: i32,
    pub lost: bool,
    pub kicking: bool,
    /// The lock that exposes an actor to an instant-defeat critical.
    pub locked: bool,
    pub defunct: bool,
    pub running_sound: i32,
    pub enemy_handler: Option<ArchetypeId>,
    /// Inverse difficulty scale for the AI cadences; smaller is harder.
    pub probability: i32,
    pub slots: Slots,
}

impl Actor {
    pub fn player() -> Self {
        Actor {
            x: 160,
            x1: 0,
            y: 200,
            y1: 0,
            speed: 0,
            tilt: 0,
            weapon: Some(Weapon::Hand),
            inventory: WeaponInventory::new(),
            damage: 0,
            max_damage: 100,
            lost: false,
            kicking: false,
            locked: false,
            defunct: false,
            running_sound: 0,
            enemy_handler: None,
            probability: 5,
            slots: Slots::idle(),
        }
    }

    /// Build the opponent actor from an archetype definition. Called
    /// every time an archetype is (re)selected.
    pub fn enemy(definition: &EnemyArchetypeDefinition, probability: i32) -> Self {
        let mut inventory = WeaponInventory::new();
        inventory.grant(definition.weapon);
        Actor {
            x: 250,
            x1: 0,
            y: 300,
            y1: 0,
            speed: 0,
            tilt: 0,
            weapon: Some(definition.weapon),
            inventory,
            damage: 0,
            max_damage: definition.max_damage,
            lost: false,
            kicking: false,
            locked: false,
            defunct: false,
            running_sound: definition.sound_id,
            enemy_handler: Some(definition.id),
            probability,
            slots: Slots::idle(),
        }
    }

    pub fn weapon_class(&self) -> Option<WeaponClass> {
        self.weapon.map(Weapon::class)
    }

    /// Pose tilt, narrowed from the steering tilt.
    pub fn pose_tilt(&self) -> i32 {
        self.tilt.clamp(-POSE_TILT_LIMIT, POSE_TILT_LIMIT)
    }

    /// Distance to the opponent along the track.
    pub fn distance_to(&self, other: &Actor) -> i32 {
        (self.x - other.x).abs()
    }

    /// Whether the opponent sits inside this actor's weapon range,
    /// widened by `margin` on both ends.
    pub fn in_weapon_range(&self, other: &Actor, margin: i32) -> bool {
        let Some(weapon) = self.weapon else {
            return false;
        };
        let distance = self.distance_to(other);
        distance >= weapon.min_range() - margin && distance <= weapon.max_range() + margin
    }

    pub fn beaten(&self) -> bool {
        self.damage >= self.max_damage
    }
}
