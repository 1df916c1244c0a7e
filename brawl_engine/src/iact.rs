//! Embedded opcode dispatch.
//!
//! Scenes that carry interactive data embed fixed-shape records in
//! their video stream; the host forwards the raw payloads for each
//! frame. Records decode with `byteorder` and dispatch on
//! `(scene, command, sub-command)`. A malformed record aborts the
//! rest of this frame's overlay work but never playback.

use byteorder::{LittleEndian, ReadBytesExt};
use log::warn;
use serde::Serialize;

use crate::actor::Actor;
use crate::error::IactError;
use crate::flags::BitFlagRegister;
use crate::host::Collaborators;
use crate::machine::{enter_overlay_now, PLAYER_LAYER_BASE};
use crate::scene::SceneKind;
use crate::states::OverlayState;

/// Flag index raised when a record announces an upcoming road branch;
/// the frame scheduler reads it to offer the branch transition.
pub const ROAD_BRANCH_FLAG: usize = 60;

/// Wire version the decoder accepts.
const RECORD_VERSION: u16 = 1;

/// One decoded opcode record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IactRecord {
    pub command: i16,
    pub sub: i16,
    pub params: Vec<i16>,
}

impl IactRecord {
    /// Decode one record: version, command, sub-command, parameter
    /// count, then that many parameters, all little-endian 16-bit.
    pub fn decode(payload: &[u8]) -> Result<IactRecord, IactError> {
        let mut cursor = payload;
        let version = read_u16(&mut cursor, payload.len())?;
        if version != RECORD_VERSION {
            return Err(IactError::BadVersion { version });
        }
        let command = read_i16(&mut cursor, payload.len())?;
        let sub = read_i16(&mut cursor, payload.len())?;
        let count = read_u16(&mut cursor, payload.len())? as usize;
        let mut params = Vec::with_capacity(count);
        for _ in 0..count {
            params.push(read_i16(&mut cursor, payload.len())?);
        }
        Ok(IactRecord { command, sub, params })
    }

    fn param(&self, index: usize) -> Option<i16> {
        self.params.get(index).copied()
    }
}

fn read_u16(cursor: &mut &[u8], total: usize) -> Result<u16, IactError> {
    let available = cursor.len();
    cursor.read_u16::<LittleEndian>().map_err(|_| IactError::Truncated {
        needed: total - available + 2,
        available: total,
    })
}

fn read_i16(cursor: &mut &[u8], total: usize) -> Result<i16, IactError> {
    let available = cursor.len();
    cursor.read_i16::<LittleEndian>().map_err(|_| IactError::Truncated {
        needed: total - available + 2,
        available: total,
    })
}

/// The closed command set. Anything else is a reported fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Flags,
    Hazard,
    OverlayIcon,
    RoadBranch,
    Palette,
    Unknown(i16),
}

impl Command {
    fn from_code(code: i16) -> Command {
        match code {
            2 => Command::Flags,
            3 => Command::Hazard,
            4 => Command::OverlayIcon,
            5 => Command::RoadBranch,
            6 => Command::Palette,
            other => Command::Unknown(other),
        }
    }
}

pub struct IactCommandDispatcher;

impl IactCommandDispatcher {
    /// Decode and dispatch every record the host captured for this
    /// frame. Stops at the first malformed record, skipping the rest
    /// of the frame's overlay work.
    pub fn process_frame(
        scene: SceneKind,
        payloads: &[Vec<u8>],
        player: &mut Actor,
        flags: &mut BitFlagRegister,
        hosts: &mut Collaborators<'_>,
    ) {
        if !scene.carries_iact() {
            if !payloads.is_empty() {
                warn!("scene {scene:?} carries no interactive data; {} records ignored", payloads.len());
            }
            return;
        }
        for payload in payloads {
            match IactRecord::decode(payload) {
                Ok(record) => Self::dispatch(scene, &record, player, flags, hosts),
                Err(err) => {
                    warn!("dropping remaining opcode records this frame: {err}");
                    return;
                }
            }
        }
    }

    /// Apply one record's effect.
    pub fn dispatch(
        scene: SceneKind,
        record: &IactRecord,
        player: &mut Actor,
        flags: &mut BitFlagRegister,
        hosts: &mut Collaborators<'_>,
    ) {
        match Command::from_code(record.command) {
            Command::Flags => {
                let Some(index) = record.param(0) else {
                    warn!("flags record without an index in {scene:?}");
                    return;
                };
                match record.sub {
                    0 | 1 => flags.assign(index as usize, record.sub == 1),
                    other => warn!("flags record with unknown sub-command {other} in {scene:?}"),
                }
            }
            Command::Hazard => {
                let dx = record.param(0).unwrap_or(0) as i32;
                let dy = record.param(1).unwrap_or(0) as i32;
                let damage = record.param(2).unwrap_or(0) as i32;
                player.x = (player.x + dx).clamp(crate::actor::TRACK_MIN_X, crate::actor::TRACK_MAX_X);
                player.y += dy;
                player.damage += damage;
                if damage > 0 {
                    enter_overlay_now(
                        player,
                        OverlayState::HitFlash,
                        PLAYER_LAYER_BASE,
                        &mut *hosts.sound,
                        &mut *hosts.puppets,
                    );
                }
            }
            Command::OverlayIcon => {
                let icon = match record.sub {
                    0 => OverlayState::IconBranch,
                    1 => OverlayState::IconWeapon,
                    2 => OverlayState::DustCloud,
                    other => {
                        warn!("unknown overlay icon {other} in {scene:?}");
                        return;
                    }
                };
                enter_overlay_now(
                    player,
                    icon,
                    PLAYER_LAYER_BASE,
                    &mut *hosts.sound,
                    &mut *hosts.puppets,
                );
            }
            Command::RoadBranch => {
                flags.set(ROAD_BRANCH_FLAG);
                enter_overlay_now(
                    player,
                    OverlayState::IconBranch,
                    PLAYER_LAYER_BASE,
                    &mut *hosts.sound,
                    &mut *hosts.puppets,
                );
            }
            Command::Palette => {
                let index = record.param(0).unwrap_or(0).clamp(0, 255) as u8;
                let r = record.param(1).unwrap_or(0).clamp(0, 255) as u8;
                let g = record.param(2).unwrap_or(0).clamp(0, 255) as u8;
                let b = record.param(3).unwrap_or(0).clamp(0, 255) as u8;
                hosts.video.set_palette_value(index, r, g, b);
            }
            Command::Unknown(code) => {
                warn!("unknown opcode command {code} (sub {}) in {scene:?}", record.sub);
            }
        }
    }
}

/// Build a wire payload; shared by tests and the replay driver's
/// scripted streams.
pub fn encode_record(command: i16, sub: i16, params: &[i16]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(8 + params.len() * 2);
    payload.extend_from_slice(&RECORD_VERSION.to_le_bytes());
    payload.extend_from_slice(&command.to_le_bytes());
    payload.extend_from_slice(&sub.to_le_bytes());
    payload.extend_from_slice(&(params.len() as u16).to_le_bytes());
    for param in params {
        payload.extend_from_slice(&param.to_le_bytes());
    }
    payload
}
