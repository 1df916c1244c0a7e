use log::{debug, warn};
use serde::Serialize;

use crate::host::Collaborators;
use crate::scene::SceneKind;

/// Resume offsets snap down to this boundary so a continued segment
/// restarts on a keyframe the video layer can seek to.
pub const RESUME_ALIGNMENT: i32 = 30;

/// Handle plus byte offset for continuing a previously-watched
/// segment of a video file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResumeVideo {
    pub handle: i32,
    pub byte_offset: u64,
}

/// A queued, not-yet-applied scene switch. At most one exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingSwitch {
    pub target: SceneKind,
    pub resume: Option<ResumeVideo>,
    pub filename: String,
    pub start_frame: i32,
    pub frame_count: i32,
}

/// Where a scene's resource load currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoadPhase {
    /// Declare dependencies only; bumps reference counts.
    Declare,
    /// Perform the load.
    Load,
}

/// Queued, frame-accurate scene switching plus the two-phase resource
/// lifecycle that gates it.
#[derive(Debug, Default)]
pub struct SceneTransitionManager {
    pending: Option<PendingSwitch>,
    /// Set while a phase-2 primary load is still in flight; queuing
    /// and input are locked out until it clears.
    primary_loading: bool,
    /// Sounds and costumes declared by phase 1, reference-counted so
    /// repeated declares stay balanced.
    declared_sounds: Vec<(i32, u32)>,
    declared_costumes: Vec<(i32, u32)>,
}

impl SceneTransitionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a switch to `target`.
    ///
    /// No-op while another switch is pending or while primary scene
    /// data is still loading; the first request wins, later ones drop.
    pub fn queue_switch(
        &mut self,
        target: SceneKind,
        resume: Option<ResumeVideo>,
        filename: &str,
        start_frame: i32,
        frame_count: i32,
    ) {
        if self.pending.is_some() {
            debug!("switch to {target:?} dropped: a switch is already pending");
            return;
        }
        if self.primary_loading {
            debug!("switch to {target:?} dropped: primary scene data still loading");
            return;
        }

        let start_frame = if resume.is_some() {
            align_resume_frame(start_frame)
        } else {
            start_frame
        };

        self.pending = Some(PendingSwitch {
            target,
            resume,
            filename: filename.to_string(),
            start_frame,
            frame_count,
        });
    }

    /// Convenience for the hand-authored scene graph.
    pub fn queue_successor(&mut self, scene: SceneKind) {
        if let Some(next) = scene.successor() {
            self.queue_switch(next, None, next.video_filename(), 0, 0);
        } else {
            warn!("scene {scene:?} has no successor to queue");
        }
    }

    pub fn pending(&self) -> Option<&PendingSwitch> {
        self.pending.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn input_locked(&self) -> bool {
        self.primary_loading
    }

    /// Take the pending switch if its prerequisite load has finished.
    /// Called from the scheduler's pre-tick only.
    pub fn take_ready(&mut self) -> Option<PendingSwitch> {
        if self.primary_loading {
            return None;
        }
        self.pending.take()
    }

    /// Run one load phase for `scene`.
    ///
    /// Phase 1 only declares sound/costume dependencies. Phase 2
    /// performs the load through the collaborators and reports
    /// completion; an incomplete load leaves the scene partially
    /// loaded with input locked until [`Self::complete_primary_load`].
    pub fn load_scene_data(
        &mut self,
        scene: SceneKind,
        phase: LoadPhase,
        hosts: &mut Collaborators<'_>,
    ) -> bool {
        match phase {
            LoadPhase::Declare => {
                for sound in scene_sounds(scene) {
                    bump(&mut self.declared_sounds, sound);
                }
                for costume in scene_costumes(scene) {
                    bump(&mut self.declared_costumes, costume);
                }
                true
            }
            LoadPhase::Load => {
                for (sound, _) in &self.declared_sounds {
                    hosts.sound.load(*sound);
                }
                for (index, (costume, _)) in self.declared_costumes.iter().enumerate() {
                    hosts.puppets.set_costume(index as i32, *costume);
                }
                // Loads resolve within the tick in this core; a host
                // that streams from disc flags the gap instead.
                true
            }
        }
    }

    /// Mark the primary phase-2 load as still in flight.
    pub fn begin_primary_load(&mut self) {
        self.primary_loading = true;
    }

    /// Observed by the scheduler's pre-tick once the host reports the
    /// load finished; unlocks input and pending switches.
    pub fn complete_primary_load(&mut self) {
        self.primary_loading = false;
    }

    /// Drop one reference from every declared dependency, releasing
    /// entries that reach zero. Called when a scene retires.
    pub fn release_scene_data(&mut self, scene: SceneKind) {
        for sound in scene_sounds(scene) {
            drop_ref(&mut self.declared_sounds, sound);
        }
        for costume in scene_costumes(scene) {
            drop_ref(&mut self.declared_costumes, costume);
        }
    }

    pub fn declared_sound_refs(&self, id: i32) -> u32 {
        self.declared_sounds
            .iter()
            .find(|(sound, _)| *sound == id)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}

fn align_resume_frame(frame: i32) -> i32 {
    frame - frame.rem_euclid(RESUME_ALIGNMENT)
}

fn bump(table: &mut Vec<(i32, u32)>, id: i32) {
    if let Some(entry) = table.iter_mut().find(|(entry_id, _)| *entry_id == id) {
        entry.1 += 1;
    } else {
        table.push((id, 1));
    }
}

fn drop_ref(table: &mut Vec<(i32, u32)>, id: i32) {
    if let Some(position) = table.iter().position(|(entry_id, _)| *entry_id == id) {
        if table[position].1 <= 1 {
            table.remove(position);
        } else {
            table[position].1 -= 1;
        }
    }
}

/// Sound dependencies declared by each scene's phase 1.
fn scene_sounds(scene: SceneKind) -> Vec<i32> {
    use crate::states::SoundCue;
    match scene.category() {
        crate::scene::SceneCategory::Fight => vec![
            SoundCue::EngineLoop.id(),
            SoundCue::Swing.id(),
            SoundCue::Impact.id(),
            SoundCue::Kick.id(),
            SoundCue::Crash.id(),
        ],
        crate::scene::SceneCategory::Transit => {
            vec![SoundCue::EngineLoop.id(), SoundCue::Skid.id()]
        }
        crate::scene::SceneCategory::Cutscene => Vec::new(),
    }
}

/// Costume dependencies declared by each scene's phase 1.
fn scene_costumes(scene: SceneKind) -> Vec<i32> {
    match scene.category() {
        crate::scene::SceneCategory::Fight => vec![300, 310],
        crate::scene::SceneCategory::Transit => vec![300],
        crate::scene::SceneCategory::Cutscene => Vec::new(),
    }
}
