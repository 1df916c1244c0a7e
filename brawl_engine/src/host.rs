//! Contracts consumed from the surrounding interpreter.
//!
//! The brawl core never decodes video, blits bitmaps, or parses
//! resource files itself; it drives these narrow collaborator traits
//! once per frame. The host wires real subsystems in; the replay
//! driver and the test suite wire in the recording fakes below.

use serde::Serialize;

/// One actor-slot's puppeteer layer index.
pub type LayerId = i32;

/// Streamed-video playback surface.
pub trait VideoPlayer {
    fn seek(&mut self, filename: &str, byte_offset: u64, continuation_frame: i32);
    fn play(&mut self, filename: &str, speed: i32, offset: u64, start_frame: i32);
    fn get_string(&mut self, id: i32) -> Option<String>;
    fn get_font(&mut self, id: i32) -> Option<String>;
    fn set_palette(&mut self, bytes: &[u8]);
    fn set_palette_value(&mut self, index: u8, r: u8, g: u8, b: u8);
}

/// Costume/animation surface, one logical puppet per actor slot.
pub trait Puppeteer {
    fn set_costume(&mut self, layer: LayerId, costume: i32);
    fn set_direction(&mut self, layer: LayerId, angle: i32);
    fn start_animation(&mut self, layer: LayerId, frame: i32);
    fn put_actor(&mut self, layer: LayerId, x: i32, y: i32, room: i32);
    fn set_layer(&mut self, layer: LayerId, n: i32);
}

/// Mixer surface. Failures are soft: a missing sound id degrades to
/// silence on the host side and must never surface as an error here.
pub trait SoundMixer {
    fn load(&mut self, id: i32);
    fn is_playing(&self, id: i32) -> bool;
    fn start(&mut self, id: i32, priority: i32);
    fn stop(&mut self, id: i32);
    fn set_priority(&mut self, id: i32, priority: i32);
    fn set_pan(&mut self, id: i32, pan: i32);
}

/// Flat indexed integer store shared with the save system. The index
/// layout in [`crate::vars`] must stay bit-for-bit stable.
pub trait VariableStore {
    fn read_slot(&self, index: usize) -> i32;
    fn write_slot(&mut self, index: usize, value: i32);
}

/// Everything the core borrows for the duration of one tick.
pub struct Collaborators<'a> {
    pub video: &'a mut dyn VideoPlayer,
    pub puppets: &'a mut dyn Puppeteer,
    pub sound: &'a mut dyn SoundMixer,
    pub vars: &'a mut dyn VariableStore,
}

/// Host-refreshed input for one tick: the 2-bit button word plus the
/// absolute cursor position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Input {
    pub attack: bool,
    pub switch_weapon: bool,
    pub cursor_x: i32,
    pub cursor_y: i32,
}

impl Input {
    pub fn from_bits(buttons: u8, cursor_x: i32, cursor_y: i32) -> Self {
        Input {
            attack: buttons & 0b01 != 0,
            switch_weapon: buttons & 0b10 != 0,
            cursor_x,
            cursor_y,
        }
    }
}

/// Recording fakes, used by the replay driver and the regression
/// tests. Each call is captured as one labelled line so logs can be
/// diffed against fixtures.
pub mod recording {
    use super::{Collaborators, LayerId, Puppeteer, SoundMixer, VariableStore, VideoPlayer};
    use std::collections::BTreeSet;

    #[derive(Debug, Default)]
    pub struct RecordingHost {
        pub events: Vec<String>,
        playing: BTreeSet<i32>,
        slots: Vec<i32>,
    }

    impl RecordingHost {
        pub fn new() -> Self {
            RecordingHost {
                events: Vec::new(),
                playing: BTreeSet::new(),
                slots: vec![0; 256],
            }
        }

        pub fn events(&self) -> &[String] {
            &self.events
        }

        fn log(&mut self, line: String) {
            self.events.push(line);
        }
    }

    impl VideoPlayer for RecordingHost {
        fn seek(&mut self, filename: &str, byte_offset: u64, continuation_frame: i32) {
            self.log(format!("video.seek {filename} {byte_offset} {continuation_frame}"));
        }

        fn play(&mut self, filename: &str, speed: i32, offset: u64, start_frame: i32) {
            self.log(format!("video.play {filename} {speed} {offset} {start_frame}"));
        }

        fn get_string(&mut self, id: i32) -> Option<String> {
            Some(format!("string#{id}"))
        }

        fn get_font(&mut self, id: i32) -> Option<String> {
            Some(format!("font#{id}"))
        }

        fn set_palette(&mut self, bytes: &[u8]) {
            self.log(format!("video.palette {} bytes", bytes.len()));
        }

        fn set_palette_value(&mut self, index: u8, r: u8, g: u8, b: u8) {
            self.log(format!("video.palette[{index}] {r},{g},{b}"));
        }
    }

    impl Puppeteer for RecordingHost {
        fn set_costume(&mut self, layer: LayerId, costume: i32) {
            self.log(format!("puppet[{layer}].costume {costume}"));
        }

        fn set_direction(&mut self, layer: LayerId, angle: i32) {
            self.log(format!("puppet[{layer}].direction {angle}"));
        }

        fn start_animation(&mut self, layer: LayerId, frame: i32) {
            self.log(format!("puppet[{layer}].anim {frame}"));
        }

        fn put_actor(&mut self, layer: LayerId, x: i32, y: i32, room: i32) {
            self.log(format!("puppet[{layer}].put {x},{y} room {room}"));
        }

        fn set_layer(&mut self, layer: LayerId, n: i32) {
            self.log(format!("puppet[{layer}].layer {n}"));
        }
    }

    impl SoundMixer for RecordingHost {
        fn load(&mut self, id: i32) {
            self.log(format!("sound.load {id}"));
        }

        fn is_playing(&self, id: i32) -> bool {
            self.playing.contains(&id)
        }

        fn start(&mut self, id: i32, priority: i32) {
            if self.playing.insert(id) {
                self.log(format!("sound.start {id} prio {priority}"));
            }
        }

        fn stop(&mut self, id: i32) {
            if self.playing.remove(&id) {
                self.log(format!("sound.stop {id}"));
            }
        }

        fn set_priority(&mut self, id: i32, priority: i32) {
            self.log(format!("sound.prio {id} {priority}"));
        }

        fn set_pan(&mut self, id: i32, pan: i32) {
            self.log(format!("sound.pan {id} {pan}"));
        }
    }

    impl VariableStore for RecordingHost {
        fn read_slot(&self, index: usize) -> i32 {
            self.slots.get(index).copied().unwrap_or(0)
        }

        fn write_slot(&mut self, index: usize, value: i32) {
            if let Some(slot) = self.slots.get_mut(index) {
                *slot = value;
            }
        }
    }

    /// Borrow one recording host as all four collaborator roles.
    ///
    /// The core only holds the borrow for a single call, so splitting
    /// the struct with raw pointers is not worth it; instead four
    /// hosts are kept side by side.
    #[derive(Debug, Default)]
    pub struct RecordingRig {
        pub video: RecordingHost,
        pub puppets: RecordingHost,
        pub sound: RecordingHost,
        pub vars: RecordingHost,
    }

    impl RecordingRig {
        pub fn new() -> Self {
            RecordingRig {
                video: RecordingHost::new(),
                puppets: RecordingHost::new(),
                sound: RecordingHost::new(),
                vars: RecordingHost::new(),
            }
        }

        pub fn collaborators(&mut self) -> Collaborators<'_> {
            Collaborators {
                video: &mut self.video,
                puppets: &mut self.puppets,
                sound: &mut self.sound,
                vars: &mut self.vars,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::recording::RecordingRig;
    use super::Input;

    #[test]
    fn input_bits_decode_both_buttons() {
        let input = Input::from_bits(0b11, 160, 100);
        assert!(input.attack);
        assert!(input.switch_weapon);
        let idle = Input::from_bits(0, 0, 0);
        assert!(!idle.attack && !idle.switch_weapon);
    }

    #[test]
    fn recording_rig_captures_calls_in_order() {
        let mut rig = RecordingRig::new();
        {
            let hosts = rig.collaborators();
            hosts.video.play("duel.snm", 12, 0, 0);
            hosts.sound.start(88, 127);
            hosts.sound.start(88, 127);
            hosts.sound.stop(88);
        }
        assert_eq!(rig.video.events(), ["video.play duel.snm 12 0 0"]);
        assert_eq!(rig.sound.events(), ["sound.start 88 prio 127", "sound.stop 88"]);
    }
}
