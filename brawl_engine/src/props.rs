use serde::Serialize;

use crate::host::SoundMixer;

/// A scripted idle vignette: a voice line plus an optional subtitle
/// and palette flash, fired opportunistically between combat beats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenePropEvent {
    /// Actor the vignette belongs to; `None` for ambient lines.
    pub owner: Option<usize>,
    pub sound_id: i32,
    pub subtitle_id: i32,
    pub flash_rgb: (u8, u8, u8),
    /// Times this event has fired so far.
    pub fires: i32,
    /// Once `fires` reaches this, the chain link takes over.
    pub max_fires: i32,
    /// Next event in the chain, if any.
    pub link: Option<usize>,
}

/// What firing a vignette asks the host to present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PropCue {
    pub sound_id: i32,
    pub subtitle_id: i32,
    pub flash_rgb: (u8, u8, u8),
}

/// The scene's vignette table. Chains are indices into the same
/// table; a spent event defers to its link.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PropTable {
    events: Vec<ScenePropEvent>,
}

impl PropTable {
    pub fn new(events: Vec<ScenePropEvent>) -> Self {
        PropTable { events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Fire the event at `index`, following chain links past spent
    /// entries. Returns the cue to present, or `None` when the whole
    /// chain is exhausted. The walk is bounded by the table length so
    /// a cyclic chain cannot spin.
    pub fn fire(&mut self, index: usize, sound: &mut dyn SoundMixer) -> Option<PropCue> {
        let mut cursor = index;
        for _ in 0..=self.events.len() {
            let event = self.events.get_mut(cursor)?;
            if event.fires < event.max_fires {
                event.fires += 1;
                sound.start(event.sound_id, 80);
                return Some(PropCue {
                    sound_id: event.sound_id,
                    subtitle_id: event.subtitle_id,
                    flash_rgb: event.flash_rgb,
                });
            }
            cursor = event.link?;
        }
        None
    }

    /// Reset fire counters for a fresh encounter.
    pub fn reset(&mut self) {
        for event in &mut self.events {
            event.fires = 0;
        }
    }
}

/// The stock idle vignettes used by the fight scenes.
pub fn fight_props() -> PropTable {
    PropTable::new(vec![
        ScenePropEvent {
            owner: Some(0),
            sound_id: 260,
            subtitle_id: 500,
            flash_rgb: (0, 0, 0),
            fires: 0,
            max_fires: 1,
            link: Some(1),
        },
        ScenePropEvent {
            owner: Some(0),
            sound_id: 261,
            subtitle_id: 501,
            flash_rgb: (0, 0, 0),
            fires: 0,
            max_fires: 2,
            link: None,
        },
        ScenePropEvent {
            owner: Some(1),
            sound_id: 262,
            subtitle_id: 502,
            flash_rgb: (64, 0, 0),
            fires: 0,
            max_fires: 1,
            link: None,
        },
        ScenePropEvent {
            owner: None,
            sound_id: 263,
            subtitle_id: 503,
            flash_rgb: (32, 32, 0),
            fires: 0,
            max_fires: 3,
            link: None,
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::{fight_props, PropTable, ScenePropEvent};
    use crate::host::recording::RecordingHost;

    fn chained_pair() -> PropTable {
        PropTable::new(vec![
            ScenePropEvent {
                owner: None,
                sound_id: 10,
                subtitle_id: 0,
                flash_rgb: (0, 0, 0),
                fires: 0,
                max_fires: 1,
                link: Some(1),
            },
            ScenePropEvent {
                owner: None,
                sound_id: 11,
                subtitle_id: 0,
                flash_rgb: (0, 0, 0),
                fires: 0,
                max_fires: 1,
                link: None,
            },
        ])
    }

    #[test]
    fn spent_event_defers_to_its_link() {
        let mut table = chained_pair();
        let mut mixer = RecordingHost::new();
        assert_eq!(table.fire(0, &mut mixer).unwrap().sound_id, 10);
        assert_eq!(table.fire(0, &mut mixer).unwrap().sound_id, 11);
        assert_eq!(table.fire(0, &mut mixer), None);
    }

    #[test]
    fn cyclic_chain_terminates() {
        let mut table = PropTable::new(vec![ScenePropEvent {
            owner: None,
            sound_id: 10,
            subtitle_id: 0,
            flash_rgb: (0, 0, 0),
            fires: 1,
            max_fires: 1,
            link: Some(0),
        }]);
        let mut mixer = RecordingHost::new();
        assert_eq!(table.fire(0, &mut mixer), None);
    }

    #[test]
    fn reset_rewinds_the_counters() {
        let mut table = chained_pair();
        let mut mixer = RecordingHost::new();
        table.fire(0, &mut mixer);
        table.reset();
        assert_eq!(table.fire(0, &mut mixer).unwrap().sound_id, 10);
    }

    #[test]
    fn stock_fight_table_is_populated() {
        assert!(!fight_props().is_empty());
    }
}
