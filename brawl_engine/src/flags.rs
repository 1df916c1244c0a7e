use log::warn;
use serde::Serialize;

/// Number of independently addressable flags carried by the register.
pub const FLAG_COUNT: usize = 128;

/// 128 one-bit flags set and cleared by the opcode dispatcher and read
/// by the frame scheduler for per-scene overlay decisions.
///
/// Out-of-range indices are a latent-bug surface in the legacy data;
/// they are reported through the log and otherwise ignored so a bad
/// record can never corrupt neighbouring state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BitFlagRegister {
    words: [u64; 2],
}

impl BitFlagRegister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, index: usize) {
        if let Some((word, bit)) = Self::locate(index) {
            self.words[word] |= 1 << bit;
        }
    }

    pub fn clear(&mut self, index: usize) {
        if let Some((word, bit)) = Self::locate(index) {
            self.words[word] &= !(1 << bit);
        }
    }

    pub fn assign(&mut self, index: usize, value: bool) {
        if value {
            self.set(index);
        } else {
            self.clear(index);
        }
    }

    pub fn is_set(&self, index: usize) -> bool {
        match Self::locate(index) {
            Some((word, bit)) => self.words[word] & (1 << bit) != 0,
            None => false,
        }
    }

    fn locate(index: usize) -> Option<(usize, usize)> {
        if index >= FLAG_COUNT {
            warn!("flag index {index} outside the 128-bit register");
            return None;
        }
        Some((index / 64, index % 64))
    }
}
