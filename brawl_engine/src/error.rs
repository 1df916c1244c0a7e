use thiserror::Error;

/// Faults surfaced by the engine core. Dispatch over closed
/// enumerations is exhaustive, so the only fallible edge left is save
/// data naming a scene the graph does not know.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown scene id {0} in save data")]
    UnknownSceneId(i32),
}

/// Decoding failures for embedded opcode records.
///
/// A malformed record aborts the current frame's interactive overlay
/// only; playback continues (fail fast, degrade soft).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IactError {
    #[error("opcode record truncated: needed {needed} bytes, had {available}")]
    Truncated { needed: usize, available: usize },

    #[error("opcode record carries unsupported version {version}")]
    BadVersion { version: u16 },
}
