//! Error Types
//!
//! Every failure here is fatal for the run; blocked moves are not errors and
//! never reach this type.

use tactics_events::{ComponentKind, Entity};
use thiserror::Error;

use crate::board::GameId;
use crate::config::ConfigError;
use crate::systems::SystemKind;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("component column {kind} has {found} slots, expected {expected}")]
    LengthMismatch {
        kind: ComponentKind,
        expected: usize,
        found: usize,
    },

    #[error("a {found} value was stored in the {expected} column")]
    KindMismatch {
        expected: ComponentKind,
        found: ComponentKind,
    },

    #[error("event aimed at {kind} carries a transform for {target}")]
    EventTarget {
        kind: ComponentKind,
        target: ComponentKind,
    },

    #[error("entity {entity} out of range (entity count {count})")]
    EntityOutOfRange { entity: Entity, count: usize },

    #[error("unrecognized control key: {0:?}")]
    UnknownKey(String),

    #[error("input closed while waiting for a command")]
    InputClosed,

    #[error("system {system} contributes to {kind} but runs before cleanup")]
    PipelineOrder {
        system: SystemKind,
        kind: ComponentKind,
    },

    #[error("no position on the board for object {0}")]
    ObjectNotFound(GameId),

    #[error("cell {0} is off the board or already occupied")]
    CellOccupied(tactics_events::Position),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
