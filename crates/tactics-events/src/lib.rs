//! Shared data types for the tactics simulation.
//!
//! This crate contains pure data structures with no simulation logic:
//! board geometry, component values, events and snapshots. The systems that
//! produce events and the fold that applies them live in `tactics-core`.

pub mod component;
pub mod event;
pub mod position;
pub mod snapshot;

// Re-export geometry
pub use position::{distance, generate_movements, Direction, Position};

// Re-export component types
pub use component::{
    Action, Actions, Component, ComponentKind, Fov, Name, PermittedPositions, Visible,
};

// Re-export event types
pub use event::{Entity, Event, Transform};

// Re-export snapshot types
pub use snapshot::{EntitySnapshot, WorldSnapshot};
