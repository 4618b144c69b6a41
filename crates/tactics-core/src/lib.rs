//! Tactics Simulation Core
//!
//! Immutable-snapshot entity/component simulation for a turn-based tactical
//! board: column storage, event folding, the per-tick systems, and field of
//! view.

pub mod board;
pub mod collab;
pub mod config;
pub mod error;
pub mod fov;
pub mod manager;
pub mod render;
pub mod setup;
pub mod systems;
pub mod transition;
pub mod world;

pub use board::{Board, GameId, IdGenerator};
pub use collab::{
    Chooser, Collaborators, LineSource, ReaderInput, ScriptedInput, SharedBuffer, SimRng,
};
pub use config::{Config, ConfigError, EntitySpec, Rules, SimulationConfig};
pub use error::{CoreError, Result};
pub use fov::{is_visible, line_of_sight, visibility_mask, DEFAULT_FOV_RADIUS};
pub use manager::{EntityBuilder, Manager};
pub use render::render_board;
pub use systems::{Pipeline, System, SystemKind};
pub use transition::{apply_events, apply_transform};
pub use world::{TickReport, World};
