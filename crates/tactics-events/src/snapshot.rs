//! World Snapshot Types
//!
//! Flattened, serializable per-tick view of every entity, for JSON output.

use serde::{Deserialize, Serialize};

use crate::component::{Action, ComponentKind};
use crate::event::Entity;
use crate::position::Position;

/// Complete world state at the end of a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub board_size: i32,
    pub entities: Vec<EntitySnapshot>,
}

impl WorldSnapshot {
    pub fn entity(&self, entity: Entity) -> Option<&EntitySnapshot> {
        self.entities.iter().find(|e| e.entity == entity)
    }
}

/// One entity's present components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub entity: Entity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glyph: Option<char>,
    /// Marker kinds the entity carries (movable, ai, vision, ...)
    #[serde(default)]
    pub markers: Vec<ComponentKind>,
    #[serde(default)]
    pub fov: Vec<Position>,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub permitted_positions: Vec<Position>,
}

impl EntitySnapshot {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            name: None,
            position: None,
            glyph: None,
            markers: Vec::new(),
            fov: Vec::new(),
            actions: Vec::new(),
            permitted_positions: Vec::new(),
        }
    }

    pub fn has_marker(&self, kind: ComponentKind) -> bool {
        self.markers.contains(&kind)
    }
}
