//! Event Types
//!
//! An event is a pending change to one component slot of one entity. Systems
//! only ever produce events; the transition step folds them into the next
//! snapshot.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::component::{Action, ComponentKind};
use crate::position::{Direction, Position};

/// Dense entity index into every component column.
pub type Entity = usize;

/// The pure function carried by an event, from previous slot value to next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transform {
    /// Shift a position, unless the destination is off-board or occupied.
    Move { dx: i32, dy: i32 },
    /// Append one candidate to an action list.
    AppendAction { action: Action },
    /// Union a visibility mask into a field of view.
    UnionFov { mask: BTreeSet<Position> },
    /// Append destinations to a permitted-positions list.
    ExtendPermitted { positions: Vec<Position> },
    /// Ignore the previous value and reset to the kind's empty default.
    Clean,
}

impl Transform {
    /// The kind this transform operates on; `None` for kind-agnostic transforms.
    pub fn target_kind(&self) -> Option<ComponentKind> {
        match self {
            Transform::Move { .. } => Some(ComponentKind::Position),
            Transform::AppendAction { .. } => Some(ComponentKind::Actions),
            Transform::UnionFov { .. } => Some(ComponentKind::Fov),
            Transform::ExtendPermitted { .. } => Some(ComponentKind::PermittedPositions),
            Transform::Clean => None,
        }
    }
}

/// A transform aimed at exactly one (entity, kind) slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub entity: Entity,
    pub kind: ComponentKind,
    pub transform: Transform,
}

impl Event {
    pub fn new(entity: Entity, kind: ComponentKind, transform: Transform) -> Self {
        Self {
            entity,
            kind,
            transform,
        }
    }

    pub fn move_by(entity: Entity, dx: i32, dy: i32) -> Self {
        Self::new(entity, ComponentKind::Position, Transform::Move { dx, dy })
    }

    pub fn move_in(entity: Entity, direction: Direction) -> Self {
        Self::move_by(entity, direction.dx, direction.dy)
    }

    pub fn append_action(entity: Entity, action: Action) -> Self {
        Self::new(entity, ComponentKind::Actions, Transform::AppendAction { action })
    }

    pub fn union_fov(entity: Entity, mask: BTreeSet<Position>) -> Self {
        Self::new(entity, ComponentKind::Fov, Transform::UnionFov { mask })
    }

    pub fn extend_permitted(entity: Entity, positions: Vec<Position>) -> Self {
        Self::new(
            entity,
            ComponentKind::PermittedPositions,
            Transform::ExtendPermitted { positions },
        )
    }

    pub fn clean(entity: Entity, kind: ComponentKind) -> Self {
        Self::new(entity, kind, Transform::Clean)
    }

    /// Grouping key: entity first, then kind in declaration order.
    pub fn key(&self) -> (Entity, ComponentKind) {
        (self.entity, self.kind)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity {} {}: {:?}", self.entity, self.kind, self.transform)
    }
}
