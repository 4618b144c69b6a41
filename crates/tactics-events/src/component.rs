//! Component Types
//!
//! The closed set of component kinds an entity may carry, and the immutable
//! values stored in each slot. Markers carry no data.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::position::{Direction, Position};

/// Every kind of component the simulation knows about.
///
/// The declaration order is the secondary sort key when events are folded,
/// so it must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Position,
    Name,
    Visible,
    Movable,
    Ai,
    Vision,
    Viewer,
    UnderUserControl,
    Fov,
    Actions,
    PermittedPositions,
}

impl ComponentKind {
    /// All kinds, in fold order.
    pub const ALL: [ComponentKind; 11] = [
        ComponentKind::Position,
        ComponentKind::Name,
        ComponentKind::Visible,
        ComponentKind::Movable,
        ComponentKind::Ai,
        ComponentKind::Vision,
        ComponentKind::Viewer,
        ComponentKind::UnderUserControl,
        ComponentKind::Fov,
        ComponentKind::Actions,
        ComponentKind::PermittedPositions,
    ];

    /// Kinds reset to their empty value at the start of every tick.
    pub const AUTO_CLEAN: [ComponentKind; 3] = [
        ComponentKind::Fov,
        ComponentKind::Actions,
        ComponentKind::PermittedPositions,
    ];

    pub fn is_auto_clean(self) -> bool {
        Self::AUTO_CLEAN.contains(&self)
    }

    /// The empty-but-present value for accumulating kinds, `None` otherwise.
    pub fn empty_default(self) -> Option<Component> {
        match self {
            ComponentKind::Fov => Some(Component::Fov(Fov::default())),
            ComponentKind::Actions => Some(Component::Actions(Actions::default())),
            ComponentKind::PermittedPositions => {
                Some(Component::PermittedPositions(PermittedPositions::default()))
            }
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ComponentKind::Position => "position",
            ComponentKind::Name => "name",
            ComponentKind::Visible => "visible",
            ComponentKind::Movable => "movable",
            ComponentKind::Ai => "ai",
            ComponentKind::Vision => "vision",
            ComponentKind::Viewer => "viewer",
            ComponentKind::UnderUserControl => "under_user_control",
            ComponentKind::Fov => "fov",
            ComponentKind::Actions => "actions",
            ComponentKind::PermittedPositions => "permitted_positions",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display name of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Glyph drawn for an entity on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visible {
    pub glyph: char,
}

impl Visible {
    pub fn new(glyph: char) -> Self {
        Self { glyph }
    }
}

/// A candidate action queued for an entity this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Move(Direction),
}

/// Board positions an entity can currently see.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fov(pub BTreeSet<Position>);

impl Fov {
    /// Returns a new field of view covering both this one and `mask`.
    pub fn union(&self, mask: &BTreeSet<Position>) -> Fov {
        Fov(self.0.union(mask).copied().collect())
    }

    pub fn contains(&self, position: Position) -> bool {
        self.0.contains(&position)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.0.iter()
    }
}

/// Ordered candidate actions for this tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actions(pub Vec<Action>);

impl Actions {
    /// Returns a copy with `action` appended.
    pub fn appended(&self, action: Action) -> Actions {
        let mut actions = self.0.clone();
        actions.push(action);
        Actions(actions)
    }

    pub fn as_slice(&self) -> &[Action] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Destinations an entity may legally step to this tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermittedPositions(pub Vec<Position>);

impl PermittedPositions {
    /// Returns a copy with `positions` appended in order.
    pub fn extended(&self, positions: &[Position]) -> PermittedPositions {
        let mut all = self.0.clone();
        all.extend_from_slice(positions);
        PermittedPositions(all)
    }

    pub fn contains(&self, position: Position) -> bool {
        self.0.contains(&position)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A single component value, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Component {
    Position(Position),
    Name(Name),
    Visible(Visible),
    Movable,
    Ai,
    Vision,
    Viewer,
    UnderUserControl,
    Fov(Fov),
    Actions(Actions),
    PermittedPositions(PermittedPositions),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Position(_) => ComponentKind::Position,
            Component::Name(_) => ComponentKind::Name,
            Component::Visible(_) => ComponentKind::Visible,
            Component::Movable => ComponentKind::Movable,
            Component::Ai => ComponentKind::Ai,
            Component::Vision => ComponentKind::Vision,
            Component::Viewer => ComponentKind::Viewer,
            Component::UnderUserControl => ComponentKind::UnderUserControl,
            Component::Fov(_) => ComponentKind::Fov,
            Component::Actions(_) => ComponentKind::Actions,
            Component::PermittedPositions(_) => ComponentKind::PermittedPositions,
        }
    }

    pub fn as_position(&self) -> Option<Position> {
        match self {
            Component::Position(position) => Some(*position),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&Name> {
        match self {
            Component::Name(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_visible(&self) -> Option<Visible> {
        match self {
            Component::Visible(visible) => Some(*visible),
            _ => None,
        }
    }

    pub fn as_fov(&self) -> Option<&Fov> {
        match self {
            Component::Fov(fov) => Some(fov),
            _ => None,
        }
    }

    pub fn as_actions(&self) -> Option<&Actions> {
        match self {
            Component::Actions(actions) => Some(actions),
            _ => None,
        }
    }

    pub fn as_permitted_positions(&self) -> Option<&PermittedPositions> {
        match self {
            Component::PermittedPositions(permitted) => Some(permitted),
            _ => None,
        }
    }
}

impl From<Position> for Component {
    fn from(position: Position) -> Self {
        Component::Position(position)
    }
}

impl From<Name> for Component {
    fn from(name: Name) -> Self {
        Component::Name(name)
    }
}

impl From<Visible> for Component {
    fn from(visible: Visible) -> Self {
        Component::Visible(visible)
    }
}

impl From<Fov> for Component {
    fn from(fov: Fov) -> Self {
        Component::Fov(fov)
    }
}

impl From<Actions> for Component {
    fn from(actions: Actions) -> Self {
        Component::Actions(actions)
    }
}

impl From<PermittedPositions> for Component {
    fn from(permitted: PermittedPositions) -> Self {
        Component::PermittedPositions(permitted)
    }
}
