//! Component Manager
//!
//! Column storage for one world snapshot: for every component kind, one slot
//! per entity. Columns are shared between clones and copied on first write,
//! so cloning a manager is cheap while clones stay fully independent.

use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::Arc;

use tactics_events::{
    Actions, Component, ComponentKind, Entity, EntitySnapshot, Fov, Name, PermittedPositions,
    Position, Visible, WorldSnapshot,
};

use crate::error::{CoreError, Result};

type Column = Arc<Vec<Option<Component>>>;

/// Owns every component column of a snapshot. Index `i` of each column is entity `i`.
#[derive(Debug, Clone)]
pub struct Manager {
    columns: BTreeMap<ComponentKind, Column>,
    len: usize,
}

impl Manager {
    /// A manager with no entities.
    pub fn new() -> Self {
        Self {
            columns: ComponentKind::ALL
                .into_iter()
                .map(|kind| (kind, Arc::new(Vec::new())))
                .collect(),
            len: 0,
        }
    }

    /// Builds a manager from per-kind columns.
    ///
    /// All given columns must have the same length and hold only values of
    /// their own kind. Kinds not given are filled with absent slots.
    pub fn from_columns(columns: BTreeMap<ComponentKind, Vec<Option<Component>>>) -> Result<Self> {
        let len = columns.values().next().map_or(0, Vec::len);

        for (&kind, column) in &columns {
            if column.len() != len {
                return Err(CoreError::LengthMismatch {
                    kind,
                    expected: len,
                    found: column.len(),
                });
            }
            if let Some(found) = column.iter().flatten().map(Component::kind).find(|k| *k != kind) {
                return Err(CoreError::KindMismatch {
                    expected: kind,
                    found,
                });
            }
        }

        let mut manager = Self::new();
        manager.len = len;
        for kind in ComponentKind::ALL {
            let column = match columns.get(&kind) {
                Some(column) => column.clone(),
                None => vec![None; len],
            };
            manager.columns.insert(kind, Arc::new(column));
        }
        Ok(manager)
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn entities(&self) -> Range<Entity> {
        0..self.len
    }

    /// Entities holding a value for every one of `kinds`, in ascending order.
    pub fn filter(&self, kinds: &[ComponentKind]) -> Vec<Entity> {
        if kinds.is_empty() {
            return Vec::new();
        }
        self.entities()
            .filter(|&entity| kinds.iter().all(|&kind| self.has(entity, kind)))
            .collect()
    }

    /// Current value of a slot, `None` if absent or out of range.
    pub fn get(&self, entity: Entity, kind: ComponentKind) -> Option<&Component> {
        self.column(kind).get(entity).and_then(Option::as_ref)
    }

    pub fn has(&self, entity: Entity, kind: ComponentKind) -> bool {
        self.get(entity, kind).is_some()
    }

    /// Replaces a slot. The value, if any, must be of `kind`.
    pub fn set(
        &mut self,
        entity: Entity,
        kind: ComponentKind,
        value: Option<Component>,
    ) -> Result<()> {
        if entity >= self.len {
            return Err(CoreError::EntityOutOfRange {
                entity,
                count: self.len,
            });
        }
        if let Some(found) = value.as_ref().map(Component::kind) {
            if found != kind {
                return Err(CoreError::KindMismatch {
                    expected: kind,
                    found,
                });
            }
        }
        if let Some(column) = self.columns.get_mut(&kind) {
            Arc::make_mut(column)[entity] = value;
        }
        Ok(())
    }

    /// Appends one entity, returning its index.
    ///
    /// Kinds the builder leaves out are absent, except accumulating kinds
    /// which start empty-but-present.
    pub fn add(&mut self, builder: EntityBuilder) -> Entity {
        let entity = self.len;
        let mut given: BTreeMap<ComponentKind, Component> = builder
            .components
            .into_iter()
            .map(|component| (component.kind(), component))
            .collect();

        for (kind, column) in self.columns.iter_mut() {
            let value = given.remove(kind).or_else(|| kind.empty_default());
            Arc::make_mut(column).push(value);
        }
        self.len += 1;
        entity
    }

    /// Slots of one kind, indexed by entity.
    pub fn column(&self, kind: ComponentKind) -> &[Option<Component>] {
        self.columns
            .get(&kind)
            .map(|column| column.as_slice())
            .unwrap_or(&[])
    }

    pub fn position(&self, entity: Entity) -> Option<Position> {
        self.get(entity, ComponentKind::Position)
            .and_then(Component::as_position)
    }

    pub fn glyph(&self, entity: Entity) -> Option<char> {
        self.get(entity, ComponentKind::Visible)
            .and_then(Component::as_visible)
            .map(|visible| visible.glyph)
    }

    pub fn fov(&self, entity: Entity) -> Option<&Fov> {
        self.get(entity, ComponentKind::Fov).and_then(Component::as_fov)
    }

    pub fn actions(&self, entity: Entity) -> Option<&Actions> {
        self.get(entity, ComponentKind::Actions)
            .and_then(Component::as_actions)
    }

    pub fn permitted_positions(&self, entity: Entity) -> Option<&PermittedPositions> {
        self.get(entity, ComponentKind::PermittedPositions)
            .and_then(Component::as_permitted_positions)
    }

    /// First entity whose position is `position`, if any.
    pub fn occupant_at(&self, position: Position) -> Option<Entity> {
        self.column(ComponentKind::Position)
            .iter()
            .position(|slot| slot.as_ref().and_then(Component::as_position) == Some(position))
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.occupant_at(position).is_some()
    }

    /// Flattens every entity into a serializable snapshot.
    pub fn snapshot(&self, tick: u64, board_size: i32) -> WorldSnapshot {
        let entities = self
            .entities()
            .map(|entity| {
                let mut snapshot = EntitySnapshot::new(entity);
                for kind in ComponentKind::ALL {
                    match self.get(entity, kind) {
                        Some(Component::Position(position)) => snapshot.position = Some(*position),
                        Some(Component::Name(name)) => snapshot.name = Some(name.0.clone()),
                        Some(Component::Visible(visible)) => snapshot.glyph = Some(visible.glyph),
                        Some(Component::Fov(fov)) => snapshot.fov = fov.iter().copied().collect(),
                        Some(Component::Actions(actions)) => {
                            snapshot.actions = actions.as_slice().to_vec()
                        }
                        Some(Component::PermittedPositions(permitted)) => {
                            snapshot.permitted_positions = permitted.0.clone()
                        }
                        Some(_) => snapshot.markers.push(kind),
                        None => {}
                    }
                }
                snapshot
            })
            .collect();

        WorldSnapshot {
            tick,
            board_size,
            entities,
        }
    }
}

impl Default for Manager {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-entity record listing only the components that entity has.
#[derive(Debug, Clone, Default)]
pub struct EntityBuilder {
    components: Vec<Component>,
}

impl EntityBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a component, replacing any earlier one of the same kind.
    pub fn with(mut self, component: Component) -> Self {
        let kind = component.kind();
        self.components.retain(|c| c.kind() != kind);
        self.components.push(component);
        self
    }

    pub fn name(self, name: impl Into<String>) -> Self {
        self.with(Component::Name(Name::new(name)))
    }

    pub fn position(self, x: i32, y: i32) -> Self {
        self.with(Component::Position(Position::new(x, y)))
    }

    pub fn glyph(self, glyph: char) -> Self {
        self.with(Component::Visible(Visible::new(glyph)))
    }

    pub fn movable(self) -> Self {
        self.with(Component::Movable)
    }

    pub fn ai(self) -> Self {
        self.with(Component::Ai)
    }

    pub fn vision(self) -> Self {
        self.with(Component::Vision)
    }

    pub fn viewer(self) -> Self {
        self.with(Component::Viewer)
    }

    pub fn user_control(self) -> Self {
        self.with(Component::UnderUserControl)
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }
}
