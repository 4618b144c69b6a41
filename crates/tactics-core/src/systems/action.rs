//! Action Generation
//!
//! Enumerates what movable entities may do this tick. Actions are queued
//! unfiltered; permitted positions list only the destinations that are
//! currently open.

use tactics_events::{generate_movements, Action, ComponentKind, Direction, Event};

use super::{System, SystemKind};
use crate::collab::Collaborators;
use crate::config::Rules;
use crate::error::Result;
use crate::manager::Manager;

/// Queues a move in every compass direction for each movable entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowActionSystem;

impl System for AllowActionSystem {
    fn kind(&self) -> SystemKind {
        SystemKind::AllowActions
    }

    fn process(
        &self,
        manager: &Manager,
        _rules: &Rules,
        _collab: &mut Collaborators,
    ) -> Result<Vec<Event>> {
        Ok(manager
            .filter(&[ComponentKind::Movable])
            .into_iter()
            .flat_map(|entity| {
                Direction::COMPASS
                    .into_iter()
                    .map(move |direction| Event::append_action(entity, Action::Move(direction)))
            })
            .collect())
    }
}

/// Records the adjacent cells a movable entity could step into right now.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermittedPositionsSystem;

impl System for PermittedPositionsSystem {
    fn kind(&self) -> SystemKind {
        SystemKind::PermittedPositions
    }

    fn process(
        &self,
        manager: &Manager,
        rules: &Rules,
        _collab: &mut Collaborators,
    ) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        for entity in manager.filter(&[ComponentKind::Movable, ComponentKind::Position]) {
            let Some(position) = manager.position(entity) else {
                continue;
            };
            let open: Vec<_> = generate_movements(position, 1)
                .filter(|cell| cell.in_bounds(rules.board_size))
                .filter(|&cell| !manager.is_occupied(cell))
                .collect();
            events.push(Event::extend_permitted(entity, open));
        }
        Ok(events)
    }
}
