//! Perception System
//!
//! Computes what each seeing entity can see this tick and accumulates it
//! into its field of view.

use tactics_events::{ComponentKind, Event};

use super::{System, SystemKind};
use crate::collab::Collaborators;
use crate::config::Rules;
use crate::error::Result;
use crate::fov::visibility_mask;
use crate::manager::Manager;

#[derive(Debug, Clone, Copy, Default)]
pub struct FieldOfViewSystem;

impl System for FieldOfViewSystem {
    fn kind(&self) -> SystemKind {
        SystemKind::FieldOfView
    }

    fn process(
        &self,
        manager: &Manager,
        rules: &Rules,
        _collab: &mut Collaborators,
    ) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        for entity in manager.filter(&[ComponentKind::Vision, ComponentKind::Position]) {
            let Some(origin) = manager.position(entity) else {
                continue;
            };
            let mask = visibility_mask(origin, rules.fov_radius, rules.board_size, |cell| {
                manager.is_occupied(cell)
            });
            events.push(Event::union_fov(entity, mask));
        }
        Ok(events)
    }
}
