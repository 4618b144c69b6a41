//! AI System
//!
//! Picks one queued action at random for every AI entity.

use tactics_events::{Action, ComponentKind, Event};
use tracing::trace;

use super::{System, SystemKind};
use crate::collab::{choice, Collaborators};
use crate::config::Rules;
use crate::error::Result;
use crate::manager::Manager;

#[derive(Debug, Clone, Copy, Default)]
pub struct AiSystem;

impl System for AiSystem {
    fn kind(&self) -> SystemKind {
        SystemKind::Ai
    }

    fn process(
        &self,
        manager: &Manager,
        _rules: &Rules,
        collab: &mut Collaborators,
    ) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        for entity in manager.filter(&[ComponentKind::Actions, ComponentKind::Ai]) {
            let Some(actions) = manager.actions(entity) else {
                continue;
            };
            // Nothing queued, nothing to choose from.
            let Some(&action) = choice(collab.chooser.as_mut(), actions.as_slice()) else {
                continue;
            };
            trace!(entity, ?action, "ai chose action");
            match action {
                Action::Move(direction) => events.push(Event::move_in(entity, direction)),
            }
        }
        Ok(events)
    }
}
