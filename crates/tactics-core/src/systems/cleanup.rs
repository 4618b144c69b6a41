//! Cleanup System
//!
//! Resets every auto-clean component to its empty default at the start of a
//! tick so accumulators never carry over.

use tactics_events::{ComponentKind, Event};

use super::{System, SystemKind};
use crate::collab::Collaborators;
use crate::config::Rules;
use crate::error::Result;
use crate::manager::Manager;

#[derive(Debug, Clone, Copy, Default)]
pub struct CleanupSystem;

impl System for CleanupSystem {
    fn kind(&self) -> SystemKind {
        SystemKind::Cleanup
    }

    fn process(
        &self,
        manager: &Manager,
        _rules: &Rules,
        _collab: &mut Collaborators,
    ) -> Result<Vec<Event>> {
        Ok(manager
            .entities()
            .flat_map(|entity| {
                ComponentKind::AUTO_CLEAN
                    .into_iter()
                    .map(move |kind| Event::clean(entity, kind))
            })
            .collect())
    }
}
