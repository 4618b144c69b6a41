//! View System
//!
//! Draws the board as seen by the viewer entities. Emits no events.

use std::collections::BTreeSet;
use std::io::Write;

use tactics_events::{ComponentKind, Event, Position};

use super::{System, SystemKind};
use crate::collab::Collaborators;
use crate::config::Rules;
use crate::error::Result;
use crate::manager::Manager;
use crate::render::{glyph_map, render_board};

/// Union of every viewer's field of view, `None` when nobody is viewing.
pub fn viewer_mask(manager: &Manager) -> Option<BTreeSet<Position>> {
    let viewers = manager.filter(&[ComponentKind::Viewer]);
    if viewers.is_empty() {
        return None;
    }
    Some(
        viewers
            .into_iter()
            .filter_map(|entity| manager.fov(entity))
            .flat_map(|fov| fov.iter().copied())
            .collect(),
    )
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ViewSystem;

impl System for ViewSystem {
    fn kind(&self) -> SystemKind {
        SystemKind::View
    }

    fn process(
        &self,
        manager: &Manager,
        rules: &Rules,
        collab: &mut Collaborators,
    ) -> Result<Vec<Event>> {
        let mask = viewer_mask(manager);
        let text = render_board(rules.board_size, &glyph_map(manager), mask.as_ref());
        collab.output.write_all(text.as_bytes())?;
        collab.output.flush()?;
        Ok(Vec::new())
    }
}
