//! Systems
//!
//! Each system reads one snapshot and returns the events it wants applied.
//! Systems never write to the manager; the world folds their events in.

pub mod action;
pub mod ai;
pub mod cleanup;
pub mod control;
pub mod perception;
pub mod view;

use serde::{Deserialize, Serialize};
use std::fmt;

use tactics_events::{ComponentKind, Event};

use crate::collab::Collaborators;
use crate::config::Rules;
use crate::error::{CoreError, Result};
use crate::manager::Manager;

pub use action::{AllowActionSystem, PermittedPositionsSystem};
pub use ai::AiSystem;
pub use cleanup::CleanupSystem;
pub use control::{parse_key, UserControlSystem};
pub use perception::FieldOfViewSystem;
pub use view::ViewSystem;

/// A unit of behaviour run once per tick.
pub trait System {
    fn kind(&self) -> SystemKind;

    /// Events to apply to `manager`. Collaborators are the only side channel.
    fn process(
        &self,
        manager: &Manager,
        rules: &Rules,
        collab: &mut Collaborators,
    ) -> Result<Vec<Event>>;
}

/// Names of the available systems, as written in a scenario's `pipeline`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemKind {
    Cleanup,
    AllowActions,
    PermittedPositions,
    UserControl,
    Ai,
    FieldOfView,
    View,
}

impl SystemKind {
    pub const ALL: [SystemKind; 7] = [
        SystemKind::Cleanup,
        SystemKind::AllowActions,
        SystemKind::PermittedPositions,
        SystemKind::UserControl,
        SystemKind::Ai,
        SystemKind::FieldOfView,
        SystemKind::View,
    ];

    pub fn default_pipeline() -> Vec<SystemKind> {
        Self::ALL.to_vec()
    }

    pub fn name(self) -> &'static str {
        match self {
            SystemKind::Cleanup => "cleanup",
            SystemKind::AllowActions => "allow_actions",
            SystemKind::PermittedPositions => "permitted_positions",
            SystemKind::UserControl => "user_control",
            SystemKind::Ai => "ai",
            SystemKind::FieldOfView => "field_of_view",
            SystemKind::View => "view",
        }
    }

    /// Component kinds this system emits events for, cleanup excluded.
    pub fn produces(self) -> &'static [ComponentKind] {
        match self {
            SystemKind::Cleanup | SystemKind::View => &[],
            SystemKind::AllowActions => &[ComponentKind::Actions],
            SystemKind::PermittedPositions => &[ComponentKind::PermittedPositions],
            SystemKind::UserControl | SystemKind::Ai => &[ComponentKind::Position],
            SystemKind::FieldOfView => &[ComponentKind::Fov],
        }
    }

    pub fn build(self) -> Box<dyn System> {
        match self {
            SystemKind::Cleanup => Box::new(CleanupSystem),
            SystemKind::AllowActions => Box::new(AllowActionSystem),
            SystemKind::PermittedPositions => Box::new(PermittedPositionsSystem),
            SystemKind::UserControl => Box::new(UserControlSystem),
            SystemKind::Ai => Box::new(AiSystem),
            SystemKind::FieldOfView => Box::new(FieldOfViewSystem),
            SystemKind::View => Box::new(ViewSystem),
        }
    }
}

impl fmt::Display for SystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered systems for one tick.
pub struct Pipeline {
    systems: Vec<Box<dyn System>>,
}

impl Pipeline {
    /// Builds the systems for `kinds`, in order.
    ///
    /// Fails if a system that accumulates into an auto-clean kind runs
    /// before cleanup, or when there is no cleanup at all.
    pub fn new(kinds: &[SystemKind]) -> Result<Self> {
        let cleanup_at = kinds.iter().position(|&kind| kind == SystemKind::Cleanup);
        for (index, &system) in kinds.iter().enumerate() {
            let cleaned = cleanup_at.is_some_and(|at| at < index);
            if cleaned {
                continue;
            }
            if let Some(&kind) = system.produces().iter().find(|kind| kind.is_auto_clean()) {
                return Err(CoreError::PipelineOrder { system, kind });
            }
        }

        Ok(Self {
            systems: kinds.iter().map(|kind| kind.build()).collect(),
        })
    }

    pub fn kinds(&self) -> Vec<SystemKind> {
        self.systems.iter().map(|system| system.kind()).collect()
    }

    pub fn systems(&self) -> impl Iterator<Item = &dyn System> {
        self.systems.iter().map(|system| system.as_ref())
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.kinds()).finish()
    }
}
