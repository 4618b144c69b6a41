//! World
//!
//! Owns the current snapshot and advances it one tick at a time. Each tick
//! clones the snapshot, then runs the pipeline's systems in order; every
//! system sees the state left by the systems before it.

use tracing::{debug, info};

use tactics_events::WorldSnapshot;

use crate::collab::Collaborators;
use crate::config::{Config, Rules};
use crate::error::Result;
use crate::manager::Manager;
use crate::systems::{Pipeline, SystemKind};
use crate::transition::apply_events;

pub struct World {
    manager: Manager,
    pipeline: Pipeline,
    rules: Rules,
    tick: u64,
}

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub events: usize,
    pub slots_written: usize,
}

impl World {
    pub fn new(manager: Manager, pipeline: &[SystemKind], rules: Rules) -> Result<Self> {
        Ok(Self {
            manager,
            pipeline: Pipeline::new(pipeline)?,
            rules,
            tick: 0,
        })
    }

    /// Builds the starting roster and pipeline described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let manager = crate::setup::build_manager(&config.entities);
        Self::new(manager, &config.pipeline, config.simulation.rules())
    }

    pub fn manager(&self) -> &Manager {
        &self.manager
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Ticks completed so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Advances one tick. On error the world keeps its previous snapshot.
    pub fn step(&mut self, collab: &mut Collaborators) -> Result<TickReport> {
        let mut next = self.manager.clone();
        let mut events = 0;
        let mut slots_written = 0;

        for system in self.pipeline.systems() {
            let emitted = system.process(&next, &self.rules, collab)?;
            debug!(system = %system.kind(), events = emitted.len(), "system processed");
            events += emitted.len();
            slots_written += apply_events(&mut next, &self.rules, emitted)?;
        }

        self.manager = next;
        self.tick += 1;
        info!(tick = self.tick, events, slots_written, "tick complete");

        Ok(TickReport {
            tick: self.tick,
            events,
            slots_written,
        })
    }

    /// Runs `ticks` ticks, stopping at the first error.
    pub fn run(&mut self, ticks: u64, collab: &mut Collaborators) -> Result<Vec<TickReport>> {
        (0..ticks).map(|_| self.step(collab)).collect()
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        self.manager.snapshot(self.tick, self.rules.board_size)
    }
}
