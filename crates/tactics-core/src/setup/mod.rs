//! Scenario Setup
//!
//! Starting rosters and the manager built from them.

pub mod roster;

pub use roster::*;

use crate::config::EntitySpec;
use crate::manager::Manager;

/// One entity per record, in order: record `i` becomes entity `i`.
pub fn build_manager(specs: &[EntitySpec]) -> Manager {
    let mut manager = Manager::new();
    for spec in specs {
        manager.add(spec.builder());
    }
    manager
}
