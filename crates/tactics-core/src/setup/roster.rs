//! Default Roster
//!
//! Two marines in opposite corners of a 16x16 board, split by a broken wall.

use tactics_events::Position;

use crate::config::EntitySpec;

pub const MARINE_GLYPH: char = 'm';
pub const WALL_GLYPH: char = '#';

/// Row the wall runs along.
pub const WALL_ROW: i32 = 5;

/// Wall columns; 6, 7, 9, 14 and 15 are gaps.
pub const WALL_COLUMNS: [i32; 11] = [0, 1, 2, 3, 4, 5, 8, 10, 11, 12, 13];

/// A movable AI marine that sees.
pub fn marine(name: &str, x: i32, y: i32) -> EntitySpec {
    EntitySpec {
        name: Some(name.to_string()),
        position: Some(Position::new(x, y)),
        glyph: Some(MARINE_GLYPH),
        movable: true,
        ai: true,
        vision: true,
        ..EntitySpec::default()
    }
}

pub fn wall(x: i32, y: i32) -> EntitySpec {
    EntitySpec {
        name: Some("wall".to_string()),
        position: Some(Position::new(x, y)),
        glyph: Some(WALL_GLYPH),
        ..EntitySpec::default()
    }
}

/// The demo scenario. The first marine is the viewer.
pub fn default_entities() -> Vec<EntitySpec> {
    let mut entities = vec![
        EntitySpec {
            viewer: true,
            ..marine("1", 0, 15)
        },
        marine("2", 15, 0),
    ];
    entities.extend(WALL_COLUMNS.iter().map(|&x| wall(x, WALL_ROW)));
    entities
}
