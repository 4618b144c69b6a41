//! Board Rendering
//!
//! Text grid of the board: origin top-left, x to the right, y downward.

use std::collections::{BTreeMap, BTreeSet};

use tactics_events::{ComponentKind, Position};

use crate::manager::Manager;

pub const EMPTY_CELL: char = '.';
pub const HIDDEN_CELL: char = '?';

/// Renders a `size` x `size` board.
///
/// Cells outside `mask` show as hidden; with no mask everything is visible.
pub fn render_board(
    size: i32,
    glyphs: &BTreeMap<Position, char>,
    mask: Option<&BTreeSet<Position>>,
) -> String {
    let mut out = String::from(" x ");
    out.extend((0..size).filter_map(|x| char::from_digit((x % 10) as u32, 10)));
    out.push_str("\ny\n");

    for y in 0..size {
        out.push_str(&format!("{:02} ", y));
        for x in 0..size {
            let cell = Position::new(x, y);
            let visible = mask.map_or(true, |mask| mask.contains(&cell));
            let glyph = match glyphs.get(&cell) {
                _ if !visible => HIDDEN_CELL,
                Some(&glyph) => glyph,
                None => EMPTY_CELL,
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Glyph of every placed, visible entity. Lower entities win shared cells.
pub fn glyph_map(manager: &Manager) -> BTreeMap<Position, char> {
    let mut glyphs = BTreeMap::new();
    for entity in manager.filter(&[ComponentKind::Position, ComponentKind::Visible]) {
        if let (Some(position), Some(glyph)) = (manager.position(entity), manager.glyph(entity)) {
            glyphs.entry(position).or_insert(glyph);
        }
    }
    glyphs
}
