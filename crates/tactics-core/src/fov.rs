//! Field of View
//!
//! Line-of-sight rasterization and the per-viewer visibility mask. Anything
//! standing on a cell blocks sight through it; the two endpoints of a line
//! never block.

use std::collections::BTreeSet;

use tactics_events::{generate_movements, Position};

/// Default Chebyshev vision radius.
pub const DEFAULT_FOV_RADIUS: i32 = 4;

/// Cells on the rasterized line from `from` to `to`, both endpoints included.
///
/// Steps one cell per iteration along the axis with the larger delta (y on
/// ties). The error term grows by `minor / major` per step; once it reaches
/// one half the minor coordinate advances and the term drops by one. The
/// term is tracked as a numerator over `major` so the threshold test is exact.
pub fn line_of_sight(from: Position, to: Position) -> Vec<Position> {
    let delta_x = (to.x - from.x).abs();
    let delta_y = (to.y - from.y).abs();
    let x_major = delta_x > delta_y;

    let (a_start, b_start, a_end, b_end) = if x_major {
        (from.x, from.y, to.x, to.y)
    } else {
        (from.y, from.x, to.y, to.x)
    };

    let major = (a_end - a_start).abs();
    let minor = (b_end - b_start).abs();
    let a_step = if a_end >= a_start { 1 } else { -1 };
    let b_step = (b_end - b_start).signum();

    let mut line = Vec::with_capacity(major as usize + 1);
    let mut a = a_start;
    let mut b = b_start;
    let mut error = 0;

    for _ in 0..=major {
        line.push(if x_major {
            Position::new(a, b)
        } else {
            Position::new(b, a)
        });

        error += minor;
        if major > 0 && 2 * error >= major {
            b += b_step;
            error -= major;
        }
        a += a_step;
    }

    line
}

/// True when no interior cell of the line from `from` to `to` is opaque.
pub fn is_visible(from: Position, to: Position, is_opaque: impl Fn(Position) -> bool) -> bool {
    let line = line_of_sight(from, to);
    let interior = line.len().saturating_sub(1);
    line.iter()
        .take(interior)
        .skip(1)
        .all(|&cell| !is_opaque(cell))
}

/// Every on-board cell within Chebyshev `radius` of `origin` that `origin` can see.
///
/// The origin's own cell is always part of the mask when it is on the board.
pub fn visibility_mask(
    origin: Position,
    radius: i32,
    board_size: i32,
    is_opaque: impl Fn(Position) -> bool,
) -> BTreeSet<Position> {
    let mut mask = BTreeSet::new();
    if origin.in_bounds(board_size) {
        mask.insert(origin);
    }
    mask.extend(
        generate_movements(origin, radius)
            .filter(|cell| cell.in_bounds(board_size))
            .filter(|&cell| is_visible(origin, cell, &is_opaque)),
    );
    mask
}
