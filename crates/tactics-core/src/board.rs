//! Sparse Board
//!
//! An alternative to the column snapshot: only occupied cells are stored,
//! keyed by position and holding an object id. Boards are values; moving an
//! object yields a new board and leaves the old one untouched.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use tactics_events::{generate_movements, Entity, Position};

use crate::error::{CoreError, Result};
use crate::fov::visibility_mask;
use crate::manager::Manager;

/// Identifier of an object placed on a [`Board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameId(pub u64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out fresh ids. Owned by whoever builds the board.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> GameId {
        let id = GameId(self.next);
        self.next += 1;
        id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: i32,
    cells: BTreeMap<Position, GameId>,
}

impl Board {
    pub fn new(size: i32) -> Self {
        Self {
            size,
            cells: BTreeMap::new(),
        }
    }

    /// Places every entity of `manager` that has a position, assigning ids in
    /// entity order. Returns the board and which entity each id stands for.
    pub fn from_manager(
        manager: &Manager,
        size: i32,
        ids: &mut IdGenerator,
    ) -> Result<(Self, BTreeMap<GameId, Entity>)> {
        let mut board = Self::new(size);
        let mut entities = BTreeMap::new();
        for entity in manager.entities() {
            if let Some(position) = manager.position(entity) {
                let id = ids.next_id();
                board = board.place(id, position)?;
                entities.insert(id, entity);
            }
        }
        Ok((board, entities))
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    /// A copy with `id` at `position`. The cell must be on the board and free.
    pub fn place(&self, id: GameId, position: Position) -> Result<Self> {
        if !position.in_bounds(self.size) || self.cells.contains_key(&position) {
            return Err(CoreError::CellOccupied(position));
        }
        let mut next = self.clone();
        next.cells.insert(position, id);
        Ok(next)
    }

    pub fn occupant(&self, position: Position) -> Option<GameId> {
        self.cells.get(&position).copied()
    }

    pub fn is_empty(&self, position: Position) -> bool {
        !self.cells.contains_key(&position)
    }

    /// Position of `id`; an id that is not on the board is an error.
    pub fn get_position(&self, id: GameId) -> Result<Position> {
        self.cells
            .iter()
            .find(|(_, occupant)| **occupant == id)
            .map(|(position, _)| *position)
            .ok_or(CoreError::ObjectNotFound(id))
    }

    /// A copy with `id` moved to `to`, or an unchanged copy if `to` is off the
    /// board or held by another object.
    pub fn move_object(&self, id: GameId, to: Position) -> Result<Self> {
        let from = self.get_position(id)?;
        let mut next = self.clone();
        if !to.in_bounds(self.size) || self.occupant(to).is_some_and(|other| other != id) {
            return Ok(next);
        }
        next.cells.remove(&from);
        next.cells.insert(to, id);
        Ok(next)
    }

    /// Free adjacent cells `id` could step into.
    pub fn allowed_moves(&self, id: GameId) -> Result<Vec<Position>> {
        let from = self.get_position(id)?;
        Ok(generate_movements(from, 1)
            .filter(|cell| cell.in_bounds(self.size))
            .filter(|&cell| self.is_empty(cell))
            .collect())
    }

    /// Cells `id` can see within `radius`; every object blocks sight.
    pub fn fov_mask(&self, id: GameId, radius: i32) -> Result<BTreeSet<Position>> {
        let origin = self.get_position(id)?;
        Ok(visibility_mask(origin, radius, self.size, |cell| {
            !self.is_empty(cell)
        }))
    }

    pub fn objects(&self) -> impl Iterator<Item = (Position, GameId)> + '_ {
        self.cells.iter().map(|(position, id)| (*position, *id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::EntityBuilder;

    fn board_with(objects: &[(i32, i32)]) -> (Board, Vec<GameId>) {
        let mut ids = IdGenerator::new();
        let mut board = Board::new(10);
        let mut placed = Vec::new();
        for &(x, y) in objects {
            let id = ids.next_id();
            board = board.place(id, Position::new(x, y)).unwrap();
            placed.push(id);
        }
        (board, placed)
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_id(), GameId(0));
        assert_eq!(ids.next_id(), GameId(1));
        assert_eq!(GameId(3).to_string(), "#3");
    }

    #[test]
    fn test_unknown_id_fails_fast() {
        let (board, _) = board_with(&[(1, 1)]);
        let missing = GameId(99);
        assert!(matches!(board.get_position(missing), Err(CoreError::ObjectNotFound(GameId(99)))));
        assert!(board.move_object(missing, Position::new(0, 0)).is_err());
        assert!(board.allowed_moves(missing).is_err());
        assert!(board.fov_mask(missing, 3).is_err());
    }

    #[test]
    fn test_place_rejects_taken_cell() {
        let (board, _) = board_with(&[(1, 1)]);
        let result = board.place(GameId(5), Position::new(1, 1));
        assert!(matches!(result, Err(CoreError::CellOccupied(_))));
        assert!(board.place(GameId(5), Position::new(10, 0)).is_err());
    }

    #[test]
    fn test_move_returns_new_board() {
        let (board, ids) = board_with(&[(4, 4), (5, 5)]);

        let moved = board.move_object(ids[0], Position::new(4, 5)).unwrap();
        assert_eq!(moved.get_position(ids[0]).unwrap(), Position::new(4, 5));
        assert_eq!(board.get_position(ids[0]).unwrap(), Position::new(4, 4));
        assert!(moved.is_empty(Position::new(4, 4)));

        let blocked = board.move_object(ids[0], Position::new(5, 5)).unwrap();
        assert_eq!(blocked, board);
        let off_board = board.move_object(ids[1], Position::new(5, 10)).unwrap();
        assert_eq!(off_board, board);
    }

    #[test]
    fn test_allowed_moves() {
        let (board, ids) = board_with(&[(0, 0), (1, 0)]);
        let moves = board.allowed_moves(ids[0]).unwrap();
        assert_eq!(moves, vec![Position::new(0, 1), Position::new(1, 1)]);
    }

    #[test]
    fn test_fov_mask_matches_column_model() {
        let (board, ids) = board_with(&[(5, 5), (6, 5)]);
        let mask = board.fov_mask(ids[0], 4).unwrap();
        assert!(mask.contains(&Position::new(5, 5)));
        assert!(mask.contains(&Position::new(6, 4)));
        assert!(!mask.contains(&Position::new(7, 5)));

        let mut manager = Manager::new();
        manager.add(EntityBuilder::new().position(5, 5).vision());
        manager.add(EntityBuilder::new().position(6, 5));
        let expected = visibility_mask(Position::new(5, 5), 4, 10, |c| manager.is_occupied(c));
        assert_eq!(mask, expected);
    }

    #[test]
    fn test_from_manager_skips_unplaced() {
        let mut manager = Manager::new();
        manager.add(EntityBuilder::new().position(2, 3));
        manager.add(EntityBuilder::new().name("ghost"));
        manager.add(EntityBuilder::new().position(7, 7));

        let mut ids = IdGenerator::new();
        let (board, entities) = Board::from_manager(&manager, 10, &mut ids).unwrap();
        assert_eq!(board.objects().count(), 2);
        assert_eq!(entities.get(&GameId(1)), Some(&2));
        assert_eq!(board.get_position(GameId(0)).unwrap(), Position::new(2, 3));
    }
}
