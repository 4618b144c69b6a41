//! User Control
//!
//! Reads one command per controlled entity and turns it into a move.
//! Keys follow the screen: `w` is up, so y decreases.

use tactics_events::{ComponentKind, Direction, Event};
use tracing::debug;

use super::{System, SystemKind};
use crate::collab::Collaborators;
use crate::config::Rules;
use crate::error::{CoreError, Result};
use crate::manager::Manager;

/// Maps a command key to its direction.
pub fn parse_key(key: &str) -> Result<Direction> {
    let (dx, dy) = match key.trim() {
        "w" => (0, -1),
        "a" => (-1, 0),
        "s" => (0, 1),
        "d" => (1, 0),
        "wa" => (-1, -1),
        "wd" => (1, -1),
        "sa" => (-1, 1),
        "sd" => (1, 1),
        other => return Err(CoreError::UnknownKey(other.to_string())),
    };
    Ok(Direction::new(dx, dy))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UserControlSystem;

impl System for UserControlSystem {
    fn kind(&self) -> SystemKind {
        SystemKind::UserControl
    }

    fn process(
        &self,
        manager: &Manager,
        _rules: &Rules,
        collab: &mut Collaborators,
    ) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        for entity in manager.filter(&[ComponentKind::UnderUserControl, ComponentKind::Movable]) {
            let line = collab.input.read_line()?.ok_or(CoreError::InputClosed)?;
            let direction = parse_key(&line)?;
            debug!(entity, %direction, "user command");
            events.push(Event::move_in(entity, direction));
        }
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::ScriptedInput;
    use crate::manager::EntityBuilder;
    use crate::transition::apply_events;
    use tactics_events::Position;

    fn controlled(x: i32, y: i32) -> Manager {
        let mut manager = Manager::new();
        manager.add(EntityBuilder::new().position(x, y).movable().user_control());
        manager
    }

    #[test]
    fn test_parse_all_keys() {
        let expected = [
            ("w", (0, -1)),
            ("a", (-1, 0)),
            ("s", (0, 1)),
            ("d", (1, 0)),
            ("wa", (-1, -1)),
            ("wd", (1, -1)),
            ("sa", (-1, 1)),
            ("sd", (1, 1)),
        ];
        for (key, (dx, dy)) in expected {
            assert_eq!(parse_key(key).unwrap(), Direction::new(dx, dy), "{}", key);
        }
        assert_eq!(parse_key(" sd \n").unwrap(), Direction::new(1, 1));
    }

    #[test]
    fn test_unknown_key_is_fatal() {
        assert!(matches!(parse_key("q"), Err(CoreError::UnknownKey(k)) if k == "q"));
        assert!(matches!(parse_key("ds"), Err(CoreError::UnknownKey(_))));
        assert!(matches!(parse_key(""), Err(CoreError::UnknownKey(_))));
    }

    #[test]
    fn test_command_moves_entity() {
        let rules = Rules::default();
        let mut manager = controlled(5, 5);
        let mut collab = Collaborators::headless(0, ScriptedInput::new(["wd"]));

        let events = UserControlSystem.process(&manager, &rules, &mut collab).unwrap();
        apply_events(&mut manager, &rules, events).unwrap();
        assert_eq!(manager.position(0), Some(Position::new(6, 4)));
    }

    #[test]
    fn test_closed_input_is_fatal() {
        let manager = controlled(5, 5);
        let mut collab = Collaborators::headless(0, ScriptedInput::default());
        let result = UserControlSystem.process(&manager, &Rules::default(), &mut collab);
        assert!(matches!(result, Err(CoreError::InputClosed)));
    }

    #[test]
    fn test_uncontrolled_entities_read_nothing() {
        let mut manager = Manager::new();
        manager.add(EntityBuilder::new().position(1, 1).movable());
        manager.add(EntityBuilder::new().position(2, 2).user_control());

        let mut collab = Collaborators::headless(0, ScriptedInput::default());
        let events = UserControlSystem
            .process(&manager, &Rules::default(), &mut collab)
            .unwrap();
        assert!(events.is_empty());
    }
}
