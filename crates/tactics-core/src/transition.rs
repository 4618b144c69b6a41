//! State Transition
//!
//! Folds a system's events into a manager. Events are grouped by
//! (entity, kind); each group is applied as a left fold, in emission order,
//! starting from the slot's current value. Only the fold result is written.

use tactics_events::{Component, ComponentKind, Entity, Event, Position, Transform};
use tracing::trace;

use crate::config::Rules;
use crate::error::{CoreError, Result};
use crate::manager::Manager;

/// Applies one transform to a slot value.
///
/// `manager` is the snapshot being mutated; movement reads occupancy from it.
pub fn apply_transform(
    manager: &Manager,
    rules: &Rules,
    entity: Entity,
    kind: ComponentKind,
    transform: &Transform,
    previous: Option<Component>,
) -> Option<Component> {
    match transform {
        Transform::Move { dx, dy } => previous.map(|value| match value {
            Component::Position(from) => {
                Component::Position(move_position(manager, rules, entity, from, *dx, *dy))
            }
            other => other,
        }),
        Transform::AppendAction { action } => {
            let actions = previous
                .as_ref()
                .and_then(Component::as_actions)
                .cloned()
                .unwrap_or_default();
            Some(Component::Actions(actions.appended(*action)))
        }
        Transform::UnionFov { mask } => {
            let fov = previous
                .as_ref()
                .and_then(Component::as_fov)
                .cloned()
                .unwrap_or_default();
            Some(Component::Fov(fov.union(mask)))
        }
        Transform::ExtendPermitted { positions } => {
            let permitted = previous
                .as_ref()
                .and_then(Component::as_permitted_positions)
                .cloned()
                .unwrap_or_default();
            Some(Component::PermittedPositions(permitted.extended(positions)))
        }
        Transform::Clean => kind.empty_default(),
    }
}

/// Destination of a move, or `from` when it is off-board or taken by another entity.
fn move_position(
    manager: &Manager,
    rules: &Rules,
    entity: Entity,
    from: Position,
    dx: i32,
    dy: i32,
) -> Position {
    let to = Position::new(from.x + dx, from.y + dy);
    if !to.in_bounds(rules.board_size) {
        trace!(entity, %from, %to, "move blocked by board edge");
        return from;
    }
    match manager.occupant_at(to) {
        Some(occupant) if occupant != entity => {
            trace!(entity, occupant, %to, "move blocked by occupant");
            from
        }
        _ => to,
    }
}

/// Folds `events` into `manager`, returning the number of slots written.
pub fn apply_events(manager: &mut Manager, rules: &Rules, mut events: Vec<Event>) -> Result<usize> {
    for event in &events {
        validate(manager, event)?;
    }

    // Stable: events sharing a key keep their emission order.
    events.sort_by_key(Event::key);

    let mut written = 0;
    let mut start = 0;
    while start < events.len() {
        let key = events[start].key();
        let end = events[start..]
            .iter()
            .position(|event| event.key() != key)
            .map_or(events.len(), |offset| start + offset);

        let (entity, kind) = key;
        let mut value = manager.get(entity, kind).cloned();
        for event in &events[start..end] {
            value = apply_transform(manager, rules, entity, kind, &event.transform, value);
        }
        trace!(entity, %kind, folded = end - start, "slot updated");
        manager.set(entity, kind, value)?;

        written += 1;
        start = end;
    }

    Ok(written)
}

fn validate(manager: &Manager, event: &Event) -> Result<()> {
    if event.entity >= manager.len() {
        return Err(CoreError::EntityOutOfRange {
            entity: event.entity,
            count: manager.len(),
        });
    }
    match event.transform.target_kind() {
        Some(target) if target != event.kind => Err(CoreError::EventTarget {
            kind: event.kind,
            target,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::EntityBuilder;
    use tactics_events::{Action, Direction, Fov};

    fn rules(board_size: i32) -> Rules {
        Rules {
            board_size,
            ..Rules::default()
        }
    }

    fn single(x: i32, y: i32) -> Manager {
        let mut manager = Manager::new();
        manager.add(EntityBuilder::new().position(x, y).movable());
        manager
    }

    fn moved(manager: &Manager, rules: &Rules, dx: i32, dy: i32) -> Option<Position> {
        let previous = manager.get(0, ComponentKind::Position).cloned();
        apply_transform(
            manager,
            rules,
            0,
            ComponentKind::Position,
            &Transform::Move { dx, dy },
            previous,
        )
        .and_then(|c| c.as_position())
    }

    #[test]
    fn test_move_blocked_by_board_edge() {
        let manager = single(9, 9);
        assert_eq!(moved(&manager, &rules(10), 1, 1), Some(Position::new(9, 9)));
    }

    #[test]
    fn test_move_into_free_cell() {
        let manager = single(4, 4);
        assert_eq!(moved(&manager, &rules(10), 1, 1), Some(Position::new(5, 5)));
    }

    #[test]
    fn test_move_blocked_by_occupant() {
        let mut manager = single(4, 4);
        manager.add(EntityBuilder::new().position(5, 5).glyph('#'));
        assert_eq!(moved(&manager, &rules(10), 1, 1), Some(Position::new(4, 4)));
    }

    #[test]
    fn test_move_on_absent_position_stays_absent() {
        let mut manager = Manager::new();
        manager.add(EntityBuilder::new().movable());
        assert_eq!(moved(&manager, &rules(10), 1, 0), None);
    }

    #[test]
    fn test_fold_matches_sequential_application() {
        let mut manager = Manager::new();
        manager.add(EntityBuilder::new().position(0, 0));
        manager.add(EntityBuilder::new().position(0, 9));
        manager.add(EntityBuilder::new().position(2, 2));

        let events = vec![
            Event::move_by(2, 1, 0),
            Event::move_by(0, 1, 0),
            Event::move_by(2, 0, 1),
            Event::move_by(1, 1, 0),
            Event::move_by(2, 1, 1),
        ];

        let mut folded = manager.clone();
        apply_events(&mut folded, &rules(10), events).unwrap();

        let mut sequential = manager.clone();
        for (dx, dy) in [(1, 0), (0, 1), (1, 1)] {
            apply_events(&mut sequential, &rules(10), vec![Event::move_by(2, dx, dy)]).unwrap();
        }

        assert_eq!(folded.position(2), Some(Position::new(4, 4)));
        assert_eq!(folded.position(2), sequential.position(2));
        assert_eq!(folded.position(0), Some(Position::new(1, 0)));
        assert_eq!(folded.position(1), Some(Position::new(1, 9)));
    }

    #[test]
    fn test_fold_keeps_emission_order_per_slot() {
        let mut manager = single(0, 0);
        let events: Vec<_> = Direction::COMPASS
            .iter()
            .map(|&d| Event::append_action(0, Action::Move(d)))
            .collect();

        let written = apply_events(&mut manager, &rules(10), events).unwrap();

        assert_eq!(written, 1);
        let actions = manager.actions(0).unwrap();
        let expected: Vec<_> = Direction::COMPASS.iter().map(|&d| Action::Move(d)).collect();
        assert_eq!(actions.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_lower_entity_moves_first() {
        let mut manager = Manager::new();
        manager.add(EntityBuilder::new().position(4, 5));
        manager.add(EntityBuilder::new().position(6, 5));

        let events = vec![Event::move_by(1, -1, 0), Event::move_by(0, 1, 0)];
        apply_events(&mut manager, &rules(10), events).unwrap();

        assert_eq!(manager.position(0), Some(Position::new(5, 5)));
        assert_eq!(manager.position(1), Some(Position::new(6, 5)));
    }

    #[test]
    fn test_clean_resets_accumulators() {
        let mut manager = single(3, 3);
        let mask = [Position::new(3, 3)].into_iter().collect();
        apply_events(&mut manager, &rules(10), vec![Event::union_fov(0, mask)]).unwrap();
        assert_eq!(manager.fov(0).map(Fov::len), Some(1));

        apply_events(&mut manager, &rules(10), vec![Event::clean(0, ComponentKind::Fov)]).unwrap();
        assert_eq!(manager.fov(0), Some(&Fov::default()));
    }

    #[test]
    fn test_rejects_mismatched_event() {
        let mut manager = single(3, 3);
        let bad = Event::new(0, ComponentKind::Fov, Transform::Move { dx: 1, dy: 0 });
        let result = apply_events(&mut manager, &rules(10), vec![bad]);
        assert!(matches!(result, Err(CoreError::EventTarget { .. })));

        let result = apply_events(&mut manager, &rules(10), vec![Event::move_by(4, 1, 0)]);
        assert!(matches!(result, Err(CoreError::EntityOutOfRange { .. })));
    }
}
