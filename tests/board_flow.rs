//! End-to-end flows through the public library API: a gesture or keyboard
//! command becomes a request, the store commits it, and the dispatcher turns
//! the commit notice into effects against the identity registry.

use menuboard::core::destination::{Axis, Edge};
use menuboard::core::effects::{Effect, EffectDispatcher};
use menuboard::core::error::BoardError;
use menuboard::core::gesture::{Gesture, GestureKind, ItemCommand, item_command, resolve_drop};
use menuboard::core::outcome::{Outcome, Trigger};
use menuboard::core::registry::{ContainerEntry, Handle, IdentityRegistry, ItemEntry, Registration};
use menuboard::core::seed;
use menuboard::core::state::BoardState;
use menuboard::core::store::BoardStore;

fn ids(state: &BoardState, container_id: &str) -> Vec<String> {
    state
        .container(container_id)
        .unwrap()
        .items
        .iter()
        .map(|item| item.id.clone())
        .collect()
}

/// Registers every entity; item `id:n` gets element `n` and trigger `1000 + n`,
/// containers get `500 +` their position.
fn mount(state: &BoardState, registry: &IdentityRegistry) -> Vec<Registration> {
    let mut guards = Vec::new();
    for (position, container) in state.containers().enumerate() {
        guards.push(registry.register_container(
            &container.id,
            ContainerEntry {
                element: Handle(500 + position as u64),
            },
        ));
        for item in &container.items {
            let n: u64 = item.id.trim_start_matches("id:").parse().unwrap();
            guards.push(registry.register_item(
                &item.id,
                ItemEntry {
                    element: Handle(n),
                    action_trigger: Handle(1000 + n),
                },
            ));
        }
    }
    guards
}

#[test]
fn test_pointer_drop_flows_to_highlight() {
    let mut store = BoardStore::new(seed::generated_board(3, 4));
    let commits = store.subscribe();
    let registry = IdentityRegistry::new();
    let _mounted = mount(store.state(), &registry);
    let mut dispatcher = EffectDispatcher::new();

    // id:2 dropped on the bottom half of id:7 in card-1
    let gesture = Gesture {
        kind: GestureKind::Item,
        source_id: "id:2".to_string(),
        source_container_id: Some("card-0".to_string()),
        target_container_id: Some("card-1".to_string()),
        target_item_id: Some("id:7".to_string()),
        edge: Some(Edge::After),
        axis: Axis::Vertical,
    };
    let request = resolve_drop(store.state(), &gesture).unwrap().unwrap();
    let operation = store.apply(&request).unwrap().unwrap();

    assert_eq!(
        operation.outcome,
        Outcome::ItemMove {
            finish_container_id: "card-1".to_string(),
            start_item_index: 1,
            finish_item_index: 3,
        }
    );
    assert_eq!(ids(store.state(), "card-1"), ["id:5", "id:6", "id:7", "id:2", "id:8"]);
    assert_eq!(ids(store.state(), "card-0"), ["id:1", "id:3", "id:4"]);

    let notice = commits.try_recv().unwrap();
    let effects = dispatcher.dispatch(&notice.state, &registry);
    assert_eq!(effects, [Effect::Highlight { handle: Handle(2) }]);
}

#[test]
fn test_keyboard_reorder_announces_in_place() {
    let mut store = BoardStore::new(seed::basic_board());
    let commits = store.subscribe();
    let registry = IdentityRegistry::new();
    let _mounted = mount(store.state(), &registry);
    let mut dispatcher = EffectDispatcher::new();

    let request = item_command(store.state(), "id:6", &ItemCommand::MoveToTop)
        .unwrap()
        .unwrap();
    store.apply(&request).unwrap();
    assert_eq!(ids(store.state(), "services"), ["id:6", "id:5"]);

    let notice = commits.try_recv().unwrap();
    let effects = dispatcher.dispatch(&notice.state, &registry);
    assert_eq!(
        effects,
        [
            Effect::Highlight { handle: Handle(6) },
            Effect::Announce {
                text: "You've moved Blair from position 2 to position 1 of 2 in the Services menu-card."
                    .to_string(),
            },
        ]
    );
}

#[test]
fn test_keyboard_move_restores_focus_to_remounted_card() {
    let mut store = BoardStore::new(seed::basic_board());
    let commits = store.subscribe();
    let registry = IdentityRegistry::new();
    let old_mounts = mount(store.state(), &registry);
    let mut dispatcher = EffectDispatcher::new();

    let request = item_command(store.state(), "id:3", &ItemCommand::MoveTo("about".to_string()))
        .unwrap()
        .unwrap();
    store.apply(&request).unwrap();
    assert_eq!(ids(store.state(), "about"), ["id:3", "id:1", "id:2"]);

    // the moved card remounts before the old mount is torn down
    let remounted = registry.register_item(
        "id:3",
        ItemEntry {
            element: Handle(77),
            action_trigger: Handle(78),
        },
    );
    drop(old_mounts);
    assert_eq!(registry.item("id:3").unwrap().element, Handle(77));

    let notice = commits.try_recv().unwrap();
    let effects = dispatcher.dispatch(&notice.state, &registry);
    assert_eq!(effects.len(), 3);
    assert_eq!(effects[0], Effect::Highlight { handle: Handle(77) });
    assert_eq!(effects[2], Effect::Focus { handle: Handle(78) });
    drop(remounted);
}

#[test]
fn test_disabled_and_rejected_requests_publish_nothing() {
    let mut store = BoardStore::new(seed::basic_board());
    let commits = store.subscribe();

    assert_eq!(item_command(store.state(), "id:1", &ItemCommand::MoveUp), Ok(None));

    let missing = Gesture {
        kind: GestureKind::Item,
        source_id: "id:99".to_string(),
        source_container_id: None,
        target_container_id: Some("about".to_string()),
        target_item_id: None,
        edge: None,
        axis: Axis::Vertical,
    };
    assert_eq!(
        resolve_drop(store.state(), &missing),
        Err(BoardError::UnknownItem("id:99".to_string()))
    );

    let discarded = Gesture {
        target_container_id: None,
        ..missing
    };
    assert_eq!(resolve_drop(store.state(), &discarded), Ok(None));
    assert!(commits.try_recv().is_err());
}

#[test]
fn test_container_reorder_round_trip_restores_order() {
    let mut store = BoardStore::new(seed::basic_board());
    let original = store.state().ordered_container_ids().to_vec();

    for (start, finish) in [(0, 2), (2, 0)] {
        let gesture_target = store.state().ordered_container_ids()[finish].clone();
        let source = store.state().ordered_container_ids()[start].clone();
        let edge = if finish > start { Edge::After } else { Edge::Before };
        let gesture = Gesture {
            kind: GestureKind::Container,
            source_id: source,
            source_container_id: None,
            target_container_id: Some(gesture_target),
            target_item_id: None,
            edge: Some(edge),
            axis: Axis::Horizontal,
        };
        let request = resolve_drop(store.state(), &gesture).unwrap().unwrap();
        let operation = store.apply(&request).unwrap().unwrap();
        assert_eq!(operation.trigger, Trigger::Pointer);
    }

    assert_eq!(store.state().ordered_container_ids(), original);
    assert_eq!(store.state().revision(), 2);
    assert!(store.state().is_consistent());
}
