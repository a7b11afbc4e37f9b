#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::consts::{DEFAULT_NOTE_COLOR, MAX_NOTE_TEXT_LEN};
use crate::repo::{JsonRepository, MemoryStorage};

// =============================================================
// Helpers
// =============================================================

type MemCore = BoardCore<JsonRepository<MemoryStorage>>;

fn small_notes() -> BoardConfig {
    BoardConfig { note_width: 200.0, note_height: 270.0, ..BoardConfig::default() }
}

fn core() -> MemCore {
    BoardCore::new(JsonRepository::new(MemoryStorage::new()), Size::new(1000.0, 800.0), small_notes())
}

fn created_id(actions: &[Action]) -> ItemId {
    match actions.first() {
        Some(Action::ItemCreated(item)) => item.id,
        other => panic!("expected ItemCreated, got {other:?}"),
    }
}

// =============================================================
// create_at
// =============================================================

#[test]
fn create_at_inserts_blank_note() {
    let mut core = core();
    let actions = core.create_at(Point::new(40.0, 60.0));
    assert_eq!(actions.len(), 1);
    let id = created_id(&actions);

    let item = core.store().get(&id).unwrap();
    assert_eq!(item.position, Point::new(40.0, 60.0));
    assert_eq!(item.size, Size::new(200.0, 270.0));
    let note = item.as_note().unwrap();
    assert_eq!(note.text, "");
    assert_eq!(note.background_color, DEFAULT_NOTE_COLOR);
}

#[test]
fn create_at_uses_configured_color() {
    let config = BoardConfig { default_color: "#ffeb3b".into(), ..BoardConfig::default() };
    let mut core = BoardCore::new(JsonRepository::new(MemoryStorage::new()), Size::new(1000.0, 800.0), config);
    let id = created_id(&core.create_at(Point::new(0.0, 0.0)));
    assert_eq!(core.store().get(&id).unwrap().as_note().unwrap().background_color, "#ffeb3b");
}

#[test]
fn create_at_adds_scroll_offset() {
    let mut core = core();
    core.set_scroll(Point::new(0.0, 500.0));
    let id = created_id(&core.create_at(Point::new(10.0, 20.0)));
    assert_eq!(core.store().get(&id).unwrap().position, Point::new(10.0, 520.0));
}

#[test]
fn create_near_edge_reports_resize() {
    let mut core = core();
    let actions = core.create_at(Point::new(900.0, 0.0));
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[1], Action::CanvasResized { width: 1200.0, height: 800.0 });
}

#[test]
fn created_ids_are_unique() {
    let mut core = core();
    let a = created_id(&core.create_at(Point::new(0.0, 0.0)));
    let b = created_id(&core.create_at(Point::new(0.0, 0.0)));
    assert_ne!(a, b);
    assert_eq!(core.store().len(), 2);
}

// =============================================================
// drag_release
// =============================================================

#[test]
fn drag_release_moves_note() {
    let mut core = core();
    let id = created_id(&core.create_at(Point::new(0.0, 0.0)));
    let actions = core.drag_release(&id, Point::new(300.0, 200.0));
    assert_eq!(actions, vec![Action::ItemMoved { id, position: Point::new(300.0, 200.0) }]);
}

#[test]
fn drag_release_reports_clamped_position() {
    let mut core = core();
    let id = created_id(&core.create_at(Point::new(50.0, 50.0)));
    let actions = core.drag_release(&id, Point::new(-30.0, 10.0));
    assert_eq!(actions, vec![Action::ItemMoved { id, position: Point::new(0.0, 10.0) }]);
}

#[test]
fn drag_release_past_edge_reports_resize() {
    let mut core = core();
    let id = created_id(&core.create_at(Point::new(0.0, 0.0)));
    let actions = core.drag_release(&id, Point::new(0.0, 700.0));
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[1], Action::CanvasResized { width: 1000.0, height: 1070.0 });
}

#[test]
fn drag_release_unknown_id_is_noop() {
    let mut core = core();
    assert!(core.drag_release(&Uuid::new_v4(), Point::new(1.0, 1.0)).is_empty());
}

// =============================================================
// delete / clear_all
// =============================================================

#[test]
fn delete_far_note_shrinks_canvas() {
    let mut core = core();
    core.create_at(Point::new(0.0, 0.0));
    let far = created_id(&core.create_at(Point::new(900.0, 0.0)));
    let actions = core.delete(&far);
    assert_eq!(
        actions,
        vec![Action::ItemDeleted { id: far }, Action::CanvasResized { width: 1000.0, height: 800.0 }]
    );
}

#[test]
fn delete_twice_second_is_noop() {
    let mut core = core();
    let id = created_id(&core.create_at(Point::new(0.0, 0.0)));
    assert_eq!(core.delete(&id), vec![Action::ItemDeleted { id }]);
    assert!(core.delete(&id).is_empty());
}

#[test]
fn clear_all_reports_cleared_and_resize() {
    let mut core = core();
    core.create_at(Point::new(900.0, 700.0));
    let actions = core.clear_all();
    assert_eq!(actions, vec![Action::Cleared, Action::CanvasResized { width: 1000.0, height: 800.0 }]);
    assert!(core.store().is_empty());
}

#[test]
fn clear_all_on_empty_board_is_noop() {
    let mut core = core();
    assert!(core.clear_all().is_empty());
}

// =============================================================
// set_text / set_color
// =============================================================

#[test]
fn set_text_updates_note() {
    let mut core = core();
    let id = created_id(&core.create_at(Point::new(0.0, 0.0)));
    assert_eq!(core.set_text(&id, "groceries"), vec![Action::ItemUpdated { id }]);
    assert_eq!(core.store().get(&id).unwrap().as_note().unwrap().text, "groceries");
}

#[test]
fn set_text_truncates_to_limit() {
    let mut core = core();
    let id = created_id(&core.create_at(Point::new(0.0, 0.0)));
    let long = "x".repeat(MAX_NOTE_TEXT_LEN + 50);
    core.set_text(&id, &long);
    let text = &core.store().get(&id).unwrap().as_note().unwrap().text;
    assert_eq!(text.chars().count(), MAX_NOTE_TEXT_LEN);
}

#[test]
fn set_color_invalid_is_noop() {
    let mut core = core();
    let id = created_id(&core.create_at(Point::new(0.0, 0.0)));
    assert!(core.set_color(&id, "chartreuse").is_empty());
    assert_eq!(core.set_color(&id, "#7fff00"), vec![Action::ItemUpdated { id }]);
}

#[test]
fn edits_on_unknown_id_are_noops() {
    let mut core = core();
    let ghost = Uuid::new_v4();
    assert!(core.set_text(&ghost, "x").is_empty());
    assert!(core.set_color(&ghost, "#000").is_empty());
}

// =============================================================
// set_viewport / config
// =============================================================

#[test]
fn set_viewport_larger_reports_resize() {
    let mut core = core();
    let actions = core.set_viewport(1600.0, 900.0);
    assert_eq!(actions, vec![Action::CanvasResized { width: 1600.0, height: 900.0 }]);
}

#[test]
fn set_viewport_smaller_reports_nothing() {
    let mut core = core();
    assert!(core.set_viewport(400.0, 300.0).is_empty());
    assert_eq!(core.store().viewport(), Size::new(400.0, 300.0));
}

#[test]
fn config_is_sanitized_on_construction() {
    let config = BoardConfig { note_width: 0.0, ..BoardConfig::default() };
    let core = BoardCore::new(JsonRepository::new(MemoryStorage::new()), Size::new(1000.0, 800.0), config);
    assert_eq!(core.config().note_size(), BoardConfig::default().note_size());
}

// =============================================================
// Persistence round trip
// =============================================================

#[test]
fn reopened_board_sees_prior_gestures() {
    let mut first = core();
    let id = created_id(&first.create_at(Point::new(900.0, 0.0)));
    first.set_text(&id, "persist me");
    let storage = first.store().repo().storage().clone();

    let second = BoardCore::new(JsonRepository::new(storage), Size::new(1000.0, 800.0), small_notes());
    let item = second.store().get(&id).unwrap();
    assert_eq!(item.as_note().unwrap().text, "persist me");
    assert_eq!(second.store().canvas_width(), 1200.0);
}

// =============================================================
// Action serde
// =============================================================

#[test]
fn action_serializes_with_type_tag() {
    let id = Uuid::nil();
    let value = serde_json::to_value(Action::ItemDeleted { id }).unwrap();
    assert_eq!(value, serde_json::json!({ "type": "item_deleted", "id": id.to_string() }));
    let value = serde_json::to_value(Action::Cleared).unwrap();
    assert_eq!(value, serde_json::json!({ "type": "cleared" }));
}
