//! Unit tests for the history module.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use bevy::math::Vec2;

use super::commands::{CommandKind, OperationCommand, Reversal};
use super::factory;
use super::reconciler::StateReconciler;
use super::timeline::{HistoryTimeline, ReplayHandler, ReplayState};
use crate::scene::{Element, ElementKind, ElementStyle, ElementTransform, LayerData, SceneSnapshot};

fn element(id: &str, layer_id: &str, x: f32, y: f32) -> Element {
    Element::new(id, ElementKind::Rectangle, layer_id, Vec2::new(x, y))
}

fn reconciler_with_layers(ids: &[&str]) -> StateReconciler {
    let mut reconciler = StateReconciler::new();
    reconciler.set_layers(ids.iter().map(|id| LayerData::new(*id, *id)).collect());
    reconciler.set_current_layer_id(ids.first().map(|id| id.to_string()));
    reconciler
}

/// Apply `command`, undo it and check the state came back, then redo and
/// check the applied state came back.
fn assert_round_trip(reconciler: &mut StateReconciler, command: &OperationCommand) {
    let before = reconciler.capture_snapshot();
    reconciler.execute_command(command);
    let applied = reconciler.capture_snapshot();
    assert_ne!(before, applied, "{} should change the scene", command.label());

    reconciler.undo_command(command);
    assert_eq!(reconciler.capture_snapshot(), before, "undo of {}", command.label());

    reconciler.redo_command(command);
    assert_eq!(reconciler.capture_snapshot(), applied, "redo of {}", command.label());
}

/// Replay handler that logs what the timeline asked of it
#[derive(Default)]
struct RecordingHandler {
    calls: Vec<String>,
    record_during_replay: bool,
    nested_undo: bool,
    nested_results: Vec<bool>,
}

impl RecordingHandler {
    fn try_reenter(&mut self, history: &mut HistoryTimeline) {
        if self.record_during_replay {
            let command = factory::copy_elements(&["side-effect".to_string()]);
            self.nested_results.push(history.record_command(command, "side effect"));
            self.nested_results
                .push(history.record_snapshot(&[], &BTreeSet::new(), "side snapshot"));
            history.clear();
        }
        if self.nested_undo {
            let mut inner = RecordingHandler::default();
            self.nested_results.push(history.undo(&mut inner));
            self.nested_results.push(history.redo(&mut inner));
        }
    }
}

impl ReplayHandler for RecordingHandler {
    fn replay_undo(&mut self, command: &OperationCommand, history: &mut HistoryTimeline) {
        assert_eq!(history.state(), ReplayState::Replaying);
        self.calls.push(format!("undo:{}", command.subject_ids().join(",")));
        self.try_reenter(history);
    }

    fn replay_redo(&mut self, command: &OperationCommand, history: &mut HistoryTimeline) {
        self.calls.push(format!("redo:{}", command.subject_ids().join(",")));
        self.try_reenter(history);
    }

    fn restore_state(&mut self, snapshot: &SceneSnapshot, history: &mut HistoryTimeline) {
        self.calls.push(format!("restore:{}", snapshot.element_count()));
        self.try_reenter(history);
    }
}

fn create(id: &str) -> OperationCommand {
    factory::create_element(&element(id, "l1", 0.0, 0.0), None, None)
}

// Command factory

#[test]
fn test_factory_deep_clones_inputs() {
    let mut original = element("e1", "l1", 1.0, 1.0)
        .with_data(serde_json::json!({ "nested": { "values": [1, 2, 3] } }));
    let command = factory::create_element(&original, None, None);

    original.position = Vec2::new(99.0, 99.0);
    original.data["nested"]["values"][0] = serde_json::json!(42);

    let CommandKind::CreateElement { element } = &command.kind else {
        panic!("unexpected kind");
    };
    assert_eq!(element.position, Vec2::new(1.0, 1.0));
    assert_eq!(element.data["nested"]["values"][0], serde_json::json!(1));
}

#[test]
fn test_factory_clones_captured_states() {
    let selected = BTreeSet::new();
    let mut before = SceneSnapshot::full(&[element("e1", "l1", 0.0, 0.0)], &[], &selected);
    let after = SceneSnapshot::full(&[element("e1", "l1", 5.0, 5.0)], &[], &selected);
    let command = factory::move_element(
        "e1",
        Vec2::ZERO,
        Vec2::new(5.0, 5.0),
        Some(&before),
        Some(&after),
    );

    before.elements = None;
    assert_eq!(command.before_snapshot().unwrap().element_count(), 1);
    assert!(command.uses_snapshots());
}

#[test]
fn test_factory_reversal_selection() {
    let state = SceneSnapshot::default();
    let both = factory::rename_layer("l1", "a", "b", Some(&state), Some(&state));
    let only_before = factory::rename_layer("l1", "a", "b", Some(&state), None);
    let neither = factory::rename_layer("l1", "a", "b", None, None);

    assert!(matches!(both.reversal, Reversal::Snapshot { .. }));
    assert_eq!(only_before.reversal, Reversal::Inverse);
    assert_eq!(neither.reversal, Reversal::Inverse);
    assert!(neither.after_snapshot().is_none());
}

#[test]
fn test_with_states_keeps_kind_and_timestamp() {
    let command = create("e1");
    let state = SceneSnapshot::default();
    let attached = factory::with_states(&command, Some(&state), Some(&state));
    assert_eq!(attached.kind, command.kind);
    assert_eq!(attached.timestamp, command.timestamp);
    assert!(attached.uses_snapshots());
}

#[test]
fn test_batch_subject_ids() {
    let batch = factory::batch(&[create("a"), create("b")], None, None);
    assert_eq!(batch.subject_ids(), vec!["a".to_string(), "b".to_string()]);
    assert_eq!(batch.label(), "Batch operation");
}

// History timeline

#[test]
fn test_new_timeline_has_bootstrap_snapshot() {
    let timeline = HistoryTimeline::default();
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline.current(), 0);
    assert!(!timeline.can_undo());
    assert!(!timeline.can_redo());

    let bootstrap = timeline.entries()[0].snapshot().unwrap();
    assert_eq!(bootstrap.element_count(), 0);
    assert!(bootstrap.layers.is_none());
}

#[test]
fn test_record_truncates_redo_history() {
    let mut timeline = HistoryTimeline::default();
    let mut handler = RecordingHandler::default();
    for id in ["a", "b", "c"] {
        assert!(timeline.record_command(create(id), id));
    }
    assert!(timeline.undo(&mut handler));
    assert!(timeline.undo(&mut handler));
    assert_eq!(timeline.current(), 1);
    assert!(timeline.can_redo());

    timeline.record_command(create("d"), "d");

    assert_eq!(timeline.len(), 3);
    assert_eq!(timeline.current(), 2);
    assert!(!timeline.can_redo());
    assert_eq!(timeline.entries()[2].description, "d");
}

#[test]
fn test_undo_redo_walk_entries() {
    let mut timeline = HistoryTimeline::default();
    let mut handler = RecordingHandler::default();
    timeline.record_command(create("a"), "add a");
    timeline.record_command(create("b"), "add b");

    assert_eq!(timeline.undo_description(), Some("add b"));
    assert!(timeline.undo(&mut handler));
    assert!(timeline.undo(&mut handler));
    assert_eq!(timeline.redo_description(), Some("add a"));
    assert!(timeline.redo(&mut handler));

    assert_eq!(handler.calls, vec!["undo:b", "undo:a", "redo:a"]);
    assert_eq!(timeline.current(), 1);
}

#[test]
fn test_boundaries_are_no_ops() {
    let mut timeline = HistoryTimeline::default();
    let mut handler = RecordingHandler::default();

    assert!(!timeline.undo(&mut handler));
    assert!(!timeline.redo(&mut handler));

    timeline.record_command(create("a"), "a");
    assert!(!timeline.redo(&mut handler));
    assert!(timeline.undo(&mut handler));
    assert!(!timeline.undo(&mut handler));

    assert_eq!(handler.calls, vec!["undo:a"]);
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline.current(), 0);
}

#[test]
fn test_recording_during_replay_is_dropped() {
    let mut timeline = HistoryTimeline::default();
    timeline.record_command(create("a"), "a");
    timeline.record_command(create("b"), "b");

    let mut handler = RecordingHandler {
        record_during_replay: true,
        ..Default::default()
    };

    assert!(timeline.undo(&mut handler));
    assert_eq!(timeline.len(), 3);
    assert_eq!(timeline.current(), 1);

    assert!(timeline.redo(&mut handler));
    assert_eq!(timeline.len(), 3);
    assert_eq!(timeline.current(), 2);

    assert!(handler.nested_results.iter().all(|recorded| !recorded));
    assert_eq!(timeline.state(), ReplayState::Idle);
}

#[test]
fn test_recording_during_snapshot_restore_is_dropped() {
    let mut timeline = HistoryTimeline::default();
    let elements = vec![element("a", "l1", 0.0, 0.0)];
    timeline.record_snapshot(&elements, &BTreeSet::new(), "snapshot");

    let mut handler = RecordingHandler {
        record_during_replay: true,
        ..Default::default()
    };
    // Undo over a snapshot entry has nothing to invert
    assert!(timeline.undo(&mut handler));
    assert!(handler.calls.is_empty());

    assert!(timeline.redo(&mut handler));
    assert_eq!(handler.calls, vec!["restore:1"]);
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline.current(), 1);
}

#[test]
fn test_nested_undo_is_rejected() {
    let mut timeline = HistoryTimeline::default();
    timeline.record_command(create("a"), "a");
    timeline.record_command(create("b"), "b");

    let mut handler = RecordingHandler {
        nested_undo: true,
        ..Default::default()
    };
    assert!(timeline.undo(&mut handler));

    assert_eq!(handler.nested_results, vec![false, false]);
    assert_eq!(timeline.current(), 1);
}

#[test]
fn test_history_cap_trims_oldest() {
    let mut timeline = HistoryTimeline::new(100);
    let mut handler = RecordingHandler::default();
    for i in 0..105 {
        timeline.record_command(create(&format!("e{}", i)), format!("step {}", i));
    }

    assert_eq!(timeline.len(), 100);
    assert_eq!(timeline.current(), 99);
    assert_eq!(timeline.entries()[0].description, "step 5");

    let mut undone = 0;
    while timeline.undo(&mut handler) {
        undone += 1;
    }
    assert_eq!(undone, 99);
    assert_eq!(timeline.current(), 0);
}

#[test]
fn test_trim_keeps_cursor_after_undo() {
    let mut timeline = HistoryTimeline::new(3);
    let mut handler = RecordingHandler::default();
    for id in ["a", "b", "c", "d"] {
        timeline.record_command(create(id), id);
    }
    assert_eq!(timeline.len(), 3);
    assert_eq!(timeline.current(), 2);

    timeline.undo(&mut handler);
    timeline.undo(&mut handler);
    timeline.record_command(create("e"), "e");

    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline.current(), 1);
}

#[test]
fn test_set_max_size_trims_immediately() {
    let mut timeline = HistoryTimeline::new(10);
    for id in ["a", "b", "c", "d"] {
        timeline.record_command(create(id), id);
    }
    timeline.set_max_size(2);
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline.current(), 1);
    assert_eq!(timeline.max_size(), 2);

    timeline.set_max_size(0);
    assert_eq!(timeline.max_size(), 1);
    assert_eq!(timeline.current(), 0);
}

#[test]
fn test_history_listener_receives_flags() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();

    let mut timeline = HistoryTimeline::default();
    let mut handler = RecordingHandler::default();
    timeline.add_history_listener(move |can_undo, can_redo| {
        sink.lock().unwrap().push((can_undo, can_redo));
    });

    timeline.record_command(create("a"), "a");
    timeline.undo(&mut handler);
    timeline.redo(&mut handler);
    timeline.clear();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![(true, false), (false, true), (true, false), (false, false)]
    );
}

#[test]
fn test_clear_resets_to_bootstrap() {
    let mut timeline = HistoryTimeline::default();
    timeline.record_command(create("a"), "a");
    timeline.record_command(create("b"), "b");

    timeline.clear();

    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline.current(), 0);
    assert!(timeline.entries()[0].snapshot().is_some());
}

#[test]
fn test_jump_to() {
    let mut timeline = HistoryTimeline::default();
    let mut handler = RecordingHandler::default();
    for id in ["a", "b", "c"] {
        timeline.record_command(create(id), id);
    }

    assert!(timeline.jump_to(1, &mut handler));
    assert_eq!(timeline.current(), 1);
    assert!(timeline.jump_to(3, &mut handler));
    assert!(!timeline.jump_to(9, &mut handler));
    assert_eq!(handler.calls, vec!["undo:c", "undo:b", "redo:b", "redo:c"]);
}

// State reconciler

#[test]
fn test_element_kinds_invert_exactly() {
    let mut reconciler = reconciler_with_layers(&["l1"]);
    reconciler.execute_command(&create("base"));
    reconciler.execute_command(&create("target"));

    let target = reconciler.find_element("target").unwrap().clone();
    let new_style = ElementStyle {
        stroke_color: [1.0, 0.0, 0.0, 1.0],
        fill_color: Some([0.0, 1.0, 0.0, 0.5]),
        ..ElementStyle::default()
    };
    let new_transform = ElementTransform {
        rotation: 1.5,
        ..ElementTransform::default()
    };

    let selected = BTreeSet::from(["base".to_string(), "target".to_string()]);
    let commands = [
        create("fresh"),
        factory::delete_element(&target, &selected, None, None),
        factory::move_element("target", target.position, Vec2::new(50.0, 50.0), None, None),
        factory::transform_element("target", target.transform, new_transform, None, None),
        factory::update_style("target", &target.style, &new_style, None, None),
        factory::paste_elements(&[element("pasted", "l1", 3.0, 3.0)], &selected, None, None),
    ];
    for command in &commands {
        let mut scratch = reconciler_with_layers(&["l1"]);
        scratch.set_elements(reconciler.elements().to_vec());
        scratch.set_layers(reconciler.layers().to_vec());
        scratch.set_selected_elements(selected.iter().cloned());
        assert_round_trip(&mut scratch, command);
    }
}

#[test]
fn test_layer_kinds_invert_exactly() {
    let mut reconciler = reconciler_with_layers(&["l1", "l2", "l3"]);
    let e1 = element("e1", "l2", 0.0, 0.0);
    reconciler.execute_command(&factory::create_element(&e1, None, None));
    let l2 = reconciler.find_layer("l2").unwrap().clone();
    let l2_elements = reconciler.elements().to_vec();
    let selected = BTreeSet::from(["e1".to_string()]);

    let mut duplicate = l2.clone();
    duplicate.id = "l2-copy".into();
    duplicate.element_ids = vec!["e1-copy".into()];
    let duplicate_element = element("e1-copy", "l2-copy", 0.0, 0.0);

    let commands = [
        factory::create_layer(&LayerData::new("l4", "Four"), None, None),
        factory::delete_layer(&l2, 1, &l2_elements, &selected, None, None),
        factory::rename_layer("l2", "l2", "Renamed", None, None),
        factory::toggle_layer_visibility("l2", true, false, None, None),
        factory::toggle_layer_lock("l2", false, true, None, None),
        factory::move_layer("l1", 0, 2, None, None),
        factory::set_layer_color("l3", None, Some([0.1, 0.2, 0.3, 1.0]), None, None),
        factory::duplicate_layer("l2", &duplicate, &[duplicate_element], None, None),
    ];
    for command in &commands {
        let mut scratch = StateReconciler::new();
        scratch.set_layers(reconciler.layers().to_vec());
        scratch.set_elements(reconciler.elements().to_vec());
        scratch.set_selected_elements(selected.iter().cloned());
        assert_round_trip(&mut scratch, command);
    }
}

#[test]
fn test_batch_undo_runs_in_reverse_order() {
    let mut reconciler = reconciler_with_layers(&["l1"]);
    reconciler.execute_command(&create("e1"));

    let positions = Arc::new(Mutex::new(Vec::new()));
    let sink = positions.clone();
    reconciler
        .callbacks_mut()
        .on_element_update(move |element| sink.lock().unwrap().push(element.position.x));

    let steps = [
        factory::move_element("e1", Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), None, None),
        factory::move_element("e1", Vec2::new(10.0, 0.0), Vec2::new(20.0, 0.0), None, None),
        factory::move_element("e1", Vec2::new(20.0, 0.0), Vec2::new(30.0, 0.0), None, None),
    ];
    let batch = factory::batch(&steps, None, None);

    reconciler.execute_command(&batch);
    reconciler.undo_command(&batch);
    assert_eq!(reconciler.find_element("e1").unwrap().position, Vec2::ZERO);
    reconciler.redo_command(&batch);
    assert_eq!(reconciler.find_element("e1").unwrap().position.x, 30.0);

    assert_eq!(
        *positions.lock().unwrap(),
        vec![10.0, 20.0, 30.0, 20.0, 10.0, 0.0, 10.0, 20.0, 30.0]
    );
}

#[test]
fn test_snapshot_undo_restores_whole_state() {
    let mut reconciler = reconciler_with_layers(&["l1"]);
    reconciler.execute_command(&create("e1"));
    reconciler.execute_command(&create("e2"));
    reconciler.set_selected_elements(["e1"]);

    let before = reconciler.capture_snapshot();
    let plain = factory::move_element("e1", Vec2::ZERO, Vec2::new(50.0, 50.0), None, None);
    reconciler.execute_command(&plain);
    let after = reconciler.capture_snapshot();
    let command = factory::with_states(&plain, Some(&before), Some(&after));

    // Unrelated edits after capture are also rolled back
    reconciler.execute_command(&factory::move_element(
        "e2",
        Vec2::ZERO,
        Vec2::new(7.0, 7.0),
        None,
        None,
    ));
    reconciler.set_selected_elements(Vec::<String>::new());

    reconciler.undo_command(&command);
    assert_eq!(reconciler.capture_snapshot(), before);

    reconciler.redo_command(&command);
    assert_eq!(reconciler.capture_snapshot(), after);
}

#[test]
fn test_partial_snapshot_restores_only_present_parts() {
    let mut reconciler = reconciler_with_layers(&["l1"]);
    reconciler.execute_command(&create("e1"));
    let elements = reconciler.elements().to_vec();
    let layers = reconciler.layers().to_vec();

    let snapshot: SceneSnapshot = serde_json::from_str(r#"{"selected_ids":["e1"]}"#).unwrap();
    reconciler.restore_snapshot(&snapshot);

    assert_eq!(reconciler.elements(), elements.as_slice());
    assert_eq!(reconciler.layers(), layers.as_slice());
    assert!(reconciler.selected_ids().contains("e1"));
}

#[test]
fn test_missing_subjects_are_no_ops() {
    let mut reconciler = reconciler_with_layers(&["l1"]);
    reconciler.execute_command(&create("e1"));
    let before = reconciler.capture_snapshot();

    reconciler.execute_command(&factory::move_element("ghost", Vec2::ZERO, Vec2::ONE, None, None));
    reconciler.execute_command(&factory::rename_layer("ghost", "a", "b", None, None));
    reconciler.undo_command(&create("ghost"));
    assert_eq!(reconciler.capture_snapshot(), before);

    // A batch with a missing subject still applies the rest
    let batch = factory::batch(
        &[
            factory::move_element("ghost", Vec2::ZERO, Vec2::ONE, None, None),
            factory::move_element("e1", Vec2::ZERO, Vec2::new(4.0, 4.0), None, None),
        ],
        None,
        None,
    );
    reconciler.execute_command(&batch);
    assert_eq!(reconciler.find_element("e1").unwrap().position, Vec2::new(4.0, 4.0));
}

#[test]
fn test_delete_removes_selection_and_membership() {
    let mut reconciler = reconciler_with_layers(&["l1"]);
    reconciler.execute_command(&create("e1"));
    reconciler.set_selected_elements(["e1"]);
    assert!(reconciler.find_layer("l1").unwrap().contains("e1"));

    let e1 = reconciler.find_element("e1").unwrap().clone();
    let command = factory::delete_element(&e1, reconciler.selected_ids(), None, None);
    reconciler.execute_command(&command);

    assert!(reconciler.selected_ids().is_empty());
    assert!(!reconciler.find_layer("l1").unwrap().contains("e1"));

    reconciler.undo_command(&command);
    assert_eq!(reconciler.find_element("e1"), Some(&e1));
    assert!(reconciler.find_layer("l1").unwrap().contains("e1"));
    assert!(reconciler.selected_ids().contains("e1"));
}

#[test]
fn test_delete_current_layer_falls_back() {
    let mut reconciler = reconciler_with_layers(&["l1", "l2"]);
    reconciler.set_current_layer_id(Some("l2".into()));
    reconciler.execute_command(&factory::create_element(
        &element("e1", "l2", 0.0, 0.0),
        None,
        None,
    ));

    let l2 = reconciler.find_layer("l2").unwrap().clone();
    let members = reconciler.elements().to_vec();
    let selected = BTreeSet::new();
    reconciler.execute_command(&factory::delete_layer(&l2, 1, &members, &selected, None, None));

    assert_eq!(reconciler.current_layer_id(), Some("l1"));
    assert!(reconciler.elements().is_empty());
}

#[test]
fn test_create_layer_becomes_current() {
    let mut reconciler = reconciler_with_layers(&["l1"]);
    let command = factory::create_layer(&LayerData::new("l2", "Two"), None, None);

    reconciler.execute_command(&command);
    assert_eq!(reconciler.current_layer_id(), Some("l2"));
    assert_eq!(reconciler.find_layer("l2").unwrap().order, 1);

    reconciler.undo_command(&command);
    assert_eq!(reconciler.current_layer_id(), Some("l1"));
}

#[test]
fn test_copy_leaves_scene_unchanged() {
    let mut reconciler = reconciler_with_layers(&["l1"]);
    reconciler.execute_command(&create("e1"));
    let before = reconciler.capture_snapshot();

    let command = factory::copy_elements(&["e1".to_string()]);
    reconciler.execute_command(&command);
    reconciler.undo_command(&command);
    assert_eq!(reconciler.capture_snapshot(), before);
}

#[test]
fn test_callbacks_report_changes() {
    let log = Arc::new(Mutex::new(Vec::<String>::new()));
    let mut reconciler = reconciler_with_layers(&["l1"]);

    let callbacks = reconciler.callbacks_mut();
    let sink = log.clone();
    callbacks.on_element_create(move |element| {
        sink.lock().unwrap().push(format!("create {}", element.id))
    });
    let sink = log.clone();
    callbacks.on_element_delete(move |id| sink.lock().unwrap().push(format!("delete {}", id)));
    let sink = log.clone();
    callbacks.on_thumbnail_update(move |layer| {
        sink.lock().unwrap().push(format!("thumb {}", layer))
    });
    let sink = log.clone();
    callbacks.on_layer_create(move |layer| {
        sink.lock().unwrap().push(format!("layer+ {}", layer.id))
    });
    let sink = log.clone();
    callbacks.on_layer_delete(move |id| sink.lock().unwrap().push(format!("layer- {}", id)));
    let sink = log.clone();
    callbacks.on_layer_highlight(move |id| sink.lock().unwrap().push(format!("highlight {}", id)));
    let sink = log.clone();
    callbacks.on_current_layer_change(move |id| {
        sink.lock().unwrap().push(format!("current {}", id.unwrap_or("-")))
    });

    let create_e1 = create("e1");
    reconciler.execute_command(&create_e1);
    reconciler.undo_command(&create_e1);
    let layer = factory::create_layer(&LayerData::new("l2", "Two"), None, None);
    reconciler.execute_command(&layer);
    reconciler.execute_command(&factory::rename_layer("l2", "Two", "2", None, None));
    reconciler.undo_command(&layer);

    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "create e1",
            "thumb l1",
            "delete e1",
            "thumb l1",
            "layer+ l2",
            "current l2",
            "highlight l2",
            "layer- l2",
            "current l1",
        ]
    );
}

#[test]
fn test_inverse_undo_restores_prior_selection() {
    let mut reconciler = reconciler_with_layers(&["l1"]);
    reconciler.execute_command(&create("e1"));
    reconciler.execute_command(&create("e2"));
    reconciler.set_selected_elements(["e1", "e2"]);
    let selected = reconciler.selected_ids().clone();

    let e1 = reconciler.find_element("e1").unwrap().clone();
    let delete = factory::delete_element(&e1, &selected, None, None);
    reconciler.execute_command(&delete);
    assert_eq!(reconciler.selected_ids(), &BTreeSet::from(["e2".to_string()]));
    reconciler.undo_command(&delete);
    assert_eq!(reconciler.selected_ids(), &selected);

    let paste = factory::paste_elements(&[element("p1", "l1", 1.0, 1.0)], &selected, None, None);
    reconciler.execute_command(&paste);
    assert_eq!(reconciler.selected_ids(), &BTreeSet::from(["p1".to_string()]));
    reconciler.undo_command(&paste);
    assert_eq!(reconciler.selected_ids(), &selected);
}

#[test]
fn test_captured_redo_of_new_layer_makes_it_current() {
    let mut reconciler = reconciler_with_layers(&["l1"]);
    let before = reconciler.capture_snapshot();
    let plain = factory::create_layer(&LayerData::new("l2", "Two"), None, None);
    reconciler.execute_command(&plain);
    let after = reconciler.capture_snapshot();
    let command = factory::with_states(&plain, Some(&before), Some(&after));

    reconciler.undo_command(&command);
    assert_eq!(reconciler.current_layer_id(), Some("l1"));

    reconciler.redo_command(&command);
    assert_eq!(reconciler.current_layer_id(), Some("l2"));
}
