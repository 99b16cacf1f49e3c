use eframe::egui;

use super::palette::PALETTE_ITEMS;
use super::state::{DesignerApp, Gesture};
use crate::geometry::{clamp_position_within_stage, visual_padding, Bounds};
use crate::types::{Element, ElementType};

const STAGE_WIDTH: f32 = 800.0;
const STAGE_HEIGHT: f32 = 600.0;

/// App with a fixed 800x600 stage, the size used throughout these tests.
fn test_app() -> DesignerApp {
    let mut app = DesignerApp::default();
    app.stage.size = egui::vec2(STAGE_WIDTH, STAGE_HEIGHT);
    app
}

/// Places an element directly in the store, bypassing the palette.
fn place(
    app: &mut DesignerApp,
    element_type: ElementType,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
) -> crate::types::ElementId {
    app.design.add_element(Element::new(element_type, x, y, width, height))
}

fn stage_bounds() -> Bounds {
    Bounds { min_x: 0.0, max_x: STAGE_WIDTH, min_y: 0.0, max_y: STAGE_HEIGHT }
}

fn assert_all_contained(app: &DesignerApp) {
    for element in &app.design.elements {
        let bounds = DesignerApp::bounds_of(element);
        assert!(
            bounds.contained_in(&stage_bounds()),
            "element {:?} at {bounds:?} escaped the stage",
            element.element_type
        );
    }
}

fn palette_item(id: &str) -> super::palette::PaletteItem {
    *PALETTE_ITEMS.iter().find(|item| item.id == id).unwrap()
}

// --- Palette drops ---

#[test]
fn dropping_round_table_centers_it_on_the_drop_point() {
    let mut app = test_app();
    let id = app.drop_palette_item(&palette_item("round-table"), egui::pos2(400.0, 300.0));

    let element = app.design.element(&id).unwrap();
    assert_eq!(element.width, 96.0);
    assert_eq!(element.height, 96.0);
    assert_eq!(element.size, 96.0);
    assert_eq!(element.capacity, Some(10));
    let (cx, cy) = element.center();
    assert!((cx - 400.0).abs() < 1e-3);
    assert!((cy - 300.0).abs() < 1e-3);
    assert_all_contained(&app);
}

#[test]
fn dropping_near_the_edge_clamps_into_the_stage() {
    let mut app = test_app();
    let id = app.drop_palette_item(&palette_item("round-table"), egui::pos2(795.0, 5.0));

    let element = app.design.element(&id).unwrap();
    let padding = visual_padding(element.element_type, element.width, element.height);
    let (expected_x, expected_y) = clamp_position_within_stage(
        795.0 - 48.0,
        5.0 - 48.0,
        96.0,
        96.0,
        0.0,
        padding,
        STAGE_WIDTH,
        STAGE_HEIGHT,
    );
    assert!((element.x - expected_x).abs() < 1e-3);
    assert!((element.y - expected_y).abs() < 1e-3);
    assert_all_contained(&app);
}

#[test]
fn dropped_bar_uses_its_elongated_footprint() {
    let mut app = test_app();
    let id = app.drop_palette_item(&palette_item("bar"), egui::pos2(400.0, 300.0));

    let element = app.design.element(&id).unwrap();
    assert!((element.width - 96.0 * 1.4).abs() < 1e-3);
    assert!((element.height - 96.0 * 0.6).abs() < 1e-3);
    assert!((element.size - element.width).abs() < 1e-3);
}

// --- Selection ---

#[test]
fn plain_click_replaces_selection_and_shift_click_toggles() {
    let mut app = test_app();
    let a = place(&mut app, ElementType::Restrooms, 100.0, 100.0, 96.0, 96.0);
    let b = place(&mut app, ElementType::Restrooms, 600.0, 400.0, 96.0, 96.0);

    app.pointer_pressed(egui::pos2(148.0, 148.0), false);
    app.pointer_released(Some(egui::pos2(148.0, 148.0)), false);
    assert_eq!(app.interaction.selected_ids, vec![a]);

    app.pointer_pressed(egui::pos2(648.0, 448.0), true);
    app.pointer_released(Some(egui::pos2(648.0, 448.0)), true);
    assert_eq!(app.interaction.selected_ids, vec![a, b]);
}

#[test]
fn clicking_empty_stage_clears_selection_unless_shift_held() {
    let mut app = test_app();
    let a = place(&mut app, ElementType::Restrooms, 100.0, 100.0, 96.0, 96.0);
    app.select_element(a, false);

    // Shift-press on empty space preserves the selection.
    app.pointer_pressed(egui::pos2(700.0, 500.0), true);
    app.pointer_released(Some(egui::pos2(700.0, 500.0)), true);
    assert_eq!(app.interaction.selected_ids, vec![a]);

    // A plain press clears it immediately.
    app.pointer_pressed(egui::pos2(700.0, 500.0), false);
    assert!(app.interaction.selected_ids.is_empty());
    app.pointer_released(Some(egui::pos2(700.0, 500.0)), false);
    assert!(app.interaction.selected_ids.is_empty());
}

#[test]
fn topmost_element_wins_the_hit_test() {
    let mut app = test_app();
    let _below = place(&mut app, ElementType::Restrooms, 100.0, 100.0, 96.0, 96.0);
    let above = place(&mut app, ElementType::Kitchen, 120.0, 120.0, 96.0, 96.0);

    assert_eq!(app.element_at(egui::pos2(150.0, 150.0)), Some(above));
}

#[test]
fn hit_testing_respects_rotation() {
    let mut app = test_app();
    let id = place(&mut app, ElementType::Restrooms, 300.0, 200.0, 200.0, 60.0);
    app.design.update_element(
        &id,
        crate::types::ElementUpdate { rotation: Some(90.0), ..Default::default() },
    );

    // The unrotated box would contain this point; the rotated one does not.
    let element = app.design.element(&id).unwrap();
    let (cx, cy) = element.center();
    assert_eq!(app.element_at(egui::pos2(cx + 90.0, cy)), None);
    // Along the rotated long axis instead.
    assert_eq!(app.element_at(egui::pos2(cx, cy + 90.0)), Some(id));
}

// --- Rubber-band selection ---

#[test]
fn rubber_band_selects_only_fully_contained_elements() {
    let mut app = test_app();
    let inside = place(&mut app, ElementType::Restrooms, 100.0, 100.0, 96.0, 96.0);
    let _outside = place(&mut app, ElementType::Restrooms, 400.0, 300.0, 96.0, 96.0);
    let _partial = place(&mut app, ElementType::Restrooms, 180.0, 180.0, 96.0, 96.0);

    app.pointer_pressed(egui::pos2(50.0, 50.0), false);
    app.pointer_moved(egui::pos2(250.0, 250.0));
    app.pointer_released(Some(egui::pos2(250.0, 250.0)), false);

    assert_eq!(app.interaction.selected_ids, vec![inside]);
}

#[test]
fn tiny_rubber_band_is_ignored() {
    let mut app = test_app();
    let _element = place(&mut app, ElementType::Restrooms, 100.0, 100.0, 96.0, 96.0);

    app.pointer_pressed(egui::pos2(300.0, 50.0), false);
    app.pointer_moved(egui::pos2(302.0, 500.0));
    app.pointer_released(Some(egui::pos2(302.0, 500.0)), false);

    assert!(app.interaction.selected_ids.is_empty());
}

#[test]
fn shift_rubber_band_unions_with_existing_selection() {
    let mut app = test_app();
    let existing = place(&mut app, ElementType::Restrooms, 600.0, 450.0, 96.0, 96.0);
    let banded = place(&mut app, ElementType::Restrooms, 100.0, 100.0, 96.0, 96.0);
    app.select_element(existing, false);

    app.pointer_pressed(egui::pos2(50.0, 50.0), true);
    app.pointer_moved(egui::pos2(250.0, 250.0));
    app.pointer_released(Some(egui::pos2(250.0, 250.0)), true);

    assert_eq!(app.interaction.selected_ids, vec![existing, banded]);
}

// --- Single-element drag ---

#[test]
fn drag_commits_on_release_with_position_clamped() {
    let mut app = test_app();
    let id = place(&mut app, ElementType::Restrooms, 100.0, 100.0, 96.0, 96.0);

    app.pointer_pressed(egui::pos2(148.0, 148.0), false);
    app.pointer_moved(egui::pos2(900.0, 900.0));

    // Mid-drag the store still holds the original position.
    assert_eq!(app.design.element(&id).unwrap().x, 100.0);

    app.pointer_released(Some(egui::pos2(900.0, 900.0)), false);

    let element = app.design.element(&id).unwrap();
    assert!((element.x - (STAGE_WIDTH - 96.0)).abs() < 1e-3);
    assert!((element.y - (STAGE_HEIGHT - 96.0)).abs() < 1e-3);
    assert_all_contained(&app);
}

#[test]
fn drag_keeps_the_grab_offset() {
    let mut app = test_app();
    let id = place(&mut app, ElementType::Restrooms, 100.0, 100.0, 96.0, 96.0);

    // Grab near the corner, not the center.
    app.pointer_pressed(egui::pos2(110.0, 110.0), false);
    app.pointer_moved(egui::pos2(310.0, 210.0));
    app.pointer_released(Some(egui::pos2(310.0, 210.0)), false);

    let element = app.design.element(&id).unwrap();
    assert!((element.x - 300.0).abs() < 1e-3);
    assert!((element.y - 200.0).abs() < 1e-3);
}

// --- Group drag ---

#[test]
fn group_drag_is_capped_by_the_most_constrained_member() {
    let mut app = test_app();
    let left = place(&mut app, ElementType::Restrooms, 0.0, 100.0, 96.0, 96.0);
    let right = place(&mut app, ElementType::Restrooms, 700.0, 100.0, 96.0, 96.0);
    app.interaction.selected_ids = vec![left, right];

    // Press inside the union overlay and pull 200px to the right.
    app.pointer_pressed(egui::pos2(350.0, 148.0), false);
    assert!(matches!(app.interaction.gesture, Some(Gesture::DragGroup { .. })));
    app.pointer_moved(egui::pos2(550.0, 148.0));

    if let Some(Gesture::DragGroup { delta, .. }) = &app.interaction.gesture {
        // The rightmost member has only 4px of room; the whole group
        // is held to that.
        assert!((delta.x - 4.0).abs() < 1e-3);
    } else {
        panic!("expected a group drag");
    }

    app.pointer_released(Some(egui::pos2(550.0, 148.0)), false);

    let left_element = app.design.element(&left).unwrap();
    let right_element = app.design.element(&right).unwrap();
    assert!((left_element.x - 4.0).abs() < 1e-3);
    assert!((right_element.x - 704.0).abs() < 1e-3);
    assert_all_contained(&app);
}

#[test]
fn group_drag_store_commit_happens_only_on_release() {
    let mut app = test_app();
    let a = place(&mut app, ElementType::Restrooms, 100.0, 100.0, 96.0, 96.0);
    let b = place(&mut app, ElementType::Restrooms, 300.0, 100.0, 96.0, 96.0);
    app.interaction.selected_ids = vec![a, b];

    app.pointer_pressed(egui::pos2(250.0, 148.0), false);
    app.pointer_moved(egui::pos2(270.0, 178.0));

    assert_eq!(app.design.element(&a).unwrap().x, 100.0);
    assert_eq!(app.design.element(&b).unwrap().x, 300.0);

    app.pointer_released(Some(egui::pos2(270.0, 178.0)), false);

    assert!((app.design.element(&a).unwrap().x - 120.0).abs() < 1e-3);
    assert!((app.design.element(&b).unwrap().x - 320.0).abs() < 1e-3);
    assert!((app.design.element(&a).unwrap().y - 130.0).abs() < 1e-3);
}

#[test]
fn incompatible_member_ranges_lock_the_group_axis() {
    let mut app = test_app();
    // This member already pokes out past the left edge, so its minimum
    // legal delta is positive while the other member's maximum is
    // smaller: the ranges cannot intersect and the x axis locks.
    let poking = place(&mut app, ElementType::Restrooms, -10.0, 100.0, 96.0, 96.0);
    let flush = place(&mut app, ElementType::Restrooms, 704.0, 100.0, 96.0, 96.0);
    app.interaction.selected_ids = vec![poking, flush];

    app.pointer_pressed(egui::pos2(350.0, 148.0), false);
    app.pointer_moved(egui::pos2(550.0, 190.0));

    if let Some(Gesture::DragGroup { delta, .. }) = &app.interaction.gesture {
        assert_eq!(delta.x, 0.0, "locked axis must not move");
        assert!(delta.y > 0.0, "the free axis still moves");
    } else {
        panic!("expected a group drag");
    }
}

#[test]
fn pointer_cancel_discards_uncommitted_group_drag() {
    let mut app = test_app();
    let a = place(&mut app, ElementType::Restrooms, 100.0, 100.0, 96.0, 96.0);
    let b = place(&mut app, ElementType::Restrooms, 300.0, 100.0, 96.0, 96.0);
    app.interaction.selected_ids = vec![a, b];

    app.pointer_pressed(egui::pos2(250.0, 148.0), false);
    app.pointer_moved(egui::pos2(350.0, 148.0));
    app.pointer_cancelled();

    assert!(app.interaction.gesture.is_none());
    assert_eq!(app.design.element(&a).unwrap().x, 100.0);
    assert_eq!(app.design.element(&b).unwrap().x, 300.0);
}

// --- Resize ---

#[test]
fn resizing_a_label_below_minimum_clamps_to_minimum() {
    let mut app = test_app();
    let id = place(&mut app, ElementType::Label, 300.0, 200.0, 134.4, 52.8);
    app.select_element(id, false);

    let handle = DesignerApp::resize_handle_rect(app.design.element(&id).unwrap()).center();
    app.pointer_pressed(handle, false);
    assert!(matches!(app.interaction.gesture, Some(Gesture::Resize { .. })));

    // Drag to a point implying a 10px width.
    let (cx, cy) = app.design.element(&id).unwrap().center();
    app.pointer_moved(egui::pos2(cx + 5.0, cy + 5.0));
    app.pointer_released(Some(egui::pos2(cx + 5.0, cy + 5.0)), false);

    let element = app.design.element(&id).unwrap();
    assert_eq!(element.width, 48.0);
    assert_eq!(element.height, 48.0);
    assert_eq!(element.size, 48.0);
}

#[test]
fn aspect_locked_resize_keeps_width_equal_to_height() {
    let mut app = test_app();
    let id = place(&mut app, ElementType::RoundTable, 300.0, 200.0, 96.0, 96.0);
    app.select_element(id, false);

    let handle = DesignerApp::resize_handle_rect(app.design.element(&id).unwrap()).center();
    app.pointer_pressed(handle, false);

    let (cx, cy) = app.design.element(&id).unwrap().center();
    app.pointer_moved(egui::pos2(cx + 80.0, cy + 20.0));

    let element = app.design.element(&id).unwrap();
    assert_eq!(element.width, element.height);
    assert_eq!(element.width, 160.0);
    assert_eq!(element.size, 160.0);
}

#[test]
fn freeform_resize_clamps_axes_independently() {
    let mut app = test_app();
    let id = place(&mut app, ElementType::SoundBooth, 300.0, 200.0, 134.4, 76.8);
    app.select_element(id, false);

    let handle = DesignerApp::resize_handle_rect(app.design.element(&id).unwrap()).center();
    app.pointer_pressed(handle, false);

    let (cx, cy) = app.design.element(&id).unwrap().center();
    app.pointer_moved(egui::pos2(cx + 200.0, cy + 10.0));

    let element = app.design.element(&id).unwrap();
    assert_eq!(element.width, 240.0, "width clamps to the maximum");
    assert_eq!(element.height, 48.0, "height clamps to the minimum");
    assert_eq!(element.size, 240.0);
}

#[test]
fn resize_near_the_edge_reclamps_position() {
    let mut app = test_app();
    let id = place(&mut app, ElementType::Restrooms, 700.0, 500.0, 96.0, 96.0);
    app.select_element(id, false);

    let handle = DesignerApp::resize_handle_rect(app.design.element(&id).unwrap()).center();
    app.pointer_pressed(handle, false);

    let (cx, cy) = app.design.element(&id).unwrap().center();
    app.pointer_moved(egui::pos2(cx + 110.0, cy + 110.0));

    assert_all_contained(&app);
}

// --- Rotation ---

#[test]
fn rotation_follows_the_pointer_angle() {
    let mut app = test_app();
    let id = place(&mut app, ElementType::Restrooms, 352.0, 252.0, 96.0, 96.0);
    app.select_element(id, false);

    let handle = DesignerApp::rotation_handle_center(app.design.element(&id).unwrap());
    app.pointer_pressed(handle, false);
    assert!(matches!(app.interaction.gesture, Some(Gesture::Rotate { .. })));

    // Pointer straight below the center: atan2 says 90 degrees.
    let (cx, cy) = app.design.element(&id).unwrap().center();
    app.pointer_moved(egui::pos2(cx, cy + 120.0));

    let element = app.design.element(&id).unwrap();
    assert!((element.rotation - 90.0).abs() < 1e-3);

    app.pointer_released(Some(egui::pos2(cx, cy + 120.0)), false);
    assert!(app.interaction.gesture.is_none());
}

#[test]
fn rotating_in_a_corner_reclamps_position() {
    let mut app = test_app();
    let id = place(&mut app, ElementType::Bar, 650.0, 530.0, 134.4, 57.6);
    app.select_element(id, false);

    let handle = DesignerApp::rotation_handle_center(app.design.element(&id).unwrap());
    app.pointer_pressed(handle, false);

    let (cx, cy) = app.design.element(&id).unwrap().center();
    app.pointer_moved(egui::pos2(cx + 50.0, cy + 50.0));

    assert_all_contained(&app);
    let element = app.design.element(&id).unwrap();
    assert!((element.rotation - 45.0).abs() < 1.0);
}

// --- Clipboard ---

#[test]
fn pasting_a_three_element_clipboard_twice_inserts_six_offset_copies() {
    let mut app = test_app();
    let sources = [
        place(&mut app, ElementType::Restrooms, 100.0, 100.0, 96.0, 96.0),
        place(&mut app, ElementType::Restrooms, 200.0, 100.0, 96.0, 96.0),
        place(&mut app, ElementType::Restrooms, 300.0, 100.0, 96.0, 96.0),
    ];
    app.interaction.selected_ids = sources.to_vec();
    app.copy_selection();

    app.paste_clipboard();
    let first_batch = app.interaction.selected_ids.clone();
    app.paste_clipboard();
    let second_batch = app.interaction.selected_ids.clone();

    assert_eq!(app.design.len(), 9);
    assert_eq!(first_batch.len(), 3);
    assert_eq!(second_batch.len(), 3);
    assert_ne!(first_batch, second_batch);

    // Every pasted element sits 24px * (index + 1) from its source.
    for (index, source_id) in sources.iter().enumerate() {
        let source = app.design.element(source_id).unwrap().clone();
        let offset = 24.0 * (index as f32 + 1.0);
        for batch in [&first_batch, &second_batch] {
            let copy = app.design.element(&batch[index]).unwrap();
            assert!((copy.x - (source.x + offset)).abs() < 1e-3);
            assert!((copy.y - (source.y + offset)).abs() < 1e-3);
            assert_eq!(copy.element_type, source.element_type);
        }
    }
    assert_all_contained(&app);
}

#[test]
fn paste_reclamps_copies_spawned_near_the_edge() {
    let mut app = test_app();
    let id = place(&mut app, ElementType::Restrooms, 700.0, 500.0, 96.0, 96.0);
    app.interaction.selected_ids = vec![id];
    app.copy_selection();
    app.paste_clipboard();

    assert_eq!(app.design.len(), 2);
    assert_all_contained(&app);
}

#[test]
fn copy_with_empty_selection_keeps_previous_clipboard() {
    let mut app = test_app();
    let id = place(&mut app, ElementType::Restrooms, 100.0, 100.0, 96.0, 96.0);
    app.interaction.selected_ids = vec![id];
    app.copy_selection();
    assert_eq!(app.interaction.clipboard.len(), 1);

    app.interaction.selected_ids.clear();
    app.copy_selection();
    assert_eq!(app.interaction.clipboard.len(), 1);
}

#[test]
fn duplicate_offsets_by_28_and_selects_the_copies() {
    let mut app = test_app();
    let a = place(&mut app, ElementType::Restrooms, 100.0, 100.0, 96.0, 96.0);
    let b = place(&mut app, ElementType::Kitchen, 300.0, 200.0, 153.6, 86.4);
    app.interaction.selected_ids = vec![a, b];

    app.duplicate_selection();

    assert_eq!(app.design.len(), 4);
    let copies = app.interaction.selected_ids.clone();
    assert_eq!(copies.len(), 2);
    assert!(!copies.contains(&a));
    assert!(!copies.contains(&b));

    let copy_a = app.design.element(&copies[0]).unwrap();
    assert!((copy_a.x - 128.0).abs() < 1e-3);
    assert!((copy_a.y - 128.0).abs() < 1e-3);
    let copy_b = app.design.element(&copies[1]).unwrap();
    assert!((copy_b.x - 356.0).abs() < 1e-3);
    assert!((copy_b.y - 256.0).abs() < 1e-3);
    assert_all_contained(&app);
}

// --- Delete ---

#[test]
fn delete_removes_the_selection_and_clears_it() {
    let mut app = test_app();
    let a = place(&mut app, ElementType::Restrooms, 100.0, 100.0, 96.0, 96.0);
    let b = place(&mut app, ElementType::Restrooms, 300.0, 100.0, 96.0, 96.0);
    let survivor = place(&mut app, ElementType::Restrooms, 500.0, 100.0, 96.0, 96.0);
    app.interaction.selected_ids = vec![a, b];

    app.delete_selection();

    assert_eq!(app.design.len(), 1);
    assert!(app.design.element(&survivor).is_some());
    assert!(app.interaction.selected_ids.is_empty());
    assert!(app.interaction.gesture.is_none());
}

#[test]
fn delete_with_empty_selection_is_a_noop() {
    let mut app = test_app();
    place(&mut app, ElementType::Restrooms, 100.0, 100.0, 96.0, 96.0);
    app.delete_selection();
    assert_eq!(app.design.len(), 1);
}

// --- Label editing ---

#[test]
fn label_edit_commits_new_text_through_the_store() {
    let mut app = test_app();
    let id = place(&mut app, ElementType::Label, 300.0, 200.0, 134.4, 52.8);

    app.begin_label_edit(id);
    assert_eq!(app.interaction.editing_label, Some(id));
    assert_eq!(app.interaction.temp_label_text, "Label");

    app.interaction.temp_label_text = "Buffet".to_string();
    app.commit_label_edit();

    assert_eq!(app.design.element(&id).unwrap().text.as_deref(), Some("Buffet"));
    assert!(app.interaction.editing_label.is_none());
}

#[test]
fn label_edit_is_rejected_for_non_label_elements() {
    let mut app = test_app();
    let id = place(&mut app, ElementType::Bar, 300.0, 200.0, 134.4, 57.6);
    app.begin_label_edit(id);
    assert!(app.interaction.editing_label.is_none());
}

#[test]
fn cancelling_a_label_edit_keeps_the_old_text() {
    let mut app = test_app();
    let id = place(&mut app, ElementType::Label, 300.0, 200.0, 134.4, 52.8);
    app.design.update_element(
        &id,
        crate::types::ElementUpdate { text: Some("Entrance".into()), ..Default::default() },
    );

    app.begin_label_edit(id);
    app.interaction.temp_label_text = "Scrapped".to_string();
    app.cancel_label_edit();

    assert_eq!(app.design.element(&id).unwrap().text.as_deref(), Some("Entrance"));
}

// --- Containment sweep ---

#[test]
fn every_mutation_path_preserves_stage_containment() {
    let mut app = test_app();

    // Drop, drag, resize, rotate, duplicate, paste, all aimed at the
    // bottom-right corner so any missing clamp would push out.
    let id = app.drop_palette_item(&palette_item("square-table"), egui::pos2(780.0, 580.0));
    assert_all_contained(&app);

    app.pointer_pressed(app.design.element(&id).unwrap().center().into(), false);
    app.pointer_moved(egui::pos2(1200.0, 900.0));
    app.pointer_released(Some(egui::pos2(1200.0, 900.0)), false);
    assert_all_contained(&app);

    let handle = DesignerApp::resize_handle_rect(app.design.element(&id).unwrap()).center();
    app.pointer_pressed(handle, false);
    let (cx, cy) = app.design.element(&id).unwrap().center();
    app.pointer_moved(egui::pos2(cx + 150.0, cy + 150.0));
    app.pointer_released(Some(egui::pos2(cx + 150.0, cy + 150.0)), false);
    assert_all_contained(&app);

    let handle = DesignerApp::rotation_handle_center(app.design.element(&id).unwrap());
    app.pointer_pressed(handle, false);
    let (cx, cy) = app.design.element(&id).unwrap().center();
    app.pointer_moved(egui::pos2(cx + 33.0, cy + 71.0));
    app.pointer_released(Some(egui::pos2(cx + 33.0, cy + 71.0)), false);
    assert_all_contained(&app);

    app.interaction.selected_ids = vec![id];
    app.duplicate_selection();
    assert_all_contained(&app);

    app.copy_selection();
    app.paste_clipboard();
    assert_all_contained(&app);
}
