//! Stage interaction controller.
//!
//! Translates pointer and keyboard input into store mutations: single
//! and shift multi-selection, rubber-band area selection, element and
//! group dragging, resize- and rotation-handle gestures, and the
//! clipboard operations. Everything works in stage-local pixel
//! coordinates; the stage widget in `ui::mod` converts egui input
//! before calling in here, which keeps the whole state machine
//! exercisable without a windowing backend.
//!
//! Drag gestures follow the "visual position is a cache" rule: while a
//! drag is in flight the renderer reads positions from the gesture
//! state, and the store (the source of truth) is written once on
//! release, always through `clamp_position_within_stage`.

use eframe::egui;

use super::palette::PaletteItem;
use super::state::{DeltaRange, DesignerApp, Gesture, GroupDragSnapshot};
use crate::constants::{
    DUPLICATE_OFFSET_STEP, MIN_ELEMENT_SIZE, PASTE_OFFSET_STEP, RESIZE_HANDLE_SIZE,
    ROTATION_HANDLE_OFFSET, ROTATION_HANDLE_RADIUS, RUBBER_BAND_MIN_SIZE,
};
use crate::geometry::{
    clamp, clamp_position_within_stage, clamp_size, element_bounds, visual_padding, Bounds,
};
use crate::types::{Element, ElementId, ElementType, ElementUpdate};

impl DesignerApp {
    // --- Pointer state machine ---

    /// Handles a primary-button press at a stage-local position.
    ///
    /// Dispatch order mirrors the stage's visual stacking: the
    /// multi-selection overlay sits on top of everything, then the
    /// selection handles of selected elements, then element bodies
    /// (topmost first), and finally empty stage area, which starts a
    /// rubber-band selection.
    pub fn pointer_pressed(&mut self, pos: egui::Pos2, shift: bool) {
        // Multi-selection overlay: with two or more elements selected it
        // covers the whole union rect and drags the group.
        if let Some(bounds) = self.multi_selection_bounds() {
            if bounds.min_x <= pos.x
                && pos.x <= bounds.max_x
                && bounds.min_y <= pos.y
                && pos.y <= bounds.max_y
            {
                self.start_group_drag(pos);
                return;
            }
        }

        // Selection handles of already-selected elements.
        for id in self.interaction.selected_ids.clone() {
            let Some(element) = self.design.element(&id) else {
                continue;
            };
            let rotation_center = Self::rotation_handle_center(element);
            if rotation_center.distance(pos) <= ROTATION_HANDLE_RADIUS {
                self.select_element(id, shift);
                self.interaction.gesture = Some(Gesture::Rotate { id });
                return;
            }
            // Slightly inflated hit area, easier to grab than it looks.
            if Self::resize_handle_rect(element).expand(2.0).contains(pos) {
                self.select_element(id, shift);
                self.interaction.gesture = Some(Gesture::Resize { id });
                return;
            }
        }

        if let Some(id) = self.element_at(pos) {
            self.select_element(id, shift);
            let element_pos = self
                .design
                .element(&id)
                .map(|e| egui::pos2(e.x, e.y))
                .unwrap_or(pos);
            self.interaction.gesture = Some(Gesture::DragElement {
                id,
                grab_offset: pos - element_pos,
                position: element_pos,
            });
            return;
        }

        // Empty stage: anchor a rubber band. A plain press clears the
        // selection immediately; shift preserves it for a later union.
        if !shift {
            self.interaction.selected_ids.clear();
        }
        self.interaction.gesture = Some(Gesture::RubberBand { anchor: pos, current: pos });
    }

    /// Handles pointer movement while the primary button is held.
    pub fn pointer_moved(&mut self, pos: egui::Pos2) {
        match self.interaction.gesture.take() {
            Some(Gesture::RubberBand { anchor, .. }) => {
                self.interaction.gesture = Some(Gesture::RubberBand { anchor, current: pos });
            }
            Some(Gesture::DragElement { id, grab_offset, .. }) => {
                let position = self.clamped_drag_position(&id, pos - grab_offset);
                self.interaction.gesture =
                    Some(Gesture::DragElement { id, grab_offset, position });
            }
            Some(Gesture::DragGroup { origin, snapshots, range, .. }) => {
                let raw = pos - origin;
                let delta = egui::vec2(
                    clamp(raw.x, range.min_x, range.max_x),
                    clamp(raw.y, range.min_y, range.max_y),
                );
                self.interaction.gesture =
                    Some(Gesture::DragGroup { origin, snapshots, range, delta });
            }
            Some(Gesture::Resize { id }) => {
                self.resize_to_pointer(&id, pos);
                self.interaction.gesture = Some(Gesture::Resize { id });
            }
            Some(Gesture::Rotate { id }) => {
                self.rotate_to_pointer(&id, pos);
                self.interaction.gesture = Some(Gesture::Rotate { id });
            }
            None => {}
        }
    }

    /// Handles release of the primary button, committing the active
    /// gesture. `pos` may be absent when the pointer left the window;
    /// drags then finalize from their last clamped state.
    pub fn pointer_released(&mut self, pos: Option<egui::Pos2>, shift: bool) {
        match self.interaction.gesture.take() {
            Some(Gesture::RubberBand { anchor, current }) => {
                self.finish_rubber_band(anchor, pos.unwrap_or(current), shift);
            }
            Some(Gesture::DragElement { id, position, .. }) => {
                let committed = self.clamped_drag_position(&id, position);
                self.design
                    .update_element(&id, ElementUpdate::position(committed.x, committed.y));
            }
            Some(Gesture::DragGroup { snapshots, delta, .. }) => {
                for snapshot in &snapshots {
                    let (x, y) = clamp_position_within_stage(
                        snapshot.start_x + delta.x,
                        snapshot.start_y + delta.y,
                        snapshot.width,
                        snapshot.height,
                        snapshot.rotation,
                        snapshot.padding,
                        self.stage.size.x,
                        self.stage.size.y,
                    );
                    self.design.update_element(&snapshot.id, ElementUpdate::position(x, y));
                }
            }
            // Resize and rotation commit live on every move.
            Some(Gesture::Resize { .. } | Gesture::Rotate { .. }) | None => {}
        }
    }

    /// Discards any in-flight gesture without committing it (pointer
    /// left the surface, or the platform cancelled the interaction).
    pub fn pointer_cancelled(&mut self) {
        self.interaction.gesture = None;
    }

    // --- Selection ---

    /// Applies click-selection rules: shift toggles membership, a plain
    /// click replaces the selection (and thereby cancels any rotation
    /// in progress, since the gesture is rebuilt by the caller).
    pub fn select_element(&mut self, id: ElementId, shift: bool) {
        if shift {
            if let Some(index) = self.interaction.selected_ids.iter().position(|s| *s == id) {
                self.interaction.selected_ids.remove(index);
            } else {
                self.interaction.selected_ids.push(id);
            }
        } else {
            self.interaction.selected_ids = vec![id];
        }
    }

    fn finish_rubber_band(&mut self, anchor: egui::Pos2, end: egui::Pos2, shift: bool) {
        let rect = egui::Rect::from_two_pos(anchor, end);
        if rect.width() <= RUBBER_BAND_MIN_SIZE || rect.height() <= RUBBER_BAND_MIN_SIZE {
            return;
        }

        let selection = Bounds {
            min_x: rect.min.x,
            max_x: rect.max.x,
            min_y: rect.min.y,
            max_y: rect.max.y,
        };

        // Strict containment: an element joins only if its whole padded
        // bounds sit inside the band.
        let ids_within: Vec<ElementId> = self
            .design
            .elements
            .iter()
            .filter(|element| Self::bounds_of(element).contained_in(&selection))
            .map(|element| element.id)
            .collect();

        if !ids_within.is_empty() {
            if shift {
                for id in ids_within {
                    if !self.interaction.selected_ids.contains(&id) {
                        self.interaction.selected_ids.push(id);
                    }
                }
            } else {
                self.interaction.selected_ids = ids_within;
            }
        } else if !shift {
            self.interaction.selected_ids.clear();
        }
    }

    // --- Gestures ---

    fn start_group_drag(&mut self, origin: egui::Pos2) {
        let snapshots: Vec<GroupDragSnapshot> = self
            .design
            .elements
            .iter()
            .filter(|element| self.interaction.selected_ids.contains(&element.id))
            .map(|element| GroupDragSnapshot {
                id: element.id,
                start_x: element.x,
                start_y: element.y,
                width: element.width,
                height: element.height,
                rotation: element.rotation,
                padding: visual_padding(element.element_type, element.width, element.height),
                bounds: Self::bounds_of(element),
            })
            .collect();

        if snapshots.len() <= 1 {
            return;
        }

        // Intersect every member's legal translation range so the whole
        // group stays in-stage, not just its envelope.
        let mut range = DeltaRange {
            min_x: f32::NEG_INFINITY,
            max_x: f32::INFINITY,
            min_y: f32::NEG_INFINITY,
            max_y: f32::INFINITY,
        };
        for snapshot in &snapshots {
            range.min_x = range.min_x.max(-snapshot.bounds.min_x);
            range.max_x = range.max_x.min(self.stage.size.x - snapshot.bounds.max_x);
            range.min_y = range.min_y.max(-snapshot.bounds.min_y);
            range.max_y = range.max_y.min(self.stage.size.y - snapshot.bounds.max_y);
        }
        if !range.min_x.is_finite() || !range.max_x.is_finite() {
            range.min_x = 0.0;
            range.max_x = 0.0;
        }
        if !range.min_y.is_finite() || !range.max_y.is_finite() {
            range.min_y = 0.0;
            range.max_y = 0.0;
        }
        // Incompatible member ranges lock the group on that axis.
        if range.min_x > range.max_x {
            range.min_x = 0.0;
            range.max_x = 0.0;
        }
        if range.min_y > range.max_y {
            range.min_y = 0.0;
            range.max_y = 0.0;
        }

        self.interaction.gesture = Some(Gesture::DragGroup {
            origin,
            snapshots,
            range,
            delta: egui::Vec2::ZERO,
        });
    }

    fn clamped_drag_position(&self, id: &ElementId, desired: egui::Pos2) -> egui::Pos2 {
        let Some(element) = self.design.element(id) else {
            return desired;
        };
        let padding = visual_padding(element.element_type, element.width, element.height);
        let (x, y) = clamp_position_within_stage(
            desired.x,
            desired.y,
            element.width,
            element.height,
            element.rotation,
            padding,
            self.stage.size.x,
            self.stage.size.y,
        );
        egui::pos2(x, y)
    }

    fn resize_to_pointer(&mut self, id: &ElementId, pointer: egui::Pos2) {
        let Some(element) = self.design.element(id) else {
            return;
        };
        let (center_x, center_y) = element.center();
        let radians = element.rotation.to_radians();
        let (sin, cos) = radians.sin_cos();

        // Pointer in the element's local (unrotated) frame.
        let vx = pointer.x - center_x;
        let vy = pointer.y - center_y;
        let local_x = cos * vx + sin * vy;
        let local_y = -sin * vx + cos * vy;

        let (width, height) = if element.element_type.is_aspect_locked() {
            let extent = local_x.abs().max(local_y.abs());
            let size = clamp_size((extent * 2.0).max(MIN_ELEMENT_SIZE));
            (size, size)
        } else {
            (
                clamp_size((local_x.abs() * 2.0).max(MIN_ELEMENT_SIZE)),
                clamp_size((local_y.abs() * 2.0).max(MIN_ELEMENT_SIZE)),
            )
        };

        // Extents changed, so the position has to pass the chokepoint
        // again before the commit.
        let rotation = element.rotation;
        let (x, y) = (element.x, element.y);
        let padding = visual_padding(element.element_type, width, height);
        let (clamped_x, clamped_y) = clamp_position_within_stage(
            x,
            y,
            width,
            height,
            rotation,
            padding,
            self.stage.size.x,
            self.stage.size.y,
        );

        self.design.update_element(
            id,
            ElementUpdate {
                width: Some(width),
                height: Some(height),
                size: Some(width.max(height)),
                x: Some(clamped_x),
                y: Some(clamped_y),
                ..ElementUpdate::default()
            },
        );
    }

    fn rotate_to_pointer(&mut self, id: &ElementId, pointer: egui::Pos2) {
        let Some(element) = self.design.element(id) else {
            return;
        };
        let (center_x, center_y) = element.center();
        let degrees = (pointer.y - center_y).atan2(pointer.x - center_x).to_degrees();

        // The rotated bounds changed shape, so containment has to be
        // re-established in the same mutation.
        let padding = visual_padding(element.element_type, element.width, element.height);
        let (x, y) = clamp_position_within_stage(
            element.x,
            element.y,
            element.width,
            element.height,
            degrees,
            padding,
            self.stage.size.x,
            self.stage.size.y,
        );

        self.design.update_element(
            id,
            ElementUpdate {
                rotation: Some(degrees),
                x: Some(x),
                y: Some(y),
                ..ElementUpdate::default()
            },
        );
    }

    // --- Palette drops ---

    /// Creates an element from a palette item centered at the drop
    /// point, clamped into the stage.
    pub fn drop_palette_item(&mut self, item: &PaletteItem, drop_pos: egui::Pos2) -> ElementId {
        let (width, height) = item.element_type.default_footprint();
        let padding = visual_padding(item.element_type, width, height);

        let (x, y) = clamp_position_within_stage(
            drop_pos.x - width / 2.0,
            drop_pos.y - height / 2.0,
            width,
            height,
            0.0,
            padding,
            self.stage.size.x,
            self.stage.size.y,
        );

        let mut element = Element::new(item.element_type, x, y, width, height);
        element.capacity = item.capacity;
        element.text = item.text.map(str::to_string);
        element.image_key = item.image_key.map(str::to_string);
        self.design.add_element(element)
    }

    // --- Clipboard and selection actions ---

    /// Removes every selected element. Deletion is permanent; the
    /// store holds no history.
    pub fn delete_selection(&mut self) {
        if self.interaction.selected_ids.is_empty() {
            return;
        }
        for id in std::mem::take(&mut self.interaction.selected_ids) {
            self.design.remove_element(&id);
        }
        // A rotation or drag of a deleted element must not keep running.
        self.interaction.gesture = None;
    }

    /// Snapshots the selected elements' full field sets into the
    /// clipboard, overwriting its previous contents. Store order is
    /// kept so paste offsets are deterministic.
    pub fn copy_selection(&mut self) {
        if self.interaction.selected_ids.is_empty() {
            return;
        }
        let snapshot: Vec<Element> = self
            .design
            .elements
            .iter()
            .filter(|element| self.interaction.selected_ids.contains(&element.id))
            .cloned()
            .collect();
        if !snapshot.is_empty() {
            self.interaction.clipboard = snapshot;
        }
    }

    /// Inserts fresh copies of the clipboard contents, each offset by
    /// `24px × (index + 1)` from its source and re-clamped. The newly
    /// inserted elements become the selection; the clipboard is left
    /// intact for further pastes.
    pub fn paste_clipboard(&mut self) {
        if self.interaction.clipboard.is_empty() {
            return;
        }
        let templates = self.interaction.clipboard.clone();
        let added = self.insert_offset_copies(&templates, PASTE_OFFSET_STEP);
        if !added.is_empty() {
            self.interaction.selected_ids = added;
        }
    }

    /// Duplicates the current selection in place with a `28px ×
    /// (index + 1)` cascade, reading directly from the live elements
    /// rather than the clipboard. The duplicates become the selection.
    pub fn duplicate_selection(&mut self) {
        if self.interaction.selected_ids.is_empty() {
            return;
        }
        let templates: Vec<Element> = self
            .design
            .elements
            .iter()
            .filter(|element| self.interaction.selected_ids.contains(&element.id))
            .cloned()
            .collect();
        if templates.is_empty() {
            return;
        }
        let added = self.insert_offset_copies(&templates, DUPLICATE_OFFSET_STEP);
        if !added.is_empty() {
            self.interaction.selected_ids = added;
        }
    }

    fn insert_offset_copies(&mut self, templates: &[Element], step: f32) -> Vec<ElementId> {
        let mut added = Vec::with_capacity(templates.len());
        for (index, template) in templates.iter().enumerate() {
            let offset = step * (index as f32 + 1.0);
            let padding =
                visual_padding(template.element_type, template.width, template.height);
            let (x, y) = clamp_position_within_stage(
                template.x + offset,
                template.y + offset,
                template.width,
                template.height,
                template.rotation,
                padding,
                self.stage.size.x,
                self.stage.size.y,
            );

            let mut copy = template.clone();
            copy.id = uuid::Uuid::new_v4();
            copy.x = x;
            copy.y = y;
            added.push(self.design.add_element(copy));
        }
        added
    }

    // --- Label editing ---

    /// Opens the label editor for a label-type element, seeding the
    /// buffer with its current text.
    pub fn begin_label_edit(&mut self, id: ElementId) {
        let Some(element) = self.design.element(&id) else {
            return;
        };
        if element.element_type != ElementType::Label {
            return;
        }
        self.interaction.temp_label_text =
            element.text.clone().unwrap_or_else(|| "Label".to_string());
        self.interaction.editing_label = Some(id);
    }

    /// Commits the label editor buffer into the element.
    pub fn commit_label_edit(&mut self) {
        if let Some(id) = self.interaction.editing_label.take() {
            let text = std::mem::take(&mut self.interaction.temp_label_text);
            self.design.update_element(
                &id,
                ElementUpdate { text: Some(text), ..ElementUpdate::default() },
            );
        }
    }

    /// Discards the label editor buffer.
    pub fn cancel_label_edit(&mut self) {
        self.interaction.editing_label = None;
        self.interaction.temp_label_text.clear();
    }

    // --- Hit testing and derived geometry ---

    /// Rotated, padded bounds of an element.
    #[must_use]
    pub fn bounds_of(element: &Element) -> Bounds {
        let padding = visual_padding(element.element_type, element.width, element.height);
        element_bounds(
            element.x,
            element.y,
            element.width,
            element.height,
            element.rotation,
            padding,
        )
    }

    /// The topmost element whose rotated logical box contains `pos`.
    #[must_use]
    pub fn element_at(&self, pos: egui::Pos2) -> Option<ElementId> {
        self.design
            .elements
            .iter()
            .rev()
            .find(|element| Self::element_contains(element, pos))
            .map(|element| element.id)
    }

    fn element_contains(element: &Element, pos: egui::Pos2) -> bool {
        let (center_x, center_y) = element.center();
        let radians = element.rotation.to_radians();
        let (sin, cos) = radians.sin_cos();

        let vx = pos.x - center_x;
        let vy = pos.y - center_y;
        let local_x = cos * vx + sin * vy;
        let local_y = -sin * vx + cos * vy;

        local_x.abs() <= element.width / 2.0 && local_y.abs() <= element.height / 2.0
    }

    /// Center of the rotation handle: offset from the element center
    /// along the rotation's "up" direction, past the larger half-extent.
    #[must_use]
    pub fn rotation_handle_center(element: &Element) -> egui::Pos2 {
        let (center_x, center_y) = element.center();
        let distance =
            (element.width / 2.0).max(element.height / 2.0) + ROTATION_HANDLE_OFFSET;
        let angle = element.rotation.to_radians() - std::f32::consts::FRAC_PI_2;
        egui::pos2(
            center_x + angle.cos() * distance,
            center_y + angle.sin() * distance,
        )
    }

    /// Screen-aligned rect of the square resize handle, centered on the
    /// element's rotated bottom-right corner.
    #[must_use]
    pub fn resize_handle_rect(element: &Element) -> egui::Rect {
        let half_width = element.width / 2.0;
        let half_height = element.height / 2.0;
        let handle_half = RESIZE_HANDLE_SIZE / 2.0;
        let radians = element.rotation.to_radians();
        let (sin, cos) = radians.sin_cos();

        let offset_x = half_width - handle_half;
        let offset_y = half_height - handle_half;
        let rotated_x = offset_x * cos - offset_y * sin;
        let rotated_y = offset_x * sin + offset_y * cos;

        let center = egui::pos2(
            element.x + half_width + rotated_x,
            element.y + half_height + rotated_y,
        );
        egui::Rect::from_center_size(center, egui::Vec2::splat(RESIZE_HANDLE_SIZE))
    }

    /// Union of the selected elements' bounds, present only when two or
    /// more elements are selected. During a group drag the union tracks
    /// the drag delta.
    #[must_use]
    pub fn multi_selection_bounds(&self) -> Option<Bounds> {
        if let Some(Gesture::DragGroup { snapshots, delta, .. }) = &self.interaction.gesture {
            return Self::union_bounds(snapshots.iter().map(|snapshot| Bounds {
                min_x: snapshot.bounds.min_x + delta.x,
                max_x: snapshot.bounds.max_x + delta.x,
                min_y: snapshot.bounds.min_y + delta.y,
                max_y: snapshot.bounds.max_y + delta.y,
            }));
        }

        if self.interaction.selected_ids.len() <= 1 {
            return None;
        }
        Self::union_bounds(
            self.design
                .elements
                .iter()
                .filter(|element| self.interaction.selected_ids.contains(&element.id))
                .map(Self::bounds_of),
        )
    }

    fn union_bounds(bounds: impl Iterator<Item = Bounds>) -> Option<Bounds> {
        let mut union: Option<Bounds> = None;
        for b in bounds {
            union = Some(match union {
                None => b,
                Some(u) => Bounds {
                    min_x: u.min_x.min(b.min_x),
                    max_x: u.max_x.max(b.max_x),
                    min_y: u.min_y.min(b.min_y),
                    max_y: u.max_y.max(b.max_y),
                },
            });
        }
        match union {
            Some(u) if u.min_x.is_finite() && u.min_y.is_finite() => Some(u),
            _ => None,
        }
    }
}
