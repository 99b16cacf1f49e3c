//! Core data types for the venue designer.
//!
//! This module defines the element model (semantic type, transform, and
//! display fields) and the `Design` store that owns the canonical list
//! of placed elements. The store is independent of rendering: the UI
//! layer mutates it through `add_element`/`update_element`/
//! `remove_element` and the renderer only reads from it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::DEFAULT_ELEMENT_SIZE;

/// Unique identifier for a placed element.
pub type ElementId = Uuid;

/// Semantic type of a placed element.
///
/// Types are kebab-cased on the wire (`"round-table"`); unrecognized
/// wire values deserialize to [`ElementType::Unknown`] and render with
/// the default glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementType {
    /// Round dining table.
    RoundTable,
    /// Square dining table.
    SquareTable,
    /// Dance floor area.
    DanceFloor,
    /// Drinks bar (elongated ellipse).
    Bar,
    /// Emergency or guest exit marker.
    Exit,
    /// Venue boundary / restricted-area outline.
    Boundary,
    /// Thin divider strip.
    Strip,
    /// Free-text label.
    Label,
    /// Restrooms block.
    Restrooms,
    /// DJ / sound booth.
    SoundBooth,
    /// Kitchen / catering area.
    Kitchen,
    /// Catch-all for unrecognized types.
    #[serde(other)]
    Unknown,
}

impl ElementType {
    /// Whether width and height are kept equal under interactive resize.
    #[must_use]
    pub fn is_aspect_locked(self) -> bool {
        matches!(
            self,
            Self::RoundTable | Self::SquareTable | Self::DanceFloor | Self::Exit
        )
    }

    /// Initial footprint for a freshly dropped element of this type, in
    /// stage pixels. Square types use the default size; elongated types
    /// scale it per axis.
    #[must_use]
    pub fn default_footprint(self) -> (f32, f32) {
        let size = DEFAULT_ELEMENT_SIZE;
        match self {
            Self::Bar => (size * 1.4, size * 0.6),
            Self::Boundary => (size * 1.8, size),
            Self::Strip => (size * 1.6, size * 0.25),
            Self::Label => (size * 1.4, size * 0.55),
            Self::Restrooms => (size * 1.2, size * 0.8),
            Self::SoundBooth => (size * 1.4, size * 0.8),
            Self::Kitchen => (size * 1.6, size * 0.9),
            _ => (size, size),
        }
    }
}

/// A placed layout element.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Stable unique identifier.
    pub id: ElementId,
    /// Semantic type, drives rendering and padding.
    #[serde(rename = "type")]
    pub element_type: ElementType,
    /// Left edge of the logical box in stage pixels.
    pub x: f32,
    /// Top edge of the logical box in stage pixels.
    pub y: f32,
    /// Box width in stage pixels.
    pub width: f32,
    /// Box height in stage pixels.
    pub height: f32,
    /// Legacy scalar equal to `max(width, height)`, kept for simpler
    /// export consumers.
    pub size: f32,
    /// Clockwise rotation in degrees about the box center.
    pub rotation: f32,
    /// Seating/occupancy hint, display-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    /// Label text, editable in place for the label type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Key into the custom icon registry; overrides procedural
    /// rendering when it resolves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_key: Option<String>,
}

impl Element {
    /// Creates an element with a fresh id, zero rotation, and
    /// `size = max(width, height)`.
    pub fn new(element_type: ElementType, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            element_type,
            x,
            y,
            width,
            height,
            size: width.max(height),
            rotation: 0.0,
            capacity: None,
            text: None,
            image_key: None,
        }
    }

    /// The element's center point in stage pixels.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Sparse update for an element. Only present fields are applied.
#[derive(Debug, Clone, Default)]
pub struct ElementUpdate {
    /// New left edge, if being updated.
    pub x: Option<f32>,
    /// New top edge, if being updated.
    pub y: Option<f32>,
    /// New width, if being updated.
    pub width: Option<f32>,
    /// New height, if being updated.
    pub height: Option<f32>,
    /// New legacy size scalar, if being updated.
    pub size: Option<f32>,
    /// New rotation in degrees, if being updated.
    pub rotation: Option<f32>,
    /// New label text, if being updated.
    pub text: Option<String>,
    /// New capacity hint, if being updated.
    pub capacity: Option<u32>,
}

impl ElementUpdate {
    /// Update that only moves the element.
    #[must_use]
    pub fn position(x: f32, y: f32) -> Self {
        Self { x: Some(x), y: Some(y), ..Self::default() }
    }
}

/// In-memory store of placed elements.
///
/// Elements keep insertion order, which doubles as draw order (later
/// elements render on top).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Design {
    /// All placed elements, in draw order.
    pub elements: Vec<Element>,
}

impl Design {
    /// Creates an empty design.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an element, or replaces the existing one when an element
    /// with the same id is already present (upsert, never a duplicate
    /// insert). Returns the element's id.
    pub fn add_element(&mut self, element: Element) -> ElementId {
        let id = element.id;
        if let Some(existing) = self.elements.iter_mut().find(|e| e.id == id) {
            *existing = element;
        } else {
            self.elements.push(element);
        }
        id
    }

    /// Removes an element by id. Removing an unknown id is a silent
    /// no-op; returns whether anything was removed.
    pub fn remove_element(&mut self, id: &ElementId) -> bool {
        let before = self.elements.len();
        self.elements.retain(|e| e.id != *id);
        self.elements.len() != before
    }

    /// Applies a sparse update to an element. Updating an unknown id is
    /// a silent no-op; returns whether an element was touched.
    pub fn update_element(&mut self, id: &ElementId, update: ElementUpdate) -> bool {
        let Some(element) = self.elements.iter_mut().find(|e| e.id == *id) else {
            return false;
        };
        if let Some(x) = update.x {
            element.x = x;
        }
        if let Some(y) = update.y {
            element.y = y;
        }
        if let Some(width) = update.width {
            element.width = width;
        }
        if let Some(height) = update.height {
            element.height = height;
        }
        if let Some(size) = update.size {
            element.size = size;
        }
        if let Some(rotation) = update.rotation {
            element.rotation = rotation;
        }
        if let Some(text) = update.text {
            element.text = Some(text);
        }
        if let Some(capacity) = update.capacity {
            element.capacity = Some(capacity);
        }
        true
    }

    /// Looks up an element by id.
    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == *id)
    }

    /// Number of placed elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the design has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_element_derives_size_from_larger_dimension() {
        let element = Element::new(ElementType::Bar, 10.0, 20.0, 134.4, 57.6);
        assert!((element.size - 134.4).abs() < 1e-4);
        assert_eq!(element.rotation, 0.0);
        assert!(!element.id.is_nil());
    }

    #[test]
    fn add_element_appends_in_draw_order() {
        let mut design = Design::new();
        let a = design.add_element(Element::new(ElementType::RoundTable, 0.0, 0.0, 96.0, 96.0));
        let b = design.add_element(Element::new(ElementType::Kitchen, 50.0, 50.0, 150.0, 86.0));
        assert_eq!(design.len(), 2);
        assert_eq!(design.elements[0].id, a);
        assert_eq!(design.elements[1].id, b);
    }

    #[test]
    fn add_element_with_existing_id_replaces_instead_of_duplicating() {
        let mut design = Design::new();
        let original = Element::new(ElementType::Label, 10.0, 10.0, 134.0, 52.0);
        let id = design.add_element(original.clone());

        let mut replacement = original;
        replacement.x = 200.0;
        replacement.text = Some("Cocktails".to_string());
        design.add_element(replacement);

        assert_eq!(design.len(), 1);
        let element = design.element(&id).unwrap();
        assert_eq!(element.x, 200.0);
        assert_eq!(element.text.as_deref(), Some("Cocktails"));
    }

    #[test]
    fn remove_unknown_id_is_a_silent_noop() {
        let mut design = Design::new();
        design.add_element(Element::new(ElementType::Exit, 0.0, 0.0, 96.0, 96.0));
        assert!(!design.remove_element(&Uuid::new_v4()));
        assert_eq!(design.len(), 1);
    }

    #[test]
    fn update_applies_only_present_fields() {
        let mut design = Design::new();
        let mut element = Element::new(ElementType::RoundTable, 40.0, 60.0, 96.0, 96.0);
        element.capacity = Some(10);
        let id = design.add_element(element);

        let touched = design.update_element(
            &id,
            ElementUpdate { rotation: Some(45.0), ..ElementUpdate::default() },
        );
        assert!(touched);

        let element = design.element(&id).unwrap();
        assert_eq!(element.rotation, 45.0);
        assert_eq!(element.x, 40.0);
        assert_eq!(element.capacity, Some(10));
    }

    #[test]
    fn update_unknown_id_is_a_silent_noop() {
        let mut design = Design::new();
        assert!(!design.update_element(&Uuid::new_v4(), ElementUpdate::position(1.0, 2.0)));
    }

    #[test]
    fn element_type_wire_names_are_kebab_case() {
        assert_eq!(
            serde_json::to_string(&ElementType::RoundTable).unwrap(),
            "\"round-table\""
        );
        assert_eq!(
            serde_json::to_string(&ElementType::SoundBooth).unwrap(),
            "\"sound-booth\""
        );
        let parsed: ElementType = serde_json::from_str("\"dance-floor\"").unwrap();
        assert_eq!(parsed, ElementType::DanceFloor);
    }

    #[test]
    fn unrecognized_wire_type_falls_back_to_unknown() {
        let parsed: ElementType = serde_json::from_str("\"hologram-stage\"").unwrap();
        assert_eq!(parsed, ElementType::Unknown);
    }

    #[test]
    fn aspect_locked_set_is_exact() {
        for locked in [
            ElementType::RoundTable,
            ElementType::SquareTable,
            ElementType::DanceFloor,
            ElementType::Exit,
        ] {
            assert!(locked.is_aspect_locked());
        }
        for freeform in [
            ElementType::Bar,
            ElementType::Boundary,
            ElementType::Strip,
            ElementType::Label,
            ElementType::Restrooms,
            ElementType::SoundBooth,
            ElementType::Kitchen,
            ElementType::Unknown,
        ] {
            assert!(!freeform.is_aspect_locked());
        }
    }

    #[test]
    fn element_json_round_trip() {
        let mut element = Element::new(ElementType::SquareTable, 120.0, 80.0, 96.0, 96.0);
        element.capacity = Some(8);
        element.image_key = Some("square-table".to_string());

        let json = serde_json::to_string(&element).unwrap();
        let restored: Element = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.id, element.id);
        assert_eq!(restored.element_type, ElementType::SquareTable);
        assert_eq!(restored.capacity, Some(8));
        assert_eq!(restored.image_key.as_deref(), Some("square-table"));
    }
}
