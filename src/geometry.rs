//! Stage geometry utilities.
//!
//! Pure functions for the bounding-box math behind element containment:
//! per-type visual padding, axis-aligned extents of a rotated padded
//! rectangle, element bounds, and position clamping against the stage.
//!
//! Every function here is total over its numeric domain: out-of-range
//! input degrades via clamping, never via an error.

use crate::types::ElementType;

/// Per-axis inset added to an element's logical box so bounds checks
/// account for stroke and shadow overflow in the rendered glyph.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    /// Horizontal inset in stage pixels.
    pub x: f32,
    /// Vertical inset in stage pixels.
    pub y: f32,
}

/// Half-width/half-height of an axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    /// Horizontal half-extent in stage pixels.
    pub x: f32,
    /// Vertical half-extent in stage pixels.
    pub y: f32,
}

/// Axis-aligned bounds of a rotated, padded element box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Left edge.
    pub min_x: f32,
    /// Right edge.
    pub max_x: f32,
    /// Top edge.
    pub min_y: f32,
    /// Bottom edge.
    pub max_y: f32,
}

impl Bounds {
    /// Whether these bounds lie entirely inside `other`.
    #[must_use]
    pub fn contained_in(&self, other: &Bounds) -> bool {
        self.min_x >= other.min_x
            && self.max_x <= other.max_x
            && self.min_y >= other.min_y
            && self.max_y <= other.max_y
    }
}

/// Clamps `value` into `[min, max]`, resolving an inverted range in
/// favor of `max` (the JS `min(max(v, lo), hi)` ordering). Total even
/// when `min > max`, unlike `f32::clamp`.
#[must_use]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Clamps an element dimension into the interactive resize range.
#[must_use]
pub fn clamp_size(value: f32) -> f32 {
    clamp(
        value,
        crate::constants::MIN_ELEMENT_SIZE,
        crate::constants::MAX_ELEMENT_SIZE,
    )
}

/// Returns the visual padding for an element of the given type and box
/// dimensions.
///
/// Each type approximates the stroke/shadow overflow of its glyph as a
/// fraction of its size; types rendered without overflow pad by zero,
/// and unrecognized types fall back to a fraction of the smaller
/// dimension.
#[must_use]
pub fn visual_padding(element_type: ElementType, width: f32, height: f32) -> Padding {
    let size = width.min(height);

    match element_type {
        ElementType::RoundTable | ElementType::SquareTable => {
            let stroke = (size * 0.08).max(4.0);
            Padding { x: stroke / 2.0, y: stroke / 2.0 }
        }
        ElementType::DanceFloor => {
            let stroke = (size * 0.06).max(3.0);
            Padding { x: stroke / 2.0, y: stroke / 2.0 }
        }
        ElementType::Bar => {
            let stroke = (size * 0.06).max(2.5);
            Padding { x: stroke / 2.0, y: stroke / 2.0 }
        }
        ElementType::Boundary => {
            let stroke = (width.max(height) * 0.02).max(2.0);
            Padding { x: stroke, y: stroke }
        }
        ElementType::Strip => {
            let stroke = (height * 0.4).max(2.0);
            Padding { x: 0.0, y: stroke / 2.0 }
        }
        ElementType::Label => {
            let stroke = (size * 0.04).max(1.5);
            Padding { x: stroke, y: stroke }
        }
        ElementType::Restrooms | ElementType::SoundBooth | ElementType::Kitchen => {
            Padding { x: 0.0, y: 0.0 }
        }
        ElementType::Exit => {
            let stroke = (size * 0.04).max(2.0);
            Padding { x: stroke / 2.0, y: stroke / 2.0 }
        }
        ElementType::Unknown => {
            let stroke = (size * 0.05).max(2.0);
            Padding { x: stroke / 2.0, y: stroke / 2.0 }
        }
    }
}

/// Computes the half-extents of the axis-aligned bounding box of a
/// `(width + 2·padding.x) × (height + 2·padding.y)` rectangle rotated
/// by `rotation_degrees` about its center.
///
/// Uses the standard rotated-rectangle AABB formula:
/// `extent_x = |halfW·cosθ| + |halfH·sinθ|` (and symmetrically for y).
#[must_use]
pub fn rotated_extents(
    width: f32,
    height: f32,
    rotation_degrees: f32,
    padding: Padding,
) -> Extents {
    let half_padded_width = (width + padding.x * 2.0) / 2.0;
    let half_padded_height = (height + padding.y * 2.0) / 2.0;

    let radians = rotation_degrees.to_radians();
    let cos = radians.cos();
    let sin = radians.sin();

    Extents {
        x: (half_padded_width * cos).abs() + (half_padded_height * sin).abs(),
        y: (half_padded_width * sin).abs() + (half_padded_height * cos).abs(),
    }
}

/// Axis-aligned bounds of an element box positioned with its top-left
/// corner at `(x, y)`, rotated about its own center.
#[must_use]
pub fn element_bounds(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    rotation_degrees: f32,
    padding: Padding,
) -> Bounds {
    let center_x = x + width / 2.0;
    let center_y = y + height / 2.0;

    let extents = rotated_extents(width, height, rotation_degrees, padding);

    Bounds {
        min_x: center_x - extents.x,
        max_x: center_x + extents.x,
        min_y: center_y - extents.y,
        max_y: center_y + extents.y,
    }
}

/// Clamps an element's top-left position so its rotated, padded bounds
/// stay inside a `stage_width × stage_height` rectangle.
///
/// The legal range is computed for the element's *center*; when the
/// element is larger than the stage the upper bound is floored at the
/// lower bound so the center pins to the near edge instead of the range
/// inverting. This is the single chokepoint for the stage-containment
/// invariant: every mutation path routes its final position through
/// here.
///
/// # Returns
///
/// The clamped top-left `(x, y)`.
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn clamp_position_within_stage(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    rotation_degrees: f32,
    padding: Padding,
    stage_width: f32,
    stage_height: f32,
) -> (f32, f32) {
    let half_width = width / 2.0;
    let half_height = height / 2.0;
    let center_x = x + half_width;
    let center_y = y + half_height;

    let extents = rotated_extents(width, height, rotation_degrees, padding);

    let min_center_x = extents.x;
    let max_center_x = (stage_width - extents.x).max(min_center_x);
    let min_center_y = extents.y;
    let max_center_y = (stage_height - extents.y).max(min_center_y);

    let clamped_center_x = clamp(center_x, min_center_x, max_center_x);
    let clamped_center_y = clamp(center_y, min_center_y, max_center_y);

    (clamped_center_x - half_width, clamped_center_y - half_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extents_unrotated_match_padded_half_dimensions() {
        let extents = rotated_extents(100.0, 60.0, 0.0, Padding { x: 2.0, y: 3.0 });
        assert!((extents.x - 52.0).abs() < 1e-4);
        assert!((extents.y - 33.0).abs() < 1e-4);
    }

    #[test]
    fn extents_at_ninety_degrees_swap_axes() {
        let extents = rotated_extents(100.0, 60.0, 90.0, Padding::default());
        assert!((extents.x - 30.0).abs() < 1e-3);
        assert!((extents.y - 50.0).abs() < 1e-3);
    }

    #[test]
    fn extents_invariant_under_half_turn() {
        for rotation in [0.0_f32, 13.0, 45.0, 77.5, 120.0, 359.0] {
            let a = rotated_extents(140.0, 52.0, rotation, Padding { x: 1.5, y: 1.5 });
            let b = rotated_extents(140.0, 52.0, rotation + 180.0, Padding { x: 1.5, y: 1.5 });
            assert!((a.x - b.x).abs() < 1e-3, "x extents differ at {rotation}");
            assert!((a.y - b.y).abs() < 1e-3, "y extents differ at {rotation}");
        }
    }

    #[test]
    fn bounds_center_on_element_center() {
        let bounds = element_bounds(10.0, 20.0, 80.0, 40.0, 30.0, Padding::default());
        assert!(((bounds.min_x + bounds.max_x) / 2.0 - 50.0).abs() < 1e-3);
        assert!(((bounds.min_y + bounds.max_y) / 2.0 - 40.0).abs() < 1e-3);
    }

    #[test]
    fn clamp_keeps_rotated_bounds_inside_stage() {
        let padding = visual_padding(ElementType::RoundTable, 96.0, 96.0);
        let (x, y) = clamp_position_within_stage(-500.0, 900.0, 96.0, 96.0, 37.0, padding, 800.0, 600.0);
        let bounds = element_bounds(x, y, 96.0, 96.0, 37.0, padding);
        let stage = Bounds { min_x: 0.0, max_x: 800.0, min_y: 0.0, max_y: 600.0 };
        assert!(bounds.contained_in(&stage), "bounds {bounds:?} escaped the stage");
    }

    #[test]
    fn clamp_is_idempotent() {
        let padding = visual_padding(ElementType::Bar, 134.0, 57.0);
        let first = clamp_position_within_stage(790.0, -30.0, 134.0, 57.0, 63.0, padding, 800.0, 600.0);
        let second = clamp_position_within_stage(first.0, first.1, 134.0, 57.0, 63.0, padding, 800.0, 600.0);
        assert!((first.0 - second.0).abs() < 1e-4);
        assert!((first.1 - second.1).abs() < 1e-4);
    }

    #[test]
    fn clamp_leaves_interior_position_untouched() {
        let padding = visual_padding(ElementType::SquareTable, 96.0, 96.0);
        let (x, y) = clamp_position_within_stage(300.0, 200.0, 96.0, 96.0, 0.0, padding, 800.0, 600.0);
        assert!((x - 300.0).abs() < 1e-4);
        assert!((y - 200.0).abs() < 1e-4);
    }

    #[test]
    fn oversized_element_pins_to_near_edge_without_inverting() {
        // Element wider than the stage: legal center range collapses to the
        // lower bound, so the result is deterministic rather than NaN/flipped.
        let (x, _) = clamp_position_within_stage(0.0, 0.0, 240.0, 240.0, 0.0, Padding::default(), 100.0, 100.0);
        assert!((x - (120.0 - 120.0)).abs() < 1e-4);
        let (x2, _) = clamp_position_within_stage(50.0, 0.0, 240.0, 240.0, 0.0, Padding::default(), 100.0, 100.0);
        assert!((x2 - x).abs() < 1e-4);
    }

    #[test]
    fn padding_table_matches_type_formulas() {
        // Tables: 8% of the smaller dimension, floored at 4, halved per side.
        assert_eq!(visual_padding(ElementType::RoundTable, 100.0, 100.0), Padding { x: 4.0, y: 4.0 });
        // Small tables hit the 4px stroke floor.
        assert_eq!(visual_padding(ElementType::SquareTable, 48.0, 48.0), Padding { x: 2.0, y: 2.0 });
        // Boundary pads by the full stroke on both axes.
        let boundary = visual_padding(ElementType::Boundary, 200.0, 100.0);
        assert!((boundary.x - 4.0).abs() < 1e-4);
        assert!((boundary.y - 4.0).abs() < 1e-4);
        // Strip pads only vertically.
        let strip = visual_padding(ElementType::Strip, 160.0, 24.0);
        assert_eq!(strip.x, 0.0);
        assert!((strip.y - 4.8).abs() < 1e-4);
        // Service areas render without overflow.
        assert_eq!(visual_padding(ElementType::Kitchen, 150.0, 90.0), Padding { x: 0.0, y: 0.0 });
        assert_eq!(visual_padding(ElementType::Restrooms, 120.0, 80.0), Padding { x: 0.0, y: 0.0 });
        // Unknown types use the default 5% rule.
        let unknown = visual_padding(ElementType::Unknown, 100.0, 100.0);
        assert!((unknown.x - 2.5).abs() < 1e-4);
    }

    #[test]
    fn clamp_resolves_inverted_range_toward_max() {
        assert_eq!(clamp(5.0, 10.0, 0.0), 0.0);
        assert_eq!(clamp(-3.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(42.0, 0.0, 10.0), 10.0);
    }
}
