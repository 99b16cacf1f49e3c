//! Shared application-wide constants.
//! Centralizes tweakable values used across UI rendering and interactions.

use egui::Color32;

// Element dimensions
/// Default footprint (width and height) for a freshly dropped element, in stage pixels.
pub const DEFAULT_ELEMENT_SIZE: f32 = 96.0;
/// Smallest width/height an interactive resize may produce.
pub const MIN_ELEMENT_SIZE: f32 = 48.0;
/// Largest width/height an interactive resize may produce.
pub const MAX_ELEMENT_SIZE: f32 = 240.0;

// Selection handles
/// Side length of the square resize handle, in stage pixels.
pub const RESIZE_HANDLE_SIZE: f32 = 20.0;
/// Radius of the circular rotation handle, in stage pixels.
pub const ROTATION_HANDLE_RADIUS: f32 = 12.0;
/// Distance from an element's larger half-extent to its rotation handle center.
pub const ROTATION_HANDLE_OFFSET: f32 = 36.0;

// Stage interactions
/// Minimum rubber-band dimension (both axes) for an area selection to count.
pub const RUBBER_BAND_MIN_SIZE: f32 = 3.0;
/// Cascading offset applied per clipboard entry on paste, in stage pixels.
pub const PASTE_OFFSET_STEP: f32 = 24.0;
/// Cascading offset applied per selected element on duplicate, in stage pixels.
pub const DUPLICATE_OFFSET_STEP: f32 = 28.0;

// Stage appearance
/// Background grid cell size in stage pixels.
pub const GRID_SIZE: f32 = 16.0;
/// Stage background fill.
pub const STAGE_BACKGROUND: Color32 = Color32::BLACK;
/// Grid line color.
pub const GRID_COLOR: Color32 = Color32::from_gray(24);
/// Accent color used for selection affordances and glyph strokes.
pub const HIGHLIGHT_GOLD: Color32 = Color32::from_rgb(0xd4, 0xaf, 0x37);
/// Secondary glyph color.
pub const TEXT_SILVER: Color32 = Color32::from_rgb(0xc0, 0xc0, 0xc0);
/// Stroke used for the line connecting an element to its rotation handle.
pub const HANDLE_LINE_COLOR: Color32 = Color32::from_rgb(0x3d, 0x3d, 0x3d);
/// Panel and stage border color.
pub const PANEL_BORDER: Color32 = Color32::from_rgb(0x2a, 0x2a, 0x2a);
