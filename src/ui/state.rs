//! Application state structures.
//!
//! Groups the designer's runtime state: the measured stage, the
//! interaction state machine (selection, gestures, clipboard), export
//! plumbing, and the lazy icon texture cache. All of it composes into
//! [`DesignerApp`], the main application struct.

use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, Sender};

use eframe::egui;

use crate::geometry::{Bounds, Padding};
use crate::types::{Design, Element, ElementId};

/// Measured stage geometry, updated every frame from the allocated
/// canvas area.
#[derive(Debug, Clone, Copy)]
pub struct StageState {
    /// Stage size in pixels. Interaction and containment math all work
    /// in this pixel rectangle with origin at the stage's top-left.
    pub size: egui::Vec2,
}

impl Default for StageState {
    fn default() -> Self {
        Self { size: egui::vec2(800.0, 600.0) }
    }
}

/// Per-element snapshot taken when a group drag starts.
///
/// The drag renders members from this snapshot plus the current clamped
/// delta; the store is only written on release.
#[derive(Debug, Clone)]
pub struct GroupDragSnapshot {
    /// Element being carried by the group drag.
    pub id: ElementId,
    /// Left edge at drag start.
    pub start_x: f32,
    /// Top edge at drag start.
    pub start_y: f32,
    /// Width at drag start.
    pub width: f32,
    /// Height at drag start.
    pub height: f32,
    /// Rotation at drag start.
    pub rotation: f32,
    /// Visual padding at drag start.
    pub padding: Padding,
    /// Rotated, padded bounds at drag start.
    pub bounds: Bounds,
}

/// Legal translation range for a group drag, intersected across all
/// members so every element stays in-stage simultaneously.
#[derive(Debug, Clone, Copy)]
pub struct DeltaRange {
    /// Most negative allowed x delta.
    pub min_x: f32,
    /// Most positive allowed x delta.
    pub max_x: f32,
    /// Most negative allowed y delta.
    pub min_y: f32,
    /// Most positive allowed y delta.
    pub max_y: f32,
}

/// The active pointer gesture, if any. `None` is the idle state.
///
/// Each variant carries the context needed to compute incremental
/// deltas and emit the final store mutation on release.
#[derive(Debug, Clone)]
pub enum Gesture {
    /// Drag-to-select rectangle on empty stage area.
    RubberBand {
        /// Pointer position where the drag started.
        anchor: egui::Pos2,
        /// Current pointer position.
        current: egui::Pos2,
    },
    /// Moving a single element.
    DragElement {
        /// Element being dragged.
        id: ElementId,
        /// Offset from the element's top-left to the grab point.
        grab_offset: egui::Vec2,
        /// Current clamped visual position; committed on release.
        position: egui::Pos2,
    },
    /// Moving every selected element via the multi-selection overlay.
    DragGroup {
        /// Pointer position where the drag started.
        origin: egui::Pos2,
        /// Start transforms and bounds of every member.
        snapshots: Vec<GroupDragSnapshot>,
        /// Intersected legal delta range.
        range: DeltaRange,
        /// Current clamped delta; committed on release.
        delta: egui::Vec2,
    },
    /// Dragging an element's resize handle.
    Resize {
        /// Element being resized.
        id: ElementId,
    },
    /// Dragging an element's rotation handle.
    Rotate {
        /// Element being rotated.
        id: ElementId,
    },
}

/// Selection, gesture, clipboard, and label-editing state.
#[derive(Default)]
pub struct InteractionState {
    /// Currently selected element ids, in selection order.
    pub selected_ids: Vec<ElementId>,
    /// The active pointer gesture, if any.
    pub gesture: Option<Gesture>,
    /// Snapshot of the most recent copy; consumed (not cleared) by
    /// paste.
    pub clipboard: Vec<Element>,
    /// Label element currently being edited, if any.
    pub editing_label: Option<ElementId>,
    /// Temporary text buffer for the label editor window.
    pub temp_label_text: String,
}

impl InteractionState {
    /// Whether the given element is part of the current selection.
    #[must_use]
    pub fn is_selected(&self, id: &ElementId) -> bool {
        self.selected_ids.contains(id)
    }

    /// The element currently being rotated, if a rotation gesture is
    /// active.
    #[must_use]
    pub fn rotating_id(&self) -> Option<ElementId> {
        match self.gesture {
            Some(Gesture::Rotate { id }) => Some(id),
            _ => None,
        }
    }

    /// The position an element should render at this frame: the live
    /// gesture position while it is being dragged (alone or as part of
    /// a group), the store position otherwise.
    #[must_use]
    pub fn visual_position(&self, element: &Element) -> egui::Pos2 {
        match &self.gesture {
            Some(Gesture::DragElement { id, position, .. }) if *id == element.id => *position,
            Some(Gesture::DragGroup { snapshots, delta, .. }) => snapshots
                .iter()
                .find(|snapshot| snapshot.id == element.id)
                .map_or(egui::pos2(element.x, element.y), |snapshot| {
                    egui::pos2(snapshot.start_x + delta.x, snapshot.start_y + delta.y)
                }),
            _ => egui::pos2(element.x, element.y),
        }
    }
}

/// Result of an asynchronous export operation, reported back to the UI
/// thread over the export channel.
#[derive(Debug)]
pub enum ExportResult {
    /// The file was written to the given path.
    Completed(String),
    /// The export failed with an error message.
    Failed(String),
}

/// Export plumbing: the channel exports report through, and (natively)
/// the runtime the save dialogs run on.
pub struct ExportState {
    /// Sender handed to spawned export tasks.
    pub sender: Sender<ExportResult>,
    /// Receiver drained at the top of each frame.
    pub receiver: Receiver<ExportResult>,
    /// Runtime for async save dialogs. `None` if construction failed,
    /// in which case exports are disabled with a logged message.
    #[cfg(not(target_arch = "wasm32"))]
    pub runtime: Option<tokio::runtime::Runtime>,
}

impl Default for ExportState {
    fn default() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver,
            #[cfg(not(target_arch = "wasm32"))]
            runtime: tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
                .map_err(|err| eprintln!("Failed to start export runtime: {err}"))
                .ok(),
        }
    }
}

/// Lazy cache of custom icon textures.
///
/// Each key is loaded at most once; a failed load is cached as `None`
/// so the renderer permanently falls back to the procedural glyph for
/// that key without retrying every frame.
#[derive(Default)]
pub struct IconCache {
    textures: HashMap<String, Option<egui::TextureHandle>>,
}

impl IconCache {
    /// Returns the texture for an icon key, loading and decoding the
    /// asset on first use. Keys without a registry entry resolve to
    /// `None` silently; a registered asset that fails to load is
    /// reported once.
    pub fn texture(&mut self, ctx: &egui::Context, key: &str) -> Option<egui::TextureHandle> {
        if let Some(cached) = self.textures.get(key) {
            return cached.clone();
        }

        let loaded = match crate::icons::icon_asset_path(key) {
            None => None,
            Some(path) => {
                let texture = Self::load(ctx, key, path);
                if texture.is_none() {
                    eprintln!("Icon '{key}' failed to load from {path}; using the procedural glyph");
                }
                texture
            }
        };
        self.textures.insert(key.to_string(), loaded.clone());
        loaded
    }

    fn load(ctx: &egui::Context, key: &str, path: &str) -> Option<egui::TextureHandle> {
        let bytes = std::fs::read(path).ok()?;
        let decoded = image::load_from_memory(&bytes).ok()?;
        let rgba = decoded.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
        Some(ctx.load_texture(format!("icon-{key}"), color_image, egui::TextureOptions::LINEAR))
    }
}

/// The main application structure containing the design and all UI
/// state. Implements `eframe::App`.
#[derive(Default)]
pub struct DesignerApp {
    /// The element store being edited.
    pub design: Design,
    /// Measured stage geometry.
    pub stage: StageState,
    /// Selection, gestures, clipboard.
    pub interaction: InteractionState,
    /// Export channel and runtime.
    pub export: ExportState,
    /// Custom icon textures.
    pub icons: IconCache,
}
