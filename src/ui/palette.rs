//! Tool palette: the drag source for new elements.
//!
//! Each palette item is a template carrying the semantic defaults of
//! the element it creates. Items are dragged with egui's drag-and-drop
//! payloads; the stage widget consumes the payload on release and asks
//! the controller to create a clamped element at the drop point.

use eframe::egui;
use egui::{Color32, Stroke};

use super::state::DesignerApp;
use crate::constants::{HIGHLIGHT_GOLD, PANEL_BORDER, TEXT_SILVER};
use crate::types::ElementType;

/// A draggable palette template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteItem {
    /// Stable widget id.
    pub id: &'static str,
    /// Short badge text shown in the item card.
    pub glyph: &'static str,
    /// Human-readable item name.
    pub label: &'static str,
    /// Element type this template creates.
    pub element_type: ElementType,
    /// Default seating capacity, if the type has one.
    pub capacity: Option<u32>,
    /// Default label text, if the type has one.
    pub text: Option<&'static str>,
    /// Custom icon key, resolved against the icon registry.
    pub image_key: Option<&'static str>,
}

/// The built-in palette, in display order.
pub const PALETTE_ITEMS: &[PaletteItem] = &[
    PaletteItem {
        id: "round-table",
        glyph: "O",
        label: "Round Table",
        element_type: ElementType::RoundTable,
        capacity: Some(10),
        text: None,
        image_key: Some("round-table"),
    },
    PaletteItem {
        id: "square-table",
        glyph: "[]",
        label: "Square Table",
        element_type: ElementType::SquareTable,
        capacity: Some(8),
        text: None,
        image_key: Some("square-table"),
    },
    PaletteItem {
        id: "dance-floor",
        glyph: "X",
        label: "Dance Floor",
        element_type: ElementType::DanceFloor,
        capacity: None,
        text: None,
        image_key: Some("dance-floor"),
    },
    PaletteItem {
        id: "bar",
        glyph: "=",
        label: "Bar",
        element_type: ElementType::Bar,
        capacity: None,
        text: None,
        image_key: Some("bar"),
    },
    PaletteItem {
        id: "exit",
        glyph: ">",
        label: "Exit",
        element_type: ElementType::Exit,
        capacity: None,
        text: None,
        image_key: Some("exit"),
    },
    PaletteItem {
        id: "boundary",
        glyph: "#",
        label: "Boundary",
        element_type: ElementType::Boundary,
        capacity: None,
        text: None,
        image_key: Some("boundary"),
    },
    PaletteItem {
        id: "strip",
        glyph: "..",
        label: "Divider Strip",
        element_type: ElementType::Strip,
        capacity: None,
        text: None,
        image_key: Some("strip"),
    },
    PaletteItem {
        id: "restrooms",
        glyph: "WC",
        label: "Restrooms",
        element_type: ElementType::Restrooms,
        capacity: None,
        text: None,
        image_key: Some("restrooms"),
    },
    PaletteItem {
        id: "sound-booth",
        glyph: "DJ",
        label: "Sound Booth",
        element_type: ElementType::SoundBooth,
        capacity: None,
        text: None,
        image_key: Some("sound-booth"),
    },
    PaletteItem {
        id: "kitchen",
        glyph: "CK",
        label: "Kitchen",
        element_type: ElementType::Kitchen,
        capacity: None,
        text: None,
        image_key: Some("kitchen"),
    },
    PaletteItem {
        id: "label",
        glyph: "TXT",
        label: "Label",
        element_type: ElementType::Label,
        capacity: None,
        text: Some("Label"),
        image_key: Some("label"),
    },
];

impl DesignerApp {
    /// Draws the palette panel contents.
    pub fn draw_palette(&mut self, ui: &mut egui::Ui) {
        ui.add_space(4.0);
        ui.label(
            egui::RichText::new("Drag an element onto the stage.")
                .size(11.0)
                .color(TEXT_SILVER),
        );
        ui.add_space(8.0);

        egui::ScrollArea::vertical().show(ui, |ui| {
            for item in PALETTE_ITEMS {
                let drag_id = egui::Id::new("palette-item").with(item.id);
                ui.dnd_drag_source(drag_id, *item, |ui| {
                    draw_palette_card(ui, item);
                });
                ui.add_space(6.0);
            }
        });
    }
}

fn draw_palette_card(ui: &mut egui::Ui, item: &PaletteItem) {
    egui::Frame::new()
        .fill(Color32::from_rgb(0x10, 0x10, 0x10))
        .stroke(Stroke::new(1.0, PANEL_BORDER))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(item.glyph)
                        .monospace()
                        .size(16.0)
                        .color(HIGHLIGHT_GOLD),
                );
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(item.label).strong().color(Color32::WHITE));
                    ui.label(
                        egui::RichText::new(item_details(item))
                            .size(10.0)
                            .color(Color32::from_gray(0x8a)),
                    );
                });
            });
        });
}

/// Detail line shown under the item name: capacity, default text, and
/// icon hints.
fn item_details(item: &PaletteItem) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(capacity) = item.capacity {
        parts.push(format!("{capacity} pax"));
    }
    if let Some(text) = item.text {
        parts.push(format!("\"{text}\""));
    }
    if let Some(key) = item.image_key {
        parts.push(format!("img:{key}"));
    }
    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(" · ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_covers_every_semantic_type() {
        for element_type in [
            ElementType::RoundTable,
            ElementType::SquareTable,
            ElementType::DanceFloor,
            ElementType::Bar,
            ElementType::Exit,
            ElementType::Boundary,
            ElementType::Strip,
            ElementType::Label,
            ElementType::Restrooms,
            ElementType::SoundBooth,
            ElementType::Kitchen,
        ] {
            assert!(
                PALETTE_ITEMS.iter().any(|item| item.element_type == element_type),
                "no palette item for {element_type:?}"
            );
        }
    }

    #[test]
    fn tables_carry_capacity_defaults() {
        let round = PALETTE_ITEMS.iter().find(|i| i.id == "round-table").unwrap();
        assert_eq!(round.capacity, Some(10));
        let square = PALETTE_ITEMS.iter().find(|i| i.id == "square-table").unwrap();
        assert_eq!(square.capacity, Some(8));
    }

    #[test]
    fn label_template_has_default_text() {
        let label = PALETTE_ITEMS.iter().find(|i| i.id == "label").unwrap();
        assert_eq!(label.text, Some("Label"));
    }
}
