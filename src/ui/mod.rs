//! User interface components for the venue designer.
//!
//! This module contains the main application struct and everything it
//! draws: the tool palette, the toolbar, the stage with its interaction
//! handling, the label editor, and the export flows.
//!
//! # Module Organization
//!
//! - `state` - Application state structures and the main DesignerApp
//! - `canvas` - The stage interaction controller (selection, gestures)
//! - `rendering` - Drawing elements, handles, and selection overlays
//! - `palette` - The drag-source tool palette
//! - `export` - JSON and PDF export adapters

mod canvas;
mod export;
mod palette;
mod rendering;
mod state;

#[cfg(test)]
mod tests;

pub use state::DesignerApp;

use eframe::egui;

use self::palette::PaletteItem;
use crate::constants::HIGHLIGHT_GOLD;

impl eframe::App for DesignerApp {
    /// Main update function called by egui for each frame.
    ///
    /// Drains finished export operations, applies keyboard shortcuts,
    /// and lays out the palette, toolbar, and stage.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        self.handle_pending_exports();
        self.handle_keyboard_shortcuts(ctx);

        egui::SidePanel::left("tool-palette")
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                ui.heading("Tools");
                self.draw_palette(ui);
            });

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_stage(ui);
        });

        self.draw_label_editor(ctx);
    }
}

impl DesignerApp {
    /// Applies keyboard shortcuts: Delete/Backspace removes the
    /// selection, Ctrl/Cmd+C copies it, Ctrl/Cmd+V pastes the
    /// clipboard. Suppressed while a text widget has focus.
    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }

        let (delete, copy, paste) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace),
                i.modifiers.command && i.key_pressed(egui::Key::C),
                i.modifiers.command && i.key_pressed(egui::Key::V),
            )
        });

        if delete {
            self.delete_selection();
        }
        if copy {
            self.copy_selection();
        }
        if paste {
            self.paste_clipboard();
        }
    }

    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.add_space(2.0);
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Venue Designer").strong());
            ui.separator();

            if ui.button("Export JSON").clicked() {
                self.export_json(ui.ctx());
            }
            if ui.button("Export PDF").clicked() {
                self.export_pdf(ui.ctx());
            }
            ui.separator();

            let has_selection = !self.interaction.selected_ids.is_empty();
            if ui
                .add_enabled(has_selection, egui::Button::new("Duplicate"))
                .clicked()
            {
                self.duplicate_selection();
            }
            if ui
                .add_enabled(has_selection, egui::Button::new("Delete"))
                .clicked()
            {
                self.delete_selection();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let count = self.design.len();
                let suffix = if count == 1 { "" } else { "s" };
                ui.label(
                    egui::RichText::new(format!("{count} element{suffix}"))
                        .size(11.0)
                        .weak(),
                );
            });
        });
        ui.add_space(2.0);
    }

    /// Allocates the stage area, feeds pointer input to the interaction
    /// controller, accepts palette drops, and renders everything.
    fn draw_stage(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let stage_rect = response.rect;
        self.stage.size = stage_rect.size();

        let (pressed, down, released, pointer_pos, shift) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
                i.modifiers.shift,
            )
        });
        let stage_pos = pointer_pos.map(|pos| (pos - stage_rect.min).to_pos2());

        // Presses must start on the stage; moves and releases are
        // handled wherever the pointer ends up so drags finish cleanly
        // outside the window too.
        if pressed {
            if response.hovered() {
                if let Some(pos) = stage_pos {
                    self.pointer_pressed(pos, shift);
                }
            }
        } else if down {
            if let Some(pos) = stage_pos {
                self.pointer_moved(pos);
            }
        }
        if released {
            self.pointer_released(stage_pos, shift);
        } else if !down && self.interaction.gesture.is_some() {
            // The release never reached us (focus loss, platform cancel):
            // discard the in-flight gesture instead of committing it.
            self.pointer_cancelled();
        }

        if response.double_clicked() {
            if let Some(pos) = stage_pos {
                if let Some(id) = self.element_at(pos) {
                    self.begin_label_edit(id);
                }
            }
        }

        // Palette drops create a new element centered at the pointer.
        let dropping = response.dnd_hover_payload::<PaletteItem>().is_some();
        if let Some(item) = response.dnd_release_payload::<PaletteItem>() {
            if let Some(pos) = stage_pos {
                self.drop_palette_item(&item, pos);
            }
        }

        self.render_stage(&painter, stage_rect);

        if dropping {
            painter.rect_stroke(
                stage_rect,
                12.0,
                egui::Stroke::new(3.0, HIGHLIGHT_GOLD),
                egui::epaint::StrokeKind::Inside,
            );
        }
    }

    /// Shows the label editor window while a label is being edited.
    fn draw_label_editor(&mut self, ctx: &egui::Context) {
        if self.interaction.editing_label.is_none() {
            return;
        }

        let mut save = false;
        let mut cancel = false;

        egui::Window::new("Edit Label")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                let edit = egui::TextEdit::singleline(&mut self.interaction.temp_label_text)
                    .hint_text("Label text");
                let response = ui.add(edit);
                response.request_focus();
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    save = true;
                }

                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        save = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });

        if save {
            self.commit_label_edit();
        } else if cancel {
            self.cancel_label_edit();
        }
    }
}
