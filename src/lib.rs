//! # Venue Designer
//!
//! A drag-and-drop event-layout designer: drag venue iconography
//! (tables, bars, exits, booths) from the tool palette onto the stage,
//! then position, resize, and rotate it freely. Layouts export as JSON
//! or as a single-page PDF of the stage.
//!
//! ## Features
//! - Stage-contained element placement under arbitrary rotation
//! - Single, shift-, and rubber-band selection
//! - Group dragging with per-element bounds clamping
//! - Aspect-locked and freeform resize handles, free-angle rotation
//! - Copy/paste/duplicate with cascading offsets
//! - JSON and PDF export

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod geometry;
pub mod icons;
pub mod types;
mod ui;

pub use ui::DesignerApp;

/// Runs the venue designer with default settings.
///
/// Initializes the egui application window and starts the main event
/// loop.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an
/// `eframe::Error` if initialization fails.
///
/// # Example
///
/// ```no_run
/// use venue_designer::run_app;
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app()
/// }
/// ```
pub fn run_app() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Venue Designer",
        options,
        Box::new(|_cc| Ok(Box::new(DesignerApp::default()))),
    )
}
