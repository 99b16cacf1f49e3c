//! Export adapters: serialize the design to JSON and render it to PDF.
//!
//! JSON export maps each element to a wire shape with kebab-cased type
//! strings and stamps the document with a generation timestamp. PDF
//! export builds an SVG scene of the stage, rasterizes it with resvg,
//! and embeds the raster full-bleed into a single-page PDF sized to the
//! stage.
//!
//! Notes:
//! - JSON export is supported on all targets (native + wasm).
//! - PDF export is supported on native targets only (wasm skipped).

use std::fmt::Write as _;

use eframe::egui;
use serde::{Deserialize, Serialize};

use super::state::{DesignerApp, ExportResult};
use crate::constants::GRID_SIZE;
use crate::types::{Design, Element, ElementId, ElementType};

/// Wire shape for one exported element.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementExport {
    /// Element id.
    pub id: ElementId,
    /// Kebab-cased semantic type.
    #[serde(rename = "type")]
    pub element_type: ElementType,
    /// Seating capacity, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    /// Left edge in stage pixels.
    pub x: f32,
    /// Top edge in stage pixels.
    pub y: f32,
    /// Reserved icon slot, always empty (kept for wire compatibility).
    pub icon: String,
    /// Box width in stage pixels.
    pub width: f32,
    /// Box height in stage pixels.
    pub height: f32,
    /// Rotation in degrees.
    pub rotation: f32,
    /// Label text, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Custom icon key, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_key: Option<String>,
}

impl From<&Element> for ElementExport {
    fn from(element: &Element) -> Self {
        Self {
            id: element.id,
            element_type: element.element_type,
            capacity: element.capacity,
            x: element.x,
            y: element.y,
            icon: String::new(),
            width: element.width,
            height: element.height,
            rotation: element.rotation,
            text: element.text.clone(),
            image_key: element.image_key.clone(),
        }
    }
}

/// Top-level JSON export document.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignExport {
    /// RFC 3339 timestamp of when the export was generated.
    pub generated_at: String,
    /// All exported elements, in draw order.
    pub elements: Vec<ElementExport>,
}

/// Serializes a design to the pretty-printed JSON wire format.
pub fn design_to_json(design: &Design) -> Result<String, serde_json::Error> {
    let export = DesignExport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        elements: design.elements.iter().map(ElementExport::from).collect(),
    };
    serde_json::to_string_pretty(&export)
}

impl DesignerApp {
    /// Drains completed export operations from the channel and reports
    /// them. Called once at the top of every frame.
    pub fn handle_pending_exports(&mut self) {
        while let Ok(result) = self.export.receiver.try_recv() {
            match result {
                ExportResult::Completed(path) => println!("Export written to {path}"),
                ExportResult::Failed(err) => eprintln!("Export failed: {err}"),
            }
        }
    }

    /// Exports the design as JSON: a save dialog on native targets, a
    /// browser download on wasm.
    pub fn export_json(&mut self, ctx: &egui::Context) {
        let json = match design_to_json(&self.design) {
            Ok(json) => json,
            Err(err) => {
                eprintln!("Failed to serialize design: {err}");
                return;
            }
        };

        #[cfg(target_arch = "wasm32")]
        {
            let _ = ctx;
            if let Err(err) = trigger_download("venue-design.json", &json) {
                eprintln!("Failed to start JSON download: {err}");
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        self.save_with_dialog(ctx, json.into_bytes(), "venue-design.json", "JSON", &["json"]);
    }

    /// Exports the design as a single-page PDF (native builds only).
    pub fn export_pdf(&mut self, ctx: &egui::Context) {
        #[cfg(target_arch = "wasm32")]
        {
            let _ = ctx;
            eprintln!("PDF export is not supported in the browser build");
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let bytes = match self.build_pdf() {
                Ok(bytes) => bytes,
                Err(err) => {
                    let _ = self.export.sender.send(ExportResult::Failed(err));
                    ctx.request_repaint();
                    return;
                }
            };
            self.save_with_dialog(ctx, bytes, "venue-design.pdf", "PDF", &["pdf"]);
        }
    }

    /// Spawns an async save dialog and writes `bytes` to the chosen
    /// path, reporting the outcome over the export channel.
    #[cfg(not(target_arch = "wasm32"))]
    fn save_with_dialog(
        &mut self,
        ctx: &egui::Context,
        bytes: Vec<u8>,
        file_name: &str,
        filter_name: &str,
        extensions: &[&str],
    ) {
        let Some(runtime) = self.export.runtime.as_ref() else {
            eprintln!("Export unavailable: no runtime for the save dialog");
            return;
        };

        let sender = self.export.sender.clone();
        let ctx = ctx.clone();
        let file_name = file_name.to_string();
        let filter_name = filter_name.to_string();
        let extensions: Vec<String> = extensions.iter().map(|e| (*e).to_string()).collect();

        runtime.spawn(async move {
            let extension_refs: Vec<&str> = extensions.iter().map(String::as_str).collect();
            if let Some(handle) = rfd::AsyncFileDialog::new()
                .add_filter(filter_name, &extension_refs)
                .set_file_name(file_name)
                .save_file()
                .await
            {
                let path = handle.path().display().to_string();
                let result = match std::fs::write(handle.path(), &bytes) {
                    Ok(()) => ExportResult::Completed(path),
                    Err(err) => ExportResult::Failed(format!("could not write {path}: {err}")),
                };
                let _ = sender.send(result);
            }
            ctx.request_repaint();
        });
    }

    /// Rasterizes the stage and embeds it in a PDF page sized to the
    /// stage's pixel dimensions, aspect-preserved and centered.
    #[cfg(not(target_arch = "wasm32"))]
    fn build_pdf(&self) -> Result<Vec<u8>, String> {
        use printpdf::{
            ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Mm, PdfDocument, Px,
        };
        use std::sync::Arc;

        let (svg, stage_width, stage_height) = self.build_stage_svg();

        let mut options = usvg::Options::default();
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        options.fontdb = Arc::new(db);

        let tree = usvg::Tree::from_data(svg.as_bytes(), &options)
            .map_err(|err| format!("could not parse stage SVG: {err}"))?;

        // Rasterize at 2x for a crisp embed.
        let scale = 2.0_f32;
        let raster_width = ((stage_width as f32) * scale).round().max(1.0) as u32;
        let raster_height = ((stage_height as f32) * scale).round().max(1.0) as u32;
        let mut pixmap = tiny_skia::Pixmap::new(raster_width, raster_height)
            .ok_or_else(|| format!("could not allocate {raster_width}x{raster_height} pixmap"))?;
        pixmap.fill(tiny_skia::Color::BLACK);
        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        // The pixmap is opaque (filled background), so RGB extraction
        // can ignore the alpha channel.
        let mut rgb = Vec::with_capacity((raster_width * raster_height * 3) as usize);
        for pixel in pixmap.data().chunks_exact(4) {
            rgb.extend_from_slice(&pixel[..3]);
        }

        const MM_PER_PX: f32 = 25.4 / 96.0;
        let page_width_mm = stage_width as f32 * MM_PER_PX;
        let page_height_mm = stage_height as f32 * MM_PER_PX;

        let (doc, page, layer) =
            PdfDocument::new("Venue Design", Mm(page_width_mm), Mm(page_height_mm), "Stage");

        // Aspect-preserving fit, centered. The page matches the stage
        // aspect so this normally fills the page edge to edge.
        let mut render_width_mm = page_width_mm;
        let mut render_height_mm = render_width_mm * raster_height as f32 / raster_width as f32;
        if render_height_mm > page_height_mm {
            render_height_mm = page_height_mm;
            render_width_mm = render_height_mm * raster_width as f32 / raster_height as f32;
        }
        let offset_x_mm = (page_width_mm - render_width_mm) / 2.0;
        let offset_y_mm = (page_height_mm - render_height_mm) / 2.0;

        let image = Image::from(ImageXObject {
            width: Px(raster_width as usize),
            height: Px(raster_height as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: rgb,
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        });
        let dpi = raster_width as f32 / (render_width_mm / 25.4);
        image.add_to_layer(
            doc.get_page(page).get_layer(layer),
            ImageTransform {
                translate_x: Some(Mm(offset_x_mm)),
                translate_y: Some(Mm(offset_y_mm)),
                dpi: Some(dpi),
                ..Default::default()
            },
        );

        doc.save_to_bytes().map_err(|err| format!("could not assemble PDF: {err}"))
    }

    /// Builds an SVG scene of the stage. Returns `(svg, width, height)`
    /// in stage pixels.
    pub fn build_stage_svg(&self) -> (String, u32, u32) {
        let width = self.stage.size.x.ceil().max(1.0) as u32;
        let height = self.stage.size.y.ceil().max(1.0) as u32;

        let mut out = String::new();
        let _ = writeln!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
        );
        let _ = writeln!(
            out,
            "<rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" fill=\"#000000\" />"
        );

        // Faint grid, matching the on-screen stage.
        let _ = writeln!(out, "<g stroke=\"#181818\" stroke-width=\"1\">");
        let mut x = GRID_SIZE;
        while x < width as f32 {
            let _ = writeln!(out, "  <line x1=\"{x:.0}\" y1=\"0\" x2=\"{x:.0}\" y2=\"{height}\" />");
            x += GRID_SIZE;
        }
        let mut y = GRID_SIZE;
        while y < height as f32 {
            let _ = writeln!(out, "  <line x1=\"0\" y1=\"{y:.0}\" x2=\"{width}\" y2=\"{y:.0}\" />");
            y += GRID_SIZE;
        }
        let _ = writeln!(out, "</g>");

        for element in &self.design.elements {
            write_element_svg(&mut out, element);
        }

        let _ = writeln!(out, "</svg>");
        (out, width, height)
    }
}

const GOLD: &str = "#d4af37";
const SILVER: &str = "#c0c0c0";

fn write_element_svg(out: &mut String, element: &Element) {
    let width = element.width;
    let height = element.height;
    let (center_x, center_y) = element.center();
    let size = width.min(height);
    let offset_x = element.x + (width - size) / 2.0;
    let offset_y = element.y + (height - size) / 2.0;
    let base_inset = size * 0.08;

    let _ = writeln!(
        out,
        "<g transform=\"rotate({:.2} {:.1} {:.1})\">",
        element.rotation, center_x, center_y
    );

    match element.element_type {
        ElementType::RoundTable => {
            let outer_radius = size / 2.0 - base_inset;
            let _ = writeln!(
                out,
                "  <circle cx=\"{center_x:.1}\" cy=\"{center_y:.1}\" r=\"{outer_radius:.1}\" fill=\"#111111\" stroke=\"{GOLD}\" stroke-width=\"{:.1}\" />",
                (size * 0.08).max(4.0)
            );
            let _ = writeln!(
                out,
                "  <circle cx=\"{center_x:.1}\" cy=\"{center_y:.1}\" r=\"{:.1}\" fill=\"{SILVER}\" fill-opacity=\"0.25\" />",
                outer_radius * 0.7
            );
            let _ = writeln!(
                out,
                "  <circle cx=\"{center_x:.1}\" cy=\"{center_y:.1}\" r=\"{:.1}\" fill=\"#000000\" fill-opacity=\"0.9\" />",
                outer_radius * 0.7 * 0.45
            );
        }
        ElementType::SquareTable => {
            let side = size - base_inset * 2.0;
            let _ = writeln!(
                out,
                "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{side:.1}\" height=\"{side:.1}\" rx=\"{:.1}\" fill=\"#111111\" stroke=\"{GOLD}\" stroke-width=\"{:.1}\" />",
                offset_x + base_inset,
                offset_y + base_inset,
                size * 0.16,
                (size * 0.08).max(4.0)
            );
            let interior_inset = size * 0.18;
            let interior = size - interior_inset * 2.0;
            let _ = writeln!(
                out,
                "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{interior:.1}\" height=\"{interior:.1}\" rx=\"{:.1}\" fill=\"{SILVER}\" fill-opacity=\"0.2\" />",
                offset_x + interior_inset,
                offset_y + interior_inset,
                size * 0.12
            );
        }
        ElementType::DanceFloor => {
            let side = size - base_inset * 2.0;
            let _ = writeln!(
                out,
                "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{side:.1}\" height=\"{side:.1}\" rx=\"{:.1}\" fill=\"#0f0f0f\" stroke=\"{GOLD}\" stroke-width=\"{:.1}\" />",
                offset_x + base_inset,
                offset_y + base_inset,
                size * 0.18,
                (size * 0.06).max(3.0)
            );
            let stroke = (size * 0.02).max(1.5);
            let (x0, y0) = (offset_x + size * 0.25, offset_y + size * 0.25);
            let (x1, y1) = (offset_x + size * 0.75, offset_y + size * 0.75);
            let _ = writeln!(
                out,
                "  <rect x=\"{x0:.1}\" y=\"{y0:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"none\" stroke=\"{SILVER}\" stroke-opacity=\"0.65\" stroke-width=\"{stroke:.1}\" />",
                size * 0.5,
                size * 0.5
            );
            let _ = writeln!(
                out,
                "  <line x1=\"{x0:.1}\" y1=\"{y0:.1}\" x2=\"{x1:.1}\" y2=\"{y1:.1}\" stroke=\"{SILVER}\" stroke-opacity=\"0.5\" stroke-width=\"{stroke:.1}\" />"
            );
            let _ = writeln!(
                out,
                "  <line x1=\"{x1:.1}\" y1=\"{y0:.1}\" x2=\"{x0:.1}\" y2=\"{y1:.1}\" stroke=\"{SILVER}\" stroke-opacity=\"0.5\" stroke-width=\"{stroke:.1}\" />"
            );
        }
        ElementType::Bar => {
            let stroke_width = (size * 0.06).max(2.5);
            let radius_x = (width / 2.0 - stroke_width / 2.0).max(stroke_width);
            let radius_y = (height / 2.0 - stroke_width / 2.0).max(stroke_width);
            let _ = writeln!(
                out,
                "  <ellipse cx=\"{center_x:.1}\" cy=\"{center_y:.1}\" rx=\"{radius_x:.1}\" ry=\"{radius_y:.1}\" fill=\"#080808\" stroke=\"{GOLD}\" stroke-width=\"{stroke_width:.1}\" />"
            );
            let inner_x = (radius_x - stroke_width * 0.55).max(radius_x * 0.65);
            let inner_y = (radius_y - stroke_width * 0.55).max(radius_y * 0.65);
            let _ = writeln!(
                out,
                "  <ellipse cx=\"{center_x:.1}\" cy=\"{center_y:.1}\" rx=\"{inner_x:.1}\" ry=\"{inner_y:.1}\" fill=\"{SILVER}\" fill-opacity=\"0.2\" />"
            );
        }
        ElementType::Strip => {
            let _ = writeln!(
                out,
                "  <line x1=\"{:.1}\" y1=\"{center_y:.1}\" x2=\"{:.1}\" y2=\"{center_y:.1}\" stroke=\"{GOLD}\" stroke-opacity=\"0.85\" stroke-width=\"{:.1}\" stroke-dasharray=\"16 12\" stroke-linecap=\"round\" />",
                element.x,
                element.x + width,
                (height * 0.5).max(2.5)
            );
        }
        ElementType::Boundary => {
            let _ = writeln!(
                out,
                "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{width:.1}\" height=\"{height:.1}\" rx=\"{:.1}\" fill=\"{GOLD}\" fill-opacity=\"0.05\" stroke=\"{GOLD}\" stroke-width=\"{:.1}\" stroke-dasharray=\"12 6\" />",
                element.x,
                element.y,
                size * 0.08,
                (size * 0.04).max(2.0)
            );
        }
        ElementType::Label => {
            let _ = writeln!(
                out,
                "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{width:.1}\" height=\"{height:.1}\" rx=\"{:.1}\" fill=\"{GOLD}\" fill-opacity=\"0.12\" stroke=\"{GOLD}\" stroke-width=\"1.5\" />",
                element.x,
                element.y,
                size * 0.15
            );
            let text = escape_xml(element.text.as_deref().unwrap_or("Label"));
            let font_size = (size * 0.24).max(12.0);
            let _ = writeln!(
                out,
                "  <text x=\"{center_x:.1}\" y=\"{center_y:.1}\" font-size=\"{font_size:.1}\" fill=\"#f8fafc\" text-anchor=\"middle\" dominant-baseline=\"central\">{text}</text>"
            );
        }
        ElementType::Exit => {
            let corridor_height = size * 0.3;
            let _ = writeln!(
                out,
                "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{corridor_height:.1}\" rx=\"{:.1}\" fill=\"#0f0f0f\" stroke=\"{SILVER}\" stroke-opacity=\"0.85\" stroke-width=\"{:.1}\" />",
                offset_x + size * 0.18,
                offset_y + (size - corridor_height) / 2.0,
                size * 0.5,
                corridor_height * 0.4,
                (size * 0.04).max(2.0)
            );
            let arrow = [
                (0.25, 0.35),
                (0.65, 0.35),
                (0.65, 0.25),
                (0.85, 0.5),
                (0.65, 0.75),
                (0.65, 0.65),
                (0.25, 0.65),
            ];
            let points: Vec<String> = arrow
                .iter()
                .map(|(fx, fy)| {
                    format!("{:.1},{:.1}", offset_x + size * fx, offset_y + size * fy)
                })
                .collect();
            let _ = writeln!(
                out,
                "  <polygon points=\"{}\" fill=\"{GOLD}\" fill-opacity=\"0.9\" stroke=\"#000000\" stroke-width=\"{:.1}\" stroke-linejoin=\"round\" />",
                points.join(" "),
                (size * 0.025).max(1.5)
            );
        }
        ElementType::Restrooms
        | ElementType::SoundBooth
        | ElementType::Kitchen
        | ElementType::Unknown => {
            let pad = size * 0.1;
            let side = size - pad * 2.0;
            let _ = writeln!(
                out,
                "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{side:.1}\" height=\"{side:.1}\" rx=\"{:.1}\" fill=\"#111111\" fill-opacity=\"0.9\" stroke=\"{GOLD}\" stroke-width=\"{:.1}\" />",
                offset_x + pad,
                offset_y + pad,
                size * 0.15,
                (size * 0.05).max(2.0)
            );
        }
    }

    let _ = writeln!(out, "</g>");
}

fn escape_xml(input: &str) -> String {
    let mut s = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => s.push_str("&amp;"),
            '<' => s.push_str("&lt;"),
            '>' => s.push_str("&gt;"),
            '"' => s.push_str("&quot;"),
            '\'' => s.push_str("&apos;"),
            _ => s.push(ch),
        }
    }
    s
}

/// Triggers a file download in the browser via a Blob URL anchor
/// (wasm only).
#[cfg(target_arch = "wasm32")]
fn trigger_download(filename: &str, content: &str) -> Result<(), String> {
    use eframe::wasm_bindgen::JsCast;

    let window = web_sys::window().ok_or("No window found")?;
    let document = window.document().ok_or("No document found")?;

    let blob_parts = js_sys::Array::new();
    blob_parts.push(&eframe::wasm_bindgen::JsValue::from_str(content));

    let blob_options = web_sys::BlobPropertyBag::new();
    blob_options.set_type("application/json");

    let blob = web_sys::Blob::new_with_str_sequence_and_options(&blob_parts, &blob_options)
        .map_err(|_| "Failed to create blob")?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| "Failed to create object URL")?;

    let anchor = document
        .create_element("a")
        .map_err(|_| "Failed to create anchor element")?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "Failed to cast to anchor element")?;

    anchor.set_href(&url);
    anchor.set_download(filename);

    document
        .body()
        .ok_or("No body found")?
        .append_child(&anchor)
        .map_err(|_| "Failed to append anchor")?;

    anchor.click();

    document
        .body()
        .ok_or("No body found")?
        .remove_child(&anchor)
        .map_err(|_| "Failed to remove anchor")?;

    web_sys::Url::revoke_object_url(&url).map_err(|_| "Failed to revoke object URL")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_design() -> Design {
        let mut design = Design::new();
        let mut table = Element::new(ElementType::RoundTable, 100.0, 120.0, 96.0, 96.0);
        table.capacity = Some(10);
        table.rotation = 30.0;
        design.add_element(table);

        let mut label = Element::new(ElementType::Label, 300.0, 60.0, 134.4, 52.8);
        label.text = Some("Head table & VIPs".to_string());
        design.add_element(label);

        let mut bar = Element::new(ElementType::Bar, 500.0, 400.0, 134.4, 57.6);
        bar.rotation = -15.0;
        design.add_element(bar);

        design
    }

    #[test]
    fn json_round_trip_preserves_transforms() {
        let design = sample_design();
        let json = design_to_json(&design).unwrap();
        let parsed: DesignExport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.elements.len(), design.elements.len());
        for (exported, original) in parsed.elements.iter().zip(&design.elements) {
            assert_eq!(exported.element_type, original.element_type);
            assert_eq!(exported.x, original.x);
            assert_eq!(exported.y, original.y);
            assert_eq!(exported.width, original.width);
            assert_eq!(exported.height, original.height);
            assert_eq!(exported.rotation, original.rotation);
        }
    }

    #[test]
    fn json_uses_kebab_case_type_strings() {
        let design = sample_design();
        let json = design_to_json(&design).unwrap();
        assert!(json.contains("\"round-table\""));
        assert!(json.contains("\"generatedAt\""));
    }

    #[test]
    fn stage_svg_contains_rotated_groups_and_escaped_text() {
        let mut app = DesignerApp::default();
        app.design = sample_design();
        let (svg, width, height) = app.build_stage_svg();

        assert_eq!(width, app.stage.size.x as u32);
        assert_eq!(height, app.stage.size.y as u32);
        assert!(svg.contains("rotate(30.00"));
        assert!(svg.contains("Head table &amp; VIPs"));
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
