//! Stage rendering: background grid, element glyphs, and selection
//! affordances.
//!
//! Elements are drawn in store order (later elements on top), followed
//! by the selection overlays. Glyph geometry is computed in the
//! element's local box and rotated about its center before being mapped
//! to screen space; positions come from the interaction state so
//! in-flight drags render from their gesture cache instead of the
//! store.

use eframe::egui;
use egui::epaint::TextShape;
use egui::{Color32, Pos2, Rect, Stroke, Vec2};

use super::state::{DesignerApp, Gesture};
use crate::constants::{
    GRID_COLOR, GRID_SIZE, HANDLE_LINE_COLOR, HIGHLIGHT_GOLD, PANEL_BORDER,
    ROTATION_HANDLE_RADIUS, STAGE_BACKGROUND, TEXT_SILVER,
};
use crate::types::{Element, ElementType};

impl DesignerApp {
    /// Draws the whole stage: background, grid, every element, and the
    /// selection overlays.
    pub fn render_stage(&mut self, painter: &egui::Painter, stage_rect: Rect) {
        draw_background(painter, stage_rect);

        let multi_bounds = self.multi_selection_bounds();
        let rubber_band = match self.interaction.gesture {
            Some(Gesture::RubberBand { anchor, current }) => Some((anchor, current)),
            _ => None,
        };

        let ctx = painter.ctx().clone();
        let DesignerApp { design, interaction, icons, .. } = self;

        for element in &design.elements {
            let position = interaction.visual_position(element);
            let texture = element
                .image_key
                .as_deref()
                .and_then(|key| icons.texture(&ctx, key));

            if let Some(texture) = texture {
                draw_custom_icon(painter, stage_rect, element, position, &texture);
            } else {
                draw_glyph(painter, stage_rect, element, position);
            }

            if interaction.is_selected(&element.id) {
                let rotating = interaction.rotating_id() == Some(element.id);
                draw_selection_affordances(painter, stage_rect, element, position, rotating);
            }
        }

        // The group overlay hides while a rubber band is being drawn.
        if rubber_band.is_none() {
            if let Some(bounds) = multi_bounds {
                let rect = Rect::from_min_max(
                    stage_rect.min + egui::vec2(bounds.min_x, bounds.min_y),
                    stage_rect.min + egui::vec2(bounds.max_x, bounds.max_y),
                );
                painter.rect_filled(rect, 12.0, gold_alpha(20));
                draw_dashed_rect(painter, rect, Stroke::new(2.0, HIGHLIGHT_GOLD), 10.0, 8.0);
            }
        }

        if let Some((anchor, current)) = rubber_band {
            let rect = Rect::from_two_pos(
                stage_rect.min + anchor.to_vec2(),
                stage_rect.min + current.to_vec2(),
            );
            painter.rect_filled(rect, 0.0, gold_alpha(20));
            draw_dashed_rect(painter, rect, Stroke::new(1.5, HIGHLIGHT_GOLD), 6.0, 4.0);
        }

        if design.is_empty() {
            painter.text(
                stage_rect.center(),
                egui::Align2::CENTER_CENTER,
                "Drag tools onto the stage to get started",
                egui::FontId::proportional(14.0),
                TEXT_SILVER,
            );
        }
    }
}

fn draw_background(painter: &egui::Painter, stage_rect: Rect) {
    painter.rect_filled(stage_rect, 12.0, STAGE_BACKGROUND);

    let grid_stroke = Stroke::new(1.0, GRID_COLOR);
    let mut x = stage_rect.min.x + GRID_SIZE;
    while x < stage_rect.max.x {
        painter.line_segment(
            [egui::pos2(x, stage_rect.min.y), egui::pos2(x, stage_rect.max.y)],
            grid_stroke,
        );
        x += GRID_SIZE;
    }
    let mut y = stage_rect.min.y + GRID_SIZE;
    while y < stage_rect.max.y {
        painter.line_segment(
            [egui::pos2(stage_rect.min.x, y), egui::pos2(stage_rect.max.x, y)],
            grid_stroke,
        );
        y += GRID_SIZE;
    }

    painter.rect_stroke(
        stage_rect,
        12.0,
        Stroke::new(1.0, PANEL_BORDER),
        egui::epaint::StrokeKind::Inside,
    );
}

/// Maps a point in the element's local box (origin at the box top-left)
/// to screen space, rotating about the box center.
struct BoxTransform {
    screen_center: Pos2,
    half: Vec2,
    sin: f32,
    cos: f32,
}

impl BoxTransform {
    fn new(stage_rect: Rect, element: &Element, position: Pos2) -> Self {
        let radians = element.rotation.to_radians();
        let (sin, cos) = radians.sin_cos();
        let half = egui::vec2(element.width / 2.0, element.height / 2.0);
        Self {
            screen_center: stage_rect.min + position.to_vec2() + half,
            half,
            sin,
            cos,
        }
    }

    fn point(&self, local: Pos2) -> Pos2 {
        let v = local - self.half.to_pos2();
        egui::pos2(
            self.screen_center.x + v.x * self.cos - v.y * self.sin,
            self.screen_center.y + v.x * self.sin + v.y * self.cos,
        )
    }

    fn quad(&self, rect: Rect) -> Vec<Pos2> {
        vec![
            self.point(rect.left_top()),
            self.point(rect.right_top()),
            self.point(rect.right_bottom()),
            self.point(rect.left_bottom()),
        ]
    }
}

fn gold_alpha(alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(0xd4, 0xaf, 0x37, alpha)
}

fn silver_alpha(alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(0xc0, 0xc0, 0xc0, alpha)
}

fn draw_dashed_rect(painter: &egui::Painter, rect: Rect, stroke: Stroke, dash: f32, gap: f32) {
    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
    ];
    for i in 0..4 {
        painter.extend(egui::Shape::dashed_line(
            &[corners[i], corners[(i + 1) % 4]],
            stroke,
            dash,
            gap,
        ));
    }
}

fn draw_dashed_polygon(
    painter: &egui::Painter,
    points: &[Pos2],
    stroke: Stroke,
    dash: f32,
    gap: f32,
) {
    for i in 0..points.len() {
        painter.extend(egui::Shape::dashed_line(
            &[points[i], points[(i + 1) % points.len()]],
            stroke,
            dash,
            gap,
        ));
    }
}

fn ellipse_points(transform: &BoxTransform, local_center: Pos2, rx: f32, ry: f32) -> Vec<Pos2> {
    const SEGMENTS: usize = 48;
    (0..SEGMENTS)
        .map(|i| {
            let t = i as f32 / SEGMENTS as f32 * std::f32::consts::TAU;
            transform.point(egui::pos2(
                local_center.x + t.cos() * rx,
                local_center.y + t.sin() * ry,
            ))
        })
        .collect()
}

fn draw_custom_icon(
    painter: &egui::Painter,
    stage_rect: Rect,
    element: &Element,
    position: Pos2,
    texture: &egui::TextureHandle,
) {
    let transform = BoxTransform::new(stage_rect, element, position);
    let corners = transform.quad(Rect::from_min_size(
        Pos2::ZERO,
        egui::vec2(element.width, element.height),
    ));
    let uvs = [
        egui::pos2(0.0, 0.0),
        egui::pos2(1.0, 0.0),
        egui::pos2(1.0, 1.0),
        egui::pos2(0.0, 1.0),
    ];

    let mut mesh = egui::Mesh::with_texture(texture.id());
    for (corner, uv) in corners.iter().zip(uvs.iter()) {
        mesh.vertices.push(egui::epaint::Vertex {
            pos: *corner,
            uv: *uv,
            color: Color32::WHITE,
        });
    }
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    painter.add(egui::Shape::mesh(mesh));
}

/// Draws the procedural vector glyph for an element's type.
fn draw_glyph(painter: &egui::Painter, stage_rect: Rect, element: &Element, position: Pos2) {
    let transform = BoxTransform::new(stage_rect, element, position);
    let width = element.width;
    let height = element.height;
    let size = width.min(height);
    let offset = egui::vec2((width - size) / 2.0, (height - size) / 2.0);
    let base_inset = size * 0.08;
    let line_stroke = (size * 0.02).max(1.5);
    let local_center = egui::pos2(width / 2.0, height / 2.0);

    match element.element_type {
        ElementType::RoundTable => {
            let outer_radius = size / 2.0 - base_inset;
            let inner_radius = outer_radius * 0.7;
            let center = transform.point(local_center);
            painter.circle(
                center,
                outer_radius,
                Color32::from_rgb(0x11, 0x11, 0x11),
                Stroke::new((size * 0.08).max(4.0), HIGHLIGHT_GOLD),
            );
            painter.circle_filled(center, inner_radius, silver_alpha(64));
            painter.circle_filled(center, inner_radius * 0.45, Color32::from_black_alpha(230));
        }
        ElementType::SquareTable => {
            let outer = Rect::from_min_size(
                (offset + egui::vec2(base_inset, base_inset)).to_pos2(),
                Vec2::splat(size - base_inset * 2.0),
            );
            painter.add(egui::Shape::convex_polygon(
                transform.quad(outer),
                Color32::from_rgb(0x11, 0x11, 0x11),
                Stroke::new((size * 0.08).max(4.0), HIGHLIGHT_GOLD),
            ));
            let interior_inset = size * 0.18;
            let interior = Rect::from_min_size(
                (offset + egui::vec2(interior_inset, interior_inset)).to_pos2(),
                Vec2::splat(size - interior_inset * 2.0),
            );
            painter.add(egui::Shape::convex_polygon(
                transform.quad(interior),
                silver_alpha(51),
                Stroke::NONE,
            ));
        }
        ElementType::DanceFloor => {
            let floor = Rect::from_min_size(
                (offset + egui::vec2(base_inset, base_inset)).to_pos2(),
                Vec2::splat(size - base_inset * 2.0),
            );
            painter.add(egui::Shape::convex_polygon(
                transform.quad(floor),
                Color32::from_rgb(0x0f, 0x0f, 0x0f),
                Stroke::new((size * 0.06).max(3.0), HIGHLIGHT_GOLD),
            ));
            // Inner square with both diagonals, the classic parquet mark.
            let quarter = offset + egui::vec2(size * 0.25, size * 0.25);
            let three_quarter = offset + egui::vec2(size * 0.75, size * 0.75);
            let inner = Rect::from_min_max(quarter.to_pos2(), three_quarter.to_pos2());
            let inner_stroke = Stroke::new(line_stroke, silver_alpha(166));
            let quad = transform.quad(inner);
            for i in 0..4 {
                painter.line_segment([quad[i], quad[(i + 1) % 4]], inner_stroke);
            }
            let diag_stroke = Stroke::new(line_stroke, silver_alpha(128));
            painter.line_segment([quad[0], quad[2]], diag_stroke);
            painter.line_segment([quad[1], quad[3]], diag_stroke);
        }
        ElementType::Bar => {
            let stroke_width = (size * 0.06).max(2.5);
            let radius_x = (width / 2.0 - stroke_width / 2.0).max(stroke_width);
            let radius_y = (height / 2.0 - stroke_width / 2.0).max(stroke_width);
            painter.add(egui::Shape::convex_polygon(
                ellipse_points(&transform, local_center, radius_x, radius_y),
                Color32::from_rgb(0x08, 0x08, 0x08),
                Stroke::new(stroke_width, HIGHLIGHT_GOLD),
            ));
            let inner_x = (radius_x - stroke_width * 0.55).max(radius_x * 0.65);
            let inner_y = (radius_y - stroke_width * 0.55).max(radius_y * 0.65);
            painter.add(egui::Shape::convex_polygon(
                ellipse_points(&transform, local_center, inner_x, inner_y),
                silver_alpha(51),
                Stroke::NONE,
            ));
            let core_x = (inner_x * 0.6).max(inner_x - stroke_width);
            let core_y = (inner_y * 0.6).max(inner_y - stroke_width);
            painter.add(egui::Shape::convex_polygon(
                ellipse_points(&transform, local_center, core_x, core_y),
                Color32::from_black_alpha(224),
                Stroke::NONE,
            ));
        }
        ElementType::Strip => {
            let stroke = Stroke::new((height * 0.5).max(2.5), gold_alpha(217));
            let a = transform.point(egui::pos2(0.0, height / 2.0));
            let b = transform.point(egui::pos2(width, height / 2.0));
            painter.extend(egui::Shape::dashed_line(&[a, b], stroke, 16.0, 12.0));
        }
        ElementType::Boundary => {
            let quad = transform.quad(Rect::from_min_size(Pos2::ZERO, egui::vec2(width, height)));
            painter.add(egui::Shape::convex_polygon(
                quad.clone(),
                gold_alpha(13),
                Stroke::NONE,
            ));
            let stroke = Stroke::new((size * 0.04).max(2.0), HIGHLIGHT_GOLD);
            draw_dashed_polygon(painter, &quad, stroke, 12.0, 6.0);
        }
        ElementType::Label => {
            let quad = transform.quad(Rect::from_min_size(Pos2::ZERO, egui::vec2(width, height)));
            painter.add(egui::Shape::convex_polygon(
                quad,
                gold_alpha(31),
                Stroke::new(1.5, HIGHLIGHT_GOLD),
            ));
            let text = element.text.as_deref().unwrap_or("Label");
            let font_size = (size * 0.24).max(12.0);
            draw_rotated_text(painter, &transform, text, font_size);
        }
        ElementType::Exit => {
            let corridor_height = size * 0.3;
            let corridor = Rect::from_min_size(
                (offset + egui::vec2(size * 0.18, (size - corridor_height) / 2.0)).to_pos2(),
                egui::vec2(size * 0.5, corridor_height),
            );
            painter.add(egui::Shape::convex_polygon(
                transform.quad(corridor),
                Color32::from_rgb(0x0f, 0x0f, 0x0f),
                Stroke::new((size * 0.04).max(2.0), silver_alpha(217)),
            ));
            // Rightward arrow: convex shaft and head, outlined as one.
            let local = |fx: f32, fy: f32| {
                transform.point((offset + egui::vec2(size * fx, size * fy)).to_pos2())
            };
            let shaft = vec![
                local(0.25, 0.35),
                local(0.65, 0.35),
                local(0.65, 0.65),
                local(0.25, 0.65),
            ];
            let head = vec![local(0.65, 0.25), local(0.85, 0.5), local(0.65, 0.75)];
            painter.add(egui::Shape::convex_polygon(shaft, gold_alpha(230), Stroke::NONE));
            painter.add(egui::Shape::convex_polygon(head, gold_alpha(230), Stroke::NONE));
            let outline = vec![
                local(0.25, 0.35),
                local(0.65, 0.35),
                local(0.65, 0.25),
                local(0.85, 0.5),
                local(0.65, 0.75),
                local(0.65, 0.65),
                local(0.25, 0.65),
            ];
            painter.add(egui::Shape::closed_line(
                outline,
                Stroke::new((size * 0.025).max(1.5), STAGE_BACKGROUND),
            ));
        }
        ElementType::Restrooms
        | ElementType::SoundBooth
        | ElementType::Kitchen
        | ElementType::Unknown => {
            let pad = size * 0.1;
            let rect = Rect::from_min_size(
                (offset + egui::vec2(pad, pad)).to_pos2(),
                Vec2::splat(size - pad * 2.0),
            );
            painter.add(egui::Shape::convex_polygon(
                transform.quad(rect),
                Color32::from_rgb(0x11, 0x11, 0x11),
                Stroke::new((size * 0.05).max(2.0), gold_alpha(230)),
            ));
        }
    }
}

fn draw_rotated_text(painter: &egui::Painter, transform: &BoxTransform, text: &str, font_size: f32) {
    let galley = painter.layout_no_wrap(
        text.to_string(),
        egui::FontId::proportional(font_size),
        Color32::from_rgb(0xf8, 0xfa, 0xfc),
    );
    // TextShape rotates about its anchor, so back the anchor off from
    // the center by the rotated half-size.
    let half = galley.size() / 2.0;
    let rotated_half = egui::vec2(
        half.x * transform.cos - half.y * transform.sin,
        half.x * transform.sin + half.y * transform.cos,
    );
    let mut shape = TextShape::new(
        transform.screen_center - rotated_half,
        galley,
        Color32::from_rgb(0xf8, 0xfa, 0xfc),
    );
    shape.angle = transform.sin.atan2(transform.cos);
    painter.add(egui::Shape::Text(shape));
}

/// Selection affordances: dashed outline, rotation handle with its
/// connecting line, and the resize handle at the rotated corner.
fn draw_selection_affordances(
    painter: &egui::Painter,
    stage_rect: Rect,
    element: &Element,
    position: Pos2,
    rotating: bool,
) {
    let transform = BoxTransform::new(stage_rect, element, position);
    let outline = transform.quad(Rect::from_min_size(
        Pos2::ZERO,
        egui::vec2(element.width, element.height),
    ));
    draw_dashed_polygon(painter, &outline, Stroke::new(2.0, HIGHLIGHT_GOLD), 8.0, 6.0);

    // Handle geometry follows the rendered (possibly mid-drag) position.
    let mut placed = element.clone();
    placed.x = position.x;
    placed.y = position.y;

    let rotation_center =
        stage_rect.min + DesignerApp::rotation_handle_center(&placed).to_vec2();
    painter.line_segment(
        [transform.screen_center, rotation_center],
        Stroke::new(2.0, HANDLE_LINE_COLOR),
    );
    let handle_stroke = if rotating {
        Stroke::new(2.0, Color32::WHITE)
    } else {
        Stroke::new(2.0, TEXT_SILVER)
    };
    painter.circle(rotation_center, ROTATION_HANDLE_RADIUS, HIGHLIGHT_GOLD, handle_stroke);

    let resize_rect =
        DesignerApp::resize_handle_rect(&placed).translate(stage_rect.min.to_vec2());
    painter.rect_filled(resize_rect, 4.0, HIGHLIGHT_GOLD);
    painter.rect_stroke(
        resize_rect,
        4.0,
        Stroke::new(1.5, TEXT_SILVER),
        egui::epaint::StrokeKind::Inside,
    );
}
