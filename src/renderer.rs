// src/renderer.rs
use egui::{Align2, Color32, FontId, Painter, Pos2, Stroke, Vec2};

use crate::editor::LineEditor;
use crate::geometry::{format_length, hit_testing};

/// Anything the plan can be drawn onto
pub trait Surface {
    /// Draw a straight line
    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke);

    /// Draw a filled circle marking a point
    fn marker(&mut self, center: Pos2, radius: f32, color: Color32);

    /// Draw text centred on `pos`
    fn text(&mut self, pos: Pos2, text: &str, size: f32, color: Color32);
}

/// A single recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line { from: Pos2, to: Pos2, stroke: Stroke },
    Marker { center: Pos2, radius: f32, color: Color32 },
    Text { pos: Pos2, text: String, size: f32, color: Color32 },
}

/// Surface that records what was drawn instead of drawing it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    primitives: Vec<Primitive>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

impl Surface for DrawList {
    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.primitives.push(Primitive::Line { from, to, stroke });
    }

    fn marker(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.primitives.push(Primitive::Marker { center, radius, color });
    }

    fn text(&mut self, pos: Pos2, text: &str, size: f32, color: Color32) {
        self.primitives.push(Primitive::Text {
            pos,
            text: text.to_owned(),
            size,
            color,
        });
    }
}

/// Draws onto an egui painter. Plan coordinates are canvas-local, so every
/// point is shifted by the canvas origin.
pub struct PainterSurface<'a> {
    painter: &'a Painter,
    origin: Vec2,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a Painter, origin: Pos2) -> Self {
        Self {
            painter,
            origin: origin.to_vec2(),
        }
    }
}

impl Surface for PainterSurface<'_> {
    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.painter
            .line_segment([from + self.origin, to + self.origin], stroke);
    }

    fn marker(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.painter.circle_filled(center + self.origin, radius, color);
    }

    fn text(&mut self, pos: Pos2, text: &str, size: f32, color: Color32) {
        self.painter.text(
            pos + self.origin,
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(size),
            color,
        );
    }
}

/// Colours used for the plan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Renderer {
    line_color: Color32,
    marker_color: Color32,
    label_color: Color32,
    annotation_color: Color32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            line_color: Color32::BLACK,
            marker_color: Color32::RED,
            label_color: Color32::BLACK,
            annotation_color: Color32::BLUE,
        }
    }
}

impl Renderer {
    /// Renders the editor's plan.
    ///
    /// Each segment becomes a line, a marker on both endpoints and a length
    /// label above its midpoint. With no segments, a placed start point is
    /// drawn as a lone marker. Only reads the editor.
    pub fn render(&self, editor: &LineEditor, surface: &mut impl Surface) {
        let config = editor.config();
        let stroke = Stroke::new(config.stroke_width, self.line_color);

        for segment in editor.segments() {
            surface.line(segment.start(), segment.end(), stroke);
            surface.marker(segment.start(), config.marker_radius, self.marker_color);
            surface.marker(segment.end(), config.marker_radius, self.marker_color);

            let label = format_length(segment.length_m(config.pixels_per_meter));
            surface.text(
                hit_testing::label_anchor(segment, config.label_offset),
                &label,
                config.font_size,
                self.label_color,
            );
        }

        if editor.segments().is_empty() {
            if let Some(cursor) = editor.cursor() {
                surface.marker(cursor, config.marker_radius, self.marker_color);
            }
        }

        for annotation in editor.document().annotations() {
            surface.text(
                annotation.position,
                &annotation.text,
                config.font_size,
                self.annotation_color,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_segment_primitives() {
        let mut editor = LineEditor::default();
        editor.set_cursor(pos2(100.0, 100.0));
        editor.append_segment(2.0).unwrap();

        let mut list = DrawList::new();
        editor.render(&mut list);

        assert_eq!(
            list.primitives(),
            &[
                Primitive::Line {
                    from: pos2(100.0, 100.0),
                    to: pos2(200.0, 100.0),
                    stroke: Stroke::new(2.0, Color32::BLACK),
                },
                Primitive::Marker {
                    center: pos2(100.0, 100.0),
                    radius: 5.0,
                    color: Color32::RED,
                },
                Primitive::Marker {
                    center: pos2(200.0, 100.0),
                    radius: 5.0,
                    color: Color32::RED,
                },
                Primitive::Text {
                    pos: pos2(150.0, 90.0),
                    text: "2.00 m".to_owned(),
                    size: 12.0,
                    color: Color32::BLACK,
                },
            ]
        );
    }

    #[test]
    fn test_lone_cursor_marker() {
        let mut editor = LineEditor::default();
        editor.set_cursor(pos2(30.0, 40.0));

        let mut list = DrawList::new();
        editor.render(&mut list);

        assert_eq!(
            list.primitives(),
            &[Primitive::Marker {
                center: pos2(30.0, 40.0),
                radius: 5.0,
                color: Color32::RED,
            }]
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut editor = LineEditor::default();
        editor.set_cursor(pos2(0.0, 0.0));
        editor.append_segment(1.5).unwrap();

        let mut first = DrawList::new();
        let mut second = DrawList::new();
        editor.render(&mut first);
        editor.render(&mut second);
        assert_eq!(first, second);
    }

    #[test]
    fn test_painter_surface_draws() {
        let mut editor = LineEditor::default();
        editor.set_cursor(pos2(20.0, 20.0));
        editor.append_segment(1.0).unwrap();

        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            let painter = ctx.layer_painter(egui::LayerId::background());
            editor.render(&mut PainterSurface::new(&painter, pos2(10.0, 10.0)));
        });
    }
}
