use crate::SketchApp;
use crate::geometry::format_length;

pub fn status_bar(app: &mut SketchApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        let summary = app.editor.summary();
        ui.horizontal(|ui| {
            ui.label(app.editor.state().name());
            ui.separator();
            ui.label(format!("Segments: {}", summary.segment_count));
            ui.label(format!("Perimeter: {}", format_length(summary.perimeter_m)));
            if summary.closed {
                ui.label(format!("Area: {:.2} m²", summary.area_m2));
            } else {
                ui.label("Open outline");
            }
            if let Some(cursor) = app.editor.cursor() {
                ui.separator();
                ui.label(format!("Next start: ({:.0}, {:.0})", cursor.x, cursor.y));
            }
        });
    });
}
