use crate::SketchApp;
use crate::renderer::PainterSurface;

pub fn central_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::default().fill(egui::Color32::WHITE))
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let canvas_rect = response.rect;

            app.input.set_canvas_rect(canvas_rect);
            app.editor.set_surface_size(canvas_rect.size());

            // Handle input
            for event in app.input.process_input(ctx) {
                app.handle_canvas_event(event);
            }

            let state = app.editor.state();
            if response.hovered() && (state.is_awaiting_start_point() || state.is_awaiting_annotation()) {
                ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
            } else if state.is_dragging() {
                ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
            }

            // Render the canvas
            app.editor
                .render(&mut PainterSurface::new(&painter, canvas_rect.min));
        });
}
