use crate::SketchApp;

pub fn tools_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("tools_panel").show(ctx, |ui| {
        ui.horizontal_wrapped(|ui| {
            ui.label("Length (m):");
            let length_field = ui.add(
                egui::TextEdit::singleline(&mut app.length_input)
                    .desired_width(60.0)
                    .hint_text("2.5"),
            );
            // Enter in the length field draws like the button does
            let submitted =
                length_field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Draw line").clicked() || submitted {
                app.draw_line();
            }

            let awaiting_start = app.editor.state().is_awaiting_start_point();
            if ui
                .selectable_label(awaiting_start, "Set start point")
                .clicked()
            {
                app.arm_start_point();
            }

            if ui.button("Clear").clicked() {
                app.clear();
            }

            ui.separator();

            let mut fixed_angle = app.editor.fixed_angle();
            if ui
                .checkbox(&mut fixed_angle, "Fixed angle (45°)")
                .changed()
            {
                app.editor.set_fixed_angle(fixed_angle);
            }

            ui.separator();

            ui.add(
                egui::TextEdit::singleline(&mut app.label_input)
                    .desired_width(120.0)
                    .hint_text("Label text"),
            );
            let awaiting_label = app.editor.state().is_awaiting_annotation();
            if ui.selectable_label(awaiting_label, "Add label").clicked() {
                app.add_label();
            }

            ui.separator();

            if ui.button("Export SVG").clicked() {
                log::info!("SVG export requested");
                app.export_svg();
            }
            if ui.button("Save").clicked() {
                app.save_drawing();
            }
            if ui.button("Open").clicked() {
                app.open_drawing();
            }
        });
    });
}
