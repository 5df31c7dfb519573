use crate::SketchApp;

/// Blocking notification and the segment length dialog
pub fn dialogs(app: &mut SketchApp, ctx: &egui::Context) {
    if let Some(notice) = app.notice.clone() {
        egui::Window::new(notice.title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(notice.message);
                if ui.button("OK").clicked() {
                    app.notice = None;
                }
            });
        // The length dialog waits until the notice is dismissed
        return;
    }

    let mut apply = false;
    let mut cancel = false;
    if let Some(dialog) = app.length_dialog.as_mut() {
        egui::Window::new("Edit length")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(format!("New length of segment {} (meters):", dialog.segment + 1));
                let field = ui.text_edit_singleline(&mut dialog.input);
                let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                ui.horizontal(|ui| {
                    apply = ui.button("OK").clicked() || submitted;
                    cancel = ui.button("Cancel").clicked();
                });
            });
    }

    if apply {
        app.apply_length_dialog();
    } else if cancel {
        app.length_dialog = None;
    }
}
