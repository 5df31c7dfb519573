use std::path::PathBuf;

use crate::config::EditorConfig;
use crate::editor::{LineEditor, parse_length};
use crate::error::EditorError;
use crate::export;
use crate::input::{InputEvent, InputHandler};
use crate::panels;
use crate::persistence::{self, DrawingSnapshot};

/// Storage key for the drawing itself; the toolbar fields live under `eframe::APP_KEY`
const DRAWING_KEY: &str = "drawing";

/// A message the user has to dismiss before touching the canvas again
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

/// Pending edit of one segment's length, opened by double-clicking its label
#[derive(Debug, Clone, PartialEq)]
pub struct LengthDialog {
    pub segment: usize,
    pub input: String,
}

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct SketchApp {
    pub(crate) length_input: String,
    pub(crate) label_input: String,
    #[serde(skip)]
    pub(crate) editor: LineEditor,
    #[serde(skip)]
    pub(crate) input: InputHandler,
    #[serde(skip)]
    pub(crate) notice: Option<Notice>,
    #[serde(skip)]
    pub(crate) length_dialog: Option<LengthDialog>,
}

impl Default for SketchApp {
    fn default() -> Self {
        Self {
            length_input: String::new(),
            label_input: String::new(),
            editor: LineEditor::default(),
            input: InputHandler::default(),
            notice: None,
            length_dialog: None,
        }
    }
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: EditorConfig) -> Self {
        let mut app: Self = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        app.editor = LineEditor::new(config);

        if let Some(snapshot) = cc
            .storage
            .and_then(|storage| eframe::get_value::<DrawingSnapshot>(storage, DRAWING_KEY))
        {
            if let Err(err) = snapshot.restore(&mut app.editor) {
                log::warn!("Could not restore the previous drawing: {}", err);
            }
        }

        app
    }

    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    /// True while a dialog has to be answered before the canvas reacts
    pub(crate) fn is_blocked(&self) -> bool {
        self.notice.is_some() || self.length_dialog.is_some()
    }

    pub(crate) fn notify(&mut self, title: &str, message: String) {
        self.notice = Some(Notice {
            title: title.to_owned(),
            message,
        });
    }

    fn notify_error(&mut self, err: EditorError) {
        self.notify(err.title(), err.to_string());
    }

    /// "Draw line": append a segment using the length field
    pub(crate) fn draw_line(&mut self) {
        let result = parse_length(&self.length_input)
            .and_then(|meters| self.editor.append_segment(meters).map(|_| ()));
        if let Err(err) = result {
            self.notify_error(err);
        }
    }

    pub(crate) fn arm_start_point(&mut self) {
        log::info!("Waiting for a start point");
        self.editor.arm_start_point();
    }

    pub(crate) fn clear(&mut self) {
        self.editor.clear_all();
        self.length_dialog = None;
    }

    pub(crate) fn add_label(&mut self) {
        if let Err(err) = self.editor.arm_annotation(&self.label_input) {
            self.notify_error(err);
        }
    }

    /// Feed one canvas event to the editor. A double-click or right-click on a
    /// length label opens the length dialog instead.
    pub(crate) fn handle_canvas_event(&mut self, event: InputEvent) {
        if self.is_blocked() && event != InputEvent::PointerUp {
            return;
        }
        if let InputEvent::DoubleClick { position } | InputEvent::SecondaryClick { position } = event {
            if let Some(segment) = self.editor.label_near(position) {
                self.editor.end_drag();
                let meters = self.editor.segments()[segment].length_m(self.editor.config().pixels_per_meter);
                self.length_dialog = Some(LengthDialog {
                    segment,
                    input: format!("{:.2}", meters),
                });
            }
            return;
        }
        self.editor.handle_event(&event);
    }

    /// Apply the length dialog. Keeps it open when the value is rejected.
    pub(crate) fn apply_length_dialog(&mut self) {
        let Some(dialog) = self.length_dialog.take() else {
            return;
        };
        let result = parse_length(&dialog.input)
            .and_then(|meters| self.editor.set_segment_length(dialog.segment, meters));
        if let Err(err) = result {
            self.length_dialog = Some(dialog);
            self.notify_error(err);
        }
    }

    pub(crate) fn export_svg(&mut self) {
        let svg = self.editor.export_vector();
        let Some(path) = save_path("SVG files", "svg", "plano.svg") else {
            return;
        };
        if let Err(err) = export::save_svg(&path, &svg) {
            log::warn!("SVG export failed: {}", err);
            self.notify("Export failed", err.to_string());
        }
    }

    pub(crate) fn save_drawing(&mut self) {
        let Some(path) = save_path("Drawings", "json", "plano.json") else {
            return;
        };
        if let Err(err) = persistence::save_drawing(&path, &self.editor) {
            log::warn!("Saving the drawing failed: {}", err);
            self.notify("Save failed", err.to_string());
        }
    }

    pub(crate) fn open_drawing(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Drawings", &["json"])
            .pick_file()
        else {
            return;
        };
        let result = persistence::load_drawing(&path)
            .and_then(|snapshot| snapshot.restore(&mut self.editor));
        match result {
            Ok(()) => self.length_dialog = None,
            Err(err) => {
                log::warn!("Opening {} failed: {}", path.display(), err);
                self.notify("Open failed", err.to_string());
            }
        }
    }
}

fn save_path(filter: &str, extension: &str, file_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter(filter, &[extension])
        .set_file_name(file_name)
        .save_file()
}

impl eframe::App for SketchApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
        eframe::set_value(storage, DRAWING_KEY, &DrawingSnapshot::capture(&self.editor));
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::tools_panel(self, ctx);
        panels::status_bar(self, ctx);
        panels::central_panel(self, ctx);
        panels::dialogs(self, ctx);

        if self.editor.take_needs_render() {
            ctx.request_repaint();
        }
    }
}
