use egui::{Context, PointerButton, Pos2, Rect};

/// Pointer input already translated into canvas-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button was pressed inside the canvas
    PointerDown { position: Pos2 },
    /// Pointer moved while the primary button is held
    PointerMove { position: Pos2 },
    /// Primary button was released, wherever the pointer is
    PointerUp,
    /// Primary button was double-clicked inside the canvas
    DoubleClick { position: Pos2 },
    /// Secondary button was pressed inside the canvas
    SecondaryClick { position: Pos2 },
}

/// Handles converting raw egui input into our domain-specific InputEvents
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(Rect::NOTHING)
    }
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    /// Screen position to canvas-local position
    pub fn to_canvas(&self, pos: Pos2) -> Pos2 {
        Pos2::ZERO + (pos - self.canvas_rect.min)
    }

    /// Process raw egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let pointer = &input.pointer;
            let pos = pointer.interact_pos().or(pointer.hover_pos());

            if pointer.primary_pressed() {
                if let Some(pos) = pos.filter(|p| self.canvas_rect.contains(*p)) {
                    events.push(InputEvent::PointerDown {
                        position: self.to_canvas(pos),
                    });
                }
            }

            if pointer.button_double_clicked(PointerButton::Primary) {
                if let Some(pos) = pos.filter(|p| self.canvas_rect.contains(*p)) {
                    events.push(InputEvent::DoubleClick {
                        position: self.to_canvas(pos),
                    });
                }
            }

            if pointer.button_pressed(PointerButton::Secondary) {
                if let Some(pos) = pos.filter(|p| self.canvas_rect.contains(*p)) {
                    events.push(InputEvent::SecondaryClick {
                        position: self.to_canvas(pos),
                    });
                }
            }

            if pointer.primary_down() {
                if let Some(pos) = pos {
                    if Some(pos) != self.last_pointer_pos && !pointer.primary_pressed() {
                        events.push(InputEvent::PointerMove {
                            position: self.to_canvas(pos),
                        });
                    }
                }
            }

            // A release is always reported so a drag can never get stuck
            if pointer.primary_released() {
                events.push(InputEvent::PointerUp);
            }

            self.last_pointer_pos = pos;
        });

        events
    }
}
