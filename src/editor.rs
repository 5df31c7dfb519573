use egui::{Pos2, Vec2, vec2};

use crate::config::EditorConfig;
use crate::document::{Annotation, Document};
use crate::error::{EditorError, EditorResult};
use crate::geometry::{self, PlanSummary, hit_testing};
use crate::input::InputEvent;
use crate::renderer::{Renderer, Surface};
use crate::segment::{Endpoint, PointRef, Segment};
use crate::state::EditorState;

/// Angle step used while fixed-angle mode is on
pub const FIXED_ANGLE_STEP_DEGREES: f32 = 45.0;

/// Converts the text of a length field into meters.
///
/// Accepts surrounding whitespace and a comma as decimal separator. Anything
/// that is not a finite, positive number is rejected.
pub fn parse_length(text: &str) -> EditorResult<f32> {
    let trimmed = text.trim();
    let meters: f32 = trimmed.replace(',', ".").parse().map_err(|_| {
        EditorError::InvalidInput(format!("'{}' is not a number", trimmed))
    })?;
    validate_length(meters)?;
    Ok(meters)
}

fn validate_length(meters: f32) -> EditorResult<()> {
    if !meters.is_finite() || meters <= 0.0 {
        return Err(EditorError::InvalidInput(format!(
            "Length must be a positive number of meters, got {}",
            meters
        )));
    }
    Ok(())
}

/// A segment whose coordinates and length stay finite numbers. Huge lengths
/// overflow once scaled to visual units.
fn finite_segment(start: Pos2, end: Pos2) -> EditorResult<Segment> {
    let segment = Segment::new(start, end);
    if !segment.is_finite() || !segment.length_px().is_finite() {
        return Err(EditorError::InvalidInput(
            "Length is too large to draw".to_owned(),
        ));
    }
    Ok(segment)
}

/// Owns the floor plan and turns user commands into consistent geometry.
///
/// All mutation goes through these methods. Every successful change bumps
/// [`LineEditor::revision`] and raises the render flag the host collects
/// with [`LineEditor::take_needs_render`]; rejected commands change nothing.
#[derive(Debug, Clone)]
pub struct LineEditor {
    config: EditorConfig,
    document: Document,
    cursor: Option<Pos2>,
    state: EditorState,
    fixed_angle: bool,
    surface_size: Vec2,
    revision: u64,
    needs_render: bool,
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl LineEditor {
    /// A blank editor waiting for its first start point
    pub fn new(config: EditorConfig) -> Self {
        let surface_size = config.surface_size;
        Self {
            config,
            document: Document::new(),
            cursor: None,
            state: EditorState::AwaitingStartPoint,
            fixed_angle: false,
            surface_size,
            revision: 0,
            needs_render: true,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn segments(&self) -> &[Segment] {
        self.document.segments()
    }

    pub fn cursor(&self) -> Option<Pos2> {
        self.cursor
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn surface_size(&self) -> Vec2 {
        self.surface_size
    }

    /// Track the size of the drawing surface; the SVG export uses it as its canvas
    pub fn set_surface_size(&mut self, size: Vec2) {
        if size.x > 0.0 && size.y > 0.0 {
            self.surface_size = size;
        }
    }

    pub fn fixed_angle(&self) -> bool {
        self.fixed_angle
    }

    pub fn set_fixed_angle(&mut self, enabled: bool) {
        if self.fixed_angle != enabled {
            log::info!("Fixed-angle mode {}", if enabled { "on" } else { "off" });
            self.fixed_angle = enabled;
        }
    }

    /// Returns whether a render was requested since the last call and resets the flag
    pub fn take_needs_render(&mut self) -> bool {
        std::mem::take(&mut self.needs_render)
    }

    fn mark_changed(&mut self) {
        self.revision += 1;
        self.needs_render = true;
    }

    fn transition(&mut self, new_state: EditorState) {
        if self.state != new_state {
            log::debug!("Editor state: {} -> {}", self.state.name(), new_state.name());
            self.state = new_state;
        }
    }

    /// Records where the next segment starts
    pub fn set_cursor(&mut self, pos: Pos2) {
        log::info!("Start point set at ({}, {})", pos.x, pos.y);
        self.cursor = Some(pos);
        if self.state.is_awaiting_start_point() {
            self.transition(EditorState::Idle);
        }
        self.mark_changed();
    }

    /// Arms the editor so the next pointer press places the start point
    pub fn arm_start_point(&mut self) {
        self.transition(EditorState::AwaitingStartPoint);
    }

    /// Appends a segment of `length_m` meters from the cursor, drawn to the
    /// right, and moves the cursor to its end.
    pub fn append_segment(&mut self, length_m: f32) -> EditorResult<&Segment> {
        let Some(start) = self.cursor else {
            log::warn!("Rejected segment: no start point");
            return Err(EditorError::InvalidState(
                "Set a start point before drawing a line".to_owned(),
            ));
        };
        let segment = validate_length(length_m).and_then(|()| {
            finite_segment(start, start + vec2(length_m * self.config.pixels_per_meter, 0.0))
        });
        let segment = match segment {
            Ok(segment) => segment,
            Err(err) => {
                log::warn!("Rejected segment: {}", err);
                return Err(err);
            }
        };

        self.document.push_segment(segment);
        self.cursor = Some(segment.end());
        self.mark_changed();

        let index = self.document.segments().len() - 1;
        log::info!("Appended segment {} ({})", index, geometry::format_length(length_m));
        Ok(&self.document.segments()[index])
    }

    /// Starts dragging the endpoint nearest to `pos` within the anchor
    /// threshold. On equal distances the earlier point in sequence order wins.
    /// Returns whether an endpoint was hit.
    pub fn select_point_near(&mut self, pos: Pos2) -> bool {
        let hit = hit_testing::nearest_within(
            pos,
            self.config.anchor_threshold,
            hit_testing::segment_endpoints(self.document.segments()),
        );

        match hit {
            Some((target, _)) => {
                log::debug!("Selected {:?}", target);
                self.transition(EditorState::Dragging { target });
                true
            }
            None => {
                if self.state.is_dragging() {
                    self.transition(EditorState::Idle);
                }
                false
            }
        }
    }

    /// The endpoint that has to move together with `target` to keep the chain
    /// connected
    fn chain_partner(&self, target: PointRef) -> Option<PointRef> {
        let count = self.document.segments().len();
        match target.endpoint {
            Endpoint::End if target.segment + 1 < count => {
                Some(PointRef::new(target.segment + 1, Endpoint::Start))
            }
            Endpoint::Start if target.segment > 0 => {
                Some(PointRef::new(target.segment - 1, Endpoint::End))
            }
            _ => None,
        }
    }

    /// Moves the dragged endpoint to `pos`, snaps it onto a nearby endpoint of
    /// another segment and drags its chain partner along. No-op unless dragging.
    pub fn drag_to(&mut self, pos: Pos2) {
        let Some(target) = self.state.drag_target() else {
            return;
        };
        let Some(segment) = self.document.segment(target.segment).copied() else {
            log::warn!("Drag target {:?} no longer exists", target);
            self.transition(EditorState::Idle);
            return;
        };

        let mut new_pos = pos;
        if self.fixed_angle {
            let pivot = segment.point(target.endpoint.opposite());
            new_pos = geometry::snap_to_angle_step(pivot, new_pos, FIXED_ANGLE_STEP_DEGREES);
        }

        let partner = self.chain_partner(target);
        let anchors = hit_testing::segment_endpoints(self.document.segments())
            .filter(|(point_ref, _)| point_ref.segment != target.segment && Some(*point_ref) != partner);
        if let Some((anchor, anchor_pos)) =
            hit_testing::nearest_within(new_pos, self.config.anchor_threshold, anchors)
        {
            log::debug!("Snapped {:?} onto {:?}", target, anchor);
            new_pos = anchor_pos;
        }

        let old_pos = segment.point(target.endpoint);
        let segments = self.document.segments_mut();
        segments[target.segment].set_point(target.endpoint, new_pos);
        if let Some(partner) = partner {
            segments[partner.segment].set_point(partner.endpoint, new_pos);
        }
        // The chain keeps growing from the moved point
        if self.cursor == Some(old_pos) {
            self.cursor = Some(new_pos);
        }
        self.mark_changed();
    }

    /// Ends any drag. Safe to call when nothing is dragged.
    pub fn end_drag(&mut self) {
        if self.state.is_dragging() {
            self.transition(EditorState::Idle);
        }
    }

    /// Removes every segment and annotation and forgets the start point
    pub fn clear_all(&mut self) {
        log::info!("Cleared {} segments", self.document.segments().len());
        self.document.clear();
        self.cursor = None;
        self.transition(EditorState::AwaitingStartPoint);
        self.mark_changed();
    }

    /// Changes one segment's length, keeping its start point and direction.
    /// The next segment's start follows the moved end.
    pub fn set_segment_length(&mut self, index: usize, length_m: f32) -> EditorResult<()> {
        validate_length(length_m)?;
        let Some(segment) = self.document.segment(index).copied() else {
            return Err(EditorError::InvalidState(format!("There is no segment {}", index)));
        };

        let end = segment.start() + Vec2::angled(segment.angle()) * length_m * self.config.pixels_per_meter;
        let old_end = segment.end();
        let partner = self.chain_partner(PointRef::new(index, Endpoint::End));

        // Both the resized segment and the one hanging off its end must stay drawable
        let checked = finite_segment(segment.start(), end).and_then(|_| match partner {
            Some(partner) => match self.document.segment(partner.segment) {
                Some(next) => finite_segment(end, next.end()).map(|_| ()),
                None => Ok(()),
            },
            None => Ok(()),
        });
        if let Err(err) = checked {
            log::warn!("Rejected length for segment {}: {}", index, err);
            return Err(err);
        }

        let segments = self.document.segments_mut();
        segments[index].set_point(Endpoint::End, end);
        if let Some(partner) = partner {
            segments[partner.segment].set_point(partner.endpoint, end);
        }
        if self.cursor == Some(old_end) {
            self.cursor = Some(end);
        }
        log::info!("Segment {} set to {}", index, geometry::format_length(length_m));
        self.mark_changed();
        Ok(())
    }

    /// Index of the segment whose length label covers `pos`
    pub fn label_near(&self, pos: Pos2) -> Option<usize> {
        self.document.segments().iter().position(|segment| {
            let anchor = hit_testing::label_anchor(segment, self.config.label_offset);
            hit_testing::within_box(pos, anchor, self.config.label_hit_box)
        })
    }

    /// Arms the editor so the next pointer press places `text`
    pub fn arm_annotation(&mut self, text: &str) -> EditorResult<()> {
        let text = text.trim();
        if text.is_empty() {
            return Err(EditorError::InvalidInput("Enter the label text first".to_owned()));
        }
        self.transition(EditorState::AwaitingAnnotation {
            text: text.to_owned(),
        });
        Ok(())
    }

    fn place_annotation(&mut self, pos: Pos2) {
        let text = match &self.state {
            EditorState::AwaitingAnnotation { text } => text.clone(),
            _ => return,
        };
        self.transition(EditorState::Idle);
        log::info!("Label '{}' placed at ({}, {})", text, pos.x, pos.y);
        self.document.add_annotation(Annotation { position: pos, text });
        self.mark_changed();
    }

    /// Maps one pointer event onto exactly one editor transition
    pub fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { position } => match self.state {
                EditorState::AwaitingStartPoint => self.set_cursor(position),
                EditorState::AwaitingAnnotation { .. } => self.place_annotation(position),
                EditorState::Idle | EditorState::Dragging { .. } => {
                    self.select_point_near(position);
                }
            },
            InputEvent::PointerMove { position } => self.drag_to(position),
            InputEvent::PointerUp => self.end_drag(),
            // Label editing opens a dialog, which is the host's business
            InputEvent::DoubleClick { .. } | InputEvent::SecondaryClick { .. } => {}
        }
    }

    /// Replaces the whole drawing, e.g. after opening a saved file
    pub fn load_document(&mut self, document: Document, cursor: Option<Pos2>) {
        log::info!("Loaded drawing with {} segments", document.segments().len());
        self.document = document;
        self.cursor = cursor;
        self.transition(if cursor.is_some() {
            EditorState::Idle
        } else {
            EditorState::AwaitingStartPoint
        });
        self.mark_changed();
    }

    /// Draws the current plan onto `surface`
    pub fn render(&self, surface: &mut impl Surface) {
        Renderer::default().render(self, surface);
    }

    /// Builds the SVG document for the current plan
    pub fn export_vector(&self) -> String {
        crate::export::svg_document(self)
    }

    pub fn summary(&self) -> PlanSummary {
        geometry::summarize(
            self.document.segments(),
            self.config.pixels_per_meter,
            self.config.anchor_threshold,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn editor_with_chain() -> LineEditor {
        let mut editor = LineEditor::default();
        editor.set_cursor(pos2(100.0, 100.0));
        editor.append_segment(2.0).unwrap();
        editor.append_segment(3.0).unwrap();
        editor
    }

    #[test]
    fn test_new_editor_waits_for_start_point() {
        let editor = LineEditor::default();
        assert!(editor.state().is_awaiting_start_point());
        assert_eq!(editor.cursor(), None);
    }

    #[test]
    fn test_parse_length() {
        assert_eq!(parse_length(" 2.5 "), Ok(2.5));
        assert_eq!(parse_length("3,25"), Ok(3.25));
        assert!(matches!(parse_length("abc"), Err(EditorError::InvalidInput(_))));
        assert!(matches!(parse_length(""), Err(EditorError::InvalidInput(_))));
        assert!(matches!(parse_length("-1"), Err(EditorError::InvalidInput(_))));
        assert!(matches!(parse_length("inf"), Err(EditorError::InvalidInput(_))));
        assert!(matches!(parse_length("NaN"), Err(EditorError::InvalidInput(_))));
    }

    #[test]
    fn test_rejected_append_keeps_revision() {
        let mut editor = editor_with_chain();
        let revision = editor.revision();
        assert!(editor.append_segment(0.0).is_err());
        assert_eq!(editor.revision(), revision);
    }

    #[test]
    fn test_chain_partner() {
        let editor = editor_with_chain();
        assert_eq!(
            editor.chain_partner(PointRef::new(0, Endpoint::End)),
            Some(PointRef::new(1, Endpoint::Start))
        );
        assert_eq!(
            editor.chain_partner(PointRef::new(1, Endpoint::Start)),
            Some(PointRef::new(0, Endpoint::End))
        );
        assert_eq!(editor.chain_partner(PointRef::new(0, Endpoint::Start)), None);
        assert_eq!(editor.chain_partner(PointRef::new(1, Endpoint::End)), None);
    }

    #[test]
    fn test_small_drag_does_not_stick_to_chain_partner() {
        let mut editor = editor_with_chain();
        assert!(editor.select_point_near(pos2(200.0, 100.0)));
        editor.drag_to(pos2(204.0, 103.0));
        assert_eq!(editor.segments()[0].end(), pos2(204.0, 103.0));
        assert_eq!(editor.segments()[1].start(), pos2(204.0, 103.0));
    }

    #[test]
    fn test_drag_without_selection_is_noop() {
        let mut editor = editor_with_chain();
        let before = editor.segments().to_vec();
        let revision = editor.revision();
        editor.drag_to(pos2(0.0, 0.0));
        assert_eq!(editor.segments(), before.as_slice());
        assert_eq!(editor.revision(), revision);
    }

    #[test]
    fn test_cursor_follows_dragged_chain_end() {
        let mut editor = editor_with_chain();
        assert!(editor.select_point_near(pos2(350.0, 100.0)));
        editor.drag_to(pos2(350.0, 250.0));
        editor.end_drag();
        assert_eq!(editor.cursor(), Some(pos2(350.0, 250.0)));
    }

    #[test]
    fn test_missed_selection_stays_idle() {
        let mut editor = editor_with_chain();
        assert!(!editor.select_point_near(pos2(600.0, 600.0)));
        assert!(editor.state().is_idle());
    }

    #[test]
    fn test_annotation_placement() {
        let mut editor = editor_with_chain();
        assert!(editor.arm_annotation("   ").is_err());
        editor.arm_annotation("Patio").unwrap();
        editor.handle_event(&InputEvent::PointerDown {
            position: pos2(40.0, 60.0),
        });
        assert!(editor.state().is_idle());
        assert_eq!(editor.document().annotations().len(), 1);
        assert_eq!(editor.document().annotations()[0].text, "Patio");
    }

    #[test]
    fn test_take_needs_render() {
        let mut editor = LineEditor::default();
        assert!(editor.take_needs_render());
        assert!(!editor.take_needs_render());
        editor.set_cursor(pos2(1.0, 1.0));
        assert!(editor.take_needs_render());
    }
}
