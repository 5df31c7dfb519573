use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::segment::Segment;

/// Free text placed on the canvas next to the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub position: Pos2,
    pub text: String,
}

/// Everything that gets drawn: the segment chain plus free annotations.
///
/// Segment order matters: neighbouring segments share an endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    segments: Vec<Segment>,
    annotations: Vec<Annotation>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub(crate) fn segments_mut(&mut self) -> &mut [Segment] {
        &mut self.segments
    }

    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub(crate) fn push_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub(crate) fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    pub(crate) fn clear(&mut self) {
        self.segments.clear();
        self.annotations.clear();
    }

    /// True when every stored coordinate is a finite number
    pub fn is_finite(&self) -> bool {
        self.segments.iter().all(Segment::is_finite)
            && self
                .annotations
                .iter()
                .all(|a| a.position.x.is_finite() && a.position.y.is_finite())
    }
}
