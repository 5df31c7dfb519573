use egui::{Pos2, pos2};
use serde::{Deserialize, Serialize};

/// Which end of a segment a point refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    Start,
    End,
}

impl Endpoint {
    pub fn opposite(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Start,
        }
    }
}

/// Addresses one endpoint of one segment in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointRef {
    /// Index into the segment sequence
    pub segment: usize,
    pub endpoint: Endpoint,
}

impl PointRef {
    pub fn new(segment: usize, endpoint: Endpoint) -> Self {
        Self { segment, endpoint }
    }
}

/// A straight wall segment between two canvas points.
///
/// The real-world length is always derived from the endpoints, so it can
/// never drift from the geometry after an endpoint moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    start: Pos2,
    end: Pos2,
}

impl Segment {
    pub fn new(start: Pos2, end: Pos2) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> Pos2 {
        self.start
    }

    pub fn end(&self) -> Pos2 {
        self.end
    }

    pub fn point(&self, endpoint: Endpoint) -> Pos2 {
        match endpoint {
            Endpoint::Start => self.start,
            Endpoint::End => self.end,
        }
    }

    pub(crate) fn set_point(&mut self, endpoint: Endpoint, pos: Pos2) {
        match endpoint {
            Endpoint::Start => self.start = pos,
            Endpoint::End => self.end = pos,
        }
    }

    /// Both endpoints in start, end order
    pub fn endpoints(&self) -> [(Endpoint, Pos2); 2] {
        [(Endpoint::Start, self.start), (Endpoint::End, self.end)]
    }

    /// Length in visual units
    pub fn length_px(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Length in meters for the given scale
    pub fn length_m(&self, pixels_per_meter: f32) -> f32 {
        self.length_px() / pixels_per_meter
    }

    pub fn midpoint(&self) -> Pos2 {
        pos2(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }

    /// Direction angle in radians, 0 pointing right
    pub fn angle(&self) -> f32 {
        (self.end - self.start).angle()
    }

    pub fn is_finite(&self) -> bool {
        self.start.x.is_finite()
            && self.start.y.is_finite()
            && self.end.x.is_finite()
            && self.end.y.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_follows_endpoints() {
        let mut segment = Segment::new(pos2(100.0, 100.0), pos2(200.0, 100.0));
        assert_eq!(segment.length_m(50.0), 2.0);

        segment.set_point(Endpoint::End, pos2(100.0, 250.0));
        assert_eq!(segment.length_m(50.0), 3.0);
    }

    #[test]
    fn test_midpoint_and_angle() {
        let segment = Segment::new(pos2(0.0, 0.0), pos2(0.0, 40.0));
        assert_eq!(segment.midpoint(), pos2(0.0, 20.0));
        assert!((segment.angle() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_endpoint_opposite() {
        assert_eq!(Endpoint::Start.opposite(), Endpoint::End);
        assert_eq!(Endpoint::End.opposite(), Endpoint::Start);
    }
}
