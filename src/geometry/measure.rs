use egui::{Pos2, Vec2};
use serde::Serialize;

use crate::segment::Segment;

/// Formats a length in meters the way labels and the SVG export show it
pub fn format_length(meters: f32) -> String {
    format!("{:.2} m", meters)
}

/// Rotates `pos` around `pivot` onto the nearest multiple of `step_degrees`,
/// keeping its distance from the pivot.
pub fn snap_to_angle_step(pivot: Pos2, pos: Pos2, step_degrees: f32) -> Pos2 {
    let offset = pos - pivot;
    let length = offset.length();
    if length == 0.0 {
        return pos;
    }
    let step = step_degrees.to_radians();
    let snapped = (offset.angle() / step).round() * step;
    pivot + Vec2::angled(snapped) * length
}

/// Measurements of the whole plan shown in the status bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanSummary {
    pub segment_count: usize,
    /// Sum of all segment lengths in meters
    pub perimeter_m: f32,
    /// Whether the chain returns to its first point
    pub closed: bool,
    /// Enclosed area in square meters, zero for an open chain
    pub area_m2: f32,
}

/// Summarizes the chain. It counts as closed when it has at least three
/// segments and the last end lies within `close_tolerance` of the first start.
pub fn summarize(segments: &[Segment], pixels_per_meter: f32, close_tolerance: f32) -> PlanSummary {
    let perimeter_m = segments.iter().map(|s| s.length_m(pixels_per_meter)).sum();

    let closed = match (segments.first(), segments.last()) {
        (Some(first), Some(last)) if segments.len() >= 3 => {
            first.start().distance(last.end()) <= close_tolerance
        }
        _ => false,
    };

    let area_m2 = if closed {
        shoelace_area(&chain_vertices(segments)) / (pixels_per_meter * pixels_per_meter)
    } else {
        0.0
    };

    PlanSummary {
        segment_count: segments.len(),
        perimeter_m,
        closed,
        area_m2,
    }
}

/// Vertices of the chain in drawing order with consecutive duplicates removed
fn chain_vertices(segments: &[Segment]) -> Vec<Pos2> {
    let mut vertices: Vec<Pos2> = Vec::with_capacity(segments.len() + 1);
    for segment in segments {
        for point in [segment.start(), segment.end()] {
            if vertices.last() != Some(&point) {
                vertices.push(point);
            }
        }
    }
    vertices
}

fn shoelace_area(vertices: &[Pos2]) -> f32 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let twice_area: f32 = vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();
    twice_area.abs() / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use egui::pos2;

    #[test]
    fn test_format_length() {
        assert_eq!(format_length(2.0), "2.00 m");
        assert_eq!(format_length(3.456), "3.46 m");
    }

    #[test]
    fn test_snap_to_horizontal() {
        let snapped = snap_to_angle_step(pos2(0.0, 0.0), pos2(10.0, 1.0), 45.0);
        assert_relative_eq!(snapped.x, (101.0f32).sqrt(), epsilon = 1e-4);
        assert_relative_eq!(snapped.y, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_snap_to_diagonal() {
        let snapped = snap_to_angle_step(pos2(10.0, 10.0), pos2(20.0, 19.0), 45.0);
        assert_relative_eq!(snapped.x - 10.0, snapped.y - 10.0, epsilon = 1e-4);
        assert_relative_eq!(snapped.distance(pos2(10.0, 10.0)), (181.0f32).sqrt(), epsilon = 1e-4);
    }

    #[test]
    fn test_snap_leaves_pivot_alone() {
        let pivot = pos2(5.0, 5.0);
        assert_eq!(snap_to_angle_step(pivot, pivot, 45.0), pivot);
    }

    #[test]
    fn test_closed_rectangle_summary() {
        let segments = vec![
            Segment::new(pos2(0.0, 0.0), pos2(200.0, 0.0)),
            Segment::new(pos2(200.0, 0.0), pos2(200.0, 150.0)),
            Segment::new(pos2(200.0, 150.0), pos2(0.0, 150.0)),
            Segment::new(pos2(0.0, 150.0), pos2(0.0, 0.0)),
        ];
        let summary = summarize(&segments, 50.0, 10.0);
        assert!(summary.closed);
        assert_eq!(summary.segment_count, 4);
        assert_relative_eq!(summary.perimeter_m, 14.0, epsilon = 1e-4);
        assert_relative_eq!(summary.area_m2, 12.0, epsilon = 1e-4);
    }

    #[test]
    fn test_open_chain_has_no_area() {
        let segments = vec![
            Segment::new(pos2(0.0, 0.0), pos2(100.0, 0.0)),
            Segment::new(pos2(100.0, 0.0), pos2(100.0, 100.0)),
        ];
        let summary = summarize(&segments, 50.0, 10.0);
        assert!(!summary.closed);
        assert_eq!(summary.area_m2, 0.0);
        assert_relative_eq!(summary.perimeter_m, 4.0, epsilon = 1e-4);
    }
}
