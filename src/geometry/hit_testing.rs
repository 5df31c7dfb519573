use egui::{Pos2, Vec2, vec2};

use crate::segment::{PointRef, Segment};

/// Every endpoint of every segment, in sequence order, start before end
pub fn segment_endpoints(segments: &[Segment]) -> impl Iterator<Item = (PointRef, Pos2)> + '_ {
    segments.iter().enumerate().flat_map(|(index, segment)| {
        segment
            .endpoints()
            .into_iter()
            .map(move |(endpoint, pos)| (PointRef::new(index, endpoint), pos))
    })
}

/// Picks the candidate closest to `target` within `threshold` (inclusive).
///
/// Candidates at exactly the same distance resolve to the one yielded first,
/// so callers control the tie-break through iteration order.
pub fn nearest_within<I>(target: Pos2, threshold: f32, candidates: I) -> Option<(PointRef, Pos2)>
where
    I: IntoIterator<Item = (PointRef, Pos2)>,
{
    let mut best: Option<(PointRef, Pos2, f32)> = None;

    for (point_ref, pos) in candidates {
        let distance = target.distance(pos);
        if distance > threshold {
            continue;
        }
        match best {
            Some((_, _, best_distance)) if best_distance <= distance => {}
            _ => best = Some((point_ref, pos, distance)),
        }
    }

    best.map(|(point_ref, pos, _)| (point_ref, pos))
}

/// Where a segment's length label is anchored
pub fn label_anchor(segment: &Segment, label_offset: f32) -> Pos2 {
    segment.midpoint() - vec2(0.0, label_offset)
}

/// True when `pos` lies strictly inside the box of half-extents `half_size`
/// centred on `anchor`
pub fn within_box(pos: Pos2, anchor: Pos2, half_size: Vec2) -> bool {
    (pos.x - anchor.x).abs() < half_size.x && (pos.y - anchor.y).abs() < half_size.y
}
