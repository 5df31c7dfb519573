pub mod hit_testing;
pub mod measure;

pub use hit_testing::{label_anchor, nearest_within, segment_endpoints};
pub use measure::{PlanSummary, format_length, snap_to_angle_step, summarize};
