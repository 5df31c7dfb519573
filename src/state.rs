use crate::segment::PointRef;

/// Interaction mode of the line editor.
///
/// ```text
///   arm_start_point            set_cursor
/// Idle ───────────► AwaitingStartPoint ──────────► Idle
///
///   arm_annotation             pointer down
/// Idle ───────────► AwaitingAnnotation ──────────► Idle
///
///   select_point_near (hit)    end_drag
/// Idle ───────────► Dragging ──────────────────────► Idle
///                   ▲      │ drag_to
///                   └──────┘
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditorState {
    #[default]
    Idle,
    /// The next pointer press places the start point
    AwaitingStartPoint,
    /// The next pointer press places this text
    AwaitingAnnotation { text: String },
    /// An endpoint follows the pointer
    Dragging { target: PointRef },
}

impl EditorState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    pub fn is_awaiting_start_point(&self) -> bool {
        matches!(self, Self::AwaitingStartPoint)
    }

    pub fn is_awaiting_annotation(&self) -> bool {
        matches!(self, Self::AwaitingAnnotation { .. })
    }

    /// The endpoint being dragged, if any
    pub fn drag_target(&self) -> Option<PointRef> {
        match self {
            Self::Dragging { target } => Some(*target),
            _ => None,
        }
    }

    /// Human readable name for logs and the status bar
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::AwaitingStartPoint => "Click to place the start point",
            Self::AwaitingAnnotation { .. } => "Click to place the label",
            Self::Dragging { .. } => "Dragging",
        }
    }
}
