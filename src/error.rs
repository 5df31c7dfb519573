use thiserror::Error;

/// Errors reported to the user when an editor command is rejected.
///
/// Both kinds leave the editor untouched; the host shows them as a blocking
/// notification and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// The command needs state that does not exist yet (e.g. no start point)
    #[error("{0}")]
    InvalidState(String),
    /// The command was given a value it cannot use
    #[error("{0}")]
    InvalidInput(String),
}

impl EditorError {
    /// Short heading for the notification window
    pub fn title(&self) -> &'static str {
        match self {
            Self::InvalidState(_) => "Invalid state",
            Self::InvalidInput(_) => "Invalid input",
        }
    }
}

/// Result type for editor commands
pub type EditorResult<T> = Result<T, EditorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_titles() {
        let state = EditorError::InvalidState("no start point".to_owned());
        let input = EditorError::InvalidInput("not a number".to_owned());
        assert_eq!(state.title(), "Invalid state");
        assert_eq!(input.title(), "Invalid input");
        assert_eq!(input.to_string(), "not a number");
    }
}
