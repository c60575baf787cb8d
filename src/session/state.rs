//! Request lifecycle state and the user-facing messages it carries.

/// Shown when the selected file cannot be read or encoded.
pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to process the image file. Please try another one.";

/// Shown when submit is attempted without an image or without a prompt.
pub const MISSING_INPUT_MESSAGE: &str = "Please upload an image and enter a prompt.";

/// Shown when the service answered but produced no image.
pub const NO_IMAGE_MESSAGE: &str =
    "The model did not return an image. Please try a different prompt.";

/// Stands in for an error that carries no description.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Shown when an in-flight submission is abandoned before it completes.
pub const CANCELLED_MESSAGE: &str = "The edit request was cancelled.";

/// Lifecycle of the current edit attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestState {
    /// Nothing has been attempted since the last upload.
    #[default]
    Idle,
    /// Exactly one request is outstanding.
    InFlight,
    /// The last request produced an edited image.
    Succeeded,
    /// The last action failed; the message is shown to the user.
    Failed(String),
}

impl RequestState {
    /// Returns true while a request is outstanding.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight)
    }

    /// Returns the failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl std::fmt::Display for RequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::InFlight => write!(f, "in flight"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed(message) => write!(f, "failed: {message}"),
        }
    }
}
