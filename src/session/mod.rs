//! Interactive editing session: input acquisition, prompt capture, request
//! orchestration and presentation.

mod orchestrator;
mod prompt;
mod state;
mod upload;
mod view;

pub use orchestrator::EditSession;
pub use prompt::EditPrompt;
pub use state::{
    RequestState, CANCELLED_MESSAGE, MISSING_INPUT_MESSAGE, NO_IMAGE_MESSAGE,
    UNKNOWN_ERROR_MESSAGE, UPLOAD_FAILED_MESSAGE,
};
pub use upload::{PreviewRef, UploadedImage};
pub use view::View;
