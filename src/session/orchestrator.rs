//! The edit session: owns all per-session state and drives the request lifecycle.

use crate::error::GenEditError;
use crate::image::{EditProvider, EditRequest, EditedImage};
use crate::session::prompt::EditPrompt;
use crate::session::state::{
    RequestState, CANCELLED_MESSAGE, MISSING_INPUT_MESSAGE, NO_IMAGE_MESSAGE,
    UNKNOWN_ERROR_MESSAGE, UPLOAD_FAILED_MESSAGE,
};
use crate::session::upload::UploadedImage;
use crate::session::view::View;
use std::path::Path;
use tokio::sync::watch;

/// One user's editing session.
///
/// State changes only through the methods below. The `begin_*`/`complete_*`
/// pairs are synchronous and perform no I/O; [`upload`](Self::upload) and
/// [`submit`](Self::submit) wrap them around the file read and the remote call.
/// Both drivers take `&mut self`, so a second submission or an upload cannot
/// start while a request is outstanding.
pub struct EditSession<P> {
    provider: P,
    image: Option<UploadedImage>,
    prompt: EditPrompt,
    result: Option<EditedImage>,
    state: RequestState,
    views: watch::Sender<View>,
}

impl<P> EditSession<P> {
    /// Creates an empty session that will send edits to `provider`.
    pub fn new(provider: P) -> Self {
        let (views, _) = watch::channel(View::default());
        Self {
            provider,
            image: None,
            prompt: EditPrompt::default(),
            result: None,
            state: RequestState::Idle,
            views,
        }
    }

    /// The remote collaborator.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The current upload, if any.
    pub fn image(&self) -> Option<&UploadedImage> {
        self.image.as_ref()
    }

    /// The current prompt.
    pub fn prompt(&self) -> &EditPrompt {
        &self.prompt
    }

    /// Mutable access to the prompt for incremental edits.
    pub fn prompt_mut(&mut self) -> &mut EditPrompt {
        &mut self.prompt
    }

    /// Replaces the prompt text.
    pub fn set_prompt(&mut self, text: impl Into<String>) {
        self.prompt.set(text);
    }

    /// The edited image from the last successful request.
    pub fn result(&self) -> Option<&EditedImage> {
        self.result.as_ref()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Message for the error banner, if the last action failed.
    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    /// Whether the submit action should be offered.
    pub fn can_submit(&self) -> bool {
        self.image.is_some() && !self.state.is_in_flight()
    }

    /// Snapshot for presentation.
    pub fn view(&self) -> View {
        View {
            original_preview: self
                .image
                .as_ref()
                .map(|image| image.preview().path().to_path_buf()),
            edited: self.result.clone(),
            loading: self.state.is_in_flight(),
            error: self.state.error().map(str::to_owned),
        }
    }

    /// Receives a fresh [`View`] after every state change.
    pub fn subscribe(&self) -> watch::Receiver<View> {
        self.views.subscribe()
    }

    fn publish(&self) {
        self.views.send_replace(self.view());
    }

    /// Clears stale output ahead of reading a new file.
    ///
    /// The previous image stays until the new one is ready.
    pub fn begin_upload(&mut self) {
        self.result = None;
        self.state = RequestState::Idle;
        self.publish();
    }

    /// Commits the outcome of reading a file.
    ///
    /// On success the previous upload is dropped, releasing its preview. On
    /// failure the previous upload is kept.
    pub fn complete_upload(&mut self, outcome: crate::Result<UploadedImage>) {
        match outcome {
            Ok(image) => {
                tracing::debug!(source = %image.source().display(), "upload ready");
                self.image = Some(image);
            }
            Err(e) => {
                tracing::warn!("failed to process image file: {e}");
                self.state = RequestState::Failed(UPLOAD_FAILED_MESSAGE.to_string());
            }
        }
        self.publish();
    }

    /// Validates inputs and moves to `InFlight`.
    ///
    /// Returns the request to send, or `None` when nothing should be sent:
    /// either inputs are missing (the session is then `Failed`) or a request
    /// is already outstanding (nothing changes).
    pub fn begin_submit(&mut self) -> Option<EditRequest> {
        if self.state.is_in_flight() {
            tracing::debug!("submit ignored, a request is already in flight");
            return None;
        }

        let image = match self.image {
            Some(ref image) if !self.prompt.is_empty() => image,
            _ => {
                self.result = None;
                self.state = RequestState::Failed(MISSING_INPUT_MESSAGE.to_string());
                self.publish();
                return None;
            }
        };

        let request = EditRequest::new(image.base64(), image.mime_type(), self.prompt.as_str());
        self.result = None;
        self.state = RequestState::InFlight;
        self.publish();
        Some(request)
    }

    /// Commits the outcome of the remote call and leaves `InFlight`.
    ///
    /// Outcomes arriving when no request is in flight are discarded.
    pub fn complete_submit(&mut self, outcome: crate::Result<Option<String>>) {
        if !self.state.is_in_flight() {
            tracing::warn!("discarding edit outcome, no request in flight");
            return;
        }

        match outcome {
            Ok(Some(base64)) if !base64.trim().is_empty() => {
                tracing::debug!(bytes = base64.len(), "edited image received");
                self.result = Some(EditedImage::new(base64));
                self.state = RequestState::Succeeded;
            }
            Ok(_) => {
                tracing::warn!("model returned no image");
                self.state = RequestState::Failed(NO_IMAGE_MESSAGE.to_string());
            }
            Err(e) => {
                tracing::warn!("edit request failed: {e}");
                self.state =
                    RequestState::Failed(format!("Generation failed: {}", describe_error(&e)));
            }
        }
        self.publish();
    }

    /// Abandons an outstanding request. No-op unless `InFlight`.
    pub fn cancel_submit(&mut self) {
        if self.state.is_in_flight() {
            tracing::debug!("edit request cancelled");
            self.state = RequestState::Failed(CANCELLED_MESSAGE.to_string());
            self.publish();
        }
    }
}

impl<P: EditProvider> EditSession<P> {
    /// Reads `path` and makes it the current image.
    pub async fn upload(&mut self, path: impl AsRef<Path>) -> &RequestState {
        self.begin_upload();
        let outcome = UploadedImage::load(path).await;
        self.complete_upload(outcome);
        &self.state
    }

    /// Sends the current image and prompt to the provider, once.
    ///
    /// Returns with the session `Succeeded` or `Failed`. If the returned future
    /// is dropped mid-request, the session is left `Failed` with a cancellation
    /// message instead of stuck `InFlight`.
    pub async fn submit(&mut self) -> &RequestState {
        let Some(request) = self.begin_submit() else {
            return &self.state;
        };

        let mut guard = InFlightGuard {
            session: &mut *self,
        };
        let outcome = guard.session.provider.edit(&request).await;
        guard.session.complete_submit(outcome);
        drop(guard);

        &self.state
    }
}

/// Leaves `InFlight` on drop, whatever happened to the future holding it.
struct InFlightGuard<'a, P> {
    session: &'a mut EditSession<P>,
}

impl<P> Drop for InFlightGuard<'_, P> {
    fn drop(&mut self) {
        self.session.cancel_submit();
    }
}

fn describe_error(error: &GenEditError) -> String {
    let description = error.to_string();
    if description.trim().is_empty() {
        UNKNOWN_ERROR_MESSAGE.to_string()
    } else {
        description
    }
}
