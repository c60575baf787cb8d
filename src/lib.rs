#![warn(missing_docs)]
//! GenEdit - edit images with a text prompt using generative AI.
//!
//! Upload an image, describe the change, and get the edited image back from a
//! remote model. The [`EditSession`] owns the whole workflow: the current
//! upload, the prompt, the request lifecycle and the last result.
//!
//! # Quick Start
//!
//! ```no_run
//! use genedit::{EditSession, GeminiProvider, RequestState};
//!
//! #[tokio::main]
//! async fn main() -> genedit::Result<()> {
//!     let provider = GeminiProvider::builder().build()?;
//!     let mut session = EditSession::new(provider);
//!
//!     session.upload("cat.png").await;
//!     session.set_prompt("Give the cat a tiny wizard hat");
//!
//!     if session.submit().await == &RequestState::Succeeded {
//!         if let Some(edited) = session.result() {
//!             edited.save("cat-wizard.png")?;
//!         }
//!     } else {
//!         eprintln!("{}", session.view());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `gemini`: Gemini (Google) image editing provider
//! - `cli`: Command-line interface

mod error;
pub mod image;
pub mod session;

// Re-export error types at crate root
pub use error::{GenEditError, Result};

pub use image::{EditProvider, EditProviderKind, EditRequest, EditedImage, ImageFormat};
pub use session::{EditPrompt, EditSession, PreviewRef, RequestState, UploadedImage, View};

#[cfg(feature = "gemini")]
pub use image::providers::{GeminiModel, GeminiProvider, GeminiProviderBuilder};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{GenEditError, Result};
    pub use crate::image::{EditProvider, EditRequest, EditedImage};
    pub use crate::session::{EditSession, RequestState, View};

    #[cfg(feature = "gemini")]
    pub use crate::image::providers::GeminiProvider;
}
