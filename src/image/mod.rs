//! Image editing module.

mod provider;
pub mod providers;
mod types;

pub use provider::EditProvider;
pub use types::{EditProviderKind, EditRequest, EditedImage, ImageFormat};
