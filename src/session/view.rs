//! Result presentation.

use crate::image::EditedImage;
use std::fmt;
use std::path::PathBuf;

/// Everything a front end needs to draw the session, and nothing else.
///
/// A `View` is a snapshot: rendering it can never change the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    /// Preview of the uploaded original.
    pub original_preview: Option<PathBuf>,
    /// The edited image returned by the last successful request.
    pub edited: Option<EditedImage>,
    /// True while a request is outstanding.
    pub loading: bool,
    /// Message for the error banner.
    pub error: Option<String>,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref error) = self.error {
            writeln!(f, "[error] {error}")?;
        }

        match self.original_preview {
            Some(ref path) => writeln!(f, "Original: {}", path.display())?,
            None => writeln!(f, "Original: (no image uploaded)")?,
        }

        if self.loading {
            write!(f, "Edited:   generating...")
        } else if let Some(ref edited) = self.edited {
            let format = edited
                .detected_format()
                .map(|format| format.to_string())
                .unwrap_or_else(|| "unknown format".to_string());
            write!(
                f,
                "Edited:   ready ({}, {} base64 chars)",
                format,
                edited.as_base64().len()
            )
        } else {
            write!(f, "Edited:   (none)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty() {
        let view = View::default();
        assert_eq!(
            view.to_string(),
            "Original: (no image uploaded)\nEdited:   (none)"
        );
    }

    #[test]
    fn test_render_error_and_loading() {
        let view = View {
            original_preview: Some(PathBuf::from("/tmp/p.png")),
            edited: None,
            loading: true,
            error: Some("nope".into()),
        };
        let text = view.to_string();
        assert!(text.starts_with("[error] nope\n"));
        assert!(text.contains("Original: /tmp/p.png"));
        assert!(text.ends_with("Edited:   generating..."));
    }

    #[test]
    fn test_render_result() {
        // "iVBORw0KGgoAAAAA" decodes to the 12-byte PNG signature prefix
        let view = View {
            original_preview: None,
            edited: Some(EditedImage::new("iVBORw0KGgoAAAAA")),
            loading: false,
            error: None,
        };
        assert!(view.to_string().ends_with("Edited:   ready (png, 16 base64 chars)"));
    }
}
