//! Prompt capture.

/// User-editable text describing the desired edit.
///
/// No validation happens here; emptiness is checked when a request is submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPrompt {
    text: String,
}

impl EditPrompt {
    /// Creates a prompt holding `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Returns the current text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Replaces the whole text.
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Appends to the text.
    pub fn push_str(&mut self, more: &str) {
        self.text.push_str(more);
    }

    /// Empties the text.
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Whitespace-only text counts as empty.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_operations() {
        let mut prompt = EditPrompt::default();
        assert!(prompt.is_empty());

        prompt.set("Add a");
        prompt.push_str(" hat");
        assert_eq!(prompt.as_str(), "Add a hat");
        assert!(!prompt.is_empty());

        prompt.set("  \n");
        assert!(prompt.is_empty());
        assert_eq!(prompt.as_str(), "  \n");

        prompt.clear();
        assert_eq!(prompt, EditPrompt::new(""));
    }
}
