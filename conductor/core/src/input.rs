//! Input Buffer
//!
//! The text the user is composing. Owned by the session and written only by
//! surface input events; the request controller receives a copy on submit.

/// Mutable text awaiting submission
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    /// Empty buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole text
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Append one character
    pub fn push(&mut self, ch: char) {
        self.text.push(ch);
    }

    /// Remove the last character, if any
    pub fn pop(&mut self) -> Option<char> {
        self.text.pop()
    }

    /// Empty the buffer
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Current text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the text is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the text would be accepted by a submit
    ///
    /// Whitespace-only text is not submittable.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        !self.text.trim().is_empty()
    }
}
