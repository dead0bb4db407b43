//! The narration sink.
//!
//! Everything the player sees leaves the engine through [`Narrator::emit`],
//! after the text processor has expanded its directives.

/// Receives finished narration.
pub trait Narrator {
    /// Emits one paragraph of narration.
    fn emit(&mut self, text: &str);
}

impl Narrator for Vec<String> {
    fn emit(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

/// Collects narration in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NarrationBuffer {
    lines: Vec<String>,
}

impl NarrationBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The paragraphs emitted so far.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Everything emitted, one paragraph per line.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Returns true if any paragraph contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }

    /// Returns true if nothing has been emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Removes and returns the emitted paragraphs.
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }

    /// Discards the emitted paragraphs.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl Narrator for NarrationBuffer {
    fn emit(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}
