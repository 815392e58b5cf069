//! Writer options

/// Layout options for [`super::Writer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterOptions {
    /// Number of spaces per open list
    pub indent_width: usize,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self { indent_width: 2 }
    }
}

impl WriterOptions {
    /// Generate indentation string for the given level
    pub fn indent(&self, level: usize) -> String {
        " ".repeat(self.indent_width * level)
    }
}
