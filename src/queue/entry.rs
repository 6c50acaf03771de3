//! Queue entries exchanged between producers and the drain loop.

/// One item in the output queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Sanitized text to append to the display.
    Text(String),
    /// Erase the display. Ordered relative to surrounding text.
    Clear,
}

impl Entry {
    /// Text payload, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Clear => None,
        }
    }

    /// Check if this entry is the clear marker.
    pub const fn is_clear(&self) -> bool {
        matches!(self, Self::Clear)
    }
}
