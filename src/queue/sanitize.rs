//! Sanitizer: strips characters that would upset a text surface.
//!
//! Only ASCII-printable characters (including the usual whitespace set) and
//! an allow-list of extra glyphs survive. Progress bars that draw with block
//! characters need the allow-list; the default admits the full block `█`.

/// The full block glyph used by most progress bars.
pub const FULL_BLOCK: char = '\u{2588}';

/// Escaped spelling of [`FULL_BLOCK`] emitted by some consoles.
const FULL_BLOCK_ESCAPE: &str = "\\u2588";

/// Sanitizer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizerConfig {
    /// Non-ASCII glyphs that are kept verbatim.
    pub allow: Vec<char>,
    /// Whether to turn the literal text `\u2588` back into [`FULL_BLOCK`].
    ///
    /// Defaults to `true` on Windows, where the glyph arrives escaped.
    pub unescape_full_block: bool,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            allow: vec![FULL_BLOCK],
            unescape_full_block: cfg!(windows),
        }
    }
}

impl SanitizerConfig {
    /// Add extra glyphs to the allow-list.
    #[must_use]
    pub fn with_allowed(mut self, glyphs: impl IntoIterator<Item = char>) -> Self {
        for glyph in glyphs {
            if !self.allow.contains(&glyph) {
                self.allow.push(glyph);
            }
        }
        self
    }

    /// Enable or disable unescaping of `\u2588`.
    #[must_use]
    pub const fn with_unescape(mut self, enabled: bool) -> Self {
        self.unescape_full_block = enabled;
        self
    }
}

/// Filters producer text before it is queued.
#[derive(Debug, Clone, Default)]
pub struct Sanitizer {
    config: SanitizerConfig,
}

impl Sanitizer {
    /// Create a sanitizer from its configuration.
    pub const fn new(config: SanitizerConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub const fn config(&self) -> &SanitizerConfig {
        &self.config
    }

    /// Check whether a single character survives filtering.
    #[inline]
    pub fn keeps(&self, ch: char) -> bool {
        is_printable(ch) || self.config.allow.contains(&ch)
    }

    /// Sanitize `text`.
    ///
    /// Returns `None` when nothing survives.
    pub fn sanitize(&self, text: &str) -> Option<String> {
        if text.is_empty() {
            return None;
        }

        let mut clean: String = text.chars().filter(|&ch| self.keeps(ch)).collect();

        if self.config.unescape_full_block && clean.contains(FULL_BLOCK_ESCAPE) {
            clean = clean.replace(FULL_BLOCK_ESCAPE, "\u{2588}");
        }

        (!clean.is_empty()).then_some(clean)
    }
}

/// ASCII printable, plus space, tab, newline, carriage return, vertical tab
/// and form feed.
#[inline]
const fn is_printable(ch: char) -> bool {
    matches!(ch, ' '..='~' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_control_chars_yields_nothing() {
        let sanitizer = Sanitizer::default();
        assert_eq!(sanitizer.sanitize("\x00\x01\x07\x1b\x7f"), None);
        assert_eq!(sanitizer.sanitize(""), None);
    }

    #[test]
    fn test_keeps_printable_subsequence_in_order() {
        let sanitizer = Sanitizer::default();
        let out = sanitizer.sanitize("a\x00b\x1b[0mc\u{e9}d\n").unwrap();
        assert_eq!(out, "ab[0mcd\n");
    }

    #[test]
    fn test_keeps_whitespace_set() {
        let sanitizer = Sanitizer::default();
        let out = sanitizer.sanitize("a\tb\rc\x0bd\x0ce\n").unwrap();
        assert_eq!(out, "a\tb\rc\x0bd\x0ce\n");
    }

    #[test]
    fn test_full_block_allowed_by_default() {
        let sanitizer = Sanitizer::default();
        assert_eq!(sanitizer.sanitize("[\u{2588}\u{2591}]").unwrap(), "[\u{2588}]");
    }

    #[test]
    fn test_extra_glyphs_allowed() {
        let config = SanitizerConfig::default().with_allowed(['\u{2591}', '\u{2588}']);
        assert_eq!(config.allow.len(), 2);

        let sanitizer = Sanitizer::new(config);
        assert_eq!(sanitizer.sanitize("[\u{2588}\u{2591}]").unwrap(), "[\u{2588}\u{2591}]");
    }

    #[test]
    fn test_unescape_full_block() {
        let sanitizer = Sanitizer::new(SanitizerConfig::default().with_unescape(true));
        assert_eq!(sanitizer.sanitize("|\\u2588\\u2588 |").unwrap(), "|\u{2588}\u{2588} |");

        let literal = Sanitizer::new(SanitizerConfig::default().with_unescape(false));
        assert_eq!(literal.sanitize("\\u2588").unwrap(), "\\u2588");
    }
}
