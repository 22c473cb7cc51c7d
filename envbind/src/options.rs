//! Per-call binding options

use std::fmt;
use std::io::Write;

/// Options for one binding pass.
///
/// ```rust
/// use envbind::Options;
///
/// let mut help = Vec::new();
/// let options = Options::new()
///     .with_prefix("APP_")
///     .with_slice_separator(";")
///     .with_strict_mode()
///     .with_usage_on_error(&mut help);
/// assert_eq!(options.prefix(), "APP_");
/// ```
pub struct Options<'a> {
    prefix: String,
    separator: String,
    strict: bool,
    usage: Option<&'a mut dyn Write>,
}

impl<'a> Options<'a> {
    /// Options with no prefix, a single space separator, strict mode off
    /// and no usage output
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `prefix` to every variable name
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Separator used to split values of `Vec<T>` fields.
    ///
    /// An empty separator splits into single characters.
    pub fn with_slice_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Treat every field without an explicit default as required
    pub fn with_strict_mode(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Write the usage table to `sink` when binding fails
    pub fn with_usage_on_error(mut self, sink: &'a mut dyn Write) -> Self {
        self.usage = Some(sink);
        self
    }

    /// Prefix prepended to every variable name
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Separator for `Vec<T>` fields
    pub fn slice_separator(&self) -> &str {
        &self.separator
    }

    /// Whether strict mode is enabled
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub(crate) fn take_usage_sink(&mut self) -> Option<&'a mut dyn Write> {
        self.usage.take()
    }
}

impl Default for Options<'_> {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            separator: " ".to_string(),
            strict: false,
            usage: None,
        }
    }
}

impl fmt::Debug for Options<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("prefix", &self.prefix)
            .field("separator", &self.separator)
            .field("strict", &self.strict)
            .field("usage_on_error", &self.usage.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.prefix(), "");
        assert_eq!(options.slice_separator(), " ");
        assert!(!options.is_strict());
        assert!(options.usage.is_none());
    }

    #[test]
    fn test_builder_composes() {
        let mut sink = Vec::new();
        let mut options = Options::new()
            .with_strict_mode()
            .with_prefix("APP_")
            .with_slice_separator(",")
            .with_usage_on_error(&mut sink);
        assert_eq!(options.prefix(), "APP_");
        assert_eq!(options.slice_separator(), ",");
        assert!(options.is_strict());
        assert!(options.take_usage_sink().is_some());
        assert!(options.take_usage_sink().is_none());
    }

    #[test]
    fn test_debug_hides_sink() {
        let mut sink = Vec::new();
        let options = Options::new().with_usage_on_error(&mut sink);
        let debug = format!("{options:?}");
        assert!(debug.contains("usage_on_error: true"), "{debug}");
    }
}
