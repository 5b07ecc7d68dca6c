//! Options that change how source text is accepted.

/// The default limit on the number of characters in an identifier.
pub const DEFAULT_MAX_IDENTIFIER_LENGTH: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Identifiers longer than this produce a diagnostic.
    pub max_identifier_length: usize,
    /// Whether an identifier over the limit stops compilation. When false,
    /// the diagnostic is a warning and the identifier is kept as written.
    pub long_identifier_is_error: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_identifier_length: DEFAULT_MAX_IDENTIFIER_LENGTH,
            long_identifier_is_error: false,
        }
    }
}
