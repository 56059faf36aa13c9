//! Parser and writer options.

/// Options for parsing fixture files.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Raise on the first failure instead of only clearing the OK flag.
    pub strict: bool,
}

impl ParseOptions {
    /// Create parse options with defaults (lenient).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable strict mode.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Set strict mode explicitly.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Options for writing fixture files.
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Write every column, including those equal to their default.
    pub write_default_values: bool,
    /// Text written verbatim before the header block (e.g. `# comment` lines).
    pub comments: Option<String>,
}

impl WriteOptions {
    /// Create writer options with defaults (sparse output, no comments).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write default-valued columns too.
    #[must_use]
    pub fn with_default_values(mut self, enable: bool) -> Self {
        self.write_default_values = enable;
        self
    }

    /// Prepend a comment block.
    #[must_use]
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }
}
