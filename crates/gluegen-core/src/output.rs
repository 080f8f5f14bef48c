//! Line-oriented source emitter.
//!
//! [`SourceWriter`] accumulates generated C text one line at a time, prefixing
//! each line with the current indentation. Descriptors only ever append to a
//! writer; they never touch storage directly.
//!
//! # Example
//!
//! ```
//! use gluegen_core::SourceWriter;
//!
//! let mut out = SourceWriter::with_indent("    ");
//! out.line("static int f(void)");
//! out.open_brace();
//! out.line("return 0;");
//! out.close_brace();
//!
//! assert_eq!(out.finish(), "static int f(void)\n{\n    return 0;\n}\n");
//! ```

/// Default indentation unit for generated C source.
pub const DEFAULT_INDENT: &str = "\t";

/// Accumulates generated source text.
#[derive(Debug, Clone)]
pub struct SourceWriter {
    /// The text produced so far
    buf: String,
    /// Current indentation depth
    level: usize,
    /// Text repeated `level` times in front of each non-empty line
    indent: String,
}

impl Default for SourceWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceWriter {
    /// Create an empty writer using [`DEFAULT_INDENT`].
    pub fn new() -> Self {
        Self::with_indent(DEFAULT_INDENT)
    }

    /// Create an empty writer with a custom indentation unit.
    pub fn with_indent(indent: impl Into<String>) -> Self {
        Self {
            buf: String::new(),
            level: 0,
            indent: indent.into(),
        }
    }

    // ==========================================================================
    // Emission
    // ==========================================================================

    /// Append text at the current indentation.
    ///
    /// Embedded newlines produce several lines, each indented; empty lines are
    /// written without trailing whitespace.
    pub fn line(&mut self, text: impl AsRef<str>) {
        for part in text.as_ref().split('\n') {
            if !part.is_empty() {
                for _ in 0..self.level {
                    self.buf.push_str(&self.indent);
                }
                self.buf.push_str(part);
            }
            self.buf.push('\n');
        }
    }

    /// Append an empty line.
    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Append a label one level to the left of the current indentation.
    pub fn label(&mut self, text: impl AsRef<str>) {
        self.dedent();
        self.line(text);
        self.indent();
    }

    /// Emit `{` and indent.
    pub fn open_brace(&mut self) {
        self.line("{");
        self.indent();
    }

    /// Dedent and emit `}`.
    pub fn close_brace(&mut self) {
        self.dedent();
        self.line("}");
    }

    // ==========================================================================
    // Indentation
    // ==========================================================================

    /// Increase the indentation depth.
    pub fn indent(&mut self) {
        self.level += 1;
    }

    /// Decrease the indentation depth, saturating at zero.
    pub fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// Current indentation depth.
    pub fn level(&self) -> usize {
        self.level
    }

    // ==========================================================================
    // Access
    // ==========================================================================

    /// The text produced so far.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Append everything written to `other`, line by line, at this writer's indentation.
    pub fn append(&mut self, other: &SourceWriter) {
        for line in other.as_str().lines() {
            if line.is_empty() {
                self.blank();
            } else {
                self.line(line);
            }
        }
    }

    /// Consume the writer and return the generated text.
    pub fn finish(self) -> String {
        self.buf
    }
}
