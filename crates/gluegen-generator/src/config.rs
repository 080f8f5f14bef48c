use gluegen_core::DEFAULT_INDENT;

/// Settings shared by every function a generator produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Prepended to each generated C function name: `<prefix>_<name>`.
    pub prefix: String,
    /// C type of `_self` in generated methods.
    pub object_type: String,
    /// Indentation unit of the generated source.
    pub indent: String,
    /// Name of the argument tuple parameter.
    pub args_name: String,
    /// Name of the result variable.
    pub result_name: String,
    /// Mark every returned value that no error check covers with an
    /// `/* unchecked */` comment.
    pub annotate_unchecked: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            prefix: "Py".to_string(),
            object_type: "PyObject".to_string(),
            indent: DEFAULT_INDENT.to_string(),
            args_name: "_args".to_string(),
            result_name: "_res".to_string(),
            annotate_unchecked: true,
        }
    }
}

impl GeneratorConfig {
    /// Default settings with the given function-name prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    /// Set the C type of `_self` for methods.
    pub fn object_type(mut self, object_type: impl Into<String>) -> Self {
        self.object_type = object_type.into();
        self
    }

    /// Set the indentation unit.
    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn annotate_unchecked(mut self, annotate: bool) -> Self {
        self.annotate_unchecked = annotate;
        self
    }

    /// The C name of a generated function.
    pub fn c_name(&self, function: &str) -> String {
        format!("{}_{}", self.prefix, function)
    }
}
