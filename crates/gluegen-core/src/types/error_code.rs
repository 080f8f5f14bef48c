//! Status-code types that turn into exceptions.

use crate::{SourceWriter, TypeDescriptor};

/// Success value compared against by default.
pub const DEFAULT_SUCCESS: &str = "noErr";

/// Function raising the runtime exception by default.
pub const DEFAULT_RAISE_FN: &str = "PyMac_Error";

/// A native status code whose value signals success or failure.
///
/// When the generator places a value of this type in error mode, the check
/// after the call returns through the raise function on any value other than
/// the success constant.
///
/// ```
/// use gluegen_core::{ErrorCodeType, SourceWriter, TypeDescriptor};
///
/// let oserr = ErrorCodeType::new("OSErr", "h");
/// let mut out = SourceWriter::with_indent("");
/// oserr.check_error("_err", &mut out);
/// assert_eq!(out.finish(), "if (_err != noErr) return PyMac_Error(_err);\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorCodeType {
    type_name: String,
    format: String,
    success: String,
    raise_fn: String,
}

impl ErrorCodeType {
    /// Create an error-code type using the default success value and raise function.
    pub fn new(type_name: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            format: format.into(),
            success: DEFAULT_SUCCESS.to_string(),
            raise_fn: DEFAULT_RAISE_FN.to_string(),
        }
    }

    /// Use a different success constant.
    pub fn with_success(mut self, success: impl Into<String>) -> Self {
        self.success = success.into();
        self
    }

    /// Use a different raise function.
    pub fn with_raise_fn(mut self, raise_fn: impl Into<String>) -> Self {
        self.raise_fn = raise_fn.into();
        self
    }

    /// The success constant.
    pub fn success(&self) -> &str {
        &self.success
    }

    /// The raise function.
    pub fn raise_fn(&self) -> &str {
        &self.raise_fn
    }
}

impl TypeDescriptor for ErrorCodeType {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn is_error_code(&self) -> bool {
        true
    }

    fn parse_format(&self) -> &str {
        &self.format
    }

    fn check_error(&self, name: &str, out: &mut SourceWriter) {
        out.line(format!(
            "if ({name} != {}) return {}({name});",
            self.success, self.raise_fn
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_success_and_raise() {
        let status = ErrorCodeType::new("HRESULT", "l")
            .with_success("S_OK")
            .with_raise_fn("Com_Error");
        assert_eq!(status.success(), "S_OK");
        assert_eq!(status.raise_fn(), "Com_Error");

        let mut out = SourceWriter::with_indent("");
        status.check_error("_err", &mut out);
        assert_eq!(out.finish(), "if (_err != S_OK) return Com_Error(_err);\n");
    }

    #[test]
    fn behaves_like_a_plain_value_otherwise() {
        let oserr = ErrorCodeType::new("OSErr", "h");
        assert!(oserr.is_error_code());
        assert_eq!(oserr.parse_format(), "h");
        assert_eq!(oserr.pass_input("e").unwrap(), "e");
        assert_eq!(oserr.pass_output("e").unwrap(), "&e");
    }
}
