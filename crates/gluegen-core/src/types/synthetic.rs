//! Arguments that exist only on the native side.

use crate::{Capabilities, DeclModifiers, GenResult, TypeDescriptor};

/// A native argument filled in with a fixed expression.
///
/// The argument is invisible to scripts: nothing is declared, parsed or
/// built for it, and the call receives the substitute expression verbatim.
///
/// ```
/// use gluegen_core::{SyntheticType, TypeDescriptor};
///
/// let null_storage = SyntheticType::new("(void *)0");
/// assert_eq!(null_storage.parse_format(), "");
/// assert_eq!(null_storage.pass_input("ignored").unwrap(), "(void *)0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticType {
    substitute: String,
}

impl SyntheticType {
    /// Create a synthetic argument passing `substitute` to the call.
    pub fn new(substitute: impl Into<String>) -> Self {
        Self {
            substitute: substitute.into(),
        }
    }

    /// The expression passed to the native call.
    pub fn substitute(&self) -> &str {
        &self.substitute
    }
}

impl TypeDescriptor for SyntheticType {
    fn type_name(&self) -> &str {
        &self.substitute
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::INPUT
    }

    fn is_visible(&self) -> bool {
        false
    }

    fn arg_declarations(&self, _name: &str, _modifiers: DeclModifiers) -> GenResult<Vec<String>> {
        Ok(Vec::new())
    }

    fn parse_format(&self) -> &str {
        ""
    }

    fn parse_args(&self, _name: &str) -> Option<String> {
        None
    }

    fn build_format(&self) -> &str {
        ""
    }

    fn input_arg(&self, _name: &str) -> String {
        self.substitute.clone()
    }
}
