//! Plain value types such as `int` or `double`.

use crate::{Capabilities, TypeDescriptor};

/// How a [`Type`] is handed to the native call on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputPassing {
    /// Pass the variable itself.
    #[default]
    Value,
    /// Pass the address of the variable.
    Address,
}

/// A native type described by its C name and a single format code.
///
/// # Example
///
/// ```
/// use gluegen_core::{Type, TypeDescriptor};
///
/// let int = Type::new("int", "i");
/// assert_eq!(int.parse_args("spam").as_deref(), Some("&spam"));
/// assert_eq!(int.pass_input("spam").unwrap(), "spam");
/// assert_eq!(int.pass_output("spam").unwrap(), "&spam");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    type_name: String,
    format: String,
    input: InputPassing,
}

impl Type {
    /// Create a type passed by value on input.
    pub fn new(type_name: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            format: format.into(),
            input: InputPassing::Value,
        }
    }

    /// Create a type that is passed by address even on input.
    pub fn by_address(type_name: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            input: InputPassing::Address,
            ..Self::new(type_name, format)
        }
    }

    /// The input passing convention.
    pub fn input_passing(&self) -> InputPassing {
        self.input
    }
}

impl TypeDescriptor for Type {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::BIDIRECTIONAL
    }

    fn parse_format(&self) -> &str {
        &self.format
    }

    fn input_arg(&self, name: &str) -> String {
        match self.input {
            InputPassing::Value => name.to_string(),
            InputPassing::Address => format!("&{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DeclModifiers, SourceWriter};

    #[test]
    fn int_declares_and_parses() {
        let int = Type::new("int", "i");
        let mut out = SourceWriter::with_indent("");
        int.declare("x", false, &mut out).unwrap();
        assert_eq!(out.finish(), "int x;\n");
        assert_eq!(int.parse_format(), "i");
        assert_eq!(int.parse_args("x").as_deref(), Some("&x"));
        assert_eq!(int.build_format(), "i");
        assert_eq!(int.build_args("x"), "x");
    }

    #[test]
    fn declaration_parts_honor_modifiers() {
        let short = Type::new("short", "h");
        assert_eq!(
            short
                .arg_declarations("n", DeclModifiers::CONST | DeclModifiers::REFERENCE)
                .unwrap(),
            vec!["const short& n".to_string()]
        );
        assert!(short.aux_declarations("n").is_empty());
    }

    #[test]
    fn by_address_only_changes_input() {
        let ty = Type::by_address("FSRef", "O");
        assert_eq!(ty.input_passing(), InputPassing::Address);
        assert_eq!(ty.pass_input("ref").unwrap(), "&ref");
        assert_eq!(ty.pass_output("ref").unwrap(), "&ref");
        assert_eq!(ty.pass_by_reference("ref").unwrap(), "&ref");
        assert_eq!(ty.build_args("ref"), "ref");
    }

    #[test]
    fn no_cleanup_by_default() {
        let mut out = SourceWriter::new();
        Type::new("long", "l").cleanup("n", &mut out);
        Type::new("long", "l").parse_pre_check("n", &mut out);
        Type::new("long", "l").parse_post_check("n", &mut out);
        Type::new("long", "l").build_pre_check("n", &mut out);
        assert!(out.is_empty());
    }
}
