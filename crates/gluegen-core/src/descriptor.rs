//! The [`TypeDescriptor`] contract.
//!
//! A descriptor describes how one native type is declared, extracted from the
//! runtime's argument tuple, passed to the native call, turned back into a
//! runtime value and cleaned up. Every method takes the variable name it is
//! generating code for and either returns a text fragment or appends lines to a
//! [`SourceWriter`].
//!
//! Direction checks live in the provided `pass_*` methods: implementors supply
//! the raw argument expressions (`input_arg`, `output_arg`, `reference_arg`)
//! and advertise what they support through [`capabilities`]. Asking for a
//! direction a descriptor lacks returns [`GenError::DirectionViolation`]
//! naming the declared type.
//!
//! [`capabilities`]: TypeDescriptor::capabilities

use std::fmt;

use bitflags::bitflags;

use crate::{GenError, GenResult, Operation, SourceWriter};

bitflags! {
    /// What a descriptor can be used for.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Usable as an input parameter.
        const INPUT = 0x01;
        /// Usable as an output (or in-out) parameter.
        const OUTPUT = 0x02;
        /// Usable as a C++ reference.
        const REFERENCE = 0x04;
        /// Passed with array semantics (the name decays to a pointer).
        const ARRAY = 0x08;
        /// Output storage sized or filled from a parsed argument: in-out only.
        const PARSED_OUTPUT = 0x10;
        /// Output storage that is never parsed: output-only.
        const UNPARSED_OUTPUT = 0x20;

        /// Plain bidirectional value type.
        const BIDIRECTIONAL = Self::INPUT.bits() | Self::OUTPUT.bits() | Self::REFERENCE.bits();
    }
}

impl Capabilities {
    /// Human-readable direction, used in contract-violation messages.
    pub fn direction_label(self) -> &'static str {
        match (self.contains(Self::INPUT), self.contains(Self::OUTPUT)) {
            (true, true) => "input or output",
            (true, false) => "input",
            (false, true) => "output",
            (false, false) => "no",
        }
    }
}

bitflags! {
    /// Modifiers applied when composing a declaration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DeclModifiers: u8 {
        /// Declare a C++ reference (`T& name`).
        const REFERENCE = 0x01;
        /// Declare `const T name`.
        const CONST = 0x02;
        /// Declare a pointer for an output parameter (`T* name`).
        const OUTPUT = 0x04;
    }
}

/// Compose `[const ]type[&][*] name`.
pub fn compose_declaration(type_name: &str, name: &str, modifiers: DeclModifiers) -> String {
    let constness = if modifiers.contains(DeclModifiers::CONST) {
        "const "
    } else {
        ""
    };
    let reference = if modifiers.contains(DeclModifiers::REFERENCE) {
        "&"
    } else {
        ""
    };
    let pointer = if modifiers.contains(DeclModifiers::OUTPUT) {
        "*"
    } else {
        ""
    };
    format!("{constness}{type_name}{reference}{pointer} {name}")
}

fn require(
    type_name: &str,
    capabilities: Capabilities,
    needed: Capabilities,
    operation: Operation,
) -> GenResult<()> {
    if capabilities.contains(needed) {
        return Ok(());
    }
    if needed.contains(Capabilities::REFERENCE) && !capabilities.contains(Capabilities::REFERENCE) {
        return Err(GenError::ReferenceUnsupported {
            type_name: type_name.to_string(),
            operation,
        });
    }
    Err(GenError::DirectionViolation {
        type_name: type_name.to_string(),
        operation,
        allowed: capabilities.direction_label(),
    })
}

/// Comment left in place of an error check for a value nobody checks.
pub fn emit_unchecked_marker(type_name: &str, name: &str, out: &mut SourceWriter) {
    out.line(format!("/* unchecked: no error check for {type_name} {name} */"));
}

/// How one native type is marshaled between the runtime and a native call.
pub trait TypeDescriptor: fmt::Debug + Send + Sync {
    /// The C type name used in declarations and error messages.
    fn type_name(&self) -> &str;

    /// Directions and passing styles this descriptor supports.
    fn capabilities(&self) -> Capabilities {
        Capabilities::BIDIRECTIONAL
    }

    /// Whether the argument shows up in the scripting-facing signature.
    fn is_visible(&self) -> bool {
        true
    }

    /// Whether values of this type are error codes rather than results.
    fn is_error_code(&self) -> bool {
        false
    }

    // ==========================================================================
    // Declarations
    // ==========================================================================

    /// Emit the declarations for a variable of this type, auxiliaries included.
    fn declare(&self, name: &str, reference: bool, out: &mut SourceWriter) -> GenResult<()> {
        let modifiers = if reference {
            DeclModifiers::REFERENCE
        } else {
            DeclModifiers::empty()
        };
        self.declare_with(name, modifiers, out)
    }

    /// Emit the declarations for a variable of this type with explicit modifiers.
    fn declare_with(
        &self,
        name: &str,
        modifiers: DeclModifiers,
        out: &mut SourceWriter,
    ) -> GenResult<()> {
        for decl in self.arg_declarations(name, modifiers)? {
            out.line(format!("{decl};"));
        }
        for decl in self.aux_declarations(name) {
            out.line(format!("{decl};"));
        }
        Ok(())
    }

    /// Declarations of the items passed to the native call.
    fn arg_declarations(&self, name: &str, modifiers: DeclModifiers) -> GenResult<Vec<String>> {
        Ok(vec![compose_declaration(self.type_name(), name, modifiers)])
    }

    /// Helper declarations needed only for marshaling (sizes and the like).
    fn aux_declarations(&self, _name: &str) -> Vec<String> {
        Vec::new()
    }

    // ==========================================================================
    // Argument parsing
    // ==========================================================================

    /// Format code used when extracting the value from the argument tuple.
    fn parse_format(&self) -> &str;

    /// Arguments handed to the parser, or `None` when nothing is parsed.
    fn parse_args(&self, name: &str) -> Option<String> {
        Some(format!("&{name}"))
    }

    /// Emit code that must run before the arguments are parsed.
    fn parse_pre_check(&self, _name: &str, _out: &mut SourceWriter) {}

    /// Emit code that must run after the arguments are parsed.
    fn parse_post_check(&self, _name: &str, _out: &mut SourceWriter) {}

    // ==========================================================================
    // Value construction
    // ==========================================================================

    /// Format code used when building the runtime value.
    fn build_format(&self) -> &str {
        self.parse_format()
    }

    /// Arguments handed to the value builder.
    fn build_args(&self, name: &str) -> String {
        name.to_string()
    }

    /// Emit code that must run before the result is built.
    fn build_pre_check(&self, _name: &str, _out: &mut SourceWriter) {}

    // ==========================================================================
    // Call-site arguments
    // ==========================================================================

    /// Unchecked call-site expression for an input parameter.
    fn input_arg(&self, name: &str) -> String {
        name.to_string()
    }

    /// Unchecked call-site expression for an output parameter.
    fn output_arg(&self, name: &str) -> String {
        format!("&{name}")
    }

    /// Unchecked call-site expression for a by-reference parameter.
    fn reference_arg(&self, name: &str) -> String {
        self.input_arg(name)
    }

    /// Call-site expression for an input parameter.
    fn pass_input(&self, name: &str) -> GenResult<String> {
        require(
            self.type_name(),
            self.capabilities(),
            Capabilities::INPUT,
            Operation::PassInput,
        )?;
        Ok(self.input_arg(name))
    }

    /// Call-site expression for an output or in-out parameter.
    fn pass_output(&self, name: &str) -> GenResult<String> {
        require(
            self.type_name(),
            self.capabilities(),
            Capabilities::OUTPUT,
            Operation::PassOutput,
        )?;
        Ok(self.output_arg(name))
    }

    /// Check an output use against whether the same variable is also parsed.
    fn check_output_use(&self, parsed: bool) -> GenResult<()> {
        let capabilities = self.capabilities();
        let required = if parsed && capabilities.contains(Capabilities::UNPARSED_OUTPUT) {
            "output-only"
        } else if !parsed && capabilities.contains(Capabilities::PARSED_OUTPUT) {
            "in-out"
        } else {
            return Ok(());
        };
        Err(GenError::ModeViolation {
            type_name: self.type_name().to_string(),
            used: if parsed { "an in-out" } else { "an output" },
            required,
        })
    }

    /// Call-site expression for a C++ by-reference parameter.
    fn pass_by_reference(&self, name: &str) -> GenResult<String> {
        require(
            self.type_name(),
            self.capabilities(),
            Capabilities::INPUT | Capabilities::REFERENCE,
            Operation::PassReference,
        )?;
        Ok(self.reference_arg(name))
    }

    // ==========================================================================
    // After the call
    // ==========================================================================

    /// Emit an error check on the value after the call.
    ///
    /// The default leaves a marker so unchecked values stay visible.
    fn check_error(&self, name: &str, out: &mut SourceWriter) {
        emit_unchecked_marker(self.type_name(), name, out);
    }

    /// Emit deallocation or other clean-up code.
    fn cleanup(&self, _name: &str, _out: &mut SourceWriter) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Bare;

    impl TypeDescriptor for Bare {
        fn type_name(&self) -> &str {
            "int"
        }

        fn parse_format(&self) -> &str {
            "i"
        }
    }

    #[derive(Debug)]
    struct InputOnly;

    impl TypeDescriptor for InputOnly {
        fn type_name(&self) -> &str {
            "char*"
        }

        fn capabilities(&self) -> Capabilities {
            Capabilities::INPUT
        }

        fn parse_format(&self) -> &str {
            "s"
        }
    }

    #[test]
    fn compose_declaration_modifiers() {
        assert_eq!(
            compose_declaration("int", "x", DeclModifiers::empty()),
            "int x"
        );
        assert_eq!(
            compose_declaration("Rect", "r", DeclModifiers::CONST | DeclModifiers::OUTPUT),
            "const Rect* r"
        );
        assert_eq!(
            compose_declaration("Str", "s", DeclModifiers::all()),
            "const Str&* s"
        );
    }

    #[test]
    fn provided_defaults() {
        let ty = Bare;
        assert_eq!(ty.parse_args("x").as_deref(), Some("&x"));
        assert_eq!(ty.build_format(), "i");
        assert_eq!(ty.build_args("x"), "x");
        assert_eq!(ty.pass_input("x").unwrap(), "x");
        assert_eq!(ty.pass_output("x").unwrap(), "&x");
        assert_eq!(ty.pass_by_reference("x").unwrap(), "x");
        assert!(ty.is_visible());
        assert!(!ty.is_error_code());
    }

    #[test]
    fn declare_writes_terminated_lines() {
        let mut out = SourceWriter::with_indent("");
        Bare.declare("x", false, &mut out).unwrap();
        Bare.declare("y", true, &mut out).unwrap();
        assert_eq!(out.finish(), "int x;\nint& y;\n");
    }

    #[test]
    fn check_error_leaves_marker() {
        let mut out = SourceWriter::with_indent("");
        Bare.check_error("_rv", &mut out);
        assert_eq!(out.finish(), "/* unchecked: no error check for int _rv */\n");
    }

    #[test]
    fn missing_direction_is_a_violation() {
        let err = InputOnly.pass_output("s").unwrap_err();
        assert_eq!(
            err,
            GenError::DirectionViolation {
                type_name: "char*".into(),
                operation: Operation::PassOutput,
                allowed: "input",
            }
        );
        assert_eq!(InputOnly.pass_input("s").unwrap(), "s");
    }

    #[test]
    fn missing_reference_capability() {
        let err = InputOnly.pass_by_reference("s").unwrap_err();
        assert!(matches!(err, GenError::ReferenceUnsupported { .. }));
    }

    #[derive(Debug)]
    struct SizedOutput;

    impl TypeDescriptor for SizedOutput {
        fn type_name(&self) -> &str {
            "Buffer"
        }

        fn capabilities(&self) -> Capabilities {
            Capabilities::OUTPUT | Capabilities::PARSED_OUTPUT
        }

        fn parse_format(&self) -> &str {
            "l"
        }
    }

    #[test]
    fn output_use_must_match_parsing() {
        assert!(SizedOutput.check_output_use(true).is_ok());
        let err = SizedOutput.check_output_use(false).unwrap_err();
        assert_eq!(
            err.to_string(),
            "type 'Buffer' cannot be used as an output parameter (it must be in-out)"
        );
        assert_eq!(err.type_name(), Some("Buffer"));

        // Plain values work either way.
        assert!(Bare.check_output_use(true).is_ok());
        assert!(Bare.check_output_use(false).is_ok());
    }

    #[test]
    fn direction_labels() {
        assert_eq!(Capabilities::INPUT.direction_label(), "input");
        assert_eq!(Capabilities::OUTPUT.direction_label(), "output");
        assert_eq!(Capabilities::BIDIRECTIONAL.direction_label(), "input or output");
    }
}
