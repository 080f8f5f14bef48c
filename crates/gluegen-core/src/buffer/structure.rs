use crate::{Capabilities, DeclModifiers, GenResult, SourceWriter, TypeDescriptor};

use super::{
    BYTES_FORMAT, emit_error_label, emit_length_check, in_len_decl, input_pointer_decl,
    output_value_decl, reject_reference,
};

/// Which halves of a struct buffer exist and how the output is passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructKind {
    /// Input pointer and output struct: `(in, &out)`.
    InputOutput,
    /// The input is copied into the output struct, which is passed alone.
    CombinedInputOutput,
    /// Input pointer only.
    Input,
    /// Output struct only, passed by address.
    Output,
    /// Output of an array typedef, passed by name.
    ArrayOutput,
}

/// A C struct moved through the runtime as a byte string of `sizeof(T)` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructBuffer {
    struct_type: String,
    size: String,
    kind: StructKind,
}

impl StructBuffer {
    /// Create a struct buffer for `struct_type`.
    pub fn new(struct_type: impl Into<String>, kind: StructKind) -> Self {
        let struct_type = struct_type.into();
        let size = format!("sizeof({struct_type})");
        Self {
            struct_type,
            size,
            kind,
        }
    }

    /// The `sizeof` expression.
    pub fn size(&self) -> &str {
        &self.size
    }

    /// The buffer kind.
    pub fn kind(&self) -> StructKind {
        self.kind
    }

    fn has_input(&self) -> bool {
        matches!(
            self.kind,
            StructKind::InputOutput | StructKind::CombinedInputOutput | StructKind::Input
        )
    }

    fn has_output(&self) -> bool {
        self.kind != StructKind::Input
    }
}

impl TypeDescriptor for StructBuffer {
    fn type_name(&self) -> &str {
        &self.struct_type
    }

    fn capabilities(&self) -> Capabilities {
        match self.kind {
            StructKind::InputOutput | StructKind::CombinedInputOutput => {
                Capabilities::INPUT | Capabilities::OUTPUT | Capabilities::PARSED_OUTPUT
            }
            StructKind::Input => Capabilities::INPUT,
            StructKind::Output => Capabilities::OUTPUT | Capabilities::UNPARSED_OUTPUT,
            StructKind::ArrayOutput => {
                Capabilities::OUTPUT | Capabilities::ARRAY | Capabilities::UNPARSED_OUTPUT
            }
        }
    }

    fn arg_declarations(&self, name: &str, modifiers: DeclModifiers) -> GenResult<Vec<String>> {
        reject_reference(self.type_name(), modifiers)?;
        let mut decls = Vec::with_capacity(2);
        if self.has_input() {
            decls.push(input_pointer_decl(&self.struct_type, name, modifiers));
        }
        if self.has_output() {
            decls.push(output_value_decl(
                self.type_name(),
                &self.struct_type,
                name,
                modifiers,
            )?);
        }
        Ok(decls)
    }

    fn aux_declarations(&self, name: &str) -> Vec<String> {
        if self.has_input() {
            vec![in_len_decl(name)]
        } else {
            Vec::new()
        }
    }

    fn parse_format(&self) -> &str {
        BYTES_FORMAT
    }

    fn parse_args(&self, name: &str) -> Option<String> {
        Some(format!("(char **)&{name}__in__, &{name}__in_len__"))
    }

    fn parse_post_check(&self, name: &str, out: &mut SourceWriter) {
        emit_length_check(name, &self.size, out);
    }

    fn build_args(&self, name: &str) -> String {
        format!("(char *)&{name}__out__, (int){}", self.size)
    }

    fn input_arg(&self, name: &str) -> String {
        format!("{name}__in__")
    }

    fn output_arg(&self, name: &str) -> String {
        match self.kind {
            StructKind::InputOutput | StructKind::Input => format!("{name}__in__, &{name}__out__"),
            StructKind::CombinedInputOutput => format!(
                "({} *)memcpy((char *)&{name}__out__, (char *){name}__in__, {})",
                self.struct_type, self.size
            ),
            StructKind::Output => format!("&{name}__out__"),
            StructKind::ArrayOutput => format!("{name}__out__"),
        }
    }

    fn cleanup(&self, name: &str, out: &mut SourceWriter) {
        if self.has_input() {
            emit_error_label(name, out);
        }
    }
}
