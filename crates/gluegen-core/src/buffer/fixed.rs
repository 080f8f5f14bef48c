use crate::{Capabilities, DeclModifiers, GenResult, SourceWriter, TypeDescriptor};

use super::{
    BUFFER_TYPE_NAME, BYTES_FORMAT, BufferElement, OPTIONAL_BYTES_FORMAT, bytes_parse_args,
    emit_error_label, emit_length_check, emit_length_transfer, emit_nullable_length_check,
    in_len_decl, input_pointer_decl, output_array_decl, reject_reference, size_decl,
};

/// Which halves of a fixed-size buffer exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedKind {
    /// Separate input and output buffers: `(in, out)`.
    InputOutput,
    /// The input is copied into the output, which is passed alone.
    CombinedInputOutput,
    /// Input only, passed without size information.
    Input,
    /// Output only, passed without size information.
    Output,
}

/// A buffer whose size is known when the glue code is generated.
///
/// The parsed input length must equal the size exactly; otherwise the
/// generated code raises `TypeError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedBuffer {
    element: BufferElement,
    size: String,
    kind: FixedKind,
    optional: bool,
}

impl FixedBuffer {
    /// Create a fixed buffer of `size` elements.
    pub fn new(size: impl ToString, element: BufferElement, kind: FixedKind) -> Self {
        Self {
            element,
            size: size.to_string(),
            kind,
            optional: false,
        }
    }

    /// Fixed input buffer.
    pub fn input(size: impl ToString, element: BufferElement) -> Self {
        Self::new(size, element, FixedKind::Input)
    }

    /// Fixed output buffer.
    pub fn output(size: impl ToString, element: BufferElement) -> Self {
        Self::new(size, element, FixedKind::Output)
    }

    /// Accept `None` from the caller, passing NULL and zero.
    ///
    /// The length check only applies when a buffer was supplied.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// The size expression.
    pub fn size(&self) -> &str {
        &self.size
    }

    /// The buffer kind.
    pub fn kind(&self) -> FixedKind {
        self.kind
    }

    fn has_input(&self) -> bool {
        self.kind != FixedKind::Output
    }

    fn has_output(&self) -> bool {
        self.kind != FixedKind::Input
    }
}

impl TypeDescriptor for FixedBuffer {
    fn type_name(&self) -> &str {
        BUFFER_TYPE_NAME
    }

    fn capabilities(&self) -> Capabilities {
        match self.kind {
            FixedKind::Input => Capabilities::INPUT | Capabilities::ARRAY,
            FixedKind::Output => {
                Capabilities::OUTPUT | Capabilities::ARRAY | Capabilities::UNPARSED_OUTPUT
            }
            FixedKind::InputOutput | FixedKind::CombinedInputOutput => {
                Capabilities::OUTPUT | Capabilities::ARRAY | Capabilities::PARSED_OUTPUT
            }
        }
    }

    fn arg_declarations(&self, name: &str, modifiers: DeclModifiers) -> GenResult<Vec<String>> {
        reject_reference(self.type_name(), modifiers)?;
        let mut decls = Vec::with_capacity(3);
        if self.has_input() {
            decls.push(input_pointer_decl(&self.element.data_type, name, modifiers));
        }
        if self.has_output() {
            decls.push(output_array_decl(
                self.type_name(),
                &self.element.data_type,
                name,
                &self.size,
                modifiers,
            )?);
        }
        decls.push(size_decl(&self.element.size_type, name));
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
        if self.optional {
            OPTIONAL_BYTES_FORMAT
        } else {
            BYTES_FORMAT
        }
    }

    fn parse_args(&self, name: &str) -> Option<String> {
        Some(bytes_parse_args(name))
    }

    fn parse_post_check(&self, name: &str, out: &mut SourceWriter) {
        if self.optional {
            emit_nullable_length_check(name, &self.size, out);
        } else {
            emit_length_check(name, &self.size, out);
        }
        emit_length_transfer(name, out);
    }

    fn build_format(&self) -> &str {
        BYTES_FORMAT
    }

    fn build_args(&self, name: &str) -> String {
        format!("{name}__out__, (int){}", self.size)
    }

    fn input_arg(&self, name: &str) -> String {
        format!("{name}__in__")
    }

    fn output_arg(&self, name: &str) -> String {
        match self.kind {
            FixedKind::InputOutput | FixedKind::Input => format!("{name}__in__, {name}__out__"),
            FixedKind::CombinedInputOutput => format!(
                "({} *)memcpy({name}__out__, {name}__in__, {})",
                self.element.data_type, self.size
            ),
            FixedKind::Output => format!("{name}__out__"),
        }
    }

    fn cleanup(&self, name: &str, out: &mut SourceWriter) {
        // Output-only buffers are never parsed, so nothing jumps here.
        if self.has_input() {
            emit_error_label(name, out);
        }
    }
}
