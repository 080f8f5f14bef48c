use crate::{Capabilities, DeclModifiers, GenResult, SourceWriter, TypeDescriptor};

use super::{
    BUFFER_TYPE_NAME, BYTES_FORMAT, BufferElement, OPTIONAL_BYTES_FORMAT, bytes_parse_args,
    emit_error_label, emit_length_transfer, in_len_decl, input_pointer_decl, output_pointer_decl,
    reject_reference, size_decl,
};

/// Call convention of a heap buffer.
///
/// The in/out kinds receive the input data from the caller and allocate an
/// output buffer of the same length. The output kinds receive only the
/// requested size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapKind {
    /// `(in, out, len)`
    InputOutput,
    /// `(in, out, &len)`
    VarInputOutput,
    /// Input copied into the output: `(inout, len)`.
    CombinedInputOutput,
    /// Input copied into the output: `(inout, &len)`.
    VarCombinedInputOutput,
    /// `(out, len)`: the capacity is the requested size.
    Output,
    /// `(out, &len)`: the call reports how much it used.
    VarOutput,
    /// `(out, len, &len)`: fixed capacity plus the length actually used.
    VarVarOutput,
    /// `(&out, &len)`: the callee allocates the buffer.
    MallocOutput,
}

impl HeapKind {
    fn has_input(self) -> bool {
        matches!(
            self,
            HeapKind::InputOutput
                | HeapKind::VarInputOutput
                | HeapKind::CombinedInputOutput
                | HeapKind::VarCombinedInputOutput
        )
    }
}

/// An output buffer living on the heap for the duration of the call.
///
/// ```
/// use gluegen_core::buffer::{BufferElement, HeapBuffer, HeapKind};
/// use gluegen_core::TypeDescriptor;
///
/// let out = HeapBuffer::new(BufferElement::new("char", "long", "l"), HeapKind::VarOutput);
/// assert_eq!(out.parse_format(), "l");
/// assert_eq!(out.pass_output("buf").unwrap(), "buf__out__, &buf__len__");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeapBuffer {
    element: BufferElement,
    kind: HeapKind,
}

impl HeapBuffer {
    /// Create a heap buffer.
    pub fn new(element: BufferElement, kind: HeapKind) -> Self {
        Self { element, kind }
    }

    /// The call convention.
    pub fn kind(&self) -> HeapKind {
        self.kind
    }
}

impl TypeDescriptor for HeapBuffer {
    fn type_name(&self) -> &str {
        BUFFER_TYPE_NAME
    }

    fn capabilities(&self) -> Capabilities {
        let parsing = match self.kind {
            HeapKind::MallocOutput => Capabilities::UNPARSED_OUTPUT,
            _ => Capabilities::PARSED_OUTPUT,
        };
        Capabilities::OUTPUT | Capabilities::ARRAY | parsing
    }

    fn arg_declarations(&self, name: &str, modifiers: DeclModifiers) -> GenResult<Vec<String>> {
        reject_reference(self.type_name(), modifiers)?;
        let mut decls = Vec::with_capacity(3);
        if self.kind.has_input() {
            decls.push(input_pointer_decl(&self.element.data_type, name, modifiers));
        }
        let out_decl = output_pointer_decl(
            self.type_name(),
            &self.element.data_type,
            name,
            modifiers,
        )?;
        decls.push(match self.kind {
            HeapKind::MallocOutput => format!("{out_decl} = NULL"),
            _ => out_decl,
        });
        decls.push(size_decl(&self.element.size_type, name));
        Ok(decls)
    }

    fn aux_declarations(&self, name: &str) -> Vec<String> {
        match self.kind {
            HeapKind::MallocOutput => Vec::new(),
            _ => vec![in_len_decl(name)],
        }
    }

    fn parse_format(&self) -> &str {
        match self.kind {
            HeapKind::MallocOutput => "",
            kind if kind.has_input() => BYTES_FORMAT,
            _ => self.element.size_format.as_str(),
        }
    }

    fn parse_args(&self, name: &str) -> Option<String> {
        match self.kind {
            HeapKind::MallocOutput => None,
            kind if kind.has_input() => Some(bytes_parse_args(name)),
            _ => Some(format!("&{name}__in_len__")),
        }
    }

    fn parse_post_check(&self, name: &str, out: &mut SourceWriter) {
        // Allocated by the callee.
        if self.kind == HeapKind::MallocOutput {
            return;
        }
        out.line(format!("if (({name}__out__ = malloc({name}__in_len__)) == NULL)"));
        out.open_brace();
        out.line("PyErr_NoMemory();");
        out.line(format!("goto {name}__error__;"));
        out.close_brace();
        emit_length_transfer(name, out);
    }

    fn build_format(&self) -> &str {
        match self.kind {
            HeapKind::MallocOutput => OPTIONAL_BYTES_FORMAT,
            _ => BYTES_FORMAT,
        }
    }

    fn build_args(&self, name: &str) -> String {
        format!("{name}__out__, (int){name}__len__")
    }

    fn output_arg(&self, name: &str) -> String {
        let data_type = &self.element.data_type;
        match self.kind {
            HeapKind::InputOutput => format!(
                "{name}__in__, {name}__out__, ({}){name}__len__",
                self.element.size_type
            ),
            HeapKind::VarInputOutput => format!("{name}__in__, {name}__out__, &{name}__len__"),
            HeapKind::CombinedInputOutput => {
                format!("({data_type} *)memcpy({name}__out__, {name}__in__, {name}__len__)")
            }
            HeapKind::VarCombinedInputOutput => format!(
                "({data_type} *)memcpy({name}__out__, {name}__in__, {name}__len__), &{name}__len__"
            ),
            HeapKind::Output => format!("{name}__out__, {name}__len__"),
            HeapKind::VarOutput => format!("{name}__out__, &{name}__len__"),
            HeapKind::VarVarOutput => format!("{name}__out__, {name}__len__, &{name}__len__"),
            HeapKind::MallocOutput => format!("&{name}__out__, &{name}__len__"),
        }
    }

    fn cleanup(&self, name: &str, out: &mut SourceWriter) {
        if self.kind == HeapKind::MallocOutput {
            out.line(format!("if( {name}__out__ ) free({name}__out__);"));
            return;
        }
        out.line(format!("free({name}__out__);"));
        emit_error_label(name, out);
    }
}
