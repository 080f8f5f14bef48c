use crate::{Capabilities, DeclModifiers, GenResult, TypeDescriptor};

use super::{
    BUFFER_TYPE_NAME, BYTES_FORMAT, BufferElement, output_array_decl, reject_reference, size_decl,
};

/// Call convention of a stack buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackKind {
    /// `(out, size)`
    Output,
    /// `(out, &len)` with `len` starting at the capacity.
    VarOutput,
    /// `(out, len, &len)`
    VarVarOutput,
    /// `(out, len)`; the native return value is the used length.
    ReturnVarOutput,
}

/// An output buffer on the stack whose capacity is chosen at generation time.
///
/// Nothing is parsed for it, so it is only usable as an output-only parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackBuffer {
    element: BufferElement,
    size: String,
    kind: StackKind,
}

impl StackBuffer {
    /// Create a stack buffer of `size` elements.
    pub fn new(size: impl ToString, element: BufferElement, kind: StackKind) -> Self {
        Self {
            element,
            size: size.to_string(),
            kind,
        }
    }

    /// The buffer kind.
    pub fn kind(&self) -> StackKind {
        self.kind
    }

    /// The capacity expression.
    pub fn size(&self) -> &str {
        &self.size
    }
}

impl TypeDescriptor for StackBuffer {
    fn type_name(&self) -> &str {
        BUFFER_TYPE_NAME
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::OUTPUT | Capabilities::ARRAY | Capabilities::UNPARSED_OUTPUT
    }

    fn arg_declarations(&self, name: &str, modifiers: DeclModifiers) -> GenResult<Vec<String>> {
        reject_reference(self.type_name(), modifiers)?;
        let mut decls = vec![output_array_decl(
            self.type_name(),
            &self.element.data_type,
            name,
            &self.size,
            modifiers,
        )?];
        if self.kind == StackKind::Output {
            decls.push(size_decl(&self.element.size_type, name));
        }
        Ok(decls)
    }

    fn aux_declarations(&self, name: &str) -> Vec<String> {
        match self.kind {
            StackKind::Output => Vec::new(),
            _ => vec![format!("int {name}__len__ = {}", self.size)],
        }
    }

    fn parse_format(&self) -> &str {
        ""
    }

    fn parse_args(&self, _name: &str) -> Option<String> {
        None
    }

    fn build_format(&self) -> &str {
        BYTES_FORMAT
    }

    fn build_args(&self, name: &str) -> String {
        match self.kind {
            StackKind::Output => format!("{name}__out__, (int){}", self.size),
            StackKind::VarOutput | StackKind::VarVarOutput => {
                format!("{name}__out__, (int){name}__len__")
            }
            StackKind::ReturnVarOutput => format!("{name}__out__, (int)_rv"),
        }
    }

    fn output_arg(&self, name: &str) -> String {
        match self.kind {
            StackKind::Output => format!("{name}__out__, {}", self.size),
            StackKind::VarOutput => format!("{name}__out__, &{name}__len__"),
            StackKind::VarVarOutput => format!("{name}__out__, {name}__len__, &{name}__len__"),
            StackKind::ReturnVarOutput => format!("{name}__out__, {name}__len__"),
        }
    }
}
