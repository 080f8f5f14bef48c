use crate::{Capabilities, DeclModifiers, GenResult, SourceWriter, TypeDescriptor};

use super::{
    ArgOrder, BUFFER_TYPE_NAME, BYTES_FORMAT, BufferElement, OPTIONAL_BYTES_FORMAT, UNICODE_FORMAT,
    bytes_parse_args, emit_length_transfer, in_len_decl, input_pointer_decl, reject_reference,
    size_decl,
};

/// A caller-sized input buffer, passed to the native call as `(buf, len)`.
///
/// The reversed variant passes `(len, buf)` instead; only the call-site order
/// changes, the parse and declaration steps are identical.
///
/// ```
/// use gluegen_core::buffer::{BufferElement, VarInputBuffer};
/// use gluegen_core::TypeDescriptor;
///
/// let buf = VarInputBuffer::new(BufferElement::new("char", "long", "l"));
/// assert_eq!(buf.parse_format(), "s#");
/// assert_eq!(buf.pass_input("data").unwrap(), "data__in__, data__len__");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarInputBuffer {
    element: BufferElement,
    format: &'static str,
    order: ArgOrder,
}

impl VarInputBuffer {
    /// Required byte buffer.
    pub fn new(element: BufferElement) -> Self {
        Self {
            element,
            format: BYTES_FORMAT,
            order: ArgOrder::DataFirst,
        }
    }

    /// Accept `None` from the caller, passing NULL and zero.
    pub fn optional(mut self) -> Self {
        self.format = OPTIONAL_BYTES_FORMAT;
        self
    }

    /// Parse a unicode string instead of bytes.
    pub fn unicode(mut self) -> Self {
        self.format = UNICODE_FORMAT;
        self
    }

    /// Pass the length before the data.
    pub fn reversed(mut self) -> Self {
        self.order = ArgOrder::LengthFirst;
        self
    }

    /// Call-site order of the pair.
    pub fn order(&self) -> ArgOrder {
        self.order
    }
}

impl TypeDescriptor for VarInputBuffer {
    fn type_name(&self) -> &str {
        BUFFER_TYPE_NAME
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::INPUT | Capabilities::ARRAY
    }

    fn arg_declarations(&self, name: &str, modifiers: DeclModifiers) -> GenResult<Vec<String>> {
        reject_reference(self.type_name(), modifiers)?;
        Ok(vec![
            input_pointer_decl(&self.element.data_type, name, modifiers),
            size_decl(&self.element.size_type, name),
        ])
    }

    fn aux_declarations(&self, name: &str) -> Vec<String> {
        vec![in_len_decl(name)]
    }

    fn parse_format(&self) -> &str {
        self.format
    }

    fn parse_args(&self, name: &str) -> Option<String> {
        Some(bytes_parse_args(name))
    }

    fn parse_post_check(&self, name: &str, out: &mut SourceWriter) {
        emit_length_transfer(name, out);
    }

    fn input_arg(&self, name: &str) -> String {
        match self.order {
            ArgOrder::DataFirst => format!("{name}__in__, {name}__len__"),
            ArgOrder::LengthFirst => format!("{name}__len__, {name}__in__"),
        }
    }
}
