//! Buffer descriptors.
//!
//! A buffer couples a data pointer with its length. Both travel as one unit:
//! they are declared together, parsed through a single `s#`-style format,
//! passed side by side to the native call and built back together. The
//! generated variables for a buffer named `buf` are:
//!
//! - `buf__in__`: pointer to the caller-supplied data
//! - `buf__out__`: storage the native call writes into
//! - `buf__len__`: length passed to (or returned from) the native call
//! - `buf__in_len__`: length reported by the argument parser
//!
//! Failures while checking lengths or allocating jump to a `buf__error__`
//! label placed by the buffer's clean-up code.
//!
//! The families are:
//!
//! - [`FixedBuffer`]: compile-time size, checked against the input length
//! - [`VarInputBuffer`]: caller-sized input, passed as `(buf, len)`
//! - [`StructBuffer`]: a C struct moved through a byte string
//! - [`HeapBuffer`]: output storage allocated from the parsed size
//! - [`StackBuffer`]: output storage on the stack with a generation-time size

mod fixed;
mod heap;
mod stack;
mod structure;
mod var;

pub use fixed::{FixedBuffer, FixedKind};
pub use heap::{HeapBuffer, HeapKind};
pub use stack::{StackBuffer, StackKind};
pub use structure::{StructBuffer, StructKind};
pub use var::VarInputBuffer;

use crate::{DeclModifiers, GenError, GenResult, Operation, SourceWriter};

/// Type name reported by buffers that are not tied to a struct.
pub const BUFFER_TYPE_NAME: &str = "Buffer";

/// Format for a required byte buffer with length.
pub const BYTES_FORMAT: &str = "s#";

/// Format for a byte buffer that may be `None` (yielding NULL and 0).
pub const OPTIONAL_BYTES_FORMAT: &str = "z#";

/// Format for a unicode buffer with length.
pub const UNICODE_FORMAT: &str = "u#";

/// Default parse format for a C length type.
///
/// ```
/// use gluegen_core::buffer::size_format_for;
///
/// assert_eq!(size_format_for("long"), Some("l"));
/// assert_eq!(size_format_for("UniCharCount"), None);
/// ```
pub fn size_format_for(size_type: &str) -> Option<&'static str> {
    match size_type {
        "long" | "unsigned long" => Some("l"),
        "int" | "unsigned int" => Some("i"),
        "short" | "unsigned short" => Some("h"),
        "char" | "unsigned char" => Some("b"),
        _ => None,
    }
}

/// Element and length types shared by every buffer family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferElement {
    /// C type of one element (`char`, `UniChar`, ...).
    pub data_type: String,
    /// C type of the length argument.
    pub size_type: String,
    /// Format used when the length itself is parsed.
    pub size_format: String,
}

impl BufferElement {
    /// Describe elements of `data_type` counted by `size_type`.
    pub fn new(
        data_type: impl Into<String>,
        size_type: impl Into<String>,
        size_format: impl Into<String>,
    ) -> Self {
        Self {
            data_type: data_type.into(),
            size_type: size_type.into(),
            size_format: size_format.into(),
        }
    }

    /// Like [`new`](Self::new), looking the size format up with [`size_format_for`].
    pub fn infer(data_type: impl Into<String>, size_type: impl Into<String>) -> Option<Self> {
        let size_type = size_type.into();
        let size_format = size_format_for(&size_type)?;
        Some(Self::new(data_type, size_type, size_format))
    }

    /// `char` elements counted by an `int`.
    pub fn chars() -> Self {
        Self::new("char", "int", "i")
    }
}

/// Order of the data pointer and its length at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArgOrder {
    /// `(buf, len)`
    #[default]
    DataFirst,
    /// `(len, buf)`
    LengthFirst,
}

// ============================================================================
// Shared fragments
// ============================================================================

pub(crate) fn reject_reference(type_name: &str, modifiers: DeclModifiers) -> GenResult<()> {
    if modifiers.contains(DeclModifiers::REFERENCE) {
        return Err(GenError::ReferenceUnsupported {
            type_name: type_name.to_string(),
            operation: Operation::Declare,
        });
    }
    Ok(())
}

fn const_prefix(modifiers: DeclModifiers) -> &'static str {
    if modifiers.contains(DeclModifiers::CONST) {
        "const "
    } else {
        ""
    }
}

fn out_pointer(modifiers: DeclModifiers) -> &'static str {
    if modifiers.contains(DeclModifiers::OUTPUT) {
        "*"
    } else {
        ""
    }
}

/// `[const ]T *name__in__`
pub(crate) fn input_pointer_decl(element_type: &str, name: &str, modifiers: DeclModifiers) -> String {
    format!("{}{element_type} *{name}__in__", const_prefix(modifiers))
}

fn reject_const_output(type_name: &str, modifiers: DeclModifiers) -> GenResult<()> {
    if modifiers.contains(DeclModifiers::CONST) {
        return Err(GenError::ConstOutputBuffer {
            type_name: type_name.to_string(),
        });
    }
    Ok(())
}

/// `T[*] name__out__[size]`
pub(crate) fn output_array_decl(
    type_name: &str,
    element_type: &str,
    name: &str,
    size: &str,
    modifiers: DeclModifiers,
) -> GenResult<String> {
    reject_const_output(type_name, modifiers)?;
    Ok(format!("{element_type}{} {name}__out__[{size}]", out_pointer(modifiers)))
}

/// `T[*] *name__out__`
pub(crate) fn output_pointer_decl(
    type_name: &str,
    element_type: &str,
    name: &str,
    modifiers: DeclModifiers,
) -> GenResult<String> {
    reject_const_output(type_name, modifiers)?;
    Ok(format!("{element_type}{} *{name}__out__", out_pointer(modifiers)))
}

/// `T[*] name__out__`
pub(crate) fn output_value_decl(
    type_name: &str,
    element_type: &str,
    name: &str,
    modifiers: DeclModifiers,
) -> GenResult<String> {
    reject_const_output(type_name, modifiers)?;
    Ok(format!("{element_type}{} {name}__out__", out_pointer(modifiers)))
}

pub(crate) fn size_decl(size_type: &str, name: &str) -> String {
    format!("{size_type} {name}__len__")
}

pub(crate) fn in_len_decl(name: &str) -> String {
    format!("int {name}__in_len__")
}

pub(crate) fn bytes_parse_args(name: &str) -> String {
    format!("&{name}__in__, &{name}__in_len__")
}

pub(crate) fn emit_length_check(name: &str, size: &str, out: &mut SourceWriter) {
    out.line(format!("if ({name}__in_len__ != {size})"));
    emit_length_error(name, size, out);
}

/// Length check that lets a NULL buffer through.
pub(crate) fn emit_nullable_length_check(name: &str, size: &str, out: &mut SourceWriter) {
    out.line(format!("if ({name}__in__ != NULL && {name}__in_len__ != {size})"));
    emit_length_error(name, size, out);
}

fn emit_length_error(name: &str, size: &str, out: &mut SourceWriter) {
    out.open_brace();
    out.line(format!(
        "PyErr_SetString(PyExc_TypeError, \"buffer length should be {size}\");"
    ));
    out.line(format!("goto {name}__error__;"));
    out.close_brace();
}

pub(crate) fn emit_length_transfer(name: &str, out: &mut SourceWriter) {
    out.line(format!("{name}__len__ = {name}__in_len__;"));
}

pub(crate) fn emit_error_label(name: &str, out: &mut SourceWriter) {
    out.label(format!(" {name}__error__: ;"));
}
