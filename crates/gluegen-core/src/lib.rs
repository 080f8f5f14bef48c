//! gluegen core crate.
//!
//! Declarative type descriptors describing how native values are marshaled
//! between a dynamic scripting runtime and C functions:
//!
//! - [`TypeDescriptor`]: the contract every descriptor implements
//! - [`Type`], [`Restricted`], [`SyntheticType`], [`ErrorCodeType`]: scalar kinds
//! - [`OpaqueType`]: values reached through a construct/convert function pair
//! - [`buffer`]: (data, length) pairs and triples
//! - [`SourceWriter`]: the line emitter descriptors write into
//!
//! Descriptors are immutable once built and are shared as
//! `Arc<dyn TypeDescriptor>` between every function that uses them.

pub mod buffer;
mod descriptor;
mod error;
mod output;
mod types;

pub use descriptor::{
    Capabilities, DeclModifiers, TypeDescriptor, compose_declaration, emit_unchecked_marker,
};
pub use error::{GenError, GenResult, GlueError, Operation, RegistryError};
pub use output::{DEFAULT_INDENT, SourceWriter};
pub use types::{
    CONVERT_SUFFIX, CONVERTER_FORMAT, DEFAULT_RAISE_FN, DEFAULT_SUCCESS, DescriptorExt,
    ErrorCodeType, InputPassing, NEW_SUFFIX, OBJECT_FORMAT, ObjectFunctions, OpaquePassing,
    OpaqueType, Restricted, SyntheticType, Type,
};
