//! Unified error types for glue-code generation.
//!
//! ## Error Hierarchy
//!
//! ```text
//! GlueError (top-level wrapper)
//! ├── GenError      - Contract violations raised while generating one function
//! └── RegistryError - Registry construction and lookup failures
//! ```
//!
//! A `GenError` is fatal to the function being generated and nothing else;
//! batch generation records it and moves on to the next function.

use std::fmt;

use thiserror::Error;

// ============================================================================
// Generation Errors
// ============================================================================

/// The descriptor operation that was attempted when a contract was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Passing a variable into the native call.
    PassInput,
    /// Passing a variable so the native call can write to it.
    PassOutput,
    /// Passing a variable as a C++ reference.
    PassReference,
    /// Declaring a variable.
    Declare,
}

impl Operation {
    /// Returns the operation name as used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::PassInput => "pass_input",
            Operation::PassOutput => "pass_output",
            Operation::PassReference => "pass_by_reference",
            Operation::Declare => "declare",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while generating the glue code for a single function.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenError {
    /// A descriptor was used in a direction it does not support.
    #[error("type '{type_name}' can only be used for {allowed} parameters ({operation} is not supported)")]
    DirectionViolation {
        /// Declared type name of the offending descriptor.
        type_name: String,
        /// The operation that was attempted.
        operation: Operation,
        /// Human-readable description of the supported direction.
        allowed: &'static str,
    },

    /// An output descriptor was bound in a mode that contradicts whether it
    /// has to be parsed.
    #[error("type '{type_name}' cannot be used as {used} parameter (it must be {required})")]
    ModeViolation {
        /// Declared type name of the offending descriptor.
        type_name: String,
        /// The mode it was bound in.
        used: &'static str,
        /// The mode its convention requires.
        required: &'static str,
    },

    /// A descriptor cannot be passed or declared as a reference.
    #[error("type '{type_name}' cannot be passed by reference ({operation})")]
    ReferenceUnsupported {
        /// Declared type name of the offending descriptor.
        type_name: String,
        /// The operation that was attempted.
        operation: Operation,
    },

    /// An output buffer was declared `const`.
    #[error("type '{type_name}' cannot declare a const output buffer")]
    ConstOutputBuffer {
        /// Declared type name of the offending descriptor.
        type_name: String,
    },

    /// The `self` argument of a method was not an input parameter.
    #[error("method '{function}': the self argument must be an input parameter")]
    SelfNotInput {
        /// The method being generated.
        function: String,
    },

    /// A method was declared without any arguments to take `self` from.
    #[error("method '{function}' has no self argument")]
    MissingSelf {
        /// The method being generated.
        function: String,
    },
}

impl GenError {
    /// Declared type name of the descriptor involved, if any.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            GenError::DirectionViolation { type_name, .. }
            | GenError::ModeViolation { type_name, .. }
            | GenError::ReferenceUnsupported { type_name, .. }
            | GenError::ConstOutputBuffer { type_name } => Some(type_name),
            GenError::SelfNotInput { .. } | GenError::MissingSelf { .. } => None,
        }
    }
}

/// Result alias for descriptor and generator operations.
pub type GenResult<T> = Result<T, GenError>;

// ============================================================================
// Registry Errors
// ============================================================================

/// Errors raised while building or querying a type registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A referenced descriptor was not found.
    #[error("type not found: {0}")]
    TypeNotFound(String),

    /// A descriptor with this name already exists.
    #[error("duplicate type: {0}")]
    DuplicateType(String),

    /// An alias points at a name that is not registered.
    #[error("alias '{alias}' refers to unknown type '{target}'")]
    DanglingAlias {
        /// The alias being registered.
        alias: String,
        /// The missing target.
        target: String,
    },
}

// ============================================================================
// Top-level Error
// ============================================================================

/// Top-level error for callers that drive both registry and generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GlueError {
    /// A contract violation during generation.
    #[error(transparent)]
    Generation(#[from] GenError),

    /// A registry failure.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
