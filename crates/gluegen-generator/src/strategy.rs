//! Behaviors injected into a [`FunctionGenerator`](crate::FunctionGenerator).
//!
//! - [`ReturnStrategy`] decides what the native return value becomes:
//!   [`OrdinaryReturn`] always returns it, [`ErrorCodeReturn`] turns
//!   error-code types into a checked `_err` variable.
//! - [`CallGuard`] emits code between the declarations and argument parsing;
//!   [`WeakLinkGuard`] checks that a weakly linked symbol is present.

use std::fmt;

use gluegen_core::SourceWriter;
use gluegen_registry::DescriptorRef;

use crate::variable::{Mode, Role, Variable};

/// Name of an ordinary return value.
pub const RETURN_NAME: &str = "_rv";

/// Name of an error-code return value.
pub const ERROR_NAME: &str = "_err";

/// Decides how the native return value is represented.
pub trait ReturnStrategy: fmt::Debug + Send + Sync {
    fn return_variable(&self, descriptor: DescriptorRef) -> Variable;
}

/// Every return value is built into the result as `_rv`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrdinaryReturn;

impl ReturnStrategy for OrdinaryReturn {
    fn return_variable(&self, descriptor: DescriptorRef) -> Variable {
        Variable::new(descriptor, RETURN_NAME, Mode::Out, Role::Return)
    }
}

/// Error-code return values become `_err`: checked after the call and left
/// out of the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorCodeReturn;

impl ReturnStrategy for ErrorCodeReturn {
    fn return_variable(&self, descriptor: DescriptorRef) -> Variable {
        if descriptor.is_error_code() {
            Variable::new(descriptor, ERROR_NAME, Mode::Out, Role::Error)
        } else {
            OrdinaryReturn.return_variable(descriptor)
        }
    }
}

/// Code emitted after the declarations and before argument parsing.
pub trait CallGuard: fmt::Debug + Send + Sync {
    /// Emit the guard for a call to `call_name`.
    fn emit(&self, call_name: &str, out: &mut SourceWriter);

    /// Module-level support code the guard depends on, emitted once per batch.
    fn preamble(&self) -> Option<String> {
        None
    }
}

/// Raise `NotImplementedError` when a weakly linked function is missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeakLinkGuard;

impl WeakLinkGuard {
    /// Definition of the `PyMac_PRECHECK` macro the guard relies on.
    pub fn support_code() -> &'static str {
        concat!(
            "/* Macro to test whether a weak-loaded CFM function exists */\n",
            "#define PyMac_PRECHECK(rtn) do { if ( &rtn == NULL )  {\\\n",
            "        PyErr_SetString(PyExc_NotImplementedError, \\\n",
            "        \"Not available in this shared library/OS version\"); \\\n",
            "        return NULL; \\\n",
            "    }} while(0)\n",
        )
    }
}

impl CallGuard for WeakLinkGuard {
    fn emit(&self, call_name: &str, out: &mut SourceWriter) {
        // Macros are never weakly linked.
        out.line(format!("#ifndef {call_name}"));
        out.line(format!("PyMac_PRECHECK({call_name});"));
        out.line("#endif");
    }

    fn preamble(&self) -> Option<String> {
        Some(Self::support_code().to_string())
    }
}
