//! gluegen generator crate.
//!
//! Walks a function's variables through the descriptor operations and emits
//! one C wrapper per function:
//!
//! - [`FunctionGenerator`]: the orchestrator, configured by [`GeneratorConfig`]
//! - [`ReturnStrategy`] / [`CallGuard`]: behaviors injected into it
//!   ([`ErrorCodeReturn`], [`WeakLinkGuard`])
//! - [`FunctionSignature`]: a signature by type name, bound against a
//!   [`TypeRegistry`](gluegen_registry::TypeRegistry)
//! - [`BatchOutput`]: many functions, failures isolated per function

mod batch;
mod config;
mod function;
mod signature;
mod strategy;
mod variable;

pub use batch::{BatchOutput, GenerationFailure};
pub use config::GeneratorConfig;
pub use function::{FunctionGenerator, FunctionKind, FunctionSpec, GeneratedFunction, SELF_EXPR};
pub use signature::{FunctionSignature, ParamSignature};
pub use strategy::{
    CallGuard, ERROR_NAME, ErrorCodeReturn, OrdinaryReturn, RETURN_NAME, ReturnStrategy,
    WeakLinkGuard,
};
pub use variable::{Mode, ParamFlags, Parameter, Role, Variable};
