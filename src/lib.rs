//! Declarative marshaling descriptors and C glue-code generation.
//!
//! A binding is described as a list of functions whose parameters are typed
//! by descriptors. The generator turns each function into a C wrapper that
//! parses the runtime's argument tuple, calls the native function and builds
//! the result value.
//!
//! ```
//! use gluegen::prelude::*;
//!
//! let registry = TypeRegistry::toolbox().unwrap();
//! let generator = FunctionGenerator::new(GeneratorConfig::with_prefix("Res"))
//!     .with_return_strategy(ErrorCodeReturn);
//!
//! let output = generator.generate_signatures(
//!     &registry,
//!     &[FunctionSignature::function("HomeResFile")
//!         .returns("short")
//!         .param("Handle", "theResource", Mode::In)],
//! );
//! assert!(output.is_complete());
//! assert!(output.source().contains("ResObj_Convert, &theResource"));
//! ```

pub use gluegen_core as descriptor;
pub use gluegen_generator as generator;
pub use gluegen_registry as registry;

pub mod prelude {
    pub use gluegen_core::buffer::{
        BufferElement, FixedBuffer, FixedKind, HeapBuffer, HeapKind, StackBuffer, StackKind,
        StructBuffer, StructKind, VarInputBuffer,
    };
    pub use gluegen_core::{
        Capabilities, DescriptorExt, ErrorCodeType, GenError, GenResult, GlueError, ObjectFunctions,
        OpaquePassing, OpaqueType, RegistryError, Restricted, SourceWriter, SyntheticType, Type,
        TypeDescriptor,
    };
    pub use gluegen_generator::{
        BatchOutput, CallGuard, ErrorCodeReturn, FunctionGenerator, FunctionSignature,
        FunctionSpec, GeneratedFunction, GenerationFailure, GeneratorConfig, Mode, OrdinaryReturn,
        ParamFlags, Parameter, ReturnStrategy, WeakLinkGuard,
    };
    pub use gluegen_registry::{DescriptorRef, TypeRegistry, TypeRegistryBuilder};
}
