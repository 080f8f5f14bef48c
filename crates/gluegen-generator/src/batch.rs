//! Generating many functions with per-function failure isolation.

use gluegen_core::GlueError;
use gluegen_registry::TypeRegistry;
use thiserror::Error;
use tracing::{debug, warn};

use crate::function::{FunctionGenerator, FunctionSpec, GeneratedFunction};
use crate::signature::FunctionSignature;

/// A function that could not be generated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to generate '{function}': {error}")]
pub struct GenerationFailure {
    pub function: String,
    #[source]
    pub error: GlueError,
}

/// Result of generating a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutput {
    /// Support code the generator's call guard needs, if any.
    pub preamble: Option<String>,
    /// Functions that were generated, in input order.
    pub functions: Vec<GeneratedFunction>,
    /// Functions that failed, in input order.
    pub failures: Vec<GenerationFailure>,
}

impl BatchOutput {
    /// Whether every function was generated.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// The preamble followed by the source of every generated function.
    pub fn source(&self) -> String {
        let mut source = match &self.preamble {
            Some(preamble) => format!("{preamble}\n"),
            None => String::new(),
        };
        for function in &self.functions {
            source.push_str(&function.source);
        }
        source
    }

    /// A method table registering every generated function.
    pub fn method_table(&self, table_name: &str) -> String {
        let mut table = format!("static PyMethodDef {table_name}[] = {{\n");
        for function in &self.functions {
            table.push_str(&function.method_entry());
            table.push('\n');
        }
        table.push_str("\t{NULL, NULL, 0}\n};\n");
        table
    }

    fn record(&mut self, function: &str, result: Result<GeneratedFunction, GlueError>) {
        match result {
            Ok(generated) => self.functions.push(generated),
            Err(error) => {
                warn!(function, %error, "skipping function");
                self.failures.push(GenerationFailure {
                    function: function.to_string(),
                    error,
                });
            }
        }
    }
}

impl FunctionGenerator {
    fn empty_batch(&self) -> BatchOutput {
        BatchOutput {
            preamble: self.guard.as_ref().and_then(|guard| guard.preamble()),
            ..BatchOutput::default()
        }
    }

    /// Generate every spec. A failing function is recorded and skipped.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn generate_batch(&self, specs: &[FunctionSpec]) -> BatchOutput {
        let mut output = self.empty_batch();
        for spec in specs {
            output.record(&spec.name, self.generate(spec).map_err(GlueError::from));
        }
        debug!(
            generated = output.functions.len(),
            failed = output.failures.len(),
            "batch generated"
        );
        output
    }

    /// Bind every signature against `registry` and generate it.
    ///
    /// Unknown types fail only the signature that names them.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn generate_signatures(
        &self,
        registry: &TypeRegistry,
        signatures: &[FunctionSignature],
    ) -> BatchOutput {
        let mut output = self.empty_batch();
        for signature in signatures {
            let result = signature
                .bind(registry)
                .map_err(GlueError::from)
                .and_then(|spec| self.generate(&spec).map_err(GlueError::from));
            output.record(&signature.name, result);
        }
        debug!(
            generated = output.functions.len(),
            failed = output.failures.len(),
            "batch generated"
        );
        output
    }
}
