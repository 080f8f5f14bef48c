//! Opaque native types reached only through a construct/convert pair.
//!
//! An opaque type is never touched field by field. The runtime turns it into
//! an object with the *new* function and back into a native value with the
//! *convert* function, both handed to the parser/builder through the `O&`
//! callback format. Several descriptors may share one pair of functions and
//! differ only in how the value is passed.
//!
//! | Passing         | call input | built with         |
//! |-----------------|------------|--------------------|
//! | `ByAddress`     | `&x`       | `O&`, `New, &x`    |
//! | `ByValue`       | `x`        | `O&`, `New, x`     |
//! | `ByReference`   | `x`        | `O`, `New(x)`      |
//! | `ByValueStruct` | `x`        | `O&`, `New, &x`    |
//! | `Array`         | `x`        | `O&`, `New, x`     |

use std::sync::Arc;

use crate::{Capabilities, TypeDescriptor};

/// Suffix appended to a base name to form the construct function.
pub const NEW_SUFFIX: &str = "_New";

/// Suffix appended to a base name to form the convert function.
pub const CONVERT_SUFFIX: &str = "_Convert";

/// Format code for a converter callback plus destination.
pub const CONVERTER_FORMAT: &str = "O&";

/// Format code for a ready-made object.
pub const OBJECT_FORMAT: &str = "O";

/// The construct/convert function pair of an opaque type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectFunctions {
    /// Builds a runtime object from a native value.
    pub new_fn: String,
    /// Fills a native value from a runtime object.
    pub convert_fn: String,
}

impl ObjectFunctions {
    /// Derive `<base>_New` / `<base>_Convert`.
    ///
    /// ```
    /// use gluegen_core::ObjectFunctions;
    ///
    /// let funcs = ObjectFunctions::derive("ResObj");
    /// assert_eq!(funcs.new_fn, "ResObj_New");
    /// assert_eq!(funcs.convert_fn, "ResObj_Convert");
    /// ```
    pub fn derive(base: &str) -> Self {
        Self {
            new_fn: format!("{base}{NEW_SUFFIX}"),
            convert_fn: format!("{base}{CONVERT_SUFFIX}"),
        }
    }

    /// Use explicitly named functions.
    pub fn explicit(new_fn: impl Into<String>, convert_fn: impl Into<String>) -> Self {
        Self {
            new_fn: new_fn.into(),
            convert_fn: convert_fn.into(),
        }
    }
}

/// How an opaque value travels between the runtime and the native call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OpaquePassing {
    /// Passed by address, built from its address.
    #[default]
    ByAddress,
    /// Passed and built by value.
    ByValue,
    /// Passed by value; the object is built by calling the constructor directly.
    ByReference,
    /// Passed by value but built from its address.
    ByValueStruct,
    /// Array semantics: the name itself is the destination everywhere.
    Array,
}

/// A native type represented by an opaque runtime object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueType {
    type_name: String,
    functions: Arc<ObjectFunctions>,
    passing: OpaquePassing,
}

impl OpaqueType {
    /// Opaque type whose functions are derived from its own name, passed by address.
    pub fn new(type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        let functions = Arc::new(ObjectFunctions::derive(&type_name));
        Self {
            type_name,
            functions,
            passing: OpaquePassing::ByAddress,
        }
    }

    /// Opaque type using the functions derived from `base`.
    pub fn aliased(type_name: impl Into<String>, base: &str) -> Self {
        Self::with_functions(type_name, Arc::new(ObjectFunctions::derive(base)))
    }

    /// Opaque type using explicitly named functions.
    pub fn explicit(
        type_name: impl Into<String>,
        new_fn: impl Into<String>,
        convert_fn: impl Into<String>,
    ) -> Self {
        Self::with_functions(
            type_name,
            Arc::new(ObjectFunctions::explicit(new_fn, convert_fn)),
        )
    }

    /// Opaque type sharing an existing function pair.
    pub fn with_functions(type_name: impl Into<String>, functions: Arc<ObjectFunctions>) -> Self {
        Self {
            type_name: type_name.into(),
            functions,
            passing: OpaquePassing::ByAddress,
        }
    }

    /// Change the passing convention.
    pub fn passing(mut self, passing: OpaquePassing) -> Self {
        self.passing = passing;
        self
    }

    /// Shorthand for `.passing(OpaquePassing::ByValue)`.
    pub fn by_value(self) -> Self {
        self.passing(OpaquePassing::ByValue)
    }

    /// Shorthand for `.passing(OpaquePassing::ByReference)`.
    pub fn by_reference(self) -> Self {
        self.passing(OpaquePassing::ByReference)
    }

    /// Shorthand for `.passing(OpaquePassing::ByValueStruct)`.
    pub fn by_value_struct(self) -> Self {
        self.passing(OpaquePassing::ByValueStruct)
    }

    /// Shorthand for `.passing(OpaquePassing::Array)`.
    pub fn array(self) -> Self {
        self.passing(OpaquePassing::Array)
    }

    /// The passing convention.
    pub fn passing_convention(&self) -> OpaquePassing {
        self.passing
    }

    /// The shared construct/convert pair.
    pub fn functions(&self) -> &Arc<ObjectFunctions> {
        &self.functions
    }

    /// Name of the construct function.
    pub fn new_fn(&self) -> &str {
        &self.functions.new_fn
    }

    /// Name of the convert function.
    pub fn convert_fn(&self) -> &str {
        &self.functions.convert_fn
    }
}

impl TypeDescriptor for OpaqueType {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn capabilities(&self) -> Capabilities {
        match self.passing {
            OpaquePassing::Array => Capabilities::BIDIRECTIONAL | Capabilities::ARRAY,
            _ => Capabilities::BIDIRECTIONAL,
        }
    }

    fn parse_format(&self) -> &str {
        CONVERTER_FORMAT
    }

    fn parse_args(&self, name: &str) -> Option<String> {
        let convert = self.convert_fn();
        Some(match self.passing {
            OpaquePassing::Array => format!("{convert}, {name}"),
            _ => format!("{convert}, &{name}"),
        })
    }

    fn build_format(&self) -> &str {
        match self.passing {
            OpaquePassing::ByReference => OBJECT_FORMAT,
            _ => CONVERTER_FORMAT,
        }
    }

    fn build_args(&self, name: &str) -> String {
        let new = self.new_fn();
        match self.passing {
            OpaquePassing::ByAddress | OpaquePassing::ByValueStruct => format!("{new}, &{name}"),
            OpaquePassing::ByValue | OpaquePassing::Array => format!("{new}, {name}"),
            OpaquePassing::ByReference => format!("{new}({name})"),
        }
    }

    fn input_arg(&self, name: &str) -> String {
        match self.passing {
            OpaquePassing::ByAddress => format!("&{name}"),
            _ => name.to_string(),
        }
    }

    fn output_arg(&self, name: &str) -> String {
        match self.passing {
            OpaquePassing::Array => name.to_string(),
            _ => format!("&{name}"),
        }
    }
}
