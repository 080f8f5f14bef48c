//! Signatures that refer to types by registry name.

use gluegen_core::RegistryError;
use gluegen_registry::TypeRegistry;

use crate::function::{FunctionKind, FunctionSpec};
use crate::variable::{Mode, ParamFlags, Parameter};

/// A parameter named by type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSignature {
    pub type_name: String,
    pub name: Option<String>,
    pub mode: Mode,
    pub flags: ParamFlags,
}

impl ParamSignature {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>, mode: Mode) -> Self {
        Self {
            type_name: type_name.into(),
            name: Some(name.into()),
            mode,
            flags: ParamFlags::empty(),
        }
    }

    pub fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// A function whose types are still names, resolved by [`bind`](Self::bind).
///
/// ```
/// use gluegen_generator::{FunctionSignature, Mode};
/// use gluegen_registry::TypeRegistry;
///
/// let registry = TypeRegistry::standard().unwrap();
/// let spec = FunctionSignature::function("labs")
///     .returns("long")
///     .param("long", "n", Mode::In)
///     .bind(&registry)
///     .unwrap();
/// assert_eq!(spec.params.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionSignature {
    pub name: String,
    pub kind: FunctionKind,
    pub returns: Option<String>,
    pub return_flags: ParamFlags,
    pub params: Vec<ParamSignature>,
    pub condition: Option<String>,
    pub call_name: Option<String>,
}

impl FunctionSignature {
    pub fn function(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn method(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FunctionKind::Method,
            ..Self::default()
        }
    }

    pub fn returns(mut self, type_name: impl Into<String>) -> Self {
        self.returns = Some(type_name.into());
        self
    }

    pub fn param(mut self, type_name: impl Into<String>, name: impl Into<String>, mode: Mode) -> Self {
        self.params.push(ParamSignature::new(type_name, name, mode));
        self
    }

    pub fn param_with(mut self, param: ParamSignature) -> Self {
        self.params.push(param);
        self
    }

    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn call_name(mut self, call_name: impl Into<String>) -> Self {
        self.call_name = Some(call_name.into());
        self
    }

    /// Resolve every type name against `registry`.
    ///
    /// Fails with [`RegistryError::TypeNotFound`] naming the first unknown type.
    pub fn bind(&self, registry: &TypeRegistry) -> Result<FunctionSpec, RegistryError> {
        let returns = match &self.returns {
            Some(type_name) => Some(registry.get(type_name)?.clone()),
            None => None,
        };

        let mut params = Vec::with_capacity(self.params.len());
        for param in &self.params {
            let descriptor = registry.get(&param.type_name)?.clone();
            let mut bound = Parameter::new(descriptor, param.name.clone(), param.mode);
            bound.flags = param.flags;
            params.push(bound);
        }

        Ok(FunctionSpec {
            name: self.name.clone(),
            kind: self.kind,
            returns,
            return_flags: self.return_flags,
            params,
            condition: self.condition.clone(),
            call_name: self.call_name.clone(),
        })
    }
}
