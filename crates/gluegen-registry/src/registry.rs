//! Immutable descriptor registry.
//!
//! [`TypeRegistry`] maps the names used in binding signatures (`"int"`,
//! `"Handle"`, `"VarOutBuffer"`) to shared descriptors. It is assembled once
//! by a [`TypeRegistryBuilder`] and then only read, so a single registry can
//! be handed by reference to every generator in a batch.
//!
//! # Example
//!
//! ```
//! use gluegen_core::{Type, TypeDescriptor};
//! use gluegen_registry::TypeRegistry;
//!
//! let mut builder = TypeRegistry::builder();
//! builder.register("int", Type::new("int", "i")).unwrap();
//! builder.alias("SInt32", "int").unwrap();
//! let registry = builder.build();
//!
//! assert_eq!(registry.get("SInt32").unwrap().type_name(), "int");
//! ```

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

use gluegen_core::{RegistryError, TypeDescriptor};

/// Shared handle to a registered descriptor.
pub type DescriptorRef = Arc<dyn TypeDescriptor>;

/// Read-only registry of named descriptors.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    /// Descriptors by registered name (aliases included).
    types: FxHashMap<String, DescriptorRef>,
    /// Alias name -> name it was registered against.
    aliases: FxHashMap<String, String>,
}

impl TypeRegistry {
    /// Start building a registry.
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::new()
    }

    /// Look a descriptor up by name.
    pub fn get(&self, name: &str) -> Result<&DescriptorRef, RegistryError> {
        self.types
            .get(name)
            .ok_or_else(|| RegistryError::TypeNotFound(name.to_string()))
    }

    /// Look a descriptor up by name, returning `None` when missing.
    pub fn find(&self, name: &str) -> Option<&DescriptorRef> {
        self.types.get(name)
    }

    /// Check whether a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// The name an alias was created from, if `name` is an alias.
    pub fn alias_target(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    /// Number of registered names, aliases included.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Collects descriptors before sealing them into a [`TypeRegistry`].
#[derive(Debug, Default)]
pub struct TypeRegistryBuilder {
    types: FxHashMap<String, DescriptorRef>,
    aliases: FxHashMap<String, String>,
}

impl TypeRegistryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor under `name`.
    pub fn register<D>(&mut self, name: impl Into<String>, descriptor: D) -> Result<&mut Self, RegistryError>
    where
        D: TypeDescriptor + 'static,
    {
        self.register_shared(name, Arc::new(descriptor))
    }

    /// Register an already shared descriptor under `name`.
    pub fn register_shared(
        &mut self,
        name: impl Into<String>,
        descriptor: DescriptorRef,
    ) -> Result<&mut Self, RegistryError> {
        let name = name.into();
        if self.types.contains_key(&name) {
            return Err(RegistryError::DuplicateType(name));
        }
        self.types.insert(name, descriptor);
        Ok(self)
    }

    /// Make `alias` refer to the descriptor registered as `target`.
    pub fn alias(
        &mut self,
        alias: impl Into<String>,
        target: &str,
    ) -> Result<&mut Self, RegistryError> {
        let alias = alias.into();
        let Some(descriptor) = self.types.get(target).cloned() else {
            return Err(RegistryError::DanglingAlias {
                alias,
                target: target.to_string(),
            });
        };
        if self.types.contains_key(&alias) {
            return Err(RegistryError::DuplicateType(alias));
        }
        self.aliases.insert(alias.clone(), target.to_string());
        self.types.insert(alias, descriptor);
        Ok(self)
    }

    /// Check whether a name is already registered.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Seal the builder.
    pub fn build(self) -> TypeRegistry {
        debug!(
            types = self.types.len(),
            aliases = self.aliases.len(),
            "type registry built"
        );
        TypeRegistry {
            types: self.types,
            aliases: self.aliases,
        }
    }
}
