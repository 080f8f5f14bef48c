//! Named descriptor registries.
//!
//! Binding signatures refer to types by name. This crate resolves those names:
//!
//! - [`TypeRegistry`] / [`TypeRegistryBuilder`]: the immutable name table
//! - [`register_standard`]: C scalars, string pointers and object pointers
//! - [`register_toolbox`]: handles, Pascal strings, error codes and buffers
//!   used by the Macintosh toolbox bindings

mod registry;
mod standard;
mod toolbox;

pub use registry::{DescriptorRef, TypeRegistry, TypeRegistryBuilder};
pub use standard::register_standard;
pub use toolbox::register_toolbox;
