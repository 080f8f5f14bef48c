//! Direction-restricted descriptors.
//!
//! Some native types only make sense flowing one way: a `const char *` can be
//! handed to a native call but never written back. [`Restricted`] wraps any
//! descriptor and removes a direction from its capabilities, so misuse turns
//! into a [`GenError::DirectionViolation`](crate::GenError::DirectionViolation)
//! at generation time instead of broken glue code.

use crate::{Capabilities, DeclModifiers, GenResult, SourceWriter, TypeDescriptor};

/// A descriptor usable in fewer directions than the one it wraps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restricted<D> {
    inner: D,
    allowed: Capabilities,
}

impl<D: TypeDescriptor> Restricted<D> {
    /// Only usable for input parameters.
    pub fn input_only(inner: D) -> Self {
        Self {
            inner,
            allowed: !Capabilities::OUTPUT,
        }
    }

    /// Only usable for output parameters.
    pub fn output_only(inner: D) -> Self {
        Self {
            inner,
            allowed: !Capabilities::INPUT,
        }
    }

    /// The wrapped descriptor.
    pub fn inner(&self) -> &D {
        &self.inner
    }
}

/// Combinators for restricting any sized descriptor.
pub trait DescriptorExt: TypeDescriptor + Sized {
    /// See [`Restricted::input_only`].
    fn input_only(self) -> Restricted<Self> {
        Restricted::input_only(self)
    }

    /// See [`Restricted::output_only`].
    fn output_only(self) -> Restricted<Self> {
        Restricted::output_only(self)
    }
}

impl<D: TypeDescriptor> DescriptorExt for D {}

impl<D: TypeDescriptor> TypeDescriptor for Restricted<D> {
    fn type_name(&self) -> &str {
        self.inner.type_name()
    }

    fn capabilities(&self) -> Capabilities {
        self.inner.capabilities() & self.allowed
    }

    fn is_visible(&self) -> bool {
        self.inner.is_visible()
    }

    fn is_error_code(&self) -> bool {
        self.inner.is_error_code()
    }

    fn arg_declarations(&self, name: &str, modifiers: DeclModifiers) -> GenResult<Vec<String>> {
        self.inner.arg_declarations(name, modifiers)
    }

    fn aux_declarations(&self, name: &str) -> Vec<String> {
        self.inner.aux_declarations(name)
    }

    fn parse_format(&self) -> &str {
        self.inner.parse_format()
    }

    fn parse_args(&self, name: &str) -> Option<String> {
        self.inner.parse_args(name)
    }

    fn parse_pre_check(&self, name: &str, out: &mut SourceWriter) {
        self.inner.parse_pre_check(name, out)
    }

    fn parse_post_check(&self, name: &str, out: &mut SourceWriter) {
        self.inner.parse_post_check(name, out)
    }

    fn build_format(&self) -> &str {
        self.inner.build_format()
    }

    fn build_args(&self, name: &str) -> String {
        self.inner.build_args(name)
    }

    fn build_pre_check(&self, name: &str, out: &mut SourceWriter) {
        self.inner.build_pre_check(name, out)
    }

    fn input_arg(&self, name: &str) -> String {
        self.inner.input_arg(name)
    }

    fn output_arg(&self, name: &str) -> String {
        self.inner.output_arg(name)
    }

    fn reference_arg(&self, name: &str) -> String {
        self.inner.reference_arg(name)
    }

    fn check_error(&self, name: &str, out: &mut SourceWriter) {
        self.inner.check_error(name, out)
    }

    fn cleanup(&self, name: &str, out: &mut SourceWriter) {
        self.inner.cleanup(name, out)
    }
}
