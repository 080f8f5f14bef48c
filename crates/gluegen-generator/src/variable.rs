//! Parameters and the variables the generator derives from them.

use bitflags::bitflags;
use gluegen_registry::DescriptorRef;

/// Direction of a parameter as seen from the scripting side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Parsed from the argument tuple and passed to the call.
    In,
    /// Filled in by the call and returned.
    Out,
    /// Parsed, passed to the call, and returned.
    InOut,
}

impl Mode {
    /// Whether the value is extracted from the argument tuple.
    pub fn is_parsed(self) -> bool {
        matches!(self, Mode::In | Mode::InOut)
    }

    /// Whether the value ends up in the built result.
    pub fn is_returned(self) -> bool {
        matches!(self, Mode::Out | Mode::InOut)
    }
}

/// What a variable stands for in the generated function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// An ordinary parameter of the native call.
    Argument,
    /// The object a method is invoked on.
    SelfArg,
    /// The native return value.
    Return,
    /// A native return value that only signals errors.
    Error,
}

bitflags! {
    /// Declaration flags of a parameter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ParamFlags: u8 {
        /// Passed as a C++ reference.
        const REFERENCE = 0x01;
        /// Declared `const`.
        const CONST = 0x02;
    }
}

/// One parameter of a native function, bound to its descriptor.
#[derive(Debug, Clone)]
pub struct Parameter {
    pub descriptor: DescriptorRef,
    /// `None` for unnamed parameters, which become `_arg<N>`.
    pub name: Option<String>,
    pub mode: Mode,
    pub flags: ParamFlags,
}

impl Parameter {
    pub fn new(descriptor: DescriptorRef, name: Option<String>, mode: Mode) -> Self {
        Self {
            descriptor,
            name,
            mode,
            flags: ParamFlags::empty(),
        }
    }

    /// A named input parameter.
    pub fn input(descriptor: DescriptorRef, name: impl Into<String>) -> Self {
        Self::new(descriptor, Some(name.into()), Mode::In)
    }

    /// A named output parameter.
    pub fn output(descriptor: DescriptorRef, name: impl Into<String>) -> Self {
        Self::new(descriptor, Some(name.into()), Mode::Out)
    }

    /// A named in-out parameter.
    pub fn in_out(descriptor: DescriptorRef, name: impl Into<String>) -> Self {
        Self::new(descriptor, Some(name.into()), Mode::InOut)
    }

    /// Mark the parameter as passed by C++ reference.
    pub fn by_reference(mut self) -> Self {
        self.flags |= ParamFlags::REFERENCE;
        self
    }

    /// Mark the parameter `const`.
    pub fn constant(mut self) -> Self {
        self.flags |= ParamFlags::CONST;
        self
    }
}

/// A variable of the generated function.
#[derive(Debug, Clone)]
pub struct Variable {
    pub descriptor: DescriptorRef,
    pub name: String,
    pub mode: Mode,
    pub role: Role,
    pub flags: ParamFlags,
}

impl Variable {
    pub fn new(descriptor: DescriptorRef, name: impl Into<String>, mode: Mode, role: Role) -> Self {
        Self {
            descriptor,
            name: name.into(),
            mode,
            role,
            flags: ParamFlags::empty(),
        }
    }

    pub fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Whether this is the native return value (ordinary or error code).
    pub fn is_return(&self) -> bool {
        matches!(self.role, Role::Return | Role::Error)
    }

    pub fn is_reference(&self) -> bool {
        self.flags.contains(ParamFlags::REFERENCE)
    }

    /// Parsed from the argument tuple. The self object never is.
    pub fn is_parsed(&self) -> bool {
        self.role == Role::Argument && self.mode.is_parsed()
    }

    /// Part of the built result. Error codes and the self object never are.
    pub fn is_built(&self) -> bool {
        !matches!(self.role, Role::Error | Role::SelfArg) && self.mode.is_returned()
    }

    /// Shown in the docstring.
    pub fn is_documented(&self) -> bool {
        !matches!(self.role, Role::Error | Role::SelfArg) && self.descriptor.is_visible()
    }
}
