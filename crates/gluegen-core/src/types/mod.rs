//! Scalar, restricted, synthetic, error-code and opaque descriptors.

mod error_code;
mod opaque;
mod restricted;
mod simple;
mod synthetic;

pub use error_code::{DEFAULT_RAISE_FN, DEFAULT_SUCCESS, ErrorCodeType};
pub use opaque::{
    CONVERT_SUFFIX, CONVERTER_FORMAT, NEW_SUFFIX, OBJECT_FORMAT, ObjectFunctions, OpaquePassing,
    OpaqueType,
};
pub use restricted::{DescriptorExt, Restricted};
pub use simple::{InputPassing, Type};
pub use synthetic::SyntheticType;
