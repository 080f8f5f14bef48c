//! Descriptors for the classic Macintosh toolbox APIs.
//!
//! Layered on top of [`register_standard`](crate::register_standard): the
//! toolbox registry contains every standard type as well.

use std::sync::Arc;

use gluegen_core::buffer::{BufferElement, HeapBuffer, HeapKind, VarInputBuffer};
use gluegen_core::{
    DescriptorExt, ErrorCodeType, ObjectFunctions, OpaqueType, RegistryError, SyntheticType, Type,
};

use crate::{TypeRegistry, TypeRegistryBuilder, register_standard};

/// Scalar toolbox types: `(name, format)`.
const SCALARS: &[(&str, &str)] = &[
    ("Boolean", "b"),
    ("SignedByte", "b"),
    ("Size", "l"),
    ("Style", "b"),
    ("StyleParameter", "h"),
    ("CharParameter", "h"),
    ("TextEncoding", "l"),
    ("ByteCount", "l"),
    ("Duration", "l"),
    ("ByteOffset", "l"),
    ("OptionBits", "l"),
    ("ItemCount", "l"),
    ("PBVersion", "l"),
    ("ScriptCode", "h"),
    ("LangCode", "h"),
    ("RegionCode", "h"),
    ("UInt8", "b"),
    ("SInt8", "b"),
    ("UInt16", "H"),
    ("SInt16", "h"),
    ("UInt32", "l"),
    ("SInt32", "l"),
    ("Float32", "f"),
];

/// Handles and object references wrapped by a runtime object type:
/// `(name, object base, aliases)`.
const OBJECT_HANDLES: &[(&str, &str, &[&str])] = &[
    ("Handle", "ResObj", &[]),
    ("MenuHandle", "MenuObj", &["MenuRef"]),
    ("ControlHandle", "CtlObj", &["ControlRef"]),
    ("WindowPtr", "WinObj", &["WindowRef"]),
    ("DialogPtr", "DlgObj", &["DialogRef"]),
];

/// CoreFoundation references; each wraps `<name>Obj`.
const CF_REFS: &[&str] = &[
    "CFTypeRef",
    "CFStringRef",
    "CFMutableStringRef",
    "CFArrayRef",
    "CFMutableArrayRef",
    "CFDictionaryRef",
    "CFMutableDictionaryRef",
    "CFURLRef",
];

/// Register the toolbox descriptor set. The standard types are not included.
pub fn register_toolbox(builder: &mut TypeRegistryBuilder) -> Result<(), RegistryError> {
    for &(name, format) in SCALARS {
        builder.register(name, Type::new(name, format))?;
    }

    register_values(builder)?;
    register_objects(builder)?;
    register_errors(builder)?;
    register_buffers(builder)?;
    Ok(())
}

fn register_values(builder: &mut TypeRegistryBuilder) -> Result<(), RegistryError> {
    let wide = Arc::new(ObjectFunctions::explicit("PyMac_Buildwide", "PyMac_Getwide"));
    builder
        .register("wide", OpaqueType::with_functions("wide", wide.clone()).by_value())?
        .register("wide_ptr", OpaqueType::with_functions("wide", wide))?;

    // Pascal strings.
    let str255 = Arc::new(ObjectFunctions::explicit("PyMac_BuildStr255", "PyMac_GetStr255"));
    builder
        .register("Str255", OpaqueType::with_functions("Str255", str255.clone()).array())?
        .register(
            "ConstStr255Param",
            OpaqueType::with_functions("Str255", str255.clone()).array(),
        )?
        .register("StringPtr", OpaqueType::with_functions("StringPtr", str255).by_value())?
        .alias("ConstStringPtr", "StringPtr")?;

    let fsspec = Arc::new(ObjectFunctions::explicit("PyMac_BuildFSSpec", "PyMac_GetFSSpec"));
    let fsref = Arc::new(ObjectFunctions::explicit("PyMac_BuildFSRef", "PyMac_GetFSRef"));
    builder
        .register("FSSpec", OpaqueType::with_functions("FSSpec", fsspec.clone()).by_value_struct())?
        .register("FSSpec_ptr", OpaqueType::with_functions("FSSpec", fsspec))?
        .register("FSRef", OpaqueType::with_functions("FSRef", fsref.clone()).by_value_struct())?
        .register("FSRef_ptr", OpaqueType::with_functions("FSRef", fsref))?;

    // Four-character codes.
    let ostype = Arc::new(ObjectFunctions::explicit("PyMac_BuildOSType", "PyMac_GetOSType"));
    for name in ["OSType", "ResType", "FourCharCode"] {
        builder.register(name, OpaqueType::with_functions(name, ostype.clone()).by_value())?;
    }

    builder
        .register(
            "Fixed",
            OpaqueType::explicit("Fixed", "PyMac_BuildFixed", "PyMac_GetFixed").by_value(),
        )?
        .register(
            "NumVersion",
            OpaqueType::explicit("NumVersion", "PyMac_BuildNumVersion", "BUG")
                .by_value()
                .output_only(),
        )?
        .register("Rect", OpaqueType::explicit("Rect", "PyMac_BuildRect", "PyMac_GetRect"))?
        .alias("Rect_ptr", "Rect")?;

    let point = Arc::new(ObjectFunctions::explicit("PyMac_BuildPoint", "PyMac_GetPoint"));
    builder
        .register("Point", OpaqueType::with_functions("Point", point.clone()).by_value())?
        .register("Point_ptr", OpaqueType::with_functions("Point", point))?
        .register(
            "EventRecord",
            OpaqueType::explicit("EventRecord", "PyMac_BuildEventRecord", "PyMac_GetEventRecord"),
        )?
        .alias("EventRecord_ptr", "EventRecord")?;

    builder.register("NullStorage", SyntheticType::new("(void *)0"))?;
    Ok(())
}

fn register_objects(builder: &mut TypeRegistryBuilder) -> Result<(), RegistryError> {
    for &(name, base, aliases) in OBJECT_HANDLES {
        builder.register(name, OpaqueType::aliased(name, base).by_value())?;
        for alias in aliases {
            builder.alias(*alias, name)?;
        }
    }
    // Windows and dialogs the runtime already wraps; looked up, never converted.
    builder
        .register(
            "ExistingWindowPtr",
            OpaqueType::explicit("WindowPtr", "WinObj_WhichWindow", "BUG")
                .by_value()
                .output_only(),
        )?
        .register(
            "ExistingDialogPtr",
            OpaqueType::explicit("DialogPtr", "DlgObj_WhichDialog", "BUG")
                .by_value()
                .output_only(),
        )?;
    for &name in CF_REFS {
        let base = format!("{name}Obj");
        builder.register(name, OpaqueType::aliased(name, &base).by_value())?;
    }
    builder.register(
        "OptionalCFURLRef",
        OpaqueType::aliased("CFURLRef", "OptionalCFURLRefObj").by_value(),
    )?;
    Ok(())
}

fn register_errors(builder: &mut TypeRegistryBuilder) -> Result<(), RegistryError> {
    builder
        .register("OSErr", ErrorCodeType::new("OSErr", "h"))?
        .register("OSStatus", ErrorCodeType::new("OSStatus", "l"))?;
    Ok(())
}

fn register_buffers(builder: &mut TypeRegistryBuilder) -> Result<(), RegistryError> {
    let chars = || BufferElement::new("char", "long", "l");
    let uchars = BufferElement::new("unsigned char", "long", "l");
    let unichars = || BufferElement::new("UniChar", "UniCharCount", "l");

    builder
        .register("InBuffer", VarInputBuffer::new(chars()))?
        .register("UcharInBuffer", VarInputBuffer::new(uchars))?
        .register("OptionalInBuffer", VarInputBuffer::new(chars()).optional())?
        .register("InOutBuffer", HeapBuffer::new(chars(), HeapKind::InputOutput))?
        .register("VarInOutBuffer", HeapBuffer::new(chars(), HeapKind::VarInputOutput))?
        .register("OutBuffer", HeapBuffer::new(chars(), HeapKind::Output))?
        .register("VarOutBuffer", HeapBuffer::new(chars(), HeapKind::VarOutput))?
        .register("VarVarOutBuffer", HeapBuffer::new(chars(), HeapKind::VarVarOutput))?;

    builder
        .register("UnicodeInBuffer", VarInputBuffer::new(unichars()).unicode())?
        .register(
            "UnicodeReverseInBuffer",
            VarInputBuffer::new(unichars()).unicode().reversed(),
        )?
        .register("UniChar_ptr", Type::new("UniCharPtr", "u").input_only())?;
    Ok(())
}

impl TypeRegistry {
    /// Registry holding the standard and toolbox types.
    pub fn toolbox() -> Result<Self, RegistryError> {
        let mut builder = Self::builder();
        register_standard(&mut builder)?;
        register_toolbox(&mut builder)?;
        Ok(builder.build())
    }
}
