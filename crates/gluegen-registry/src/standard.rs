//! The standard C scalar types and runtime object pointers.

use gluegen_core::{DescriptorExt, RegistryError, Type};

use crate::{TypeRegistry, TypeRegistryBuilder};

/// Register `char`, `short`, `int`, `long`, `float`, `double`, the string
/// pointers and the generic object pointers.
///
/// | name               | C type            | format |
/// |--------------------|-------------------|--------|
/// | `char`             | `char`            | `c`    |
/// | `short`            | `short`           | `h`    |
/// | `unsigned_short`   | `unsigned short`  | `H`    |
/// | `int`              | `int`             | `i`    |
/// | `long`             | `long`            | `l`    |
/// | `unsigned_long`    | `unsigned long`   | `l`    |
/// | `float`            | `float`           | `f`    |
/// | `double`           | `double`          | `d`    |
/// | `stringptr`        | `char*`           | `s` (input only) |
/// | `unicodestringptr` | `wchar_t *`       | `u` (input only) |
/// | `objectptr`        | `PyObject*`       | `O`    |
/// | `stringobjectptr`  | `PyStringObject*` | `S`    |
pub fn register_standard(builder: &mut TypeRegistryBuilder) -> Result<(), RegistryError> {
    builder
        .register("char", Type::new("char", "c"))?
        .register("short", Type::new("short", "h"))?
        .register("unsigned_short", Type::new("unsigned short", "H"))?
        .register("int", Type::new("int", "i"))?
        .register("long", Type::new("long", "l"))?
        .register("unsigned_long", Type::new("unsigned long", "l"))?
        .register("float", Type::new("float", "f"))?
        .register("double", Type::new("double", "d"))?;

    // Null-terminated strings only flow into native code; use a buffer for output.
    builder
        .register("stringptr", Type::new("char*", "s").input_only())?
        .register("unicodestringptr", Type::new("wchar_t *", "u").input_only())?;

    builder
        .register("objectptr", Type::new("PyObject*", "O"))?
        .register("stringobjectptr", Type::new("PyStringObject*", "S"))?;
    Ok(())
}

impl TypeRegistry {
    /// Registry holding only the standard types.
    pub fn standard() -> Result<Self, RegistryError> {
        let mut builder = Self::builder();
        register_standard(&mut builder)?;
        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gluegen_core::GenError;

    #[test]
    fn standard_scalars() {
        let registry = TypeRegistry::standard().unwrap();
        assert_eq!(registry.len(), 12);

        let int = registry.get("int").unwrap();
        assert_eq!(int.type_name(), "int");
        assert_eq!(int.parse_format(), "i");

        assert_eq!(registry.get("unsigned_short").unwrap().type_name(), "unsigned short");
        assert_eq!(registry.get("double").unwrap().build_format(), "d");
    }

    #[test]
    fn string_pointers_are_input_only() {
        let registry = TypeRegistry::standard().unwrap();
        let stringptr = registry.get("stringptr").unwrap();
        assert_eq!(stringptr.pass_input("path").unwrap(), "path");
        assert!(matches!(
            stringptr.pass_output("path"),
            Err(GenError::DirectionViolation { .. })
        ));
        assert!(registry.get("unicodestringptr").unwrap().pass_output("s").is_err());
    }
}
