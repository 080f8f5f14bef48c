//! Registry construction and lookup.

use std::sync::Arc;

use gluegen::prelude::*;
use gluegen::registry::{register_standard, register_toolbox};
use tracing_test::traced_test;

#[test]
fn test_toolbox_contains_standard_and_toolbox_sets() {
    let standard = TypeRegistry::standard().unwrap();
    let toolbox = TypeRegistry::toolbox().unwrap();

    for name in standard.names() {
        assert!(toolbox.contains(name), "toolbox registry is missing {name}");
    }
    for name in [
        "Handle",
        "OSErr",
        "Str255",
        "InBuffer",
        "NullStorage",
        "CFURLRef",
        "NumVersion",
        "ExistingWindowPtr",
        "ExistingDialogPtr",
    ] {
        assert!(toolbox.contains(name), "toolbox registry is missing {name}");
        assert!(!standard.contains(name));
    }
}

#[test]
fn test_aliases_resolve_to_the_same_descriptor() {
    let registry = TypeRegistry::toolbox().unwrap();
    for (alias, target) in [
        ("MenuRef", "MenuHandle"),
        ("ControlRef", "ControlHandle"),
        ("WindowRef", "WindowPtr"),
        ("DialogRef", "DialogPtr"),
        ("ConstStringPtr", "StringPtr"),
        ("Rect_ptr", "Rect"),
        ("EventRecord_ptr", "EventRecord"),
    ] {
        assert!(Arc::ptr_eq(
            registry.get(alias).unwrap(),
            registry.get(target).unwrap()
        ));
        assert_eq!(registry.alias_target(alias), Some(target));
    }
}

#[test]
fn test_registering_a_set_twice_is_rejected() {
    let mut builder = TypeRegistry::builder();
    register_standard(&mut builder).unwrap();
    let err = register_standard(&mut builder).unwrap_err();
    assert_eq!(err, RegistryError::DuplicateType("char".into()));
}

#[test]
fn test_custom_types_extend_the_toolbox() {
    let mut builder = TypeRegistry::builder();
    register_standard(&mut builder).unwrap();
    register_toolbox(&mut builder).unwrap();
    builder
        .register("AEDesc", OpaqueType::aliased("AEDesc", "AEDesc").by_value_struct())
        .unwrap()
        .register("AEKeyword", OpaqueType::explicit("AEKeyword", "PyMac_BuildOSType", "PyMac_GetOSType").by_value())
        .unwrap();
    let registry = builder.build();

    let desc = registry.get("AEDesc").unwrap();
    assert_eq!(desc.parse_args("d").as_deref(), Some("AEDesc_Convert, &d"));
    assert_eq!(desc.build_args("d"), "AEDesc_New, &d");
    assert_eq!(registry.len(), TypeRegistry::toolbox().unwrap().len() + 2);
}

#[test]
fn test_registry_is_shared_across_threads() {
    let registry = Arc::new(TypeRegistry::toolbox().unwrap());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                let generator = FunctionGenerator::default();
                let signature = FunctionSignature::function(format!("Worker{i}"))
                    .returns("Handle")
                    .param("short", "id", Mode::In);
                let spec = signature.bind(&registry).unwrap();
                generator.generate(&spec).unwrap().source
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let source = handle.join().unwrap();
        assert!(source.contains(&format!("_rv = Worker{i}(id);")));
    }
}

#[test]
fn test_missing_type_error_names_it() {
    let registry = TypeRegistry::standard().unwrap();
    let err = registry.get("ControlHandle").unwrap_err();
    assert_eq!(err.to_string(), "type not found: ControlHandle");
    let glue: GlueError = err.into();
    assert!(matches!(glue, GlueError::Registry(RegistryError::TypeNotFound(_))));
}

#[test]
#[traced_test]
fn test_building_logs_the_registry_size() {
    let registry = TypeRegistry::toolbox().unwrap();
    assert!(!registry.is_empty());
    assert!(logs_contain("type registry built"));
}
