//! Benchmarks for binding signatures and generating glue code.
//!
//! ## Profiling with Puffin
//!
//! ```bash
//! cargo bench --features profile-with-puffin -- --profile-time 5
//! ```

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use gluegen::prelude::*;
use std::hint::black_box;

#[cfg(feature = "profile-with-puffin")]
static FRAME_VIEW: std::sync::OnceLock<puffin::GlobalFrameView> = std::sync::OnceLock::new();

/// Initialize puffin profiler.
#[cfg(feature = "profile-with-puffin")]
fn setup_profiler() {
    puffin::set_scopes_on(true);
    FRAME_VIEW.get_or_init(puffin::GlobalFrameView::default);
}

#[cfg(not(feature = "profile-with-puffin"))]
fn setup_profiler() {}

#[cfg(feature = "profile-with-puffin")]
fn end_profiling_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(not(feature = "profile-with-puffin"))]
fn end_profiling_frame() {}

/// A resource-manager flavoured set of signatures covering every descriptor family.
fn toolbox_signatures() -> Vec<FunctionSignature> {
    let mut signatures = vec![
        FunctionSignature::function("CloseResFile").param("short", "refNum", Mode::In),
        FunctionSignature::function("GetResource")
            .returns("Handle")
            .param("ResType", "theType", Mode::In)
            .param("short", "theID", Mode::In),
        FunctionSignature::function("GetResInfo")
            .param("Handle", "theResource", Mode::In)
            .param("short", "theID", Mode::Out)
            .param("ResType", "theType", Mode::Out)
            .param("Str255", "name", Mode::Out),
        FunctionSignature::function("FSpDelete")
            .returns("OSErr")
            .param("FSSpec_ptr", "spec", Mode::In),
        FunctionSignature::function("SetControlData")
            .returns("OSErr")
            .param("ControlHandle", "inControl", Mode::In)
            .param("short", "inPart", Mode::In)
            .param("ResType", "inTagName", Mode::In)
            .param("InBuffer", "inBuffer", Mode::In),
        FunctionSignature::function("GetControlData")
            .returns("OSErr")
            .param("ControlHandle", "inControl", Mode::In)
            .param("short", "inPart", Mode::In)
            .param("ResType", "inTagName", Mode::In)
            .param("VarOutBuffer", "outBuffer", Mode::InOut),
        FunctionSignature::method("CountMenuItems")
            .returns("short")
            .param("MenuHandle", "_self", Mode::In),
        FunctionSignature::function("GetDateTime")
            .param("unsigned_long", "secs", Mode::Out)
            .condition("TARGET_API_MAC_CARBON"),
    ];
    // Padding with numbered variants gives the batch a realistic size.
    for i in 0..32 {
        signatures.push(
            FunctionSignature::function(format!("InsertMenuItem{i}"))
                .param("MenuHandle", "theMenu", Mode::In)
                .param("Str255", "itemString", Mode::In)
                .param("short", "afterItem", Mode::In),
        );
    }
    signatures
}

fn bench_registry(c: &mut Criterion) {
    setup_profiler();
    c.bench_function("registry/toolbox", |b| {
        b.iter(|| {
            let registry = TypeRegistry::toolbox();
            end_profiling_frame();
            black_box(registry)
        })
    });
}

fn bench_generation(c: &mut Criterion) {
    setup_profiler();
    let registry = match TypeRegistry::toolbox() {
        Ok(registry) => registry,
        Err(err) => panic!("toolbox registry failed: {err}"),
    };
    let signatures = toolbox_signatures();
    let specs: Vec<FunctionSpec> = signatures
        .iter()
        .filter_map(|signature| signature.bind(&registry).ok())
        .collect();

    let mut group = c.benchmark_group("generation");
    group.throughput(Throughput::Elements(signatures.len() as u64));

    let plain = FunctionGenerator::default();
    group.bench_function("batch", |b| {
        b.iter(|| {
            let output = plain.generate_batch(black_box(&specs));
            end_profiling_frame();
            output
        })
    });

    let checked = FunctionGenerator::new(GeneratorConfig::with_prefix("Res"))
        .with_return_strategy(ErrorCodeReturn)
        .with_guard(WeakLinkGuard);
    group.bench_function("batch_error_code_weak_link", |b| {
        b.iter(|| {
            let output = checked.generate_batch(black_box(&specs));
            end_profiling_frame();
            output
        })
    });

    group.bench_function("bind_and_generate", |b| {
        b.iter(|| {
            let output = checked.generate_signatures(&registry, black_box(&signatures));
            end_profiling_frame();
            output
        })
    });
    group.finish();
}

criterion_group!(benches, bench_registry, bench_generation);
criterion_main!(benches);
