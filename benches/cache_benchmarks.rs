//! Performance benchmarks for the delegate cache pass.
//!
//! Workloads are synthesized compilations:
//! - Module-scoped: many non-generic conversions sharing a handful of cells
//! - Type-scoped: conversions inside many generic types
//! - Method-scoped: conversions in generic methods with constrained parameters
//! - Capacity: module conversions split across bounded containers
//!
//! ## Profiling with Puffin
//!
//! ```bash
//! cargo bench --features profile-with-puffin -- --profile-time 5
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use delegate_cache::{
    CacheOptions, ConversionRequest, DelegateCachePass, Evaluator, GenericOwner, MethodEntry,
    MethodRef, SequentialNames, SiteId, SymbolTable, TypeConstraint, TypeEntry, TypeEnv, TypeHash,
    TypeRef,
};
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

/// Flush profiling data for one iteration.
#[cfg(feature = "profile-with-puffin")]
fn end_profiling_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(not(feature = "profile-with-puffin"))]
fn end_profiling_frame() {}

#[cfg(feature = "profile-with-puffin")]
fn print_profiling_stats() {
    let Some(frame_view) = FRAME_VIEW.get() else {
        println!("Profiler not initialized");
        return;
    };
    let frames = frame_view.lock().recent_frames().count();
    println!("\n=== Profiling: {} frames recorded ===\n", frames);
}

#[cfg(not(feature = "profile-with-puffin"))]
fn print_profiling_stats() {}

/// A synthesized compilation.
struct Workload {
    symbols: SymbolTable,
    requests: Vec<ConversionRequest>,
}

struct Base {
    symbols: SymbolTable,
    func: TypeHash,
    lib: TypeHash,
    targets: Vec<TypeHash>,
}

/// `Lib` with `targets` generic static methods `Target{i}<K>` and `Func<R>`.
fn base(targets: usize) -> Base {
    let mut symbols = SymbolTable::new();
    let func = symbols.register_type(TypeEntry::delegate("Func")).unwrap();
    symbols
        .declare_type_param(GenericOwner::Type(func), "R")
        .unwrap();
    let lib = symbols.register_type(TypeEntry::class("Lib")).unwrap();
    let targets = (0..targets)
        .map(|i| {
            let m = symbols
                .register_method(MethodEntry::static_method(lib, format!("Target{i}")))
                .unwrap();
            symbols
                .declare_type_param(GenericOwner::Method(m), "K")
                .unwrap();
            m
        })
        .collect();
    Base {
        symbols,
        func,
        lib,
        targets,
    }
}

fn conversion(
    b: &Base,
    site: usize,
    target: usize,
    arg: TypeRef,
    ty: TypeHash,
) -> ConversionRequest {
    ConversionRequest::new(
        SiteId(site as u32),
        MethodRef::new(b.targets[target], TypeRef::named(b.lib))
            .with_type_args(vec![arg.clone()]),
        TypeRef::generic(b.func, vec![arg]),
        ty,
    )
}

fn module_workload(sites: usize) -> Workload {
    let mut b = base(8);
    let host = b.symbols.register_type(TypeEntry::class("Host")).unwrap();
    let main = b
        .symbols
        .register_method(MethodEntry::static_method(host, "Main"))
        .unwrap();
    let requests = (0..sites)
        .map(|i| {
            conversion(&b, i, i % b.targets.len(), TypeRef::named(b.lib), host).in_method(main)
        })
        .collect();
    Workload {
        symbols: b.symbols,
        requests,
    }
}

fn type_workload(types: usize) -> Workload {
    let mut b = base(4);
    let mut requests = Vec::new();
    for i in 0..types {
        let ty = b
            .symbols
            .register_type(TypeEntry::class(format!("Box{i}")))
            .unwrap();
        let t = b
            .symbols
            .declare_type_param(GenericOwner::Type(ty), "T")
            .unwrap();
        let test = b.symbols.register_method(MethodEntry::new(ty, "Test")).unwrap();
        for target in 0..b.targets.len() {
            let site = requests.len();
            requests.push(conversion(&b, site, target, TypeRef::param(t), ty).in_method(test));
        }
    }
    Workload {
        symbols: b.symbols,
        requests,
    }
}

fn method_workload(methods: usize) -> Workload {
    let mut b = base(4);
    let host = b.symbols.register_type(TypeEntry::class("Host")).unwrap();
    let mut requests = Vec::new();
    for i in 0..methods {
        let m = b
            .symbols
            .register_method(MethodEntry::static_method(host, format!("Test{i}")))
            .unwrap();
        let a = b
            .symbols
            .declare_type_param(GenericOwner::Method(m), "A")
            .unwrap();
        let bp = b
            .symbols
            .declare_type_param(GenericOwner::Method(m), "B")
            .unwrap();
        b.symbols
            .add_constraint(a, TypeConstraint::Type(TypeRef::param(bp)))
            .unwrap();
        for target in 0..b.targets.len() {
            let site = requests.len();
            requests.push(conversion(&b, site, target, TypeRef::param(a), host).in_method(m));
        }
    }
    Workload {
        symbols: b.symbols,
        requests,
    }
}

fn run_pass(workload: &Workload, options: CacheOptions) -> usize {
    let mut names = SequentialNames::new();
    let plan = DelegateCachePass::run(
        &workload.symbols,
        options,
        &mut names,
        black_box(&workload.requests),
    );
    end_profiling_frame();
    plan.stats.cells
}

/// Benchmark the pass for each scope kind.
fn pass_benchmarks(c: &mut Criterion) {
    setup_profiler();

    let mut group = c.benchmark_group("pass/scopes");
    for size in [16usize, 256, 2048] {
        let workload = module_workload(size);
        group.throughput(Throughput::Elements(workload.requests.len() as u64));
        group.bench_with_input(BenchmarkId::new("module", size), &workload, |b, w| {
            b.iter(|| black_box(run_pass(w, CacheOptions::default())));
        });

        let workload = type_workload(size / 4);
        group.throughput(Throughput::Elements(workload.requests.len() as u64));
        group.bench_with_input(BenchmarkId::new("type", size), &workload, |b, w| {
            b.iter(|| black_box(run_pass(w, CacheOptions::default())));
        });

        let workload = method_workload(size / 4);
        group.throughput(Throughput::Elements(workload.requests.len() as u64));
        group.bench_with_input(BenchmarkId::new("method", size), &workload, |b, w| {
            b.iter(|| black_box(run_pass(w, CacheOptions::default())));
        });
    }
    group.finish();

    print_profiling_stats();
}

/// Benchmark container splitting under a capacity limit.
fn capacity_benchmarks(c: &mut Criterion) {
    let mut b = base(512);
    let host = b.symbols.register_type(TypeEntry::class("Host")).unwrap();
    let main = b
        .symbols
        .register_method(MethodEntry::static_method(host, "Main"))
        .unwrap();
    let requests = (0..b.targets.len())
        .map(|i| conversion(&b, i, i, TypeRef::named(b.lib), host).in_method(main))
        .collect();
    let workload = Workload {
        symbols: b.symbols,
        requests,
    };

    let mut group = c.benchmark_group("pass/capacity");
    for max in [8usize, 64] {
        let options = CacheOptions::default().with_max_cells_per_container(max);
        group.bench_with_input(BenchmarkId::from_parameter(max), &options, |b, o| {
            b.iter(|| black_box(run_pass(&workload, *o)));
        });
    }
    group.bench_function("unbounded", |b| {
        b.iter(|| black_box(run_pass(&workload, CacheOptions::default())));
    });
    group.finish();
}

/// Benchmark evaluating cached sites against their uncached form.
fn evaluator_benchmarks(c: &mut Criterion) {
    let workload = type_workload(64);
    let mut names = SequentialNames::new();
    let cached = DelegateCachePass::run(
        &workload.symbols,
        CacheOptions::default(),
        &mut names,
        &workload.requests,
    );
    let mut names = SequentialNames::new();
    let uncached = DelegateCachePass::run(
        &workload.symbols,
        CacheOptions::disabled(),
        &mut names,
        &workload.requests,
    );
    let env = workload
        .requests
        .iter()
        .fold(TypeEnv::new(), |env, request| {
            let mut params = Vec::new();
            request.target_type.visit_params(&mut |p| params.push(p));
            params
                .into_iter()
                .fold(env, |env, p| env.bind(p, TypeRef::Object))
        });

    let mut group = c.benchmark_group("evaluator");
    group.throughput(Throughput::Elements(workload.requests.len() as u64));
    group.bench_function("cached", |b| {
        let mut evaluator = Evaluator::for_plan(&cached);
        b.iter(|| {
            for site in &cached.sites {
                black_box(evaluator.eval(&site.expr, &env).unwrap());
            }
        });
    });
    group.bench_function("uncached", |b| {
        b.iter(|| {
            let mut evaluator = Evaluator::new();
            for site in &uncached.sites {
                black_box(evaluator.eval(&site.expr, &env).unwrap());
            }
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    pass_benchmarks,
    capacity_benchmarks,
    evaluator_benchmarks
);

criterion_main!(benches);
