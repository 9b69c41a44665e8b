use criterion::{Criterion, criterion_group, criterion_main};
use eye_model::ModelConfig;
use eye_model::geometry::{CutPlane, KeepSide, bisect, build_sphere};
use eye_model::pipeline::EyeModel;
use eye_model::scene::DiskImageProvider;
use glam::Vec3;

fn bench_bisect(c: &mut Criterion) {
    let mesh = build_sphere(12.0, 128, 64).unwrap();
    let plane = CutPlane::new(Vec3::ZERO, Vec3::X).unwrap();

    c.bench_function("bisect_hemisphere_128x64", |b| {
        b.iter(|| bisect(&mesh, &plane, KeepSide::Negative));
    });

    let oblique = CutPlane::new(Vec3::new(3.0, 1.0, 0.0), Vec3::new(1.0, 0.5, 0.25)).unwrap();
    c.bench_function("bisect_oblique_128x64", |b| {
        b.iter(|| bisect(&mesh, &oblique, KeepSide::Negative));
    });
}

fn bench_model(c: &mut Criterion) {
    let parallel = ModelConfig {
        fundus_image: None,
        ..Default::default()
    };
    let sequential = ModelConfig {
        parallel: false,
        ..parallel.clone()
    };

    c.bench_function("eye_model_parallel", |b| {
        b.iter(|| EyeModel::build(&parallel, &DiskImageProvider).unwrap());
    });
    c.bench_function("eye_model_sequential", |b| {
        b.iter(|| EyeModel::build(&sequential, &DiskImageProvider).unwrap());
    });
}

criterion_group!(benches, bench_bisect, bench_model);
criterion_main!(benches);
