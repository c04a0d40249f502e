use cavern_gen::bezier_map::CurveTree;
use cavern_gen::cave::CaveMap;
use cavern_gen::config::CaveConfig;
use cavern_gen::contour::{classify_contours, derive_shadows};
use cavern_gen::prng::CaveRng;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const SEED: u64 = 12345;
const PRESETS: [&str; 3] = ["default", "warren", "grotto"];

fn preset(name: &str) -> CaveConfig {
    CaveConfig::preset(name).unwrap_or_else(|| panic!("unknown preset {name}"))
}

fn bench_grow_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("grow_tree");
    for name in PRESETS {
        let config = preset(name);
        group.bench_with_input(BenchmarkId::from_parameter(name), &config, |b, config| {
            b.iter(|| {
                let mut rng = CaveRng::new(black_box(SEED));
                black_box(CurveTree::grow(config, &mut rng).unwrap())
            });
        });
    }
    group.finish();
}

fn bench_generate_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_map");
    group.sample_size(20);
    for name in PRESETS {
        let config = preset(name);
        group.bench_with_input(BenchmarkId::from_parameter(name), &config, |b, config| {
            b.iter(|| {
                let mut rng = CaveRng::new(black_box(SEED));
                black_box(CaveMap::generate(config, &mut rng).unwrap())
            });
        });
    }
    group.finish();
}

fn bench_contours(c: &mut Criterion) {
    let map = CaveMap::generate(&preset("warren"), &mut CaveRng::new(SEED)).unwrap();
    c.bench_function("classify_contours_warren", |b| {
        b.iter(|| {
            let contours = classify_contours(black_box(&map.walls));
            black_box(derive_shadows(&contours))
        });
    });
}

criterion_group!(benches, bench_grow_tree, bench_generate_map, bench_contours);
criterion_main!(benches);
