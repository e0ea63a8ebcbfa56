use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::{Array1, Array2};
use normal_modes::{combination::linear_combination, model::NMA, VectorBase};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_model(num_atoms: usize, num_modes: usize) -> NMA {
    let mut rng = StdRng::seed_from_u64(42);
    let dof = num_atoms * 3;
    let eigvecs = Array2::from_shape_fn((dof, num_modes), |_| rng.gen_range(-1.0..1.0));
    let eigvals = Array1::from_shape_fn(num_modes, |i| (i + 1) as f64);
    let mut model = NMA::anm("bench");
    model.set_eigens(eigvecs, eigvals).unwrap();
    model
}

fn bench_mode_algebra(c: &mut Criterion) {
    let model = random_model(1000, 20);
    let m0 = model.get_mode(0);
    let m1 = model.get_mode(1);

    c.bench_function("mode dot product", |b| {
        b.iter(|| m0.dot(black_box(&m1)).unwrap())
    });

    c.bench_function("mode addition", |b| {
        b.iter(|| m0.add(black_box(&m1)).unwrap())
    });

    let modes: Vec<_> = model.modes().collect();
    let coefficients: Vec<f64> = (0..modes.len()).map(|i| 1.0 / (i + 1) as f64).collect();
    c.bench_function("linear combination of 20 modes", |b| {
        b.iter(|| linear_combination(black_box(&modes), black_box(&coefficients)).unwrap())
    });
}

criterion_group!(benches, bench_mode_algebra);
criterion_main!(benches);
