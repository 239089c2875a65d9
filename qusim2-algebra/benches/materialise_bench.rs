use criterion::{black_box, criterion_group, criterion_main, Criterion};
use qusim2_algebra::engine;
use qusim2_core::DenseMatrix;

fn bench_tensor_power_materialise(c: &mut Criterion) {
    let identity = DenseMatrix::identity2();
    c.bench_function("tensor_power_i2_8_to_matrix", |b| {
        let graph = engine::tensor_power(&identity, 8).unwrap();
        b.iter(|| black_box(&graph).to_matrix())
    });

    let h = DenseMatrix::hadamard2();
    c.bench_function("tensor_power_h2_6_to_matrix", |b| {
        let graph = engine::tensor_power(&h, 6).unwrap();
        b.iter(|| black_box(&graph).to_matrix())
    });
}

fn bench_matmul_chain(c: &mut Criterion) {
    let h = DenseMatrix::hadamard2();
    c.bench_function("matrix_exp_h2_64_to_matrix", |b| {
        let graph = engine::matrix_exp(&h, 64).unwrap();
        b.iter(|| black_box(&graph).to_matrix())
    });
}

criterion_group!(benches, bench_tensor_power_materialise, bench_matmul_chain);
criterion_main!(benches);
