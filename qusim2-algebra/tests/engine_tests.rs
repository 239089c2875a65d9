//! Algebraic invariants of the engine factories, checked through full
//! materialisation.

use num_complex::Complex32;
use qusim2_algebra::{engine, LazyOperation};
use qusim2_core::{approx_equal, DenseMatrix};

fn c(re: f32, im: f32) -> Complex32 {
    Complex32::new(re, im)
}

fn sample_a() -> DenseMatrix {
    DenseMatrix::from_rows(&[
        vec![c(1.0, 0.5), c(-2.0, 0.0)],
        vec![c(0.0, -1.0), c(3.0, 0.25)],
    ])
    .unwrap()
}

fn sample_b() -> DenseMatrix {
    DenseMatrix::from_rows(&[
        vec![c(0.5, 0.0), c(1.0, 1.0)],
        vec![c(-1.0, 0.0), c(0.0, 2.0)],
    ])
    .unwrap()
}

fn sample_c() -> DenseMatrix {
    DenseMatrix::from_rows(&[
        vec![c(2.0, 0.0), c(0.0, 0.5)],
        vec![c(1.0, -1.0), c(-0.5, 0.0)],
    ])
    .unwrap()
}

#[test]
fn conjugate_transpose_is_an_involution() {
    let a = sample_a();
    let dagger = engine::conjugate_transpose(&a).unwrap().to_matrix();
    let double = engine::conjugate_transpose(&dagger).unwrap().to_matrix();
    assert_eq!(double, a);
}

#[test]
fn matmul_is_associative() {
    let (a, b, x) = (sample_a(), sample_b(), sample_c());
    let ab = engine::matmul(&a, &b).unwrap().to_matrix();
    let bc = engine::matmul(&b, &x).unwrap().to_matrix();
    let left = engine::matmul(&ab, &x).unwrap().to_matrix();
    let right = engine::matmul(&a, &bc).unwrap().to_matrix();
    assert_eq!(left, right);
}

#[test]
fn tensor_with_identity_repeats_blocks() {
    let a = sample_a();
    let identity4 = LazyOperation::identity(4).to_matrix();
    let expanded = engine::tensor_product(&a, &identity4).unwrap().to_matrix();
    assert_eq!(expanded.rows(), 8);
    assert_eq!(expanded.cols(), 8);
    for m in 0..8 {
        for n in 0..8 {
            let expected = if m % 4 == n % 4 {
                a.get(m / 4, n / 4)
            } else {
                c(0.0, 0.0)
            };
            assert!(approx_equal(expanded.get(m, n), expected));
        }
    }
}

#[test]
fn matsum_is_associative() {
    let (a, b, x) = (sample_a(), sample_b(), sample_c());
    let ab = engine::matsum(&a, &b).unwrap().to_matrix();
    let bc = engine::matsum(&b, &x).unwrap().to_matrix();
    let left = engine::matsum(&ab, &x).unwrap().to_matrix();
    let right = engine::matsum(&a, &bc).unwrap().to_matrix();
    assert_eq!(left, right);
}

#[test]
fn scalar_commutes_through_products() {
    let (a, b) = (sample_a(), sample_b());
    let k = c(0.5, -1.5);

    let ab = engine::matmul(&a, &b).unwrap().to_matrix();
    let k_ab = engine::scalar_product(&ab, k).unwrap().to_matrix();

    let ka = engine::scalar_product(&a, k).unwrap().to_matrix();
    let ka_b = engine::matmul(&ka, &b).unwrap().to_matrix();

    let kb = engine::scalar_product(&b, k).unwrap().to_matrix();
    let a_kb = engine::matmul(&a, &kb).unwrap().to_matrix();

    assert_eq!(k_ab, ka_b);
    assert_eq!(k_ab, a_kb);
}

#[test]
fn identity_matvec_is_identity() {
    let v = DenseMatrix::from_vector(&[c(0.5, 0.0), c(0.0, 0.5), c(-0.5, 0.0), c(0.0, -0.5)]);
    let identity4 = LazyOperation::identity(4);
    let result = engine::matvec(&identity4, &v).unwrap().to_matrix();
    assert_eq!(result, v);
}

#[test]
fn inner_product_of_a_vector_with_itself_is_its_squared_norm() {
    let v = DenseMatrix::from_vector(&[c(1.0, 1.0), c(0.0, -2.0), c(3.0, 0.0)]);
    let ip = engine::inner_product(&v, &v).unwrap();
    // |1+i|^2 + |2i|^2 + |3|^2 = 2 + 4 + 9.
    assert!(approx_equal(ip.get(0, 0), c(15.0, 0.0)));
}

#[test]
fn hadamard_squares_to_identity() {
    let h = DenseMatrix::hadamard2();
    let hh = engine::matmul(&h, &h).unwrap().to_matrix();
    assert_eq!(hh, DenseMatrix::identity2());
}

#[test]
fn pauli_gates_square_to_identity() {
    for gate in [
        DenseMatrix::pauli_x(),
        DenseMatrix::pauli_y(),
        DenseMatrix::pauli_z(),
    ] {
        let squared = engine::matmul(&gate, &gate).unwrap().to_matrix();
        assert_eq!(squared, DenseMatrix::identity2());
    }
}

#[test]
fn unitarity_of_hadamard_and_its_scaled_copy() {
    let h = DenseMatrix::hadamard2();
    assert!(engine::is_unitary(&h));
    let scaled = engine::scalar_product(&h, c(2.0, 0.0)).unwrap().to_matrix();
    assert!(!engine::is_unitary(&scaled));
}

#[test]
fn tensor_power_of_identity_is_the_big_identity() {
    let expanded = engine::tensor_power(&DenseMatrix::identity2(), 8)
        .unwrap()
        .to_matrix();
    assert_eq!(expanded.rows(), 256);
    assert_eq!(expanded.cols(), 256);
    for m in 0..256 {
        for n in 0..256 {
            let expected = if m == n { 1.0 } else { 0.0 };
            assert!(approx_equal(expanded.get(m, n), c(expected, 0.0)));
        }
    }
}

#[test]
fn graph_dimensions_agree_with_materialised_dimensions() {
    let graphs = vec![
        engine::matmul(&sample_a(), &sample_b()).unwrap(),
        engine::tensor_product(&sample_a(), &sample_b()).unwrap(),
        engine::conjugate_transpose(&sample_a()).unwrap(),
        engine::outer_product(&DenseMatrix::ket_plus(), &DenseMatrix::ket_minus()).unwrap(),
    ];
    for graph in graphs {
        let mat = graph.to_matrix();
        assert_eq!(graph.rows(), mat.rows());
        assert_eq!(graph.cols(), mat.cols());
        for m in 0..graph.rows() {
            for n in 0..graph.cols() {
                assert!(approx_equal(graph.get(m, n), mat.get(m, n)));
            }
        }
    }
}

#[test]
fn composed_graphs_match_composed_matrices() {
    // Build (A * B) + C lazily in one graph and compare with eager
    // per-step materialisation.
    let (a, b, x) = (sample_a(), sample_b(), sample_c());
    let product = engine::matmul(&a, &b).unwrap();
    let combined = engine::matsum(&product, &x).unwrap();

    let eager_product = engine::matmul(&a, &b).unwrap().to_matrix();
    let eager = engine::matsum(&eager_product, &x).unwrap().to_matrix();

    assert_eq!(combined.to_matrix(), eager);
}

#[test]
fn lazy_lazy_composition_splices_correctly() {
    let (a, b) = (sample_a(), sample_b());
    let left = engine::matmul(&a, &b).unwrap();
    let right = engine::tensor_product(&DenseMatrix::ket_zero(), &DenseMatrix::ket_zero()).unwrap();

    // (A*B) (x) (|0> (x) |0>) built lazy-lazy.
    let graph = engine::tensor_product(&left, &right).unwrap();
    assert_eq!(graph.rows(), 2);
    assert_eq!(graph.cols(), 8);

    let eager = engine::tensor_product(&left.to_matrix(), &right.to_matrix())
        .unwrap()
        .to_matrix();
    assert_eq!(graph.to_matrix(), eager);
}

#[test]
fn clone_keeps_results_identical_and_independent() {
    let graph = engine::matmul(&sample_a(), &sample_b()).unwrap();
    let cloned = graph.clone();
    assert_eq!(graph.to_matrix(), cloned.to_matrix());
    for m in 0..graph.rows() {
        for n in 0..graph.cols() {
            assert!(approx_equal(graph.get(m, n), cloned.get(m, n)));
        }
    }
}

#[test]
fn outer_product_of_kets_builds_projector() {
    let ket0 = DenseMatrix::ket_zero();
    let projector = engine::outer_product(&ket0, &ket0).unwrap().to_matrix();
    assert_eq!(projector, DenseMatrix::proj_zero());
}
