//! Walk a small register through the quantum Fourier transform and back.

use qusim2::prelude::*;

fn print_register(label: &str, register: &StateVector) {
    println!("{label}:");
    for i in 0..register.len() {
        let qubit = register.qubit(i).expect("register holds qubits");
        println!(
            "  q{i}: alpha = {:.4} {:+.4}i, beta = {:.4} {:+.4}i",
            qubit.alpha().re,
            qubit.alpha().im,
            qubit.beta().re,
            qubit.beta().im
        );
    }
}

fn main() {
    // |01>
    let register = StateVector::from_qubits(vec![Qubit::ket_zero(), Qubit::ket_one()])
        .expect("non-empty register");
    print_register("input |01>", &register);

    let transformed = circuit::qft(&register).expect("qft");
    print_register("after QFT", &transformed);

    let restored = circuit::inverse_qft(&transformed).expect("inverse qft");
    print_register("after inverse QFT", &restored);

    assert_eq!(restored, register);
    println!("round-trip restored the input register");

    // Estimate the eigenphase of a phase-shift gate on |1>.
    let u = gate::phase_shift(std::f32::consts::PI);
    let qpe_register = circuit::qpe(&Qubit::ket_one(), &u, 1).expect("qpe");
    let phase = circuit::estimate_phase(&qpe_register).expect("estimate");
    println!("estimated eigenphase of diag(1, e^(i pi)): {phase} of a full turn");
}
