//! SIMD kernels over real arrays and split complex vectors
//!
//! Two backends implement the same contract, selected at build time:
//! the `wide`-based vectorised path (feature `simd`, the default) and a
//! scalar fallback. Results are equivalent up to floating-point reordering.
//!
//! The real-array kernels (`vmul`, `vsmul`, `vadd`, `vsub`, `hsum`) process
//! eight-lane blocks followed by a scalar tail. The complex wrappers express
//! complex arithmetic through them with the identity
//! `(a + bi)(c + di) = (ac - bd) + i(ad + bc)`.
//!
//! Length preconditions (equal-length inputs) are caller bugs, not runtime
//! errors; they are checked with debug assertions.

use num_complex::Complex32;

use crate::split::SplitVector;

#[cfg(feature = "simd")]
mod vectorized;
#[cfg(feature = "simd")]
pub use vectorized::{hsum, vadd, vmul, vsmul, vsub};

#[cfg(not(feature = "simd"))]
mod scalar_fallback;
#[cfg(not(feature = "simd"))]
pub use scalar_fallback::{hsum, vadd, vmul, vsmul, vsub};

/// Element-wise complex multiplication of two split vectors.
///
/// Four real multiplies, one subtraction and one addition per the complex
/// product identity.
pub fn cvmul(left: &SplitVector, right: &SplitVector) -> SplitVector {
    debug_assert_eq!(left.len(), right.len());
    let n = left.len();

    let mut ac = vec![0.0f32; n];
    let mut bd = vec![0.0f32; n];
    let mut ad = vec![0.0f32; n];
    let mut bc = vec![0.0f32; n];

    vmul(left.re(), right.re(), &mut ac);
    vmul(left.im(), right.im(), &mut bd);
    vmul(left.re(), right.im(), &mut ad);
    vmul(left.im(), right.re(), &mut bc);

    let mut re = vec![0.0f32; n];
    let mut im = vec![0.0f32; n];
    vsub(&ac, &bd, &mut re);
    vadd(&ad, &bc, &mut im);

    SplitVector::from_parts(re, im)
}

/// Complex scalar times complex split vector, same identity as [`cvmul`].
pub fn cvsmul(vect: &SplitVector, k: Complex32) -> SplitVector {
    let n = vect.len();

    let mut ac = vec![0.0f32; n];
    let mut bd = vec![0.0f32; n];
    let mut ad = vec![0.0f32; n];
    let mut bc = vec![0.0f32; n];

    vsmul(vect.re(), k.re, &mut ac);
    vsmul(vect.im(), k.im, &mut bd);
    vsmul(vect.re(), k.im, &mut ad);
    vsmul(vect.im(), k.re, &mut bc);

    let mut re = vec![0.0f32; n];
    let mut im = vec![0.0f32; n];
    vsub(&ac, &bd, &mut re);
    vadd(&ad, &bc, &mut im);

    SplitVector::from_parts(re, im)
}

/// Element-wise sum of two split vectors.
pub fn cvadd(left: &SplitVector, right: &SplitVector) -> SplitVector {
    debug_assert_eq!(left.len(), right.len());
    let n = left.len();

    let mut re = vec![0.0f32; n];
    let mut im = vec![0.0f32; n];
    vadd(left.re(), right.re(), &mut re);
    vadd(left.im(), right.im(), &mut im);

    SplitVector::from_parts(re, im)
}

/// Element-wise subtraction of two split vectors, `left - right`.
pub fn cvsub(left: &SplitVector, right: &SplitVector) -> SplitVector {
    debug_assert_eq!(left.len(), right.len());
    let n = left.len();

    let mut re = vec![0.0f32; n];
    let mut im = vec![0.0f32; n];
    vsub(left.re(), right.re(), &mut re);
    vsub(left.im(), right.im(), &mut im);

    SplitVector::from_parts(re, im)
}

/// Horizontal sum over every element of the vector, both halves at once.
pub fn cvsve(vect: &SplitVector) -> Complex32 {
    Complex32::new(hsum(vect.re()), hsum(vect.im()))
}
