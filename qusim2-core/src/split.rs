//! Split complex vector
//!
//! A complex vector stored as two parallel real sequences, one for the real
//! parts and one for the imaginary parts. The layout lets the SIMD kernels
//! operate on each half independently; every complex arithmetic identity in
//! this workspace is expressed through it.

use num_complex::Complex32;

use crate::error::{CoreError, CoreResult};
use crate::simd;

/// A complex vector split into real and imaginary halves.
///
/// Invariant: both halves always have the same length.
///
/// # Examples
///
/// ```
/// use qusim2_core::SplitVector;
/// use num_complex::Complex32;
///
/// let mut v = SplitVector::default();
/// v.push(Complex32::new(1.0, -2.0));
/// assert_eq!(v.len(), 1);
/// assert_eq!(v.get(0), Complex32::new(1.0, -2.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitVector {
    re: Vec<f32>,
    im: Vec<f32>,
}

impl SplitVector {
    /// Creates a split vector from separate real and imaginary sequences.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ShapeMismatch`] if the sequences differ in
    /// length.
    pub fn new(re: Vec<f32>, im: Vec<f32>) -> CoreResult<Self> {
        if re.len() != im.len() {
            return Err(CoreError::ShapeMismatch(format!(
                "real and imaginary lengths do not match ({} vs {})",
                re.len(),
                im.len()
            )));
        }
        Ok(Self { re, im })
    }

    /// Crate-internal constructor for halves produced by the kernels, which
    /// guarantee equal lengths.
    pub(crate) fn from_parts(re: Vec<f32>, im: Vec<f32>) -> Self {
        debug_assert_eq!(re.len(), im.len());
        Self { re, im }
    }

    /// Creates a split vector from a sequence of complex values.
    pub fn from_complex(values: &[Complex32]) -> Self {
        let mut v = Self::with_capacity(values.len());
        for &c in values {
            v.push(c);
        }
        v
    }

    /// Creates an empty split vector with room for `n` elements.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            re: Vec::with_capacity(n),
            im: Vec::with_capacity(n),
        }
    }

    /// Appends a complex value, extending both halves.
    pub fn push(&mut self, c: Complex32) {
        self.re.push(c.re);
        self.im.push(c.im);
    }

    /// Appends every element of `other`.
    pub fn extend(&mut self, other: &SplitVector) {
        self.re.extend_from_slice(&other.re);
        self.im.extend_from_slice(&other.im);
    }

    /// Element at `i`. Panics if out of range.
    pub fn get(&self, i: usize) -> Complex32 {
        Complex32::new(self.re[i], self.im[i])
    }

    /// Number of complex elements.
    pub fn len(&self) -> usize {
        self.re.len()
    }

    /// Whether the vector holds no elements.
    pub fn is_empty(&self) -> bool {
        self.re.is_empty()
    }

    /// The real half.
    pub fn re(&self) -> &[f32] {
        &self.re
    }

    /// The imaginary half.
    pub fn im(&self) -> &[f32] {
        &self.im
    }

    /// Recombines the halves into a sequence of complex values.
    pub fn to_complex(&self) -> Vec<Complex32> {
        (0..self.len()).map(|i| self.get(i)).collect()
    }

    /// Complex conjugate: a new vector with the imaginary half negated.
    ///
    /// The result owns both halves; it never aliases the source.
    pub fn conj(&self) -> SplitVector {
        let mut im = vec![0.0f32; self.im.len()];
        simd::vsmul(&self.im, -1.0, &mut im);
        Self {
            re: self.re.clone(),
            im,
        }
    }
}
