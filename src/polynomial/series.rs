use ndarray::{ArrayD, IxDyn, ScalarOperand};
use num_complex::Complex64;
use num_traits::Num;
use std::fmt;
use std::ops::Neg;

/// Error types for the polynomial core
#[derive(Debug, Clone, PartialEq)]
pub enum PolyError {
    /// a coefficient series must contain at least one element
    EmptySeries,
    /// a real value was requested from a complex-tagged series
    ComplexValued,
    AxisOutOfRange { axis: usize, ndim: usize },
    ShapeMismatch(String),
    TooManyConstants { given: usize, order: usize },
    PowerTooLarge { power: usize, maxpower: usize },
    NegativeTolerance(f64),
    /// division by a polynomial whose leading coefficient is zero
    LeadingCoefficientZero,
    LinAlgFailed(String),
}

impl fmt::Display for PolyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PolyError::EmptySeries => write!(f, "Coefficient series must be non-empty"),
            PolyError::ComplexValued => {
                write!(f, "Series is complex-valued, real coefficients requested")
            }
            PolyError::AxisOutOfRange { axis, ndim } => {
                write!(f, "Axis {} is out of range for array of dimension {}", axis, ndim)
            }
            PolyError::ShapeMismatch(msg) => write!(f, "Shape mismatch: {}", msg),
            PolyError::TooManyConstants { given, order } => write!(
                f,
                "Too many integration constants: got {} for integration order {}",
                given, order
            ),
            PolyError::PowerTooLarge { power, maxpower } => {
                write!(f, "Power {} is too large, maximum allowed is {}", power, maxpower)
            }
            PolyError::NegativeTolerance(tol) => {
                write!(f, "Tolerance must be non-negative, got {}", tol)
            }
            PolyError::LeadingCoefficientZero => {
                write!(f, "Division by a polynomial with zero leading coefficient")
            }
            PolyError::LinAlgFailed(msg) => write!(f, "Linear algebra failure: {}", msg),
        }
    }
}

impl std::error::Error for PolyError {}

/// Scalar numbers the multidimensional routines (calculus, evaluation,
/// Vandermonde) are generic over. Implemented for `f64` and `Complex64`.
pub trait PolyNum:
    Num + Neg<Output = Self> + Copy + PartialEq + fmt::Debug + ScalarOperand + 'static
{
    fn from_usize(n: usize) -> Self;
    fn from_f64(v: f64) -> Self;
    /// Modulus of the number, used for tolerance-based trimming.
    fn modulus(self) -> f64;
}

impl PolyNum for f64 {
    fn from_usize(n: usize) -> Self {
        n as f64
    }
    fn from_f64(v: f64) -> Self {
        v
    }
    fn modulus(self) -> f64 {
        self.abs()
    }
}

impl PolyNum for Complex64 {
    fn from_usize(n: usize) -> Self {
        Complex64::new(n as f64, 0.0)
    }
    fn from_f64(v: f64) -> Self {
        Complex64::new(v, 0.0)
    }
    fn modulus(self) -> f64 {
        self.norm()
    }
}

/// Dense coefficient series of a univariate polynomial, ordered from the
/// lowest degree term to the highest: `[1, 2, 3]` is `1 + 2x + 3x^2`.
///
/// The raw buffer always holds `Complex64` values; the `complex` flag tags
/// the numeric kind of the series. A real-tagged series has identically zero
/// imaginary parts, which every operation of this module preserves. The flag
/// is promoted at the canonicalization gate [`as_series`]: mixing a real and
/// a complex operand yields complex-tagged results.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    coeffs: Vec<Complex64>,
    complex: bool,
}

impl Series {
    /// Create a real-tagged series from raw coefficients, low degree first.
    pub fn new(coeffs: &[f64]) -> Result<Self, PolyError> {
        if coeffs.is_empty() {
            return Err(PolyError::EmptySeries);
        }
        Ok(Series {
            coeffs: coeffs.iter().map(|&c| Complex64::new(c, 0.0)).collect(),
            complex: false,
        })
    }

    /// Create a complex-tagged series from raw coefficients, low degree first.
    pub fn from_complex(coeffs: &[Complex64]) -> Result<Self, PolyError> {
        if coeffs.is_empty() {
            return Err(PolyError::EmptySeries);
        }
        Ok(Series {
            coeffs: coeffs.to_vec(),
            complex: true,
        })
    }

    pub(crate) fn from_parts(coeffs: Vec<Complex64>, complex: bool) -> Self {
        debug_assert!(!coeffs.is_empty());
        Series { coeffs, complex }
    }

    /// The zero polynomial `[0]`.
    pub fn zero() -> Self {
        Series::from_parts(vec![Complex64::ZERO], false)
    }

    /// The multiplicative identity `[1]`.
    pub fn one() -> Self {
        Series::from_parts(vec![Complex64::ONE], false)
    }

    /// The identity map `f(x) = x`, i.e. `[0, 1]`.
    pub fn x() -> Self {
        Series::from_parts(vec![Complex64::ZERO, Complex64::ONE], false)
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// Always `false`: construction rejects empty coefficient buffers, so a
    /// series holds at least one coefficient.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Degree of the polynomial as stored (no implicit trimming).
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    pub fn is_complex(&self) -> bool {
        self.complex
    }

    pub fn coeffs(&self) -> &[Complex64] {
        &self.coeffs
    }

    pub fn get(&self, i: usize) -> Complex64 {
        self.coeffs[i]
    }

    /// Real coefficient buffer; fails on a complex-tagged series.
    pub fn real(&self) -> Result<Vec<f64>, PolyError> {
        if self.complex {
            return Err(PolyError::ComplexValued);
        }
        Ok(self.coeffs.iter().map(|c| c.re).collect())
    }

    /// Copy of this series with the complex tag set.
    pub fn to_complex(&self) -> Series {
        Series {
            coeffs: self.coeffs.clone(),
            complex: true,
        }
    }

    /// 1-D `ndarray` view of the coefficients for the axis-based routines.
    pub fn to_complex_array(&self) -> ArrayD<Complex64> {
        ArrayD::from_shape_vec(IxDyn(&[self.coeffs.len()]), self.coeffs.clone())
            .expect("1-D shape always matches the buffer length")
    }

    /// 1-D real `ndarray` of the coefficients; fails on a complex tag.
    pub fn to_real_array(&self) -> Result<ArrayD<f64>, PolyError> {
        let re = self.real()?;
        Ok(ArrayD::from_shape_vec(IxDyn(&[re.len()]), re)
            .expect("1-D shape always matches the buffer length"))
    }

    /// Multiply every coefficient by a scalar. The tag picks up the scalar's
    /// numeric kind.
    pub fn scale(&self, s: Complex64) -> Series {
        Series {
            coeffs: self.coeffs.iter().map(|&c| c * s).collect(),
            complex: self.complex || s.im != 0.0,
        }
    }

    /// Evaluate at a scalar point with Horner's method.
    pub fn eval(&self, x: Complex64) -> Complex64 {
        let mut acc = *self.coeffs.last().expect("series is non-empty");
        for &c in self.coeffs.iter().rev().skip(1) {
            acc = c + acc * x;
        }
        acc
    }

    /// Canonical form with trailing zeros removed, see [`trimseq`].
    pub fn trim(&self) -> Series {
        trimseq(self)
    }
}

pub(crate) fn trim_vec(mut coeffs: Vec<Complex64>) -> Vec<Complex64> {
    while coeffs.len() > 1 && *coeffs.last().expect("non-empty") == Complex64::ZERO {
        coeffs.pop();
    }
    coeffs
}

/// Remove trailing exactly-zero coefficients, keeping at least one element.
/// The all-zero series trims to the single-element zero polynomial.
pub fn trimseq(seq: &Series) -> Series {
    Series {
        coeffs: trim_vec(seq.coeffs.clone()),
        complex: seq.complex,
    }
}

/// Remove trailing coefficients whose modulus does not exceed `tol`. With
/// `tol = 0` this is [`trimseq`]; a negative tolerance is rejected.
pub fn trimcoef(c: &Series, tol: f64) -> Result<Series, PolyError> {
    if tol < 0.0 {
        return Err(PolyError::NegativeTolerance(tol));
    }
    let last = c.coeffs.iter().rposition(|v| v.norm() > tol);
    let coeffs = match last {
        Some(ind) => c.coeffs[..=ind].to_vec(),
        None => vec![Complex64::ZERO],
    };
    Ok(Series {
        coeffs,
        complex: c.complex,
    })
}

/// Canonicalization gate shared by the arithmetic and root-finding routines:
/// promote all operands to a common numeric kind and optionally trim each.
/// Emptiness and 1-dimensionality are enforced by `Series` construction, so
/// the gate itself cannot fail.
pub fn as_series(list: &[&Series], trim: bool) -> Vec<Series> {
    let any_complex = list.iter().any(|s| s.complex);
    list.iter()
        .map(|s| {
            let s = if trim { s.trim() } else { (*s).clone() };
            Series {
                complex: s.complex || any_complex,
                ..s
            }
        })
        .collect()
}
