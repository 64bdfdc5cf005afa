use crate::polynomial::series::{PolyError, Series, as_series, trim_vec};
use num_complex::Complex64;

fn gate2(c1: &Series, c2: &Series) -> (Series, Series) {
    let mut pair = as_series(&[c1, c2], true);
    let b = pair.pop().expect("gate returns two series");
    let a = pair.pop().expect("gate returns two series");
    (a, b)
}

fn gate1(c: &Series) -> Series {
    as_series(&[c], true)
        .pop()
        .expect("gate returns one series")
}

/// Full discrete convolution of two coefficient buffers.
fn convolve(a: &[Complex64], b: &[Complex64]) -> Vec<Complex64> {
    let mut out = vec![Complex64::ZERO; a.len() + b.len() - 1];
    for (i, &av) in a.iter().enumerate() {
        for (j, &bv) in b.iter().enumerate() {
            out[i + j] += av * bv;
        }
    }
    out
}

/// Add one polynomial to another, `c1 + c2`. The result is trimmed.
pub fn polyadd(c1: &Series, c2: &Series) -> Series {
    let (a, b) = gate2(c1, c2);
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut coeffs = long.coeffs().to_vec();
    for (i, &v) in short.coeffs().iter().enumerate() {
        coeffs[i] += v;
    }
    Series::from_parts(trim_vec(coeffs), long.is_complex())
}

/// Subtract one polynomial from another, `c1 - c2`. The result is trimmed
/// and satisfies `polysub(c1, c2) == -polysub(c2, c1)`.
pub fn polysub(c1: &Series, c2: &Series) -> Series {
    let (a, b) = gate2(c1, c2);
    let n = a.len().max(b.len());
    let mut coeffs = vec![Complex64::ZERO; n];
    for (i, slot) in coeffs.iter_mut().enumerate() {
        let av = if i < a.len() { a.get(i) } else { Complex64::ZERO };
        let bv = if i < b.len() { b.get(i) } else { Complex64::ZERO };
        *slot = av - bv;
    }
    Series::from_parts(trim_vec(coeffs), a.is_complex())
}

/// Multiply a polynomial by `x`, shifting every coefficient up one degree.
/// The zero series is a fixed point, otherwise a spurious leading zero would
/// appear.
pub fn polymulx(c: &Series) -> Series {
    let c = gate1(c);
    if c.len() == 1 && c.get(0) == Complex64::ZERO {
        return c;
    }
    let mut coeffs = Vec::with_capacity(c.len() + 1);
    coeffs.push(Complex64::ZERO);
    coeffs.extend_from_slice(c.coeffs());
    Series::from_parts(coeffs, c.is_complex())
}

/// Multiply one polynomial by another via convolution. For nonzero operands
/// the degree of the product is `deg(c1) + deg(c2)`.
pub fn polymul(c1: &Series, c2: &Series) -> Series {
    let (a, b) = gate2(c1, c2);
    let prd = convolve(a.coeffs(), b.coeffs());
    Series::from_parts(trim_vec(prd), a.is_complex())
}

/// Raise a polynomial to a non-negative integer power by repeated
/// convolution. `maxpower`, when given, bounds the exponent to keep the
/// coefficient array from growing without limit.
pub fn polypow(c: &Series, power: usize, maxpower: Option<usize>) -> Result<Series, PolyError> {
    let c = gate1(c);
    if let Some(maxpower) = maxpower {
        if power > maxpower {
            return Err(PolyError::PowerTooLarge { power, maxpower });
        }
    }
    match power {
        0 => Ok(Series::from_parts(vec![Complex64::ONE], c.is_complex())),
        1 => Ok(c),
        _ => {
            // TODO: switch to binary exponentiation for large powers
            let mut prd = c.coeffs().to_vec();
            for _ in 2..=power {
                prd = convolve(&prd, c.coeffs());
            }
            Ok(Series::from_parts(prd, c.is_complex()))
        }
    }
}

/// Synthetic division of `c1` by `c2`, returning `(quotient, remainder)`.
///
/// Fails if the trimmed divisor's leading coefficient is zero, i.e. the
/// divisor is the zero polynomial.
pub fn polydiv(c1: &Series, c2: &Series) -> Result<(Series, Series), PolyError> {
    let (a, b) = gate2(c1, c2);
    let len1 = a.len();
    let len2 = b.len();
    let scl = b.get(len2 - 1);
    if scl == Complex64::ZERO {
        return Err(PolyError::LeadingCoefficientZero);
    }
    if len2 == 1 {
        let quo: Vec<Complex64> = a.coeffs().iter().map(|&v| v / scl).collect();
        let rem = Series::from_parts(vec![Complex64::ZERO], a.is_complex());
        return Ok((Series::from_parts(quo, a.is_complex()), rem));
    }
    if len1 < len2 {
        let quo = Series::from_parts(vec![Complex64::ZERO], a.is_complex());
        return Ok((quo, a));
    }

    // long division from the top degree downward on a working copy
    let dlen = len1 - len2;
    let bn: Vec<Complex64> = b.coeffs()[..len2 - 1].iter().map(|&v| v / scl).collect();
    let mut work = a.coeffs().to_vec();
    for i in (0..=dlen).rev() {
        let lead = work[i + len2 - 1];
        for (t, &bv) in bn.iter().enumerate() {
            work[i + t] -= bv * lead;
        }
    }
    let quo: Vec<Complex64> = work[len2 - 1..].iter().map(|&v| v / scl).collect();
    let rem = trim_vec(work[..len2 - 1].to_vec());
    Ok((
        Series::from_parts(quo, a.is_complex()),
        Series::from_parts(rem, a.is_complex()),
    ))
}

/// Coefficients of the straight line `off + scl*x`.
pub fn polyline(off: f64, scl: f64) -> Series {
    if scl != 0.0 {
        Series::new(&[off, scl]).expect("two elements")
    } else {
        Series::new(&[off]).expect("one element")
    }
}

fn fromroots_impl(roots: &[Complex64], complex: bool) -> Series {
    if roots.is_empty() {
        return Series::from_parts(vec![Complex64::ONE], complex);
    }
    let mut prd = Series::from_parts(vec![Complex64::ONE], complex);
    for &r in roots {
        prd = polysub(&polymulx(&prd), &prd.scale(r));
    }
    prd
}

/// Monic polynomial with the given real roots; multiple roots must be
/// repeated according to their multiplicity.
pub fn polyfromroots(roots: &[f64]) -> Series {
    let roots: Vec<Complex64> = roots.iter().map(|&r| Complex64::new(r, 0.0)).collect();
    fromroots_impl(&roots, false)
}

/// Monic polynomial with the given complex roots. The result is
/// complex-tagged even when every coefficient happens to be real.
pub fn polyfromroots_cplx(roots: &[Complex64]) -> Series {
    fromroots_impl(roots, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polynomial::series::trimseq;
    use approx::assert_relative_eq;

    fn s(c: &[f64]) -> Series {
        Series::new(c).unwrap()
    }

    #[test]
    fn test_polyadd_polysub_roundtrip() {
        let c1 = s(&[1.0, 2.0, 3.0]);
        let c2 = s(&[3.0, 2.0, 1.0]);
        let sum = polyadd(&c1, &c2);
        assert_eq!(sum.real().unwrap(), vec![4.0, 4.0, 4.0]);
        let back = polysub(&sum, &c2);
        assert_eq!(back.real().unwrap(), trimseq(&c1).real().unwrap());
    }

    #[test]
    fn test_polysub_antisymmetry() {
        let c1 = s(&[1.0, 2.0, 3.0]);
        let c2 = s(&[3.0, 2.0, 1.0]);
        let d12 = polysub(&c1, &c2).real().unwrap();
        let d21 = polysub(&c2, &c1).real().unwrap();
        assert_eq!(d12, vec![-2.0, 0.0, 2.0]);
        assert_eq!(d12.iter().map(|v| -v).collect::<Vec<_>>(), d21);
    }

    #[test]
    fn test_polyadd_different_lengths() {
        let c1 = s(&[1.0]);
        let c2 = s(&[0.0, 1.0, 2.0]);
        assert_eq!(polyadd(&c1, &c2).real().unwrap(), vec![1.0, 1.0, 2.0]);
        // cancellation of the top term trims the result
        let c3 = s(&[0.0, 0.0, -2.0]);
        assert_eq!(polyadd(&c2, &c3).real().unwrap(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_polymulx() {
        assert_eq!(polymulx(&s(&[1.0, 2.0])).real().unwrap(), vec![0.0, 1.0, 2.0]);
        // the zero series is a fixed point
        assert_eq!(polymulx(&Series::zero()).real().unwrap(), vec![0.0]);
    }

    #[test]
    fn test_polymul() {
        let c1 = s(&[1.0, 2.0, 3.0]);
        let c2 = s(&[3.0, 2.0, 1.0]);
        assert_eq!(
            polymul(&c1, &c2).real().unwrap(),
            vec![3.0, 8.0, 14.0, 8.0, 3.0]
        );
        // degree law
        assert_eq!(
            polymul(&c1, &c2).degree(),
            trimseq(&c1).degree() + trimseq(&c2).degree()
        );
        // zero absorbs
        assert_eq!(polymul(&c1, &Series::zero()).real().unwrap(), vec![0.0]);
    }

    #[test]
    fn test_polydiv_worked_example() {
        let c1 = s(&[3.0, 2.0, 1.0]);
        let c2 = s(&[1.0, 2.0, 3.0]);
        let (quo, rem) = polydiv(&c1, &c2).unwrap();
        let q = quo.real().unwrap();
        let r = rem.real().unwrap();
        assert_eq!(q.len(), 1);
        assert_relative_eq!(q[0], 1.0 / 3.0);
        assert_eq!(r.len(), 2);
        assert_relative_eq!(r[0], 8.0 / 3.0);
        assert_relative_eq!(r[1], 4.0 / 3.0);
    }

    #[test]
    fn test_polydiv_reconstruction_identity() {
        let c1 = s(&[1.0, -4.0, 2.0, 5.0, 0.5]);
        let c2 = s(&[2.0, 1.0, 3.0]);
        let (quo, rem) = polydiv(&c1, &c2).unwrap();
        let recon = polyadd(&polymul(&quo, &c2), &rem);
        for (a, b) in recon
            .real()
            .unwrap()
            .iter()
            .zip(c1.real().unwrap().iter())
        {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_polydiv_special_cases() {
        // constant divisor
        let (quo, rem) = polydiv(&s(&[2.0, 4.0]), &s(&[2.0])).unwrap();
        assert_eq!(quo.real().unwrap(), vec![1.0, 2.0]);
        assert_eq!(rem.real().unwrap(), vec![0.0]);
        // dividend of lower degree than the divisor
        let (quo, rem) = polydiv(&s(&[1.0, 2.0]), &s(&[1.0, 0.0, 1.0])).unwrap();
        assert_eq!(quo.real().unwrap(), vec![0.0]);
        assert_eq!(rem.real().unwrap(), vec![1.0, 2.0]);
        // division by the zero polynomial
        assert_eq!(
            polydiv(&s(&[1.0, 2.0]), &Series::zero()),
            Err(PolyError::LeadingCoefficientZero)
        );
        // trailing zeros of the divisor trim down to the zero polynomial too
        assert_eq!(
            polydiv(&s(&[1.0, 2.0]), &s(&[0.0, 0.0])),
            Err(PolyError::LeadingCoefficientZero)
        );
    }

    #[test]
    fn test_polypow() {
        let c = s(&[1.0, 2.0, 3.0]);
        assert_eq!(polypow(&c, 0, None).unwrap().real().unwrap(), vec![1.0]);
        assert_eq!(
            polypow(&c, 1, None).unwrap().real().unwrap(),
            c.real().unwrap()
        );
        assert_eq!(
            polypow(&c, 2, None).unwrap().real().unwrap(),
            polymul(&c, &c).real().unwrap()
        );
        assert_eq!(
            polypow(&c, 5, Some(4)),
            Err(PolyError::PowerTooLarge {
                power: 5,
                maxpower: 4
            })
        );
    }

    #[test]
    fn test_polyline() {
        assert_eq!(polyline(1.0, -1.0).real().unwrap(), vec![1.0, -1.0]);
        assert_eq!(polyline(3.0, 0.0).real().unwrap(), vec![3.0]);
        assert_relative_eq!(
            polyline(1.0, -1.0).eval(Complex64::new(1.0, 0.0)).re,
            0.0
        );
    }

    #[test]
    fn test_polyfromroots() {
        // x(x - 1)(x + 1) = x^3 - x
        let c = polyfromroots(&[-1.0, 0.0, 1.0]);
        assert!(!c.is_complex());
        assert_eq!(c.real().unwrap(), vec![0.0, -1.0, 0.0, 1.0]);
        // no roots gives the constant one
        assert_eq!(polyfromroots(&[]).real().unwrap(), vec![1.0]);
        // (x - i)(x + i) = x^2 + 1, complex-tagged though real-valued
        let j = Complex64::new(0.0, 1.0);
        let c = polyfromroots_cplx(&[-j, j]);
        assert!(c.is_complex());
        let coeffs = c.coeffs();
        assert_relative_eq!(coeffs[0].re, 1.0);
        assert_relative_eq!(coeffs[0].im, 0.0);
        assert_relative_eq!(coeffs[1].norm(), 0.0);
        assert_relative_eq!(coeffs[2].re, 1.0);
    }
}
