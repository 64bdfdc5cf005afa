use crate::polynomial::series::{PolyError, Series, as_series};
use nalgebra::DMatrix;
use num_complex::Complex64;
use std::cmp::Ordering;

/// Roots of a polynomial, tagged with their numeric kind: `Real` when the
/// input series was real-tagged and every eigenvalue came out with an exactly
/// zero imaginary part, `Complex` otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum RootSet {
    Real(Vec<f64>),
    Complex(Vec<Complex64>),
}

impl RootSet {
    pub fn is_real(&self) -> bool {
        matches!(self, RootSet::Real(_))
    }

    pub fn len(&self) -> usize {
        match self {
            RootSet::Real(r) => r.len(),
            RootSet::Complex(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All roots as complex numbers regardless of the tag.
    pub fn to_complex_vec(&self) -> Vec<Complex64> {
        match self {
            RootSet::Real(r) => r.iter().map(|&v| Complex64::new(v, 0.0)).collect(),
            RootSet::Complex(r) => r.clone(),
        }
    }
}

fn sort_ascending(roots: &mut [Complex64]) {
    roots.sort_by(|a, b| {
        (a.re, a.im)
            .partial_cmp(&(b.re, b.im))
            .unwrap_or(Ordering::Equal)
    });
}

fn tagged(real_input: bool, mut roots: Vec<Complex64>) -> RootSet {
    sort_ascending(&mut roots);
    if real_input && roots.iter().all(|r| r.im == 0.0) {
        RootSet::Real(roots.iter().map(|r| r.re).collect())
    } else {
        RootSet::Complex(roots)
    }
}

/// Compute the roots of a polynomial as the eigenvalues of its companion
/// matrix (first-companion form: ones on the subdiagonal, normalized negated
/// coefficients in the last column), sorted ascending by real part and then
/// by imaginary part.
///
/// A constant polynomial has no roots; the linear case is solved directly.
pub fn polyroots(cs: &Series) -> Result<RootSet, PolyError> {
    let cs = as_series(&[cs], true)
        .pop()
        .expect("gate returns one series");
    let real_input = !cs.is_complex();
    if cs.len() <= 1 {
        return Ok(if real_input {
            RootSet::Real(vec![])
        } else {
            RootSet::Complex(vec![])
        });
    }
    if cs.len() == 2 {
        let r = -cs.get(0) / cs.get(1);
        return Ok(tagged(real_input, vec![r]));
    }

    let n = cs.len() - 1;
    let lead = cs.get(n);
    let eigenvalues: Vec<Complex64> = if real_input {
        let mut cmat = DMatrix::<f64>::zeros(n, n);
        for i in 1..n {
            cmat[(i, i - 1)] = 1.0;
        }
        for i in 0..n {
            cmat[(i, n - 1)] -= (cs.get(i) / lead).re;
        }
        cmat.complex_eigenvalues().iter().copied().collect()
    } else {
        let mut cmat = DMatrix::<Complex64>::zeros(n, n);
        for i in 1..n {
            cmat[(i, i - 1)] = Complex64::ONE;
        }
        for i in 0..n {
            cmat[(i, n - 1)] -= cs.get(i) / lead;
        }
        cmat.eigenvalues()
            .ok_or_else(|| {
                PolyError::LinAlgFailed(
                    "eigenvalue computation of the companion matrix did not converge".to_string(),
                )
            })?
            .iter()
            .copied()
            .collect()
    };
    Ok(tagged(real_input, eigenvalues))
}
