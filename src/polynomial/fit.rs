use crate::polynomial::eval::PointValues;
use crate::polynomial::series::PolyError;
use crate::polynomial::vander::polyvander;
use log::warn;
use nalgebra::DMatrix;
use ndarray::{Array1, ArrayD, IxDyn};

/// Diagnostic block of a least-squares fit: sum of squared residuals per
/// right-hand-side column, effective numerical rank of the scaled design
/// matrix, its singular values and the rank cutoff that was used.
#[derive(Debug, Clone)]
pub struct FitDiagnostics {
    pub residuals: Vec<f64>,
    pub rank: usize,
    pub singular_values: Vec<f64>,
    pub rcond: f64,
}

/// Weighted least-squares fit of a degree-`deg` polynomial to the points
/// `(x[i], y[i])`, coefficients returned from low to high degree.
///
/// `y` may be 1-D, or 2-D to fit several data sets sharing the `x`
/// coordinates in one call (one set per column); the coefficient output
/// mirrors `y`'s dimensionality. Optional weights `w` multiply both the
/// design-matrix rows and the targets. `rcond` defaults to
/// `x.len() * f64::EPSILON`; singular values below `rcond` times the largest
/// one are treated as zero by the solver.
///
/// When the effective rank comes out below `deg + 1` the fit is still
/// returned, with a `warn!`-level diagnostic; `full = true` suppresses the
/// warning and attaches [`FitDiagnostics`] instead.
pub fn polyfit(
    x: &Array1<f64>,
    y: &ArrayD<f64>,
    deg: usize,
    rcond: Option<f64>,
    full: bool,
    w: Option<&Array1<f64>>,
) -> Result<(ArrayD<f64>, Option<FitDiagnostics>), PolyError> {
    let order = deg + 1;
    let m = x.len();
    if m == 0 {
        return Err(PolyError::ShapeMismatch(
            "expected a non-empty vector for x".to_string(),
        ));
    }
    if y.ndim() < 1 || y.ndim() > 2 {
        return Err(PolyError::ShapeMismatch(
            "expected a 1D or 2D array for y".to_string(),
        ));
    }
    if y.shape()[0] != m {
        return Err(PolyError::ShapeMismatch(
            "expected x and y to have the same length".to_string(),
        ));
    }

    let van = polyvander(&PointValues::Array(x.clone().into_dyn()), deg);
    let ncols = if y.ndim() == 2 { y.shape()[1] } else { 1 };
    let mut lhs = DMatrix::<f64>::from_fn(m, order, |i, j| van[[i, j]]);
    let mut rhs = DMatrix::<f64>::from_fn(m, ncols, |i, j| {
        if y.ndim() == 2 { y[[i, j]] } else { y[[i]] }
    });

    if let Some(w) = w {
        if w.len() != m {
            return Err(PolyError::ShapeMismatch(
                "expected x and w to have the same length".to_string(),
            ));
        }
        for i in 0..m {
            lhs.row_mut(i).scale_mut(w[i]);
            rhs.row_mut(i).scale_mut(w[i]);
        }
    }

    let rcond = rcond.unwrap_or(m as f64 * f64::EPSILON);

    // scale the columns of the design matrix to unit norm before the solve
    let scl: Vec<f64> = (0..order).map(|j| lhs.column(j).norm()).collect();
    for (j, &s) in scl.iter().enumerate() {
        lhs.column_mut(j).scale_mut(1.0 / s);
    }

    let svd = lhs.clone().svd(true, true);
    let smax = svd.singular_values.iter().cloned().fold(0.0_f64, f64::max);
    let eps = rcond * smax;
    let rank = svd.rank(eps);
    let sol = svd
        .solve(&rhs, eps)
        .map_err(|e| PolyError::LinAlgFailed(e.to_string()))?;

    let fitted = &lhs * &sol;
    let residuals: Vec<f64> = (0..ncols)
        .map(|col| {
            (0..m)
                .map(|i| {
                    let r = fitted[(i, col)] - rhs[(i, col)];
                    r * r
                })
                .sum()
        })
        .collect();

    // undo the column scaling on the solution coefficients
    let mut coef = sol;
    for (j, &s) in scl.iter().enumerate() {
        coef.row_mut(j).scale_mut(1.0 / s);
    }

    if rank != order && !full {
        warn!(
            "The fit may be poorly conditioned: effective rank {} of the design matrix is below the requested order {}",
            rank, order
        );
    }

    let out = if y.ndim() == 2 {
        ArrayD::from_shape_fn(IxDyn(&[order, ncols]), |ix| coef[(ix[0], ix[1])])
    } else {
        ArrayD::from_shape_fn(IxDyn(&[order]), |ix| coef[(ix[0], 0)])
    };

    let diagnostics = if full {
        Some(FitDiagnostics {
            residuals,
            rank,
            singular_values: svd.singular_values.iter().cloned().collect(),
            rcond,
        })
    } else {
        None
    };
    Ok((out, diagnostics))
}
