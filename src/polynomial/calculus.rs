use crate::polynomial::eval::{PointValues, polyval};
use crate::polynomial::series::{PolyError, PolyNum};
use ndarray::{ArrayD, Axis, IxDyn, Zip};

/// Move `axis` to the front so the per-degree loops can work on axis 0.
fn roll_axis_front<T: PolyNum>(c: &ArrayD<T>, axis: usize) -> ArrayD<T> {
    let mut perm: Vec<usize> = Vec::with_capacity(c.ndim());
    perm.push(axis);
    perm.extend((0..c.ndim()).filter(|&k| k != axis));
    c.view().permuted_axes(IxDyn(&perm)).to_owned()
}

/// Inverse of [`roll_axis_front`]: put axis 0 back at position `axis`.
fn roll_axis_back<T: PolyNum>(c: ArrayD<T>, axis: usize) -> ArrayD<T> {
    let mut perm: Vec<usize> = Vec::with_capacity(c.ndim());
    for k in 0..c.ndim() {
        if k < axis {
            perm.push(k + 1);
        } else if k == axis {
            perm.push(0);
        } else {
            perm.push(k);
        }
    }
    c.view().permuted_axes(IxDyn(&perm)).to_owned()
}

fn check_axis<T: PolyNum>(c: &ArrayD<T>, axis: usize) -> Result<(), PolyError> {
    if axis >= c.ndim() {
        return Err(PolyError::AxisOutOfRange {
            axis,
            ndim: c.ndim(),
        });
    }
    Ok(())
}

/// Differentiate `m` times along `axis` of a (possibly multidimensional)
/// coefficient array, multiplying by `scl` at each iteration; the net effect
/// is multiplication by `scl^m`, which serves a linear change of variable.
///
/// `m = 0` returns the input unchanged. When `m` reaches or exceeds the
/// length along `axis` the result collapses to a single zero slice.
pub fn polyder<T: PolyNum>(
    c: &ArrayD<T>,
    m: usize,
    scl: T,
    axis: usize,
) -> Result<ArrayD<T>, PolyError> {
    check_axis(c, axis)?;
    if m == 0 {
        return Ok(c.clone());
    }

    let mut work = roll_axis_front(c, axis);
    let mut n = work.len_of(Axis(0));
    if m >= n {
        let mut shape = work.shape().to_vec();
        shape[0] = 1;
        work = ArrayD::zeros(IxDyn(&shape));
    } else {
        for _ in 0..m {
            n -= 1;
            work.mapv_inplace(|v| v * scl);
            let mut shape = work.shape().to_vec();
            shape[0] = n;
            let mut der = ArrayD::<T>::zeros(IxDyn(&shape));
            // power rule: new[j-1] = j * old[j]
            for j in (1..=n).rev() {
                let jn = T::from_usize(j);
                Zip::from(&mut der.index_axis_mut(Axis(0), j - 1))
                    .and(&work.index_axis(Axis(0), j))
                    .for_each(|d, &s| *d = jn * s);
            }
            work = der;
        }
    }
    Ok(roll_axis_back(work, axis))
}

/// Integrate `m` times along `axis`. At each iteration the series is
/// multiplied by `scl` (the reciprocal scaling of a linear change of
/// variable), shifted up one degree with division by the new exponent, and
/// its constant term fixed so the antiderivative takes the value `k[i]` at
/// `lbnd`. Missing constants are taken as zero; more constants than
/// integrations is an error.
pub fn polyint<T: PolyNum>(
    c: &ArrayD<T>,
    m: usize,
    k: &[T],
    lbnd: T,
    scl: T,
    axis: usize,
) -> Result<ArrayD<T>, PolyError> {
    check_axis(c, axis)?;
    if c.len_of(Axis(axis)) == 0 {
        return Err(PolyError::EmptySeries);
    }
    if k.len() > m {
        return Err(PolyError::TooManyConstants {
            given: k.len(),
            order: m,
        });
    }
    if m == 0 {
        return Ok(c.clone());
    }

    let mut k = k.to_vec();
    k.resize(m, T::zero());
    let mut work = roll_axis_front(c, axis);
    for &ki in k.iter().take(m) {
        let n = work.len_of(Axis(0));
        work.mapv_inplace(|v| v * scl);
        let pure_zero_constant =
            n == 1 && work.index_axis(Axis(0), 0).iter().all(|&v| v == T::zero());
        if pure_zero_constant {
            // nothing to shift, just inject the constant
            work.index_axis_mut(Axis(0), 0).mapv_inplace(|v| v + ki);
        } else {
            let mut shape = work.shape().to_vec();
            shape[0] = n + 1;
            let mut tmp = ArrayD::<T>::zeros(IxDyn(&shape));
            tmp.index_axis_mut(Axis(0), 1)
                .assign(&work.index_axis(Axis(0), 0));
            for j in 1..n {
                let div = T::from_usize(j + 1);
                Zip::from(&mut tmp.index_axis_mut(Axis(0), j + 1))
                    .and(&work.index_axis(Axis(0), j))
                    .for_each(|d, &s| *d = s / div);
            }
            // constant term such that the result evaluates to k[i] at lbnd
            let at_lbnd = polyval(&PointValues::Scalar(lbnd), &tmp, true)?;
            Zip::from(&mut tmp.index_axis_mut(Axis(0), 0))
                .and(&at_lbnd)
                .for_each(|d, &e| *d = *d + ki - e);
            work = tmp;
        }
    }
    Ok(roll_axis_back(work, axis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{arr1, arr2};

    fn c1d(v: &[f64]) -> ArrayD<f64> {
        arr1(v).into_dyn()
    }

    fn assert_1d_eq(a: &ArrayD<f64>, expected: &[f64]) {
        assert_eq!(a.shape(), &[expected.len()]);
        for (got, want) in a.iter().zip(expected.iter()) {
            assert_relative_eq!(*got, *want, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_polyder_basic() {
        let c = c1d(&[1.0, 2.0, 3.0, 4.0]);
        assert_1d_eq(&polyder(&c, 1, 1.0, 0).unwrap(), &[2.0, 6.0, 12.0]);
        assert_1d_eq(&polyder(&c, 3, 1.0, 0).unwrap(), &[24.0]);
        assert_1d_eq(&polyder(&c, 1, -1.0, 0).unwrap(), &[-2.0, -6.0, -12.0]);
        assert_1d_eq(&polyder(&c, 2, -1.0, 0).unwrap(), &[6.0, 24.0]);
    }

    #[test]
    fn test_polyder_degenerate() {
        let c = c1d(&[1.0, 2.0, 3.0]);
        // zero-order derivative is the identity
        assert_1d_eq(&polyder(&c, 0, 1.0, 0).unwrap(), &[1.0, 2.0, 3.0]);
        // differentiating past the degree collapses to a single zero
        assert_1d_eq(&polyder(&c, 3, 1.0, 0).unwrap(), &[0.0]);
        assert_1d_eq(&polyder(&c, 10, 1.0, 0).unwrap(), &[0.0]);
        assert_eq!(
            polyder(&c, 1, 1.0, 1),
            Err(PolyError::AxisOutOfRange { axis: 1, ndim: 1 })
        );
    }

    #[test]
    fn test_polyder_axes() {
        // c[i][j] x^i y^j for 1 + 2y + 3x + 4xy
        let c = arr2(&[[1.0, 2.0], [3.0, 4.0]]).into_dyn();
        let dx = polyder(&c, 1, 1.0, 0).unwrap();
        assert_eq!(dx.shape(), &[1, 2]);
        assert_relative_eq!(dx[[0, 0]], 3.0);
        assert_relative_eq!(dx[[0, 1]], 4.0);
        let dy = polyder(&c, 1, 1.0, 1).unwrap();
        assert_eq!(dy.shape(), &[2, 1]);
        assert_relative_eq!(dy[[0, 0]], 2.0);
        assert_relative_eq!(dy[[1, 0]], 4.0);
    }

    #[test]
    fn test_polyint_basic() {
        let c = c1d(&[1.0, 2.0, 3.0]);
        assert_1d_eq(&polyint(&c, 1, &[], 0.0, 1.0, 0).unwrap(), &[0.0, 1.0, 1.0, 1.0]);
        assert_1d_eq(
            &polyint(&c, 3, &[], 0.0, 1.0, 0).unwrap(),
            &[0.0, 0.0, 0.0, 1.0 / 6.0, 1.0 / 12.0, 1.0 / 20.0],
        );
        assert_1d_eq(&polyint(&c, 1, &[3.0], 0.0, 1.0, 0).unwrap(), &[3.0, 1.0, 1.0, 1.0]);
        assert_1d_eq(&polyint(&c, 1, &[], -2.0, 1.0, 0).unwrap(), &[6.0, 1.0, 1.0, 1.0]);
        assert_1d_eq(&polyint(&c, 1, &[], 0.0, -2.0, 0).unwrap(), &[0.0, -2.0, -2.0, -2.0]);
    }

    #[test]
    fn test_polyint_errors_and_identity() {
        let c = c1d(&[1.0, 2.0, 3.0]);
        assert_eq!(
            polyint(&c, 1, &[1.0, 2.0], 0.0, 1.0, 0),
            Err(PolyError::TooManyConstants { given: 2, order: 1 })
        );
        assert_1d_eq(&polyint(&c, 0, &[], 0.0, 1.0, 0).unwrap(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_polyint_empty_coefficient_axis() {
        let e = ArrayD::<f64>::zeros(IxDyn(&[0]));
        assert_eq!(
            polyint(&e, 1, &[], 0.0, 1.0, 0),
            Err(PolyError::EmptySeries)
        );
        let e2 = ArrayD::<f64>::zeros(IxDyn(&[2, 0]));
        assert_eq!(
            polyint(&e2, 1, &[], 0.0, 1.0, 1),
            Err(PolyError::EmptySeries)
        );
    }

    #[test]
    fn test_polyint_pure_constant_zero() {
        // integrating the zero constant just injects k, no degree shift
        let z = c1d(&[0.0]);
        assert_1d_eq(&polyint(&z, 1, &[5.0], 0.0, 1.0, 0).unwrap(), &[5.0]);
        let v = polyint(&z, 2, &[1.0, 2.0], 0.0, 1.0, 0).unwrap();
        // first pass injects 1, second integrates it and adds 2
        assert_1d_eq(&v, &[2.0, 1.0]);
    }

    #[test]
    fn test_der_int_roundtrip() {
        let c = c1d(&[1.5, -2.0, 3.0, 0.25]);
        for m in 1..4 {
            let int = polyint(&c, m, &[], 0.0, 1.0, 0).unwrap();
            let back = polyder(&int, m, 1.0, 0).unwrap();
            assert_1d_eq(&back, &[1.5, -2.0, 3.0, 0.25]);
        }
        // matching scl and inverse scl cancel
        let int = polyint(&c, 1, &[], 0.0, 0.5, 0).unwrap();
        let back = polyder(&int, 1, 2.0, 0).unwrap();
        assert_1d_eq(&back, &[1.5, -2.0, 3.0, 0.25]);
    }

    #[test]
    fn test_int_der_recovers_nonconstant_part() {
        let c = c1d(&[1.0, 2.0, 3.0]);
        let der = polyder(&c, 1, 1.0, 0).unwrap();
        let back = polyint(&der, 1, &[], 0.0, 1.0, 0).unwrap();
        assert_1d_eq(&back, &[0.0, 2.0, 3.0]);
    }

    #[test]
    fn test_polyint_axis1() {
        let c = arr2(&[[1.0, 2.0], [3.0, 4.0]]).into_dyn();
        let iy = polyint(&c, 1, &[], 0.0, 1.0, 1).unwrap();
        assert_eq!(iy.shape(), &[2, 3]);
        // each row integrates as a series in y
        assert_relative_eq!(iy[[0, 0]], 0.0);
        assert_relative_eq!(iy[[0, 1]], 1.0);
        assert_relative_eq!(iy[[0, 2]], 1.0);
        assert_relative_eq!(iy[[1, 1]], 3.0);
        assert_relative_eq!(iy[[1, 2]], 2.0);
    }
}
