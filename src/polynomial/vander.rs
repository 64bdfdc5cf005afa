use crate::polynomial::eval::PointValues;
use crate::polynomial::series::{PolyError, PolyNum};
use itertools::iproduct;
use ndarray::{ArrayD, Axis, IxDyn, Zip};

/// Vandermonde matrix of the power basis: shape `x.shape + (deg + 1,)` with
/// `v[..., i] = x^i`. Scalar points are promoted to a length-1 vector. The
/// powers are built up iteratively, each one from the previous, instead of by
/// repeated exponentiation.
pub fn polyvander<T: PolyNum>(x: &PointValues<T>, deg: usize) -> ArrayD<T> {
    let xa = x.to_array_min1();
    let xs = xa.shape().to_vec();
    let mut shape = xs.clone();
    shape.push(deg + 1);
    let mut v = ArrayD::<T>::zeros(IxDyn(&shape));
    let last = Axis(v.ndim() - 1);
    let mut pow = ArrayD::<T>::from_elem(IxDyn(&xs), T::one());
    for i in 0..=deg {
        v.index_axis_mut(last, i).assign(&pow);
        if i < deg {
            Zip::from(&mut pow).and(&xa).for_each(|p, &xv| *p = *p * xv);
        }
    }
    v
}

fn check_same_shape<T: PolyNum>(points: &[&PointValues<T>]) -> Result<(), PolyError> {
    let first = points[0].shape();
    if points.iter().any(|p| p.shape() != first) {
        return Err(PolyError::ShapeMismatch(format!(
            "sample point arrays must share one shape, got {:?}",
            points.iter().map(|p| p.shape()).collect::<Vec<_>>()
        )));
    }
    Ok(())
}

/// Pseudo Vandermonde matrix of the 2D power basis, shape
/// `x.shape + (order,)` with `order = (degx + 1) * (degy + 1)`. The trailing
/// per-axis degree axes are flattened so entry `[..., i*(degy+1) + j]` is
/// `x^i * y^j`, the layout a least-squares design matrix wants and the one a
/// flattened 2D coefficient array evaluates against.
pub fn polyvander2d<T: PolyNum>(
    x: &PointValues<T>,
    y: &PointValues<T>,
    deg: [usize; 2],
) -> Result<ArrayD<T>, PolyError> {
    check_same_shape(&[x, y])?;
    let [degx, degy] = deg;
    let vx = polyvander(x, degx);
    let vy = polyvander(y, degy);

    let point_shape = &vx.shape()[..vx.ndim() - 1];
    let mut shape = point_shape.to_vec();
    shape.push((degx + 1) * (degy + 1));
    let mut v = ArrayD::<T>::zeros(IxDyn(&shape));
    let last = Axis(v.ndim() - 1);
    let dlast = Axis(vx.ndim() - 1);
    for (flat, (i, j)) in iproduct!(0..=degx, 0..=degy).enumerate() {
        Zip::from(&mut v.index_axis_mut(last, flat))
            .and(&vx.index_axis(dlast, i))
            .and(&vy.index_axis(dlast, j))
            .for_each(|o, &a, &b| *o = a * b);
    }
    Ok(v)
}

/// Pseudo Vandermonde matrix of the 3D power basis, shape
/// `x.shape + (order,)` with `order = (degx+1)*(degy+1)*(degz+1)` and entry
/// `[..., (i*(degy+1) + j)*(degz+1) + k] = x^i * y^j * z^k`.
pub fn polyvander3d<T: PolyNum>(
    x: &PointValues<T>,
    y: &PointValues<T>,
    z: &PointValues<T>,
    deg: [usize; 3],
) -> Result<ArrayD<T>, PolyError> {
    check_same_shape(&[x, y, z])?;
    let [degx, degy, degz] = deg;
    let vx = polyvander(x, degx);
    let vy = polyvander(y, degy);
    let vz = polyvander(z, degz);

    let point_shape = &vx.shape()[..vx.ndim() - 1];
    let mut shape = point_shape.to_vec();
    shape.push((degx + 1) * (degy + 1) * (degz + 1));
    let mut v = ArrayD::<T>::zeros(IxDyn(&shape));
    let last = Axis(v.ndim() - 1);
    let dlast = Axis(vx.ndim() - 1);
    for (flat, (i, j, k)) in iproduct!(0..=degx, 0..=degy, 0..=degz).enumerate() {
        let vyj = vy.index_axis(dlast, j);
        let vzk = vz.index_axis(dlast, k);
        Zip::from(&mut v.index_axis_mut(last, flat))
            .and(&vx.index_axis(dlast, i))
            .and(&vyj)
            .and(&vzk)
            .for_each(|o, &a, &b, &c| *o = a * b * c);
    }
    Ok(v)
}
