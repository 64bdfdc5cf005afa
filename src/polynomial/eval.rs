use crate::polynomial::series::{PolyError, PolyNum};
use ndarray::{Array1, ArrayD, Axis, IxDyn, Zip};

/// Evaluation points: a scalar or an n-dimensional array, coerced once at the
/// boundary instead of being type-checked all over the place.
#[derive(Debug, Clone, PartialEq)]
pub enum PointValues<T> {
    Scalar(T),
    Array(ArrayD<T>),
}

impl<T: PolyNum> PointValues<T> {
    /// Shape of the points; the empty slice for a scalar.
    pub fn shape(&self) -> &[usize] {
        match self {
            PointValues::Scalar(_) => &[],
            PointValues::Array(a) => a.shape(),
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Array of at least one dimension; a scalar becomes a length-1 vector.
    pub(crate) fn to_array_min1(&self) -> ArrayD<T> {
        match self {
            PointValues::Scalar(v) => ArrayD::from_elem(IxDyn(&[1]), *v),
            PointValues::Array(a) => a.clone(),
        }
    }
}

impl<T: PolyNum> From<T> for PointValues<T> {
    fn from(v: T) -> Self {
        PointValues::Scalar(v)
    }
}

impl<T: PolyNum> From<ArrayD<T>> for PointValues<T> {
    fn from(a: ArrayD<T>) -> Self {
        PointValues::Array(a)
    }
}

impl<T: PolyNum> From<Array1<T>> for PointValues<T> {
    fn from(a: Array1<T>) -> Self {
        PointValues::Array(a.into_dyn())
    }
}

impl<T: PolyNum> From<Vec<T>> for PointValues<T> {
    fn from(v: Vec<T>) -> Self {
        PointValues::Array(Array1::from(v).into_dyn())
    }
}

impl<'a, T: PolyNum> From<&'a [T]> for PointValues<T> {
    fn from(v: &[T]) -> Self {
        PointValues::Array(Array1::from(v.to_vec()).into_dyn())
    }
}

/// NumPy-style right-aligned broadcast of two shapes; dimensions must match
/// or one of them must be 1.
pub(crate) fn broadcast_shapes(a: &[usize], b: &[usize]) -> Result<Vec<usize>, PolyError> {
    let ndim = a.len().max(b.len());
    let mut out = vec![0usize; ndim];
    for i in 0..ndim {
        let da = if i < a.len() { a[a.len() - 1 - i] } else { 1 };
        let db = if i < b.len() { b[b.len() - 1 - i] } else { 1 };
        out[ndim - 1 - i] = if da == db || db == 1 {
            da
        } else if da == 1 {
            db
        } else {
            return Err(PolyError::ShapeMismatch(format!(
                "shapes {:?} and {:?} are not broadcast-compatible",
                a, b
            )));
        };
    }
    Ok(out)
}

/// Evaluate a polynomial with Horner's method, folding the coefficient array
/// along axis 0 from the highest degree down.
///
/// For a scalar `x` the result has shape `c.shape[1:]`. For an array `x` with
/// `tensor = true` every column of coefficients is evaluated at every point:
/// the result has shape `c.shape[1:] + x.shape`. With `tensor = false` the
/// points are broadcast against the trailing axes of `c` in the usual
/// right-aligned way, which is what the paired-point 2D/3D evaluators need.
pub fn polyval<T: PolyNum>(
    x: &PointValues<T>,
    c: &ArrayD<T>,
    tensor: bool,
) -> Result<ArrayD<T>, PolyError> {
    // a 0-d coefficient array is a constant polynomial
    let promoted;
    let cv = if c.ndim() == 0 {
        promoted = c
            .broadcast(IxDyn(&[1]))
            .expect("0-d broadcasts to one element")
            .to_owned();
        promoted.view()
    } else {
        c.view()
    };
    let n = cv.len_of(Axis(0));
    if n == 0 {
        return Err(PolyError::EmptySeries);
    }

    match x {
        PointValues::Scalar(xv) => {
            let mut acc = cv.index_axis(Axis(0), n - 1).to_owned();
            for i in (0..n - 1).rev() {
                let ci = cv.index_axis(Axis(0), i);
                Zip::from(&mut acc).and(&ci).for_each(|a, &cval| *a = cval + *a * *xv);
            }
            Ok(acc)
        }
        PointValues::Array(xa) => {
            let crest = cv.shape()[1..].to_vec();
            let xs = xa.shape().to_vec();
            let out_shape = if tensor {
                let mut s = crest.clone();
                s.extend_from_slice(&xs);
                s
            } else {
                broadcast_shapes(&crest, &xs)?
            };
            let xb = xa.broadcast(IxDyn(&out_shape)).ok_or_else(|| {
                PolyError::ShapeMismatch(format!(
                    "points of shape {:?} do not broadcast to {:?}",
                    xs, out_shape
                ))
            })?;
            let slice = |i: usize| -> Result<ArrayD<T>, PolyError> {
                let mut view = cv.index_axis(Axis(0), i);
                if tensor {
                    // append singleton axes, one per dimension of x
                    for _ in 0..xs.len() {
                        let nd = view.ndim();
                        view = view.insert_axis(Axis(nd));
                    }
                }
                Ok(view
                    .broadcast(IxDyn(&out_shape))
                    .ok_or_else(|| {
                        PolyError::ShapeMismatch(format!(
                            "coefficient columns of shape {:?} do not broadcast to {:?}",
                            crest, out_shape
                        ))
                    })?
                    .to_owned())
            };
            let mut acc = slice(n - 1)?;
            for i in (0..n - 1).rev() {
                let cb = slice(i)?;
                Zip::from(&mut acc)
                    .and(&xb)
                    .and(&cb)
                    .for_each(|a, &xv, &cval| *a = cval + *a * xv);
            }
            Ok(acc)
        }
    }
}

/// Evaluate the 2D tensor-product polynomial at paired points `(x, y)`;
/// the point arrays must be broadcastable to one shape.
pub fn polyval2d<T: PolyNum>(
    x: &PointValues<T>,
    y: &PointValues<T>,
    c: &ArrayD<T>,
) -> Result<ArrayD<T>, PolyError> {
    broadcast_shapes(x.shape(), y.shape())
        .map_err(|_| PolyError::ShapeMismatch("x, y are incompatible".to_string()))?;
    let vx = polyval(x, c, true)?;
    polyval(y, &vx, false)
}

/// Evaluate the 2D polynomial on the Cartesian product of `x` and `y`; the
/// result has shape `c.shape[2:] + x.shape + y.shape`.
pub fn polygrid2d<T: PolyNum>(
    x: &PointValues<T>,
    y: &PointValues<T>,
    c: &ArrayD<T>,
) -> Result<ArrayD<T>, PolyError> {
    let vx = polyval(x, c, true)?;
    polyval(y, &vx, true)
}

/// Evaluate the 3D tensor-product polynomial at paired points `(x, y, z)`.
pub fn polyval3d<T: PolyNum>(
    x: &PointValues<T>,
    y: &PointValues<T>,
    z: &PointValues<T>,
    c: &ArrayD<T>,
) -> Result<ArrayD<T>, PolyError> {
    let sxy = broadcast_shapes(x.shape(), y.shape())
        .map_err(|_| PolyError::ShapeMismatch("x, y, z are incompatible".to_string()))?;
    broadcast_shapes(&sxy, z.shape())
        .map_err(|_| PolyError::ShapeMismatch("x, y, z are incompatible".to_string()))?;
    let vxy = polyval2d(x, y, c)?;
    polyval(z, &vxy, false)
}

/// Evaluate the 3D polynomial on the Cartesian product of `x`, `y` and `z`.
pub fn polygrid3d<T: PolyNum>(
    x: &PointValues<T>,
    y: &PointValues<T>,
    z: &PointValues<T>,
    c: &ArrayD<T>,
) -> Result<ArrayD<T>, PolyError> {
    let vxy = polygrid2d(x, y, c)?;
    polyval(z, &vxy, true)
}
