//! Dense power-series polynomial core: coefficient arrays ordered from the
//! lowest degree term to the highest, with arithmetic, calculus, evaluation,
//! Vandermonde matrices, least-squares fitting and root finding.
pub mod arith;
pub mod calculus;
pub mod eval;
pub mod fit;
pub mod roots;
pub mod series;
pub mod vander;

pub use arith::{
    polyadd, polydiv, polyfromroots, polyfromroots_cplx, polyline, polymul, polymulx, polypow,
    polysub,
};
pub use calculus::{polyder, polyint};
pub use eval::{PointValues, polygrid2d, polygrid3d, polyval, polyval2d, polyval3d};
pub use fit::{FitDiagnostics, polyfit};
pub use roots::{RootSet, polyroots};
pub use series::{PolyError, PolyNum, Series, as_series, trimcoef, trimseq};
pub use series::trimcoef as polytrim;
pub use vander::{polyvander, polyvander2d, polyvander3d};
