//! TweenValue: the closed set of payloads a tweenable may hold.
//!
//! Interpolation primitives pattern-match over these variants; which primitive
//! runs is decided by the owning tweenable's tags, not by the variant alone.

use std::fmt;
use std::sync::Arc;

use nalgebra::{DMatrix, Vector3};

pub use nalgebra::Complex;

use crate::error::MorphoError;

/// Complex number used for 2D positions.
pub type Complex64 = Complex<f64>;

/// Lightweight kind enum for dispatch and error messages.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Scalar,
    Integer,
    Complex,
    Vec3,
    Color,
    Array,
    List,
    Function,
    Text,
}

/// A function-valued tweenable payload.
///
/// Tweening two functions does not capture a closure: it builds an explicit
/// [`WeightedFunctionPair`] that evaluates the pointwise convex combination.
#[derive(Clone)]
pub enum TweenFn {
    Plain(Arc<dyn Fn(f64) -> f64 + Send + Sync>),
    Homotopy(WeightedFunctionPair),
}

/// `(1-t)*f(x) + t*g(x)`.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedFunctionPair {
    pub f: Box<TweenFn>,
    pub g: Box<TweenFn>,
    pub t: f64,
}

impl WeightedFunctionPair {
    #[inline]
    pub fn call(&self, x: f64) -> f64 {
        (1.0 - self.t) * self.f.call(x) + self.t * self.g.call(x)
    }
}

impl TweenFn {
    pub fn new(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        TweenFn::Plain(Arc::new(f))
    }

    #[inline]
    pub fn call(&self, x: f64) -> f64 {
        match self {
            TweenFn::Plain(f) => f(x),
            TweenFn::Homotopy(pair) => pair.call(x),
        }
    }

    /// Homotopy between `self` and `other` at parameter `t`.
    pub fn blend(&self, other: &TweenFn, t: f64) -> TweenFn {
        TweenFn::Homotopy(WeightedFunctionPair {
            f: Box::new(self.clone()),
            g: Box::new(other.clone()),
            t,
        })
    }
}

impl PartialEq for TweenFn {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // Plain functions compare by identity of the shared callable.
            (TweenFn::Plain(a), TweenFn::Plain(b)) => {
                Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
            }
            (TweenFn::Homotopy(a), TweenFn::Homotopy(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for TweenFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TweenFn::Plain(func) => write!(f, "TweenFn::Plain({:p})", Arc::as_ptr(func)),
            TweenFn::Homotopy(pair) => f.debug_tuple("TweenFn::Homotopy").field(pair).finish(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TweenValue {
    /// Real scalar (also used for integer-tagged slots that tolerate fractions)
    Scalar(f64),

    /// Integer; tweened results are rounded
    Integer(i64),

    /// 2D position / vector as a complex number
    Complex(Complex64),

    /// 3D vector (tag `3d` enables spiral rotation)
    Vec3(Vector3<f64>),

    /// RGB color triple
    Color([f64; 3]),

    /// Dense numeric array (a 3×3 array tagged `orient` is a rotation)
    Array(DMatrix<f64>),

    /// Heterogeneous list, tweened element-wise
    List(Vec<TweenValue>),

    /// Real function of a real variable
    Function(TweenFn),

    /// Text; never interpolated
    Text(String),
}

impl TweenValue {
    /// Return the coarse kind of this value.
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            TweenValue::Scalar(_) => ValueKind::Scalar,
            TweenValue::Integer(_) => ValueKind::Integer,
            TweenValue::Complex(_) => ValueKind::Complex,
            TweenValue::Vec3(_) => ValueKind::Vec3,
            TweenValue::Color(_) => ValueKind::Color,
            TweenValue::Array(_) => ValueKind::Array,
            TweenValue::List(_) => ValueKind::List,
            TweenValue::Function(_) => ValueKind::Function,
            TweenValue::Text(_) => ValueKind::Text,
        }
    }

    /// Convenience constructors
    pub fn complex(re: f64, im: f64) -> Self {
        TweenValue::Complex(Complex64::new(re, im))
    }

    pub fn complex_list(points: impl IntoIterator<Item = Complex64>) -> Self {
        TweenValue::List(points.into_iter().map(TweenValue::Complex).collect())
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            TweenValue::Scalar(v) => Some(*v),
            TweenValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_complex(&self) -> Option<Complex64> {
        match self {
            TweenValue::Complex(z) => Some(*z),
            TweenValue::Scalar(v) => Some(Complex64::new(*v, 0.0)),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<[f64; 3]> {
        match self {
            TweenValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[TweenValue]> {
        match self {
            TweenValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Flatten a list of complex values (or a single complex value).
    pub fn complex_points(&self) -> Option<Vec<Complex64>> {
        match self {
            TweenValue::List(items) => items.iter().map(|v| v.as_complex()).collect(),
            other => other.as_complex().map(|z| vec![z]),
        }
    }

    /// Replace every complex number inside this value by `func(z)`.
    ///
    /// Lists are mapped element-wise; non-complex payloads are rejected.
    pub fn map_complex(&self, func: &dyn Fn(Complex64) -> Complex64) -> Result<Self, MorphoError> {
        match self {
            TweenValue::Complex(z) => Ok(TweenValue::Complex(func(*z))),
            TweenValue::Scalar(v) => Ok(TweenValue::Complex(func(Complex64::new(*v, 0.0)))),
            TweenValue::List(items) => items
                .iter()
                .map(|item| item.map_complex(func))
                .collect::<Result<Vec<_>, _>>()
                .map(TweenValue::List),
            other => Err(MorphoError::invalid(format!(
                "cannot apply a function image to a {:?} value",
                other.kind()
            ))),
        }
    }
}

impl From<f64> for TweenValue {
    fn from(v: f64) -> Self {
        TweenValue::Scalar(v)
    }
}

impl From<i64> for TweenValue {
    fn from(v: i64) -> Self {
        TweenValue::Integer(v)
    }
}

impl From<Complex64> for TweenValue {
    fn from(z: Complex64) -> Self {
        TweenValue::Complex(z)
    }
}

impl From<Vector3<f64>> for TweenValue {
    fn from(v: Vector3<f64>) -> Self {
        TweenValue::Vec3(v)
    }
}

impl From<TweenFn> for TweenValue {
    fn from(f: TweenFn) -> Self {
        TweenValue::Function(f)
    }
}

impl From<&str> for TweenValue {
    fn from(s: &str) -> Self {
        TweenValue::Text(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn homotopy_evaluates_convex_combination() {
        let f = TweenFn::new(|x| x);
        let g = TweenFn::new(|x| x * x);
        let h = f.blend(&g, 0.25);
        // 0.75 * 3 + 0.25 * 9
        assert!((h.call(3.0) - 4.5).abs() < 1e-12);
    }

    #[test]
    fn plain_functions_compare_by_identity() {
        let f = TweenFn::new(|x| x + 1.0);
        let same = f.clone();
        let other = TweenFn::new(|x| x + 1.0);
        assert_eq!(f, same);
        assert_ne!(f, other);
    }

    #[test]
    fn map_complex_is_elementwise_over_lists() {
        let seq = TweenValue::complex_list([Complex64::new(1.0, 0.0), Complex64::new(0.0, 1.0)]);
        let squared = seq.map_complex(&|z| z * z).unwrap();
        assert_eq!(
            squared.complex_points().unwrap(),
            vec![Complex64::new(1.0, 0.0), Complex64::new(-1.0, 0.0)]
        );
    }

    #[test]
    fn map_complex_rejects_colors() {
        let color = TweenValue::Color([1.0, 0.0, 0.0]);
        assert!(color.map_complex(&|z| z).is_err());
    }
}
