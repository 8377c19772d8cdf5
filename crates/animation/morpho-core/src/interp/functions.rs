//! Interpolation primitives (stateless numeric functions):
//! - lerp over scalars, complex numbers, 3D vectors and colors
//! - spiral (log-polar) interpolation in 2D and its 3D rotation analogue
//! - pivot: point along a circular arc of fixed subtended angle
//! - cubic-bezier easing
//! - orientation (3×3 rotation matrix) slerp

use std::f64::consts::{PI, TAU};

use nalgebra::{ComplexField, Matrix3, Rotation3, Unit, UnitQuaternion, Vector3};

use crate::error::MorphoError;
use crate::value::Complex64;

/// Angles closer than this to a multiple of 2π count as zero for pivots.
pub const PIVOT_ANGLE_EPS: f64 = 1e-12;

/// Linear interpolation of scalars.
///
/// Written as `b*t + (1-t)*a` rather than `a + (b-a)*t`: stays exact at the
/// endpoints and behaves with infinite endpoints.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    b * t + (1.0 - t) * a
}

#[inline]
pub fn lerp_complex(a: Complex64, b: Complex64, t: f64) -> Complex64 {
    b * t + a * (1.0 - t)
}

#[inline]
pub fn lerp_vec3(a: &Vector3<f64>, b: &Vector3<f64>, t: f64) -> Vector3<f64> {
    b * t + a * (1.0 - t)
}

#[inline]
pub fn lerp_color(a: [f64; 3], b: [f64; 3], t: f64) -> [f64; 3] {
    [lerp(a[0], b[0], t), lerp(a[1], b[1], t), lerp(a[2], b[2], t)]
}

/// Magnitude of a complex number.
#[inline]
pub fn modulus(z: Complex64) -> f64 {
    ComplexField::modulus(z)
}

/// Phase of a complex number in `(-π, π]`.
#[inline]
pub fn argument(z: Complex64) -> f64 {
    ComplexField::argument(z)
}

#[inline]
pub fn from_polar(r: f64, theta: f64) -> Complex64 {
    Complex64::new(r * theta.cos(), r * theta.sin())
}

/// Spiral interpolation of two complex numbers.
///
/// Radius is interpolated linearly and the angle along the shorter arc
/// (|Δθ| ≤ π).
pub fn spiral_complex(a: Complex64, b: Complex64, t: f64) -> Complex64 {
    let (r1, th1) = (modulus(a), argument(a));
    let (r2, mut th2) = (modulus(b), argument(b));
    let dth = th2 - th1;
    if dth > PI {
        th2 -= TAU;
    } else if dth < -PI {
        th2 += TAU;
    }
    from_polar(lerp(r1, r2, t), lerp(th1, th2, t))
}

/// Spiral interpolation of two 3D vectors.
///
/// Rotates `a` toward `b` about the normal of the plane they span by `t` times
/// the subtended angle while interpolating the length linearly. Colinear (or
/// zero) vectors span no plane and fall back to a straight line.
pub fn spiral_vec3(a: &Vector3<f64>, b: &Vector3<f64>, t: f64, tolerance: f64) -> Vector3<f64> {
    let ra = a.norm();
    let rb = b.norm();
    if ra == 0.0 || rb == 0.0 {
        return lerp_vec3(a, b, t);
    }
    let normal = a.cross(b);
    let nn = normal.norm();
    if nn <= tolerance * ra * rb {
        return lerp_vec3(a, b, t);
    }
    let angle = nn.atan2(a.dot(b));
    let axis = Unit::new_normalize(normal);
    let rot = Rotation3::from_axis_angle(&axis, t * angle);
    (rot * a) * (lerp(ra, rb, t) / ra)
}

/// Reject pivot angles congruent to 0 mod 2π (no arc center exists).
pub fn check_pivot_angle(angle: f64) -> Result<(), MorphoError> {
    if !angle.is_finite() {
        return Err(MorphoError::DegeneratePivot { angle });
    }
    let r = angle.rem_euclid(TAU);
    if r < PIVOT_ANGLE_EPS || TAU - r < PIVOT_ANGLE_EPS {
        return Err(MorphoError::DegeneratePivot { angle });
    }
    Ok(())
}

/// Center of the circular arc of subtended `angle` (CCW positive) from `p` to `q`.
pub fn pivot_center(p: Complex64, q: Complex64, angle: f64) -> Result<Complex64, MorphoError> {
    check_pivot_angle(angle)?;
    let mid = (p + q) * 0.5;
    let cot = 1.0 / (angle * 0.5).tan();
    if !cot.is_finite() {
        return Err(MorphoError::DegeneratePivot { angle });
    }
    Ok(mid + Complex64::i() * (mid - p) * cot)
}

/// Point at parameter `t` along the arc from `p` to `q` subtending `angle`.
pub fn pivot_complex(
    p: Complex64,
    q: Complex64,
    angle: f64,
    t: f64,
) -> Result<Complex64, MorphoError> {
    let c = pivot_center(p, q, angle)?;
    Ok((p - c) * from_polar(1.0, t * angle) + c)
}

/// Cubic Bezier basis function
#[inline]
pub fn cubic_bezier(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Given control points (x1, y1, x2, y2) and an input t in [0,1],
/// compute the eased y by inverting the x bezier via binary search.
pub fn bezier_ease_t(t: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    // Bezier(0,0,1,1) is exactly linear
    if x1 == 0.0 && y1 == 0.0 && x2 == 1.0 && y2 == 1.0 {
        return t;
    }
    if t == 0.0 || t == 1.0 {
        return t;
    }
    // Monotonic X in [0,1] assumed for x1/x2 ∈ [0,1]
    let mut lo = 0.0f64;
    let mut hi = 1.0f64;
    let mut mid = t;
    for _ in 0..64 {
        let x = cubic_bezier(0.0, x1, x2, 1.0, mid);
        if (x - t).abs() < 1e-12 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(0.0, y1, y2, 1.0, mid)
}

/// Piecewise quadratic ease-in/ease-out.
#[inline]
pub fn quad_ease(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        let u = 1.0 - t;
        1.0 - 2.0 * u * u
    }
}

/// Half-cosine ease-in/ease-out.
#[inline]
pub fn sine_ease(t: f64) -> f64 {
    0.5 * (1.0 - (PI * t).cos())
}

/// Interpolate two rotation matrices along the shortest great arc.
pub fn orient_tween(a: &Matrix3<f64>, b: &Matrix3<f64>, t: f64) -> Matrix3<f64> {
    let qa = UnitQuaternion::from_matrix(a);
    let qb = UnitQuaternion::from_matrix(b);
    // try_slerp declines nearly identical rotations; nlerp is exact enough there.
    let q = qa
        .try_slerp(&qb, t, 1e-12)
        .unwrap_or_else(|| qa.nlerp(&qb, t));
    q.to_rotation_matrix().into_inner()
}
