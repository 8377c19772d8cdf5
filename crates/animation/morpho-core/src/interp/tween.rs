//! State-level tween primitives.
//!
//! Each primitive walks the start state, interpolates the tweenables eligible
//! for it toward the same-named slot of the end state, and copies the rest
//! through unchanged. Spiral and pivot act on their geometric slots and hand
//! everything else to the linear primitive.

use log::trace;

use crate::error::MorphoError;
use crate::interp::functions::{
    lerp, lerp_color, lerp_complex, lerp_vec3, orient_tween, pivot_complex, spiral_complex,
    spiral_vec3,
};
use crate::state::FigureState;
use crate::tag::TagSet;
use crate::value::TweenValue;

/// Cross-product magnitude (relative to |a||b|) below which 3D vectors count
/// as colinear for spiral tweening.
pub const COLINEAR_TOLERANCE: f64 = 1e-9;

fn mismatch(a: &TweenValue, b: &TweenValue) -> MorphoError {
    MorphoError::invalid(format!(
        "cannot tween {:?} toward {:?}",
        a.kind(),
        b.kind()
    ))
}

fn check_lengths(a: &[TweenValue], b: &[TweenValue]) -> Result<(), MorphoError> {
    if a.len() != b.len() {
        return Err(MorphoError::invalid(format!(
            "list length mismatch: {} vs {}",
            a.len(),
            b.len()
        )));
    }
    Ok(())
}

/// Linear interpolation of one payload.
pub fn linear_value(
    tags: TagSet,
    a: &TweenValue,
    b: &TweenValue,
    t: f64,
) -> Result<TweenValue, MorphoError> {
    let round = tags.contains(TagSet::INTEGER);
    Ok(match (a, b) {
        (TweenValue::Integer(x), TweenValue::Integer(y)) => {
            TweenValue::Integer(lerp(*x as f64, *y as f64, t).round() as i64)
        }
        (TweenValue::Complex(x), TweenValue::Complex(y)) => {
            TweenValue::Complex(lerp_complex(*x, *y, t))
        }
        (TweenValue::Complex(_), TweenValue::Scalar(_))
        | (TweenValue::Scalar(_), TweenValue::Complex(_)) => match (a.as_complex(), b.as_complex())
        {
            (Some(x), Some(y)) => TweenValue::Complex(lerp_complex(x, y, t)),
            _ => return Err(mismatch(a, b)),
        },
        (TweenValue::Scalar(_) | TweenValue::Integer(_), TweenValue::Scalar(_) | TweenValue::Integer(_)) => {
            match (a.as_scalar(), b.as_scalar()) {
                (Some(x), Some(y)) => {
                    let v = lerp(x, y, t);
                    TweenValue::Scalar(if round { v.round() } else { v })
                }
                _ => return Err(mismatch(a, b)),
            }
        }
        (TweenValue::Vec3(x), TweenValue::Vec3(y)) => TweenValue::Vec3(lerp_vec3(x, y, t)),
        (TweenValue::Color(x), TweenValue::Color(y)) => TweenValue::Color(lerp_color(*x, *y, t)),
        (TweenValue::Array(x), TweenValue::Array(y)) => {
            if x.shape() != y.shape() {
                return Err(MorphoError::invalid(format!(
                    "array shape mismatch: {:?} vs {:?}",
                    x.shape(),
                    y.shape()
                )));
            }
            if tags.contains(TagSet::ORIENT) && x.shape() == (3, 3) {
                let ma = nalgebra::Matrix3::from_iterator(x.iter().copied());
                let mb = nalgebra::Matrix3::from_iterator(y.iter().copied());
                let m = orient_tween(&ma, &mb, t);
                TweenValue::Array(nalgebra::DMatrix::from_iterator(3, 3, m.iter().copied()))
            } else {
                TweenValue::Array(x.zip_map(y, |p, q| {
                    let v = lerp(p, q, t);
                    if round {
                        v.round()
                    } else {
                        v
                    }
                }))
            }
        }
        (TweenValue::List(xs), TweenValue::List(ys)) => {
            check_lengths(xs, ys)?;
            TweenValue::List(
                xs.iter()
                    .zip(ys)
                    .map(|(x, y)| linear_value(tags, x, y, t))
                    .collect::<Result<Vec<_>, _>>()?,
            )
        }
        (TweenValue::Function(f), TweenValue::Function(g)) => TweenValue::Function(f.blend(g, t)),
        (TweenValue::Text(_), TweenValue::Text(_)) => a.clone(),
        _ => return Err(mismatch(a, b)),
    })
}

/// Spiral interpolation of one payload, or `None` when the payload has no
/// spiral form and should be tweened linearly.
pub fn spiral_value(
    tags: TagSet,
    a: &TweenValue,
    b: &TweenValue,
    t: f64,
) -> Result<Option<TweenValue>, MorphoError> {
    match (a, b) {
        (TweenValue::Complex(_), _) | (_, TweenValue::Complex(_)) => {
            match (a.as_complex(), b.as_complex()) {
                (Some(x), Some(y)) => Ok(Some(TweenValue::Complex(spiral_complex(x, y, t)))),
                _ => Err(mismatch(a, b)),
            }
        }
        (TweenValue::Vec3(x), TweenValue::Vec3(y)) => Ok(Some(TweenValue::Vec3(spiral_vec3(
            x,
            y,
            t,
            COLINEAR_TOLERANCE,
        )))),
        (TweenValue::List(xs), TweenValue::List(ys)) => {
            check_lengths(xs, ys)?;
            let mut out = Vec::with_capacity(xs.len());
            for (x, y) in xs.iter().zip(ys) {
                match spiral_value(tags, x, y, t)? {
                    Some(v) => out.push(v),
                    None => return Ok(None),
                }
            }
            Ok(Some(TweenValue::List(out)))
        }
        _ => Ok(None),
    }
}

/// Pivot interpolation of one payload. Only complex payloads (and lists of
/// them) have an arc to follow.
pub fn pivot_value(
    a: &TweenValue,
    b: &TweenValue,
    t: f64,
    angle: f64,
) -> Result<TweenValue, MorphoError> {
    match (a, b) {
        (TweenValue::List(xs), TweenValue::List(ys)) => {
            check_lengths(xs, ys)?;
            xs.iter()
                .zip(ys)
                .map(|(x, y)| pivot_value(x, y, t, angle))
                .collect::<Result<Vec<_>, _>>()
                .map(TweenValue::List)
        }
        _ => match (a.as_complex(), b.as_complex()) {
            (Some(p), Some(q)) => Ok(TweenValue::Complex(pivot_complex(p, q, angle, t)?)),
            _ => Err(MorphoError::unsupported(format!(
                "pivot tween of {:?} values",
                a.kind()
            ))),
        },
    }
}

/// Linear tween of every linear-eligible tweenable not named in `ignore`.
pub fn linear_state(
    a: &FigureState,
    b: &FigureState,
    t: f64,
    ignore: &[&str],
) -> Result<FigureState, MorphoError> {
    let mut out = a.clone();
    for slot in a.iter() {
        if ignore.contains(&slot.name()) || !slot.eligible().linear {
            continue;
        }
        let other = b.require(slot.name())?;
        let value = linear_value(slot.tags(), slot.value(), other.value(), t)?;
        out.set(slot.name(), value)?;
    }
    Ok(out)
}

/// Spiral tween of spiral-eligible geometric tweenables; the rest go linear.
pub fn spiral_state(
    a: &FigureState,
    b: &FigureState,
    t: f64,
    ignore: &[&str],
) -> Result<FigureState, MorphoError> {
    let mut updates = Vec::new();
    for slot in a.iter() {
        if ignore.contains(&slot.name()) || !slot.eligible().spiral {
            continue;
        }
        let other = b.require(slot.name())?;
        if let Some(value) = spiral_value(slot.tags(), slot.value(), other.value(), t)? {
            updates.push((slot.name(), value));
        }
    }
    let mut skip: Vec<&str> = ignore.to_vec();
    skip.extend(updates.iter().map(|(name, _)| *name));
    trace!("spiral tween acting on {} tweenables", updates.len());
    let mut out = linear_state(a, b, t, &skip)?;
    for (name, value) in updates {
        out.set(name, value)?;
    }
    Ok(out)
}

/// Pivot tween of pivot-eligible tweenables; the rest go linear.
pub fn pivot_state(
    a: &FigureState,
    b: &FigureState,
    t: f64,
    angle: f64,
    ignore: &[&str],
) -> Result<FigureState, MorphoError> {
    let mut updates = Vec::new();
    for slot in a.iter() {
        if ignore.contains(&slot.name()) || !slot.eligible().pivot {
            continue;
        }
        let other = b.require(slot.name())?;
        updates.push((slot.name(), pivot_value(slot.value(), other.value(), t, angle)?));
    }
    let mut skip: Vec<&str> = ignore.to_vec();
    skip.extend(updates.iter().map(|(name, _)| *name));
    let mut out = linear_state(a, b, t, &skip)?;
    for (name, value) in updates {
        out.set(name, value)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::functions::{argument, modulus};
    use crate::tweenable::Tweenable;
    use crate::value::Complex64;
    use nalgebra::DMatrix;
    use std::f64::consts::PI;

    fn approx(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
    }

    fn state(pos: Complex64, alpha: f64) -> FigureState {
        FigureState::new()
            .with(Tweenable::new("pos", pos, TagSet::COMPLEX).unwrap())
            .unwrap()
            .with(Tweenable::new("alpha", alpha, TagSet::SCALAR).unwrap())
            .unwrap()
            .with(Tweenable::new("label", "a", TagSet::NOTWEEN).unwrap())
            .unwrap()
    }

    #[test]
    fn linear_state_tweens_eligible_slots_only() {
        let a = state(Complex64::new(0.0, 0.0), 0.0);
        let mut b = state(Complex64::new(10.0, 4.0), 1.0);
        b.set("label", "b").unwrap();
        let mid = linear_state(&a, &b, 0.5, &[]).unwrap();
        assert_eq!(mid.value("pos"), Some(&TweenValue::complex(5.0, 2.0)));
        assert_eq!(mid.value("alpha"), Some(&TweenValue::Scalar(0.5)));
        assert_eq!(mid.value("label"), Some(&TweenValue::Text("a".into())));
    }

    #[test]
    fn ignore_list_leaves_slots_untouched() {
        let a = state(Complex64::new(0.0, 0.0), 0.0);
        let b = state(Complex64::new(10.0, 0.0), 1.0);
        let mid = linear_state(&a, &b, 0.5, &["alpha"]).unwrap();
        assert_eq!(mid.value("alpha"), Some(&TweenValue::Scalar(0.0)));
    }

    #[test]
    fn missing_partner_slot_is_an_error() {
        let a = state(Complex64::new(0.0, 0.0), 0.0);
        let b = FigureState::new();
        assert!(matches!(
            linear_state(&a, &b, 0.5, &[]),
            Err(MorphoError::MissingTweenable { .. })
        ));
    }

    #[test]
    fn integer_tag_rounds() {
        let v = linear_value(
            TagSet::SCALAR | TagSet::INTEGER,
            &TweenValue::Scalar(0.0),
            &TweenValue::Scalar(3.0),
            0.4,
        )
        .unwrap();
        assert_eq!(v, TweenValue::Scalar(1.0));
        let i = linear_value(
            TagSet::INTEGER,
            &TweenValue::Integer(0),
            &TweenValue::Integer(5),
            0.5,
        )
        .unwrap();
        assert_eq!(i, TweenValue::Integer(3));
    }

    #[test]
    fn list_length_mismatch_is_invalid() {
        let a = TweenValue::complex_list([Complex64::new(0.0, 0.0)]);
        let b = TweenValue::complex_list([Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)]);
        assert!(matches!(
            linear_value(TagSet::COMPLEX, &a, &b, 0.5),
            Err(MorphoError::InvalidValue { .. })
        ));
    }

    #[test]
    fn arrays_tween_elementwise() {
        let a = TweenValue::Array(DMatrix::from_row_slice(1, 2, &[0.0, 2.0]));
        let b = TweenValue::Array(DMatrix::from_row_slice(1, 2, &[4.0, 6.0]));
        let mid = linear_value(TagSet::NPARRAY, &a, &b, 0.25).unwrap();
        assert_eq!(
            mid,
            TweenValue::Array(DMatrix::from_row_slice(1, 2, &[1.0, 3.0]))
        );
    }

    #[test]
    fn functions_tween_to_a_homotopy() {
        let f = crate::value::TweenFn::new(|x| x);
        let g = crate::value::TweenFn::new(|_| 10.0);
        let mid = linear_value(
            TagSet::FUNCTION,
            &TweenValue::Function(f),
            &TweenValue::Function(g),
            0.5,
        )
        .unwrap();
        match mid {
            TweenValue::Function(h) => approx(h.call(2.0), 6.0, 1e-12),
            other => panic!("expected a function, got {other:?}"),
        }
    }

    #[test]
    fn spiral_state_moves_complex_slots_on_the_log_spiral() {
        let a = state(Complex64::new(1.0, 0.0), 0.0);
        let b = state(Complex64::new(0.0, 1.0), 1.0);
        let mid = spiral_state(&a, &b, 0.5, &[]).unwrap();
        let z = mid.value("pos").and_then(|v| v.as_complex()).unwrap();
        approx(modulus(z), 1.0, 1e-12);
        approx(argument(z), PI / 4.0, 1e-12);
        assert_eq!(mid.value("alpha"), Some(&TweenValue::Scalar(0.5)));
    }

    #[test]
    fn pivot_state_follows_the_arc() {
        let a = state(Complex64::new(0.0, 0.0), 0.0);
        let b = state(Complex64::new(10.0, 0.0), 1.0);
        let mid = pivot_state(&a, &b, 0.5, PI, &[]).unwrap();
        let z = mid.value("pos").and_then(|v| v.as_complex()).unwrap();
        approx(z.re, 5.0, 1e-9);
        approx(z.im, -5.0, 1e-9);
        assert_eq!(mid.value("alpha"), Some(&TweenValue::Scalar(0.5)));
    }

    #[test]
    fn pivot_of_non_complex_is_unsupported() {
        let err = pivot_value(
            &TweenValue::Color([0.0; 3]),
            &TweenValue::Color([1.0; 3]),
            0.5,
            PI,
        )
        .unwrap_err();
        assert!(matches!(err, MorphoError::NotImplemented { .. }));
    }
}
