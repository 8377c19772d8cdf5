//! Tween methods and the per-keyframe tween policy.

use serde::{Deserialize, Serialize};

use crate::error::MorphoError;
use crate::interp::functions::check_pivot_angle;
use crate::interp::transition::Transition;

/// How a keyframe interpolates toward its successor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TweenMethod {
    #[default]
    Linear,
    Spiral,
    /// Circular arc subtending `angle` radians (CCW positive).
    Pivot { angle: f64 },
    /// Holds the start figure for the whole interval.
    Instant,
}

impl TweenMethod {
    /// Pivot method with a validated angle.
    pub fn pivot(angle: f64) -> Result<Self, MorphoError> {
        check_pivot_angle(angle)?;
        Ok(TweenMethod::Pivot { angle })
    }

    pub fn name(&self) -> &'static str {
        match self {
            TweenMethod::Linear => "linear",
            TweenMethod::Spiral => "spiral",
            TweenMethod::Pivot { .. } => "pivot",
            TweenMethod::Instant => "instant",
        }
    }

    /// Methods for the two halves of an interval cut where the method
    /// parameter equals `tau`.
    ///
    /// Linear and spiral are self-similar. A pivot hands each half its share
    /// of the angle; a share congruent to 0 mod 2π has no arc center and
    /// becomes linear (the two endpoints coincide on that half). Instant has
    /// no splitter and returns `None`.
    pub fn split(&self, tau: f64) -> Option<(TweenMethod, TweenMethod)> {
        match *self {
            TweenMethod::Linear | TweenMethod::Spiral => Some((*self, *self)),
            TweenMethod::Pivot { angle } => {
                let side = |a: f64| match check_pivot_angle(a) {
                    Ok(()) => TweenMethod::Pivot { angle: a },
                    Err(_) => TweenMethod::Linear,
                };
                Some((side(tau * angle), side((1.0 - tau) * angle)))
            }
            TweenMethod::Instant => None,
        }
    }
}

/// Method plus transition carried by every figure.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TweenPolicy {
    #[serde(default)]
    pub method: TweenMethod,
    #[serde(default)]
    pub transition: Transition,
}

impl TweenPolicy {
    pub fn new(method: TweenMethod, transition: Transition) -> Self {
        Self { method, transition }
    }

    /// Policies for `[0,s]` and `[s,1]` of an interval governed by `self`.
    ///
    /// The method is cut at `transition(s)`, the transition at `s`, so the
    /// two halves replay the original interval exactly.
    pub fn split(&self, s: f64) -> Option<(TweenPolicy, TweenPolicy)> {
        let tau = self.transition.apply(s);
        let (m_beg, m_mid) = self.method.split(tau)?;
        let (t_beg, t_mid) = self.transition.split(s);
        Some((TweenPolicy::new(m_beg, t_beg), TweenPolicy::new(m_mid, t_mid)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn pivot_constructor_validates_angle() {
        assert!(TweenMethod::pivot(PI).is_ok());
        assert!(matches!(
            TweenMethod::pivot(TAU),
            Err(MorphoError::DegeneratePivot { .. })
        ));
    }

    #[test]
    fn pivot_split_shares_the_angle() {
        let (a, b) = TweenMethod::Pivot { angle: PI }.split(0.25).unwrap();
        assert_eq!(a, TweenMethod::Pivot { angle: PI * 0.25 });
        assert_eq!(b, TweenMethod::Pivot { angle: PI * 0.75 });
    }

    #[test]
    fn pivot_split_with_full_turn_share_becomes_linear() {
        let (a, b) = TweenMethod::Pivot { angle: 3.0 * PI }
            .split(2.0 / 3.0)
            .unwrap();
        assert_eq!(a, TweenMethod::Linear);
        assert!(matches!(b, TweenMethod::Pivot { .. }));
    }

    #[test]
    fn instant_has_no_splitter() {
        assert!(TweenMethod::Instant.split(0.5).is_none());
        let policy = TweenPolicy::new(TweenMethod::Instant, Transition::QuadEase);
        assert!(policy.split(0.5).is_none());
    }

    #[test]
    fn policy_split_cuts_method_at_eased_parameter() {
        let policy = TweenPolicy::new(TweenMethod::Pivot { angle: PI }, Transition::QuadEase);
        let (beg, mid) = policy.split(0.25).unwrap();
        // quad_ease(0.25) = 0.125
        assert_eq!(beg.method, TweenMethod::Pivot { angle: PI * 0.125 });
        assert_eq!(mid.method, TweenMethod::Pivot { angle: PI * 0.875 });
        assert!(matches!(beg.transition, Transition::Slice { .. }));
    }

    #[test]
    fn policy_deserializes_with_defaults() {
        let policy: TweenPolicy = serde_json::from_str(r#"{"method":{"kind":"spiral"}}"#).unwrap();
        assert_eq!(policy.method, TweenMethod::Spiral);
        assert!(policy.transition.is_uniform());
    }
}
