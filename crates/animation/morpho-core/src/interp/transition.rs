//! Transition functions: monotonic reparameterizations of t over [0,1].

use serde::{Deserialize, Serialize};

use crate::interp::functions::{bezier_ease_t, lerp, quad_ease, sine_ease};

/// Below this spread a sliced transition is treated as flat.
const FLAT_SLICE_EPS: f64 = 1e-15;

/// Easing applied to t before a tween method runs.
///
/// `Slice` is produced by [`Transition::split`]: it replays the window
/// `[start, end]` of its base transition rescaled to `[0,1]` on both axes,
/// which is what keeps a keyframe insertion from altering playback.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    #[default]
    Uniform,
    QuadEase,
    SineEase,
    CubicBezier {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Slice {
        base: Box<Transition>,
        start: f64,
        end: f64,
    },
}

impl Transition {
    /// CSS-style `ease-in-out`.
    pub fn ease_in_out() -> Self {
        Transition::CubicBezier {
            x1: 0.42,
            y1: 0.0,
            x2: 0.58,
            y2: 1.0,
        }
    }

    #[inline]
    pub fn is_uniform(&self) -> bool {
        matches!(self, Transition::Uniform)
    }

    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Transition::Uniform => t,
            Transition::QuadEase => quad_ease(t),
            Transition::SineEase => sine_ease(t),
            Transition::CubicBezier { x1, y1, x2, y2 } => bezier_ease_t(t, *x1, *y1, *x2, *y2),
            Transition::Slice { base, start, end } => {
                let lo = base.apply(*start);
                let hi = base.apply(*end);
                if (hi - lo).abs() < FLAT_SLICE_EPS {
                    return t;
                }
                (base.apply(lerp(*start, *end, t)) - lo) / (hi - lo)
            }
        }
    }

    /// Split at segment parameter `s` into the transitions governing `[0,s]`
    /// and `[s,1]`, each rescaled to `[0,1]`.
    pub fn split(&self, s: f64) -> (Transition, Transition) {
        match self {
            Transition::Uniform => (Transition::Uniform, Transition::Uniform),
            Transition::Slice { base, start, end } => {
                let cut = lerp(*start, *end, s);
                (
                    Transition::Slice {
                        base: base.clone(),
                        start: *start,
                        end: cut,
                    },
                    Transition::Slice {
                        base: base.clone(),
                        start: cut,
                        end: *end,
                    },
                )
            }
            other => (
                Transition::Slice {
                    base: Box::new(other.clone()),
                    start: 0.0,
                    end: s,
                },
                Transition::Slice {
                    base: Box::new(other.clone()),
                    start: s,
                    end: 1.0,
                },
            ),
        }
    }
}
