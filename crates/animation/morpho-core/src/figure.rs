//! Figure: the keyframe payload of an actor.
//!
//! A figure is a [`FigureState`] plus the metadata that steers playback
//! (tween policy, visibility, hold window, modifier). Concrete figure types
//! embed a [`FigureBase`] and implement [`Figure`]; the trait supplies the
//! tween protocol with endpoint short-circuits, while the undecorated
//! `interp_*` hooks are what a figure type overrides.

use std::fmt;
use std::sync::Arc;

use crate::action::ActionRegistry;
use crate::draw::{DrawContext, Viewport};
use crate::error::MorphoError;
use crate::ids::ActorId;
use crate::interp::functions::check_pivot_angle;
use crate::interp::{linear_state, pivot_state, spiral_state, TweenMethod, TweenPolicy};
use crate::state::FigureState;
use crate::value::Complex64;

/// Per-frame hook applied to the state returned by `Actor::time`.
pub type Modifier = Arc<dyn Fn(&mut FigureState, f64) + Send + Sync>;

/// Metadata shared by every figure type.
#[derive(Clone)]
pub struct FigureBase {
    pub state: FigureState,
    pub policy: TweenPolicy,
    pub visible: bool,
    /// Hold this keyframe until the next one instead of tweening.
    pub is_static: bool,
    /// Frames to hold before the tween toward the next keyframe starts.
    pub delay: f64,
    pub modifier: Option<Modifier>,
    /// Actor whose timeline holds this figure; set on insertion.
    pub owner: Option<ActorId>,
}

impl Default for FigureBase {
    fn default() -> Self {
        Self::new(FigureState::new())
    }
}

impl FigureBase {
    pub fn new(state: FigureState) -> Self {
        Self {
            state,
            policy: TweenPolicy::default(),
            visible: true,
            is_static: false,
            delay: 0.0,
            modifier: None,
            owner: None,
        }
    }
}

impl fmt::Debug for FigureBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FigureBase")
            .field("state", &self.state)
            .field("policy", &self.policy)
            .field("visible", &self.visible)
            .field("is_static", &self.is_static)
            .field("delay", &self.delay)
            .field("modifier", &self.modifier.as_ref().map(|_| "<fn>"))
            .field("owner", &self.owner)
            .finish()
    }
}

pub trait Figure: Clone + fmt::Debug + Default + 'static {
    /// Concrete type name used in type checks and error messages.
    const TYPE_NAME: &'static str;

    /// Whether an actor keeps showing its last keyframe past the end of its
    /// timeline.
    const PERSISTENT: bool = true;

    fn base(&self) -> &FigureBase;
    fn base_mut(&mut self) -> &mut FigureBase;

    #[inline]
    fn state(&self) -> &FigureState {
        &self.base().state
    }

    #[inline]
    fn state_mut(&mut self) -> &mut FigureState {
        &mut self.base_mut().state
    }

    #[inline]
    fn policy(&self) -> &TweenPolicy {
        &self.base().policy
    }

    fn set_policy(&mut self, policy: TweenPolicy) {
        self.base_mut().policy = policy;
    }

    /// Builder form of [`Figure::set_policy`] for the method alone.
    fn with_method(mut self, method: TweenMethod) -> Self {
        self.base_mut().policy.method = method;
        self
    }

    #[inline]
    fn zdepth(&self) -> f64 {
        self.state().zdepth()
    }

    #[inline]
    fn is_visible(&self) -> bool {
        self.base().visible
    }

    /// Same visibility-aware content: both invisible, or equal tweenables.
    fn structurally_eq(&self, other: &Self) -> bool {
        (!self.is_visible() && !other.is_visible()) || self.state() == other.state()
    }

    // Undecorated interpolators. Override these, not the `tween_*` entry
    // points, to specialize a figure type.

    fn interp_linear(&self, other: &Self, t: f64, ignore: &[&str]) -> Result<Self, MorphoError> {
        let mut out = self.clone();
        out.base_mut().state = linear_state(self.state(), other.state(), t, ignore)?;
        Ok(out)
    }

    fn interp_spiral(&self, other: &Self, t: f64, ignore: &[&str]) -> Result<Self, MorphoError> {
        let mut out = self.clone();
        out.base_mut().state = spiral_state(self.state(), other.state(), t, ignore)?;
        Ok(out)
    }

    fn interp_pivot(
        &self,
        other: &Self,
        t: f64,
        angle: f64,
        ignore: &[&str],
    ) -> Result<Self, MorphoError> {
        let mut out = self.clone();
        out.base_mut().state = pivot_state(self.state(), other.state(), t, angle, ignore)?;
        Ok(out)
    }

    /// Run `method` at parameter `t`.
    ///
    /// `t == 0` yields a copy of `self` and `t == 1` a copy of `other`,
    /// whatever the method does in between.
    fn tween_with(&self, method: TweenMethod, other: &Self, t: f64) -> Result<Self, MorphoError> {
        if t == 0.0 {
            return Ok(self.clone());
        }
        if t == 1.0 {
            return Ok(other.clone());
        }
        match method {
            TweenMethod::Linear => self.interp_linear(other, t, &[]),
            TweenMethod::Spiral => self.interp_spiral(other, t, &[]),
            TweenMethod::Pivot { angle } => {
                check_pivot_angle(angle)?;
                self.interp_pivot(other, t, angle, &[])
            }
            TweenMethod::Instant => Ok(self.clone()),
        }
    }

    /// Tween with this figure's own policy: the transition reshapes `t`,
    /// then the method runs.
    fn tween(&self, other: &Self, t: f64) -> Result<Self, MorphoError> {
        self.tween_ext(other, t, false)
    }

    fn tween_ext(&self, other: &Self, t: f64, ignore_transition: bool) -> Result<Self, MorphoError> {
        let policy = self.policy();
        let tau = if ignore_transition {
            t
        } else {
            policy.transition.apply(t)
        };
        self.tween_with(policy.method, other, tau)
    }

    fn tween_linear(&self, other: &Self, t: f64) -> Result<Self, MorphoError> {
        self.tween_with(TweenMethod::Linear, other, t)
    }

    fn tween_spiral(&self, other: &Self, t: f64) -> Result<Self, MorphoError> {
        self.tween_with(TweenMethod::Spiral, other, t)
    }

    fn tween_pivot(&self, other: &Self, t: f64, angle: f64) -> Result<Self, MorphoError> {
        self.tween_with(TweenMethod::pivot(angle)?, other, t)
    }

    fn tween_instant(&self, other: &Self, t: f64) -> Result<Self, MorphoError> {
        self.tween_with(TweenMethod::Instant, other, t)
    }

    /// Copy with every fimage-eligible tweenable mapped through `func`.
    fn fimage(&self, func: &dyn Fn(Complex64) -> Complex64) -> Result<Self, MorphoError> {
        let mut out = self.clone();
        out.base_mut().state = self.state().fimage(func)?;
        Ok(out)
    }

    /// Emit draw calls. Figures with no visual form draw nothing.
    fn draw(&self, _viewport: &Viewport, _ctx: &mut dyn DrawContext) -> Result<(), MorphoError> {
        Ok(())
    }

    /// Add figure-specific named actions on top of the shared ones.
    fn register_actions(_registry: &mut ActionRegistry<Self>) {}
}
