//! Named, argument-driven keyframe generators ("actions").
//!
//! An action appends keyframes to an actor to produce a stock effect. The
//! shared ones work for any figure that has an `alpha` tweenable (fades) or
//! complex geometry (shifts); figure types add their own through
//! [`Figure::register_actions`].

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::actor::Actor;
use crate::error::MorphoError;
use crate::figure::Figure;
use crate::value::Complex64;

const ALPHA: &str = "alpha";

/// Arguments shared by every action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionArgs {
    /// Length of the effect in frames.
    pub duration: i64,
    /// Frame the effect starts at; defaults to the actor's last keyframe.
    pub at_frame: Option<i64>,
    /// Displacement `[dx, dy]` for actions that move the figure.
    pub offset: Option<[f64; 2]>,
}

impl Default for ActionArgs {
    fn default() -> Self {
        Self {
            duration: 30,
            at_frame: None,
            offset: None,
        }
    }
}

impl ActionArgs {
    pub fn duration(duration: i64) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    pub fn at(mut self, frame: i64) -> Self {
        self.at_frame = Some(frame);
        self
    }

    pub fn offset(mut self, dx: f64, dy: f64) -> Self {
        self.offset = Some([dx, dy]);
        self
    }

    fn displacement(&self) -> Complex64 {
        self.offset
            .map_or(Complex64::new(0.0, 0.0), |[dx, dy]| Complex64::new(dx, dy))
    }

    fn start_frame<F: Figure>(&self, actor: &Actor<F>) -> Result<i64, MorphoError> {
        self.at_frame
            .or_else(|| actor.last_id())
            .ok_or_else(|| MorphoError::invalid("action needs a start frame on an empty actor"))
    }
}

pub type ActionFn<F> = fn(&mut Actor<F>, &ActionArgs) -> Result<(), MorphoError>;

pub struct ActionRegistry<F: Figure> {
    actions: HashMap<&'static str, ActionFn<F>>,
}

impl<F: Figure> Clone for ActionRegistry<F> {
    fn clone(&self) -> Self {
        Self {
            actions: self.actions.clone(),
        }
    }
}

impl<F: Figure> fmt::Debug for ActionRegistry<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

impl<F: Figure> Default for ActionRegistry<F> {
    fn default() -> Self {
        Self::for_figure()
    }
}

impl<F: Figure> ActionRegistry<F> {
    pub fn empty() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    /// Shared actions plus whatever `F` registers.
    pub fn for_figure() -> Self {
        let mut registry = Self::empty();
        registry.register("fade_in", fade_in::<F>);
        registry.register("fade_out", fade_out::<F>);
        registry.register("shift_by", shift_by::<F>);
        F::register_actions(&mut registry);
        registry
    }

    pub fn register(&mut self, name: &'static str, action: ActionFn<F>) {
        self.actions.insert(name, action);
    }

    pub fn get(&self, name: &str) -> Option<ActionFn<F>> {
        self.actions.get(name).copied()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.actions.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

/// Fade from transparent (displaced by `-offset`) into the figure at the
/// start frame.
pub fn fade_in<F: Figure>(actor: &mut Actor<F>, args: &ActionArgs) -> Result<(), MorphoError> {
    let at = args.start_frame(actor)?;
    let mut end = actor.figure_for(at)?;
    end.state().require(ALPHA)?;
    end.base_mut().visible = true;
    let shift = args.displacement();
    let mut start = end.fimage(&|z| z - shift)?;
    start.state_mut().set(ALPHA, 0.0)?;

    actor.newkey(at, Some(start))?;
    actor.newkey(at + args.duration, Some(end))?;
    Ok(())
}

/// Fade the figure at the start frame out (displaced by `offset`), ending
/// invisible.
pub fn fade_out<F: Figure>(actor: &mut Actor<F>, args: &ActionArgs) -> Result<(), MorphoError> {
    let at = args.start_frame(actor)?;
    let start = actor.figure_for(at)?;
    start.state().require(ALPHA)?;
    let shift = args.displacement();
    let mut end = start.fimage(&|z| z + shift)?;
    end.state_mut().set(ALPHA, 0.0)?;
    end.base_mut().visible = false;

    actor.newkey(at, None)?;
    actor.newkey(at + args.duration, Some(end))?;
    Ok(())
}

/// Translate the figure by `offset` over `duration` frames.
pub fn shift_by<F: Figure>(actor: &mut Actor<F>, args: &ActionArgs) -> Result<(), MorphoError> {
    if args.offset.is_none() {
        return Err(MorphoError::invalid("shift_by requires an offset"));
    }
    let at = args.start_frame(actor)?;
    let shift = args.displacement();
    let end = actor.figure_for(at)?.fimage(&|z| z + shift)?;

    actor.newkey(at, None)?;
    actor.newkey(at + args.duration, Some(end))?;
    Ok(())
}
