use nalgebra::DMatrix;

use crate::draw::Viewport;
use crate::error::MorphoError;
use crate::figure::{Figure, FigureBase};
use crate::state::FigureState;
use crate::tag::TagSet;
use crate::tweenable::Tweenable;
use crate::value::{Complex64, TweenValue};

pub const VIEW: &str = "view";

/// Camera of a layer; its only tweenable is the view box.
///
/// The view is not fimage-eligible: mapping a scene through a function
/// leaves the camera where it is.
#[derive(Clone, Debug)]
pub struct Camera {
    base: FigureBase,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new([-5.0, 5.0, -5.0, 5.0])
    }
}

impl PartialEq for Camera {
    fn eq(&self, other: &Self) -> bool {
        self.structurally_eq(other)
    }
}

impl Camera {
    pub fn new(view: [f64; 4]) -> Self {
        let mut state = FigureState::new();
        state.declare(Tweenable::declared(
            VIEW,
            TweenValue::Array(DMatrix::from_row_slice(1, 4, &view)),
            TagSet::NPARRAY | TagSet::NOFIMAGE,
        ));
        Self {
            base: FigureBase::new(state),
        }
    }

    pub fn view(&self) -> Result<[f64; 4], MorphoError> {
        match self.state().value(VIEW) {
            Some(TweenValue::Array(m)) if m.len() == 4 => Ok([m[0], m[1], m[2], m[3]]),
            _ => Err(MorphoError::invalid("camera view must be a 4-element array")),
        }
    }

    pub fn set_view(&mut self, view: [f64; 4]) -> Result<(), MorphoError> {
        self.state_mut()
            .set(VIEW, TweenValue::Array(DMatrix::from_row_slice(1, 4, &view)))
    }

    pub fn viewport(&self) -> Result<Viewport, MorphoError> {
        Viewport::new(self.view()?)
    }

    /// Scale the view box about its center; `factor > 1` zooms in.
    pub fn zoom_in(&mut self, factor: f64) -> Result<(), MorphoError> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(MorphoError::invalid(format!("zoom factor {factor}")));
        }
        let vp = self.viewport()?;
        let c = vp.center();
        let (hw, hh) = (vp.width() / (2.0 * factor), vp.height() / (2.0 * factor));
        self.set_view([c.re - hw, c.re + hw, c.im - hh, c.im + hh])
    }

    /// Translate the view box so it is centered on `center`.
    pub fn center_at(&mut self, center: Complex64) -> Result<(), MorphoError> {
        let vp = self.viewport()?;
        let shift = center - vp.center();
        self.set_view([
            vp.xmin + shift.re,
            vp.xmax + shift.re,
            vp.ymin + shift.im,
            vp.ymax + shift.im,
        ])
    }
}

impl Figure for Camera {
    const TYPE_NAME: &'static str = "Camera";

    fn base(&self) -> &FigureBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut FigureBase {
        &mut self.base
    }
}
