use crate::draw::{DrawContext, Style, Viewport};
use crate::error::MorphoError;
use crate::figure::{Figure, FigureBase};
use crate::state::FigureState;
use crate::tag::TagSet;
use crate::tweenable::Tweenable;
use crate::value::{Complex64, TweenValue};

pub const POS: &str = "pos";
pub const SIZE: &str = "size";
pub const STROKE_WEIGHT: &str = "stroke_weight";
pub const COLOR: &str = "color";
pub const FILL: &str = "fill";
pub const ALPHA: &str = "alpha";

/// A dot: position, pixel size, stroke and fill.
#[derive(Clone, Debug)]
pub struct Point {
    base: FigureBase,
}

impl Default for Point {
    fn default() -> Self {
        Self::new(Complex64::new(0.0, 0.0))
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.structurally_eq(other)
    }
}

impl Point {
    pub fn new(pos: Complex64) -> Self {
        let mut state = FigureState::new();
        state.declare(Tweenable::declared(POS, pos, TagSet::COMPLEX));
        state.declare(Tweenable::declared(SIZE, 15.0, TagSet::SIZE));
        state.declare(Tweenable::declared(STROKE_WEIGHT, 1.0, TagSet::SIZE));
        state.declare(Tweenable::declared(COLOR, TweenValue::Color([0.0; 3]), TagSet::COLOR));
        state.declare(Tweenable::declared(FILL, TweenValue::Color([1.0, 0.0, 0.0]), TagSet::COLOR));
        state.declare(Tweenable::declared(ALPHA, 1.0, TagSet::SCALAR));
        Self {
            base: FigureBase::new(state),
        }
    }

    pub fn at(re: f64, im: f64) -> Self {
        Self::new(Complex64::new(re, im))
    }

    fn scalar(&self, name: &str) -> f64 {
        self.state().value(name).and_then(|v| v.as_scalar()).unwrap_or(0.0)
    }

    fn color(&self, name: &str) -> [f64; 3] {
        self.state().value(name).and_then(|v| v.as_color()).unwrap_or([0.0; 3])
    }

    pub fn pos(&self) -> Complex64 {
        self.state()
            .value(POS)
            .and_then(|v| v.as_complex())
            .unwrap_or_default()
    }

    pub fn set_pos(&mut self, pos: Complex64) -> Result<(), MorphoError> {
        self.state_mut().set(POS, pos)
    }

    pub fn size(&self) -> f64 {
        self.scalar(SIZE)
    }

    pub fn alpha(&self) -> f64 {
        self.scalar(ALPHA)
    }

    pub fn set_alpha(&mut self, alpha: f64) -> Result<(), MorphoError> {
        self.state_mut().set(ALPHA, alpha)
    }

    pub fn set_fill(&mut self, fill: [f64; 3]) -> Result<(), MorphoError> {
        self.state_mut().set(FILL, TweenValue::Color(fill))
    }

    pub fn set_zdepth(&mut self, zdepth: f64) -> Result<(), MorphoError> {
        self.state_mut().set(crate::state::ZDEPTH, zdepth)
    }
}

impl Figure for Point {
    const TYPE_NAME: &'static str = "Point";

    fn base(&self) -> &FigureBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut FigureBase {
        &mut self.base
    }

    fn draw(&self, viewport: &Viewport, ctx: &mut dyn DrawContext) -> Result<(), MorphoError> {
        let size = ctx.size();
        let style = Style {
            stroke: self.color(COLOR),
            stroke_width: self.scalar(STROKE_WEIGHT),
            fill: Some(self.color(FILL)),
            alpha: self.alpha(),
        };
        ctx.dot(viewport.to_pixel(self.pos(), size), self.size() / 2.0, &style);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{CommandRecorder, DrawCommand};

    #[test]
    fn tween_endpoints_are_copies() {
        let a = Point::at(0.0, 0.0);
        let b = Point::at(10.0, 0.0);
        assert_eq!(a.tween(&b, 0.0).unwrap(), a);
        assert_eq!(a.tween(&b, 1.0).unwrap(), b);
    }

    #[test]
    fn invisible_points_compare_equal() {
        let mut a = Point::at(0.0, 0.0);
        let mut b = Point::at(3.0, 0.0);
        assert_ne!(a, b);
        a.base_mut().visible = false;
        b.base_mut().visible = false;
        assert_eq!(a, b);
    }

    #[test]
    fn draws_a_single_dot() {
        let p = Point::at(0.0, 0.0);
        let mut rec = CommandRecorder::new(100, 100);
        p.draw(&Viewport::default(), &mut rec).unwrap();
        match rec.commands.as_slice() {
            [DrawCommand::Dot { center, radius, .. }] => {
                assert_eq!(*center, (50.0, 50.0));
                assert_eq!(*radius, 7.5);
            }
            other => panic!("unexpected commands {other:?}"),
        }
    }
}
