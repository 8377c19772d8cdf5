use crate::draw::{DrawContext, Style, Viewport};
use crate::error::MorphoError;
use crate::figure::{Figure, FigureBase};
use crate::interp::functions::lerp_complex;
use crate::state::FigureState;
use crate::tag::TagSet;
use crate::tweenable::Tweenable;
use crate::value::{Complex64, TweenValue};

pub const SEQ: &str = "seq";
pub const WIDTH: &str = "width";
pub const COLOR: &str = "color";
pub const ALPHA: &str = "alpha";
pub const START: &str = "start";
pub const END: &str = "end";

/// A polyline through complex nodes.
///
/// `start`/`end` select the drawn portion as fractions of the node
/// parameter range. Tweening two paths with different node counts first
/// subdivides the shorter one so both share a node count.
#[derive(Clone, Debug)]
pub struct Path {
    base: FigureBase,
}

impl Default for Path {
    fn default() -> Self {
        Self::new(vec![Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)])
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.structurally_eq(other)
    }
}

impl Path {
    pub fn new(seq: Vec<Complex64>) -> Self {
        let mut state = FigureState::new();
        state.declare(Tweenable::declared(
            SEQ,
            TweenValue::complex_list(seq),
            TagSet::COMPLEX | TagSet::LIST,
        ));
        state.declare(Tweenable::declared(WIDTH, 3.0, TagSet::SIZE));
        state.declare(Tweenable::declared(COLOR, TweenValue::Color([1.0; 3]), TagSet::COLOR));
        state.declare(Tweenable::declared(ALPHA, 1.0, TagSet::SCALAR));
        state.declare(Tweenable::declared(START, 0.0, TagSet::SCALAR));
        state.declare(Tweenable::declared(END, 1.0, TagSet::SCALAR));
        Self {
            base: FigureBase::new(state),
        }
    }

    fn scalar(&self, name: &str) -> f64 {
        self.state().value(name).and_then(|v| v.as_scalar()).unwrap_or(0.0)
    }

    pub fn seq(&self) -> Vec<Complex64> {
        self.state()
            .value(SEQ)
            .and_then(|v| v.complex_points())
            .unwrap_or_default()
    }

    pub fn set_seq(&mut self, seq: Vec<Complex64>) -> Result<(), MorphoError> {
        self.state_mut().set(SEQ, TweenValue::complex_list(seq))
    }

    pub fn node_count(&self) -> usize {
        self.state()
            .value(SEQ)
            .and_then(|v| v.as_list())
            .map_or(0, |items| items.len())
    }

    pub fn set_alpha(&mut self, alpha: f64) -> Result<(), MorphoError> {
        self.state_mut().set(ALPHA, alpha)
    }

    pub fn set_span(&mut self, start: f64, end: f64) -> Result<(), MorphoError> {
        self.state_mut().set(START, start)?;
        self.state_mut().set(END, end)
    }

    /// Add `extra` nodes, spread as evenly as possible over the segments,
    /// without changing the drawn shape.
    pub fn insert_nodes(&mut self, extra: usize) -> Result<(), MorphoError> {
        let seq = self.seq();
        if seq.is_empty() {
            return Err(MorphoError::invalid("cannot subdivide an empty path"));
        }
        if extra == 0 {
            return Ok(());
        }
        let segments = seq.len() - 1;
        let mut out = Vec::with_capacity(seq.len() + extra);
        if segments == 0 {
            out.extend(std::iter::repeat(seq[0]).take(extra + 1));
            return self.set_seq(out);
        }
        for (k, pair) in seq.windows(2).enumerate() {
            let inner = extra / segments + usize::from(k < extra % segments);
            out.push(pair[0]);
            for j in 1..=inner {
                let t = j as f64 / (inner + 1) as f64;
                out.push(lerp_complex(pair[0], pair[1], t));
            }
        }
        out.push(seq[segments]);
        self.set_seq(out)
    }

    /// Copies of `self` and `other` with matching node counts.
    fn matched(&self, other: &Self) -> Result<(Self, Self), MorphoError> {
        let (n, m) = (self.node_count(), other.node_count());
        let mut a = self.clone();
        let mut b = other.clone();
        if n < m {
            a.insert_nodes(m - n)?;
        } else if m < n {
            b.insert_nodes(n - m)?;
        }
        Ok((a, b))
    }

    /// Nodes between the `start` and `end` fractions, with partial end
    /// segments cut by interpolation.
    pub fn visible_nodes(&self) -> Vec<Complex64> {
        let seq = self.seq();
        if seq.len() < 2 {
            return seq;
        }
        let last = (seq.len() - 1) as f64;
        let s = self.scalar(START).clamp(0.0, 1.0) * last;
        let e = self.scalar(END).clamp(0.0, 1.0) * last;
        if e <= s {
            return Vec::new();
        }
        let at = |u: f64| {
            let i = (u.floor() as usize).min(seq.len() - 2);
            lerp_complex(seq[i], seq[i + 1], u - i as f64)
        };
        let mut out = vec![at(s)];
        let mut k = s.floor() as usize + 1;
        while (k as f64) < e {
            out.push(seq[k]);
            k += 1;
        }
        out.push(at(e));
        out
    }
}

impl Figure for Path {
    const TYPE_NAME: &'static str = "Path";

    fn base(&self) -> &FigureBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut FigureBase {
        &mut self.base
    }

    fn interp_linear(&self, other: &Self, t: f64, ignore: &[&str]) -> Result<Self, MorphoError> {
        let (a, b) = self.matched(other)?;
        let mut out = self.clone();
        out.base.state = crate::interp::linear_state(a.state(), b.state(), t, ignore)?;
        Ok(out)
    }

    fn interp_spiral(&self, other: &Self, t: f64, ignore: &[&str]) -> Result<Self, MorphoError> {
        let (a, b) = self.matched(other)?;
        let mut out = self.clone();
        out.base.state = crate::interp::spiral_state(a.state(), b.state(), t, ignore)?;
        Ok(out)
    }

    fn interp_pivot(
        &self,
        other: &Self,
        t: f64,
        angle: f64,
        ignore: &[&str],
    ) -> Result<Self, MorphoError> {
        let (a, b) = self.matched(other)?;
        let mut out = self.clone();
        out.base.state = crate::interp::pivot_state(a.state(), b.state(), t, angle, ignore)?;
        Ok(out)
    }

    fn draw(&self, viewport: &Viewport, ctx: &mut dyn DrawContext) -> Result<(), MorphoError> {
        let nodes = self.visible_nodes();
        if nodes.len() < 2 {
            return Ok(());
        }
        let size = ctx.size();
        let pixels: Vec<(f64, f64)> = nodes.iter().map(|z| viewport.to_pixel(*z, size)).collect();
        let style = Style {
            stroke: self
                .state()
                .value(COLOR)
                .and_then(|v| v.as_color())
                .unwrap_or([1.0; 3]),
            stroke_width: self.scalar(WIDTH),
            fill: None,
            alpha: self.scalar(ALPHA),
        };
        ctx.polyline(&pixels, &style);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn insert_nodes_spreads_over_segments() {
        let mut path = Path::new(vec![c(0.0, 0.0), c(2.0, 0.0), c(2.0, 2.0)]);
        path.insert_nodes(3).unwrap();
        assert_eq!(
            path.seq(),
            vec![
                c(0.0, 0.0),
                c(2.0 / 3.0, 0.0),
                c(4.0 / 3.0, 0.0),
                c(2.0, 0.0),
                c(2.0, 1.0),
                c(2.0, 2.0)
            ]
        );
    }

    #[test]
    fn tweening_mismatched_paths_matches_node_counts() {
        let a = Path::new(vec![c(0.0, 0.0), c(2.0, 0.0)]);
        let b = Path::new(vec![c(0.0, 2.0), c(1.0, 2.0), c(2.0, 2.0)]);
        let mid = a.tween_linear(&b, 0.5).unwrap();
        assert_eq!(mid.seq(), vec![c(0.0, 1.0), c(1.0, 1.0), c(2.0, 1.0)]);
        // endpoints keep their own node counts
        assert_eq!(a.tween_linear(&b, 0.0).unwrap().node_count(), 2);
    }

    #[test]
    fn visible_nodes_cut_partial_segments() {
        let mut path = Path::new(vec![c(0.0, 0.0), c(1.0, 0.0), c(2.0, 0.0)]);
        path.set_span(0.25, 0.75).unwrap();
        assert_eq!(path.visible_nodes(), vec![c(0.5, 0.0), c(1.0, 0.0), c(1.5, 0.0)]);
        path.set_span(0.6, 0.6).unwrap();
        assert!(path.visible_nodes().is_empty());
    }
}
