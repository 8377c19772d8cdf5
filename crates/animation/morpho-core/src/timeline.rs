//! Timeline algebra on actors: re-indexing, slicing and splicing keyframes.
//!
//! Every operation builds the new key map first and swaps it in, so a
//! failing call leaves the actor untouched. When two keyframes land on the
//! same index, the one that comes later in the source order wins.

use std::collections::BTreeMap;

use log::debug;

use crate::actor::{Actor, KeyOptions};
use crate::error::MorphoError;
use crate::figure::Figure;
use crate::value::Complex64;

impl<F: Figure> Actor<F> {
    fn reindex(&mut self, map: impl Fn(i64) -> i64) {
        let old = std::mem::take(&mut self.timeline);
        let mut new = BTreeMap::new();
        for (f, fig) in old {
            new.insert(map(f), fig);
        }
        self.timeline = new;
        self.cache.invalidate();
    }

    /// Move every keyframe by `n` frames.
    pub fn shift(&mut self, n: i64) -> &mut Self {
        self.reindex(|f| f + n);
        self
    }

    /// Move keyframes strictly after `pivot` by `n`; moved keyframes replace
    /// any they land on.
    pub fn shift_after(&mut self, pivot: i64, n: i64) -> &mut Self {
        let moved = self.timeline.split_off(&(pivot + 1));
        for (f, fig) in moved {
            self.timeline.insert(f + n, fig);
        }
        self.cache.invalidate();
        self
    }

    /// Move keyframes strictly before `pivot` by `n`; moved keyframes replace
    /// any they land on.
    pub fn shift_before(&mut self, pivot: i64, n: i64) -> &mut Self {
        let kept = self.timeline.split_off(&pivot);
        let moved = std::mem::replace(&mut self.timeline, kept);
        for (f, fig) in moved {
            self.timeline.insert(f + n, fig);
        }
        self.cache.invalidate();
        self
    }

    /// Shift so the first keyframe sits at frame 0.
    pub fn rezero(&mut self) -> &mut Self {
        if let Some(first) = self.first_id() {
            self.shift(-first);
        }
        self
    }

    /// Mirror keyframe indices within `[first, last]`.
    ///
    /// Only indices move: each keyframe keeps its own tween policy, so a
    /// reversed actor interpolates each interval with the policy of the
    /// keyframe now at its start.
    pub fn reverse(&mut self) -> &mut Self {
        if let (Some(first), Some(last)) = (self.first_id(), self.last_id()) {
            self.reindex(|f| first + last - f);
        }
        self
    }

    /// Compress time about `center` by `factor` (> 1 plays faster).
    /// New indices are `round(center + (f - center) / factor)` in absolute
    /// frames, so ties below the center round up too. Hold windows scale
    /// along.
    pub fn speed_up(&mut self, factor: f64, center: i64) -> Result<&mut Self, MorphoError> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(MorphoError::invalid(format!(
                "speed factor must be positive, got {factor}"
            )));
        }
        let old = std::mem::take(&mut self.timeline);
        let mut new = BTreeMap::new();
        for (f, mut fig) in old {
            let g = ((f - center) as f64 / factor + center as f64).round() as i64;
            if fig.base().delay.is_finite() {
                fig.base_mut().delay /= factor;
            }
            new.insert(g, fig);
        }
        self.timeline = new;
        self.cache.invalidate();
        Ok(self)
    }

    /// New actor with the keyframes in `[start, end]`.
    ///
    /// Boundary keyframes are synthesized from the sampled timeline (split
    /// seamlessly when `seamless`), so the segment plays exactly as that
    /// window of `self`. With `rezero` the segment starts at frame 0.
    pub fn segment(
        &self,
        start: i64,
        end: i64,
        seamless: bool,
        rezero: bool,
    ) -> Result<Actor<F>, MorphoError> {
        if end < start {
            return Err(MorphoError::invalid(format!(
                "segment end {end} precedes start {start}"
            )));
        }
        let opts = KeyOptions {
            seamless,
            instant: false,
        };
        let mut work = self.copy();
        for f in [start, end] {
            if !work.contains_key(f) && work.resolve(f as f64)?.is_some() {
                work.newkey_with(f, None, opts)?;
            }
        }
        let mut out = self.empty_like();
        for (f, fig) in work.timeline.range(start..=end) {
            out.place(*f, fig.clone());
        }
        if rezero {
            out.shift(-start);
        }
        debug!(
            "actor {:?}: segment [{start}, {end}] -> {} keyframes",
            self.id,
            out.len()
        );
        Ok(out)
    }

    /// Splice `other` in right after `after_frame`: this actor's later
    /// keyframes move back to make room for all of `other`.
    pub fn insert(&mut self, other: &Actor<F>, after_frame: i64) -> &mut Self {
        let (Some(first), Some(last)) = (other.first_id(), other.last_id()) else {
            return self;
        };
        let span = last - first + 1;
        self.shift_after(after_frame, span);
        for (f, fig) in &other.timeline {
            self.place(after_frame + 1 + (f - first), fig.clone());
        }
        self
    }

    /// Overlay `other`'s keyframes, offset so its first keyframe lands on
    /// `at_frame`. Incoming keyframes replace existing ones on collision.
    pub fn merge(&mut self, other: &Actor<F>, at_frame: i64) -> &mut Self {
        let Some(first) = other.first_id() else {
            return self;
        };
        for (f, fig) in &other.timeline {
            self.place(at_frame + (f - first), fig.clone());
        }
        self
    }

    /// Map every keyframe through `func` (see [`Figure::fimage`]).
    pub fn fimage(&mut self, func: &dyn Fn(Complex64) -> Complex64) -> Result<&mut Self, MorphoError> {
        let mut mapped = BTreeMap::new();
        for (f, fig) in &self.timeline {
            mapped.insert(*f, fig.fimage(func)?);
        }
        self.timeline = mapped;
        self.cache.invalidate();
        Ok(self)
    }
}
