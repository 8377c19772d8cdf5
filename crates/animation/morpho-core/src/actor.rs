//! Actor: a keyframe timeline of one figure type.
//!
//! Keyframes live in a `BTreeMap<i64, F>`, so the sorted key list is the map
//! order itself. `time(f)` samples the timeline: exact keys are returned as
//! copies, in-between frames are tweened with the earlier keyframe's policy,
//! and frames past the end hold the last keyframe when the actor persists.
//! Timeline algebra (shift, reverse, segment, ...) lives in `timeline.rs`.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::ops::Bound;

use log::{debug, trace};

use crate::action::{ActionArgs, ActionFn, ActionRegistry};
use crate::config::Config;
use crate::draw::{DrawContext, Viewport};
use crate::error::MorphoError;
use crate::figure::Figure;
use crate::ids::{fresh_actor_id, ActorId};
use crate::scratch::TimeCache;

/// Options of [`Actor::newkey_with`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyOptions {
    /// Split the surrounding tween so playback is unchanged.
    pub seamless: bool,
    /// Make the preceding keyframe jump to the new one at its index.
    pub instant: bool,
}

impl Default for KeyOptions {
    fn default() -> Self {
        Self {
            seamless: true,
            instant: false,
        }
    }
}

impl KeyOptions {
    pub fn plain() -> Self {
        Self {
            seamless: false,
            instant: false,
        }
    }

    pub fn instant() -> Self {
        Self {
            seamless: true,
            instant: true,
        }
    }
}

#[derive(Debug)]
pub struct Actor<F: Figure> {
    pub(crate) id: ActorId,
    pub(crate) timeline: BTreeMap<i64, F>,
    pub(crate) persist: bool,
    pub(crate) config: Config,
    pub(crate) actions: ActionRegistry<F>,
    pub(crate) cache: TimeCache<F>,
}

impl<F: Figure> Default for Actor<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Figure> Actor<F> {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            id: fresh_actor_id(),
            timeline: BTreeMap::new(),
            persist: F::PERSISTENT,
            cache: TimeCache::new(config.time_cache),
            actions: ActionRegistry::for_figure(),
            config,
        }
    }

    /// Actor seeded with `figure` at frame 0.
    pub fn from_figure(figure: F) -> Self {
        let mut actor = Self::new();
        actor.place(0, figure);
        actor
    }

    /// Copy under a fresh id; keyframes are re-owned by the copy.
    pub fn copy(&self) -> Self {
        let mut out = Self::with_config(self.config.clone());
        out.persist = self.persist;
        out.actions = self.actions.clone();
        for (f, fig) in &self.timeline {
            out.place(*f, fig.clone());
        }
        out
    }

    /// Empty actor sharing this one's settings, under a fresh id.
    pub(crate) fn empty_like(&self) -> Self {
        let mut out = Self::with_config(self.config.clone());
        out.persist = self.persist;
        out.actions = self.actions.clone();
        out
    }

    #[inline]
    pub fn id(&self) -> ActorId {
        self.id
    }

    #[inline]
    pub fn figure_type(&self) -> &'static str {
        F::TYPE_NAME
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replace the settings; the time cache restarts under the new ones.
    pub fn set_config(&mut self, config: Config) {
        self.cache = TimeCache::new(config.time_cache);
        self.config = config;
    }

    #[inline]
    pub fn persist(&self) -> bool {
        self.persist
    }

    pub fn set_persist(&mut self, persist: bool) {
        self.cache.invalidate();
        self.persist = persist;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.timeline.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.timeline.is_empty()
    }

    #[inline]
    pub fn contains_key(&self, f: i64) -> bool {
        self.timeline.contains_key(&f)
    }

    pub fn key_ids(&self) -> Vec<i64> {
        self.timeline.keys().copied().collect()
    }

    pub fn keys(&self) -> impl Iterator<Item = (i64, &F)> {
        self.timeline.iter().map(|(f, fig)| (*f, fig))
    }

    pub fn first_id(&self) -> Option<i64> {
        self.timeline.keys().next().copied()
    }

    pub fn last_id(&self) -> Option<i64> {
        self.timeline.keys().next_back().copied()
    }

    pub fn first(&self) -> Option<&F> {
        self.timeline.values().next()
    }

    pub fn last(&self) -> Option<&F> {
        self.timeline.values().next_back()
    }

    #[inline]
    pub fn key(&self, f: i64) -> Option<&F> {
        self.timeline.get(&f)
    }

    /// Mutable access to a keyframe; clears the time cache.
    pub fn key_mut(&mut self, f: i64) -> Option<&mut F> {
        self.cache.invalidate();
        self.timeline.get_mut(&f)
    }

    /// Greatest keyframe index `<= f`.
    pub fn latest_key_id(&self, f: f64) -> Option<i64> {
        self.timeline
            .range(..=f.floor() as i64)
            .next_back()
            .map(|(k, _)| *k)
    }

    /// Smallest keyframe index `> f`.
    pub fn next_key_id(&self, f: f64) -> Option<i64> {
        self.timeline
            .range((Bound::Excluded(f.floor() as i64), Bound::Unbounded))
            .next()
            .map(|(k, _)| *k)
    }

    pub(crate) fn place(&mut self, f: i64, mut figure: F) -> &mut F {
        self.cache.invalidate();
        figure.base_mut().owner = Some(self.id);
        match self.timeline.entry(f) {
            Entry::Occupied(mut slot) => {
                slot.insert(figure);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(figure),
        }
    }

    // ----- sampling -----

    /// Figure shown at frame `f`, with modifiers applied. `None` before the
    /// first keyframe, and past the last one unless the actor persists.
    pub fn time(&self, f: f64) -> Result<Option<F>, MorphoError> {
        self.time_with(f, true)
    }

    pub fn time_with(&self, f: f64, use_modifier: bool) -> Result<Option<F>, MorphoError> {
        if let Some(hit) = self.cache.get(f, use_modifier) {
            trace!("actor {:?}: time({f}) served from cache", self.id);
            return Ok(hit);
        }
        let mut figure = self.resolve(f)?;
        if use_modifier {
            if let Some(fig) = figure.as_mut() {
                if let Some(modifier) = fig.base().modifier.clone() {
                    modifier(fig.state_mut(), f);
                }
            }
        }
        self.cache.store(f, use_modifier, figure.clone());
        Ok(figure)
    }

    /// Timeline lookup without cache or modifiers.
    pub(crate) fn resolve(&self, f: f64) -> Result<Option<F>, MorphoError> {
        if !f.is_finite() {
            return Err(MorphoError::invalid(format!("frame {f} is not finite")));
        }
        let Some(key_id) = self.latest_key_id(f) else {
            return Ok(None);
        };
        let key = &self.timeline[&key_id];
        if f == key_id as f64 {
            return Ok(Some(key.clone()));
        }
        let Some(next_id) = self.next_key_id(f) else {
            return Ok(self.persist.then(|| key.clone()));
        };
        let start = key_id as f64 + key.base().delay;
        if key.base().is_static || f <= start {
            return Ok(Some(key.clone()));
        }
        let t = (f - start) / (next_id as f64 - start);
        key.tween(&self.timeline[&next_id], t).map(Some)
    }

    /// What `newkey(f)` inserts when no figure is given: the keyframe at `f`,
    /// else the sampled figure, else a copy of the preceding keyframe. Before
    /// the first keyframe it is a fresh figure with the configured policy.
    pub fn figure_for(&self, f: i64) -> Result<F, MorphoError> {
        if let Some(key) = self.timeline.get(&f) {
            return Ok(key.clone());
        }
        if let Some(fig) = self.resolve(f as f64)? {
            return Ok(fig);
        }
        Ok(match self.timeline.range(..f).next_back() {
            Some((_, fig)) => fig.clone(),
            None => {
                let mut fig = F::default();
                fig.set_policy(self.config.default_policy.clone());
                fig
            }
        })
    }

    // ----- keyframe editing -----

    /// Insert (or replace) the keyframe at `f`, splitting the surrounding
    /// tween so playback is unchanged.
    pub fn newkey(&mut self, f: i64, figure: Option<F>) -> Result<&mut F, MorphoError> {
        self.newkey_with(f, figure, KeyOptions::default())
    }

    pub fn newkey_with(
        &mut self,
        f: i64,
        figure: Option<F>,
        opts: KeyOptions,
    ) -> Result<&mut F, MorphoError> {
        let existed = self.timeline.contains_key(&f);
        let prev = self.timeline.range(..f).next_back().map(|(k, _)| *k);
        let next = self
            .timeline
            .range((Bound::Excluded(f), Bound::Unbounded))
            .next()
            .map(|(k, _)| *k);
        let interior = !existed && prev.is_some() && next.is_some();

        let computed = figure.is_none();
        let mut figure = match figure {
            Some(fig) => fig,
            None => self.figure_for(f)?,
        };
        if computed && interior {
            // A sampled figure is a copy of the earlier keyframe.
            figure.base_mut().delay = 0.0;
            figure.base_mut().is_static = false;
        }

        let mut beg_policy = None;
        if let (true, true, Some(p), Some(n)) = (interior, opts.seamless, prev, next) {
            let beg = &self.timeline[&p];
            let start = p as f64 + beg.base().delay;
            if beg.base().is_static {
                figure.base_mut().is_static = true;
            } else if f as f64 <= start {
                figure.base_mut().delay = start - f as f64;
                figure.set_policy(beg.policy().clone());
            } else {
                let s = (f as f64 - start) / (n as f64 - start);
                match beg.policy().split(s) {
                    Some((beg_half, mid_half)) => {
                        debug!(
                            "actor {:?}: split {} tween {p}->{n} at frame {f} (s={s:.4})",
                            self.id,
                            beg.policy().method.name()
                        );
                        figure.set_policy(mid_half);
                        beg_policy = Some(beg_half);
                    }
                    None => debug!(
                        "actor {:?}: {} tween has no splitter; inserting at {f} as is",
                        self.id,
                        beg.policy().method.name()
                    ),
                }
            }
        }

        if let (Some(p), Some(policy)) = (prev, beg_policy) {
            if let Some(beg) = self.timeline.get_mut(&p) {
                beg.set_policy(policy);
            }
        }
        if opts.instant && !existed {
            if let Some(beg) = prev.and_then(|p| self.timeline.get_mut(&p)) {
                beg.base_mut().is_static = true;
            }
        }
        Ok(self.place(f, figure))
    }

    /// Keyframe `df` frames after the last one (at `df` on an empty actor).
    pub fn newendkey(&mut self, df: i64, figure: Option<F>) -> Result<&mut F, MorphoError> {
        self.newendkey_with(df, figure, KeyOptions::default())
    }

    pub fn newendkey_with(
        &mut self,
        df: i64,
        figure: Option<F>,
        opts: KeyOptions,
    ) -> Result<&mut F, MorphoError> {
        let f = self.last_id().map_or(df, |last| last + df);
        self.newkey_with(f, figure, opts)
    }

    /// Remove and return the keyframe at `f`.
    pub fn delkey(&mut self, f: i64) -> Result<F, MorphoError> {
        let mut figure = self
            .timeline
            .remove(&f)
            .ok_or(MorphoError::KeyframeNotFound { frame: f })?;
        self.cache.invalidate();
        figure.base_mut().owner = None;
        Ok(figure)
    }

    /// Move the keyframe at `src` to `dst`, replacing any keyframe there.
    pub fn movekey(&mut self, src: i64, dst: i64) -> Result<(), MorphoError> {
        let figure = self
            .timeline
            .remove(&src)
            .ok_or(MorphoError::KeyframeNotFound { frame: src })?;
        self.place(dst, figure);
        Ok(())
    }

    /// Index of the first keyframe structurally equal to `figure`.
    pub fn timeof(&self, figure: &F) -> Result<i64, MorphoError> {
        self.timeline
            .iter()
            .find(|(_, key)| key.structurally_eq(figure))
            .map(|(f, _)| *f)
            .ok_or_else(|| MorphoError::FigureNotFound {
                figure_type: F::TYPE_NAME.to_string(),
            })
    }

    // ----- rendering and actions -----

    pub fn draw(
        &self,
        f: f64,
        viewport: &Viewport,
        ctx: &mut dyn DrawContext,
    ) -> Result<(), MorphoError> {
        match self.time(f)? {
            Some(fig) if fig.is_visible() => fig.draw(viewport, ctx),
            _ => Ok(()),
        }
    }

    pub fn register_action(&mut self, name: &'static str, action: ActionFn<F>) {
        self.actions.register(name, action);
    }

    pub fn action_names(&self) -> Vec<&'static str> {
        self.actions.names()
    }

    /// Run the named action.
    pub fn act(&mut self, name: &str, args: &ActionArgs) -> Result<(), MorphoError> {
        let action = self
            .actions
            .get(name)
            .ok_or_else(|| MorphoError::ActionNotFound {
                figure_type: F::TYPE_NAME.to_string(),
                action: name.to_string(),
            })?;
        debug!("actor {:?}: action '{name}' {args:?}", self.id);
        action(self, args)
    }
}
