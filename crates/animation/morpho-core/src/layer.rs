//! Layers: a camera plus a heterogeneous set of actors drawn together.

use std::any::Any;
use std::fmt;

use log::warn;

use crate::actor::Actor;
use crate::config::Config;
use crate::draw::{DrawContext, Viewport};
use crate::error::MorphoError;
use crate::figure::Figure;
use crate::figures::Camera;
use crate::ids::ActorId;

/// Object-safe view of an [`Actor`] of any figure type.
pub trait AnyActor: fmt::Debug {
    fn id(&self) -> ActorId;
    fn figure_type(&self) -> &'static str;
    fn first_id(&self) -> Option<i64>;
    fn last_id(&self) -> Option<i64>;
    fn set_config(&mut self, config: Config);

    /// Draw order of the visible figure at `f`; `None` when nothing shows.
    fn zdepth_at(&self, f: f64) -> Result<Option<f64>, MorphoError>;

    fn draw_at(
        &self,
        f: f64,
        viewport: &Viewport,
        ctx: &mut dyn DrawContext,
    ) -> Result<(), MorphoError>;

    /// Insert a type-erased figure; rejects figures of another type.
    fn newkey_dyn(&mut self, f: i64, figure: Box<dyn Any>) -> Result<(), MorphoError>;

    /// Overlay another actor; rejects actors of another figure type.
    fn merge_dyn(&mut self, other: &dyn AnyActor, at_frame: i64) -> Result<(), MorphoError>;

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<F: Figure> AnyActor for Actor<F> {
    fn id(&self) -> ActorId {
        Actor::id(self)
    }

    fn figure_type(&self) -> &'static str {
        F::TYPE_NAME
    }

    fn first_id(&self) -> Option<i64> {
        Actor::first_id(self)
    }

    fn last_id(&self) -> Option<i64> {
        Actor::last_id(self)
    }

    fn set_config(&mut self, config: Config) {
        Actor::set_config(self, config)
    }

    fn zdepth_at(&self, f: f64) -> Result<Option<f64>, MorphoError> {
        Ok(self
            .time(f)?
            .filter(|fig| fig.is_visible())
            .map(|fig| fig.zdepth()))
    }

    fn draw_at(
        &self,
        f: f64,
        viewport: &Viewport,
        ctx: &mut dyn DrawContext,
    ) -> Result<(), MorphoError> {
        self.draw(f, viewport, ctx)
    }

    fn newkey_dyn(&mut self, f: i64, figure: Box<dyn Any>) -> Result<(), MorphoError> {
        let figure = figure
            .downcast::<F>()
            .map_err(|_| MorphoError::FigureTypeMismatch {
                expected: F::TYPE_NAME.to_string(),
                actual: "another figure type".to_string(),
            })?;
        self.newkey(f, Some(*figure))?;
        Ok(())
    }

    fn merge_dyn(&mut self, other: &dyn AnyActor, at_frame: i64) -> Result<(), MorphoError> {
        let other = other.as_any().downcast_ref::<Actor<F>>().ok_or_else(|| {
            MorphoError::FigureTypeMismatch {
                expected: F::TYPE_NAME.to_string(),
                actual: other.figure_type().to_string(),
            }
        })?;
        self.merge(other, at_frame);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Debug)]
pub struct Layer {
    camera: Actor<Camera>,
    actors: Vec<Box<dyn AnyActor>>,
    /// Settings imposed on the camera and every actor; `None` leaves each
    /// actor with its own.
    config: Option<Config>,
    pub visible: bool,
}

impl Default for Layer {
    fn default() -> Self {
        Self::new(Camera::default())
    }
}

impl Layer {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera: Actor::from_figure(camera),
            actors: Vec::new(),
            config: None,
            visible: true,
        }
    }

    pub fn config(&self) -> Option<&Config> {
        self.config.as_ref()
    }

    /// Impose `config` on the camera, the current actors and any added later.
    pub fn set_config(&mut self, config: Config) {
        self.camera.set_config(config.clone());
        for actor in &mut self.actors {
            actor.set_config(config.clone());
        }
        self.config = Some(config);
    }

    pub fn camera(&self) -> &Actor<Camera> {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Actor<Camera> {
        &mut self.camera
    }

    /// Add an actor; it takes the layer's settings when the layer has any.
    pub fn add<F: Figure>(&mut self, mut actor: Actor<F>) -> ActorId {
        if let Some(config) = &self.config {
            actor.set_config(config.clone());
        }
        let id = actor.id();
        self.actors.push(Box::new(actor));
        id
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn actors(&self) -> impl Iterator<Item = &(dyn AnyActor + 'static)> {
        self.actors.iter().map(|a| a.as_ref())
    }

    fn position(&self, id: ActorId) -> Option<usize> {
        self.actors.iter().position(|a| a.id() == id)
    }

    pub fn get(&self, id: ActorId) -> Option<&dyn AnyActor> {
        self.position(id).map(|i| self.actors[i].as_ref())
    }

    /// Typed access; `None` if absent or of another figure type.
    pub fn actor<F: Figure>(&self, id: ActorId) -> Option<&Actor<F>> {
        self.get(id)?.as_any().downcast_ref::<Actor<F>>()
    }

    pub fn actor_mut<F: Figure>(&mut self, id: ActorId) -> Option<&mut Actor<F>> {
        let i = self.position(id)?;
        self.actors[i].as_any_mut().downcast_mut::<Actor<F>>()
    }

    pub fn remove(&mut self, id: ActorId) -> Option<Box<dyn AnyActor>> {
        self.position(id).map(|i| self.actors.remove(i))
    }

    /// Merge `source` into `target` at `at_frame`, removing `source`.
    /// Both must hold the same figure type.
    pub fn merge_actors(
        &mut self,
        target: ActorId,
        source: ActorId,
        at_frame: i64,
    ) -> Result<(), MorphoError> {
        let missing = |id: ActorId| MorphoError::invalid(format!("no actor {id:?} in layer"));
        let ti = self.position(target).ok_or_else(|| missing(target))?;
        let si = self.position(source).ok_or_else(|| missing(source))?;
        if ti == si {
            return Ok(());
        }
        let src = self.actors.remove(si);
        let ti = if si < ti { ti - 1 } else { ti };
        if let Err(err) = self.actors[ti].merge_dyn(src.as_ref(), at_frame) {
            self.actors.insert(si, src);
            return Err(err);
        }
        Ok(())
    }

    pub fn first_id(&self) -> Option<i64> {
        self.actors.iter().filter_map(|a| a.first_id()).min()
    }

    pub fn last_id(&self) -> Option<i64> {
        self.actors.iter().filter_map(|a| a.last_id()).max()
    }

    /// Draw frame `f` through the camera's view, lowest zdepth first.
    /// Actors with equal zdepth keep insertion order.
    pub fn draw(&self, f: f64, ctx: &mut dyn DrawContext) -> Result<(), MorphoError> {
        if !self.visible {
            return Ok(());
        }
        let Some(camera) = self.camera.time(f)? else {
            warn!("layer camera has no keyframe at frame {f}; skipping");
            return Ok(());
        };
        let viewport = camera.viewport()?;
        let mut order = Vec::with_capacity(self.actors.len());
        for (i, actor) in self.actors.iter().enumerate() {
            if let Some(z) = actor.zdepth_at(f)? {
                order.push((z, i));
            }
        }
        order.sort_by(|a, b| a.0.total_cmp(&b.0));
        for (_, i) in order {
            self.actors[i].draw_at(f, &viewport, ctx)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{CommandRecorder, DrawCommand};
    use crate::figures::{Path, Point};
    use crate::value::Complex64;

    #[test]
    fn draws_in_zdepth_order() {
        let mut layer = Layer::default();
        let mut front = Point::at(1.0, 0.0);
        front.set_zdepth(5.0).unwrap();
        layer.add(Actor::from_figure(front));
        layer.add(Actor::from_figure(Point::at(-1.0, 0.0)));

        let mut rec = CommandRecorder::new(100, 100);
        layer.draw(0.0, &mut rec).unwrap();
        let xs: Vec<f64> = rec
            .commands
            .iter()
            .map(|c| match c {
                DrawCommand::Dot { center, .. } => center.0,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(xs, vec![40.0, 60.0]);
    }

    #[test]
    fn invisible_and_absent_figures_are_skipped() {
        let mut layer = Layer::default();
        let mut hidden = Point::at(0.0, 0.0);
        hidden.base_mut().visible = false;
        layer.add(Actor::from_figure(hidden));
        let mut late = Actor::<Point>::new();
        late.newkey(10, Some(Point::at(0.0, 0.0))).unwrap();
        layer.add(late);

        let mut rec = CommandRecorder::new(100, 100);
        layer.draw(0.0, &mut rec).unwrap();
        assert!(rec.commands.is_empty());
        layer.draw(10.0, &mut rec).unwrap();
        assert_eq!(rec.commands.len(), 1);
    }

    #[test]
    fn typed_access_and_type_checked_merge() {
        let mut layer = Layer::default();
        let a = layer.add(Actor::from_figure(Point::at(0.0, 0.0)));
        let mut b_actor = Actor::<Point>::new();
        b_actor.newkey(20, Some(Point::at(2.0, 0.0))).unwrap();
        let b = layer.add(b_actor);
        let path = layer.add(Actor::from_figure(Path::new(vec![
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, 1.0),
        ])));

        assert!(layer.actor::<Point>(path).is_none());
        assert!(layer.actor::<Path>(path).is_some());

        let err = layer.merge_actors(a, path, 0).unwrap_err();
        assert!(matches!(err, MorphoError::FigureTypeMismatch { .. }));
        assert_eq!(layer.len(), 3);

        layer.merge_actors(a, b, 20).unwrap();
        assert_eq!(layer.len(), 2);
        assert_eq!(layer.actor::<Point>(a).unwrap().key_ids(), vec![0, 20]);
    }

    #[test]
    fn layer_settings_reach_existing_and_new_actors() {
        use crate::interp::{Transition, TweenMethod, TweenPolicy};

        let policy = TweenPolicy::new(TweenMethod::Spiral, Transition::QuadEase);
        let config = Config {
            default_policy: policy.clone(),
            time_cache: false,
            ..Config::default()
        };
        let mut layer = Layer::default();
        assert!(layer.config().is_none());
        let before = layer.add(Actor::<Point>::new());
        layer.set_config(config.clone());
        let after = layer.add(Actor::<Point>::new());

        assert_eq!(layer.camera().config(), &config);
        for id in [before, after] {
            let actor = layer.actor_mut::<Point>(id).unwrap();
            assert_eq!(actor.config(), &config);
            actor.newkey(3, None).unwrap();
            assert_eq!(actor.key(3).unwrap().policy(), &policy);
        }
    }

    #[test]
    fn newkey_dyn_rejects_other_figure_types() {
        let mut actor = Actor::from_figure(Point::at(0.0, 0.0));
        let dynamic: &mut dyn AnyActor = &mut actor;
        assert!(dynamic.newkey_dyn(5, Box::new(Point::at(1.0, 0.0))).is_ok());
        assert!(matches!(
            dynamic.newkey_dyn(9, Box::new(Camera::default())),
            Err(MorphoError::FigureTypeMismatch { .. })
        ));
        assert_eq!(actor.key_ids(), vec![0, 5]);
    }
}
