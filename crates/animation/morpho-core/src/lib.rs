//! Morpho Core (renderer-agnostic)
//!
//! Keyframe animation of "figures": bundles of named, tagged values
//! (tweenables) interpolated along a timeline. The crate provides the tween
//! methods (linear, spiral, pivot, instant) with their splitters, the actor
//! timeline with seamless keyframe insertion and timeline algebra, and the
//! layer/animation composition that hands per-frame figures to a host
//! [`DrawContext`].

pub mod action;
pub mod actor;
pub mod animation;
pub mod config;
pub mod draw;
pub mod error;
pub mod figure;
pub mod figures;
pub mod ids;
pub mod interp;
pub mod layer;
pub mod scratch;
pub mod state;
pub mod tag;
pub mod timeline;
pub mod tweenable;
pub mod value;

// Re-exports for consumers (hosts and figure libraries)
pub use action::{ActionArgs, ActionFn, ActionRegistry};
pub use actor::{Actor, KeyOptions};
pub use animation::Animation;
pub use config::Config;
pub use draw::{CommandRecorder, DrawCommand, DrawContext, Style, Viewport};
pub use error::MorphoError;
pub use figure::{Figure, FigureBase, Modifier};
pub use figures::{Camera, Path, Point};
pub use ids::{ActorId, IdAllocator, LayerId};
pub use interp::{Transition, TweenMethod, TweenPolicy};
pub use layer::{AnyActor, Layer};
pub use state::FigureState;
pub use tag::TagSet;
pub use tweenable::Tweenable;
pub use value::{Complex64, TweenFn, TweenValue, ValueKind};

pub type Result<T> = core::result::Result<T, MorphoError>;
