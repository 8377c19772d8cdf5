pub mod functions;
pub mod method;
pub mod transition;
pub mod tween;

pub use method::{TweenMethod, TweenPolicy};
pub use transition::Transition;
pub use tween::{linear_state, pivot_state, spiral_state};
