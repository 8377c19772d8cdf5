//! Minimal concrete figure types.

pub mod camera;
pub mod path;
pub mod point;

pub use camera::Camera;
pub use path::Path;
pub use point::Point;
