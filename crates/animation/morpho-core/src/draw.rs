//! Rendering seam.
//!
//! Figures never rasterize. They map world coordinates through a
//! [`Viewport`] and issue primitive calls on a [`DrawContext`] supplied by the
//! host. [`CommandRecorder`] is a context that just records the calls.

use serde::{Deserialize, Serialize};

use crate::error::MorphoError;
use crate::value::Complex64;

/// World-space rectangle shown by a camera: `[xmin, xmax, ymin, ymax]`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_view([-5.0, 5.0, -5.0, 5.0])
    }
}

impl Viewport {
    pub fn from_view(view: [f64; 4]) -> Self {
        Self {
            xmin: view[0],
            xmax: view[1],
            ymin: view[2],
            ymax: view[3],
        }
    }

    /// Validated constructor; rejects empty or non-finite boxes.
    pub fn new(view: [f64; 4]) -> Result<Self, MorphoError> {
        if view.iter().any(|v| !v.is_finite()) || view[1] <= view[0] || view[3] <= view[2] {
            return Err(MorphoError::invalid(format!("degenerate view box {view:?}")));
        }
        Ok(Self::from_view(view))
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    pub fn center(&self) -> Complex64 {
        Complex64::new(
            0.5 * (self.xmin + self.xmax),
            0.5 * (self.ymin + self.ymax),
        )
    }

    /// Map a world point to pixel coordinates on a `size` surface.
    /// Pixel y grows downward.
    pub fn to_pixel(&self, z: Complex64, size: (u32, u32)) -> (f64, f64) {
        let (w, h) = (size.0 as f64, size.1 as f64);
        let x = (z.re - self.xmin) / self.width() * w;
        let y = (self.ymax - z.im) / self.height() * h;
        (x, y)
    }

    /// Pixels per world unit along x.
    pub fn pixel_scale(&self, size: (u32, u32)) -> f64 {
        size.0 as f64 / self.width()
    }
}

/// Stroke/fill description handed to the context.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub stroke: [f64; 3],
    pub stroke_width: f64,
    pub fill: Option<[f64; 3]>,
    pub alpha: f64,
}

/// Host drawing surface.
pub trait DrawContext {
    /// Surface size in pixels.
    fn size(&self) -> (u32, u32);

    /// Filled disc centered at pixel `center`.
    fn dot(&mut self, center: (f64, f64), radius: f64, style: &Style);

    /// Open polyline through pixel points.
    fn polyline(&mut self, points: &[(f64, f64)], style: &Style);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Dot {
        center: (f64, f64),
        radius: f64,
        style: Style,
    },
    Polyline {
        points: Vec<(f64, f64)>,
        style: Style,
    },
}

/// A [`DrawContext`] that stores every call in order.
#[derive(Clone, Debug, Default)]
pub struct CommandRecorder {
    pub size: (u32, u32),
    pub commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            commands: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl DrawContext for CommandRecorder {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn dot(&mut self, center: (f64, f64), radius: f64, style: &Style) {
        self.commands.push(DrawCommand::Dot {
            center,
            radius,
            style: style.clone(),
        });
    }

    fn polyline(&mut self, points: &[(f64, f64)], style: &Style) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            style: style.clone(),
        });
    }
}
