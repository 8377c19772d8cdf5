//! Animation: an ordered stack of layers rendered frame by frame.

use log::debug;

use crate::config::Config;
use crate::draw::DrawContext;
use crate::error::MorphoError;
use crate::ids::{IdAllocator, LayerId};
use crate::layer::Layer;

#[derive(Debug, Default)]
pub struct Animation {
    config: Config,
    ids: IdAllocator,
    /// Bottom layer first.
    layers: Vec<(LayerId, Layer)>,
}

impl Animation {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ids: IdAllocator::new(),
            layers: Vec::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Push a layer on top of the stack. The layer, its camera and its
    /// actors (present and future) take this animation's settings.
    pub fn add_layer(&mut self, mut layer: Layer) -> LayerId {
        layer.set_config(self.config.clone());
        let id = self.ids.alloc_layer();
        self.layers.push((id, layer));
        id
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|(i, _)| *i == id).map(|(_, l)| l)
    }

    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers
            .iter_mut()
            .find(|(i, _)| *i == id)
            .map(|(_, l)| l)
    }

    pub fn remove_layer(&mut self, id: LayerId) -> Option<Layer> {
        let idx = self.layers.iter().position(|(i, _)| *i == id)?;
        Some(self.layers.remove(idx).1)
    }

    pub fn layer_ids(&self) -> Vec<LayerId> {
        self.layers.iter().map(|(id, _)| *id).collect()
    }

    pub fn first_frame(&self) -> Option<i64> {
        self.layers.iter().filter_map(|(_, l)| l.first_id()).min()
    }

    pub fn last_frame(&self) -> Option<i64> {
        self.layers.iter().filter_map(|(_, l)| l.last_id()).max()
    }

    /// Playback length in seconds at the configured frame rate.
    pub fn duration_seconds(&self) -> f64 {
        match (self.first_frame(), self.last_frame()) {
            (Some(a), Some(b)) if self.config.frame_rate > 0.0 => {
                (b - a) as f64 / self.config.frame_rate
            }
            _ => 0.0,
        }
    }

    /// Draw every visible layer at frame `f`, bottom layer first.
    pub fn draw_frame(&self, f: f64, ctx: &mut dyn DrawContext) -> Result<(), MorphoError> {
        debug!("drawing frame {f} ({} layers)", self.layers.len());
        for (_, layer) in &self.layers {
            layer.draw(f, ctx)?;
        }
        Ok(())
    }
}
