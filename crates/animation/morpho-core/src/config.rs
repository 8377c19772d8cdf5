//! Core configuration for morpho-core.

use serde::{Deserialize, Serialize};

use crate::interp::TweenPolicy;

/// Actor and animation settings.
/// Every field has a default so partial JSON documents deserialize.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Policy given to figures an actor creates on its own (`newkey`
    /// without an explicit figure on a frame before every keyframe).
    pub default_policy: TweenPolicy,

    /// Keep the last `time()` result per actor.
    pub time_cache: bool,

    /// Frames per second; only used to convert frame counts to seconds.
    pub frame_rate: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_policy: TweenPolicy::default(),
            time_cache: true,
            frame_rate: 30.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::Transition;

    #[test]
    fn partial_documents_fill_defaults() {
        let cfg: Config =
            serde_json::from_str(r#"{"default_policy":{"transition":{"kind":"quad_ease"}}}"#)
                .unwrap();
        assert!(cfg.time_cache);
        assert_eq!(cfg.frame_rate, 30.0);
        assert_eq!(cfg.default_policy.transition, Transition::QuadEase);
    }
}
