//! Single-frame memo for `Actor::time`.
//!
//! Rendering asks an actor for the same frame several times (draw order
//! sort, then draw). The cache keeps the last answer and is cleared by every
//! timeline mutation.

use std::cell::RefCell;

#[derive(Debug, Clone)]
struct CachedFrame<F> {
    frame: f64,
    use_modifier: bool,
    figure: Option<F>,
}

#[derive(Debug, Clone)]
pub struct TimeCache<F> {
    enabled: bool,
    slot: RefCell<Option<CachedFrame<F>>>,
}

impl<F: Clone> TimeCache<F> {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            slot: RefCell::new(None),
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// `Some(answer)` on a hit; the answer itself may be "nothing drawn".
    pub fn get(&self, frame: f64, use_modifier: bool) -> Option<Option<F>> {
        if !self.enabled {
            return None;
        }
        match &*self.slot.borrow() {
            Some(c) if c.frame == frame && c.use_modifier == use_modifier => Some(c.figure.clone()),
            _ => None,
        }
    }

    pub fn store(&self, frame: f64, use_modifier: bool, figure: Option<F>) {
        if self.enabled {
            *self.slot.borrow_mut() = Some(CachedFrame {
                frame,
                use_modifier,
                figure,
            });
        }
    }

    #[inline]
    pub fn invalidate(&self) {
        self.slot.borrow_mut().take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_requires_same_frame_and_modifier_flag() {
        let cache = TimeCache::new(true);
        cache.store(3.0, true, Some(7));
        assert_eq!(cache.get(3.0, true), Some(Some(7)));
        assert_eq!(cache.get(3.0, false), None);
        assert_eq!(cache.get(4.0, true), None);
        cache.invalidate();
        assert_eq!(cache.get(3.0, true), None);
    }

    #[test]
    fn disabled_cache_never_hits() {
        let cache = TimeCache::new(false);
        cache.store(1.0, true, Some("x"));
        assert_eq!(cache.get(1.0, true), None);
    }

    #[test]
    fn empty_answers_are_cached_too() {
        let cache: TimeCache<u8> = TimeCache::new(true);
        cache.store(9.0, true, None);
        assert_eq!(cache.get(9.0, true), Some(None));
    }
}
