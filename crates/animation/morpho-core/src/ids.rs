//! Identifiers and simple allocators for actors and layers.

use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

/// Identifies an actor. Figures placed in a timeline carry this as a
/// non-owning back reference (`owner`).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LayerId(pub u32);

/// Monotonic allocator for LayerId.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_layer: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_layer(&mut self) -> LayerId {
        let id = LayerId(self.next_layer);
        self.next_layer = self.next_layer.wrapping_add(1);
        id
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

static NEXT_ACTOR: AtomicU32 = AtomicU32::new(0);

/// Process-wide actor id source used by `Actor::new`. Actors built outside an
/// `Animation` still need distinct ids for owner back references.
pub(crate) fn fresh_actor_id() -> ActorId {
    ActorId(NEXT_ACTOR.fetch_add(1, Ordering::Relaxed))
}
