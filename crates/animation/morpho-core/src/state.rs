//! FigureState: name → Tweenable mapping owned by a figure.

use hashbrown::HashMap;

use crate::error::MorphoError;
use crate::tweenable::Tweenable;
use crate::value::{Complex64, TweenValue};

/// Name of the draw-order tweenable every state carries.
pub const ZDEPTH: &str = "zdepth";

/// The tweenables of one figure.
///
/// Equality is order independent and array aware (delegates to
/// [`TweenValue`]'s `PartialEq`).
#[derive(Clone, Debug, PartialEq)]
pub struct FigureState {
    slots: HashMap<String, Tweenable>,
}

impl Default for FigureState {
    fn default() -> Self {
        Self::new()
    }
}

impl FigureState {
    /// A state holding only `zdepth = 0`.
    pub fn new() -> Self {
        let mut slots = HashMap::new();
        slots.insert(ZDEPTH.to_string(), Tweenable::zdepth(0.0));
        Self { slots }
    }

    /// Build a state from an explicit list; `zdepth` must be among them.
    pub fn from_tweenables(
        tweenables: impl IntoIterator<Item = Tweenable>,
    ) -> Result<Self, MorphoError> {
        let mut slots = HashMap::new();
        for tw in tweenables {
            if slots.contains_key(tw.name()) {
                return Err(MorphoError::DuplicateTweenable {
                    name: tw.name().to_string(),
                });
            }
            slots.insert(tw.name().to_string(), tw);
        }
        if !slots.contains_key(ZDEPTH) {
            return Err(MorphoError::MissingTweenable {
                name: ZDEPTH.to_string(),
            });
        }
        Ok(Self { slots })
    }

    /// Add a new tweenable. Names are unique within a state.
    pub fn add(&mut self, tweenable: Tweenable) -> Result<(), MorphoError> {
        if self.slots.contains_key(tweenable.name()) {
            return Err(MorphoError::DuplicateTweenable {
                name: tweenable.name().to_string(),
            });
        }
        self.slots.insert(tweenable.name().to_string(), tweenable);
        Ok(())
    }

    /// Insert or replace a slot. Used by figure constructors whose slot
    /// names are fixed.
    pub(crate) fn declare(&mut self, tweenable: Tweenable) {
        self.slots.insert(tweenable.name().to_string(), tweenable);
    }

    /// Builder form of [`FigureState::add`].
    pub fn with(mut self, tweenable: Tweenable) -> Result<Self, MorphoError> {
        self.add(tweenable)?;
        Ok(self)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Tweenable> {
        self.slots.get(name)
    }

    #[inline]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Tweenable> {
        self.slots.get_mut(name)
    }

    pub fn require(&self, name: &str) -> Result<&Tweenable, MorphoError> {
        self.slots
            .get(name)
            .ok_or_else(|| MorphoError::MissingTweenable {
                name: name.to_string(),
            })
    }

    #[inline]
    pub fn value(&self, name: &str) -> Option<&TweenValue> {
        self.slots.get(name).map(|tw| tw.value())
    }

    /// Overwrite the value of an existing tweenable.
    pub fn set(&mut self, name: &str, value: impl Into<TweenValue>) -> Result<(), MorphoError> {
        let slot = self
            .slots
            .get_mut(name)
            .ok_or_else(|| MorphoError::MissingTweenable {
                name: name.to_string(),
            })?;
        slot.set_value(value);
        Ok(())
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tweenable> {
        self.slots.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Tweenable> {
        self.slots.values_mut()
    }

    /// Draw order; missing or non-numeric zdepth reads as 0.
    pub fn zdepth(&self) -> f64 {
        self.value(ZDEPTH).and_then(|v| v.as_scalar()).unwrap_or(0.0)
    }

    /// Copy of this state with every fimage-eligible tweenable mapped through `func`.
    pub fn fimage(&self, func: &dyn Fn(Complex64) -> Complex64) -> Result<Self, MorphoError> {
        let mut out = self.clone();
        for slot in out.slots.values_mut() {
            if slot.eligible().fimage {
                let mapped = slot.value().map_complex(func)?;
                slot.set_value(mapped);
            }
        }
        Ok(out)
    }
}
