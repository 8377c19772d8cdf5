//! Tweenable: a named, tagged value slot of a figure.

use crate::error::MorphoError;
use crate::tag::TagSet;
use crate::value::TweenValue;

/// Which tween primitives may act on a tweenable.
///
/// Computed once from the tags whenever they change, so the tween engine
/// never re-derives eligibility per call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Eligibility {
    pub linear: bool,
    pub spiral: bool,
    pub pivot: bool,
    pub fimage: bool,
}

impl Eligibility {
    pub fn from_tags(tags: TagSet) -> Self {
        let frozen = tags.contains(TagSet::NOTWEEN);
        Self {
            linear: !frozen
                && !tags.contains(TagSet::NOLINEAR)
                && tags.intersects(TagSet::LINEAR_ROLES),
            spiral: !frozen
                && !tags.contains(TagSet::NOSPIRAL)
                && tags.intersects(TagSet::SPIRAL_ROLES),
            pivot: !frozen
                && !tags.contains(TagSet::NOPIVOT)
                && tags.intersects(TagSet::PIVOT_ROLES),
            fimage: !tags.contains(TagSet::NOFIMAGE) && tags.intersects(TagSet::FIMAGE_ROLES),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tweenable {
    name: String,
    value: TweenValue,
    tags: TagSet,
    metadata: String,
    eligible: Eligibility,
}

/// Identifier-like: `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Tweenable {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<TweenValue>,
        tags: TagSet,
    ) -> Result<Self, MorphoError> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(MorphoError::InvalidTweenableName { name });
        }
        Ok(Self {
            name,
            value: value.into(),
            tags,
            metadata: String::new(),
            eligible: Eligibility::from_tags(tags),
        })
    }

    /// Constructor for the crate's own fixed slot names.
    pub(crate) fn declared(name: &'static str, value: impl Into<TweenValue>, tags: TagSet) -> Self {
        debug_assert!(is_valid_name(name));
        Self {
            name: name.to_string(),
            value: value.into(),
            tags,
            metadata: String::new(),
            eligible: Eligibility::from_tags(tags),
        }
    }

    /// The draw-order slot every state starts with.
    pub(crate) fn zdepth(value: f64) -> Self {
        Self::declared(crate::state::ZDEPTH, value, TagSet::SCALAR)
    }

    pub fn with_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.metadata = metadata.into();
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> &TweenValue {
        &self.value
    }

    #[inline]
    pub fn value_mut(&mut self) -> &mut TweenValue {
        &mut self.value
    }

    #[inline]
    pub fn set_value(&mut self, value: impl Into<TweenValue>) {
        self.value = value.into();
    }

    #[inline]
    pub fn tags(&self) -> TagSet {
        self.tags
    }

    pub fn set_tags(&mut self, tags: TagSet) {
        self.tags = tags;
        self.eligible = Eligibility::from_tags(tags);
    }

    #[inline]
    pub fn metadata(&self) -> &str {
        &self.metadata
    }

    #[inline]
    pub fn eligible(&self) -> Eligibility {
        self.eligible
    }
}
