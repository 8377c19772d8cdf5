//! Tweenable role tags.
//!
//! Tags are the stable contract between figure types and the tween engine: a
//! figure gets correct default interpolation purely by tagging its tweenables.
//! The string vocabulary (`"complex"`, `"3d"`, `"nospiral"`, ...) maps onto a
//! fixed bitset.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::MorphoError;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct TagSet: u32 {
        const SCALAR    = 1 << 0;
        const COMPLEX   = 1 << 1;
        const COLOR     = 1 << 2;
        const INTEGER   = 1 << 3;
        const NPARRAY   = 1 << 4;
        const FUNCTION  = 1 << 5;
        const LOOP      = 1 << 6;
        const THREE_D   = 1 << 7;
        const NOTWEEN   = 1 << 8;
        const NOLINEAR  = 1 << 9;
        const NOSPIRAL  = 1 << 10;
        const NOPIVOT   = 1 << 11;
        const PIXEL     = 1 << 12;
        const LINEAR    = 1 << 13;
        const SPIRAL    = 1 << 14;
        const PIVOT     = 1 << 15;
        const MAGNITUDE = 1 << 16;
        const SIZE      = 1 << 17;
        const LIST      = 1 << 18;
        const FIMAGE    = 1 << 19;
        const NOFIMAGE  = 1 << 20;
        const ORIENT    = 1 << 21;
    }
}

const TAG_NAMES: &[(&str, TagSet)] = &[
    ("scalar", TagSet::SCALAR),
    ("complex", TagSet::COMPLEX),
    ("color", TagSet::COLOR),
    ("integer", TagSet::INTEGER),
    ("nparray", TagSet::NPARRAY),
    ("function", TagSet::FUNCTION),
    ("loop", TagSet::LOOP),
    ("3d", TagSet::THREE_D),
    ("notween", TagSet::NOTWEEN),
    ("nolinear", TagSet::NOLINEAR),
    ("nospiral", TagSet::NOSPIRAL),
    ("nopivot", TagSet::NOPIVOT),
    ("pixel", TagSet::PIXEL),
    ("linear", TagSet::LINEAR),
    ("spiral", TagSet::SPIRAL),
    ("pivot", TagSet::PIVOT),
    ("magnitude", TagSet::MAGNITUDE),
    ("size", TagSet::SIZE),
    ("list", TagSet::LIST),
    ("fimage", TagSet::FIMAGE),
    ("nofimage", TagSet::NOFIMAGE),
    ("orient", TagSet::ORIENT),
];

impl TagSet {
    /// Tags that make a tweenable eligible for `tween_linear`.
    pub const LINEAR_ROLES: TagSet = TagSet::LINEAR
        .union(TagSet::SCALAR)
        .union(TagSet::MAGNITUDE)
        .union(TagSet::SIZE)
        .union(TagSet::COLOR)
        .union(TagSet::COMPLEX)
        .union(TagSet::INTEGER)
        .union(TagSet::NPARRAY)
        .union(TagSet::FUNCTION);

    /// Tags that make a tweenable eligible for `tween_spiral`.
    pub const SPIRAL_ROLES: TagSet = TagSet::SPIRAL
        .union(TagSet::COMPLEX)
        .union(TagSet::THREE_D);

    /// Tags that make a tweenable eligible for `tween_pivot`.
    pub const PIVOT_ROLES: TagSet = TagSet::PIVOT.union(TagSet::COMPLEX);

    /// Tags that make a tweenable subject to a function image.
    pub const FIMAGE_ROLES: TagSet = TagSet::COMPLEX.union(TagSet::FIMAGE);

    /// Look up a single tag by its vocabulary name.
    pub fn from_tag_name(name: &str) -> Option<TagSet> {
        TAG_NAMES
            .iter()
            .find_map(|(n, tag)| if *n == name { Some(*tag) } else { None })
    }

    /// Parse a list of vocabulary names into a tag set.
    pub fn parse<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<TagSet, MorphoError> {
        let mut tags = TagSet::empty();
        for name in names {
            let tag = Self::from_tag_name(name).ok_or_else(|| MorphoError::UnknownTag {
                name: name.to_string(),
            })?;
            tags |= tag;
        }
        Ok(tags)
    }

    /// Vocabulary names of the tags present, in declaration order.
    pub fn names(&self) -> Vec<&'static str> {
        TAG_NAMES
            .iter()
            .filter(|(_, tag)| self.contains(*tag))
            .map(|(n, _)| *n)
            .collect()
    }
}
