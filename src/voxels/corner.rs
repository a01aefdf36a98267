//! # Corner Mask Module
//!
//! A cell's occupancy is described by which of the four top corners of its
//! footprint are raised. `NONE` is an empty cell, `ALL` a full block, and a
//! raised side (`LEFT`, `RIGHT`, `NEAR`, `FAR`) is a ramp wedge that climbs
//! towards that side.
//!
//! Axes: left/right is -x/+x, near/far is -z/+z.

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

use serde::{Deserialize, Serialize};

/// 4-bit set over the top corners of a cell footprint.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CornerMask(u8);

impl CornerMask {
    /// Empty cell.
    pub const NONE: CornerMask = CornerMask(0x0);
    /// Corner at (-x, -z).
    pub const LEFT_NEAR: CornerMask = CornerMask(0x1);
    /// Corner at (-x, +z).
    pub const LEFT_FAR: CornerMask = CornerMask(0x2);
    /// Corner at (+x, +z).
    pub const RIGHT_FAR: CornerMask = CornerMask(0x4);
    /// Corner at (+x, -z).
    pub const RIGHT_NEAR: CornerMask = CornerMask(0x8);
    /// Both -x corners; a ramp rising towards -x.
    pub const LEFT: CornerMask = CornerMask(0x1 | 0x2);
    /// Both +x corners; a ramp rising towards +x.
    pub const RIGHT: CornerMask = CornerMask(0x8 | 0x4);
    /// Both -z corners; a ramp rising towards -z.
    pub const NEAR: CornerMask = CornerMask(0x1 | 0x8);
    /// Both +z corners; a ramp rising towards +z.
    pub const FAR: CornerMask = CornerMask(0x2 | 0x4);
    /// Solid block.
    pub const ALL: CornerMask = CornerMask(0xF);

    /// Builds a mask from raw bits, discarding anything above the low nibble.
    pub const fn from_bits(bits: u8) -> Self {
        CornerMask(bits & 0xF)
    }

    /// Raw bit pattern; also the index into per-mask prefab tables.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// True for an empty cell.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True for a solid block.
    pub const fn is_full(self) -> bool {
        self.0 == 0xF
    }

    /// True when every corner of `other` is also raised in `self`.
    pub const fn contains(self, other: CornerMask) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when the two masks share at least one corner.
    pub const fn intersects(self, other: CornerMask) -> bool {
        self.0 & other.0 != 0
    }

    /// Clamps arbitrary corner combinations onto the set the terrain defines.
    ///
    /// Adjacent pairs, `NONE` and `ALL` are returned unchanged. A single
    /// raised corner or a diagonal pair collapses to `NONE`; three raised
    /// corners round up to `ALL`.
    pub fn nearest_defined(self) -> CornerMask {
        match self.0.count_ones() {
            0 | 1 => CornerMask::NONE,
            2 => match self {
                CornerMask::LEFT | CornerMask::RIGHT | CornerMask::NEAR | CornerMask::FAR => self,
                _ => CornerMask::NONE,
            },
            _ => CornerMask::ALL,
        }
    }
}

impl BitOr for CornerMask {
    type Output = CornerMask;

    fn bitor(self, rhs: CornerMask) -> CornerMask {
        CornerMask(self.0 | rhs.0)
    }
}

impl BitAnd for CornerMask {
    type Output = CornerMask;

    fn bitand(self, rhs: CornerMask) -> CornerMask {
        CornerMask(self.0 & rhs.0)
    }
}

impl Not for CornerMask {
    type Output = CornerMask;

    fn not(self) -> CornerMask {
        CornerMask(!self.0 & 0xF)
    }
}

impl fmt::Debug for CornerMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            CornerMask::NONE => "None",
            CornerMask::ALL => "All",
            CornerMask::LEFT => "Left",
            CornerMask::RIGHT => "Right",
            CornerMask::NEAR => "Near",
            CornerMask::FAR => "Far",
            CornerMask::LEFT_NEAR => "LeftNear",
            CornerMask::LEFT_FAR => "LeftFar",
            CornerMask::RIGHT_FAR => "RightFar",
            CornerMask::RIGHT_NEAR => "RightNear",
            _ => return write!(f, "CornerMask({:#06b})", self.0),
        };
        f.write_str(name)
    }
}
