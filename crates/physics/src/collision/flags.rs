//! Content flags for collision filtering.
//!
//! Every collider is tagged at load time with what it is: a solid obstacle
//! that blocks the body, or a walkable surface that only supports it.

use serde::{Deserialize, Serialize};

/// Content flags describe what type of volume a collider is.
///
/// Queries pass a mask and only colliders whose contents intersect the mask
/// are considered. The ground probe uses [`ContentFlags::MASK_WALKABLE`], the
/// horizontal resolver and the ceiling probes use [`ContentFlags::MASK_PLAYER_SOLID`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ContentFlags(pub u32);

impl ContentFlags {
    /// Empty space - nothing here.
    pub const EMPTY: Self = Self(0);

    /// Solid geometry: walls, crates, platforms. Blocks horizontal motion
    /// and its top face can be stood on.
    pub const SOLID: Self = Self(1 << 0);

    /// Walkable surface only (the arena floor slab). Supports the player but
    /// never blocks horizontal motion.
    pub const FLOOR: Self = Self(1 << 1);

    /// Everything the ground probe may land on.
    pub const MASK_WALKABLE: Self = Self(Self::SOLID.0 | Self::FLOOR.0);

    /// Everything that blocks the player's body.
    pub const MASK_PLAYER_SOLID: Self = Self::SOLID;

    /// Check if these flags contain a specific flag.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if any of the given flags are set.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline]
    pub fn is_solid(self) -> bool {
        self.intersects(Self::SOLID)
    }

    #[inline]
    pub fn is_walkable(self) -> bool {
        self.intersects(Self::MASK_WALKABLE)
    }
}

impl std::ops::BitOr for ContentFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for ContentFlags {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_flags_operations() {
        let combined = ContentFlags::SOLID | ContentFlags::FLOOR;

        assert!(combined.contains(ContentFlags::SOLID));
        assert!(combined.contains(ContentFlags::FLOOR));
        assert!(combined.intersects(ContentFlags::SOLID));
        assert_eq!(combined & ContentFlags::FLOOR, ContentFlags::FLOOR);
    }

    #[test]
    fn test_masks() {
        assert!(ContentFlags::FLOOR.is_walkable());
        assert!(!ContentFlags::FLOOR.is_solid());
        assert!(ContentFlags::SOLID.is_walkable());
        assert!(ContentFlags::SOLID.is_solid());
        assert!(!ContentFlags::EMPTY.is_walkable());
        assert!(!ContentFlags::MASK_PLAYER_SOLID.contains(ContentFlags::FLOOR));
    }
}
