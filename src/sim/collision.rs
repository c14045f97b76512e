//! Agent/ghost overlap tests
//!
//! Every entity gets a square hitbox a little smaller than a tile, centered on
//! its position. Boxes must share positive area to count as a hit.

use glam::IVec2;

use crate::consts::{HALF_TILE, HITBOX_INSET, TILE_SIZE};

/// Axis-aligned box in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hitbox {
    /// Top-left corner
    pub min: IVec2,
    /// Width and height
    pub size: IVec2,
}

impl Hitbox {
    /// The inset hitbox of an entity centered at `center`
    pub fn around(center: IVec2) -> Self {
        Self {
            min: center - IVec2::splat(HALF_TILE - HITBOX_INSET),
            size: IVec2::splat(TILE_SIZE - 2 * HITBOX_INSET),
        }
    }

    /// Exclusive bottom-right corner
    #[inline]
    pub fn max(&self) -> IVec2 {
        self.min + self.size
    }

    /// Positive-area overlap; shared edges do not count
    pub fn intersects(&self, other: &Hitbox) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }
}

/// Do two entities at these positions collide?
#[inline]
pub fn entities_collide(a: IVec2, b: IVec2) -> bool {
    Hitbox::around(a).intersects(&Hitbox::around(b))
}
