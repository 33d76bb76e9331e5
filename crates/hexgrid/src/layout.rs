//! Pixel-space projection of the hex grid.

use glam::Vec2;

use crate::HexCoord;

/// Scale applied to field spacing so the borders of adjacent fields overlap
/// (4px at the native 104px art size).
pub const OVERLAP_SCALE: f32 = 1.0 - 4.0 / 104.0;

/// Maps hex coordinates to pixel positions for one field size.
#[derive(Debug, Clone, Copy)]
pub struct HexLayout {
    /// Edge-to-edge size of one field in pixels.
    pub field_size: f32,
}

impl HexLayout {
    pub fn new(field_size: f32) -> Self {
        Self { field_size }
    }

    /// Pixel position of the field's top-left corner. Columns are half a
    /// field apart (doubled x), rows three quarters of a field apart.
    pub fn origin_of(&self, c: HexCoord) -> Vec2 {
        Vec2::new(
            c.x as f32 * self.field_size * OVERLAP_SCALE / 2.0,
            c.y as f32 * 0.75 * self.field_size * OVERLAP_SCALE,
        )
    }

    /// Map offset that centers field `c` in a viewport of the given pixel
    /// size.
    pub fn center_offset(&self, c: HexCoord, viewport: Vec2) -> Vec2 {
        viewport / 2.0 - self.origin_of(c) - Vec2::splat(self.field_size / 2.0)
    }
}
