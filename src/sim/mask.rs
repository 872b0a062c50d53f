//! Per-pixel collision masks
//!
//! A mask is a solid/empty bitmap derived from a sprite's alpha channel.
//! Two masks overlap when any pair of solid pixels lands on the same playfield
//! pixel once each is placed at its top-left position.

use glam::IVec2;

use crate::assets::Sprite;
use crate::consts::MASK_ALPHA_THRESHOLD;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// All-empty mask of the given size
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; (width * height) as usize],
        }
    }

    /// Solid wherever the sprite alpha is above the threshold
    pub fn from_sprite(sprite: &Sprite) -> Self {
        let mut mask = Self::empty(sprite.width, sprite.height);
        for y in 0..sprite.height {
            for x in 0..sprite.width {
                if sprite.alpha_at(x, y) > MASK_ALPHA_THRESHOLD {
                    mask.set(x, y, true);
                }
            }
        }
        mask
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.bits[(y * self.width + x) as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, solid: bool) {
        self.bits[(y * self.width + x) as usize] = solid;
    }

    /// Number of solid pixels
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    /// Mirror top-to-bottom (downward obstacles)
    pub fn flipped_vertical(&self) -> Self {
        let mut out = Self::empty(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.set(x, self.height - 1 - y, self.get(x, y));
            }
        }
        out
    }

    /// Rotate counter-clockwise (on screen) by `degrees` about the center.
    ///
    /// The result grows to the rotated bounding box, sampled nearest-neighbour,
    /// so it should be placed centered on the unrotated sprite's center.
    pub fn rotated(&self, degrees: f32) -> Self {
        if degrees == 0.0 || self.width == 0 || self.height == 0 {
            return self.clone();
        }

        let (sin, cos) = degrees.to_radians().sin_cos();
        let (w, h) = (self.width as f32, self.height as f32);
        // Trim float noise so a quarter turn does not grow an extra column
        let out_w = ((w * cos.abs() + h * sin.abs()) - 1e-3).ceil().max(1.0);
        let out_h = ((w * sin.abs() + h * cos.abs()) - 1e-3).ceil().max(1.0);

        let mut out = Self::empty(out_w as u32, out_h as u32);
        for oy in 0..out.height {
            for ox in 0..out.width {
                // Destination pixel center relative to the rotated center
                let dx = ox as f32 + 0.5 - out_w / 2.0;
                let dy = oy as f32 + 0.5 - out_h / 2.0;
                // Inverse rotation back into source space (y points down)
                let sx = dx * cos - dy * sin + w / 2.0;
                let sy = dx * sin + dy * cos + h / 2.0;
                if sx >= 0.0 && sy >= 0.0 && sx < w && sy < h {
                    out.set(ox, oy, self.get(sx as u32, sy as u32));
                }
            }
        }
        out
    }

    /// Whether this mask, placed at `pos`, overlaps `other` placed at `other_pos`
    pub fn overlaps(&self, pos: IVec2, other: &Mask, other_pos: IVec2) -> bool {
        self.overlap_point(pos, other, other_pos).is_some()
    }

    /// First overlapping playfield pixel (row-major scan), if any
    pub fn overlap_point(&self, pos: IVec2, other: &Mask, other_pos: IVec2) -> Option<IVec2> {
        let left = pos.x.max(other_pos.x);
        let top = pos.y.max(other_pos.y);
        let right = (pos.x + self.width as i32).min(other_pos.x + other.width as i32);
        let bottom = (pos.y + self.height as i32).min(other_pos.y + other.height as i32);
        if left >= right || top >= bottom {
            return None;
        }

        for y in top..bottom {
            for x in left..right {
                let a = self.get((x - pos.x) as u32, (y - pos.y) as u32);
                if a && other.get((x - other_pos.x) as u32, (y - other_pos.y) as u32) {
                    return Some(IVec2::new(x, y));
                }
            }
        }
        None
    }
}
