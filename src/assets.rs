//! Pre-decoded asset handles
//!
//! Decoding images and sounds is the platform's job. The core only needs a
//! sprite's name (so the renderer can find the texture), its pixel size and
//! its alpha channel (to build collision masks).

use std::sync::Arc;

use crate::consts::{GAME_H, GAME_W};

/// An immutable, cheaply clonable image handle
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Row-major alpha values, `width * height` long
    alpha: Arc<[u8]>,
}

impl Sprite {
    /// Wrap an already-decoded alpha channel
    ///
    /// Panics if `alpha` does not hold exactly `width * height` values.
    pub fn new(name: impl Into<String>, width: u32, height: u32, alpha: Vec<u8>) -> Self {
        assert_eq!(
            alpha.len(),
            (width * height) as usize,
            "alpha channel does not match sprite size"
        );
        Self {
            name: name.into(),
            width,
            height,
            alpha: alpha.into(),
        }
    }

    /// Fully opaque rectangle
    pub fn solid(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self::new(name, width, height, vec![255; (width * height) as usize])
    }

    /// Sprite whose opaque pixels are those where `shape(x, y)` holds
    pub fn from_fn(
        name: impl Into<String>,
        width: u32,
        height: u32,
        shape: impl Fn(u32, u32) -> bool,
    ) -> Self {
        let mut alpha = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                alpha.push(if shape(x, y) { 255 } else { 0 });
            }
        }
        Self::new(name, width, height, alpha)
    }

    #[inline]
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.alpha[(y * self.width + x) as usize]
    }
}

/// Every sprite the game states draw
#[derive(Debug, Clone)]
pub struct Assets {
    pub background: Sprite,
    pub ground: Sprite,
    /// Plane animation frames
    pub plane_frames: Vec<Sprite>,
    /// Obstacle variants, drawn pointing up (flipped at spawn for downward)
    pub obstacles: Vec<Sprite>,
    /// Panel behind the fail screen score
    pub menu_panel: Sprite,
}

impl Assets {
    /// Procedural stand-ins with the proportions of the real art.
    ///
    /// Used by the headless binary and by tests.
    pub fn placeholder() -> Self {
        let plane_frames = (0..3)
            .map(|i| {
                // Ellipse body, the propeller stripe moves between frames
                Sprite::from_fn(format!("plane/red{i}"), 44, 30, move |x, y| {
                    let dx = (x as f32 + 0.5 - 22.0) / 22.0;
                    let dy = (y as f32 + 0.5 - 15.0) / 15.0;
                    dx * dx + dy * dy <= 1.0 || (x >= 40 && y / 10 == i)
                })
            })
            .collect();

        let obstacles = (0..2)
            .map(|i| {
                // Tapered spire, wide at the base (bottom row)
                let width = 60 + i * 20;
                let height = 280 + i * 40;
                Sprite::from_fn(format!("obstacles/{i}"), width, height, move |x, y| {
                    let half = (width as f32 / 2.0) * (0.25 + 0.75 * y as f32 / height as f32);
                    (x as f32 + 0.5 - width as f32 / 2.0).abs() <= half
                })
            })
            .collect();

        Self {
            background: Sprite::solid("environment/background", GAME_W as u32 + 20, GAME_H as u32),
            ground: Sprite::solid("environment/ground", 2 * GAME_W as u32 + 100, 60),
            plane_frames,
            obstacles,
            menu_panel: Sprite::solid("ui/menu", 240, 120),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_alpha() {
        let sprite = Sprite::from_fn("checker", 4, 2, |x, y| (x + y) % 2 == 0);
        assert_eq!(sprite.alpha_at(0, 0), 255);
        assert_eq!(sprite.alpha_at(1, 0), 0);
        assert_eq!(sprite.alpha_at(1, 1), 255);
    }

    #[test]
    #[should_panic]
    fn test_new_rejects_wrong_len() {
        let _ = Sprite::new("bad", 3, 3, vec![0; 8]);
    }

    #[test]
    fn test_placeholder_shapes() {
        let assets = Assets::placeholder();
        assert_eq!(assets.plane_frames.len(), 3);
        assert_eq!(assets.obstacles.len(), 2);
        // Ground must be wide enough that wrapping never exposes a gap
        assert!(assets.ground.width as f32 >= 2.0 * GAME_W);
        assert!(assets.background.width as f32 >= GAME_W);
    }
}
