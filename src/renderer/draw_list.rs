//! Recording canvas
//!
//! Stores draw calls instead of pixels. Used headless and by tests to check
//! what a frame would show.

use glam::Vec2;

use super::{Canvas, Color};
use crate::assets::Sprite;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill(Color),
    Sprite {
        name: String,
        top_left: Vec2,
        rotation: f32,
        flip_y: bool,
    },
    Text {
        text: String,
        color: Color,
        center: Vec2,
    },
    Rect {
        top_left: Vec2,
        size: Vec2,
        color: Color,
    },
}

/// One frame's worth of draw calls
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Every text string drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }

    /// How many times a sprite with this name was drawn
    pub fn sprite_count(&self, name: &str) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { name: n, .. } if n == name))
            .count()
    }
}

impl Canvas for DrawList {
    fn begin_frame(&mut self) {
        self.clear();
    }

    fn fill(&mut self, color: Color) {
        self.commands.push(DrawCommand::Fill(color));
    }

    fn sprite(&mut self, sprite: &Sprite, top_left: Vec2, rotation: f32, flip_y: bool) {
        self.commands.push(DrawCommand::Sprite {
            name: sprite.name.clone(),
            top_left,
            rotation,
            flip_y,
        });
    }

    fn text(&mut self, text: &str, color: Color, center: Vec2) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            color,
            center,
        });
    }

    fn rect(&mut self, top_left: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::Rect {
            top_left,
            size,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::WHITE;

    #[test]
    fn test_queries() {
        let mut list = DrawList::new();
        let sprite = Sprite::solid("tree", 2, 2);
        list.fill([0, 0, 0]);
        list.sprite(&sprite, Vec2::ZERO, 0.0, false);
        list.sprite(&sprite, Vec2::ONE, 0.0, true);
        list.text("Score 3", WHITE, Vec2::ZERO);
        assert_eq!(list.sprite_count("tree"), 2);
        assert!(list.contains_text("Score"));
        assert_eq!(list.texts(), vec!["Score 3"]);
        list.clear();
        assert!(list.commands.is_empty());
    }
}
