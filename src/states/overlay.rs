//! Pause and fail screens
//!
//! Both are drawn over the frozen run below them.

use glam::Vec2;

use super::{FrameTime, MenuCursor, State, Transition};
use crate::consts::*;
use crate::platform::{InputEvent, Key};
use crate::renderer::Canvas;
use crate::session::SessionContext;

const PAUSE_OPTIONS: [&str; 2] = ["Restart", "Exit"];

/// Pause box with Restart / Exit
#[derive(Debug)]
pub struct PauseState {
    cursor: MenuCursor,
    confirmed: bool,
}

impl Default for PauseState {
    fn default() -> Self {
        Self::new()
    }
}

impl PauseState {
    pub fn new() -> Self {
        Self {
            cursor: MenuCursor::new(PAUSE_OPTIONS.len()),
            confirmed: false,
        }
    }

    /// Row offset of option `i` from the box center: -1 for the first, +1 for the second
    fn row(i: usize) -> f32 {
        2.0 * i as f32 - 1.0
    }
}

impl State for PauseState {
    fn name(&self) -> &'static str {
        "PauseState"
    }

    fn handle_event(&mut self, event: &InputEvent, _ctx: &mut SessionContext) {
        if let InputEvent::KeyDown(key) = *event {
            self.cursor.handle_key(key);
            if key == Key::Confirm {
                self.confirmed = true;
            }
        }
    }

    fn update(&mut self, _time: FrameTime, ctx: &mut SessionContext) -> Transition {
        if !std::mem::take(&mut self.confirmed) {
            return Transition::None;
        }
        match self.cursor.index() {
            // Back to the run exactly as it was
            0 => Transition::Pop,
            _ => {
                ctx.save_score();
                Transition::PopToRoot
            }
        }
    }

    fn render(&self, canvas: &mut dyn Canvas, _ctx: &SessionContext) {
        let size = Vec2::new(GAME_W / 2.0, GAME_H / 2.0);
        let center = Vec2::new(GAME_W / 2.0, GAME_H / 2.0);
        let top_left = center - size / 2.0;
        canvas.rect(top_left, size, BLACK);

        let cursor_y = center.y - 10.0 + Self::row(self.cursor.index()) * LINE_SPACING;
        canvas.rect(Vec2::new(top_left.x + 10.0, cursor_y), Vec2::splat(20.0), WHITE);
        for (i, label) in PAUSE_OPTIONS.iter().enumerate() {
            let y = center.y + Self::row(i) * LINE_SPACING;
            canvas.text(label, WHITE, Vec2::new(center.x, y));
        }
    }

    fn renders_predecessor(&self) -> bool {
        true
    }
}

/// Crash screen: final score over the frozen run. Escape records the score
/// and starts a new run.
#[derive(Debug, Default)]
pub struct FailedState {
    retry: bool,
}

impl FailedState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl State for FailedState {
    fn name(&self) -> &'static str {
        "FailedState"
    }

    fn on_enter(&mut self, ctx: &mut SessionContext, _now_ms: u64) {
        log::info!("{} crashed after {}s", ctx.player_name, ctx.score);
    }

    fn handle_event(&mut self, event: &InputEvent, _ctx: &mut SessionContext) {
        if *event == InputEvent::KeyDown(Key::Escape) {
            self.retry = true;
        }
    }

    fn update(&mut self, _time: FrameTime, ctx: &mut SessionContext) -> Transition {
        if !std::mem::take(&mut self.retry) {
            return Transition::None;
        }
        ctx.save_score();
        Transition::Pop
    }

    fn render(&self, canvas: &mut dyn Canvas, ctx: &SessionContext) {
        let panel = &ctx.assets.menu_panel;
        let panel_size = Vec2::new(panel.width as f32, panel.height as f32);
        let center = Vec2::new(GAME_W / 2.0, GAME_H / 2.0);
        canvas.sprite(panel, (center - panel_size / 2.0).round(), 0.0, false);
        canvas.text(
            &format!("Score: {}", ctx.score),
            WHITE,
            Vec2::new(center.x, center.y + panel_size.y),
        );
    }

    fn renders_predecessor(&self) -> bool {
        true
    }
}
