//! The run itself
//!
//! Owns the world, turns jump/escape keys into actions, advances the
//! simulation and asks for the pause or fail overlay.

use glam::Vec2;

use super::{FailedState, FrameTime, PauseState, State, Transition};
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::platform::{InputEvent, Key};
use crate::renderer::Canvas;
use crate::session::{SessionContext, draw_layer};
use crate::sim::{World, tick};

pub struct GameplayState {
    world: World,
    go_to_pause: bool,
    /// Set on the crash tick, cleared when the run is reset
    fail_latched: bool,
}

impl GameplayState {
    pub fn new(ctx: &mut SessionContext, now_ms: u64) -> Self {
        let seed = ctx.next_seed();
        log::debug!("New world with seed {}", seed);
        Self {
            world: World::new(&ctx.assets, seed, now_ms),
            go_to_pause: false,
            fail_latched: false,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Start over after a crash: fresh plane and score. Obstacles and
    /// scrolling layers carry on as they are.
    pub fn reset(&mut self, ctx: &mut SessionContext, now_ms: u64) {
        ctx.reset_score(now_ms);
        self.world.respawn_player();
        self.fail_latched = false;
        self.go_to_pause = false;
    }
}

impl State for GameplayState {
    fn name(&self) -> &'static str {
        "GameplayState"
    }

    fn on_enter(&mut self, ctx: &mut SessionContext, now_ms: u64) {
        ctx.reset_score(now_ms);
        log::info!("Run started for {}", ctx.player_name);
    }

    fn on_exit(&mut self, ctx: &mut SessionContext) {
        log::info!("Run over, last score {}", ctx.score);
    }

    fn on_resume(&mut self, ctx: &mut SessionContext, now_ms: u64) {
        if self.fail_latched {
            self.reset(ctx, now_ms);
        }
    }

    fn handle_event(&mut self, event: &InputEvent, ctx: &mut SessionContext) {
        match event {
            InputEvent::KeyDown(Key::Escape) => self.go_to_pause = true,
            InputEvent::KeyDown(Key::Jump) => {
                if self.world.jump() {
                    ctx.audio.play(SoundEffect::Jump);
                }
            }
            _ => {}
        }
    }

    fn update(&mut self, time: FrameTime, ctx: &mut SessionContext) -> Transition {
        let outcome = tick(&mut self.world, time.dt, time.now_ms);
        if !self.fail_latched {
            ctx.update_score(time.now_ms);
        }

        if outcome.crash.is_some() && !self.fail_latched {
            self.fail_latched = true;
            self.go_to_pause = false;
            return Transition::Push(Box::new(FailedState::new()));
        }
        if std::mem::take(&mut self.go_to_pause) && !self.fail_latched {
            return Transition::Push(Box::new(PauseState::new()));
        }
        Transition::None
    }

    fn render(&self, canvas: &mut dyn Canvas, ctx: &SessionContext) {
        canvas.fill(BLACK);
        draw_layer(canvas, &self.world.background);
        draw_layer(canvas, &self.world.ground);
        for obstacle in &self.world.obstacles {
            canvas.sprite(&obstacle.sprite, obstacle.pos.round(), 0.0, obstacle.flipped());
        }
        canvas.text(
            &ctx.score.to_string(),
            BLACK,
            Vec2::new(GAME_W / 2.0, GAME_H / 10.0),
        );
        if let Some(plane) = &self.world.player {
            canvas.sprite(plane.sprite(), plane.pos.round(), plane.rotation, false);
        }
    }
}
