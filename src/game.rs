//! Outer game loop
//!
//! Reads the clock, hands each frame's events and delta time to the state
//! stack, then renders the visible chain of states.

use crate::consts::MAX_FRAME_DT;
use crate::platform::{Clock, EventSource, InputEvent};
use crate::renderer::Canvas;
use crate::session::SessionContext;
use crate::states::{FrameTime, MainMenu, StateStack};

/// Game instance holding all state
pub struct Game {
    stack: StateStack,
    ctx: SessionContext,
    clock: Box<dyn Clock>,
    last_ms: u64,
    frames: u64,
}

impl Game {
    /// Start at the main menu
    pub fn new(mut ctx: SessionContext, clock: Box<dyn Clock>) -> Self {
        let now = clock.now_ms();
        let stack = StateStack::new(Box::new(MainMenu::new()), &mut ctx, now);
        Self {
            stack,
            ctx,
            clock,
            last_ms: now,
            frames: 0,
        }
    }

    /// Run one frame: tick the top state with `events`, then draw
    pub fn frame(&mut self, events: &[InputEvent], canvas: &mut dyn Canvas) -> FrameTime {
        let now_ms = self.clock.now_ms();
        // Clamp so a stall (debugger, suspended window) can't tunnel entities
        let dt = (now_ms.saturating_sub(self.last_ms) as f32 / 1000.0).min(MAX_FRAME_DT);
        self.last_ms = now_ms;

        let time = FrameTime { dt, now_ms };
        self.stack.tick(time, events, &mut self.ctx);

        canvas.begin_frame();
        self.stack.render(canvas, &self.ctx);
        self.frames += 1;
        time
    }

    /// Loop until a quit event arrives. `pace` runs after every frame.
    pub fn run(&mut self, source: &mut dyn EventSource, canvas: &mut dyn Canvas, mut pace: impl FnMut()) {
        log::info!("Game loop started");
        while self.ctx.running {
            let events = source.poll(self.clock.now_ms());
            self.frame(&events, canvas);
            pace();
        }
        self.ctx.audio.stop_music();
        log::info!("Game loop stopped after {} frames", self.frames);
    }

    pub fn is_running(&self) -> bool {
        self.ctx.running
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    /// Name of the state on top of the stack
    pub fn top_state(&self) -> &'static str {
        self.stack.top_name()
    }

    /// Stack contents, bottom to top
    pub fn state_names(&self) -> Vec<&'static str> {
        self.stack.names()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
