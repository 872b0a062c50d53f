//! Layered state machine
//!
//! The stack owns every live state. Only the top state receives input and
//! advances; states below it may still be drawn when the states above them
//! are overlays (pause and fail screens over the frozen run).

pub mod gameplay;
pub mod menu;
pub mod overlay;

pub use gameplay::GameplayState;
pub use menu::{CreditsMenu, MainMenu, MenuCursor, RankingMenu};
pub use overlay::{FailedState, PauseState};

use crate::platform::InputEvent;
use crate::renderer::Canvas;
use crate::session::SessionContext;

/// Timing for one logical tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous tick
    pub dt: f32,
    /// Wall-clock reading for this tick
    pub now_ms: u64,
}

/// What a state asks the stack to do after its update
pub enum Transition {
    None,
    /// Put a new state on top
    Push(Box<dyn State>),
    /// Remove the requesting state
    Pop,
    /// Pop until only the bottom state remains
    PopToRoot,
}

impl std::fmt::Debug for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transition::None => write!(f, "None"),
            Transition::Push(s) => write!(f, "Push({})", s.name()),
            Transition::Pop => write!(f, "Pop"),
            Transition::PopToRoot => write!(f, "PopToRoot"),
        }
    }
}

pub trait State {
    fn name(&self) -> &'static str;

    /// Called once, right after the state is pushed
    fn on_enter(&mut self, _ctx: &mut SessionContext, _now_ms: u64) {}

    /// Called once, right before the state is dropped
    fn on_exit(&mut self, _ctx: &mut SessionContext) {}

    /// Called when the state above was popped and this one is on top again
    fn on_resume(&mut self, _ctx: &mut SessionContext, _now_ms: u64) {}

    /// React to one input event (record intent; transitions happen in `update`)
    fn handle_event(&mut self, event: &InputEvent, ctx: &mut SessionContext);

    /// Advance this state's own simulation
    fn update(&mut self, time: FrameTime, ctx: &mut SessionContext) -> Transition;

    /// Draw this state's presentation only
    fn render(&self, canvas: &mut dyn Canvas, ctx: &SessionContext);

    /// Whether the state below should be drawn first
    fn renders_predecessor(&self) -> bool {
        false
    }
}

/// Handling shared by every state, applied before the state's own handler
pub fn handle_common(event: &InputEvent, ctx: &mut SessionContext) {
    if let InputEvent::Quit = event {
        log::info!("Quit requested");
        ctx.quit();
    }
}

/// Ordered states; the last one is on top
pub struct StateStack {
    states: Vec<Box<dyn State>>,
}

impl StateStack {
    /// Start with `root` entered at `now_ms`
    pub fn new(mut root: Box<dyn State>, ctx: &mut SessionContext, now_ms: u64) -> Self {
        log::info!("Entering {}", root.name());
        root.on_enter(ctx, now_ms);
        Self { states: vec![root] }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Name of the top state
    pub fn top_name(&self) -> &'static str {
        self.states
            .last()
            .expect("There should always be at least one state in the stack")
            .name()
    }

    /// Names bottom to top
    pub fn names(&self) -> Vec<&'static str> {
        self.states.iter().map(|s| s.name()).collect()
    }

    /// Index of the state a given state was pushed over
    pub fn predecessor_of(&self, index: usize) -> Option<usize> {
        (index > 0 && index < self.states.len()).then(|| index - 1)
    }

    pub fn push(&mut self, mut state: Box<dyn State>, ctx: &mut SessionContext, now_ms: u64) {
        log::info!("Entering {} over {}", state.name(), self.top_name());
        state.on_enter(ctx, now_ms);
        self.states.push(state);
    }

    /// Remove the top state and resume the one below
    ///
    /// Panics when only one state is left.
    pub fn pop(&mut self, ctx: &mut SessionContext, now_ms: u64) {
        assert!(self.states.len() > 1, "Last state should never be popped off");
        if let Some(mut top) = self.states.pop() {
            log::info!("Leaving {}", top.name());
            top.on_exit(ctx);
        }
        if let Some(top) = self.states.last_mut() {
            top.on_resume(ctx, now_ms);
        }
    }

    /// Pop everything above the bottom state
    pub fn pop_to_root(&mut self, ctx: &mut SessionContext, now_ms: u64) {
        while self.states.len() > 1 {
            if let Some(mut top) = self.states.pop() {
                log::info!("Leaving {}", top.name());
                top.on_exit(ctx);
            }
        }
        if let Some(root) = self.states.last_mut() {
            root.on_resume(ctx, now_ms);
        }
    }

    pub fn apply(&mut self, transition: Transition, ctx: &mut SessionContext, now_ms: u64) {
        match transition {
            Transition::None => {}
            Transition::Push(state) => self.push(state, ctx, now_ms),
            Transition::Pop => self.pop(ctx, now_ms),
            Transition::PopToRoot => self.pop_to_root(ctx, now_ms),
        }
    }

    /// Feed one frame of input and time to the top state, then apply its request
    pub fn tick(&mut self, time: FrameTime, events: &[InputEvent], ctx: &mut SessionContext) {
        let top = self
            .states
            .last_mut()
            .expect("There should always be at least one state in the stack");
        for event in events {
            handle_common(event, ctx);
            top.handle_event(event, ctx);
        }
        let transition = top.update(time, ctx);
        self.apply(transition, ctx, time.now_ms);
    }

    /// Draw from the lowest visible state up to the top
    ///
    /// Walks down through predecessors while the state above renders through.
    pub fn render(&self, canvas: &mut dyn Canvas, ctx: &SessionContext) {
        let mut start = self.states.len() - 1;
        while self.states[start].renders_predecessor() {
            match self.predecessor_of(start) {
                Some(below) => start = below,
                None => break,
            }
        }
        for state in &self.states[start..] {
            state.render(canvas, ctx);
        }
    }
}
