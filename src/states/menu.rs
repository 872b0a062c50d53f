//! Main menu, ranking and credits screens
//!
//! All three draw the shared scrolling backdrop and keep it moving while
//! they are on top.

use glam::Vec2;

use super::{FrameTime, GameplayState, State, Transition};
use crate::consts::*;
use crate::platform::{InputEvent, Key};
use crate::renderer::Canvas;
use crate::session::SessionContext;

const CREDITS: &[&str] = &["CREDITS", "A flappy arcade game", "written in Rust"];

/// Wrapping selection over a fixed option list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuCursor {
    index: usize,
    len: usize,
}

impl MenuCursor {
    pub fn new(len: usize) -> Self {
        assert!(len > 0, "menu needs at least one option");
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Move on Up/Down; other keys are ignored
    pub fn handle_key(&mut self, key: Key) {
        match key {
            Key::Down => self.index = (self.index + 1) % self.len,
            Key::Up => self.index = (self.index + self.len - 1) % self.len,
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainOption {
    Play,
    Ranking,
    Credits,
}

impl MainOption {
    pub const ALL: [MainOption; 3] = [MainOption::Play, MainOption::Ranking, MainOption::Credits];

    pub fn label(&self) -> &'static str {
        match self {
            MainOption::Play => "Play",
            MainOption::Ranking => "Ranking",
            MainOption::Credits => "Credits",
        }
    }
}

/// Starting screen: Play / Ranking / Credits
#[derive(Debug)]
pub struct MainMenu {
    cursor: MenuCursor,
    confirmed: bool,
}

impl Default for MainMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl MainMenu {
    pub fn new() -> Self {
        Self {
            cursor: MenuCursor::new(MainOption::ALL.len()),
            confirmed: false,
        }
    }

    pub fn selected(&self) -> MainOption {
        MainOption::ALL[self.cursor.index()]
    }

    fn cursor_top_left(&self) -> Vec2 {
        Vec2::new(
            (GAME_W / 4.0).floor() + 10.0,
            (GAME_H / 2.0).floor() - 15.0 + self.cursor.index() as f32 * LINE_SPACING,
        )
    }
}

impl State for MainMenu {
    fn name(&self) -> &'static str {
        "MainMenu"
    }

    fn on_enter(&mut self, ctx: &mut SessionContext, _now_ms: u64) {
        ctx.audio.start_music();
    }

    fn handle_event(&mut self, event: &InputEvent, _ctx: &mut SessionContext) {
        if let InputEvent::KeyDown(key) = *event {
            self.cursor.handle_key(key);
            if key == Key::Confirm {
                self.confirmed = true;
            }
        }
    }

    fn update(&mut self, time: FrameTime, ctx: &mut SessionContext) -> Transition {
        ctx.backdrop.update(time.dt);
        if !std::mem::take(&mut self.confirmed) {
            return Transition::None;
        }
        match self.selected() {
            MainOption::Play => Transition::Push(Box::new(GameplayState::new(ctx, time.now_ms))),
            MainOption::Ranking => Transition::Push(Box::new(RankingMenu::default())),
            MainOption::Credits => Transition::Push(Box::new(CreditsMenu::default())),
        }
    }

    fn render(&self, canvas: &mut dyn Canvas, ctx: &SessionContext) {
        canvas.fill(BLACK);
        ctx.backdrop.render(canvas);
        canvas.text("Flappy Plane", BLACK, Vec2::new(GAME_W / 2.0, GAME_H / 4.0));
        canvas.rect(self.cursor_top_left(), Vec2::splat(30.0), BLUE);
        for (i, option) in MainOption::ALL.iter().enumerate() {
            let y = (GAME_H / 2.0).floor() + i as f32 * LINE_SPACING;
            canvas.text(option.label(), BLACK, Vec2::new(GAME_W / 2.0, y));
        }
    }
}

/// Confirm pressed on a screen whose only action is "back"
fn back_requested(event: &InputEvent) -> bool {
    *event == InputEvent::KeyDown(Key::Confirm)
}

/// Leaderboard screen; confirm returns to the main menu
#[derive(Debug, Default)]
pub struct RankingMenu {
    leave: bool,
}

impl State for RankingMenu {
    fn name(&self) -> &'static str {
        "RankingMenu"
    }

    fn on_enter(&mut self, ctx: &mut SessionContext, _now_ms: u64) {
        ctx.ranking.reload();
    }

    fn handle_event(&mut self, event: &InputEvent, _ctx: &mut SessionContext) {
        self.leave |= back_requested(event);
    }

    fn update(&mut self, time: FrameTime, ctx: &mut SessionContext) -> Transition {
        ctx.backdrop.update(time.dt);
        if self.leave {
            Transition::Pop
        } else {
            Transition::None
        }
    }

    fn render(&self, canvas: &mut dyn Canvas, ctx: &SessionContext) {
        canvas.fill(BLACK);
        ctx.backdrop.render(canvas);
        if ctx.ranking.is_empty() {
            canvas.text("No ranking yet!", BLACK, Vec2::new(GAME_W / 2.0, GAME_H / 2.0));
            return;
        }
        let top = GAME_H / 2.0 - (ctx.ranking.len() as f32 / 2.0).floor() * LINE_SPACING;
        for (i, entry) in ctx.ranking.entries().iter().enumerate() {
            let line = format!("{}. {}: {}", i + 1, entry.name, entry.score);
            canvas.text(&line, BLACK, Vec2::new(GAME_W / 2.0, top + i as f32 * LINE_SPACING));
        }
    }
}

/// Credits screen; confirm returns to the main menu
#[derive(Debug, Default)]
pub struct CreditsMenu {
    leave: bool,
}

impl State for CreditsMenu {
    fn name(&self) -> &'static str {
        "CreditsMenu"
    }

    fn handle_event(&mut self, event: &InputEvent, _ctx: &mut SessionContext) {
        self.leave |= back_requested(event);
    }

    fn update(&mut self, time: FrameTime, ctx: &mut SessionContext) -> Transition {
        ctx.backdrop.update(time.dt);
        if self.leave {
            Transition::Pop
        } else {
            Transition::None
        }
    }

    fn render(&self, canvas: &mut dyn Canvas, ctx: &SessionContext) {
        canvas.fill(BLACK);
        ctx.backdrop.render(canvas);
        for (i, line) in CREDITS.iter().enumerate() {
            let y = GAME_H / 2.0 - 15.0 + i as f32 * LINE_SPACING;
            canvas.text(line, BLACK, Vec2::new(GAME_W / 2.0, y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawList;
    use crate::session::test_session;

    const T: FrameTime = FrameTime { dt: 0.016, now_ms: 0 };

    fn press(state: &mut dyn State, key: Key, ctx: &mut SessionContext) -> Transition {
        state.handle_event(&InputEvent::KeyDown(key), ctx);
        state.update(T, ctx)
    }

    #[test]
    fn test_cursor_wraps_both_ways() {
        let mut cursor = MenuCursor::new(3);
        cursor.handle_key(Key::Up);
        assert_eq!(cursor.index(), 2);
        cursor.handle_key(Key::Down);
        assert_eq!(cursor.index(), 0);
        cursor.handle_key(Key::Jump);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn test_main_menu_targets() {
        let mut ctx = test_session();
        let mut menu = MainMenu::new();

        let t = press(&mut menu, Key::Confirm, &mut ctx);
        assert!(matches!(t, Transition::Push(ref s) if s.name() == "GameplayState"));

        menu.handle_event(&InputEvent::KeyDown(Key::Down), &mut ctx);
        let t = press(&mut menu, Key::Confirm, &mut ctx);
        assert!(matches!(t, Transition::Push(ref s) if s.name() == "RankingMenu"));

        let t = press(&mut menu, Key::Down, &mut ctx);
        assert!(matches!(t, Transition::None));
        let t = press(&mut menu, Key::Confirm, &mut ctx);
        assert!(matches!(t, Transition::Push(ref s) if s.name() == "CreditsMenu"));
    }

    #[test]
    fn test_main_menu_scrolls_backdrop() {
        let mut ctx = test_session();
        let mut menu = MainMenu::new();
        menu.update(T, &mut ctx);
        assert!(ctx.backdrop.background.pos.x < 0.0);
    }

    #[test]
    fn test_sub_menus_pop_on_confirm() {
        let mut ctx = test_session();
        assert!(matches!(press(&mut RankingMenu::default(), Key::Confirm, &mut ctx), Transition::Pop));
        assert!(matches!(press(&mut CreditsMenu::default(), Key::Confirm, &mut ctx), Transition::Pop));
        assert!(matches!(press(&mut CreditsMenu::default(), Key::Escape, &mut ctx), Transition::None));
    }

    #[test]
    fn test_ranking_screen_contents() {
        let mut ctx = test_session();
        let mut canvas = DrawList::new();
        RankingMenu::default().render(&mut canvas, &ctx);
        assert!(canvas.contains_text("No ranking yet"));

        ctx.ranking.record("Ann", 12);
        ctx.ranking.record("Bob", 30);
        canvas.clear();
        RankingMenu::default().render(&mut canvas, &ctx);
        assert_eq!(canvas.texts(), ["1. Bob: 30", "2. Ann: 12"]);
    }
}
