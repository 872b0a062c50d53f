//! Flappy Plane - a side-scrolling arcade game core
//!
//! Core modules:
//! - `states`: Layered state machine (menus, gameplay, pause, fail, ranking)
//! - `sim`: Entity simulation (gravity, scrolling, spawning, mask collision)
//! - `ranking`: Bounded, persisted best-score table
//! - `session`: Cross-state shared data
//! - `renderer` / `audio` / `platform`: Boundaries to the external services

pub mod assets;
pub mod audio;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod ranking;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod states;

pub use game::Game;
pub use ranking::RankingStore;
pub use session::SessionContext;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical playfield size (the canvas the states draw on)
    pub const GAME_W: f32 = 500.0;
    pub const GAME_H: f32 = 500.0;

    /// Longest frame the simulation will integrate in one step (seconds)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Downward acceleration applied to the plane (pixels/s²)
    pub const GRAVITY: f32 = 600.0;
    /// Upward velocity set by a jump (pixels/s)
    pub const JUMP_IMPULSE: f32 = 400.0;
    /// Plane animation rate (frames/s)
    pub const ANIMATION_RATE: f32 = 8.0;
    /// Degrees of tilt per pixel/s of vertical velocity
    pub const ROTATION_PER_VELOCITY: f32 = 0.06;

    /// Horizontal scroll speeds (pixels/s)
    pub const BACKGROUND_SPEED: f32 = 250.0;
    pub const GROUND_SPEED: f32 = 300.0;
    pub const OBSTACLE_SPEED: f32 = 400.0;

    /// Obstacles are removed once their right edge reaches this x
    pub const OBSTACLE_CULL_X: i32 = -100;
    /// Wall-clock interval between obstacle spawns (ms)
    pub const SPAWN_INTERVAL_MS: u64 = 1400;
    /// Horizontal spawn distance past the right edge (pixels, inclusive)
    pub const SPAWN_OFFSET_X: (i32, i32) = (40, 100);
    /// Vertical overhang past the top/bottom edge (pixels, inclusive)
    pub const SPAWN_OVERHANG_Y: (i32, i32) = (10, 50);

    /// Alpha above which a sprite pixel is solid for collision
    pub const MASK_ALPHA_THRESHOLD: u8 = 127;

    /// Number of entries the ranking keeps
    pub const TOP_N: usize = 10;

    /// Text line spacing on menus (pixels)
    pub const LINE_SPACING: f32 = 32.0;

    pub const SETTINGS_FILE: &str = "settings.json";
    pub const SAVE_FILE: &str = "save.json";
    pub const DEFAULT_PLAYER_NAME: &str = "player_1";

    /// RGB colors
    pub const BLACK: [u8; 3] = [0, 0, 0];
    pub const WHITE: [u8; 3] = [255, 255, 255];
    pub const BLUE: [u8; 3] = [0, 0, 255];
}
