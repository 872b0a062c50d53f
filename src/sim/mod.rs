//! Gameplay simulation module
//!
//! Everything that moves while the gameplay state is on top lives here:
//! - Variable timestep, wall-clock spawn timer
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod mask;
pub mod state;
pub mod tick;

pub use collision::{Crash, check_crash};
pub use mask::Mask;
pub use state::{Obstacle, Orientation, Plane, Rect, ScrollingLayer, SpawnTimer, World};
pub use tick::{TickOutcome, tick};
