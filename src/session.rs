//! Data shared by every state for the life of the process

use crate::assets::Assets;
use crate::audio::AudioManager;
use crate::ranking::RankingStore;
use crate::renderer::Canvas;
use crate::settings::Settings;
use crate::sim::ScrollingLayer;

/// Background and ground that keep scrolling behind the menus
#[derive(Debug, Clone)]
pub struct Backdrop {
    pub background: ScrollingLayer,
    pub ground: ScrollingLayer,
}

impl Backdrop {
    pub fn new(assets: &Assets) -> Self {
        Self {
            background: ScrollingLayer::background(assets.background.clone()),
            ground: ScrollingLayer::ground(assets.ground.clone()),
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.background.update(dt);
        self.ground.update(dt);
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        draw_layer(canvas, &self.background);
        draw_layer(canvas, &self.ground);
    }
}

/// Draw every tiled copy of a scrolling layer
pub fn draw_layer(canvas: &mut dyn Canvas, layer: &ScrollingLayer) {
    for pos in layer.tile_positions() {
        canvas.sprite(&layer.sprite, pos.round(), 0.0, false);
    }
}

/// Cross-state session data
#[derive(Debug)]
pub struct SessionContext {
    /// Whole seconds survived in the current run
    pub score: u64,
    /// Clock reading when the current run started
    pub score_origin_ms: u64,
    pub player_name: String,
    pub ranking: RankingStore,
    /// Cleared by a quit event; the outer loop exits after the current tick
    pub running: bool,
    pub playing: bool,
    pub assets: Assets,
    pub audio: AudioManager,
    pub backdrop: Backdrop,
    /// Seed for the next gameplay world
    pub seed: u64,
}

impl SessionContext {
    pub fn new(settings: &Settings, assets: Assets, ranking: RankingStore, audio: AudioManager, seed: u64) -> Self {
        let backdrop = Backdrop::new(&assets);
        Self {
            score: 0,
            score_origin_ms: 0,
            player_name: settings.player_name.clone(),
            ranking,
            running: true,
            playing: true,
            assets,
            audio,
            backdrop,
            seed,
        }
    }

    /// Start a new run at `now_ms`
    pub fn reset_score(&mut self, now_ms: u64) {
        self.score = 0;
        self.score_origin_ms = now_ms;
    }

    /// Recompute the score from elapsed wall-clock time
    pub fn update_score(&mut self, now_ms: u64) {
        self.score = now_ms.saturating_sub(self.score_origin_ms) / 1000;
    }

    /// Record the current score for the player and write the ranking out.
    ///
    /// A failed write is logged; the in-memory ranking still holds the score.
    pub fn save_score(&mut self) -> Option<usize> {
        let rank = self.ranking.record(&self.player_name, self.score);
        match rank {
            Some(rank) => log::info!("{} scored {} (rank #{})", self.player_name, self.score, rank),
            None => log::info!("{} scored {} (unranked)", self.player_name, self.score),
        }
        if let Err(e) = self.ranking.save() {
            log::error!("Failed to save ranking: {e}");
        }
        rank
    }

    /// Stop the process after the current tick
    pub fn quit(&mut self) {
        self.running = false;
        self.playing = false;
    }

    /// Seed for the next world; advances so each run differs
    pub fn next_seed(&mut self) -> u64 {
        let seed = self.seed;
        self.seed = self.seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        seed
    }
}

#[cfg(test)]
pub(crate) fn test_session() -> SessionContext {
    SessionContext::new(
        &Settings::default(),
        Assets::placeholder(),
        RankingStore::new(),
        AudioManager::default(),
        1234,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_is_whole_elapsed_seconds() {
        let mut ctx = test_session();
        ctx.reset_score(5_000);
        ctx.update_score(5_999);
        assert_eq!(ctx.score, 0);
        ctx.update_score(17_400);
        assert_eq!(ctx.score, 12);
        // Clock readings before the origin never underflow
        ctx.update_score(10);
        assert_eq!(ctx.score, 0);
    }

    #[test]
    fn test_save_score_records_best() {
        let mut ctx = test_session();
        ctx.player_name = "Ann".into();
        ctx.score = 12;
        assert_eq!(ctx.save_score(), Some(1));
        ctx.score = 9;
        ctx.save_score();
        assert_eq!(ctx.ranking.score_of("Ann"), Some(12));
    }

    #[test]
    fn test_quit_clears_flags() {
        let mut ctx = test_session();
        ctx.quit();
        assert!(!ctx.running && !ctx.playing);
    }

    #[test]
    fn test_seed_advances() {
        let mut ctx = test_session();
        let a = ctx.next_seed();
        let b = ctx.next_seed();
        assert_eq!(a, 1234);
        assert_ne!(a, b);
    }
}
