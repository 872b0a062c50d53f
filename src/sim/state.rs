//! Entity types and the gameplay registry
//!
//! Positions are top-left corners in playfield pixels (y grows downward),
//! kept as floats and rounded only when a screen rectangle is needed.

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::mask::Mask;
use crate::assets::{Assets, Sprite};
use crate::consts::*;

/// Axis-aligned integer rectangle on the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub pos: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            size: IVec2::new(w, h),
        }
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn center(&self) -> IVec2 {
        self.pos + self.size / 2
    }
}

/// A horizontally scrolling strip (background, ground)
#[derive(Debug, Clone)]
pub struct ScrollingLayer {
    pub sprite: Sprite,
    /// How many copies of the sprite are laid side by side
    pub copies: u32,
    pub pos: Vec2,
    pub speed: f32,
    /// Present only for layers the plane can crash into
    mask: Option<Mask>,
}

impl ScrollingLayer {
    pub fn new(sprite: Sprite, copies: u32, pos: Vec2, speed: f32) -> Self {
        Self {
            sprite,
            copies: copies.max(1),
            pos,
            speed,
            mask: None,
        }
    }

    /// Sky backdrop: two tiled copies anchored at the top-left
    pub fn background(sprite: Sprite) -> Self {
        Self::new(sprite, 2, Vec2::ZERO, BACKGROUND_SPEED)
    }

    /// Ground strip: sits on the bottom edge and is collidable
    pub fn ground(sprite: Sprite) -> Self {
        let y = GAME_H - sprite.height as f32;
        let mut layer = Self::new(sprite, 1, Vec2::new(0.0, y), GROUND_SPEED);
        layer.mask = Some(Mask::from_sprite(&layer.sprite));
        layer
    }

    /// Total width of all copies
    pub fn span(&self) -> f32 {
        (self.sprite.width * self.copies) as f32
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.pos.x.round() as i32,
            self.pos.y.round() as i32,
            self.span() as i32,
            self.sprite.height as i32,
        )
    }

    /// Scroll left, snapping back to the origin once half the span is behind the viewport
    pub fn update(&mut self, dt: f32) {
        let mut x = self.pos.x - self.speed * dt;
        if self.pos.x + self.span() / 2.0 <= 0.0 {
            x = 0.0;
        }
        self.pos.x = x;
    }

    /// Top-left of each tiled copy, for drawing
    pub fn tile_positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        (0..self.copies).map(|i| self.pos + Vec2::new((i * self.sprite.width) as f32, 0.0))
    }

    pub fn mask(&self) -> Option<&Mask> {
        self.mask.as_ref()
    }
}

/// The player's plane
#[derive(Debug, Clone)]
pub struct Plane {
    /// Top-left of the unrotated sprite
    pub pos: Vec2,
    /// Vertical velocity (positive = falling)
    pub velocity: f32,
    pub gravity: f32,
    /// Fractional animation frame
    pub frame_index: f32,
    /// Tilt in degrees (presentation only)
    pub rotation: f32,
    frames: Vec<Sprite>,
    frame_masks: Vec<Mask>,
    /// Mask of the current frame at the current rotation
    mask: Mask,
}

impl Plane {
    /// Spawn with the sprite's left-middle at `mid_left`
    ///
    /// Panics if `frames` is empty.
    pub fn new(frames: Vec<Sprite>, mid_left: Vec2) -> Self {
        assert!(!frames.is_empty(), "plane needs at least one frame");
        let frame_masks: Vec<Mask> = frames.iter().map(Mask::from_sprite).collect();
        let half_h = (frames[0].height / 2) as f32;
        Self {
            pos: Vec2::new(mid_left.x, mid_left.y - half_h),
            velocity: 0.0,
            gravity: GRAVITY,
            frame_index: 0.0,
            rotation: 0.0,
            mask: frame_masks[0].clone(),
            frames,
            frame_masks,
        }
    }

    /// Standard spawn point, left of center
    pub fn spawn(frames: Vec<Sprite>) -> Self {
        Self::new(frames, Vec2::new((GAME_W / 20.0).floor(), (GAME_H / 2.0).floor()))
    }

    #[inline]
    fn frame(&self) -> usize {
        self.frame_index as usize
    }

    /// Sprite for the current animation frame
    pub fn sprite(&self) -> &Sprite {
        &self.frames[self.frame()]
    }

    pub fn rect(&self) -> Rect {
        let sprite = self.sprite();
        Rect::new(
            self.pos.x.round() as i32,
            self.pos.y.round() as i32,
            sprite.width as i32,
            sprite.height as i32,
        )
    }

    /// Integrate gravity
    pub fn step(&mut self, dt: f32) {
        self.velocity += self.gravity * dt;
        self.pos.y += self.velocity * dt;
    }

    /// Advance the animation, wrapping to the first frame
    pub fn animate(&mut self, dt: f32) {
        self.frame_index += ANIMATION_RATE * dt;
        if self.frame_index >= self.frames.len() as f32 {
            self.frame_index = 0.0;
        }
    }

    /// Tilt from velocity and rebuild the collision mask
    pub fn rotate(&mut self) {
        self.rotation = -self.velocity * ROTATION_PER_VELOCITY;
        self.mask = self.frame_masks[self.frame()].rotated(self.rotation);
    }

    /// Overwrite velocity with the upward impulse
    pub fn jump(&mut self) {
        self.velocity = -JUMP_IMPULSE;
    }

    pub fn update(&mut self, dt: f32) {
        self.step(dt);
        self.animate(dt);
        self.rotate();
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Where the (possibly grown) rotated mask sits: centered on the sprite
    pub fn mask_pos(&self) -> IVec2 {
        let center = self.rect().center();
        center - IVec2::new(self.mask.width() as i32 / 2, self.mask.height() as i32 / 2)
    }
}

/// Which edge an obstacle grows from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Rooted at the bottom edge, pointing up
    Up,
    /// Hanging from the top edge, pointing down
    Down,
}

/// A scrolling obstacle
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub orientation: Orientation,
    pub sprite: Sprite,
    mask: Mask,
}

impl Obstacle {
    /// Place an obstacle horizontally centered on `center_x`.
    ///
    /// `edge_y` is the bottom of an upward obstacle or the top of a downward one.
    pub fn new(id: u32, sprite: Sprite, orientation: Orientation, center_x: i32, edge_y: i32) -> Self {
        let (w, h) = (sprite.width as i32, sprite.height as i32);
        let mask = Mask::from_sprite(&sprite);
        let (mask, top) = match orientation {
            Orientation::Up => (mask, edge_y - h),
            Orientation::Down => (mask.flipped_vertical(), edge_y),
        };
        Self {
            id,
            pos: Vec2::new((center_x - w / 2) as f32, top as f32),
            orientation,
            sprite,
            mask,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.pos.x.round() as i32,
            self.pos.y.round() as i32,
            self.sprite.width as i32,
            self.sprite.height as i32,
        )
    }

    pub fn update(&mut self, dt: f32) {
        self.pos.x -= OBSTACLE_SPEED * dt;
    }

    /// Fully scrolled past the cull line
    pub fn is_offscreen(&self) -> bool {
        self.rect().right() <= OBSTACLE_CULL_X
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Whether the renderer should draw the sprite upside down
    pub fn flipped(&self) -> bool {
        self.orientation == Orientation::Down
    }
}

/// Recurring wall-clock trigger, polled once per tick
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    pub interval_ms: u64,
    next_due_ms: u64,
}

impl SpawnTimer {
    pub fn new(now_ms: u64, interval_ms: u64) -> Self {
        Self {
            interval_ms,
            next_due_ms: now_ms + interval_ms,
        }
    }

    /// Returns true when the interval has elapsed.
    ///
    /// Fires at most once per poll; after a long gap (pause) the schedule
    /// restarts from `now_ms` instead of bursting.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if now_ms < self.next_due_ms {
            return false;
        }
        self.next_due_ms += self.interval_ms;
        if self.next_due_ms <= now_ms {
            self.next_due_ms = now_ms + self.interval_ms;
        }
        true
    }

    pub fn next_due_ms(&self) -> u64 {
        self.next_due_ms
    }
}

/// Every entity alive while the gameplay state is on the stack
#[derive(Debug, Clone)]
pub struct World {
    pub background: ScrollingLayer,
    pub ground: ScrollingLayer,
    /// `None` once the plane has crashed, until the run is reset
    pub player: Option<Plane>,
    /// Active obstacles (sorted by id, oldest first)
    pub obstacles: Vec<Obstacle>,
    pub spawn_timer: SpawnTimer,
    plane_frames: Vec<Sprite>,
    obstacle_sprites: Vec<Sprite>,
    rng: Pcg32,
    next_id: u32,
}

impl World {
    /// Fresh world with the plane at its spawn point
    ///
    /// Panics if `assets` has no obstacle sprites.
    pub fn new(assets: &Assets, seed: u64, now_ms: u64) -> Self {
        assert!(!assets.obstacles.is_empty(), "world needs at least one obstacle sprite");
        Self {
            background: ScrollingLayer::background(assets.background.clone()),
            ground: ScrollingLayer::ground(assets.ground.clone()),
            player: Some(Plane::spawn(assets.plane_frames.clone())),
            obstacles: Vec::new(),
            spawn_timer: SpawnTimer::new(now_ms, SPAWN_INTERVAL_MS),
            plane_frames: assets.plane_frames.clone(),
            obstacle_sprites: assets.obstacles.clone(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_alive(&self) -> bool {
        self.player.is_some()
    }

    /// Replace the plane with a fresh one at the spawn point
    pub fn respawn_player(&mut self) {
        self.player = Some(Plane::spawn(self.plane_frames.clone()));
    }

    /// Jump if the plane is alive; returns whether it jumped
    pub fn jump(&mut self) -> bool {
        match &mut self.player {
            Some(plane) => {
                plane.jump();
                true
            }
            None => false,
        }
    }

    /// Spawn one obstacle with random orientation, variant and offsets
    pub fn spawn_obstacle(&mut self) -> u32 {
        let orientation = if self.rng.random_bool(0.5) {
            Orientation::Up
        } else {
            Orientation::Down
        };
        let variant = self.rng.random_range(0..self.obstacle_sprites.len());
        let center_x = GAME_W as i32 + self.rng.random_range(SPAWN_OFFSET_X.0..=SPAWN_OFFSET_X.1);
        let overhang = self.rng.random_range(SPAWN_OVERHANG_Y.0..=SPAWN_OVERHANG_Y.1);
        let edge_y = match orientation {
            Orientation::Up => GAME_H as i32 + overhang,
            Orientation::Down => -overhang,
        };
        self.spawn_obstacle_at(orientation, variant, center_x, edge_y)
    }

    /// Spawn an obstacle at an exact spot
    ///
    /// Panics if `variant` is not a loaded obstacle sprite.
    pub fn spawn_obstacle_at(
        &mut self,
        orientation: Orientation,
        variant: usize,
        center_x: i32,
        edge_y: i32,
    ) -> u32 {
        let id = self.next_entity_id();
        let sprite = self.obstacle_sprites[variant].clone();
        let obstacle = Obstacle::new(id, sprite, orientation, center_x, edge_y);
        log::debug!(
            "Obstacle {} spawned {:?} at x={} (edge y={})",
            id,
            orientation,
            center_x,
            edge_y
        );
        self.obstacles.push(obstacle);
        id
    }

    /// Remove the plane and every obstacle (crash aftermath)
    pub fn clear_after_crash(&mut self) {
        self.player = None;
        self.obstacles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        World::new(&Assets::placeholder(), 7, 0)
    }

    #[test]
    fn test_gravity_scenario() {
        let mut plane = Plane::spawn(Assets::placeholder().plane_frames);
        let mut last_y = plane.pos.y;
        for _ in 0..5 {
            plane.update(0.1);
            assert!(plane.pos.y > last_y);
            last_y = plane.pos.y;
        }
        assert!((plane.velocity - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_jump_overwrites_velocity() {
        let mut w = world();
        w.player.as_mut().unwrap().velocity = 250.0;
        assert!(w.jump());
        assert!(w.jump());
        assert_eq!(w.player.as_ref().unwrap().velocity, -JUMP_IMPULSE);
    }

    #[test]
    fn test_jump_without_plane() {
        let mut w = world();
        w.clear_after_crash();
        assert!(!w.jump());
    }

    #[test]
    fn test_plane_spawns_mid_left() {
        let plane = Plane::spawn(Assets::placeholder().plane_frames);
        let rect = plane.rect();
        assert_eq!(rect.pos.x, 25);
        assert_eq!(rect.center().y, 250);
    }

    #[test]
    fn test_animation_wraps() {
        let mut plane = Plane::spawn(Assets::placeholder().plane_frames);
        plane.animate(0.2);
        assert_eq!(plane.frame(), 1);
        plane.animate(0.2);
        assert_eq!(plane.frame(), 0);
    }

    #[test]
    fn test_rotation_follows_velocity() {
        let mut plane = Plane::spawn(Assets::placeholder().plane_frames);
        plane.jump();
        plane.rotate();
        assert!((plane.rotation - 24.0).abs() < 1e-4);
        // Tilted mask grows past the sprite bounds
        assert!(plane.mask().height() > plane.sprite().height);
    }

    #[test]
    fn test_layer_wraps_to_origin() {
        let mut layer = ScrollingLayer::new(Sprite::solid("bg", 100, 10), 2, Vec2::ZERO, 100.0);
        layer.update(0.5);
        assert_eq!(layer.pos.x, -50.0);
        layer.update(0.5);
        assert_eq!(layer.pos.x, -100.0);
        // Center reached x = 0: snap back
        layer.update(0.5);
        assert_eq!(layer.pos.x, 0.0);
    }

    #[test]
    fn test_ground_sits_on_bottom_edge() {
        let ground = ScrollingLayer::ground(Sprite::solid("g", 600, 60));
        assert_eq!(ground.rect().pos.y, 440);
        assert!(ground.mask().is_some());
        assert!(ScrollingLayer::background(Sprite::solid("b", 10, 10)).mask().is_none());
    }

    #[test]
    fn test_obstacle_placement() {
        let sprite = Sprite::from_fn("spire", 20, 100, |_, y| y > 50);
        let up = Obstacle::new(1, sprite.clone(), Orientation::Up, 540, 520);
        assert_eq!(up.rect(), Rect::new(530, 420, 20, 100));
        assert!(up.mask().get(0, 99));

        let down = Obstacle::new(2, sprite, Orientation::Down, 540, -20);
        assert_eq!(down.rect().top(), -20);
        assert!(down.flipped());
        // The solid base ends up at the top once flipped
        assert!(down.mask().get(0, 0));
        assert!(!down.mask().get(0, 99));
    }

    #[test]
    fn test_spawn_timer() {
        let mut timer = SpawnTimer::new(1000, 1400);
        assert!(!timer.poll(2399));
        assert!(timer.poll(2400));
        assert!(!timer.poll(2500));
        assert_eq!(timer.next_due_ms(), 3800);
        // Long stall: fires once, then reschedules from now
        assert!(timer.poll(10_000));
        assert!(!timer.poll(10_001));
        assert_eq!(timer.next_due_ms(), 11_400);
    }

    #[test]
    #[should_panic(expected = "world needs at least one obstacle sprite")]
    fn test_world_rejects_missing_obstacles() {
        let assets = Assets {
            obstacles: Vec::new(),
            ..Assets::placeholder()
        };
        let _ = World::new(&assets, 7, 0);
    }

    #[test]
    fn test_random_spawn_within_bounds() {
        let mut w = world();
        for _ in 0..50 {
            w.spawn_obstacle();
        }
        for o in &w.obstacles {
            let rect = o.rect();
            assert!((540..=600).contains(&rect.center().x));
            let bottom = rect.pos.y + rect.size.y;
            match o.orientation {
                Orientation::Up => assert!((510..=550).contains(&bottom)),
                Orientation::Down => assert!((-50..=-10).contains(&rect.top())),
            }
        }
        assert!(w.obstacles.iter().any(|o| o.orientation == Orientation::Up));
        assert!(w.obstacles.iter().any(|o| o.orientation == Orientation::Down));
        // IDs are unique and increasing
        assert!(w.obstacles.windows(2).all(|p| p[0].id < p[1].id));
    }
}
