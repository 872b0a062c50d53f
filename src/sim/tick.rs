//! Per-frame simulation step
//!
//! Advances the gameplay world by a variable delta time. Deterministic for a
//! given seed, delta-time sequence, clock readings and jump timing.

use super::collision::{Crash, check_crash};
use super::state::World;

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Obstacles created by the spawn timer
    pub spawned: u32,
    /// Obstacles removed after scrolling off the left edge
    pub culled: u32,
    /// Set only on the tick the plane crashed
    pub crash: Option<Crash>,
}

/// Advance the world by `dt` seconds at wall-clock time `now_ms`
pub fn tick(world: &mut World, dt: f32, now_ms: u64) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    // Spawn timer runs on wall-clock time, independent of dt
    if world.spawn_timer.poll(now_ms) {
        world.spawn_obstacle();
        outcome.spawned += 1;
    }

    world.background.update(dt);
    world.ground.update(dt);

    for obstacle in &mut world.obstacles {
        obstacle.update(dt);
    }
    let before = world.obstacles.len();
    world.obstacles.retain(|o| !o.is_offscreen());
    outcome.culled = (before - world.obstacles.len()) as u32;
    if outcome.culled > 0 {
        log::trace!("Culled {} obstacles", outcome.culled);
    }

    let Some(plane) = world.player.as_mut() else {
        return outcome;
    };
    plane.update(dt);

    if let Some(crash) = check_crash(plane, &world.obstacles, &world.ground) {
        log::info!("Plane crashed: {:?}", crash);
        world.clear_after_crash();
        outcome.crash = Some(crash);
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Assets;
    use crate::consts::*;
    use crate::sim::state::Orientation;
    use proptest::prelude::*;

    fn world() -> World {
        World::new(&Assets::placeholder(), 42, 0)
    }

    #[test]
    fn test_idle_tick_no_crash() {
        let mut w = world();
        let outcome = tick(&mut w, 1.0 / 60.0, 16);
        assert_eq!(outcome, TickOutcome::default());
        assert!(w.is_alive());
    }

    #[test]
    fn test_spawn_on_wall_clock() {
        let mut w = world();
        // Tiny dt but the clock has moved past the interval
        let outcome = tick(&mut w, 0.001, SPAWN_INTERVAL_MS);
        assert_eq!(outcome.spawned, 1);
        assert_eq!(w.obstacles.len(), 1);
        // Large dt but the clock has not moved: no spawn
        w.player.as_mut().unwrap().jump();
        let outcome = tick(&mut w, 0.05, SPAWN_INTERVAL_MS + 10);
        assert_eq!(outcome.spawned, 0);
    }

    #[test]
    fn test_obstacle_culled_after_scrolling_off() {
        let mut w = world();
        // Keep the plane out of the way, high above the pillar
        w.player = None;
        let id = w.spawn_obstacle_at(Orientation::Up, 0, GAME_W as i32 + 40, GAME_H as i32 + 10);
        let width = w.obstacles[0].sprite.width as f32;
        // Right edge starts at 540 + width/2 and must reach -100
        let distance = GAME_W + 40.0 + width / 2.0 + 100.0;
        let ticks = (distance / (OBSTACLE_SPEED * 0.02)).ceil() as u32;

        let mut culled = 0;
        for i in 0..ticks {
            assert!(w.obstacles.iter().any(|o| o.id == id), "removed early at tick {i}");
            culled += tick(&mut w, 0.02, 0).culled;
        }
        assert_eq!(culled, 1);
        assert!(w.obstacles.is_empty());
    }

    #[test]
    fn test_crash_clears_world_once() {
        let mut w = world();
        let plane_x = w.player.as_ref().unwrap().rect().pos.x;
        w.spawn_obstacle_at(Orientation::Down, 0, plane_x + 20, -10);
        w.spawn_obstacle_at(Orientation::Up, 1, 450, GAME_H as i32 + 10);

        let outcome = tick(&mut w, 0.0, 0);
        assert!(matches!(outcome.crash, Some(Crash::Obstacle(_))));
        assert!(!w.is_alive());
        assert!(w.obstacles.is_empty());

        // The crash is reported on the crash tick only
        let again = tick(&mut w, 0.016, 16);
        assert_eq!(again.crash, None);
    }

    #[test]
    fn test_ceiling_crash() {
        let mut w = world();
        w.player.as_mut().unwrap().pos.y = 2.0;
        w.jump();
        let outcome = tick(&mut w, 0.02, 0);
        assert_eq!(outcome.crash, Some(Crash::Ceiling));
    }

    #[test]
    fn test_falls_into_ground() {
        let mut w = world();
        let mut crash = None;
        for frame in 0..600 {
            crash = tick(&mut w, 1.0 / 60.0, frame * 16).crash;
            if crash.is_some() {
                break;
            }
            // Any spawned obstacle is far to the right; remove it so only the ground remains
            w.obstacles.clear();
        }
        assert_eq!(crash, Some(Crash::Ground));
    }

    #[test]
    fn test_gravity_scenario_through_tick() {
        let mut w = world();
        let mut ys = vec![w.player.as_ref().unwrap().pos.y];
        for _ in 0..5 {
            tick(&mut w, 0.1, 0);
            let plane = w.player.as_ref().expect("still flying");
            ys.push(plane.pos.y);
        }
        assert!((w.player.as_ref().unwrap().velocity - 300.0).abs() < 1e-3);
        assert!(ys.windows(2).all(|p| p[1] > p[0]));
    }

    proptest! {
        #[test]
        fn prop_trajectory_is_deterministic(
            dts in proptest::collection::vec(0.001f32..0.05, 1..40),
            jump_every in 2usize..10,
        ) {
            let mut a = world();
            let mut b = world();
            let mut clock = 0u64;
            for (i, dt) in dts.iter().enumerate() {
                clock += (dt * 1000.0) as u64;
                if i % jump_every == 0 {
                    a.jump();
                    b.jump();
                }
                let oa = tick(&mut a, *dt, clock);
                let ob = tick(&mut b, *dt, clock);
                prop_assert_eq!(oa, ob);
                let pa = a.player.as_ref().map(|p| (p.pos, p.velocity));
                let pb = b.player.as_ref().map(|p| (p.pos, p.velocity));
                prop_assert_eq!(pa, pb);
            }
        }
    }
}
