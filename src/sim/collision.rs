//! Crash detection for the plane
//!
//! The plane crashes when any solid pixel of its (rotated) mask lands on a
//! solid pixel of an obstacle or the ground, or when it reaches the top edge.

use super::state::{Obstacle, Plane, ScrollingLayer};

/// What the plane ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crash {
    /// Overlapped the obstacle with this id
    Obstacle(u32),
    /// Touched the ground strip
    Ground,
    /// Flew into the top edge of the playfield
    Ceiling,
}

/// Whether the plane's top edge has reached the playfield boundary
#[inline]
pub fn hits_ceiling(plane: &Plane) -> bool {
    plane.rect().top() <= 0
}

/// First obstacle (oldest first) whose mask overlaps the plane
pub fn overlapping_obstacle(plane: &Plane, obstacles: &[Obstacle]) -> Option<u32> {
    let pos = plane.mask_pos();
    obstacles
        .iter()
        .find(|o| plane.mask().overlaps(pos, o.mask(), o.rect().pos))
        .map(|o| o.id)
}

/// Whether the plane overlaps a collidable scrolling layer
pub fn touches_layer(plane: &Plane, layer: &ScrollingLayer) -> bool {
    let Some(mask) = layer.mask() else {
        return false;
    };
    plane.mask().overlaps(plane.mask_pos(), mask, layer.rect().pos)
}

/// Full crash test, obstacles first
pub fn check_crash(plane: &Plane, obstacles: &[Obstacle], ground: &ScrollingLayer) -> Option<Crash> {
    if let Some(id) = overlapping_obstacle(plane, obstacles) {
        return Some(Crash::Obstacle(id));
    }
    if touches_layer(plane, ground) {
        return Some(Crash::Ground);
    }
    if hits_ceiling(plane) {
        return Some(Crash::Ceiling);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{Assets, Sprite};
    use crate::sim::state::Orientation;
    use glam::Vec2;

    fn plane_at(x: f32, y: f32) -> Plane {
        let mut plane = Plane::spawn(Assets::placeholder().plane_frames);
        plane.pos = Vec2::new(x, y);
        plane
    }

    fn ground() -> ScrollingLayer {
        ScrollingLayer::ground(Sprite::solid("ground", 1100, 60))
    }

    #[test]
    fn test_clear_sky() {
        let plane = plane_at(25.0, 200.0);
        assert_eq!(check_crash(&plane, &[], &ground()), None);
    }

    #[test]
    fn test_obstacle_overlap() {
        let plane = plane_at(25.0, 200.0);
        let pillar = Obstacle::new(9, Sprite::solid("p", 40, 300), Orientation::Up, 45, 520);
        assert_eq!(
            check_crash(&plane, std::slice::from_ref(&pillar), &ground()),
            Some(Crash::Obstacle(9))
        );
    }

    #[test]
    fn test_bounding_boxes_overlap_but_pixels_do_not() {
        // Solid only in its two rightmost columns, which lie past the plane's nose
        let spike = Sprite::from_fn("spike", 40, 300, |x, _| x >= 38);
        let plane = plane_at(25.0, 200.0);
        let obstacle = Obstacle::new(3, spike, Orientation::Up, 60, 520);
        assert!(plane.rect().right() > obstacle.rect().pos.x);
        assert_eq!(overlapping_obstacle(&plane, &[obstacle]), None);
    }

    #[test]
    fn test_ground_and_ceiling() {
        assert_eq!(check_crash(&plane_at(25.0, 430.0), &[], &ground()), Some(Crash::Ground));
        assert_eq!(check_crash(&plane_at(25.0, 0.0), &[], &ground()), Some(Crash::Ceiling));
        assert_eq!(check_crash(&plane_at(25.0, 1.0), &[], &ground()), None);
    }
}
