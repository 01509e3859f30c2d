//! Axis-aligned bounding box overlap tests
//!
//! Every pairwise interaction in the arena (projectile vs hostile, hostile vs
//! player, pickup vs player) reduces to a strict AABB overlap: boxes that only
//! share an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Grow the box by `margin` on every side
    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(margin),
            size: self.size + Vec2::splat(margin * 2.0),
        }
    }

    /// Strict overlap test (touching edges do not count)
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// Overlap test for anything that exposes bounds
pub fn check_collision(a: &impl Bounded, b: &impl Bounded) -> bool {
    a.bounds().overlaps(&b.bounds())
}

/// Overlap test with both boxes grown by `margin` first
pub fn check_collision_lenient(a: &impl Bounded, b: &impl Bounded, margin: f32) -> bool {
    a.bounds().expanded(margin).overlaps(&b.bounds().expanded(margin))
}

/// Entities with a collision box
pub trait Bounded {
    fn bounds(&self) -> Aabb;
}
