//! Collision volumes and the world collaborator
//!
//! The core never owns scene meshes. It asks a `World` whether a candidate
//! player position overlaps anything and where named objects currently are.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn translated(&self, by: Vec3) -> Self {
        Self {
            min: self.min + by,
            max: self.max + by,
        }
    }

    /// Strict overlap: boxes that only share a face do not intersect
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }
}

/// The scene as seen by the simulation
pub trait World {
    /// Static and dynamic collision volumes for the current frame
    fn obstacles(&self) -> Vec<Aabb>;

    /// Would the player collider centred at `candidate` overlap an obstacle?
    fn would_collide(&self, candidate: Vec3) -> bool;

    /// Current position of a named scene object, `None` if it is not loaded
    fn object_position(&self, name: &str) -> Option<Vec3>;
}
