//! Fixed hallway geometry
//!
//! Walls, platforms and the ground are built once from the floor plan. Props
//! that come from loaded models are registered by the host as they arrive;
//! until then they simply do not collide.

use std::collections::BTreeMap;

use glam::Vec3;

use super::world::{Aabb, World};
use crate::consts::*;

/// Object name the toilet arm model is registered under
pub const ARM_OBJECT: &str = "arm";

/// Props the player bumps into once their models are loaded
pub const COLLIDABLE_PROPS: [&str; 8] = [
    "crate_1",
    "crate_2",
    "old_crate",
    "toilet",
    "commode",
    "table",
    "shelves",
    "nightstand",
];

/// Box orientation on the floor plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Facing {
    /// Long side runs along x
    AlongX,
    /// Quarter turn: long side runs along z
    AlongZ,
}

/// Wall standing on the floor (or raised by `lift`), centred at (x, z)
fn wall(x: f32, z: f32, lift: f32, width: f32, height: f32, thickness: f32, facing: Facing) -> Aabb {
    let center = Vec3::new(x, height / 2.0 + lift, z);
    let size = match facing {
        Facing::AlongX => Vec3::new(width, height, thickness),
        Facing::AlongZ => Vec3::new(thickness, height, width),
    };
    Aabb::from_center_size(center, size)
}

/// Horizontal slab centred at height `y`
fn platform(x: f32, z: f32, y: f32, width: f32, length: f32, thickness: f32) -> Aabb {
    Aabb::from_center_size(Vec3::new(x, y, z), Vec3::new(width, thickness, length))
}

/// Hinge-side centre of door `index`
pub fn door_position(index: usize) -> Vec3 {
    let (slot, z) = if index < LEFT_DOOR_COUNT {
        (index, -DOOR_Z)
    } else {
        // Right-hand doors start one slot further down the hallway
        (index + 1 - LEFT_DOOR_COUNT, DOOR_Z)
    };
    Vec3::new(DOOR_X0 - slot as f32 * DOOR_SPACING, DOOR_HEIGHT / 2.0, z)
}

fn build_walls() -> Vec<Aabb> {
    let mut walls = Vec::with_capacity(22);

    // Room partitions on both sides
    for i in 0..7 {
        let x = 2050.0 - i as f32 * 700.0;
        walls.push(wall(x, -1120.0, 0.0, 1600.0, 700.0, 30.0, Facing::AlongZ));
        walls.push(wall(x, 1120.0, 0.0, 1600.0, 700.0, 30.0, Facing::AlongZ));
    }

    // Outer borders
    walls.push(wall(350.0, -1800.0, 0.0, 5000.0, 700.0, 11.0, Facing::AlongX));
    walls.push(wall(350.0, 1800.0, 0.0, 5000.0, 700.0, 11.0, Facing::AlongX));

    // Invisible inner borders behind the doors; the right one stops short of
    // the bathroom entrance
    walls.push(wall(0.0, -340.0, 0.0, 5000.0, 700.0, 30.0, Facing::AlongX));
    walls.push(wall(-700.0, 340.0, 0.0, 5000.0, 700.0, 30.0, Facing::AlongX));

    // End wall behind the altar and the front wall behind the TV
    walls.push(wall(2075.0, 0.0, 0.0, 2000.0, 1000.0, 30.0, Facing::AlongZ));
    walls.push(wall(-2150.0, 0.0, 0.0, 2000.0, 1000.0, 30.0, Facing::AlongZ));

    // Signs
    walls.push(wall(2067.0, 0.0, 200.0, 130.0, 160.0, 20.0, Facing::AlongZ));
    walls.push(wall(1700.0, 316.0, 200.0, 50.0, 50.0, 2.0, Facing::AlongX));

    walls
}

fn build_platforms() -> Vec<Aabb> {
    vec![
        // Ceiling
        platform(0.0, 0.0, 445.0, 4500.0, 4500.0, 20.0),
        // Bathroom floor
        platform(1700.0, 1070.0, 1.0, 700.0, 1510.0, 2.0),
        // Ground
        platform(0.0, 0.0, 0.0, 10_000.0, 10_000.0, 1.0),
    ]
}

/// A prop registered by the host once its model has loaded
#[derive(Debug, Clone, Copy)]
struct Prop {
    bounds: Aabb,
    collidable: bool,
}

/// The hallway level
#[derive(Debug, Clone)]
pub struct HallwayWorld {
    walls: Vec<Aabb>,
    platforms: Vec<Aabb>,
    props: BTreeMap<String, Prop>,
    collider_size: Vec3,
}

impl Default for HallwayWorld {
    fn default() -> Self {
        Self::new(PLAYER_HEIGHT)
    }
}

impl HallwayWorld {
    /// Build the level for a player of the given eye height
    pub fn new(player_height: f32) -> Self {
        Self {
            walls: build_walls(),
            platforms: build_platforms(),
            props: BTreeMap::new(),
            collider_size: Vec3::new(
                PLAYER_DIAMETER,
                player_height - COLLIDER_HEADROOM,
                PLAYER_DIAMETER,
            ),
        }
    }

    /// Register (or move) a loaded prop
    pub fn register_prop(&mut self, name: &str, bounds: Aabb, collidable: bool) {
        log::debug!("Prop registered: {} at {:?}", name, bounds.center());
        self.props
            .insert(name.to_string(), Prop { bounds, collidable });
    }

    /// Register a prop, colliding only if its name is one of `COLLIDABLE_PROPS`
    pub fn register_named_prop(&mut self, name: &str, bounds: Aabb) {
        let collidable = COLLIDABLE_PROPS.contains(&name);
        self.register_prop(name, bounds, collidable);
    }

    /// Drop a prop whose model was unloaded
    pub fn remove_prop(&mut self, name: &str) -> bool {
        let removed = self.props.remove(name).is_some();
        if removed {
            log::debug!("Prop removed: {}", name);
        }
        removed
    }

    /// Player collider centred at `center`
    pub fn player_box(&self, center: Vec3) -> Aabb {
        Aabb::from_center_size(center, self.collider_size)
    }

    pub fn walls(&self) -> &[Aabb] {
        &self.walls
    }

    pub fn platforms(&self) -> &[Aabb] {
        &self.platforms
    }
}

impl World for HallwayWorld {
    fn obstacles(&self) -> Vec<Aabb> {
        self.walls
            .iter()
            .chain(self.platforms.iter())
            .copied()
            .chain(
                self.props
                    .values()
                    .filter(|p| p.collidable)
                    .map(|p| p.bounds),
            )
            .collect()
    }

    fn would_collide(&self, candidate: Vec3) -> bool {
        let player = self.player_box(candidate);
        self.walls
            .iter()
            .chain(self.platforms.iter())
            .any(|b| b.intersects(&player))
            || self
                .props
                .values()
                .any(|p| p.collidable && p.bounds.intersects(&player))
    }

    fn object_position(&self, name: &str) -> Option<Vec3> {
        self.props.get(name).map(|p| p.bounds.center())
    }
}
