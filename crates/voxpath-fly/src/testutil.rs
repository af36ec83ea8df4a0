//! Shared fixtures for the unit tests: a hash-map backed grid and a fully
//! configurable agent with a counting, seeded randomness source.

use std::cell::Cell;
use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use voxpath_core::{Aabb, Point3, Terrain, Vec3};

use crate::traits::{Agent, VoxelGrid};

/// A sparse voxel grid: unset cells report `default`. Counts raw queries so
/// tests can observe whether the per-search cache was consulted.
pub struct MapGrid {
    pub cells: HashMap<Point3, Terrain>,
    pub default: Terrain,
    pub floor_y: i32,
    pub queries: Cell<u64>,
}

impl MapGrid {
    /// An all-open grid with the given minimum build height.
    pub fn open(floor_y: i32) -> Self {
        Self {
            cells: HashMap::new(),
            default: Terrain::Open,
            floor_y,
            queries: Cell::new(0),
        }
    }

    pub fn set(&mut self, p: Point3, t: Terrain) {
        self.cells.insert(p, t);
    }

    /// Fill the inclusive box `[a, b]` with `t`.
    pub fn fill(&mut self, a: Point3, b: Point3, t: Terrain) {
        for x in a.x..=b.x {
            for y in a.y..=b.y {
                for z in a.z..=b.z {
                    self.set(Point3::new(x, y, z), t);
                }
            }
        }
    }
}

impl VoxelGrid for MapGrid {
    fn raw_category(&self, p: Point3) -> Terrain {
        self.queries.set(self.queries.get() + 1);
        self.cells.get(&p).copied().unwrap_or(self.default)
    }

    fn min_y(&self) -> i32 {
        self.floor_y
    }
}

/// Wraps a seeded [`StdRng`] and counts how many values were drawn.
pub struct CountingRng {
    inner: StdRng,
    pub draws: u64,
}

impl CountingRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            draws: 0,
        }
    }
}

impl RngCore for CountingRng {
    fn next_u32(&mut self) -> u32 {
        self.draws += 1;
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws += 1;
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws += 1;
        self.inner.fill_bytes(dest)
    }
}

/// A test agent with an explicit malus table. Every category defaults to
/// cost-neutral except `Blocked`, which is impassable.
pub struct TestAgent {
    pub maluses: HashMap<Terrain, f32>,
    pub bounds: Aabb,
    pub position: Vec3,
    pub can_float: bool,
    pub can_open_doors: bool,
    pub can_pass_doors: bool,
    pub in_water: bool,
    pub rng: CountingRng,
}

impl TestAgent {
    /// A sub-cell agent (0.6 cube) at the given position.
    pub fn small_at(position: Vec3) -> Self {
        Self {
            maluses: HashMap::from([(Terrain::Blocked, -1.0)]),
            bounds: Aabb::centered(position, 0.6, 0.6, 0.6),
            position,
            can_float: false,
            can_open_doors: false,
            can_pass_doors: false,
            in_water: false,
            rng: CountingRng::seeded(0xF17),
        }
    }

    pub fn small() -> Self {
        Self::small_at(Vec3::new(0.5, 0.5, 0.5))
    }

    /// A 1.4-cube agent (footprint 2×2×2) at the given position.
    pub fn large_at(position: Vec3) -> Self {
        let mut agent = Self::small_at(position);
        agent.bounds = Aabb::centered(position, 1.4, 1.4, 1.4);
        agent
    }
}

impl Agent for TestAgent {
    fn malus(&self, terrain: Terrain) -> f32 {
        self.maluses.get(&terrain).copied().unwrap_or(0.0)
    }

    fn set_malus(&mut self, terrain: Terrain, malus: f32) {
        self.maluses.insert(terrain, malus);
    }

    fn bounds(&self) -> Aabb {
        self.bounds
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn can_float(&self) -> bool {
        self.can_float
    }

    fn can_open_doors(&self) -> bool {
        self.can_open_doors
    }

    fn can_pass_doors(&self) -> bool {
        self.can_pass_doors
    }

    fn in_water(&self) -> bool {
        self.in_water
    }

    fn rng(&mut self) -> &mut dyn RngCore {
        &mut self.rng
    }
}
