use rand::RngCore;
use voxpath_core::{Aabb, Point3, Terrain, Vec3};

/// Read-only terrain query over a voxel world.
///
/// Implementations report the *raw* category of a cell's content, before any
/// footprint or neighbor context is applied.
pub trait VoxelGrid {
    /// Raw category of the cell at `p`.
    fn raw_category(&self, p: Point3) -> Terrain;

    /// Lowest y coordinate at which cells exist. Cells at or below this
    /// height never consult the cell beneath them.
    fn min_y(&self) -> i32;
}

/// The searching agent: shape, movement abilities, and its per-category
/// cost tolerances.
///
/// A *malus* is a non-negative cost penalty for traversing a category; a
/// negative malus marks the category impassable for this agent. The malus
/// table is read/write because a search temporarily overrides the water
/// entry for floaters (restored when the search ends).
pub trait Agent {
    /// Cost penalty for the given category. Negative means impassable.
    fn malus(&self, terrain: Terrain) -> f32;

    /// Override the cost penalty for a category.
    fn set_malus(&mut self, terrain: Terrain, malus: f32);

    /// Current bounding box, in world coordinates.
    fn bounds(&self) -> Aabb;

    /// Current position.
    fn position(&self) -> Vec3;

    /// Whether the agent floats to the surface of liquids.
    fn can_float(&self) -> bool;

    /// Whether the agent can open closed wooden doors.
    fn can_open_doors(&self) -> bool;

    /// Whether the agent can path through open doorways.
    fn can_pass_doors(&self) -> bool;

    /// Whether the agent is currently submerged in water.
    fn in_water(&self) -> bool;

    /// The agent's randomness source, used when sampling fallback start
    /// positions for small agents.
    fn rng(&mut self) -> &mut dyn RngCore;

    /// The cell the agent currently occupies.
    fn cell(&self) -> Point3 {
        self.position().floor()
    }
}
