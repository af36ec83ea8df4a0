//! Start-node selection.
//!
//! The agent's exact position is not always a usable search entry: it may
//! be submerged, or overlap geometry its own footprint cannot tolerate.
//! Surfacing and fallback sampling recover a valid entry before the search
//! gives up and hands the driver a degenerate start.

use rand::Rng;
use voxpath_core::{Point3, Terrain};

use crate::evaluator::{FlySearch, PathNode};
use crate::traits::{Agent, VoxelGrid};

/// Per-axis box size that small-agent start sampling inflates toward.
const SMALL_AGENT_SAMPLING_BOX: f64 = 1.5;

/// Number of random candidate cells drawn for a small agent.
const MAX_START_CANDIDATES: usize = 10;

impl<G: VoxelGrid, A: Agent> FlySearch<'_, G, A> {
    /// The node this search starts from.
    ///
    /// Submerged floaters enter at the first non-water cell above the water
    /// column; everyone else at their current cell (y rounded to nearest).
    /// If that cell is intolerable, fallback candidates are tried in order
    /// and the first valid one wins; with no valid candidate the original
    /// cell is returned as-is and the driver must cope with a start it may
    /// not be able to leave.
    pub fn start(&mut self) -> PathNode {
        let position = self.agent.position();
        let cell = self.agent.cell();

        let start_y = if self.agent.can_float() && self.agent.in_water() {
            // Ride the water column up to the first non-water cell.
            let mut y = cell.y;
            while self.grid.raw_category(Point3::new(cell.x, y, cell.z)) == Terrain::Water {
                y += 1;
            }
            y
        } else {
            (position.y + 0.5).floor() as i32
        };

        let start = Point3::new(cell.x, start_y, cell.z);
        if !self.can_start_at(start) {
            if let Some(valid) = self.first_valid_candidate() {
                return self.start_node(valid);
            }
            log::warn!("no tolerable start near {start}, search begins degenerate");
        }
        self.start_node(start)
    }

    /// Whether `pos` is an acceptable entry node for this agent.
    fn can_start_at(&mut self, pos: Point3) -> bool {
        let terrain = self.cached_terrain(pos);
        self.agent.malus(terrain) >= 0.0
    }

    /// First tolerable fallback candidate, or `None`.
    ///
    /// Agents of cell size or larger try the four horizontal corners of
    /// their bounding box at their current cell height — deterministic.
    /// Smaller agents inflate their box toward
    /// [`SMALL_AGENT_SAMPLING_BOX`] per axis and draw up to
    /// [`MAX_START_CANDIDATES`] random cells from it, lazily: sampling
    /// stops at the first valid cell and is not restartable.
    fn first_valid_candidate(&mut self) -> Option<Point3> {
        let bounds = self.agent.bounds();
        let cell_y = self.agent.cell().y;

        if bounds.mean_size() >= 1.0 {
            let corners = [
                Point3::new(
                    bounds.min.x.floor() as i32,
                    cell_y,
                    bounds.min.z.floor() as i32,
                ),
                Point3::new(
                    bounds.min.x.floor() as i32,
                    cell_y,
                    bounds.max.z.floor() as i32,
                ),
                Point3::new(
                    bounds.max.x.floor() as i32,
                    cell_y,
                    bounds.min.z.floor() as i32,
                ),
                Point3::new(
                    bounds.max.x.floor() as i32,
                    cell_y,
                    bounds.max.z.floor() as i32,
                ),
            ];
            corners.into_iter().find(|&c| self.can_start_at(c))
        } else {
            let dx = ((SMALL_AGENT_SAMPLING_BOX - bounds.size_x()) / 2.0).max(0.0);
            let dy = ((SMALL_AGENT_SAMPLING_BOX - bounds.size_y()) / 2.0).max(0.0);
            let dz = ((SMALL_AGENT_SAMPLING_BOX - bounds.size_z()) / 2.0).max(0.0);
            let inflated = bounds.inflate(dx, dy, dz);
            let lo = inflated.floor_min();
            let hi = inflated.floor_max();

            for _ in 0..MAX_START_CANDIDATES {
                let candidate = Point3::new(
                    self.agent.rng().random_range(lo.x..=hi.x),
                    self.agent.rng().random_range(lo.y..=hi.y),
                    self.agent.rng().random_range(lo.z..=hi.z),
                );
                if self.can_start_at(candidate) {
                    return Some(candidate);
                }
            }
            None
        }
    }

    /// Build the start node at `pos`: classified and costed even when the
    /// agent cannot tolerate it.
    fn start_node(&mut self, pos: Point3) -> PathNode {
        let terrain = self.cached_terrain(pos);
        let malus = self.agent.malus(terrain);
        let id = self.node_id(pos);
        let node = &mut self.eval.nodes[id];
        node.terrain = terrain;
        node.malus = malus;
        *node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlyEvaluator;
    use crate::testutil::{MapGrid, TestAgent};
    use voxpath_core::Vec3;

    #[test]
    fn submerged_floater_surfaces_above_the_water_column() {
        let mut grid = MapGrid::open(0);
        grid.set(Point3::new(2, 1, 2), Terrain::Water);
        grid.set(Point3::new(2, 2, 2), Terrain::Water);
        grid.set(Point3::new(2, 3, 2), Terrain::Water);

        let mut agent = TestAgent::small_at(Vec3::new(2.5, 1.5, 2.5));
        agent.can_float = true;
        agent.in_water = true;

        let mut eval = FlyEvaluator::new();
        let mut search = eval.prepare(&grid, &mut agent);
        let start = search.start();
        assert_eq!(start.pos, Point3::new(2, 4, 2));
        assert!(start.malus >= 0.0);
        search.done();
    }

    #[test]
    fn non_floater_starts_at_its_rounded_cell() {
        let mut grid = MapGrid::open(0);
        grid.set(Point3::new(2, 2, 2), Terrain::Water);

        let mut agent = TestAgent::small_at(Vec3::new(2.5, 1.7, 2.5));
        agent.in_water = true;

        let mut eval = FlyEvaluator::new();
        let mut search = eval.prepare(&grid, &mut agent);
        let start = search.start();
        // floor(1.7 + 0.5) = 2, water or not.
        assert_eq!(start.pos, Point3::new(2, 2, 2));
        assert_eq!(start.terrain, Terrain::Water);
        search.done();
    }

    #[test]
    fn valid_current_cell_never_consults_the_fallback_rng() {
        let grid = MapGrid::open(0);
        let mut agent = TestAgent::small_at(Vec3::new(5.5, 5.2, 5.5));

        let mut eval = FlyEvaluator::new();
        let mut search = eval.prepare(&grid, &mut agent);
        let start = search.start();
        assert_eq!(start.pos, Point3::new(5, 5, 5));
        search.done();

        assert_eq!(agent.rng.draws, 0, "fallback sampling must stay lazy");
    }

    #[test]
    fn small_agent_samples_random_candidates_when_blocked() {
        let mut grid = MapGrid::open(0);
        grid.set(Point3::new(5, 5, 5), Terrain::Blocked);

        let mut agent = TestAgent::small_at(Vec3::new(5.5, 5.2, 5.5));
        let mut eval = FlyEvaluator::new();
        let mut search = eval.prepare(&grid, &mut agent);
        let start = search.start();
        assert_ne!(start.pos, Point3::new(5, 5, 5));
        assert!(start.malus >= 0.0);
        search.done();

        assert!(agent.rng.draws > 0);
    }

    #[test]
    fn small_agent_sampling_is_deterministic_for_a_seed() {
        let mut grid = MapGrid::open(0);
        grid.set(Point3::new(5, 5, 5), Terrain::Blocked);

        let run = || {
            let mut grid2 = MapGrid::open(0);
            grid2.set(Point3::new(5, 5, 5), Terrain::Blocked);
            let mut agent = TestAgent::small_at(Vec3::new(5.5, 5.2, 5.5));
            let mut eval = FlyEvaluator::new();
            let mut search = eval.prepare(&grid2, &mut agent);
            let start = search.start();
            search.done();
            start.pos
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn large_agent_tries_its_box_corners_deterministically() {
        let mut grid = MapGrid::open(0);
        grid.set(Point3::new(5, 5, 5), Terrain::Blocked);

        let mut agent = TestAgent::large_at(Vec3::new(5.5, 5.2, 5.5));
        let mut eval = FlyEvaluator::new();
        let mut search = eval.prepare(&grid, &mut agent);
        let start = search.start();
        // Corners are tried min/min, min/max, max/min, max/max; the first
        // whose 2×2×2 footprint misses the blocked cell is (4, 5, 6).
        assert_eq!(start.pos, Point3::new(4, 5, 6));
        assert!(start.malus >= 0.0);
        search.done();

        assert_eq!(agent.rng.draws, 0);
    }

    #[test]
    fn fully_blocked_world_degenerates_to_the_current_cell() {
        let grid = MapGrid {
            cells: std::collections::HashMap::new(),
            default: Terrain::Blocked,
            floor_y: 0,
            queries: std::cell::Cell::new(0),
        };

        let mut agent = TestAgent::small_at(Vec3::new(5.5, 5.2, 5.5));
        let mut eval = FlyEvaluator::new();
        let mut search = eval.prepare(&grid, &mut agent);
        let start = search.start();
        assert_eq!(start.pos, Point3::new(5, 5, 5));
        assert!(start.malus < 0.0);
        search.done();

        assert!(agent.rng.draws > 0, "all ten candidates should be drawn");
    }
}
