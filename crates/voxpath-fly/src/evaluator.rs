//! Search lifecycle: [`FlyEvaluator`] owns the reusable per-search storage,
//! [`FlySearch`] is the handle a driver works with between `prepare` and
//! `done`.

use std::collections::HashMap;

use voxpath_core::{Point3, Terrain};

use crate::classify::classify_for_agent;
use crate::traits::{Agent, VoxelGrid};

/// Water malus imposed on floating agents for the duration of a search, so
/// that computed paths prefer surfacing over swimming. The agent's own
/// (higher) water malus is kept if it already avoids water more strongly.
pub(crate) const SURFACING_WATER_MALUS: f32 = 8.0;

/// Extra cost added to walkable cells on every accepted visit: a flier
/// gains nothing from hugging the ground.
pub(crate) const WALKABLE_PENALTY: f32 = 1.0;

/// A position with its classification and accumulated cost penalty.
///
/// Node identity is `pos`; one pooled node exists per coordinate per
/// search. `malus` only ever rises once set, and a closed node is never
/// reopened. Parent links for path reconstruction belong to the driver,
/// not to the node.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Point3,
    pub terrain: Terrain,
    pub malus: f32,
    pub closed: bool,
}

impl PathNode {
    fn new(pos: Point3) -> Self {
        Self {
            pos,
            terrain: Terrain::Blocked,
            malus: 0.0,
            closed: false,
        }
    }
}

// ---------------------------------------------------------------------------
// FlyEvaluator
// ---------------------------------------------------------------------------

/// Reusable storage for flight searches.
///
/// The evaluator owns the terrain memo and the node pool so that repeated
/// searches incur no allocations after warm-up. One evaluator serves one
/// search at a time; scale with a pool of evaluators, not by sharing.
pub struct FlyEvaluator {
    pub(crate) terrain_cache: HashMap<Point3, Terrain>,
    pub(crate) nodes: Vec<PathNode>,
    pub(crate) index: HashMap<Point3, usize>,
}

impl Default for FlyEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl FlyEvaluator {
    /// Create a new evaluator.
    pub fn new() -> Self {
        Self {
            terrain_cache: HashMap::new(),
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Begin a search over `grid` for `agent`.
    ///
    /// Clears any state left from a previous search, derives the agent's
    /// cell footprint from its bounding box, and — for floating agents —
    /// temporarily raises the agent's water malus (see
    /// [`FlySearch::done`] for the restoration guarantee).
    pub fn prepare<'a, G: VoxelGrid, A: Agent>(
        &'a mut self,
        grid: &'a G,
        agent: &'a mut A,
    ) -> FlySearch<'a, G, A> {
        self.terrain_cache.clear();
        self.nodes.clear();
        self.index.clear();

        let bounds = agent.bounds();
        let width = (bounds.size_x() + 1.0).floor() as i32;
        let height = (bounds.size_y() + 1.0).floor() as i32;
        let depth = (bounds.size_z() + 1.0).floor() as i32;

        let old_water_malus = agent.malus(Terrain::Water);
        if agent.can_float() {
            agent.set_malus(Terrain::Water, old_water_malus.max(SURFACING_WATER_MALUS));
        }

        FlySearch {
            eval: self,
            grid,
            agent,
            width,
            height,
            depth,
            old_water_malus,
            finished: false,
        }
    }
}

// ---------------------------------------------------------------------------
// FlySearch
// ---------------------------------------------------------------------------

/// A single search in progress.
///
/// Produced by [`FlyEvaluator::prepare`]; the driver calls
/// [`start`](FlySearch::start), then [`expand`](FlySearch::expand) /
/// [`close`](FlySearch::close) until done. Dropping the handle without
/// calling [`done`](FlySearch::done) — an abandoned search — still restores
/// the agent's water malus and clears the per-search state.
pub struct FlySearch<'a, G: VoxelGrid, A: Agent> {
    pub(crate) eval: &'a mut FlyEvaluator,
    pub(crate) grid: &'a G,
    pub(crate) agent: &'a mut A,
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) depth: i32,
    old_water_malus: f32,
    finished: bool,
}

impl<'a, G: VoxelGrid, A: Agent> FlySearch<'a, G, A> {
    /// End the search: restore the agent's water malus to its pre-search
    /// value and clear the per-search state. Safe to omit — dropping the
    /// handle has the same effect — but calling it makes the lifecycle
    /// explicit.
    pub fn done(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        self.agent.set_malus(Terrain::Water, self.old_water_malus);
        self.eval.terrain_cache.clear();
        self.eval.nodes.clear();
        self.eval.index.clear();
    }

    /// The goal node for a target position (coordinates are floored to the
    /// containing cell).
    pub fn goal_node_for(&mut self, x: f64, y: f64, z: f64) -> PathNode {
        let id = self.node_id(Point3::new(
            x.floor() as i32,
            y.floor() as i32,
            z.floor() as i32,
        ));
        self.eval.nodes[id]
    }

    /// Mark the node at `pos` closed. Closed nodes are never returned from
    /// [`expand`](FlySearch::expand) again; there is no way to reopen one.
    pub fn close(&mut self, pos: Point3) {
        let id = self.node_id(pos);
        self.eval.nodes[id].closed = true;
    }

    /// Current pooled state of the node at `pos`, if one exists.
    pub fn node_at(&self, pos: Point3) -> Option<PathNode> {
        self.eval.index.get(&pos).map(|&id| self.eval.nodes[id])
    }

    /// Terrain category of `pos` for this search's agent, memoized for the
    /// lifetime of the search.
    pub(crate) fn cached_terrain(&mut self, pos: Point3) -> Terrain {
        if let Some(&t) = self.eval.terrain_cache.get(&pos) {
            return t;
        }
        let t = classify_for_agent(
            self.grid,
            &*self.agent,
            pos,
            self.width,
            self.height,
            self.depth,
            self.agent.can_open_doors(),
            self.agent.can_pass_doors(),
        );
        self.eval.terrain_cache.insert(pos, t);
        t
    }

    /// Pooled node index for `pos`, creating the node on first use.
    pub(crate) fn node_id(&mut self, pos: Point3) -> usize {
        if let Some(&id) = self.eval.index.get(&pos) {
            debug_assert_eq!(self.eval.nodes[id].pos, pos, "node pool out of sync");
            return id;
        }
        let id = self.eval.nodes.len();
        self.eval.nodes.push(PathNode::new(pos));
        self.eval.index.insert(pos, id);
        id
    }

    /// Admit `pos` as a search candidate.
    ///
    /// Returns the pooled node index when the agent tolerates the cell's
    /// classification, refreshing the node's terrain and raising its malus
    /// to at least the computed value (walkable cells take the flight
    /// penalty on top). Intolerable cells yield no candidate.
    pub(crate) fn find_accepted(&mut self, pos: Point3) -> Option<usize> {
        let terrain = self.cached_terrain(pos);
        let malus = self.agent.malus(terrain);
        if malus < 0.0 {
            return None;
        }
        let id = self.node_id(pos);
        let node = &mut self.eval.nodes[id];
        node.terrain = terrain;
        node.malus = node.malus.max(malus);
        if terrain == Terrain::Walkable {
            node.malus += WALKABLE_PENALTY;
        }
        Some(id)
    }
}

impl<'a, G: VoxelGrid, A: Agent> Drop for FlySearch<'a, G, A> {
    fn drop(&mut self) {
        self.finish();
    }
}
