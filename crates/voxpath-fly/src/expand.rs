//! 26-way neighbor expansion.
//!
//! Neighbors are generated in three tiers — 6 faces, 12 edge diagonals,
//! 8 corner diagonals — each gated on the acceptance of the tier(s) before
//! it, so that a diagonal move can never cut through a corner whose
//! flanking cells are impassable.

use smallvec::SmallVec;
use voxpath_core::Point3;

use crate::evaluator::{FlySearch, PathNode};
use crate::traits::{Agent, VoxelGrid};

/// Offsets of the six face neighbors, in expansion order.
const FACES: [Point3; 6] = [
    Point3::new(0, 0, 1),
    Point3::new(-1, 0, 0),
    Point3::new(1, 0, 0),
    Point3::new(0, 0, -1),
    Point3::new(0, 1, 0),
    Point3::new(0, -1, 0),
];

/// An edge-diagonal neighbor: its offset and the two flanking faces.
struct Edge {
    dir: Point3,
    faces: [usize; 2],
}

#[rustfmt::skip]
const EDGES: [Edge; 12] = [
    Edge { dir: Point3::new(0, 1, 1),   faces: [0, 4] },
    Edge { dir: Point3::new(-1, 1, 0),  faces: [1, 4] },
    Edge { dir: Point3::new(1, 1, 0),   faces: [2, 4] },
    Edge { dir: Point3::new(0, 1, -1),  faces: [3, 4] },
    Edge { dir: Point3::new(0, -1, 1),  faces: [0, 5] },
    Edge { dir: Point3::new(-1, -1, 0), faces: [1, 5] },
    Edge { dir: Point3::new(1, -1, 0),  faces: [2, 5] },
    Edge { dir: Point3::new(0, -1, -1), faces: [3, 5] },
    Edge { dir: Point3::new(1, 0, -1),  faces: [3, 2] },
    Edge { dir: Point3::new(1, 0, 1),   faces: [0, 2] },
    Edge { dir: Point3::new(-1, 0, -1), faces: [3, 1] },
    Edge { dir: Point3::new(-1, 0, 1),  faces: [0, 1] },
];

/// A corner-diagonal neighbor: its offset, three flanking faces and three
/// flanking edge diagonals — the full 2×2×2 neighborhood minus the corner.
struct Corner {
    dir: Point3,
    faces: [usize; 3],
    edges: [usize; 3],
}

#[rustfmt::skip]
const CORNERS: [Corner; 8] = [
    Corner { dir: Point3::new(1, 1, -1),   faces: [3, 2, 4], edges: [8, 3, 2] },
    Corner { dir: Point3::new(1, 1, 1),    faces: [0, 2, 4], edges: [9, 0, 2] },
    Corner { dir: Point3::new(-1, 1, -1),  faces: [3, 1, 4], edges: [10, 3, 1] },
    Corner { dir: Point3::new(-1, 1, 1),   faces: [0, 1, 4], edges: [11, 0, 1] },
    Corner { dir: Point3::new(1, -1, -1),  faces: [3, 2, 5], edges: [8, 7, 6] },
    Corner { dir: Point3::new(1, -1, 1),   faces: [0, 2, 5], edges: [9, 4, 6] },
    Corner { dir: Point3::new(-1, -1, -1), faces: [3, 1, 5], edges: [10, 7, 5] },
    Corner { dir: Point3::new(-1, -1, 1),  faces: [0, 1, 5], edges: [11, 4, 5] },
];

impl<G: VoxelGrid, A: Agent> FlySearch<'_, G, A> {
    /// All admissible neighbors of `node`, in fixed enumeration order:
    /// accepted faces first, then gated edge diagonals, then gated corner
    /// diagonals. At most 26 nodes; closed nodes and cells the agent cannot
    /// tolerate are omitted rather than reported as errors.
    ///
    /// A closed neighbor still *gates*: closed means already explored, not
    /// impassable.
    pub fn expand(&mut self, node: &PathNode) -> SmallVec<[PathNode; 26]> {
        let mut out = SmallVec::new();
        let origin = node.pos;

        let mut faces = [None; 6];
        for (i, dir) in FACES.iter().enumerate() {
            faces[i] = self.find_accepted(origin + *dir);
            if let Some(id) = faces[i] {
                if !self.eval.nodes[id].closed {
                    out.push(self.eval.nodes[id]);
                }
            }
        }

        let mut edges = [None; 12];
        for (i, edge) in EDGES.iter().enumerate() {
            edges[i] = self.find_accepted(origin + edge.dir);
            if let Some(id) = edges[i] {
                if !self.eval.nodes[id].closed
                    && edge.faces.iter().all(|&f| self.has_malus(faces[f]))
                {
                    out.push(self.eval.nodes[id]);
                }
            }
        }

        for corner in &CORNERS {
            if let Some(id) = self.find_accepted(origin + corner.dir) {
                if !self.eval.nodes[id].closed
                    && corner.faces.iter().all(|&f| self.has_malus(faces[f]))
                    && corner.edges.iter().all(|&e| self.has_malus(edges[e]))
                {
                    out.push(self.eval.nodes[id]);
                }
            }
        }

        out
    }

    fn has_malus(&self, id: Option<usize>) -> bool {
        id.is_some_and(|id| self.eval.nodes[id].malus >= 0.0)
    }
}
