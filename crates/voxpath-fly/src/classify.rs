//! Terrain classification.
//!
//! Two entry points:
//!
//! - [`classify`] — point classification: the raw category of a single cell,
//!   adjusted by the cell beneath it and by hazards in the surrounding ring.
//! - [`classify_for_agent`] — footprint classification: the category of a
//!   cell for an agent whose bounding box covers `width × height × depth`
//!   cells, folding the whole footprint into one category using the agent's
//!   cost tolerances.
//!
//! Both are pure with respect to their inputs; per-search memoization lives
//! in [`crate::FlyEvaluator`].

use voxpath_core::{Point3, Terrain, TerrainSet};

use crate::traits::{Agent, VoxelGrid};

/// Classify the cell at `p` from the grid alone.
///
/// `agent_cell` is the cell the searching agent currently occupies: a fence
/// below `p` does not block `p` while the agent is already standing there
/// (it could never leave otherwise).
pub fn classify<G: VoxelGrid>(grid: &G, p: Point3, agent_cell: Point3) -> Terrain {
    let mut terrain = grid.raw_category(p);

    if terrain == Terrain::Open && p.y >= grid.min_y() + 1 {
        // An open cell inherits character from the cell it sits on.
        terrain = match grid.raw_category(p.below()) {
            Terrain::DamageFire | Terrain::Lava => Terrain::DamageFire,
            Terrain::DamageCactus => Terrain::DamageCactus,
            Terrain::DamageOther => Terrain::DamageOther,
            Terrain::Cocoa => Terrain::Cocoa,
            Terrain::Fence => {
                if p != agent_cell {
                    Terrain::Fence
                } else {
                    Terrain::Open
                }
            }
            below => {
                if below != Terrain::Walkable && below != Terrain::Open && below != Terrain::Water
                {
                    Terrain::Walkable
                } else {
                    Terrain::Open
                }
            }
        };
    }

    if terrain == Terrain::Walkable || terrain == Terrain::Open {
        terrain = check_surroundings(grid, p, terrain);
    }

    terrain
}

/// Classify the cell at `p` for a concrete agent.
///
/// Scans the agent's full footprint anchored at `p`, collects the set of
/// distinct point categories found (door categories adjusted for the
/// agent's door abilities), and folds the set into one category:
///
/// - a fence anywhere in the footprint blocks unconditionally;
/// - otherwise the first category in canonical order that the agent cannot
///   pass (negative malus) wins;
/// - otherwise the passable category with the highest malus wins, except
///   that a cost-neutral worst case keeps an `Open` center cell `Open`.
pub fn classify_for_agent<G: VoxelGrid, A: Agent>(
    grid: &G,
    agent: &A,
    p: Point3,
    width: i32,
    height: i32,
    depth: i32,
    can_open_doors: bool,
    can_pass_doors: bool,
) -> Terrain {
    let agent_cell = agent.cell();
    let mut seen = TerrainSet::empty();
    let mut center = Terrain::Blocked;

    for dx in 0..width {
        for dy in 0..height {
            for dz in 0..depth {
                let t = classify(grid, p.shift(dx, dy, dz), agent_cell);
                let t = apply_door_rules(t, can_open_doors, can_pass_doors);
                if dx == 0 && dy == 0 && dz == 0 {
                    center = t;
                }
                seen.insert(t);
            }
        }
    }

    if seen.contains(Terrain::Fence) {
        return Terrain::Fence;
    }

    let mut worst = Terrain::Blocked;
    for t in seen.iter() {
        if agent.malus(t) < 0.0 {
            return t;
        }
        if agent.malus(t) >= agent.malus(worst) {
            worst = t;
        }
    }

    if center == Terrain::Open && agent.malus(worst) == 0.0 {
        Terrain::Open
    } else {
        worst
    }
}

/// Adjust a door category for the agent's door abilities.
fn apply_door_rules(terrain: Terrain, can_open_doors: bool, can_pass_doors: bool) -> Terrain {
    match terrain {
        Terrain::DoorWoodClosed if can_open_doors && can_pass_doors => Terrain::WalkableDoor,
        Terrain::DoorIronClosed if !can_pass_doors => Terrain::Blocked,
        Terrain::DoorOpen if !can_pass_doors => Terrain::Blocked,
        t => t,
    }
}

/// Downgrade a traversable cell that sits next to hazardous geometry.
///
/// Scans the 3×3×3 ring around `p`, skipping the vertical center column
/// (the cell's own column is covered by the below-cell rules). The first
/// hazard found, in fixed scan order, wins.
fn check_surroundings<G: VoxelGrid>(grid: &G, p: Point3, terrain: Terrain) -> Terrain {
    for dx in -1..=1 {
        for dy in -1..=1 {
            for dz in -1..=1 {
                if dx == 0 && dz == 0 {
                    continue;
                }
                match grid.raw_category(p.shift(dx, dy, dz)) {
                    Terrain::Lava | Terrain::DamageFire => return Terrain::DamageFire,
                    Terrain::DamageCactus => return Terrain::DamageCactus,
                    Terrain::DamageOther => return Terrain::DamageOther,
                    _ => {}
                }
            }
        }
    }
    terrain
}
