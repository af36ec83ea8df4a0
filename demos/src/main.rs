//! Cavern flight — a toy best-first driver on top of voxpath-fly.
//!
//! Builds a sealed cavern with a lava pool and a pierced wall, then flies a
//! small agent from one end to the other, printing a top-down map of the
//! route. The driver here stands in for whatever real search loop consumes
//! the evaluator; it is deliberately minimal.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use voxpath_core::{Aabb, Point3, Terrain, Vec3};
use voxpath_fly::{Agent, FlyEvaluator, FlySearch, VoxelGrid};

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

const SIZE_X: i32 = 24;
const SIZE_Y: i32 = 8;
const SIZE_Z: i32 = 12;

struct Cavern {
    cells: HashMap<Point3, Terrain>,
}

impl Cavern {
    fn build() -> Self {
        let mut cells = HashMap::new();

        // Hollow interior; everything else stays solid rock.
        for x in 1..SIZE_X - 1 {
            for y in 1..SIZE_Y - 1 {
                for z in 1..SIZE_Z - 1 {
                    cells.insert(Point3::new(x, y, z), Terrain::Open);
                }
            }
        }

        // A lava pool on the cavern floor.
        for x in 6..=10 {
            for z in 1..SIZE_Z - 1 {
                cells.insert(Point3::new(x, 1, z), Terrain::Lava);
            }
        }

        // A rock wall with a small opening near one side.
        for y in 1..SIZE_Y - 1 {
            for z in 1..SIZE_Z - 1 {
                cells.insert(Point3::new(14, y, z), Terrain::Blocked);
            }
        }
        for y in 2..=3 {
            for z in 7..=8 {
                cells.insert(Point3::new(14, y, z), Terrain::Open);
            }
        }

        Self { cells }
    }
}

impl VoxelGrid for Cavern {
    fn raw_category(&self, p: Point3) -> Terrain {
        self.cells.get(&p).copied().unwrap_or(Terrain::Blocked)
    }

    fn min_y(&self) -> i32 {
        0
    }
}

// ---------------------------------------------------------------------------
// Agent
// ---------------------------------------------------------------------------

struct Moth {
    maluses: HashMap<Terrain, f32>,
    position: Vec3,
    rng: StdRng,
}

impl Moth {
    fn at(position: Vec3) -> Self {
        let maluses = HashMap::from([
            (Terrain::Blocked, -1.0),
            (Terrain::Fence, -1.0),
            (Terrain::Lava, -1.0),
            (Terrain::DamageFire, 8.0),
            (Terrain::Water, 2.0),
        ]);
        Self {
            maluses,
            position,
            rng: StdRng::seed_from_u64(0x4D07),
        }
    }
}

impl Agent for Moth {
    fn malus(&self, terrain: Terrain) -> f32 {
        self.maluses.get(&terrain).copied().unwrap_or(0.0)
    }

    fn set_malus(&mut self, terrain: Terrain, malus: f32) {
        self.maluses.insert(terrain, malus);
    }

    fn bounds(&self) -> Aabb {
        Aabb::centered(self.position, 0.5, 0.5, 0.5)
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn can_float(&self) -> bool {
        false
    }

    fn can_open_doors(&self) -> bool {
        false
    }

    fn can_pass_doors(&self) -> bool {
        true
    }

    fn in_water(&self) -> bool {
        false
    }

    fn rng(&mut self) -> &mut dyn RngCore {
        &mut self.rng
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Open-list entry ordered by `f`, reversed so the max-heap pops the
/// cheapest first.
#[derive(Copy, Clone, PartialEq, Eq)]
struct OpenRef {
    pos: Point3,
    f: i32,
}

impl Ord for OpenRef {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.cmp(&self.f)
    }
}

impl PartialOrd for OpenRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Chebyshev distance scaled to match the driver's per-step cost of 10.
fn estimate(a: Point3, b: Point3) -> i32 {
    let d = a - b;
    10 * d.x.abs().max(d.y.abs()).max(d.z.abs())
}

/// A* over the evaluator's expansion, with costs weighted by node malus.
fn fly_path<G: VoxelGrid, A: Agent>(
    search: &mut FlySearch<'_, G, A>,
    to: Point3,
) -> Option<Vec<Point3>> {
    let start = search.start();
    log::info!("searching {} -> {}", start.pos, to);
    if start.malus < 0.0 {
        log::warn!("degenerate start at {}", start.pos);
        return None;
    }

    let mut g: HashMap<Point3, i32> = HashMap::from([(start.pos, 0)]);
    let mut parent: HashMap<Point3, Point3> = HashMap::new();
    let mut open = BinaryHeap::from([OpenRef {
        pos: start.pos,
        f: estimate(start.pos, to),
    }]);

    while let Some(current) = open.pop() {
        // Stale heap entries for already-finished nodes.
        if search.node_at(current.pos).is_some_and(|n| n.closed) {
            continue;
        }
        if current.pos == to {
            let mut path = vec![current.pos];
            let mut cur = current.pos;
            while let Some(&p) = parent.get(&cur) {
                path.push(p);
                cur = p;
            }
            path.reverse();
            return Some(path);
        }
        search.close(current.pos);

        let Some(node) = search.node_at(current.pos) else {
            continue;
        };
        for n in search.expand(&node) {
            let step = 10 + (n.malus * 10.0).round() as i32;
            let tentative = g[&current.pos] + step;
            if tentative < g.get(&n.pos).copied().unwrap_or(i32::MAX) {
                g.insert(n.pos, tentative);
                parent.insert(n.pos, current.pos);
                open.push(OpenRef {
                    pos: n.pos,
                    f: tentative + estimate(n.pos, to),
                });
            }
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn print_route(cavern: &Cavern, path: &[Point3], from: Point3, to: Point3) {
    let on_path: std::collections::HashSet<(i32, i32)> =
        path.iter().map(|p| (p.x, p.z)).collect();

    for z in 0..SIZE_Z {
        let mut row = String::with_capacity(SIZE_X as usize);
        for x in 0..SIZE_X {
            let ch = if (x, z) == (from.x, from.z) {
                'S'
            } else if (x, z) == (to.x, to.z) {
                'G'
            } else if on_path.contains(&(x, z)) {
                '*'
            } else if cavern.raw_category(Point3::new(x, 1, z)) == Terrain::Lava {
                '~'
            } else if cavern.raw_category(Point3::new(x, 2, z)) == Terrain::Blocked {
                '#'
            } else {
                '.'
            };
            row.push(ch);
        }
        println!("{row}");
    }
}

fn main() {
    env_logger::init();

    let cavern = Cavern::build();
    let mut moth = Moth::at(Vec3::new(2.5, 2.2, 2.5));
    let goal_target = Vec3::new(20.5, 2.2, 5.5);

    let mut eval = FlyEvaluator::new();
    let mut search = eval.prepare(&cavern, &mut moth);

    let goal = search.goal_node_for(goal_target.x, goal_target.y, goal_target.z);

    match fly_path(&mut search, goal.pos) {
        Some(path) => {
            search.done();
            println!("route of {} cells:", path.len());
            print_route(&cavern, &path, path[0], *path.last().unwrap_or(&goal.pos));
        }
        None => {
            search.done();
            println!("no route");
        }
    }
}
