//! Terrain classification and neighbor expansion for free-flight
//! pathfinding over voxel grids.
//!
//! This crate provides the node-level primitives a best-first search
//! consumes when routing an agent with unconstrained 3D movement:
//!
//! - **Terrain classification** ([`classify`], [`classify_for_agent`]) —
//!   cell content folded into one cost category, footprint-aware.
//! - **Per-search memoization** ([`FlyEvaluator`]) — classification results
//!   and pooled search nodes, reused across searches with zero allocations
//!   after warm-up.
//! - **26-way neighbor expansion** ([`FlySearch::expand`]) — face, edge and
//!   corner neighbors with gating that prevents cutting corners through
//!   impassable cells.
//! - **Start-node selection** ([`FlySearch::start`]) — surfacing for
//!   submerged floaters and fallback sampling for blocked positions.
//!
//! The search driver itself (open/closed bookkeeping, goal test, path
//! reconstruction) stays outside; it talks to this crate through
//! [`FlyEvaluator::prepare`] and the [`FlySearch`] handle, and supplies the
//! world through the [`VoxelGrid`] and [`Agent`] traits.
//!
//! # Lifecycle
//!
//! | Driver call | Effect |
//! |---|---|
//! | [`FlyEvaluator::prepare`] | clears per-search state, overrides water malus for floaters |
//! | [`FlySearch::start`] / [`FlySearch::expand`] / [`FlySearch::close`] | the search proper |
//! | [`FlySearch::done`] (or drop) | restores the agent, clears per-search state |

mod classify;
mod evaluator;
mod expand;
mod start;
mod traits;

#[cfg(test)]
pub(crate) mod testutil;

pub use classify::{classify, classify_for_agent};
pub use evaluator::{FlyEvaluator, FlySearch, PathNode};
pub use traits::{Agent, VoxelGrid};
