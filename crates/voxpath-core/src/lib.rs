//! **voxpath-core** — Voxel pathfinding primitives (core value types).
//!
//! This crate provides the foundational types used across the *voxpath*
//! ecosystem: integer cell coordinates, continuous positions and bounding
//! boxes, and the closed set of terrain cost categories.

pub mod geom;
pub mod terrain;

pub use geom::{Aabb, Point3, Vec3};
pub use terrain::{Terrain, TerrainSet};
