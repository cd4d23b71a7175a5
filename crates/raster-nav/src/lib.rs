//! **raster-nav** — stateful navigation layer: the cost/occupancy grid,
//! the main-path cache with speculative what-if queries, and renderer
//! path helpers.
//!
//! [`CostGrid`] owns per-cell costs, occupancy and the world↔grid
//! mapping; every mutation bumps its revision counter. [`PathCache`]
//! keeps a committed main path between two tracked endpoints and
//! answers "would the path survive if this cell were blocked?" and
//! "what would the detour look like?" from memo maps invalidated by
//! that revision counter, so interactive obstacle placement can probe
//! many cells per frame without a full re-search each time.

pub mod cache;
pub mod corners;
pub mod grid;

pub use cache::PathCache;
pub use corners::merge_collinear;
pub use grid::{CostGrid, NORMAL_COST, NavConfig};
