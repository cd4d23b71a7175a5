//! **raster-core** — core types for the raster navigation engine.
//!
//! This crate provides the foundational types shared across the *raster*
//! crates: integer cell coordinates ([`Point`]), grid rectangles
//! ([`Range`]) and continuous world positions ([`WorldPoint`]).

pub mod geom;

pub use geom::{Point, Range, RangeIter, WorldPoint};
