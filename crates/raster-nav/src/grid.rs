//! Cost/occupancy grid with world-space mapping.

use raster_core::{Point, Range, WorldPoint};
use raster_paths::{DEFAULT_ITERATION_CAP, NavError, Terrain};

/// Default movement cost of an unmodified cell.
pub const NORMAL_COST: i32 = 10;

/// Construction-time navigation parameters. Immutable once a grid or
/// cache has been built from it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavConfig {
    /// Grid dimensions in cells. Both axes must be positive.
    pub size: Point,
    /// Side length of a cell in world units. Must be positive.
    pub cell_size: f32,
    /// World position of the grid center.
    pub origin: WorldPoint,
    /// Cost filled into every cell at construction, and restored when a
    /// cell is freed.
    pub normal_cost: i32,
    /// Hard cap on search iterations.
    pub iteration_cap: u32,
}

impl NavConfig {
    /// A config with the default cost and iteration cap.
    pub fn new(size: Point, cell_size: f32, origin: WorldPoint) -> Self {
        Self {
            size,
            cell_size,
            origin,
            normal_cost: NORMAL_COST,
            iteration_cap: DEFAULT_ITERATION_CAP,
        }
    }
}

/// Dense per-cell cost and occupancy store with world↔grid conversion.
///
/// Occupied cells are untraversable regardless of their cost value.
/// Every successful mutation bumps [`revision`](Self::revision), the
/// invalidation signal consumed by [`PathCache`](crate::PathCache).
pub struct CostGrid {
    size: Point,
    cell_size: f32,
    origin: WorldPoint,
    normal_cost: i32,
    costs: Vec<i32>,
    occupied: Vec<bool>,
    revision: u64,
}

impl CostGrid {
    /// Build a grid with every cell at the configured normal cost and
    /// nothing occupied.
    ///
    /// # Panics
    /// If the configured dimensions or cell size are not positive.
    pub fn new(config: &NavConfig) -> Self {
        assert!(
            config.size.x > 0 && config.size.y > 0,
            "grid dimensions must be positive"
        );
        assert!(config.cell_size > 0.0, "cell size must be positive");
        let len = (config.size.x * config.size.y) as usize;
        Self {
            size: config.size,
            cell_size: config.cell_size,
            origin: config.origin,
            normal_cost: config.normal_cost,
            costs: vec![config.normal_cost; len],
            occupied: vec![false; len],
            revision: 0,
        }
    }

    /// Grid dimensions in cells.
    #[inline]
    pub fn size(&self) -> Point {
        self.size
    }

    /// The grid rectangle, anchored at the origin cell.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.size.x, self.size.y)
    }

    /// Side length of a cell in world units.
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cost of an unmodified cell.
    #[inline]
    pub fn normal_cost(&self) -> i32 {
        self.normal_cost
    }

    /// Occupancy/cost change counter.
    ///
    /// Bumped by every successful mutation; consumers compare it
    /// against the value they last saw to decide whether memoized
    /// answers are still valid.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether `p` lies within the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.size.x && p.y >= 0 && p.y < self.size.y
    }

    #[inline]
    fn index(&self, p: Point) -> Result<usize, NavError> {
        if !self.contains(p) {
            return Err(NavError::OutOfRange(p));
        }
        Ok((p.y * self.size.x + p.x) as usize)
    }

    /// The cell containing the given world position.
    ///
    /// Total: positions outside the gridded area map to out-of-bounds
    /// cells, which [`contains`](Self::contains) rejects.
    pub fn world_to_grid(&self, pos: WorldPoint) -> Point {
        let half = self.cell_size / 2.0;
        Point::new(
            ((pos.x - half - self.origin.x) / self.cell_size).round() as i32 + self.size.x / 2,
            ((pos.y - half - self.origin.y) / self.cell_size).round() as i32 + self.size.y / 2,
        )
    }

    /// World position of the center of `cell`.
    pub fn grid_to_world(&self, cell: Point) -> Result<WorldPoint, NavError> {
        self.index(cell)?;
        Ok(self.cell_center(cell))
    }

    /// Center of `cell` without a bounds check; callers guarantee the
    /// cell came from a search over this grid.
    pub(crate) fn cell_center(&self, cell: Point) -> WorldPoint {
        let half = self.cell_size / 2.0;
        WorldPoint::new(
            (cell.x - self.size.x / 2) as f32 * self.cell_size + self.origin.x + half,
            (cell.y - self.size.y / 2) as f32 * self.cell_size + self.origin.y + half,
        )
    }

    /// Whether the world position falls inside the gridded area.
    pub fn is_within_world(&self, pos: WorldPoint) -> bool {
        self.contains(self.world_to_grid(pos))
    }

    /// Mark `cell` impassable. Idempotent; bumps the revision.
    pub fn set_occupied(&mut self, cell: Point) -> Result<(), NavError> {
        let i = self.index(cell)?;
        self.occupied[i] = true;
        self.revision += 1;
        Ok(())
    }

    /// Mark `cell` passable again, restoring its cost to the normal
    /// cost. Idempotent; bumps the revision.
    pub fn set_free(&mut self, cell: Point) -> Result<(), NavError> {
        let i = self.index(cell)?;
        self.occupied[i] = false;
        self.costs[i] = self.normal_cost;
        self.revision += 1;
        Ok(())
    }

    /// Whether `cell` is currently passable.
    pub fn is_free(&self, cell: Point) -> Result<bool, NavError> {
        let i = self.index(cell)?;
        Ok(!self.occupied[i])
    }

    /// Movement cost of `cell`.
    pub fn cell_cost(&self, cell: Point) -> Result<i32, NavError> {
        let i = self.index(cell)?;
        Ok(self.costs[i])
    }

    /// Set the movement cost of `cell`. `cost` must be non-negative.
    /// Bumps the revision.
    pub fn set_cell_cost(&mut self, cell: Point, cost: i32) -> Result<(), NavError> {
        debug_assert!(cost >= 0, "cell costs must be non-negative");
        let i = self.index(cell)?;
        self.costs[i] = cost;
        self.revision += 1;
        Ok(())
    }

    /// Occupy every cell of `rect`, e.g. an obstacle footprint
    /// rasterized to cells. The whole rectangle must be in bounds;
    /// fails without mutating anything otherwise. An empty rectangle is
    /// a no-op.
    pub fn occupy_rect(&mut self, rect: Range) -> Result<(), NavError> {
        if rect.is_empty() {
            return Ok(());
        }
        if !self.contains(rect.min) {
            return Err(NavError::OutOfRange(rect.min));
        }
        let last = Point::new(rect.max.x - 1, rect.max.y - 1);
        if !self.contains(last) {
            return Err(NavError::OutOfRange(last));
        }
        for p in rect.iter() {
            let i = (p.y * self.size.x + p.x) as usize;
            self.occupied[i] = true;
        }
        self.revision += 1;
        Ok(())
    }
}

impl Terrain for CostGrid {
    fn cost(&self, p: Point) -> i32 {
        match self.index(p) {
            Ok(i) => self.costs[i],
            Err(_) => self.normal_cost,
        }
    }

    fn blocked(&self, p: Point) -> bool {
        match self.index(p) {
            Ok(i) => self.occupied[i],
            Err(_) => true,
        }
    }
}
