//! Main-path tracking and speculative what-if queries.

use std::collections::HashMap;

use raster_core::{Point, Range, WorldPoint};
use raster_paths::{NavError, PathFinder};

use crate::grid::{CostGrid, NavConfig};

/// Tracks the committed main path between two endpoints and memoizes
/// speculative "what if this cell were blocked?" answers against it.
///
/// Every operation takes the grid explicitly and first consumes its
/// revision counter: any occupancy or cost change since the last call
/// drops both memo maps. Changing an endpoint also drops them, since
/// every memoized answer is relative to the tracked pair.
pub struct PathCache {
    finder: PathFinder,
    start: Point,
    goal: Point,
    main_path: Option<Vec<WorldPoint>>,
    possible: HashMap<Point, bool>,
    previews: HashMap<Point, Vec<WorldPoint>>,
    seen_revision: u64,
    searches: u64,
}

impl PathCache {
    /// Build a cache whose searcher covers the configured grid.
    pub fn new(config: &NavConfig) -> Self {
        Self {
            finder: PathFinder::with_cap(
                Range::new(0, 0, config.size.x, config.size.y),
                config.iteration_cap,
            ),
            start: Point::ZERO,
            goal: Point::ZERO,
            main_path: None,
            possible: HashMap::new(),
            previews: HashMap::new(),
            seen_revision: 0,
            searches: 0,
        }
    }

    /// The committed main path, if one has been computed. Empty when
    /// the last [`set_main_path`](Self::set_main_path) found no route.
    pub fn main_path(&self) -> Option<&[WorldPoint]> {
        self.main_path.as_deref()
    }

    /// The tracked (start, goal) cells.
    pub fn endpoints(&self) -> (Point, Point) {
        (self.start, self.goal)
    }

    /// Number of searches actually executed; memo hits do not count.
    pub fn search_count(&self) -> u64 {
        self.searches
    }

    /// Consume the grid's invalidation signal.
    fn sync(&mut self, grid: &CostGrid) {
        if self.seen_revision == grid.revision() {
            return;
        }
        if !self.possible.is_empty() || !self.previews.is_empty() {
            log::debug!(
                "grid changed, dropping {} possibility and {} preview memos",
                self.possible.len(),
                self.previews.len()
            );
        }
        self.possible.clear();
        self.previews.clear();
        self.seen_revision = grid.revision();
    }

    fn search(
        &mut self,
        grid: &CostGrid,
        extra_blocked: &[Point],
    ) -> Result<Option<Vec<Point>>, NavError> {
        self.searches += 1;
        self.finder
            .find_path(grid, self.start, self.goal, extra_blocked)
    }

    fn to_world(grid: &CostGrid, path: Option<Vec<Point>>) -> Vec<WorldPoint> {
        match path {
            Some(cells) => cells.into_iter().map(|c| grid.cell_center(c)).collect(),
            None => Vec::new(),
        }
    }

    /// Commit a new main path between two world positions.
    ///
    /// Returns the path as world positions, empty when the goal is
    /// unreachable. Fails with [`NavError::OutOfRange`] when either
    /// position maps outside the grid.
    pub fn set_main_path(
        &mut self,
        grid: &CostGrid,
        start: WorldPoint,
        goal: WorldPoint,
    ) -> Result<Vec<WorldPoint>, NavError> {
        self.sync(grid);
        let start = grid.world_to_grid(start);
        let goal = grid.world_to_grid(goal);
        if start != self.start || goal != self.goal {
            self.possible.clear();
            self.previews.clear();
        }
        self.start = start;
        self.goal = goal;
        let path = self.search(grid, &[])?;
        let world = Self::to_world(grid, path);
        self.main_path = Some(world.clone());
        Ok(world)
    }

    /// Whether a main path would still exist if `cell` became
    /// impassable. Memoized until the next occupancy, cost or endpoint
    /// change. Out-of-bounds cells are accepted (they cannot sever a
    /// path).
    pub fn is_path_possible_if_blocked(
        &mut self,
        grid: &CostGrid,
        cell: Point,
    ) -> Result<bool, NavError> {
        self.sync(grid);
        if let Some(&possible) = self.possible.get(&cell) {
            return Ok(possible);
        }
        let possible = self.search(grid, &[cell])?.is_some();
        self.possible.insert(cell, possible);
        Ok(possible)
    }

    /// Like [`is_path_possible_if_blocked`](Self::is_path_possible_if_blocked)
    /// but never searches: cells without a memoized answer
    /// optimistically report `true`. Suitable for per-frame hover
    /// feedback where staleness is acceptable.
    pub fn is_path_possible_if_blocked_cached_only(
        &mut self,
        grid: &CostGrid,
        cell: Point,
    ) -> bool {
        self.sync(grid);
        self.possible.get(&cell).copied().unwrap_or(true)
    }

    /// The detour the main path would take if `cell` became impassable,
    /// reduced to the differing stretch plus one joining point on each
    /// side so the renderer can splice it over the unchanged segments.
    ///
    /// Empty when no alternate path exists; not an error. Before the
    /// first committed main path, the full alternate path is returned.
    /// Memoized until the next occupancy, cost or endpoint change.
    pub fn preview_detour(
        &mut self,
        grid: &CostGrid,
        cell: Point,
    ) -> Result<Vec<WorldPoint>, NavError> {
        self.sync(grid);
        if let Some(preview) = self.previews.get(&cell) {
            return Ok(preview.clone());
        }
        let alt = self.search(grid, &[cell])?;
        let alt = Self::to_world(grid, alt);
        let preview = match &self.main_path {
            Some(main) => delta_path(main, &alt),
            None => alt,
        };
        self.previews.insert(cell, preview.clone());
        Ok(preview)
    }
}

/// Reduce `alt` to its difference against `main`, padded by one point
/// on each side.
///
/// When the paths never diverge the divergence index defaults to 0 and
/// the whole alternate path is returned; when `alt` is empty the result
/// is empty.
fn delta_path(main: &[WorldPoint], alt: &[WorldPoint]) -> Vec<WorldPoint> {
    if alt.is_empty() {
        return Vec::new();
    }
    let shared = main.len().min(alt.len());
    let mut diverge = 0;
    for i in 0..shared {
        if main[i] != alt[i] {
            diverge = i;
            break;
        }
    }
    let mut last_divergent = alt.len() - 1;
    for i in (diverge + 1..alt.len()).rev() {
        if !main.contains(&alt[i]) {
            last_divergent = i;
            break;
        }
    }
    let lo = diverge.saturating_sub(1);
    let hi = (last_divergent + 2).min(alt.len() - 1);
    alt[lo..=hi].to_vec()
}
