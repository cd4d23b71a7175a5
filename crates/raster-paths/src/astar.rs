use std::fmt;

use raster_core::Point;

use crate::PathFinder;
use crate::traits::Terrain;

/// Errors from path queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavError {
    /// A coordinate argument was outside the grid bounds.
    OutOfRange(Point),
    /// The iteration cap was hit during search, heuristic walk or path
    /// reconstruction.
    ///
    /// This signals pathological input or misconfiguration; an
    /// ordinary missing path is reported as `None`, never as this.
    TimeoutExceeded(u32),
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange(p) => write!(f, "position {p} is outside the grid"),
            Self::TimeoutExceeded(cap) => {
                write!(f, "search exceeded its iteration cap ({cap})")
            }
        }
    }
}

impl std::error::Error for NavError {}

/// Greedy simulated-walk cost estimate from `from` to `to`.
///
/// Steps one cardinal cell at a time toward the goal, preferring the
/// axis with the larger remaining delta (candidates tried in the order
/// +x, +y, -x, -y, adopted on strict improvement), and sums the cost of
/// every stepped-through cell, the walk's own start included, the goal
/// excluded. The walk ignores occupancy and stays inside the bounding
/// rectangle of its endpoints.
///
/// Not an admissible estimate: under non-uniform costs the sum can
/// overestimate, and the search may then return a non-optimal path.
/// Callers rely on the exact sum, so this must not be swapped for a
/// Manhattan distance.
pub(crate) fn walk_cost<T: Terrain>(
    terrain: &T,
    from: Point,
    to: Point,
    cap: u32,
) -> Result<i32, NavError> {
    let mut cur = from;
    let mut sum = 0;
    let mut steps: u32 = 0;
    while cur != to && steps < cap {
        sum += terrain.cost(cur);
        let dx = to.x - cur.x;
        let dy = to.y - cur.y;
        let mut best = dx;
        let mut next = cur.shift(1, 0);
        if dy > best {
            best = dy;
            next = cur.shift(0, 1);
        }
        if dx.abs() > best {
            best = dx.abs();
            next = cur.shift(-1, 0);
        }
        if dy.abs() > best {
            next = cur.shift(0, -1);
        }
        cur = next;
        steps += 1;
    }
    if steps >= cap {
        return Err(NavError::TimeoutExceeded(cap));
    }
    Ok(sum)
}

impl PathFinder {
    /// Compute the least-cost path from `start` to `goal`, honoring
    /// terrain occupancy plus the `extra_blocked` cells.
    ///
    /// Returns the full path including both endpoints, or `None` when
    /// the goal is unreachable, including when `start` itself is
    /// blocked.
    /// `extra_blocked` cells are treated as occupied for this call
    /// only, which lets callers probe hypothetical obstacles without
    /// touching the terrain; out-of-bounds entries are ignored.
    ///
    /// Ordering contracts: the open set is scanned linearly for the
    /// strictly smallest f-cost, so the earliest-created node wins
    /// ties; neighbors expand up, right, down, left; a node already on
    /// the open list is relaxed in place (g, f and parent, never h) and
    /// closed nodes are never reopened. Exceeding the iteration cap in
    /// the main loop or during reconstruction fails with
    /// [`NavError::TimeoutExceeded`].
    pub fn find_path<T: Terrain>(
        &mut self,
        terrain: &T,
        start: Point,
        goal: Point,
        extra_blocked: &[Point],
    ) -> Result<Option<Vec<Point>>, NavError> {
        let Some(start_idx) = self.idx(start) else {
            return Err(NavError::OutOfRange(start));
        };
        let Some(goal_idx) = self.idx(goal) else {
            return Err(NavError::OutOfRange(goal));
        };
        if terrain.blocked(start) || extra_blocked.contains(&start) {
            return Ok(None);
        }
        if start_idx == goal_idx {
            return Ok(Some(vec![start]));
        }

        let cap = self.iteration_cap;

        // Bump the generation to lazily invalidate all nodes.
        self.generation = self.generation.wrapping_add(1);
        let cur_gen = self.generation;

        // Hypothetically blocked cells enter the search already closed.
        for &p in extra_blocked {
            if let Some(i) = self.idx(p) {
                let n = &mut self.nodes[i];
                n.generation = cur_gen;
                n.open = false;
            }
        }

        let h = walk_cost(terrain, start, goal, cap)?;
        {
            let n = &mut self.nodes[start_idx];
            n.g = 0;
            n.h = h;
            n.f = h;
            n.parent = usize::MAX;
            n.generation = cur_gen;
            n.open = true;
        }

        let mut open = std::mem::take(&mut self.open);
        open.clear();
        open.push(start_idx);

        let mut iterations: u32 = 0;
        let mut found = false;
        while !open.is_empty() && iterations < cap {
            // Linear scan with strict `<`: the earliest-pushed node
            // wins f-cost ties.
            let mut best_pos = 0;
            let mut best_f = i32::MAX;
            for (pos, &ni) in open.iter().enumerate() {
                if self.nodes[ni].f < best_f {
                    best_f = self.nodes[ni].f;
                    best_pos = pos;
                }
            }
            let ci = open.remove(best_pos);
            self.nodes[ci].open = false;

            if ci == goal_idx {
                found = true;
                break;
            }

            let cur_g = self.nodes[ci].g;
            let cp = self.point(ci);
            for np in cp.neighbors_4() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if terrain.blocked(np) {
                    continue;
                }
                let seen = self.nodes[ni].generation == cur_gen;
                if seen && !self.nodes[ni].open {
                    // Closed nodes are never reopened.
                    continue;
                }
                let tentative = cur_g + terrain.cost(np);
                if seen {
                    let n = &mut self.nodes[ni];
                    if n.g > tentative {
                        n.g = tentative;
                        n.f = tentative + n.h;
                        n.parent = ci;
                    }
                } else {
                    let h = match walk_cost(terrain, np, goal, cap) {
                        Ok(h) => h,
                        Err(e) => {
                            self.open = open;
                            return Err(e);
                        }
                    };
                    let n = &mut self.nodes[ni];
                    n.g = tentative;
                    n.h = h;
                    n.f = tentative + h;
                    n.parent = ci;
                    n.generation = cur_gen;
                    n.open = true;
                    open.push(ni);
                }
            }
            iterations += 1;
        }
        self.open = open;

        if iterations >= cap {
            return Err(NavError::TimeoutExceeded(cap));
        }
        if !found {
            return Ok(None);
        }

        // Walk predecessor links back from the goal, then flip.
        let mut path = Vec::new();
        let mut ci = goal_idx;
        let mut steps: u32 = 0;
        while ci != usize::MAX && steps < cap {
            path.push(self.point(ci));
            ci = self.nodes[ci].parent;
            steps += 1;
        }
        if steps >= cap {
            return Err(NavError::TimeoutExceeded(cap));
        }
        path.reverse();
        Ok(Some(path))
    }
}
