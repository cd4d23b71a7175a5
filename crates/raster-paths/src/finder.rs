use raster_core::{Point, Range};

/// Default hard cap on search, heuristic-walk and reconstruction
/// iterations.
pub const DEFAULT_ITERATION_CAP: u32 = 100_000;

// ---------------------------------------------------------------------------
// Internal arena node
// ---------------------------------------------------------------------------

/// Arena slot for one cell during a search.
///
/// `h` is computed once when the node is created and never recomputed;
/// relaxation only touches `g`, `f` and `parent`. A node belongs to the
/// current search iff its `generation` matches the finder's.
#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) h: i32,
    pub(crate) f: i32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            h: 0,
            f: 0,
            parent: usize::MAX,
            generation: 0,
            open: false,
        }
    }
}

// ---------------------------------------------------------------------------
// PathFinder
// ---------------------------------------------------------------------------

/// Reusable A* searcher over a fixed grid rectangle.
///
/// Owns the node arena and the open list so repeated queries incur no
/// allocations after warm-up; a generation counter lazily invalidates
/// every node between calls. The iteration cap is fixed at
/// construction.
pub struct PathFinder {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    pub(crate) open: Vec<usize>,
    pub(crate) iteration_cap: u32,
}

impl PathFinder {
    /// Create a finder for the given grid rectangle with the default
    /// iteration cap.
    pub fn new(rng: Range) -> Self {
        Self::with_cap(rng, DEFAULT_ITERATION_CAP)
    }

    /// Create a finder with an explicit iteration cap.
    pub fn with_cap(rng: Range, iteration_cap: u32) -> Self {
        let width = rng.width().max(0) as usize;
        Self {
            rng,
            width,
            nodes: vec![Node::default(); rng.len()],
            generation: 0,
            open: Vec::new(),
            iteration_cap,
        }
    }

    /// The grid rectangle searched over.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.rng
    }

    /// The configured iteration cap.
    #[inline]
    pub fn iteration_cap(&self) -> u32 {
        self.iteration_cap
    }

    /// Convert a point to a flat arena index. `None` if out of bounds.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat arena index back to a point.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PathFinder {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.rng, self.iteration_cap).serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PathFinder {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (rng, cap) = <(Range, u32)>::deserialize(deserializer)?;
        Ok(PathFinder::with_cap(rng, cap))
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn finder_round_trip_keeps_bounds_and_cap() {
        let pf = PathFinder::with_cap(Range::new(0, 0, 9, 9), 500);
        let json = serde_json::to_string(&pf).unwrap();
        let back: PathFinder = serde_json::from_str(&json).unwrap();
        assert_eq!(back.bounds(), pf.bounds());
        assert_eq!(back.iteration_cap(), 500);
        // The arena is freshly initialized, not serialized.
        assert_eq!(back.generation, 0);
        assert_eq!(back.nodes.len(), pf.nodes.len());
    }
}
