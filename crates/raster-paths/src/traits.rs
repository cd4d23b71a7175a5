use raster_core::Point;

/// Cost and occupancy source for path searches.
///
/// The search only reads through this trait, which keeps it free of
/// side effects on the world it searches: back-to-back speculative
/// queries within one frame cannot contaminate each other.
pub trait Terrain {
    /// Cost of entering `p`. Must be >= 0.
    fn cost(&self, p: Point) -> i32;

    /// Whether `p` can never be entered, regardless of its cost.
    fn blocked(&self, p: Point) -> bool;
}
