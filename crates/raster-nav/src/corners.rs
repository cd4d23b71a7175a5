//! Path post-processing for the visual renderer.

use raster_core::WorldPoint;

/// Collapse straight runs of an axis-aligned path so only the endpoints
/// and true corners remain.
///
/// Grid paths change direction in exact 90° turns; any other direction
/// change is reported with a non-fatal warning and the offending point
/// is dropped. Inputs with fewer than two points are returned
/// unchanged.
pub fn merge_collinear(corners: &[WorldPoint]) -> Vec<WorldPoint> {
    if corners.len() < 2 {
        return corners.to_vec();
    }

    let mut result = vec![corners[0]];
    let mut run = corners[1] - corners[0];

    for i in 1..corners.len() - 1 {
        let next = corners[i + 1] - corners[i];
        let cross = run.x * next.y - run.y * next.x;
        let dot = run.x * next.x + run.y * next.y;
        if cross == 0.0 && dot > 0.0 {
            // Same heading, the point is redundant.
        } else if dot == 0.0 {
            result.push(corners[i]);
            run = next;
        } else {
            let angle = (dot / (run.length() * next.length())).acos().to_degrees();
            log::warn!(
                "unexpected {angle:.0}° direction change at {}; paths must turn in right angles",
                corners[i]
            );
        }
    }

    result.push(corners[corners.len() - 1]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> WorldPoint {
        WorldPoint::new(x, y)
    }

    #[test]
    fn straight_run_collapses_to_endpoints() {
        let path = vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(3.0, 0.0)];
        assert_eq!(merge_collinear(&path), vec![p(0.0, 0.0), p(3.0, 0.0)]);
    }

    #[test]
    fn right_angle_corners_survive() {
        let path = vec![
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(2.0, 0.0),
            p(2.0, 1.0),
            p(2.0, 2.0),
            p(3.0, 2.0),
        ];
        assert_eq!(
            merge_collinear(&path),
            vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(3.0, 2.0)]
        );
    }

    #[test]
    fn diagonal_kink_is_dropped() {
        let path = vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 1.0), p(3.0, 1.0)];
        // The 45° turn at (1,0) is not a legal corner; the merged path
        // keeps going and only the endpoints remain.
        let merged = merge_collinear(&path);
        assert_eq!(merged.first(), Some(&p(0.0, 0.0)));
        assert_eq!(merged.last(), Some(&p(3.0, 1.0)));
        assert!(!merged.contains(&p(1.0, 0.0)));
    }

    #[test]
    fn short_inputs_are_returned_unchanged() {
        assert_eq!(merge_collinear(&[]), Vec::<WorldPoint>::new());
        let single = vec![p(4.0, 2.0)];
        assert_eq!(merge_collinear(&single), single);
        let pair = vec![p(0.0, 0.0), p(0.0, 1.0)];
        assert_eq!(merge_collinear(&pair), pair);
    }

    #[test]
    fn full_reversal_is_not_a_corner() {
        let path = vec![p(0.0, 0.0), p(1.0, 0.0), p(0.0, 0.0), p(0.0, 1.0)];
        let merged = merge_collinear(&path);
        // The 180° turn is warned about and skipped; its point is kept
        // only if a later right angle re-introduces it.
        assert_eq!(merged.first(), Some(&p(0.0, 0.0)));
        assert_eq!(merged.last(), Some(&p(0.0, 1.0)));
    }
}
