use crate::geometry::Point;

/// Offset of a target toward the pointer, limited to `max_deflection`
///
/// The direction is always `atan2(dy, dx)` of the pointer relative to the
/// anchor; only the magnitude is clamped. A pointer sitting on the anchor
/// gives angle 0 and a zero offset. Non-finite input yields zero.
pub fn bounded_offset(pointer: Point, anchor: Point, max_deflection: f64) -> Point {
    let delta = pointer - anchor;
    if !delta.is_finite() || !max_deflection.is_finite() {
        return Point::ZERO;
    }

    delta.clamp_length(max_deflection)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_clamped_along_axis() {
        let offset = bounded_offset(Point::new(150.0, 100.0), Point::new(100.0, 100.0), 40.0);
        assert!((offset.x - 40.0).abs() < EPS);
        assert!(offset.y.abs() < EPS);
    }

    #[test]
    fn test_unclamped_offset_follows_pointer() {
        let offset = bounded_offset(Point::new(110.0, 105.0), Point::new(100.0, 100.0), 40.0);
        assert!((offset.x - 10.0).abs() < EPS);
        assert!((offset.y - 5.0).abs() < EPS);
    }

    #[test]
    fn test_clamped_diagonal() {
        let offset = bounded_offset(Point::new(110.0, 105.0), Point::new(100.0, 100.0), 10.0);
        assert!((offset.x - 8.944).abs() < 1e-3);
        assert!((offset.y - 4.472).abs() < 1e-3);
    }

    #[test]
    fn test_pointer_on_anchor() {
        let anchor = Point::new(7.0, 7.0);
        assert_eq!(bounded_offset(anchor, anchor, 40.0), Point::ZERO);
    }

    #[test]
    fn test_bounded_for_grid_of_positions() {
        let anchor = Point::new(3.0, -4.0);
        for max in [0.0, 1.0, 7.5, 40.0] {
            for ix in -10..=10 {
                for iy in -10..=10 {
                    let pointer = Point::new(ix as f64 * 13.0, iy as f64 * 7.0);
                    let offset = bounded_offset(pointer, anchor, max);
                    assert!(offset.length() <= max + EPS, "{:?} exceeds {}", offset, max);
                }
            }
        }
    }

    #[test]
    fn test_never_exceeds_limit_at_any_angle() {
        let anchor = Point::new(100.0, 100.0);
        for max in [40.0, 10.0, 0.3, 7.0 / 3.0] {
            for i in 0..3600 {
                let angle = (i as f64) * std::f64::consts::TAU / 3600.0;
                let pointer = Point::new(
                    anchor.x + 500.0 * angle.cos(),
                    anchor.y + 500.0 * angle.sin(),
                );
                let offset = bounded_offset(pointer, anchor, max);
                assert!(offset.length() <= max, "{:?} exceeds {} at step {}", offset, max, i);
                assert!((offset.length() - max).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_direction_fidelity() {
        let anchor = Point::new(0.0, 0.0);
        for (x, y) in [(3.0_f64, 4.0_f64), (-5.0, 2.0), (-1.0, -9.0), (100.0, -0.5)] {
            let pointer = Point::new(x, y);
            let offset = bounded_offset(pointer, anchor, 2.0);
            let expected = y.atan2(x);
            assert!((offset.angle() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_non_finite_input() {
        let offset = bounded_offset(Point::new(f64::NAN, 0.0), Point::ZERO, 10.0);
        assert_eq!(offset, Point::ZERO);
        let offset = bounded_offset(Point::new(f64::INFINITY, 0.0), Point::ZERO, 10.0);
        assert_eq!(offset, Point::ZERO);
    }
}
