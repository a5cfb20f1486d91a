/// Coarse screen-space visibility test
use crate::projection::{ScreenPoint, Viewport};

/// A triangle is visible when any of its projected corners lands inside the
/// viewport.
///
/// This is not clipping: a large triangle whose corners all sit outside the
/// screen while its interior covers it is reported as hidden.
pub fn is_visible(points: &[ScreenPoint; 3], viewport: &Viewport) -> bool {
    points.iter().any(|p| viewport.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn test_any_corner_inside() {
        let points = [
            ScreenPoint::new(-50.0, -50.0),
            ScreenPoint::new(900.0, 100.0),
            ScreenPoint::new(10.0, 10.0),
        ];
        assert!(is_visible(&points, &viewport()));
    }

    #[test]
    fn test_all_outside() {
        let points = [
            ScreenPoint::new(-1.0, 10.0),
            ScreenPoint::new(800.0, 10.0),
            ScreenPoint::new(10.0, 600.0),
        ];
        assert!(!is_visible(&points, &viewport()));
    }

    #[test]
    fn test_covering_triangle_is_culled() {
        // Interior covers the whole screen, corners are all off it
        let points = [
            ScreenPoint::new(-1000.0, -1000.0),
            ScreenPoint::new(3000.0, -1000.0),
            ScreenPoint::new(-1000.0, 3000.0),
        ];
        assert!(!is_visible(&points, &viewport()));
    }

    #[test]
    fn test_edges_are_half_open() {
        let origin = [ScreenPoint::new(0.0, 0.0); 3];
        assert!(is_visible(&origin, &viewport()));

        let corner = [ScreenPoint::new(800.0, 600.0); 3];
        assert!(!is_visible(&corner, &viewport()));
    }

    #[test]
    fn test_empty_viewport() {
        let points = [ScreenPoint::new(0.0, 0.0); 3];
        assert!(!is_visible(&points, &Viewport::new(0.0, 0.0)));
    }
}
