/// First-person camera state
use nalgebra::{Point3, Vector3};

/// Camera position and yaw/pitch orientation (in radians).
///
/// Orientation is accumulated as given: nothing wraps or clamps `yaw` and
/// `pitch`, so callers running for a long time should wrap them if precision
/// matters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub yaw: f32,
    pub pitch: f32,
    /// Movement speed in world units per second, used by input handling
    pub speed: f32,
}

impl Camera {
    pub fn new(position: Point3<f32>, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch,
            speed: 10.0,
        }
    }

    /// Translate by a world-space delta
    pub fn move_by(&mut self, dx: f32, dy: f32, dz: f32) {
        self.position += Vector3::new(dx, dy, dz);
    }

    /// Add orientation deltas (in radians)
    pub fn rotate(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw += d_yaw;
        self.pitch += d_pitch;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3::new(5.0, 5.0, -5.0), 0.75, -5.7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pose() {
        let camera = Camera::default();
        assert_eq!(camera.position, Point3::new(5.0, 5.0, -5.0));
        assert!((camera.yaw - 0.75).abs() < 1e-6);
        assert!((camera.pitch + 5.7).abs() < 1e-6);
        assert!((camera.speed - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_move_by() {
        let mut camera = Camera::new(Point3::origin(), 0.0, 0.0);
        camera.move_by(1.0, -2.0, 0.5);
        camera.move_by(1.0, 0.0, 0.0);
        assert_eq!(camera.position, Point3::new(2.0, -2.0, 0.5));
    }

    #[test]
    fn test_rotate_accumulates_linearly() {
        let (a, b) = (0.013, -0.007);
        let n = 1000;

        let mut stepped = Camera::new(Point3::origin(), 0.2, 0.1);
        for _ in 0..n {
            stepped.rotate(a, b);
        }

        let mut once = Camera::new(Point3::origin(), 0.2, 0.1);
        once.rotate(n as f32 * a, n as f32 * b);

        assert!((stepped.yaw - once.yaw).abs() < 1e-3);
        assert!((stepped.pitch - once.pitch).abs() < 1e-3);
    }

    #[test]
    fn test_rotate_is_unbounded() {
        let mut camera = Camera::new(Point3::origin(), 0.0, 0.0);
        for _ in 0..100 {
            camera.rotate(1.0, -1.0);
        }
        assert!((camera.yaw - 100.0).abs() < 1e-3);
        assert!((camera.pitch + 100.0).abs() < 1e-3);
    }
}
