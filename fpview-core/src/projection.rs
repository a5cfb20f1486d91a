/// World-to-screen projection for the first-person camera
use nalgebra::{Matrix4, Point3, Vector3, Vector4};

use crate::camera::Camera;
use crate::math::rotate_2d;

/// Below this magnitude the homogeneous divisor is treated as zero
const MIN_DIVISOR: f32 = 1e-6;
const MIN_FOV: f32 = 1e-3;
const MAX_FOV: f32 = std::f32::consts::PI - 1e-3;

/// A projected point in screen pixels, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Screen size in pixels, supplied fresh every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height, or 1 for an empty viewport
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 && self.width > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Whether `point` lies in `[0, width) x [0, height)`
    pub fn contains(&self, point: &ScreenPoint) -> bool {
        point.x >= 0.0 && point.x < self.width && point.y >= 0.0 && point.y < self.height
    }
}

/// Perspective parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionConfig {
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl ProjectionConfig {
    pub fn new(fov_y: f32, near: f32, far: f32) -> Self {
        let clamped = fov_y.clamp(MIN_FOV, MAX_FOV);
        if clamped != fov_y {
            log::warn!("field of view {} rad clamped to {} rad", fov_y, clamped);
        }
        Self {
            fov_y: clamped,
            near,
            far,
        }
    }

    /// Create the projection matrix (OpenGL convention, camera looks down -z)
    pub fn matrix(&self, aspect: f32) -> Matrix4<f32> {
        let fov = if self.fov_y.is_finite() {
            self.fov_y.clamp(MIN_FOV, MAX_FOV)
        } else {
            std::f32::consts::FRAC_PI_2
        };
        let f = 1.0 / (fov * 0.5).tan();
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };

        let depth = self.near - self.far;
        let (m33, m34) = if depth.abs() < f32::EPSILON {
            (-1.0, 0.0)
        } else {
            (
                (self.far + self.near) / depth,
                (2.0 * self.far * self.near) / depth,
            )
        };

        Matrix4::new(
            f / aspect, 0.0, 0.0, 0.0,
            0.0, f, 0.0, 0.0,
            0.0, 0.0, m33, m34,
            0.0, 0.0, -1.0, 0.0,
        )
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_y: std::f32::consts::FRAC_PI_2, // 90 degrees
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Camera and viewport snapshot for projecting many vertices in one frame
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    eye: Point3<f32>,
    yaw: f32,
    pitch: f32,
    matrix: Matrix4<f32>,
    viewport: Viewport,
}

impl Projector {
    pub fn new(camera: &Camera, viewport: Viewport, config: &ProjectionConfig) -> Self {
        Self {
            eye: camera.position,
            yaw: camera.yaw,
            pitch: camera.pitch,
            matrix: config.matrix(viewport.aspect()),
            viewport,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Move `vertex` into camera space: translate, flip z, yaw, then pitch
    pub fn to_camera_space(&self, vertex: &Point3<f32>) -> Vector3<f32> {
        let rel = vertex - self.eye;
        let (x, y, z) = (rel.x, rel.y, -rel.z);

        let (x, z) = rotate_2d(x, z, self.yaw);
        let (y, z) = rotate_2d(y, z, self.pitch);

        Vector3::new(x, y, z)
    }

    /// Project a vertex to screen space.
    ///
    /// Returns `None` when the homogeneous divisor is zero (the vertex sits on
    /// the camera plane) or the result is not finite.
    pub fn project(&self, vertex: &Point3<f32>) -> Option<ScreenPoint> {
        let rotated = self.to_camera_space(vertex);
        let clip = self.matrix * Vector4::new(rotated.x, rotated.y, rotated.z, 1.0);

        if clip.w.abs() < MIN_DIVISOR {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;

        let screen_x = (ndc_x + 1.0) * 0.5 * self.viewport.width;
        let screen_y = (1.0 - ndc_y) * 0.5 * self.viewport.height;

        if !screen_x.is_finite() || !screen_y.is_finite() {
            return None;
        }

        Some(ScreenPoint::new(screen_x, screen_y))
    }
}

/// Project a single vertex; see [`Projector::project`]
pub fn project(
    vertex: &Point3<f32>,
    camera: &Camera,
    viewport: Viewport,
    config: &ProjectionConfig,
) -> Option<ScreenPoint> {
    Projector::new(camera, viewport, config).project(vertex)
}
