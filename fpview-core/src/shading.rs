/// Flat per-face diffuse lighting
use nalgebra::{Point3, Vector3};

use crate::math::normalize_or_zero;

/// Single point light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSource {
    pub position: Point3<f32>,
}

impl LightSource {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
        }
    }
}

impl Default for LightSource {
    fn default() -> Self {
        Self::new(5.0, 5.0, 5.0)
    }
}

/// Where the light direction of a face is measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightingModel {
    /// From the face centroid to the light (Lambertian flat shading)
    #[default]
    Centroid,
    /// From the un-normalized face normal, read as a point, to the light.
    ///
    /// Ignores where the face actually is; kept for the legacy look.
    NormalAsPoint,
}

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale each channel by `intensity`, which is clamped to `[0, 1]`
    pub fn scaled(self, intensity: f32) -> Rgb {
        let k = if intensity.is_finite() { intensity.clamp(0.0, 1.0) } else { 0.0 };
        let scale = |c: u8| (c as f32 * k).round() as u8;
        Rgb::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Face normal `(b - a) x (c - a)`, left at its natural length
pub fn face_normal(a: &Point3<f32>, b: &Point3<f32>, c: &Point3<f32>) -> Vector3<f32> {
    let edge1 = b - a;
    let edge2 = c - a;
    edge1.cross(&edge2)
}

/// Diffuse intensity of an object-space triangle lit by `light`.
///
/// Always in `[0, 1]`. Zero-area triangles and lights sitting exactly on the
/// reference point give 0.
pub fn shade(triangle: &[Point3<f32>; 3], light: &LightSource, model: LightingModel) -> f32 {
    let [a, b, c] = triangle;
    let normal = face_normal(a, b, c);

    let origin = match model {
        LightingModel::Centroid => Point3::from((a.coords + b.coords + c.coords) / 3.0),
        LightingModel::NormalAsPoint => Point3::from(normal),
    };
    let light_dir = normalize_or_zero(light.position - origin);

    let intensity = normalize_or_zero(normal).dot(&light_dir);
    if intensity.is_finite() {
        intensity.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
