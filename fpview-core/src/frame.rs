/// Per-frame pipeline: project, cull, shade, submit
use crate::camera::Camera;
use crate::geometry::{Face, Mesh};
use crate::projection::{ProjectionConfig, Projector, ScreenPoint, Viewport};
use crate::shading::{shade, LightSource, LightingModel, Rgb};
use crate::visibility::is_visible;

/// A triangle ready for rasterization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadedTriangle {
    pub points: [ScreenPoint; 3],
    /// Flat diffuse intensity in `[0, 1]`
    pub intensity: f32,
    /// Base colour already scaled by `intensity`
    pub color: Rgb,
}

/// Anything that can rasterize screen-space triangles
pub trait DrawSurface {
    fn draw_triangle(&mut self, triangle: &ShadedTriangle);
}

impl DrawSurface for Vec<ShadedTriangle> {
    fn draw_triangle(&mut self, triangle: &ShadedTriangle) {
        self.push(*triangle);
    }
}

/// Counters for one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub submitted: usize,
    /// Faces rejected by the visibility test
    pub culled: usize,
    /// Faces with a corner on the camera plane
    pub degenerate: usize,
}

/// Outcome of running one face through the pipeline
enum FaceResult {
    Draw(ShadedTriangle),
    Culled,
    Degenerate,
}

/// Everything needed to draw a frame
#[derive(Debug, Clone)]
pub struct Scene {
    pub mesh: Mesh,
    pub camera: Camera,
    pub light: LightSource,
    pub projection: ProjectionConfig,
    pub lighting: LightingModel,
    pub base_color: Rgb,
}

impl Scene {
    pub fn new(mesh: Mesh) -> Self {
        Self {
            mesh,
            camera: Camera::default(),
            light: LightSource::default(),
            projection: ProjectionConfig::default(),
            lighting: LightingModel::default(),
            base_color: Rgb::default(),
        }
    }

    /// Draw every visible face in mesh order
    pub fn render<S: DrawSurface + ?Sized>(&self, viewport: Viewport, surface: &mut S) -> FrameStats {
        let projector = Projector::new(&self.camera, viewport, &self.projection);
        let mut stats = FrameStats::default();

        for face in self.mesh.faces() {
            let result = self.process_face(face, &projector);
            submit(result, surface, &mut stats);
        }

        log::trace!("frame: {:?}", stats);
        stats
    }

    /// Same as [`Scene::render`] with faces processed on the rayon pool.
    ///
    /// Submission still happens in mesh order on the calling thread.
    #[cfg(feature = "parallel")]
    pub fn render_parallel<S: DrawSurface + ?Sized>(
        &self,
        viewport: Viewport,
        surface: &mut S,
    ) -> FrameStats {
        use rayon::prelude::*;

        let projector = Projector::new(&self.camera, viewport, &self.projection);
        let results: Vec<FaceResult> = self
            .mesh
            .faces()
            .par_iter()
            .map(|face| self.process_face(face, &projector))
            .collect();

        let mut stats = FrameStats::default();
        for result in results {
            submit(result, surface, &mut stats);
        }

        log::trace!("frame: {:?}", stats);
        stats
    }

    fn process_face(&self, face: &Face, projector: &Projector) -> FaceResult {
        let Some(triangle) = self.mesh.triangle(face) else {
            return FaceResult::Degenerate;
        };

        let [Some(p1), Some(p2), Some(p3)] = triangle.map(|v| projector.project(&v)) else {
            return FaceResult::Degenerate;
        };
        let points = [p1, p2, p3];

        if !is_visible(&points, &projector.viewport()) {
            return FaceResult::Culled;
        }

        let intensity = shade(&triangle, &self.light, self.lighting);
        FaceResult::Draw(ShadedTriangle {
            points,
            intensity,
            color: self.base_color.scaled(intensity),
        })
    }
}

fn submit<S: DrawSurface + ?Sized>(result: FaceResult, surface: &mut S, stats: &mut FrameStats) {
    match result {
        FaceResult::Draw(triangle) => {
            surface.draw_triangle(&triangle);
            stats.submitted += 1;
        }
        FaceResult::Culled => stats.culled += 1,
        FaceResult::Degenerate => stats.degenerate += 1,
    }
}
