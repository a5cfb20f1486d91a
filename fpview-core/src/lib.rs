/// fpview core library - projection and flat shading pipeline
///
/// This library holds the renderer-independent part of the viewer: the
/// indexed mesh and its OBJ loader, the first-person camera, the perspective
/// projector, the screen-space visibility test, flat diffuse shading and the
/// frame driver that feeds a `DrawSurface`.

pub mod camera;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod math;
pub mod obj;
pub mod projection;
pub mod shading;
pub mod visibility;

// Re-export commonly used types
pub use camera::Camera;
pub use error::{LoadError, LoadResult};
pub use frame::{DrawSurface, FrameStats, Scene, ShadedTriangle};
pub use geometry::{Face, Mesh, Vertex};
pub use projection::{project, ProjectionConfig, Projector, ScreenPoint, Viewport};
pub use shading::{shade, LightSource, LightingModel, Rgb};
pub use visibility::is_visible;
