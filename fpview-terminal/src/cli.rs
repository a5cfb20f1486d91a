/// Command line options for the `fpview` binary
use clap::{Parser, ValueEnum};
use fpview_core::{LightSource, LightingModel, ProjectionConfig, Rgb, Scene};
use std::path::PathBuf;

use crate::input::InputSettings;
use crate::AppSettings;

#[derive(Parser, Debug)]
#[command(name = "fpview")]
#[command(about = "First-person flat-shaded mesh viewer for the terminal")]
#[command(after_help = "Controls: WASD move, Space/C up/down, arrows or mouse look, Q/Esc quit.\n\
    Logs go to stderr (RUST_LOG), so redirect it when raising the level.")]
pub struct Cli {
    /// OBJ file to view; a cube is shown when omitted
    pub mesh: Option<PathBuf>,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 90.0)]
    pub fov: f32,

    /// How the light direction of each face is measured
    #[arg(long, value_enum, default_value_t = LightingArg::Centroid)]
    pub lighting: LightingArg,

    /// Light position as "x,y,z"
    #[arg(long, value_parser = parse_point, default_value = "5,5,5")]
    pub light: [f32; 3],

    /// Base face colour as "r,g,b"
    #[arg(long, value_parser = parse_color, default_value = "255,255,255")]
    pub color: Rgb,

    /// Background colour as "r,g,b"
    #[arg(long, value_parser = parse_color, default_value = "30,0,0")]
    pub background: Rgb,

    /// Camera movement speed in units per second
    #[arg(long, default_value_t = 10.0)]
    pub speed: f32,

    /// Arrow-key turn rate in radians per second
    #[arg(long, default_value_t = 1.5)]
    pub turn_rate: f32,

    /// Mouse look in radians per terminal cell
    #[arg(long, default_value_t = 0.02)]
    pub mouse_sensitivity: f32,

    /// Frame rate cap
    #[arg(long, default_value_t = 30)]
    pub fps: u32,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightingArg {
    Centroid,
    NormalAsPoint,
}

impl From<LightingArg> for LightingModel {
    fn from(arg: LightingArg) -> Self {
        match arg {
            LightingArg::Centroid => LightingModel::Centroid,
            LightingArg::NormalAsPoint => LightingModel::NormalAsPoint,
        }
    }
}

impl Cli {
    /// Apply the scene options on top of the defaults
    pub fn configure_scene(&self, scene: &mut Scene) {
        let defaults = ProjectionConfig::default();
        scene.projection = ProjectionConfig::new(self.fov.to_radians(), defaults.near, defaults.far);
        scene.lighting = self.lighting.into();
        scene.base_color = self.color;

        let [x, y, z] = self.light;
        scene.light = LightSource::new(x, y, z);
        scene.camera.speed = self.speed;
    }

    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            target_fps: self.fps.max(1),
            background: self.background,
            input: InputSettings {
                key_turn_rate: self.turn_rate,
                mouse_sensitivity: self.mouse_sensitivity,
            },
        }
    }
}

fn parse_triplet<T: std::str::FromStr>(s: &str) -> Result<[T; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [a, b, c] = parts.as_slice() else {
        return Err(format!("expected three comma-separated values, got {:?}", s));
    };
    let parse = |v: &str| v.parse::<T>().map_err(|_| format!("invalid value {:?} in {:?}", v, s));
    Ok([parse(*a)?, parse(*b)?, parse(*c)?])
}

fn parse_point(s: &str) -> Result<[f32; 3], String> {
    let point = parse_triplet::<f32>(s)?;
    if point.iter().all(|v| v.is_finite()) {
        Ok(point)
    } else {
        Err(format!("non-finite coordinate in {:?}", s))
    }
}

fn parse_color(s: &str) -> Result<Rgb, String> {
    let [r, g, b] = parse_triplet::<u8>(s)?;
    Ok(Rgb::new(r, g, b))
}
