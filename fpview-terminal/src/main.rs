/// fpview - first-person terminal mesh viewer
///
/// Loads an OBJ mesh (or shows a cube) and lets you walk around it.
/// Controls:
///   - WASD: Move, Space/C: Up/down
///   - Arrow Keys / Mouse: Look around
///   - Q/ESC: Quit
use anyhow::{Context, Result};
use clap::Parser;
use fpview_core::{obj, Mesh, Scene};
use fpview_terminal::cli::Cli;
use fpview_terminal::TerminalApp;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mesh = match &cli.mesh {
        Some(path) => obj::load_obj(path)
            .with_context(|| format!("could not load mesh {}", path.display()))?,
        None => {
            log::info!("no mesh given, showing the default cube");
            Mesh::cube(2.0)
        }
    };

    let mut scene = Scene::new(mesh);
    cli.configure_scene(&mut scene);
    log::debug!(
        "projection {:?}, lighting {:?}, light {:?}",
        scene.projection,
        scene.lighting,
        scene.light
    );

    let mut app = TerminalApp::new(scene, cli.app_settings())?;
    app.run()?;

    Ok(())
}
