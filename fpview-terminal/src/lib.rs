/// Terminal frontend: viewport, input and rasterization for the fpview core
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use fpview_core::{FrameStats, Rgb, Scene};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod cli;
pub mod input;
pub mod renderer;

pub use input::{InputSettings, InputState};
pub use renderer::{AsciiRenderer, DEFAULT_BACKGROUND};

/// Frontend settings
#[derive(Debug, Clone, Copy)]
pub struct AppSettings {
    pub target_fps: u32,
    pub background: Rgb,
    pub input: InputSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            target_fps: 30,
            background: DEFAULT_BACKGROUND,
            input: InputSettings::default(),
        }
    }
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    scene: Scene,
    settings: AppSettings,
    renderer: AsciiRenderer,
    input: InputState,
    running: bool,
    last_fps_sample: Instant,
    frame_count: u32,
    fps: f32,
    last_stats: FrameStats,
}

impl TerminalApp {
    pub fn new(scene: Scene, settings: AppSettings) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            scene,
            settings,
            renderer: AsciiRenderer::with_background(
                width as usize,
                height as usize,
                settings.background,
            ),
            input: InputState::new(),
            running: true,
            last_fps_sample: Instant::now(),
            frame_count: 0,
            fps: 0.0,
            last_stats: FrameStats::default(),
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )?;

        let result = self.main_loop();

        // Cleanup, each step runs even when an earlier one failed
        let raw = terminal::disable_raw_mode();
        let screen = execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        );

        first_error([result, raw, screen])
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_secs(1) / self.settings.target_fps.max(1);
        let mut previous = Instant::now();

        while self.running {
            let frame_start = Instant::now();
            let dt = (frame_start - previous).as_secs_f32();
            previous = frame_start;

            self.poll_input()?;
            self.input
                .apply(&mut self.scene.camera, dt, &self.settings.input);
            if self.input.quit_requested() {
                self.running = false;
                break;
            }

            self.update_viewport()?;
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_fps_sample).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_fps_sample).as_secs_f32();
                self.frame_count = 0;
                self.last_fps_sample = now;
                log::debug!("{:.1} fps, last frame {:?}", self.fps, self.last_stats);
            }
        }

        Ok(())
    }

    /// Drain every pending terminal event into the input state
    fn poll_input(&mut self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            if let Event::Resize(width, height) = event {
                self.resize(width, height);
            }
            self.input.handle_event(&event);
        }
        Ok(())
    }

    fn update_viewport(&mut self) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        self.resize(width, height);
        Ok(())
    }

    fn resize(&mut self, width: u16, height: u16) {
        let (width, height) = (width as usize, height as usize);
        if width != self.renderer.width() || height != self.renderer.height() {
            log::debug!("viewport resized to {}x{}", width, height);
            self.renderer.resize(width, height);
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.renderer.clear();

        let viewport = self.renderer.viewport();
        #[cfg(feature = "parallel")]
        let stats = self.scene.render_parallel(viewport, &mut self.renderer);
        #[cfg(not(feature = "parallel"))]
        let stats = self.scene.render(viewport, &mut self.renderer);
        self.last_stats = stats;

        let mut stdout = stdout();
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let camera = &self.scene.camera;
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "fpview | FPS: {:.1} | faces {}/{} | pos ({:.1}, {:.1}, {:.1}) | WASD Space/C move, arrows/mouse look, Q quit",
                self.fps,
                stats.submitted,
                self.scene.mesh.faces().len(),
                camera.position.x,
                camera.position.y,
                camera.position.z,
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// The first failure in order, or `Ok` when every step succeeded
fn first_error(results: impl IntoIterator<Item = io::Result<()>>) -> io::Result<()> {
    results.into_iter().collect()
}
