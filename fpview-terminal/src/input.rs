/// Keyboard and mouse input, collected between frames
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use fpview_core::Camera;
use nalgebra::{Vector2, Vector3};

/// Turning rates for keyboard and mouse look
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSettings {
    /// Radians per second while an arrow key is held
    pub key_turn_rate: f32,
    /// Radians per terminal cell of mouse motion
    pub mouse_sensitivity: f32,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            key_turn_rate: 1.5,
            mouse_sensitivity: 0.02,
        }
    }
}

/// Input accumulated since the last [`InputState::apply`].
///
/// Movement and turn keys set a direction per axis; the most recent key on
/// an axis wins. Mouse motion is summed.
#[derive(Debug, Default)]
pub struct InputState {
    movement: Vector3<f32>,
    turn: Vector2<f32>,
    mouse_delta: Vector2<f32>,
    last_mouse: Option<(u16, u16)>,
    quit: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Up => self.turn.y = -1.0,
            KeyCode::Down => self.turn.y = 1.0,
            KeyCode::Left => self.turn.x = 1.0,
            KeyCode::Right => self.turn.x = -1.0,
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'q' => self.quit = true,
                'w' => self.movement.z = 1.0,
                's' => self.movement.z = -1.0,
                'a' => self.movement.x = -1.0,
                'd' => self.movement.x = 1.0,
                ' ' => self.movement.y = 1.0,
                'c' => self.movement.y = -1.0,
                _ => {}
            },
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        if !matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
            return;
        }

        let position = (mouse.column, mouse.row);
        if let Some((x, y)) = self.last_mouse {
            self.mouse_delta += Vector2::new(
                position.0 as f32 - x as f32,
                position.1 as f32 - y as f32,
            );
        }
        self.last_mouse = Some(position);
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Turn this frame's input into one move and one rotate on `camera`
    pub fn apply(&mut self, camera: &mut Camera, dt: f32, settings: &InputSettings) {
        let movement = self.movement * (camera.speed * dt);
        camera.move_by(movement.x, movement.y, movement.z);

        let turn = self.turn * (settings.key_turn_rate * dt);
        let d_yaw = turn.x - self.mouse_delta.x * settings.mouse_sensitivity;
        let d_pitch = turn.y + self.mouse_delta.y * settings.mouse_sensitivity;
        camera.rotate(d_yaw, d_pitch);

        self.movement = Vector3::zeros();
        self.turn = Vector2::zeros();
        self.mouse_delta = Vector2::zeros();
    }
}
