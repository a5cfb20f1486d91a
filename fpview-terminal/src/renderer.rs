/// ASCII rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use fpview_core::{DrawSurface, Rgb, ScreenPoint, ShadedTriangle, Viewport};
use std::io::Write;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Glyph drawn for lit cells with zero intensity, so unlit faces stay visible
const UNLIT: char = '.';

/// Default clear colour, a dark red
pub const DEFAULT_BACKGROUND: Rgb = Rgb::new(30, 0, 0);

/// Cell buffer that triangles are painted into, later triangles on top
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    background: Rgb,
    char_buffer: Vec<char>,
    color_buffer: Vec<Rgb>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_background(width, height, DEFAULT_BACKGROUND)
    }

    pub fn with_background(width: usize, height: usize, background: Rgb) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            background,
            char_buffer: vec![' '; size],
            color_buffer: vec![Rgb::WHITE; size],
        }
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width as f32, self.height as f32)
    }

    /// Reallocate for a new terminal size
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.height {
            return;
        }
        *self = Self::with_background(width, height, self.background);
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Rgb::WHITE);
    }

    #[cfg(test)]
    fn char_at(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    #[cfg(test)]
    fn color_at(&self, x: usize, y: usize) -> Option<Rgb> {
        (x < self.width && y < self.height).then(|| self.color_buffer[y * self.width + x])
    }

    fn rasterize_triangle(&mut self, points: &[ScreenPoint; 3], character: char, color: Rgb) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let [v0, v1, v2] = points;

        // Bounding box
        let min_x = v0.x.min(v1.x).min(v2.x).floor() as i32;
        let max_x = v0.x.max(v1.x).max(v2.x).ceil() as i32;
        let min_y = v0.y.min(v1.y).min(v2.y).floor() as i32;
        let max_y = v0.y.max(v1.y).max(v2.y).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = ScreenPoint::new(x as f32 + 0.5, y as f32 + 0.5);

                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, &p) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let idx = y as usize * self.width + x as usize;
                        self.char_buffer[idx] = character;
                        self.color_buffer[idx] = color;
                    }
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.queue(SetBackgroundColor(Color::Rgb {
            r: self.background.r,
            g: self.background.g,
            b: self.background.b,
        }))?;

        let mut current = None;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let idx = y * self.width + x;
                let color = self.color_buffer[idx];
                if current != Some(color) {
                    writer.queue(SetForegroundColor(Color::Rgb {
                        r: color.r,
                        g: color.g,
                        b: color.b,
                    }))?;
                    current = Some(color);
                }
                writer.queue(Print(self.char_buffer[idx]))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl DrawSurface for AsciiRenderer {
    fn draw_triangle(&mut self, triangle: &ShadedTriangle) {
        let character = shade_char(triangle.intensity);
        // Keep dark faces readable against the background
        let color = if triangle.color == Rgb::new(0, 0, 0) {
            Rgb::new(64, 64, 64)
        } else {
            triangle.color
        };
        self.rasterize_triangle(&triangle.points, character, color);
    }
}

/// Map an intensity in `[0, 1]` onto the luminosity ramp
fn shade_char(intensity: f32) -> char {
    let top = LUMINOSITY_RAMP.len() - 1;
    let index = (intensity.clamp(0.0, 1.0) * top as f32).round() as usize;
    match LUMINOSITY_RAMP[index.min(top)] {
        ' ' => UNLIT,
        c => c,
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: &ScreenPoint,
    v1: &ScreenPoint,
    v2: &ScreenPoint,
    p: &ScreenPoint,
) -> Option<(f32, f32, f32)> {
    let denom = (v1.y - v2.y) * (v0.x - v2.x) + (v2.x - v1.x) * (v0.y - v2.y);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.y - v2.y) * (p.x - v2.x) + (v2.x - v1.x) * (p.y - v2.y)) / denom;
    let w1 = ((v2.y - v0.y) * (p.x - v2.x) + (v0.x - v2.x) * (p.y - v2.y)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(points: [(f32, f32); 3], intensity: f32) -> ShadedTriangle {
        ShadedTriangle {
            points: points.map(|(x, y)| ScreenPoint::new(x, y)),
            intensity,
            color: Rgb::WHITE.scaled(intensity),
        }
    }

    #[test]
    fn test_fills_either_winding() {
        for points in [
            [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)],
            [(0.0, 0.0), (0.0, 10.0), (10.0, 0.0)],
        ] {
            let mut renderer = AsciiRenderer::new(20, 20);
            renderer.draw_triangle(&triangle(points, 1.0));
            assert_eq!(renderer.char_at(1, 1), Some('@'));
            assert_eq!(renderer.char_at(15, 15), Some(' '));
        }
    }

    #[test]
    fn test_later_triangles_paint_over_earlier() {
        let mut renderer = AsciiRenderer::new(10, 10);
        let points = [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)];
        renderer.draw_triangle(&triangle(points, 1.0));
        renderer.draw_triangle(&triangle(points, 0.5));
        assert_eq!(renderer.char_at(2, 2), Some(shade_char(0.5)));
        assert_eq!(renderer.color_at(2, 2), Some(Rgb::WHITE.scaled(0.5)));
    }

    #[test]
    fn test_offscreen_parts_are_clipped() {
        let mut renderer = AsciiRenderer::new(4, 4);
        renderer.draw_triangle(&triangle([(-1e9, -1e9), (1e9, -1e9), (-1e9, 1e9)], 1.0));
        assert_eq!(renderer.char_at(0, 0), Some('@'));
        assert_eq!(renderer.char_at(4, 0), None);
    }

    #[test]
    fn test_shade_char_ramp() {
        assert_eq!(shade_char(0.0), UNLIT);
        assert_eq!(shade_char(1.0), '@');
        assert_eq!(shade_char(7.0), '@');
        assert_eq!(shade_char(-1.0), UNLIT);
    }

    #[test]
    fn test_clear_and_resize() {
        let mut renderer = AsciiRenderer::new(5, 5);
        renderer.draw_triangle(&triangle([(0.0, 0.0), (5.0, 0.0), (0.0, 5.0)], 1.0));
        renderer.clear();
        assert_eq!(renderer.char_at(0, 0), Some(' '));

        renderer.resize(8, 3);
        assert_eq!(renderer.viewport(), Viewport::new(8.0, 3.0));
        assert_eq!(renderer.background(), DEFAULT_BACKGROUND);
        assert_eq!(renderer.char_at(7, 2), Some(' '));
        assert_eq!(renderer.char_at(0, 3), None);
    }

    #[test]
    fn test_draw_writes_cells() {
        let mut renderer = AsciiRenderer::new(3, 2);
        renderer.draw_triangle(&triangle([(0.0, 0.0), (3.0, 0.0), (0.0, 2.0)], 1.0));
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains('@'));
        assert!(text.contains("48;2;30;0;0"));
    }

    #[test]
    fn test_custom_background() {
        let mut renderer = AsciiRenderer::with_background(2, 2, Rgb::new(0, 0, 40));
        renderer.resize(3, 3);
        assert_eq!(renderer.background(), Rgb::new(0, 0, 40));

        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("48;2;0;0;40"));
    }
}
