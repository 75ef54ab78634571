/// ASCII rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use pyra_core::{Mat4, Mesh, Triangle, Vec3};
use std::io::Write;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
}

const EMPTY: Cell = Cell {
    ch: ' ',
    color: Color::Reset,
};

/// A projected vertex: cell coordinates plus NDC depth.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ScreenPoint {
    x: f32,
    y: f32,
    depth: f32,
}

/// ASCII renderer that converts 3D meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    cells: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            cells: vec![EMPTY; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.cells.fill(EMPTY);
    }

    /// Rasterizes every triangle of `mesh`. `front` is the camera's viewing
    /// direction and drives the shading.
    pub fn render_mesh(&mut self, mesh: &Mesh, mvp: &Mat4, front: Vec3) {
        for triangle in &mesh.triangles {
            self.render_triangle(triangle, mvp, front);
        }
    }

    fn render_triangle(&mut self, triangle: &Triangle, mvp: &Mat4, front: Vec3) {
        let mut points = [ScreenPoint {
            x: 0.0,
            y: 0.0,
            depth: 0.0,
        }; 3];
        for (point, vertex) in points.iter_mut().zip(&triangle.vertices) {
            match self.project(mvp, vertex.position) {
                Some(p) => *point = p,
                None => return, // clipped
            }
        }

        // Faces are two-sided, so only the angle to the view matters.
        let brightness = triangle.normal().dot(front).abs();
        let cell = Cell {
            ch: shade(brightness),
            color: rgb(triangle.color()),
        };

        self.rasterize_triangle(&points, cell);
    }

    /// Clip space to cell coordinates. Vertices behind the eye are rejected.
    fn project(&self, mvp: &Mat4, position: Vec3) -> Option<ScreenPoint> {
        let clip = mvp.transform_point(position);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.perspective_divide()?;
        if !(-1.0..=1.0).contains(&ndc.z) {
            return None;
        }

        Some(ScreenPoint {
            x: (ndc.x + 1.0) * 0.5 * self.width as f32,
            y: (1.0 - ndc.y) * 0.5 * self.height as f32,
            depth: ndc.z,
        })
    }

    fn rasterize_triangle(&mut self, points: &[ScreenPoint; 3], cell: Cell) {
        let [v0, v1, v2] = *points;

        // Bounding box, clipped to the screen
        let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i64).max(0);
        let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i64).min(self.width as i64 - 1);
        let min_y = (v0.y.min(v1.y).min(v2.y).floor() as i64).max(0);
        let max_y = (v0.y.max(v1.y).max(v2.y).ceil() as i64).min(self.height as i64 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                let Some((w0, w1, w2)) =
                    barycentric((v0.x, v0.y), (v1.x, v1.y), (v2.x, v2.y), p)
                else {
                    return; // degenerate
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.depth + w1 * v1.depth + w2 * v2.depth;
                let idx = y as usize * self.width + x as usize;
                if depth < self.depth_buffer[idx] {
                    self.depth_buffer[idx] = depth;
                    self.cells[idx] = cell;
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for (y, row) in self.cells.chunks(self.width.max(1)).enumerate() {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for cell in row {
                if current != Some(cell.color) {
                    writer.queue(SetForegroundColor(cell.color))?;
                    current = Some(cell.color);
                }
                writer.queue(Print(cell.ch))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    #[cfg(test)]
    fn char_at(&self, x: usize, y: usize) -> char {
        self.cells[y * self.width + x].ch
    }

    #[cfg(test)]
    fn filled(&self) -> usize {
        self.cells.iter().filter(|c| c.ch != ' ').count()
    }
}

fn shade(brightness: f32) -> char {
    let last = LUMINOSITY_RAMP.len() - 1;
    let index = (brightness.clamp(0.0, 1.0) * last as f32).round() as usize;
    LUMINOSITY_RAMP[index.min(last)]
}

fn rgb(color: Vec3) -> Color {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb {
        r: channel(color.x),
        g: channel(color.y),
        b: channel(color.z),
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyra_core::{FlyCamera, Projection};

    fn camera_mvp(camera: &FlyCamera, width: usize, height: usize) -> Mat4 {
        let projection = Projection::new(90.0, width as u32, height as u32, 0.1, 100.0);
        projection.matrix() * camera.view_matrix()
    }

    fn facing_triangle(z: f32, color: [f32; 3]) -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_face([[-1.0, -1.0, z], [1.0, -1.0, z], [0.0, 1.0, z]], color);
        mesh
    }

    #[test]
    fn test_barycentric_corners_and_center() {
        let (a, b, c) = ((0.0, 0.0), (4.0, 0.0), (0.0, 4.0));

        let (w0, w1, w2) = barycentric(a, b, c, a).unwrap();
        assert!((w0 - 1.0).abs() < 1e-6 && w1.abs() < 1e-6 && w2.abs() < 1e-6);

        let (w0, w1, w2) = barycentric(a, b, c, (4.0 / 3.0, 4.0 / 3.0)).unwrap();
        for w in [w0, w1, w2] {
            assert!((w - 1.0 / 3.0).abs() < 1e-5);
        }

        let (w0, _, _) = barycentric(a, b, c, (5.0, 5.0)).unwrap();
        assert!(w0 < 0.0);
    }

    #[test]
    fn test_barycentric_degenerate() {
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (1.0, 1.0)).is_none());
    }

    #[test]
    fn test_shade_ramp_ends() {
        assert_eq!(shade(0.0), '.');
        assert_eq!(shade(1.0), '@');
        assert_eq!(shade(7.0), '@');
    }

    #[test]
    fn test_triangle_in_front_is_drawn_brightest() {
        let mut renderer = AsciiRenderer::new(40, 20);
        let camera = FlyCamera::default();
        let mvp = camera_mvp(&camera, 40, 20);

        renderer.render_mesh(&facing_triangle(-3.0, [1.0, 0.0, 0.0]), &mvp, camera.front());

        assert!(renderer.filled() > 0);
        // Face is perpendicular to the view direction
        assert_eq!(renderer.char_at(20, 10), '@');
        assert_eq!(
            renderer.cells[10 * 40 + 20].color,
            Color::Rgb { r: 255, g: 0, b: 0 }
        );
    }

    #[test]
    fn test_triangle_behind_camera_is_clipped() {
        let mut renderer = AsciiRenderer::new(40, 20);
        let camera = FlyCamera::default();
        let mvp = camera_mvp(&camera, 40, 20);

        renderer.render_mesh(&facing_triangle(3.0, [1.0, 1.0, 1.0]), &mvp, camera.front());
        assert_eq!(renderer.filled(), 0);
    }

    #[test]
    fn test_nearer_face_wins() {
        let mut renderer = AsciiRenderer::new(40, 20);
        let camera = FlyCamera::default();
        let mvp = camera_mvp(&camera, 40, 20);

        let mut mesh = facing_triangle(-2.0, [0.0, 1.0, 0.0]);
        mesh.triangles.extend(facing_triangle(-5.0, [0.0, 0.0, 1.0]).triangles);
        renderer.render_mesh(&mesh, &mvp, camera.front());

        assert_eq!(
            renderer.cells[10 * 40 + 20].color,
            Color::Rgb { r: 0, g: 255, b: 0 }
        );

        renderer.clear();
        assert_eq!(renderer.filled(), 0);
    }

    #[test]
    fn test_draw_writes_every_cell() {
        let mut renderer = AsciiRenderer::new(4, 2);
        let camera = FlyCamera::default();
        let mvp = camera_mvp(&camera, 4, 2);
        renderer.render_mesh(&facing_triangle(-1.5, [1.0, 1.0, 1.0]), &mvp, camera.front());

        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        assert!(!out.is_empty());
    }
}
