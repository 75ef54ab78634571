/// Geometry primitives for the demo scene
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// A 3D vertex with position and color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub color: Vec3,
}

impl Vertex {
    pub fn new(position: [f32; 3], color: [f32; 3]) -> Self {
        Self {
            position: position.into(),
            color: color.into(),
        }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Calculate the face normal from the triangle's winding
    pub fn normal(&self) -> Vec3 {
        let [v0, v1, v2] = self.vertices.map(|v| v.position);
        (v1 - v0).cross(v2 - v0).normalized()
    }

    /// Mean of the three vertex colors.
    pub fn color(&self) -> Vec3 {
        let [c0, c1, c2] = self.vertices.map(|v| v.color);
        (c0 + c1 + c2) * (1.0 / 3.0)
    }
}

/// Built-in meshes selectable from config or the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Pyramid,
    Prism,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown shape `{0}` (expected `pyramid` or `prism`)")]
pub struct ParseShapeError(String);

impl FromStr for Shape {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pyramid" => Ok(Shape::Pyramid),
            "prism" => Ok(Shape::Prism),
            _ => Err(ParseShapeError(s.to_string())),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Pyramid => f.write_str("pyramid"),
            Shape::Prism => f.write_str("prism"),
        }
    }
}

/// A triangle list
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Adds one flat-colored triangle.
    pub fn add_face(&mut self, corners: [[f32; 3]; 3], color: [f32; 3]) {
        let [a, b, c] = corners.map(|p| Vertex::new(p, color));
        self.add_triangle(Triangle::new(a, b, c));
    }

    pub fn from_shape(shape: Shape) -> Self {
        match shape {
            Shape::Pyramid => Self::pyramid(),
            Shape::Prism => Self::prism(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.triangles.len() * 3
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.triangles.iter().flat_map(|t| t.vertices.iter())
    }

    /// All positions followed by all colors, three floats each.
    pub fn blocked_floats(&self) -> Vec<f32> {
        let positions = self.vertices().flat_map(|v| v.position.to_array());
        let colors = self.vertices().flat_map(|v| v.color.to_array());
        positions.chain(colors).collect()
    }

    /// Three open faces of a pyramid placed in front of the origin.
    pub fn pyramid() -> Self {
        let mut mesh = Self::with_capacity(3);
        let (left, right, apex, back) = (
            [-0.5, -0.5, -2.0],
            [0.5, -0.5, -2.0],
            [0.0, 0.5, -3.0],
            [0.0, -0.5, -4.0],
        );

        mesh.add_face([left, apex, right], [1.0, 0.0, 0.0]);
        mesh.add_face([left, apex, back], [0.0, 1.0, 0.0]);
        mesh.add_face([right, apex, back], [0.0, 0.0, 1.0]);
        mesh
    }

    /// A closed rectangular prism, half-extent 0.25 in x/y, spanning z -1.25..-2.75.
    pub fn prism() -> Self {
        const N: f32 = -1.25;
        const F: f32 = -2.75;
        const H: f32 = 0.25;

        let mut mesh = Self::with_capacity(12);

        // near
        let blue = [0.0, 0.0, 1.0];
        mesh.add_face([[H, H, N], [H, -H, N], [-H, H, N]], blue);
        mesh.add_face([[H, -H, N], [-H, -H, N], [-H, H, N]], blue);

        // far
        let grey = [0.8, 0.8, 0.8];
        mesh.add_face([[H, H, F], [-H, H, F], [H, -H, F]], grey);
        mesh.add_face([[H, -H, F], [-H, H, F], [-H, -H, F]], grey);

        // left
        let green = [0.0, 1.0, 0.0];
        mesh.add_face([[-H, H, N], [-H, -H, N], [-H, -H, F]], green);
        mesh.add_face([[-H, H, N], [-H, -H, F], [-H, H, F]], green);

        // right
        let olive = [0.5, 0.5, 0.0];
        mesh.add_face([[H, H, N], [H, -H, F], [H, -H, N]], olive);
        mesh.add_face([[H, H, N], [H, H, F], [H, -H, F]], olive);

        // top
        let red = [1.0, 0.0, 0.0];
        mesh.add_face([[H, H, F], [H, H, N], [-H, H, N]], red);
        mesh.add_face([[H, H, F], [-H, H, N], [-H, H, F]], red);

        // bottom
        let cyan = [0.0, 1.0, 1.0];
        mesh.add_face([[H, -H, F], [-H, -H, N], [H, -H, N]], cyan);
        mesh.add_face([[H, -H, F], [-H, -H, F], [-H, -H, N]], cyan);

        mesh
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pyramid_layout() {
        let mesh = Mesh::pyramid();
        assert_eq!(mesh.vertex_count(), 9);

        let floats = mesh.blocked_floats();
        assert_eq!(floats.len(), 9 * 3 * 2);
        assert_eq!(&floats[..3], &[-0.5, -0.5, -2.0]);
        // colors start halfway through the buffer
        assert_eq!(&floats[27..30], &[1.0, 0.0, 0.0]);
        assert_eq!(&floats[51..54], &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_prism_is_closed_box() {
        let mesh = Mesh::prism();
        assert_eq!(mesh.vertex_count(), 36);
        for v in mesh.vertices() {
            assert_eq!(v.position.x.abs(), 0.25);
            assert_eq!(v.position.y.abs(), 0.25);
            assert!(v.position.z == -1.25 || v.position.z == -2.75);
        }
        for t in &mesh.triangles {
            assert!((t.normal().length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_triangle_color_is_mean() {
        let t = Triangle::new(
            Vertex::new([0.0; 3], [1.0, 0.0, 0.0]),
            Vertex::new([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            Vertex::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
        );
        assert!((t.color() - Vec3::splat(1.0 / 3.0)).length() < 1e-6);
        assert_eq!(t.normal(), Vec3::Z);
    }

    #[test]
    fn test_shape_parsing() {
        assert_eq!("prism".parse::<Shape>().unwrap(), Shape::Prism);
        assert_eq!("Pyramid".parse::<Shape>().unwrap(), Shape::Pyramid);
        assert!("cube".parse::<Shape>().is_err());
        assert_eq!(Mesh::from_shape(Shape::Prism).vertex_count(), 36);
        assert_eq!(Shape::default().to_string(), "pyramid");
    }
}
