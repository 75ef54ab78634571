/// Vector and matrix primitives for the camera/transform pipeline
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, Neg, Sub, SubAssign};

use bytemuck::{Pod, Zeroable};
use nalgebra::{Matrix4, Vector3};

/// A point or direction in 3D space.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Sum of the three components.
    pub fn sum(self) -> f32 {
        self.x + self.y + self.z
    }

    pub fn dot(self, rhs: Self) -> f32 {
        (self * rhs).sum()
    }

    /// Euclidean norm.
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Returns `self / |self|`. A zero vector yields NaN components.
    pub fn normalized(self) -> Self {
        self * (1.0 / self.length())
    }

    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    /// Normalizes in place. A zero vector becomes NaN.
    pub fn norm(&mut self) -> &mut Self {
        *self = self.normalized();
        self
    }

    /// Replaces `self` with `self x rhs`.
    ///
    /// The original `x` and `y` are captured before any component is written,
    /// since the `y` and `z` results both read them.
    pub fn cross_in_place(&mut self, rhs: Self) -> &mut Self {
        let (x, y) = (self.x, self.y);
        self.x = y * rhs.z - self.z * rhs.y;
        self.y = self.z * rhs.x - x * rhs.z;
        self.z = x * rhs.y - y * rhs.x;
        self
    }

    /// `+=` that returns `self` for chaining.
    pub fn add_in_place(&mut self, rhs: Self) -> &mut Self {
        *self += rhs;
        self
    }

    /// `-=` that returns `self` for chaining.
    pub fn sub_in_place(&mut self, rhs: Self) -> &mut Self {
        *self -= rhs;
        self
    }

    pub fn negate(&mut self) -> &mut Self {
        *self = -*self;
        self
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Component-wise product.
impl Mul for Vec3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vec3> for f32 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs * self
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(v: Vec3) -> Self {
        v.to_array()
    }
}

impl From<Vector3<f32>> for Vec3 {
    fn from(v: Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vec3> for Vector3<f32> {
    fn from(v: Vec3) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

/// Homogeneous coordinate produced by a matrix transform.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Divides by `w`, or returns `None` when `w` is too close to zero.
    pub fn perspective_divide(self) -> Option<Vec3> {
        if self.w.abs() < 1e-6 {
            return None;
        }
        Some(Vec3::new(self.x / self.w, self.y / self.w, self.z / self.w))
    }

    pub fn truncate(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// 4x4 matrix stored column-major (`cols[column][row]`).
///
/// Indexing with `m[(c, r)]` follows the same column-then-row order, so
/// `m[(2, 3)]` is the perspective-divide entry and `m[(3, 0..3)]` is the
/// translation column.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Mat4 {
    pub cols: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Builds a matrix from entries written in row-major reading order.
    #[allow(clippy::too_many_arguments)]
    #[rustfmt::skip]
    pub const fn new(
        m00: f32, m01: f32, m02: f32, m03: f32,
        m10: f32, m11: f32, m12: f32, m13: f32,
        m20: f32, m21: f32, m22: f32, m23: f32,
        m30: f32, m31: f32, m32: f32, m33: f32,
    ) -> Self {
        Self {
            cols: [
                [m00, m10, m20, m30],
                [m01, m11, m21, m31],
                [m02, m12, m22, m32],
                [m03, m13, m23, m33],
            ],
        }
    }

    pub const fn from_cols_array_2d(cols: [[f32; 4]; 4]) -> Self {
        Self { cols }
    }

    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        self.cols
    }

    /// The 16 entries in column-major order, as a shader expects them.
    pub fn as_array(&self) -> [f32; 16] {
        bytemuck::cast(self.cols)
    }

    pub fn transpose(&self) -> Self {
        let mut out = Self::IDENTITY;
        for c in 0..4 {
            for r in 0..4 {
                out.cols[c][r] = self.cols[r][c];
            }
        }
        out
    }

    pub fn transform_point(&self, p: Vec3) -> Vec4 {
        *self * Vec4::new(p.x, p.y, p.z, 1.0)
    }

    /// View matrix for a right-handed camera at `eye` looking at `target`.
    ///
    /// Rows 0..3 hold the camera basis (right, true up, backward); the
    /// translation column moves `eye` to the origin.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let forward = (eye - target).normalized();
        let right = up.cross(forward).normalized();
        let true_up = forward.cross(right);

        #[rustfmt::skip]
        let view = Self::new(
            right.x,   right.y,   right.z,   -right.dot(eye),
            true_up.x, true_up.y, true_up.z, -true_up.dot(eye),
            forward.x, forward.y, forward.z, -forward.dot(eye),
            0.0,       0.0,       0.0,       1.0,
        );
        view
    }

    /// OpenGL-style perspective projection from a horizontal field of view.
    ///
    /// The camera looks down -z; depth maps to [-1, 1] in NDC.
    pub fn perspective(fov_x_degrees: f32, aspect: f32, z_near: f32, z_far: f32) -> Self {
        let half_angle = fov_x_degrees.to_radians() * 0.5;
        let tangent = half_angle.tan();
        let right = z_near * tangent;
        let top = right / aspect;

        let mut m = Self::from_cols_array_2d([[0.0; 4]; 4]);
        m[(0, 0)] = z_near / right;
        m[(1, 1)] = z_near / top;
        m[(2, 2)] = (z_far + z_near) / (z_near - z_far);
        m[(2, 3)] = -1.0;
        m[(3, 2)] = 2.0 * z_far * z_near / (z_near - z_far);
        m
    }

    pub fn translation(dx: f32, dy: f32, dz: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[3][0] = dx;
        m.cols[3][1] = dy;
        m.cols[3][2] = dz;
        m
    }

    pub fn scale(sx: f32, sy: f32, sz: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[0][0] = sx;
        m.cols[1][1] = sy;
        m.cols[2][2] = sz;
        m
    }

    pub fn rotation_x(degrees: f32) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        #[rustfmt::skip]
        let m = Self::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,   -s,  0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        m
    }

    pub fn rotation_y(degrees: f32) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        #[rustfmt::skip]
        let m = Self::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
            -s,  0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        m
    }

    pub fn rotation_z(degrees: f32) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        #[rustfmt::skip]
        let m = Self::new(
            c,   -s,  0.0, 0.0,
            s,   c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        m
    }

    /// Post-multiplies a translation: `self = self * T`.
    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) -> &mut Self {
        *self = *self * Self::translation(dx, dy, dz);
        self
    }

    pub fn rotate_x(&mut self, degrees: f32) -> &mut Self {
        *self = *self * Self::rotation_x(degrees);
        self
    }

    pub fn rotate_y(&mut self, degrees: f32) -> &mut Self {
        *self = *self * Self::rotation_y(degrees);
        self
    }

    pub fn rotate_z(&mut self, degrees: f32) -> &mut Self {
        *self = *self * Self::rotation_z(degrees);
        self
    }
}

impl Index<(usize, usize)> for Mat4 {
    type Output = f32;

    fn index(&self, (col, row): (usize, usize)) -> &f32 {
        &self.cols[col][row]
    }
}

impl IndexMut<(usize, usize)> for Mat4 {
    fn index_mut(&mut self, (col, row): (usize, usize)) -> &mut f32 {
        &mut self.cols[col][row]
    }
}

impl Mul for Mat4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut out = [[0.0; 4]; 4];
        for (c, out_col) in out.iter_mut().enumerate() {
            for (r, cell) in out_col.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.cols[k][r] * rhs.cols[c][k]).sum();
            }
        }
        Self { cols: out }
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Vec4 {
        let c = &self.cols;
        let row = |r: usize| c[0][r] * v.x + c[1][r] * v.y + c[2][r] * v.z + c[3][r] * v.w;
        Vec4::new(row(0), row(1), row(2), row(3))
    }
}

impl From<Mat4> for Matrix4<f32> {
    fn from(m: Mat4) -> Self {
        Matrix4::from_column_slice(&m.as_array())
    }
}

impl From<Matrix4<f32>> for Mat4 {
    fn from(m: Matrix4<f32>) -> Self {
        let mut out = Mat4::IDENTITY;
        for c in 0..4 {
            for r in 0..4 {
                out.cols[c][r] = m[(r, c)];
            }
        }
        out
    }
}
