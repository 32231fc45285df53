//! Matrix algebra for corrective transforms.
//!
//! [`Matrix4`] stores a 4x4 matrix in column-major order, the layout used by
//! CSS `matrix3d()` and DOM matrices: the element at row `r`, column `c` lives
//! at index `c * 4 + r`, so the 2-D translation sits at indices 12 and 13.
//!
//! [`Matrix2d`] is the compact six-value affine form written to inline styles.
//! Dropping the 3-D components avoids compositing artifacts when opacity is
//! tweened at the same time.

use std::fmt;
use std::str::FromStr;

use crate::error::{ParseError, Result};

/// Floor for scale-ratio divisors so collapsed elements never divide by zero.
pub const SCALE_EPSILON: f32 = 0.0001;

/// A 4x4 transformation matrix stored in column-major order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix4 {
    pub data: [f32; 16],
}

impl Matrix4 {
    /// Identity matrix (no transformation)
    pub const IDENTITY: Self = Self {
        data: [
            1.0, 0.0, 0.0, 0.0, // column 0
            0.0, 1.0, 0.0, 0.0, // column 1
            0.0, 0.0, 1.0, 0.0, // column 2
            0.0, 0.0, 0.0, 1.0, // column 3
        ],
    };

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Parse a computed or inline CSS transform.
    ///
    /// Absent (`""`, `"none"`) and unparsable values both yield the identity;
    /// the latter is logged.
    pub fn parse(css: &str) -> Self {
        match parse_transform(css) {
            Ok(matrix) => matrix,
            Err(err) => {
                log::warn!("Ignoring transform {:?}: {}", css, err);
                Self::IDENTITY
            }
        }
    }

    pub fn translate(x: f32, y: f32) -> Self {
        Self::translate_3d(x, y, 0.0)
    }

    pub fn translate_3d(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.data[12] = x;
        m.data[13] = y;
        m.data[14] = z;
        m
    }

    pub fn translate_x(px: f32) -> Self {
        Self::translate(px, 0.0)
    }

    pub fn translate_y(px: f32) -> Self {
        Self::translate(0.0, px)
    }

    pub fn scale_xy(sx: f32, sy: f32) -> Self {
        Self::scale_3d(sx, sy, 1.0)
    }

    pub fn scale_3d(sx: f32, sy: f32, sz: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.data[0] = sx;
        m.data[5] = sy;
        m.data[10] = sz;
        m
    }

    pub fn scale_x(factor: f32) -> Self {
        Self::scale_xy(factor, 1.0)
    }

    pub fn scale_y(factor: f32) -> Self {
        Self::scale_xy(1.0, factor)
    }

    /// Matrix product `self × other`.
    ///
    /// Applied to a point, `other` acts first, then `self`. This matches the
    /// left-to-right reading of a CSS transform list.
    pub fn multiply(&self, other: &Matrix4) -> Matrix4 {
        let a = &self.data;
        let b = &other.data;
        let mut result = [0.0f32; 16];

        for col in 0..4 {
            for row in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += a[k * 4 + row] * b[col * 4 + k];
                }
                result[col * 4 + row] = sum;
            }
        }

        Matrix4 { data: result }
    }

    /// Left fold of [`Matrix4::multiply`] over a list. An empty list is the
    /// identity.
    pub fn product<'a>(matrices: impl IntoIterator<Item = &'a Matrix4>) -> Matrix4 {
        matrices
            .into_iter()
            .fold(Self::IDENTITY, |acc, m| acc.multiply(m))
    }

    /// Inverse of the 2-D affine part. Degenerate matrices invert to the
    /// identity.
    pub fn inverse_2d(&self) -> Matrix4 {
        let m = self.to_compact_2d();
        let det = m.a * m.d - m.b * m.c;

        if det.abs() < 1e-10 {
            return Self::IDENTITY;
        }

        let inv_det = 1.0 / det;
        Matrix2d {
            a: m.d * inv_det,
            b: -m.b * inv_det,
            c: -m.c * inv_det,
            d: m.a * inv_det,
            e: (m.c * m.f - m.d * m.e) * inv_det,
            f: (m.b * m.e - m.a * m.f) * inv_det,
        }
        .to_matrix4()
    }

    /// Transform a 2D point by this matrix
    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        let d = &self.data;
        (d[0] * x + d[4] * y + d[12], d[1] * x + d[5] * y + d[13])
    }

    /// Keep only the six entries a 2-D affine transform needs: indices
    /// 0, 1, 4, 5, 12 and 13.
    pub fn to_compact_2d(&self) -> Matrix2d {
        let d = &self.data;
        Matrix2d {
            a: d[0],
            b: d[1],
            c: d[4],
            d: d[5],
            e: d[12],
            f: d[13],
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn approx_eq(&self, other: &Matrix4, tolerance: f32) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A 2-D affine transform in CSS `matrix(a, b, c, d, e, f)` form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix2d {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Matrix2d {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn scale_x(&self) -> f32 {
        self.a
    }

    pub fn scale_y(&self) -> f32 {
        self.d
    }

    pub fn translate_x(&self) -> f32 {
        self.e
    }

    pub fn translate_y(&self) -> f32 {
        self.f
    }

    pub fn to_matrix4(&self) -> Matrix4 {
        let mut m = Matrix4::IDENTITY;
        m.data[0] = self.a;
        m.data[1] = self.b;
        m.data[4] = self.c;
        m.data[5] = self.d;
        m.data[12] = self.e;
        m.data[13] = self.f;
        m
    }

    pub fn values(&self) -> [f32; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    pub fn from_values(v: [f32; 6]) -> Self {
        Self {
            a: v[0],
            b: v[1],
            c: v[2],
            d: v[3],
            e: v[4],
            f: v[5],
        }
    }
}

impl Default for Matrix2d {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// Avoid printing "-0" in style strings
fn clean(v: f32) -> f32 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

impl fmt::Display for Matrix2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "matrix({}, {}, {}, {}, {}, {})",
            clean(self.a),
            clean(self.b),
            clean(self.c),
            clean(self.d),
            clean(self.e),
            clean(self.f)
        )
    }
}

impl FromStr for Matrix2d {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        parse_transform(s).map(|m| m.to_compact_2d())
    }
}

/// Parse a CSS transform list into a single matrix.
///
/// Supports `matrix`, `matrix3d`, `translate`, `translateX`, `translateY`,
/// `translate3d`, `scale`, `scaleX`, `scaleY` and `scale3d`, composed left
/// to right.
pub fn parse_transform(css: &str) -> Result<Matrix4> {
    let mut rest = css.trim();
    if rest.is_empty() || rest == "none" {
        return Ok(Matrix4::IDENTITY);
    }

    let mut result = Matrix4::IDENTITY;
    while !rest.is_empty() {
        let open = rest
            .find('(')
            .ok_or_else(|| ParseError::Malformed(css.to_string()))?;
        let close = rest[open..]
            .find(')')
            .map(|i| open + i)
            .ok_or_else(|| ParseError::Malformed(css.to_string()))?;

        let name = rest[..open].trim();
        let args = parse_args(&rest[open + 1..close])?;
        result = result.multiply(&function_matrix(name, &args)?);

        rest = rest[close + 1..].trim_start();
    }

    Ok(result)
}

fn parse_args(args: &str) -> Result<Vec<f32>> {
    args.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(parse_number)
        .collect()
}

fn parse_number(token: &str) -> Result<f32> {
    let number = token.strip_suffix("px").unwrap_or(token);
    number
        .parse::<f32>()
        .map_err(|_| ParseError::Number(token.to_string()))
}

fn expect_args(name: &str, args: &[f32], allowed: &[usize]) -> Result<()> {
    if allowed.contains(&args.len()) {
        Ok(())
    } else {
        Err(ParseError::Arity {
            function: name.to_string(),
            expected: allowed[0],
            got: args.len(),
        })
    }
}

fn function_matrix(name: &str, args: &[f32]) -> Result<Matrix4> {
    match name {
        "matrix" => {
            expect_args(name, args, &[6])?;
            Ok(Matrix2d::from_values([
                args[0], args[1], args[2], args[3], args[4], args[5],
            ])
            .to_matrix4())
        }
        "matrix3d" => {
            expect_args(name, args, &[16])?;
            let mut data = [0.0f32; 16];
            data.copy_from_slice(args);
            Ok(Matrix4 { data })
        }
        "translate" => {
            expect_args(name, args, &[1, 2])?;
            Ok(Matrix4::translate(args[0], args.get(1).copied().unwrap_or(0.0)))
        }
        "translateX" => {
            expect_args(name, args, &[1])?;
            Ok(Matrix4::translate_x(args[0]))
        }
        "translateY" => {
            expect_args(name, args, &[1])?;
            Ok(Matrix4::translate_y(args[0]))
        }
        "translate3d" => {
            expect_args(name, args, &[3])?;
            Ok(Matrix4::translate_3d(args[0], args[1], args[2]))
        }
        "scale" => {
            expect_args(name, args, &[1, 2])?;
            let sy = args.get(1).copied().unwrap_or(args[0]);
            Ok(Matrix4::scale_xy(args[0], sy))
        }
        "scaleX" => {
            expect_args(name, args, &[1])?;
            Ok(Matrix4::scale_x(args[0]))
        }
        "scaleY" => {
            expect_args(name, args, &[1])?;
            Ok(Matrix4::scale_y(args[0]))
        }
        "scale3d" => {
            expect_args(name, args, &[3])?;
            Ok(Matrix4::scale_3d(args[0], args[1], args[2]))
        }
        other => Err(ParseError::UnknownFunction(other.to_string())),
    }
}
