//! Homogeneous 4×4 matrices and 4-vectors over a curvature signature.
//!
//! Matrices are row-major and act on column vectors (`v' = M·v`). The fourth
//! coordinate `w` is the homogeneous one; the signature-weighted inner
//! product is `⟨u, v⟩ = u_x v_x + u_y v_y + u_z v_z + κ·u_w v_w`.

use super::{GeometryError, Signature};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// Below this magnitude a hyperplane normal is considered null.
const NULL_NORM: f64 = 1e-12;

/// A point, direction or hyperplane in homogeneous coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector4(pub [f64; 4]);

impl Vector4 {
    /// The origin `(0, 0, 0, 1)`.
    pub const ORIGIN: Vector4 = Vector4([0.0, 0.0, 0.0, 1.0]);

    /// Creates a vector from its components.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self([x, y, z, w])
    }

    /// Unit vector along axis `i` (0 = x … 3 = w), scaled by `s`.
    pub fn axis(i: usize, s: f64) -> Self {
        let mut v = [0.0; 4];
        v[i % 4] = s;
        Self(v)
    }

    /// Signature-weighted inner product.
    #[inline]
    pub fn inner(&self, other: &Vector4, sig: Signature) -> f64 {
        let [a, b] = [self.0, other.0];
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + sig.curvature() * a[3] * b[3]
    }

    /// Signature-weighted outer product `(a ⊗ b)·G`, i.e. `m[i][j] = a_i b_j g_j`.
    pub fn outer(&self, other: &Vector4, sig: Signature) -> Matrix4 {
        let g = [1.0, 1.0, 1.0, sig.curvature()];
        let mut m = [[0.0; 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.0[i] * other.0[j] * g[j];
            }
        }
        Matrix4(m)
    }

    /// Scale-invariant quadrance `⟨a,b⟩² / (⟨a,a⟩⟨b,b⟩)`.
    pub fn quadrance(&self, other: &Vector4, sig: Signature) -> f64 {
        let ab = self.inner(other, sig);
        ab * ab / (self.inner(self, sig) * other.inner(other, sig))
    }

    /// Geodesic distance between two points.
    ///
    /// Spherical distances are elliptic (antipodes coincide). Undefined in
    /// parabolic geometry, where `cos_inv` has no meaning.
    pub fn distance(&self, other: &Vector4, sig: Signature) -> Result<f64, GeometryError> {
        sig.cos_inv(self.quadrance(other, sig).abs().sqrt())
    }

    /// Rescales to unit signature-weighted magnitude.
    pub fn normalized(&self, sig: Signature) -> Vector4 {
        let n = self.inner(self, sig).abs().sqrt();
        self.scale(1.0 / n)
    }

    /// Multiplies every component by `s`.
    #[inline]
    pub fn scale(&self, s: f64) -> Vector4 {
        Vector4(self.0.map(|c| c * s))
    }

    /// Component-wise comparison within `eps`.
    pub fn approx_eq(&self, other: &Vector4, eps: f64) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| (a - b).abs() <= eps)
    }
}

impl Add for Vector4 {
    type Output = Vector4;
    fn add(self, rhs: Vector4) -> Vector4 {
        Vector4(std::array::from_fn(|i| self.0[i] + rhs.0[i]))
    }
}

impl Sub for Vector4 {
    type Output = Vector4;
    fn sub(self, rhs: Vector4) -> Vector4 {
        Vector4(std::array::from_fn(|i| self.0[i] - rhs.0[i]))
    }
}

/// A 4×4 row-major matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matrix4(pub [[f64; 4]; 4]);

/// An isometry (motor, reflection or product thereof) of the ambient geometry.
pub type Isometry = Matrix4;

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4 {
    /// The identity transform.
    pub const IDENTITY: Matrix4 = Matrix4([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    /// The zero matrix.
    pub const ZERO: Matrix4 = Matrix4([[0.0; 4]; 4]);

    /// Diagonal matrix.
    pub const fn diagonal(d: [f64; 4]) -> Self {
        Self([
            [d[0], 0.0, 0.0, 0.0],
            [0.0, d[1], 0.0, 0.0],
            [0.0, 0.0, d[2], 0.0],
            [0.0, 0.0, 0.0, d[3]],
        ])
    }

    /// Entry at row `r`, column `c`.
    #[inline]
    pub fn get(&self, r: usize, c: usize) -> f64 {
        self.0[r][c]
    }

    /// Transpose.
    pub fn transpose(&self) -> Matrix4 {
        Matrix4(std::array::from_fn(|r| std::array::from_fn(|c| self.0[c][r])))
    }

    /// Sum of the diagonal.
    pub fn trace(&self) -> f64 {
        (0..4).map(|i| self.0[i][i]).sum()
    }

    /// Multiplies every entry by `s`.
    pub fn scale(&self, s: f64) -> Matrix4 {
        Matrix4(self.0.map(|row| row.map(|c| c * s)))
    }

    /// Largest absolute entry-wise difference.
    pub fn max_abs_diff(&self, other: &Matrix4) -> f64 {
        let mut max = 0.0f64;
        for r in 0..4 {
            for c in 0..4 {
                max = max.max((self.0[r][c] - other.0[r][c]).abs());
            }
        }
        max
    }

    /// Entry-wise comparison within `eps`.
    pub fn approx_eq(&self, other: &Matrix4, eps: f64) -> bool {
        self.max_abs_diff(other) <= eps
    }

    /// Column-major flattening, the layout GPU uniform buffers expect.
    pub fn to_column_major(&self) -> [f64; 16] {
        std::array::from_fn(|i| self.0[i % 4][i / 4])
    }

    /// Truncated Maclaurin series `Σ_{k=0}^{order-1} Mᵏ / k!`.
    ///
    /// The same code path serves every signature; no closed form is assumed.
    pub fn exp_series(&self, order: usize) -> Matrix4 {
        let mut sum = Matrix4::IDENTITY;
        let mut term = Matrix4::IDENTITY;
        for k in 1..order {
            term = (term * *self).scale(1.0 / k as f64);
            sum = sum + term;
        }
        sum
    }

    /// Rotation by `t` in the xy-plane (spin axis `i`).
    pub fn rot_i(t: f64) -> Matrix4 {
        let (c, s) = Signature::Spherical.exp(t);
        Matrix4([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation by `t` in the zx-plane (spin axis `j`).
    pub fn rot_j(t: f64) -> Matrix4 {
        let (c, s) = Signature::Spherical.exp(t);
        Matrix4([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation by `t` in the yz-plane (spin axis `k`).
    pub fn rot_k(t: f64) -> Matrix4 {
        let (c, s) = Signature::Spherical.exp(t);
        Matrix4([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Translation by `t` along x.
    pub fn mov_x(sig: Signature, t: f64) -> Matrix4 {
        Self::mov_axis(sig, 0, t)
    }

    /// Translation by `t` along y.
    pub fn mov_y(sig: Signature, t: f64) -> Matrix4 {
        Self::mov_axis(sig, 1, t)
    }

    /// Translation by `t` along z.
    pub fn mov_z(sig: Signature, t: f64) -> Matrix4 {
        Self::mov_axis(sig, 2, t)
    }

    // Closed form of exp(t·E_a): the (a, w) block is [[C, S], [-κS, C]].
    fn mov_axis(sig: Signature, a: usize, t: f64) -> Matrix4 {
        let (c, s) = sig.exp(t);
        let mut m = Matrix4::IDENTITY;
        m.0[a][a] = c;
        m.0[3][3] = c;
        m.0[a][3] = s;
        m.0[3][a] = -sig.curvature() * s;
        m
    }

    /// Euler composite `rot_i(t0)·rot_j(t1)·rot_k(t2)`.
    pub fn euler(t0: f64, t1: f64, t2: f64) -> Matrix4 {
        Self::rot_i(t0) * Self::rot_j(t1) * Self::rot_k(t2)
    }

    /// Transport composite `mov_x(t0)·mov_y(t1)·mov_z(t2)`.
    pub fn transport(sig: Signature, t0: f64, t1: f64, t2: f64) -> Matrix4 {
        Self::mov_x(sig, t0) * Self::mov_y(sig, t1) * Self::mov_z(sig, t2)
    }

    /// Reflection across the hyperplane with normal `n`:
    /// `I − 2·(n ⊗ n)·G / ⟨n, n⟩`.
    pub fn reflect(sig: Signature, n: &Vector4) -> Result<Isometry, GeometryError> {
        let nn = n.inner(n, sig);
        if nn.abs() < NULL_NORM {
            return Err(GeometryError::DegenerateNormal(sig));
        }
        Ok(Matrix4::IDENTITY - n.outer(n, sig).scale(2.0 / nn))
    }

    /// Orthogonal projection onto the hyperplane with normal `n`.
    pub fn project(sig: Signature, n: &Vector4) -> Result<Matrix4, GeometryError> {
        let nn = n.inner(n, sig);
        if nn.abs() < NULL_NORM {
            return Err(GeometryError::DegenerateNormal(sig));
        }
        Ok(Matrix4::IDENTITY - n.outer(n, sig).scale(1.0 / nn))
    }

    /// Mirror in the xy-plane (flips z).
    pub const fn mirror_xy() -> Matrix4 {
        Self::diagonal([1.0, 1.0, -1.0, 1.0])
    }

    /// Mirror in the zx-plane (flips y).
    pub const fn mirror_zx() -> Matrix4 {
        Self::diagonal([1.0, -1.0, 1.0, 1.0])
    }

    /// Mirror in the yz-plane (flips x).
    pub const fn mirror_yz() -> Matrix4 {
        Self::diagonal([-1.0, 1.0, 1.0, 1.0])
    }
}

impl Add for Matrix4 {
    type Output = Matrix4;
    fn add(self, rhs: Matrix4) -> Matrix4 {
        Matrix4(std::array::from_fn(|r| {
            std::array::from_fn(|c| self.0[r][c] + rhs.0[r][c])
        }))
    }
}

impl Sub for Matrix4 {
    type Output = Matrix4;
    fn sub(self, rhs: Matrix4) -> Matrix4 {
        Matrix4(std::array::from_fn(|r| {
            std::array::from_fn(|c| self.0[r][c] - rhs.0[r][c])
        }))
    }
}

impl Neg for Matrix4 {
    type Output = Matrix4;
    fn neg(self) -> Matrix4 {
        self.scale(-1.0)
    }
}

impl Mul for Matrix4 {
    type Output = Matrix4;
    fn mul(self, rhs: Matrix4) -> Matrix4 {
        let mut out = [[0.0; 4]; 4];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.0[r][k] * rhs.0[k][c]).sum();
            }
        }
        Matrix4(out)
    }
}

impl Mul<Vector4> for Matrix4 {
    type Output = Vector4;
    fn mul(self, v: Vector4) -> Vector4 {
        Vector4(std::array::from_fn(|r| {
            (0..4).map(|k| self.0[r][k] * v.0[k]).sum()
        }))
    }
}

impl std::iter::Product for Matrix4 {
    fn product<I: Iterator<Item = Matrix4>>(iter: I) -> Matrix4 {
        iter.fold(Matrix4::IDENTITY, |acc, m| acc * m)
    }
}

impl<'a> std::iter::Product<&'a Matrix4> for Matrix4 {
    fn product<I: Iterator<Item = &'a Matrix4>>(iter: I) -> Matrix4 {
        iter.fold(Matrix4::IDENTITY, |acc, m| acc * *m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn identity_is_neutral() {
        let m = Matrix4::euler(0.3, -1.2, 2.0);
        assert_eq!(m * Matrix4::IDENTITY, m);
        assert_eq!(Matrix4::IDENTITY * m, m);
    }

    #[test]
    fn rotations_are_orthogonal() {
        for m in [Matrix4::rot_i(0.9), Matrix4::rot_j(-2.1), Matrix4::rot_k(3.3)] {
            assert!((m * m.transpose()).approx_eq(&Matrix4::IDENTITY, EPS));
        }
        let v = Matrix4::rot_i(std::f64::consts::FRAC_PI_2) * Vector4::axis(0, 1.0);
        assert!(v.approx_eq(&Vector4::axis(1, 1.0), EPS));
    }

    #[test]
    fn translations_move_origin_along_axis() {
        let p = Matrix4::mov_x(Signature::Parabolic, 2.5) * Vector4::ORIGIN;
        assert_eq!(p, Vector4::new(2.5, 0.0, 0.0, 1.0));

        let q = Matrix4::mov_y(Signature::Hyperbolic, 1.0) * Vector4::ORIGIN;
        assert!((q.0[1] - 1f64.sinh()).abs() < EPS);
        assert!((q.0[3] - 1f64.cosh()).abs() < EPS);
    }

    #[test]
    fn hyperbolic_translation_realizes_distance() {
        let sig = Signature::Hyperbolic;
        let p = Matrix4::mov_z(sig, 0.75) * Vector4::ORIGIN;
        let d = Vector4::ORIGIN.distance(&p, sig).unwrap();
        assert!((d - 0.75).abs() < 1e-9);
    }

    #[test]
    fn reflection_squares_to_identity_every_signature() {
        let normals = [
            Vector4::new(1.0, 0.0, 0.0, 0.0),
            Vector4::new(0.3, -0.4, 0.8, 0.2),
            Vector4::new(0.0, 2.0, 1.0, 0.5),
        ];
        for sig in Signature::ALL {
            for n in &normals {
                let r = Matrix4::reflect(sig, n).unwrap();
                assert!((r * r).approx_eq(&Matrix4::IDENTITY, 1e-12), "{sig}: {n:?}");
                // the normal itself is negated
                assert!((r * *n).approx_eq(&n.scale(-1.0), 1e-12));
            }
        }
    }

    #[test]
    fn axis_reflection_matches_mirror() {
        for sig in Signature::ALL {
            let r = Matrix4::reflect(sig, &Vector4::axis(2, 3.0)).unwrap();
            assert!(r.approx_eq(&Matrix4::mirror_xy(), EPS));
            let r = Matrix4::reflect(sig, &Vector4::axis(0, 1.0)).unwrap();
            assert!(r.approx_eq(&Matrix4::mirror_yz(), EPS));
        }
    }

    #[test]
    fn null_normal_is_rejected() {
        let n = Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(
            Matrix4::reflect(Signature::Parabolic, &n),
            Err(GeometryError::DegenerateNormal(Signature::Parabolic))
        );
        let light = Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!(Matrix4::reflect(Signature::Hyperbolic, &light).is_err());
    }

    #[test]
    fn projection_is_idempotent() {
        let sig = Signature::Spherical;
        let p = Matrix4::project(sig, &Vector4::new(1.0, 1.0, 0.0, 0.0)).unwrap();
        assert!((p * p).approx_eq(&p, EPS));
    }

    #[test]
    fn column_major_layout() {
        let m = Matrix4::mov_x(Signature::Parabolic, 4.0);
        let flat = m.to_column_major();
        // translation lives in the last column
        assert_eq!(flat[12], 4.0);
        assert_eq!(flat[3], 0.0);
    }

    #[test]
    fn product_of_iterator() {
        let ms = [Matrix4::rot_i(0.2), Matrix4::rot_i(0.3)];
        let p: Matrix4 = ms.iter().product();
        assert!(p.approx_eq(&Matrix4::rot_i(0.5), EPS));
        let empty: [Matrix4; 0] = [];
        assert_eq!(empty.iter().product::<Matrix4>(), Matrix4::IDENTITY);
    }
}
