//! Bivectors (Lie-algebra elements) and their exponentials (motors).
//!
//! A [`Bivector`] carries six scalars: a *spin* triple generating rotations
//! (planes xy, zx, yz) and a *flux* triple generating translations (along x,
//! y, z). The spin block is skew-symmetric in every geometry. The flux block
//! couples a spatial axis `a` to the homogeneous axis `w` as
//! `m[a][w] = f`, `m[w][a] = −κ·f`, so it is a rotation generator for κ = +1,
//! a boost for κ = −1, and a nilpotent shear (plain translation) for κ = 0.

use super::matrix::{Isometry, Matrix4};
use super::Signature;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// Number of series terms used by [`Bivector::exp`].
pub const EXP_SERIES_ORDER: usize = 24;

/// Infinitesimal isometry generator.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bivector {
    /// Rotational components `(i, j, k)` for planes xy, zx, yz.
    pub spin: [f64; 3],
    /// Translational components `(X, Y, Z)`.
    pub flux: [f64; 3],
}

impl Bivector {
    /// The zero bivector; exponentiates to the identity.
    pub const ZERO: Bivector = Bivector {
        spin: [0.0; 3],
        flux: [0.0; 3],
    };

    /// Creates a bivector from all six components.
    pub const fn new(i: f64, j: f64, k: f64, x: f64, y: f64, z: f64) -> Self {
        Self {
            spin: [i, j, k],
            flux: [x, y, z],
        }
    }

    /// Pure rotation generator.
    pub const fn spin(i: f64, j: f64, k: f64) -> Self {
        Self::new(i, j, k, 0.0, 0.0, 0.0)
    }

    /// Pure translation generator.
    pub const fn flux(x: f64, y: f64, z: f64) -> Self {
        Self::new(0.0, 0.0, 0.0, x, y, z)
    }

    /// Rotation generator in the xy-plane, scaled by `s`.
    pub const fn e_i(s: f64) -> Self {
        Self::spin(s, 0.0, 0.0)
    }

    /// Rotation generator in the zx-plane, scaled by `s`.
    pub const fn e_j(s: f64) -> Self {
        Self::spin(0.0, s, 0.0)
    }

    /// Rotation generator in the yz-plane, scaled by `s`.
    pub const fn e_k(s: f64) -> Self {
        Self::spin(0.0, 0.0, s)
    }

    /// Translation generator along x, scaled by `s`.
    pub const fn e_x(s: f64) -> Self {
        Self::flux(s, 0.0, 0.0)
    }

    /// Translation generator along y, scaled by `s`.
    pub const fn e_y(s: f64) -> Self {
        Self::flux(0.0, s, 0.0)
    }

    /// Translation generator along z, scaled by `s`.
    pub const fn e_z(s: f64) -> Self {
        Self::flux(0.0, 0.0, s)
    }

    /// Scales spin and flux independently.
    pub fn scale_parts(&self, spin: f64, flux: f64) -> Self {
        Self {
            spin: self.spin.map(|c| c * spin),
            flux: self.flux.map(|c| c * flux),
        }
    }

    /// Linear interpolation `(1 − t)·self + t·other`.
    pub fn lerp(&self, other: &Bivector, t: f64) -> Self {
        *self * (1.0 - t) + *other * t
    }

    /// Matrix form of the generator in the given geometry.
    pub fn generator(&self, sig: Signature) -> Matrix4 {
        let [i, j, k] = self.spin;
        let [x, y, z] = self.flux;
        let kappa = sig.curvature();
        let mut m = [[0.0; 4]; 4];

        // spin: skew-symmetric for every signature
        m[1][0] = i;
        m[0][1] = -i;
        m[0][2] = j;
        m[2][0] = -j;
        m[2][1] = k;
        m[1][2] = -k;

        for (a, f) in [x, y, z].into_iter().enumerate() {
            m[a][3] = f;
            m[3][a] = -kappa * f;
        }
        Matrix4(m)
    }

    /// Motor `exp(B)` with [`EXP_SERIES_ORDER`] series terms.
    pub fn exp(&self, sig: Signature) -> Isometry {
        self.exp_with_order(sig, EXP_SERIES_ORDER)
    }

    /// Motor `exp(B)` truncated after `order` series terms.
    pub fn exp_with_order(&self, sig: Signature, order: usize) -> Isometry {
        self.generator(sig).exp_series(order)
    }
}

impl Add for Bivector {
    type Output = Bivector;
    fn add(self, rhs: Bivector) -> Bivector {
        Bivector {
            spin: std::array::from_fn(|n| self.spin[n] + rhs.spin[n]),
            flux: std::array::from_fn(|n| self.flux[n] + rhs.flux[n]),
        }
    }
}

impl Sub for Bivector {
    type Output = Bivector;
    fn sub(self, rhs: Bivector) -> Bivector {
        self + (-rhs)
    }
}

impl Neg for Bivector {
    type Output = Bivector;
    fn neg(self) -> Bivector {
        self * -1.0
    }
}

impl Mul<f64> for Bivector {
    type Output = Bivector;
    fn mul(self, s: f64) -> Bivector {
        self.scale_parts(s, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vector4;

    fn thetas() -> impl Iterator<Item = f64> {
        [-3.99, -3.0, -1.25, -0.5, 0.0, 0.3, 1.0, 2.2, 3.5, 3.99].into_iter()
    }

    #[test]
    fn hyperbolic_spin_exp_matches_closed_form() {
        let sig = Signature::Hyperbolic;
        for t in thetas() {
            let cases = [
                (Bivector::e_i(t), Matrix4::rot_i(t)),
                (Bivector::e_j(t), Matrix4::rot_j(t)),
                (Bivector::e_k(t), Matrix4::rot_k(t)),
            ];
            for (b, closed) in cases {
                let err = b.exp(sig).max_abs_diff(&closed);
                assert!(err < 1e-9, "θ = {t}: error {err}");
            }
        }
    }

    #[test]
    fn flux_exp_matches_closed_form_every_signature() {
        for sig in Signature::ALL {
            for t in [-2.0, -0.7, 0.0, 0.4, 1.5, 2.0] {
                let cases = [
                    (Bivector::e_x(t), Matrix4::mov_x(sig, t)),
                    (Bivector::e_y(t), Matrix4::mov_y(sig, t)),
                    (Bivector::e_z(t), Matrix4::mov_z(sig, t)),
                ];
                for (b, closed) in cases {
                    let err = b.exp(sig).max_abs_diff(&closed);
                    assert!(err < 1e-9, "{sig} θ = {t}: error {err}");
                }
            }
        }
    }

    #[test]
    fn flux_symmetry_follows_curvature() {
        let b = Bivector::flux(1.0, 2.0, 3.0);
        let sph = b.generator(Signature::Spherical);
        let hyp = b.generator(Signature::Hyperbolic);
        let par = b.generator(Signature::Parabolic);
        assert_eq!(sph.transpose(), -sph);
        assert_eq!(hyp.transpose(), hyp);
        // nilpotent: exp is exactly I + X
        assert_eq!(par * par, Matrix4::ZERO);

        let spin = Bivector::spin(0.4, -0.2, 0.9);
        for sig in Signature::ALL {
            let g = spin.generator(sig);
            assert_eq!(g.transpose(), -g);
        }
    }

    #[test]
    fn motor_inverse_is_negated_bivector() {
        let b = Bivector::new(0.3, -0.8, 0.5, 0.6, 0.1, -0.4);
        for sig in Signature::ALL {
            let m = b.exp(sig) * (-b).exp(sig);
            assert!(m.approx_eq(&Matrix4::IDENTITY, 1e-9), "{sig}");
        }
    }

    #[test]
    fn motors_preserve_inner_product() {
        let b = Bivector::new(0.2, 0.5, -0.3, -0.7, 0.4, 0.25);
        let u = Vector4::new(0.1, 0.2, -0.3, 1.0);
        let v = Vector4::new(-0.5, 0.0, 0.4, 1.2);
        for sig in [Signature::Spherical, Signature::Hyperbolic] {
            let m = b.exp(sig);
            let before = u.inner(&v, sig);
            let after = (m * u).inner(&(m * v), sig);
            assert!((before - after).abs() < 1e-9, "{sig}");
        }
    }

    #[test]
    fn parabolic_flux_translates_points() {
        let m = Bivector::flux(1.0, -2.0, 0.5).exp(Signature::Parabolic);
        let p = m * Vector4::ORIGIN;
        assert!(p.approx_eq(&Vector4::new(1.0, -2.0, 0.5, 1.0), 1e-12));
    }

    #[test]
    fn zero_exponentiates_to_identity() {
        assert_eq!(Bivector::ZERO.exp(Signature::Hyperbolic), Matrix4::IDENTITY);
        assert_eq!(
            Bivector::e_i(1.0).exp_with_order(Signature::Spherical, 1),
            Matrix4::IDENTITY
        );
    }

    #[test]
    fn arithmetic() {
        let a = Bivector::e_i(1.0);
        let b = Bivector::e_x(2.0);
        assert_eq!(a + b, Bivector::new(1.0, 0.0, 0.0, 2.0, 0.0, 0.0));
        assert_eq!((a + b) - b, a);
        assert_eq!(a.lerp(&b, 0.5), Bivector::new(0.5, 0.0, 0.0, 1.0, 0.0, 0.0));
        assert_eq!(b.scale_parts(10.0, 0.5), Bivector::e_x(1.0));
    }
}
