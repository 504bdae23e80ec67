//! Curvature-generic trigonometry.
//!
//! A [`Signature`] selects one of the three constant-curvature geometries and
//! the matching function family:
//! - Spherical (curvature +1): circular `cos`, `sin`, `tan`.
//! - Hyperbolic (curvature −1): `cosh`, `sinh`, `tanh`.
//! - Parabolic (curvature 0): the flat limit, `cos ≡ 1`, `sin ≡ id`, `tan ≡ id`.
//!
//! The signature is an explicit value threaded through every algebra call.
//! There is no ambient "current geometry"; two signatures can be used side by
//! side in the same process.
//!
//! # Citations
//! - Coxeter, "Non-Euclidean Geometry" (1942) – unified trigonometry of constant curvature
//! - Ratcliffe, "Foundations of Hyperbolic Manifolds" (2006) – hyperboloid model

pub mod bivector;
pub mod matrix;

pub use bivector::{Bivector, EXP_SERIES_ORDER};
pub use matrix::{Isometry, Matrix4, Vector4};

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use std::f64::consts::PI;
use std::fmt;
use thiserror::Error;

/// Arguments this far outside an inverse function's domain are treated as
/// floating-point drift and clamped back onto the boundary.
pub const DOMAIN_TOLERANCE: f64 = 1e-9;

/// Error raised by curvature-generic numeric routines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Argument lies outside the valid domain of an inverse function.
    #[error("{function}({argument}) is outside the function's domain")]
    NumericDomain {
        /// Name of the offending function.
        function: &'static str,
        /// Raw argument.
        argument: f64,
    },
    /// Function has no meaning in the given geometry.
    #[error("{function} is undefined in {signature} geometry")]
    Undefined {
        /// Name of the offending function.
        function: &'static str,
        /// Geometry the call was made in.
        signature: Signature,
    },
    /// Hyperplane normal has (near) zero signature-weighted norm.
    #[error("hyperplane normal has zero norm under the {0} inner product")]
    DegenerateNormal(Signature),
}

/// Constant-curvature geometry selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signature {
    /// Positive curvature.
    Spherical,
    /// Negative curvature.
    Hyperbolic,
    /// Zero curvature (Euclidean).
    Parabolic,
}

impl Signature {
    /// All signatures, in curvature order +1, −1, 0.
    pub const ALL: [Signature; 3] = [
        Signature::Spherical,
        Signature::Hyperbolic,
        Signature::Parabolic,
    ];

    /// Returns the sectional curvature: +1, −1 or 0.
    #[inline]
    pub const fn curvature(self) -> f64 {
        match self {
            Signature::Spherical => 1.0,
            Signature::Hyperbolic => -1.0,
            Signature::Parabolic => 0.0,
        }
    }

    /// Selects a signature from the sign of `k`.
    pub fn from_curvature(k: f64) -> Self {
        if k > 0.0 {
            Signature::Spherical
        } else if k < 0.0 {
            Signature::Hyperbolic
        } else {
            Signature::Parabolic
        }
    }

    /// Returns the value matching this signature.
    #[inline]
    pub fn case<T>(self, sph: T, hyp: T, par: T) -> T {
        match self {
            Signature::Spherical => sph,
            Signature::Hyperbolic => hyp,
            Signature::Parabolic => par,
        }
    }

    /// Generalized cosine.
    #[inline]
    pub fn cos(self, x: f64) -> f64 {
        match self {
            Signature::Spherical => x.cos(),
            Signature::Hyperbolic => x.cosh(),
            Signature::Parabolic => 1.0,
        }
    }

    /// Generalized sine.
    #[inline]
    pub fn sin(self, x: f64) -> f64 {
        match self {
            Signature::Spherical => x.sin(),
            Signature::Hyperbolic => x.sinh(),
            Signature::Parabolic => x,
        }
    }

    /// Generalized tangent.
    #[inline]
    pub fn tan(self, x: f64) -> f64 {
        match self {
            Signature::Spherical => x.tan(),
            Signature::Hyperbolic => x.tanh(),
            Signature::Parabolic => x,
        }
    }

    /// Inverse of [`Signature::cos`].
    ///
    /// Spherical arguments are clamped into `[-1, 1]`, hyperbolic ones to
    /// `>= 1`, when they overshoot by at most [`DOMAIN_TOLERANCE`].
    pub fn cos_inv(self, x: f64) -> Result<f64, GeometryError> {
        match self {
            Signature::Spherical => Ok(clamp_domain("acos", x, -1.0, 1.0)?.acos()),
            Signature::Hyperbolic => Ok(clamp_domain("acosh", x, 1.0, f64::INFINITY)?.acosh()),
            Signature::Parabolic => Err(GeometryError::Undefined {
                function: "cos_inv",
                signature: self,
            }),
        }
    }

    /// Inverse of [`Signature::sin`].
    pub fn sin_inv(self, x: f64) -> Result<f64, GeometryError> {
        match self {
            Signature::Spherical => Ok(clamp_domain("asin", x, -1.0, 1.0)?.asin()),
            Signature::Hyperbolic => {
                Ok(clamp_domain("asinh", x, f64::NEG_INFINITY, f64::INFINITY)?.asinh())
            }
            Signature::Parabolic => {
                Ok(clamp_domain("sin_inv", x, f64::NEG_INFINITY, f64::INFINITY)?)
            }
        }
    }

    /// Inverse of [`Signature::tan`].
    ///
    /// The hyperbolic branch requires `|x| < 1`; no clamping is applied at
    /// `±1` since `atanh` diverges there.
    pub fn tan_inv(self, x: f64) -> Result<f64, GeometryError> {
        match self {
            Signature::Spherical => {
                Ok(clamp_domain("atan", x, f64::NEG_INFINITY, f64::INFINITY)?.atan())
            }
            Signature::Hyperbolic => {
                if x.is_nan() || x.abs() >= 1.0 {
                    return Err(GeometryError::NumericDomain {
                        function: "atanh",
                        argument: x,
                    });
                }
                Ok(x.atanh())
            }
            Signature::Parabolic => Err(GeometryError::Undefined {
                function: "tan_inv",
                signature: self,
            }),
        }
    }

    /// Returns `(cos x, sin x)` of this family.
    #[inline]
    pub fn exp(self, x: f64) -> (f64, f64) {
        (self.cos(x), self.sin(x))
    }

    /// Builds an oscillator `t ↦ (A·cos(ωt+φ), A·sin(ωt+φ))`.
    pub fn oscillator(self, amplitude: f64, frequency: f64, phase: f64) -> Oscillator {
        Oscillator {
            signature: self,
            amplitude,
            frequency,
            phase,
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signature::Spherical => write!(f, "spherical"),
            Signature::Hyperbolic => write!(f, "hyperbolic"),
            Signature::Parabolic => write!(f, "parabolic"),
        }
    }
}

/// Clamps `x` into `[lo, hi]` when it overshoots by at most
/// [`DOMAIN_TOLERANCE`]; rejects NaN and larger excursions.
fn clamp_domain(function: &'static str, x: f64, lo: f64, hi: f64) -> Result<f64, GeometryError> {
    if x.is_nan() || x < lo - DOMAIN_TOLERANCE || x > hi + DOMAIN_TOLERANCE {
        return Err(GeometryError::NumericDomain { function, argument: x });
    }
    if x < lo || x > hi {
        tracing::warn!(function, argument = x, "clamping drifted argument into domain");
        return Ok(x.clamp(lo, hi));
    }
    Ok(x)
}

/// Parametric motion along a generalized circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    /// Geometry whose function family drives the motion.
    pub signature: Signature,
    /// Amplitude `A`.
    pub amplitude: f64,
    /// Angular frequency `ω`.
    pub frequency: f64,
    /// Phase offset `φ`.
    pub phase: f64,
}

impl Oscillator {
    /// Evaluates the oscillator at time `t`.
    pub fn at(&self, t: f64) -> (f64, f64) {
        let (c, s) = self.signature.exp(self.frequency * t + self.phase);
        (self.amplitude * c, self.amplitude * s)
    }
}

/// Gudermannian function `gd(x) = atan(sinh x)`.
pub fn gudermannian(x: f64) -> f64 {
    x.sinh().atan()
}

/// Inverse Gudermannian (Lambertian) `lam(x) = asinh(tan x)`.
pub fn lambertian(x: f64) -> f64 {
    x.tan().asinh()
}

/// Hyperbolic angle of parallelism for a perpendicular distance `h`.
pub fn angle_of_parallelism(h: f64) -> f64 {
    FRAC_PI_2 - gudermannian(h)
}

/// Distance whose angle of parallelism is `t`.
pub fn altitude_of_parallelism(t: f64) -> f64 {
    lambertian(FRAC_PI_2 - t)
}

/// Spherical excess `a + b + c − π` of a triangle, snapped to zero within 1e-12.
pub fn angular_excess(a: f64, b: f64, c: f64) -> f64 {
    snap((a + b + c) - PI)
}

/// Hyperbolic defect `π − (a + b + c)` of a triangle, snapped to zero within 1e-12.
pub fn angular_defect(a: f64, b: f64, c: f64) -> f64 {
    snap(PI - (a + b + c))
}

fn snap(x: f64) -> f64 {
    if x.abs() < 1e-12 {
        0.0
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn families_match_signature() {
        let x = 0.7;
        assert!((Signature::Spherical.cos(x) - x.cos()).abs() < EPS);
        assert!((Signature::Hyperbolic.sin(x) - x.sinh()).abs() < EPS);
        assert_eq!(Signature::Parabolic.cos(x), 1.0);
        assert_eq!(Signature::Parabolic.sin(x), x);
        assert_eq!(Signature::Parabolic.tan(x), x);
    }

    #[test]
    fn pythagorean_identity_per_curvature() {
        // cos² + κ·sin² = 1
        for sig in Signature::ALL {
            for &x in &[-2.0, -0.3, 0.0, 0.5, 1.9] {
                let (c, s) = sig.exp(x);
                assert!((c * c + sig.curvature() * s * s - 1.0).abs() < 1e-9, "{sig} at {x}");
            }
        }
    }

    #[test]
    fn inverses_round_trip() {
        let sph = Signature::Spherical;
        let hyp = Signature::Hyperbolic;
        assert!((sph.cos_inv(sph.cos(1.1)).unwrap() - 1.1).abs() < 1e-12);
        assert!((hyp.cos_inv(hyp.cos(1.1)).unwrap() - 1.1).abs() < 1e-9);
        assert!((hyp.sin_inv(hyp.sin(-2.0)).unwrap() + 2.0).abs() < 1e-12);
        assert!((hyp.tan_inv(hyp.tan(0.4)).unwrap() - 0.4).abs() < 1e-12);
        assert_eq!(Signature::Parabolic.sin_inv(0.25), Ok(0.25));
    }

    #[test]
    fn drift_is_clamped() {
        assert_eq!(Signature::Spherical.cos_inv(1.0 + 1e-12), Ok(0.0));
        assert_eq!(Signature::Hyperbolic.cos_inv(1.0 - 1e-12), Ok(0.0));
        assert!((Signature::Spherical.sin_inv(-1.0 - 1e-11).unwrap() + FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn large_excursions_and_nan_are_errors() {
        assert!(matches!(
            Signature::Spherical.cos_inv(1.01),
            Err(GeometryError::NumericDomain { function: "acos", .. })
        ));
        assert!(matches!(
            Signature::Hyperbolic.cos_inv(0.5),
            Err(GeometryError::NumericDomain { function: "acosh", .. })
        ));
        assert!(Signature::Hyperbolic.tan_inv(1.0).is_err());
        assert!(Signature::Spherical.sin_inv(f64::NAN).is_err());
    }

    #[test]
    fn parabolic_inverses_are_undefined() {
        assert_eq!(
            Signature::Parabolic.cos_inv(1.0),
            Err(GeometryError::Undefined {
                function: "cos_inv",
                signature: Signature::Parabolic
            })
        );
        assert!(Signature::Parabolic.tan_inv(0.1).is_err());
    }

    #[test]
    fn oscillator_traces_generalized_circle() {
        let osc = Signature::Spherical.oscillator(2.0, 3.0, 0.5);
        let (x, y) = osc.at(0.25);
        assert!((x - 2.0 * (0.75f64 + 0.5).cos()).abs() < EPS);
        assert!((y - 2.0 * (0.75f64 + 0.5).sin()).abs() < EPS);
        assert!(((x * x + y * y).sqrt() - 2.0).abs() < 1e-12);

        let (x, y) = Signature::Parabolic.oscillator(1.0, 2.0, 0.0).at(3.0);
        assert_eq!((x, y), (1.0, 6.0));
    }

    #[test]
    fn gudermannian_pairs() {
        for &x in &[-1.3, 0.0, 0.2, 1.7] {
            assert!((lambertian(gudermannian(x)) - x).abs() < 1e-12);
        }
        assert!((angle_of_parallelism(0.0) - FRAC_PI_2).abs() < EPS);
        assert!((altitude_of_parallelism(angle_of_parallelism(0.8)) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn excess_and_defect() {
        assert_eq!(angular_excess(PI / 2.0, PI / 2.0, 0.0), 0.0);
        assert!((angular_excess(PI / 2.0, PI / 2.0, PI / 2.0) - PI / 2.0).abs() < EPS);
        // (7,3,2) triangle
        let d = angular_defect(PI / 7.0, PI / 3.0, PI / 2.0);
        assert!((d - PI / 42.0).abs() < EPS);
    }

    #[test]
    fn curvature_round_trip() {
        for sig in Signature::ALL {
            assert_eq!(Signature::from_curvature(sig.curvature()), sig);
        }
        assert_eq!(Signature::Hyperbolic.case(1, 2, 3), 2);
    }
}
