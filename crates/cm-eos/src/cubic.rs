//! Generalized cubic pressure relation and its volume roots.
//!
//! P = RT/(V − b) − θ/(V² + δV + ε)
//!
//! The relation is solved as a cubic in Z = PV/RT with closed-form roots
//! (Cardano for one real root, the trigonometric form for three), each
//! polished with a few Newton steps on the polynomial.

use crate::error::{EosError, EosResult};
use cm_core::constants::R;
use cm_core::{MolarVolume, ensure_positive, m3_per_mol, relative_difference};
use std::f64::consts::PI;
use tracing::{debug, warn};

/// Relative liquid/vapor gap under which a state counts as near-critical.
pub const DEFAULT_NEAR_CRITICAL_REL_TOL: f64 = 1e-6;

const NEWTON_POLISH_STEPS: usize = 3;

/// The (θ, b, δ, ε) parameterization of a cubic EOS at fixed composition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicForm {
    pub theta: f64,
    pub b: f64,
    pub delta: f64,
    pub epsilon: f64,
}

/// Coefficients of Z³ + c2·Z² + c1·Z + c0 = 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicCoefficients {
    pub c2: f64,
    pub c1: f64,
    pub c0: f64,
}

impl CubicCoefficients {
    #[inline]
    fn eval(&self, z: f64) -> f64 {
        ((z + self.c2) * z + self.c1) * z + self.c0
    }

    #[inline]
    fn slope(&self, z: f64) -> f64 {
        (3.0 * z + 2.0 * self.c2) * z + self.c1
    }

    /// Real roots, unsorted.
    pub fn real_roots(&self) -> Vec<f64> {
        let CubicCoefficients { c2, c1, c0 } = *self;
        let shift = c2 / 3.0;
        let p = c1 - c2 * c2 / 3.0;
        let q = 2.0 * c2 * c2 * c2 / 27.0 - c2 * c1 / 3.0 + c0;
        let disc = (q / 2.0).powi(2) + (p / 3.0).powi(3);

        let depressed = if disc > 0.0 {
            let sd = disc.sqrt();
            vec![(-q / 2.0 + sd).cbrt() + (-q / 2.0 - sd).cbrt()]
        } else if p == 0.0 {
            vec![(-q).cbrt()]
        } else {
            let r = 2.0 * (-p / 3.0).sqrt();
            let arg = (3.0 * q / (2.0 * p) * (-3.0 / p).sqrt()).clamp(-1.0, 1.0);
            let phi = arg.acos() / 3.0;
            (0..3)
                .map(|k| r * (phi - 2.0 * PI * k as f64 / 3.0).cos())
                .collect()
        };

        depressed
            .into_iter()
            .map(|t| self.polish(t - shift))
            .collect()
    }

    fn polish(&self, mut z: f64) -> f64 {
        for _ in 0..NEWTON_POLISH_STEPS {
            let d = self.slope(z);
            if d == 0.0 || !d.is_finite() {
                break;
            }
            let step = self.eval(z) / d;
            if !step.is_finite() {
                break;
            }
            z -= step;
        }
        z
    }
}

impl CubicForm {
    /// EOS pressure [Pa] at `temperature` [K] and molar volume `volume` [m³/mol].
    pub fn pressure(&self, temperature: f64, volume: f64) -> f64 {
        R * temperature / (volume - self.b)
            - self.theta / (volume * volume + self.delta * volume + self.epsilon)
    }

    /// Z-form cubic coefficients at (T, P).
    pub fn coefficients(&self, temperature: f64, pressure: f64) -> CubicCoefficients {
        let rt = R * temperature;
        let a = self.theta * pressure / (rt * rt);
        let b = self.b * pressure / rt;
        let d = self.delta * pressure / rt;
        let e = self.epsilon * (pressure / rt).powi(2);
        CubicCoefficients {
            c2: d - b - 1.0,
            c1: e - b * d - d + a,
            c0: -(b * e + e + a * b),
        }
    }

    /// Liquid and vapor volumes at (T, P) with the default near-critical tolerance.
    pub fn solve(&self, temperature: f64, pressure: f64) -> EosResult<CubicRoots> {
        self.solve_with_tolerance(temperature, pressure, DEFAULT_NEAR_CRITICAL_REL_TOL)
    }

    pub fn solve_with_tolerance(
        &self,
        temperature: f64,
        pressure: f64,
        near_critical_rel_tol: f64,
    ) -> EosResult<CubicRoots> {
        ensure_positive(temperature, "temperature")?;
        ensure_positive(pressure, "pressure")?;

        let scale = R * temperature / pressure;
        let mut volumes: Vec<f64> = self
            .coefficients(temperature, pressure)
            .real_roots()
            .into_iter()
            .map(|z| z * scale)
            .filter(|v| v.is_finite() && *v > 0.0 && *v > self.b)
            .collect();
        volumes.sort_by(f64::total_cmp);

        let (Some(&liquid), Some(&vapor)) = (volumes.first(), volumes.last()) else {
            return Err(EosError::NoPhysicalRoot {
                temperature,
                pressure,
            });
        };

        let near_critical = volumes.len() > 1 && relative_difference(vapor, liquid) < near_critical_rel_tol;
        if near_critical {
            warn!(temperature, pressure, liquid, vapor, "near-critical state");
        }
        debug!(
            temperature,
            pressure,
            roots = volumes.len(),
            liquid,
            vapor,
            "cubic roots classified"
        );

        Ok(CubicRoots {
            temperature,
            pressure,
            roots: volumes,
            liquid,
            vapor,
            near_critical,
        })
    }
}

/// Which root of the cubic a caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Liquid,
    Vapor,
}

/// Physical volume roots at one (T, P).
///
/// `roots` holds every root above the covolume in ascending order; the
/// unstable middle root of a three-root solution is kept there only for
/// inspection and is never returned as a phase volume.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicRoots {
    pub temperature: f64,
    pub pressure: f64,
    pub roots: Vec<f64>,
    liquid: f64,
    vapor: f64,
    pub near_critical: bool,
}

impl CubicRoots {
    /// Molar volume [m³/mol] of the requested phase.
    pub fn volume_m3(&self, phase: Phase) -> f64 {
        match phase {
            Phase::Liquid => self.liquid,
            Phase::Vapor => self.vapor,
        }
    }

    pub fn volume(&self, phase: Phase) -> MolarVolume {
        m3_per_mol(self.volume_m3(phase))
    }

    /// Compressibility factor PV/RT of the requested phase.
    pub fn z(&self, phase: Phase) -> f64 {
        self.pressure * self.volume_m3(phase) / (R * self.temperature)
    }

    /// True when only one physical root exists.
    pub fn is_single_root(&self) -> bool {
        self.roots.len() == 1
    }
}
