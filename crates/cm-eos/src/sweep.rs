//! Pressure sweeps along an isotherm.
//!
//! The mixture parameters depend only on temperature and composition, so an
//! isotherm builds them once and solves the cubic at every pressure point.

use crate::cubic::{CubicRoots, Phase};
use crate::error::{EosError, EosResult};
use crate::evaluate::Evaluator;
use cm_core::{Temperature, temperature_k};
use cm_fluids::Composition;
use std::fmt;
use tracing::warn;

/// Type of sweep progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SweepType {
    /// Uniformly spaced points
    Linear,
    /// Logarithmically spaced points
    Logarithmic,
}

/// Pressure range in Pa.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepDefinition {
    pub start: f64,
    pub end: f64,
    pub num_points: usize,
    pub sweep_type: SweepType,
}

impl SweepDefinition {
    pub fn new(start: f64, end: f64, num_points: usize, sweep_type: SweepType) -> EosResult<Self> {
        if !(start.is_finite() && end.is_finite()) {
            return Err(EosError::InvalidInput {
                what: "sweep bounds must be finite".to_string(),
            });
        }
        if num_points < 2 {
            return Err(EosError::InvalidInput {
                what: "sweep must have at least 2 points".to_string(),
            });
        }
        if (start - end).abs() < 1e-12 {
            return Err(EosError::InvalidInput {
                what: "start and end values must be different".to_string(),
            });
        }
        if sweep_type == SweepType::Logarithmic && (start <= 0.0 || end <= 0.0) {
            return Err(EosError::InvalidInput {
                what: "logarithmic sweep needs positive bounds".to_string(),
            });
        }
        Ok(Self {
            start,
            end,
            num_points,
            sweep_type,
        })
    }

    pub fn linear(start: f64, end: f64, num_points: usize) -> EosResult<Self> {
        Self::new(start, end, num_points, SweepType::Linear)
    }

    pub fn logarithmic(start: f64, end: f64, num_points: usize) -> EosResult<Self> {
        Self::new(start, end, num_points, SweepType::Logarithmic)
    }

    /// Generate all points in the sweep.
    pub fn generate_points(&self) -> Vec<f64> {
        if self.num_points <= 1 {
            return vec![self.start];
        }
        let last = (self.num_points - 1) as f64;
        let mut points: Vec<f64> = match self.sweep_type {
            SweepType::Linear => {
                let delta = (self.end - self.start) / last;
                (0..self.num_points)
                    .map(|i| self.start + i as f64 * delta)
                    .collect()
            }
            SweepType::Logarithmic => {
                let log_start = self.start.ln();
                let log_delta = (self.end.ln() - log_start) / last;
                (0..self.num_points)
                    .map(|i| (log_start + i as f64 * log_delta).exp())
                    .collect()
            }
        };
        // Exact endpoint
        points[self.num_points - 1] = self.end;
        points
    }
}

impl fmt::Display for SweepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::Logarithmic => write!(f, "Logarithmic"),
        }
    }
}

impl fmt::Display for SweepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pressure sweep from {} Pa to {} Pa ({} points, {})",
            self.start, self.end, self.num_points, self.sweep_type
        )
    }
}

/// Roots along one isotherm; failed points are `None`.
#[derive(Debug, Clone)]
pub struct IsothermResult {
    pub temperature: f64,
    pub pressures: Vec<f64>,
    pub states: Vec<Option<CubicRoots>>,
    pub num_successful: usize,
    pub num_failed: usize,
}

impl IsothermResult {
    /// Volumes [m³/mol] of `phase` at the successful points.
    pub fn volumes_m3(&self, phase: Phase) -> Vec<f64> {
        self.states
            .iter()
            .filter_map(|s| s.as_ref().map(|r| r.volume_m3(phase)))
            .collect()
    }

    /// Pressures corresponding to successful states.
    pub fn successful_pressures(&self) -> Vec<f64> {
        self.pressures
            .iter()
            .zip(&self.states)
            .filter_map(|(p, s)| s.as_ref().map(|_| *p))
            .collect()
    }
}

impl Evaluator<'_> {
    /// Solve the cubic at each sweep pressure for one temperature.
    ///
    /// Per-point failures are recorded, not returned; failures that affect
    /// every point (missing data, bad temperature) are returned.
    pub fn isotherm(
        &self,
        composition: &Composition,
        temperature: Temperature,
        sweep: &SweepDefinition,
    ) -> EosResult<IsothermResult> {
        let mixture = self.mixture(composition, temperature)?;
        let t = temperature_k(temperature);
        let pressures = sweep.generate_points();
        let mut states = Vec::with_capacity(pressures.len());
        let mut num_failed = 0;

        for (index, &p) in pressures.iter().enumerate() {
            match mixture
                .form
                .solve_with_tolerance(t, p, self.config().near_critical_rel_tol)
            {
                Ok(roots) => states.push(Some(roots)),
                Err(error) => {
                    warn!(index, pressure = p, %error, "isotherm point failed");
                    num_failed += 1;
                    states.push(None);
                }
            }
        }

        Ok(IsothermResult {
            temperature: t,
            num_successful: pressures.len() - num_failed,
            pressures,
            states,
            num_failed,
        })
    }
}
