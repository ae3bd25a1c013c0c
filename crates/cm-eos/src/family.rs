//! EOS families and per-compound (a, b) parameters.

use crate::alpha::{AlphaFunction, SoaveAlpha, TabulatedAlpha};
use crate::cubic::CubicForm;
use crate::error::{EosError, EosResult};
use cm_core::constants::R;
use cm_fluids::Component;
use std::fmt;
use std::str::FromStr;

const VDW_OMEGA_A: f64 = 0.421875;
const VDW_OMEGA_B: f64 = 0.125;
const SRK_OMEGA_A: f64 = 0.42747;
const SRK_OMEGA_B: f64 = 0.08664;

/// Cubic equation-of-state family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EosFamily {
    /// van der Waals (1873), temperature-independent a and b.
    VanDerWaals,
    /// Soave-Redlich-Kwong (1972).
    #[default]
    Srk,
    /// SRK with the two-parameter tabulated alpha of Soave (1984).
    Msrk,
}

/// Per-compound attraction and covolume parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentParameters {
    /// Attraction parameter a(T) [Pa·m⁶/mol²]
    pub a: f64,
    /// Covolume b [m³/mol], always > 0
    pub b: f64,
}

impl EosFamily {
    pub const ALL: [EosFamily; 3] = [EosFamily::VanDerWaals, EosFamily::Srk, EosFamily::Msrk];

    /// Name used to scope interaction-table entries.
    pub fn name(self) -> &'static str {
        match self {
            EosFamily::VanDerWaals => "vdW",
            EosFamily::Srk => "SRK",
            EosFamily::Msrk => "MSRK",
        }
    }

    /// Families whose attraction denominator is V(V + b).
    pub fn is_soave_type(self) -> bool {
        !matches!(self, EosFamily::VanDerWaals)
    }

    /// Pressure relation for mixture parameters θ = aₘ and bₘ.
    pub fn cubic_form(self, theta: f64, bm: f64) -> CubicForm {
        let delta = if self.is_soave_type() { bm } else { 0.0 };
        CubicForm {
            theta,
            b: bm,
            delta,
            epsilon: 0.0,
        }
    }

    /// (a, b) for one compound at `temperature` [K].
    pub fn parameters(self, component: &Component, temperature: f64) -> EosResult<ComponentParameters> {
        match self {
            EosFamily::VanDerWaals => {
                let tc = component.critical_temperature()?;
                let pc = component.critical_pressure()?;
                Ok(ComponentParameters {
                    a: VDW_OMEGA_A * R * R * tc * tc / pc,
                    b: VDW_OMEGA_B * R * tc / pc,
                })
            }
            EosFamily::Srk => soave_parameters(component, temperature, &SoaveAlpha),
            EosFamily::Msrk => soave_parameters(component, temperature, &TabulatedAlpha::msrk()),
        }
    }

    /// Index-aligned (a, b) arrays for a component list.
    pub fn parameter_arrays(
        self,
        components: &[Component],
        temperature: f64,
    ) -> EosResult<(Vec<f64>, Vec<f64>)> {
        components
            .iter()
            .map(|c| self.parameters(c, temperature).map(|p| (p.a, p.b)))
            .collect()
    }
}

/// Soave-type (a, b) with an arbitrary alpha function.
pub fn soave_parameters(
    component: &Component,
    temperature: f64,
    alpha: &dyn AlphaFunction,
) -> EosResult<ComponentParameters> {
    let tc = component.critical_temperature()?;
    let pc = component.critical_pressure()?;
    let a0 = SRK_OMEGA_A * R * R * tc * tc / pc;
    let alpha_value = alpha.alpha(component, temperature)?;
    if !(alpha_value.is_finite() && alpha_value > 0.0) {
        return Err(EosError::InvalidInput {
            what: format!(
                "alpha = {alpha_value} for component {} at {temperature} K is not positive",
                component.id
            ),
        });
    }
    Ok(ComponentParameters {
        a: a0 * alpha_value,
        b: SRK_OMEGA_B * R * tc / pc,
    })
}

impl fmt::Display for EosFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EosFamily {
    type Err = EosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EosFamily::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| EosError::InvalidInput {
                what: format!("unknown EOS family '{s}'"),
            })
    }
}
