//! Linear pseudocritical estimates (API Technical Data Book, chapter 4B).
//!
//! These need no iteration and are the usual fallback when the critical-point
//! solve does not converge.

use crate::error::{EosError, EosResult};
use cm_fluids::Composition;

/// Linear mixture critical estimates, SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PseudoCritical {
    /// Kay's rule Σ xᵢTcᵢ [K]
    pub tpc: f64,
    /// Σ xᵢPcᵢ [Pa]
    pub ppc: f64,
    /// Li's volume-fraction-weighted critical temperature [K]
    pub tc: f64,
    /// API procedure 4B2.1 critical pressure [Pa]
    pub pc: f64,
    /// Chueh-Prausnitz critical volume [m³/mol]
    pub vc: f64,
    /// Σ xᵢωᵢ
    pub acentric_factor: f64,
}

/// Compute every estimate. Requires Tc, Pc, ω and Vc for each component.
pub fn pseudocritical(composition: &Composition) -> EosResult<PseudoCritical> {
    let mut tc = Vec::with_capacity(composition.len());
    let mut pc = Vec::with_capacity(composition.len());
    let mut vc = Vec::with_capacity(composition.len());
    let mut acentric_factor = 0.0;
    for (c, x) in composition.iter() {
        tc.push(c.critical_temperature()?);
        pc.push(c.critical_pressure()?);
        vc.push(c.critical_volume()?);
        acentric_factor += x * c.acentric()?;
    }
    let x = composition.fractions();
    let weighted = |values: &[f64]| x.iter().zip(values).map(|(xi, v)| xi * v).sum::<f64>();

    let tpc = weighted(&tc);
    let ppc = weighted(&pc);

    let v_total = weighted(&vc);
    let li_tc = x
        .iter()
        .zip(&vc)
        .zip(&tc)
        .map(|((xi, v), t)| xi * v / v_total * t)
        .sum::<f64>();

    let api_pc = ppc + ppc * (5.808 + 4.93 * acentric_factor) * (li_tc - tpc) / tpc;

    let hydrocarbon: Vec<bool> = composition.components().iter().map(|c| c.hydrocarbon).collect();
    let cp_vc = chueh_prausnitz_volume(x, &vc, &hydrocarbon)?;

    Ok(PseudoCritical {
        tpc,
        ppc,
        tc: li_tc,
        pc: api_pc,
        vc: cp_vc,
        acentric_factor,
    })
}

/// Chueh-Prausnitz mixture critical volume, in the units of `vc`.
///
/// Vcm = Σ φᵢVcᵢ + ΣΣ φᵢφⱼυᵢⱼ with surface fractions φᵢ ∝ xᵢVcᵢ^(2/3),
/// υᵢⱼ = (−1.4684ηᵢⱼ + C)(Vcᵢ + Vcⱼ)/2, ηᵢⱼ = |Vcᵢ − Vcⱼ|/(Vcᵢ + Vcⱼ) and
/// C = 0 for hydrocarbon pairs, 0.1559 otherwise.
pub fn chueh_prausnitz_volume(x: &[f64], vc: &[f64], hydrocarbon: &[bool]) -> EosResult<f64> {
    for (what, len) in [("critical volumes", vc.len()), ("hydrocarbon flags", hydrocarbon.len())] {
        if len != x.len() {
            return Err(EosError::DimensionMismatch {
                what,
                expected: x.len(),
                found: len,
            });
        }
    }

    let surface: Vec<f64> = x.iter().zip(vc).map(|(xi, v)| xi * v.powf(2.0 / 3.0)).collect();
    let total: f64 = surface.iter().sum();
    if total.is_nan() || total <= 0.0 {
        return Err(EosError::InvalidInput {
            what: "critical volumes must be positive".to_string(),
        });
    }
    let phi: Vec<f64> = surface.iter().map(|s| s / total).collect();

    let mut volume: f64 = phi.iter().zip(vc).map(|(p, v)| p * v).sum();
    for i in 0..x.len() {
        for j in 0..x.len() {
            let c = if hydrocarbon[i] && hydrocarbon[j] { 0.0 } else { 0.1559 };
            let eta = ((vc[i] - vc[j]) / (vc[i] + vc[j])).abs();
            let upsilon = (-1.4684 * eta + c) * (vc[i] + vc[j]) / 2.0;
            volume += phi[i] * phi[j] * upsilon;
        }
    }
    Ok(volume)
}
