//! Attraction-term temperature corrections.
//!
//! An [`AlphaFunction`] maps a compound and temperature to the factor applied
//! to the critical attraction parameter a₀. [`SoaveAlpha`] is the generic
//! Soave form; [`TabulatedAlpha`] consults a per-compound (m, n) table and
//! delegates to its base function for compounds the table does not cover.

use crate::error::EosResult;
use cm_fluids::{AlphaTable, Component};

pub trait AlphaFunction: Send + Sync {
    /// Alpha factor for `component` at `temperature` [K].
    fn alpha(&self, component: &Component, temperature: f64) -> EosResult<f64>;
}

/// α = [1 + m(1 − √Tr)]², m = 0.48 + 1.574ω − 0.176ω².
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SoaveAlpha;

impl SoaveAlpha {
    pub fn m(acentric: f64) -> f64 {
        0.48 + 1.574 * acentric - 0.176 * acentric * acentric
    }
}

impl AlphaFunction for SoaveAlpha {
    fn alpha(&self, component: &Component, temperature: f64) -> EosResult<f64> {
        let tr = reduced_temperature(component, temperature)?;
        let m = Self::m(component.acentric()?);
        let s = 1.0 + m * (1.0 - tr.sqrt());
        Ok(s * s)
    }
}

/// Two-parameter table override: α = 1 + m(1 − Tr) + n(1/Tr − 1).
#[derive(Debug, Clone, Copy)]
pub struct TabulatedAlpha<'t, B = SoaveAlpha> {
    base: B,
    table: &'t AlphaTable,
}

impl TabulatedAlpha<'static, SoaveAlpha> {
    /// Built-in modified-SRK fits over the Soave base.
    pub fn msrk() -> Self {
        Self::new(SoaveAlpha, AlphaTable::msrk())
    }
}

impl<'t, B: AlphaFunction> TabulatedAlpha<'t, B> {
    pub fn new(base: B, table: &'t AlphaTable) -> Self {
        Self { base, table }
    }

    pub fn base(&self) -> &B {
        &self.base
    }
}

impl<B: AlphaFunction> AlphaFunction for TabulatedAlpha<'_, B> {
    fn alpha(&self, component: &Component, temperature: f64) -> EosResult<f64> {
        match self.table.get(component.id) {
            Some(c) => {
                let tr = reduced_temperature(component, temperature)?;
                Ok(1.0 + c.m * (1.0 - tr) + c.n * (1.0 / tr - 1.0))
            }
            None => self.base.alpha(component, temperature),
        }
    }
}

pub(crate) fn reduced_temperature(component: &Component, temperature: f64) -> EosResult<f64> {
    cm_core::ensure_positive(temperature, "temperature")?;
    Ok(temperature / component.critical_temperature()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EosError;
    use cm_core::component_id;
    use cm_fluids::{AlphaCoefficients, ComponentTable, catalog};

    fn propane() -> Component {
        ComponentTable::builtin()
            .get(catalog::PROPANE)
            .unwrap()
            .clone()
    }

    #[test]
    fn soave_alpha_is_one_at_critical_temperature() {
        let c = propane();
        let a = SoaveAlpha.alpha(&c, 369.82).unwrap();
        assert!((a - 1.0).abs() < 1e-14);
    }

    #[test]
    fn soave_alpha_grows_below_tc() {
        let c = propane();
        assert!(SoaveAlpha.alpha(&c, 300.0).unwrap() > 1.0);
        assert!(SoaveAlpha.alpha(&c, 450.0).unwrap() < 1.0);
    }

    #[test]
    fn tabulated_alpha_uses_propane_fit() {
        let c = propane();
        let t = 300.0;
        let tr = t / 369.82;
        let expected = 1.0 + 0.6038 * (1.0 - tr) + 0.1563 * (1.0 / tr - 1.0);
        let a = TabulatedAlpha::msrk().alpha(&c, t).unwrap();
        assert!((a - expected).abs() < 1e-14);
        assert!((a - SoaveAlpha.alpha(&c, t).unwrap()).abs() > 1e-4);
    }

    #[test]
    fn tabulated_alpha_delegates_when_absent() {
        let c = Component::new(component_id!(900), "Pseudo", 500.0, 3.0e6, 0.3);
        let empty = AlphaTable::new();
        let alpha = TabulatedAlpha::new(SoaveAlpha, &empty);
        assert_eq!(
            alpha.alpha(&c, 400.0).unwrap(),
            SoaveAlpha.alpha(&c, 400.0).unwrap()
        );
    }

    #[test]
    fn custom_table_overrides_base() {
        let c = Component::new(component_id!(900), "Pseudo", 500.0, 3.0e6, 0.3);
        let mut table = AlphaTable::new();
        table.insert(c.id, AlphaCoefficients { m: 0.0, n: 0.0 });
        let alpha = TabulatedAlpha::new(SoaveAlpha, &table);
        assert_eq!(alpha.alpha(&c, 250.0).unwrap(), 1.0);
    }

    #[test]
    fn missing_acentric_factor_is_reported() {
        let mut c = propane();
        c.acentric_factor = None;
        let err = SoaveAlpha.alpha(&c, 300.0).unwrap_err();
        assert!(matches!(
            err,
            EosError::MissingCriticalData {
                what: "acentric factor",
                ..
            }
        ));
    }

    #[test]
    fn non_positive_temperature_is_rejected() {
        let c = propane();
        assert!(matches!(
            SoaveAlpha.alpha(&c, 0.0),
            Err(EosError::InvalidInput { .. })
        ));
    }
}
