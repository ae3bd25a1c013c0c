//! Pure-compound property records and the read-only property table.

use crate::catalog;
use crate::error::{FluidError, FluidResult};
use cm_core::ComponentId;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Critical and auxiliary properties of a pure compound.
///
/// Critical temperature, critical pressure and acentric factor are optional so
/// that incomplete external records can be represented; EOS evaluation asks for
/// them through the checked accessors, which fail with
/// [`FluidError::MissingCriticalData`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Component {
    pub id: ComponentId,
    pub name: String,
    /// Critical temperature [K]
    pub tc: Option<f64>,
    /// Critical pressure [Pa]
    pub pc: Option<f64>,
    /// Acentric factor [-]
    pub acentric_factor: Option<f64>,
    /// Critical volume [m³/mol]
    pub vc: Option<f64>,
    /// Molar mass [g/mol]
    pub molar_mass: Option<f64>,
    /// Solubility parameter [(cal/cm³)^0.5]
    pub solubility_parameter: Option<f64>,
    pub hydrocarbon: bool,
}

impl Component {
    /// Record with the three properties every cubic EOS needs.
    pub fn new(id: ComponentId, name: impl Into<String>, tc: f64, pc: f64, acentric: f64) -> Self {
        Self {
            id,
            name: name.into(),
            tc: Some(tc),
            pc: Some(pc),
            acentric_factor: Some(acentric),
            vc: None,
            molar_mass: None,
            solubility_parameter: None,
            hydrocarbon: false,
        }
    }

    pub fn with_critical_volume(mut self, vc: f64) -> Self {
        self.vc = Some(vc);
        self
    }

    pub fn with_molar_mass(mut self, molar_mass: f64) -> Self {
        self.molar_mass = Some(molar_mass);
        self
    }

    pub fn with_solubility_parameter(mut self, delta: f64) -> Self {
        self.solubility_parameter = Some(delta);
        self
    }

    pub fn with_hydrocarbon(mut self, hydrocarbon: bool) -> Self {
        self.hydrocarbon = hydrocarbon;
        self
    }

    fn required(&self, value: Option<f64>, what: &'static str) -> FluidResult<f64> {
        match value {
            Some(v) if v.is_finite() && v > 0.0 => Ok(v),
            _ => Err(FluidError::MissingCriticalData { id: self.id, what }),
        }
    }

    /// Critical temperature [K].
    pub fn critical_temperature(&self) -> FluidResult<f64> {
        self.required(self.tc, "critical temperature")
    }

    /// Critical pressure [Pa].
    pub fn critical_pressure(&self) -> FluidResult<f64> {
        self.required(self.pc, "critical pressure")
    }

    /// Critical volume [m³/mol].
    pub fn critical_volume(&self) -> FluidResult<f64> {
        self.required(self.vc, "critical volume")
    }

    /// Acentric factor. May be negative (hydrogen, helium), so only finiteness is checked.
    pub fn acentric(&self) -> FluidResult<f64> {
        match self.acentric_factor {
            Some(w) if w.is_finite() => Ok(w),
            _ => Err(FluidError::MissingCriticalData {
                id: self.id,
                what: "acentric factor",
            }),
        }
    }
}

/// Read-only component property table keyed by [`ComponentId`].
///
/// The table is immutable once shared; it is `Send + Sync`, so concurrent
/// evaluations may borrow it freely.
#[derive(Debug, Clone, Default)]
pub struct ComponentTable {
    entries: HashMap<ComponentId, Component>,
}

impl ComponentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared table holding the built-in [`catalog`] records.
    pub fn builtin() -> &'static ComponentTable {
        static BUILTIN: OnceLock<ComponentTable> = OnceLock::new();
        BUILTIN.get_or_init(|| catalog::builtin_components().into_iter().collect())
    }

    /// Insert or replace a record.
    pub fn insert(&mut self, component: Component) -> Option<Component> {
        self.entries.insert(component.id, component)
    }

    /// Point lookup.
    pub fn get(&self, id: ComponentId) -> FluidResult<&Component> {
        self.entries
            .get(&id)
            .ok_or(FluidError::UnknownComponent { id })
    }

    /// Look up an ordered list of ids, preserving order.
    pub fn lookup_all(&self, ids: &[ComponentId]) -> FluidResult<Vec<Component>> {
        ids.iter().map(|&id| self.get(id).cloned()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> + '_ {
        self.entries.values()
    }
}

impl FromIterator<Component> for ComponentTable {
    fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
        let mut table = Self::new();
        for c in iter {
            table.insert(c);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cm_core::component_id;

    #[test]
    fn builtin_has_propane() {
        let table = ComponentTable::builtin();
        let propane = table.get(catalog::PROPANE).unwrap();
        assert_eq!(propane.name, "Propane");
        assert_eq!(propane.critical_temperature().unwrap(), 369.82);
        assert_eq!(propane.critical_pressure().unwrap(), 4.2496e6);
        assert_eq!(propane.acentric().unwrap(), 0.152);
    }

    #[test]
    fn unknown_id_is_an_error() {
        let table = ComponentTable::builtin();
        let err = table.get(component_id!(9999)).unwrap_err();
        assert!(matches!(err, FluidError::UnknownComponent { .. }));
    }

    #[test]
    fn missing_critical_data_is_reported() {
        let mut c = Component::new(component_id!(700), "Mystery", 400.0, 3.0e6, 0.2);
        c.pc = None;
        let err = c.critical_pressure().unwrap_err();
        assert_eq!(
            err,
            FluidError::MissingCriticalData {
                id: component_id!(700),
                what: "critical pressure"
            }
        );

        c.tc = Some(f64::NAN);
        assert!(c.critical_temperature().is_err());
        assert!(c.critical_volume().is_err());
    }

    #[test]
    fn negative_acentric_factor_is_allowed() {
        let table = ComponentTable::builtin();
        let h2 = table.get(catalog::HYDROGEN).unwrap();
        assert!(h2.acentric().unwrap() < 0.0);
    }

    #[test]
    fn lookup_all_preserves_order() {
        let table = ComponentTable::builtin();
        let comps = table
            .lookup_all(&[catalog::PROPANE, catalog::METHANE])
            .unwrap();
        assert_eq!(comps[0].id, catalog::PROPANE);
        assert_eq!(comps[1].id, catalog::METHANE);
    }
}
