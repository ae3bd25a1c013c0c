//! Built-in compound records.
//!
//! Ids follow the numbering of the external property databank the interaction
//! correlations were written against (hydrogen = 1, methane = 2, ...), so the
//! generalized interaction rules in [`crate::interaction`] can refer to them.

use crate::Component;
use cm_core::{ComponentId, component_id};

pub const HYDROGEN: ComponentId = component_id!(1);
pub const METHANE: ComponentId = component_id!(2);
pub const ETHANE: ComponentId = component_id!(3);
pub const PROPANE: ComponentId = component_id!(4);
pub const ISOBUTANE: ComponentId = component_id!(5);
pub const N_BUTANE: ComponentId = component_id!(6);
pub const NITROGEN: ComponentId = component_id!(46);
pub const CARBON_MONOXIDE: ComponentId = component_id!(48);
pub const CARBON_DIOXIDE: ComponentId = component_id!(49);
pub const HYDROGEN_SULFIDE: ComponentId = component_id!(50);
pub const WATER: ComponentId = component_id!(62);

struct Record {
    id: ComponentId,
    name: &'static str,
    tc: f64,
    pc: f64,
    acentric: f64,
    vc_cm3: f64,
    molar_mass: f64,
    solubility: f64,
    hydrocarbon: bool,
}

const RECORDS: [Record; 11] = [
    Record {
        id: HYDROGEN,
        name: "Hydrogen",
        tc: 33.19,
        pc: 1.313e6,
        acentric: -0.216,
        vc_cm3: 64.1,
        molar_mass: 2.016,
        solubility: 3.25,
        hydrocarbon: false,
    },
    Record {
        id: METHANE,
        name: "Methane",
        tc: 190.56,
        pc: 4.599e6,
        acentric: 0.011,
        vc_cm3: 98.6,
        molar_mass: 16.043,
        solubility: 5.68,
        hydrocarbon: true,
    },
    Record {
        id: ETHANE,
        name: "Ethane",
        tc: 305.32,
        pc: 4.872e6,
        acentric: 0.099,
        vc_cm3: 145.5,
        molar_mass: 30.070,
        solubility: 6.05,
        hydrocarbon: true,
    },
    Record {
        id: PROPANE,
        name: "Propane",
        tc: 369.82,
        pc: 4.2496e6,
        acentric: 0.152,
        vc_cm3: 200.0,
        molar_mass: 44.097,
        solubility: 6.40,
        hydrocarbon: true,
    },
    Record {
        id: ISOBUTANE,
        name: "Isobutane",
        tc: 407.85,
        pc: 3.640e6,
        acentric: 0.186,
        vc_cm3: 262.7,
        molar_mass: 58.123,
        solubility: 6.73,
        hydrocarbon: true,
    },
    Record {
        id: N_BUTANE,
        name: "n-Butane",
        tc: 425.12,
        pc: 3.796e6,
        acentric: 0.200,
        vc_cm3: 255.0,
        molar_mass: 58.123,
        solubility: 6.73,
        hydrocarbon: true,
    },
    Record {
        id: NITROGEN,
        name: "Nitrogen",
        tc: 126.20,
        pc: 3.398e6,
        acentric: 0.037,
        vc_cm3: 90.1,
        molar_mass: 28.014,
        solubility: 4.44,
        hydrocarbon: false,
    },
    Record {
        id: CARBON_MONOXIDE,
        name: "Carbon Monoxide",
        tc: 132.85,
        pc: 3.494e6,
        acentric: 0.045,
        vc_cm3: 93.1,
        molar_mass: 28.010,
        solubility: 3.13,
        hydrocarbon: false,
    },
    Record {
        id: CARBON_DIOXIDE,
        name: "Carbon Dioxide",
        tc: 304.12,
        pc: 7.374e6,
        acentric: 0.225,
        vc_cm3: 94.07,
        molar_mass: 44.010,
        solubility: 7.12,
        hydrocarbon: false,
    },
    Record {
        id: HYDROGEN_SULFIDE,
        name: "Hydrogen Sulfide",
        tc: 373.40,
        pc: 8.963e6,
        acentric: 0.090,
        vc_cm3: 98.0,
        molar_mass: 34.082,
        solubility: 8.80,
        hydrocarbon: false,
    },
    Record {
        id: WATER,
        name: "Water",
        tc: 647.14,
        pc: 22.064e6,
        acentric: 0.344,
        vc_cm3: 55.95,
        molar_mass: 18.015,
        solubility: 23.40,
        hydrocarbon: false,
    },
];

/// Records backing [`crate::ComponentTable::builtin`].
pub fn builtin_components() -> Vec<Component> {
    RECORDS
        .iter()
        .map(|r| {
            Component::new(r.id, r.name, r.tc, r.pc, r.acentric)
                .with_critical_volume(r.vc_cm3 * 1e-6)
                .with_molar_mass(r.molar_mass)
                .with_solubility_parameter(r.solubility)
                .with_hydrocarbon(r.hydrocarbon)
        })
        .collect()
}
