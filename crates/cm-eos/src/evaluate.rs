//! Evaluation entrypoints.
//!
//! An [`Evaluator`] pairs an [`EosConfig`] with an optional borrowed
//! interaction table. Every call builds its mixture parameters from scratch;
//! nothing is cached between calls, so one evaluator can be shared across
//! threads.

use crate::config::EosConfig;
use crate::critical::{self, CriticalPoint};
use crate::cubic::{CubicForm, CubicRoots, Phase};
use crate::error::{EosError, EosResult};
use crate::family::ComponentParameters;
use crate::mixing::{self, MixtureParameters};
use crate::pseudocritical::{self, PseudoCritical};
use cm_core::{MolarVolume, Pressure, Temperature, pressure_pa, temperature_k};
use cm_fluids::{
    Composition, InteractionMatrix, InteractionScope, InteractionTable, resolve_interaction_matrix,
};
use rayon::prelude::*;

/// Mixture state at one temperature: everything the cubic needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Mixture {
    pub temperature: f64,
    pub components: Vec<ComponentParameters>,
    pub kij: InteractionMatrix,
    pub parameters: MixtureParameters,
    pub form: CubicForm,
}

/// One independent (composition, T, P) query for batch evaluation.
#[derive(Debug, Clone, Copy)]
pub struct StateQuery<'q> {
    pub composition: &'q Composition,
    pub temperature: Temperature,
    pub pressure: Pressure,
}

#[derive(Debug, Clone)]
pub struct Evaluator<'a> {
    config: EosConfig,
    interactions: Option<&'a InteractionTable>,
}

impl<'a> Evaluator<'a> {
    pub fn new(config: EosConfig) -> Self {
        Self {
            config,
            interactions: None,
        }
    }

    pub fn with_interactions(mut self, table: &'a InteractionTable) -> Self {
        self.interactions = Some(table);
        self
    }

    pub fn config(&self) -> &EosConfig {
        &self.config
    }

    fn interaction_matrix(&self, composition: &Composition, temperature: Option<f64>) -> InteractionMatrix {
        let scope = self.interactions.map(|table| InteractionScope {
            table,
            eos: self.config.scope_name(),
        });
        resolve_interaction_matrix(composition.components(), scope, temperature)
    }

    /// Per-compound parameters, kᵢⱼ and mixture parameters at `temperature`.
    pub fn mixture(&self, composition: &Composition, temperature: Temperature) -> EosResult<Mixture> {
        let t = temperature_k(temperature);
        let family = self.config.family;
        let components = composition
            .components()
            .iter()
            .map(|c| family.parameters(c, t))
            .collect::<EosResult<Vec<_>>>()?;
        let a: Vec<f64> = components.iter().map(|p| p.a).collect();
        let b: Vec<f64> = components.iter().map(|p| p.b).collect();
        let kij = self.interaction_matrix(composition, Some(t));
        let parameters = mixing::mix(self.config.mixing_rule, composition.fractions(), &a, &b, &kij)?;
        let form = family.cubic_form(parameters.am, parameters.bm);
        Ok(Mixture {
            temperature: t,
            components,
            kij,
            parameters,
            form,
        })
    }

    /// Liquid and vapor roots from one cubic solve.
    pub fn volumes(
        &self,
        composition: &Composition,
        temperature: Temperature,
        pressure: Pressure,
    ) -> EosResult<CubicRoots> {
        let mixture = self.mixture(composition, temperature)?;
        mixture.form.solve_with_tolerance(
            mixture.temperature,
            pressure_pa(pressure),
            self.config.near_critical_rel_tol,
        )
    }

    pub fn volume(
        &self,
        composition: &Composition,
        temperature: Temperature,
        pressure: Pressure,
        phase: Phase,
    ) -> EosResult<MolarVolume> {
        Ok(self.volumes(composition, temperature, pressure)?.volume(phase))
    }

    pub fn compressibility(
        &self,
        composition: &Composition,
        temperature: Temperature,
        pressure: Pressure,
        phase: Phase,
    ) -> EosResult<f64> {
        Ok(self.volumes(composition, temperature, pressure)?.z(phase))
    }

    /// Mixture critical point.
    ///
    /// Interaction coefficients are resolved at the mole-fraction-weighted
    /// critical temperature, since the solve itself moves T.
    pub fn critical_point(&self, composition: &Composition) -> EosResult<CriticalPoint> {
        let tpc = composition
            .iter()
            .map(|(c, x)| c.critical_temperature().map(|tc| x * tc))
            .sum::<Result<f64, _>>()
            .map_err(EosError::from)?;
        let kij = self.interaction_matrix(composition, Some(tpc));
        critical::critical_point(self.config.family, composition, &kij, &self.config.critical)
    }

    /// Linear pseudocritical estimates; independent of the configured family.
    pub fn pseudocritical(&self, composition: &Composition) -> EosResult<PseudoCritical> {
        pseudocritical::pseudocritical(composition)
    }

    /// Evaluate independent states in parallel. Results keep the input order.
    pub fn evaluate_batch(&self, queries: &[StateQuery<'_>]) -> Vec<EosResult<CubicRoots>> {
        queries
            .par_iter()
            .map(|q| self.volumes(q.composition, q.temperature, q.pressure))
            .collect()
    }
}

impl Default for Evaluator<'_> {
    fn default() -> Self {
        Self::new(EosConfig::default())
    }
}
