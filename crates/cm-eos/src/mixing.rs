//! Mixing rules combining per-compound (aᵢ, bᵢ) into mixture (aₘ, bₘ).
//!
//! All rules share bₘ = Σ xᵢbᵢ and the quadratic form
//! aₘ = ΣᵢΣⱼ xᵢxⱼ√(aᵢaⱼ)·cᵢⱼ. They differ only in the pair correction cᵢⱼ,
//! which is what a [`MixingRuleFn`] computes.

use crate::error::{EosError, EosResult};
use cm_fluids::InteractionMatrix;
use std::fmt;
use std::str::FromStr;

/// Pair correction cᵢⱼ for the attraction quadratic form.
pub type MixingRuleFn = fn(x: &[f64], k: &InteractionMatrix, i: usize, j: usize) -> f64;

/// Mixing rule selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MixingRule {
    /// van der Waals one-fluid rule with the raw kᵢⱼ.
    #[default]
    Classic,
    /// Stryjek and Vera (1986), Van Laar type.
    StryjekVera,
    /// Panagiotopoulos and Reid (1985).
    Panagiotopoulos,
    /// Melhem (1991).
    Melhem,
}

impl MixingRule {
    pub const ALL: [MixingRule; 4] = [
        MixingRule::Classic,
        MixingRule::StryjekVera,
        MixingRule::Panagiotopoulos,
        MixingRule::Melhem,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MixingRule::Classic => "Classic",
            MixingRule::StryjekVera => "StryjekVera",
            MixingRule::Panagiotopoulos => "Panagiotopoulos",
            MixingRule::Melhem => "Melhem",
        }
    }

    /// Strategy registry.
    pub fn strategy(self) -> MixingRuleFn {
        match self {
            MixingRule::Classic => classic,
            MixingRule::StryjekVera => stryjek_vera,
            MixingRule::Panagiotopoulos => panagiotopoulos,
            MixingRule::Melhem => melhem,
        }
    }
}

fn classic(_x: &[f64], k: &InteractionMatrix, i: usize, j: usize) -> f64 {
    1.0 - k.get(i, j)
}

/// k′ = kᵢⱼkⱼᵢ / (x̂ᵢkᵢⱼ + x̂ⱼkⱼᵢ) with the pair-normalized fractions
/// x̂ = x / (xᵢ + xⱼ), which are the plain fractions for a binary.
fn stryjek_vera(x: &[f64], k: &InteractionMatrix, i: usize, j: usize) -> f64 {
    let (kij, kji) = (k.get(i, j), k.get(j, i));
    if kij == 0.0 && kji == 0.0 {
        return 1.0;
    }
    let pair = x[i] + x[j];
    if pair == 0.0 {
        return 1.0;
    }
    let denom = (x[i] * kij + x[j] * kji) / pair;
    if denom == 0.0 {
        return 1.0;
    }
    1.0 - kij * kji / denom
}

fn panagiotopoulos(x: &[f64], k: &InteractionMatrix, i: usize, j: usize) -> f64 {
    let (kij, kji) = (k.get(i, j), k.get(j, i));
    1.0 - kij + (kij - kji) * x[i]
}

fn melhem(x: &[f64], k: &InteractionMatrix, i: usize, j: usize) -> f64 {
    let pair = x[i] + x[j];
    if pair == 0.0 {
        return 1.0;
    }
    let (kij, kji) = (k.get(i, j), k.get(j, i));
    1.0 - kij + (kij - kji) * x[i] / pair
}

/// Mixture parameters for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixtureParameters {
    /// θ = aₘ [Pa·m⁶/mol²]
    pub am: f64,
    /// bₘ [m³/mol]
    pub bm: f64,
}

/// Combine per-compound parameters under `rule`.
pub fn mix(
    rule: MixingRule,
    x: &[f64],
    a: &[f64],
    b: &[f64],
    k: &InteractionMatrix,
) -> EosResult<MixtureParameters> {
    let n = x.len();
    check_len("attraction parameters", n, a.len())?;
    check_len("covolumes", n, b.len())?;
    check_len("interaction matrix", n, k.size())?;

    let unusable = |ai: f64| !(ai.is_finite() && ai >= 0.0);
    if let Some((i, ai)) = a.iter().enumerate().find(|(_, ai)| unusable(**ai)) {
        return Err(EosError::InvalidInput {
            what: format!("attraction parameter {i} is {ai}, expected finite and non-negative"),
        });
    }

    let correction = rule.strategy();
    let bm = x.iter().zip(b).map(|(xi, bi)| xi * bi).sum();
    let mut am = 0.0;
    for i in 0..n {
        for j in 0..n {
            let xx = x[i] * x[j];
            if xx == 0.0 {
                continue;
            }
            am += xx * (a[i] * a[j]).sqrt() * correction(x, k, i, j);
        }
    }
    Ok(MixtureParameters { am, bm })
}

fn check_len(what: &'static str, expected: usize, found: usize) -> EosResult<()> {
    if expected == found {
        Ok(())
    } else {
        Err(EosError::DimensionMismatch {
            what,
            expected,
            found,
        })
    }
}

impl fmt::Display for MixingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MixingRule {
    type Err = EosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        let rule = match key.as_str() {
            "classic" | "vanderwaals" | "vdw" => MixingRule::Classic,
            "stryjekvera" | "sv" => MixingRule::StryjekVera,
            "panagiotopoulos" => MixingRule::Panagiotopoulos,
            "melhem" => MixingRule::Melhem,
            _ => {
                return Err(EosError::InvalidInput {
                    what: format!("unknown mixing rule '{s}'"),
                });
            }
        };
        Ok(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ternary() -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        (
            vec![0.2, 0.5, 0.3],
            vec![0.23, 0.95, 1.45],
            vec![2.9e-5, 6.3e-5, 8.1e-5],
        )
    }

    #[test]
    fn covolume_is_linear() {
        let (x, a, b) = ternary();
        let k = InteractionMatrix::zeros(3);
        let mp = mix(MixingRule::Classic, &x, &a, &b, &k).unwrap();
        let expected = 0.2 * 2.9e-5 + 0.5 * 6.3e-5 + 0.3 * 8.1e-5;
        assert!((mp.bm - expected).abs() < 1e-18);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let (x, a, b) = ternary();
        let err = mix(MixingRule::Melhem, &x, &a[..2], &b, &InteractionMatrix::zeros(3))
            .unwrap_err();
        assert_eq!(
            err,
            EosError::DimensionMismatch {
                what: "attraction parameters",
                expected: 3,
                found: 2
            }
        );

        let err = mix(MixingRule::Classic, &x, &a, &b, &InteractionMatrix::zeros(2)).unwrap_err();
        assert!(matches!(err, EosError::DimensionMismatch { .. }));
    }

    #[test]
    fn asymmetric_k_separates_classic_from_symmetrizing_rules() {
        // Classic keeps the raw entries; its quadratic form only sees (kij + kji)/2.
        let x = [0.3, 0.7];
        let a = [0.25, 0.95];
        let b = [3.0e-5, 6.3e-5];
        let k = InteractionMatrix::from_rows(vec![vec![0.0, 0.02], vec![0.10, 0.0]]).unwrap();

        let classic = mix(MixingRule::Classic, &x, &a, &b, &k).unwrap().am;
        let sym = mix(MixingRule::Classic, &x, &a, &b, &k.symmetrized()).unwrap().am;
        assert!((classic - sym).abs() < 1e-15);

        let sv = mix(MixingRule::StryjekVera, &x, &a, &b, &k).unwrap().am;
        let pan = mix(MixingRule::Panagiotopoulos, &x, &a, &b, &k).unwrap().am;
        let mel = mix(MixingRule::Melhem, &x, &a, &b, &k).unwrap().am;
        assert!((classic - sv).abs() > 1e-4);
        assert!((classic - pan).abs() > 1e-4);
        // Melhem and Panagiotopoulos coincide for a binary (xᵢ + xⱼ = 1)
        assert!((pan - mel).abs() < 1e-12);
    }

    #[test]
    fn stryjek_vera_handles_zero_pairs() {
        let x = [0.5, 0.5];
        let k = InteractionMatrix::from_rows(vec![vec![0.0, 0.0], vec![0.0, 0.0]]).unwrap();
        assert_eq!(stryjek_vera(&x, &k, 0, 1), 1.0);

        let k = InteractionMatrix::from_rows(vec![vec![0.0, 0.1], vec![-0.1, 0.0]]).unwrap();
        assert_eq!(stryjek_vera(&x, &k, 0, 1), 1.0);
    }

    #[test]
    fn negative_or_nan_attraction_is_rejected() {
        let x = [0.1, 0.9];
        let b = [2.7e-5, 6.3e-5];
        let k = InteractionMatrix::zeros(2);
        for bad in [-0.02465, f64::NAN] {
            let err = mix(MixingRule::Classic, &x, &[bad, 0.95], &b, &k).unwrap_err();
            assert!(matches!(err, EosError::InvalidInput { .. }), "{err:?}");
        }
    }

    #[test]
    fn names_parse() {
        for rule in MixingRule::ALL {
            assert_eq!(rule.name().parse::<MixingRule>().unwrap(), rule);
        }
        assert_eq!("Stryjek-Vera".parse::<MixingRule>().unwrap(), MixingRule::StryjekVera);
        assert!("Wong-Sandler".parse::<MixingRule>().is_err());
    }
}
