//! Maximum likelihood and method-of-moments estimators.
//!
//! For the supported families both estimators have the same closed form. They
//! are still computed along separate routes (centered deviations for MLE, raw
//! moments for MoM) so the agreement can be checked rather than assumed.

use std::{collections::BTreeMap, str::FromStr};

use serde::Serialize;

use crate::{
    descriptive::{self, VarianceKind},
    error::{StatsError, StatsResult},
};

/// Distribution families with closed-form estimators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum EstimationFamily {
    #[display("normal")]
    Normal,
    #[display("exponential")]
    Exponential,
    #[display("poisson")]
    Poisson,
}

impl FromStr for EstimationFamily {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "exponential" => Ok(Self::Exponential),
            "poisson" => Ok(Self::Poisson),
            _ => Err(StatsError::UnsupportedDistribution { name: s.to_owned() }),
        }
    }
}

/// Named parameter values, ordered by name.
pub type Params = BTreeMap<&'static str, f64>;

/// Both estimates for one family, keyed by parameter name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimationResult {
    /// The fitted family.
    pub distribution: EstimationFamily,
    /// Number of values the estimates were computed from.
    pub sample_size: usize,
    /// Maximum likelihood estimates.
    pub mle_params: Params,
    /// Method-of-moments estimates.
    pub mom_params: Params,
}

impl EstimationResult {
    /// Largest absolute difference between matching MLE and MoM parameters.
    #[must_use]
    pub fn max_discrepancy(&self) -> f64 {
        self.mle_params
            .iter()
            .filter_map(|(name, mle)| self.mom_params.get(name).map(|mom| (mle - mom).abs()))
            .fold(0.0, f64::max)
    }
}

/// Maximum likelihood estimates.
///
/// # Examples
///
/// ```
/// # use statlab_stats::estimation::{mle, EstimationFamily};
/// let params = mle(EstimationFamily::Poisson, &[2.0, 4.0, 3.0, 5.0, 1.0]).unwrap();
/// assert_eq!(params["lambda"], 3.0);
/// ```
pub fn mle(family: EstimationFamily, values: &[f64]) -> StatsResult<Params> {
    let mean = descriptive::mean(values)?;
    let params = match family {
        EstimationFamily::Normal => {
            let sigma = descriptive::std_dev(values, VarianceKind::Population)?;
            Params::from([("mu", mean), ("sigma", sigma)])
        }
        EstimationFamily::Exponential => Params::from([("lambda", 1.0 / positive_mean(mean)?)]),
        EstimationFamily::Poisson => Params::from([("lambda", mean)]),
    };
    Ok(params)
}

/// Method-of-moments estimates from the first two raw moments.
#[expect(clippy::cast_precision_loss)]
pub fn method_of_moments(family: EstimationFamily, values: &[f64]) -> StatsResult<Params> {
    if values.is_empty() {
        return Err(StatsError::degenerate("method of moments", 1, 0));
    }
    StatsError::ensure_finite("method of moments", values)?;
    let n = values.len() as f64;
    let m1 = values.iter().sum::<f64>() / n;
    let params = match family {
        EstimationFamily::Normal => {
            let m2 = values.iter().map(|v| v * v).sum::<f64>() / n;
            let sigma = (m2 - m1 * m1).max(0.0).sqrt();
            Params::from([("mu", m1), ("sigma", sigma)])
        }
        EstimationFamily::Exponential => Params::from([("lambda", 1.0 / positive_mean(m1)?)]),
        EstimationFamily::Poisson => Params::from([("lambda", m1)]),
    };
    Ok(params)
}

fn positive_mean(mean: f64) -> StatsResult<f64> {
    if mean > 0.0 {
        Ok(mean)
    } else {
        Err(StatsError::invalid(
            "mean",
            mean,
            "exponential rate requires a positive sample mean",
        ))
    }
}

/// Runs both estimators on the same sample.
pub fn estimate(family: EstimationFamily, values: &[f64]) -> StatsResult<EstimationResult> {
    Ok(EstimationResult {
        distribution: family,
        sample_size: values.len(),
        mle_params: mle(family, values)?,
        mom_params: method_of_moments(family, values)?,
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_distr::{Distribution as _, Exp, Normal, Poisson};
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_poisson_scenario() {
        let result = estimate(EstimationFamily::Poisson, &[2.0, 4.0, 3.0, 5.0, 1.0]).unwrap();
        assert_eq!(result.mle_params["lambda"], 3.0);
        assert_eq!(result.mom_params["lambda"], 3.0);
        assert_eq!(result.sample_size, 5);
    }

    #[test]
    fn test_normal_uses_population_sigma() {
        let result = estimate(EstimationFamily::Normal, &[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(result.mle_params["mu"], 3.0);
        assert!((result.mle_params["sigma"] - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_exponential_rate() {
        let result = estimate(EstimationFamily::Exponential, &[0.5, 1.5, 2.0]).unwrap();
        assert!((result.mle_params["lambda"] - 0.75).abs() < 1e-12);

        assert!(matches!(
            estimate(EstimationFamily::Exponential, &[-1.0, 0.5]),
            Err(StatsError::InvalidParameter { name: "mean", .. })
        ));
    }

    #[test]
    fn test_estimators_agree_on_random_samples() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let normal = Normal::new(10.0, 2.0).unwrap();
        let exp = Exp::new(0.5).unwrap();
        let poisson = Poisson::new(4.0).unwrap();
        for len in [2, 10, 250] {
            let normal_values: Vec<f64> = normal.sample_iter(&mut rng).take(len).collect();
            let exp_values: Vec<f64> = exp.sample_iter(&mut rng).take(len).collect();
            let poisson_values: Vec<f64> = poisson.sample_iter(&mut rng).take(len).collect();
            let cases = [
                (EstimationFamily::Normal, normal_values),
                (EstimationFamily::Exponential, exp_values),
                (EstimationFamily::Poisson, poisson_values),
            ];
            for (family, values) in cases {
                let result = estimate(family, &values).unwrap();
                assert!(
                    result.max_discrepancy() < 1e-9,
                    "{family}: {:?} vs {:?}",
                    result.mle_params,
                    result.mom_params
                );
            }
        }
    }

    #[test]
    fn test_family_from_str() {
        assert_eq!(
            "Normal".parse::<EstimationFamily>().unwrap(),
            EstimationFamily::Normal
        );
        assert_eq!(
            "binomial".parse::<EstimationFamily>(),
            Err(StatsError::UnsupportedDistribution {
                name: "binomial".to_owned()
            })
        );
        assert!("cauchy".parse::<EstimationFamily>().is_err());
    }

    #[test]
    fn test_empty_sample() {
        for family in [
            EstimationFamily::Normal,
            EstimationFamily::Exponential,
            EstimationFamily::Poisson,
        ] {
            assert!(matches!(
                estimate(family, &[]),
                Err(StatsError::DegenerateSample { .. })
            ));
        }
    }

    #[test]
    fn test_non_finite_sample() {
        assert!(matches!(
            method_of_moments(EstimationFamily::Poisson, &[1.0, f64::INFINITY]),
            Err(StatsError::NonFiniteValue { index: 1, .. })
        ));
        assert!(matches!(
            estimate(EstimationFamily::Normal, &[f64::NAN, 2.0]),
            Err(StatsError::NonFiniteValue { index: 0, .. })
        ));
    }
}
