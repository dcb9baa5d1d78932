//! Seeded synthetic datasets.

use std::{collections::BTreeMap, fmt::Display};

use rand::{Rng, SeedableRng as _};
use rand_distr::{Binomial, Distribution, Exp, Normal, Poisson, Uniform};
use rand_pcg::Pcg32;
use statlab_stats::sample::{DataPoint, Dataset};

/// Errors raised while building or running a generator.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum GenerateError {
    #[display("invalid {distribution} parameters: {reason}")]
    InvalidParameters {
        distribution: &'static str,
        reason: String,
    },
    #[display("unknown generator '{name}'")]
    UnknownGenerator { name: String },
}

impl GenerateError {
    fn invalid<E>(distribution: &'static str, e: E) -> Self
    where
        E: Display,
    {
        Self::InvalidParameters {
            distribution,
            reason: e.to_string(),
        }
    }
}

/// Random generator for reproducible datasets; draws a fresh seed when none is given.
#[must_use]
pub fn rng_from_seed(seed: Option<u64>) -> Pcg32 {
    match seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::from_rng(&mut rand::rng()),
    }
}

/// A distribution to sample `x` from; `y` is uniform on `[0, 1)` and only
/// spreads the points on a scatter plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Generator {
    Normal { mean: f64, std_dev: f64 },
    Uniform { min: f64, max: f64 },
    Binomial { trials: u64, probability: f64 },
    Poisson { rate: f64 },
    Exponential { rate: f64 },
}

impl Generator {
    /// Builds a generator from a name and named parameters.
    ///
    /// Missing parameters default to `mu = 0, sigma = 1`, `min = 0, max = 1`,
    /// `n = 10, p = 0.5` and `lambda = 3` (`lambda = 1` for the exponential).
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_params(name: &str, params: &BTreeMap<String, f64>) -> Result<Self, GenerateError> {
        let param = |key: &str, default: f64| params.get(key).copied().unwrap_or(default);
        let generator = match name.trim().to_ascii_lowercase().as_str() {
            "normal" => Self::Normal {
                mean: param("mu", 0.0),
                std_dev: param("sigma", 1.0),
            },
            "uniform" => Self::Uniform {
                min: param("min", 0.0),
                max: param("max", 1.0),
            },
            "binomial" => {
                let n = param("n", 10.0);
                if !(n.is_finite() && n >= 0.0 && n.fract() == 0.0) {
                    return Err(GenerateError::invalid(
                        "binomial",
                        format!("trials must be a non-negative integer, got {n}"),
                    ));
                }
                Self::Binomial {
                    trials: n as u64,
                    probability: param("p", 0.5),
                }
            }
            "poisson" => Self::Poisson {
                rate: param("lambda", 3.0),
            },
            "exponential" => Self::Exponential {
                rate: param("lambda", 1.0),
            },
            _ => {
                return Err(GenerateError::UnknownGenerator {
                    name: name.to_owned(),
                });
            }
        };
        Ok(generator)
    }

    /// Draws `count` points.
    ///
    /// # Examples
    ///
    /// ```
    /// use statlab_data::generator::{rng_from_seed, Generator};
    ///
    /// let generator = Generator::Poisson { rate: 3.0 };
    /// let a = generator.generate(100, &mut rng_from_seed(Some(7))).unwrap();
    /// let b = generator.generate(100, &mut rng_from_seed(Some(7))).unwrap();
    /// assert_eq!(a, b);
    /// assert!(a.points().iter().all(|p| p.x.fract() == 0.0));
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn generate<R>(&self, count: usize, rng: &mut R) -> Result<Dataset, GenerateError>
    where
        R: Rng,
    {
        let xs: Vec<f64> = match *self {
            Self::Normal { mean, std_dev } => {
                let dist =
                    Normal::new(mean, std_dev).map_err(|e| GenerateError::invalid("normal", e))?;
                draw(dist, count, rng)
            }
            Self::Uniform { min, max } => {
                let dist =
                    Uniform::new(min, max).map_err(|e| GenerateError::invalid("uniform", e))?;
                draw(dist, count, rng)
            }
            Self::Binomial {
                trials,
                probability,
            } => {
                let dist = Binomial::new(trials, probability)
                    .map_err(|e| GenerateError::invalid("binomial", e))?;
                (0..count).map(|_| dist.sample(rng) as f64).collect()
            }
            Self::Poisson { rate } => {
                let dist = Poisson::new(rate).map_err(|e| GenerateError::invalid("poisson", e))?;
                draw(dist, count, rng)
            }
            Self::Exponential { rate } => {
                let dist =
                    Exp::new(rate).map_err(|e| GenerateError::invalid("exponential", e))?;
                draw(dist, count, rng)
            }
        };
        Ok(xs
            .into_iter()
            .map(|x| DataPoint::new(x, rng.random::<f64>()))
            .collect())
    }
}

fn draw<D, R>(dist: D, count: usize, rng: &mut R) -> Vec<f64>
where
    D: Distribution<f64>,
    R: Rng,
{
    (0..count).map(|_| dist.sample(rng)).collect()
}

/// Ready-made bivariate datasets for trying out the tests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum Preset {
    /// `x ~ N(10, 2)` against `y ~ N(15, 3)`.
    #[default]
    MeanDifference,
    /// `x` mixes 30 draws of `Exp(0.5)` with 20 of `N(5, 1)`; `y ~ U(0, 10)`.
    MixedVariance,
}

impl Preset {
    /// Number of points every preset produces.
    pub const POINT_COUNT: usize = 50;

    /// Draws the preset's dataset from `rng`.
    pub fn generate<R>(self, rng: &mut R) -> Result<Dataset, GenerateError>
    where
        R: Rng,
    {
        let (xs, ys) = match self {
            Self::MeanDifference => {
                let x = Normal::new(10.0, 2.0).map_err(|e| GenerateError::invalid("normal", e))?;
                let y = Normal::new(15.0, 3.0).map_err(|e| GenerateError::invalid("normal", e))?;
                (
                    draw(x, Self::POINT_COUNT, rng),
                    draw(y, Self::POINT_COUNT, rng),
                )
            }
            Self::MixedVariance => {
                let exp = Exp::new(0.5).map_err(|e| GenerateError::invalid("exponential", e))?;
                let normal =
                    Normal::new(5.0, 1.0).map_err(|e| GenerateError::invalid("normal", e))?;
                let uniform =
                    Uniform::new(0.0, 10.0).map_err(|e| GenerateError::invalid("uniform", e))?;
                let mut xs = draw(exp, 30, rng);
                xs.extend(draw(normal, Self::POINT_COUNT - 30, rng));
                (xs, draw(uniform, Self::POINT_COUNT, rng))
            }
        };
        Ok(xs
            .into_iter()
            .zip(ys)
            .map(|(x, y)| DataPoint::new(x, y))
            .collect())
    }
}
