//! Special functions backing the inferential procedures.
//!
//! Everything here is a total numeric approximation: valid input produces a
//! finite value or a documented boundary value (`0.0`, `1.0`, `f64::INFINITY`),
//! and input outside the mathematical domain produces `f64::NAN` instead of an
//! error. Accuracy near the extreme tails is bounded; each function documents the
//! range in which its stated error holds.

use std::f64::consts::PI;

/// Probabilities passed to the quantile functions are clamped to
/// `[P_MIN, 1 - P_MIN]`.
pub const P_MIN: f64 = 1e-6;

/// Above this many degrees of freedom the Student-t functions use the normal limit.
pub const T_NORMAL_LIMIT_DF: u64 = 10_000;

const SERIES_MAX_TERMS: usize = 100;
const SERIES_EPSILON: f64 = 1e-10;

const REGULARIZED_MAX_ITER: usize = 1_000;
const REGULARIZED_EPSILON: f64 = 1e-15;
const LENTZ_FLOOR: f64 = 1e-300;

const NEWTON_STEPS: usize = 8;
const BISECTION_STEPS: usize = 200;

const LANCZOS_G: f64 = 7.0;
#[expect(clippy::excessive_precision)]
const LANCZOS_COEFFICIENTS: [f64; 9] = [
    0.999_999_999_999_809_93,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_13,
    -176.615_029_162_140_59,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_571_6e-6,
    1.505_632_735_149_311_6e-7,
];

/// Standard normal density.
#[must_use]
pub fn standard_normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Standard normal cumulative distribution function.
///
/// Uses the Abramowitz & Stegun 26.2.17 rational approximation of the upper
/// tail, with absolute error below `7.5e-8` over the whole real line.
///
/// # Examples
///
/// ```
/// use statlab_stats::special::normal_cdf;
///
/// assert!((normal_cdf(0.0) - 0.5).abs() < 1e-6);
/// assert!((normal_cdf(1.96) - 0.975).abs() < 1e-4);
/// ```
#[must_use]
pub fn normal_cdf(x: f64) -> f64 {
    const P: f64 = 0.231_641_9;
    const B: [f64; 5] = [
        0.319_381_530,
        -0.356_563_782,
        1.781_477_937,
        -1.821_255_978,
        1.330_274_429,
    ];

    if x.is_nan() {
        return f64::NAN;
    }
    let t = 1.0 / (1.0 + P * x.abs());
    let poly = t * (B[0] + t * (B[1] + t * (B[2] + t * (B[3] + t * B[4]))));
    let tail = standard_normal_pdf(x) * poly;
    if x >= 0.0 { 1.0 - tail } else { tail }
}

/// Inverse of the standard normal CDF.
///
/// Wichura's AS241 rational approximation: a central polynomial for
/// `|p - 0.5| <= 0.425` and two tail polynomials split at `r = 5`, where
/// `r = sqrt(-ln(min(p, 1 - p)))`. `p` is clamped to `[P_MIN, 1 - P_MIN]`,
/// so the result always lies within about `±4.75`.
#[expect(clippy::excessive_precision)]
#[must_use]
pub fn inverse_normal_cdf(p: f64) -> f64 {
    const A: [f64; 8] = [
        2.509_080_928_730_122_7e3,
        3.343_057_558_358_813e4,
        6.726_577_092_700_871e4,
        4.592_195_393_154_987e4,
        1.373_169_376_550_946_2e4,
        1.971_590_950_306_551_3e3,
        1.331_416_678_917_843_8e2,
        3.387_132_872_796_366_5,
    ];
    const B: [f64; 8] = [
        5.226_495_278_852_854e3,
        2.872_908_573_572_194_3e4,
        3.930_789_580_009_271e4,
        2.121_379_430_158_659_5e4,
        5.394_196_021_424_751e3,
        6.871_870_074_920_579e2,
        4.231_333_070_160_091e1,
        1.0,
    ];
    const C: [f64; 8] = [
        7.745_450_142_783_414e-4,
        2.272_384_498_926_918_4e-2,
        2.417_807_251_774_506e-1,
        1.270_458_252_452_368_4,
        3.647_848_324_763_204_5,
        5.769_497_221_460_691,
        4.630_337_846_156_545,
        1.423_437_110_749_683_5,
    ];
    const D: [f64; 8] = [
        1.050_750_071_644_416_9e-9,
        5.475_938_084_995_345e-4,
        1.519_866_656_361_645_8e-2,
        1.481_039_764_274_800_7e-1,
        6.897_673_349_851e-1,
        1.676_384_830_183_803_8,
        2.053_191_626_637_758_8,
        1.0,
    ];
    const E: [f64; 8] = [
        2.010_334_399_292_288_1e-7,
        2.711_555_568_743_487_6e-5,
        1.242_660_947_388_078_4e-3,
        2.653_218_952_657_612_4e-2,
        2.965_605_718_285_049e-1,
        1.784_826_539_917_291_3,
        5.463_784_911_164_114,
        6.657_904_643_501_103_5,
    ];
    const F: [f64; 8] = [
        2.044_263_103_389_939_7e-15,
        1.421_511_758_316_445_8e-7,
        1.846_318_317_510_054_8e-5,
        7.868_691_311_456_132e-4,
        1.487_536_129_085_061_5e-2,
        1.369_298_809_227_358e-1,
        5.998_322_065_558_879e-1,
        1.0,
    ];

    if p.is_nan() {
        return f64::NAN;
    }
    let p = p.clamp(P_MIN, 1.0 - P_MIN);
    let q = p - 0.5;

    if q.abs() <= 0.425 {
        let r = 0.180_625 - q * q;
        return q * polynomial(r, &A) / polynomial(r, &B);
    }

    let r = (-(if q < 0.0 { p } else { 1.0 - p }).ln()).sqrt();
    let x = if r <= 5.0 {
        let r = r - 1.6;
        polynomial(r, &C) / polynomial(r, &D)
    } else {
        let r = r - 5.0;
        polynomial(r, &E) / polynomial(r, &F)
    };
    if q < 0.0 { -x } else { x }
}

/// Horner evaluation, coefficients from the highest power down.
fn polynomial(x: f64, coefficients: &[f64]) -> f64 {
    coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
}

/// Student-t cumulative distribution function with `df` degrees of freedom.
///
/// Evaluates the arctangent series of Abramowitz & Stegun 26.7.3 (odd `df`) and
/// 26.7.4 (even `df`) in `θ = atan(t / √df)`, which is exact for integer degrees
/// of freedom up to rounding. Beyond [`T_NORMAL_LIMIT_DF`] the normal limit is
/// used (absolute error below `1e-5`). Returns `NaN` for `df == 0`.
///
/// # Examples
///
/// ```
/// use statlab_stats::special::t_cdf;
///
/// // Cauchy distribution for one degree of freedom
/// assert!((t_cdf(1.0, 1) - 0.75).abs() < 1e-12);
/// assert!((t_cdf(0.0, 24) - 0.5).abs() < 1e-12);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn t_cdf(t: f64, df: u64) -> f64 {
    if df == 0 || t.is_nan() {
        return f64::NAN;
    }
    if t.is_infinite() {
        return if t > 0.0 { 1.0 } else { 0.0 };
    }
    if df > T_NORMAL_LIMIT_DF {
        return normal_cdf(t);
    }

    let nu = df as f64;
    let theta = (t.abs() / nu.sqrt()).atan();
    let (sin, cos) = theta.sin_cos();
    let cos2 = cos * cos;

    let central = if df % 2 == 1 {
        let mut term = cos;
        let mut sum = 0.0;
        for j in 1..=(df - 1) / 2 {
            sum += term;
            term *= cos2 * (2 * j) as f64 / (2 * j + 1) as f64;
            if term < sum * f64::EPSILON * 1e-2 {
                break;
            }
        }
        2.0 / PI * (theta + sin * sum)
    } else {
        let mut term = 1.0;
        let mut sum = 0.0;
        for j in 0..df / 2 {
            sum += term;
            term *= cos2 * (2 * j + 1) as f64 / (2 * j + 2) as f64;
            if term < sum * f64::EPSILON * 1e-2 {
                break;
            }
        }
        sin * sum
    };

    let half = 0.5 * central.min(1.0);
    if t >= 0.0 { 0.5 + half } else { 0.5 - half }
}

/// Student-t density.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn t_pdf(t: f64, df: u64) -> f64 {
    if df == 0 {
        return f64::NAN;
    }
    let nu = df as f64;
    let log_norm = ln_gamma((nu + 1.0) / 2.0) - ln_gamma(nu / 2.0) - 0.5 * (nu * PI).ln();
    (log_norm - (nu + 1.0) / 2.0 * (t * t / nu).ln_1p()).exp()
}

/// Inverse of the Student-t CDF.
///
/// Starts from the Cornish-Fisher expansion around the normal quantile
/// (Abramowitz & Stegun 26.7.5, four correction terms) and polishes it with
/// Newton steps against [`t_cdf`], so the two functions agree to about `1e-12`.
/// One and two degrees of freedom use their closed forms. `p` is clamped like
/// [`inverse_normal_cdf`].
///
/// # Examples
///
/// ```
/// use statlab_stats::special::t_inverse_cdf;
///
/// assert!((t_inverse_cdf(0.975, 24) - 2.0639).abs() < 1e-3);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn t_inverse_cdf(p: f64, df: u64) -> f64 {
    if df == 0 || p.is_nan() {
        return f64::NAN;
    }
    let p = p.clamp(P_MIN, 1.0 - P_MIN);
    match df {
        1 => return (PI * (p - 0.5)).tan(),
        2 => return (2.0 * p - 1.0) / (2.0 * p * (1.0 - p)).sqrt(),
        _ => {}
    }
    if df > T_NORMAL_LIMIT_DF {
        return inverse_normal_cdf(p);
    }

    let nu = df as f64;
    let z = inverse_normal_cdf(p);
    let z2 = z * z;
    let g1 = (z2 + 1.0) * z / 4.0;
    let g2 = ((5.0 * z2 + 16.0) * z2 + 3.0) * z / 96.0;
    let g3 = (((3.0 * z2 + 19.0) * z2 + 17.0) * z2 - 15.0) * z / 384.0;
    let g4 = ((((79.0 * z2 + 776.0) * z2 + 1482.0) * z2 - 1920.0) * z2 - 945.0) * z / 92_160.0;
    let mut t = z + g1 / nu + g2 / nu.powi(2) + g3 / nu.powi(3) + g4 / nu.powi(4);

    for _ in 0..NEWTON_STEPS {
        let density = t_pdf(t, df);
        if !density.is_finite() || density <= 0.0 {
            break;
        }
        let step = (t_cdf(t, df) - p) / density;
        t -= step;
        if step.abs() < 1e-12 * t.abs().max(1.0) {
            break;
        }
    }
    t
}

/// Chi-square cumulative distribution function, `P(df/2, x/2)`.
///
/// Evaluated through [`regularized_lower_gamma`] so that large degrees of freedom
/// do not overflow `Γ(df/2)`. Returns `0` for `x <= 0` and `NaN` for `df == 0`.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn chi_square_cdf(x: f64, df: u64) -> f64 {
    if df == 0 || x.is_nan() {
        return f64::NAN;
    }
    if x <= 0.0 {
        return 0.0;
    }
    regularized_lower_gamma(df as f64 / 2.0, x / 2.0)
}

/// Inverse of the chi-square CDF, found by bisection on [`chi_square_cdf`].
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn chi_square_inverse_cdf(p: f64, df: u64) -> f64 {
    if df == 0 || p.is_nan() {
        return f64::NAN;
    }
    let p = p.clamp(P_MIN, 1.0 - P_MIN);
    let nu = df as f64;

    let mut lo = 0.0;
    let mut hi = nu + 10.0 * (2.0 * nu).sqrt() + 10.0;
    while chi_square_cdf(hi, df) < p {
        lo = hi;
        hi *= 2.0;
    }
    for _ in 0..BISECTION_STEPS {
        let mid = 0.5 * (lo + hi);
        if chi_square_cdf(mid, df) < p {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo <= 1e-12 * hi.max(1.0) {
            break;
        }
    }
    0.5 * (lo + hi)
}

/// Gamma function by the Lanczos approximation (`g = 7`, nine coefficients).
///
/// Arguments below `0.5` go through the reflection formula
/// `Γ(z)Γ(1 - z) = π / sin(πz)`. Poles (zero and negative integers) give `NaN`;
/// arguments above about `171.6` overflow to infinity.
///
/// # Examples
///
/// ```
/// use statlab_stats::special::gamma;
///
/// assert!((gamma(5.0) - 24.0).abs() < 1e-9);
/// assert!((gamma(0.5) - std::f64::consts::PI.sqrt()).abs() < 1e-12);
/// ```
#[must_use]
pub fn gamma(z: f64) -> f64 {
    if z.is_nan() || (z <= 0.0 && z.fract() == 0.0) {
        return f64::NAN;
    }
    if z < 0.5 {
        return PI / ((PI * z).sin() * gamma(1.0 - z));
    }
    let z = z - 1.0;
    let t = z + LANCZOS_G + 0.5;
    (2.0 * PI).sqrt() * t.powf(z + 0.5) * (-t).exp() * lanczos_sum(z)
}

/// Natural logarithm of `|Γ(z)|`.
#[must_use]
pub fn ln_gamma(z: f64) -> f64 {
    if z.is_nan() || (z <= 0.0 && z.fract() == 0.0) {
        return f64::NAN;
    }
    if z < 0.5 {
        return (PI / (PI * z).sin().abs()).ln() - ln_gamma(1.0 - z);
    }
    let z = z - 1.0;
    let t = z + LANCZOS_G + 0.5;
    0.5 * (2.0 * PI).ln() + (z + 0.5) * t.ln() - t + lanczos_sum(z).ln()
}

#[expect(clippy::cast_precision_loss)]
fn lanczos_sum(z: f64) -> f64 {
    LANCZOS_COEFFICIENTS
        .iter()
        .enumerate()
        .skip(1)
        .fold(LANCZOS_COEFFICIENTS[0], |sum, (i, &c)| sum + c / (z + i as f64))
}

/// Lower incomplete gamma function `γ(a, x)` (not regularized).
///
/// Power series `x^a e^-x Σ x^n / (a (a+1) ... (a+n))`, stopping once a term
/// drops below `1e-10` or after 100 terms. Accurate while `x` is not much larger
/// than `a + 100`; use [`regularized_lower_gamma`] for distribution functions.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn lower_incomplete_gamma(a: f64, x: f64) -> f64 {
    if a.is_nan() || x.is_nan() || a <= 0.0 || x < 0.0 {
        return f64::NAN;
    }
    if x == 0.0 {
        return 0.0;
    }
    let mut term = 1.0 / a;
    let mut sum = term;
    for n in 1..SERIES_MAX_TERMS {
        term *= x / (a + n as f64);
        sum += term;
        if term.abs() < SERIES_EPSILON {
            break;
        }
    }
    (a * x.ln() - x).exp() * sum
}

/// Regularized lower incomplete gamma function `P(a, x) = γ(a, x) / Γ(a)`.
///
/// Series expansion below `x = a + 1`, modified Lentz continued fraction for the
/// complement above it; both are combined with `ln Γ(a)` in log space.
#[must_use]
pub fn regularized_lower_gamma(a: f64, x: f64) -> f64 {
    if a.is_nan() || x.is_nan() || a <= 0.0 || x < 0.0 {
        return f64::NAN;
    }
    if x == 0.0 {
        return 0.0;
    }
    if x.is_infinite() {
        return 1.0;
    }
    let value = if x < a + 1.0 {
        gamma_series(a, x)
    } else {
        1.0 - gamma_continued_fraction(a, x)
    };
    value.clamp(0.0, 1.0)
}

fn gamma_series(a: f64, x: f64) -> f64 {
    let mut ap = a;
    let mut term = 1.0 / a;
    let mut sum = term;
    for _ in 0..REGULARIZED_MAX_ITER {
        ap += 1.0;
        term *= x / ap;
        sum += term;
        if term.abs() < sum.abs() * REGULARIZED_EPSILON {
            break;
        }
    }
    (sum.ln() + a * x.ln() - x - ln_gamma(a)).exp()
}

/// Upper regularized gamma `Q(a, x)` for `x >= a + 1`.
#[expect(clippy::cast_precision_loss)]
fn gamma_continued_fraction(a: f64, x: f64) -> f64 {
    let mut b = x + 1.0 - a;
    let mut c = 1.0 / LENTZ_FLOOR;
    let mut d = 1.0 / b;
    let mut h = d;
    for i in 1..REGULARIZED_MAX_ITER {
        let i = i as f64;
        let an = -i * (i - a);
        b += 2.0;
        d = an * d + b;
        if d.abs() < LENTZ_FLOOR {
            d = LENTZ_FLOOR;
        }
        c = b + an / c;
        if c.abs() < LENTZ_FLOOR {
            c = LENTZ_FLOOR;
        }
        d = 1.0 / d;
        let delta = d * c;
        h *= delta;
        if (delta - 1.0).abs() < REGULARIZED_EPSILON {
            break;
        }
    }
    (a * x.ln() - x - ln_gamma(a)).exp() * h
}

/// `n!` as a float; overflows to infinity above `170!`.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn factorial(n: u64) -> f64 {
    if n > 170 {
        return f64::INFINITY;
    }
    (2..=n).map(|i| i as f64).product()
}

/// Binomial coefficient `C(n, k)`, zero when `k > n`.
///
/// Built by the multiplicative formula so every intermediate value is itself a
/// binomial coefficient; exact while the result stays below `2^53`.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn combination(n: u64, k: u64) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut result = 1.0;
    for i in 1..=k {
        result = result * (n - k + i) as f64 / i as f64;
    }
    if result < 9_007_199_254_740_992.0 {
        result.round()
    } else {
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual} (tolerance {tolerance})"
        );
    }

    #[test]
    fn test_normal_cdf_reference_values() {
        assert_close(normal_cdf(0.0), 0.5, 1e-6);
        assert_close(normal_cdf(1.0), 0.841_344_746, 1e-7);
        assert_close(normal_cdf(-1.0), 0.158_655_254, 1e-7);
        assert_close(normal_cdf(1.959_964), 0.975, 1e-7);
        assert_close(normal_cdf(-3.0), 0.001_349_898, 1e-7);
        assert_eq!(normal_cdf(f64::INFINITY), 1.0);
        assert_eq!(normal_cdf(f64::NEG_INFINITY), 0.0);
        assert!(normal_cdf(f64::NAN).is_nan());
    }

    #[test]
    fn test_normal_cdf_is_monotonic() {
        let mut previous = 0.0;
        for i in -800..=800 {
            let z = f64::from(i) / 100.0;
            let value = normal_cdf(z);
            assert!(value >= previous, "not monotonic at z = {z}");
            previous = value;
        }
    }

    #[test]
    fn test_inverse_normal_cdf_reference_values() {
        assert_close(inverse_normal_cdf(0.5), 0.0, 1e-12);
        assert_close(inverse_normal_cdf(0.975), 1.959_963_985, 1e-8);
        assert_close(inverse_normal_cdf(0.95), 1.644_853_627, 1e-8);
        assert_close(inverse_normal_cdf(0.005), -2.575_829_304, 1e-8);
        assert_close(inverse_normal_cdf(1e-4), -3.719_016_485, 1e-8);
    }

    #[test]
    fn test_inverse_normal_cdf_clamps_probability() {
        assert_eq!(inverse_normal_cdf(0.0), inverse_normal_cdf(P_MIN));
        assert_eq!(inverse_normal_cdf(1.0), inverse_normal_cdf(1.0 - P_MIN));
        assert!(inverse_normal_cdf(0.0).is_finite());
        assert!(inverse_normal_cdf(f64::NAN).is_nan());
    }

    #[test]
    fn test_normal_round_trip() {
        for i in -40..=40 {
            let z = f64::from(i) / 10.0;
            assert_close(inverse_normal_cdf(normal_cdf(z)), z, 1e-3);
        }
    }

    #[test]
    fn test_t_cdf_closed_forms() {
        // df = 1 is Cauchy, df = 2 has a rational closed form
        for &t in &[-3.0, -0.5, 0.0, 0.7, 4.0_f64] {
            assert_close(t_cdf(t, 1), 0.5 + t.atan() / PI, 1e-12);
            assert_close(t_cdf(t, 2), 0.5 + t / (2.0 * (2.0 + t * t).sqrt()), 1e-12);
        }
    }

    #[test]
    fn test_t_cdf_reference_values() {
        assert_close(t_cdf(2.0, 24), 0.971_530, 1e-6);
        assert_close(t_cdf(2.228, 10), 0.975, 1e-4);
        assert_close(t_cdf(-2.015, 5), 0.05, 1e-4);
        assert_close(t_cdf(1.0, 3) + t_cdf(-1.0, 3), 1.0, 1e-12);
    }

    #[test]
    fn test_t_cdf_approaches_normal() {
        for &t in &[-2.5, -1.0, 0.3, 1.96] {
            assert_close(t_cdf(t, 5_000), normal_cdf(t), 1e-4);
            assert_close(t_cdf(t, 50_000), normal_cdf(t), 1e-6);
        }
        assert!(t_cdf(1.0, 0).is_nan());
    }

    #[test]
    fn test_t_inverse_cdf_matches_tables() {
        assert_close(t_inverse_cdf(0.975, 1), 12.706_2, 1e-3);
        assert_close(t_inverse_cdf(0.975, 2), 4.302_7, 1e-3);
        assert_close(t_inverse_cdf(0.975, 5), 2.570_6, 1e-3);
        assert_close(t_inverse_cdf(0.975, 24), 2.063_9, 1e-3);
        assert_close(t_inverse_cdf(0.995, 30), 2.750_0, 1e-3);
        assert_close(t_inverse_cdf(0.05, 10), -1.812_5, 1e-3);
    }

    #[test]
    fn test_t_inverse_cdf_round_trip() {
        for df in [3, 4, 7, 15, 99] {
            for &p in &[0.01, 0.1, 0.5, 0.8, 0.999] {
                assert_close(t_cdf(t_inverse_cdf(p, df), df), p, 1e-9);
            }
        }
    }

    #[test]
    fn test_chi_square_cdf_reference_values() {
        // df = 2 is exponential with mean 2
        for &x in &[0.5, 1.0, 3.0, 10.0_f64] {
            assert_close(chi_square_cdf(x, 2), 1.0 - (-x / 2.0).exp(), 1e-12);
        }
        assert_close(chi_square_cdf(3.841_459, 1), 0.95, 1e-6);
        assert_close(chi_square_cdf(36.415_03, 24), 0.95, 1e-6);
        assert_eq!(chi_square_cdf(-1.0, 3), 0.0);
        assert!(chi_square_cdf(1.0, 0).is_nan());
    }

    #[test]
    fn test_chi_square_cdf_large_df_does_not_overflow() {
        // median of chi-square(999) is close to df - 2/3
        let value = chi_square_cdf(998.333, 999);
        assert_close(value, 0.5, 1e-3);
    }

    #[test]
    fn test_chi_square_inverse_cdf() {
        assert_close(chi_square_inverse_cdf(0.95, 1), 3.841_459, 1e-5);
        assert_close(chi_square_inverse_cdf(0.025, 24), 12.401_15, 1e-4);
        assert_close(chi_square_inverse_cdf(0.975, 24), 39.364_08, 1e-4);
    }

    #[test]
    fn test_gamma_values() {
        assert_close(gamma(1.0), 1.0, 1e-12);
        assert_close(gamma(5.0), 24.0, 1e-9);
        assert_close(gamma(0.5), PI.sqrt(), 1e-12);
        assert_close(gamma(10.5), 1_133_278.388_7, 1e-3);
        assert!(gamma(0.0).is_nan());
        assert!(gamma(-3.0).is_nan());
    }

    #[test]
    fn test_gamma_reflection() {
        for &z in &[-2.5, -0.5, 0.1, 0.25, 0.4_f64] {
            let product = gamma(z) * gamma(1.0 - z);
            assert_close(product, PI / (PI * z).sin(), 1e-9 * product.abs().max(1.0));
        }
        assert_close(gamma(-0.5), -2.0 * PI.sqrt(), 1e-10);
    }

    #[test]
    fn test_ln_gamma_matches_gamma() {
        for &z in &[0.3, 1.5, 4.0, 12.5, 60.0_f64] {
            assert_close(ln_gamma(z), gamma(z).ln(), 1e-9 * gamma(z).ln().abs().max(1.0));
        }
    }

    #[test]
    fn test_lower_incomplete_gamma() {
        // γ(1, x) = 1 - e^-x
        for &x in &[0.1, 1.0, 2.5, 8.0_f64] {
            assert_close(lower_incomplete_gamma(1.0, x), 1.0 - (-x).exp(), 1e-9);
        }
        // γ(2, x) = 1 - (1 + x) e^-x
        assert_close(
            lower_incomplete_gamma(2.0, 3.0),
            1.0 - 4.0 * (-3.0_f64).exp(),
            1e-9,
        );
        assert_eq!(lower_incomplete_gamma(2.0, 0.0), 0.0);
        assert!(lower_incomplete_gamma(-1.0, 1.0).is_nan());
    }

    #[test]
    fn test_regularized_lower_gamma_agrees_with_series() {
        for &(a, x) in &[(0.5, 0.3), (2.0, 1.0), (3.5, 6.0), (12.0, 9.0)] {
            assert_close(
                regularized_lower_gamma(a, x),
                lower_incomplete_gamma(a, x) / gamma(a),
                1e-9,
            );
        }
        assert_eq!(regularized_lower_gamma(3.0, f64::INFINITY), 1.0);
    }

    #[test]
    fn test_factorial_and_combination() {
        assert_eq!(factorial(0), 1.0);
        assert_eq!(factorial(1), 1.0);
        assert_eq!(factorial(10), 3_628_800.0);
        assert!(factorial(171).is_infinite());

        assert_eq!(combination(10, 3), 120.0);
        assert_eq!(combination(10, 0), 1.0);
        assert_eq!(combination(10, 10), 1.0);
        assert_eq!(combination(52, 5), 2_598_960.0);
        assert_eq!(combination(3, 4), 0.0);
        assert_eq!(combination(300, 2), 44_850.0);
    }
}
