//! Fixed-point Black-Scholes premium approximation
//!
//! Prices a European call on-chain without floating point. All quantities are
//! fixed-point numbers scaled by `SCALE` (6 decimal places); intermediate
//! arithmetic is signed 128-bit and overflow-checked. The transcendental
//! functions are low-order approximations, accurate near the money:
//! `ln` is linearized around 1.0, `exp` is a cubic Taylor series, and the
//! normal CDF is the tangent-line approximation `0.5 + d / sqrt(2*pi)`
//! clamped to [0, 1].

use {crate::{error::ProtocolError, math}, anchor_lang::prelude::*};

/// Fixed-point scaling factor (6 decimal places)
pub const SCALE: i128 = 1_000_000;
/// Seconds in a 365-day year, used to convert expiry horizons to year units
const SECONDS_PER_YEAR: i128 = 31_536_000;
/// sqrt(2 * pi) scaled by `SCALE`
const SQRT_2_PI: i128 = 2_506_628;

/// Computes an approximate Black-Scholes call premium.
///
/// # Arguments
/// * `spot` - Current price of the underlying (smallest units)
/// * `strike` - Strike price (smallest units)
/// * `seconds_to_expiry` - Time to expiration in seconds
/// * `risk_free_rate` - Annualized risk-free rate scaled by 1e6 (5% -> 50_000)
/// * `volatility` - Annualized volatility scaled by 1e6 (50% -> 500_000)
///
/// # Returns
/// Call premium in the same smallest units as `spot`. A position with zero
/// time value or zero volatility prices to 0 rather than erroring.
pub fn black_scholes_call(
    spot: u64,
    strike: u64,
    seconds_to_expiry: u64,
    risk_free_rate: u64,
    volatility: u64,
) -> Result<u64> {
    if spot == 0 || strike == 0 {
        return err!(ProtocolError::InvalidPricingInput);
    }

    let s_fp = math::checked_mul(spot as i128, SCALE)?;
    let k_fp = math::checked_mul(strike as i128, SCALE)?;
    let t_fp = math::checked_div(
        math::checked_mul(seconds_to_expiry as i128, SCALE)?,
        SECONDS_PER_YEAR,
    )?;
    let r_fp = risk_free_rate as i128;
    let sigma_fp = volatility as i128;

    // d1 = [ln(s / k) + (r + sigma^2 / 2) * t] / (sigma * sqrt(t))
    // d2 = d1 - sigma * sqrt(t)
    let ln_s_div_k = ln_fp(math::checked_div(math::checked_mul(s_fp, SCALE)?, k_fp)?)?;
    let sigma_squared = math::checked_div(math::checked_mul(sigma_fp, sigma_fp)?, SCALE)?;
    let drift = math::checked_add(r_fp, math::checked_div(sigma_squared, 2)?)?;

    let numerator = math::checked_add(
        ln_s_div_k,
        math::checked_div(math::checked_mul(drift, t_fp)?, SCALE)?,
    )?;
    let sigma_sqrt_t = math::checked_div(math::checked_mul(sigma_fp, sqrt_fp(t_fp)?)?, SCALE)?;
    if sigma_sqrt_t == 0 {
        return Ok(0);
    }
    let d1 = math::checked_div(math::checked_mul(numerator, SCALE)?, sigma_sqrt_t)?;
    let d2 = math::checked_sub(d1, sigma_sqrt_t)?;

    let nd1 = standard_normal_cdf(d1)?;
    let nd2 = standard_normal_cdf(d2)?;

    // C = S * N(d1) - K * e^{-r * t} * N(d2), floored at zero
    let s_nd1 = math::checked_div(math::checked_mul(s_fp, nd1)?, SCALE)?;
    let r_t = math::checked_div(math::checked_mul(r_fp, t_fp)?, SCALE)?;
    let discount = exp_fp(math::checked_sub(0, r_t)?)?;
    let k_discounted = math::checked_div(math::checked_mul(k_fp, discount)?, SCALE)?;
    let k_discounted_nd2 = math::checked_div(math::checked_mul(k_discounted, nd2)?, SCALE)?;

    let premium_fp = if s_nd1 > k_discounted_nd2 {
        math::checked_sub(s_nd1, k_discounted_nd2)?
    } else {
        0
    };

    math::checked_as_u64(math::checked_div(premium_fp, SCALE)?)
}

/// Fixed-point natural logarithm, linearized around 1.0: ln(x) ~ x - 1
fn ln_fp(x_fp: i128) -> Result<i128> {
    math::checked_sub(x_fp, SCALE)
}

/// Fixed-point exponential via cubic Taylor series:
/// e^x ~ 1 + x + x^2/2! + x^3/3!
///
/// Only used for discount factors (non-positive x), where the true value
/// lies in (0, 1]. The cubic goes negative once x drops below roughly -2.5,
/// so the result is clamped to [0, SCALE]; an unclamped negative discount
/// would flip the sign of the strike term and let the premium exceed spot.
fn exp_fp(x_fp: i128) -> Result<i128> {
    let x1 = x_fp;
    let x2 = math::checked_div(math::checked_mul(x1, x1)?, SCALE)?;
    let x3 = math::checked_div(math::checked_mul(x2, x1)?, SCALE)?;

    let mut res = math::checked_add(SCALE, x1)?;
    res = math::checked_add(res, math::checked_div(x2, 2)?)?;
    res = math::checked_add(res, math::checked_div(x3, 6)?)?;
    Ok(res.clamp(0, SCALE))
}

/// Fixed-point square root: floor(sqrt(x)) in `SCALE` units.
///
/// Integer Newton iteration on `x * SCALE`; monotonically decreasing from the
/// initial guess, so it converges for all non-negative inputs.
fn sqrt_fp(x_fp: i128) -> Result<i128> {
    if x_fp < 0 {
        return err!(ProtocolError::InvalidPricingInput);
    }
    if x_fp == 0 {
        return Ok(0);
    }
    let scaled = math::checked_mul(x_fp, SCALE)?;
    let mut z = scaled;
    let mut y = math::checked_add(math::checked_div(scaled, 2)?, 1)?;
    while y < z {
        z = y;
        y = math::checked_div(math::checked_add(math::checked_div(scaled, y)?, y)?, 2)?;
    }
    Ok(z)
}

/// Standard normal CDF approximation: N(d) ~ 0.5 + d / sqrt(2 * pi),
/// clamped to [0, SCALE]
fn standard_normal_cdf(d_fp: i128) -> Result<i128> {
    let linear = math::checked_div(math::checked_mul(d_fp, SCALE)?, SQRT_2_PI)?;
    let nd_fp = math::checked_add(math::checked_div(SCALE, 2)?, linear)?;
    Ok(nd_fp.clamp(0, SCALE))
}

#[cfg(test)]
mod test {
    use super::*;

    const ONE_YEAR: u64 = 31_536_000;

    #[test]
    fn test_sqrt_fp() {
        assert_eq!(sqrt_fp(0).unwrap(), 0);
        // sqrt(1.0) = 1.0
        assert_eq!(sqrt_fp(1_000_000).unwrap(), 1_000_000);
        // sqrt(0.25) = 0.5
        assert_eq!(sqrt_fp(250_000).unwrap(), 500_000);
        // sqrt(4.0) = 2.0
        assert_eq!(sqrt_fp(4_000_000).unwrap(), 2_000_000);
        assert!(sqrt_fp(-1).is_err());
    }

    #[test]
    fn test_exp_fp() {
        // e^0 = 1
        assert_eq!(exp_fp(0).unwrap(), SCALE);
        // e^{-0.05} = 0.951229..., cubic series gives 0.951230
        assert_eq!(exp_fp(-50_000).unwrap(), 951_230);
        // e^{-0.0125} = 0.987578
        assert_eq!(exp_fp(-12_500).unwrap(), 987_578);
        // the cubic series is negative at -3.0; clamps to 0 instead
        assert_eq!(exp_fp(-3_000_000).unwrap(), 0);
    }

    #[test]
    fn test_standard_normal_cdf() {
        assert_eq!(standard_normal_cdf(0).unwrap(), 500_000);
        // N(0.35) ~ 0.639629 under the tangent-line approximation
        assert_eq!(standard_normal_cdf(350_000).unwrap(), 639_629);
        assert_eq!(standard_normal_cdf(-150_000).unwrap(), 440_159);
        // deep tails clamp
        assert_eq!(standard_normal_cdf(10 * SCALE).unwrap(), SCALE);
        assert_eq!(standard_normal_cdf(-10 * SCALE).unwrap(), 0);
    }

    #[test]
    fn test_at_the_money_one_year() {
        // s = k = 100.0, 1 year, r = 5%, sigma = 50%
        let premium =
            black_scholes_call(100_000_000, 100_000_000, ONE_YEAR, 50_000, 500_000).unwrap();
        // reference Black-Scholes gives ~21.79; the linearized CDF lands close
        assert_eq!(premium, 22_093_655);
    }

    #[test]
    fn test_in_the_money_quarter_year() {
        // s = 150.0, k = 100.0, 3 months, r = 5%, sigma = 50%
        let premium =
            black_scholes_call(150_000_000, 100_000_000, ONE_YEAR / 4, 50_000, 500_000).unwrap();
        // both CDFs clamp to 1, so the premium is s - k * e^{-r t}
        assert_eq!(premium, 51_242_200);
    }

    #[test]
    fn test_out_of_the_money_one_year() {
        // s = 80.0, k = 100.0, 1 year, r = 5%, sigma = 50%
        let premium =
            black_scholes_call(80_000_000, 100_000_000, ONE_YEAR, 50_000, 500_000).unwrap();
        assert_eq!(premium, 11_714_438);
    }

    #[test]
    fn test_zero_volatility_prices_to_zero() {
        assert_eq!(
            black_scholes_call(100_000_000, 100_000_000, ONE_YEAR, 50_000, 0).unwrap(),
            0
        );
        // zero time to expiry behaves the same way
        assert_eq!(
            black_scholes_call(100_000_000, 100_000_000, 0, 50_000, 500_000).unwrap(),
            0
        );
    }

    #[test]
    fn test_rejects_zero_prices() {
        assert!(black_scholes_call(0, 100_000_000, ONE_YEAR, 50_000, 500_000).is_err());
        assert!(black_scholes_call(100_000_000, 0, ONE_YEAR, 50_000, 500_000).is_err());
    }

    #[test]
    fn test_premium_never_exceeds_spot() {
        // rate and expiration are caller-supplied, so large r*t values are
        // reachable; the discount clamp holds the premium to the spot bound
        for rate in [50_000u64, 1_000_000, 3_000_000, 10_000_000] {
            let premium =
                black_scholes_call(100_000_000, 100_000_000, ONE_YEAR, rate, 500_000).unwrap();
            assert!(
                premium <= 100_000_000,
                "premium {} exceeds spot at rate {}",
                premium,
                rate
            );
        }
        // fully discounted strike: the premium degenerates to the spot value
        assert_eq!(
            black_scholes_call(100_000_000, 100_000_000, ONE_YEAR, 3_000_000, 500_000).unwrap(),
            100_000_000
        );
    }

    #[test]
    fn test_premium_increases_with_moneyness() {
        let mut last = 0;
        for spot in [60_000_000u64, 80_000_000, 100_000_000, 120_000_000, 140_000_000] {
            let premium =
                black_scholes_call(spot, 100_000_000, ONE_YEAR, 50_000, 500_000).unwrap();
            assert!(premium >= last, "premium not monotonic at spot {}", spot);
            last = premium;
        }
    }
}
