//! Special functions behind the hydrogen wavefunction: factorials and the
//! associated Legendre and Laguerre polynomials.

/// Largest `n` whose factorial fits in a `u64`.
pub const MAX_EXACT_FACTORIAL: u32 = 20;

/// Largest `n` whose factorial is finite as an `f64`.
pub const MAX_FINITE_FACTORIAL: u32 = 170;

/// n! for `n <= MAX_EXACT_FACTORIAL`. `0! = 1! = 1`.
pub fn factorial(n: u32) -> u64 {
    debug_assert!(
        n <= MAX_EXACT_FACTORIAL,
        "factorial({n}) overflows u64; use n <= {MAX_EXACT_FACTORIAL}"
    );
    (1..=n as u64).product()
}

/// Factorial as a float. Exact up to 20!, accumulated in `f64` up to 170!,
/// infinite beyond.
pub(crate) fn factorial_f64(n: u32) -> f64 {
    if n <= MAX_EXACT_FACTORIAL {
        return factorial(n) as f64;
    }
    if n > MAX_FINITE_FACTORIAL {
        return f64::INFINITY;
    }
    (1..=n).fold(1.0, |acc, k| acc * k as f64)
}

/// Associated Legendre polynomial P_l^m(x) for `x` in [-1, 1].
///
/// Negative orders are folded onto `|m|` with a `(-1)^|m|` sign. The base
/// case P_m^m carries the Condon-Shortley phase and is built as a running
/// product of odd factors, so the double factorial is never formed.
/// Returns 0 when `|m| > l`.
pub fn associated_legendre(l: u32, m: i32, x: f32) -> f32 {
    let m_abs = m.unsigned_abs();
    let sign = if m < 0 && m_abs % 2 == 1 { -1.0 } else { 1.0 };
    if m_abs > l {
        return 0.0;
    }

    let mut pmm = 1.0_f32;
    if m_abs > 0 {
        let somx2 = ((1.0 - x) * (1.0 + x)).max(0.0).sqrt();
        let mut odd = 1.0_f32;
        for _ in 0..m_abs {
            pmm *= -odd * somx2;
            odd += 2.0;
        }
    }
    if l == m_abs {
        return sign * pmm;
    }

    let m_f = m_abs as f32;
    let mut pm1m = x * (2.0 * m_f + 1.0) * pmm;
    if l == m_abs + 1 {
        return sign * pm1m;
    }

    // Three-term recurrence in degree; each step needs the two previous terms.
    for ll in (m_abs + 2)..=l {
        let ll_f = ll as f32;
        let pll = ((2.0 * ll_f - 1.0) * x * pm1m - (ll_f + m_f - 1.0) * pmm) / (ll_f - m_f);
        pmm = pm1m;
        pm1m = pll;
    }

    sign * pm1m
}

/// Generalized Laguerre polynomial L_p^k(x) by direct summation:
///
/// L_p^k(x) = sum_{i=0}^{p} (-x)^i (p+k)! / ((p-i)! i! (k+i)!)
///
/// Fine for the small `p`, `k` a hydrogen orbital produces. The factorial
/// ratios lose precision quickly as `p + k` grows.
pub fn associated_laguerre(p: u32, k: u32, x: f32) -> f32 {
    let top = factorial_f64(p + k);
    let mut sum = 0.0_f32;
    let mut power = 1.0_f32;
    for i in 0..=p {
        let coeff = top / (factorial_f64(p - i) * factorial_f64(i) * factorial_f64(k + i));
        sum += coeff as f32 * power;
        power *= -x;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0), 1);
        assert_eq!(factorial(1), 1);
        assert_eq!(factorial(5), 120);
        assert_eq!(factorial(MAX_EXACT_FACTORIAL), 2_432_902_008_176_640_000);
        assert_eq!(factorial_f64(21), 51_090_942_171_709_440_000.0);
    }

    #[test]
    fn test_float_factorial_saturates() {
        assert!(factorial_f64(MAX_FINITE_FACTORIAL).is_finite());
        assert_eq!(factorial_f64(MAX_FINITE_FACTORIAL + 1), f64::INFINITY);
        // returns immediately instead of looping
        assert_eq!(factorial_f64(u32::MAX), f64::INFINITY);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "overflows u64")]
    fn test_factorial_past_u64_range_panics() {
        factorial(MAX_EXACT_FACTORIAL + 1);
    }

    #[test]
    fn test_legendre_low_orders() {
        for &x in &[-1.0, -0.5, 0.0, 0.3, 1.0] {
            assert_eq!(associated_legendre(0, 0, x), 1.0);
            assert!((associated_legendre(1, 0, x) - x).abs() < EPS);
            // P_1^1 = -sqrt(1 - x^2)
            let expected = -(1.0 - x * x).sqrt();
            assert!((associated_legendre(1, 1, x) - expected).abs() < EPS);
        }
    }

    #[test]
    fn test_legendre_recurrence_matches_closed_forms() {
        let x = 0.4_f32;
        let somx2 = (1.0 - x * x).sqrt();
        // P_2^0 = (3x^2 - 1) / 2
        assert!((associated_legendre(2, 0, x) - 0.5 * (3.0 * x * x - 1.0)).abs() < EPS);
        // P_2^1 = -3x sqrt(1 - x^2)
        assert!((associated_legendre(2, 1, x) + 3.0 * x * somx2).abs() < EPS);
        // P_2^2 = 3 (1 - x^2)
        assert!((associated_legendre(2, 2, x) - 3.0 * (1.0 - x * x)).abs() < EPS);
        // P_3^0 = (5x^3 - 3x) / 2
        let p30 = 0.5 * (5.0 * x * x * x - 3.0 * x);
        assert!((associated_legendre(3, 0, x) - p30).abs() < EPS);
    }

    #[test]
    fn test_legendre_negative_order_flips_odd_sign() {
        let x = 0.25_f32;
        assert_eq!(associated_legendre(2, -1, x), -associated_legendre(2, 1, x));
        assert_eq!(associated_legendre(2, -2, x), associated_legendre(2, 2, x));
        assert_eq!(associated_legendre(3, -3, x), -associated_legendre(3, 3, x));
    }

    #[test]
    fn test_legendre_order_above_degree_is_zero() {
        assert_eq!(associated_legendre(1, 2, 0.5), 0.0);
        assert_eq!(associated_legendre(0, -1, 0.5), 0.0);
    }

    #[test]
    fn test_laguerre() {
        let x = 1.7_f32;
        for k in 0..5 {
            assert_eq!(associated_laguerre(0, k, x), 1.0);
            // L_1^k(x) = 1 + k - x
            assert!((associated_laguerre(1, k, x) - (1.0 + k as f32 - x)).abs() < EPS);
        }
        // L_2^1(x) = (x^2 - 6x + 6) / 2
        let expected = 0.5 * (x * x - 6.0 * x + 6.0);
        assert!((associated_laguerre(2, 1, x) - expected).abs() < 1e-4);
    }
}
