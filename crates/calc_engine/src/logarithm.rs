//! Exact rational logarithms.
//!
//! `log_base(val)` is a rational number exactly when base and val are
//! powers of a common profile of primes with a constant exponent ratio:
//!
//! - `log_2(8) = 3`        because 2 = 2^1, 8 = 2^3
//! - `log_8(2) = 1/3`
//! - `log_16(8) = 3/4`
//! - `log_(1/2)(8) = -3`   because 1/2 = 2^-1
//! - `log_6(36) = 2`       profiles {2:1, 3:1} and {2:2, 3:2}
//!
//! Anything else is left to the caller (unevaluated or approximated).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::collections::HashMap;

/// Evaluate `log_base(val)` as an exact rational, when it is one.
///
/// Guards: base > 0, base != 1, val > 0. Within those, `log_b(1) = 0` and
/// `log_b(b) = 1` short-circuit before any factorization.
pub fn eval_log_rational(base: &BigRational, val: &BigRational) -> Option<BigRational> {
    if !base.is_positive() || base.is_one() || !val.is_positive() {
        return None;
    }

    if val.is_one() {
        return Some(BigRational::zero());
    }

    if base == val {
        return Some(BigRational::one());
    }

    let fb = exponent_profile(base);
    let fv = exponent_profile(val);

    // Both must be built from the same set of primes.
    if fb.keys().collect::<std::collections::HashSet<_>>()
        != fv.keys().collect::<std::collections::HashSet<_>>()
    {
        return None;
    }

    // log_base(val) = (sum exp_val[p] * log p) / (sum exp_base[p] * log p),
    // which is rational only if exp_val[p] / exp_base[p] is the same for
    // every prime p.
    let mut ratio: Option<BigRational> = None;
    for (prime, exp_base) in &fb {
        let exp_val = fv.get(prime)?;
        if *exp_base == 0 {
            return None;
        }
        let r = BigRational::new(BigInt::from(*exp_val), BigInt::from(*exp_base));
        match &ratio {
            None => ratio = Some(r),
            Some(prev) if *prev == r => {}
            _ => return None,
        }
    }

    ratio
}

/// Signed prime-exponent profile of a positive rational:
/// numerator primes count positively, denominator primes negatively.
fn exponent_profile(r: &BigRational) -> HashMap<BigInt, i64> {
    let mut profile: HashMap<BigInt, i64> = HashMap::new();
    for (prime, exp) in prime_exponent_map(r.numer()) {
        *profile.entry(prime).or_insert(0) += exp as i64;
    }
    for (prime, exp) in prime_exponent_map(r.denom()) {
        *profile.entry(prime).or_insert(0) -= exp as i64;
    }
    profile.retain(|_, e| *e != 0);
    profile
}

/// Prime factorization of |n| as a prime -> exponent map, by trial division.
fn prime_exponent_map(n: &BigInt) -> HashMap<BigInt, u32> {
    use num_integer::Integer;

    let mut result = HashMap::new();
    let mut n = n.abs();
    let one = BigInt::one();

    if n <= one {
        return result;
    }

    let mut count_2 = 0u32;
    while n.is_even() {
        count_2 += 1;
        n /= 2;
    }
    if count_2 > 0 {
        result.insert(BigInt::from(2), count_2);
    }

    let mut d = BigInt::from(3);
    while &d * &d <= n {
        let mut count = 0u32;
        while (&n % &d).is_zero() {
            count += 1;
            n /= &d;
        }
        if count > 0 {
            result.insert(d.clone(), count);
        }
        d += 2;
    }

    // Whatever is left is prime.
    if n > one {
        result.insert(n, 1);
    }

    result
}
