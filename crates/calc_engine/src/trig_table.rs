//! Table-driven trigonometric evaluation.
//!
//! Angles are represented as reduced rational multiples of pi. Forward
//! evaluation normalizes any such angle into the first quadrant, looks the
//! base angle up in small tables, and re-applies the quadrant signs.
//! Inverse evaluation recognizes the same special values in expression
//! form and maps them back to principal-range angles.

use calc_ast::{Constant, Expr, Func};
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::rc::Rc;

// =============================================================================
// Angle - rational multiple of pi
// =============================================================================

/// An angle `(num/den) * pi`.
///
/// # Invariants
/// - `den > 0` always
/// - Fraction is reduced (gcd(|num|, den) = 1)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Angle {
    pub num: i64,
    pub den: i64,
}

impl Angle {
    /// Create a new angle, normalizing the fraction.
    pub fn new(num: i64, den: i64) -> Self {
        assert!(den != 0, "denominator cannot be zero");

        let (num, den) = if den < 0 { (-num, -den) } else { (num, den) };

        // gcd(0, den) = den, so a zero numerator lands on 0/1.
        let g = num.gcd(&den);
        Self {
            num: num / g,
            den: den / g,
        }
    }

    /// Zero angle
    pub const ZERO: Self = Self { num: 0, den: 1 };

    /// pi/6
    pub const PI_6: Self = Self { num: 1, den: 6 };

    /// pi/4
    pub const PI_4: Self = Self { num: 1, den: 4 };

    /// pi/3
    pub const PI_3: Self = Self { num: 1, den: 3 };

    /// pi/2
    pub const PI_2: Self = Self { num: 1, den: 2 };

    /// pi
    pub const PI: Self = Self { num: 1, den: 1 };

    /// 2*pi
    pub const TWO_PI: Self = Self { num: 2, den: 1 };

    pub fn negate(self) -> Self {
        Self {
            num: -self.num,
            den: self.den,
        }
    }

    pub fn add(self, other: Self) -> Self {
        // a/b + c/d = (ad + bc) / bd
        let num = self.num * other.den + other.num * self.den;
        let den = self.den * other.den;
        Self::new(num, den)
    }

    pub fn sub(self, other: Self) -> Self {
        self.add(other.negate())
    }

    /// Reduce modulo 2*pi into [0, 2*pi).
    pub fn reduce_mod_2pi(self) -> Self {
        // Mod 2*pi is mod 2 in the pi coefficient: (num mod 2*den) / den.
        // Intermediate math in i128 so huge numerators cannot wrap.
        let period = 2 * self.den as i128;
        let mut num = self.num as i128 % period;
        if num < 0 {
            num += period;
        }
        Self::new(num as i64, self.den)
    }

    /// Compare two angles as rational numbers.
    pub fn cmp_value(&self, other: &Self) -> Ordering {
        // a/b vs c/d: compare a*d vs c*b
        let lhs = (self.num as i128) * (other.den as i128);
        let rhs = (other.num as i128) * (self.den as i128);
        lhs.cmp(&rhs)
    }

    /// The angle in degrees, exactly.
    pub fn to_degrees(self) -> BigRational {
        BigRational::new(BigInt::from(self.num) * 180, self.den.into())
    }

    /// Angle whose degree measure is `deg`: (deg/180) * pi.
    pub fn from_degrees(deg: &BigRational) -> Option<Self> {
        rational_to_angle(&(deg / BigRational::from_integer(180.into())))
    }

    /// Build the canonical expression for this angle.
    ///
    /// Shapes: `0`, `pi`, `num * pi`, `pi / den`, `num * pi / den`;
    /// negative angles wrap the positive shape in a negation. These are
    /// exactly the shapes [`parse_pi_multiple`] recognizes.
    pub fn to_expr(self) -> Rc<Expr> {
        if self.num < 0 {
            return Expr::neg(self.negate().to_expr());
        }
        if self.num == 0 {
            return Expr::int(0);
        }
        if self.num == 1 && self.den == 1 {
            return Expr::pi();
        }
        if self.den == 1 {
            Expr::mul(Expr::int(self.num), Expr::pi())
        } else if self.num == 1 {
            Expr::div(Expr::pi(), Expr::int(self.den))
        } else {
            Expr::div(Expr::mul(Expr::int(self.num), Expr::pi()), Expr::int(self.den))
        }
    }
}

/// Convert an exact rational pi-coefficient into an `Angle`.
///
/// Rejects coefficients whose reduced parts do not fit the angle range
/// (such angles are never special values anyway).
fn rational_to_angle(q: &BigRational) -> Option<Angle> {
    let num = q.numer().to_i64()?;
    let den = q.denom().to_i64()?;
    // Keep 2*den representable for reduce_mod_2pi.
    if den > i64::MAX / 2 {
        return None;
    }
    Some(Angle::new(num, den))
}

// =============================================================================
// SpecialValue - exact values appearing in the tables
// =============================================================================

/// Exact values that appear as outputs of sin/cos/tan at special angles
/// and as recognized inputs of asin/acos/atan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecialValue {
    Zero,
    One,
    NegOne,
    Half,
    NegHalf,
    /// sqrt(2)/2
    Sqrt2Over2,
    NegSqrt2Over2,
    /// sqrt(3)/2
    Sqrt3Over2,
    NegSqrt3Over2,
    Sqrt3,
    NegSqrt3,
    /// 1/sqrt(3) = sqrt(3)/3
    OneOverSqrt3,
    NegOneOverSqrt3,
    /// tan at an odd multiple of pi/2
    Undefined,
}

impl SpecialValue {
    pub fn negate(self) -> Self {
        match self {
            Self::Zero => Self::Zero,
            Self::One => Self::NegOne,
            Self::NegOne => Self::One,
            Self::Half => Self::NegHalf,
            Self::NegHalf => Self::Half,
            Self::Sqrt2Over2 => Self::NegSqrt2Over2,
            Self::NegSqrt2Over2 => Self::Sqrt2Over2,
            Self::Sqrt3Over2 => Self::NegSqrt3Over2,
            Self::NegSqrt3Over2 => Self::Sqrt3Over2,
            Self::Sqrt3 => Self::NegSqrt3,
            Self::NegSqrt3 => Self::Sqrt3,
            Self::OneOverSqrt3 => Self::NegOneOverSqrt3,
            Self::NegOneOverSqrt3 => Self::OneOverSqrt3,
            Self::Undefined => Self::Undefined,
        }
    }

    /// Materialize as an expression.
    pub fn to_expr(self) -> Rc<Expr> {
        match self {
            Self::Zero => Expr::int(0),
            Self::One => Expr::int(1),
            Self::NegOne => Expr::int(-1),
            Self::Half => Expr::number(BigRational::new(1.into(), 2.into())),
            Self::NegHalf => Expr::neg(Self::Half.to_expr()),
            Self::Sqrt2Over2 => Expr::div(Expr::sqrt(Expr::int(2)), Expr::int(2)),
            Self::NegSqrt2Over2 => Expr::neg(Self::Sqrt2Over2.to_expr()),
            Self::Sqrt3Over2 => Expr::div(Expr::sqrt(Expr::int(3)), Expr::int(2)),
            Self::NegSqrt3Over2 => Expr::neg(Self::Sqrt3Over2.to_expr()),
            Self::Sqrt3 => Expr::sqrt(Expr::int(3)),
            Self::NegSqrt3 => Expr::neg(Self::Sqrt3.to_expr()),
            Self::OneOverSqrt3 => Expr::div(Expr::sqrt(Expr::int(3)), Expr::int(3)),
            Self::NegOneOverSqrt3 => Expr::neg(Self::OneOverSqrt3.to_expr()),
            Self::Undefined => Expr::undefined(),
        }
    }
}

// =============================================================================
// Lookup tables - first quadrant only
// =============================================================================

/// Sin values for angles in [0, pi/2]
pub const SIN_TABLE: &[(Angle, SpecialValue)] = &[
    (Angle::ZERO, SpecialValue::Zero),
    (Angle::PI_6, SpecialValue::Half),
    (Angle::PI_4, SpecialValue::Sqrt2Over2),
    (Angle::PI_3, SpecialValue::Sqrt3Over2),
    (Angle::PI_2, SpecialValue::One),
];

/// Cos values for angles in [0, pi/2]
pub const COS_TABLE: &[(Angle, SpecialValue)] = &[
    (Angle::ZERO, SpecialValue::One),
    (Angle::PI_6, SpecialValue::Sqrt3Over2),
    (Angle::PI_4, SpecialValue::Sqrt2Over2),
    (Angle::PI_3, SpecialValue::Half),
    (Angle::PI_2, SpecialValue::Zero),
];

/// Tan values for angles in [0, pi/2]
pub const TAN_TABLE: &[(Angle, SpecialValue)] = &[
    (Angle::ZERO, SpecialValue::Zero),
    (Angle::PI_6, SpecialValue::OneOverSqrt3),
    (Angle::PI_4, SpecialValue::One),
    (Angle::PI_3, SpecialValue::Sqrt3),
    (Angle::PI_2, SpecialValue::Undefined),
];

/// Asin angles: value -> angle in [-pi/2, pi/2]
pub const ASIN_TABLE: &[(SpecialValue, Angle)] = &[
    (SpecialValue::Zero, Angle::ZERO),
    (SpecialValue::Half, Angle::PI_6),
    (SpecialValue::Sqrt2Over2, Angle::PI_4),
    (SpecialValue::Sqrt3Over2, Angle::PI_3),
    (SpecialValue::One, Angle::PI_2),
    (SpecialValue::NegHalf, Angle { num: -1, den: 6 }),
    (SpecialValue::NegSqrt2Over2, Angle { num: -1, den: 4 }),
    (SpecialValue::NegSqrt3Over2, Angle { num: -1, den: 3 }),
    (SpecialValue::NegOne, Angle { num: -1, den: 2 }),
];

/// Acos angles: value -> angle in [0, pi]
pub const ACOS_TABLE: &[(SpecialValue, Angle)] = &[
    (SpecialValue::One, Angle::ZERO),
    (SpecialValue::Sqrt3Over2, Angle::PI_6),
    (SpecialValue::Sqrt2Over2, Angle::PI_4),
    (SpecialValue::Half, Angle::PI_3),
    (SpecialValue::Zero, Angle::PI_2),
    (SpecialValue::NegHalf, Angle { num: 2, den: 3 }),
    (SpecialValue::NegSqrt2Over2, Angle { num: 3, den: 4 }),
    (SpecialValue::NegSqrt3Over2, Angle { num: 5, den: 6 }),
    (SpecialValue::NegOne, Angle::PI),
];

/// Atan angles: value -> angle in (-pi/2, pi/2)
pub const ATAN_TABLE: &[(SpecialValue, Angle)] = &[
    (SpecialValue::Zero, Angle::ZERO),
    (SpecialValue::OneOverSqrt3, Angle::PI_6),
    (SpecialValue::One, Angle::PI_4),
    (SpecialValue::Sqrt3, Angle::PI_3),
    (SpecialValue::NegOneOverSqrt3, Angle { num: -1, den: 6 }),
    (SpecialValue::NegOne, Angle { num: -1, den: 4 }),
    (SpecialValue::NegSqrt3, Angle { num: -1, den: 3 }),
];

pub fn lookup_sin(angle: Angle) -> Option<SpecialValue> {
    SIN_TABLE.iter().find(|(a, _)| *a == angle).map(|(_, v)| *v)
}

pub fn lookup_cos(angle: Angle) -> Option<SpecialValue> {
    COS_TABLE.iter().find(|(a, _)| *a == angle).map(|(_, v)| *v)
}

pub fn lookup_tan(angle: Angle) -> Option<SpecialValue> {
    TAN_TABLE.iter().find(|(a, _)| *a == angle).map(|(_, v)| *v)
}

pub fn lookup_asin(value: SpecialValue) -> Option<Angle> {
    ASIN_TABLE
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, a)| *a)
}

pub fn lookup_acos(value: SpecialValue) -> Option<Angle> {
    ACOS_TABLE
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, a)| *a)
}

pub fn lookup_atan(value: SpecialValue) -> Option<Angle> {
    ATAN_TABLE
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, a)| *a)
}

// =============================================================================
// Quadrant normalization
// =============================================================================

/// Reference angle in [0, pi/2] plus the signs to re-apply after lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NormAngle {
    pub base: Angle,
    /// Sign of sin in the original quadrant: +1 or -1
    pub sin_sign: i8,
    /// Sign of cos in the original quadrant: +1 or -1
    pub cos_sign: i8,
}

impl NormAngle {
    pub fn apply_sin(&self, base_val: SpecialValue) -> SpecialValue {
        if self.sin_sign < 0 {
            base_val.negate()
        } else {
            base_val
        }
    }

    pub fn apply_cos(&self, base_val: SpecialValue) -> SpecialValue {
        if self.cos_sign < 0 {
            base_val.negate()
        } else {
            base_val
        }
    }

    /// tan sign = sin_sign * cos_sign
    pub fn apply_tan(&self, base_val: SpecialValue) -> SpecialValue {
        if self.sin_sign * self.cos_sign < 0 {
            base_val.negate()
        } else {
            base_val
        }
    }
}

/// Normalize any angle into the first quadrant with sign bookkeeping.
///
/// 1. Reduce mod 2*pi into [0, 2*pi)
/// 2. Fold by quadrant:
///    - Q1 [0, pi/2]: unchanged
///    - Q2 (pi/2, pi]: sin(pi-x) = sin(x), cos(pi-x) = -cos(x)
///    - Q3 (pi, 3*pi/2]: sin(pi+x) = -sin(x), cos(pi+x) = -cos(x)
///    - Q4 (3*pi/2, 2*pi): sin(2*pi-x) = -sin(x), cos(2*pi-x) = cos(x)
pub fn normalize(angle: Angle) -> NormAngle {
    let reduced = angle.reduce_mod_2pi();

    let pi_2 = Angle::PI_2;
    let pi = Angle::PI;
    let pi_3_2 = Angle::new(3, 2);

    if reduced.cmp_value(&pi_2) != Ordering::Greater {
        NormAngle {
            base: reduced,
            sin_sign: 1,
            cos_sign: 1,
        }
    } else if reduced.cmp_value(&pi) != Ordering::Greater {
        NormAngle {
            base: pi.sub(reduced),
            sin_sign: 1,
            cos_sign: -1,
        }
    } else if reduced.cmp_value(&pi_3_2) != Ordering::Greater {
        NormAngle {
            base: reduced.sub(pi),
            sin_sign: -1,
            cos_sign: -1,
        }
    } else {
        NormAngle {
            base: Angle::TWO_PI.sub(reduced),
            sin_sign: -1,
            cos_sign: 1,
        }
    }
}

// =============================================================================
// Function identifiers for the two trig families
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
}

impl TrigFn {
    pub const fn func(self) -> Func {
        match self {
            TrigFn::Sin => Func::Sin,
            TrigFn::Cos => Func::Cos,
            TrigFn::Tan => Func::Tan,
        }
    }

    pub const fn name(self) -> &'static str {
        self.func().name()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvTrigFn {
    Asin,
    Acos,
    Atan,
}

impl InvTrigFn {
    pub const fn func(self) -> Func {
        match self {
            InvTrigFn::Asin => Func::Asin,
            InvTrigFn::Acos => Func::Acos,
            InvTrigFn::Atan => Func::Atan,
        }
    }

    pub const fn name(self) -> &'static str {
        self.func().name()
    }
}

// =============================================================================
// Expression parsers
// =============================================================================

/// Extract an [`Angle`] from an expression of the form `q * pi`.
///
/// Recognized shapes:
/// - `0` (the number)
/// - `pi`
/// - `q * pi`, `pi * q` (q a rational number)
/// - `(k/n) * pi`
/// - `pi / n`, `(k*pi) / n`, `(pi*k) / n`
/// - any of the above under a negation
pub fn parse_pi_multiple(expr: &Expr) -> Option<Angle> {
    match expr {
        Expr::Number(n) if n.is_zero() => Some(Angle::ZERO),

        Expr::Constant(Constant::Pi) => Some(Angle::PI),

        Expr::Neg(inner) => parse_pi_multiple(inner).map(Angle::negate),

        Expr::Mul(a, b) => {
            if is_pi(a) {
                if let Expr::Number(q) = &**b {
                    return rational_to_angle(q);
                }
            }
            if is_pi(b) {
                if let Expr::Number(q) = &**a {
                    return rational_to_angle(q);
                }
                // (k/n) * pi
                if let Expr::Div(k, n) = &**a {
                    if let (Expr::Number(k), Expr::Number(n)) = (&**k, &**n) {
                        if !n.is_zero() {
                            return rational_to_angle(&(k / n));
                        }
                    }
                }
            }
            None
        }

        Expr::Div(num, den) => {
            let d = match &**den {
                Expr::Number(d) if !d.is_zero() => d,
                _ => return None,
            };

            // pi / n
            if is_pi(num) {
                return rational_to_angle(&(BigRational::one() / d));
            }

            // (k * pi) / n or (pi * k) / n
            if let Expr::Mul(a, b) = &**num {
                let k = if is_pi(a) {
                    &**b
                } else if is_pi(b) {
                    &**a
                } else {
                    return None;
                };
                if let Expr::Number(k) = k {
                    return rational_to_angle(&(k / d));
                }
            }
            None
        }

        _ => None,
    }
}

fn is_pi(expr: &Expr) -> bool {
    matches!(expr, Expr::Constant(Constant::Pi))
}

/// Recognize an expression as one of the [`SpecialValue`]s.
///
/// Covers the rational atoms (0, 1, -1, 1/2 as a number or as `1/2`),
/// the surd shapes `sqrt(2)/2`, `sqrt(3)/2`, `sqrt(3)`, `sqrt(3)/3`
/// (also written `1/sqrt(3)`), and negations of all of these.
pub fn parse_special_value(expr: &Expr) -> Option<SpecialValue> {
    match expr {
        Expr::Number(n) => {
            if n.is_zero() {
                Some(SpecialValue::Zero)
            } else if n.is_one() {
                Some(SpecialValue::One)
            } else if *n == BigRational::from_integer((-1).into()) {
                Some(SpecialValue::NegOne)
            } else if *n == BigRational::new(1.into(), 2.into()) {
                Some(SpecialValue::Half)
            } else if *n == BigRational::new((-1).into(), 2.into()) {
                Some(SpecialValue::NegHalf)
            } else {
                None
            }
        }

        Expr::Neg(inner) => parse_special_value(inner).map(SpecialValue::negate),

        Expr::Div(num, den) => {
            if let Expr::Number(d) = &**den {
                if *d == BigRational::from_integer(2.into()) {
                    if let Expr::Number(n) = &**num {
                        if n.is_one() {
                            return Some(SpecialValue::Half);
                        }
                        if *n == BigRational::from_integer((-1).into()) {
                            return Some(SpecialValue::NegHalf);
                        }
                    }
                    match sqrt_radicand(num) {
                        Some(2) => return Some(SpecialValue::Sqrt2Over2),
                        Some(3) => return Some(SpecialValue::Sqrt3Over2),
                        _ => {}
                    }
                    if let Expr::Neg(inner) = &**num {
                        match sqrt_radicand(inner) {
                            Some(2) => return Some(SpecialValue::NegSqrt2Over2),
                            Some(3) => return Some(SpecialValue::NegSqrt3Over2),
                            _ => {}
                        }
                    }
                }

                if *d == BigRational::from_integer(3.into()) {
                    if sqrt_radicand(num) == Some(3) {
                        return Some(SpecialValue::OneOverSqrt3);
                    }
                    if let Expr::Neg(inner) = &**num {
                        if sqrt_radicand(inner) == Some(3) {
                            return Some(SpecialValue::NegOneOverSqrt3);
                        }
                    }
                }
            }

            // 1/sqrt(3)
            if let Expr::Number(n) = &**num {
                if n.is_one() && sqrt_radicand(den) == Some(3) {
                    return Some(SpecialValue::OneOverSqrt3);
                }
            }

            None
        }

        Expr::Pow(_, _) => {
            if sqrt_radicand(expr) == Some(3) {
                Some(SpecialValue::Sqrt3)
            } else {
                None
            }
        }

        _ => None,
    }
}

/// If `expr` is `sqrt(n)` for an integer n (either `n^(1/2)` with the
/// exponent a rational atom or the quotient `1/2`), return n.
fn sqrt_radicand(expr: &Expr) -> Option<i64> {
    let (base, exp) = match expr {
        Expr::Pow(base, exp) => (base, exp),
        _ => return None,
    };
    let is_half = match &**exp {
        Expr::Number(q) => *q == BigRational::new(1.into(), 2.into()),
        Expr::Div(n, d) => matches!(
            (&**n, &**d),
            (Expr::Number(n), Expr::Number(d))
                if n.is_one() && *d == BigRational::from_integer(2.into())
        ),
        _ => false,
    };
    if !is_half {
        return None;
    }
    base.as_i64()
}

// =============================================================================
// Evaluators
// =============================================================================

/// Evaluate sin/cos/tan at a rational multiple of pi.
///
/// Returns `None` when the reference angle is not in the tables; tan at an
/// odd multiple of pi/2 returns the `undefined` constant.
pub fn eval_trig(f: TrigFn, angle: Angle) -> Option<Rc<Expr>> {
    let norm = normalize(angle);

    let base_val = match f {
        TrigFn::Sin => lookup_sin(norm.base),
        TrigFn::Cos => lookup_cos(norm.base),
        TrigFn::Tan => lookup_tan(norm.base),
    }?;

    let final_val = match f {
        TrigFn::Sin => norm.apply_sin(base_val),
        TrigFn::Cos => norm.apply_cos(base_val),
        TrigFn::Tan => norm.apply_tan(base_val),
    };

    Some(final_val.to_expr())
}

/// Evaluate asin/acos/atan at a special value, as a principal-range angle.
pub fn eval_inv_trig(f: InvTrigFn, value: &Expr) -> Option<Angle> {
    let v = parse_special_value(value)?;
    match f {
        InvTrigFn::Asin => lookup_asin(v),
        InvTrigFn::Acos => lookup_acos(v),
        InvTrigFn::Atan => lookup_atan(v),
    }
}

// =============================================================================
// Tests
// =============================================================================
