//! `ScaledNumber` — normalized mantissa × 10^exponent.
//!
//! # Invariants
//!
//! - `mantissa ∈ [1, 10)` or the value is exactly zero (mantissa 0,
//!   exponent 0 — the canonical zero).
//! - The exponent is a [`BigInt`], so magnitude is unbounded; only the
//!   mantissa carries limited (28-digit) precision.
//! - Values are non-negative.  The domain of the simulation never produces a
//!   negative quantity: subtraction clamps at zero rather than going
//!   negative (see [`ScaledNumber::subtract`]).
//!
//! Every producing operation returns a new, renormalized value; nothing
//! mutates in place.
//!
//! # Precision at extreme scale
//!
//! When two operands' exponents differ by more than the mantissa's precision
//! window, the smaller operand rescales to a mantissa below `1e-28` and is
//! dropped entirely.  `1e100 + 1` is `1e100`.  This is the intended
//! trade-off: exact bookkeeping of astronomically separated magnitudes is
//! worthless to the simulation and would cost unbounded mantissa width.

use std::cmp::Ordering;
use std::fmt;

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use rust_decimal::Decimal;

use crate::naming;

/// Exponent gap beyond which the smaller addend falls outside the mantissa's
/// precision window and is dropped.  Matches `rust_decimal`'s 28-digit scale.
const ALIGN_DIGITS: u32 = 28;

/// A non-negative value `mantissa × 10^exponent` with a normalized decimal
/// mantissa and an arbitrary-precision exponent.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaledNumber {
    mantissa: Decimal,
    exponent: BigInt,
}

impl ScaledNumber {
    // ── Construction ──────────────────────────────────────────────────────

    /// The canonical zero.
    pub fn zero() -> Self {
        Self {
            mantissa: Decimal::ZERO,
            exponent: BigInt::zero(),
        }
    }

    /// Build from a mantissa and a machine-width exponent, renormalizing.
    ///
    /// Negative mantissas clamp to zero — the simulation's domain is
    /// non-negative by construction.
    pub fn new(mantissa: Decimal, exponent: i64) -> Self {
        Self::from_parts(mantissa, BigInt::from(exponent))
    }

    /// Build from a mantissa and an arbitrary-precision exponent,
    /// renormalizing.
    pub fn from_parts(mut mantissa: Decimal, mut exponent: BigInt) -> Self {
        if mantissa <= Decimal::ZERO {
            return Self::zero();
        }
        while mantissa >= Decimal::TEN {
            mantissa /= Decimal::TEN;
            exponent += 1;
        }
        while mantissa < Decimal::ONE {
            mantissa *= Decimal::TEN;
            exponent -= 1;
        }
        Self {
            mantissa: mantissa.normalize(),
            exponent,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// The normalized mantissa, in `[1, 10)` (or 0 for the zero value).
    #[inline]
    pub fn mantissa(&self) -> Decimal {
        self.mantissa
    }

    /// The power-of-ten exponent.
    #[inline]
    pub fn exponent(&self) -> &BigInt {
        &self.exponent
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    // ── Arithmetic ────────────────────────────────────────────────────────

    /// Sum of two values.
    ///
    /// The smaller-exponent operand is rescaled to the larger exponent
    /// before the mantissas add; a gap wider than the precision window
    /// drops the smaller operand (see the module docs).
    pub fn add(&self, other: &ScaledNumber) -> ScaledNumber {
        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }
        let (hi, lo) = if self.exponent >= other.exponent {
            (self, other)
        } else {
            (other, self)
        };
        Self::from_parts(hi.mantissa + align(lo, &hi.exponent), hi.exponent.clone())
    }

    /// Difference, clamped at zero.
    ///
    /// A result that would be negative yields [`ScaledNumber::zero`].  The
    /// engine only ever subtracts behind an affordability precondition, so
    /// the clamp is unobservable in normal play; it keeps the type closed
    /// over the non-negative domain everywhere else.
    pub fn subtract(&self, other: &ScaledNumber) -> ScaledNumber {
        if other.is_zero() {
            return self.clone();
        }
        if *self <= *other {
            return Self::zero();
        }
        // self > other implies self.exponent >= other.exponent.
        Self::from_parts(
            self.mantissa - align(other, &self.exponent),
            self.exponent.clone(),
        )
    }

    /// Product of two values.
    ///
    /// Mantissas multiply (the product lands in `[1, 100)`, so at most one
    /// carry into the exponent), exponents add.
    pub fn multiply(&self, other: &ScaledNumber) -> ScaledNumber {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        Self::from_parts(
            self.mantissa * other.mantissa,
            &self.exponent + &other.exponent,
        )
    }

    // ── Renderers ─────────────────────────────────────────────────────────

    /// `"{mantissa}e{exponent}"`, e.g. `5e0`, `3.7e100`.
    pub fn to_scientific(&self) -> String {
        format!("{}e{}", self.mantissa, self.exponent)
    }

    /// Scientific notation with the exponent floored to a multiple of three
    /// and the mantissa rescaled accordingly, e.g. `1.5e7` → `15e6`.
    pub fn to_engineering(&self) -> String {
        if self.is_zero() {
            return "0e0".to_string();
        }
        let rem = exponent_rem_3(&self.exponent);
        let shown = self.mantissa * pow10(rem);
        format!("{}e{}", shown.normalize(), &self.exponent - BigInt::from(rem))
    }

    /// Long-scale display name.
    ///
    /// - exponent ≤ 6: a plain decimal (`250000`);
    /// - exponent 7–30: mantissa scaled into the group plus a word from the
    ///   fixed table (`2.5 million` … `9.99 nonillion`);
    /// - exponent > 30: mantissa scaled into the group plus a synthesized
    ///   Latin-root name (`1 decillion`, `3 trescentillion`, …), see
    ///   [`crate::naming`].
    pub fn to_named(&self) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        if self.exponent <= BigInt::from(6) {
            return self.to_plain();
        }
        let rem = exponent_rem_3(&self.exponent);
        let group = (&self.exponent - BigInt::from(rem)) / BigInt::from(3);
        let shown = (self.mantissa * pow10(rem)).normalize();
        match naming::table_word(&group) {
            Some(word) => format!("{shown} {word}"),
            None => format!("{shown} {}", naming::synthesize(&(group - BigInt::from(1)))),
        }
    }

    /// Plain decimal rendering for small exponents.
    ///
    /// Falls back to scientific notation when the exponent is too deeply
    /// negative for the mantissa's scale window to express.
    fn to_plain(&self) -> String {
        let Some(exp) = self.exponent.to_i64() else {
            return self.to_scientific();
        };
        let value = if exp >= 0 {
            // exp ≤ 6 here, so the power fits a u64 comfortably.
            self.mantissa * Decimal::from(10u64.pow(exp as u32))
        } else if exp >= -(ALIGN_DIGITS as i64) {
            self.mantissa * Decimal::new(1, -exp as u32)
        } else {
            return self.to_scientific();
        };
        value.normalize().to_string()
    }

    /// Render under the given notation selector.
    pub fn format_with(&self, notation: crate::Notation) -> String {
        match notation {
            crate::Notation::Standard => self.to_named(),
            crate::Notation::Scientific => self.to_scientific(),
            crate::Notation::Engineering => self.to_engineering(),
        }
    }
}

// ── Alignment helpers ─────────────────────────────────────────────────────────

/// Rescale `lo`'s mantissa to the target exponent.
///
/// Returns zero when the gap exceeds the precision window — the smaller
/// operand underflows and is dropped.
fn align(lo: &ScaledNumber, target_exponent: &BigInt) -> Decimal {
    let gap = target_exponent - &lo.exponent;
    debug_assert!(!gap.is_negative());
    match gap.to_u32() {
        Some(0) => lo.mantissa,
        Some(g) if g <= ALIGN_DIGITS => lo.mantissa * Decimal::new(1, g),
        _ => Decimal::ZERO,
    }
}

/// `exponent mod 3` in `{0, 1, 2}`, correct for negative exponents.
fn exponent_rem_3(exponent: &BigInt) -> u32 {
    let three = BigInt::from(3);
    let rem = ((exponent % &three) + &three) % &three;
    // Always 0, 1, or 2 after the double modulo.
    rem.to_u32().unwrap_or(0)
}

/// `10^r` for `r ∈ {0, 1, 2}`.
fn pow10(r: u32) -> Decimal {
    Decimal::from(10u64.pow(r))
}

// ── Conversions ───────────────────────────────────────────────────────────────

impl From<u64> for ScaledNumber {
    fn from(value: u64) -> Self {
        Self::from_parts(Decimal::from(value), BigInt::zero())
    }
}

impl From<Decimal> for ScaledNumber {
    fn from(value: Decimal) -> Self {
        Self::from_parts(value, BigInt::zero())
    }
}

// ── Ordering ──────────────────────────────────────────────────────────────────

impl Ord for ScaledNumber {
    /// Total order consistent with numeric value: zero below every positive
    /// value, then exponent dominates, mantissa breaks ties.  Sound because
    /// normalization pins the mantissa to `[1, 10)`.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self
                .exponent
                .cmp(&other.exponent)
                .then_with(|| self.mantissa.cmp(&other.mantissa)),
        }
    }
}

impl PartialOrd for ScaledNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ── Operator sugar ────────────────────────────────────────────────────────────

impl std::ops::Add for ScaledNumber {
    type Output = ScaledNumber;
    fn add(self, rhs: ScaledNumber) -> ScaledNumber {
        ScaledNumber::add(&self, &rhs)
    }
}

impl std::ops::Sub for ScaledNumber {
    type Output = ScaledNumber;
    fn sub(self, rhs: ScaledNumber) -> ScaledNumber {
        self.subtract(&rhs)
    }
}

impl std::ops::Mul for ScaledNumber {
    type Output = ScaledNumber;
    fn mul(self, rhs: ScaledNumber) -> ScaledNumber {
        self.multiply(&rhs)
    }
}

impl fmt::Display for ScaledNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_scientific())
    }
}
