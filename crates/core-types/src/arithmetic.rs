//! Overflow-safe `Decimal` arithmetic for the engines.
//!
//! `Decimal`'s operators panic on overflow. The engines must produce a value
//! for any input, so they clamp to `Decimal::MAX`/`Decimal::MIN` and log a
//! warning instead.

use rust_decimal::Decimal;

fn clamp_toward(negative: bool) -> Decimal {
    if negative { Decimal::MIN } else { Decimal::MAX }
}

/// `a * b`, clamped to the representable range.
pub fn saturating_mul(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or_else(|| {
        tracing::warn!(%a, %b, "Decimal multiplication overflowed, saturating.");
        clamp_toward(a.is_sign_negative() != b.is_sign_negative())
    })
}

/// `a + b`, clamped to the representable range.
pub fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or_else(|| {
        tracing::warn!(%a, %b, "Decimal addition overflowed, saturating.");
        // Only same-signed operands can overflow an addition.
        clamp_toward(a.is_sign_negative())
    })
}

/// Sums `values` with [`saturating_add`].
pub fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, saturating_add)
}
