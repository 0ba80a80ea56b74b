//! Billing derivations.

use common::Money;
use rust_decimal::Decimal;

/// Breakdown of a VAT-inclusive amount into its net and tax parts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VatBreakdown {
    /// Net amount the VAT applies to.
    pub vatable: Money,

    /// VAT part of the gross amount.
    pub vat: Money,
}

impl VatBreakdown {
    /// Splits the provided gross VAT-inclusive amount at the statutory 12%
    /// rate.
    ///
    /// Intermediate values keep full precision. Call [`rounded()`] at the
    /// presentation boundary only, so rounding error doesn't compound across
    /// line items.
    ///
    /// [`rounded()`]: VatBreakdown::rounded
    #[expect(clippy::missing_panics_doc, reason = "currencies always match")]
    #[must_use]
    pub fn split(amount_due: Money) -> Self {
        // 1 + 12 / 100
        let divisor = Decimal::ONE + Decimal::new(12, 2);

        let vatable = amount_due / divisor;
        Self {
            vatable,
            vat: amount_due
                .checked_sub(vatable)
                .expect("currencies always match"),
        }
    }

    /// Returns this [`VatBreakdown`] with both parts rounded to 2 decimal
    /// places.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self {
            vatable: self.vatable.rounded(),
            vat: self.vat.rounded(),
        }
    }
}

#[cfg(test)]
mod spec {
    use common::{Currency, Money};

    use super::VatBreakdown;

    fn php(s: &str) -> Money {
        Money {
            amount: s.parse().unwrap(),
            currency: Currency::Php,
        }
    }

    #[test]
    fn split() {
        let breakdown = VatBreakdown::split(php("1120")).rounded();
        assert_eq!(breakdown.vatable, php("1000.00"));
        assert_eq!(breakdown.vat, php("120.00"));
    }

    #[test]
    fn parts_sum_back_to_gross() {
        let gross = php("3456.78");
        let breakdown = VatBreakdown::split(gross);
        assert_eq!(breakdown.vatable.checked_add(breakdown.vat), Some(gross));
    }
}
