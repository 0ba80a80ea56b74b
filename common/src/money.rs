//! [`Money`]-related definitions.

use std::{fmt, ops, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal, RoundingStrategy};

use crate::define_kind;

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Returns this [`Money`] rounded to 2 decimal places.
    ///
    /// Intended for the presentation boundary only, so intermediate
    /// computations don't compound rounding error.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self {
            amount: self
                .amount
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            currency: self.currency,
        }
    }

    /// Adds the given [`Money`] to this one.
    ///
    /// [`None`] is returned if the currencies differ.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        (self.currency == rhs.currency).then(|| Self {
            amount: self.amount + rhs.amount,
            currency: self.currency,
        })
    }

    /// Subtracts the given [`Money`] from this one.
    ///
    /// [`None`] is returned if the currencies differ.
    #[must_use]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        (self.currency == rhs.currency).then(|| Self {
            amount: self.amount - rhs.amount,
            currency: self.currency,
        })
    }

    /// Sums up the provided [`Money`] amounts.
    ///
    /// [`None`] is returned if the iterator is empty or the amounts are in
    /// different [`Currency`]s.
    pub fn total(iter: impl IntoIterator<Item = Self>) -> Option<Self> {
        iter.into_iter()
            .map(Some)
            .reduce(|acc, m| acc?.checked_add(m?))?
    }
}

impl ops::Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self::Output {
        Self {
            amount: self.amount * rhs,
            currency: self.currency,
        }
    }
}

impl ops::Div<Decimal> for Money {
    type Output = Self;

    fn div(self, rhs: Decimal) -> Self::Output {
        Self {
            amount: self.amount / rhs,
            currency: self.currency,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        if amount.is_integer() {
            write!(f, "{}{currency}", amount.to_i128().expect("integer"))
        } else {
            write!(f, "{amount}{currency}")
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency =
            Currency::from_str(currency).map_err(|_| "invalid currency")?;

        Ok(Self { amount, currency })
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "Philippine Peso."]
        Php = 1,

        #[doc = "US Dollar."]
        Usd = 2,
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Money in `{major}.{minor}{currency}` format, where:
    /// - `major` is an integer;
    /// - `minor` is an optional integer;
    /// - `currency` is a three-letter currency code.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Money = super::Money;

    impl Money {
        fn to_output<S: ScalarValue>(m: &Money) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Money` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Money` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{Currency, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn php(s: &str) -> Money {
        Money {
            amount: decimal(s),
            currency: Currency::Php,
        }
    }

    #[test]
    fn from_str() {
        assert_eq!(Money::from_str("123.45PHP").unwrap(), php("123.45"));

        assert_eq!(
            Money::from_str("123.45USD").unwrap(),
            Money {
                amount: decimal("123.45"),
                currency: Currency::Usd,
            },
        );

        assert!(Money::from_str("123.45").is_err());
        assert!(Money::from_str("123.45Ph").is_err());
        assert!(Money::from_str("123.45Pesos").is_err());

        assert!(Money::from_str("123.00PHP").is_ok());
        assert!(Money::from_str("123.0PHP").is_ok());
        assert!(Money::from_str("123PHP").is_ok());
    }

    #[test]
    fn to_string() {
        assert_eq!(php("123.45").to_string(), "123.45PHP");
        assert_eq!(php("123.00").to_string(), "123PHP");
        assert_eq!(php("123.0").to_string(), "123PHP");
        assert_eq!(php("123").to_string(), "123PHP");
    }

    #[test]
    fn arithmetic_respects_currency() {
        assert_eq!(php("10").checked_add(php("5")), Some(php("15")));
        assert_eq!(php("10").checked_sub(php("5")), Some(php("5")));
        assert_eq!(
            php("10").checked_add(Money {
                amount: decimal("5"),
                currency: Currency::Usd,
            }),
            None,
        );
    }

    #[test]
    fn total() {
        assert_eq!(
            Money::total([php("10"), php("20"), php("30.5")]),
            Some(php("60.5")),
        );
        assert_eq!(Money::total([]), None);
        assert_eq!(
            Money::total([
                php("10"),
                Money {
                    amount: decimal("5"),
                    currency: Currency::Usd,
                },
            ]),
            None,
        );
    }

    #[test]
    fn rounded() {
        assert_eq!((php("1120") / decimal("1.12")).rounded(), php("1000.00"));
        assert_eq!(php("0.125").rounded(), php("0.13"));
    }
}
