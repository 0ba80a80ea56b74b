//! [`Space`] definitions.

use std::str::FromStr;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{property, tenant};
#[cfg(doc)]
use crate::domain::{Property, Tenant};

/// Rentable unit inside a [`Property`].
#[derive(Clone, Debug)]
pub struct Space {
    /// ID of this [`Space`].
    pub id: Id,

    /// ID of the [`Property`] this [`Space`] belongs to.
    pub property_id: property::Id,

    /// [`Number`] of this [`Space`], unique within its [`Property`].
    pub number: Number,

    /// Floor [`Area`] of this [`Space`].
    ///
    /// [`Area`]: property::Area
    pub floor_area: property::Area,

    /// Monthly asking rate per area unit of this [`Space`], if set.
    pub rate: Option<common::Money>,

    /// Total monthly rent of this [`Space`], if its `rate` was set.
    ///
    /// Derived via [`total_rent()`] once at creation and stored as is:
    /// later edits of `rate` or `floor_area` don't touch it.
    pub monthly_rent: Option<common::Money>,

    /// [`Status`] of this [`Space`].
    pub status: Status,

    /// ID of the [`Tenant`] currently occupying this [`Space`], if any.
    ///
    /// Only ever set while `status` is [`Status::Occupied`].
    pub tenant_id: Option<tenant::Id>,

    /// [`DateTime`] when this [`Space`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Space`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    derive_more::FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Number of a [`Space`] within its [`Property`], like `2F-01`.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Number(String);

impl Number {
    /// Creates a new [`Number`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `num` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(num: impl Into<String>) -> Self {
        Self(num.into())
    }

    /// Creates a new [`Number`] if the given `num` is valid.
    #[must_use]
    pub fn new(num: impl Into<String>) -> Option<Self> {
        let num = num.into();
        Self::check(&num).then_some(Self(num))
    }

    /// Checks whether the given `num` is a valid [`Number`].
    fn check(num: impl AsRef<str>) -> bool {
        let num = num.as_ref();
        num.trim() == num && !num.is_empty() && num.len() <= 64
    }
}

impl FromStr for Number {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Number`")
    }
}

define_kind! {
    #[doc = "Status of a [`Space`]."]
    enum Status {
        #[doc = "The space is available for lease."]
        Available = 1,

        #[doc = "The space is occupied by a tenant."]
        Occupied = 2,

        #[doc = "The space is under maintenance."]
        UnderMaintenance = 3,

        #[doc = "The space was vacated and awaits turnover."]
        Vacant = 4,
    }
}

/// [`DateTime`] when a [`Space`] was created.
pub type CreationDateTime = DateTimeOf<(Space, unit::Creation)>;

/// Derives the total monthly rent of a [`Space`] from its asking `rate` and
/// floor `area`.
#[must_use]
pub fn total_rent(
    rate: common::Money,
    area: property::Area,
) -> common::Money {
    rate * area.as_decimal()
}

#[cfg(test)]
mod spec {
    use common::{Currency, Money};

    use super::total_rent;

    #[test]
    fn total_rent_is_rate_times_area() {
        let rate = Money {
            amount: "500".parse().unwrap(),
            currency: Currency::Php,
        };

        let total = total_rent(rate, "20".parse().unwrap());

        assert_eq!(total.amount, "10000".parse().unwrap());
        assert_eq!(total.currency, Currency::Php);
    }
}
