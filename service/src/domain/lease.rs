//! [`Lease`] definitions.

use std::str::FromStr;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{property, space, tenant};
#[cfg(doc)]
use crate::domain::{Property, Space, Tenant};

/// Number of days before expiration when a [`Lease`] is flagged for renewal.
pub const RENEWAL_WINDOW_DAYS: i64 = 30;

/// Lease binding a [`Tenant`] to a [`Space`] for a term.
#[derive(Clone, Debug)]
pub struct Lease {
    /// ID of this [`Lease`].
    pub id: Id,

    /// ID of the [`Property`] this [`Lease`] is concluded under.
    pub property_id: property::Id,

    /// ID of the [`Space`] this [`Lease`] covers.
    pub space_id: space::Id,

    /// ID of the [`Tenant`] holding this [`Lease`].
    pub tenant_id: tenant::Id,

    /// [`DateTime`] when the term of this [`Lease`] commences.
    pub starts_at: CommencementDateTime,

    /// [`DateTime`] when the term of this [`Lease`] expires.
    pub expires_at: ExpirationDateTime,

    /// Monthly rent under this [`Lease`].
    pub monthly_rent: Money,

    /// Security deposit held under this [`Lease`], if any.
    pub security_deposit: Option<Money>,

    /// Utility deposit held under this [`Lease`], if any.
    pub utility_deposit: Option<Money>,

    /// Special conditions agreed under this [`Lease`], if any.
    pub special_conditions: Option<SpecialConditions>,

    /// [`DateTime`] when this [`Lease`] was created.
    pub created_at: CreationDateTime,
}

impl Lease {
    /// Returns the [`Status`] of this [`Lease`] as of the provided date.
    ///
    /// The term is compared by calendar day, so the time-of-day of either
    /// side never affects the result.
    #[must_use]
    pub fn status(&self, today: DateTimeOf) -> Status {
        let days_left = today.days_until(self.expires_at);
        if days_left < 0 {
            Status::Expired
        } else if days_left <= RENEWAL_WINDOW_DAYS {
            Status::ForRenewal
        } else {
            Status::Active
        }
    }
}

/// ID of a [`Lease`].
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

define_kind! {
    #[doc = "Status of a [`Lease`], derived from its term."]
    enum Status {
        #[doc = "The lease term is running."]
        Active = 1,

        #[doc = "The lease expires within the renewal window."]
        ForRenewal = 2,

        #[doc = "The lease term has ended."]
        Expired = 3,
    }
}

/// Deposits suggested for a [`Lease`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DepositTerms {
    /// Suggested security deposit.
    pub security: Money,

    /// Suggested utility deposit.
    pub utility: Money,
}

impl DepositTerms {
    /// Suggests [`DepositTerms`] for the provided monthly rent: three months
    /// of rent as security and half a month as utility.
    ///
    /// Suggestions only, the caller may override either value.
    #[must_use]
    pub fn suggest(monthly_rent: Money) -> Self {
        Self {
            security: monthly_rent * Decimal::from(3),
            utility: monthly_rent * Decimal::new(5, 1),
        }
    }
}

/// Special conditions agreed under a [`Lease`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct SpecialConditions(String);

impl SpecialConditions {
    /// Creates a new [`SpecialConditions`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `text` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Creates a new [`SpecialConditions`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        Self::check(&text).then_some(Self(text))
    }

    /// Checks whether the given `text` is valid [`SpecialConditions`].
    fn check(text: impl AsRef<str>) -> bool {
        let text = text.as_ref();
        text.trim() == text && !text.is_empty() && text.len() <= 4096
    }
}

impl FromStr for SpecialConditions {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `SpecialConditions`")
    }
}

/// [`DateTime`] when a [`Lease`] was created.
pub type CreationDateTime = DateTimeOf<(Lease, unit::Creation)>;

/// [`DateTime`] when a [`Lease`] term commences.
pub type CommencementDateTime = DateTimeOf<(Lease, unit::Commencement)>;

/// [`DateTime`] when a [`Lease`] term expires.
pub type ExpirationDateTime = DateTimeOf<(Lease, unit::Expiration)>;

#[cfg(test)]
mod spec {
    use common::{Currency, DateTime, Money};

    use super::{DepositTerms, Lease, Status};
    use crate::domain::{property, space, tenant};

    fn php(s: &str) -> Money {
        Money {
            amount: s.parse().unwrap(),
            currency: Currency::Php,
        }
    }

    fn lease(expires_at: &str) -> Lease {
        Lease {
            id: super::Id::new(),
            property_id: property::Id::new(),
            space_id: space::Id::new(),
            tenant_id: tenant::Id::new(),
            starts_at: DateTime::from_rfc3339("2024-01-01T00:00:00Z")
                .unwrap()
                .coerce(),
            expires_at: DateTime::from_rfc3339(expires_at).unwrap().coerce(),
            monthly_rent: php("10000"),
            security_deposit: None,
            utility_deposit: None,
            special_conditions: None,
            created_at: DateTime::from_rfc3339("2024-01-01T00:00:00Z")
                .unwrap()
                .coerce(),
        }
    }

    #[test]
    fn status_boundaries() {
        let today = DateTime::from_rfc3339("2024-06-01T15:30:00Z").unwrap();

        // 31 days out is still `Active`, 30 days out flips to `ForRenewal`.
        assert_eq!(
            lease("2024-07-02T00:00:00Z").status(today),
            Status::Active,
        );
        assert_eq!(
            lease("2024-07-01T00:00:00Z").status(today),
            Status::ForRenewal,
        );
        assert_eq!(
            lease("2024-06-01T00:00:00Z").status(today),
            Status::ForRenewal,
        );
        assert_eq!(
            lease("2024-05-31T23:59:59Z").status(today),
            Status::Expired,
        );
    }

    #[test]
    fn status_ignores_time_of_day() {
        let today = DateTime::from_rfc3339("2024-06-01T23:59:59Z").unwrap();
        assert_eq!(
            lease("2024-06-01T00:00:01Z").status(today),
            Status::ForRenewal,
        );
    }

    #[test]
    fn deposit_suggestion() {
        let suggested = DepositTerms::suggest(php("10000"));
        assert_eq!(suggested.security, php("30000"));
        assert_eq!(suggested.utility, php("5000.0"));
    }
}
