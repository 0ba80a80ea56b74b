//! Real property tax ([`RptRecord`]) definitions.

use std::str::FromStr;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{property, space};
#[cfg(doc)]
use crate::domain::{Property, Space};

/// Real property tax record of a [`Property`] or a [`Space`].
#[derive(Clone, Debug)]
pub struct RptRecord {
    /// ID of this [`RptRecord`].
    pub id: Id,

    /// [`Owner`] this [`RptRecord`] is filed against.
    pub owner: Owner,

    /// Tax declaration number of this [`RptRecord`].
    pub tax_dec_no: TaxDecNo,

    /// [`PaymentMode`] of this [`RptRecord`].
    pub payment_mode: PaymentMode,

    /// [`DateTime`] when the next payment of this [`RptRecord`] is due.
    pub due_at: DueDateTime,

    /// Payment [`Status`] of this [`RptRecord`].
    ///
    /// Toggled manually by a custodian, never by the system.
    pub status: Status,

    /// Free-form custodian [`Remarks`] on this [`RptRecord`], if any.
    pub remarks: Option<Remarks>,

    /// [`DateTime`] when this [`RptRecord`] was created.
    pub created_at: CreationDateTime,
}

impl RptRecord {
    /// Indicates whether this [`RptRecord`] is overdue as of the provided
    /// date: unpaid with its due date in the past.
    #[must_use]
    pub fn is_overdue(&self, today: DateTimeOf) -> bool {
        self.status == Status::Unpaid && today.days_until(self.due_at) < 0
    }
}

/// ID of an [`RptRecord`].
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

/// Entity an [`RptRecord`] is filed against.
///
/// Exactly one of a [`Property`] or a [`Space`], never both.
#[derive(Clone, Copy, Debug, Eq, From, PartialEq)]
pub enum Owner {
    /// [`RptRecord`] filed against a whole [`Property`].
    Property(property::Id),

    /// [`RptRecord`] filed against a single [`Space`].
    Space(space::Id),
}

impl Owner {
    /// Returns the [`Property`] ID of this [`Owner`], if it is one.
    #[must_use]
    pub fn property_id(&self) -> Option<property::Id> {
        match self {
            Self::Property(id) => Some(*id),
            Self::Space(_) => None,
        }
    }

    /// Returns the [`Space`] ID of this [`Owner`], if it is one.
    #[must_use]
    pub fn space_id(&self) -> Option<space::Id> {
        match self {
            Self::Space(id) => Some(*id),
            Self::Property(_) => None,
        }
    }
}

/// Tax declaration number of an [`RptRecord`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct TaxDecNo(String);

impl TaxDecNo {
    /// Creates a new [`TaxDecNo`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `num` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(num: impl Into<String>) -> Self {
        Self(num.into())
    }

    /// Creates a new [`TaxDecNo`] if the given `num` is valid.
    #[must_use]
    pub fn new(num: impl Into<String>) -> Option<Self> {
        let num = num.into();
        Self::check(&num).then_some(Self(num))
    }

    /// Checks whether the given `num` is a valid [`TaxDecNo`].
    fn check(num: impl AsRef<str>) -> bool {
        let num = num.as_ref();
        num.trim() == num && !num.is_empty() && num.len() <= 128
    }
}

impl FromStr for TaxDecNo {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `TaxDecNo`")
    }
}

define_kind! {
    #[doc = "Payment mode of an [`RptRecord`]."]
    enum PaymentMode {
        #[doc = "Tax paid monthly."]
        Monthly = 1,

        #[doc = "Tax paid quarterly."]
        Quarterly = 2,

        #[doc = "Tax paid annually."]
        Annual = 3,
    }
}

define_kind! {
    #[doc = "Payment status of an [`RptRecord`]."]
    enum Status {
        #[doc = "The tax has been paid."]
        Paid = 1,

        #[doc = "The tax is outstanding."]
        Unpaid = 2,
    }
}

/// Custodian remarks on an [`RptRecord`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Remarks(String);

impl Remarks {
    /// Creates a new [`Remarks`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `remarks` match the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(remarks: impl Into<String>) -> Self {
        Self(remarks.into())
    }

    /// Creates a new [`Remarks`] if the given `remarks` are valid.
    #[must_use]
    pub fn new(remarks: impl Into<String>) -> Option<Self> {
        let remarks = remarks.into();
        Self::check(&remarks).then_some(Self(remarks))
    }

    /// Checks whether the given `remarks` are valid [`Remarks`].
    fn check(remarks: impl AsRef<str>) -> bool {
        let remarks = remarks.as_ref();
        !remarks.is_empty() && remarks.len() <= 2048
    }
}

impl FromStr for Remarks {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Remarks`")
    }
}

/// [`DateTime`] when an [`RptRecord`] was created.
pub type CreationDateTime = DateTimeOf<(RptRecord, unit::Creation)>;

/// [`DateTime`] when the next payment of an [`RptRecord`] is due.
pub type DueDateTime = DateTimeOf<(RptRecord, unit::Due)>;

#[cfg(test)]
mod spec {
    use common::DateTime;

    use super::{Owner, PaymentMode, RptRecord, Status, TaxDecNo};
    use crate::domain::property;

    fn record(status: Status, due_at: &str) -> RptRecord {
        RptRecord {
            id: super::Id::new(),
            owner: Owner::Property(property::Id::new()),
            tax_dec_no: TaxDecNo::new("TD-2024-001").unwrap(),
            payment_mode: PaymentMode::Quarterly,
            due_at: DateTime::from_rfc3339(due_at).unwrap().coerce(),
            status,
            remarks: None,
            created_at: DateTime::from_rfc3339("2024-01-01T00:00:00Z")
                .unwrap()
                .coerce(),
        }
    }

    #[test]
    fn overdue_only_when_unpaid_and_past_due() {
        let today = DateTime::from_rfc3339("2024-06-15T12:00:00Z").unwrap();

        assert!(record(Status::Unpaid, "2024-06-14T00:00:00Z")
            .is_overdue(today));
        assert!(!record(Status::Unpaid, "2024-06-15T00:00:00Z")
            .is_overdue(today));
        assert!(!record(Status::Unpaid, "2024-06-16T00:00:00Z")
            .is_overdue(today));
        assert!(!record(Status::Paid, "2024-06-14T00:00:00Z")
            .is_overdue(today));
    }
}
